use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::path::Path;

use crate::error::DatasetError;
use crate::types::LabelSet;

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .progress_chars("#>-"),
    );
    pb
}

/// Reads a label document, failing if it is absent or malformed.
pub fn read_label_set(path: &Path) -> Result<LabelSet, DatasetError> {
    if !path.is_file() {
        return Err(DatasetError::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}
