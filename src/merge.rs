use glob::glob;
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::DatasetError;
use crate::types::{LabelEntry, LabelSet};
use crate::utils::{create_progress_bar, read_label_set};

/// Class name inferred from the first character of a recording directory.
pub fn class_for_prefix(prefix: char) -> Result<&'static str, DatasetError> {
    match prefix {
        'g' => Ok("glass"),
        'h' => Ok("hair"),
        'p' => Ok("plastic"),
        's' => Ok("steel"),
        'f' => Ok("fiber"),
        other => Err(DatasetError::UnknownClassPrefix(other)),
    }
}

/// Drops the leading dataset-root segment and prefixes the class name
/// inferred from the recording directory, e.g. `data/g01/clip.avi` becomes
/// `glass/g01/clip.avi`.
pub fn rewrite_entry_path(file_path: &str) -> Result<String, DatasetError> {
    let segments: Vec<&str> = file_path.split('/').skip(1).collect();
    let prefix = segments
        .first()
        .and_then(|segment| segment.chars().next())
        .ok_or_else(|| DatasetError::UnknownClass(file_path.to_string()))?;
    let class_name = class_for_prefix(prefix)?;

    let mut rewritten = vec![class_name];
    rewritten.extend(segments);
    Ok(rewritten.join("/"))
}

/// Merges every per-recording label file in `input_dir` into a single
/// `labels.json` under `output_dir`, rewriting entry paths by inferred
/// class. Refuses to run if the output file already exists.
pub fn merge_label_files(input_dir: &Path, output_dir: &Path) -> Result<PathBuf, DatasetError> {
    let output_path = output_dir.join("labels.json");
    if output_path.exists() {
        return Err(DatasetError::OutputExists(output_path));
    }
    fs::create_dir_all(output_dir)?;

    let pattern = format!("{}/*.json", input_dir.display());
    let label_files: Vec<PathBuf> = glob(&pattern)?.filter_map(|entry| entry.ok()).collect();

    let pb = create_progress_bar(label_files.len() as u64, "Merge");
    let mut merged = LabelSet::default();
    for label_file in &label_files {
        let label_set = read_label_set(label_file)?;
        for entry in label_set.entries {
            merged.entries.push(LabelEntry {
                file_path: rewrite_entry_path(&entry.file_path)?,
                time_stamps: entry.time_stamps,
            });
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "Writing {} entries to {}",
        merged.entries.len(),
        output_path.display()
    );
    let mut writer = BufWriter::new(File::create(&output_path)?);
    serde_json::to_writer_pretty(&mut writer, &merged)?;
    writer.flush()?;
    Ok(output_path)
}
