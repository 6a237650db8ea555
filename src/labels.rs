use ndarray::{s, Array1};
use std::fs;
use std::path::Path;

use crate::error::DatasetError;
use crate::types::LabelEntry;

/// Name of the class assigned to frames where nothing is visible.
pub const NOT_VISIBLE: &str = "not_visible";

/// Ordered mapping from class index to class name, read once from a
/// newline-delimited `classes.names` file.
#[derive(Debug, Clone)]
pub struct ClassTable {
    names: Vec<String>,
}

impl ClassTable {
    /// Loads the table from a newline-delimited file; line index = class index.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        if !path.is_file() {
            return Err(DatasetError::MissingFile(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let names = content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Ok(Self { names })
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Class names in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Index of the [`NOT_VISIBLE`] class.
    pub fn not_visible_index(&self) -> Result<usize, DatasetError> {
        self.names
            .iter()
            .position(|name| name == NOT_VISIBLE)
            .ok_or(DatasetError::MissingNotVisibleClass)
    }

    /// First class (in index order) whose name appears in `path`.
    pub fn match_path(&self, path: &str) -> Result<usize, DatasetError> {
        self.names
            .iter()
            .position(|name| path.contains(name.as_str()))
            .ok_or_else(|| DatasetError::UnknownClass(path.to_string()))
    }
}

/// Expands an entry's visibility timestamps into one class label per frame.
///
/// Every frame starts as `not_visible`. Walking the timestamps in order
/// toggles visibility; while visible, frames from the current timestamp up to
/// (exclusive) the next one carry the class matched from the entry's path. A
/// trailing unmatched timestamp means the object stays visible to the end of
/// the video. Consecutive duplicate timestamps are no-ops, and timestamps
/// past the end of the video clamp to its length.
pub fn expand_timestamps(
    entry: &LabelEntry,
    classes: &ClassTable,
    video_length: usize,
) -> Result<Array1<i64>, DatasetError> {
    let video_cls = classes.match_path(&entry.file_path)? as i64;
    let not_visible_cls = classes.not_visible_index()? as i64;

    let mut labels = Array1::from_elem(video_length, not_visible_cls);
    let mut visible = false;
    let stamps = &entry.time_stamps;
    for (i, &stamp) in stamps.iter().enumerate() {
        // A repeated timestamp is a single toggle, not two
        if i > 0 && stamp == stamps[i - 1] {
            continue;
        }
        visible = !visible;
        if visible {
            let start = stamp.min(video_length);
            let end = match stamps.get(i + 1) {
                Some(&next) => next.min(video_length),
                None => video_length,
            };
            if start < end {
                labels.slice_mut(s![start..end]).fill(video_cls);
            }
        }
    }
    Ok(labels)
}
