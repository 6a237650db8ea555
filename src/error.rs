use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the dataset loaders and the label tooling.
///
/// A failed frame decode during clip extraction is not represented here; it
/// is logged and the frame is substituted with zeros (see
/// [`crate::dataset::VideoDataset::get`]).
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("missing file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("there is no class corresponding to {0}")]
    UnknownClass(String),

    #[error("the class table has no \"not_visible\" entry")]
    MissingNotVisibleClass,

    #[error("no class registered for path prefix {0:?}")]
    UnknownClassPrefix(char),

    #[error("there is already a label file at {}", .0.display())]
    OutputExists(PathBuf),

    #[error(
        "video {} has {} frames, too short for a clip of {}",
        .path.display(),
        .frame_count,
        .clip_length
    )]
    ClipTooShort {
        path: PathBuf,
        frame_count: usize,
        clip_length: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse label file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("frame shape mismatch: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
