use ndarray::{Array1, Array4};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Supported video containers
pub const VIDEO_FORMATS: &[&str] = &["avi", "mp4"];

// Extension of per-frame image dumps
pub const FRAME_IMAGE_FORMAT: &str = "jpg";

/// One labelled recording: a path relative to the dataset root and the frame
/// indices at which the tracked object toggles between visible and hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEntry {
    pub file_path: String,
    pub time_stamps: Vec<usize>,
}

/// The aggregate label document, persisted as `labels.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelSet {
    pub entries: Vec<LabelEntry>,
}

/// Where a sample's frames come from.
///
/// Lazy enumeration keeps the file references; eager enumeration decodes up
/// front into a `(frames, height, width, channels)` stack with one channel
/// for grayscale and three for RGB.
#[derive(Debug, Clone)]
pub enum ClipSource {
    Video(PathBuf),
    Images(Vec<PathBuf>),
    Frames(Array4<u8>),
}

/// A sample with a single class label covering the whole recording.
#[derive(Debug, Clone)]
pub struct ClipSample {
    pub source: ClipSource,
    pub class: usize,
}

/// A sample with one class label per frame.
#[derive(Debug, Clone)]
pub struct FrameLabeledSample {
    pub source: ClipSource,
    pub labels: Array1<i64>,
}

/// A fixed-length frame stack paired with its class label, as handed to the
/// training loop.
#[derive(Debug, Clone)]
pub struct Clip {
    pub frames: Array4<u8>,
    pub label: i64,
}
