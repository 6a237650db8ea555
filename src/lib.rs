//! Dataset-loading utilities for video-classification training
//!
//! This library provides per-sample video dataset access, label-file
//! merging, and video-frame decoding helpers for a training loop that
//! consumes fixed-length clips.

pub mod config;
pub mod dataset;
pub mod error;
pub mod labels;
pub mod loader;
pub mod merge;
pub mod types;
pub mod utils;
pub mod video;

// Re-export commonly used types and functions
pub use config::LoaderConfig;
pub use dataset::{FrameTransform, VideoDataset};
pub use error::DatasetError;
pub use labels::{expand_timestamps, ClassTable, NOT_VISIBLE};
pub use loader::{
    per_frame_samples, per_frame_samples_from_images, whole_label_samples, DecodePolicy,
};
pub use merge::merge_label_files;
pub use types::{Clip, ClipSample, ClipSource, FrameLabeledSample, LabelEntry, LabelSet};
