use log::warn;
use ndarray::Array3;
use opencv::prelude::*;
use opencv::videoio;
use rand::Rng;
use std::path::{Path, PathBuf};

use crate::config::LoaderConfig;
use crate::error::DatasetError;
use crate::labels::ClassTable;
use crate::loader::{whole_label_samples, DecodePolicy};
use crate::types::{Clip, ClipSource};
use crate::video;

/// Hook applied to each decoded frame before stacking.
pub type FrameTransform = dyn Fn(Array3<u8>) -> Array3<u8> + Send + Sync;

/// Classification dataset over class-named video directories.
///
/// Holds one `(path, class)` pair per video; frames are decoded on access.
pub struct VideoDataset {
    samples: Vec<(PathBuf, usize)>,
    config: LoaderConfig,
    transform: Option<Box<FrameTransform>>,
}

impl VideoDataset {
    /// Builds the dataset by enumerating videos under the class-named
    /// subdirectories of `data_root`.
    pub fn from_directory(
        data_root: &Path,
        classes: &ClassTable,
        config: LoaderConfig,
    ) -> Result<Self, DatasetError> {
        let samples = whole_label_samples(data_root, classes, None, DecodePolicy::Lazy, &config)?
            .into_iter()
            .filter_map(|sample| match sample.source {
                ClipSource::Video(path) => Some((path, sample.class)),
                _ => None,
            })
            .collect();
        Ok(Self {
            samples,
            config,
            transform: None,
        })
    }

    /// Sets a transform applied to each frame before stacking.
    pub fn with_transform(mut self, transform: Box<FrameTransform>) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Extracts `clip_length` consecutive frames starting at a uniform
    /// random offset, paired with the sample's class label.
    ///
    /// Videos must be at least `clip_length + 2` frames long. A frame the
    /// codec cannot produce is replaced by an all-zero frame of the
    /// configured size and logged; extraction continues.
    pub fn get(&self, index: usize) -> Result<Clip, DatasetError> {
        let (path, class) = &self.samples[index];
        let clip_length = self.config.clip_length;

        let mut cap = video::open_video(path)?;
        let frame_count = video::frame_count(&cap)?;
        if frame_count < clip_length + 2 {
            return Err(DatasetError::ClipTooShort {
                path: path.clone(),
                frame_count,
                clip_length,
            });
        }
        let start = rand::thread_rng().gen_range(0..=frame_count - 2 - clip_length);
        cap.set(videoio::CAP_PROP_POS_FRAMES, start as f64)?;

        let mut frames = Vec::with_capacity(clip_length);
        let mut frame = Mat::default();
        for _ in 0..clip_length {
            let decoded = match cap.read(&mut frame) {
                Ok(true) if !frame.empty() => {
                    video::convert_frame(&frame, self.config.grayscale).ok()
                }
                _ => None,
            };
            let decoded = match decoded {
                Some(decoded) => decoded,
                None => {
                    let position = cap.get(videoio::CAP_PROP_POS_FRAMES).unwrap_or(-1.0);
                    warn!(
                        "Frame was none for video {} ({} frames, start {}, position {})",
                        path.display(),
                        frame_count,
                        start,
                        position,
                    );
                    video::zero_frame(&self.config)
                }
            };
            let decoded = match &self.transform {
                Some(transform) => transform(decoded),
                None => decoded,
            };
            frames.push(decoded);
        }
        cap.release()?;

        Ok(Clip {
            frames: video::stack_frames(frames)?,
            label: *class as i64,
        })
    }
}
