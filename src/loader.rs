use glob::glob;
use log::info;
use std::path::{Path, PathBuf};

use crate::config::LoaderConfig;
use crate::error::DatasetError;
use crate::labels::{expand_timestamps, ClassTable};
use crate::types::{
    ClipSample, ClipSource, FrameLabeledSample, FRAME_IMAGE_FORMAT, VIDEO_FORMATS,
};
use crate::utils::{create_progress_bar, read_label_set};
use crate::video;

/// Whether enumeration keeps file references or decodes frames up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePolicy {
    Lazy,
    Eager,
}

/// Enumerates one sample per video under class-named subdirectories of
/// `data_root`, labelled with the class index.
///
/// `limit` caps the total number of emitted samples.
pub fn whole_label_samples(
    data_root: &Path,
    classes: &ClassTable,
    limit: Option<usize>,
    policy: DecodePolicy,
    config: &LoaderConfig,
) -> Result<Vec<ClipSample>, DatasetError> {
    let mut samples = Vec::new();
    for (class, name) in classes.iter().enumerate() {
        let mut video_paths: Vec<PathBuf> = Vec::new();
        for ext in VIDEO_FORMATS {
            let pattern = format!("{}/**/*.{}", data_root.join(name).display(), ext);
            video_paths.extend(glob(&pattern)?.filter_map(|entry| entry.ok()));
        }
        video_paths.sort();

        let pb = create_progress_bar(video_paths.len() as u64, name);
        for video_path in video_paths {
            let source = match policy {
                DecodePolicy::Lazy => ClipSource::Video(video_path),
                DecodePolicy::Eager => {
                    ClipSource::Frames(video::decode_frames(&video_path, config.grayscale)?)
                }
            };
            samples.push(ClipSample { source, class });
            pb.inc(1);
            if limit.is_some_and(|n| samples.len() == n) {
                pb.finish_and_clear();
                return Ok(samples);
            }
        }
        pb.finish_and_clear();
    }
    info!("Enumerated {} samples", samples.len());
    Ok(samples)
}

/// Enumerates samples with per-frame labels from the aggregate
/// `labels.json` under `data_root`, where each entry references a video.
///
/// The label file and every referenced video must exist.
pub fn per_frame_samples(
    data_root: &Path,
    classes: &ClassTable,
    limit: Option<usize>,
    policy: DecodePolicy,
    config: &LoaderConfig,
) -> Result<Vec<FrameLabeledSample>, DatasetError> {
    let label_set = read_label_set(&data_root.join("labels.json"))?;

    let pb = create_progress_bar(label_set.entries.len() as u64, "Labels");
    let mut samples = Vec::new();
    for entry in &label_set.entries {
        let video_path = data_root.join(&entry.file_path);
        if !video_path.is_file() {
            return Err(DatasetError::MissingFile(video_path));
        }
        let video_length = video::probe_frame_count(&video_path)?;
        let labels = expand_timestamps(entry, classes, video_length)?;

        let source = match policy {
            DecodePolicy::Lazy => ClipSource::Video(video_path),
            DecodePolicy::Eager => {
                ClipSource::Frames(video::decode_frames(&video_path, config.grayscale)?)
            }
        };
        samples.push(FrameLabeledSample { source, labels });
        pb.inc(1);
        if limit.is_some_and(|n| samples.len() == n) {
            break;
        }
    }
    pb.finish_and_clear();
    info!("Enumerated {} per-frame labelled samples", samples.len());
    Ok(samples)
}

/// Like [`per_frame_samples`], but each entry references a directory of
/// per-frame images instead of a video file. The sorted image list stands in
/// for the frame sequence.
pub fn per_frame_samples_from_images(
    data_root: &Path,
    classes: &ClassTable,
    limit: Option<usize>,
    policy: DecodePolicy,
    config: &LoaderConfig,
) -> Result<Vec<FrameLabeledSample>, DatasetError> {
    let label_set = read_label_set(&data_root.join("labels.json"))?;

    let pb = create_progress_bar(label_set.entries.len() as u64, "Labels");
    let mut samples = Vec::new();
    for entry in &label_set.entries {
        let frames_dir = data_root.join(&entry.file_path);
        let pattern = format!("{}/*.{}", frames_dir.display(), FRAME_IMAGE_FORMAT);
        let mut image_paths: Vec<PathBuf> = glob(&pattern)?.filter_map(|path| path.ok()).collect();
        image_paths.sort();
        if image_paths.is_empty() {
            return Err(DatasetError::MissingFile(frames_dir));
        }
        let labels = expand_timestamps(entry, classes, image_paths.len())?;

        let source = match policy {
            DecodePolicy::Lazy => ClipSource::Images(image_paths),
            DecodePolicy::Eager => {
                ClipSource::Frames(video::decode_images(&image_paths, config.grayscale)?)
            }
        };
        samples.push(FrameLabeledSample { source, labels });
        pb.inc(1);
        if limit.is_some_and(|n| samples.len() == n) {
            break;
        }
    }
    pb.finish_and_clear();
    info!("Enumerated {} per-frame labelled samples", samples.len());
    Ok(samples)
}
