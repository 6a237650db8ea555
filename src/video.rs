use ndarray::{Array3, Array4};
use opencv::{imgcodecs, imgproc, prelude::*, videoio};
use std::path::{Path, PathBuf};

use crate::config::LoaderConfig;
use crate::error::DatasetError;

/// Opens a video file for decoding.
pub fn open_video(path: &Path) -> Result<videoio::VideoCapture, DatasetError> {
    let cap = videoio::VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)?;
    if !cap.is_opened()? {
        return Err(DatasetError::MissingFile(path.to_path_buf()));
    }
    Ok(cap)
}

/// Frame count reported by the container.
pub fn frame_count(cap: &videoio::VideoCapture) -> Result<usize, DatasetError> {
    Ok(cap.get(videoio::CAP_PROP_FRAME_COUNT)? as usize)
}

/// Opens `path` just long enough to read its frame count.
pub fn probe_frame_count(path: &Path) -> Result<usize, DatasetError> {
    let mut cap = open_video(path)?;
    let count = frame_count(&cap)?;
    cap.release()?;
    Ok(count)
}

/// Converts a BGR decoder frame to the configured color space as an
/// `(height, width, channels)` array, keeping a channel dimension of one for
/// grayscale.
pub fn convert_frame(frame: &Mat, grayscale: bool) -> Result<Array3<u8>, DatasetError> {
    let mut converted = Mat::default();
    let (code, channels) = if grayscale {
        (imgproc::COLOR_BGR2GRAY, 1)
    } else {
        (imgproc::COLOR_BGR2RGB, 3)
    };
    imgproc::cvt_color(frame, &mut converted, code, 0)?;
    mat_to_array(&converted, channels)
}

fn mat_to_array(mat: &Mat, channels: usize) -> Result<Array3<u8>, DatasetError> {
    let rows = mat.rows() as usize;
    let cols = mat.cols() as usize;
    let data = mat.data_bytes()?.to_vec();
    Ok(Array3::from_shape_vec((rows, cols, channels), data)?)
}

/// All-zero stand-in for a frame that failed to decode.
pub fn zero_frame(config: &LoaderConfig) -> Array3<u8> {
    Array3::zeros(config.frame_shape())
}

/// Stacks `(height, width, channels)` frames along a new leading axis.
pub fn stack_frames(frames: Vec<Array3<u8>>) -> Result<Array4<u8>, DatasetError> {
    let (height, width, channels) = frames.first().map(|frame| frame.dim()).unwrap_or((0, 0, 0));
    let mut data = Vec::with_capacity(frames.len() * height * width * channels);
    for frame in &frames {
        data.extend(frame.iter().copied());
    }
    Ok(Array4::from_shape_vec(
        (frames.len(), height, width, channels),
        data,
    )?)
}

/// Decodes every frame of `path` into a `(frames, height, width, channels)`
/// stack. Decoding stops at the first frame the codec cannot produce.
pub fn decode_frames(path: &Path, grayscale: bool) -> Result<Array4<u8>, DatasetError> {
    let mut cap = open_video(path)?;
    let mut frames = Vec::new();
    let mut frame = Mat::default();
    while cap.read(&mut frame)? && !frame.empty() {
        frames.push(convert_frame(&frame, grayscale)?);
    }
    cap.release()?;
    stack_frames(frames)
}

/// Decodes a sorted list of per-frame images into a frame stack.
pub fn decode_images(paths: &[PathBuf], grayscale: bool) -> Result<Array4<u8>, DatasetError> {
    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        let image = imgcodecs::imread(&path.to_string_lossy(), imgcodecs::IMREAD_COLOR)?;
        if image.empty() {
            return Err(DatasetError::MissingFile(path.clone()));
        }
        frames.push(convert_frame(&image, grayscale)?);
    }
    stack_frames(frames)
}
