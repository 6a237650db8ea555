/// Immutable loader configuration shared by the decoding components.
///
/// Replaces process-wide switches: the clip length, the color mode and the
/// substitute-frame size are fixed once and passed into each component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Number of consecutive frames extracted per sample.
    pub clip_length: usize,
    /// Convert decoded frames to grayscale instead of RGB.
    pub grayscale: bool,
    /// Width of the zero frame substituted for an undecodable frame.
    pub frame_width: usize,
    /// Height of the zero frame substituted for an undecodable frame.
    pub frame_height: usize,
}

impl LoaderConfig {
    pub fn new(clip_length: usize, grayscale: bool, frame_width: usize, frame_height: usize) -> Self {
        Self {
            clip_length,
            grayscale,
            frame_width,
            frame_height,
        }
    }

    /// Channel count implied by the color mode.
    pub fn channels(&self) -> usize {
        if self.grayscale {
            1
        } else {
            3
        }
    }

    /// `(height, width, channels)` of a substitute frame.
    pub fn frame_shape(&self) -> (usize, usize, usize) {
        (self.frame_height, self.frame_width, self.channels())
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            clip_length: 16,
            grayscale: false,
            frame_width: 224,
            frame_height: 224,
        }
    }
}
