use crate::types::TrackedImage;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the session started
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// One rendered frame as seen by the tracking subsystem.
///
/// Only images whose tracking state changed this frame are listed, so the
/// poll cost scales with the update set rather than the registered set.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub info: FrameInfo,
    pub updated_images: Vec<TrackedImage>,
}

impl FrameSnapshot {
    pub fn new(info: FrameInfo, updated_images: Vec<TrackedImage>) -> Self {
        Self {
            info,
            updated_images,
        }
    }

    /// Frame with no tracking updates
    pub fn empty(info: FrameInfo) -> Self {
        Self::new(info, Vec::new())
    }

    pub fn updated_images(&self) -> &[TrackedImage] {
        &self.updated_images
    }
}

/// Infinite iterator that stamps frames with wall-clock timing
/// Use this in a loop: `for frame in frames { ... }`
pub struct FrameIterator {
    frame_number: u64,
    start_time: std::time::Instant,
    last_frame_time: std::time::Instant,
}

impl FrameIterator {
    pub fn new() -> Self {
        let now = std::time::Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let now = std::time::Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time = now.duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}
