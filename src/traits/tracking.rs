use crate::frame::FrameSnapshot;

/// Per-frame source of tracked-image updates
pub trait TrackingSource: Iterator<Item = FrameSnapshot> {
    /// Get the total number of frames produced so far
    fn frame_count(&self) -> u64;
}
