use crate::config::{MatchRule, PlacementConfig};
use crate::frame::FrameSnapshot;
use crate::math::Pose;
use crate::types::TrackedImage;

/// A qualifying observation, detached from the frame it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Sighting {
    pub image_name: String,
    pub pose: Pose,
}

/// Filters each frame's updated images down to the target reference image.
///
/// Pure: no state survives between frames, and the work done is linear in
/// the number of images updated this frame.
#[derive(Debug, Clone)]
pub struct TrackerPoller {
    target: String,
    rule: MatchRule,
}

impl TrackerPoller {
    pub fn new(target: impl Into<String>, rule: MatchRule) -> Self {
        Self {
            target: target.into(),
            rule,
        }
    }

    pub fn from_config(config: &PlacementConfig) -> Self {
        Self::new(config.target_image.clone(), config.match_rule)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn rule(&self) -> MatchRule {
        self.rule
    }

    /// Images matching the target identity that are currently tracking
    pub fn qualifying<'a>(
        &'a self,
        images: &'a [TrackedImage],
    ) -> impl Iterator<Item = Sighting> + 'a {
        images.iter().filter_map(move |image| {
            if !self.rule.matches(image.name(), &self.target) {
                return None;
            }
            image.center_pose().map(|pose| Sighting {
                image_name: image.name().to_string(),
                pose,
            })
        })
    }

    /// All qualifying sightings of this frame
    pub fn poll(&self, frame: &FrameSnapshot) -> Vec<Sighting> {
        self.qualifying(frame.updated_images()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameInfo;
    use glam::Vec3;

    fn pose(x: f32) -> Pose {
        Pose::from_position(Vec3::new(x, 0.0, 0.0))
    }

    fn frame(images: Vec<TrackedImage>) -> FrameSnapshot {
        FrameSnapshot::new(FrameInfo::new(0, 0.0, 0.0), images)
    }

    #[test]
    fn test_empty_frame_yields_nothing() {
        let poller = TrackerPoller::new("default", MatchRule::Contains);
        assert!(poller.poll(&frame(vec![])).is_empty());
    }

    #[test]
    fn test_non_tracking_states_excluded() {
        let poller = TrackerPoller::new("default", MatchRule::Exact);
        let sightings = poller.poll(&frame(vec![
            TrackedImage::not_tracking("default"),
            TrackedImage::stopped("default"),
        ]));
        assert!(sightings.is_empty());
    }

    #[test]
    fn test_sighting_carries_pose() {
        let poller = TrackerPoller::new("default", MatchRule::Exact);
        let sightings = poller.poll(&frame(vec![TrackedImage::tracking("default", pose(2.0))]));
        assert_eq!(
            sightings,
            vec![Sighting {
                image_name: "default".to_string(),
                pose: pose(2.0)
            }]
        );
    }

    #[test]
    fn test_from_config_uses_target_and_rule() {
        let poller = TrackerPoller::from_config(&PlacementConfig::default());
        assert_eq!(poller.target(), "default");
        assert_eq!(poller.rule(), MatchRule::Contains);
    }
}
