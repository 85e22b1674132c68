use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use glam::{Quat, Vec3};
use log::{info, warn};

use image_anchor::cli::Cli;
use image_anchor::config::AppConfig;
use image_anchor::core::{PlacementController, PlacementEvent, ThreadSpawner};
use image_anchor::frame::FrameIterator;
use image_anchor::loaders::ResourceLoader;
use image_anchor::math::Pose;
use image_anchor::session::{configure_session, load_reference_image, ReferenceImage, SessionCapabilities};
use image_anchor::sim::{DelayedLoader, InMemoryScene, ScriptedTracker};
use image_anchor::traits::{LogNotifier, TrackingSource};
use image_anchor::types::{AssetDescriptor, TrackedImage};

// === Constants ===

/// Placeholder JPEG header used when no reference bitmap is configured
const PLACEHOLDER_REFERENCE: &[u8] = &[0xff, 0xd8, 0xff, 0xe0];
/// The image keeps being re-reported while it stays in view
const TRACKING_REFRESH_FRAMES: u64 = 5;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if cli.fail_load {
        config.placement.asset = AssetDescriptor::View {
            layout: "missing_layout".to_string(),
        };
    }

    // Session setup: the demo pretends the device supports automatic depth
    let reference = load_reference_image(&config.session)
        .or_else(|| Some(ReferenceImage::from_bytes(PLACEHOLDER_REFERENCE.to_vec())));
    let setup = configure_session(
        &config.session,
        SessionCapabilities {
            automatic_depth_supported: true,
        },
        reference,
        &LogNotifier,
    );
    if !setup.can_track(&config.placement.target_image, config.placement.match_rule) {
        warn!(
            "no registered reference image matches target {:?}",
            config.placement.target_image
        );
    }

    let loader = DelayedLoader::new(
        ResourceLoader::with_builtin_views(),
        Duration::from_millis(cli.load_latency_ms),
    );
    let mut controller = PlacementController::new(
        config.placement.clone(),
        Arc::new(loader),
        Box::new(ThreadSpawner),
        Box::new(LogNotifier),
    );

    let image_name = config.session.reference_image_name.clone();
    let image_pose = Pose::new(Vec3::new(0.1, -0.4, -1.2), Quat::from_rotation_y(0.25));
    let mut tracker = ScriptedTracker::with_clock(FrameIterator::new(), cli.frames)
        .with_update(cli.trigger_frame.saturating_sub(3), TrackedImage::not_tracking(image_name.clone()))
        .with_repeating_update(
            cli.trigger_frame..cli.frames,
            TRACKING_REFRESH_FRAMES,
            TrackedImage::tracking(image_name, image_pose),
        )
        .with_update(cli.trigger_frame, TrackedImage::stopped("other"));

    let mut scene = InMemoryScene::new();
    let frame_interval = Duration::from_secs_f32(1.0 / cli.fps.max(1.0));

    println!("Image anchor demo - {} frames, image appears at frame {}", cli.frames, cli.trigger_frame);

    for frame in tracker.by_ref() {
        for event in controller.on_frame(&frame, &mut scene) {
            match event {
                PlacementEvent::RequestIssued { image_name, attempt } => {
                    println!("[frame {:>4}] {image_name} tracked, asset request #{attempt}", frame.info.number)
                }
                PlacementEvent::Placed(placement) => {
                    println!("[frame {:>4}] placed node {:?}", frame.info.number, placement.node)
                }
                PlacementEvent::Failed { error, retrying } => {
                    println!("[frame {:>4}] load failed: {error} (retrying: {retrying})", frame.info.number)
                }
                PlacementEvent::StaleCompletion { epoch } => {
                    println!("[frame {:>4}] discarded stale load (epoch {})", frame.info.number, epoch.value())
                }
            }
        }
        std::thread::sleep(frame_interval);
    }

    info!("ran {} frames, final phase {:?}", tracker.frame_count(), controller.state().kind());
    controller.end_session();

    println!("\nScene graph:\n{}", scene.describe());
    match controller.state().placement() {
        Some(placement) => {
            let world = scene.world_transform(placement.node).unwrap_or_else(|| placement.world_transform());
            let (scale, rotation, translation) = world.to_scale_rotation_translation();
            println!("Placed node world transform:");
            println!("  translation: {translation:?}");
            println!("  rotation:    {rotation:?}");
            println!("  scale:       {scale:?}");
        }
        None => println!("Nothing placed (phase {:?})", controller.state().kind()),
    }

    Ok(())
}
