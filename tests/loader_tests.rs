use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use futures::executor::block_on;
use glam::Vec3;

use image_anchor::config::{AppConfig, MatchRule, RetryPolicy};
use image_anchor::error::AssetLoadError;
use image_anchor::loaders::{load_model, ResourceLoader};
use image_anchor::math::Aabb;
use image_anchor::traits::AssetLoader;
use image_anchor::types::{AssetDescriptor, RenderableContent};

// ============================================================================
// Fixtures
// ============================================================================

/// One triangle (0,0,0) (1,0,0) (0,1,0) under a node translated by (0,2,0)
const TRIANGLE_GLTF: &str = r#"{
  "asset": {"version": "2.0"},
  "scene": 0,
  "scenes": [{"nodes": [0]}],
  "nodes": [{"mesh": 0, "translation": [0, 2, 0]}],
  "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
  "buffers": [{
    "byteLength": 36,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
  }],
  "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 36}],
  "accessors": [{
    "bufferView": 0,
    "componentType": 5126,
    "count": 3,
    "type": "VEC3",
    "min": [0, 0, 0],
    "max": [1, 1, 0]
  }]
}"#;

const EMPTY_SCENE_GLTF: &str = r#"{
  "asset": {"version": "2.0"},
  "scene": 0,
  "scenes": [{"nodes": [0]}],
  "nodes": [{"name": "empty"}]
}"#;

fn fixture_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("image-anchor-{}-{test}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_fixture(test: &str, name: &str, contents: &str) -> PathBuf {
    let path = fixture_dir(test).join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// glTF models
// ============================================================================

#[test]
fn test_load_model_counts_meshes_and_bounds() {
    let path = write_fixture("counts", "triangle.gltf", TRIANGLE_GLTF);
    let asset = load_model(&path).unwrap();

    assert_eq!(asset.descriptor, AssetDescriptor::Model { path: path.clone() });
    match asset.content {
        RenderableContent::Model {
            meshes,
            vertices,
            bounds,
        } => {
            assert_eq!(meshes, 1);
            assert_eq!(vertices, 3);
            assert_eq!(
                bounds,
                Some(Aabb::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 3.0, 0.0)))
            );
        }
        other => panic!("expected a model, got {other:?}"),
    }
}

#[test]
fn test_load_model_missing_file_is_io_error() {
    let path = fixture_dir("missing").join("nope.gltf");
    assert!(matches!(load_model(&path), Err(AssetLoadError::Io { .. })));
}

#[test]
fn test_load_model_garbage_is_decode_error() {
    let path = write_fixture("garbage", "broken.gltf", "{ not gltf");
    assert!(matches!(load_model(&path), Err(AssetLoadError::Decode { .. })));
}

#[test]
fn test_load_model_without_meshes_is_decode_error() {
    let path = write_fixture("empty", "empty.gltf", EMPTY_SCENE_GLTF);
    match load_model(&path) {
        Err(AssetLoadError::Decode { reason, .. }) => assert!(reason.contains("no meshes")),
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn test_resource_loader_defers_model_parsing() {
    let path = write_fixture("deferred", "triangle.gltf", TRIANGLE_GLTF);
    let loader: Arc<dyn AssetLoader> = Arc::new(ResourceLoader::with_builtin_views());

    let future = loader.load(&AssetDescriptor::Model { path: path.clone() });
    // Nothing is read until the future is polled
    let asset = block_on(future).unwrap();
    assert!(matches!(asset.content, RenderableContent::Model { meshes: 1, .. }));
}

#[test]
fn test_resource_loader_unknown_view_is_missing() {
    let loader = ResourceLoader::with_builtin_views();
    let result = block_on(loader.load(&AssetDescriptor::View {
        layout: "missing_layout".to_string(),
    }));
    assert_eq!(
        result,
        Err(AssetLoadError::ResourceMissing("missing_layout".to_string()))
    );
}

// ============================================================================
// Config files
// ============================================================================

#[test]
fn test_config_file_overrides_defaults() {
    let path = write_fixture(
        "config",
        "config.json",
        r#"{
          "placement": {
            "target_image": "poster",
            "match_rule": "exact",
            "retry": {"mode": "on_next_sighting", "max_attempts": 3},
            "load_timeout_secs": 2.5,
            "asset": {"kind": "model", "path": "assets/poster.glb"}
          },
          "session": {"reference_image_name": "poster"}
        }"#,
    );

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.placement.target_image, "poster");
    assert_eq!(config.placement.match_rule, MatchRule::Exact);
    assert_eq!(
        config.placement.retry,
        RetryPolicy::OnNextSighting { max_attempts: 3 }
    );
    assert_eq!(config.placement.load_timeout_secs, Some(2.5));
    assert_eq!(
        config.placement.asset,
        AssetDescriptor::Model {
            path: PathBuf::from("assets/poster.glb")
        }
    );
    // Untouched fields keep the sample values
    assert_eq!(config.placement.vertical_shift, -10.0);
    assert_eq!(config.placement.scale, 0.2);
    assert_eq!(config.session.reference_image_name, "poster");
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let path = write_fixture("invalid", "config.json", r#"{"placement": {"scale": 0.0}}"#);
    let err = AppConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("scale"));
}

#[test]
fn test_missing_config_file_reports_path() {
    let path = fixture_dir("noconfig").join("absent.json");
    let err = AppConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}
