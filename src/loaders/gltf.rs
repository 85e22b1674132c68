use std::path::Path;

use glam::{Mat4, Vec3};

use crate::error::AssetLoadError;
use crate::math::Aabb;
use crate::types::{AssetDescriptor, RenderableAsset, RenderableContent};

#[derive(Default)]
struct ModelStats {
    meshes: usize,
    vertices: usize,
    bounds: Option<Aabb>,
}

/// Builds a model renderable from a glTF or GLB file.
/// Blocking; call it from a background task.
pub fn load_model(path: &Path) -> Result<RenderableAsset, AssetLoadError> {
    log::debug!("loading glTF model {}", path.display());

    let (document, buffers, _images) = gltf::import(path).map_err(|err| match err {
        gltf::Error::Io(io) => AssetLoadError::Io {
            path: path.to_path_buf(),
            reason: io.to_string(),
        },
        other => AssetLoadError::Decode {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    let mut stats = ModelStats::default();
    for scene in document.scenes() {
        for node in scene.nodes() {
            visit_node(&node, &buffers, &Mat4::IDENTITY, &mut stats);
        }
    }

    if stats.meshes == 0 {
        return Err(AssetLoadError::Decode {
            path: path.to_path_buf(),
            reason: "no meshes reachable from any scene".to_string(),
        });
    }

    log::debug!(
        "model {} has {} meshes, {} vertices",
        path.display(),
        stats.meshes,
        stats.vertices
    );

    Ok(RenderableAsset {
        descriptor: AssetDescriptor::Model {
            path: path.to_path_buf(),
        },
        content: RenderableContent::Model {
            meshes: stats.meshes,
            vertices: stats.vertices,
            bounds: stats.bounds,
        },
    })
}

/// Recursively accumulates mesh statistics in model space
fn visit_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    stats: &mut ModelStats,
) {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        stats.meshes += 1;
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data[..]));
            let Some(positions) = reader.read_positions() else {
                continue;
            };

            let points: Vec<Vec3> = positions
                .map(|pos| global_transform.transform_point3(Vec3::from_array(pos)))
                .collect();
            stats.vertices += points.len();

            if let Some(primitive_bounds) = Aabb::from_points(points) {
                stats.bounds = Some(match stats.bounds {
                    Some(bounds) => bounds.union(&primitive_bounds),
                    None => primitive_bounds,
                });
            }
        }
    }

    for child in node.children() {
        visit_node(&child, buffers, &global_transform, stats);
    }
}
