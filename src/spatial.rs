use crate::bounds::Bounds;
use mint::{Quaternion, Vector3};
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Error)]
pub enum SpatialError {
	#[error("entity is no longer part of the scene graph")]
	NodeGone,
	#[error("entity has no measurable geometry")]
	NoGeometry,
	#[error("host scene graph error: {0}")]
	Host(String),
}

/// Handle to an entity in the host scene graph.
///
/// The layout engine only ever reads bounding boxes and the parent/child tree,
/// and writes positions and scales; entities are created and destroyed by the
/// host. Positions are relative to the entity's parent.
pub trait SpatialNode: Sized {
	/// Stable identity of this entity, used to look up per-item layout overrides.
	fn uid(&self) -> u64;

	/// Bounding box of this entity's own geometry/mesh content, including its
	/// current scale. The engine strips the scale back out itself.
	fn local_bounds(&self) -> Result<Bounds, SpatialError>;

	fn position(&self) -> Result<Vector3<f32>, SpatialError>;
	fn set_position(&self, position: impl Into<Vector3<f32>>) -> Result<(), SpatialError>;

	fn scale(&self) -> Result<Vector3<f32>, SpatialError>;
	fn set_scale(&self, scale: impl Into<Vector3<f32>>) -> Result<(), SpatialError>;

	fn rotation(&self) -> Result<Quaternion<f32>, SpatialError>;
	fn set_rotation(&self, rotation: impl Into<Quaternion<f32>>) -> Result<(), SpatialError>;

	/// Direct children in document order.
	fn children(&self) -> Result<Vec<Self>, SpatialError>;

	/// One-shot completion for a 3D model that is still loading asynchronously,
	/// or `None` once the entity's content is resident.
	fn model_loading(&self) -> Option<oneshot::Receiver<()>> {
		None
	}
}
