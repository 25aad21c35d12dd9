use crate::{
	bounds::Bounds,
	spatial::{SpatialError, SpatialNode},
};
use glam::{Quat, Vec3};
use mint::{Quaternion, Vector3};
use std::{
	cell::RefCell,
	rc::Rc,
	sync::atomic::{AtomicU64, Ordering},
};
use tokio::sync::oneshot;

static NEXT_UID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
struct DummyNode {
	bounds: Bounds,
	position: Vec3,
	rotation: Quat,
	scale: Vec3,
	children: Vec<DummySpatial>,
	model_load: Option<oneshot::Receiver<()>>,
}

/// In-memory scene node for tests, demos, and prototyping without a host scene
/// graph. Handles are cheap clones pointing at the same node.
#[derive(Debug, Clone)]
pub struct DummySpatial {
	uid: u64,
	node: Rc<RefCell<DummyNode>>,
}
impl DummySpatial {
	pub fn new(bounds: Bounds) -> Self {
		DummySpatial {
			uid: NEXT_UID.fetch_add(1, Ordering::Relaxed),
			node: Rc::new(RefCell::new(DummyNode {
				bounds,
				position: Vec3::ZERO,
				rotation: Quat::IDENTITY,
				scale: Vec3::ONE,
				children: Vec::new(),
				model_load: None,
			})),
		}
	}

	pub fn add_child(&self, child: &DummySpatial) {
		self.node.borrow_mut().children.push(child.clone());
	}

	pub fn set_bounds(&self, bounds: Bounds) {
		self.node.borrow_mut().bounds = bounds;
	}

	/// Mark this entity's model as still loading asynchronously; send on the
	/// returned channel to finish the load.
	pub fn loading_model(&self) -> oneshot::Sender<()> {
		let (sender, receiver) = oneshot::channel();
		self.node.borrow_mut().model_load = Some(receiver);
		sender
	}
}
impl SpatialNode for DummySpatial {
	fn uid(&self) -> u64 {
		self.uid
	}

	fn local_bounds(&self) -> Result<Bounds, SpatialError> {
		let node = self.node.borrow();
		Ok(Bounds {
			width: node.bounds.width * node.scale.x,
			height: node.bounds.height * node.scale.y,
			depth: node.bounds.depth * node.scale.z,
		})
	}

	fn position(&self) -> Result<Vector3<f32>, SpatialError> {
		Ok(self.node.borrow().position.into())
	}
	fn set_position(&self, position: impl Into<Vector3<f32>>) -> Result<(), SpatialError> {
		let position: Vector3<f32> = position.into();
		self.node.borrow_mut().position = position.into();
		Ok(())
	}

	fn scale(&self) -> Result<Vector3<f32>, SpatialError> {
		Ok(self.node.borrow().scale.into())
	}
	fn set_scale(&self, scale: impl Into<Vector3<f32>>) -> Result<(), SpatialError> {
		let scale: Vector3<f32> = scale.into();
		self.node.borrow_mut().scale = scale.into();
		Ok(())
	}

	fn rotation(&self) -> Result<Quaternion<f32>, SpatialError> {
		Ok(self.node.borrow().rotation.into())
	}
	fn set_rotation(&self, rotation: impl Into<Quaternion<f32>>) -> Result<(), SpatialError> {
		let rotation: Quaternion<f32> = rotation.into();
		self.node.borrow_mut().rotation = rotation.into();
		Ok(())
	}

	fn children(&self) -> Result<Vec<Self>, SpatialError> {
		Ok(self.node.borrow().children.clone())
	}

	fn model_loading(&self) -> Option<oneshot::Receiver<()>> {
		self.node.borrow_mut().model_load.take()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn local_bounds_include_scale() {
		let node = DummySpatial::new(Bounds::new(1.0, 2.0, 0.5));
		node.set_scale([2.0, 2.0, 2.0]).unwrap();
		let bounds = node.local_bounds().unwrap();
		assert_eq!(bounds, Bounds::new(2.0, 4.0, 1.0));
	}

	#[test]
	fn uids_are_unique_across_handles() {
		let a = DummySpatial::new(Bounds::default());
		let b = DummySpatial::new(Bounds::default());
		assert_ne!(a.uid(), b.uid());
		assert_eq!(a.uid(), a.clone().uid());
	}

	#[test]
	fn model_load_channel_is_one_shot() {
		let node = DummySpatial::new(Bounds::default());
		assert!(node.model_loading().is_none());
		let _sender = node.loading_model();
		assert!(node.model_loading().is_some());
		assert!(node.model_loading().is_none());
	}
}
