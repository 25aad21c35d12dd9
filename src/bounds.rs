use glam::Vec3;

/// Size of an entity's geometry along the container's local axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
	pub width: f32,
	pub height: f32,
	pub depth: f32,
}
impl Bounds {
	pub fn new(width: f32, height: f32, depth: f32) -> Self {
		Bounds {
			width,
			height,
			depth,
		}
	}

	/// No usable area to lay anything out in. Depth may legitimately be zero (planes).
	pub fn is_empty(&self) -> bool {
		self.width <= f32::EPSILON || self.height <= f32::EPSILON
	}

	/// Divide out an entity's current scale to get its geometry-space size.
	pub fn strip_scale(&self, scale: Vec3) -> Self {
		fn strip(size: f32, scale: f32) -> f32 {
			if scale.abs() > f32::EPSILON {
				size / scale
			} else {
				size
			}
		}
		Bounds {
			width: strip(self.width, scale.x),
			height: strip(self.height, scale.y),
			depth: strip(self.depth, scale.z),
		}
	}
}
impl From<[f32; 3]> for Bounds {
	fn from([width, height, depth]: [f32; 3]) -> Self {
		Bounds {
			width,
			height,
			depth,
		}
	}
}
