use crate::bounds::Bounds;
use glam::Vec3;
use mint::Vector2;
use serde::{Deserialize, Serialize};

/// Main-axis orientation of a flexbox container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	#[default]
	Row,
	Column,
}

/// Distribution of free space among items along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
	#[default]
	Start,
	End,
	Center,
	Between,
	Around,
}

/// Distribution of lines (and items within them) along the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
	#[default]
	Start,
	End,
	Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
	X,
	Y,
}
impl Axis {
	pub fn set(self, point: &mut Vec3, value: f32) {
		match self {
			Axis::X => point.x = value,
			Axis::Y => point.y = value,
		}
	}
	pub fn translate(self, point: &mut Vec3, delta: f32) {
		match self {
			Axis::X => point.x += delta,
			Axis::Y => point.y += delta,
		}
	}
	pub fn size_of(self, bounds: &Bounds) -> f32 {
		match self {
			Axis::X => bounds.width,
			Axis::Y => bounds.height,
		}
	}
	pub fn gap_of(self, gap: Vector2<f32>) -> f32 {
		match self {
			Axis::X => gap.x,
			Axis::Y => gap.y,
		}
	}
}

/// Axis mapping resolved once per layout run so the passes never branch on direction.
///
/// Layout space runs from `-dimension/2` toward `+dimension/2`; the signs convert
/// that into world coordinates. Rows advance along +x with lines stacking down -y,
/// columns advance down -y with lines stacking along +x.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Axes {
	pub main: Axis,
	pub cross: Axis,
	pub main_sign: f32,
	pub cross_sign: f32,
}
impl Axes {
	pub fn resolve(direction: Direction) -> Self {
		match direction {
			Direction::Row => Axes {
				main: Axis::X,
				cross: Axis::Y,
				main_sign: 1.0,
				cross_sign: -1.0,
			},
			Direction::Column => Axes {
				main: Axis::Y,
				cross: Axis::X,
				main_sign: -1.0,
				cross_sign: 1.0,
			},
		}
	}
}
