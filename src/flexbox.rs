use crate::{
	bounds::Bounds,
	breakpoints::{Breakpoint, ColumnSpans},
	direction::{Align, Axes, Direction, Justify},
	loading::all_loads_finished,
	spatial::{SpatialError, SpatialNode},
};
use glam::{Quat, Vec3};
use mint::Vector2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Configuration of a flexbox container, mirroring the host's declarative properties.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexboxSettings {
	pub direction: Direction,
	pub justify: Justify,
	pub align_items: Align,
	pub wrap: bool,
	/// Spacing between items; x applies horizontally, y vertically.
	pub gap: Vector2<f32>,
}
impl Default for FlexboxSettings {
	fn default() -> Self {
		FlexboxSettings {
			direction: Direction::Row,
			justify: Justify::Start,
			align_items: Align::Start,
			wrap: false,
			gap: [0.0; 2].into(),
		}
	}
}

/// Per-item layout overrides, registered on the container by item uid.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexItemSettings {
	/// Consume leftover main-axis space within this item's line.
	pub grow: bool,
	pub column_spans: ColumnSpans,
}

/// Flexbox layout engine for one container entity.
///
/// The container and its children stay owned by the host scene graph; this only
/// reads their bounding boxes and writes positions and scales. Invalidation is a
/// plain dirty flag: property setters and child add/remove notifications mark the
/// layout dirty, and the per-frame [`Flexbox::update`] runs at most one full
/// recomputation.
pub struct Flexbox<S: SpatialNode> {
	container: S,
	settings: FlexboxSettings,
	item_settings: FxHashMap<u64, FlexItemSettings>,
	breakpoint: Breakpoint,
	dirty: bool,
}
impl<S: SpatialNode> Flexbox<S> {
	pub fn new(container: S, settings: FlexboxSettings) -> Self {
		Flexbox {
			container,
			settings,
			item_settings: FxHashMap::default(),
			breakpoint: Breakpoint::default(),
			dirty: true,
		}
	}

	pub fn container(&self) -> &S {
		&self.container
	}
	pub fn settings(&self) -> &FlexboxSettings {
		&self.settings
	}
	pub fn set_settings(&mut self, settings: FlexboxSettings) {
		self.settings = settings;
		self.dirty = true;
	}

	pub fn set_item_settings(&mut self, item: &S, settings: FlexItemSettings) {
		self.item_settings.insert(item.uid(), settings);
		self.dirty = true;
	}
	pub fn clear_item_settings(&mut self, item: &S) {
		if self.item_settings.remove(&item.uid()).is_some() {
			self.dirty = true;
		}
	}

	pub fn breakpoint(&self) -> Breakpoint {
		self.breakpoint
	}
	pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
		if breakpoint != self.breakpoint {
			self.breakpoint = breakpoint;
			self.dirty = true;
		}
	}
	pub fn set_viewport_width(&mut self, width: u32) {
		self.set_breakpoint(Breakpoint::from_viewport_width(width));
	}

	/// Call when the host reports a child attached to the container.
	pub fn child_added(&mut self) {
		self.dirty = true;
	}
	/// Call when the host reports a child detached from the container.
	pub fn child_removed(&mut self) {
		self.dirty = true;
	}
	pub fn mark_dirty(&mut self) {
		self.dirty = true;
	}
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Run once every frame; recomputes the layout if anything marked it dirty.
	pub fn update(&mut self) -> Result<(), SpatialError> {
		if self.dirty {
			self.layout()?;
		}
		Ok(())
	}

	/// Recompute the full layout immediately from current bounding boxes.
	pub fn layout(&mut self) -> Result<(), SpatialError> {
		self.dirty = false;
		let children = self.container.children()?;
		let Some(context) = LayoutContext::measure(
			&self.container,
			&children,
			&self.settings,
			&self.item_settings,
			self.breakpoint,
		)?
		else {
			return Ok(());
		};
		context
			.build_lines()
			.apply_column_spans()
			.distribute_growth()
			.justify()
			.align()
			.commit(&children)
	}

	/// Wait for every child's pending model load, then lay out once.
	pub async fn layout_when_loaded(&mut self) -> Result<(), SpatialError> {
		let children = self.container.children()?;
		let loads: Vec<_> = children
			.iter()
			.filter_map(SpatialNode::model_loading)
			.collect();
		if !loads.is_empty() {
			let pending = loads.len();
			debug!(pending, "waiting for child models to load");
			all_loads_finished(loads.into_iter().map(|load| async move {
				let _ = load.await;
			}))
			.await;
		}
		self.layout()
	}
}

/// All state of one layout run, threaded through the passes as a value.
#[derive(Debug, Clone)]
pub(crate) struct LayoutContext {
	frame: Bounds,
	axes: Axes,
	justify: Justify,
	align_items: Align,
	wrap: bool,
	main_gap: f32,
	cross_gap: f32,
	items: Vec<ItemState>,
	lines: Vec<Line>,
}

#[derive(Debug, Clone)]
pub(crate) struct ItemState {
	index: usize,
	bounds: Bounds,
	scale: Vec3,
	position: Vec3,
	/// Current main-axis size, adjusted by the column and grow passes.
	main_size: f32,
	/// Measured main size, snapshotted before the first resize so repeated
	/// passes never compound.
	original_main: Option<f32>,
	grow: bool,
	span: Option<f32>,
}

/// One row (or column) of items produced by the wrap pass; `items[start..end]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line {
	start: usize,
	end: usize,
}
impl Line {
	fn count(&self) -> usize {
		self.end - self.start
	}
}

impl LayoutContext {
	/// Measure the container and its children. Returns `None` (and leaves every
	/// child untouched) when there is nothing valid to lay out.
	pub(crate) fn measure<S: SpatialNode>(
		container: &S,
		children: &[S],
		settings: &FlexboxSettings,
		item_settings: &FxHashMap<u64, FlexItemSettings>,
		breakpoint: Breakpoint,
	) -> Result<Option<Self>, SpatialError> {
		if children.is_empty() {
			warn!("flexbox container has no children, skipping layout");
			return Ok(None);
		}
		// A bounding box measured under a rotated transform is not axis-aligned in
		// the container's own frame, so zero the rotation around the measurement.
		let rotation = container.rotation()?;
		container.set_rotation(Quat::IDENTITY)?;
		let measured = container.local_bounds();
		container.set_rotation(rotation)?;
		let frame = measured?.strip_scale(container.scale()?.into());
		if frame.is_empty() {
			warn!(?frame, "flexbox container has an empty bounding box, skipping layout");
			return Ok(None);
		}

		let axes = Axes::resolve(settings.direction);
		let mut items = Vec::with_capacity(children.len());
		for (index, child) in children.iter().enumerate() {
			let scale = Vec3::from(child.scale()?);
			let bounds = child.local_bounds()?.strip_scale(scale);
			let overrides = item_settings.get(&child.uid()).copied().unwrap_or_default();
			items.push(ItemState {
				index,
				bounds,
				scale,
				position: Vec3::ZERO,
				main_size: axes.main.size_of(&bounds),
				original_main: None,
				grow: overrides.grow,
				span: overrides.column_spans.resolve(breakpoint).map(f32::from),
			});
		}
		debug!(items = items.len(), ?frame, "measured flexbox container");

		Ok(Some(LayoutContext {
			frame,
			axes,
			justify: settings.justify,
			align_items: settings.align_items,
			wrap: settings.wrap,
			main_gap: axes.main.gap_of(settings.gap),
			cross_gap: axes.cross.gap_of(settings.gap),
			items,
			lines: Vec::new(),
		}))
	}

	/// Partition items into lines and give each its initial position.
	pub(crate) fn build_lines(mut self) -> Self {
		let main_dimension = self.axes.main.size_of(&self.frame);
		let cross_dimension = self.axes.cross.size_of(&self.frame);
		let mut lines = Vec::new();
		let mut line_start = 0;
		let mut cursor = -main_dimension / 2.0;
		let mut cross_offset = 0.0;
		let mut line_cross = 0.0_f32;

		for i in 0..self.items.len() {
			let half = self.items[i].main_size / 2.0;
			let mut center = cursor + half;
			// the first item of a line never wraps, no matter how wide
			if self.wrap && center + half > main_dimension / 2.0 && i > line_start {
				lines.push(Line {
					start: line_start,
					end: i,
				});
				line_start = i;
				cross_offset += line_cross + self.cross_gap;
				line_cross = 0.0;
				cursor = -main_dimension / 2.0;
				center = cursor + half;
			}

			let cross_size = self.axes.cross.size_of(&self.items[i].bounds);
			let mut position = Vec3::ZERO;
			self.axes
				.main
				.set(&mut position, self.axes.main_sign * center);
			self.axes.cross.set(
				&mut position,
				self.axes.cross_sign * (cross_offset + cross_size / 2.0 - cross_dimension / 2.0),
			);
			// lift items off the container face; the last term separates coplanar
			// boxes enough to avoid z-fighting
			position.z = self.frame.depth / 2.0
				+ self.items[i].bounds.depth / 2.0
				+ cross_dimension * 0.01;
			self.items[i].position = position;

			line_cross = line_cross.max(cross_size);
			cursor = center + half + self.main_gap;
		}
		lines.push(Line {
			start: line_start,
			end: self.items.len(),
		});
		debug!(lines = lines.len(), "built flexbox lines");
		self.lines = lines;
		self
	}

	/// Resize items carrying a resolved column span to `(mainDimension / 12) * span`,
	/// shifting the item itself by half the growth and everything after it in the
	/// same line by all of it.
	pub(crate) fn apply_column_spans(mut self) -> Self {
		let column_size = self.axes.main.size_of(&self.frame) / 12.0;
		let main = self.axes.main;
		let sign = self.axes.main_sign;
		for line in self.lines.clone() {
			for i in line.start..line.end {
				let Some(span) = self.items[i].span else {
					continue;
				};
				let new_size = column_size * span;
				let item = &mut self.items[i];
				item.original_main.get_or_insert(item.main_size);
				let size_diff = new_size - item.main_size;
				item.main_size = new_size;
				// grown from center, so re-anchor to the leading edge
				main.translate(&mut item.position, sign * size_diff / 2.0);
				trace!(item = i, new_size, size_diff, "applied column span");
				for sibling in &mut self.items[(i + 1)..line.end] {
					main.translate(&mut sibling.position, sign * size_diff);
				}
			}
		}
		self
	}

	/// Split each line's leftover main-axis space evenly among growable items.
	///
	/// Free space is clamped at zero: overflowing content is left overflowing
	/// rather than scaling items through zero.
	pub(crate) fn distribute_growth(mut self) -> Self {
		let main_dimension = self.axes.main.size_of(&self.frame);
		let main = self.axes.main;
		let sign = self.axes.main_sign;
		for line in self.lines.clone() {
			let grow_count = self.items[line.start..line.end]
				.iter()
				.filter(|item| item.grow)
				.count();
			if grow_count == 0 {
				continue;
			}
			let occupied: f32 = self.items[line.start..line.end]
				.iter()
				.map(|item| item.main_size)
				.sum();
			let gap_total = self.main_gap * (line.count() - 1) as f32;
			let free_space = (main_dimension - gap_total - occupied).max(0.0);
			let per_item = free_space / grow_count as f32;
			trace!(free_space, grow_count, "distributing growth");

			for i in line.start..line.end {
				if !self.items[i].grow {
					continue;
				}
				let item = &mut self.items[i];
				item.original_main.get_or_insert(item.main_size);
				item.main_size += per_item;
				main.translate(&mut item.position, sign * per_item / 2.0);
				for sibling in &mut self.items[(i + 1)..line.end] {
					main.translate(&mut sibling.position, sign * per_item);
				}
			}
		}
		self
	}

	/// Redistribute each line's free space along the main axis.
	pub(crate) fn justify(mut self) -> Self {
		let main_dimension = self.axes.main.size_of(&self.frame);
		let main = self.axes.main;
		let sign = self.axes.main_sign;
		for line in self.lines.clone() {
			let count = line.count();
			let occupied: f32 = self.items[line.start..line.end]
				.iter()
				.map(|item| item.main_size)
				.sum();
			let gap_total = self.main_gap * (count - 1) as f32;
			let free_space = (main_dimension - gap_total - occupied).max(0.0);

			for i in line.start..line.end {
				let n = (i - line.start) as f32;
				let shift = match self.justify {
					Justify::Start => 0.0,
					Justify::End => free_space,
					Justify::Center => free_space / 2.0,
					// a single item stays put instead of dividing by zero
					Justify::Between if count > 1 => free_space / (count - 1) as f32 * n,
					Justify::Between => 0.0,
					Justify::Around => free_space / count as f32 * (n + 0.5),
				};
				main.translate(&mut self.items[i].position, sign * shift);
			}
		}
		self
	}

	/// Redistribute the lines themselves along the cross axis.
	pub(crate) fn align(mut self) -> Self {
		let cross_dimension = self.axes.cross.size_of(&self.frame);
		let cross = self.axes.cross;
		let sign = self.axes.cross_sign;
		let line_sizes: Vec<f32> = self
			.lines
			.iter()
			.map(|line| {
				self.items[line.start..line.end]
					.iter()
					.map(|item| cross.size_of(&item.bounds))
					.fold(0.0, f32::max)
			})
			.collect();
		let content_cross: f32 =
			line_sizes.iter().sum::<f32>() + self.cross_gap * (line_sizes.len() - 1) as f32;
		let free_space = cross_dimension - content_cross;

		for (line, line_size) in self.lines.clone().into_iter().zip(line_sizes) {
			for i in line.start..line.end {
				let item_cross = cross.size_of(&self.items[i].bounds);
				let shift = match self.align_items {
					Align::Start => 0.0,
					Align::Center => free_space / 2.0 + (line_size - item_cross) / 2.0,
					Align::End => free_space + (line_size - item_cross),
				};
				cross.translate(&mut self.items[i].position, sign * shift);
			}
		}
		self
	}

	/// Write the final positions and scales back through the item handles. The
	/// only side-effecting pass.
	pub(crate) fn commit<S: SpatialNode>(&self, children: &[S]) -> Result<(), SpatialError> {
		for item in &self.items {
			let child = &children[item.index];
			let mut scale = item.scale;
			if let Some(original) = item.original_main {
				// near-zero measurements keep their scale instead of dividing by zero
				if original > f32::EPSILON {
					self.axes.main.set(&mut scale, item.main_size / original);
				}
			}
			child.set_position(item.position)?;
			child.set_scale(scale)?;
			trace!(index = item.index, position = ?item.position, ?scale, "item placed");
		}
		debug!(
			items = self.items.len(),
			lines = self.lines.len(),
			"flexbox layout committed"
		);
		Ok(())
	}

	#[cfg(test)]
	pub(crate) fn item_main_sizes(&self) -> Vec<f32> {
		self.items.iter().map(|item| item.main_size).collect()
	}
	#[cfg(test)]
	pub(crate) fn item_positions(&self) -> Vec<Vec3> {
		self.items.iter().map(|item| item.position).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dummy::DummySpatial;
	use glam::Quat;

	fn container_with_items(
		container_bounds: Bounds,
		item_bounds: &[Bounds],
	) -> (DummySpatial, Vec<DummySpatial>) {
		let container = DummySpatial::new(container_bounds);
		let items: Vec<_> = item_bounds
			.iter()
			.map(|bounds| {
				let item = DummySpatial::new(*bounds);
				container.add_child(&item);
				item
			})
			.collect();
		(container, items)
	}

	fn positions(items: &[DummySpatial]) -> Vec<Vec3> {
		items
			.iter()
			.map(|item| Vec3::from(item.position().unwrap()))
			.collect()
	}

	#[test]
	fn row_center_is_symmetric_about_origin() {
		let (container, items) = container_with_items(
			Bounds::new(4.0, 1.0, 0.1),
			&[Bounds::new(1.0, 1.0, 0.05); 2],
		);
		let mut flexbox = Flexbox::new(
			container,
			FlexboxSettings {
				justify: Justify::Center,
				..Default::default()
			},
		);
		flexbox.update().unwrap();

		let positions = positions(&items);
		assert!((positions[0].x + 0.5).abs() < 0.001);
		assert!((positions[1].x - 0.5).abs() < 0.001);
		// both on the container's vertical center since item and container heights match
		assert!(positions[0].y.abs() < 0.001);
		// in front of the container face
		assert!((positions[0].z - (0.05 + 0.025 + 1.0 * 0.01)).abs() < 0.001);
	}

	#[test]
	fn wrap_overflow_makes_two_lines() {
		let (container, items) = container_with_items(
			Bounds::new(4.0, 3.0, 0.1),
			&[Bounds::new(1.0, 1.0, 0.05); 5],
		);
		let mut flexbox = Flexbox::new(
			container,
			FlexboxSettings {
				wrap: true,
				..Default::default()
			},
		);
		flexbox.layout().unwrap();

		let positions = positions(&items);
		// four items fit on the first line
		for item in &positions[0..4] {
			assert!((item.y - 1.0).abs() < 0.001);
		}
		assert!((positions[0].x + 1.5).abs() < 0.001);
		assert!((positions[3].x - 1.5).abs() < 0.001);
		// the fifth wraps and restarts at the leading edge
		assert!((positions[4].y - 0.0).abs() < 0.001);
		assert!((positions[4].x + 1.5).abs() < 0.001);
	}

	#[test]
	fn grow_consumes_all_free_space() {
		let (container, items) = container_with_items(
			Bounds::new(10.0, 2.0, 0.0),
			&[Bounds::new(2.0, 1.0, 0.0); 2],
		);
		let mut flexbox = Flexbox::new(container, FlexboxSettings::default());
		flexbox.set_item_settings(
			&items[0],
			FlexItemSettings {
				grow: true,
				..Default::default()
			},
		);
		flexbox.update().unwrap();

		// free space 10 - 4 = 6, all into the growable item: 2 -> 8
		let scale = Vec3::from(items[0].scale().unwrap());
		assert!((scale.x - 4.0).abs() < 0.001);
		let scale = Vec3::from(items[1].scale().unwrap());
		assert!((scale.x - 1.0).abs() < 0.001);

		// grown item spans -5..3, its sibling sits flush after it at 3..5
		let positions = positions(&items);
		assert!((positions[0].x + 1.0).abs() < 0.001);
		assert!((positions[1].x - 4.0).abs() < 0.001);
	}

	#[test]
	fn column_span_resizes_and_shifts_siblings() {
		let (container, items) = container_with_items(
			Bounds::new(12.0, 2.0, 0.0),
			&[Bounds::new(2.0, 1.0, 0.0); 2],
		);
		let mut flexbox = Flexbox::new(container, FlexboxSettings::default());
		flexbox.set_item_settings(
			&items[0],
			FlexItemSettings {
				column_spans: ColumnSpans {
					sm: Some(6),
					..Default::default()
				},
				..Default::default()
			},
		);
		flexbox.update().unwrap();

		// column size 1, span 6: item resized 2 -> 6 and left-anchored at -6..0
		let scale = Vec3::from(items[0].scale().unwrap());
		assert!((scale.x - 3.0).abs() < 0.001);
		let positions = positions(&items);
		assert!((positions[0].x + 3.0).abs() < 0.001);
		// sibling shifted by the full size difference 6 - 2 = 4
		assert!((positions[1].x - 1.0).abs() < 0.001);
	}

	#[test]
	fn between_with_one_item_stays_put() {
		let (container, items) = container_with_items(
			Bounds::new(4.0, 1.0, 0.0),
			&[Bounds::new(1.0, 1.0, 0.0)],
		);
		let mut flexbox = Flexbox::new(
			container,
			FlexboxSettings {
				justify: Justify::Between,
				..Default::default()
			},
		);
		flexbox.layout().unwrap();

		let position = Vec3::from(items[0].position().unwrap());
		assert!((position.x + 1.5).abs() < 0.001);
		assert!(position.is_finite());
	}

	#[test]
	fn around_spaces_edges_half_as_much() {
		let (container, items) = container_with_items(
			Bounds::new(4.0, 1.0, 0.0),
			&[Bounds::new(1.0, 1.0, 0.0); 2],
		);
		let mut flexbox = Flexbox::new(
			container,
			FlexboxSettings {
				justify: Justify::Around,
				..Default::default()
			},
		);
		flexbox.layout().unwrap();

		// free space 2 over 2 items: shifts of 0.5 and 1.5
		let positions = positions(&items);
		assert!((positions[0].x + 1.0).abs() < 0.001);
		assert!((positions[1].x - 1.0).abs() < 0.001);
	}

	#[test]
	fn column_direction_stacks_downward() {
		let (container, items) = container_with_items(
			Bounds::new(2.0, 4.0, 0.0),
			&[Bounds::new(1.0, 1.0, 0.0); 2],
		);
		let mut flexbox = Flexbox::new(
			container,
			FlexboxSettings {
				direction: Direction::Column,
				..Default::default()
			},
		);
		flexbox.layout().unwrap();

		let positions = positions(&items);
		// items run down from the top, anchored to the left edge
		assert!((positions[0].y - 1.5).abs() < 0.001);
		assert!((positions[1].y - 0.5).abs() < 0.001);
		assert!((positions[0].x + 0.5).abs() < 0.001);
	}

	#[test]
	fn every_coordinate_is_finite() {
		for direction in [Direction::Row, Direction::Column] {
			let (container, items) = container_with_items(
				Bounds::new(3.0, 3.0, 0.2),
				&[
					Bounds::new(1.0, 0.5, 0.1),
					Bounds::new(0.5, 1.0, 0.0),
					Bounds::new(2.0, 0.25, 0.05),
				],
			);
			let mut flexbox = Flexbox::new(
				container,
				FlexboxSettings {
					direction,
					wrap: true,
					justify: Justify::Around,
					align_items: Align::Center,
					gap: [0.1, 0.1].into(),
					..Default::default()
				},
			);
			flexbox.layout().unwrap();
			for item in &items {
				assert!(Vec3::from(item.position().unwrap()).is_finite());
				assert!(Vec3::from(item.scale().unwrap()).is_finite());
			}
		}
	}

	#[test]
	fn grid_and_grow_never_overlap_siblings() {
		let (container, items) = container_with_items(
			Bounds::new(12.0, 2.0, 0.0),
			&[Bounds::new(2.0, 1.0, 0.0); 3],
		);
		let mut flexbox = Flexbox::new(container, FlexboxSettings::default());
		for item in [&items[0], &items[2]] {
			flexbox.set_item_settings(
				item,
				FlexItemSettings {
					grow: true,
					..Default::default()
				},
			);
		}
		flexbox.layout().unwrap();

		// trailing edge of each item must not pass the next one's leading edge
		let positions = positions(&items);
		let sizes = [5.0, 2.0, 5.0];
		for i in 0..2 {
			let trailing = positions[i].x + sizes[i] / 2.0;
			let leading = positions[i + 1].x - sizes[i + 1] / 2.0;
			assert!(trailing <= leading + 0.001);
		}
	}

	#[test]
	fn resize_passes_are_idempotent() {
		let (container, items) = container_with_items(
			Bounds::new(12.0, 2.0, 0.0),
			&[Bounds::new(2.0, 1.0, 0.0); 2],
		);
		let mut item_settings = FxHashMap::default();
		item_settings.insert(
			items[0].uid(),
			FlexItemSettings {
				grow: true,
				column_spans: ColumnSpans {
					sm: Some(4),
					..Default::default()
				},
			},
		);
		let context = LayoutContext::measure(
			&container,
			&items,
			&FlexboxSettings::default(),
			&item_settings,
			Breakpoint::Sm,
		)
		.unwrap()
		.unwrap()
		.build_lines();

		let once = context.apply_column_spans().distribute_growth();
		let twice = once.clone().apply_column_spans().distribute_growth();
		assert_eq!(once.item_main_sizes(), twice.item_main_sizes());
		assert_eq!(once.item_positions(), twice.item_positions());
	}

	#[test]
	fn relayout_from_mutated_scene_is_stable() {
		let (container, items) = container_with_items(
			Bounds::new(10.0, 2.0, 0.0),
			&[Bounds::new(2.0, 1.0, 0.0); 2],
		);
		let mut flexbox = Flexbox::new(container, FlexboxSettings::default());
		flexbox.set_item_settings(
			&items[0],
			FlexItemSettings {
				grow: true,
				..Default::default()
			},
		);
		flexbox.layout().unwrap();
		let first = (positions(&items), Vec3::from(items[0].scale().unwrap()));
		flexbox.layout().unwrap();
		let second = (positions(&items), Vec3::from(items[0].scale().unwrap()));
		assert_eq!(first, second);
	}

	#[test]
	fn align_center_splits_line_free_space() {
		let (container, items) = container_with_items(
			Bounds::new(4.0, 4.0, 0.0),
			&[Bounds::new(1.0, 1.0, 0.0), Bounds::new(1.0, 2.0, 0.0)],
		);
		let mut flexbox = Flexbox::new(
			container,
			FlexboxSettings {
				align_items: Align::Center,
				..Default::default()
			},
		);
		flexbox.layout().unwrap();

		// line is 2 tall in a 4 tall container; both items end up vertically centered
		let positions = positions(&items);
		assert!(positions[0].y.abs() < 0.001);
		assert!(positions[1].y.abs() < 0.001);
	}

	#[test]
	fn empty_container_skips_layout() {
		let container = DummySpatial::new(Bounds::new(0.0, 0.0, 0.0));
		let item = DummySpatial::new(Bounds::new(1.0, 1.0, 0.0));
		container.add_child(&item);
		item.set_position([7.0, 7.0, 7.0]).unwrap();

		let mut flexbox = Flexbox::new(container, FlexboxSettings::default());
		flexbox.update().unwrap();
		assert!(!flexbox.is_dirty());
		assert_eq!(Vec3::from(item.position().unwrap()), Vec3::splat(7.0));
	}

	#[test]
	fn childless_container_skips_layout() {
		let container = DummySpatial::new(Bounds::new(1.0, 1.0, 0.0));
		let mut flexbox = Flexbox::new(container, FlexboxSettings::default());
		flexbox.update().unwrap();
	}

	#[test]
	fn container_rotation_is_restored_after_measurement() {
		let (container, _items) = container_with_items(
			Bounds::new(4.0, 1.0, 0.0),
			&[Bounds::new(1.0, 1.0, 0.0)],
		);
		let tilt = Quat::from_rotation_z(0.3);
		container.set_rotation(tilt).unwrap();
		let mut flexbox = Flexbox::new(container, FlexboxSettings::default());
		flexbox.layout().unwrap();
		let rotation = Quat::from(flexbox.container().rotation().unwrap());
		assert!((rotation.z - tilt.z).abs() < 0.0001);
		assert!((rotation.w - tilt.w).abs() < 0.0001);
	}

	#[test]
	fn breakpoint_change_marks_dirty() {
		let (container, _items) = container_with_items(
			Bounds::new(4.0, 1.0, 0.0),
			&[Bounds::new(1.0, 1.0, 0.0)],
		);
		let mut flexbox = Flexbox::new(container, FlexboxSettings::default());
		flexbox.update().unwrap();
		assert!(!flexbox.is_dirty());
		flexbox.set_viewport_width(800);
		assert!(flexbox.is_dirty());
		// same bucket again: no new invalidation after the relayout
		flexbox.update().unwrap();
		flexbox.set_viewport_width(900);
		assert!(!flexbox.is_dirty());
	}

	#[tokio::test]
	async fn layout_waits_for_model_loads() {
		let (container, items) = container_with_items(
			Bounds::new(4.0, 1.0, 0.0),
			&[Bounds::new(1.0, 1.0, 0.0); 2],
		);
		let loaded = items[1].loading_model();
		tokio::task::spawn(async move {
			let _ = loaded.send(());
		});

		let mut flexbox = Flexbox::new(container, FlexboxSettings::default());
		flexbox.layout_when_loaded().await.unwrap();
		assert!((Vec3::from(items[0].position().unwrap()).x + 1.5).abs() < 0.001);
	}
}
