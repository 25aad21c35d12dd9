use serde::{Deserialize, Serialize};

/// Named viewport-width bucket used to select responsive column spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Breakpoint {
	#[default]
	#[serde(rename = "sm")]
	Sm,
	#[serde(rename = "md")]
	Md,
	#[serde(rename = "lg")]
	Lg,
	#[serde(rename = "xl")]
	Xl,
	#[serde(rename = "2xl")]
	Xl2,
	#[serde(rename = "3xl")]
	Xl3,
}

const BREAKPOINT_THRESHOLDS: [(u32, Breakpoint); 5] = [
	(640, Breakpoint::Sm),
	(768, Breakpoint::Md),
	(1024, Breakpoint::Lg),
	(1280, Breakpoint::Xl),
	(1536, Breakpoint::Xl2),
];

impl Breakpoint {
	pub fn from_viewport_width(width: u32) -> Self {
		for (limit, breakpoint) in BREAKPOINT_THRESHOLDS {
			if width < limit {
				return breakpoint;
			}
		}
		Breakpoint::Xl3
	}
}

/// Per-item column span (1-12) for each responsive breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpans {
	pub sm: Option<u8>,
	pub md: Option<u8>,
	pub lg: Option<u8>,
	pub xl: Option<u8>,
	#[serde(rename = "2xl")]
	pub xl2: Option<u8>,
	#[serde(rename = "3xl")]
	pub xl3: Option<u8>,
}
impl ColumnSpans {
	// Fallback chain tried after the current breakpoint itself.
	const FALLBACK: [Breakpoint; 6] = [
		Breakpoint::Md,
		Breakpoint::Lg,
		Breakpoint::Xl,
		Breakpoint::Xl2,
		Breakpoint::Xl3,
		Breakpoint::Sm,
	];

	pub fn get(&self, breakpoint: Breakpoint) -> Option<u8> {
		match breakpoint {
			Breakpoint::Sm => self.sm,
			Breakpoint::Md => self.md,
			Breakpoint::Lg => self.lg,
			Breakpoint::Xl => self.xl,
			Breakpoint::Xl2 => self.xl2,
			Breakpoint::Xl3 => self.xl3,
		}
	}

	/// Span for the current breakpoint, falling back through
	/// md, lg, xl, 2xl, 3xl then sm when the bucket has no value.
	pub fn resolve(&self, current: Breakpoint) -> Option<u8> {
		self.get(current)
			.or_else(|| Self::FALLBACK.into_iter().find_map(|fallback| self.get(fallback)))
	}
}

/// Tracks the viewport width and reports breakpoint changes so the host can
/// re-trigger layout.
#[derive(Debug, Clone, Copy)]
pub struct BreakpointWatcher {
	viewport_width: u32,
	current: Breakpoint,
}
impl BreakpointWatcher {
	pub fn new(viewport_width: u32) -> Self {
		BreakpointWatcher {
			viewport_width,
			current: Breakpoint::from_viewport_width(viewport_width),
		}
	}

	pub fn current(&self) -> Breakpoint {
		self.current
	}
	pub fn viewport_width(&self) -> u32 {
		self.viewport_width
	}

	/// Returns the new breakpoint if the width change crossed a threshold.
	pub fn set_viewport_width(&mut self, width: u32) -> Option<Breakpoint> {
		self.viewport_width = width;
		let breakpoint = Breakpoint::from_viewport_width(width);
		if breakpoint != self.current {
			self.current = breakpoint;
			Some(breakpoint)
		} else {
			None
		}
	}
}
