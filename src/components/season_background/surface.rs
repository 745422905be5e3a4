//! Host-environment capability consumed by the engine.
//!
//! The engine never touches a document or window directly. Everything it needs
//! from the host (element lookup and styling, measurement, overlay injection,
//! frame scheduling and resize notification) goes through a
//! [`RenderingSurface`]. The browser implementation lives in `web`; tests use
//! an in-memory fake.

use std::rc::Rc;

use super::error::EngineError;

/// Measured size of the host's rendered box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	/// Device pixels per CSS pixel.
	pub pixel_ratio: f64,
}

impl Viewport {
	pub const EMPTY: Viewport = Viewport {
		width: 0.0,
		height: 0.0,
		pixel_ratio: 1.0,
	};

	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}
}

impl Default for Viewport {
	fn default() -> Self {
		Self::EMPTY
	}
}

/// Which element the overlay should be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
	/// A drawing surface (`<canvas>`).
	Canvas,
	/// A plain container for per-particle nodes (`<div>`).
	Layer,
}

impl OverlayKind {
	pub fn tag(self) -> &'static str {
		match self {
			OverlayKind::Canvas => "canvas",
			OverlayKind::Layer => "div",
		}
	}
}

/// Where to mount the background: an element the caller already holds, or a
/// selector resolved against the host document.
#[derive(Clone, Debug)]
pub enum Target<E> {
	Element(E),
	Selector(String),
}

impl<E> From<&str> for Target<E> {
	fn from(selector: &str) -> Self {
		Target::Selector(selector.to_string())
	}
}

/// Callback invoked with the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Everything the engine needs from its host environment.
pub trait RenderingSurface {
	type Host: Clone;
	type Overlay;
	/// Token for one scheduled frame. Cancelling it guarantees the callback
	/// never runs and releases it.
	type FrameHandle;
	/// Registration token for a resize listener.
	type ResizeListener;

	/// Resolve a selector to a live element, if any.
	fn resolve(&self, selector: &str) -> Option<Self::Host>;

	/// Inline style value of `property`, empty when unset.
	fn style(&self, host: &Self::Host, property: &str) -> String;

	fn set_style(&self, host: &Self::Host, property: &str, value: &str);

	fn measure(&self, host: &Self::Host) -> Viewport;

	/// Create a non-interactive overlay filling `host`, inserted as its first
	/// child and stacked behind the host's other content.
	fn inject_overlay(
		&self,
		host: &Self::Host,
		kind: OverlayKind,
	) -> Result<Self::Overlay, EngineError>;

	fn remove_overlay(&self, overlay: &Self::Overlay);

	/// Schedule `callback` for the next display refresh.
	fn request_frame(&self, callback: FrameCallback) -> Option<Self::FrameHandle>;

	fn cancel_frame(&self, handle: Self::FrameHandle);

	fn add_resize_listener(&self, callback: Rc<dyn Fn()>) -> Option<Self::ResizeListener>;

	fn remove_resize_listener(&self, listener: Self::ResizeListener);

	/// Current month, 1-indexed.
	fn current_month(&self) -> u32;

	/// Seed for particle randomness.
	fn random_seed(&self) -> u64;
}
