//! Painting strategy seam.

use super::error::EngineError;
use super::particles::Particle;
use super::surface::{OverlayKind, Viewport};

/// Turns the simulated particles into pixels on an overlay of type `O`.
///
/// One painter is bound to one engine instance for its whole life, so a
/// strategy is applied consistently within an instance.
pub trait Painter<O> {
	/// Element the surface should inject for this painter.
	fn overlay_kind(&self) -> OverlayKind;

	/// Bind to the injected overlay. Fails when the overlay cannot be drawn on.
	fn attach(&mut self, overlay: &O) -> Result<(), EngineError>;

	/// React to a new measured viewport.
	fn resize(&mut self, viewport: Viewport);

	/// A new particle batch replaced the old one.
	fn spawn(&mut self, particles: &[Particle]);

	/// Paint the current particle state. `now` is the frame time in milliseconds.
	fn render(&mut self, particles: &[Particle], now: f64);

	/// Release anything created since `attach`.
	fn detach(&mut self);
}
