//! Render/lifecycle driver and the public engine handle.
//!
//! [`SeasonalBackground`] decorates a host element, injects the overlay,
//! spawns particles and runs a display-synchronized loop through a
//! [`RenderingSurface`]. Every frame callback and the resize listener hold only
//! weak references to the engine state, so dropping the handle ends the loop.
//! Teardown cancels the exact frame handle that is pending.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info};
use web_sys::HtmlElement;

use super::error::EngineError;
use super::painter::Painter;
use super::particles::ParticleSystem;
use super::render::CanvasPainter;
use super::season::Season;
use super::surface::{RenderingSurface, Target, Viewport};
use super::theme::{Theme, theme_of};
use super::types::Options;
use super::web::WebSurface;

/// Browser-backed background drawn on a canvas overlay.
pub type WebBackground = SeasonalBackground<WebSurface, CanvasPainter>;

/// Create a canvas-painted seasonal background in the current browser document.
pub fn create_seasonal_background(
	target: Target<HtmlElement>,
	options: Options,
) -> Result<WebBackground, EngineError> {
	let surface = WebSurface::new()?;
	SeasonalBackground::new(surface, CanvasPainter::default(), target, options)
}

/// Create a seasonal background on any surface with any painting strategy.
pub fn create_seasonal_background_with<S, P>(
	surface: S,
	painter: P,
	target: Target<S::Host>,
	options: Options,
) -> Result<SeasonalBackground<S, P>, EngineError>
where
	S: RenderingSurface + 'static,
	P: Painter<S::Overlay> + 'static,
{
	SeasonalBackground::new(surface, painter, target, options)
}

/// Skips frames until `interval` milliseconds have passed since the last one.
#[derive(Clone, Debug, Default)]
struct FrameClock {
	interval: Option<f64>,
	last: Option<f64>,
}

impl FrameClock {
	fn ready(&mut self, now: f64) -> bool {
		if let (Some(interval), Some(last)) = (self.interval, self.last) {
			if now - last < interval {
				return false;
			}
		}
		self.last = Some(now);
		true
	}
}

struct EngineState<S: RenderingSurface, P> {
	surface: S,
	host: S::Host,
	/// `None` once torn down.
	overlay: Option<S::Overlay>,
	painter: P,
	season: Season,
	theme: &'static Theme,
	particle_count: usize,
	particles: ParticleSystem,
	viewport: Viewport,
	clock: FrameClock,
	frame: Option<S::FrameHandle>,
	resize_listener: Option<S::ResizeListener>,
}

impl<S: RenderingSurface, P: Painter<S::Overlay>> EngineState<S, P> {
	fn measure(&mut self) {
		self.viewport = self.surface.measure(&self.host);
		self.painter.resize(self.viewport);
	}

	fn spawn(&mut self) {
		self.particles.spawn(
			self.season,
			self.particle_count,
			self.viewport.width,
			self.viewport.height,
		);
		self.painter.spawn(&self.particles.particles);
	}

	fn respawn(&mut self) {
		self.measure();
		if self.viewport.is_empty() {
			debug!("season-backdrop: host has no size yet, particles wait for a resize");
		}
		self.spawn();
	}

	fn paint_background(&self) {
		self.surface.set_style(
			&self.host,
			"background-image",
			&self.theme.background.to_css(),
		);
	}

	fn on_resize(&mut self) {
		if self.overlay.is_none() {
			return;
		}
		self.measure();
		if !self
			.particles
			.resize(self.viewport.width, self.viewport.height)
		{
			debug!(
				"season-backdrop: respawning after resize to {}x{}",
				self.viewport.width, self.viewport.height
			);
			self.spawn();
		}
	}

	fn tick(&mut self, now: f64) {
		if !self.clock.ready(now) {
			return;
		}
		self.particles.update();
		self.painter.render(&self.particles.particles, now);
	}

	fn teardown(&mut self) {
		if let Some(handle) = self.frame.take() {
			self.surface.cancel_frame(handle);
		}
		if let Some(listener) = self.resize_listener.take() {
			self.surface.remove_resize_listener(listener);
		}
		if let Some(overlay) = self.overlay.take() {
			self.painter.detach();
			self.surface.remove_overlay(&overlay);
			info!("season-backdrop: destroyed {} background", self.season);
		}
	}
}

/// Handle to one running seasonal background.
///
/// Instances share nothing; several can run on different hosts at once.
/// Dropping the handle destroys the background.
pub struct SeasonalBackground<S, P>
where
	S: RenderingSurface + 'static,
	P: Painter<S::Overlay> + 'static,
{
	state: Rc<RefCell<EngineState<S, P>>>,
}

impl<S, P> SeasonalBackground<S, P>
where
	S: RenderingSurface + 'static,
	P: Painter<S::Overlay> + 'static,
{
	/// Decorate the target, start the animation loop and listen for resizes.
	pub fn new(
		surface: S,
		mut painter: P,
		target: Target<S::Host>,
		options: Options,
	) -> Result<Self, EngineError> {
		let host = match target {
			Target::Element(host) => host,
			Target::Selector(selector) => surface
				.resolve(&selector)
				.ok_or(EngineError::TargetNotFound(selector))?,
		};

		let season = options.initial_season(|| surface.current_month());
		let theme = theme_of(season);

		// Positioning context without clobbering caller layout.
		if surface.style(&host, "position").is_empty() {
			surface.set_style(&host, "position", "relative");
		}
		surface.set_style(&host, "overflow", "hidden");
		// Keeps the overlay's negative z-index above the host's own background.
		surface.set_style(&host, "isolation", "isolate");
		surface.set_style(&host, "transition", "background-image 400ms ease-out");

		let overlay = surface.inject_overlay(&host, painter.overlay_kind())?;
		if let Err(err) = painter.attach(&overlay) {
			surface.remove_overlay(&overlay);
			return Err(err);
		}

		let seed = surface.random_seed();
		let state = Rc::new(RefCell::new(EngineState {
			surface,
			host,
			overlay: Some(overlay),
			painter,
			season,
			theme,
			particle_count: options.particle_count,
			particles: ParticleSystem::new(seed),
			viewport: Viewport::EMPTY,
			clock: FrameClock {
				interval: options.frame_interval(),
				last: None,
			},
			frame: None,
			resize_listener: None,
		}));

		{
			let mut s = state.borrow_mut();
			s.paint_background();
			s.respawn();
			info!(
				"season-backdrop: started {} background with {} particles ({}x{})",
				s.season,
				s.particles.len(),
				s.viewport.width,
				s.viewport.height
			);
		}

		Self::schedule(&state);
		Self::listen_for_resize(&state);

		Ok(Self { state })
	}

	fn schedule(state: &Rc<RefCell<EngineState<S, P>>>) {
		let weak = Rc::downgrade(state);
		let mut guard = state.borrow_mut();
		let s = &mut *guard;
		s.frame = s
			.surface
			.request_frame(Box::new(move |now| Self::on_frame(&weak, now)));
	}

	fn on_frame(weak: &Weak<RefCell<EngineState<S, P>>>, now: f64) {
		let Some(state) = weak.upgrade() else {
			return;
		};
		if state.borrow().overlay.is_none() {
			return;
		}
		// The fired handle still owns this callback; release it once painting is done.
		let fired = state.borrow_mut().frame.take();
		// One pending callback at a time: the next frame is booked before painting.
		Self::schedule(&state);
		state.borrow_mut().tick(now);
		drop(fired);
	}

	fn listen_for_resize(state: &Rc<RefCell<EngineState<S, P>>>) {
		let weak = Rc::downgrade(state);
		let callback: Rc<dyn Fn()> = Rc::new(move || {
			if let Some(state) = weak.upgrade() {
				state.borrow_mut().on_resize();
			}
		});
		let mut guard = state.borrow_mut();
		let s = &mut *guard;
		s.resize_listener = s.surface.add_resize_listener(callback);
	}

	/// Switch to `season`: repaint the background and replace every particle.
	///
	/// Calling this after [`destroy`](Self::destroy) does nothing.
	pub fn set_season(&self, season: Season) {
		let mut s = self.state.borrow_mut();
		if s.overlay.is_none() {
			debug!("season-backdrop: set_season({season}) after destroy ignored");
			return;
		}
		s.season = season;
		s.theme = theme_of(season);
		s.paint_background();
		s.respawn();
		info!("season-backdrop: switched to {season}");
	}

	/// Stop the loop, unregister the resize listener and remove the overlay.
	///
	/// Safe to call more than once.
	pub fn destroy(&self) {
		self.state.borrow_mut().teardown();
	}
}

#[cfg(test)]
impl<S, P> SeasonalBackground<S, P>
where
	S: RenderingSurface + 'static,
	P: Painter<S::Overlay> + 'static,
{
	fn season(&self) -> Season {
		self.state.borrow().season
	}

	fn theme(&self) -> &'static Theme {
		self.state.borrow().theme
	}

	fn particles(&self) -> Vec<super::particles::Particle> {
		self.state.borrow().particles.particles.clone()
	}

	fn viewport(&self) -> Viewport {
		self.state.borrow().viewport
	}

	/// Frame and resize callbacks still holding on to the engine state.
	fn live_callbacks(&self) -> usize {
		Rc::weak_count(&self.state)
	}
}

impl<S, P> Drop for SeasonalBackground<S, P>
where
	S: RenderingSurface + 'static,
	P: Painter<S::Overlay> + 'static,
{
	fn drop(&mut self) {
		self.destroy();
	}
}
