//! In-memory rendering surface and recording painter for engine tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

use super::error::EngineError;
use super::painter::Painter;
use super::particles::Particle;
use super::surface::{FrameCallback, OverlayKind, RenderingSurface, Viewport};

#[derive(Default)]
pub(crate) struct HostState {
	styles: HashMap<String, String>,
	children: Vec<String>,
	width: f64,
	height: f64,
}

/// Fake element: inline styles, child ids and a rendered size.
#[derive(Clone, Default)]
pub(crate) struct FakeHost(Rc<RefCell<HostState>>);

impl FakeHost {
	pub fn sized(width: f64, height: f64) -> Self {
		let host = Self::default();
		host.resize(width, height);
		host
	}

	pub fn resize(&self, width: f64, height: f64) {
		let mut state = self.0.borrow_mut();
		state.width = width;
		state.height = height;
	}

	pub fn style(&self, property: &str) -> Option<String> {
		self.0.borrow().styles.get(property).cloned()
	}

	pub fn set_style(&self, property: &str, value: &str) {
		self.0
			.borrow_mut()
			.styles
			.insert(property.to_string(), value.to_string());
	}

	pub fn children(&self) -> Vec<String> {
		self.0.borrow().children.clone()
	}

	pub fn append_child(&self, id: &str) {
		self.0.borrow_mut().children.push(id.to_string());
	}
}

pub(crate) struct FakeOverlay {
	id: String,
	host: FakeHost,
}

struct SurfaceState {
	selectors: HashMap<String, FakeHost>,
	frames: Vec<(u32, FrameCallback)>,
	listeners: Vec<(u32, Rc<dyn Fn()>)>,
	next_id: u32,
	month: u32,
	pixel_ratio: f64,
}

/// Surface whose frames and resize events are driven by the test.
#[derive(Clone)]
pub(crate) struct FakeSurface(Rc<RefCell<SurfaceState>>);

impl FakeSurface {
	pub fn new() -> Self {
		Self(Rc::new(RefCell::new(SurfaceState {
			selectors: HashMap::new(),
			frames: Vec::new(),
			listeners: Vec::new(),
			next_id: 0,
			month: 4,
			pixel_ratio: 1.0,
		})))
	}

	pub fn with_selector(self, selector: &str, host: &FakeHost) -> Self {
		self.0
			.borrow_mut()
			.selectors
			.insert(selector.to_string(), host.clone());
		self
	}

	pub fn with_month(self, month: u32) -> Self {
		self.0.borrow_mut().month = month;
		self
	}

	pub fn with_pixel_ratio(self, ratio: f64) -> Self {
		self.0.borrow_mut().pixel_ratio = ratio;
		self
	}

	pub fn pending_frames(&self) -> usize {
		self.0.borrow().frames.len()
	}

	pub fn listener_count(&self) -> usize {
		self.0.borrow().listeners.len()
	}

	/// Run every callback scheduled so far, as one display refresh at `now`.
	/// Returns how many callbacks ran.
	pub fn run_frame(&self, now: f64) -> usize {
		let frames = mem::take(&mut self.0.borrow_mut().frames);
		let ran = frames.len();
		for (_, callback) in frames {
			callback(now);
		}
		ran
	}

	pub fn fire_resize(&self) {
		let listeners: Vec<_> = self
			.0
			.borrow()
			.listeners
			.iter()
			.map(|(_, cb)| cb.clone())
			.collect();
		for listener in listeners {
			listener();
		}
	}

	fn next_id(&self) -> u32 {
		let mut state = self.0.borrow_mut();
		state.next_id += 1;
		state.next_id
	}
}

/// Pending fake frame; not `Copy`, like a handle that owns its callback.
pub(crate) struct FakeFrame(u32);

impl RenderingSurface for FakeSurface {
	type Host = FakeHost;
	type Overlay = FakeOverlay;
	type FrameHandle = FakeFrame;
	type ResizeListener = u32;

	fn resolve(&self, selector: &str) -> Option<FakeHost> {
		self.0.borrow().selectors.get(selector).cloned()
	}

	fn style(&self, host: &FakeHost, property: &str) -> String {
		host.style(property).unwrap_or_default()
	}

	fn set_style(&self, host: &FakeHost, property: &str, value: &str) {
		host.set_style(property, value);
	}

	fn measure(&self, host: &FakeHost) -> Viewport {
		let state = host.0.borrow();
		Viewport {
			width: state.width,
			height: state.height,
			pixel_ratio: self.0.borrow().pixel_ratio,
		}
	}

	fn inject_overlay(&self, host: &FakeHost, kind: OverlayKind) -> Result<FakeOverlay, EngineError> {
		let id = format!("{}#{}", kind.tag(), self.next_id());
		host.0.borrow_mut().children.insert(0, id.clone());
		Ok(FakeOverlay {
			id,
			host: host.clone(),
		})
	}

	fn remove_overlay(&self, overlay: &FakeOverlay) {
		overlay
			.host
			.0
			.borrow_mut()
			.children
			.retain(|child| *child != overlay.id);
	}

	fn request_frame(&self, callback: FrameCallback) -> Option<FakeFrame> {
		let id = self.next_id();
		self.0.borrow_mut().frames.push((id, callback));
		Some(FakeFrame(id))
	}

	fn cancel_frame(&self, handle: FakeFrame) {
		self.0.borrow_mut().frames.retain(|(id, _)| *id != handle.0);
	}

	fn add_resize_listener(&self, callback: Rc<dyn Fn()>) -> Option<u32> {
		let id = self.next_id();
		self.0.borrow_mut().listeners.push((id, callback));
		Some(id)
	}

	fn remove_resize_listener(&self, listener: u32) {
		self.0.borrow_mut().listeners.retain(|(id, _)| *id != listener);
	}

	fn current_month(&self) -> u32 {
		self.0.borrow().month
	}

	fn random_seed(&self) -> u64 {
		7
	}
}

#[derive(Default)]
pub(crate) struct PaintLog {
	pub attached: bool,
	pub spawns: usize,
	pub renders: usize,
	pub viewport: Option<Viewport>,
	pub painted: Vec<Particle>,
}

/// Painter that records what the engine asked of it.
#[derive(Clone, Default)]
pub(crate) struct RecordingPainter {
	pub log: Rc<RefCell<PaintLog>>,
	pub unavailable: bool,
}

impl RecordingPainter {
	pub fn unavailable() -> Self {
		Self {
			unavailable: true,
			..Self::default()
		}
	}

	pub fn renders(&self) -> usize {
		self.log.borrow().renders
	}
}

impl Painter<FakeOverlay> for RecordingPainter {
	fn overlay_kind(&self) -> OverlayKind {
		OverlayKind::Canvas
	}

	fn attach(&mut self, _overlay: &FakeOverlay) -> Result<(), EngineError> {
		if self.unavailable {
			return Err(EngineError::RenderingUnavailable("fake surface".into()));
		}
		self.log.borrow_mut().attached = true;
		Ok(())
	}

	fn resize(&mut self, viewport: Viewport) {
		self.log.borrow_mut().viewport = Some(viewport);
	}

	fn spawn(&mut self, particles: &[Particle]) {
		let mut log = self.log.borrow_mut();
		log.spawns += 1;
		log.painted = particles.to_vec();
	}

	fn render(&mut self, particles: &[Particle], _now: f64) {
		let mut log = self.log.borrow_mut();
		log.renders += 1;
		log.painted = particles.to_vec();
	}

	fn detach(&mut self) {
		self.log.borrow_mut().attached = false;
	}
}
