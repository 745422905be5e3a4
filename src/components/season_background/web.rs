//! Browser implementation of the rendering surface.

use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

use super::error::EngineError;
use super::surface::{FrameCallback, OverlayKind, RenderingSurface, Viewport};

/// Inline style applied to every injected overlay.
const OVERLAY_STYLE: [(&str, &str); 7] = [
	("position", "absolute"),
	("inset", "0"),
	("width", "100%"),
	("height", "100%"),
	("display", "block"),
	("pointer-events", "none"),
	("z-index", "-1"),
];

/// A pending `requestAnimationFrame` request. Owns the JS closure, so
/// dropping a cancelled handle frees the callback it would have run.
pub struct FrameHandle {
	id: i32,
	_callback: Closure<dyn FnMut(f64)>,
}

/// A `resize` listener registered on the window. Owns the JS closure.
pub struct ResizeListener {
	callback: Closure<dyn FnMut()>,
}

/// Rendering surface backed by the page's window and document.
pub struct WebSurface {
	window: Window,
	document: Document,
}

impl WebSurface {
	pub fn new() -> Result<Self, EngineError> {
		let window = web_sys::window()
			.ok_or_else(|| EngineError::RenderingUnavailable("no window".into()))?;
		let document = window
			.document()
			.ok_or_else(|| EngineError::RenderingUnavailable("no document".into()))?;
		Ok(Self { window, document })
	}
}

impl RenderingSurface for WebSurface {
	type Host = HtmlElement;
	type Overlay = HtmlElement;
	type FrameHandle = FrameHandle;
	type ResizeListener = ResizeListener;

	fn resolve(&self, selector: &str) -> Option<HtmlElement> {
		self.document
			.query_selector(selector)
			.ok()
			.flatten()?
			.dyn_into()
			.ok()
	}

	fn style(&self, host: &HtmlElement, property: &str) -> String {
		host.style()
			.get_property_value(property)
			.unwrap_or_default()
	}

	fn set_style(&self, host: &HtmlElement, property: &str, value: &str) {
		if let Err(e) = host.style().set_property(property, value) {
			warn!("season-backdrop: failed to set {property}: {e:?}");
		}
	}

	fn measure(&self, host: &HtmlElement) -> Viewport {
		let rect = host.get_bounding_client_rect();
		Viewport {
			width: rect.width(),
			height: rect.height(),
			pixel_ratio: self.window.device_pixel_ratio(),
		}
	}

	fn inject_overlay(
		&self,
		host: &HtmlElement,
		kind: OverlayKind,
	) -> Result<HtmlElement, EngineError> {
		let overlay: HtmlElement = self
			.document
			.create_element(kind.tag())
			.map_err(|e| EngineError::RenderingUnavailable(format!("{e:?}")))?
			.dyn_into()
			.map_err(|_| EngineError::RenderingUnavailable(format!("<{}> is not an HTML element", kind.tag())))?;

		let style = overlay.style();
		for (property, value) in OVERLAY_STYLE {
			let _ = style.set_property(property, value);
		}
		let _ = overlay.set_attribute("aria-hidden", "true");

		host.prepend_with_node_1(&overlay)
			.map_err(|e| EngineError::RenderingUnavailable(format!("{e:?}")))?;
		Ok(overlay)
	}

	fn remove_overlay(&self, overlay: &HtmlElement) {
		overlay.remove();
	}

	fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
		let closure: Closure<dyn FnMut(f64)> = Closure::once(move |now: f64| callback(now));
		match self
			.window
			.request_animation_frame(closure.as_ref().unchecked_ref())
		{
			Ok(id) => Some(FrameHandle {
				id,
				_callback: closure,
			}),
			Err(e) => {
				warn!("season-backdrop: requestAnimationFrame failed: {e:?}");
				None
			}
		}
	}

	fn cancel_frame(&self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle.id);
	}

	fn add_resize_listener(&self, callback: Rc<dyn Fn()>) -> Option<ResizeListener> {
		let callback = Closure::<dyn FnMut()>::new(move || callback());
		match self
			.window
			.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
		{
			Ok(()) => Some(ResizeListener { callback }),
			Err(e) => {
				warn!("season-backdrop: failed to listen for resize: {e:?}");
				None
			}
		}
	}

	fn remove_resize_listener(&self, listener: ResizeListener) {
		let _ = self.window.remove_event_listener_with_callback(
			"resize",
			listener.callback.as_ref().unchecked_ref(),
		);
	}

	fn current_month(&self) -> u32 {
		// getMonth() is 0-indexed
		js_sys::Date::new_0().get_month() + 1
	}

	fn random_seed(&self) -> u64 {
		let word = || (js_sys::Math::random() * u32::MAX as f64) as u64;
		(word() << 32) | word()
	}
}
