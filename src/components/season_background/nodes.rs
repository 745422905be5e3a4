//! DOM node painting strategy.
//!
//! Each particle owns one absolutely positioned `<span>` inside the overlay.
//! Nodes are created on spawn and only their `transform` (and, for fireflies,
//! `opacity`) is touched per frame, so the browser can composite them cheaply.

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::error::EngineError;
use super::painter::Painter;
use super::particles::{Particle, ParticleKind, ParticleSystem};
use super::surface::{OverlayKind, Viewport};

/// Paints particles as persistent DOM nodes moved with CSS transforms.
#[derive(Default)]
pub struct NodePainter {
	layer: Option<HtmlElement>,
	document: Option<Document>,
	nodes: Vec<HtmlElement>,
}

impl NodePainter {
	fn clear(&mut self) {
		for node in self.nodes.drain(..) {
			node.remove();
		}
	}

	fn create_node(&self, particle: &Particle) -> Option<HtmlElement> {
		let (layer, document) = (self.layer.as_ref()?, self.document.as_ref()?);
		let node: HtmlElement = document.create_element("span").ok()?.dyn_into().ok()?;
		node.style().set_css_text(&node_css(particle));
		if let Err(e) = layer.append_child(&node) {
			warn!("season-backdrop: failed to append particle node: {e:?}");
			return None;
		}
		Some(node)
	}
}

impl Painter<HtmlElement> for NodePainter {
	fn overlay_kind(&self) -> OverlayKind {
		OverlayKind::Layer
	}

	fn attach(&mut self, overlay: &HtmlElement) -> Result<(), EngineError> {
		let document = overlay
			.owner_document()
			.ok_or_else(|| EngineError::RenderingUnavailable("overlay has no document".into()))?;
		let _ = overlay.style().set_property("overflow", "hidden");
		self.layer = Some(overlay.clone());
		self.document = Some(document);
		Ok(())
	}

	// Node positions are in CSS pixels; nothing depends on the viewport.
	fn resize(&mut self, _viewport: Viewport) {}

	fn spawn(&mut self, particles: &[Particle]) {
		self.clear();
		self.nodes = particles
			.iter()
			.filter_map(|p| self.create_node(p))
			.collect();
	}

	fn render(&mut self, particles: &[Particle], now: f64) {
		let time = now / 1000.0;
		for (node, p) in self.nodes.iter().zip(particles) {
			let style = node.style();
			let _ = style.set_property("transform", &transform_css(p));
			if p.appearance.kind == ParticleKind::Firefly {
				let alpha = ParticleSystem::twinkle_alpha(p, time);
				let _ = style.set_property("opacity", &format!("{alpha:.3}"));
			}
		}
	}

	fn detach(&mut self) {
		self.clear();
		self.layer = None;
		self.document = None;
	}
}

/// Static inline style for a particle's node; position comes from [`transform_css`].
fn node_css(p: &Particle) -> String {
	let look = &p.appearance;
	let color = look.color.to_css();
	let diameter = p.size * 2.0;
	let (width, height, radius, glow) = match look.kind {
		ParticleKind::Snowflake => (diameter, diameter, "50%".to_string(), p.size * 1.5),
		ParticleKind::Firefly => (diameter, diameter, "50%".to_string(), p.size * 3.0),
		ParticleKind::Leaf => (diameter, p.size * 0.9, "0 100%".to_string(), 0.0),
		ParticleKind::Petal => (diameter, p.size * 1.2, "50% 50% 50% 0".to_string(), 0.0),
	};

	let mut css = format!(
		"position: absolute; left: 0; top: 0; width: {width:.2}px; height: {height:.2}px; \
		 border-radius: {radius}; background: {color}; opacity: {:.3}; \
		 will-change: transform; transform: {};",
		look.opacity,
		transform_css(p),
	);
	if glow > 0.0 {
		css.push_str(&format!(" box-shadow: 0 0 {glow:.1}px {color};"));
	}
	css
}

/// Transform placing the node's center on the particle.
fn transform_css(p: &Particle) -> String {
	format!(
		"translate3d({:.2}px, {:.2}px, 0) rotate({:.1}deg)",
		p.x - p.size,
		p.y - p.size,
		p.rotation.to_degrees()
	)
}
