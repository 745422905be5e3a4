//! Canvas painting strategy.
//!
//! Immediate mode: every frame clears the canvas and redraws each particle
//! from its current state. The backing store is sized in device pixels and the
//! context transform maps CSS pixels onto it, so strokes stay crisp on
//! high-density displays.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use super::error::EngineError;
use super::painter::Painter;
use super::particles::{Particle, ParticleKind, ParticleSystem};
use super::surface::{OverlayKind, Viewport};

/// Paints particles onto a `<canvas>` overlay with the 2D context.
#[derive(Default)]
pub struct CanvasPainter {
	canvas: Option<HtmlCanvasElement>,
	ctx: Option<CanvasRenderingContext2d>,
	viewport: Viewport,
}

impl Painter<HtmlElement> for CanvasPainter {
	fn overlay_kind(&self) -> OverlayKind {
		OverlayKind::Canvas
	}

	fn attach(&mut self, overlay: &HtmlElement) -> Result<(), EngineError> {
		let canvas: HtmlCanvasElement = overlay
			.clone()
			.dyn_into()
			.map_err(|_| EngineError::RenderingUnavailable("overlay is not a canvas".into()))?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into().ok())
			.ok_or_else(|| {
				EngineError::RenderingUnavailable("canvas 2d context not available".into())
			})?;

		self.canvas = Some(canvas);
		self.ctx = Some(ctx);
		Ok(())
	}

	fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		let (Some(canvas), Some(ctx)) = (&self.canvas, &self.ctx) else {
			return;
		};
		let ratio = viewport.pixel_ratio;
		canvas.set_width((viewport.width * ratio) as u32);
		canvas.set_height((viewport.height * ratio) as u32);
		let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	}

	// Nothing persists between frames.
	fn spawn(&mut self, _particles: &[Particle]) {}

	fn render(&mut self, particles: &[Particle], now: f64) {
		let Some(ctx) = &self.ctx else {
			return;
		};
		ctx.clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);

		let time = now / 1000.0;
		for p in particles {
			ctx.set_global_alpha(ParticleSystem::twinkle_alpha(p, time));
			match p.appearance.kind {
				ParticleKind::Snowflake => draw_glow(ctx, p, 2.5, 0.5),
				ParticleKind::Firefly => draw_glow(ctx, p, 4.0, 0.7),
				ParticleKind::Leaf => draw_leaf(ctx, p),
				ParticleKind::Petal => draw_petal(ctx, p),
			}
		}
		ctx.set_global_alpha(1.0);
	}

	fn detach(&mut self) {
		self.ctx = None;
		self.canvas = None;
	}
}

/// Round particle with a soft halo `reach` times its radius.
fn draw_glow(ctx: &CanvasRenderingContext2d, p: &Particle, reach: f64, core_lighten: f64) {
	let color = p.appearance.color;
	let glow_radius = p.size * reach;

	if let Ok(gradient) = ctx.create_radial_gradient(p.x, p.y, 0.0, p.x, p.y, glow_radius) {
		let _ = gradient.add_color_stop(0.0, &color.with_alpha(color.a * 0.6).to_css());
		let _ = gradient.add_color_stop(0.4, &color.with_alpha(color.a * 0.25).to_css());
		let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, glow_radius, 0.0, TAU);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
	}

	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, p.size, 0.0, TAU);
	ctx.set_fill_style_str(&color.lighten(core_lighten).to_css());
	ctx.fill();
}

fn draw_leaf(ctx: &CanvasRenderingContext2d, p: &Particle) {
	let color = p.appearance.color;

	ctx.save();
	let _ = ctx.translate(p.x, p.y);
	let _ = ctx.rotate(p.rotation);

	ctx.begin_path();
	let _ = ctx.ellipse(0.0, 0.0, p.size, p.size * 0.45, 0.0, 0.0, TAU);
	ctx.set_fill_style_str(&color.to_css());
	ctx.fill();

	// Midrib
	ctx.begin_path();
	ctx.move_to(-p.size * 0.9, 0.0);
	ctx.line_to(p.size * 0.9, 0.0);
	ctx.set_stroke_style_str(&color.lighten(0.35).to_css());
	ctx.set_line_width((p.size * 0.12).max(0.5));
	ctx.stroke();

	ctx.restore();
}

fn draw_petal(ctx: &CanvasRenderingContext2d, p: &Particle) {
	let color = p.appearance.color;

	ctx.save();
	let _ = ctx.translate(p.x, p.y);
	let _ = ctx.rotate(p.rotation);

	ctx.begin_path();
	let _ = ctx.ellipse(0.0, 0.0, p.size, p.size * 0.6, 0.0, 0.0, TAU);
	ctx.set_fill_style_str(&color.lighten(0.25).to_css());
	ctx.fill();

	ctx.restore();
}
