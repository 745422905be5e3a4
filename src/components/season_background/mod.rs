//! Seasonal animated background engine.
//!
//! Paints a season-matched gradient on a host element and animates falling
//! particles (petals, fireflies, leaves or snow) on an overlay stacked behind
//! the host's own content:
//! - Season resolution from the calendar, or an explicit season
//! - A particle simulation that recycles particles at the viewport edges
//! - A display-synchronized loop with an optional frame-rate cap
//! - Two painting strategies: canvas drawing and persistent DOM nodes
//!
//! # Example
//!
//! ```ignore
//! use season_backdrop::{Options, Season, Target, create_seasonal_background};
//!
//! let bg = create_seasonal_background(
//!     Target::from("#hero"),
//!     Options { particle_count: 60, ..Options::default() },
//! )?;
//! bg.set_season(Season::Winter);
//! bg.destroy();
//! ```

mod component;
mod engine;
mod error;
#[cfg(test)]
mod mock;
mod nodes;
mod painter;
mod particles;
mod render;
mod season;
mod surface;
pub mod theme;
mod types;
mod web;

pub use component::{SeasonBackground, bg_follow_season};
pub use engine::{
	SeasonalBackground, WebBackground, create_seasonal_background,
	create_seasonal_background_with,
};
pub use error::EngineError;
pub use nodes::NodePainter;
pub use painter::Painter;
pub use particles::{
	Appearance, Particle, ParticleKind, ParticleSystem, SpawnPolicy, WRAP_MARGIN, advance, spawn,
};
pub use render::CanvasPainter;
pub use season::{Season, current_season, detect_season_by_date};
pub use surface::{FrameCallback, OverlayKind, RenderingSurface, Target, Viewport};
pub use theme::{Color, Gradient, SEASON_THEMES, Theme, theme_of};
pub use types::{DEFAULT_FPS, DEFAULT_PARTICLE_COUNT, Options};
pub use web::{FrameHandle, ResizeListener, WebSurface};
