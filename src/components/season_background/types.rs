//! Engine configuration.

use serde::Deserialize;

use super::season::Season;

/// Particles spawned per batch when the caller does not say otherwise.
pub const DEFAULT_PARTICLE_COUNT: usize = 40;

/// Frame-rate cap applied when the caller does not say otherwise.
pub const DEFAULT_FPS: f64 = 30.0;

/// Caller options for a seasonal background.
///
/// Deserializes from camelCase JSON with every field optional, e.g.
/// `{"season": "winter", "particleCount": 60, "fps": 24}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
	/// Explicit season. Takes precedence over `auto_season`.
	pub season: Option<Season>,
	/// Derive the season from today's date when none is given.
	pub auto_season: bool,
	pub particle_count: usize,
	/// Maximum frames per second. `None` renders on every display refresh.
	pub fps: Option<f64>,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			season: None,
			auto_season: true,
			particle_count: DEFAULT_PARTICLE_COUNT,
			fps: Some(DEFAULT_FPS),
		}
	}
}

impl Options {
	/// Initial season: explicit, else today's (when enabled), else the fallback.
	pub fn initial_season(&self, current_month: impl FnOnce() -> u32) -> Season {
		match self.season {
			Some(season) => season,
			None if self.auto_season => Season::from_month(current_month()),
			None => Season::FALLBACK,
		}
	}

	/// Minimum milliseconds between rendered frames, if throttled.
	///
	/// A cap that is not a positive finite number falls back to [`DEFAULT_FPS`].
	pub fn frame_interval(&self) -> Option<f64> {
		self.fps.map(|fps| {
			let fps = if fps.is_finite() && fps > 0.0 {
				fps
			} else {
				DEFAULT_FPS
			};
			1000.0 / fps
		})
	}
}
