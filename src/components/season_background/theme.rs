//! Visual theming for each season.
//!
//! The table here is static data: one [`Theme`] per [`Season`], holding the
//! background gradient painted on the host, an accent color for caller UI, and
//! the tint applied to that season's particles.

use super::season::Season;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// A single color stop, positioned in percent along the gradient line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
	pub color: Color,
	pub offset: u8,
}

const fn stop(color: Color, offset: u8) -> GradientStop {
	GradientStop { color, offset }
}

/// Linear gradient painted as the host's background image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
	/// Direction in degrees (180 = top to bottom).
	pub angle: u16,
	pub stops: &'static [GradientStop],
}

impl Gradient {
	/// CSS `linear-gradient(...)` value for this gradient.
	pub fn to_css(&self) -> String {
		let stops = self
			.stops
			.iter()
			.map(|s| format!("{} {}%", s.color.to_css(), s.offset))
			.collect::<Vec<_>>()
			.join(", ");
		format!("linear-gradient({}deg, {})", self.angle, stops)
	}
}

/// Complete visual theme for one season.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
	pub season: Season,
	/// Background painted on the host element.
	pub background: Gradient,
	/// Accent color for season-matched UI.
	pub accent: Color,
	/// Base tint of this season's particles.
	pub particle: Color,
}

/// Season themes in [`Season::ALL`] order.
pub static SEASON_THEMES: [Theme; 4] = [
	// Forest canopy under a light sky; petals and pollen
	Theme {
		season: Season::Spring,
		background: Gradient {
			angle: 180,
			stops: &[
				stop(Color::rgb(224, 255, 233), 0),
				stop(Color::rgb(192, 245, 212), 30),
				stop(Color::rgb(138, 222, 163), 55),
				stop(Color::rgb(63, 124, 79), 78),
				stop(Color::rgb(18, 32, 21), 100),
			],
		},
		accent: Color::rgb(22, 163, 74),
		particle: Color::rgba(74, 222, 128, 0.9),
	},
	// Bright sky over a lake and treeline; fireflies
	Theme {
		season: Season::Summer,
		background: Gradient {
			angle: 180,
			stops: &[
				stop(Color::rgb(219, 234, 254), 0),
				stop(Color::rgb(147, 197, 253), 30),
				stop(Color::rgb(56, 189, 248), 52),
				stop(Color::rgb(34, 197, 94), 76),
				stop(Color::rgb(5, 46, 22), 100),
			],
		},
		accent: Color::rgb(14, 165, 233),
		particle: Color::rgba(56, 189, 248, 0.95),
	},
	// Golden forest; falling leaves
	Theme {
		season: Season::Autumn,
		background: Gradient {
			angle: 180,
			stops: &[
				stop(Color::rgb(254, 249, 195), 0),
				stop(Color::rgb(254, 215, 170), 30),
				stop(Color::rgb(251, 146, 60), 52),
				stop(Color::rgb(180, 83, 9), 76),
				stop(Color::rgb(67, 20, 7), 100),
			],
		},
		accent: Color::rgb(249, 115, 22),
		particle: Color::rgba(245, 158, 11, 0.95),
	},
	// Snowy forest under a cold sky; snowflakes
	Theme {
		season: Season::Winter,
		background: Gradient {
			angle: 180,
			stops: &[
				stop(Color::rgb(229, 240, 255), 0),
				stop(Color::rgb(191, 219, 254), 28),
				stop(Color::rgb(96, 165, 250), 52),
				stop(Color::rgb(30, 41, 59), 78),
				stop(Color::rgb(2, 6, 23), 100),
			],
		},
		accent: Color::rgb(29, 78, 216),
		particle: Color::rgba(226, 232, 240, 0.98),
	},
];

/// Look up the theme for a season.
pub fn theme_of(season: Season) -> &'static Theme {
	match season {
		Season::Spring => &SEASON_THEMES[0],
		Season::Summer => &SEASON_THEMES[1],
		Season::Autumn => &SEASON_THEMES[2],
		Season::Winter => &SEASON_THEMES[3],
	}
}
