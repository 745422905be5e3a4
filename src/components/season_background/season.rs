//! Calendar seasons and the month-based season resolver.

use std::fmt;

use serde::Deserialize;

/// One of the four calendar-derived modes that drive theme and particle behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
	Spring,
	Summer,
	Autumn,
	Winter,
}

impl Season {
	/// All seasons in calendar order, starting with spring.
	pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

	/// Season used when neither an explicit season nor auto-detection applies.
	pub const FALLBACK: Season = Season::Spring;

	/// Maps a 1-indexed month to its season.
	///
	/// March-May is spring, June-August summer, September-November autumn.
	/// Everything else (including out-of-range input) is winter, so the
	/// mapping is total.
	pub const fn from_month(month: u32) -> Self {
		match month {
			3..=5 => Season::Spring,
			6..=8 => Season::Summer,
			9..=11 => Season::Autumn,
			_ => Season::Winter,
		}
	}

	/// The season that follows this one.
	pub const fn next(self) -> Self {
		match self {
			Season::Spring => Season::Summer,
			Season::Summer => Season::Autumn,
			Season::Autumn => Season::Winter,
			Season::Winter => Season::Spring,
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			Season::Spring => "spring",
			Season::Summer => "summer",
			Season::Autumn => "autumn",
			Season::Winter => "winter",
		}
	}
}

impl fmt::Display for Season {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Resolve the season for a JS date (local time).
pub fn detect_season_by_date(date: &js_sys::Date) -> Season {
	// getMonth() is 0-indexed
	Season::from_month(date.get_month() + 1)
}

/// Resolve the season for the current local date.
pub fn current_season() -> Season {
	detect_season_by_date(&js_sys::Date::new_0())
}
