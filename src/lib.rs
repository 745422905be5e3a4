//! season-backdrop: Seasonal animated backgrounds for any container element.
//!
//! This crate provides a WASM animation engine that paints a season-matched
//! gradient behind a host element and animates falling petals, fireflies,
//! leaves or snow on top of it, plus Leptos bindings and a demo page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::season_background::{
	EngineError, Options, Season, SeasonBackground, SeasonalBackground, Target, Theme,
	bg_follow_season, create_seasonal_background, current_season, detect_season_by_date,
	theme_of,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("season-backdrop: logging initialized");
}

/// Load background options from a script element with id="season-options".
/// Expected format: JSON such as { "season": "winter", "particleCount": 60 }
fn load_options() -> Option<Options> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("season-options")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<Options>(&json_text) {
		Ok(options) => {
			info!("season-backdrop: loaded options {:?}", options);
			Some(options)
		}
		Err(e) => {
			warn!("season-backdrop: failed to parse options: {}", e);
			None
		}
	}
}

/// Demo application.
/// Shows a full-page seasonal background with a season switcher.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let options = load_options().unwrap_or_default();
	let initial = options.season.unwrap_or_else(|| {
		if options.auto_season {
			current_season()
		} else {
			Season::FALLBACK
		}
	});
	let (season, set_season) = signal(initial);
	let theme = Memo::new(move |_| *theme_of(season.get()));

	// The preview card always shows the season after the selected one.
	let preview = Signal::derive(move || Options {
		season: Some(season.get().next()),
		particle_count: 15,
		..Options::default()
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="season-backdrop" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<SeasonBackground
			season=Signal::derive(move || Some(season.get()))
			auto_season=options.auto_season
			particle_count=options.particle_count
			fps=options.fps
			class="season-page"
		>
			<header class="season-header">
				<div
					class="season-swatch"
					style:background-image=move || theme.get().background.to_css()
				/>
				<h1>"season-backdrop"</h1>
				<nav class="season-switcher">
					{Season::ALL
						.into_iter()
						.map(|s| {
							view! {
								<button
									type="button"
									class:active=move || season.get() == s
									on:click=move |_| set_season.set(s)
								>
									{s.name()}
								</button>
							}
						})
						.collect_view()}
				</nav>
			</header>
			<main class="season-content">
				<p style:color=move || theme.get().accent.to_css()>
					"An animated, season-matched background behind any container."
				</p>
				<section class="season-preview" use:bg_follow_season=preview>
					<p>"Next up"</p>
				</section>
			</main>
		</SeasonBackground>
	}
}
