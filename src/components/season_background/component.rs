//! Leptos integrations: a wrapping component and a `use:` directive.
//!
//! Both are thin lifecycle glue around the engine. It is created once the host
//! element is mounted (inside an effect, so the element has a measurable box),
//! `set_season` follows the bound season, and the engine is destroyed when the
//! owning scope is cleaned up. The component paints on a canvas; the directive
//! paints with DOM nodes.

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::engine::{SeasonalBackground, create_seasonal_background_with};
use super::nodes::NodePainter;
use super::painter::Painter;
use super::render::CanvasPainter;
use super::season::Season;
use super::surface::Target;
use super::types::{DEFAULT_FPS, DEFAULT_PARTICLE_COUNT, Options};
use super::web::WebSurface;

/// Engine slot shared between the mount effect and the cleanup hook.
type Slot<P> = StoredValue<Option<SeasonalBackground<WebSurface, P>>, LocalStorage>;

/// Create the engine on first run, afterwards forward season changes.
fn sync<P>(slot: Slot<P>, host: &HtmlElement, options: Options)
where
	P: Painter<HtmlElement> + Default + 'static,
{
	if slot.with_value(Option::is_some) {
		if let Some(season) = options.season {
			slot.with_value(|bg| {
				if let Some(bg) = bg {
					bg.set_season(season);
				}
			});
		}
		return;
	}

	let created = WebSurface::new().and_then(|surface| {
		create_seasonal_background_with(
			surface,
			P::default(),
			Target::Element(host.clone()),
			options,
		)
	});
	match created {
		Ok(bg) => slot.set_value(Some(bg)),
		Err(e) => error!("season-backdrop: {e}"),
	}
}

fn destroy_on_cleanup<P>(slot: Slot<P>)
where
	P: Painter<HtmlElement> + 'static,
{
	on_cleanup(move || {
		let _ = slot.try_update_value(|bg| {
			if let Some(bg) = bg.take() {
				bg.destroy();
			}
		});
	});
}

/// Container with an animated seasonal background behind its children.
///
/// Leave `season` unset (or `None`) to follow the calendar; changing it later
/// switches the running background without recreating it.
///
/// The host is always a `<div>`. Extra attributes go through Leptos attribute
/// spreading, e.g. `<SeasonBackground attr:id="hero" attr:role="banner">`. To
/// decorate an element of another kind, put `use:bg_follow_season` on it.
#[component]
pub fn SeasonBackground(
	#[prop(into, optional)] season: Signal<Option<Season>>,
	#[prop(default = true)] auto_season: bool,
	#[prop(default = DEFAULT_PARTICLE_COUNT)] particle_count: usize,
	#[prop(default = Some(DEFAULT_FPS))] fps: Option<f64>,
	#[prop(into, optional)] class: String,
	children: Children,
) -> impl IntoView {
	let host_ref = NodeRef::<leptos::html::Div>::new();
	let slot: Slot<CanvasPainter> = StoredValue::new_local(None);

	Effect::new(move |_| {
		let Some(host) = host_ref.get() else {
			return;
		};
		let host: HtmlElement = host.into();
		let options = Options {
			season: season.get(),
			auto_season,
			particle_count,
			fps,
		};
		sync(slot, &host, options);
	});
	destroy_on_cleanup(slot);

	view! {
		<div node_ref=host_ref class=class>
			{children()}
		</div>
	}
}

/// Directive form: `<section use:bg_follow_season=options>`.
///
/// `binding` supplies the construction options; later changes to its
/// `season` are forwarded to the running background.
pub fn bg_follow_season(el: Element, binding: Signal<Options>) {
	let Ok(host) = el.dyn_into::<HtmlElement>() else {
		warn!("season-backdrop: bg_follow_season needs an HTML element");
		return;
	};
	let slot: Slot<NodePainter> = StoredValue::new_local(None);

	Effect::new(move |_| {
		sync(slot, &host, binding.get());
	});
	destroy_on_cleanup(slot);
}
