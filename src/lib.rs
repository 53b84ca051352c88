//! linkcard: a link-in-bio landing card over an interactive particle field.
//!
//! This crate provides a WASM page that renders a themed card of social and
//! contact links on top of an animated, pointer-reactive particle background.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Storage, Window};

pub mod components;

pub use components::link_card::{LinkCard, LinkIcon, LinkItem, PageData};
pub use components::particle_field::{ParticleBackground, Profile};

/// Local storage key holding the dark-mode preference as a JSON boolean.
const THEME_KEY: &str = "darkMode";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("linkcard: logging initialized");
}

/// Load page content from a script element with id="page-data".
/// Expected format: JSON matching [`PageData`]; missing fields use defaults.
fn load_page_data() -> Option<PageData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("page-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<PageData>(&json_text) {
		Ok(data) => {
			info!("linkcard: loaded page data with {} links", data.links.len());
			Some(data)
		}
		Err(e) => {
			warn!("linkcard: failed to parse page data: {}", e);
			None
		}
	}
}

fn local_storage() -> Option<Storage> {
	web_sys::window()?.local_storage().ok()?
}

/// Parses a stored theme preference. Anything but a JSON boolean is ignored.
pub fn parse_theme_preference(raw: &str) -> Option<bool> {
	match serde_json::from_str::<bool>(raw) {
		Ok(dark) => Some(dark),
		Err(e) => {
			warn!("linkcard: ignoring stored theme preference {raw:?}: {e}");
			None
		}
	}
}

fn load_theme_preference() -> Option<bool> {
	let raw = local_storage()?.get_item(THEME_KEY).ok()??;
	parse_theme_preference(&raw)
}

fn store_theme_preference(dark: bool) {
	let Some(storage) = local_storage() else {
		return;
	};
	if let Ok(json) = serde_json::to_string(&dark) {
		if storage.set_item(THEME_KEY, &json).is_err() {
			debug!("linkcard: could not persist theme preference");
		}
	}
}

/// Main application component.
/// Loads page content from the DOM and renders the card over the particle field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let data = load_page_data().unwrap_or_default();
	let (dark, set_dark) = signal(load_theme_preference().unwrap_or(true));
	let toggle = Callback::new(move |_: ()| {
		set_dark.update(|d| *d = !*d);
		store_theme_preference(dark.get_untracked());
	});
	let title = format!("{} | Links", data.brand);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class=move || if dark.get() { "page page--dark" } else { "page page--light" }>
			<ParticleBackground dark=dark />
			<LinkCard data=data dark=dark on_toggle=toggle />
		</div>
	}
}
