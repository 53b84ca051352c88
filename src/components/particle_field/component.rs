//! Leptos component hosting the particle field on a fixed, full-viewport canvas.
//!
//! The field is attached once the canvas is mounted and rebuilt from scratch
//! whenever the theme signal changes. It is detached when the component is
//! cleaned up. Attach failures leave an empty canvas behind.

use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::HtmlCanvasElement;

use super::config::Profile;
use super::controller::{FieldHandle, restart_field};
use super::error::FieldError;
use super::theme::ThemeMode;
use super::web::{CanvasSurface, WebHost};

/// Fresh generator for one field lifetime.
fn field_rng() -> SmallRng {
	let seed = js_sys::Math::random() * (1u64 << 53) as f64;
	SmallRng::seed_from_u64(seed as u64)
}

/// Swaps the field in `slot` for one drawn on `canvas` in `theme`.
fn start_field(
	slot: &mut Option<FieldHandle<WebHost>>,
	canvas: Option<HtmlCanvasElement>,
	theme: ThemeMode,
	profile: Profile,
) -> Result<(), FieldError> {
	let Some(window) = web_sys::window() else {
		*slot = None;
		return Err(FieldError::SurfaceUnavailable);
	};
	let host = Rc::new(WebHost::new(window));
	let surface = match canvas.map(CanvasSurface::new).transpose() {
		Ok(surface) => surface,
		Err(e) => {
			*slot = None;
			return Err(e);
		}
	};
	restart_field(slot, host, surface, theme, profile, &mut field_rng())
}

/// Animated, pointer-reactive particle background.
///
/// Sits behind the page content and ignores pointer events itself; it reads
/// the pointer from the window instead. Pass the page's dark-mode flag as
/// `dark`; toggling it tears the field down and seeds a new one.
#[component]
pub fn ParticleBackground(
	/// Page dark-mode flag; each change rebuilds the field.
	#[prop(into)]
	dark: Signal<bool>,
	/// Preset selection, resolved at every (re)attach.
	#[prop(default = Profile::Auto)]
	profile: Profile,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let field = StoredValue::new_local(None::<FieldHandle<WebHost>>);

	Effect::new(move |_| {
		let theme = ThemeMode::from_dark(dark.get());
		let canvas = canvas_ref.get().map(HtmlCanvasElement::from);

		field.update_value(|slot| {
			if let Err(e) = start_field(slot, canvas, theme, profile) {
				debug!("linkcard: particle field not started: {e}");
			}
		});
	});

	on_cleanup(move || {
		field.try_update_value(|slot| {
			if let Some(mut handle) = slot.take() {
				handle.detach();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field"
			aria-hidden="true"
			style="position: fixed; top: 0; left: 0; width: 100%; height: 100%; pointer-events: none; z-index: 0;"
		/>
	}
}
