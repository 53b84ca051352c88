//! Browser bindings: window-backed [`Host`] and 2D-canvas [`Surface`].

use std::cell::RefCell;
use std::f64::consts::PI;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::controller::{EventHandler, FrameCallback, Host, HostEvent, HostSignal};
use super::error::FieldError;
use super::particles::PointerTarget;
use super::render::Surface;

fn inner_size(window: &Window) -> (f64, f64) {
	let width = window.inner_width().ok().and_then(|v| v.as_f64());
	let height = window.inner_height().ok().and_then(|v| v.as_f64());
	(width.unwrap_or(0.0), height.unwrap_or(0.0))
}

/// A DOM listener registered on the window. Owns the JS closure so it lives
/// exactly as long as the subscription.
pub struct WebListener {
	event: &'static str,
	closure: Closure<dyn FnMut(Event)>,
}

/// [`Host`] backed by the browser window and `requestAnimationFrame`.
///
/// The frame closure is built once and reused for every request, since the
/// controller always passes the same callback.
pub struct WebHost {
	window: Window,
	frame: RefCell<Option<(FrameCallback, Closure<dyn FnMut()>)>>,
}

impl WebHost {
	/// Host scheduling frames and listening for events on `window`.
	pub fn new(window: Window) -> Self {
		Self {
			window,
			frame: RefCell::new(None),
		}
	}
}

/// Converts a DOM event into the controller's payload.
fn translate(event: HostEvent, window: &Window, ev: &Event) -> Option<HostSignal> {
	match event {
		HostEvent::Resize => {
			let (width, height) = inner_size(window);
			Some(HostSignal::Resized { width, height })
		}
		HostEvent::MouseMove => {
			let ev = ev.dyn_ref::<MouseEvent>()?;
			Some(HostSignal::Pointer(PointerTarget {
				x: ev.client_x() as f64,
				y: ev.client_y() as f64,
			}))
		}
		HostEvent::TouchMove | HostEvent::TouchStart => {
			let touch = ev.dyn_ref::<TouchEvent>()?.touches().get(0)?;
			Some(HostSignal::Pointer(PointerTarget {
				x: touch.client_x() as f64,
				y: touch.client_y() as f64,
			}))
		}
	}
}

impl Host for WebHost {
	type FrameHandle = i32;
	type Listener = WebListener;

	fn viewport_size(&self) -> (f64, f64) {
		inner_size(&self.window)
	}

	fn request_frame(&self, callback: &FrameCallback) -> Option<i32> {
		let mut slot = self.frame.borrow_mut();
		let stale = !matches!(&*slot, Some((cb, _)) if std::rc::Rc::ptr_eq(cb, callback));
		if stale {
			let cb = callback.clone();
			*slot = Some((callback.clone(), Closure::new(move || cb())));
		}
		let (_, closure) = slot.as_ref()?;
		self.window
			.request_animation_frame(closure.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}

	fn listen(&self, event: HostEvent, mut handler: EventHandler) -> Option<WebListener> {
		let window = self.window.clone();
		let closure = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
			if let Some(signal) = translate(event, &window, &ev) {
				handler(signal);
			}
		});
		let name = event.dom_name();
		self.window
			.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
			.ok()?;
		Some(WebListener {
			event: name,
			closure,
		})
	}

	fn unlisten(&self, listener: WebListener) {
		let _ = self.window.remove_event_listener_with_callback(
			listener.event,
			listener.closure.as_ref().unchecked_ref(),
		);
	}
}

/// [`Surface`] drawing into an HTML canvas through its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Wraps `canvas`, failing if it has no 2D context.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, FieldError> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
			.ok_or(FieldError::ContextUnavailable)?;
		Ok(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn resize(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width.max(0.0) as u32);
		self.canvas.set_height(height.max(0.0) as u32);
	}

	fn clear(&mut self, width: f64, height: f64) {
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: &str) {
		self.ctx.set_shadow_blur(0.0);
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}

	fn disc(&mut self, center: (f64, f64), radius: f64, color: &str, glow: f64) {
		if glow > 0.0 {
			self.ctx.set_shadow_blur(glow);
			self.ctx.set_shadow_color(color);
		} else {
			self.ctx.set_shadow_blur(0.0);
		}
		self.ctx.set_fill_style_str(color);
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.0, center.1, radius.max(0.0), 0.0, PI * 2.0);
		self.ctx.fill();
	}
}
