//! Field lifecycle: attach to a surface, run the frame loop, detach.
//!
//! The browser is reached only through the [`Host`] trait (frame scheduling
//! plus event subscriptions), so the loop can be driven by a fake host in
//! tests. Everything runs on one thread: event handlers and the frame
//! callback take turns on the same event loop, so the shared pointer target
//! is a plain `Cell` and the state a plain `RefCell`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::debug;
use rand::Rng;

use super::config::{FieldConfig, PointerProfile, Profile};
use super::error::FieldError;
use super::particles::PointerTarget;
use super::render::{Surface, render_frame};
use super::state::FieldState;
use super::theme::ThemeMode;

/// Callback the host invokes on its next animation frame.
pub type FrameCallback = Rc<dyn Fn()>;

/// Handler the host invokes for each subscribed event.
pub type EventHandler = Box<dyn FnMut(HostSignal)>;

/// Events a field subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
	/// The viewport changed size.
	Resize,
	/// The mouse moved.
	MouseMove,
	/// A touch point moved.
	TouchMove,
	/// A finger touched down.
	TouchStart,
}

impl HostEvent {
	/// DOM event type name.
	pub fn dom_name(self) -> &'static str {
		match self {
			HostEvent::Resize => "resize",
			HostEvent::MouseMove => "mousemove",
			HostEvent::TouchMove => "touchmove",
			HostEvent::TouchStart => "touchstart",
		}
	}
}

/// Payload delivered to an [`EventHandler`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostSignal {
	/// The viewport now has these dimensions.
	Resized {
		/// Viewport width (px).
		width: f64,
		/// Viewport height (px).
		height: f64,
	},
	/// A pointer or touch reported these client coordinates.
	Pointer(PointerTarget),
}

/// Scheduling and event primitives of the hosting environment.
pub trait Host {
	/// Token for cancelling a scheduled frame.
	type FrameHandle: 'static;
	/// Token for removing an event subscription.
	type Listener;

	/// Current viewport width and height (px).
	fn viewport_size(&self) -> (f64, f64);

	/// Schedules `callback` for the next frame. `None` if the host refused.
	fn request_frame(&self, callback: &FrameCallback) -> Option<Self::FrameHandle>;

	/// Drops a frame scheduled by [`Host::request_frame`].
	fn cancel_frame(&self, handle: Self::FrameHandle);

	/// Subscribes `handler` to `event`. `None` if the host refused.
	fn listen(&self, event: HostEvent, handler: EventHandler) -> Option<Self::Listener>;

	/// Removes a subscription made by [`Host::listen`].
	fn unlisten(&self, listener: Self::Listener);
}

/// A running field. Dropping it detaches.
pub struct FieldHandle<H: Host> {
	host: Rc<H>,
	state: Rc<RefCell<FieldState>>,
	pointer: Rc<Cell<PointerTarget>>,
	frame: Rc<Cell<Option<H::FrameHandle>>>,
	running: Rc<Cell<bool>>,
	listeners: Vec<H::Listener>,
	callback: Option<FrameCallback>,
}

impl<H: Host> FieldHandle<H> {
	/// Whether the frame loop is still going.
	pub fn is_running(&self) -> bool {
		self.running.get()
	}

	/// Number of particles seeded at attach.
	pub fn particle_count(&self) -> usize {
		self.state.borrow().len()
	}

	/// Last pointer position seen by the field.
	pub fn pointer(&self) -> PointerTarget {
		self.pointer.get()
	}

	/// Runs `f` against the field state.
	pub fn with_state<T>(&self, f: impl FnOnce(&FieldState) -> T) -> T {
		f(&self.state.borrow())
	}

	/// Cancels the pending frame and removes every subscription. Safe to call
	/// more than once.
	pub fn detach(&mut self) {
		if self.running.replace(false) {
			debug!("linkcard: detaching particle field");
		}
		if let Some(frame) = self.frame.take() {
			self.host.cancel_frame(frame);
		}
		for listener in self.listeners.drain(..) {
			self.host.unlisten(listener);
		}
		self.callback = None;
	}

	fn subscribe(&mut self, event: HostEvent, handler: EventHandler) -> Result<(), FieldError> {
		let listener = self
			.host
			.listen(event, handler)
			.ok_or(FieldError::Subscribe(event))?;
		self.listeners.push(listener);
		Ok(())
	}
}

impl<H: Host> Drop for FieldHandle<H> {
	fn drop(&mut self) {
		self.detach();
	}
}

/// Sizes `surface` to the viewport, seeds the particles, subscribes to resize
/// and pointer events and starts the frame loop.
///
/// A missing surface yields [`FieldError::SurfaceUnavailable`] without
/// touching the host, so the caller can simply retry later. Any other failure
/// rolls back whatever was registered before returning.
pub fn attach<H, S, R>(
	host: Rc<H>,
	surface: Option<S>,
	config: FieldConfig,
	rng: &mut R,
) -> Result<FieldHandle<H>, FieldError>
where
	H: Host + 'static,
	S: Surface + 'static,
	R: Rng + ?Sized,
{
	let mut surface = surface.ok_or(FieldError::SurfaceUnavailable)?;
	let (width, height) = host.viewport_size();
	surface.resize(width, height);

	let pointer_event = match config.pointer {
		PointerProfile::Mouse => HostEvent::MouseMove,
		PointerProfile::Touch => HostEvent::TouchMove,
	};
	let state = FieldState::new(config, width, height, rng);
	debug!(
		"linkcard: attaching particle field, {} particles on {}x{}",
		state.len(),
		width,
		height
	);

	let mut handle = FieldHandle {
		host: host.clone(),
		state: Rc::new(RefCell::new(state)),
		pointer: Rc::new(Cell::new(PointerTarget::default())),
		frame: Rc::new(Cell::new(None)),
		running: Rc::new(Cell::new(true)),
		listeners: Vec::new(),
		callback: None,
	};
	let surface = Rc::new(RefCell::new(surface));

	let (state_resize, surface_resize) = (handle.state.clone(), surface.clone());
	handle.subscribe(
		HostEvent::Resize,
		Box::new(move |signal: HostSignal| {
			if let HostSignal::Resized { width, height } = signal {
				surface_resize.borrow_mut().resize(width, height);
				state_resize.borrow_mut().resize(width, height);
			}
		}),
	)?;

	for event in [pointer_event, HostEvent::TouchStart] {
		let pointer = handle.pointer.clone();
		handle.subscribe(
			event,
			Box::new(move |signal: HostSignal| {
				if let HostSignal::Pointer(target) = signal {
					pointer.set(target);
				}
			}),
		)?;
	}

	let callback = frame_callback(&handle, surface);
	let first = host.request_frame(&callback).ok_or(FieldError::Schedule)?;
	handle.frame.set(Some(first));
	handle.callback = Some(callback);
	Ok(handle)
}

/// Replaces the field held in `slot` with a fresh one for `theme`.
///
/// The old field, if any, is detached first, even when the new one then fails
/// to attach; `slot` is left empty in that case. The preset is resolved from
/// `profile` and the host's current viewport width.
pub fn restart_field<H, S, R>(
	slot: &mut Option<FieldHandle<H>>,
	host: Rc<H>,
	surface: Option<S>,
	theme: ThemeMode,
	profile: Profile,
	rng: &mut R,
) -> Result<(), FieldError>
where
	H: Host + 'static,
	S: Surface + 'static,
	R: Rng + ?Sized,
{
	if let Some(mut old) = slot.take() {
		old.detach();
	}
	let (width, _) = host.viewport_size();
	let config = profile.resolve(theme, width);
	debug!("linkcard: field profile {profile:?} resolved to {:?}", config.count);
	*slot = Some(attach(host, surface, config, rng)?);
	Ok(())
}

/// Builds the self-rescheduling frame callback. It holds only a weak
/// reference to itself and to the host; the handle keeps it alive.
fn frame_callback<H, S>(handle: &FieldHandle<H>, surface: Rc<RefCell<S>>) -> FrameCallback
where
	H: Host + 'static,
	S: Surface + 'static,
{
	let host: Weak<H> = Rc::downgrade(&handle.host);
	let state = handle.state.clone();
	let pointer = handle.pointer.clone();
	let frame = handle.frame.clone();
	let running = handle.running.clone();
	let this: Rc<RefCell<Option<Weak<dyn Fn()>>>> = Rc::new(RefCell::new(None));
	let this_inner = this.clone();

	let callback: FrameCallback = Rc::new(move || {
		frame.set(None);
		if !running.get() {
			return;
		}

		render_frame(&mut state.borrow_mut(), &mut *surface.borrow_mut(), pointer.get());

		let me = this_inner.borrow().as_ref().and_then(Weak::upgrade);
		let next = match (host.upgrade(), me) {
			(Some(host), Some(me)) => host.request_frame(&me),
			_ => None,
		};
		match next {
			Some(next) => frame.set(Some(next)),
			None => {
				debug!("linkcard: next frame refused, particle field stopped");
				running.set(false);
			}
		}
	});
	*this.borrow_mut() = Some(Rc::downgrade(&callback));
	callback
}

#[cfg(test)]
pub(crate) mod testing {
	//! In-memory [`Host`] that counts every registration.

	use super::*;

	#[derive(Default)]
	pub struct FakeHost {
		pub viewport: Cell<(f64, f64)>,
		pub refuse: Cell<Option<HostEvent>>,
		pub refuse_frames: Cell<bool>,
		next_id: Cell<u32>,
		frames: RefCell<Vec<(u32, FrameCallback)>>,
		listeners: RefCell<Vec<(u32, HostEvent, EventHandler)>>,
		pub frames_requested: Cell<usize>,
		pub frames_cancelled: Cell<usize>,
		pub subscribed: Cell<usize>,
		pub unsubscribed: Cell<usize>,
	}

	impl FakeHost {
		pub fn with_viewport(width: f64, height: f64) -> Self {
			let host = Self::default();
			host.viewport.set((width, height));
			host
		}

		fn next_id(&self) -> u32 {
			let id = self.next_id.get() + 1;
			self.next_id.set(id);
			id
		}

		pub fn pending_frames(&self) -> usize {
			self.frames.borrow().len()
		}

		pub fn live_listeners(&self) -> usize {
			self.listeners.borrow().len()
		}

		pub fn listens_to(&self, event: HostEvent) -> bool {
			self.listeners.borrow().iter().any(|(_, e, _)| *e == event)
		}

		/// Runs every callback scheduled so far, like one display refresh.
		pub fn run_frame(&self) {
			let due: Vec<_> = self.frames.borrow_mut().drain(..).collect();
			for (_, callback) in due {
				callback();
			}
		}

		/// Delivers `signal` to every handler subscribed to `event`.
		pub fn emit(&self, event: HostEvent, signal: HostSignal) {
			for (_, e, handler) in self.listeners.borrow_mut().iter_mut() {
				if *e == event {
					handler(signal);
				}
			}
		}
	}

	impl Host for FakeHost {
		type FrameHandle = u32;
		type Listener = u32;

		fn viewport_size(&self) -> (f64, f64) {
			self.viewport.get()
		}

		fn request_frame(&self, callback: &FrameCallback) -> Option<u32> {
			if self.refuse_frames.get() {
				return None;
			}
			let id = self.next_id();
			self.frames.borrow_mut().push((id, callback.clone()));
			self.frames_requested.set(self.frames_requested.get() + 1);
			Some(id)
		}

		fn cancel_frame(&self, handle: u32) {
			self.frames.borrow_mut().retain(|(id, _)| *id != handle);
			self.frames_cancelled.set(self.frames_cancelled.get() + 1);
		}

		fn listen(&self, event: HostEvent, handler: EventHandler) -> Option<u32> {
			if self.refuse.get() == Some(event) {
				return None;
			}
			let id = self.next_id();
			self.listeners.borrow_mut().push((id, event, handler));
			self.subscribed.set(self.subscribed.get() + 1);
			Some(id)
		}

		fn unlisten(&self, listener: u32) {
			self.listeners.borrow_mut().retain(|(id, _, _)| *id != listener);
			self.unsubscribed.set(self.unsubscribed.get() + 1);
		}
	}
}
