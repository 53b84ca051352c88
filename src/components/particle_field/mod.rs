//! Interactive particle field background.
//!
//! Renders drifting particles on a full-viewport canvas with:
//! - Attraction toward the pointer within an interaction radius
//! - Soft bounces off the canvas edges and per-tick velocity damping
//! - Distance-faded connection lines between nearby particles
//! - Theme-keyed coloring, with a glow halo on dark backgrounds
//!
//! Desktop and mobile layouts share the same engine and differ only in the
//! [`FieldConfig`] preset picked by [`Profile`].
//!
//! # Example
//!
//! ```ignore
//! use linkcard::components::particle_field::{ParticleBackground, Profile};
//!
//! let (dark, _) = signal(true);
//! view! { <ParticleBackground dark=dark profile=Profile::Auto /> }
//! ```

mod component;
pub mod config;
pub mod controller;
mod error;
mod particles;
pub mod render;
mod state;
pub mod theme;
mod web;

pub use component::ParticleBackground;
pub use config::{FieldConfig, Profile};
pub use controller::{FieldHandle, Host, attach, restart_field};
pub use error::FieldError;
pub use particles::{Particle, PointerTarget};
pub use state::FieldState;
pub use theme::ThemeMode;
pub use web::{CanvasSurface, WebHost};
