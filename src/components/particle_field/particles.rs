//! Particle records and the per-frame physics step.

use rand::Rng;

use super::config::{FieldConfig, ForceModel};
use super::theme::Hsla;

/// Shared attraction target, written by pointer events and read each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTarget {
	/// Client x (px).
	pub x: f64,
	/// Client y (px).
	pub y: f64,
}

/// A single particle. Plain data; the field owns them in a flat `Vec`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
	/// Position (px).
	pub x: f64,
	/// Position (px).
	pub y: f64,
	/// Velocity (px per tick).
	pub vx: f64,
	/// Velocity (px per tick).
	pub vy: f64,
	/// Radius the particle was spawned with.
	pub base_size: f64,
	/// Radius to draw this frame (pulsed when near the pointer).
	pub size: f64,
	/// Fixed for the particle's lifetime.
	pub color: Hsla,
}

impl Particle {
	/// Spawns a particle at a random position inside `width` x `height`.
	pub fn spawn<R: Rng + ?Sized>(config: &FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
		let (size_min, size_max) = config.size_range;
		let speed = config.max_initial_speed;
		let base_size = uniform(rng, size_min, size_max);

		Self {
			x: uniform(rng, 0.0, width),
			y: uniform(rng, 0.0, height),
			vx: uniform(rng, -speed, speed),
			vy: uniform(rng, -speed, speed),
			base_size,
			size: base_size,
			color: config.theme.particle_color(rng),
		}
	}

	/// Advances the particle one tick: attraction, integration, boundary
	/// reflection, then damping.
	pub fn update(&mut self, pointer: PointerTarget, width: f64, height: f64, config: &FieldConfig) {
		let radius = config.interaction_radius;
		let (dx, dy) = (pointer.x - self.x, pointer.y - self.y);
		let distance = (dx * dx + dy * dy).sqrt();

		let impulse = config.force.impulse(distance, radius);
		if impulse > 0.0 {
			self.vx += dx / distance * impulse;
			self.vy += dy / distance * impulse;
		}

		self.size = match config.pulse_gain {
			Some(gain) => self.base_size * (1.0 + ForceModel::proximity(distance, radius) * gain),
			None => self.base_size,
		};

		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 || self.x > width {
			self.vx *= -config.restitution;
			self.x = self.x.clamp(0.0, width.max(0.0));
		}
		if self.y < 0.0 || self.y > height {
			self.vy *= -config.restitution;
			self.y = self.y.clamp(0.0, height.max(0.0));
		}

		self.vx *= config.damping;
		self.vy *= config.damping;
	}

	/// Velocity magnitude.
	pub fn speed(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}
}

/// Uniform sample in `[min, max)`, or `min` when the range is empty.
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
	if max > min { rng.gen_range(min..max) } else { min }
}
