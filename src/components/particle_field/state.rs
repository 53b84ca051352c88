//! Field state: the particle arena plus canvas bounds and configuration.
//!
//! Created once per attach. The particle count is fixed at creation; resizing
//! only moves the bounds and lets out-of-range particles bounce back in on
//! their next update.

use rand::Rng;

use super::config::FieldConfig;
use super::particles::{Particle, PointerTarget};

/// Particles of one field lifetime, bounded by the current canvas size.
pub struct FieldState {
	particles: Vec<Particle>,
	config: FieldConfig,
	/// Canvas width (px).
	pub width: f64,
	/// Canvas height (px).
	pub height: f64,
}

impl FieldState {
	/// Seeds `config.count.count(width)` particles across the canvas.
	pub fn new<R: Rng + ?Sized>(config: FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
		let count = config.count.count(width);
		let particles = (0..count)
			.map(|_| Particle::spawn(&config, width, height, rng))
			.collect();

		Self {
			particles,
			config,
			width,
			height,
		}
	}

	/// Configuration the field was seeded with.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// All particles in draw order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Mutable view for drawing passes that move particles in place.
	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// Number of particles, fixed for the field's lifetime.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the viewport was too narrow to seed anything.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Runs the physics step for a single particle.
	pub fn update_particle(&mut self, idx: usize, pointer: PointerTarget) {
		let (width, height) = (self.width, self.height);
		if let Some(p) = self.particles.get_mut(idx) {
			p.update(pointer, width, height, &self.config);
		}
	}

	/// Advances every particle one tick without drawing.
	pub fn step(&mut self, pointer: PointerTarget) {
		for idx in 0..self.particles.len() {
			self.update_particle(idx, pointer);
		}
	}

	/// Moves the bounds. Particles stay where they are.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
