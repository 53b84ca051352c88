//! Per-frame render pass for the particle field.
//!
//! Draw order per frame:
//! 1. Clear the surface
//! 2. Connection lines between nearby pairs, from pre-update positions
//! 3. For each particle: physics step, then a filled disc on top

use super::particles::PointerTarget;
use super::state::FieldState;

/// Anything the field can draw on. The browser implementation wraps a 2D
/// canvas context; tests use a recorder.
pub trait Surface {
	/// Sets the pixel dimensions of the backing surface.
	fn resize(&mut self, width: f64, height: f64);
	/// Erases the rectangle `(0, 0, width, height)`.
	fn clear(&mut self, width: f64, height: f64);
	/// Strokes a straight line with no glow.
	fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: &str);
	/// Fills a circle, with a blurred halo of the same color when `glow > 0`.
	fn disc(&mut self, center: (f64, f64), radius: f64, color: &str, glow: f64);
}

/// Line alpha for two particles `distance` apart, or `None` when they are too
/// far apart to connect.
pub fn connection_alpha(distance: f64, threshold: f64) -> Option<f64> {
	if distance.is_nan() || distance >= threshold {
		return None;
	}
	Some((1.0 - distance / threshold).clamp(0.0, 1.0))
}

/// Draws one frame and advances the simulation by one tick.
pub fn render_frame<S: Surface + ?Sized>(state: &mut FieldState, surface: &mut S, pointer: PointerTarget) {
	surface.clear(state.width, state.height);

	if state.config().connections.enabled {
		draw_connections(state, surface);
	}

	let glow = state.config().effective_glow();
	for idx in 0..state.len() {
		state.update_particle(idx, pointer);
		let p = state.particles()[idx];
		surface.disc((p.x, p.y), p.size, &p.color.to_css(), glow);
	}
}

fn draw_connections<S: Surface + ?Sized>(state: &FieldState, surface: &mut S) {
	let style = state.config().connections;
	let theme = state.config().theme;
	let particles = state.particles();

	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let distance = (dx * dx + dy * dy).sqrt();
			let Some(alpha) = connection_alpha(distance, style.threshold) else {
				continue;
			};
			let color = theme.connection_color(alpha).to_css();
			surface.line((a.x, a.y), (b.x, b.y), style.line_width, &color);
		}
	}
}

/// Draw call captured by [`RecordingSurface`].
#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawOp {
	Resize(f64, f64),
	Clear(f64, f64),
	Line {
		from: (f64, f64),
		to: (f64, f64),
		color: String,
	},
	Disc {
		center: (f64, f64),
		radius: f64,
		color: String,
		glow: f64,
	},
}

/// Surface that records every call in order.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingSurface {
	pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl RecordingSurface {
	pub fn lines(&self) -> usize {
		self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
	}

	pub fn discs(&self) -> usize {
		self.ops.iter().filter(|op| matches!(op, DrawOp::Disc { .. })).count()
	}
}

#[cfg(test)]
impl Surface for RecordingSurface {
	fn resize(&mut self, width: f64, height: f64) {
		self.ops.push(DrawOp::Resize(width, height));
	}

	fn clear(&mut self, width: f64, height: f64) {
		self.ops.push(DrawOp::Clear(width, height));
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), _width: f64, color: &str) {
		self.ops.push(DrawOp::Line {
			from,
			to,
			color: color.to_string(),
		});
	}

	fn disc(&mut self, center: (f64, f64), radius: f64, color: &str, glow: f64) {
		self.ops.push(DrawOp::Disc {
			center,
			radius,
			color: color.to_string(),
			glow,
		});
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::particle_field::config::FieldConfig;
	use crate::components::particle_field::theme::ThemeMode;

	fn field(config: FieldConfig, width: f64) -> FieldState {
		let mut rng = SmallRng::seed_from_u64(9);
		FieldState::new(config, width, 600.0, &mut rng)
	}

	/// Parks every particle on a horizontal line `spacing` px apart, at rest.
	fn line_up(state: &mut FieldState, spacing: f64) {
		for (i, p) in state.particles_mut().iter_mut().enumerate() {
			p.x = 10.0 + i as f64 * spacing;
			p.y = 300.0;
			p.vx = 0.0;
			p.vy = 0.0;
		}
	}

	fn far_pointer() -> PointerTarget {
		PointerTarget { x: -1.0e6, y: -1.0e6 }
	}

	#[test]
	fn alpha_is_linear_below_threshold() {
		assert_eq!(connection_alpha(0.0, 120.0), Some(1.0));
		assert_eq!(connection_alpha(60.0, 120.0), Some(0.5));
		let alpha = connection_alpha(90.0, 120.0).unwrap();
		assert!((alpha - 0.25).abs() < 1e-12);
	}

	#[test]
	fn no_line_at_or_beyond_threshold() {
		assert_eq!(connection_alpha(120.0, 120.0), None);
		assert_eq!(connection_alpha(500.0, 120.0), None);
		assert_eq!(connection_alpha(f64::NAN, 120.0), None);
	}

	#[test]
	fn frame_clears_then_lines_then_discs() {
		let mut state = field(FieldConfig::desktop(ThemeMode::Dark), 100.0);
		line_up(&mut state, 50.0);
		let mut surface = RecordingSurface::default();

		render_frame(&mut state, &mut surface, far_pointer());

		assert_eq!(surface.ops[0], DrawOp::Clear(100.0, 600.0));
		let first_disc = surface
			.ops
			.iter()
			.position(|op| matches!(op, DrawOp::Disc { .. }))
			.unwrap();
		let last_line = surface
			.ops
			.iter()
			.rposition(|op| matches!(op, DrawOp::Line { .. }))
			.unwrap();
		assert!(last_line < first_disc, "lines must be drawn under particles");
		assert_eq!(surface.discs(), state.len());
	}

	#[test]
	fn only_close_unordered_pairs_are_joined() {
		// 10 particles 50px apart, threshold 120: neighbours at 50 and 100 px connect.
		let mut state = field(FieldConfig::desktop(ThemeMode::Dark), 100.0);
		assert_eq!(state.len(), 10);
		line_up(&mut state, 50.0);
		let mut surface = RecordingSurface::default();

		render_frame(&mut state, &mut surface, far_pointer());

		assert_eq!(surface.lines(), 9 + 8);
	}

	#[test]
	fn lines_use_pre_update_positions() {
		let mut state = field(FieldConfig::desktop(ThemeMode::Dark), 100.0);
		line_up(&mut state, 50.0);
		for p in state.particles_mut() {
			p.vx = 3.0;
		}
		let mut surface = RecordingSurface::default();

		render_frame(&mut state, &mut surface, far_pointer());

		let first_line = surface
			.ops
			.iter()
			.find(|op| matches!(op, DrawOp::Line { .. }))
			.cloned();
		let Some(DrawOp::Line { from, to, .. }) = first_line else {
			panic!("expected a connection line");
		};
		assert_eq!(from, (10.0, 300.0));
		assert_eq!(to, (60.0, 300.0));
	}

	#[test]
	fn line_color_tracks_theme_and_distance() {
		let mut state = field(FieldConfig::desktop(ThemeMode::Light), 100.0);
		line_up(&mut state, 60.0);
		let mut surface = RecordingSurface::default();

		render_frame(&mut state, &mut surface, far_pointer());

		let colors: Vec<_> = surface
			.ops
			.iter()
			.filter_map(|op| match op {
				DrawOp::Line { color, .. } => Some(color.clone()),
				_ => None,
			})
			.collect();
		assert!(colors.contains(&"hsla(20, 80%, 50%, 0.5)".to_string()));
	}

	#[test]
	fn constrained_profile_draws_no_lines() {
		let mut state = field(FieldConfig::compact(ThemeMode::Dark, true), 800.0);
		line_up(&mut state, 5.0);
		let mut surface = RecordingSurface::default();

		render_frame(&mut state, &mut surface, far_pointer());

		assert_eq!(surface.lines(), 0);
		assert_eq!(surface.discs(), 25);
	}

	#[test]
	fn glow_follows_theme() {
		for (theme, expected) in [(ThemeMode::Dark, 15.0), (ThemeMode::Light, 0.0)] {
			let mut state = field(FieldConfig::desktop(theme), 100.0);
			let mut surface = RecordingSurface::default();
			render_frame(&mut state, &mut surface, far_pointer());
			for op in &surface.ops {
				if let DrawOp::Disc { glow, .. } = op {
					assert_eq!(*glow, expected);
				}
			}
		}
	}

	#[test]
	fn frame_advances_particles() {
		let mut state = field(FieldConfig::desktop(ThemeMode::Dark), 100.0);
		line_up(&mut state, 5.0);
		state.particles_mut()[0].vx = 1.0;
		let mut surface = RecordingSurface::default();

		render_frame(&mut state, &mut surface, far_pointer());

		assert_eq!(state.particles()[0].x, 11.0);
		let DrawOp::Disc { center, .. } = &surface.ops[surface.ops.len() - state.len()] else {
			panic!("expected disc");
		};
		assert_eq!(*center, (11.0, 300.0));
	}
}
