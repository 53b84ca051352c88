//! Tunable constants for the particle field.
//!
//! The desktop and compact layouts run the same engine; they differ only in
//! the [`FieldConfig`] preset they start from.

use super::theme::ThemeMode;

/// Viewport width below which [`Profile::Auto`] picks the constrained preset.
///
/// Touch capability alone does not count: touchscreen laptops still move a
/// mouse and get the full desktop field.
pub const CONSTRAINED_MAX_WIDTH: f64 = 768.0;

/// How many particles a field spawns for a given viewport width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CountPolicy {
	/// `min(floor(width / divisor), max)`.
	ViewportScaled {
		/// Pixels of width per particle.
		divisor: f64,
		/// Upper bound on the count.
		max: usize,
	},
	/// Same count regardless of viewport.
	Fixed(usize),
}

impl CountPolicy {
	/// Particle count for a viewport `viewport_width` px wide.
	pub fn count(&self, viewport_width: f64) -> usize {
		match *self {
			CountPolicy::ViewportScaled { divisor, max } => {
				if viewport_width.is_nan() || viewport_width <= 0.0 || divisor <= 0.0 {
					return 0;
				}
				((viewport_width / divisor).floor() as usize).min(max)
			}
			CountPolicy::Fixed(n) => n,
		}
	}
}

/// Pointer attraction falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForceModel {
	/// `strength * (radius - d) / radius`: peaks at `strength` under the pointer.
	Normalized {
		/// Impulse at the pointer itself.
		strength: f64,
	},
	/// `scale * (radius - d)`: grows with the radius itself.
	Linear {
		/// Impulse per pixel of remaining radius.
		scale: f64,
	},
}

impl ForceModel {
	/// Unitless proximity force in [0, 1] used for size pulsing.
	///
	/// Zero outside the radius and at zero distance, where no direction exists.
	pub fn proximity(distance: f64, radius: f64) -> f64 {
		if distance.is_nan() || distance <= 0.0 || radius.is_nan() || distance >= radius {
			return 0.0;
		}
		(radius - distance) / radius
	}

	/// Velocity increment toward the pointer for a particle `distance` away.
	pub fn impulse(&self, distance: f64, radius: f64) -> f64 {
		let proximity = Self::proximity(distance, radius);
		if proximity == 0.0 {
			return 0.0;
		}
		match *self {
			ForceModel::Normalized { strength } => proximity * strength,
			ForceModel::Linear { scale } => (radius - distance) * scale,
		}
	}
}

/// Which pointer stream steers the attraction target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerProfile {
	/// Follow `mousemove`.
	#[default]
	Mouse,
	/// Follow `touchmove`.
	Touch,
}

/// Connection line rendering between nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionStyle {
	/// Whether lines are drawn at all.
	pub enabled: bool,
	/// Pairs closer than this (px) are joined.
	pub threshold: f64,
	/// Stroke width (px).
	pub line_width: f64,
}

impl ConnectionStyle {
	/// No connection lines.
	pub const fn disabled() -> Self {
		Self {
			enabled: false,
			threshold: 0.0,
			line_width: 0.0,
		}
	}
}

/// Full configuration for one field lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
	/// Palette for particles and lines.
	pub theme: ThemeMode,
	/// Pointer stream that sets the attraction target.
	pub pointer: PointerProfile,
	/// Particle count rule, applied once at attach.
	pub count: CountPolicy,
	/// Pointer attraction reaches this far (px).
	pub interaction_radius: f64,
	/// Attraction falloff inside the interaction radius.
	pub force: ForceModel,
	/// Per-tick velocity multiplier, < 1.
	pub damping: f64,
	/// Velocity multiplier applied on boundary reflection.
	pub restitution: f64,
	/// Drawn size grows by `1 + proximity * gain`; `None` disables pulsing.
	pub pulse_gain: Option<f64>,
	/// Lines between nearby particles.
	pub connections: ConnectionStyle,
	/// Shadow blur behind particles on the dark theme, 0 for none.
	pub glow_blur: f64,
	/// Base radius range `[min, max)`.
	pub size_range: (f64, f64),
	/// Initial speed component range `[-max, max)`.
	pub max_initial_speed: f64,
}

impl FieldConfig {
	/// Full-featured preset: width-scaled count, glow, pulsing and connections.
	pub fn desktop(theme: ThemeMode) -> Self {
		Self {
			theme,
			pointer: PointerProfile::Mouse,
			count: CountPolicy::ViewportScaled {
				divisor: 10.0,
				max: 100,
			},
			interaction_radius: 150.0,
			force: ForceModel::Normalized { strength: 0.2 },
			damping: 0.98,
			restitution: 0.8,
			pulse_gain: Some(0.5),
			connections: ConnectionStyle {
				enabled: true,
				threshold: 120.0,
				line_width: 0.8,
			},
			glow_blur: 15.0,
			size_range: (1.0, 4.0),
			max_initial_speed: 0.5,
		}
	}

	/// Lean preset for small or touch screens.
	///
	/// `constrained` drops the count to 25, shrinks the interaction radius,
	/// switches to touch input and disables connection lines entirely.
	pub fn compact(theme: ThemeMode, constrained: bool) -> Self {
		Self {
			theme,
			pointer: if constrained {
				PointerProfile::Touch
			} else {
				PointerProfile::Mouse
			},
			count: CountPolicy::Fixed(if constrained { 25 } else { 50 }),
			interaction_radius: if constrained { 80.0 } else { 120.0 },
			force: ForceModel::Linear { scale: 0.002 },
			damping: 0.95,
			restitution: 0.8,
			pulse_gain: None,
			connections: if constrained {
				ConnectionStyle::disabled()
			} else {
				ConnectionStyle {
					enabled: true,
					threshold: 100.0,
					line_width: 0.5,
				}
			},
			glow_blur: 0.0,
			size_range: (1.0, 4.0),
			max_initial_speed: 0.5,
		}
	}

	/// Glow to apply to particle fills under the current theme.
	pub fn effective_glow(&self) -> f64 {
		if self.theme.is_dark() { self.glow_blur } else { 0.0 }
	}
}

/// Preset selection for the background component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
	/// Always [`FieldConfig::desktop`].
	Desktop,
	/// Always [`FieldConfig::compact`].
	Compact {
		/// Passed through to [`FieldConfig::compact`].
		constrained: bool,
	},
	/// Decide from the viewport width at attach time.
	#[default]
	Auto,
}

impl Profile {
	/// Picks the preset for `theme` on a viewport `viewport_width` px wide.
	pub fn resolve(self, theme: ThemeMode, viewport_width: f64) -> FieldConfig {
		match self {
			Profile::Desktop => FieldConfig::desktop(theme),
			Profile::Compact { constrained } => FieldConfig::compact(theme, constrained),
			Profile::Auto => {
				if viewport_width < CONSTRAINED_MAX_WIDTH {
					FieldConfig::compact(theme, true)
				} else {
					FieldConfig::desktop(theme)
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn desktop_count_scales_with_width() {
		let policy = FieldConfig::desktop(ThemeMode::Dark).count;
		assert_eq!(policy.count(800.0), 80);
		assert_eq!(policy.count(805.0), 80);
		assert_eq!(policy.count(1920.0), 100);
		assert_eq!(policy.count(9.0), 0);
	}

	#[test]
	fn count_policy_rejects_degenerate_width() {
		let policy = CountPolicy::ViewportScaled {
			divisor: 10.0,
			max: 100,
		};
		assert_eq!(policy.count(0.0), 0);
		assert_eq!(policy.count(-50.0), 0);
		assert_eq!(policy.count(f64::NAN), 0);
	}

	#[test]
	fn compact_count_is_fixed() {
		assert_eq!(FieldConfig::compact(ThemeMode::Dark, true).count.count(3000.0), 25);
		assert_eq!(FieldConfig::compact(ThemeMode::Dark, false).count.count(10.0), 50);
	}

	#[test]
	fn impulse_falls_off_with_distance() {
		for force in [
			ForceModel::Normalized { strength: 0.2 },
			ForceModel::Linear { scale: 0.002 },
		] {
			let near = force.impulse(100.0, 150.0);
			let far = force.impulse(140.0, 150.0);
			assert!(near > far, "{force:?}: {near} <= {far}");
			assert!(far > 0.0);
		}
	}

	#[test]
	fn impulse_is_zero_outside_radius_and_at_origin() {
		let force = ForceModel::Normalized { strength: 0.2 };
		assert_eq!(force.impulse(150.0, 150.0), 0.0);
		assert_eq!(force.impulse(400.0, 150.0), 0.0);
		assert_eq!(force.impulse(0.0, 150.0), 0.0);
		assert_eq!(force.impulse(f64::NAN, 150.0), 0.0);
		assert_eq!(force.impulse(10.0, 0.0), 0.0);
	}

	#[test]
	fn normalized_impulse_matches_formula() {
		let force = ForceModel::Normalized { strength: 0.2 };
		let expected = (150.0 - 30.0) / 150.0 * 0.2;
		assert!((force.impulse(30.0, 150.0) - expected).abs() < 1e-12);
	}

	#[test]
	fn constrained_compact_disables_connections_and_uses_touch() {
		let config = FieldConfig::compact(ThemeMode::Light, true);
		assert!(!config.connections.enabled);
		assert_eq!(config.pointer, PointerProfile::Touch);
		assert_eq!(config.damping, 0.95);
		assert!(config.pulse_gain.is_none());
	}

	#[test]
	fn glow_only_applies_on_dark_theme() {
		assert_eq!(FieldConfig::desktop(ThemeMode::Dark).effective_glow(), 15.0);
		assert_eq!(FieldConfig::desktop(ThemeMode::Light).effective_glow(), 0.0);
	}

	#[test]
	fn auto_profile_picks_by_viewport_width() {
		let wide = Profile::Auto.resolve(ThemeMode::Dark, 1280.0);
		assert_eq!(wide, FieldConfig::desktop(ThemeMode::Dark));

		let narrow = Profile::Auto.resolve(ThemeMode::Dark, 400.0);
		assert_eq!(narrow, FieldConfig::compact(ThemeMode::Dark, true));

		let edge = Profile::Auto.resolve(ThemeMode::Light, CONSTRAINED_MAX_WIDTH);
		assert_eq!(edge, FieldConfig::desktop(ThemeMode::Light));
	}

	#[test]
	fn fixed_profiles_ignore_width() {
		assert_eq!(
			Profile::Desktop.resolve(ThemeMode::Dark, 320.0),
			FieldConfig::desktop(ThemeMode::Dark)
		);
		assert_eq!(
			Profile::Compact { constrained: false }.resolve(ThemeMode::Dark, 1920.0),
			FieldConfig::compact(ThemeMode::Dark, false)
		);
	}
}
