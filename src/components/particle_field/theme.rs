//! Theme-dependent coloring for the particle field.
//!
//! Particles get a random hue from a band chosen by the theme: cool blues on
//! dark backgrounds, warm oranges on light ones. Connection lines use a single
//! fixed hue per theme with a distance-driven alpha.

use rand::Rng;

/// HSLA color value, rendered as a CSS `hsla()` string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
	/// Hue in degrees.
	pub h: f64,
	/// Saturation in percent.
	pub s: f64,
	/// Lightness in percent.
	pub l: f64,
	/// Alpha in [0, 1].
	pub a: f64,
}

impl Hsla {
	/// Color from hue degrees, saturation and lightness percentages, and alpha.
	pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
		Self { h, s, l, a }
	}

	/// Same color with alpha clamped into [0, 1].
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// CSS `hsla()` form for canvas fill and stroke styles.
	pub fn to_css(self) -> String {
		format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
	}
}

/// Light or dark page theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	/// Cool hues and a glow halo.
	#[default]
	Dark,
	/// Warm hues, no glow.
	Light,
}

/// Hue band and fixed channels used to color new particles.
#[derive(Clone, Copy, Debug)]
struct ParticleBand {
	hue_min: f64,
	hue_span: f64,
	saturation: f64,
	lightness: f64,
	alpha_min: f64,
	alpha_span: f64,
}

const DARK_BAND: ParticleBand = ParticleBand {
	hue_min: 200.0,
	hue_span: 60.0,
	saturation: 70.0,
	lightness: 70.0,
	alpha_min: 0.1,
	alpha_span: 0.3,
};

const LIGHT_BAND: ParticleBand = ParticleBand {
	hue_min: 20.0,
	hue_span: 60.0,
	saturation: 70.0,
	lightness: 50.0,
	alpha_min: 0.1,
	alpha_span: 0.2,
};

impl ThemeMode {
	/// Maps the page's dark-mode flag.
	pub fn from_dark(dark: bool) -> Self {
		if dark { Self::Dark } else { Self::Light }
	}

	/// Whether this is [`ThemeMode::Dark`].
	pub fn is_dark(self) -> bool {
		matches!(self, Self::Dark)
	}

	fn band(self) -> ParticleBand {
		match self {
			Self::Dark => DARK_BAND,
			Self::Light => LIGHT_BAND,
		}
	}

	/// Picks a particle color from this theme's hue band.
	pub fn particle_color<R: Rng + ?Sized>(self, rng: &mut R) -> Hsla {
		let band = self.band();
		Hsla::new(
			band.hue_min + rng.gen_range(0.0..band.hue_span),
			band.saturation,
			band.lightness,
			band.alpha_min + rng.gen_range(0.0..band.alpha_span),
		)
	}

	/// Stroke color for a connection line at the given alpha.
	pub fn connection_color(self, alpha: f64) -> Hsla {
		match self {
			Self::Dark => Hsla::new(210.0, 80.0, 70.0, 1.0),
			Self::Light => Hsla::new(20.0, 80.0, 50.0, 1.0),
		}
		.with_alpha(alpha)
	}
}
