//! Scalar-to-colour mapping for trait scores, plus the categorical cluster palette.

use std::fmt;

use super::traits::{SCORE_MAX, SCORE_MIN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	/// CSS `rgba(...)` with the given opacity.
	pub fn with_alpha(self, alpha: f64) -> String {
		format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
	}
}

/// Viridis-like ramp, ordered by position over [0, 1].
pub const STOPS: &[(f64, Rgb)] = &[
	(0.0, Rgb(68, 1, 84)),
	(0.25, Rgb(59, 82, 139)),
	(0.5, Rgb(33, 145, 140)),
	(0.75, Rgb(94, 201, 98)),
	(1.0, Rgb(253, 231, 37)),
];

/// Returned for missing or NaN scores.
pub const MISSING: Rgb = Rgb(160, 160, 160);

pub const PALETTE: &[Rgb] = &[
	Rgb(0x1f, 0x77, 0xb4),
	Rgb(0xff, 0x7f, 0x0e),
	Rgb(0x2c, 0xa0, 0x2c),
	Rgb(0xd6, 0x27, 0x28),
	Rgb(0x94, 0x67, 0xbd),
	Rgb(0x8c, 0x56, 0x4b),
	Rgb(0xe3, 0x77, 0xc2),
	Rgb(0x7f, 0x7f, 0x7f),
	Rgb(0xbc, 0xbd, 0x22),
	Rgb(0x17, 0xbe, 0xcf),
];

fn lerp(a: u8, b: u8, f: f64) -> u8 {
	(a as f64 + (b as f64 - a as f64) * f).round() as u8
}

pub fn color_for(t: f64) -> Rgb {
	// NaN clamps to NaN; treat it as the low end.
	let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
	let Some(&(_, first)) = STOPS.first() else {
		return MISSING;
	};
	for pair in STOPS.windows(2) {
		let ((p0, c0), (p1, c1)) = (pair[0], pair[1]);
		if t <= p1 {
			let span = p1 - p0;
			let f = if span > 0.0 { (t - p0) / span } else { 0.0 };
			return Rgb(lerp(c0.0, c1.0, f), lerp(c0.1, c1.1, f), lerp(c0.2, c1.2, f));
		}
	}
	STOPS.last().map_or(first, |&(_, c)| c)
}

/// Colour for a raw score in `[min, max]`.
pub fn trait_color_in(value: Option<f64>, min: f64, max: f64) -> Rgb {
	match value {
		Some(v) if !v.is_nan() => {
			let span = if max > min { max - min } else { 1.0 };
			color_for(((v - min) / span).clamp(0.0, 1.0))
		}
		_ => MISSING,
	}
}

/// Colour for a 1–9 trait score.
pub fn trait_color(value: Option<f64>) -> Rgb {
	trait_color_in(value, SCORE_MIN, SCORE_MAX)
}
