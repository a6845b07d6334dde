//! Data-space extent and its mapping onto the canvas.

/// Inset between the canvas edge and the plotted area, in CSS pixels.
pub const MARGIN: f64 = 10.0;
const PADDING: f64 = 0.08;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
	pub min_x: f64,
	pub max_x: f64,
	pub min_y: f64,
	pub max_y: f64,
}

impl Default for Extent {
	fn default() -> Self {
		Self {
			min_x: -1.0,
			max_x: 1.0,
			min_y: -1.0,
			max_y: 1.0,
		}
	}
}

impl Extent {
	/// Bounding box of the finite points, padded by 8% of the span on each axis.
	pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		for (x, y) in points {
			if !(x.is_finite() && y.is_finite()) {
				continue;
			}
			bounds = Some(match bounds {
				None => (x, x, y, y),
				Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
			});
		}
		let Some((min_x, max_x, min_y, max_y)) = bounds else {
			return Self::default();
		};
		let (min_x, max_x) = pad(min_x, max_x);
		let (min_y, max_y) = pad(min_y, max_y);
		Self {
			min_x,
			max_x,
			min_y,
			max_y,
		}
	}
}

/// Widens `lo..hi` by 8% of its span on both sides. Bounds that would
/// overflow stay unpadded.
fn pad(lo: f64, hi: f64) -> (f64, f64) {
	let margin = (hi - lo) * PADDING;
	let (plo, phi) = (lo - margin, hi + margin);
	if plo.is_finite() && phi.is_finite() { (plo, phi) } else { (lo, hi) }
}

fn non_zero(span: f64) -> f64 {
	if span == 0.0 || !span.is_finite() { 1.0 } else { span }
}

// Spans wider than f64::MAX are handled in halves so finite input stays finite.

/// Position of `v` along `lo..hi` as a fraction; a zero span divides by 1.
fn fraction(v: f64, lo: f64, hi: f64) -> f64 {
	let span = hi - lo;
	if span == 0.0 {
		v - lo
	} else if span.is_finite() {
		(v - lo) / span
	} else {
		(v / 2.0 - lo / 2.0) / (hi / 2.0 - lo / 2.0)
	}
}

fn from_fraction(f: f64, lo: f64, hi: f64) -> f64 {
	let span = hi - lo;
	if span == 0.0 {
		lo + f
	} else if span.is_finite() {
		lo + f * span
	} else {
		let half = hi / 2.0 - lo / 2.0;
		lo + f * half + f * half
	}
}

fn per_unit(pixels: f64, lo: f64, hi: f64) -> f64 {
	let span = hi - lo;
	if span == 0.0 {
		pixels
	} else if span.is_finite() {
		pixels / span
	} else {
		pixels / 2.0 / (hi / 2.0 - lo / 2.0)
	}
}

/// Linear map from an [`Extent`] onto a `width` x `height` canvas with a fixed
/// margin. Y grows upward in data space and downward on screen.
///
/// Drawing and hit-testing both build this from the same extent and CSS size,
/// so a click lands exactly where the node was painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenScale {
	pub extent: Extent,
	pub width: f64,
	pub height: f64,
}

impl ScreenScale {
	pub fn new(extent: Extent, width: f64, height: f64) -> Self {
		Self {
			extent,
			width,
			height,
		}
	}

	pub fn inner_width(&self) -> f64 {
		self.width - 2.0 * MARGIN
	}

	pub fn inner_height(&self) -> f64 {
		self.height - 2.0 * MARGIN
	}

	pub fn to_screen_x(&self, x: f64) -> f64 {
		MARGIN + fraction(x, self.extent.min_x, self.extent.max_x) * self.inner_width()
	}

	pub fn to_screen_y(&self, y: f64) -> f64 {
		self.height - MARGIN - fraction(y, self.extent.min_y, self.extent.max_y) * self.inner_height()
	}

	pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
		(self.to_screen_x(x), self.to_screen_y(y))
	}

	pub fn to_data_x(&self, sx: f64) -> f64 {
		let f = (sx - MARGIN) / non_zero(self.inner_width());
		from_fraction(f, self.extent.min_x, self.extent.max_x)
	}

	pub fn to_data_y(&self, sy: f64) -> f64 {
		let f = (self.height - MARGIN - sy) / non_zero(self.inner_height());
		from_fraction(f, self.extent.min_y, self.extent.max_y)
	}

	pub fn to_data(&self, sx: f64, sy: f64) -> (f64, f64) {
		(self.to_data_x(sx), self.to_data_y(sy))
	}

	/// Screen pixels per data unit on each axis.
	pub fn pixels_per_unit(&self) -> (f64, f64) {
		(
			per_unit(self.inner_width(), self.extent.min_x, self.extent.max_x),
			per_unit(self.inner_height(), self.extent.min_y, self.extent.max_y),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn empty_extent_is_unit_square() {
		assert_eq!(Extent::from_points([]), Extent::default());
		assert_eq!(
			Extent::from_points([(f64::NAN, 1.0), (2.0, f64::INFINITY)]),
			Extent::default()
		);
	}

	#[test]
	fn extent_pads_eight_percent() {
		let e = Extent::from_points([(0.0, 10.0), (100.0, 20.0), (f64::NAN, 500.0)]);
		assert!(close(e.min_x, -8.0) && close(e.max_x, 108.0));
		assert!(close(e.min_y, 9.2) && close(e.max_y, 20.8));
	}

	#[test]
	fn corners_map_to_margin_rectangle() {
		let s = ScreenScale::new(Extent::default(), 220.0, 120.0);
		assert_eq!(s.to_screen(-1.0, -1.0), (MARGIN, 120.0 - MARGIN));
		assert_eq!(s.to_screen(1.0, 1.0), (220.0 - MARGIN, MARGIN));
		assert_eq!(s.to_screen(0.0, 0.0), (110.0, 60.0));
	}

	#[test]
	fn screen_and_data_round_trip() {
		let extent = Extent::from_points([(-3.5, 2.0), (7.25, 40.0), (1.0, -6.0)]);
		let s = ScreenScale::new(extent, 640.0, 480.0);
		for &(x, y) in &[(-3.5, 2.0), (0.0, 0.0), (7.0, 39.0), (1.0, -6.0)] {
			let (sx, sy) = s.to_screen(x, y);
			let (dx, dy) = s.to_data(sx, sy);
			assert!(close(dx, x) && close(dy, y), "({x}, {y}) -> ({dx}, {dy})");
		}
	}

	#[test]
	fn zero_span_axis_stays_finite() {
		let extent = Extent::from_points([(5.0, 1.0), (5.0, 3.0)]);
		assert_eq!(extent.min_x, extent.max_x);
		let s = ScreenScale::new(extent, 300.0, 200.0);
		let (sx, sy) = s.to_screen(5.0, 2.0);
		assert!(sx.is_finite() && sy.is_finite());
		assert_eq!(sx, MARGIN);
		assert!(s.to_data_x(sx).is_finite());
	}

	#[test]
	fn huge_finite_coordinates_map_to_finite_pixels() {
		let extent = Extent::from_points([(-1e308, 0.0), (1e308, 10.0)]);
		assert_eq!((extent.min_x, extent.max_x), (-1e308, 1e308));
		assert!(close(extent.min_y, -0.8) && close(extent.max_y, 10.8));

		let s = ScreenScale::new(extent, 300.0, 200.0);
		let (lx, _) = s.to_screen(-1e308, 0.0);
		let (mx, _) = s.to_screen(0.0, 0.0);
		let (rx, sy) = s.to_screen(1e308, 10.0);
		assert!(close(lx, MARGIN) && close(mx, 150.0) && close(rx, 300.0 - MARGIN));
		assert!(sy.is_finite());
		assert_eq!(s.to_data_x(mx), 0.0);
		let (ppu_x, _) = s.pixels_per_unit();
		assert!(ppu_x.is_finite() && ppu_x > 0.0);
	}

	#[test]
	fn pixels_per_unit_is_per_axis() {
		let s = ScreenScale::new(Extent::default(), 220.0, 120.0);
		assert_eq!(s.pixels_per_unit(), (100.0, 50.0));
	}
}
