//! Confidence ellipse from the covariance of a 2-D point cloud.

/// Added to the covariance diagonal so collinear or identical points stay defined.
const EPSILON: f64 = 1e-9;
const DEGENERATE: f64 = 1e-12;

pub const DEFAULT_SCALE: f64 = 2.0;

/// `width` and `height` are half-axis lengths along the major and minor
/// eigenvectors; `angle` is the major axis direction in data space (radians).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
	pub cx: f64,
	pub cy: f64,
	pub width: f64,
	pub height: f64,
	pub angle: f64,
}

/// Fits an ellipse to `points`. Callers only pass clusters of three or more
/// points; an empty slice yields `None`.
pub fn fit_ellipse(points: &[(f64, f64)], k: f64) -> Option<Ellipse> {
	if points.is_empty() {
		return None;
	}
	let n = points.len() as f64;
	let (sum_x, sum_y) = points
		.iter()
		.fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
	let (cx, cy) = (sum_x / n, sum_y / n);

	let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
	for &(x, y) in points {
		let (dx, dy) = (x - cx, y - cy);
		sxx += dx * dx;
		syy += dy * dy;
		sxy += dx * dy;
	}
	let (sxx, syy, sxy) = (sxx / n + EPSILON, syy / n + EPSILON, sxy / n);

	let trace = sxx + syy;
	let det = sxx * syy - sxy * sxy;
	let disc = (trace * trace / 4.0 - det).max(0.0).sqrt();
	let (major, minor) = (trace / 2.0 + disc, trace / 2.0 - disc);

	let (mut vx, mut vy) = (sxy, major - sxx);
	if vx.abs() + vy.abs() < DEGENERATE {
		(vx, vy) = (major - syy, sxy);
	}
	let norm = vx.hypot(vy);
	let (vx, vy) = if norm < DEGENERATE {
		// isotropic: any direction is an eigenvector
		(1.0, 0.0)
	} else {
		(vx / norm, vy / norm)
	};

	Some(Ellipse {
		cx,
		cy,
		width: 1.5 * k * major.max(0.0).sqrt(),
		height: 2.0 * k * minor.max(0.0).sqrt(),
		angle: vy.atan2(vx),
	})
}

#[cfg(test)]
mod tests {
	use std::f64::consts::{FRAC_PI_4, PI};

	use super::*;

	fn close(a: f64, b: f64, tol: f64) -> bool {
		(a - b).abs() <= tol
	}

	#[test]
	fn circle_gives_fixed_axis_ratio() {
		let r = 3.0;
		let points: Vec<_> = (0..64)
			.map(|i| {
				let t = i as f64 * 2.0 * PI / 64.0;
				(5.0 + r * t.cos(), -2.0 + r * t.sin())
			})
			.collect();
		let e = fit_ellipse(&points, 1.0).unwrap();
		assert!(close(e.cx, 5.0, 1e-9));
		assert!(close(e.cy, -2.0, 1e-9));
		// population variance of a circle is r^2 / 2 on each axis
		let sd = r / 2f64.sqrt();
		assert!(close(e.width, 1.5 * sd, 1e-6), "{}", e.width);
		assert!(close(e.height, 2.0 * sd, 1e-6), "{}", e.height);
		assert!(close(e.width / e.height, 0.75, 1e-6));
	}

	#[test]
	fn scale_multiplies_both_axes() {
		let points = [(0.0, 0.0), (4.0, 1.0), (1.0, 3.0), (5.0, 5.0)];
		let one = fit_ellipse(&points, 1.0).unwrap();
		let two = fit_ellipse(&points, 2.0).unwrap();
		assert!(close(two.width, 2.0 * one.width, 1e-12));
		assert!(close(two.height, 2.0 * one.height, 1e-12));
		assert_eq!(one.angle, two.angle);
	}

	#[test]
	fn identical_points_stay_finite() {
		let points = [(2.0, 2.0); 5];
		let e = fit_ellipse(&points, 2.0).unwrap();
		assert!(e.width.is_finite() && e.height.is_finite() && e.angle.is_finite());
		assert!(e.width < 1e-3 && e.height < 1e-3);
		assert!(e.width > 0.0);
		assert_eq!((e.cx, e.cy), (2.0, 2.0));
	}

	#[test]
	fn diagonal_line_points_along_its_direction() {
		let points: Vec<_> = (0..10).map(|i| (i as f64, i as f64)).collect();
		let e = fit_ellipse(&points, 1.0).unwrap();
		assert!(close(e.angle.rem_euclid(PI), FRAC_PI_4, 1e-6), "{}", e.angle);
		assert!(e.height < 1e-3);
		assert!(e.width > 1.0);
	}

	#[test]
	fn vertical_spread_points_up() {
		let points = [(0.0, -4.0), (0.0, 4.0), (1.0, 0.0), (-1.0, 0.0)];
		let e = fit_ellipse(&points, 1.0).unwrap();
		assert!(close(e.angle, PI / 2.0, 1e-9), "{}", e.angle);
		assert!(close(e.width, 1.5 * 8f64.sqrt(), 1e-6));
		assert!(close(e.height, 2.0 * 0.5f64.sqrt(), 1e-6));
	}

	#[test]
	fn horizontal_spread_uses_alternate_eigenvector() {
		// sxy = 0 and the major eigenvalue equals sxx, so the first candidate vanishes
		let points = [(-4.0, 0.0), (4.0, 0.0), (0.0, 1.0), (0.0, -1.0)];
		let e = fit_ellipse(&points, 1.0).unwrap();
		assert!(close(e.angle, 0.0, 1e-9), "{}", e.angle);
		assert!(close(e.width, 1.5 * 8f64.sqrt(), 1e-6));
	}

	#[test]
	fn empty_input_has_no_ellipse() {
		assert!(fit_ellipse(&[], 1.0).is_none());
	}
}
