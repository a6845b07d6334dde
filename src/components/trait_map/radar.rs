//! Trait profile of the selected node, as a series and as a radar drawing.

use std::f64::consts::{FRAC_PI_2, PI};

use super::render::Painter;
use super::traits::{SCORE_MAX, TRAITS};
use super::types::GraphNode;

#[derive(Clone, Debug, PartialEq)]
pub struct RadarPoint {
	pub label: &'static str,
	pub value: f64,
}

/// One point per trait in catalogue order; missing scores and no selection read as 0.
pub fn radar_series(node: Option<&GraphNode>) -> Vec<RadarPoint> {
	TRAITS
		.iter()
		.map(|def| RadarPoint {
			label: def.label,
			value: node.and_then(|n| n.trait_score(def.key)).unwrap_or(0.0),
		})
		.collect()
}

const RINGS: usize = 3;
const LABEL_GAP: f64 = 14.0;

fn vertex(cx: f64, cy: f64, radius: f64, i: usize, n: usize) -> (f64, f64) {
	// first axis points straight up, then clockwise
	let angle = -FRAC_PI_2 + 2.0 * PI * i as f64 / n as f64;
	(cx + radius * angle.cos(), cy + radius * angle.sin())
}

pub fn draw_radar(series: &[RadarPoint], width: f64, height: f64, painter: &mut impl Painter) {
	painter.fill_rect(0.0, 0.0, width, height, "#ffffff");
	let n = series.len();
	if n < 3 {
		return;
	}
	let (cx, cy) = (width / 2.0, height / 2.0);
	let radius = (width.min(height) / 2.0 - 2.0 * LABEL_GAP).max(1.0);

	for ring in 1..=RINGS {
		let r = radius * ring as f64 / RINGS as f64;
		let outline: Vec<_> = (0..n).map(|i| vertex(cx, cy, r, i, n)).collect();
		painter.polygon(&outline, "rgba(0, 0, 0, 0)", "rgba(0, 0, 0, 0.12)");
	}
	for (i, point) in series.iter().enumerate() {
		let (x, y) = vertex(cx, cy, radius, i, n);
		painter.line(cx, cy, x, y, "rgba(0, 0, 0, 0.12)", 1.0);
		let (lx, ly) = vertex(cx, cy, radius + LABEL_GAP, i, n);
		painter.text(lx, ly + 4.0, point.label, "#374151");
	}

	let values: Vec<_> = series
		.iter()
		.enumerate()
		.map(|(i, p)| vertex(cx, cy, radius * (p.value / SCORE_MAX).clamp(0.0, 1.0), i, n))
		.collect();
	painter.polygon(&values, "rgba(31, 119, 180, 0.3)", "rgba(31, 119, 180, 0.9)");
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::trait_map::render::recording::{Op, Recorder};

	#[test]
	fn series_follows_catalogue_order() {
		let node = GraphNode::new("a", 0.0, 0.0)
			.with_trait("visual", 8.0)
			.with_trait("spatial", f64::NAN)
			.with_trait("tactile", 2.5);
		let series = radar_series(Some(&node));
		assert_eq!(series.len(), TRAITS.len());
		let labels: Vec<_> = series.iter().map(|p| p.label).collect();
		let expected: Vec<_> = TRAITS.iter().map(|t| t.label).collect();
		assert_eq!(labels, expected);
		assert_eq!(series[0].value, 8.0);
		assert_eq!(series[3].value, 2.5);
		assert_eq!(series[7].value, 0.0);
	}

	#[test]
	fn no_selection_reads_as_zero() {
		assert!(radar_series(None).iter().all(|p| p.value == 0.0));
	}

	#[test]
	fn full_score_reaches_outer_ring() {
		let series: Vec<_> = TRAITS
			.iter()
			.map(|t| RadarPoint { label: t.label, value: SCORE_MAX })
			.collect();
		let mut rec = Recorder::default();
		draw_radar(&series, 300.0, 300.0, &mut rec);
		let polygons: Vec<_> = rec
			.ops
			.iter()
			.filter_map(|op| match op {
				Op::Polygon(points) => Some(points.clone()),
				_ => None,
			})
			.collect();
		assert_eq!(polygons.len(), RINGS + 1);
		assert_eq!(polygons[RINGS - 1], polygons[RINGS]);
		let texts = rec.ops.iter().filter(|op| matches!(op, Op::Text(_))).count();
		assert_eq!(texts, TRAITS.len());
	}
}
