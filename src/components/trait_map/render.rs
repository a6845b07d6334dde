use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{MARGIN, ScreenScale};
use super::scene::Scene;
use super::state::ViewState;

const BACKGROUND: &str = "#fafafa";
const GRID: &str = "rgba(0, 0, 0, 0.08)";
const EDGE: &str = "rgba(120, 120, 120, 0.7)";
const HIGHLIGHT: &str = "#111827";
const GRID_LINES: usize = 4;
const MIN_EDGE_WIDTH: f64 = 0.6;

/// The drawing operations the widget needs. Coordinates are CSS pixels.
pub trait Painter {
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
	fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64);
	#[allow(clippy::too_many_arguments)]
	fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64, fill: &str, stroke: &str);
	fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str);
	fn ring(&mut self, cx: f64, cy: f64, r: f64, color: &str, width: f64);
	fn polygon(&mut self, points: &[(f64, f64)], fill: &str, stroke: &str);
	fn text(&mut self, x: f64, y: f64, text: &str, color: &str);
}

impl Painter for CanvasRenderingContext2d {
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
		self.set_fill_style_str(color);
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.begin_path();
		self.move_to(x1, y1);
		self.line_to(x2, y2);
		self.stroke();
	}

	fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64, fill: &str, stroke: &str) {
		self.begin_path();
		let _ = CanvasRenderingContext2d::ellipse(self, cx, cy, rx, ry, rotation, 0.0, 2.0 * PI);
		self.set_fill_style_str(fill);
		self.fill();
		self.set_stroke_style_str(stroke);
		self.set_line_width(1.0);
		self.stroke();
	}

	fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
		self.begin_path();
		let _ = self.arc(cx, cy, r, 0.0, 2.0 * PI);
		self.set_fill_style_str(fill);
		self.fill();
	}

	fn ring(&mut self, cx: f64, cy: f64, r: f64, color: &str, width: f64) {
		self.begin_path();
		let _ = self.arc(cx, cy, r, 0.0, 2.0 * PI);
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.stroke();
	}

	fn polygon(&mut self, points: &[(f64, f64)], fill: &str, stroke: &str) {
		let Some((&(x0, y0), rest)) = points.split_first() else {
			return;
		};
		self.begin_path();
		self.move_to(x0, y0);
		for &(x, y) in rest {
			self.line_to(x, y);
		}
		self.close_path();
		self.set_fill_style_str(fill);
		self.fill();
		self.set_stroke_style_str(stroke);
		self.set_line_width(1.5);
		self.stroke();
	}

	fn text(&mut self, x: f64, y: f64, text: &str, color: &str) {
		self.set_fill_style_str(color);
		self.set_font("11px sans-serif");
		self.set_text_align("center");
		let _ = self.fill_text(text, x, y);
	}
}

/// Scales the backing store for `dpr` so the painter can keep working in CSS pixels.
pub fn apply_pixel_ratio(ctx: &CanvasRenderingContext2d, dpr: f64) {
	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
}

pub fn render(scene: &Scene, view: &ViewState, scale: &ScreenScale, painter: &mut impl Painter) {
	painter.fill_rect(0.0, 0.0, scale.width, scale.height, BACKGROUND);
	draw_grid(scale, painter);
	if view.show_ellipses {
		draw_ellipses(scene, scale, painter);
	}
	if view.show_edges {
		draw_edges(scene, view, scale, painter);
	}
	draw_nodes(scene, view, scale, painter);
	draw_selection(scene, view, scale, painter);
}

fn draw_grid(scale: &ScreenScale, painter: &mut impl Painter) {
	let (left, top) = (MARGIN, MARGIN);
	let (right, bottom) = (scale.width - MARGIN, scale.height - MARGIN);
	let steps = (GRID_LINES + 1) as f64;
	for i in 1..=GRID_LINES {
		let f = i as f64 / steps;
		let x = left + scale.inner_width() * f;
		let y = top + scale.inner_height() * f;
		painter.line(x, top, x, bottom, GRID, 1.0);
		painter.line(left, y, right, y, GRID, 1.0);
	}
}

fn draw_ellipses(scene: &Scene, scale: &ScreenScale, painter: &mut impl Painter) {
	let (ppu_x, ppu_y) = scale.pixels_per_unit();
	for cluster in &scene.ellipses {
		let e = cluster.ellipse;
		let (cx, cy) = scale.to_screen(e.cx, e.cy);
		// Each axis is scaled independently; screen Y is flipped, so the rotation is too.
		painter.ellipse(
			cx,
			cy,
			e.width * ppu_x,
			e.height * ppu_y,
			-e.angle,
			&cluster.color.with_alpha(0.25),
			&cluster.color.with_alpha(0.35),
		);
	}
}

fn draw_edges(scene: &Scene, view: &ViewState, scale: &ScreenScale, painter: &mut impl Painter) {
	for seg in &scene.segments {
		let (x1, y1) = scale.to_screen(seg.x1, seg.y1);
		let (x2, y2) = scale.to_screen(seg.x2, seg.y2);
		let width = (seg.weight * view.edge_scale).max(MIN_EDGE_WIDTH);
		painter.line(x1, y1, x2, y2, EDGE, width);
	}
}

fn draw_nodes(scene: &Scene, view: &ViewState, scale: &ScreenScale, painter: &mut impl Painter) {
	for point in &scene.points {
		let (x, y) = scale.to_screen(point.x, point.y);
		painter.circle(x, y, view.point_radius, &point.color.to_string());
	}
}

fn draw_selection(scene: &Scene, view: &ViewState, scale: &ScreenScale, painter: &mut impl Painter) {
	let Some(selected) = view.selected.as_deref() else {
		return;
	};
	// scene points only hold finite positions
	if let Some(point) = scene.points.iter().find(|p| p.id == selected) {
		let (x, y) = scale.to_screen(point.x, point.y);
		painter.ring(x, y, view.point_radius + 4.0, HIGHLIGHT, 2.0);
	}
}

#[cfg(test)]
pub(crate) mod recording {
	use super::Painter;

	/// Painter that records calls instead of drawing.
	#[derive(Debug, Default)]
	pub struct Recorder {
		pub ops: Vec<Op>,
	}

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Rect(String),
		Line { x1: f64, y1: f64, x2: f64, y2: f64, color: String, width: f64 },
		Ellipse { cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64, fill: String },
		Circle { cx: f64, cy: f64, r: f64, fill: String },
		Ring { cx: f64, cy: f64, r: f64 },
		Polygon(Vec<(f64, f64)>),
		Text(String),
	}

	impl Painter for Recorder {
		fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, color: &str) {
			self.ops.push(Op::Rect(color.to_owned()));
		}

		fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
			self.ops.push(Op::Line { x1, y1, x2, y2, color: color.to_owned(), width });
		}

		fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64, fill: &str, _: &str) {
			self.ops.push(Op::Ellipse { cx, cy, rx, ry, rotation, fill: fill.to_owned() });
		}

		fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
			self.ops.push(Op::Circle { cx, cy, r, fill: fill.to_owned() });
		}

		fn ring(&mut self, cx: f64, cy: f64, r: f64, _: &str, _: f64) {
			self.ops.push(Op::Ring { cx, cy, r });
		}

		fn polygon(&mut self, points: &[(f64, f64)], _: &str, _: &str) {
			self.ops.push(Op::Polygon(points.to_vec()));
		}

		fn text(&mut self, _: f64, _: f64, text: &str, _: &str) {
			self.ops.push(Op::Text(text.to_owned()));
		}
	}
}
