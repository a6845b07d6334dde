use super::scale::ScreenScale;
use super::types::GraphNode;

/// Id of the node painted closest to `(sx, sy)`. Ties go to the earlier node.
pub fn pick<'a>(nodes: &'a [GraphNode], scale: &ScreenScale, sx: f64, sy: f64) -> Option<&'a str> {
	let mut best: Option<(&str, f64)> = None;
	for node in nodes.iter().filter(|n| n.has_position()) {
		let (px, py) = scale.to_screen(node.x, node.y);
		let d2 = (px - sx).powi(2) + (py - sy).powi(2);
		if best.is_none_or(|(_, b)| d2 < b) {
			best = Some((&node.id, d2));
		}
	}
	best.map(|(id, _)| id)
}
