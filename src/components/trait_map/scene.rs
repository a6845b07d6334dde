//! Per-frame drawable state derived from the loaded tables and view options.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::colormap::{PALETTE, Rgb, trait_color};
use super::ellipse::{DEFAULT_SCALE, Ellipse, fit_ellipse};
use super::scale::Extent;
use super::types::{GraphData, GraphNode};

/// Clusters need more than this many points to get an ellipse.
const MIN_CLUSTER_POINTS: usize = 2;

/// The subset of the view state that changes the scene itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneOptions {
	pub color_trait: &'static str,
	pub show_ellipses: bool,
	pub ellipse_scale: f64,
}

impl Default for SceneOptions {
	fn default() -> Self {
		Self {
			color_trait: super::traits::default_trait().key,
			show_ellipses: true,
			ellipse_scale: DEFAULT_SCALE,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub weight: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClusterEllipse {
	pub cluster: String,
	pub color: Rgb,
	pub ellipse: Ellipse,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScenePoint {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub color: Rgb,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub extent: Extent,
	pub segments: Vec<EdgeSegment>,
	pub ellipses: Vec<ClusterEllipse>,
	pub cluster_colors: BTreeMap<String, Rgb>,
	pub points: Vec<ScenePoint>,
}

impl Scene {
	pub fn assemble(data: &GraphData, options: &SceneOptions) -> Self {
		let extent = Extent::from_points(data.nodes.iter().map(|n| (n.x, n.y)));
		let cluster_colors = cluster_colors(data.nodes.iter().filter_map(GraphNode::cluster_id));
		let ellipses = if options.show_ellipses {
			cluster_ellipses(&data.nodes, &cluster_colors, options.ellipse_scale)
		} else {
			Vec::new()
		};
		let points = data
			.nodes
			.iter()
			.filter(|n| n.has_position())
			.map(|n| ScenePoint {
				id: n.id.clone(),
				x: n.x,
				y: n.y,
				color: trait_color(n.trait_score(options.color_trait)),
			})
			.collect();

		Self {
			extent,
			segments: edge_segments(data),
			ellipses,
			cluster_colors,
			points,
		}
	}
}

/// Segments for links whose endpoints both exist and have finite positions.
pub fn edge_segments(data: &GraphData) -> Vec<EdgeSegment> {
	let by_id: HashMap<&str, &GraphNode> = data
		.nodes
		.iter()
		.filter(|n| n.has_position())
		.map(|n| (n.id.as_str(), n))
		.collect();

	data.links
		.iter()
		.filter_map(|link| {
			let (a, b) = (by_id.get(link.source.as_str())?, by_id.get(link.target.as_str())?);
			Some(EdgeSegment {
				x1: a.x,
				y1: a.y,
				x2: b.x,
				y2: b.y,
				weight: link.weight,
			})
		})
		.collect()
}

/// Numeric ids sort numerically, everything else lexically.
fn compare_cluster_ids(a: &str, b: &str) -> Ordering {
	match (a.parse::<f64>(), b.parse::<f64>()) {
		(Ok(x), Ok(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
		(Ok(_), Err(_)) => Ordering::Less,
		(Err(_), Ok(_)) => Ordering::Greater,
		(Err(_), Err(_)) => a.cmp(b),
	}
}

/// Assigns palette colours by sorted id, so the mapping only depends on the set of ids.
pub fn cluster_colors<'a>(ids: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, Rgb> {
	let mut ids: Vec<&str> = ids.into_iter().collect();
	ids.sort_by(|a, b| compare_cluster_ids(a, b));
	ids.dedup();
	ids.into_iter()
		.enumerate()
		.map(|(i, id)| (id.to_owned(), PALETTE[i % PALETTE.len()]))
		.collect()
}

fn cluster_ellipses(
	nodes: &[GraphNode],
	colors: &BTreeMap<String, Rgb>,
	scale: f64,
) -> Vec<ClusterEllipse> {
	let mut members: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
	for node in nodes.iter().filter(|n| n.has_position()) {
		if let Some(id) = node.cluster_id() {
			members.entry(id).or_default().push((node.x, node.y));
		}
	}

	let mut ellipses: Vec<ClusterEllipse> = members
		.into_iter()
		.filter(|(_, pts)| pts.len() > MIN_CLUSTER_POINTS)
		.filter_map(|(id, pts)| {
			Some(ClusterEllipse {
				cluster: id.to_owned(),
				color: colors.get(id).copied().unwrap_or(PALETTE[0]),
				ellipse: fit_ellipse(&pts, scale)?,
			})
		})
		.collect();
	ellipses.sort_by(|a, b| compare_cluster_ids(&a.cluster, &b.cluster));
	ellipses
}
