//! Plain data records produced by the schema mapper and consumed by the scene.

use std::collections::BTreeMap;

/// One profile projected onto the map.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub x: f64,
	pub y: f64,
	/// Raw cluster label as found in the table. See [`GraphNode::cluster_id`].
	pub cluster: Option<String>,
	/// Trait key to raw score. Values may be NaN when the cell did not parse.
	pub traits: BTreeMap<String, f64>,
}

impl GraphNode {
	pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			x,
			y,
			cluster: None,
			traits: BTreeMap::new(),
		}
	}

	pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
		self.cluster = Some(cluster.into());
		self
	}

	pub fn with_trait(mut self, key: impl Into<String>, value: f64) -> Self {
		self.traits.insert(key.into(), value);
		self
	}

	pub fn has_position(&self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}

	/// Finite score for `key`, or `None` when missing or NaN.
	pub fn trait_score(&self, key: &str) -> Option<f64> {
		self.traits.get(key).copied().filter(|v| v.is_finite())
	}

	/// Normalized cluster id; null-like labels ("", "nan", "none", "null") mean no cluster.
	pub fn cluster_id(&self) -> Option<&str> {
		let label = self.cluster.as_deref()?.trim();
		let null_like = label.is_empty()
			|| ["nan", "none", "null"]
				.iter()
				.any(|n| label.eq_ignore_ascii_case(n));
		(!null_like).then_some(label)
	}
}

/// Weighted connection between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub weight: f64,
}

impl GraphLink {
	pub const DEFAULT_WEIGHT: f64 = 1.0;

	pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			weight,
		}
	}
}

/// Both tables as loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}
}
