use std::sync::Arc;

use super::ellipse::DEFAULT_SCALE;
use super::scene::SceneOptions;
use super::traits::{TraitDef, default_trait, trait_by_key};
use super::types::GraphData;

pub const EDGE_SCALE_RANGE: (f64, f64) = (0.2, 8.0);
pub const POINT_RADIUS_RANGE: (f64, f64) = (2.0, 10.0);

/// Everything the widget draws from besides the data. Updates go through the
/// `with_*` builders, which clamp values into their allowed ranges.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
	pub show_edges: bool,
	pub edge_scale: f64,
	pub point_radius: f64,
	pub show_ellipses: bool,
	pub ellipse_scale: f64,
	pub color_trait: &'static TraitDef,
	pub selected: Option<String>,
}

impl Default for ViewState {
	fn default() -> Self {
		Self {
			show_edges: true,
			edge_scale: 1.0,
			point_radius: 4.0,
			show_ellipses: true,
			ellipse_scale: DEFAULT_SCALE,
			color_trait: default_trait(),
			selected: None,
		}
	}
}

fn clamp_or(value: f64, (lo, hi): (f64, f64), fallback: f64) -> f64 {
	if value.is_nan() { fallback } else { value.clamp(lo, hi) }
}

impl ViewState {
	pub fn with_show_edges(self, show_edges: bool) -> Self {
		Self { show_edges, ..self }
	}

	pub fn with_edge_scale(self, edge_scale: f64) -> Self {
		Self {
			edge_scale: clamp_or(edge_scale, EDGE_SCALE_RANGE, self.edge_scale),
			..self
		}
	}

	pub fn with_point_radius(self, point_radius: f64) -> Self {
		Self {
			point_radius: clamp_or(point_radius, POINT_RADIUS_RANGE, self.point_radius),
			..self
		}
	}

	pub fn with_show_ellipses(self, show_ellipses: bool) -> Self {
		Self {
			show_ellipses,
			..self
		}
	}

	/// Unknown keys select the first trait.
	pub fn with_color_trait(self, key: &str) -> Self {
		Self {
			color_trait: trait_by_key(key),
			..self
		}
	}

	pub fn with_selected(self, selected: Option<String>) -> Self {
		Self { selected, ..self }
	}

	pub fn scene_options(&self) -> SceneOptions {
		SceneOptions {
			color_trait: self.color_trait.key,
			show_ellipses: self.show_ellipses,
			ellipse_scale: self.ellipse_scale,
		}
	}
}

/// Progress of the one-shot table fetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
	#[default]
	Loading,
	Loaded(Arc<GraphData>),
	Failed(String),
}

impl LoadState {
	pub fn data(&self) -> Option<&GraphData> {
		match self {
			Self::Loaded(data) => Some(data.as_ref()),
			_ => None,
		}
	}

	pub fn status(&self) -> String {
		match self {
			Self::Loading => "Loading data…".to_owned(),
			Self::Loaded(data) => format!("{} profiles, {} links", data.nodes.len(), data.links.len()),
			Self::Failed(reason) => format!("Could not load data: {reason}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn numeric_options_are_clamped() {
		let view = ViewState::default()
			.with_edge_scale(100.0)
			.with_point_radius(0.5);
		assert_eq!(view.edge_scale, 8.0);
		assert_eq!(view.point_radius, 2.0);

		let view = view.with_edge_scale(0.0).with_point_radius(f64::NAN);
		assert_eq!(view.edge_scale, 0.2);
		assert_eq!(view.point_radius, 2.0);
	}

	#[test]
	fn scene_options_follow_view() {
		let view = ViewState::default()
			.with_color_trait("tactile")
			.with_show_ellipses(false)
			.with_selected(Some("a".into()));
		let options = view.scene_options();
		assert_eq!(options.color_trait, "tactile");
		assert!(!options.show_ellipses);
	}

	#[test]
	fn load_state_reports_status() {
		assert_eq!(LoadState::default(), LoadState::Loading);
		let failed = LoadState::Failed("HTTP 404".into());
		assert!(failed.data().is_none());
		assert!(failed.status().contains("HTTP 404"));
		let loaded = LoadState::Loaded(Arc::new(GraphData::default()));
		assert_eq!(loaded.status(), "0 profiles, 0 links");
	}
}
