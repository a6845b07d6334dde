//! One-shot fetch of the node and edge tables.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{error, info};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::Response;

use super::schema::{self, SchemaError};
use super::state::LoadState;
use super::types::GraphData;

pub const DEFAULT_NODES_URL: &str =
	"https://raw.githubusercontent.com/trait-map/data/main/profiles_umap.csv";
pub const DEFAULT_EDGES_URL: &str =
	"https://raw.githubusercontent.com/trait-map/data/main/similarity_edges.csv";

#[derive(Error, Debug)]
pub enum LoadError {
	#[error("no browser window")]
	NoWindow,

	#[error("request to {url} failed: {reason}")]
	Fetch { url: String, reason: String },

	#[error("{url} answered HTTP {status}")]
	Status { url: String, status: u16 },

	#[error(transparent)]
	Schema(#[from] SchemaError),
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Where the two tables live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSource {
	pub nodes_url: String,
	pub edges_url: String,
}

impl Default for DataSource {
	fn default() -> Self {
		Self {
			nodes_url: DEFAULT_NODES_URL.to_owned(),
			edges_url: DEFAULT_EDGES_URL.to_owned(),
		}
	}
}

impl DataSource {
	/// Default source with optional per-table overrides, e.g. from `?nodes=..&edges=..`.
	pub fn with_overrides(nodes_url: Option<String>, edges_url: Option<String>) -> Self {
		let defaults = Self::default();
		let pick = |url: Option<String>, fallback: String| {
			url.map(|u| u.trim().to_owned())
				.filter(|u| !u.is_empty())
				.unwrap_or(fallback)
		};
		Self {
			nodes_url: pick(nodes_url, defaults.nodes_url),
			edges_url: pick(edges_url, defaults.edges_url),
		}
	}
}

fn js_reason(value: JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

async fn fetch_text(url: &str) -> Result<String> {
	let fetch_err = |value: JsValue| LoadError::Fetch {
		url: url.to_owned(),
		reason: js_reason(value),
	};
	let window = web_sys::window().ok_or(LoadError::NoWindow)?;
	let promise: js_sys::Promise = window.fetch_with_str(url);
	let response: Response = JsFuture::from(promise).await.map_err(fetch_err)?.dyn_into().map_err(fetch_err)?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_owned(),
			status: response.status(),
		});
	}
	let body = JsFuture::from(response.text().map_err(fetch_err)?)
		.await
		.map_err(fetch_err)?;
	Ok(body.as_string().unwrap_or_default())
}

pub async fn load_graph(source: &DataSource) -> Result<GraphData> {
	let nodes_csv = fetch_text(&source.nodes_url).await?;
	let links_csv = fetch_text(&source.edges_url).await?;
	Ok(schema::parse_graph(&nodes_csv, &links_csv)?)
}

/// Starts the fetch and writes the outcome into `state`. A result that
/// arrives after the owning component is cleaned up is dropped.
pub fn spawn_load(source: DataSource, state: RwSignal<LoadState>) {
	let cancelled = cancel_on_cleanup();
	state.set(LoadState::Loading);
	spawn_local(async move {
		let outcome = match load_graph(&source).await {
			Ok(data) => {
				info!(
					"Loaded {} nodes and {} links",
					data.nodes.len(),
					data.links.len()
				);
				LoadState::Loaded(Arc::new(data))
			}
			Err(err) => {
				error!("Loading tables failed: {err}");
				LoadState::Failed(err.to_string())
			}
		};
		settle(&cancelled, state, outcome);
	});
}

/// Flag that flips once the current reactive owner is cleaned up.
fn cancel_on_cleanup() -> Arc<AtomicBool> {
	let cancelled = Arc::new(AtomicBool::new(false));
	let flag = cancelled.clone();
	on_cleanup(move || flag.store(true, Ordering::Relaxed));
	cancelled
}

/// Writes `outcome` unless the load was cancelled or the signal is gone.
/// Returns whether the state was updated.
fn settle(cancelled: &AtomicBool, state: RwSignal<LoadState>, outcome: LoadState) -> bool {
	if cancelled.load(Ordering::Relaxed) {
		info!("Discarding load result after teardown");
		return false;
	}
	state.try_set(outcome).is_none()
}
