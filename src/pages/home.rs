use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::info;

use crate::components::trait_map::radar::radar_series;
use crate::components::trait_map::{
	DataSource, LoadState, NodeLookup, RadarChart, TraitDefinitions, TraitMapCanvas,
	ViewControls, ViewState, edit, spawn_load,
};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let source = query.with_untracked(|q| DataSource::with_overrides(q.get("nodes"), q.get("edges")));
	info!("Loading profiles from {}", source.nodes_url);

	let data = RwSignal::new(LoadState::Loading);
	spawn_load(source, data);

	let view_state = RwSignal::new(ViewState::default());
	let on_select = Callback::new(move |id: String| {
		info!("Selected {id}");
		edit(view_state, |v| v.with_selected(Some(id)));
	});

	let series = Signal::derive(move || {
		let selected = view_state.with(|v| v.selected.clone());
		data.with(|d| radar_series(selected.as_deref().and_then(|id| d.data()?.node(id))))
	});
	let selected_summary = move || {
		let selected = view_state.with(|v| v.selected.clone())?;
		data.with(|d| {
			let node = d.data()?.node(&selected)?;
			let cluster = node.cluster_id().unwrap_or("none");
			Some(format!("{} (cluster {cluster})", node.id))
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="trait-map-page">
				<aside class="sidebar">
					<h1>"Trait Profile Map"</h1>
					<p class="status" class:error=move || matches!(data.get(), LoadState::Failed(_))>
						{move || data.with(LoadState::status)}
					</p>
					<ViewControls view=view_state />
					<NodeLookup view=view_state data=data />
					<TraitDefinitions view=view_state />
				</aside>
				<main class="map">
					<TraitMapCanvas data=data view=view_state on_select=on_select />
				</main>
				<aside class="profile">
					<h2>
						{move || selected_summary().unwrap_or_else(|| "Click a profile".to_owned())}
					</h2>
					<RadarChart series=series />
				</aside>
			</div>
		</ErrorBoundary>
	}
}
