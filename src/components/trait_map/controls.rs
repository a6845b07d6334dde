//! Form controls bound to the shared [`ViewState`] signal.

use leptos::prelude::*;
use log::{info, warn};

use super::state::{EDGE_SCALE_RANGE, LoadState, POINT_RADIUS_RANGE, ViewState};
use super::traits::TRAITS;

/// Replaces the view state with `f(old)`.
pub fn edit(view: RwSignal<ViewState>, f: impl FnOnce(ViewState) -> ViewState) {
	view.update(|v| *v = f(std::mem::take(v)));
}

fn parse_or_nan(raw: &str) -> f64 {
	raw.parse().unwrap_or(f64::NAN)
}

#[component]
pub fn ViewControls(view: RwSignal<ViewState>) -> impl IntoView {
	view! {
		<fieldset class="view-controls">
			<label>
				<input
					type="checkbox"
					prop:checked=move || view.with(|v| v.show_edges)
					on:change=move |ev| edit(view, |v| v.with_show_edges(event_target_checked(&ev)))
				/>
				" Show edges"
			</label>
			<label>
				"Edge thickness "
				<input
					type="range"
					min={EDGE_SCALE_RANGE.0.to_string()}
					max={EDGE_SCALE_RANGE.1.to_string()}
					step="0.1"
					prop:value=move || view.with(|v| v.edge_scale.to_string())
					on:input=move |ev| {
						edit(view, |v| v.with_edge_scale(parse_or_nan(&event_target_value(&ev))))
					}
				/>
				{move || view.with(|v| format!(" {:.1}×", v.edge_scale))}
			</label>
			<label>
				"Point size "
				<input
					type="range"
					min={POINT_RADIUS_RANGE.0.to_string()}
					max={POINT_RADIUS_RANGE.1.to_string()}
					step="1"
					prop:value=move || view.with(|v| v.point_radius.to_string())
					on:input=move |ev| {
						edit(view, |v| v.with_point_radius(parse_or_nan(&event_target_value(&ev))))
					}
				/>
				{move || view.with(|v| format!(" {}px", v.point_radius))}
			</label>
			<label>
				<input
					type="checkbox"
					prop:checked=move || view.with(|v| v.show_ellipses)
					on:change=move |ev| edit(view, |v| v.with_show_ellipses(event_target_checked(&ev)))
				/>
				" Show cluster ellipses"
			</label>
			<label>
				"Colour by "
				<select
					prop:value=move || view.with(|v| v.color_trait.key.to_owned())
					on:change=move |ev| edit(view, |v| v.with_color_trait(&event_target_value(&ev)))
				>
					{TRAITS
						.iter()
						.map(|t| view! { <option value=t.key>{t.label}</option> })
						.collect_view()}
				</select>
			</label>
		</fieldset>
	}
}

/// Text box that selects a node by id, for when clicking is impractical.
#[component]
pub fn NodeLookup(view: RwSignal<ViewState>, data: RwSignal<LoadState>) -> impl IntoView {
	let on_change = move |ev: leptos::ev::Event| {
		let id = event_target_value(&ev).trim().to_owned();
		if id.is_empty() {
			edit(view, |v| v.with_selected(None));
			return;
		}
		let known = data.with_untracked(|d| d.data().is_some_and(|g| g.node(&id).is_some()));
		if known {
			info!("Selected {id}");
			edit(view, |v| v.with_selected(Some(id)));
		} else {
			warn!("No profile with id {id}");
		}
	};

	view! {
		<label class="node-lookup">
			"Profile id "
			<input
				type="search"
				placeholder="e.g. user_42"
				prop:value=move || view.with(|v| v.selected.clone().unwrap_or_default())
				on:change=on_change
			/>
		</label>
	}
}

#[component]
pub fn TraitDefinitions(view: RwSignal<ViewState>) -> impl IntoView {
	view! {
		<dl class="trait-definitions">
			{TRAITS
				.iter()
				.map(|t| {
					let key = t.key;
					view! {
						<dt class:active=move || view.with(|v| v.color_trait.key == key)>{t.label}</dt>
						<dd>{t.definition}</dd>
					}
				})
				.collect_view()}
		</dl>
	}
}
