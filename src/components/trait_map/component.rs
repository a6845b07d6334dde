use leptos::ev;
use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::pick::pick;
use super::radar::{RadarPoint, draw_radar};
use super::render::{self, apply_pixel_ratio};
use super::scale::ScreenScale;
use super::scene::Scene;
use super::state::{LoadState, ViewState};

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn pixel_ratio() -> f64 {
	web_sys::window()
		.map(|w| w.device_pixel_ratio())
		.filter(|r| r.is_finite() && *r > 0.0)
		.unwrap_or(1.0)
}

/// Sizes the backing store to `w` x `h` CSS pixels at the display's pixel
/// ratio and returns that ratio.
fn fit_backing_store(canvas: &HtmlCanvasElement, w: f64, h: f64) -> f64 {
	let dpr = pixel_ratio();
	canvas.set_width((w * dpr).round() as u32);
	canvas.set_height((h * dpr).round() as u32);
	// `ElementExt::style` from the leptos prelude would shadow the DOM getter.
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{w}px"));
	let _ = style.set_property("height", &format!("{h}px"));
	dpr
}

fn measure(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(600.0)
		}),
	)
}

/// Scatter map of the loaded profiles. Clicking reports the nearest node id
/// through `on_select`; what is drawn is fully determined by `data` and `view`.
#[component]
pub fn TraitMapCanvas(
	#[prop(into)] data: Signal<LoadState>,
	#[prop(into)] view: Signal<ViewState>,
	#[prop(into)] on_select: Callback<String>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let size = RwSignal::new((0.0_f64, 0.0_f64));

	let options = Memo::new(move |_| view.with(ViewState::scene_options));
	let scene = Memo::new(move |_| {
		let options = options.get();
		data.with(|d| {
			d.data()
				.map(|graph| Scene::assemble(graph, &options))
				.unwrap_or_default()
		})
	});

	// Measure once mounted, then again on every window resize until unmounted.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		size.set(measure(&canvas, width, height));
	});
	let resize = window_event_listener(ev::resize, move |_| {
		if let Some(canvas) = canvas_ref.get_untracked() {
			let canvas: HtmlCanvasElement = canvas.into();
			size.set(measure(&canvas, width, height));
		}
	});
	on_cleanup(move || resize.remove());

	// Redraw on any change of data, view or size.
	Effect::new(move |_| {
		let (w, h) = size.get();
		let view = view.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if w <= 0.0 || h <= 0.0 {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let dpr = fit_backing_store(&canvas, w, h);
		let Some(mut ctx) = context_2d(&canvas) else {
			return;
		};
		apply_pixel_ratio(&ctx, dpr);
		scene.with(|scene| {
			let scale = ScreenScale::new(scene.extent, w, h);
			render::render(scene, &view, &scale, &mut ctx);
		});
	});

	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		let (w, h) = size.get_untracked();
		let scale = ScreenScale::new(scene.with_untracked(|s| s.extent), w, h);
		let picked = data.with_untracked(|d| {
			d.data()
				.and_then(|graph| pick(&graph.nodes, &scale, x, y))
				.map(str::to_owned)
		});
		if let Some(id) = picked {
			debug!("Picked {id} at ({x:.1}, {y:.1})");
			on_select.run(id);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="trait-map-canvas"
			on:click=on_click
			style="display: block; cursor: crosshair;"
		/>
	}
}

/// Radar chart of one profile's trait scores.
#[component]
pub fn RadarChart(
	#[prop(into)] series: Signal<Vec<RadarPoint>>,
	#[prop(default = 280.0)] size: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let series = series.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let dpr = fit_backing_store(&canvas, size, size);
		let Some(mut ctx) = context_2d(&canvas) else {
			return;
		};
		apply_pixel_ratio(&ctx, dpr);
		draw_radar(&series, size, size, &mut ctx);
	});

	view! { <canvas node_ref=canvas_ref class="radar-chart" /> }
}
