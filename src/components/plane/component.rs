use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use crate::config::{ForceConfig, ViewConfig};
use crate::coordinator::{EventService, ModeController, SharedController};
use crate::layout::LayoutSurface;
use crate::loader::Network;

type ControllerSlot = Rc<RefCell<Option<SharedController>>>;

/// Maps client coordinates onto the fixed view, whatever size CSS gives the canvas.
fn view_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	if rect.width() <= 0.0 || rect.height() <= 0.0 {
		return None;
	}
	let (sx, sy) = (
		canvas.width() as f64 / rect.width(),
		canvas.height() as f64 / rect.height(),
	);
	Some((
		(ev.client_x() as f64 - rect.left()) * sx,
		(ev.client_y() as f64 - rect.top()) * sy,
	))
}

fn with_controller(slot: &ControllerSlot, f: impl FnOnce(&mut ModeController)) {
	let Some(shared) = slot.borrow().clone() else {
		return;
	};
	let Ok(mut controller) = shared.try_borrow_mut() else {
		return;
	};
	f(&mut controller);
}

#[component]
pub fn PlaneCanvas(network: Network, events: EventService) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let controller: ControllerSlot = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (controller_init, animate_init) = (controller.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if controller_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let view = ViewConfig::default();
		canvas.set_width(view.width as u32);
		canvas.set_height(view.height as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let graph = match network.clone().into_graph(&view) {
			Ok(graph) => graph,
			Err(err) => {
				error!("cannot build graph: {err}");
				events.emit_log(err.to_string());
				return;
			}
		};
		let layout = LayoutSurface::new(graph, view, ForceConfig::default());
		let shared = ModeController::new(layout, events.clone()).attach();
		*controller_init.borrow_mut() = Some(shared.clone());

		let animate_inner = animate_init.clone();
		let mut last = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last) / 1000.0).min(0.1);
			last = now;
			if let Ok(mut controller) = shared.try_borrow_mut() {
				controller.tick(dt);
				render::render(controller.layout(), &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let controller_md = controller.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = view_point(canvas_ref, &ev) {
			with_controller(&controller_md, |c| {
				c.layout_mut().pointer_down(x, y);
			});
		}
	};

	let controller_mm = controller.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = view_point(canvas_ref, &ev) {
			with_controller(&controller_mm, |c| {
				c.layout_mut().pointer_move(x, y);
			});
		}
	};

	let controller_mu = controller.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if let Some((x, y)) = view_point(canvas_ref, &ev) {
			with_controller(&controller_mu, |c| {
				c.layout_mut().pointer_up(x, y);
			});
		}
	};

	let controller_ml = controller.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_controller(&controller_ml, |c| {
			c.layout_mut().pointer_leave();
		});
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="plane-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; width: 100%; cursor: crosshair;"
		/>
	}
}
