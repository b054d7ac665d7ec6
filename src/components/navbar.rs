use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::coordinator::EventService;
use crate::mode::ModeEvent;

const LOG_LINES: usize = 8;

/// Mode buttons and the most recent log lines.
#[component]
pub fn Navbar(events: EventService) -> impl IntoView {
	let logs = RwSignal::new(Vec::<String>::new());
	let subscription = events.subscribe_log(move |message| {
		let _ = logs.try_update(|lines| {
			lines.push(message.clone());
			if lines.len() > LOG_LINES {
				lines.remove(0);
			}
		});
	});
	let service = StoredValue::new_local(events.clone());
	on_cleanup(move || {
		let _ = service.try_with_value(|events| events.unsubscribe_log(subscription));
	});

	let (drag_events, create_events) = (events.clone(), events);
	let select_drag = move |_: MouseEvent| {
		drag_events.change_mode(ModeEvent::Drag);
	};
	let select_create = move |_: MouseEvent| {
		create_events.change_mode(ModeEvent::Create { weight: 0.0 });
	};

	view! {
		<nav class="navbar">
			<button on:click=select_drag>"Drag"</button>
			<button on:click=select_create>"Create"</button>
			<ul class="log">
				{move || {
					logs.get()
						.into_iter()
						.map(|line| view! { <li>{line}</li> })
						.collect_view()
				}}
			</ul>
		</nav>
	}
}
