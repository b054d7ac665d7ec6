use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::components::plane::PlaneCanvas;
use crate::coordinator::EventService;
use crate::loader::{Network, parse_network};

const NETWORK: &str = include_str!("../../assets/network.json");

/// One editing session: its own event service shared by the toolbar and canvas.
#[component]
fn Workspace(network: Network) -> impl IntoView {
	let events = EventService::new();

	view! {
		<div class="workspace">
			<Navbar events=events.clone() />
			<PlaneCanvas network=network events=events />
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let network = parse_network(NETWORK);

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
			{network.map(|network| view! { <Workspace network=network /> })}
		</ErrorBoundary>
	}
}
