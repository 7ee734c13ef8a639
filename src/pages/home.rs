use leptos::prelude::*;

use crate::components::visualizer::{GraphVisualizer, VisualizerConfig};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
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

			<div class="visualizer-page">
				<GraphVisualizer config=VisualizerConfig::default() />
			</div>
		</ErrorBoundary>
	}
}
