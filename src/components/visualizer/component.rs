use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::VisualizerConfig;
use super::prompt::BrowserPrompter;
use super::render;
use super::run::AlgorithmRun;
use super::state::{Command, Editor};
use super::types::{Algorithm, Mode};

#[derive(Clone, Copy, Debug)]
enum MenuAction {
	Command(Command),
	Exit,
}

#[derive(Clone, Copy, Debug)]
struct MenuEntry {
	label: &'static str,
	action: MenuAction,
	separated: bool,
}

impl MenuEntry {
	fn new(label: &'static str, action: MenuAction) -> Self {
		Self {
			label,
			action,
			separated: false,
		}
	}
}

fn menus() -> Vec<(&'static str, Vec<MenuEntry>)> {
	let file = vec![
		MenuEntry::new("New", MenuAction::Command(Command::New)),
		MenuEntry::new("Exit", MenuAction::Exit),
	];
	let modes = Mode::ALL
		.into_iter()
		.map(|mode| MenuEntry {
			label: mode.label(),
			action: MenuAction::Command(Command::Mode(mode)),
			separated: mode == Mode::RemoveVertex,
		})
		.collect();
	let algorithms = Algorithm::ALL
		.into_iter()
		.map(|a| MenuEntry::new(a.label(), MenuAction::Command(Command::Algorithm(a))))
		.collect();
	vec![("File", file), ("Mode", modes), ("Algorithms", algorithms)]
}

/// Plays `run` on the event loop: one step, then a timer for the next one.
fn drive(editor: Rc<RefCell<Editor>>, mut run: AlgorithmRun) {
	let step = editor.borrow_mut().advance_run(&mut run);
	match step {
		Ok(step) => {
			if let Some(delay) = run.delay_after(step) {
				set_timeout(move || drive(editor, run), delay);
			}
		}
		Err(err) => warn!("Run stopped: {}", err),
	}
}

fn on_menu(editor: &Rc<RefCell<Editor>>, action: MenuAction) {
	match action {
		MenuAction::Exit => {
			editor.borrow_mut().cancel_run();
			info!("Exit requested");
			if let Some(window) = web_sys::window() {
				if let Err(err) = window.close() {
					error!("Unable to close the window: {:?}", err);
				}
			}
		}
		MenuAction::Command(command) => {
			let run = editor.borrow_mut().execute(command);
			if let Some(run) = run {
				drive(editor.clone(), run);
			}
		}
	}
}

#[component]
pub fn GraphVisualizer(#[prop(optional)] config: Option<VisualizerConfig>) -> impl IntoView {
	let config = config.unwrap_or_default();
	let (width, height, menu_height, canvas_height) = (
		config.width,
		config.height,
		config.menu_height,
		config.canvas_height(),
	);
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let editor = Rc::new(RefCell::new(Editor::new(config)));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (editor_init, animate_init) = (editor.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("No window to draw in");
			return;
		};
		canvas.set_width(width as u32);
		canvas.set_height(canvas_height as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("Canvas context is not 2d");
					return;
				}
			},
			_ => {
				error!("Canvas 2d context unavailable");
				return;
			}
		};

		// Redraw only when the editor asked for a refresh since the last frame.
		let (editor_anim, animate_inner) = (editor_init.clone(), animate_init.clone());
		let mut drawn: Option<u64> = None;
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			{
				let editor = editor_anim.borrow();
				if drawn != Some(editor.revision()) {
					render::render(&editor, &ctx);
					drawn = Some(editor.revision());
				}
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let editor_click = editor.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		let run = editor_click.borrow_mut().click(x, y, &mut BrowserPrompter);
		if let Some(run) = run {
			drive(editor_click.clone(), run);
		}
	};

	let menu_bar = menus()
		.into_iter()
		.map(|(title, entries)| {
			let items = entries
				.into_iter()
				.map(|entry| {
					let editor = editor.clone();
					view! {
						<button
							class="menu-item"
							class:separated=entry.separated
							on:click=move |_| on_menu(&editor, entry.action)
						>
							{entry.label}
						</button>
					}
				})
				.collect_view();
			view! {
				<div class="menu">
					<span class="menu-title">{title}</span>
					<div class="menu-items">{items}</div>
				</div>
			}
		})
		.collect_view();

	view! {
		<div
			class="graph-visualizer"
			style=format!("width: {}px; height: {}px;", width, height)
		>
			<nav class="menu-bar" style=format!("height: {}px;", menu_height)>
				{menu_bar}
			</nav>
			<canvas
				node_ref=canvas_ref
				class="graph-canvas"
				on:click=on_click
				style="display: block; cursor: pointer;"
			/>
		</div>
	}
}
