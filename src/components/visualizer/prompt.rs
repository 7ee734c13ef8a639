//! Modal text prompts for vertex labels and edge weights.

use log::{debug, error};

use super::error::InputError;
use super::types::Label;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PromptRequest {
	pub title: &'static str,
	pub message: &'static str,
}

pub const VERTEX_PROMPT: PromptRequest = PromptRequest {
	title: "Vertex",
	message: "Enter the Vertex ID (Should be 1 char):",
};

pub const EDGE_PROMPT: PromptRequest = PromptRequest {
	title: "Edge",
	message: "Enter Weight:",
};

/// Something that can ask the user a question. `None` means cancel.
pub trait Prompter {
	fn prompt(&mut self, request: &PromptRequest) -> Option<String>;
}

/// `window.prompt` based prompter for the browser.
pub struct BrowserPrompter;

impl Prompter for BrowserPrompter {
	fn prompt(&mut self, request: &PromptRequest) -> Option<String> {
		let window = web_sys::window()?;
		let text = format!("{}\n\n{}", request.title, request.message);
		window.prompt_with_message(&text).unwrap_or_else(|err| {
			error!("{} prompt failed: {:?}", request.title, err);
			None
		})
	}
}

pub fn parse_label(input: &str, taken: impl Fn(Label) -> bool) -> Result<Label, InputError> {
	let trimmed = input.trim();
	let mut chars = trimmed.chars();
	let label = match (chars.next(), chars.next()) {
		(None, _) => return Err(InputError::Empty),
		(Some(c), None) => c,
		(Some(_), Some(_)) => return Err(InputError::NotSingleChar(trimmed.to_string())),
	};
	if taken(label) {
		return Err(InputError::Duplicate(label));
	}
	Ok(label)
}

/// Accepts `-?\d+` only: no sign other than a leading minus, no whitespace.
pub fn parse_weight(input: &str) -> Result<i32, InputError> {
	let digits = input.strip_prefix('-').unwrap_or(input);
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return Err(InputError::NotInteger(input.to_string()));
	}
	input
		.parse()
		.map_err(|_| InputError::OutOfRange(input.to_string()))
}

/// Asks for a vertex label until a valid one arrives or the user cancels.
pub fn ask_label(prompter: &mut dyn Prompter, taken: impl Fn(Label) -> bool) -> Option<Label> {
	loop {
		let answer = prompter.prompt(&VERTEX_PROMPT)?;
		match parse_label(&answer, &taken) {
			Ok(label) => return Some(label),
			Err(err) => debug!("Rejected vertex label: {}", err),
		}
	}
}

/// Asks for an edge weight until a valid one arrives or the user cancels.
pub fn ask_weight(prompter: &mut dyn Prompter) -> Option<i32> {
	loop {
		let answer = prompter.prompt(&EDGE_PROMPT)?;
		match parse_weight(&answer) {
			Ok(weight) => return Some(weight),
			Err(err) => debug!("Rejected edge weight: {}", err),
		}
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use std::collections::VecDeque;

	use super::*;

	/// Replays canned answers; cancels once they run out.
	#[derive(Default)]
	pub(crate) struct ScriptedPrompter {
		pub answers: VecDeque<Option<String>>,
		pub asked: Vec<PromptRequest>,
	}

	impl ScriptedPrompter {
		pub(crate) fn new(answers: &[Option<&str>]) -> Self {
			Self {
				answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
				asked: Vec::new(),
			}
		}
	}

	impl Prompter for ScriptedPrompter {
		fn prompt(&mut self, request: &PromptRequest) -> Option<String> {
			self.asked.push(*request);
			self.answers.pop_front().flatten()
		}
	}

	#[test]
	fn label_rules() {
		let taken = |l: Label| l == 'A';
		assert_eq!(parse_label("", taken), Err(InputError::Empty));
		assert_eq!(parse_label("   ", taken), Err(InputError::Empty));
		assert_eq!(
			parse_label("AB", taken),
			Err(InputError::NotSingleChar("AB".into()))
		);
		assert_eq!(parse_label("A", taken), Err(InputError::Duplicate('A')));
		assert_eq!(parse_label(" B ", taken), Ok('B'));
		assert_eq!(parse_label("7", taken), Ok('7'));
		assert_eq!(parse_label("#", taken), Ok('#'));
		assert_eq!(parse_label("é", taken), Ok('é'));
	}

	#[test]
	fn weight_rules() {
		assert_eq!(parse_weight("12"), Ok(12));
		assert_eq!(parse_weight("-3"), Ok(-3));
		assert_eq!(parse_weight("0"), Ok(0));
		for bad in ["", "-", "+4", " 4", "4 ", "1.5", "abc", "--1", "1-"] {
			assert!(
				matches!(parse_weight(bad), Err(InputError::NotInteger(_))),
				"{bad:?} accepted"
			);
		}
		assert!(matches!(
			parse_weight("99999999999"),
			Err(InputError::OutOfRange(_))
		));
	}

	#[test]
	fn ask_label_reprompts_until_valid() {
		let mut prompter = ScriptedPrompter::new(&[Some(""), Some("xy"), Some("A"), Some("C")]);
		assert_eq!(ask_label(&mut prompter, |l| l == 'A'), Some('C'));
		assert_eq!(prompter.asked.len(), 4);
		assert!(prompter.asked.iter().all(|r| *r == VERTEX_PROMPT));
	}

	#[test]
	fn cancel_stops_asking() {
		let mut prompter = ScriptedPrompter::new(&[Some("x"), None, Some("5")]);
		assert_eq!(ask_weight(&mut prompter), None);
		assert_eq!(prompter.asked, vec![EDGE_PROMPT, EDGE_PROMPT]);
	}
}
