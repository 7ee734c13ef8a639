use thiserror::Error;

use super::types::Label;

/// Why an answer to a vertex or weight prompt was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
	#[error("input is empty")]
	Empty,
	#[error("expected exactly one character, got {0:?}")]
	NotSingleChar(String),
	#[error("vertex {0:?} already exists")]
	Duplicate(Label),
	#[error("{0:?} is not an integer")]
	NotInteger(String),
	#[error("{0:?} does not fit in a weight")]
	OutOfRange(String),
}

/// Why a run refused to take another step.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
	#[error("run {run} superseded by generation {current}")]
	Superseded { run: u64, current: u64 },
	#[error("run {0} was cancelled")]
	Cancelled(u64),
}
