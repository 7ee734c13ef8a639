use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::traversal::{Step, Traversal};
use super::types::Algorithm;

/// A simple cancellation token for cooperative cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
	cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
	pub fn new() -> Self {
		Self::default()
	}

	/// Signal cancellation.
	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::Relaxed);
	}

	/// Check if cancellation has been requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::Relaxed)
	}
}

/// How long to wait after each kind of step.
#[derive(Clone, Copy, Debug)]
pub struct Pacing {
	pub step: Duration,
	pub settle: Duration,
}

/// One invocation of one algorithm.
///
/// The run remembers the editor generation it was started in; once the editor
/// moves to a newer generation the run may no longer touch the graph.
pub struct AlgorithmRun {
	generation: u64,
	token: CancellationToken,
	traversal: Box<dyn Traversal>,
	pacing: Pacing,
}

impl AlgorithmRun {
	pub fn new(generation: u64, traversal: Box<dyn Traversal>, pacing: Pacing) -> Self {
		Self {
			generation,
			token: CancellationToken::new(),
			traversal,
			pacing,
		}
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn algorithm(&self) -> Algorithm {
		self.traversal.algorithm()
	}

	pub fn token(&self) -> &CancellationToken {
		&self.token
	}

	pub fn traversal_mut(&mut self) -> &mut dyn Traversal {
		self.traversal.as_mut()
	}

	/// The wait before the next step, or `None` once the run is over.
	pub fn delay_after(&self, step: Step) -> Option<Duration> {
		match step {
			Step::Pause => Some(self.pacing.step),
			Step::Settle => Some(self.pacing.settle),
			Step::Done => None,
		}
	}
}

impl std::fmt::Debug for AlgorithmRun {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AlgorithmRun")
			.field("algorithm", &self.algorithm())
			.field("generation", &self.generation)
			.field("cancelled", &self.token.is_cancelled())
			.finish()
	}
}
