use crate::DEFAULT_STEP_BUDGET;
use crate::Error;
use crate::Result;
use serde::Deserialize;
use serde::Serialize;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// Limits on one solve run. A step is one pivot, one simplex iteration,
/// or one enumeration candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub steps: Option<u64>,
    pub time: Option<Duration>,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            steps: Some(DEFAULT_STEP_BUDGET),
            time: None,
        }
    }
}

impl Budget {
    pub fn unlimited() -> Self {
        Self {
            steps: None,
            time: None,
        }
    }
}

/// Running step counter checked between pivots and candidates.
///
/// Shared by reference across enumeration workers, so the counter is atomic.
#[derive(Debug)]
pub struct Meter {
    steps: AtomicU64,
    limit: Option<u64>,
    deadline: Option<Instant>,
}

impl Meter {
    pub fn new(budget: &Budget) -> Self {
        Self {
            steps: AtomicU64::new(0),
            limit: budget.steps,
            deadline: budget.time.map(|t| Instant::now() + t),
        }
    }
    pub fn unbounded() -> Self {
        Self::new(&Budget::unlimited())
    }
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Relaxed)
    }
    /// count one step; fails once the step limit is passed or the clock runs out
    pub fn tick(&self) -> Result<()> {
        let steps = self.steps.fetch_add(1, Ordering::Relaxed) + 1;
        if self.limit.is_some_and(|limit| steps > limit) {
            return Err(Error::Timeout { steps: steps - 1 });
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(Error::Timeout { steps });
        }
        Ok(())
    }
}
