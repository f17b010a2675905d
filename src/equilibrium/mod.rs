//! Equilibrium result assembly.
//!
//! Raw solver vectors become [`Profile`]s here: weights are normalized to
//! sum to one, sequence weights are turned into behavior strategies, and
//! [`regrets`] recomputes payoffs to certify the result.

mod output;
mod profile;
mod verify;

pub use output::*;
pub use profile::*;
pub use verify::*;
