//! Nash equilibria of finite games.
//!
//! Builds normal-form and extensive-form games, converts the latter to
//! sequence form, and computes equilibria exactly (arbitrary-precision
//! fractions) or in floating point.
//!
//! # Module Structure
//!
//! - `arith`: Scalar capability, exact/floating number types, comparison field
//! - `game`: Normal form, extensive form arena, sequence-form transform
//! - `linalg`: Dense matrices, Gaussian elimination, pivoting tableau, simplex
//! - `solver`: Support enumeration, Lemke-Howson, Lemke, zero-sum LP, pure enumeration
//! - `equilibrium`: Result assembly, verification, tagged output
//! - `catalog`: Textbook games used by tests, benches and the CLI
#![allow(clippy::needless_range_loop)]

mod arith;
mod catalog;
mod equilibrium;
mod error;
mod game;
mod linalg;
mod solver;

pub use arith::*;
pub use catalog::*;
pub use equilibrium::*;
pub use error::*;
pub use game::*;
pub use linalg::*;
pub use solver::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Player index into the game's ordered player list.
pub type Player = usize;
/// Pure strategy index within one player's strategy list.
pub type Strategy = usize;
/// Action index within one information set.
pub type Action = usize;

// ============================================================================
// NUMERIC DEFAULTS
// ============================================================================
/// Tolerance for floating-point comparisons when none is configured.
pub const DEFAULT_EPSILON: f64 = 1e-9;

// ============================================================================
// BUDGETS
// Steps are pivots, enumeration candidates, or simplex iterations.
// ============================================================================
/// Default step budget per solve run. Generous enough for exhaustive
/// support enumeration of 6x6 games and Lemke paths on small trees.
pub const DEFAULT_STEP_BUDGET: u64 = 1 << 22;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging for the command-line front end.
#[cfg(feature = "cli")]
pub fn log() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let _ = simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
}
