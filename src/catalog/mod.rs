//! Textbook games, built through the public constructors.

mod matrix;
mod poker;

pub use matrix::*;
pub use poker::*;
