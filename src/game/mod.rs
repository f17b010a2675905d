//! Game models.
//!
//! - [`NormalForm`]: payoff table over pure contingencies
//! - [`ExtensiveForm`]: validated tree arena with information sets
//! - [`SequenceForm`]: sequences, flow constraints and sparse payoffs

mod extensive;
mod normal;
mod sequence;

pub use extensive::*;
pub use normal::*;
pub use sequence::*;

/// Any game the solvers accept.
#[derive(Debug, Clone)]
pub enum Game {
    Normal(NormalForm),
    Extensive(ExtensiveForm),
}

impl Game {
    pub fn players(&self) -> usize {
        match self {
            Self::Normal(game) => game.players(),
            Self::Extensive(game) => game.players(),
        }
    }
}

impl From<NormalForm> for Game {
    fn from(game: NormalForm) -> Self {
        Self::Normal(game)
    }
}

impl From<ExtensiveForm> for Game {
    fn from(game: ExtensiveForm) -> Self {
        Self::Extensive(game)
    }
}
