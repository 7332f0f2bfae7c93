//! Search engine: state, guided penalties, and the construction/improvement
//! loop.

mod assignment;
mod guided;
mod runner;
mod state;

pub use assignment::Assignment;
pub use guided::ArcPenalties;
pub use runner::{SearchOutcome, SearchRunner};
pub use state::SearchState;
