//! Translation of solved assignments into reportable solutions.

mod solution_decoder;

pub use solution_decoder::SolutionDecoder;
