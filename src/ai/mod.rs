pub mod eval;
mod parallel;
pub mod search;

pub use eval::{EvalTerms, Evaluator, evaluate};
pub use search::{Deadline, SearchReport, Searcher, choose_move, choose_move_with};
