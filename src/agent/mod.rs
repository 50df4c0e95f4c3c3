pub mod ai;
pub use ai::{Minimax, SearchConfig, SearchResult, SearchStats};
