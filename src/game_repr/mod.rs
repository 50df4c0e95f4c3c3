mod piece;
mod position;
mod rules;
mod scoped;


pub use piece::*;
pub use position::*;
pub use rules::*;
pub use scoped::*;
