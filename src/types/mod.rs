pub mod analysis;
pub mod chart;
pub mod signals;

pub use analysis::*;
pub use chart::*;
pub use signals::*;
