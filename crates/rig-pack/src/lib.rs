pub mod pack;
pub mod selection;

pub use pack::*;
pub use selection::*;
