pub mod ids;
pub mod model;
pub mod predicate;
pub mod selection;
pub mod template;
pub mod types;

pub use ids::*;
pub use model::*;
pub use predicate::*;
pub use selection::*;
pub use template::*;
pub use types::*;
