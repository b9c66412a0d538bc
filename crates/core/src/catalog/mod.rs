//! Catalog domain models and repository/provider contracts.

mod category;
mod model;
mod traits;

pub use category::*;
pub use model::*;
pub use traits::*;
