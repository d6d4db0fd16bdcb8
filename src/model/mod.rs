//! Pure data structures shared by the controllers and the gateway boundary.

pub mod page;
pub mod product;

pub use page::*;
pub use product::*;
