pub mod category;
pub mod insights;
pub mod product;

pub use category::*;
pub use insights::*;
pub use product::*;
