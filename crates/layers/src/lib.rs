pub mod capabilities;
pub mod catalog;
pub mod descriptor;
pub mod error;

pub use capabilities::*;
pub use catalog::*;
pub use descriptor::*;
pub use error::*;
