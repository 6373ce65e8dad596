pub mod pick;
pub mod projection;
pub mod recording;
pub mod surface;

pub use pick::*;
pub use projection::*;
pub use recording::*;
pub use surface::*;
