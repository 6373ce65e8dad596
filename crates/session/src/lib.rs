pub mod gestures;
pub mod projection;
pub mod session;
pub mod simulation;
pub mod stack;

pub use gestures::*;
pub use projection::*;
pub use session::*;
pub use simulation::*;
pub use stack::*;
