pub mod round;
pub mod messages;
pub mod player;
pub mod errors;

// Re-export all types
pub use round::*;
pub use messages::*;
pub use player::*;
pub use errors::*;
