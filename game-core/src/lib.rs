pub mod engine;
pub mod word_bank;

// Re-export main components
pub use engine::*;
pub use word_bank::*;
