pub mod api;
pub mod config;
pub mod render;
pub mod session;
pub mod session_cache;

pub use api::{HttpPlayerApi, PlayerApi};
pub use session::SessionController;
pub use session_cache::{FileSessionCache, MemorySessionCache, SessionCache};
