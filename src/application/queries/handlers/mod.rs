//! Query Handlers 实现

mod note_handlers;
mod playback_handlers;
mod scripture_handlers;

pub use note_handlers::*;
pub use playback_handlers::*;
pub use scripture_handlers::*;
