//! HTTP Handlers

mod notes;
mod ping;
mod playback;
mod scripture;
mod websocket;

pub use notes::*;
pub use ping::*;
pub use playback::*;
pub use scripture::*;
pub use websocket::*;
