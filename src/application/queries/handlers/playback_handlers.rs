//! Playback Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::PlaybackSessionPort;
use crate::application::queries::GetPlayback;
use crate::domain::playback::PlaybackSnapshot;

/// GetPlayback Handler
pub struct GetPlaybackHandler {
    sessions: Arc<dyn PlaybackSessionPort>,
}

impl GetPlaybackHandler {
    pub fn new(sessions: Arc<dyn PlaybackSessionPort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, query: GetPlayback) -> Result<PlaybackSnapshot, ApplicationError> {
        Ok(self.sessions.snapshot(&query.session_id).await?)
    }
}
