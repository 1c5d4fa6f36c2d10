/*!
 * Mock subtitle fetcher for testing.
 *
 * This module provides a fetcher that simulates different backend behaviors:
 * - `MockFetcher::manual()` - Manual captions exist in every language
 * - `MockFetcher::automatic_only()` - Only auto-generated captions exist
 * - `MockFetcher::no_subtitles()` - No track of any kind exists
 * - `MockFetcher::unavailable()` - The video is private or removed
 * - `MockFetcher::failing()` - The backend always errors
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::errors::FetchError;
use crate::fetcher::{SubtitleFetcher, SubtitlePayload, SubtitleRequest, TrackKind};

/// Behavior mode for the mock fetcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Manual captions are returned on the first request
    Manual,
    /// Manual captions are missing, auto-generated captions exist
    AutomaticOnly,
    /// No captions of any kind
    NoSubtitles,
    /// The video cannot be accessed
    Unavailable,
    /// Network or tool failure
    Failing,
}

/// Mock fetcher recording every request it receives
#[derive(Debug, Clone)]
pub struct MockFetcher {
    /// Behavior mode
    behavior: MockBehavior,
    /// Requests received so far, shared between clones
    requests: Arc<Mutex<Vec<SubtitleRequest>>>,
    /// Custom payload generator (optional)
    custom_payload: Option<fn(&SubtitleRequest) -> String>,
}

impl MockFetcher {
    /// Create a new mock fetcher with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_payload: None,
        }
    }

    pub fn manual() -> Self {
        Self::new(MockBehavior::Manual)
    }

    pub fn automatic_only() -> Self {
        Self::new(MockBehavior::AutomaticOnly)
    }

    pub fn no_subtitles() -> Self {
        Self::new(MockBehavior::NoSubtitles)
    }

    pub fn unavailable() -> Self {
        Self::new(MockBehavior::Unavailable)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Set a custom payload generator
    pub fn with_custom_payload(mut self, generator: fn(&SubtitleRequest) -> String) -> Self {
        self.custom_payload = Some(generator);
        self
    }

    /// Snapshot of the requests received so far
    pub fn requests(&self) -> Vec<SubtitleRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Generate a small WebVTT document for a request
    pub fn generate_vtt(request: &SubtitleRequest) -> String {
        format!(
            "WEBVTT\nKind: captions\nLanguage: {lang}\n\n\
             1\n00:00:00.000 --> 00:00:03.000\n[{kind} {lang}] subtitle for {id}\n\n\
             2\n00:00:04.000 --> 00:00:07.000\nSecond <b>line</b>\n",
            lang = request.language,
            kind = request.kind,
            id = request.video_id,
        )
    }

    fn payload(&self, request: &SubtitleRequest) -> SubtitlePayload {
        let content = match self.custom_payload {
            Some(generator) => generator(request),
            None => Self::generate_vtt(request),
        };

        SubtitlePayload {
            content,
            kind: request.kind,
            format: "vtt".to_string(),
        }
    }
}

#[async_trait]
impl SubtitleFetcher for MockFetcher {
    async fn fetch(&self, request: &SubtitleRequest) -> Result<SubtitlePayload, FetchError> {
        self.requests.lock().push(request.clone());

        match (self.behavior, request.kind) {
            (MockBehavior::Manual, _) => Ok(self.payload(request)),
            (MockBehavior::AutomaticOnly, TrackKind::Automatic) => Ok(self.payload(request)),
            (MockBehavior::AutomaticOnly, TrackKind::Manual) => Err(FetchError::NotFound),
            (MockBehavior::NoSubtitles, _) => Err(FetchError::NotFound),
            (MockBehavior::Unavailable, _) => Err(FetchError::VideoUnavailable(format!(
                "ERROR: [youtube] {}: Private video",
                request.video_id
            ))),
            (MockBehavior::Failing, _) => Err(FetchError::Backend(
                "ERROR: Unable to download webpage: connection reset".to_string(),
            )),
        }
    }
}
