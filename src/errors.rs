/*!
 * Error types for the ytfrag library.
 *
 * This module contains the error taxonomy for fragment resolution and for the
 * subtitle fetch boundary, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors reported by a subtitle fetcher
#[derive(Error, Debug)]
pub enum FetchError {
    /// The requested track kind does not exist for this video and language
    #[error("No subtitle track found")]
    NotFound,

    /// The video is deleted, private or otherwise restricted
    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    /// The download tool ran and reported a failure
    #[error("Subtitle backend failed: {0}")]
    Backend(String),

    /// The download tool could not be started at all
    #[error("Failed to run subtitle downloader: {0}")]
    Spawn(String),

    /// Error reading the downloaded subtitle file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while resolving a fragment identifier
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The identifier could not be parsed into a language and a video id
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// The video exists no more or cannot be accessed
    #[error("Video unavailable: {video_id} ({reason})")]
    VideoUnavailable {
        /// Canonical video id
        video_id: String,
        /// Reason reported by the backend
        reason: String,
    },

    /// Neither manual nor automatic subtitles exist for the language
    #[error("No subtitles found for video {video_id} in language {language}")]
    NoSubtitlesFound {
        /// Canonical video id
        video_id: String,
        /// Requested language code
        language: String,
    },

    /// Network or tool failure from the fetch capability
    #[error("Failed to download subtitles: {0}")]
    BackendFailure(#[source] FetchError),

    /// No loader is registered for the scheme prefix
    #[error("No fragment loader registered for scheme '{0}'")]
    UnknownScheme(String),
}

impl ResolutionError {
    /// Attach the video id to a fetch failure
    pub fn from_fetch(video_id: &str, error: FetchError) -> Self {
        match error {
            FetchError::VideoUnavailable(reason) => Self::VideoUnavailable {
                video_id: video_id.to_string(),
                reason,
            },
            other => Self::BackendFailure(other),
        }
    }
}
