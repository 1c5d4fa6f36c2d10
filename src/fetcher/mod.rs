/*!
 * Subtitle fetch implementations.
 *
 * The resolver only talks to the `SubtitleFetcher` trait:
 * - `ytdlp`: downloads subtitle tracks with the yt-dlp command line tool
 * - `mock`: canned responses for tests
 */

use async_trait::async_trait;
use std::fmt::{self, Debug};

use crate::errors::FetchError;
use crate::identifier::VideoId;

/// Kind of subtitle track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Captions uploaded by the video author
    Manual,
    /// Captions generated by YouTube speech recognition
    Automatic,
}

impl TrackKind {
    /// Order in which track kinds are tried
    pub const PREFERENCE: [TrackKind; 2] = [TrackKind::Manual, TrackKind::Automatic];
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Automatic => write!(f, "auto-generated"),
        }
    }
}

/// One subtitle download request
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleRequest {
    pub video_id: VideoId,
    pub language: String,
    pub kind: TrackKind,
}

/// Raw subtitle payload as downloaded
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitlePayload {
    /// File content, usually WebVTT
    pub content: String,
    /// Track kind that produced the payload
    pub kind: TrackKind,
    /// Subtitle format extension
    pub format: String,
}

/// Common trait for subtitle sources
///
/// A fetcher returns `FetchError::NotFound` when the requested track kind does
/// not exist so the caller can fall back to the next kind.
#[async_trait]
pub trait SubtitleFetcher: Send + Sync + Debug {
    /// Fetch the subtitle track for a video, language and track kind
    async fn fetch(&self, request: &SubtitleRequest) -> Result<SubtitlePayload, FetchError>;
}

pub mod mock;
pub mod ytdlp;

pub use mock::{MockBehavior, MockFetcher};
pub use ytdlp::YtDlpFetcher;
