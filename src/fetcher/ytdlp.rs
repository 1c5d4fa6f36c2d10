use async_trait::async_trait;
use log::{debug, error};
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::app_config::FetcherConfig;
use crate::errors::FetchError;
use crate::fetcher::{SubtitleFetcher, SubtitlePayload, SubtitleRequest, TrackKind};

// Lowercase fragments of yt-dlp error messages for videos that cannot be accessed
const UNAVAILABLE_MARKERS: [&str; 7] = [
    "video unavailable",
    "private video",
    "this video has been removed",
    "this video is not available",
    "members-only",
    "sign in to confirm your age",
    "account associated with this video has been terminated",
];

/// Subtitle fetcher backed by the yt-dlp command line tool
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    binary: String,
    sub_format: String,
    extra_args: Vec<String>,
}

impl YtDlpFetcher {
    /// Create a fetcher using `yt-dlp` from PATH
    pub fn new() -> Self {
        Self::from_config(&FetcherConfig::default())
    }

    pub fn from_config(config: &FetcherConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            sub_format: config.sub_format.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    /// Build the yt-dlp argument list for a request
    pub fn build_args(&self, request: &SubtitleRequest, output_dir: &Path) -> Vec<String> {
        let write_flag = match request.kind {
            TrackKind::Manual => "--write-sub",
            TrackKind::Automatic => "--write-auto-sub",
        };

        let mut args = vec![
            "--skip-download".to_string(),
            write_flag.to_string(),
            "--sub-format".to_string(),
            self.sub_format.clone(),
            "--sub-lang".to_string(),
            request.language.clone(),
            "-o".to_string(),
            format!("{}/%(id)s.%(ext)s", output_dir.display()),
        ];
        args.extend(self.extra_args.iter().cloned());
        args.push(request.video_id.watch_url());
        args
    }

    /// Check if the configured yt-dlp binary can be run
    pub async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Classify a failed yt-dlp run from its stderr
    pub fn classify_failure(stderr: &str) -> FetchError {
        let filtered = Self::filter_stderr(stderr);
        let lower = filtered.to_lowercase();

        if UNAVAILABLE_MARKERS.iter().any(|marker| lower.contains(marker)) {
            FetchError::VideoUnavailable(filtered)
        } else {
            FetchError::Backend(filtered)
        }
    }

    /// Keep only the `ERROR:` lines of yt-dlp stderr, or everything if there are none
    fn filter_stderr(stderr: &str) -> String {
        let errors: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("ERROR:"))
            .collect();

        if errors.is_empty() {
            let trimmed = stderr.trim();
            if trimmed.is_empty() {
                "unknown yt-dlp error (stderr was empty)".to_string()
            } else {
                trimmed.to_string()
            }
        } else {
            errors.join("\n")
        }
    }

    /// First subtitle file with the requested extension in a directory
    fn find_subtitle_file(dir: &Path, extension: &str) -> Result<Option<PathBuf>, FetchError> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == extension))
            .collect();
        files.sort();
        Ok(files.into_iter().next())
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubtitleFetcher for YtDlpFetcher {
    async fn fetch(&self, request: &SubtitleRequest) -> Result<SubtitlePayload, FetchError> {
        // Removed together with its contents when dropped
        let temp_dir = tempfile::tempdir()?;
        let args = self.build_args(request, temp_dir.path());

        debug!("Running {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| FetchError::Spawn(format!("{}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let failure = Self::classify_failure(&stderr);
            error!("yt-dlp failed for {}: {}", request.video_id, failure);
            return Err(failure);
        }

        let Some(path) = Self::find_subtitle_file(temp_dir.path(), &self.sub_format)? else {
            debug!("No {} subtitles in '{}' for {}", request.kind, request.language, request.video_id);
            return Err(FetchError::NotFound);
        };

        let content = tokio::fs::read_to_string(&path).await?;

        Ok(SubtitlePayload {
            content,
            kind: request.kind,
            format: self.sub_format.clone(),
        })
    }
}
