/*!
 * Fragment identifier parsing.
 *
 * An identifier looks like `youtube:[lang:]<id-or-url>`. This module splits it
 * into scheme, optional language and locator, then turns the locator into a
 * canonical video id.
 */

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::errors::ResolutionError;

/// Schemes handled by the YouTube loader
pub const YOUTUBE_SCHEMES: [&str; 2] = ["youtube", "yt"];

// @const: Canonical YouTube video id
static VIDEO_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap()
});

const WATCH_HOSTS: [&str; 4] = [
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
];

const PATH_PREFIXES: [&str; 4] = ["shorts", "embed", "live", "v"];

/// Raw identifier as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentRequest {
    pub raw_identifier: String,
}

impl FragmentRequest {
    pub fn new(raw_identifier: impl Into<String>) -> Self {
        Self {
            raw_identifier: raw_identifier.into(),
        }
    }

    /// Split into scheme, language and locator
    pub fn parse(&self) -> Result<ParsedReference, ResolutionError> {
        parse_identifier(&self.raw_identifier)
    }
}

/// Identifier split into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReference {
    /// Scheme prefix, absent when a bare argument was parsed
    pub scheme: Option<String>,

    /// Explicit language prefix
    pub language: Option<String>,

    /// Bare video id or full URL
    pub video_locator: String,
}

impl ParsedReference {
    /// Resolve the locator into a canonical video id
    pub fn video_id(&self) -> Result<VideoId, ResolutionError> {
        VideoId::from_locator(&self.video_locator)
    }
}

/// Canonical 11-character YouTube video id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Parse a bare id, rejecting anything that is not 11 id characters
    pub fn parse(candidate: &str) -> Result<Self, ResolutionError> {
        if VIDEO_ID_REGEX.is_match(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(ResolutionError::MalformedIdentifier(format!(
                "Invalid YouTube video id: {}",
                candidate
            )))
        }
    }

    /// Extract the id from a bare id or a youtube.com / youtu.be URL
    pub fn from_locator(locator: &str) -> Result<Self, ResolutionError> {
        let locator = locator.trim();
        if locator.is_empty() {
            return Err(ResolutionError::MalformedIdentifier(
                "Missing video id or URL".to_string(),
            ));
        }

        if !has_url_scheme(locator) {
            // Bare ids may still carry a pasted query suffix like `?t=42`
            let bare = locator.split(['?', '&', '#']).next().unwrap_or_default();
            return Self::parse(bare);
        }

        let url = Url::parse(locator).map_err(|e| {
            ResolutionError::MalformedIdentifier(format!("Invalid YouTube URL: {} ({})", locator, e))
        })?;
        let host = url.host_str().unwrap_or_default().to_lowercase();

        if WATCH_HOSTS.contains(&host.as_str()) {
            if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
                return Self::parse(&v);
            }

            let mut segments = url.path_segments().into_iter().flatten();
            if let (Some(prefix), Some(id)) = (segments.next(), segments.next()) {
                if PATH_PREFIXES.contains(&prefix) {
                    return Self::parse(id);
                }
            }

            return Err(invalid_url(locator));
        }

        if host == "youtu.be" {
            let id = url
                .path_segments()
                .and_then(|mut segments| segments.next())
                .unwrap_or_default();
            return Self::parse(id);
        }

        Err(invalid_url(locator))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Watch page URL for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn invalid_url(locator: &str) -> ResolutionError {
    ResolutionError::MalformedIdentifier(format!("Invalid YouTube URL: {}", locator))
}

fn has_url_scheme(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Parse a full identifier such as `yt:es:dQw4w9WgXcQ`
///
/// The identifier is split on ':' into at most three parts. A URL directly
/// after the scheme keeps its own ':' and never yields a language.
pub fn parse_identifier(identifier: &str) -> Result<ParsedReference, ResolutionError> {
    let (scheme, argument) = identifier.split_once(':').ok_or_else(|| {
        ResolutionError::MalformedIdentifier(format!(
            "Expected '<scheme>:<id-or-url>', got '{}'",
            identifier
        ))
    })?;

    let scheme = scheme.trim().to_lowercase();
    if !YOUTUBE_SCHEMES.contains(&scheme.as_str()) {
        return Err(ResolutionError::UnknownScheme(scheme));
    }

    let mut reference = parse_argument(argument)?;
    reference.scheme = Some(scheme);
    Ok(reference)
}

/// Parse the part after the scheme: `[lang:]<id-or-url>`
pub fn parse_argument(argument: &str) -> Result<ParsedReference, ResolutionError> {
    let argument = argument.trim();

    let (language, locator) = match argument.split_once(':') {
        Some((language, locator)) if !has_url_scheme(argument) => {
            let language = language.trim();
            if language.is_empty() {
                return Err(ResolutionError::MalformedIdentifier(format!(
                    "Empty language prefix in '{}'",
                    argument
                )));
            }
            (Some(language.to_string()), locator.trim())
        }
        _ => (None, argument),
    };

    if locator.is_empty() {
        return Err(ResolutionError::MalformedIdentifier(
            "Missing video id or URL".to_string(),
        ));
    }

    Ok(ParsedReference {
        scheme: None,
        language,
        video_locator: locator.to_string(),
    })
}
