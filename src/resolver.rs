use async_trait::async_trait;
use log::{debug, info, warn};

use crate::errors::{FetchError, ResolutionError};
use crate::fetcher::{SubtitleFetcher, SubtitlePayload, SubtitleRequest, TrackKind};
use crate::fragment::Fragment;
use crate::identifier::{self, ParsedReference, VideoId};
use crate::language_utils;
use crate::registry::FragmentLoader;
use crate::vtt::{self, CleanOptions};

// @module: YouTube fragment resolution

/// Language requested when the identifier has no language prefix
pub const DEFAULT_LANGUAGE: &str = "en";

/// Resolves YouTube identifiers into subtitle fragments
#[derive(Debug)]
pub struct FragmentResolver<F: SubtitleFetcher> {
    // @field: Subtitle source
    fetcher: F,

    // @field: Language used without a prefix
    default_language: String,

    // @field: Text cleanup options
    clean_options: CleanOptions,
}

impl<F: SubtitleFetcher> FragmentResolver<F> {
    /// Create a resolver with the default language and cleanup options
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            default_language: DEFAULT_LANGUAGE.to_string(),
            clean_options: CleanOptions::default(),
        }
    }

    /// Set the language used without a prefix, normalized like an explicit prefix
    pub fn with_default_language(mut self, language: impl AsRef<str>) -> Self {
        self.default_language = language_utils::normalize_language_tag(language.as_ref());
        self
    }

    pub fn with_clean_options(mut self, options: CleanOptions) -> Self {
        self.clean_options = options;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Resolve a full identifier such as `youtube:es:dQw4w9WgXcQ`
    pub async fn resolve(&self, identifier: &str) -> Result<Fragment, ResolutionError> {
        let reference = identifier::parse_identifier(identifier)?;
        self.resolve_reference(&reference).await
    }

    /// Resolve an identifier and return only the subtitle text
    pub async fn resolve_text(&self, identifier: &str) -> Result<String, ResolutionError> {
        self.resolve(identifier).await.map(|fragment| fragment.content)
    }

    /// Resolve the argument after the scheme prefix: `[lang:]<id-or-url>`
    pub async fn load_argument(&self, argument: &str) -> Result<Fragment, ResolutionError> {
        let reference = identifier::parse_argument(argument)?;
        self.resolve_reference(&reference).await
    }

    /// Fetch, clean and wrap the subtitles for an already parsed reference
    pub async fn resolve_reference(&self, reference: &ParsedReference) -> Result<Fragment, ResolutionError> {
        let video_id = reference.video_id()?;
        let explicit_language = reference
            .language
            .as_deref()
            .map(language_utils::normalize_language_tag);
        let language = explicit_language
            .clone()
            .unwrap_or_else(|| self.default_language.clone());

        if let Err(e) = language_utils::validate_language_code(&language) {
            // yt-dlp knows a few tags isolang does not, so pass it through
            warn!("{}; requesting it anyway", e);
        }

        let payload = self.fetch_preferred(&video_id, &language).await?;
        let content = vtt::clean_vtt_content_with(&payload.content, &self.clean_options);
        let source = Fragment::source_url(&video_id, explicit_language.as_deref());

        let language_name = language_utils::get_language_name(&language)
            .unwrap_or_else(|_| language.clone());
        info!(
            "Loaded {} subtitles for {} in {} ({} chars)",
            payload.kind,
            video_id,
            language_name,
            content.len()
        );

        Ok(Fragment::new(content, source))
    }

    /// Try each track kind in preference order until one exists
    async fn fetch_preferred(&self, video_id: &VideoId, language: &str) -> Result<SubtitlePayload, ResolutionError> {
        for kind in TrackKind::PREFERENCE {
            let request = SubtitleRequest {
                video_id: video_id.clone(),
                language: language.to_string(),
                kind,
            };

            debug!("Requesting {} subtitles for {} in '{}'", kind, video_id, language);

            match self.fetcher.fetch(&request).await {
                Ok(payload) => return Ok(payload),
                Err(FetchError::NotFound) => {
                    if kind == TrackKind::Manual {
                        warn!("No manual subtitles for {} in '{}', trying auto-generated", video_id, language);
                    }
                }
                Err(e) => return Err(ResolutionError::from_fetch(video_id.as_str(), e)),
            }
        }

        Err(ResolutionError::NoSubtitlesFound {
            video_id: video_id.to_string(),
            language: language.to_string(),
        })
    }
}

#[async_trait]
impl<F: SubtitleFetcher> FragmentLoader for FragmentResolver<F> {
    async fn load(&self, argument: &str) -> Result<Fragment, ResolutionError> {
        self.load_argument(argument).await
    }
}
