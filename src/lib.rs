/*!
 * # ytfrag - YouTube subtitle fragments for prompts
 *
 * A Rust library that loads the subtitles of a YouTube video as a text
 * fragment, ready to be spliced into an assembled prompt.
 *
 * ## Features
 *
 * - Identifiers of the form `youtube:[lang:]<id-or-url>` or `yt:[lang:]<id-or-url>`
 * - Bare video ids, watch URLs, youtu.be short links, shorts and embed URLs
 * - Manual captions first, auto-generated captions as fallback
 * - WebVTT cleanup with duplicate removal and per-minute timestamp markers
 * - Subtitle download delegated to yt-dlp behind a mockable trait
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `identifier`: Identifier parsing and video id extraction
 * - `fetcher`: The `SubtitleFetcher` trait and its implementations:
 *   - `fetcher::ytdlp`: yt-dlp command line backend
 *   - `fetcher::mock`: Canned backend for tests
 * - `vtt`: WebVTT to plain text conversion
 * - `resolver`: The `FragmentResolver` tying parsing, fetching and cleanup together
 * - `registry`: Scheme prefix to loader registration
 * - `fragment`: The resolved fragment value
 * - `app_config`: Configuration management
 * - `language_utils`: Language code utilities
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod fetcher;
pub mod fragment;
pub mod identifier;
pub mod language_utils;
pub mod registry;
pub mod resolver;
pub mod vtt;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{FetchError, ResolutionError};
pub use fetcher::{SubtitleFetcher, SubtitlePayload, SubtitleRequest, TrackKind};
pub use fragment::Fragment;
pub use identifier::{FragmentRequest, ParsedReference, VideoId};
pub use registry::{register_fragment_loaders, FragmentLoader, LoaderRegistry};
pub use resolver::FragmentResolver;
