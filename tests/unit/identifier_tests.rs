/*!
 * Tests for identifier parsing and video id extraction
 */

use ytfrag::errors::ResolutionError;
use ytfrag::identifier::{parse_argument, parse_identifier, FragmentRequest, VideoId};
use crate::common::VIDEO_ID;

#[test]
fn test_parse_argument_withVideoId_shouldHaveNoLanguage() {
    let reference = parse_argument(VIDEO_ID).unwrap();
    assert_eq!(reference.video_locator, VIDEO_ID);
    assert_eq!(reference.language, None);
    assert_eq!(reference.video_id().unwrap().as_str(), VIDEO_ID);
}

#[test]
fn test_parse_argument_withLanguagePrefix_shouldSplitLanguage() {
    let reference = parse_argument("es:dQw4w9WgXcQ").unwrap();
    assert_eq!(reference.language.as_deref(), Some("es"));
    assert_eq!(reference.video_id().unwrap().as_str(), VIDEO_ID);
}

#[test]
fn test_parse_argument_withWatchUrl_shouldNotTreatHttpsAsLanguage() {
    let reference = parse_argument("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
    assert_eq!(reference.language, None);
    assert_eq!(reference.video_locator, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    assert_eq!(reference.video_id().unwrap().as_str(), VIDEO_ID);
}

#[test]
fn test_parse_argument_withLanguageAndUrl_shouldKeepUrlIntact() {
    let reference = parse_argument("es:https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
    assert_eq!(reference.language.as_deref(), Some("es"));
    assert_eq!(reference.video_locator, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    assert_eq!(reference.video_id().unwrap().as_str(), VIDEO_ID);
}

#[test]
fn test_parse_argument_withShortUrl_shouldExtractId() {
    let plain = parse_argument("https://youtu.be/dQw4w9WgXcQ").unwrap();
    assert_eq!(plain.language, None);
    assert_eq!(plain.video_id().unwrap().as_str(), VIDEO_ID);

    let prefixed = parse_argument("es:https://youtu.be/dQw4w9WgXcQ?t=42").unwrap();
    assert_eq!(prefixed.language.as_deref(), Some("es"));
    assert_eq!(prefixed.video_id().unwrap().as_str(), VIDEO_ID);
}

#[test]
fn test_parse_identifier_withThreeParts_shouldUseMiddleAsLanguage() {
    let reference = parse_identifier("youtube:es:https://youtu.be/dQw4w9WgXcQ").unwrap();
    assert_eq!(reference.scheme.as_deref(), Some("youtube"));
    assert_eq!(reference.language.as_deref(), Some("es"));
    assert_eq!(reference.video_locator, "https://youtu.be/dQw4w9WgXcQ");
}

#[test]
fn test_parse_identifier_withUrlOnly_shouldHaveNoLanguage() {
    let reference = parse_identifier("yt:https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1").unwrap();
    assert_eq!(reference.scheme.as_deref(), Some("yt"));
    assert_eq!(reference.language, None);
    assert_eq!(reference.video_id().unwrap().as_str(), VIDEO_ID);
}

#[test]
fn test_parse_identifier_withUppercaseScheme_shouldNormalize() {
    let reference = FragmentRequest::new("YouTube:dQw4w9WgXcQ").parse().unwrap();
    assert_eq!(reference.scheme.as_deref(), Some("youtube"));
}

#[test]
fn test_parse_identifier_withEmptyLocator_shouldBeMalformed() {
    assert!(matches!(parse_identifier("youtube:"), Err(ResolutionError::MalformedIdentifier(_))));
    assert!(matches!(parse_identifier("yt:es:"), Err(ResolutionError::MalformedIdentifier(_))));
    assert!(matches!(parse_identifier("youtube:   "), Err(ResolutionError::MalformedIdentifier(_))));
}

#[test]
fn test_parse_identifier_withEmptyLanguage_shouldBeMalformed() {
    assert!(matches!(
        parse_identifier("youtube::dQw4w9WgXcQ"),
        Err(ResolutionError::MalformedIdentifier(_))
    ));
}

#[test]
fn test_parse_identifier_withoutScheme_shouldBeMalformed() {
    assert!(matches!(parse_identifier("dQw4w9WgXcQ"), Err(ResolutionError::MalformedIdentifier(_))));
}

#[test]
fn test_parse_identifier_withOtherScheme_shouldBeUnknownScheme() {
    match parse_identifier("vimeo:12345") {
        Err(ResolutionError::UnknownScheme(scheme)) => assert_eq!(scheme, "vimeo"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_video_id_fromLocator_withSupportedUrls_shouldExtractId() {
    let urls = [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
        "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://music.youtube.com/watch?v=dQw4w9WgXcQ&list=RD",
        "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        "https://www.youtube.com/embed/dQw4w9WgXcQ?start=10",
        "https://www.youtube.com/live/dQw4w9WgXcQ",
        "http://youtu.be/dQw4w9WgXcQ",
        "dQw4w9WgXcQ?t=42",
    ];

    for url in urls {
        let id = VideoId::from_locator(url).unwrap_or_else(|e| panic!("{}: {}", url, e));
        assert_eq!(id.as_str(), VIDEO_ID, "for {}", url);
    }
}

#[test]
fn test_video_id_fromLocator_withForeignHost_shouldBeInvalidUrl() {
    match VideoId::from_locator("https://example.com/video") {
        Err(ResolutionError::MalformedIdentifier(message)) => {
            assert!(message.contains("Invalid YouTube URL"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_video_id_fromLocator_withWatchUrlWithoutId_shouldBeInvalidUrl() {
    assert!(VideoId::from_locator("https://www.youtube.com/feed/subscriptions").is_err());
    assert!(VideoId::from_locator("https://youtu.be/").is_err());
}

#[test]
fn test_video_id_parse_withWrongLength_shouldBeMalformed() {
    assert!(VideoId::parse("short").is_err());
    assert!(VideoId::parse("dQw4w9WgXcQx").is_err());
    assert!(VideoId::parse("dQw4w9WgX!Q").is_err());
    assert!(VideoId::parse("a-b_c-d_e-f").is_ok());
}

#[test]
fn test_video_id_watchUrl_shouldBuildCanonicalUrl() {
    let id = VideoId::parse(VIDEO_ID).unwrap();
    assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    assert_eq!(id.to_string(), VIDEO_ID);
}
