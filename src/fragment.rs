use std::fmt;

use serde::Serialize;

use crate::identifier::VideoId;

/// Resolved fragment handed to the host tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    /// Plain subtitle text
    pub content: String,

    /// URL the content was loaded from
    pub source: String,
}

impl Fragment {
    pub fn new(content: String, source: String) -> Self {
        Self { content, source }
    }

    /// Source URL for a video, tagged with the language only when it was explicit
    pub fn source_url(video_id: &VideoId, explicit_language: Option<&str>) -> String {
        let mut source = video_id.watch_url();
        if let Some(language) = explicit_language {
            source.push_str("&cc_lang_pref=");
            source.push_str(language);
        }
        source
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
