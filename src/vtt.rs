use once_cell::sync::Lazy;
use regex::Regex;
use log::debug;

// @module: WebVTT to plain text conversion

// @const: Cue start time, hours optional
static CUE_START_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d{1,2}):)?(\d{2}):(\d{2})[.,]\d{3}\s+-->").unwrap()
});

// @const: Markup tags, including YouTube karaoke timestamps like <00:00:01.000>
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").unwrap()
});

const HEADER_PREFIXES: [&str; 3] = ["WEBVTT", "Kind:", "Language:"];

// Blocks that run until the next blank line and carry no caption text
const SKIPPED_BLOCKS: [&str; 3] = ["NOTE", "STYLE", "REGION"];

const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

/// Options for turning a subtitle payload into prompt text
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Emit a `[HH:MM:SS]` marker whenever the cue minute changes
    pub include_timestamps: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            include_timestamps: true,
        }
    }
}

/// Start time of a cue, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueStart {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CueStart {
    /// Parse the start of a timing line like `00:01:02.000 --> 00:01:04.000 align:start`
    pub fn parse(line: &str) -> Option<Self> {
        let caps = CUE_START_REGEX.captures(line)?;
        let field = |idx: usize| {
            caps.get(idx)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .unwrap_or(0)
        };

        Some(Self {
            hours: field(1),
            minutes: field(2),
            seconds: field(3),
        })
    }

    /// Minutes since the start of the video
    pub fn total_minutes(&self) -> u64 {
        self.hours * 60 + self.minutes
    }

    /// Marker inserted into the cleaned text
    pub fn marker(&self) -> String {
        format!("[{:02}:{:02}:{:02}]", self.hours, self.minutes, self.seconds)
    }
}

fn starts_skipped_block(line: &str) -> bool {
    SKIPPED_BLOCKS.iter().any(|keyword| {
        line.strip_prefix(keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

/// Remove markup tags and decode the few entities YouTube emits
pub fn strip_markup(text: &str) -> String {
    let mut stripped = TAG_REGEX.replace_all(text, "").into_owned();
    for (entity, replacement) in ENTITIES {
        if stripped.contains(entity) {
            stripped = stripped.replace(entity, replacement);
        }
    }
    stripped.trim().to_string()
}

/// Clean up WebVTT content with the default options
pub fn clean_vtt_content(content: &str) -> String {
    clean_vtt_content_with(content, &CleanOptions::default())
}

/// Clean up WebVTT content so it reads as a transcript
///
/// Headers, `NOTE`/`STYLE`/`REGION` blocks, cue identifiers and timing lines are
/// dropped, markup is removed and consecutive duplicate lines (YouTube rolls each
/// caption line over several cues) are collapsed. A timestamp marker is kept once per minute for orientation.
pub fn clean_vtt_content_with(content: &str, options: &CleanOptions) -> String {
    let mut cleaned_lines: Vec<String> = Vec::new();
    let mut prev_text: Option<String> = None;
    let mut last_minute_recorded: Option<u64> = None;
    let mut at_block_start = true;
    let mut in_skipped_block = false;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() {
            at_block_start = true;
            in_skipped_block = false;
            continue;
        }

        let block_start = std::mem::replace(&mut at_block_start, false);
        if block_start && starts_skipped_block(line) {
            in_skipped_block = true;
        }

        if in_skipped_block || HEADER_PREFIXES.iter().any(|p| line.starts_with(p)) {
            continue;
        }

        if line.contains("-->") {
            if let Some(start) = CueStart::parse(line) {
                let minute = start.total_minutes();
                if options.include_timestamps && last_minute_recorded != Some(minute) {
                    cleaned_lines.push(start.marker());
                    last_minute_recorded = Some(minute);
                }
            }
            continue;
        }

        // Numeric cue identifiers
        if line.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        let text = strip_markup(line);
        if text.is_empty() || prev_text.as_deref() == Some(text.as_str()) {
            continue;
        }

        cleaned_lines.push(text.clone());
        prev_text = Some(text);
    }

    debug!("Cleaned subtitle payload into {} lines", cleaned_lines.len());
    cleaned_lines.join("\n")
}
