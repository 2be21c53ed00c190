//! Heading-driven partition of a job description into required / preferred / other.

use serde::{Deserialize, Serialize};

/// Which zone of a job description a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Required,
    Preferred,
    Other,
}

/// Heading substrings that open each section. Matching is case-insensitive
/// and substring-based; the required family is checked first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingCues {
    pub required: Vec<String>,
    pub preferred: Vec<String>,
}

impl Default for HeadingCues {
    fn default() -> Self {
        let owned = |cues: &[&str]| cues.iter().map(|c| c.to_string()).collect();
        Self {
            required: owned(&[
                "requirements",
                "must-haves",
                "must have",
                "required",
                "basic qualifications",
                "minimum qualifications",
            ]),
            preferred: owned(&[
                "preferred",
                "nice-to-have",
                "nice to have",
                "bonus",
                "good to have",
            ]),
        }
    }
}

impl HeadingCues {
    /// Returns the section a heading line opens, if it is a heading at all.
    /// `line` must already be lower-cased.
    pub fn classify_heading(&self, line: &str) -> Option<Section> {
        if self.required.iter().any(|cue| line.contains(cue.as_str())) {
            Some(Section::Required)
        } else if self.preferred.iter().any(|cue| line.contains(cue.as_str())) {
            Some(Section::Preferred)
        } else {
            None
        }
    }
}

/// Newline-joined section bodies. Heading lines themselves are never included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    pub required: String,
    pub preferred: String,
    pub other: String,
}

/// Scans `cleaned` line by line, switching the current section on heading lines.
///
/// Lines before the first heading land in `other`. Body lines are stored
/// lower-cased and stripped.
pub fn classify_sections(cleaned: &str, cues: &HeadingCues) -> Sections {
    let mut current = Section::Other;
    let mut required = Vec::new();
    let mut preferred = Vec::new();
    let mut other = Vec::new();

    for raw_line in cleaned.lines() {
        let line = raw_line.trim().to_lowercase();
        let heading = line.strip_suffix(':').unwrap_or(&line).trim_end();

        if let Some(section) = cues.classify_heading(heading) {
            current = section;
            continue;
        }

        let bucket = match current {
            Section::Required => &mut required,
            Section::Preferred => &mut preferred,
            Section::Other => &mut other,
        };
        bucket.push(line);
    }

    Sections {
        required: required.join("\n"),
        preferred: preferred.join("\n"),
        other: other.join("\n"),
    }
}
