//! Text canonicalization.
//!
//! Two distinct cleanups live here and must not be merged:
//! - [`normalize`] flattens text into a single lower-cased line for tokenization.
//! - [`clean_job_text`] keeps line structure so section headings stay detectable.

use std::sync::LazyLock;

use regex::Regex;

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

// A period glued between a letter and a capitalized word ("AWS.Experience").
// Decimals ("3.5") and dotted names ("node.js", "ASP.NET", "Vue.js") never match.
static RUN_ON_SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\p{L})\.(\p{Lu}\p{Ll})").expect("valid sentence regex")
});

static BOILERPLATE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:about (?:the )?job|job description|about the (?:role|team)|details/notes|equal opportunity statement)\b[ \t]*:?[ \t]*",
    )
    .expect("valid boilerplate regex")
});

static FIELD_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:company|location|duration|hours|compensation)[ \t]*:[ \t]*")
        .expect("valid field label regex")
});

fn unify_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn straighten_punctuation(c: char) -> char {
    match c {
        '\u{201C}' | '\u{201D}' => '"',
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{2013}' | '\u{2014}' => '-',
        other => other,
    }
}

/// Canonicalizes arbitrary text for tokenization.
///
/// Line endings are unified, smart quotes and en/em dashes are straightened,
/// every whitespace run (newlines included) becomes one space, the ends are
/// trimmed and the result is lower-cased. Idempotent.
pub fn normalize(text: &str) -> String {
    let unified: String = unify_line_endings(text)
        .chars()
        .map(straighten_punctuation)
        .collect();

    unified
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Cleans a raw job description while preserving its line structure.
///
/// Used ahead of section classification. Newlines survive; runs of three or
/// more collapse to a blank line. Case is left untouched.
pub fn clean_job_text(raw: &str) -> String {
    let text = unify_line_endings(raw);
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    let text = RUN_ON_SENTENCE.replace_all(&text, "${1}. ${2}");
    let text = BOILERPLATE_HEADING.replace_all(&text, "");
    let text = FIELD_LABEL.replace_all(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn test_normalize_collapses_whitespace_and_lowercases() {
        assert_eq!(
            normalize("  Senior   Rust\r\nEngineer\r\r\tRemote "),
            "senior rust engineer remote"
        );
    }

    #[test]
    fn test_normalize_straightens_smart_punctuation() {
        assert_eq!(
            normalize("\u{201C}Fast\u{201D} \u{2018}team\u{2019} 3\u{2013}5 yrs \u{2014} now"),
            "\"fast\" 'team' 3-5 yrs - now"
        );
    }

    #[test]
    fn test_normalize_is_idempotent_on_sample() {
        let once = normalize("Python,  SQL\n\nand  Node.JS \u{2014} Docker");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_clean_job_text_keeps_newlines() {
        let cleaned = clean_job_text("Requirements:\r\nPython\r\nSQL");
        assert_eq!(cleaned, "Requirements:\nPython\nSQL");
    }

    #[test]
    fn test_clean_job_text_collapses_excess_newlines() {
        let cleaned = clean_job_text("Intro\n\n\n\n\nRequirements\n\nPython");
        assert_eq!(cleaned, "Intro\n\nRequirements\n\nPython");
    }

    #[test]
    fn test_clean_job_text_splits_run_on_sentences() {
        assert_eq!(
            clean_job_text("Know Python.Experience with AWS."),
            "Know Python. Experience with AWS."
        );
    }

    #[test]
    fn test_clean_job_text_splits_after_acronyms() {
        assert_eq!(
            clean_job_text("Deep AWS.Experience with GCP.Nice to have"),
            "Deep AWS. Experience with GCP. Nice to have"
        );
    }

    #[test]
    fn test_clean_job_text_leaves_decimals_and_dotted_names() {
        assert_eq!(
            clean_job_text("Python 3.11 and node.js and ASP.NET and Vue.js and U.S.A"),
            "Python 3.11 and node.js and ASP.NET and Vue.js and U.S.A"
        );
    }

    #[test]
    fn test_clean_job_text_leaves_lower_case_continuations() {
        // indistinguishable from a dotted name such as "Node.js"
        assert_eq!(clean_job_text("Python.experience"), "Python.experience");
    }

    #[test]
    fn test_clean_job_text_strips_boilerplate_headings() {
        let cleaned = clean_job_text("About the job\nJob Description: We build tools\nLocation: Remote");
        assert_eq!(cleaned, "We build tools\nRemote");
    }

    #[test]
    fn test_clean_job_text_keeps_section_headings() {
        let cleaned = clean_job_text("Must-Haves:\nRust\nNice-to-Haves:\nGo");
        assert_eq!(cleaned, "Must-Haves:\nRust\nNice-to-Haves:\nGo");
    }
}
