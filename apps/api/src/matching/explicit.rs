//! Matching against caller-declared keyword specs, where each term carries
//! its own word / phrase kind instead of relying on the internal-space rule.

use serde::{Deserialize, Serialize};

use crate::matching::matcher::MatchIndex;
use crate::text::tokenize::Tokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordKind {
    Word,
    Phrase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSpec {
    pub term: String,
    pub kind: KeywordKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdKeywords {
    pub required: Vec<KeywordSpec>,
    #[serde(default)]
    pub preferred: Vec<KeywordSpec>,
}

/// Per-bucket counts plus the missing terms, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecMatchReport {
    pub required_total: usize,
    pub required_found: usize,
    pub required_missing: Vec<String>,
    pub preferred_total: usize,
    pub preferred_found: usize,
    pub preferred_missing: Vec<String>,
    /// True when every required term was found.
    pub pass: bool,
}

fn spec_hit(spec: &KeywordSpec, index: &MatchIndex) -> bool {
    match spec.kind {
        KeywordKind::Word => index.contains_word(&spec.term),
        KeywordKind::Phrase => index.contains_phrase(&spec.term),
    }
}

fn missing_terms(specs: &[KeywordSpec], index: &MatchIndex) -> Vec<String> {
    specs
        .iter()
        .filter(|spec| !spec_hit(spec, index))
        .map(|spec| spec.term.clone())
        .collect()
}

pub fn match_keyword_specs(
    resume_text: &str,
    jd: &JdKeywords,
    tokenizer: &Tokenizer,
) -> SpecMatchReport {
    let index = MatchIndex::build(resume_text, tokenizer);

    let required_missing = missing_terms(&jd.required, &index);
    let preferred_missing = missing_terms(&jd.preferred, &index);
    let required_found = jd.required.len() - required_missing.len();
    let preferred_found = jd.preferred.len() - preferred_missing.len();

    SpecMatchReport {
        required_total: jd.required.len(),
        required_found,
        pass: required_missing.is_empty(),
        required_missing,
        preferred_total: jd.preferred.len(),
        preferred_found,
        preferred_missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(term: &str) -> KeywordSpec {
        KeywordSpec {
            term: term.to_string(),
            kind: KeywordKind::Word,
        }
    }

    fn phrase(term: &str) -> KeywordSpec {
        KeywordSpec {
            term: term.to_string(),
            kind: KeywordKind::Phrase,
        }
    }

    #[test]
    fn test_all_required_found_passes() {
        let jd = JdKeywords {
            required: vec![word("python"), phrase("machine learning")],
            preferred: vec![word("docker")],
        };
        let report = match_keyword_specs(
            "Python engineer focused on machine learning",
            &jd,
            &Tokenizer::default(),
        );
        assert!(report.pass);
        assert_eq!(report.required_total, 2);
        assert_eq!(report.required_found, 2);
        assert_eq!(report.preferred_found, 0);
        assert_eq!(report.preferred_missing, vec!["docker"]);
    }

    #[test]
    fn test_declared_kind_overrides_spacing() {
        // declared as a word, so it is looked up in the token set and misses
        let jd = JdKeywords {
            required: vec![word("machine learning")],
            preferred: vec![],
        };
        let report = match_keyword_specs("machine learning", &jd, &Tokenizer::default());
        assert!(!report.pass);
        assert_eq!(report.required_missing, vec!["machine learning"]);
    }

    #[test]
    fn test_phrase_spec_with_inner_stopword_is_found() {
        let jd = JdKeywords {
            required: vec![phrase("Infrastructure as Code")],
            preferred: vec![],
        };
        let report = match_keyword_specs(
            "Maintained infrastructure as code for three teams",
            &jd,
            &Tokenizer::default(),
        );
        assert!(report.pass);
    }

    #[test]
    fn test_missing_keeps_request_order() {
        let jd = JdKeywords {
            required: vec![word("zig"), word("rust"), word("ada")],
            preferred: vec![],
        };
        let report = match_keyword_specs("rust", &jd, &Tokenizer::default());
        assert_eq!(report.required_missing, vec!["zig", "ada"]);
        assert_eq!(report.required_found, 1);
    }

    #[test]
    fn test_deserializes_without_preferred() {
        let jd: JdKeywords =
            serde_json::from_str(r#"{"required": [{"term": "sql", "kind": "word"}]}"#).unwrap();
        assert_eq!(jd.required[0].kind, KeywordKind::Word);
        assert!(jd.preferred.is_empty());
    }

    #[test]
    fn test_empty_required_passes_trivially() {
        let jd = JdKeywords {
            required: vec![],
            preferred: vec![phrase("data modeling")],
        };
        let report = match_keyword_specs("", &jd, &Tokenizer::default());
        assert!(report.pass);
        assert_eq!(report.preferred_missing, vec!["data modeling"]);
    }
}
