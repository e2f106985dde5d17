use regex::{Regex, RegexBuilder};

use crate::domain::common::entities::app_errors::CoreError;

/// Case-insensitive, word-bounded matcher for a single term or phrase.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    phrase: String,
    pattern: Regex,
}

/// A phrase occurrence inside a text, with the text's own casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl PhraseMatcher {
    pub fn new(phrase: &str) -> Result<Self, CoreError> {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return Err(CoreError::Invalid);
        }

        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&phrase)))
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to compile matcher for '{}': {}", phrase, e);
                CoreError::Evaluation(format!("invalid term '{}'", phrase))
            })?;

        Ok(Self { phrase, pattern })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn find_in(&self, text: &str) -> Vec<TextMatch> {
        self.pattern
            .find_iter(text)
            .map(|m| TextMatch {
                start: m.start(),
                end: m.end(),
                text: m.as_str().to_string(),
            })
            .collect()
    }

    /// `text` with every occurrence replaced by spaces, keeping offsets.
    pub fn blank_out(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &regex::Captures| " ".repeat(caps[0].len()))
            .into_owned()
    }
}

/// Runs every matcher over `text` and keeps the most specific matches:
/// a match lying inside a longer one is dropped, the rest are ordered by
/// first occurrence and deduplicated case-insensitively.
pub fn collect_mentions<'a, I>(text: &str, matchers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a PhraseMatcher>,
{
    let mut matches: Vec<TextMatch> = matchers
        .into_iter()
        .flat_map(|m| m.find_in(text))
        .collect();

    matches.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then((b.end - b.start).cmp(&(a.end - a.start)))
    });

    let mut kept: Vec<TextMatch> = Vec::new();
    for candidate in matches {
        let inside_longer = kept
            .iter()
            .any(|k| k.start <= candidate.start && candidate.end <= k.end);
        if !inside_longer {
            kept.push(candidate);
        }
    }

    let mut mentions: Vec<String> = Vec::new();
    for m in kept {
        if !mentions.iter().any(|x| x.to_lowercase() == m.text.to_lowercase()) {
            mentions.push(m.text);
        }
    }
    mentions
}

/// Byte offset of the first word-bounded occurrence of `phrase` in
/// `haystack` at or after `from`. Both sides are compared as given, so
/// callers lowercase them first.
pub fn find_phrase(haystack: &str, phrase: &str, from: usize) -> Option<usize> {
    if phrase.is_empty() || from > haystack.len() || !haystack.is_char_boundary(from) {
        return None;
    }

    haystack[from..]
        .match_indices(phrase)
        .map(|(offset, _)| from + offset)
        .find(|&start| {
            let end = start + phrase.len();
            let before = haystack[..start].chars().next_back();
            let after = haystack[end..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
}

/// Whole-word, case-insensitive containment for fixed keywords.
pub fn has_phrase(text: &str, phrase: &str) -> bool {
    find_phrase(&text.to_lowercase(), &phrase.trim().to_lowercase(), 0).is_some()
}

/// Spellings a free-text exclusion should also match. Only the
/// onion, garlic and pepper families are expanded, everything else is exact.
pub fn custom_term_variants(term: &str) -> Vec<String> {
    let term = term
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    let (prefix, last) = match term.rsplit_once(' ') {
        Some((prefix, last)) => (format!("{} ", prefix), last.to_string()),
        None => (String::new(), term.clone()),
    };

    let tails: Vec<&str> = match last.as_str() {
        "onion" | "onions" => vec!["onion", "onions"],
        "garlic" | "garlics" => vec!["garlic", "garlics"],
        "pepper" | "peppers" if prefix.is_empty() => {
            vec!["pepper", "peppers", "peppercorn", "peppercorns"]
        }
        "pepper" | "peppers" => vec!["pepper", "peppers"],
        "peppercorn" | "peppercorns" => vec!["peppercorn", "peppercorns"],
        _ => return vec![term],
    };

    tails
        .into_iter()
        .map(|tail| format!("{}{}", prefix, tail))
        .collect()
}

/// Splits a description into lowercase sentences.
pub fn sentences(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(['.', '!', '?', ';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
