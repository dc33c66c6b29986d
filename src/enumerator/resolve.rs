//! Turning enumerator specs into ordered value lists

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;

use super::EnumeratorKind;
use crate::error::{Result, WordlistError};
use crate::output::Encoding;

/// `[x-y]`: exactly one character on each side of the dash
const CHAR_CLASS: &str = r"(?s)^\[(.)-(.)\]$";

/// `(A|B|...)`: at least two alternatives, no nested parentheses
const ALTERNATION: &str = r"(?s)^\(([^()]*\|[^()]*)\)$";

/// Each character of `spec`, first occurrence kept
pub(super) fn chars(spec: &str) -> Vec<String> {
    dedup(spec.chars().map(String::from))
}

/// Resolve a custom `[x-y]` or `(A|B|...)` pattern
pub(super) fn custom_pattern(name: &str, spec: &str) -> Result<(EnumeratorKind, Vec<String>)> {
    let char_class = Regex::new(CHAR_CLASS).map_err(|e| WordlistError::internal(e.to_string()))?;
    if let Some(caps) = char_class.captures(spec) {
        let bound = |i: usize| caps.get(i).and_then(|m| m.as_str().chars().next());
        let (Some(first), Some(last)) = (bound(1), bound(2)) else {
            return Err(WordlistError::enumerator_pattern(name, spec, "missing range bound"));
        };
        return Ok((EnumeratorKind::CharClass, char_range(first, last)));
    }

    let alternation = Regex::new(ALTERNATION).map_err(|e| WordlistError::internal(e.to_string()))?;
    if let Some(caps) = alternation.captures(spec) {
        let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        if body.split('|').any(str::is_empty) {
            return Err(WordlistError::enumerator_pattern(
                name,
                spec,
                "alternation contains an empty alternative",
            ));
        }
        return Ok((EnumeratorKind::Alternation, dedup(body.split('|').map(String::from))));
    }

    Err(WordlistError::enumerator_pattern(
        name,
        spec,
        "expected a character class like [a-z] or an alternation like (one|two)",
    ))
}

/// Non-blank lines of a wordlist file, in file order
pub(super) fn file_lines(name: &str, path: &Path, encoding: Encoding) -> Result<Vec<String>> {
    let shown = path.to_string_lossy().to_string();
    let bytes = std::fs::read(path)
        .map_err(|e| WordlistError::enumerator_source(name, shown.as_str(), e.to_string()))?;
    let content = encoding
        .decode(&bytes)
        .map_err(|e| WordlistError::enumerator_source(name, shown.as_str(), e.to_string()))?;

    let lines: Vec<String> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    let total = lines.len();
    let values = dedup(lines.into_iter());
    if values.len() < total {
        tracing::warn!(
            enumerator = %name,
            path = %shown,
            duplicates = total - values.len(),
            "Skipped duplicate lines in wordlist"
        );
    }

    if values.is_empty() {
        return Err(WordlistError::enumerator_source(name, shown, "wordlist is empty"));
    }
    Ok(values)
}

/// Every char from `first` to `last` inclusive, ascending by code point
fn char_range(first: char, last: char) -> Vec<String> {
    let (low, high) = if first <= last { (first, last) } else { (last, first) };
    (low..=high).map(String::from).collect()
}

fn dedup(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}
