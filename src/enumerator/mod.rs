//! Enumerators - named, ordered sets of substitution values
//!
//! Every placeholder in a pattern draws its values from one enumerator.
//! Whatever the source (built-in set, character class, alternation group,
//! literal characters or a wordlist file), resolution produces the same
//! uniform representation: a non-empty, de-duplicated, ordered `Vec<String>`.

mod bindings;
mod builtin;
mod resolve;

pub use bindings::{BindingDecl, Bindings, DeclKind};
pub use builtin::Builtin;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WordlistError};
use crate::output::Encoding;

/// How an enumerator's values were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumeratorKind {
    Builtin,
    CharClass,
    Alternation,
    File,
    Literal,
}

impl std::fmt::Display for EnumeratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumeratorKind::Builtin => write!(f, "built-in"),
            EnumeratorKind::CharClass => write!(f, "char-class"),
            EnumeratorKind::Alternation => write!(f, "alternation"),
            EnumeratorKind::File => write!(f, "file"),
            EnumeratorKind::Literal => write!(f, "literal"),
        }
    }
}

/// Declared source of an enumerator, before resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumeratorSource {
    /// One of the built-in character sets
    Builtin(Builtin),
    /// Plain text, enumerated character by character
    Literal(String),
    /// `[x-y]` character class or `(A|B|...)` alternation
    Pattern(String),
    /// Wordlist file, one value per line
    File(PathBuf),
}

impl EnumeratorSource {
    /// Build a source from the raw `(spec, is_custom_pattern, file_path)` triple.
    /// A file path wins over everything else.
    pub fn from_parts(spec: &str, is_custom_pattern: bool, file_path: Option<PathBuf>) -> Self {
        match file_path {
            Some(path) => EnumeratorSource::File(path),
            None if is_custom_pattern => EnumeratorSource::Pattern(spec.to_string()),
            None => EnumeratorSource::Literal(spec.to_string()),
        }
    }
}

/// A resolved enumerator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumerator {
    name: String,
    kind: EnumeratorKind,
    values: Vec<String>,
}

impl Enumerator {
    /// Resolve a declared source into its ordered values.
    ///
    /// File-backed sources are read eagerly, decoded with `encoding`.
    pub fn resolve(name: &str, source: &EnumeratorSource, encoding: Encoding) -> Result<Self> {
        let (kind, values) = match source {
            EnumeratorSource::Builtin(builtin) => (EnumeratorKind::Builtin, resolve::chars(builtin.chars())),
            EnumeratorSource::Literal(spec) => (EnumeratorKind::Literal, resolve::chars(spec)),
            EnumeratorSource::Pattern(spec) => resolve::custom_pattern(name, spec)?,
            EnumeratorSource::File(path) => (EnumeratorKind::File, resolve::file_lines(name, path, encoding)?),
        };

        // Empty literals are the only source that can get here without values
        if values.is_empty() {
            return Err(WordlistError::enumerator_pattern(
                name,
                "",
                "enumerator has no values",
            ));
        }

        tracing::debug!(
            enumerator = %name,
            kind = %kind,
            values = values.len(),
            "Resolved enumerator"
        );

        Ok(Self {
            name: name.to_string(),
            kind,
            values,
        })
    }

    /// Built-in enumerator under its canonical name
    pub fn builtin(builtin: Builtin) -> Self {
        Self {
            name: builtin.name().to_string(),
            kind: EnumeratorKind::Builtin,
            values: resolve::chars(builtin.chars()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EnumeratorKind {
        self.kind
    }

    /// Values in iteration order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a resolved enumerator
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
