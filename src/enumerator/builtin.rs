//! Built-in character sets available in every pattern without declaration

use serde::{Deserialize, Serialize};

const DIGITS: &str = "0123456789";
const ASCII_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const ASCII_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
const ASCII_VISIBLE: &str = concat!(
    "0123456789",
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
);

/// Built-in character set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Builtin {
    /// `0-9`
    Digits,
    /// `a-z`
    AsciiLowercase,
    /// `A-Z`
    AsciiUppercase,
    /// Digits, letters, then punctuation
    AsciiVisible,
    /// ASCII punctuation
    Punctuation,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Digits,
        Builtin::AsciiLowercase,
        Builtin::AsciiUppercase,
        Builtin::AsciiVisible,
        Builtin::Punctuation,
    ];

    /// Placeholder name of the set
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Digits => "digits",
            Builtin::AsciiLowercase => "ascii_lowercase",
            Builtin::AsciiUppercase => "ascii_uppercase",
            Builtin::AsciiVisible => "ascii_visible",
            Builtin::Punctuation => "punctuation",
        }
    }

    /// Characters of the set in canonical order
    pub fn chars(&self) -> &'static str {
        match self {
            Builtin::Digits => DIGITS,
            Builtin::AsciiLowercase => ASCII_LOWERCASE,
            Builtin::AsciiUppercase => ASCII_UPPERCASE,
            Builtin::AsciiVisible => ASCII_VISIBLE,
            Builtin::Punctuation => PUNCTUATION,
        }
    }

    /// Look up a built-in by placeholder name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
