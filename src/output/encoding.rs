//! Text encodings for wordlist input files and output destinations

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WordlistError};

/// Supported text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Ascii => write!(f, "ascii"),
            Encoding::Latin1 => write!(f, "latin-1"),
        }
    }
}

impl FromStr for Encoding {
    type Err = WordlistError;

    fn from_str(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(Encoding::Latin1),
            _ => Err(WordlistError::encoding(label, "unsupported encoding")),
        }
    }
}

impl Encoding {
    /// Encode a string, failing on characters the encoding cannot represent
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>> {
        match self {
            Encoding::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
            Encoding::Ascii => {
                if let Some(ch) = text.chars().find(|c| !c.is_ascii()) {
                    return Err(self.unrepresentable(ch));
                }
                Ok(Cow::Borrowed(text.as_bytes()))
            }
            Encoding::Latin1 => {
                if text.is_ascii() {
                    return Ok(Cow::Borrowed(text.as_bytes()));
                }
                let mut bytes = Vec::with_capacity(text.len());
                for ch in text.chars() {
                    let code = u32::from(ch);
                    if code > 0xFF {
                        return Err(self.unrepresentable(ch));
                    }
                    bytes.push(code as u8);
                }
                Ok(Cow::Owned(bytes))
            }
        }
    }

    /// Decode raw bytes into a string
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| WordlistError::encoding(self.to_string(), e.to_string())),
            Encoding::Ascii => {
                if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
                    return Err(WordlistError::encoding(
                        self.to_string(),
                        format!("byte 0x{:02x} at offset {} is not ascii", bytes[pos], pos),
                    ));
                }
                Ok(bytes.iter().map(|&b| b as char).collect())
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    fn unrepresentable(&self, ch: char) -> WordlistError {
        WordlistError::encoding(
            self.to_string(),
            format!("character {:?} (U+{:04X}) cannot be encoded", ch, u32::from(ch)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!("UTF8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("us-ascii".parse::<Encoding>().unwrap(), Encoding::Ascii);
        assert_eq!("ISO-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("latin_1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert!("ebcdic".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_ascii_rejects_non_ascii() {
        assert!(Encoding::Ascii.encode("abc").is_ok());
        assert!(Encoding::Ascii.encode("caf\u{e9}").is_err());
        assert!(Encoding::Ascii.decode(&[0x61, 0xe9]).is_err());
    }

    #[test]
    fn test_latin1() {
        let bytes = Encoding::Latin1.encode("caf\u{e9}").unwrap();
        assert_eq!(bytes.as_ref(), &[0x63, 0x61, 0x66, 0xe9]);
        assert_eq!(Encoding::Latin1.decode(&bytes).unwrap(), "caf\u{e9}");
        assert!(Encoding::Latin1.encode("\u{20ac}").is_err());
    }
}
