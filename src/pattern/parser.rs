//! Single-pass template parser

use super::{Pattern, Token};
use crate::enumerator::Bindings;
use crate::error::{Result, WordlistError};
use crate::pattern_error;

const OPEN: &str = "%(";
const CLOSE: char = ')';

/// Largest accepted `{n}` repeat count
pub const MAX_REPEAT: usize = 1024;

/// Parse `template` against `bindings`.
///
/// Text outside `%(...)` is literal, including a `%(` that is never closed.
/// A `%(` opened inside another placeholder is an error, as is a name that
/// is not bound. `{n}` right after a placeholder repeats it `n` times; a
/// brace group that is not a plain number stays literal text.
pub fn parse<'b>(template: &str, bindings: &'b Bindings) -> Result<Pattern<'b>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        literal.push_str(&rest[..start]);
        let body = &rest[start + OPEN.len()..];

        let Some(close) = body.find(CLOSE) else {
            // Unterminated marker: the remainder is plain text
            literal.push_str(&rest[start..]);
            rest = "";
            break;
        };
        if let Some(nested) = body[..close].find(OPEN) {
            return Err(pattern_error!(
                offset + start + OPEN.len() + nested,
                "nested placeholder inside '%(' opened at offset {}",
                offset + start
            ));
        }

        let name = &body[..close];
        if name.is_empty() {
            return Err(pattern_error!(offset + start, "empty placeholder name"));
        }
        let enumerator = bindings
            .get(name)
            .ok_or_else(|| WordlistError::unknown_enumerator(name))?;

        let suffix_offset = offset + start + OPEN.len() + close + 1;
        let (repeat, consumed) = parse_repeat(&body[close + 1..], suffix_offset)?;

        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(Token::Placeholder { enumerator, repeat });

        let advance = start + OPEN.len() + close + 1 + consumed;
        offset += advance;
        rest = &rest[advance..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    let pattern = Pattern::new(tokens);
    tracing::debug!(
        template = %template,
        tokens = pattern.tokens().len(),
        placeholders = pattern.placeholder_count(),
        "Parsed pattern"
    );
    Ok(pattern)
}

/// Read an optional `{n}` suffix; returns the count and bytes consumed
fn parse_repeat(text: &str, offset: usize) -> Result<(usize, usize)> {
    let Some(inner) = text.strip_prefix('{') else {
        return Ok((1, 0));
    };
    let Some(end) = inner.find('}') else {
        return Ok((1, 0));
    };

    let digits = &inner[..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok((1, 0));
    }

    let count: usize = digits
        .parse()
        .ok()
        .filter(|&n| n <= MAX_REPEAT)
        .ok_or_else(|| pattern_error!(offset, "repeat count {} exceeds the maximum of {}", digits, MAX_REPEAT))?;
    if count == 0 {
        return Err(pattern_error!(offset, "repeat count must be at least 1"));
    }

    Ok((count, end + 2))
}
