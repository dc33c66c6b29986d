//! Parsed templates
//!
//! A template like `abc%(digits){2}-%(words)` becomes a sequence of tokens:
//! literal runs and placeholder references into a [`Bindings`] table.

mod parser;

pub use parser::{parse, MAX_REPEAT};

use crate::enumerator::Enumerator;

#[cfg(doc)]
use crate::enumerator::Bindings;

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'b> {
    /// Text emitted verbatim
    Literal(String),
    /// `%(name)` or `%(name){n}`
    Placeholder {
        enumerator: &'b Enumerator,
        repeat: usize,
    },
}

impl Token<'_> {
    /// Number of choice positions this token expands to
    pub fn positions(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Placeholder { repeat, .. } => *repeat,
        }
    }
}

/// Ordered token sequence borrowed against a binding table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pattern<'b> {
    tokens: Vec<Token<'b>>,
}

impl<'b> Pattern<'b> {
    pub fn new(tokens: Vec<Token<'b>>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token<'b>] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Placeholder tokens, ignoring repeats
    pub fn placeholder_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| matches!(t, Token::Placeholder { .. }))
            .count()
    }

    /// Size of the full product; `None` when it does not fit in a `u64`
    pub fn total_combinations(&self) -> Option<u64> {
        self.tokens.iter().try_fold(1u64, |acc, token| match token {
            Token::Literal(_) => Some(acc),
            Token::Placeholder { enumerator, repeat } => {
                let repeat = u32::try_from(*repeat).ok()?;
                acc.checked_mul((enumerator.len() as u64).checked_pow(repeat)?)
            }
        })
    }
}

impl std::fmt::Display for Pattern<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Literal(text) => f.write_str(text)?,
                Token::Placeholder { enumerator, repeat: 1 } => write!(f, "%({})", enumerator.name())?,
                Token::Placeholder { enumerator, repeat } => {
                    write!(f, "%({}){{{}}}", enumerator.name(), repeat)?
                }
            }
        }
        Ok(())
    }
}
