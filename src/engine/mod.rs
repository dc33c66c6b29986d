//! Expansion engine: lazy, ordered Cartesian product of a pattern
//!
//! Literal tokens are fixed positions; a placeholder with repeat count `n`
//! contributes `n` independent positions over its enumerator's values.
//! Output order is odometer order (rightmost position varies fastest).

mod limits;
mod odometer;

pub use limits::Words;
pub use odometer::WordGenerator;

use crate::pattern::Pattern;
use crate::types::GenerationLimits;

/// Lazily generate the words of `pattern` under `limits`.
///
/// Each call starts a fresh odometer and a fresh clock.
pub fn generate<'p>(pattern: &'p Pattern<'p>, limits: GenerationLimits) -> Words<'p> {
    Words::new(WordGenerator::new(pattern), limits)
}
