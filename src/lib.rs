//! Wordlist Forge - pattern-driven wordlist generation
//!
//! Expands templates such as `admin%(digits){4}` or `%(words)-%(year)` into
//! every candidate string they denote, in a deterministic order, with
//! optional word-count and time limits.

pub mod engine;
pub mod enumerator;
pub mod error;
pub mod logging;
pub mod output;
pub mod pattern;
pub mod types;
pub mod wordlist;

// Re-export commonly used types
pub use error::{Result, WordlistError};
pub use types::{GenerationLimits, RunConfig, RunOutcome, RunProgress, RunSummary, StopReason};

// Re-export main functionality
pub use engine::{generate, WordGenerator, Words};
pub use enumerator::{BindingDecl, Bindings, Builtin, DeclKind, Enumerator, EnumeratorKind, EnumeratorSource};
pub use output::{Destination, Encoding, OutputSink};
pub use pattern::{parse, Pattern, Token};
pub use wordlist::WordList;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
