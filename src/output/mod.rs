//! Output side of a run: encodings and the word sink

mod encoding;
mod sink;

pub use encoding::Encoding;
pub use sink::{Destination, OutputSink};
