//! Output sink: receives generated words and writes them to a destination

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Encoding;
use crate::error::{Result, WordlistError};

/// Where generated words go
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// Collect words and hand them back to the caller
    #[default]
    Memory,
    /// Write to standard output
    Stdout,
    /// Write to a file (created or truncated)
    File(PathBuf),
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Memory => write!(f, "memory"),
            Destination::Stdout => write!(f, "stdout"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

enum SinkTarget {
    Writer {
        writer: BufWriter<Box<dyn Write>>,
        path: Option<PathBuf>,
    },
    Memory(Vec<String>),
}

/// Appends `word + delimiter` for every word it receives.
///
/// Buffered writers are flushed by [`OutputSink::finish`]; if the sink is
/// dropped on an error path the `BufWriter` flushes whatever it holds.
pub struct OutputSink {
    target: SinkTarget,
    delimiter: String,
    encoding: Encoding,
    written: u64,
}

impl OutputSink {
    /// Open a sink for the given destination
    pub fn open(destination: &Destination, delimiter: &str, encoding: Encoding) -> Result<Self> {
        // Fail early on delimiters the encoding cannot carry
        encoding.encode(delimiter)?;

        let target = match destination {
            Destination::Memory => SinkTarget::Memory(Vec::new()),
            Destination::Stdout => SinkTarget::Writer {
                writer: BufWriter::new(Box::new(std::io::stdout())),
                path: None,
            },
            Destination::File(path) => SinkTarget::Writer {
                writer: BufWriter::new(Box::new(create_file(path)?)),
                path: Some(path.clone()),
            },
        };

        Ok(Self {
            target,
            delimiter: delimiter.to_string(),
            encoding,
            written: 0,
        })
    }

    /// Sink over an arbitrary writer
    pub fn from_writer(writer: Box<dyn Write>, delimiter: &str, encoding: Encoding) -> Result<Self> {
        encoding.encode(delimiter)?;
        Ok(Self {
            target: SinkTarget::Writer {
                writer: BufWriter::new(writer),
                path: None,
            },
            delimiter: delimiter.to_string(),
            encoding,
            written: 0,
        })
    }

    /// Append one word followed by the delimiter
    pub fn write_word(&mut self, word: &str) -> Result<()> {
        match &mut self.target {
            SinkTarget::Memory(words) => words.push(word.to_string()),
            SinkTarget::Writer { writer, path } => {
                let bytes = self.encoding.encode(word)?;
                let delimiter = self.encoding.encode(&self.delimiter)?;
                writer
                    .write_all(&bytes)
                    .and_then(|_| writer.write_all(&delimiter))
                    .map_err(|e| io_error(e, path.as_deref()))?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Number of words written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and close; returns the collected words for memory sinks
    pub fn finish(self) -> Result<Option<Vec<String>>> {
        match self.target {
            SinkTarget::Memory(words) => Ok(Some(words)),
            SinkTarget::Writer { mut writer, path } => {
                writer.flush().map_err(|e| io_error(e, path.as_deref()))?;
                Ok(None)
            }
        }
    }
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| io_error(e, Some(path)))
}

fn io_error(err: std::io::Error, path: Option<&Path>) -> WordlistError {
    WordlistError::io(err.to_string(), path.map(|p| p.to_string_lossy().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_memory_sink_collects_words() {
        let mut sink = OutputSink::open(&Destination::Memory, "\n", Encoding::Utf8).unwrap();
        sink.write_word("a1").unwrap();
        sink.write_word("a2").unwrap();
        assert_eq!(sink.written(), 2);
        assert_eq!(sink.finish().unwrap(), Some(vec!["a1".to_string(), "a2".to_string()]));
    }

    #[test]
    fn test_writer_sink_appends_delimiter() {
        let buffer = SharedBuffer::default();
        let mut sink = OutputSink::from_writer(Box::new(buffer.clone()), ",", Encoding::Ascii).unwrap();
        sink.write_word("ABC1").unwrap();
        sink.write_word("ABC2").unwrap();
        assert_eq!(sink.finish().unwrap(), None);
        assert_eq!(buffer.0.lock().unwrap().as_slice(), b"ABC1,ABC2,");
    }

    #[test]
    fn test_unencodable_word_is_rejected() {
        let buffer = SharedBuffer::default();
        let mut sink = OutputSink::from_writer(Box::new(buffer), "\n", Encoding::Ascii).unwrap();
        assert!(matches!(
            sink.write_word("\u{e9}t\u{e9}"),
            Err(WordlistError::Encoding { .. })
        ));
    }

    #[test]
    fn test_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut sink = OutputSink::open(&Destination::File(path.clone()), "\n", Encoding::Utf8).unwrap();
        sink.write_word("x").unwrap();
        sink.finish().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x\n");
    }
}
