//! Wordlist Forge - build custom wordlists for brute-force testing
//!
//! Expands a pattern such as `ABC%(a){2}` with built-in character sets,
//! custom enumerators and wordlist files.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use wordlist_forge::{
    logging, BindingDecl, Bindings, DeclKind, Destination, GenerationLimits, RunConfig, RunOutcome,
    WordList, WordlistError,
};

#[derive(Parser, Debug)]
#[command(name = "wordlist-forge", version, about = "Build custom wordlists from patterns")]
struct Cli {
    /// Pattern to expand, e.g. 'admin%(digits){4}'
    #[arg(short = 'p', long)]
    pattern: String,

    /// Enumerators: name=chars, name=[a-z], name=(one|two), name=%(digits)
    #[arg(short = 'e', long = "patterns-enumerator", value_name = "DECL", num_args = 1..)]
    enumerators: Vec<String>,

    /// Wordlist files: name=path (one value per line)
    #[arg(short = 'w', long = "wordlists", value_name = "DECL", num_args = 1..)]
    wordlists: Vec<String>,

    /// Encoding for wordlist files and output (utf-8, ascii, latin-1)
    #[arg(short = 'E', long)]
    encoding: Option<String>,

    /// Stop after this many words
    #[arg(short = 'm', long, allow_hyphen_values = true)]
    max_words: Option<String>,

    /// Stop after this many seconds
    #[arg(short = 't', long, allow_hyphen_values = true)]
    max_time: Option<String>,

    /// Written after every word (escapes: \n \r \t \0 \\)
    #[arg(short = 'd', long)]
    delimiter: Option<String>,

    /// File to save the wordlist (default is stdout)
    #[arg(short = 'f', long)]
    filename: Option<PathBuf>,

    /// Print the number of combinations and exit
    #[arg(long, default_value_t = false)]
    count: bool,

    /// Show a progress bar on stderr while writing to a file
    #[arg(long, default_value_t = false)]
    progress: bool,

    /// Print a JSON run summary on stderr
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// More log output (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, default_value_t = false)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = wordlist_forge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }
    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("{}", e.user_message());
    }

    if let Err(e) = run(cli) {
        match e.downcast_ref::<WordlistError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;
    let bindings = build_bindings(&cli, &config)?;
    let wordlist = WordList::new(config, bindings);

    if cli.count {
        match wordlist.count(&cli.pattern)? {
            Some(total) => println!("{}", total),
            None => println!("more than {}", u64::MAX),
        }
        return Ok(());
    }

    let to_file = matches!(wordlist.config().destination, Destination::File(_));
    let outcome = if cli.progress && to_file {
        run_with_bar(&wordlist, &cli.pattern)?
    } else {
        wordlist.run(&cli.pattern)?
    };

    if cli.summary {
        let json = serde_json::to_string_pretty(&outcome.summary).context("serializing run summary")?;
        eprintln!("{}", json);
    }

    Ok(())
}

/// Environment defaults with command line overrides
fn build_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let mut config = RunConfig::from_env()?;

    if let Some(encoding) = &cli.encoding {
        config.encoding = encoding.parse()?;
    }
    if let Some(delimiter) = &cli.delimiter {
        config.delimiter = unescape(delimiter);
    }
    match &cli.filename {
        Some(path) => config.destination = Destination::File(path.clone()),
        None if config.destination == Destination::Memory => config.destination = Destination::Stdout,
        None => {}
    }

    let overrides = GenerationLimits::parse(cli.max_words.as_deref(), cli.max_time.as_deref())?;
    if cli.max_words.is_some() {
        config.limits.max_words = overrides.max_words;
    }
    if cli.max_time.is_some() {
        config.limits.max_time_seconds = overrides.max_time_seconds;
    }

    Ok(config)
}

fn build_bindings(cli: &Cli, config: &RunConfig) -> Result<Bindings, WordlistError> {
    let mut bindings = Bindings::new();

    let decls = cli
        .enumerators
        .iter()
        .map(|arg| (arg, DeclKind::Enumerator))
        .chain(cli.wordlists.iter().map(|arg| (arg, DeclKind::Wordlist)));

    for (arg, kind) in decls {
        let decl = BindingDecl::parse(arg, kind)?;
        bindings.declare_decl(&decl, config.encoding)?;
    }

    Ok(bindings)
}

fn run_with_bar(wordlist: &WordList, pattern: &str) -> anyhow::Result<RunOutcome> {
    let bar = match wordlist.count(pattern)? {
        Some(total) => {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::with_template("{bar:40} {pos}/{len} words ({per_sec}, eta {eta})")
                    .context("building progress style")?,
            );
            bar
        }
        None => ProgressBar::new_spinner(),
    };

    let outcome = wordlist.run_with_progress(pattern, |progress| bar.set_position(progress.emitted));
    bar.finish_and_clear();
    Ok(outcome?)
}

/// Expand backslash escapes in a delimiter argument
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(","), ",");
        assert_eq!(unescape("\\n"), "\n");
        assert_eq!(unescape("a\\tb"), "a\tb");
        assert_eq!(unescape("\\x"), "\\x");
        assert_eq!(unescape("end\\"), "end\\");
    }

    #[test]
    fn test_cli_parses_original_flags() {
        let cli = Cli::try_parse_from([
            "wordlist-forge", "-e", "a=[1-3]", "b=xyz", "-w", "c=list.txt", "-m", "5", "-p", "ABC%(a){2}",
        ])
        .unwrap();
        assert_eq!(cli.enumerators, vec!["a=[1-3]", "b=xyz"]);
        assert_eq!(cli.wordlists, vec!["c=list.txt"]);
        assert_eq!(cli.max_words.as_deref(), Some("5"));
        assert_eq!(cli.pattern, "ABC%(a){2}");
    }
}
