//! # kodu
//!
//! List the files of a project that are worth feeding to a context bundler,
//! a reviewer or an indexer.
//!
//! ## Overview
//!
//! kodu is a thin command-line front end over kodulib. It builds a
//! `DiscoveryOptions` from flags, runs one discovery call and prints the
//! result. Paths are relative to the scanned root and always use `/`.
//!
//! ## Usage
//!
//! ```bash
//! # Sorted list of text files in the current directory
//! kodu .
//!
//! # Most relevant files first, with scores and sizes
//! kodu . --rank
//!
//! # Extra exclusions on top of .gitignore and .koduignore
//! kodu . --exclude "fixtures/" --exclude "*.snap"
//!
//! # Full gitignore semantics, including !pattern re-inclusion
//! kodu . --gitignore-engine
//!
//! # Machine-readable output
//! kodu . --output json
//!
//! # Show how raw patterns are expanded
//! kodu patterns build/ "*.log" README.md
//! ```
//!
//! Subcommand names win over the positional path: to scan a directory named
//! `files` or `patterns`, spell it `./files` or use `kodu files files`.
//!
//! Logging goes to stderr. Set `KODU_LOG` (e.g. `KODU_LOG=debug`) or pass
//! `-v`/`-vv` to see pruned directories and dropped patterns.

use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use kodulib::{
    discover_with_cancel, normalize, CancellationToken, DiscoveryMode, DiscoveryOptions,
    DiscoveryResult, DropReason, KoduError, MatcherKind,
};

/// Add the discovery flags shared by the root command and `files`.
fn discovery_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("path")
            .help("Project root to scan (defaults to current directory)")
            .default_value("."),
    )
    .arg(
        Arg::new("exclude")
            .short('e')
            .long("exclude")
            .action(ArgAction::Append)
            .help("Exclude files matching pattern (can be specified multiple times)"),
    )
    .arg(
        Arg::new("no-gitignore")
            .long("no-gitignore")
            .action(ArgAction::SetTrue)
            .help("Do not read the root .gitignore"),
    )
    .arg(
        Arg::new("no-tool-ignore")
            .long("no-tool-ignore")
            .action(ArgAction::SetTrue)
            .help("Do not read the root .koduignore"),
    )
    .arg(
        Arg::new("no-sniff")
            .long("no-sniff")
            .action(ArgAction::SetTrue)
            .help("Trust file extensions only; never read content to detect binaries"),
    )
    .arg(
        Arg::new("max-size")
            .long("max-size")
            .value_name("BYTES")
            .value_parser(clap::value_parser!(u64))
            .help("Skip files larger than this many bytes [default: 1048576]"),
    )
    .arg(
        Arg::new("hidden")
            .long("hidden")
            .action(ArgAction::SetTrue)
            .help("Include dotfiles and dot-directories"),
    )
    .arg(
        Arg::new("rank")
            .short('r')
            .long("rank")
            .action(ArgAction::SetTrue)
            .help("Order by priority score instead of by path"),
    )
    .arg(
        Arg::new("gitignore-engine")
            .long("gitignore-engine")
            .action(ArgAction::SetTrue)
            .help("Use full gitignore semantics, including !pattern re-inclusion"),
    )
    .arg(
        Arg::new("skipped")
            .long("skipped")
            .action(ArgAction::SetTrue)
            .help("Also report files left out as too large, binary or unreadable"),
    )
    .arg(
        Arg::new("threads")
            .short('j')
            .long("threads")
            .value_parser(clap::value_parser!(usize))
            .help("Cap the number of classification threads"),
    )
    .arg(
        Arg::new("output")
            .short('o')
            .long("output")
            .value_parser(["text", "json"])
            .default_value("text")
            .help("Output format"),
    )
}

/// Build the clap Command structure
fn build_command() -> Command {
    discovery_args(
        Command::new("kodu")
            .version(env!("CARGO_PKG_VERSION"))
            .about("List the text files of a project, honoring ignore files")
            .after_help(
                "A PATH named like a subcommand is read as the subcommand; \
                 write ./files or use `kodu files files` to scan such a directory.",
            ),
    )
    .arg(
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
            .global(true)
            .help("Increase log verbosity (-v info, -vv debug)"),
    )
    .subcommand(discovery_args(
        Command::new("files").about("List discovered files (default command)"),
    ))
    .subcommand(
        Command::new("patterns")
            .about("Show the globs each raw ignore pattern expands to")
            .arg(
                Arg::new("pattern")
                    .required(true)
                    .num_args(1..)
                    .help("Raw patterns, as written in an ignore file"),
            ),
    )
}

/// Install the stderr log subscriber.
///
/// `KODU_LOG` wins over `-v` when set.
fn setup_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_env("KODU_LOG").unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build discovery options from matches
fn build_options(matches: &ArgMatches) -> DiscoveryOptions {
    let mut options = DiscoveryOptions::new()
        .gitignore(!matches.get_flag("no-gitignore"))
        .tool_ignore(!matches.get_flag("no-tool-ignore"))
        .content_sniffing(!matches.get_flag("no-sniff"))
        .include_hidden(matches.get_flag("hidden"))
        .report_skipped(matches.get_flag("skipped"));

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        options = options.exclude_many(excludes);
    }
    if let Some(&bytes) = matches.get_one::<u64>("max-size") {
        options = options.max_file_size(bytes);
    }
    if let Some(&threads) = matches.get_one::<usize>("threads") {
        options = options.threads(threads);
    }
    if matches.get_flag("rank") {
        options = options.mode(DiscoveryMode::Ranking);
    }
    if matches.get_flag("gitignore-engine") {
        options = options.matcher(MatcherKind::Gitignore);
    }

    options
}

/// Handler for the files command
fn files_handler(matches: &ArgMatches, cancel: &CancellationToken) -> anyhow::Result<()> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let options = build_options(matches);

    let result = match discover_with_cancel(path, &options, cancel) {
        Err(KoduError::Cancelled) => bail!("interrupted"),
        other => other.with_context(|| format!("failed to discover files in '{path}'"))?,
    };

    match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_text(&result),
    }

    Ok(())
}

/// Paths on stdout, diagnostics on stderr.
fn print_text(result: &DiscoveryResult) {
    for file in &result.files {
        match file.score {
            Some(score) => println!("{:>4} {:>9}  {}", score, file.size, file.path),
            None => println!("{}", file.path),
        }
    }

    if result.skipped.is_empty() {
        return;
    }

    let dim = Style::new().dim();
    let header = Style::new().bold();
    eprintln!("{}", header.apply_to(format!("Skipped ({} files)", result.skipped.len())));
    for skipped in &result.skipped {
        eprintln!("  {} {}", skipped.path, dim.apply_to(format!("({})", skipped.reason)));
    }
}

/// Handler for the patterns command
fn patterns_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let patterns = matches
        .get_many::<String>("pattern")
        .map(|v| v.map(|s| s.as_str()).collect::<Vec<_>>())
        .unwrap_or_default();

    let bold = Style::new().bold();
    let dim = Style::new().dim();

    for raw in patterns {
        println!("{}", bold.apply_to(raw));
        match normalize(raw) {
            Ok(canonical) => {
                for glob in &canonical.globs {
                    println!("  {glob}");
                }
            }
            Err(dropped) => {
                let reason = match dropped.reason {
                    DropReason::Negated => "dropped: negation needs --gitignore-engine",
                    DropReason::Empty => "dropped: empty pattern",
                };
                println!("  {}", dim.apply_to(reason));
            }
        }
    }

    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    if let Some(("patterns", sub)) = matches.subcommand() {
        return patterns_handler(sub);
    }

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        tracing::warn!("failed to set Ctrl+C handler: {}", e);
    }

    match matches.subcommand() {
        Some(("files", sub)) => files_handler(sub, &cancel),
        _ => files_handler(matches, &cancel),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    setup_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
