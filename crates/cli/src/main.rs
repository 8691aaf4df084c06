mod config;
mod style;

use config::Config;

use std::io::{self, IsTerminal, Read};
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use colored::{control::set_override, Colorize};
use guess_core::dns::NoResolver;
use guess_core::zones::{detect_local_zone, parse_zone};
use guess_core::{GuessError, Guesser, RankOptions, Selection, SystemResolver, TimeZones};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::style::{format_guess, ColoredCalendar};

const LONG_ABOUT: &str = r##"
guess shows every plausible reading of one ambiguous token.

Paste a number, a date or an address and see what it could mean: a byte
count, a UNIX timestamp in seconds, milliseconds, microseconds or
nanoseconds, a date in other time zones, or a host name.

SUPPORTED INPUTS:
  Integers:     byte counts and timestamps at four resolutions
  Byte sizes:   8TiB, 1.5 MB, 512K (binary, decimal and short units)
  Dates:        RFC 3339, RFC 1123, RFC 850, RFC 822, date(1) output,
                2015-09-26 11:29:43 PDT, and zone-less variants
  Addresses:    IPv4 and IPv6, with reverse and forward DNS
  now:          the current instant

EXAMPLES:
  guess 1443346122                     Timestamp or byte count?
  guess '2015-09-26 11:29:43 PDT'      Date in every configured zone
  guess '2015-09-26 11:29:43'          Naive date read in each zone
  guess 8TiB                           Byte breakdown
  guess 192.0.2.1                      Reverse and forward DNS
  guess -u 1443346122                  Include unlikely readings

OUTPUT:
  Guesses are ranked by goodness. Guesses with negative goodness are hidden
  unless -u is given; if nothing else is left they are shown anyway.
  Dates close to now come with a zone table and a calendar.

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting      | CLI flag          | Env var            | Default
  -------------|-------------------|--------------------|---------
  timezones    | -z, --timezones   | GUESS_TIMEZONES    | 7 world zones
  local_zone   | --local-zone      | GUESS_LOCAL_ZONE   | detected
  unlikely     | -u, --unlikely    | GUESS_UNLIKELY     | false
  sort         | --no-sort         |                    | true
  no_color     | -C, --no-color    | GUESS_NO_COLOR     | false
  dns_timeout  | --dns-timeout     | GUESS_DNS_TIMEOUT  | 2

  Config file location: guess --config-path
  Generate default config: guess --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"##;

#[derive(Parser)]
#[command(name = "guess")]
#[command(version)]
#[command(about = "Show every plausible reading of a number, date or address")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// The token to guess
    ///
    /// Read from stdin when omitted and stdin is not a terminal.
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Comma-separated IANA time zones for conversion tables
    #[arg(long, short = 'z', value_name = "LIST")]
    timezones: Option<String>,

    /// Zone used for naive dates and timestamp renderings
    #[arg(long, value_name = "ZONE")]
    local_zone: Option<String>,

    /// Show unlikely guesses (negative goodness) too
    #[arg(long, short = 'u')]
    unlikely: bool,

    /// Keep discovery order instead of sorting by goodness
    #[arg(long)]
    no_sort: bool,

    /// Print goodness and source above each guess
    #[arg(long, short = 's')]
    scores: bool,

    /// Output results as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// Skip reverse and forward DNS lookups
    #[arg(long)]
    no_dns: bool,

    /// DNS lookup timeout in seconds
    #[arg(long, value_name = "SECS")]
    dns_timeout: Option<u64>,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages, -vv shows trace messages.
    /// Useful for understanding why something was or wasn't matched.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the config file path and exit
    #[arg(long)]
    config_path: bool,

    /// Create a default config file and exit
    #[arg(long)]
    config_init: bool,
}

fn main() {
    let cli = Cli::parse();

    // Handle --config-path
    if cli.config_path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => {
                eprintln!(
                    "{}: Cannot determine config directory",
                    "error".red().bold()
                );
                std::process::exit(1);
            }
        }
        return;
    }

    // Handle --config-init
    if cli.config_init {
        match config::init_config() {
            Ok(path) => println!("Created config file: {}", path.display()),
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Initialize tracing based on verbosity level
    let level = match cli.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    // Load config file and merge with CLI args
    // Precedence: CLI args > Environment vars > Config file > Defaults
    let file_config = Config::load();

    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    let input = match cli.input.clone() {
        Some(input) => input,
        None if !io::stdin().is_terminal() => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("{}: Failed to read stdin: {}", "error".red().bold(), e);
                std::process::exit(1);
            }
            buf
        }
        None => String::new(),
    };
    let input = input.trim();
    if input.is_empty() {
        eprintln!("{}: No input provided", "error".red().bold());
        eprintln!("Usage: guess [OPTIONS] <INPUT>");
        std::process::exit(1);
    }

    let no_color = cli.no_color || file_config.no_color() || !io::stdout().is_terminal();
    if no_color {
        set_override(false);
    }

    let zones = match build_zones(&cli, &file_config) {
        Ok(zones) => zones,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    };

    let mut guesser = Guesser::new(zones);
    if cli.no_dns {
        guesser = guesser.with_resolver(NoResolver);
    } else {
        let secs = cli.dns_timeout.unwrap_or_else(|| file_config.dns_timeout());
        tracing::debug!("dns_timeout = {}s", secs);
        guesser = guesser.with_resolver(SystemResolver::new(Duration::from_secs(secs)));
    }
    if !no_color && !cli.json {
        guesser = guesser.with_calendar_style(ColoredCalendar);
    }

    let options = RankOptions {
        sort: !cli.no_sort && file_config.sort(),
        show_unlikely: cli.unlikely || file_config.unlikely(),
    };
    tracing::debug!(?options, "ranking");

    tracing::debug!("Trying to guess {:?}", input);
    match guesser.guess_ranked(input, Utc::now(), options) {
        Ok(selection) if cli.json => print_json(&selection),
        Ok(selection) => print_selection(&selection, cli.scores),
        Err(GuessError::Unclassifiable(_)) => {
            println!("Could not guess anything.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Resolve the zone list and local zone. Precedence: CLI > env > file > default.
fn build_zones(cli: &Cli, file_config: &Config) -> guess_core::Result<TimeZones> {
    let local = match cli.local_zone.clone().or_else(|| file_config.local_zone()) {
        Some(name) => parse_zone(&name)?,
        None => detect_local_zone(),
    };
    let list = cli
        .timezones
        .clone()
        .unwrap_or_else(|| file_config.timezones());
    tracing::debug!(zones = %list, %local, "time zones");
    TimeZones::parse(&list, local)
}

fn print_selection(selection: &Selection, scores: bool) {
    if let Some(note) = selection.note {
        println!("{}", note.yellow());
    }
    for guess in &selection.guesses {
        for line in format_guess(guess, scores) {
            println!("{line}");
        }
    }
}

fn print_json(selection: &Selection) {
    match serde_json::to_string_pretty(selection) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}
