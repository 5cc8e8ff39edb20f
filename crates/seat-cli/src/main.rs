//! Seat Finder CLI
//!
//! Command-line tool for looking up seat assignments and table statistics.

use clap::{Parser, Subcommand};
use seat_core::{
    export_roster, merge_sources_with_report, parse_line, ExportFormat, QueryOutcome, Seat,
    SeatDraft, SeatFinder, SeatingConfig, TableStat,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "seat-cli")]
#[command(about = "Seat assignment lookup", long_about = None)]
#[command(version)]
struct Cli {
    /// Primary seating CSV (rows always kept)
    #[arg(long, global = true, requires = "secondary")]
    primary: Option<PathBuf>,

    /// Secondary seating CSV (only new short keys are added)
    #[arg(long, global = true, requires = "primary")]
    secondary: Option<PathBuf>,

    /// Config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log merge and lookup details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up seats by short key or table number
    Search {
        /// Short key, table number, or the statistics query
        query: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show tables grouped by meat/vegetarian headcount
    Stats {
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every seat in the merged roster
    List {
        /// Maximum number of seats to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show how the two sources were merged
    Summary,

    /// Read queries from stdin, one per line
    Interactive,

    /// Export the merged roster to a file
    Export {
        /// Output format (csv or json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Split a single CSV line into fields
    ParseLine {
        /// The line to split
        line: String,
    },

    /// Create a config file template
    CreateConfig {
        /// Output path for the config file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> seat_core::Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Search { query, json } => cmd_search(&config, &query, json),
        Commands::Stats { json } => cmd_stats(&config, json),
        Commands::List { limit } => cmd_list(&config, limit),
        Commands::Summary => cmd_summary(&config),
        Commands::Interactive => cmd_interactive(&config),
        Commands::Export { format, output } => cmd_export(&config, &format, &output),
        Commands::ParseLine { line } => cmd_parse_line(&line),
        Commands::CreateConfig { output } => cmd_create_config(&output),
    }
}

/// Resolve sources: explicit paths win over the config file, which wins
/// over the bundled lists
fn load_config(cli: &Cli) -> seat_core::Result<SeatingConfig> {
    let mut config = match &cli.config {
        Some(path) => SeatingConfig::load(path)?,
        None => SeatingConfig::new(),
    };

    if cli.primary.is_some() || cli.secondary.is_some() {
        config.primary = cli.primary.clone();
        config.secondary = cli.secondary.clone();
    }

    debug!(primary = ?config.primary, secondary = ?config.secondary, "resolved seating sources");
    Ok(config)
}

fn cmd_search(config: &SeatingConfig, query: &str, json: bool) -> seat_core::Result<()> {
    let mut finder = SeatFinder::from_config(config)?;
    let outcome = finder.submit(query);

    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        print_outcome(outcome);
    }

    Ok(())
}

fn cmd_stats(config: &SeatingConfig, json: bool) -> seat_core::Result<()> {
    let mut finder = SeatFinder::from_config(config)?;
    let sentinel = finder.rules().stats_sentinel.clone();
    let stats = finder.submit(&sentinel).statistics();

    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        print_stats(stats);
    }

    Ok(())
}

fn cmd_list(config: &SeatingConfig, limit: Option<usize>) -> seat_core::Result<()> {
    let roster = config.roster()?;

    println!("ID\tTable\tShort key\tName\tNote");
    println!("{}", "-".repeat(60));

    let seat_limit = limit.unwrap_or(roster.len());
    for seat in roster.seats().iter().take(seat_limit) {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            seat.id, seat.table_number, seat.short_key, seat.display_name, seat.dietary_note
        );
    }

    if roster.len() > seat_limit {
        println!("... ({} more seats)", roster.len() - seat_limit);
    }

    Ok(())
}

fn cmd_summary(config: &SeatingConfig) -> seat_core::Result<()> {
    let (primary, secondary) = config.read_sources()?;
    let (roster, report) = merge_sources_with_report(&primary, &secondary);

    println!("Primary rows:       {}", report.primary_count);
    println!("Secondary rows:     {}", report.secondary_count);
    println!("  duplicate keys:   {}", report.duplicates_dropped);
    println!("  without key:      {}", report.unkeyed_dropped);
    println!("  kept:             {}", report.secondary_kept());
    println!();
    println!("Merged seats:       {}", roster.len());

    Ok(())
}

fn cmd_interactive(config: &SeatingConfig) -> seat_core::Result<()> {
    let mut finder = SeatFinder::from_config(config)?;
    println!(
        "Loaded {} seats. Enter a short key or table number ({} for statistics).",
        finder.roster().len(),
        finder.rules().stats_sentinel
    );
    println!("Commands: :add <table>,<short key>,<name>,<note>  :quit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line == ":quit" || line == ":q" {
            break;
        }

        if let Some(fields) = add_command_fields(line) {
            let draft = SeatDraft::from_fields(&parse_line(fields));
            match finder.add_seat(draft) {
                Ok(seat) => println!("Added seat {} at table {}", seat.id, seat.table_number),
                Err(e) => eprintln!("Warning: {}", e),
            }
            continue;
        }

        print_outcome(finder.submit(line));
    }

    Ok(())
}

fn cmd_export(config: &SeatingConfig, format: &str, output: &PathBuf) -> seat_core::Result<()> {
    let format: ExportFormat = format.parse()?;
    let roster = config.roster()?;

    let written = export_roster(roster.seats(), output, format)?;
    println!("Exported {} seats to {}", written, output.display());

    Ok(())
}

fn cmd_parse_line(line: &str) -> seat_core::Result<()> {
    let fields = parse_line(line);

    println!("Fields: {}", fields.len());
    for (i, field) in fields.iter().enumerate() {
        println!("  {}: {:?}", i, field);
    }

    Ok(())
}

fn cmd_create_config(output: &PathBuf) -> seat_core::Result<()> {
    let config = SeatingConfig {
        primary: Some(PathBuf::from("media_seats.csv")),
        secondary: Some(PathBuf::from("ec_seats.csv")),
        ..SeatingConfig::default()
    };

    config.save(output)?;
    println!("Created config file: {}", output.display());
    println!();
    println!("Edit the source paths, then run:");
    println!("  seat-cli --config {} search <query>", output.display());

    Ok(())
}

/// Fields of an `:add` command, or None when the line is not one
fn add_command_fields(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(":add")?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

fn print_outcome(outcome: &QueryOutcome) {
    match outcome {
        QueryOutcome::Matches(seats) => print_matches(seats),
        QueryOutcome::Statistics(stats) => print_stats(stats),
    }
}

fn print_matches(seats: &[Seat]) {
    if seats.is_empty() {
        println!("No matching seats");
        return;
    }

    println!("{} seat(s) found", seats.len());
    for seat in seats {
        println!("{}\t{}\t{}", seat.table_number, seat.short_key, seat.display_name);
    }
}

fn print_stats(stats: &[TableStat]) {
    if stats.is_empty() {
        println!("No seated tables");
        return;
    }

    println!("Table statistics");
    for stat in stats {
        println!(
            "meat {} / veg {}: {}",
            stat.meat_count,
            stat.vegetarian_count,
            stat.tables.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_command_fields() {
        assert_eq!(add_command_fields(":add 3,K1,Kim,"), Some(" 3,K1,Kim,"));
        assert_eq!(add_command_fields(":add"), Some(""));
        assert_eq!(add_command_fields(":address"), None);
        assert_eq!(add_command_fields("A1B2"), None);
    }
}
