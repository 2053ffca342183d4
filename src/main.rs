//! Snake Cube Solver
//!
//! Folds a chain of unit cubes, joined by straight and elbow hinges, into a
//! solid cube. By default the classic 27-cube chain is folded into a 3x3x3
//! cube and the first folding found is printed.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use snake_cube::grid::{format_folding, format_layers};
use snake_cube::{
    persistence, solve_all, solve_first, symmetry, ChainSpec, FoldError, Position, SearchConfig,
};

/// Finds the foldings of a snake cube chain.
#[derive(Parser)]
#[command(name = "snake-cube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Hinge sequence, one symbol per cube: E = end, S = straight, L = elbow.
    #[arg(long, global = true, default_value_t = ChainSpec::standard())]
    chain: ChainSpec,

    /// Side length of the cube to fold into.
    #[arg(long, global = true, default_value_t = 3, value_parser = clap::value_parser!(i32).range(1..))]
    side: i32,

    /// Directory holding saved foldings.
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Log the reason every pruned branch was rejected.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Find and print the first folding.
    First,
    /// Find every folding, print them and save them to disk.
    All,
    /// Show the number of saved foldings.
    Count,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = SearchConfig {
        side: cli.side,
        ..SearchConfig::default()
    };

    let result = match cli.command.unwrap_or(Command::First) {
        Command::First => run_first(&cli.chain, config),
        Command::All => run_all(&cli.chain, config, &cli.dir),
        Command::Count => {
            run_count(&cli.dir);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("search failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `-v` lowers the default level to debug, `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Formats an accepted folding for the console.
fn render_solution(folding: &[Position]) -> String {
    format!(
        "Solution found:\n{}{}",
        format_folding(folding),
        format_layers(folding)
    )
}

/// Prints the first folding, or reports that none exists.
fn run_first(chain: &ChainSpec, config: SearchConfig) -> Result<(), FoldError> {
    match solve_first(chain, config)? {
        Some(solution) => print!("{}", render_solution(solution.sequence())),
        None => println!("No solution found."),
    }
    Ok(())
}

/// Prints every folding and saves them to `dir`.
fn run_all(chain: &ChainSpec, config: SearchConfig, dir: &Path) -> Result<(), FoldError> {
    let foldings = solve_all(chain, config)?;
    if foldings.is_empty() {
        println!("No solution found.");
        return Ok(());
    }

    for (i, folding) in foldings.iter().enumerate() {
        println!("Solution {}:", i + 1);
        print!("{}", format_folding(folding));
        println!();
    }

    let distinct = symmetry::distinct_foldings(&foldings);
    println!(
        "Found {} foldings, {} distinct up to rotation and reflection",
        foldings.len(),
        distinct.len()
    );

    if let Err(e) = persistence::save(dir, &foldings) {
        log::error!("failed to save foldings: {e}");
    } else {
        println!(
            "Wrote {} and {}",
            persistence::FOLDINGS_TXT,
            persistence::FOLDINGS_BIN
        );
    }
    Ok(())
}

/// Prints the count of saved foldings.
fn run_count(dir: &Path) {
    match persistence::count(dir) {
        Some(count) => println!("{count} foldings"),
        None => log::error!(
            "no {} found in {}; run 'snake-cube all' first",
            persistence::FOLDINGS_BIN,
            dir.display()
        ),
    }
}
