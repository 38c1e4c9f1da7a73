use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;

use gridfill::errors::ParseError;
use gridfill::puzzle::Puzzle;
use gridfill::render::FilledGrid;
use gridfill::solver::{SolveStatus, Solver, SolverConfig};
use gridfill::word_list::WordList;

/// Fill a crossword grid with words from a word list
#[derive(Parser, Debug)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
struct Cli {
    /// Grid structure file: one line per row, '_' for open cells, anything else for blocks
    structure: PathBuf,

    /// Word list file (word or word;score per line)
    words: PathBuf,

    /// Also write the filled grid to this file
    output: Option<PathBuf>,

    /// Minimum score filter (entries without a score are always kept)
    #[arg(short = 'm', long, default_value_t = 0)]
    min_score: i32,

    /// Propagate every placement with AC-3 while searching
    #[arg(short, long)]
    inference: bool,

    /// Give up searching after this many seconds
    #[arg(short, long)]
    time_limit: Option<f64>,
}

/// Entry point of the gridfill CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("GRIDFILL_DEBUG").is_ok();
    gridfill::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        let parse_err = e
            .downcast_ref::<ParseError>()
            .or_else(|| e.downcast_ref::<std::io::Error>().and_then(ParseError::from_io));
        if let Some(parse_err) = parse_err {
            eprintln!("Error: {}", parse_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the gridfill CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load the structure and the word list from disk.
/// 3. Solve.
/// 4. Print the filled grid (or "No solution.") on stdout, and save it if asked.
/// 5. Print timings and counts on stderr.
///
/// An unsatisfiable puzzle is a normal result, not an error.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let time_limit = cli.time_limit.map(Duration::try_from_secs_f64).transpose()?;

    // 1. Load inputs
    let t_load = Instant::now();
    let puzzle = Puzzle::load_from_path(&cli.structure)?;
    let word_list = WordList::load_from_path(&cli.words, cli.min_score)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    log::info!(
        "Loaded a {}x{} grid with {} slots and {} words",
        puzzle.height(),
        puzzle.width(),
        puzzle.len(),
        word_list.len()
    );

    // 2. Solve
    let words_ref = word_list.as_strs();
    let solver = Solver::new(&puzzle, &words_ref);
    let config = SolverConfig { inference: cli.inference, time_limit };

    let t_solve = Instant::now();
    let report = solver.solve_with_report(&config);
    let solve_secs = t_solve.elapsed().as_secs_f64();

    // 3. Print the result on stdout
    if let Some(assignment) = &report.assignment {
        let grid = FilledGrid::new(&puzzle, assignment).to_string();
        print!("{grid}");
        if let Some(path) = &cli.output {
            fs::write(path, &grid).map_err(|e| {
                let msg = format!("failed to write '{}': {}", path.display(), e);
                std::io::Error::new(e.kind(), msg)
            })?;
            eprintln!("✓ Wrote grid to {}", path.display());
        }
    } else {
        println!("No solution.");
    }

    match &report.status {
        SolveStatus::Solved => eprintln!("✓ Filled all {} slots", puzzle.len()),
        SolveStatus::TimedOut { elapsed } => {
            eprintln!(
                "⚠️  Timed out after {:.1}s; a solution may still exist",
                elapsed.as_secs_f64()
            );
        }
        SolveStatus::Unsatisfiable { stage } => {
            eprintln!("✓ Proved unsatisfiable during {stage}");
        }
    }

    // 4. Print diagnostics to stderr
    eprintln!(
        "Loaded {} words in {:.3}s; solved in {:.3}s ({} states, {} backtracks).",
        word_list.len(),
        load_secs,
        solve_secs,
        report.stats.states_visited,
        report.stats.backtracks
    );

    Ok(())
}
