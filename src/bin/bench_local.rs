//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for a handful of grids on *your* machine.
//! - Loads the word list once, then solves each grid several times and reports the median.
//! - Every grid is timed with plain search and with inference, so the two are easy to compare.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print the filled grids:         `cargo run --bin bench_local --release -- -p`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - Grids live in `get_cases()` below; file-backed ones are read from `data/`.
//! - Word-list loading and printing are kept outside the timed section.
//! - One warm-up run per case is done (not included in timing).

use std::hint::black_box;
use std::time::{Duration, Instant};

use clap::Parser;
use gridfill::puzzle::Puzzle;
use gridfill::render::FilledGrid;
use gridfill::solver::{SolveReport, SolveStatus, Solver, SolverConfig};
use gridfill::word_list::WordList;

/// Simple local benchmark runner: load the word list once, time several grids.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the word list file (word or word;score per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/words.txt")
    )]
    word_list: String,

    /// Minimum score filter
    #[arg(short = 'm', long, default_value_t = 0)]
    min_score: i32,

    /// Number of repeats per case (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print the filled grid from the last run of each case
    #[arg(short = 'p', long = "print")]
    print_grids: bool,

    /// Per-run time limit in seconds
    #[arg(short = 't', long, default_value_t = 30.0)]
    time_limit: f64,
}

/// Where a case's structure comes from.
#[derive(Clone)]
enum Grid {
    File(&'static str),
    Inline(&'static str),
}

#[derive(Clone)]
struct Case {
    name: &'static str,
    grid: Grid,
}

/// Edit/add new grids here.
fn get_cases() -> Vec<Case> {
    vec![
        Case { name: "structure0", grid: Grid::File("structure0.txt") },
        Case { name: "structure1", grid: Grid::File("structure1.txt") },
        Case { name: "structure2 (3x3 open)", grid: Grid::File("structure2.txt") },
        Case { name: "ring", grid: Grid::Inline("___\n_#_\n___") },
        Case { name: "ladder", grid: Grid::Inline("_____\n_#_#_\n_____\n_#_#_\n_____") },
    ]
}

fn load_case(case: &Case) -> std::io::Result<Puzzle> {
    match case.grid {
        Grid::File(name) => {
            Puzzle::load_from_path(format!("{}/data/{name}", env!("CARGO_MANIFEST_DIR")))
        }
        Grid::Inline(structure) => Ok(Puzzle::from_structure(structure)?),
    }
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

fn status_label(report: &SolveReport) -> &'static str {
    match report.status {
        SolveStatus::Solved => "solved",
        SolveStatus::Unsatisfiable { .. } => "no solution",
        SolveStatus::TimedOut { .. } => "timed out",
    }
}

const MAX_NAME_LEN: usize = 24;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// One row in the benchmark summary: (case name, inference, median seconds, states, status).
    type SummaryRow = (String, bool, f64, u64, &'static str);

    let cli = Cli::parse();
    let time_limit = Duration::try_from_secs_f64(cli.time_limit)?;

    // Load the word list once. This I/O is *not* included in per-case timing.
    eprintln!("Loading word list from: {}", cli.word_list);
    let t_load = Instant::now();
    let wl = WordList::load_from_path(&cli.word_list, cli.min_score)?;
    eprintln!("Loaded {} words in {:.3}s", wl.len(), t_load.elapsed().as_secs_f64());

    let words_ref = wl.as_strs();
    let cases = get_cases();
    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len() * 2);

    for (idx, case) in cases.iter().enumerate() {
        let puzzle = match load_case(case) {
            Ok(puzzle) => puzzle,
            Err(e) => {
                eprintln!("\n[{:02}] {}: ✗ failed to load: {e}", idx + 1, case.name);
                continue;
            }
        };
        let solver = Solver::new(&puzzle, &words_ref);

        for inference in [false, true] {
            let config = SolverConfig { inference, time_limit: Some(time_limit) };
            eprintln!(
                "\n[{:02}] {} ({} slots, inference={inference})",
                idx + 1,
                case.name,
                puzzle.len()
            );

            // One *warm-up* execution per case; its timing is ignored.
            let _warmup = solver.solve_with_report(&config);

            let mut times = Vec::with_capacity(cli.num_repeats);
            let mut last_report: Option<SolveReport> = None;

            for rep in 0..cli.num_repeats {
                // Keep only the *core* operation inside the timed region.
                let t_solve = Instant::now();
                let report = solver.solve_with_report(black_box(&config));
                let solve_secs = t_solve.elapsed().as_secs_f64();

                eprintln!(
                    "  run {:>2}/{:>2}: {:.3}s ({}, {} states, {} backtracks)",
                    rep + 1,
                    cli.num_repeats,
                    solve_secs,
                    status_label(&report),
                    report.stats.states_visited,
                    report.stats.backtracks
                );
                times.push(solve_secs);
                last_report = Some(report);
            }

            let med = median(times);
            let Some(report) = last_report else {
                continue;
            };

            if cli.print_grids {
                if let Some(assignment) = &report.assignment {
                    print!("{}", FilledGrid::new(&puzzle, assignment));
                }
            }

            eprintln!("  → median {:.3}s over {} run(s)", med, cli.num_repeats);
            summary.push((
                case.name.to_string(),
                inference,
                med,
                report.stats.states_visited,
                status_label(&report),
            ));
        }
    }

    // Compact summary at the end for a quick scan across all cases.
    eprintln!("\n==== Summary ====");
    eprintln!(
        "{:<MAX_NAME_LEN$} | {:>9} | {:>10} | {:>10} | {:>11}",
        "case", "inference", "median (s)", "states", "status"
    );
    eprintln!(
        "{:-<MAX_NAME_LEN$}-+-{:-<9}-+-{:-<10}-+-{:-<10}-+-{:-<11}",
        "", "", "", "", ""
    );
    for (name, inference, med, states, status) in &summary {
        let inference = if *inference { "on" } else { "off" };
        eprintln!("{name:<MAX_NAME_LEN$} | {inference:>9} | {med:>10.3} | {states:>10} | {status:>11}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(median(vec![]), 0.0);
        assert_eq!(median(vec![3.0]), 3.0);
        assert_eq!(median(vec![5.0, 1.0, 3.0]), 3.0);
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_inline_cases_parse() {
        for case in get_cases() {
            if let Grid::Inline(_) = case.grid {
                let puzzle = load_case(&case).unwrap();
                assert!(!puzzle.is_empty(), "{}", case.name);
            }
        }
    }
}
