//! The main solver: fill every slot of a puzzle with a word from a word list.
//!
//! A solve runs three phases in order:
//!
//! 1. node consistency drops every candidate of the wrong length;
//! 2. AC-3 drops every candidate with no partner in some crossing slot;
//! 3. backtracking search (see [`crate::search`]) looks for a complete assignment.
//!
//! Either propagation phase can prove the puzzle unsatisfiable before any search happens.
//! "No solution" is an ordinary outcome, never an error.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use gridfill::puzzle::Puzzle;
//! use gridfill::solver::Solver;
//!
//! let puzzle = Puzzle::from_structure("___\n_##\n_##")?;
//! let words = vec!["CAT", "COT", "DOG"];
//! let solver = Solver::new(&puzzle, &words);
//!
//! let assignment = solver.solve().expect("CAT/COT share a first letter");
//! assert!(assignment.is_complete());
//! assert!(assignment.is_consistent(&puzzle));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Checking Solve Status
//!
//! ```
//! use std::time::Duration;
//! use gridfill::puzzle::Puzzle;
//! use gridfill::solver::{SolveStatus, Solver, SolverConfig};
//!
//! let puzzle = Puzzle::from_structure("_____")?;
//! let solver = Solver::new(&puzzle, &["CAT", "DOG"]);
//! let config = SolverConfig { inference: true, time_limit: Some(Duration::from_secs(5)) };
//! let report = solver.solve_with_report(&config);
//!
//! match report.status {
//!     SolveStatus::Solved => println!("Filled the grid"),
//!     SolveStatus::Unsatisfiable { stage } => println!("No solution (found during {stage})"),
//!     SolveStatus::TimedOut { elapsed } => println!("Timed out after {elapsed:?}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::time::Duration;

use instant::Instant;
use log::{debug, info, warn};
use rustc_hash::FxHashSet;

use crate::assignment::Assignment;
use crate::consistency::{ac3, enforce_node_consistency, Propagation};
use crate::domain::DomainStore;
use crate::puzzle::Puzzle;
use crate::search::{SearchEngine, SearchOutcome, SearchStats, TimeBudget};

/// Knobs for a single solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Propagate each tentative value with AC-3 on a snapshot of the domains
    /// (maintaining arc consistency). Off by default.
    pub inference: bool,
    /// Stop searching once this much wall-clock time has passed. `None` searches to the end.
    pub time_limit: Option<Duration>,
}

/// Which phase proved the puzzle unsatisfiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsatisfiableStage {
    /// Some slot has no word of the right length.
    NodeConsistency,
    /// Some slot has no word compatible with a crossing slot.
    ArcConsistency,
    /// The search tried every combination.
    Search,
}

impl Display for UnsatisfiableStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnsatisfiableStage::NodeConsistency => "node consistency",
            UnsatisfiableStage::ArcConsistency => "arc consistency",
            UnsatisfiableStage::Search => "search",
        };
        write!(f, "{s}")
    }
}

/// Status of the solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// A complete, consistent assignment was found.
    Solved,

    /// No assignment exists for this puzzle and word list.
    Unsatisfiable { stage: UnsatisfiableStage },

    /// Solver stopped because the time budget expired. Contains the elapsed time.
    TimedOut { elapsed: Duration },
}

/// Everything a solve produced.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub status: SolveStatus,
    /// Present exactly when `status` is [`SolveStatus::Solved`].
    pub assignment: Option<Assignment>,
    pub stats: SearchStats,
}

impl SolveReport {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }
}

/// A puzzle paired with the words that may fill it.
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    puzzle: &'a Puzzle,
    words: Vec<Rc<str>>,
}

impl<'a> Solver<'a> {
    /// Prepare a solver for `puzzle` over `words`.
    ///
    /// Duplicate words are kept once, at their first position. Words are compared byte by byte
    /// at crossings, so empty words and words with non-ASCII characters are dropped (with a
    /// warning). Case is left alone: `cat` and `CAT` are different words.
    #[must_use]
    pub fn new(puzzle: &'a Puzzle, words: &[&str]) -> Solver<'a> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut rejected = 0usize;
        let mut kept: Vec<Rc<str>> = Vec::with_capacity(words.len());

        for &word in words {
            if word.is_empty() || !word.is_ascii() {
                rejected += 1;
                continue;
            }
            if seen.insert(word) {
                kept.push(Rc::from(word));
            }
        }

        if rejected > 0 {
            warn!("Ignoring {rejected} empty or non-ASCII words");
        }
        debug!("Solver has {} distinct words for {} slots", kept.len(), puzzle.len());

        Solver { puzzle, words: kept }
    }

    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        self.puzzle
    }

    /// The deduplicated word list every domain starts from.
    #[must_use]
    pub fn words(&self) -> &[Rc<str>] {
        &self.words
    }

    /// Fresh domains: every slot may hold any word.
    #[must_use]
    pub fn initial_domains(&self) -> DomainStore {
        DomainStore::initialize(self.puzzle, &self.words)
    }

    /// Solve with the default configuration.
    ///
    /// `None` means the puzzle cannot be filled from this word list; `Some` is a complete
    /// assignment that passes [`Assignment::is_consistent`].
    #[must_use]
    pub fn solve(&self) -> Option<Assignment> {
        self.solve_with_report(&SolverConfig::default()).assignment
    }

    /// Solve and report how it went.
    #[must_use]
    pub fn solve_with_report(&self, config: &SolverConfig) -> SolveReport {
        info!(
            "Solving {} slots with {} words (inference {})",
            self.puzzle.len(),
            self.words.len(),
            if config.inference { "on" } else { "off" }
        );
        let budget = TimeBudget::new(config.time_limit);
        let mut stats = SearchStats::default();
        let mut domains = self.initial_domains();

        // 1. Node consistency
        let phase_start = Instant::now();
        let node = enforce_node_consistency(self.puzzle, &mut domains);
        stats.timings.node_consistency = phase_start.elapsed();
        if let Propagation::Wipeout { slot } = node {
            info!("No word has the length of slot {}", self.puzzle.slot(slot));
            return unsatisfiable(UnsatisfiableStage::NodeConsistency, stats);
        }
        debug!("{} candidates remain after node consistency", domains.total_size());

        // 2. Arc consistency
        let phase_start = Instant::now();
        let arc = ac3(self.puzzle, &mut domains);
        stats.timings.arc_consistency = phase_start.elapsed();
        if let Propagation::Wipeout { slot } = arc {
            info!("No word fits the crossings of slot {}", self.puzzle.slot(slot));
            return unsatisfiable(UnsatisfiableStage::ArcConsistency, stats);
        }
        debug!(
            "{} candidates remain across {} slots after propagation",
            domains.total_size(),
            self.puzzle.len()
        );

        // 3. Search
        let phase_start = Instant::now();
        let mut engine = SearchEngine::new(self.puzzle, config.inference, &budget);
        let (outcome, assignment) = engine.run(&domains);
        stats = SearchStats { timings: stats.timings, ..*engine.stats() };
        stats.timings.search = phase_start.elapsed();

        debug!(
            "search visited {} states with {} backtracks and {} inference wipeouts in {:.3}s",
            stats.states_visited,
            stats.backtracks,
            stats.inference_wipeouts,
            stats.timings.search.as_secs_f64()
        );

        match outcome {
            SearchOutcome::Found => {
                info!("Filled {} slots", assignment.len());
                SolveReport { status: SolveStatus::Solved, assignment: Some(assignment), stats }
            }
            SearchOutcome::Exhausted => {
                info!("Search exhausted every combination");
                unsatisfiable(UnsatisfiableStage::Search, stats)
            }
            SearchOutcome::TimedOut => {
                let elapsed = budget.elapsed();
                warn!("Search timed out after {:.3}s", elapsed.as_secs_f64());
                SolveReport { status: SolveStatus::TimedOut { elapsed }, assignment: None, stats }
            }
        }
    }
}

fn unsatisfiable(stage: UnsatisfiableStage, stats: SearchStats) -> SolveReport {
    SolveReport { status: SolveStatus::Unsatisfiable { stage }, assignment: None, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{Direction, Slot};

    fn inference_on() -> SolverConfig {
        SolverConfig { inference: true, ..SolverConfig::default() }
    }

    #[test]
    fn test_single_slot_scenario() {
        let puzzle = Puzzle::from_slots(1, 3, vec![Slot::new(0, 0, Direction::Across, 3)]).unwrap();
        let solver = Solver::new(&puzzle, &["cat", "dog"]);

        let assignment = solver.solve().unwrap();
        assert!(assignment.is_complete());
        assert!(matches!(assignment.get(0), Some("cat" | "dog")));
    }

    #[test]
    fn test_incompatible_crossing_scenario() {
        let across = Slot::new(0, 0, Direction::Across, 3);
        let down = Slot::new(0, 1, Direction::Down, 3);
        let puzzle = Puzzle::from_slots(3, 3, vec![across.clone(), down.clone()]).unwrap();

        let solver = Solver::new(&puzzle, &["cat", "tap"]);
        let report = solver.solve_with_report(&SolverConfig::default());
        assert_eq!(
            report.status,
            SolveStatus::Unsatisfiable { stage: UnsatisfiableStage::ArcConsistency }
        );
        assert!(report.assignment.is_none());
        assert_eq!(report.stats.states_visited, 0);

        // add a word starting with the shared 'a'
        let solver = Solver::new(&puzzle, &["cat", "tap", "abc"]);
        let assignment = solver.solve().unwrap();
        let down_id = puzzle.slot_id(&down).unwrap();
        let across_id = puzzle.slot_id(&across).unwrap();
        assert_eq!(assignment.get(down_id), Some("abc"));
        assert!(matches!(assignment.get(across_id), Some("cat" | "tap")));
    }

    #[test]
    fn test_length_mismatch_scenario() {
        let puzzle = Puzzle::from_slots(1, 5, vec![Slot::new(0, 0, Direction::Across, 5)]).unwrap();
        let solver = Solver::new(&puzzle, &["cat", "dog", "bird"]);

        let report = solver.solve_with_report(&SolverConfig::default());
        assert_eq!(
            report.status,
            SolveStatus::Unsatisfiable { stage: UnsatisfiableStage::NodeConsistency }
        );
        assert_eq!(report.stats.states_visited, 0);
        assert!(solver.solve().is_none());
    }

    #[test]
    fn test_disconnected_scenario() {
        let puzzle = Puzzle::from_structure("___\n###\n___\n###\n____").unwrap();
        assert_eq!(puzzle.len(), 3);
        assert!(puzzle.arcs().is_empty());

        let solver = Solver::new(&puzzle, &["ONE", "TWO", "FOUR"]);
        let assignment = solver.solve().unwrap();
        assert!(assignment.is_consistent(&puzzle));
        assert_ne!(assignment.get(0), assignment.get(1));
        assert_eq!(assignment.get(2), Some("FOUR"));
    }

    #[test]
    fn test_report_counts_search_work() {
        let puzzle = Puzzle::from_structure("___\n#_#\n___").unwrap();
        let solver = Solver::new(&puzzle, &["ABE", "BOX", "AXE", "COT", "OAK", "TOE", "BOA"]);

        let report = solver.solve_with_report(&SolverConfig::default());
        assert!(report.is_solved());
        assert!(report.stats.states_visited >= 3);
        assert!(report.stats.timings.search >= Duration::ZERO);
    }

    #[test]
    fn test_inference_agrees_with_plain_search() {
        let cases: [(&str, &[&str]); 3] = [
            ("___\n#_#\n___", &["ABE", "BOX", "AXE", "COT", "OAK", "TOE", "BOA"]),
            ("___\n_#_\n___", &["CAT", "COT", "TOT", "TAT", "CAN", "NOT", "TEN"]),
            ("___\n___\n___", &["CAT", "ACE", "TEA", "CAT", "ATE", "TEE"]),
        ];
        for (structure, words) in cases {
            let puzzle = Puzzle::from_structure(structure).unwrap();
            let solver = Solver::new(&puzzle, words);
            let plain = solver.solve_with_report(&SolverConfig::default());
            let inferred = solver.solve_with_report(&inference_on());

            assert_eq!(plain.is_solved(), inferred.is_solved(), "{structure:?}");
            for report in [plain, inferred] {
                if let Some(assignment) = report.assignment {
                    assert!(assignment.is_complete());
                    assert!(assignment.is_consistent(&puzzle));
                }
            }
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn test_empty_word_list() {
            let puzzle = Puzzle::from_structure("___").unwrap();
            let solver = Solver::new(&puzzle, &[]);
            let report = solver.solve_with_report(&SolverConfig::default());
            assert_eq!(
                report.status,
                SolveStatus::Unsatisfiable { stage: UnsatisfiableStage::NodeConsistency }
            );
        }

        #[test]
        fn test_puzzle_without_slots() {
            let puzzle = Puzzle::from_structure("_#_\n#_#").unwrap();
            let solver = Solver::new(&puzzle, &["CAT"]);
            let assignment = solver.solve().unwrap();
            assert!(assignment.is_empty());
            assert!(assignment.is_complete());
        }

        #[test]
        fn test_duplicate_words_count_once() {
            // two unrelated slots need two distinct words; a repeated word does not help
            let puzzle = Puzzle::from_structure("___\n###\n___").unwrap();
            let solver = Solver::new(&puzzle, &["CAT", "CAT", "CAT"]);
            assert_eq!(solver.words().len(), 1);

            let report = solver.solve_with_report(&SolverConfig::default());
            assert_eq!(
                report.status,
                SolveStatus::Unsatisfiable { stage: UnsatisfiableStage::Search }
            );
        }

        #[test]
        fn test_non_ascii_and_empty_words_are_dropped() {
            let puzzle = Puzzle::from_structure("____").unwrap();
            let solver = Solver::new(&puzzle, &["", "café", "CAFE"]);
            let kept: Vec<&str> = solver.words().iter().map(|w| &**w).collect();
            assert_eq!(kept, vec!["CAFE"]);
            assert_eq!(solver.solve().unwrap().get(0), Some("CAFE"));
        }

        #[test]
        fn test_case_sensitivity() {
            // lowercase 'a' does not match uppercase 'A' at a crossing
            let puzzle = Puzzle::from_slots(
                3,
                3,
                vec![Slot::new(0, 0, Direction::Across, 3), Slot::new(0, 1, Direction::Down, 3)],
            )
            .unwrap();
            let solver = Solver::new(&puzzle, &["CAT", "abc"]);
            assert!(solver.solve().is_none());
        }

        #[test]
        fn test_zero_time_limit_times_out() {
            let puzzle = Puzzle::from_structure("___\n#_#\n___").unwrap();
            let solver = Solver::new(&puzzle, &["ABE", "BOX", "AXE", "COT", "OAK", "TOE", "BOA"]);
            let config = SolverConfig { time_limit: Some(Duration::ZERO), ..SolverConfig::default() };

            let report = solver.solve_with_report(&config);
            assert!(matches!(report.status, SolveStatus::TimedOut { .. }));
            assert!(report.assignment.is_none());
        }

        #[test]
        fn test_generous_time_limit_still_solves() {
            let puzzle = Puzzle::from_structure("___\n#_#\n___").unwrap();
            let solver = Solver::new(&puzzle, &["ABE", "BOX", "AXE", "COT", "OAK", "TOE", "BOA"]);
            let config = SolverConfig { time_limit: Some(Duration::from_secs(60)), inference: true };
            assert!(solver.solve_with_report(&config).is_solved());
        }

        #[test]
        fn test_stage_display() {
            assert_eq!(UnsatisfiableStage::NodeConsistency.to_string(), "node consistency");
            assert_eq!(UnsatisfiableStage::ArcConsistency.to_string(), "arc consistency");
            assert_eq!(UnsatisfiableStage::Search.to_string(), "search");
        }
    }
}
