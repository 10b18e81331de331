//! Test runner and shrink search.
//!
//! The runner drives repeated trials and, on the first failure, walks the
//! failing result tree looking for a smaller input that still fails. The
//! search is greedy and depth-first: at each failing node it descends into
//! the first failing candidate in generation order, discarding the other
//! siblings for good. What it reports is a local minimum, not necessarily
//! the globally smallest failing value.

use std::fmt;

use crate::data::{Config, Seed};
use crate::property::{render_arguments, Property, TestResult};
use crate::tree::Tree;

/// One accepted step in the shrinking progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkStep {
    /// The captured arguments at this step.
    pub arguments: Vec<String>,
    /// The step number (0 = original failure, 1+ = accepted shrinks).
    pub step: usize,
}

/// Outcome of a property run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Every trial passed.
    Passed { tests_run: usize },

    /// A trial failed; shrinking ran to a local minimum.
    Failed {
        /// Zero-based index of the failing trial.
        trial: usize,
        /// Arguments of the originally drawn counterexample.
        original: Vec<String>,
        /// Arguments of the minimal counterexample found.
        minimal: Vec<String>,
        /// The full shrinking progression, step 0 being the original.
        shrink_steps: Vec<ShrinkStep>,
    },
}

impl Report {
    /// Number of accepted shrink steps.
    pub fn shrinks_performed(&self) -> usize {
        match self {
            Report::Passed { .. } => 0,
            Report::Failed { shrink_steps, .. } => shrink_steps.len().saturating_sub(1),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Passed { tests_run } => {
                write!(f, "Success: {tests_run} tests passed.")
            }
            Report::Failed {
                trial,
                original,
                minimal,
                shrink_steps,
            } => {
                writeln!(
                    f,
                    "Fail: at test {trial} with arguments {}.",
                    render_arguments(original)
                )?;
                for step in shrink_steps.iter().skip(1) {
                    writeln!(
                        f,
                        "Shrinking: found smaller arguments {}",
                        render_arguments(&step.arguments)
                    )?;
                }
                write!(
                    f,
                    "Shrinking: gave up at arguments {}",
                    render_arguments(minimal)
                )
            }
        }
    }
}

/// Run up to `config.test_limit` trials of a property from the given seed.
///
/// Each trial splits the run seed and draws once; the first failing trial
/// moves to the shrink search and ends the run. Pure: nothing is printed.
pub fn check(property: &Property, config: &Config, seed: Seed) -> Report {
    let mut seed = seed;
    for trial in 0..config.test_limit {
        let (trial_seed, rest) = seed.split();
        seed = rest;

        let tree = property.run(trial_seed);
        if !tree.value().is_success {
            return shrink_failure(trial, &tree, config);
        }
    }
    Report::Passed {
        tests_run: config.test_limit,
    }
}

/// Greedy first-match descent over a failing result tree.
fn shrink_failure(trial: usize, tree: &Tree<TestResult>, config: &Config) -> Report {
    let original = tree.value().arguments.clone();
    let mut shrink_steps = vec![ShrinkStep {
        arguments: original.clone(),
        step: 0,
    }];

    let mut current = tree.clone();
    let mut accepted = 0;
    while accepted < config.shrink_limit {
        let next = current
            .candidates()
            .iter()
            .find(|candidate| !candidate.value().is_success)
            .cloned();
        match next {
            Some(smaller) => {
                accepted += 1;
                shrink_steps.push(ShrinkStep {
                    arguments: smaller.value().arguments.clone(),
                    step: accepted,
                });
                current = smaller;
            }
            None => break,
        }
    }

    Report::Failed {
        trial,
        original,
        minimal: current.value().arguments.clone(),
        shrink_steps,
    }
}

/// Test a property with the default configuration and a random seed,
/// printing the report.
pub fn test(property: &Property) -> Report {
    test_with_seed(property, Seed::random())
}

/// Test a property from a fixed seed, printing the report. Two calls with
/// the same seed produce the same report.
pub fn test_with_seed(property: &Property, seed: Seed) -> Report {
    let report = check(property, &Config::default(), seed);
    println!("{report}");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::{always, Gen};
    use crate::property::for_all;
    use crate::shrink;
    use crate::tree::Tree;

    /// A property whose single trial always draws the given root value in
    /// `[0, 20]`, checking `value < 4`.
    fn less_than_four_from(root: i64) -> Property {
        Gen::new(move |_seed| {
            Tree::unfold(root, shrink::towards(0, 20)).map(|&v| TestResult {
                is_success: v < 4,
                arguments: vec![format!("{v}")],
            })
        })
    }

    #[test]
    fn test_success_path_runs_all_trials() {
        let property = for_all(always(0), |_| true);
        let report = check(&property, &Config::default(), Seed::from_u64(1));
        assert_eq!(report, Report::Passed { tests_run: 100 });
        assert_eq!(report.shrinks_performed(), 0);
        assert_eq!(report.to_string(), "Success: 100 tests passed.");
    }

    #[test]
    fn test_integer_shrink_convergence_scenario() {
        // Drawn value 8 fails `v < 4`; its candidates are 4, 2, 1, 0. The
        // first candidate 4 still fails, and 4's candidates 2, 1, 0 all
        // pass, so the search bottoms out at 4.
        let report = check(&less_than_four_from(8), &Config::default(), Seed::from_u64(1));
        match report {
            Report::Failed {
                trial,
                original,
                minimal,
                shrink_steps,
            } => {
                assert_eq!(trial, 0);
                assert_eq!(original, vec!["8".to_string()]);
                assert_eq!(minimal, vec!["4".to_string()]);
                assert_eq!(shrink_steps.len(), 2);
                assert_eq!(shrink_steps[0].arguments, vec!["8".to_string()]);
                assert_eq!(shrink_steps[1].arguments, vec!["4".to_string()]);
            }
            other => panic!("expected a failure report, got: {other:?}"),
        }
    }

    #[test]
    fn test_failure_report_rendering() {
        let report = check(&less_than_four_from(8), &Config::default(), Seed::from_u64(1));
        let rendered = report.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Fail: at test 0 with arguments (8).",
                "Shrinking: found smaller arguments (4)",
                "Shrinking: gave up at arguments (4)",
            ]
        );
    }

    #[test]
    fn test_shrink_search_reaches_local_minimum() {
        let property = for_all(Gen::int_between(0, 20).unwrap(), |&v| v < 4);
        let report = check(&property, &Config::default(), Seed::from_u64(7));
        match report {
            Report::Failed { minimal, .. } => {
                let value: i64 = minimal[0].parse().unwrap();
                // Local minima of the greedy descent: a failing value all
                // of whose candidates pass.
                assert!((4..=6).contains(&value), "not a local minimum: {value}");
            }
            other => panic!("expected a failure report, got: {other:?}"),
        }
    }

    #[test]
    fn test_shrink_budget_bounds_descent() {
        let config = Config::default().with_tests(1).with_shrinks(1);
        let report = check(&less_than_four_from(8), &config, Seed::from_u64(1));
        assert_eq!(report.shrinks_performed(), 1);
    }

    #[test]
    fn test_check_is_reproducible() {
        let property = for_all(Gen::int_between(-10, 10).unwrap(), |&v| v < 8);
        let seed = Seed::from_u64(23);
        let config = Config::default();
        assert_eq!(check(&property, &config, seed), check(&property, &config, seed));
    }

    #[test]
    fn test_trial_index_is_reported() {
        // Fails only when the drawn value is negative; the failing trial
        // index must point at the first such draw.
        let property = for_all(Gen::int_between(-10, 10).unwrap(), |&v| v >= 0);
        if let Report::Failed { trial, .. } =
            check(&property, &Config::default(), Seed::from_u64(2))
        {
            assert!(trial < 100);
        } else {
            panic!("a half-negative range should fail within 100 trials");
        }
    }
}
