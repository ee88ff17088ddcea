//! Step-halving bisection driven by a direction oracle.
//!
//! Both merge searches share the same schedule: start at the midpoint of the
//! bracket with a step equal to the half-width, let each trial say which way
//! the parameter must move, halve the step and move. The search ends once the
//! step magnitude drops below the tolerance. Trials never see the step; they
//! only report a direction, which keeps the direction logic of each search
//! testable on its own.

/// Which way the parameter must move after a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Decrease,
    Increase,
}

/// Outcome of evaluating one trial value.
#[derive(Debug, Clone)]
pub enum Verdict<T> {
    /// Trial was evaluated; keep `record` as the most recent result.
    Evaluated { direction: Direction, record: T },
    /// Trial was evaluated but produced nothing worth keeping.
    Moved(Direction),
    /// Trial could not be evaluated; the direction is forced.
    Failed(Direction),
}

/// Bracket, tolerance and iteration cap of one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionSchedule {
    pub lower: f64,
    pub upper: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
}

/// Outcome of a completed search.
#[derive(Debug, Clone)]
pub struct BisectionOutcome<T> {
    /// Last trial value tried.
    pub value: f64,
    /// Most recent record, from whichever trial last produced one.
    pub record: Option<T>,
    /// True when the last trial was `Verdict::Failed`.
    pub last_failed: bool,
    /// True when evaluated trials asked for both directions at least once.
    pub bracketed: bool,
    pub iterations: usize,
}

/// The step never shrank below tolerance within the iteration cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationCapExceeded {
    pub value: f64,
    pub step: f64,
    pub iterations: usize,
}

/// Run the search. `judge` is called once per trial value.
pub fn bisect<T, F>(
    schedule: &BisectionSchedule,
    mut judge: F,
) -> Result<BisectionOutcome<T>, IterationCapExceeded>
where
    F: FnMut(f64) -> Verdict<T>,
{
    let mut next = 0.5 * (schedule.lower + schedule.upper);
    let mut step = schedule.upper - next;
    let mut value = next;

    let mut record = None;
    let mut last_failed = false;
    let mut saw_decrease = false;
    let mut saw_increase = false;
    let mut iterations = 0;

    while step.abs() >= schedule.tolerance {
        if iterations >= schedule.max_iterations {
            return Err(IterationCapExceeded {
                value,
                step,
                iterations,
            });
        }
        iterations += 1;
        value = next;

        let direction = match judge(value) {
            Verdict::Evaluated {
                direction,
                record: r,
            } => {
                record = Some(r);
                last_failed = false;
                note(direction, &mut saw_decrease, &mut saw_increase);
                direction
            }
            Verdict::Moved(direction) => {
                last_failed = false;
                note(direction, &mut saw_decrease, &mut saw_increase);
                direction
            }
            Verdict::Failed(direction) => {
                last_failed = true;
                direction
            }
        };

        step = match direction {
            Direction::Decrease => -step.abs() / 2.0,
            Direction::Increase => step.abs() / 2.0,
        };
        next = value + step;
    }

    Ok(BisectionOutcome {
        value,
        record,
        last_failed,
        bracketed: saw_decrease && saw_increase,
        iterations,
    })
}

fn note(direction: Direction, saw_decrease: &mut bool, saw_increase: &mut bool) {
    match direction {
        Direction::Decrease => *saw_decrease = true,
        Direction::Increase => *saw_increase = true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(tolerance: f64) -> BisectionSchedule {
        BisectionSchedule {
            lower: 0.0,
            upper: 2.0,
            tolerance,
            max_iterations: 200,
        }
    }

    #[test]
    fn finds_square_root_of_two() {
        let out = bisect(&schedule(1e-10), |x| {
            let direction = if x * x > 2.0 {
                Direction::Decrease
            } else {
                Direction::Increase
            };
            Verdict::Evaluated {
                direction,
                record: x,
            }
        })
        .unwrap();
        assert!((out.value - 2f64.sqrt()).abs() < 1e-9);
        assert_eq!(out.record, Some(out.value));
        assert!(out.bracketed);
        assert!(!out.last_failed);
    }

    #[test]
    fn first_trial_is_the_midpoint() {
        let mut seen = Vec::new();
        let _ = bisect::<(), _>(&schedule(0.3), |x| {
            seen.push(x);
            Verdict::Moved(Direction::Decrease)
        })
        .unwrap();
        assert_eq!(seen[0], 1.0);
        assert_eq!(seen[1], 0.5);
    }

    #[test]
    fn one_sided_search_is_not_bracketed() {
        let out = bisect::<(), _>(&schedule(1e-6), |_| Verdict::Moved(Direction::Increase)).unwrap();
        assert!(!out.bracketed);
        assert!(out.value < 2.0 && out.value > 1.99);
    }

    #[test]
    fn keeps_record_from_last_evaluated_trial() {
        let out = bisect(&schedule(1e-3), |x| {
            if x > 1.0 {
                Verdict::Failed(Direction::Decrease)
            } else {
                Verdict::Evaluated {
                    direction: Direction::Increase,
                    record: x,
                }
            }
        })
        .unwrap();
        let kept = out.record.unwrap();
        assert!(kept <= 1.0);
        assert!(kept > 0.99);
        assert!(!out.bracketed, "failed trials do not count as a direction");
    }

    #[test]
    fn reports_cap_instead_of_looping() {
        let tight = BisectionSchedule {
            max_iterations: 5,
            ..schedule(1e-12)
        };
        let err = bisect::<(), _>(&tight, |_| Verdict::Moved(Direction::Decrease)).unwrap_err();
        assert_eq!(err.iterations, 5);
    }

    #[test]
    fn iteration_count_matches_halving_schedule() {
        let s = BisectionSchedule {
            lower: 0.01,
            upper: 1.0,
            tolerance: 1e-4,
            max_iterations: 64,
        };
        let out = bisect::<(), _>(&s, |_| Verdict::Moved(Direction::Decrease)).unwrap();
        // 0.495 halves below 1e-4 after 13 halvings.
        assert_eq!(out.iterations, 13);
    }
}
