//! The routing decision: monolith or new backend
//!
//! A modulo cadence over a monotonic counter gives an exactly-once-per-period
//! selection with no randomness. Repeated runs with the same request sequence
//! divert at the same request indices, which makes the split reproducible
//! and testable. The cost is statistical smoothness under bursty traffic.

use crate::counters::CutoverCounters;
use crate::types::{BackendChoice, MigrationPolicy};

/// Decide which backend serves the next request for `group`.
///
/// With migration disabled (or percent 0) the answer is always the monolith
/// and the counter is left untouched, so re-enabling later resumes a clean
/// cadence. Otherwise the group's counter advances by exactly 1 and every
/// `100 / percent`-th request (integer division) goes to the new backend.
///
/// Percentages that do not evenly divide 100 keep the floor approximation:
/// percent=30 gives period 3, an actual ~33% split. That imprecision is part
/// of the contract.
pub fn decide(
    counters: &CutoverCounters,
    group: &str,
    policy: &MigrationPolicy,
) -> BackendChoice {
    if !policy.enabled || policy.percent == 0 {
        return BackendChoice::Monolith;
    }

    // percent is validated to 0-100 at startup; max(1) keeps an out-of-range
    // value from dividing by zero below
    let period = (100 / policy.percent).max(1) as u64;

    let value = match counters.advance(group) {
        Some(value) => value,
        None => {
            tracing::warn!(group, "Routing decision for unregistered group");
            return BackendChoice::Monolith;
        }
    };

    if value % period == 0 {
        BackendChoice::NewBackend
    } else {
        BackendChoice::Monolith
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_decisions(policy: &MigrationPolicy, n: usize) -> (Vec<BackendChoice>, u64) {
        let counters = CutoverCounters::new(["movies"]);
        let choices = (0..n)
            .map(|_| decide(&counters, "movies", policy))
            .collect();
        (choices, counters.value("movies"))
    }

    #[test]
    fn test_cadence_percent_20() {
        // period = 5: decisions 5, 10, 15, ... go to the new backend
        let policy = MigrationPolicy::live("http://movies:9001", 20);
        let (choices, counter) = run_decisions(&policy, 10);

        for (i, choice) in choices.iter().enumerate() {
            let expected = if (i + 1) % 5 == 0 {
                BackendChoice::NewBackend
            } else {
                BackendChoice::Monolith
            };
            assert_eq!(*choice, expected, "decision {}", i + 1);
        }
        assert_eq!(counter, 10);
    }

    #[test]
    fn test_cadence_percent_100_diverts_everything() {
        let policy = MigrationPolicy::live("http://movies:9001", 100);
        let (choices, _) = run_decisions(&policy, 3);
        assert!(choices.iter().all(|c| *c == BackendChoice::NewBackend));
    }

    #[test]
    fn test_cadence_percent_50_alternates() {
        let policy = MigrationPolicy::live("http://movies:9001", 50);
        let (choices, _) = run_decisions(&policy, 4);
        assert_eq!(
            choices,
            vec![
                BackendChoice::Monolith,
                BackendChoice::NewBackend,
                BackendChoice::Monolith,
                BackendChoice::NewBackend,
            ]
        );
    }

    #[test]
    fn test_floor_division_period() {
        // 30% floors to period 3 - an actual ~33% split, preserved by design
        let policy = MigrationPolicy::live("http://movies:9001", 30);
        let (choices, _) = run_decisions(&policy, 9);
        let diverted = choices
            .iter()
            .filter(|c| **c == BackendChoice::NewBackend)
            .count();
        assert_eq!(diverted, 3);
        assert_eq!(choices[2], BackendChoice::NewBackend);
        assert_eq!(choices[5], BackendChoice::NewBackend);
        assert_eq!(choices[8], BackendChoice::NewBackend);
    }

    #[test]
    fn test_disabled_policy_never_touches_counter() {
        let policy = MigrationPolicy {
            enabled: false,
            percent: 80,
            new_backend_url: Some("http://movies:9001".to_string()),
        };
        let (choices, counter) = run_decisions(&policy, 25);
        assert!(choices.iter().all(|c| *c == BackendChoice::Monolith));
        assert_eq!(counter, 0);
    }

    #[test]
    fn test_percent_zero_never_touches_counter() {
        let policy = MigrationPolicy::live("http://movies:9001", 0);
        let (choices, counter) = run_decisions(&policy, 25);
        assert!(choices.iter().all(|c| *c == BackendChoice::Monolith));
        assert_eq!(counter, 0);
    }

    #[test]
    fn test_counter_isolation_between_groups() {
        let counters = CutoverCounters::new(["movies", "users"]);
        let movies = MigrationPolicy::live("http://movies:9001", 50);
        let users = MigrationPolicy::disabled();

        for _ in 0..6 {
            decide(&counters, "movies", &movies);
            decide(&counters, "users", &users);
        }

        assert_eq!(counters.value("movies"), 6);
        assert_eq!(counters.value("users"), 0);
    }
}
