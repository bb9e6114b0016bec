// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::strategy::{Acceptor, Comparator, Evaluator, Neighborhood};
use std::fmt;

/// Why a run left its step loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunTermination {
    /// The current fitness beat the criteria before the budget ran out.
    Converged,
    /// All budgeted steps completed without reaching the criteria.
    Exhausted,
}

impl fmt::Display for RunTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunTermination::Converged => write!(f, "Converged"),
            RunTermination::Exhausted => write!(f, "Exhausted"),
        }
    }
}

/// Terminal snapshot of one run: the best pair seen, how many steps were
/// executed and how many evaluator calls they cost (the initial evaluation
/// plus one per generated neighbor).
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome<S, F> {
    pub best: S,
    pub best_fitness: F,
    pub steps: u64,
    pub evaluations: u64,
    pub termination: RunTermination,
}

impl<S, F> fmt::Display for RunOutcome<S, F>
where
    S: fmt::Display,
    F: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RunOutcome(best: {}, best_fitness: {}, steps: {}, evaluations: {}, termination: {})",
            self.best, self.best_fitness, self.steps, self.evaluations, self.termination
        )
    }
}

/// Single-run local-search driver.
///
/// Borrows the four strategies for the duration of one walk:
/// Initializing (one evaluation seeds both current and best-in-run), then
/// up to `max_steps` stepping iterations, each generating one neighbor,
/// evaluating it once, asking the acceptor whether to move, folding the
/// post-move current pair into best-in-run, and finally testing the
/// early-stop criteria. Best-tracking is deliberately decoupled from the
/// move decision: the acceptor may walk to a worse solution, yet the
/// recorded best never regresses.
#[derive(Debug)]
pub struct Driver<'a, N, E, C, A> {
    neighborhood: &'a mut N,
    evaluator: &'a mut E,
    comparator: &'a C,
    acceptor: &'a mut A,
}

impl<'a, N, E, C, A> Driver<'a, N, E, C, A> {
    #[inline]
    pub fn new(
        neighborhood: &'a mut N,
        evaluator: &'a mut E,
        comparator: &'a C,
        acceptor: &'a mut A,
    ) -> Self {
        Self {
            neighborhood,
            evaluator,
            comparator,
            acceptor,
        }
    }

    /// Executes one run from `initial` and returns its terminal snapshot.
    ///
    /// With `max_steps = 0` the initial solution comes back as best-in-run
    /// after a single evaluation and zero generated neighbors. A run
    /// converges as soon as the current fitness is strictly better than
    /// `criteria` under the comparator; remaining steps are not executed.
    pub fn run<S, F>(&mut self, initial: S, max_steps: u64, criteria: &F) -> RunOutcome<S, F>
    where
        S: Clone + fmt::Display,
        F: Clone + fmt::Display,
        N: Neighborhood<S>,
        E: Evaluator<S, F>,
        C: Comparator<F>,
        A: Acceptor<F>,
    {
        let mut current = initial;
        let mut current_fitness = self.evaluator.evaluate(&current);
        let mut evaluations: u64 = 1;

        // Independent copy: acceptance may later discard `current`.
        let mut best = current.clone();
        let mut best_fitness = current_fitness.clone();

        let mut steps: u64 = 0;
        let mut termination = RunTermination::Exhausted;

        while steps < max_steps {
            let candidate = self.neighborhood.neighbor(&current);
            let candidate_fitness = self.evaluator.evaluate(&candidate);
            evaluations += 1;
            steps += 1;

            if self.acceptor.accept(&candidate_fitness, &current_fitness) {
                tracing::trace!(
                    "step {}: moved to {} (fitness {})",
                    steps,
                    candidate,
                    candidate_fitness
                );
                current = candidate;
                current_fitness = candidate_fitness;
            }

            // Post-move bookkeeping, every step: the walk may have wandered
            // to a worse solution, the record must not.
            if self.comparator.is_better(&current_fitness, &best_fitness) {
                tracing::debug!(
                    "step {}: new best-in-run {} (fitness {})",
                    steps,
                    current,
                    current_fitness
                );
                best = current.clone();
                best_fitness = current_fitness.clone();
            }

            if self.comparator.is_better(&current_fitness, criteria) {
                tracing::debug!("step {}: criteria reached, run converged", steps);
                termination = RunTermination::Converged;
                break;
            }
        }

        RunOutcome {
            best,
            best_fitness,
            steps,
            evaluations,
            termination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{AlwaysAccept, GreedyAcceptor, Maximize};

    /// Neighborhood that replays a scripted delta sequence, clamped to
    /// [0, 100]. Panics past the end of the script so overruns are loud.
    struct ScriptedDeltas {
        deltas: Vec<f64>,
        next: usize,
    }

    impl ScriptedDeltas {
        fn new(deltas: Vec<f64>) -> Self {
            Self { deltas, next: 0 }
        }
    }

    impl Neighborhood<f64> for ScriptedDeltas {
        fn name(&self) -> &str {
            "ScriptedDeltas"
        }
        fn neighbor(&mut self, current: &f64) -> f64 {
            let delta = self.deltas[self.next];
            self.next += 1;
            (current + delta).clamp(0.0, 100.0)
        }
    }

    /// Identity evaluator that counts its invocations.
    struct CountingIdentity {
        calls: u64,
    }

    impl CountingIdentity {
        fn new() -> Self {
            Self { calls: 0 }
        }
    }

    impl Evaluator<f64, f64> for CountingIdentity {
        fn name(&self) -> &str {
            "CountingIdentity"
        }
        fn evaluate(&mut self, solution: &f64) -> f64 {
            self.calls += 1;
            *solution
        }
    }

    #[test]
    fn scripted_scenario_tracks_best_through_rejection() {
        // Deltas [+5, +5, -20, +5] from 50: accept 55, accept 60, reject
        // 40, accept 65. Final best must be 65.
        let mut nb = ScriptedDeltas::new(vec![5.0, 5.0, -20.0, 5.0]);
        let mut ev = CountingIdentity::new();
        let cmp = Maximize;
        let mut acc = GreedyAcceptor::new(Maximize);

        let outcome =
            Driver::new(&mut nb, &mut ev, &cmp, &mut acc).run(50.0, 4, &f64::INFINITY);

        assert_eq!(outcome.best, 65.0);
        assert_eq!(outcome.best_fitness, 65.0);
        assert_eq!(outcome.steps, 4);
        assert_eq!(outcome.evaluations, 5); // initial + 4 neighbors
        assert_eq!(outcome.termination, RunTermination::Exhausted);
    }

    #[test]
    fn zero_steps_returns_initial_after_one_evaluation() {
        let mut nb = ScriptedDeltas::new(vec![]); // would panic if consulted
        let mut ev = CountingIdentity::new();
        let cmp = Maximize;
        let mut acc = GreedyAcceptor::new(Maximize);

        let outcome = Driver::new(&mut nb, &mut ev, &cmp, &mut acc).run(50.0, 0, &1_000.0);

        assert_eq!(outcome.best, 50.0);
        assert_eq!(outcome.best_fitness, 50.0);
        assert_eq!(outcome.steps, 0);
        assert_eq!(outcome.evaluations, 1);
        assert_eq!(ev.calls, 1);
        assert_eq!(outcome.termination, RunTermination::Exhausted);
    }

    #[test]
    fn converges_early_and_stops_evaluating() {
        // Criteria 58.0 is beaten at step 2 (current 60); the -20 and +5
        // deltas must never be consumed.
        let mut nb = ScriptedDeltas::new(vec![5.0, 5.0, -20.0, 5.0]);
        let mut ev = CountingIdentity::new();
        let cmp = Maximize;
        let mut acc = GreedyAcceptor::new(Maximize);

        let outcome = Driver::new(&mut nb, &mut ev, &cmp, &mut acc).run(50.0, 4, &58.0);

        assert_eq!(outcome.termination, RunTermination::Converged);
        assert_eq!(outcome.steps, 2);
        assert_eq!(outcome.best, 60.0);
        assert_eq!(ev.calls, 3); // initial + 2 neighbors
        assert_eq!(nb.next, 2);
    }

    #[test]
    fn random_walk_never_regresses_recorded_best() {
        // AlwaysAccept wanders down to 5 but the best must stay at the
        // high-water mark of the walk.
        let mut nb = ScriptedDeltas::new(vec![20.0, -40.0, -20.0, -5.0, 10.0]);
        let mut ev = CountingIdentity::new();
        let cmp = Maximize;
        let mut acc = AlwaysAccept;

        let outcome =
            Driver::new(&mut nb, &mut ev, &cmp, &mut acc).run(50.0, 5, &f64::INFINITY);

        assert_eq!(outcome.best, 70.0);
        assert!(outcome.best_fitness >= 50.0);
        assert_eq!(outcome.termination, RunTermination::Exhausted);
    }

    #[test]
    fn best_in_run_is_monotone_per_step() {
        // Re-run the walk step by step and check the recorded best never
        // gets worse between budgets k and k+1.
        let deltas = vec![7.0, -3.0, 12.0, -30.0, 4.0, 4.0, 4.0];
        let cmp = Maximize;
        let mut previous_best = f64::NEG_INFINITY;

        for budget in 0..=deltas.len() as u64 {
            let mut nb = ScriptedDeltas::new(deltas.clone());
            let mut ev = CountingIdentity::new();
            let mut acc = AlwaysAccept;
            let outcome =
                Driver::new(&mut nb, &mut ev, &cmp, &mut acc).run(50.0, budget, &f64::INFINITY);
            assert!(
                outcome.best_fitness >= previous_best,
                "best regressed at budget {}: {} < {}",
                budget,
                outcome.best_fitness,
                previous_best
            );
            previous_best = outcome.best_fitness;
        }
    }

    #[test]
    fn rejected_moves_leave_current_in_place() {
        // Every candidate is worse and gets rejected; the scripted deltas
        // are all relative to the unchanged initial solution.
        let mut nb = ScriptedDeltas::new(vec![-1.0, -2.0, -3.0]);
        let mut ev = CountingIdentity::new();
        let cmp = Maximize;
        let mut acc = GreedyAcceptor::new(Maximize);

        let outcome =
            Driver::new(&mut nb, &mut ev, &cmp, &mut acc).run(50.0, 3, &f64::INFINITY);

        assert_eq!(outcome.best, 50.0);
        assert_eq!(outcome.evaluations, 4);
        assert_eq!(outcome.termination, RunTermination::Exhausted);
    }

    #[test]
    fn termination_display_names_states() {
        assert_eq!(RunTermination::Converged.to_string(), "Converged");
        assert_eq!(RunTermination::Exhausted.to_string(), "Exhausted");
    }
}
