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

use crate::{
    driver::Driver,
    err::{InvalidRunCountError, OptimizeError},
    report::SearchReport,
    strategy::{Acceptor, Comparator, Evaluator, Neighborhood},
};
use std::fmt;

/// Per-call parameters of the multi-run controller.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeParams<F> {
    pub max_steps: u64,
    pub criteria: F,
    pub runs: u32,
}

impl<F> OptimizeParams<F> {
    #[inline]
    pub fn new(max_steps: u64, criteria: F) -> Self {
        Self {
            max_steps,
            criteria,
            runs: 1,
        }
    }

    // Builder-style setters

    #[inline]
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    #[inline]
    pub fn with_criteria(mut self, criteria: F) -> Self {
        self.criteria = criteria;
        self
    }

    #[inline]
    pub fn with_runs(mut self, runs: u32) -> Self {
        self.runs = runs;
        self
    }
}

/// Multi-run local-search controller.
///
/// Constructed once with the four strategies and reused across calls;
/// no state survives a call. Runs execute strictly sequentially: each
/// invokes the producer afresh, hands the initial solution to the
/// single-run [`Driver`], and folds the run's best into the global best
/// via the comparator (the first completed run seeds it unconditionally).
#[derive(Debug)]
pub struct SearchEngine<N, E, C, A> {
    neighborhood: N,
    evaluator: E,
    comparator: C,
    acceptor: A,
}

impl<N, E, C, A> SearchEngine<N, E, C, A> {
    #[inline]
    pub fn new(neighborhood: N, evaluator: E, comparator: C, acceptor: A) -> Self {
        Self {
            neighborhood,
            evaluator,
            comparator,
            acceptor,
        }
    }

    #[inline]
    pub fn neighborhood(&self) -> &N {
        &self.neighborhood
    }

    #[inline]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    #[inline]
    pub fn acceptor(&self) -> &A {
        &self.acceptor
    }

    /// Primary entry point: runs the search and returns the best solution
    /// found across all runs.
    ///
    /// Fails fast with [`OptimizeError::InvalidRunCount`] on `runs = 0`,
    /// before the producer or any strategy function is invoked. Panics
    /// raised by strategy functions propagate unmodified; the in-progress
    /// call's partial results are discarded and the engine stays usable.
    pub fn optimize<S, F, P>(
        &mut self,
        params: &OptimizeParams<F>,
        producer: P,
    ) -> Result<S, OptimizeError>
    where
        S: Clone + fmt::Display,
        F: Clone + fmt::Display,
        N: Neighborhood<S>,
        E: Evaluator<S, F>,
        C: Comparator<F>,
        A: Acceptor<F>,
        P: FnMut() -> S,
    {
        self.optimize_report(params, producer)
            .map(SearchReport::into_solution)
    }

    /// Like [`optimize`](Self::optimize), but returns the full
    /// [`SearchReport`] including the total evaluation count.
    pub fn optimize_report<S, F, P>(
        &mut self,
        params: &OptimizeParams<F>,
        mut producer: P,
    ) -> Result<SearchReport<S, F>, OptimizeError>
    where
        S: Clone + fmt::Display,
        F: Clone + fmt::Display,
        N: Neighborhood<S>,
        E: Evaluator<S, F>,
        C: Comparator<F>,
        A: Acceptor<F>,
        P: FnMut() -> S,
    {
        if params.runs == 0 {
            return Err(InvalidRunCountError.into());
        }

        let mut total_evaluations: u64 = 0;
        let mut global_best: Option<(S, F)> = None;

        for run in 1..=params.runs {
            let initial = producer();
            let outcome = Driver::new(
                &mut self.neighborhood,
                &mut self.evaluator,
                &self.comparator,
                &mut self.acceptor,
            )
            .run(initial, params.max_steps, &params.criteria);

            total_evaluations += outcome.evaluations;
            tracing::info!(
                "run {}/{}: {} after {} step(s), best {} (fitness {})",
                run,
                params.runs,
                outcome.termination,
                outcome.steps,
                outcome.best,
                outcome.best_fitness
            );

            global_best = match global_best {
                None => Some((outcome.best, outcome.best_fitness)),
                Some((best, best_fitness)) => {
                    if self
                        .comparator
                        .is_better(&outcome.best_fitness, &best_fitness)
                    {
                        Some((outcome.best, outcome.best_fitness))
                    } else {
                        Some((best, best_fitness))
                    }
                }
            };
        }

        let (solution, fitness) = global_best.expect("at least one run must have completed");
        Ok(SearchReport::new(solution, fitness, total_evaluations))
    }
}
