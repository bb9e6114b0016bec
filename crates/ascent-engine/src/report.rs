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

use std::fmt;

/// Immutable snapshot of a completed multi-run search: the global best
/// solution, its fitness, and the total number of evaluator invocations
/// across all runs (one initial evaluation per run plus one per neighbor
/// step). Constructed once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchReport<S, F> {
    solution: S,
    fitness: F,
    evaluations: u64,
}

impl<S, F> SearchReport<S, F> {
    #[inline]
    pub const fn new(solution: S, fitness: F, evaluations: u64) -> Self {
        Self {
            solution,
            fitness,
            evaluations,
        }
    }

    #[inline]
    pub fn solution(&self) -> &S {
        &self.solution
    }

    #[inline]
    pub fn fitness(&self) -> &F {
        &self.fitness
    }

    #[inline]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    #[inline]
    pub fn into_solution(self) -> S {
        self.solution
    }

    #[inline]
    pub fn into_parts(self) -> (S, F, u64) {
        (self.solution, self.fitness, self.evaluations)
    }
}

impl<S, F> fmt::Display for SearchReport<S, F>
where
    S: fmt::Display,
    F: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchReport(solution: {}, fitness: {}, evaluations: {})",
            self.solution, self.fitness, self.evaluations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_constructed_values() {
        let report = SearchReport::new(65.0_f64, 65.0_f64, 5);
        assert_eq!(*report.solution(), 65.0);
        assert_eq!(*report.fitness(), 65.0);
        assert_eq!(report.evaluations(), 5);
    }

    #[test]
    fn into_parts_round_trips() {
        let report = SearchReport::new("solution".to_string(), 1.5_f64, 42);
        let (s, f, e) = report.into_parts();
        assert_eq!(s, "solution");
        assert_eq!(f, 1.5);
        assert_eq!(e, 42);
    }

    #[test]
    fn display_contains_all_fields() {
        let report = SearchReport::new(65, 65, 5);
        let s = report.to_string();
        assert!(s.contains("solution: 65"));
        assert!(s.contains("fitness: 65"));
        assert!(s.contains("evaluations: 5"));
    }
}
