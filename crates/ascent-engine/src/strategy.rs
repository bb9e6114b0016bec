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

use std::cmp::Ordering;

/// Generates a new solution "nearby" the current one in the search space.
///
/// Implementations must not mutate the input (enforced by `&S`) and must
/// terminate. Any randomness lives inside the implementation; the engine
/// never owns a random source of its own, so a deterministic neighborhood
/// yields a deterministic search.
pub trait Neighborhood<S> {
    fn name(&self) -> &str;
    fn neighbor(&mut self, current: &S) -> S;
}

impl<'a, S> std::fmt::Display for (dyn Neighborhood<S> + 'a) {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Computes a scalar quality score for a solution.
///
/// May be arbitrarily expensive (e.g. drive a simulated episode to
/// completion); the engine treats it as a black box, never caches results,
/// and calls it exactly once per generated solution.
pub trait Evaluator<S, F> {
    fn name(&self) -> &str;
    fn evaluate(&mut self, solution: &S) -> F;
}

impl<'a, S, F> std::fmt::Display for (dyn Evaluator<S, F> + 'a) {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Strict "is-better-than" ordering over fitness values.
///
/// `is_better(a, b)` must hold iff `a` is strictly preferable to `b`, and
/// the relation must be a strict weak ordering (irreflexive, transitive).
/// Violating that makes best-tracking look nondeterministic but never
/// corrupts engine state across calls.
pub trait Comparator<F> {
    fn name(&self) -> &str;
    fn is_better(&self, a: &F, b: &F) -> bool;
}

impl<'a, F> std::fmt::Display for (dyn Comparator<F> + 'a) {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decides whether the walk moves to a newly generated neighbor.
///
/// `accept(candidate, current)` receives the candidate's fitness first.
/// The acceptor is deliberately independent of [`Comparator`]: supplying a
/// policy that sometimes accepts candidates the comparator considers worse
/// is the supported way to escape local optima (annealing-style walks).
/// [`GreedyAcceptor`] covers the plain hill-climbing case.
pub trait Acceptor<F> {
    fn name(&self) -> &str;
    fn accept(&mut self, candidate: &F, current: &F) -> bool;
}

impl<'a, F> std::fmt::Display for (dyn Acceptor<F> + 'a) {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Higher-is-better comparator for any partially ordered fitness.
/// Incomparable values (e.g. NaN) are neither better nor worse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Maximize;

impl<F: PartialOrd> Comparator<F> for Maximize {
    fn name(&self) -> &str {
        "Maximize"
    }
    fn is_better(&self, a: &F, b: &F) -> bool {
        matches!(a.partial_cmp(b), Some(Ordering::Greater))
    }
}

/// Lower-is-better comparator for any partially ordered fitness.
/// Incomparable values (e.g. NaN) are neither better nor worse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Minimize;

impl<F: PartialOrd> Comparator<F> for Minimize {
    fn name(&self) -> &str {
        "Minimize"
    }
    fn is_better(&self, a: &F, b: &F) -> bool {
        matches!(a.partial_cmp(b), Some(Ordering::Less))
    }
}

/// Pure hill-climbing acceptance: move exactly when the wrapped comparator
/// says the candidate is strictly better than the current fitness.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyAcceptor<C> {
    comparator: C,
}

impl<C> GreedyAcceptor<C> {
    #[inline]
    pub fn new(comparator: C) -> Self {
        Self { comparator }
    }
}

impl<F, C> Acceptor<F> for GreedyAcceptor<C>
where
    C: Comparator<F>,
{
    fn name(&self) -> &str {
        "GreedyAcceptor"
    }
    fn accept(&mut self, candidate: &F, current: &F) -> bool {
        self.comparator.is_better(candidate, current)
    }
}

/// Unconditional acceptance: the walk moves to every neighbor (a random
/// walk when the neighborhood is randomized). Best-in-run tracking still
/// never regresses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlwaysAccept;

impl<F> Acceptor<F> for AlwaysAccept {
    fn name(&self) -> &str {
        "AlwaysAccept"
    }
    fn accept(&mut self, _candidate: &F, _current: &F) -> bool {
        true
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximize_prefers_strictly_greater() {
        let cmp = Maximize;
        assert!(cmp.is_better(&2.0, &1.0));
        assert!(!cmp.is_better(&1.0, &2.0));
        assert!(!cmp.is_better(&1.0, &1.0));
    }

    #[test]
    fn minimize_prefers_strictly_smaller() {
        let cmp = Minimize;
        assert!(cmp.is_better(&1.0, &2.0));
        assert!(!cmp.is_better(&2.0, &1.0));
        assert!(!cmp.is_better(&2.0, &2.0));
    }

    #[test]
    fn incomparable_fitness_is_neither_better_nor_worse() {
        let max = Maximize;
        let min = Minimize;
        assert!(!max.is_better(&f64::NAN, &1.0));
        assert!(!max.is_better(&1.0, &f64::NAN));
        assert!(!min.is_better(&f64::NAN, &1.0));
        assert!(!min.is_better(&1.0, &f64::NAN));
    }

    #[test]
    fn greedy_acceptor_mirrors_its_comparator() {
        let mut acc = GreedyAcceptor::new(Maximize);
        assert!(acc.accept(&3.0, &2.0));
        assert!(!acc.accept(&2.0, &3.0));
        assert!(!acc.accept(&2.0, &2.0));
    }

    #[test]
    fn always_accept_takes_worse_moves() {
        let mut acc = AlwaysAccept;
        assert!(acc.accept(&-10.0, &10.0));
        assert!(acc.accept(&10.0, &-10.0));
    }

    #[test]
    fn trait_objects_display_their_name() {
        let cmp: &dyn Comparator<f64> = &Maximize;
        assert_eq!(format!("{}", cmp), "Maximize");
        let acc = GreedyAcceptor::new(Minimize);
        let acc: &dyn Acceptor<f64> = &acc;
        assert_eq!(format!("{}", acc), "GreedyAcceptor");
    }
}
