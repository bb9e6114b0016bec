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

//! Generic stochastic local-search optimization engine.
//!
//! Hill climbing with multi-start and pluggable policies: the search-space
//! representation, neighbor generation, fitness evaluation, "better-than"
//! ordering, and move acceptance are all injected by the caller through
//! the [`strategy`] traits. The [`driver`] executes one budgeted run, the
//! [`engine`] repeats it across independent starts and reduces the per-run
//! bests into a single global best.
//!
//! The engine is single-threaded, synchronous, and holds no random state
//! of its own: with deterministic strategies a search is fully repeatable.

pub mod driver;
pub mod engine;
pub mod err;
pub mod report;
pub mod strategy;

pub mod prelude {
    pub use crate::driver::{Driver, RunOutcome, RunTermination};
    pub use crate::engine::{OptimizeParams, SearchEngine};
    pub use crate::err::{InvalidRunCountError, OptimizeError};
    pub use crate::report::SearchReport;
    pub use crate::strategy::{
        Acceptor, AlwaysAccept, Comparator, Evaluator, GreedyAcceptor, Maximize, Minimize,
        Neighborhood,
    };
}
