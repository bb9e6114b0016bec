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

/// A search was requested with `runs = 0`. Rejected at call time, before
/// any strategy function is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidRunCountError;

impl std::fmt::Display for InvalidRunCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "optimize requires at least one run (got 0)")
    }
}

impl std::error::Error for InvalidRunCountError {}

/// Call-level errors of the multi-run controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimizeError {
    InvalidRunCount(InvalidRunCountError),
}

impl std::fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizeError::InvalidRunCount(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for OptimizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptimizeError::InvalidRunCount(e) => Some(e),
        }
    }
}

impl From<InvalidRunCountError> for OptimizeError {
    fn from(e: InvalidRunCountError) -> Self {
        OptimizeError::InvalidRunCount(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(
            InvalidRunCountError.to_string(),
            "optimize requires at least one run (got 0)"
        );
        let e: OptimizeError = InvalidRunCountError.into();
        assert_eq!(e.to_string(), "optimize requires at least one run (got 0)");
    }

    #[test]
    fn optimize_error_exposes_source() {
        let e: OptimizeError = InvalidRunCountError.into();
        assert!(e.source().is_some());
    }
}
