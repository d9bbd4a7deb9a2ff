//! Input-size and recursion-depth guards.
//!
//! Trace size and recursion depth grow with the input (point count, digit
//! count), so every engine call is bounded up front. A limit that trips fails
//! the whole invocation; traces are never truncated.

use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of points accepted by the closest-pair search.
    pub max_points: usize,
    /// Maximum decimal digit count of either multiplication operand.
    pub max_digits: usize,
    /// Maximum recursion depth (0 = top-level call) either engine may reach.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_points: 100_000,
            max_digits: 1_000,
            max_depth: 64,
        }
    }
}

impl Limits {
    /// No guard at all. Intended for callers that bound input themselves.
    #[allow(dead_code)]
    pub fn unbounded() -> Self {
        Self {
            max_points: usize::MAX,
            max_digits: usize::MAX,
            max_depth: usize::MAX,
        }
    }

    pub fn check_points(&self, actual: usize) -> Result<(), LimitExceeded> {
        check(LimitKind::Points, self.max_points, actual)
    }

    pub fn check_digits(&self, actual: usize) -> Result<(), LimitExceeded> {
        check(LimitKind::Digits, self.max_digits, actual)
    }

    pub fn check_depth(&self, actual: usize) -> Result<(), LimitExceeded> {
        check(LimitKind::RecursionDepth, self.max_depth, actual)
    }
}

fn check(kind: LimitKind, limit: usize, actual: usize) -> Result<(), LimitExceeded> {
    if actual > limit {
        return Err(LimitExceeded {
            kind,
            limit,
            actual,
        });
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitKind {
    Points,
    Digits,
    RecursionDepth,
}

impl LimitKind {
    fn label(&self) -> &'static str {
        match self {
            LimitKind::Points => "point count",
            LimitKind::Digits => "operand digit count",
            LimitKind::RecursionDepth => "recursion depth",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            LimitKind::Points => "send fewer points or raise MAX_POINTS",
            LimitKind::Digits => "use shorter operands or raise MAX_DIGITS",
            LimitKind::RecursionDepth => "shrink the input or raise MAX_RECURSION_DEPTH",
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A limit tripped: carries the actual value, the limit and a remediation hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{kind} exceeded: actual={actual}, limit={limit}; {}", .kind.suggestion())]
pub struct LimitExceeded {
    pub kind: LimitKind,
    pub limit: usize,
    pub actual: usize,
}
