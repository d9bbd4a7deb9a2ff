//! Closest Pair Engine: divide-and-conquer search with a replayable trace.
//!
//! # Algorithm
//! 1. Sort the input once by x (ties by y, then input order) and once by y.
//! 2. Recurse on a contiguous x-range plus the y-ordered points on its side of
//!    the dividing line:
//!    - ≤ 3 points: brute-force every pair, one `BaseCompare` step per pair.
//!    - otherwise split at `mid = n / 2`; points with `x <= mid.x` go left.
//! 3. Combine: take the better half (right wins ties), then compare each strip
//!    point with the next 6 strip points in y order, one `StripCompare` per pair.
//!
//! # Trace ordering
//! A call's own strip comparisons come first, then the full left sub-trace,
//! then the full right sub-trace.

use tracing::debug;

use crate::errors::EngineError;
use crate::geometry::point::Point;
use crate::limits::Limits;
use crate::trace::{Trace, TraceStep};

/// Number of following strip points each strip point is compared against.
const STRIP_WINDOW: usize = 6;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One distance evaluation between two points.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonStep {
    /// Pair examined by the brute-force base case.
    BaseCompare {
        point_a: Point,
        point_b: Point,
        distance: f64,
        level: usize,
    },
    /// Pair examined while scanning the strip around the dividing line.
    StripCompare {
        point_a: Point,
        point_b: Point,
        distance: f64,
        level: usize,
        zone_midpoint: Point,
    },
}

impl ComparisonStep {
    pub fn points(&self) -> (Point, Point) {
        match self {
            ComparisonStep::BaseCompare {
                point_a, point_b, ..
            }
            | ComparisonStep::StripCompare {
                point_a, point_b, ..
            } => (*point_a, *point_b),
        }
    }

    pub fn distance(&self) -> f64 {
        match self {
            ComparisonStep::BaseCompare { distance, .. }
            | ComparisonStep::StripCompare { distance, .. } => *distance,
        }
    }

    /// `[midpoint, point_a, point_b]` for strip steps; base steps have no zone.
    pub fn zone_of_interest(&self) -> Option<[Point; 3]> {
        match self {
            ComparisonStep::BaseCompare { .. } => None,
            ComparisonStep::StripCompare {
                point_a,
                point_b,
                zone_midpoint,
                ..
            } => Some([*zone_midpoint, *point_a, *point_b]),
        }
    }
}

impl TraceStep for ComparisonStep {
    fn kind(&self) -> &'static str {
        match self {
            ComparisonStep::BaseCompare { .. } => "base_compare",
            ComparisonStep::StripCompare { .. } => "strip_compare",
        }
    }

    fn depth(&self) -> usize {
        match self {
            ComparisonStep::BaseCompare { level, .. }
            | ComparisonStep::StripCompare { level, .. } => *level,
        }
    }

    fn describe(&self) -> String {
        let (a, b) = self.points();
        format!(
            "Level {}: Compare points {} and {} with distance {}",
            self.depth(),
            a,
            b,
            self.distance()
        )
    }
}

/// Result of a full search.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestPairResult {
    /// `None` only when fewer than two points were searched, which validation rejects.
    pub pair: Option<(Point, Point)>,
    pub distance: f64,
    pub trace: Trace<ComparisonStep>,
    /// The input in x order (x, then y, then input position).
    pub sorted_by_x: Vec<Point>,
}

/// Best pair found within one recursive call, plus that call's trace.
struct Partial {
    pair: Option<(Point, Point)>,
    distance: f64,
    trace: Trace<ComparisonStep>,
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Finds the closest pair of `points` and records every comparison made.
///
/// Fails with `InvalidInput` for fewer than 2 points or any non-finite
/// coordinate, and with `LimitExceeded` when `limits` are violated.
pub fn find_closest_pair(
    points: &[Point],
    limits: &Limits,
) -> Result<ClosestPairResult, EngineError> {
    if points.len() < 2 {
        return Err(EngineError::invalid(format!(
            "at least 2 points are required, got {}",
            points.len()
        )));
    }
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(EngineError::invalid(format!(
            "point {i} has a non-finite coordinate"
        )));
    }
    limits.check_points(points.len())?;

    let sorted_by_x = sort_by_x(points);
    let sorted_by_y = sort_by_y(&sorted_by_x);

    let best = closest_in(&sorted_by_x, &sorted_by_y, 0, limits)?;

    debug!(
        points = points.len(),
        steps = best.trace.len(),
        distance = best.distance,
        "Closest pair search finished"
    );

    Ok(ClosestPairResult {
        pair: best.pair,
        distance: best.distance,
        trace: best.trace,
        sorted_by_x,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Recursion
// ────────────────────────────────────────────────────────────────────────────

fn closest_in(
    by_x: &[Point],
    by_y: &[Point],
    level: usize,
    limits: &Limits,
) -> Result<Partial, EngineError> {
    limits.check_depth(level)?;

    if by_x.len() <= 3 {
        return Ok(brute_force(by_x, level));
    }

    let mid = by_x.len() / 2;
    let mid_point = by_x[mid];

    // Partition by value: every point sharing mid_point.x lands on the left.
    let (left_y, right_y): (Vec<Point>, Vec<Point>) =
        by_y.iter().partition(|p| p.x <= mid_point.x);

    let left = closest_in(&by_x[..mid], &left_y, level + 1, limits)?;
    let right = closest_in(&by_x[mid..], &right_y, level + 1, limits)?;

    let (mut pair, mut best) = if left.distance < right.distance {
        (left.pair, left.distance)
    } else {
        (right.pair, right.distance)
    };

    let strip: Vec<Point> = by_y
        .iter()
        .copied()
        .filter(|p| (p.x - mid_point.x).abs() < best)
        .collect();

    let mut trace = Trace::new();
    for (i, a) in strip.iter().enumerate() {
        let end = strip.len().min(i + 1 + STRIP_WINDOW);
        for b in &strip[i + 1..end] {
            let d = a.distance(b);
            if d < best {
                best = d;
                pair = Some((*a, *b));
            }
            trace.push(ComparisonStep::StripCompare {
                point_a: *a,
                point_b: *b,
                distance: d,
                level,
                zone_midpoint: mid_point,
            });
        }
    }

    trace.append(left.trace);
    trace.append(right.trace);

    Ok(Partial {
        pair,
        distance: best,
        trace,
    })
}

/// All-pairs search over at most three points. First-found wins exact ties.
fn brute_force(points: &[Point], level: usize) -> Partial {
    let mut pair = None;
    let mut best = f64::INFINITY;
    let mut trace = Trace::new();

    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = a.distance(b);
            if d < best {
                best = d;
                pair = Some((*a, *b));
            }
            trace.push(ComparisonStep::BaseCompare {
                point_a: *a,
                point_b: *b,
                distance: d,
                level,
            });
        }
    }

    Partial {
        pair,
        distance: best,
        trace,
    }
}

/// Stable sort keeps input order for points equal in both coordinates.
fn sort_by_x(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.cmp_xy(b));
    sorted
}

/// Stable sort of the x-ordered view, so y ties fall back to x order.
fn sort_by_y(sorted_by_x: &[Point]) -> Vec<Point> {
    let mut sorted = sorted_by_x.to_vec();
    sorted.sort_by(|a, b| a.cmp_y(b));
    sorted
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
