use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::errors::EngineError;

/// A point in the plane. Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance, `sqrt(dx² + dy²)` in double precision.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Orders by x, then y. Coordinates are finite by the time this is used.
    pub fn cmp_xy(&self, other: &Point) -> Ordering {
        cmp_f64(self.x, other.x).then_with(|| cmp_f64(self.y, other.y))
    }

    /// Orders by y only.
    pub fn cmp_y(&self, other: &Point) -> Ordering {
        cmp_f64(self.y, other.y)
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request validation
// ────────────────────────────────────────────────────────────────────────────

/// Converts raw JSON point entries into `Point`s.
///
/// Every entry must be an array of exactly two JSON numbers with finite values.
/// The first offending entry is reported by index.
pub fn parse_points(raw: &[Value]) -> Result<Vec<Point>, EngineError> {
    raw.iter()
        .enumerate()
        .map(|(i, entry)| parse_point(i, entry))
        .collect()
}

fn parse_point(index: usize, entry: &Value) -> Result<Point, EngineError> {
    let coords = entry
        .as_array()
        .ok_or_else(|| EngineError::invalid(format!("point {index} is not an array")))?;

    if coords.len() != 2 {
        return Err(EngineError::invalid(format!(
            "point {index} must have exactly 2 coordinates, got {}",
            coords.len()
        )));
    }

    let coord = |axis: &str, v: &Value| -> Result<f64, EngineError> {
        let n = v.as_f64().ok_or_else(|| {
            EngineError::invalid(format!("point {index}: {axis} is not a number"))
        })?;
        if !n.is_finite() {
            return Err(EngineError::invalid(format!(
                "point {index}: {axis} is not finite"
            )));
        }
        Ok(n)
    };

    Ok(Point::new(coord("x", &coords[0])?, coord("y", &coords[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_cmp_xy_breaks_ties_by_y() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(1.0, 3.0);
        let c = Point::new(0.0, 9.0);
        assert_eq!(a.cmp_xy(&b), Ordering::Less);
        assert_eq!(c.cmp_xy(&a), Ordering::Less);
        assert_eq!(a.cmp_xy(&a), Ordering::Equal);
    }

    #[test]
    fn test_serializes_as_pair() {
        let json = serde_json::to_value(Point::new(1.5, -2.0)).unwrap();
        assert_eq!(json, json!([1.5, -2.0]));
    }

    #[test]
    fn test_display_matches_array_form() {
        assert_eq!(Point::new(1.0, 2.5).to_string(), "[1, 2.5]");
    }

    #[test]
    fn test_parse_points_accepts_ints_and_floats() {
        let raw = vec![json!([0, 0]), json!([1.5, 2])];
        let points = parse_points(&raw).unwrap();
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(1.5, 2.0)]);
    }

    #[test]
    fn test_parse_points_rejects_wrong_arity() {
        let raw = vec![json!([0, 0]), json!([1, 2, 3])];
        let err = parse_points(&raw).unwrap_err();
        assert!(err.to_string().contains("point 1 must have exactly 2 coordinates"));
    }

    #[test]
    fn test_parse_points_rejects_non_numbers() {
        let raw = vec![json!(["a", 0])];
        assert!(matches!(
            parse_points(&raw),
            Err(EngineError::InvalidInput(_))
        ));

        let raw = vec![json!({"x": 1, "y": 2})];
        assert!(parse_points(&raw)
            .unwrap_err()
            .to_string()
            .contains("not an array"));
    }
}
