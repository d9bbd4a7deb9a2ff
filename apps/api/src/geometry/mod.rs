// Closest pair of points: input validation, divide-and-conquer engine, HTTP handler.

pub mod closest_pair;
pub mod handlers;
pub mod point;
