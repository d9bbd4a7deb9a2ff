//! Trace Model: the ordered record of what an engine did during one invocation.
//!
//! A `Trace` is append-only: steps are pushed (or whole sub-traces appended) in
//! the order the algorithm produced them and are never reordered or removed.
//! Each top-level engine call owns exactly one trace and hands it back intact.
#![allow(dead_code)]

use serde::Serialize;

// ────────────────────────────────────────────────────────────────────────────
// Step abstraction
// ────────────────────────────────────────────────────────────────────────────

/// Common behaviour of every step variant recorded by an engine.
///
/// Implemented by the geometry comparison steps and the multiplication
/// base-case/combine steps, so replay and serialization code can treat them
/// uniformly.
pub trait TraceStep {
    /// Stable snake_case tag for the variant (`base_compare`, `combine`, ...).
    fn kind(&self) -> &'static str;

    /// Recursion depth (0 = top-level call) at which the step was produced.
    fn depth(&self) -> usize;

    /// Human-readable one-line summary used by the visualizer.
    fn describe(&self) -> String;
}

// ────────────────────────────────────────────────────────────────────────────
// Accumulator
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace<S> {
    entries: Vec<S>,
}

impl<S> Default for Trace<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S> Trace<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: S) {
        self.entries.push(step);
    }

    /// Moves every entry of `other` to the end of this trace, preserving order.
    pub fn append(&mut self, mut other: Trace<S>) {
        self.entries.append(&mut other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[S] {
        &self.entries
    }

    pub fn last(&self) -> Option<&S> {
        self.entries.last()
    }
}

impl<S: TraceStep> Trace<S> {
    /// Deepest recursion level recorded, or `None` for an empty trace.
    pub fn max_depth(&self) -> Option<usize> {
        self.entries.iter().map(TraceStep::depth).max()
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
