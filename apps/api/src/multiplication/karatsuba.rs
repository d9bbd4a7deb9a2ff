//! Karatsuba Engine: exact big-integer multiplication with a post-order trace.
//!
//! Each non-base call splits both operands at `half = max_digits / 2` decimal
//! digits, recurses on `ac`, `bd` and `(a+b)(c+d)` in that order, then appends
//! its own multiply record, combine step and recursion record. Every trace list
//! is therefore in the order calls finished.

use num_bigint::BigUint;
use serde::Serialize;
use tracing::debug;

use crate::errors::EngineError;
use crate::limits::Limits;
use crate::multiplication::{digit_count, serialize_decimal};
use crate::trace::{Trace, TraceStep};

// ────────────────────────────────────────────────────────────────────────────
// Trace records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiplyStep {
    /// One operand is a single digit; multiplied directly.
    BaseCase {
        x: BigUint,
        y: BigUint,
        result: BigUint,
        depth: usize,
    },
    /// A non-base call assembled its result from the three sub-products.
    Combine {
        result: BigUint,
        depth: usize,
        description: String,
    },
}

impl MultiplyStep {
    pub fn result(&self) -> &BigUint {
        match self {
            MultiplyStep::BaseCase { result, .. } | MultiplyStep::Combine { result, .. } => result,
        }
    }
}

impl TraceStep for MultiplyStep {
    fn kind(&self) -> &'static str {
        match self {
            MultiplyStep::BaseCase { .. } => "base_case",
            MultiplyStep::Combine { .. } => "combine",
        }
    }

    fn depth(&self) -> usize {
        match self {
            MultiplyStep::BaseCase { depth, .. } | MultiplyStep::Combine { depth, .. } => *depth,
        }
    }

    fn describe(&self) -> String {
        match self {
            MultiplyStep::BaseCase { x, y, .. } => format!("Base case: {x} * {y}"),
            MultiplyStep::Combine { description, .. } => description.clone(),
        }
    }
}

/// The three sub-products of one non-base call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiplyRecord {
    #[serde(serialize_with = "serialize_decimal")]
    pub ac: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub bd: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub ad_plus_bc: BigUint,
    pub depth: usize,
}

/// Full split and result of one non-base call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecursionRecord {
    #[serde(serialize_with = "serialize_decimal")]
    pub a: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub b: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub c: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub d: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub ac: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub bd: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub ad_plus_bc: BigUint,
    #[serde(serialize_with = "serialize_decimal")]
    pub result: BigUint,
    pub depth: usize,
}

/// Everything recorded during one top-level multiplication.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KaratsubaTrace {
    pub steps: Trace<MultiplyStep>,
    pub multiplications: Trace<MultiplyRecord>,
    pub recursions: Trace<RecursionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KaratsubaStats {
    pub total_steps: usize,
    pub total_multiplications: usize,
    pub total_recursions: usize,
}

impl KaratsubaTrace {
    pub fn stats(&self) -> KaratsubaStats {
        KaratsubaStats {
            total_steps: self.steps.len(),
            total_multiplications: self.multiplications.len(),
            total_recursions: self.recursions.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KaratsubaOutcome {
    pub product: BigUint,
    pub trace: KaratsubaTrace,
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Multiplies `x` by `y` exactly, recording the recursive decomposition.
///
/// Fails with `LimitExceeded` when either operand has more digits than
/// `limits.max_digits` or the recursion would go deeper than `limits.max_depth`.
pub fn multiply(
    x: &BigUint,
    y: &BigUint,
    limits: &Limits,
) -> Result<KaratsubaOutcome, EngineError> {
    limits.check_digits(digit_count(x).max(digit_count(y)))?;

    let mut trace = KaratsubaTrace::default();
    let product = karatsuba(x, y, 0, limits, &mut trace)?;

    debug!(
        steps = trace.steps.len(),
        recursions = trace.recursions.len(),
        "Karatsuba multiplication finished"
    );

    Ok(KaratsubaOutcome { product, trace })
}

// ────────────────────────────────────────────────────────────────────────────
// Recursion
// ────────────────────────────────────────────────────────────────────────────

fn karatsuba(
    x: &BigUint,
    y: &BigUint,
    depth: usize,
    limits: &Limits,
    trace: &mut KaratsubaTrace,
) -> Result<BigUint, EngineError> {
    limits.check_depth(depth)?;

    let ten = BigUint::from(10u32);
    if x < &ten || y < &ten {
        let result = x * y;
        trace.steps.push(MultiplyStep::BaseCase {
            x: x.clone(),
            y: y.clone(),
            result: result.clone(),
            depth,
        });
        return Ok(result);
    }

    let n = digit_count(x).max(digit_count(y));
    let half = n / 2;
    let shift = power_of_ten(half)?;

    let (a, b) = (x / &shift, x % &shift);
    let (c, d) = (y / &shift, y % &shift);

    let ac = karatsuba(&a, &c, depth + 1, limits, trace)?;
    let bd = karatsuba(&b, &d, depth + 1, limits, trace)?;
    let abcd = karatsuba(&(&a + &b), &(&c + &d), depth + 1, limits, trace)?;
    // (a+b)(c+d) = ac + ad + bc + bd, so this never underflows.
    let ad_plus_bc = abcd - &ac - &bd;

    let result = &ac * power_of_ten(2 * half)? + &ad_plus_bc * &shift + &bd;

    trace.multiplications.push(MultiplyRecord {
        ac: ac.clone(),
        bd: bd.clone(),
        ad_plus_bc: ad_plus_bc.clone(),
        depth,
    });
    trace.steps.push(MultiplyStep::Combine {
        result: result.clone(),
        depth,
        description: format!(
            "Combine results: ac * 10^{} + ad_plus_bc * 10^{} + bd = {}",
            2 * half,
            half,
            result
        ),
    });
    trace.recursions.push(RecursionRecord {
        a,
        b,
        c,
        d,
        ac,
        bd,
        ad_plus_bc,
        result: result.clone(),
        depth,
    });

    Ok(result)
}

fn power_of_ten(exponent: usize) -> Result<BigUint, EngineError> {
    let exponent = u32::try_from(exponent)
        .map_err(|_| EngineError::invalid(format!("operand too large to split at 10^{exponent}")))?;
    Ok(BigUint::from(10u32).pow(exponent))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
