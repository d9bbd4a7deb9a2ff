use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, EngineError};
use crate::multiplication::karatsuba::{
    multiply, KaratsubaOutcome, KaratsubaStats, MultiplyRecord, MultiplyStep, RecursionRecord,
};
use crate::multiplication::operand::{parse_operand, parse_operand_lossy};
use crate::multiplication::serialize_decimal;
use crate::state::AppState;
use crate::trace::{Trace, TraceStep};

#[derive(Debug, Deserialize)]
pub struct KaratsubaRequest {
    pub x: String,
    pub y: String,
    /// Parse through a float like older clients expect (truncates, loses precision).
    #[serde(default)]
    pub lossy: bool,
}

/// One base-case or combine step as shown by the visualizer.
#[derive(Debug, Serialize)]
pub struct MultiplyStepView {
    pub kind: &'static str,
    pub step: String,
    #[serde(serialize_with = "serialize_decimal")]
    pub result: BigUint,
    pub depth: usize,
}

impl From<&MultiplyStep> for MultiplyStepView {
    fn from(step: &MultiplyStep) -> Self {
        MultiplyStepView {
            kind: step.kind(),
            step: step.describe(),
            result: step.result().clone(),
            depth: step.depth(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VisualizationData {
    pub steps: Vec<MultiplyStepView>,
    pub multiplications: Trace<MultiplyRecord>,
    pub recursions: Trace<RecursionRecord>,
}

#[derive(Debug, Serialize)]
pub struct KaratsubaResponse {
    #[serde(serialize_with = "serialize_decimal")]
    pub result: BigUint,
    pub visualization_data: VisualizationData,
    pub computation_time: f64,
    pub stats: KaratsubaStats,
}

impl KaratsubaResponse {
    fn build(outcome: KaratsubaOutcome, computation_time: f64) -> Self {
        let stats = outcome.trace.stats();
        let trace = outcome.trace;
        KaratsubaResponse {
            result: outcome.product,
            visualization_data: VisualizationData {
                steps: trace.steps.iter().map(MultiplyStepView::from).collect(),
                multiplications: trace.multiplications,
                recursions: trace.recursions,
            },
            computation_time,
            stats,
        }
    }
}

/// POST /karatsuba
pub async fn handle_karatsuba(
    State(state): State<AppState>,
    payload: Result<Json<KaratsubaRequest>, JsonRejection>,
) -> Result<Json<KaratsubaResponse>, AppError> {
    let Json(req) = payload?;
    let parse: fn(&str) -> Result<BigUint, EngineError> = if req.lossy {
        parse_operand_lossy
    } else {
        parse_operand
    };
    let x = parse(&req.x)?;
    let y = parse(&req.y)?;
    let limits = state.config.limits;

    // CPU-bound recursion runs on the blocking pool.
    let (outcome, elapsed) = tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        let outcome = multiply(&x, &y, &limits);
        (outcome, start.elapsed())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in karatsuba: {e}")))?;

    let outcome = outcome?;
    let computation_time = elapsed.as_secs_f64();
    let stats = outcome.trace.stats();

    info!(
        total_steps = stats.total_steps,
        total_recursions = stats.total_recursions,
        computation_time,
        "Karatsuba product computed"
    );

    Ok(Json(KaratsubaResponse::build(outcome, computation_time)))
}
