use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::geometry::closest_pair::{find_closest_pair, ClosestPairResult, ComparisonStep};
use crate::geometry::point::{parse_points, Point};
use crate::state::AppState;
use crate::trace::TraceStep;

#[derive(Debug, Deserialize)]
pub struct ClosestPairRequest {
    /// Raw entries; each must be `[number, number]`. Checked by `parse_points`.
    pub points: Vec<Value>,
}

/// Flattened view of one comparison step as drawn by the visualizer.
#[derive(Debug, Serialize)]
pub struct StepView {
    pub kind: &'static str,
    pub step: String,
    pub level: usize,
    pub current_point: Point,
    pub comparison_point: Point,
    pub distance: f64,
    pub line: [Point; 2],
    pub zone_of_interest: Option<[Point; 3]>,
}

impl From<&ComparisonStep> for StepView {
    fn from(step: &ComparisonStep) -> Self {
        let (a, b) = step.points();
        StepView {
            kind: step.kind(),
            step: step.describe(),
            level: step.depth(),
            current_point: a,
            comparison_point: b,
            distance: step.distance(),
            line: [a, b],
            zone_of_interest: step.zone_of_interest(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Visualization {
    pub steps: Vec<StepView>,
}

#[derive(Debug, Serialize)]
pub struct InputValues {
    pub points: Vec<Point>,
}

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub execution_time: f64,
    /// Total step count, kept under the name the visualizer reads.
    pub num_recursive_calls: usize,
    pub input_values: InputValues,
}

#[derive(Debug, Serialize)]
pub struct ClosestPairResponse {
    pub closest_pair: Option<[Point; 2]>,
    pub distance: f64,
    pub visualization: Visualization,
    pub analysis: Analysis,
}

impl ClosestPairResponse {
    fn build(result: ClosestPairResult, execution_time: f64) -> Self {
        let steps: Vec<StepView> = result.trace.iter().map(StepView::from).collect();
        ClosestPairResponse {
            closest_pair: result.pair.map(|(a, b)| [a, b]),
            distance: result.distance,
            analysis: Analysis {
                execution_time,
                num_recursive_calls: steps.len(),
                input_values: InputValues {
                    points: result.sorted_by_x,
                },
            },
            visualization: Visualization { steps },
        }
    }
}

/// POST /closest-pair
pub async fn handle_closest_pair(
    State(state): State<AppState>,
    payload: Result<Json<ClosestPairRequest>, JsonRejection>,
) -> Result<Json<ClosestPairResponse>, AppError> {
    let Json(req) = payload?;
    let points = parse_points(&req.points)?;
    let limits = state.config.limits;
    let count = points.len();

    // CPU-bound search runs on the blocking pool.
    let (outcome, elapsed) = tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        let outcome = find_closest_pair(&points, &limits);
        (outcome, start.elapsed())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in closest pair: {e}")))?;

    let result = outcome?;
    let execution_time = elapsed.as_secs_f64();

    info!(
        points = count,
        steps = result.trace.len(),
        execution_time,
        "Closest pair computed"
    );

    Ok(Json(ClosestPairResponse::build(result, execution_time)))
}
