pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::geometry::handlers::handle_closest_pair;
use crate::multiplication::handlers::handle_karatsuba;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/closest-pair", post(handle_closest_pair))
        .route("/karatsuba", post(handle_karatsuba))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::limits::Limits;

    fn app() -> Router {
        build_router(AppState {
            config: Config::default(),
        })
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(router, uri, body.to_string()).await
    }

    async fn post_raw(router: Router, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    // ── health ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_health_reports_ok() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    // ── closest pair ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_closest_pair_three_points() {
        let (status, body) = post_json(
            app(),
            "/closest-pair",
            json!({ "points": [[0, 0], [3, 4], [1, 1]] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["closest_pair"], json!([[0.0, 0.0], [1.0, 1.0]]));
        let distance = body["distance"].as_f64().unwrap();
        assert!((distance - 1.4142135624).abs() < 1e-9);
        assert_eq!(body["analysis"]["num_recursive_calls"], 3);
        assert_eq!(
            body["visualization"]["steps"].as_array().unwrap().len(),
            3
        );
        assert!(body["analysis"]["execution_time"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_closest_pair_single_point_is_bad_request() {
        let (status, body) =
            post_json(app(), "/closest-pair", json!({ "points": [[5, 5]] })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_closest_pair_malformed_point_is_bad_request() {
        let (status, body) = post_json(
            app(),
            "/closest-pair",
            json!({ "points": [[0, 0], [1, "y"]] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("point 1"));
    }

    #[tokio::test]
    async fn test_closest_pair_missing_field_is_bad_request() {
        let (status, body) = post_json(app(), "/closest-pair", json!({ "pts": [] })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_closest_pair_over_limit_is_rejected() {
        let router = build_router(AppState {
            config: Config {
                limits: Limits {
                    max_points: 2,
                    ..Limits::default()
                },
                ..Config::default()
            },
        });
        let (status, body) = post_json(
            router,
            "/closest-pair",
            json!({ "points": [[0, 0], [1, 1], [2, 2]] }),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "LIMIT_EXCEEDED");
    }

    // ── karatsuba ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_karatsuba_over_default_digit_limit_is_rejected() {
        let x = "1".repeat(1_001);
        let (status, body) = post_json(app(), "/karatsuba", json!({ "x": x, "y": "2" })).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "LIMIT_EXCEEDED");
    }

    #[tokio::test]
    async fn test_karatsuba_four_digit_product() {
        let (status, body) =
            post_json(app(), "/karatsuba", json!({ "x": "1234", "y": "5678" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "7006652");
        let stats = &body["stats"];
        assert_eq!(
            stats["total_steps"].as_u64().unwrap() as usize,
            body["visualization_data"]["steps"].as_array().unwrap().len()
        );
        assert!(stats["total_recursions"].as_u64().unwrap() >= 1);
    }

    #[tokio::test]
    async fn test_karatsuba_keeps_large_operands_exact() {
        let x = "9".repeat(60);
        let y = "8".repeat(45);
        let expected = (x.parse::<num_bigint::BigUint>().unwrap()
            * y.parse::<num_bigint::BigUint>().unwrap())
        .to_string();

        let (status, body) = post_json(app(), "/karatsuba", json!({ "x": x, "y": y })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], expected);
    }

    #[tokio::test]
    async fn test_karatsuba_lossy_flag_truncates() {
        let (status, body) = post_json(
            app(),
            "/karatsuba",
            json!({ "x": "12.9", "y": "3", "lossy": true }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "36");
    }

    #[tokio::test]
    async fn test_karatsuba_rejects_non_integer() {
        let (status, body) =
            post_json(app(), "/karatsuba", json!({ "x": "12.9", "y": "3" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_karatsuba_rejects_invalid_json() {
        let (status, body) = post_raw(app(), "/karatsuba", "{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
