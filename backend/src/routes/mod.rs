//! Route definitions for the Yield Forecast Server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Season table and date classification
        .nest("/seasons", season_routes())
        // Yield analysis and forecasting (stateless, observations travel with the request)
        .nest("/forecasts", forecast_routes())
}

/// Season routes
fn season_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_season_table))
        .route("/classify", get(handlers::classify_date))
}

/// Forecast routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/simulate", post(handlers::simulate))
        .route("/stats", post(handlers::seasonal_stats))
        .route("/import", post(handlers::import_csv))
        .route("/plots", post(handlers::forecast_plots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState {
            config: Arc::new(Config::default()),
        };
        api_routes().with_state(state)
    }

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn sample_observations() -> Value {
        json!([
            { "value": 100.0, "timestamp": "2024-01-01T00:00:00Z" },
            { "value": 110.0, "timestamp": "2024-01-15T00:00:00Z" },
            { "value": 90.0, "timestamp": "2024-06-01T00:00:00Z" },
            { "value": 95.0, "timestamp": "2024-06-15T00:00:00Z" }
        ])
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["environment"], "development");
    }

    #[tokio::test]
    async fn test_season_table() {
        let request = Request::get("/seasons").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["wetSeason"]["weight"], 1.2);
        assert_eq!(json["drySeason"]["optimal"]["max"], 90.0);
    }

    #[tokio::test]
    async fn test_classify_date() {
        let request = Request::get("/seasons/classify?date=2024-07-04")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["season"], "drySeason");
        assert_eq!(json["name"], "Dry Season");
        assert_eq!(json["profile"]["weight"], 0.8);
    }

    #[tokio::test]
    async fn test_classify_rejects_bad_date() {
        let request = Request::get("/seasons/classify?date=yesterday")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_report() {
        let request = post_json(
            "/forecasts/analyze",
            json!({
                "observations": sample_observations(),
                "days_ahead": 30,
                "seed": 7,
                "start_date": "2024-07-01"
            }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["observationCount"], 4);
        assert_eq!(json["forecast"].as_array().unwrap().len(), 30);
        assert_eq!(json["seasonalStats"]["wetSeason"]["count"], 2);
        assert_eq!(json["seasonalStats"]["drySeason"]["average"], 92.5);
    }

    #[tokio::test]
    async fn test_analyze_rejects_invalid_timestamp() {
        let request = post_json(
            "/forecasts/analyze",
            json!({ "observations": [{ "value": 100.0, "timestamp": "not a date" }] }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["field"], "timestamp");
    }

    #[tokio::test]
    async fn test_analyze_rejects_excessive_horizon() {
        let request = post_json(
            "/forecasts/analyze",
            json!({ "observations": sample_observations(), "days_ahead": 5000 }),
        );
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_simulate_negative_horizon_is_empty() {
        let request = post_json(
            "/forecasts/simulate",
            json!({ "observations": sample_observations(), "days_ahead": -3 }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_simulate_csv_export() {
        let request = post_json(
            "/forecasts/simulate?format=csv",
            json!({
                "observations": sample_observations(),
                "days_ahead": 3,
                "seed": 1,
                "start_date": "2024-01-01"
            }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let text = String::from_utf8(body).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,2024-01-01,wetSeason"));
    }

    #[tokio::test]
    async fn test_stats_empty_history() {
        let request = post_json("/forecasts/stats", json!({ "observations": [] }));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["transitional"]["count"], 0);
        assert_eq!(json["transitional"]["average"], 0.0);
    }

    #[tokio::test]
    async fn test_import_csv() {
        let csv = "date,yield\n2024-01-01,100\n2024-01-15,110\n";
        let request = Request::builder()
            .method("POST")
            .uri("/forecasts/import?days_ahead=5&seed=3&start_date=2024-02-01")
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from(csv))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["observationCount"], 2);
        assert_eq!(json["forecast"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_plots_requires_harvests() {
        let request = post_json("/forecasts/plots", json!({ "harvests": [] }));
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
