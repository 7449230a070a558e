use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Vehicle Reservation API is running");
}

#[tokio::test]
async fn test_unknown_route_returns_envelope_404() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/no-existe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], false);
}

// App de test con la misma superficie pública que main (sin base de datos)
fn create_test_app() -> Router {
    Router::new()
        .route(
            "/api/health",
            get(|| async {
                Json(json!({
                    "success": true,
                    "message": "Vehicle Reservation API is running",
                    "timestamp": chrono::Utc::now().to_rfc3339()
                }))
            }),
        )
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "success": false,
                    "message": "Ruta no encontrada"
                })),
            )
        })
}
