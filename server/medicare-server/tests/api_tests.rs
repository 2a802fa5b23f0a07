use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use diagnosis_engine::{Classifier, DiagnosisEngine, EngineResult, FeatureVector, LabelEncoder};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use treatment_knowledge::KnowledgeBase;

use medicare_server::config::Overrides;
use medicare_server::{create_app, AppContext, Settings};

const CLASSES: [&str; 6] = [
    "Asthma",
    "Bronchitis",
    "Common Cold",
    "Influenza",
    "Pneumonia",
    "Stroke",
];

/// Classifier returning the same distribution for every row
struct FixedClassifier {
    probabilities: Vec<f64>,
}

impl Classifier for FixedClassifier {
    fn kind(&self) -> &'static str {
        "fixed"
    }

    fn n_classes(&self) -> usize {
        self.probabilities.len()
    }

    fn predict_proba(&self, _features: &FeatureVector) -> EngineResult<Vec<f64>> {
        Ok(self.probabilities.clone())
    }
}

/// Test configuration for API tests
struct TestConfig {
    app: Router,
}

impl TestConfig {
    fn new(engine: DiagnosisEngine) -> Self {
        let ctx = AppContext::new(engine, KnowledgeBase::builtin(), Settings::default());
        Self {
            app: create_app(ctx),
        }
    }

    fn loaded(classes: &[&str], probabilities: Vec<f64>) -> Self {
        let model: Arc<dyn Classifier> = Arc::new(FixedClassifier { probabilities });
        Self::new(DiagnosisEngine::new(Some(model), Some(encoder(classes))))
    }

    fn influenza() -> Self {
        Self::loaded(&CLASSES, vec![0.05, 0.1, 0.2, 0.4, 0.15, 0.1])
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn predict_raw(&self, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri("/predict")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn predict(&self, payload: &Value) -> (StatusCode, Value) {
        self.predict_raw(&payload.to_string()).await
    }
}

fn encoder(classes: &[&str]) -> LabelEncoder {
    LabelEncoder::new(classes.iter().map(|c| (*c).to_string()).collect()).unwrap()
}

fn assert_envelope(body: &Value, error: &str, message: &str) {
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(error));
    assert_eq!(body["message"], json!(message));
}

#[tokio::test]
async fn test_home_page_lists_endpoints() {
    let config = TestConfig::new(DiagnosisEngine::default());
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = config.send(request).await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("MediCare AI"));
    assert!(html.contains("POST /predict"));
    assert!(html.contains("GET /health"));
}

#[tokio::test]
async fn test_health_reports_degraded_state_as_healthy() {
    let config = TestConfig::new(DiagnosisEngine::default());
    let (status, body) = config.get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "model_loaded": false,
            "encoder_loaded": false,
            "message": "Backend is running!"
        })
    );
}

#[tokio::test]
async fn test_health_with_artifacts_loaded() {
    let config = TestConfig::influenza();
    let (status, body) = config.get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], json!(true));
    assert_eq!(body["encoder_loaded"], json!(true));
}

#[tokio::test]
async fn test_models_listing() {
    let (_, body) = TestConfig::influenza().get_json("/models").await;
    assert_eq!(
        body,
        json!({
            "available_models": ["rf", "gb", "lr"],
            "current_model": "best_model",
            "diseases_count": 6
        })
    );

    let (_, body) = TestConfig::new(DiagnosisEngine::default())
        .get_json("/models")
        .await;
    assert_eq!(body["diseases_count"], json!(0));
}

#[tokio::test]
async fn test_options_predict_acknowledges() {
    let config = TestConfig::new(DiagnosisEngine::default());
    let request = Request::builder()
        .uri("/predict")
        .method(Method::OPTIONS)
        .body(Body::empty())
        .unwrap();
    let response = config.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let config = TestConfig::influenza();
    let request = Request::builder()
        .uri("/predict")
        .method(Method::OPTIONS)
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = config.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap();
    assert!(allowed.contains("content-type"));
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "3600");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_cross_origin_responses_carry_allow_origin() {
    let config = TestConfig::influenza();

    let health = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = config.app.clone().oneshot(health).await.unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let predict = Request::builder()
        .uri("/predict")
        .method(Method::POST)
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"fever": 1}).to_string()))
        .unwrap();
    let response = config.app.clone().oneshot(predict).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_oversized_body_gets_error_envelope() {
    let config = TestConfig::influenza();
    let padding = "x".repeat(medicare_server::MAX_BODY_BYTES);
    let (status, body) = config
        .predict_raw(&json!({"fever": 1, "note": padding}).to_string())
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("length limit exceeded"));
    assert_eq!(
        body["message"],
        json!("Please send a JSON object no larger than 2 MB")
    );
}

#[tokio::test]
async fn test_missing_body_is_rejected() {
    let config = TestConfig::influenza();

    let (status, body) = config.predict_raw("").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, "No data provided", "Please send JSON data");
}

#[tokio::test]
async fn test_falsy_json_is_rejected() {
    let config = TestConfig::influenza();

    for falsy in ["{}", "null", "[]", "0", "false", "\"\""] {
        let (status, body) = config.predict_raw(falsy).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{falsy}");
        assert_envelope(&body, "No data provided", "Please send JSON data");
    }
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let config = TestConfig::influenza();
    let (status, body) = config.predict_raw("{\"fever\": 1,").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON: "));
    assert_eq!(body["message"], json!("Please send JSON data"));
}

#[tokio::test]
async fn test_absent_model_is_a_server_error() {
    let config = TestConfig::new(DiagnosisEngine::default());
    let (status, body) = config.predict(&json!({"fever": 1})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_envelope(
        &body,
        "Model not loaded",
        "ML model files not found. Please ensure model artifact files are in the correct location.",
    );
}

#[tokio::test]
async fn test_coercion_failure_precedes_model_check() {
    let config = TestConfig::new(DiagnosisEngine::default());
    let (status, body) = config.predict(&json!({"age": "forty"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_envelope(
        &body,
        "Field 'age' expects an integer, got \"forty\"",
        "Prediction failed. Check server logs for details.",
    );
}

#[tokio::test]
async fn test_non_object_payload_fails_prediction() {
    let config = TestConfig::influenza();
    let (status, body) = config.predict(&json!([1, 2, 3])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("Prediction failed. Check server logs for details.")
    );
}

#[tokio::test]
async fn test_missing_encoder_fails_prediction() {
    let model: Arc<dyn Classifier> = Arc::new(FixedClassifier {
        probabilities: vec![0.5, 0.5],
    });
    let config = TestConfig::new(DiagnosisEngine::new(Some(model), None));
    let (status, body) = config.predict(&json!({"fever": 1})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_envelope(
        &body,
        "Label encoder not loaded",
        "Prediction failed. Check server logs for details.",
    );
}

#[tokio::test]
async fn test_successful_prediction_shape() {
    let config = TestConfig::influenza();
    let payload = json!({
        "fever": 1, "cough": 1, "fatigue": 1, "breathing": 0,
        "age": 70, "gender": 1, "bloodPressure": 2, "cholesterol": 1,
        "model": "gb"
    });
    let (status, body) = config.predict(&payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["disease"], json!("Influenza"));
    assert_eq!(body["confidence"], json!(40.0));
    assert_eq!(body["risk"], json!("high"));
    assert_eq!(body["model_used"], json!("gb"));

    let kb = KnowledgeBase::builtin();
    let influenza = kb.lookup("Influenza");
    assert_eq!(body["medicines"], json!(influenza.medicines));
    assert_eq!(body["advice"], json!(influenza.advice));

    let timestamp = body["timestamp"].as_str().unwrap();
    let parsed = chrono::DateTime::parse_from_rfc3339(timestamp).unwrap();
    assert_eq!(parsed.offset().local_minus_utc(), 0);
}

#[tokio::test]
async fn test_top5_is_ranked_and_bounded() {
    let config = TestConfig::influenza();
    let (_, body) = config.predict(&json!({"fever": 1})).await;

    let top5 = body["top5"].as_array().unwrap();
    assert_eq!(top5.len(), 5);

    let names: Vec<&str> = top5.iter().map(|t| t["disease"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["Influenza", "Common Cold", "Pneumonia", "Bronchitis", "Stroke"]
    );

    let confidences: Vec<f64> = top5
        .iter()
        .map(|t| t["confidence"].as_f64().unwrap())
        .collect();
    assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(body["confidence"], top5[0]["confidence"]);
}

#[tokio::test]
async fn test_top5_shrinks_with_few_classes() {
    let config = TestConfig::loaded(&["Asthma", "Stroke"], vec![0.3, 0.7]);
    let (status, body) = config.predict(&json!({"cough": 1})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["top5"],
        json!([
            {"disease": "Stroke", "confidence": 70.0},
            {"disease": "Asthma", "confidence": 30.0}
        ])
    );
}

#[tokio::test]
async fn test_defaults_and_low_risk() {
    let config = TestConfig::influenza();
    let (status, body) = config
        .predict(&json!({
            "fever": 1, "cough": 0, "fatigue": 0, "breathing": 0,
            "age": 20, "bloodPressure": 1
        }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk"], json!("low"));
    assert_eq!(body["model_used"], json!("rf"));
}

#[tokio::test]
async fn test_unmapped_condition_gets_fallback_treatment() {
    let config = TestConfig::loaded(&["Dragon Pox", "Asthma"], vec![0.9, 0.1]);
    let (status, body) = config.predict(&json!({"fever": 1})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["disease"], json!("Dragon Pox"));
    assert_eq!(
        body["medicines"],
        json!(["Consult doctor for specific treatment"])
    );
    assert_eq!(
        body["advice"],
        json!(["Schedule appointment with healthcare provider"])
    );
}

#[tokio::test]
async fn test_identical_requests_give_identical_results() {
    let config = TestConfig::influenza();
    let payload = json!({"fever": 1, "cough": 1, "age": "55", "gender": true});

    let (_, first) = config.predict(&payload).await;
    let (_, second) = config.predict(&payload).await;

    for key in ["disease", "confidence", "risk", "top5", "medicines", "advice"] {
        assert_eq!(first[key], second[key], "{key}");
    }
}

#[tokio::test]
async fn test_encoder_model_disagreement_fails_prediction() {
    let config = TestConfig::loaded(&["Asthma", "Stroke"], vec![0.2, 0.3, 0.5]);
    let (status, body) = config.predict(&json!({"fever": 1})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        json!("Label encoder knows 2 classes but the model scores 3")
    );
}

#[tokio::test]
async fn test_serves_artifacts_discovered_on_disk() {
    let dir = TempDir::new().unwrap();
    let forest = json!({
        "kind": "random_forest",
        "feature_names": diagnosis_engine::FEATURE_COLUMNS,
        "n_classes": 2,
        "trees": [{
            "nodes": [
                {"feature": 0, "threshold": 0.5, "left": 1, "right": 2},
                {"value": [9.0, 1.0]},
                {"value": [1.0, 3.0]}
            ]
        }]
    });
    // only the fallback candidates exist
    fs::write(dir.path().join("rf_model.json"), forest.to_string()).unwrap();
    fs::write(dir.path().join("label_encoder.json"), r#"["Common Cold", "Influenza"]"#).unwrap();

    let settings = Settings::default().with_overrides(Overrides {
        artifact_dir: Some(PathBuf::from(dir.path())),
        ..Overrides::default()
    });
    let config = TestConfig {
        app: create_app(AppContext::from_settings(settings)),
    };

    let (_, health) = config.get_json("/health").await;
    assert_eq!(health["model_loaded"], json!(true));
    assert_eq!(health["encoder_loaded"], json!(true));

    let (status, body) = config.predict(&json!({"fever": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["disease"], json!("Influenza"));
    assert_eq!(body["confidence"], json!(75.0));

    let (_, body) = config.predict(&json!({"fever": 0, "cough": 1})).await;
    assert_eq!(body["disease"], json!("Common Cold"));
    assert_eq!(body["confidence"], json!(90.0));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let config = TestConfig::new(DiagnosisEngine::default());
    let (status, body) = config.get_json("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    for path in ["/", "/health", "/models", "/predict"] {
        assert!(paths.contains_key(path), "{path}");
    }
    assert!(body["paths"]["/predict"]["post"].is_object());
    assert!(body["components"]["schemas"]["TreatmentEntry"].is_object());
}
