//! API router.
//!
//! Two route groups share one process: the premium prediction routes
//! (`/`, `/health`, `/predict`) and the patient record routes (`/about`,
//! `/view`, `/patient/:id`, `/sort`, `/create`, `/edit/:id`,
//! `/delete/:id`). Each group is a composable `Router<ApiContext>` that
//! can also be mounted on its own.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the full application router over a shared context.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn app_router(ctx: ApiContext) -> Router {
    Router::new()
        .merge(premium_routes())
        .merge(patient_routes())
        .with_state(ctx)
}

/// Premium prediction service routes.
pub fn premium_routes() -> Router<ApiContext> {
    Router::new()
        .route("/", get(endpoints::meta::home))
        .route("/health", get(endpoints::meta::health))
        .route("/predict", post(endpoints::predict::premium_category))
}

/// Patient record service routes.
pub fn patient_routes() -> Router<ApiContext> {
    Router::new()
        .route("/about", get(endpoints::meta::about))
        .route("/view", get(endpoints::patients::view))
        .route("/patient/:patient_id", get(endpoints::patients::detail))
        .route("/sort", get(endpoints::patients::sorted))
        .route("/create", post(endpoints::patients::create))
        .route("/edit/:patient_id", put(endpoints::patients::edit))
        .route("/delete/:patient_id", delete(endpoints::patients::remove))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::inference::LinearModel;
    use crate::models::{Gender, PatientRecord};
    use crate::store::{JsonFileStore, MemoryStore, PatientMap, RecordStore};

    const TEST_MODEL: &str = r#"{
        "version": "1.0.0",
        "classes": ["high", "low", "medium"],
        "intercepts": [-8.0, 3.0, 0.5],
        "weights": [
            {"bmi": 0.25, "lifestyle_risk=high": 2.0, "age_group=senior": 1.5},
            {"bmi": -0.15, "lifestyle_risk=low": 1.0, "age_group=young": 1.0},
            {"lifestyle_risk=medium": 1.0, "age_group=adult": 0.5}
        ]
    }"#;

    fn seed_records() -> PatientMap {
        let mut records = PatientMap::new();
        records.insert(
            "P001".into(),
            PatientRecord {
                name: "Asha".into(),
                city: "Surat".into(),
                age: 31,
                gender: Gender::Female,
                height: 1.52,
                weight: 58.0,
            },
        );
        records.insert(
            "P002".into(),
            PatientRecord {
                name: "Vikram".into(),
                city: "Delhi".into(),
                age: 45,
                gender: Gender::Male,
                height: 1.82,
                weight: 66.0,
            },
        );
        records.insert(
            "P003".into(),
            PatientRecord {
                name: "Meera".into(),
                city: "Indore".into(),
                age: 60,
                gender: Gender::Female,
                height: 1.65,
                weight: 86.0,
            },
        );
        records
    }

    fn test_ctx(store: Arc<dyn RecordStore>) -> ApiContext {
        let model = LinearModel::from_json(TEST_MODEL).unwrap();
        ApiContext::new(store, Some(Arc::new(model)))
    }

    fn seeded_app() -> Router {
        let store = MemoryStore::seeded(seed_records());
        app_router(test_ctx(Arc::new(store)))
    }

    fn empty_app() -> Router {
        app_router(test_ctx(Arc::new(MemoryStore::new())))
    }

    fn modelless_app() -> Router {
        app_router(ApiContext::new(Arc::new(MemoryStore::new()), None))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn predict_body() -> Value {
        json!({
            "age": 70,
            "weight": 95.0,
            "height": 1.68,
            "income_lpa": 14.0,
            "smoker": true,
            "city": "Mumbai",
            "occupation": "retired"
        })
    }

    // ── Meta routes ───────────────────────────────────────────

    #[tokio::test]
    async fn root_serves_welcome_message() {
        let response = seeded_app().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(
            json["message"],
            "Welcome to the Insurance Premium Prediction API!"
        );
    }

    #[tokio::test]
    async fn about_serves_records_description() {
        let response = seeded_app().oneshot(get_request("/about")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(
            json["message"],
            "A fully functional Patient Management System API."
        );
    }

    #[tokio::test]
    async fn health_reports_loaded_model() {
        let response = seeded_app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["message"], "The API is running smoothly.");
        assert_eq!(json["model_version"], "1.0.0");
        assert_eq!(json["model_loaded"], true);
    }

    #[tokio::test]
    async fn health_reports_missing_model() {
        let response = modelless_app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["model_loaded"], false);
        assert_eq!(json["model_version"], "1.0.0");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = seeded_app().oneshot(get_request("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ── Prediction ────────────────────────────────────────────

    #[tokio::test]
    async fn predict_returns_category_and_probabilities() {
        let response = seeded_app()
            .oneshot(json_request("POST", "/predict", &predict_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let category = json["predicted_category"].as_str().unwrap();
        assert!(["high", "low", "medium"].contains(&category));

        let probabilities = json["class_probabilities"].as_object().unwrap();
        assert_eq!(probabilities.len(), 3);
        let total: f64 = probabilities.values().map(|v| v.as_f64().unwrap()).sum();
        assert!((total - 1.0).abs() < 1e-3);
        assert_eq!(
            json["confidence"].as_f64().unwrap(),
            probabilities[category].as_f64().unwrap()
        );
    }

    #[tokio::test]
    async fn predict_high_risk_profile_lands_on_high() {
        // Senior smoker at BMI 33.7: every risk feature active.
        let response = seeded_app()
            .oneshot(json_request("POST", "/predict", &predict_body()))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(json["predicted_category"], "high");
    }

    #[tokio::test]
    async fn predict_accepts_unnormalized_city() {
        let mut body = predict_body();
        body["city"] = json!("  mumbai ");
        let response = seeded_app()
            .oneshot(json_request("POST", "/predict", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn predict_rejects_invalid_fields_with_422() {
        let body = json!({
            "age": 0,
            "weight": 80.0,
            "height": 3.1,
            "income_lpa": 5.0,
            "smoker": false,
            "city": "Pune",
            "occupation": "astronaut"
        });
        let response = seeded_app()
            .oneshot(json_request("POST", "/predict", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = response_json(response).await;
        let fields: Vec<&str> = json["detail"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, ["age", "height", "occupation"]);
    }

    #[tokio::test]
    async fn predict_without_model_uses_error_envelope() {
        let response = modelless_app()
            .oneshot(json_request("POST", "/predict", &predict_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = response_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("not loaded"));
        assert!(json.get("detail").is_none());
    }

    // ── Viewing records ───────────────────────────────────────

    #[tokio::test]
    async fn view_returns_id_keyed_profiles() {
        let response = seeded_app().oneshot(get_request("/view")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["P001"]["name"], "Asha");
        assert_eq!(map["P001"]["bmi"], 25.1);
        assert_eq!(map["P001"]["verdict"], "Overweight");
    }

    #[tokio::test]
    async fn view_of_empty_store_is_empty_object() {
        let response = empty_app().oneshot(get_request("/view")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json, json!({}));
    }

    #[tokio::test]
    async fn patient_detail_includes_derived_fields() {
        let response = seeded_app()
            .oneshot(get_request("/patient/P002"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["name"], "Vikram");
        assert_eq!(json["gender"], "male");
        assert_eq!(json["bmi"], 19.93);
        assert_eq!(json["verdict"], "Normal");
        assert!(json.get("id").is_none());
    }

    #[tokio::test]
    async fn unknown_patient_detail_is_404() {
        let response = seeded_app()
            .oneshot(get_request("/patient/P999"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_json(response).await;
        assert_eq!(json["detail"], "Patient not found");
    }

    // ── Sorting ───────────────────────────────────────────────

    async fn sorted_names(app: Router, uri: &str) -> Vec<String> {
        let response = app.oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        json.as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn sort_by_height_is_ascending_by_default() {
        let names = sorted_names(seeded_app(), "/sort?sort_by=height").await;
        assert_eq!(names, ["Asha", "Meera", "Vikram"]);
    }

    #[tokio::test]
    async fn sort_by_weight_descending() {
        let names = sorted_names(seeded_app(), "/sort?sort_by=weight&order=descending").await;
        assert_eq!(names, ["Meera", "Vikram", "Asha"]);
    }

    #[tokio::test]
    async fn sort_by_derived_bmi() {
        let names = sorted_names(seeded_app(), "/sort?sort_by=bmi").await;
        assert_eq!(names, ["Vikram", "Asha", "Meera"]);
    }

    #[tokio::test]
    async fn sort_rejects_unknown_field() {
        let response = seeded_app()
            .oneshot(get_request("/sort?sort_by=age"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(
            json["detail"],
            "Invalid sort field, select from [\"height\", \"weight\", \"bmi\"]"
        );
    }

    #[tokio::test]
    async fn sort_rejects_missing_field() {
        let response = seeded_app().oneshot(get_request("/sort")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sort_rejects_unknown_order() {
        let response = seeded_app()
            .oneshot(get_request("/sort?sort_by=height&order=sideways"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(
            json["detail"],
            "Invalid sort order, select from [\"ascending\", \"descending\"]"
        );
    }

    // ── Create ────────────────────────────────────────────────

    fn create_body() -> Value {
        json!({
            "id": "P010",
            "name": "Ishan",
            "city": "Ranchi",
            "age": 24,
            "gender": "male",
            "height": 1.76,
            "weight": 54.0
        })
    }

    #[tokio::test]
    async fn create_returns_201_with_profile() {
        let app = empty_app();
        let response = app
            .clone()
            .oneshot(json_request("POST", "/create", &create_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = response_json(response).await;
        assert_eq!(json["message"], "Patient created successfully");
        assert_eq!(json["patient"]["name"], "Ishan");
        assert_eq!(json["patient"]["bmi"], 17.43);
        assert_eq!(json["patient"]["verdict"], "Underweight");

        let response = app.oneshot(get_request("/patient/P010")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_duplicate_id_is_400_and_changes_nothing() {
        let app = seeded_app();
        let mut body = create_body();
        body["id"] = json!("P001");
        body["name"] = json!("Impostor");

        let response = app
            .clone()
            .oneshot(json_request("POST", "/create", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["detail"], "Patient with this ID already exists");

        let response = app.oneshot(get_request("/patient/P001")).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json["name"], "Asha");
    }

    #[tokio::test]
    async fn create_invalid_body_is_422_with_all_violations() {
        let body = json!({
            "id": "P011",
            "name": "Broken",
            "city": "Nowhere",
            "age": 130,
            "gender": "robot",
            "height": 0.0,
            "weight": -5.0
        });
        let response = empty_app()
            .oneshot(json_request("POST", "/create", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = response_json(response).await;
        assert_eq!(json["detail"].as_array().unwrap().len(), 4);
    }

    // ── Edit ──────────────────────────────────────────────────

    #[tokio::test]
    async fn edit_merges_fields_and_recomputes_derived() {
        let app = seeded_app();
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/edit/P001", &json!({"weight": 47.0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["message"], "Patient updated successfully");

        let response = app.oneshot(get_request("/patient/P001")).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json["name"], "Asha");
        assert_eq!(json["weight"], 47.0);
        assert_eq!(json["bmi"], 20.34);
        assert_eq!(json["verdict"], "Normal");
    }

    #[tokio::test]
    async fn edit_unknown_id_is_404() {
        let response = seeded_app()
            .oneshot(json_request("PUT", "/edit/P999", &json!({"weight": 60.0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_json(response).await;
        assert_eq!(json["detail"], "Patient not found");
    }

    #[tokio::test]
    async fn edit_invalid_update_is_422_and_changes_nothing() {
        let app = seeded_app();
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/edit/P001", &json!({"age": 0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app.oneshot(get_request("/patient/P001")).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json["age"], 31);
    }

    #[tokio::test]
    async fn edit_validates_body_before_looking_up_id() {
        let response = seeded_app()
            .oneshot(json_request("PUT", "/edit/P999", &json!({"age": 0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn edit_with_empty_body_succeeds_without_changes() {
        let app = seeded_app();
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/edit/P002", &json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/patient/P002")).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json["weight"], 66.0);
    }

    // ── Delete ────────────────────────────────────────────────

    #[tokio::test]
    async fn delete_removes_the_record() {
        let app = seeded_app();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/delete/P003")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["message"], "Patient deleted successfully");

        let response = app.oneshot(get_request("/patient/P003")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_404() {
        let response = seeded_app()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/delete/P999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_json(response).await;
        assert_eq!(json["detail"], "Patient not found");
    }

    // ── Persistence through the file store ────────────────────

    #[tokio::test]
    async fn records_survive_a_context_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");

        let app = app_router(test_ctx(Arc::new(JsonFileStore::new(&path))));
        let response = app
            .oneshot(json_request("POST", "/create", &create_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // Fresh context over the same file sees the record.
        let app = app_router(test_ctx(Arc::new(JsonFileStore::new(&path))));
        let response = app.oneshot(get_request("/patient/P010")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The file holds base attributes only.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"P010\""));
        assert!(!raw.contains("bmi"));
        assert!(!raw.contains("verdict"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_all_land() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        let app = app_router(test_ctx(Arc::new(JsonFileStore::new(&path))));

        let mut handles = Vec::new();
        for i in 0..8 {
            let app = app.clone();
            handles.push(tokio::spawn(async move {
                let mut body = create_body();
                body["id"] = json!(format!("C{i:03}"));
                let response = app
                    .oneshot(json_request("POST", "/create", &body))
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::CREATED);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let response = app.oneshot(get_request("/view")).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json.as_object().unwrap().len(), 8);
    }
}
