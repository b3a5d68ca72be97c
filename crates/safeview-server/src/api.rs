use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use safeview_core::detection::{AnalysisRequest, Capabilities, ContentClassifier, DetectionResult};
use safeview_core::models::{
    AnalysisStats, ContentAnalysis, Device, DevicePatch, NewContentAnalysis, NewDevice,
    NewSubscription, NewUser, RiskBreakdown, Subscription, SubscriptionStatus, SubscriptionTier,
    User,
};
use safeview_core::plans;
use safeview_core::wizard::{FieldError, SignupForm, SignupWizard};
use safeview_store::MemStore;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::extract::Json;
use crate::rate_limit::{rate_limit_middleware, RateLimiter};

#[derive(Clone)]
pub struct AppState {
    pub store: MemStore,
    pub classifier: Arc<dyn ContentClassifier + Send + Sync>,
    pub rate_limiter: RateLimiter,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/signup", post(signup))
        .route("/api/user", get(current_user))
        .route("/api/devices", get(list_devices))
        .route("/api/devices", post(create_device))
        .route("/api/devices/:id/protection", put(toggle_protection))
        .route("/api/devices/:id", delete(delete_device))
        .route("/api/content-analysis", get(list_analyses))
        .route("/api/content-analysis", post(create_analysis))
        .route("/api/content-analysis/stats", get(analysis_stats))
        .route("/api/subscription", get(current_subscription))
        .route("/api/ai-detection/analyze", post(analyze_content))
        .route("/api/ai-detection/capabilities", get(detection_capabilities))
        .route("/api/dashboard", get(dashboard))
        .route("/api/analytics/threats", get(threat_analytics))
        .layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    instance: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignupResponse {
    message: &'static str,
    user_id: Uuid,
    trial_ends_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateDeviceRequest {
    name: String,
    #[serde(rename = "type")]
    kind: safeview_core::models::DeviceKind,
    #[serde(default = "default_true")]
    is_online: bool,
    #[serde(default = "default_true")]
    is_protected: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProtectionResponse {
    success: bool,
    is_protected: bool,
}

#[derive(Deserialize)]
struct ListParams {
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct WindowParams {
    days: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    content_url: String,
    platform: String,
    device_id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardResponse {
    total_devices: usize,
    protected_devices: usize,
    online_devices: usize,
    subscription_tier: SubscriptionTier,
    stats: AnalysisStats,
    recent_analyses: Vec<ContentAnalysis>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatAnalyticsResponse {
    daily_threats: BTreeMap<NaiveDate, RiskBreakdown>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        instance: state.config.instance_name.clone(),
    })
}

/// Resolve "the current user". There is no session layer in the demo, so
/// this is a lookup by the configured email.
async fn demo_user(state: &AppState) -> Result<User, ServerError> {
    state
        .store
        .get_user_by_email(&state.config.demo_user_email)
        .await
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))
}

/// Signup drives the wizard state machine: the submitted form is
/// validated on review and only a confirmed form reaches the store.
async fn signup(
    State(state): State<AppState>,
    Json(form): Json<SignupForm>,
) -> Result<(StatusCode, Json<SignupResponse>), ServerError> {
    let SignupWizard::Confirmed(form) = SignupWizard::new().review(form)?.confirm()? else {
        return Err(ServerError::Internal("signup wizard did not confirm".to_string()));
    };

    let plan = plans::plan_for(form.subscription_tier);
    let trial_ends_at = Some(Utc::now() + Duration::days(plan.trial_days));

    let user = state
        .store
        .create_user(NewUser {
            email: form.email,
            name: form.name,
            subscription_tier: form.subscription_tier,
            subscription_status: SubscriptionStatus::Trial,
            trial_ends_at,
        })
        .await?;

    state
        .store
        .create_subscription(NewSubscription {
            user_id: user.id,
            tier: plan.tier,
            status: SubscriptionStatus::Trial,
            price_per_month: plan.price_per_month,
            max_devices: plan.max_devices,
            max_students: plan.max_students,
            features: plan.features.iter().map(|f| f.to_string()).collect(),
        })
        .await?;

    info!(user = %user.id, tier = ?plan.tier, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Account created successfully",
            user_id: user.id,
            trial_ends_at: user.trial_ends_at,
        }),
    ))
}

async fn current_user(State(state): State<AppState>) -> Result<Json<User>, ServerError> {
    Ok(Json(demo_user(&state).await?))
}

async fn list_devices(State(state): State<AppState>) -> Result<Json<Vec<Device>>, ServerError> {
    let user = demo_user(&state).await?;
    Ok(Json(state.store.devices_for_user(user.id).await))
}

async fn create_device(
    State(state): State<AppState>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<(StatusCode, Json<Device>), ServerError> {
    if req.name.trim().is_empty() {
        return Err(ServerError::Validation(vec![FieldError {
            field: "name",
            message: "device name must not be empty".to_string(),
        }]));
    }

    let user = demo_user(&state).await?;
    let device = state
        .store
        .create_device(NewDevice {
            user_id: user.id,
            name: req.name,
            kind: req.kind,
            is_online: req.is_online,
            is_protected: req.is_protected,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(device)))
}

/// Flip `isProtected` on one of the current user's devices and refresh
/// its heartbeat.
async fn toggle_protection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProtectionResponse>, ServerError> {
    let user = demo_user(&state).await?;
    let device = owned_device(&state, user.id, id).await?;

    let updated = state
        .store
        .update_device(
            device.id,
            DevicePatch {
                is_protected: Some(!device.is_protected),
                last_seen: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await
        .ok_or_else(|| ServerError::NotFound("Device not found".to_string()))?;

    Ok(Json(ProtectionResponse {
        success: true,
        is_protected: updated.is_protected,
    }))
}

async fn delete_device(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let user = demo_user(&state).await?;
    owned_device(&state, user.id, id).await?;

    state.store.delete_device(id).await;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Fetch a device and check it belongs to `user_id`. Foreign devices are
/// reported as absent rather than forbidden, so ids cannot be probed.
async fn owned_device(state: &AppState, user_id: Uuid, id: Uuid) -> Result<Device, ServerError> {
    state
        .store
        .get_device(id)
        .await
        .filter(|d| d.user_id == user_id)
        .ok_or_else(|| ServerError::NotFound("Device not found".to_string()))
}

async fn list_analyses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ContentAnalysis>>, ServerError> {
    let user = demo_user(&state).await?;
    let limit = params.limit.unwrap_or(50);
    Ok(Json(state.store.analyses_for_user(user.id, limit).await))
}

async fn create_analysis(
    State(state): State<AppState>,
    Json(new): Json<NewContentAnalysis>,
) -> Result<(StatusCode, Json<ContentAnalysis>), ServerError> {
    let mut errors = Vec::new();
    if new.platform.trim().is_empty() {
        errors.push(FieldError {
            field: "platform",
            message: "platform must not be empty".to_string(),
        });
    }
    if new.ai_confidence > 100 {
        errors.push(FieldError {
            field: "aiConfidence",
            message: "confidence must be between 0 and 100".to_string(),
        });
    }
    if !errors.is_empty() {
        return Err(ServerError::Validation(errors));
    }

    let analysis = state.store.create_analysis(new).await?;
    Ok((StatusCode::CREATED, Json(analysis)))
}

async fn analysis_stats(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> Result<Json<AnalysisStats>, ServerError> {
    let user = demo_user(&state).await?;
    let days = params.days.unwrap_or(30);
    Ok(Json(state.store.analysis_stats(user.id, days).await))
}

async fn current_subscription(
    State(state): State<AppState>,
) -> Result<Json<Subscription>, ServerError> {
    let user = demo_user(&state).await?;
    state
        .store
        .subscription_for_user(user.id)
        .await
        .map(Json)
        .ok_or_else(|| ServerError::NotFound("Subscription not found".to_string()))
}

/// Run the classifier on a content URL. The result is returned to the
/// caller but not recorded; `POST /api/content-analysis` persists events.
async fn analyze_content(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<DetectionResult>, ServerError> {
    let mut errors = Vec::new();
    if req.content_url.trim().is_empty() {
        errors.push(FieldError {
            field: "contentUrl",
            message: "contentUrl must not be empty".to_string(),
        });
    }
    if req.platform.trim().is_empty() {
        errors.push(FieldError {
            field: "platform",
            message: "platform must not be empty".to_string(),
        });
    }
    if !errors.is_empty() {
        return Err(ServerError::Validation(errors));
    }

    let user = demo_user(&state).await?;
    let result = state.classifier.analyze(&AnalysisRequest {
        content_url: req.content_url,
        platform: req.platform,
        device_id: req.device_id,
        user_id: user.id,
    });

    info!(
        risk = result.risk_level.as_str(),
        confidence = result.ai_confidence,
        blocked = result.was_blocked,
        "Content analyzed"
    );

    Ok(Json(result))
}

async fn detection_capabilities(State(state): State<AppState>) -> Json<Capabilities> {
    Json(state.classifier.capabilities())
}

/// Everything the dashboard landing view needs in one call.
async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ServerError> {
    let user = demo_user(&state).await?;

    let devices = state.store.devices_for_user(user.id).await;
    let stats = state.store.analysis_stats(user.id, 30).await;
    let recent_analyses = state.store.analyses_for_user(user.id, 5).await;

    Ok(Json(DashboardResponse {
        total_devices: devices.len(),
        protected_devices: devices.iter().filter(|d| d.is_protected).count(),
        online_devices: devices.iter().filter(|d| d.is_online).count(),
        subscription_tier: user.subscription_tier,
        stats,
        recent_analyses,
    }))
}

async fn threat_analytics(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> Result<Json<ThreatAnalyticsResponse>, ServerError> {
    let user = demo_user(&state).await?;
    let days = params.days.unwrap_or(30);
    let daily_threats = state.store.daily_risk_breakdown(user.id, days).await;
    Ok(Json(ThreatAnalyticsResponse { daily_threats }))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    use safeview_core::detection::HeuristicClassifier;
    use safeview_store::seed;

    async fn test_app() -> (Router, User) {
        let store = MemStore::new();
        let user = seed::seed_demo_data(&store).await.unwrap();
        let state = AppState {
            store,
            classifier: Arc::new(HeuristicClassifier::with_seed(42)),
            rate_limiter: RateLimiter::new(0),
            config: Arc::new(ServerConfig::default()),
        };
        (build_router(state), user)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn signup_body(email: &str) -> serde_json::Value {
        serde_json::json!({
            "name": "New Family",
            "email": email,
            "password": "longenough",
            "subscriptionTier": "family",
            "numberOfDevices": 2
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_signup_creates_user_and_subscription() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            Some(signup_body("new@example.com")),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Account created successfully");
        assert!(body["userId"].is_string());
        assert!(body["trialEndsAt"].is_string());
    }

    #[tokio::test]
    async fn test_signup_missing_field_is_structured_400() {
        let (app, _) = test_app().await;
        let mut body = signup_body("new@example.com");
        body.as_object_mut().unwrap().remove("email");
        let (status, body) = send(&app, Method::POST, "/api/auth/signup", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid data");
        assert_eq!(body["errors"][0]["field"], "body");
    }

    #[tokio::test]
    async fn test_signup_mistyped_field_is_structured_400() {
        let (app, _) = test_app().await;
        let mut body = signup_body("new@example.com");
        body["numberOfDevices"] = serde_json::json!("three");
        let (status, body) = send(&app, Method::POST, "/api/auth/signup", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid data");
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            Some(signup_body("parent@example.com")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User already exists with this email");
    }

    #[tokio::test]
    async fn test_signup_validation_errors() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            Some(serde_json::json!({
                "name": "X",
                "email": "nope",
                "password": "short",
                "subscriptionTier": "family",
                "numberOfDevices": 0
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid data");
        assert_eq!(body["errors"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_current_user() {
        let (app, user) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/user", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "parent@example.com");
        assert_eq!(body["id"], user.id.to_string());
    }

    #[tokio::test]
    async fn test_list_devices() {
        let (app, user) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/devices", None).await;
        assert_eq!(status, StatusCode::OK);

        let devices = body.as_array().unwrap();
        assert_eq!(devices.len(), 3);
        for device in devices {
            assert_eq!(device["userId"], user.id.to_string());
        }
    }

    #[tokio::test]
    async fn test_create_device_belongs_to_demo_user() {
        let (app, user) = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/devices",
            Some(serde_json::json!({ "name": "Mia's Tablet", "type": "tablet" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["userId"], user.id.to_string());
        assert_eq!(body["type"], "tablet");
        assert_eq!(body["isProtected"], true);
    }

    #[tokio::test]
    async fn test_toggle_protection() {
        let (app, _) = test_app().await;
        let (_, devices) = send(&app, Method::GET, "/api/devices", None).await;
        let id = devices[0]["id"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, Method::PUT, &format!("/api/devices/{id}/protection"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        // Seed devices start protected, so one toggle turns it off.
        assert_eq!(body["isProtected"], false);
    }

    #[tokio::test]
    async fn test_delete_device() {
        let (app, _) = test_app().await;
        let (_, devices) = send(&app, Method::GET, "/api/devices", None).await;
        let id = devices[0]["id"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, Method::DELETE, &format!("/api/devices/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], true);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/devices/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analysis_roundtrip_and_ordering() {
        let (app, user) = test_app().await;
        let (_, devices) = send(&app, Method::GET, "/api/devices", None).await;
        let device_id = devices[0]["id"].as_str().unwrap().to_string();

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/content-analysis",
            Some(serde_json::json!({
                "userId": user.id,
                "deviceId": device_id,
                "platform": "Instagram",
                "contentUrl": "https://instagram.com/p/abc",
                "riskLevel": "medium",
                "aiConfidence": 75,
                "wasBlocked": true,
                "detectionReasons": ["behavioral_pattern_anomaly"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, listed) = send(&app, Method::GET, "/api/content-analysis", None).await;
        assert_eq!(status, StatusCode::OK);
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 4);
        // The new record is the most recent and comes first.
        assert_eq!(listed[0]["id"], created["id"]);

        let (_, limited) = send(&app, Method::GET, "/api/content-analysis?limit=2", None).await;
        assert_eq!(limited.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_analysis_rejects_bad_confidence() {
        let (app, user) = test_app().await;
        let (_, devices) = send(&app, Method::GET, "/api/devices", None).await;
        let device_id = devices[0]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/content-analysis",
            Some(serde_json::json!({
                "userId": user.id,
                "deviceId": device_id,
                "platform": "Instagram",
                "riskLevel": "safe",
                "aiConfidence": 101,
                "wasBlocked": false
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "aiConfidence");
    }

    #[tokio::test]
    async fn test_stats_fixture() {
        let (app, _) = test_app().await;
        let (status, body) =
            send(&app, Method::GET, "/api/content-analysis/stats?days=30", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalAnalyzed"], 3);
        assert_eq!(body["totalBlocked"], 2);
        assert_eq!(body["riskBreakdown"]["safe"], 1);
        assert_eq!(body["riskBreakdown"]["medium"], 1);
        assert_eq!(body["riskBreakdown"]["high"], 1);
    }

    #[tokio::test]
    async fn test_subscription() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/subscription", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier"], "family");
        assert_eq!(body["pricePerMonth"], 900);
    }

    #[tokio::test]
    async fn test_analyze_trigger_url_is_high_risk() {
        let (app, _) = test_app().await;
        let (_, devices) = send(&app, Method::GET, "/api/devices", None).await;
        let device_id = devices[0]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai-detection/analyze",
            Some(serde_json::json!({
                "contentUrl": "https://example.com/deepfake-video",
                "platform": "YouTube",
                "deviceId": device_id
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["riskLevel"], "high");
        assert_eq!(body["wasBlocked"], true);
        let confidence = body["aiConfidence"].as_u64().unwrap();
        assert!((90..=99).contains(&confidence));
        assert!(!body["detectionReasons"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_fields() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai-detection/analyze",
            Some(serde_json::json!({
                "contentUrl": "",
                "platform": "",
                "deviceId": Uuid::new_v4()
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_capabilities() {
        let (app, _) = test_app().await;
        let (status, body) =
            send(&app, Method::GET, "/api/ai-detection/capabilities", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accuracyRate"], 0.94);
        assert!(body["detectionReasons"].as_array().unwrap().len() >= 9);
    }

    #[tokio::test]
    async fn test_dashboard() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/dashboard", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalDevices"], 3);
        assert_eq!(body["protectedDevices"], 3);
        assert_eq!(body["onlineDevices"], 2);
        assert_eq!(body["subscriptionTier"], "family");
        assert_eq!(body["stats"]["totalAnalyzed"], 3);
        assert_eq!(body["recentAnalyses"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_threat_analytics_groups_by_day() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/analytics/threats?days=30", None).await;

        assert_eq!(status, StatusCode::OK);
        let daily = body["dailyThreats"].as_object().unwrap();
        assert_eq!(daily.len(), 1);
        let today = daily.values().next().unwrap();
        let total = today["safe"].as_u64().unwrap()
            + today["medium"].as_u64().unwrap()
            + today["high"].as_u64().unwrap();
        assert_eq!(total, 3);
    }
}
