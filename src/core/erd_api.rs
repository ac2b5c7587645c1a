//! ERD REST API endpoints
//!
//! - POST /login - Authenticate against Salesforce, set the session cookie
//! - POST /logout - Drop the session
//! - GET  /get_objects - List sObject names
//! - POST /generate_erd - Build diagram objects and relationships
//!
//! Every endpoint except /login answers 401 when the session cookie is
//! missing, expired, or does not match the `Instance-URL` header.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::core::api::{
    ErrorBody, GENERATE_ERD_PATH, GET_OBJECTS_PATH, GenerateErdRequest, GenerateErdResponse,
    INSTANCE_URL_HEADER, LOGIN_PATH, LOGOUT_PATH, LoginRequest, LoginResponse, SuccessBody,
};
use crate::core::config::Config;
use crate::core::salesforce::{
    SalesforceApi, SalesforceError, SalesforceSession, generate_diagram,
};
use crate::core::session::{SESSION_COOKIE, SessionStore};

/// Errors surfaced by the ERD endpoints
#[derive(Debug, thiserror::Error)]
pub enum ErdApiError {
    #[error("Session expired or not authenticated")]
    NotAuthenticated,

    #[error("Salesforce authentication failed")]
    SalesforceUnauthorized(String),

    #[error("{0}")]
    Upstream(String),
}

impl From<SalesforceError> for ErdApiError {
    fn from(err: SalesforceError) -> Self {
        match err {
            SalesforceError::SessionExpired => {
                ErdApiError::SalesforceUnauthorized(err.to_string())
            }
            SalesforceError::AuthenticationFailed(msg) => ErdApiError::SalesforceUnauthorized(msg),
            other => ErdApiError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for ErdApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ErdApiError::NotAuthenticated => {
                (StatusCode::UNAUTHORIZED, ErrorBody::new(self.to_string()))
            }
            ErdApiError::SalesforceUnauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new(self.to_string()).with_message(message.clone()),
            ),
            ErdApiError::Upstream(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(message.clone()),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// State shared by the ERD handlers
pub struct ErdApiState<S> {
    pub salesforce: S,
    pub sessions: SessionStore,
    pub config: Arc<Config>,
}

impl<S: Clone> Clone for ErdApiState<S> {
    fn clone(&self) -> Self {
        Self {
            salesforce: self.salesforce.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: SalesforceApi> ErdApiState<S> {
    pub fn new(salesforce: S, config: Config) -> Self {
        let ttl = chrono::Duration::minutes(config.session_ttl_minutes);
        Self {
            salesforce,
            sessions: SessionStore::new(ttl),
            config: Arc::new(config),
        }
    }

    fn session_cookie(&self, id: Uuid) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.cookie_secure)
            .build()
    }
}

/// Create the ERD API router
pub fn erd_api_router<S: SalesforceApi>(state: ErdApiState<S>) -> Router {
    Router::new()
        .route(LOGIN_PATH, post(login_handler::<S>))
        .route(LOGOUT_PATH, post(logout_handler::<S>))
        .route(GET_OBJECTS_PATH, get(get_objects_handler::<S>))
        .route(GENERATE_ERD_PATH, post(generate_erd_handler::<S>))
        .with_state(state)
}

/// POST /login
async fn login_handler<S: SalesforceApi>(
    State(state): State<ErdApiState<S>>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ErdApiError> {
    tracing::info!(
        "Login attempt for {} against {}",
        request.username,
        request.instance_url
    );

    let result = state
        .salesforce
        .login(
            &request.instance_url,
            &request.username,
            &request.password,
            &request.security_token,
        )
        .await;

    match result {
        Ok(session) => {
            let instance_url = session.instance_url.clone();
            // Replace any session this browser already had
            if let Some(old) = session_id_from(&jar) {
                state.sessions.remove(&old);
            }
            let id = state.sessions.create(session);
            tracing::info!("Logged in to {}", instance_url);

            Ok((
                jar.add(state.session_cookie(id)),
                Json(LoginResponse::ok(instance_url)),
            ))
        }
        Err(SalesforceError::AuthenticationFailed(message)) => {
            tracing::warn!("Salesforce rejected login: {}", message);
            Ok((jar, Json(LoginResponse::failed(message))))
        }
        Err(err) => {
            tracing::warn!("Login failed: {}", err);
            Err(err.into())
        }
    }
}

/// POST /logout
async fn logout_handler<S: SalesforceApi>(
    State(state): State<ErdApiState<S>>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessBody>) {
    if let Some(id) = session_id_from(&jar) {
        state.sessions.remove(&id);
    }

    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Json(SuccessBody { success: true }),
    )
}

/// GET /get_objects
async fn get_objects_handler<S: SalesforceApi>(
    State(state): State<ErdApiState<S>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Json<Vec<String>>, ErdApiError> {
    let (id, session) = require_session(&state, &jar, &headers)?;

    let objects = state
        .salesforce
        .list_objects(&session)
        .await
        .map_err(|err| upstream_failure(&state, &id, err))?;

    tracing::info!("Listed {} objects for {}", objects.len(), session.instance_url);

    Ok(Json(objects))
}

/// POST /generate_erd
async fn generate_erd_handler<S: SalesforceApi>(
    State(state): State<ErdApiState<S>>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(request): Json<GenerateErdRequest>,
) -> Result<Json<GenerateErdResponse>, ErdApiError> {
    let (id, session) = require_session(&state, &jar, &headers)?;
    let field_limit = request
        .field_limit
        .unwrap_or(state.config.default_field_limit);

    let mut rng = StdRng::from_entropy();
    let (objects, relationships) = generate_diagram(
        &state.salesforce,
        &session,
        &request.objects,
        field_limit,
        &mut rng,
    )
    .await
    .map_err(|err| upstream_failure(&state, &id, err))?;

    tracing::info!(
        "Generated ERD: {} objects, {} relationships",
        objects.len(),
        relationships.len()
    );

    Ok(Json(GenerateErdResponse {
        objects,
        relationships,
        annotations: request.annotations,
    }))
}

fn session_id_from(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Resolve the caller's Salesforce session or reject with 401
fn require_session<S: SalesforceApi>(
    state: &ErdApiState<S>,
    jar: &CookieJar,
    headers: &HeaderMap,
) -> Result<(Uuid, SalesforceSession), ErdApiError> {
    let id = session_id_from(jar).ok_or(ErdApiError::NotAuthenticated)?;
    let session = state
        .sessions
        .get(&id)
        .ok_or(ErdApiError::NotAuthenticated)?;

    let claimed = headers
        .get(INSTANCE_URL_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(claimed) = claimed
        && claimed.trim_end_matches('/') != session.instance_url.trim_end_matches('/')
    {
        tracing::warn!(
            "Instance-URL {} does not match session instance {}",
            claimed,
            session.instance_url
        );
        return Err(ErdApiError::NotAuthenticated);
    }

    Ok((id, session))
}

/// Log a Salesforce failure; a rejected session token also ends our session
fn upstream_failure<S: SalesforceApi>(
    state: &ErdApiState<S>,
    id: &Uuid,
    err: SalesforceError,
) -> ErdApiError {
    tracing::warn!("Salesforce call failed: {}", err);
    if matches!(err, SalesforceError::SessionExpired) {
        state.sessions.remove(id);
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::erd::{Annotation, Field};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use std::collections::HashMap;
    use tower::ServiceExt;

    const INSTANCE: &str = "https://na1.salesforce.com";

    #[derive(Clone, Default)]
    struct MockSalesforce {
        reject_login: bool,
        token_revoked: bool,
        objects: Vec<String>,
        describes: HashMap<String, Vec<Field>>,
    }

    impl MockSalesforce {
        fn org() -> Self {
            let mut describes = HashMap::new();
            describes.insert(
                "Account".to_string(),
                vec![
                    Field::new("Id", "id"),
                    Field::new("Name", "string"),
                    Field::reference("OwnerId", vec!["User".into()]),
                ],
            );
            Self {
                objects: vec!["Account".into(), "Contact".into()],
                describes,
                ..Default::default()
            }
        }
    }

    impl SalesforceApi for MockSalesforce {
        async fn login(
            &self,
            _instance_url: &str,
            _username: &str,
            _password: &str,
            _security_token: &str,
        ) -> Result<SalesforceSession, SalesforceError> {
            if self.reject_login {
                return Err(SalesforceError::AuthenticationFailed(
                    "INVALID_LOGIN: Invalid username, password, security token".to_string(),
                ));
            }
            Ok(SalesforceSession {
                instance_url: INSTANCE.to_string(),
                session_id: "00D!session".to_string(),
            })
        }

        async fn list_objects(
            &self,
            _session: &SalesforceSession,
        ) -> Result<Vec<String>, SalesforceError> {
            if self.token_revoked {
                return Err(SalesforceError::SessionExpired);
            }
            Ok(self.objects.clone())
        }

        async fn describe_fields(
            &self,
            _session: &SalesforceSession,
            object: &str,
        ) -> Result<Vec<Field>, SalesforceError> {
            if self.token_revoked {
                return Err(SalesforceError::SessionExpired);
            }
            self.describes
                .get(object)
                .cloned()
                .ok_or_else(|| SalesforceError::Http {
                    status: 404,
                    body: format!("NOT_FOUND: {object}"),
                })
        }
    }

    fn app(mock: MockSalesforce) -> (Router, SessionStore) {
        let state = ErdApiState::new(mock, Config::defaults());
        let sessions = state.sessions.clone();
        (erd_api_router(state), sessions)
    }

    fn login_body() -> Body {
        Body::from(
            serde_json::json!({
                "instance_url": "https://test.salesforce.com",
                "username": "test@example.com",
                "password": "password123",
                "security_token": "token123"
            })
            .to_string(),
        )
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::post(LOGIN_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(login_body())
                    .unwrap(),
            )
            .await
            .unwrap();

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_login_success() {
        let (app, sessions) = app(MockSalesforce::org());

        let response = app
            .oneshot(
                Request::post(LOGIN_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(login_body())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().starts_with("sferd_session="));
        assert!(cookie.to_str().unwrap().contains("HttpOnly"));

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["instance_url"], INSTANCE);
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_login_failure_is_200_with_error() {
        let mock = MockSalesforce {
            reject_login: true,
            ..MockSalesforce::org()
        };
        let (app, sessions) = app(mock);

        let response = app
            .oneshot(
                Request::post(LOGIN_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(login_body())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Authentication failed");
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_get_objects_success() {
        let (app, _) = app(MockSalesforce::org());
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::get(GET_OBJECTS_PATH)
                    .header(header::COOKIE, cookie)
                    .header(INSTANCE_URL_HEADER, INSTANCE)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json, serde_json::json!(["Account", "Contact"]));
    }

    #[tokio::test]
    async fn test_get_objects_no_session() {
        let (app, _) = app(MockSalesforce::org());

        let response = app
            .oneshot(Request::get(GET_OBJECTS_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Session expired or not authenticated");
    }

    #[tokio::test]
    async fn test_mismatched_instance_header_is_rejected() {
        let (app, _) = app(MockSalesforce::org());
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::get(GET_OBJECTS_PATH)
                    .header(header::COOKIE, cookie)
                    .header(INSTANCE_URL_HEADER, "https://eu5.salesforce.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_revoked_token_returns_401_and_drops_session() {
        let mock = MockSalesforce {
            token_revoked: true,
            ..MockSalesforce::org()
        };
        let (app, sessions) = app(mock);
        let cookie = login(&app).await;
        assert_eq!(sessions.len(), 1);

        let response = app
            .oneshot(
                Request::get(GET_OBJECTS_PATH)
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(response).await;
        assert_eq!(json["error"], "Salesforce authentication failed");
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_generate_erd_success() {
        let (app, _) = app(MockSalesforce::org());
        let cookie = login(&app).await;

        let body = serde_json::json!({
            "objects": ["Account"],
            "annotations": [{"text": "Core objects"}],
            "field_limit": 5
        });
        let response = app
            .oneshot(
                Request::post(GENERATE_ERD_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, cookie)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let erd: GenerateErdResponse =
            serde_json::from_value(json_body(response).await).unwrap();

        assert_eq!(erd.objects.len(), 1);
        assert_eq!(erd.objects[0].name, "Account");
        assert_eq!(erd.objects[0].fields.len(), 3);
        assert_eq!(erd.objects[0].fields[0].name, "OwnerId");

        assert_eq!(erd.relationships.len(), 1);
        assert_eq!(erd.relationships[0].from, "Account");
        assert_eq!(erd.relationships[0].to, "User");
        assert_eq!(erd.relationships[0].field_name, "OwnerId");

        assert_eq!(erd.annotations, vec![Annotation::new("Core objects")]);
    }

    async fn generate_fields(app: Router, body: serde_json::Value) -> Vec<String> {
        let cookie = login(&app).await;
        let response = app
            .oneshot(
                Request::post(GENERATE_ERD_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, cookie)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let erd: GenerateErdResponse =
            serde_json::from_value(json_body(response).await).unwrap();
        erd.objects[0].fields.iter().map(|f| f.name.clone()).collect()
    }

    #[tokio::test]
    async fn test_generate_erd_without_limit_uses_configured_default() {
        let config = Config {
            default_field_limit: 1,
            ..Config::defaults()
        };
        let app = erd_api_router(ErdApiState::new(MockSalesforce::org(), config));

        let fields = generate_fields(app, serde_json::json!({"objects": ["Account"]})).await;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], "OwnerId");
    }

    #[tokio::test]
    async fn test_generate_erd_explicit_limit_overrides_default() {
        let config = Config {
            default_field_limit: 1,
            ..Config::defaults()
        };
        let app = erd_api_router(ErdApiState::new(MockSalesforce::org(), config));

        let body = serde_json::json!({"objects": ["Account"], "field_limit": 0});
        assert_eq!(generate_fields(app, body).await, vec!["OwnerId".to_string()]);
    }

    #[tokio::test]
    async fn test_generate_erd_unknown_object_is_500() {
        let (app, _) = app(MockSalesforce::org());
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::post(GENERATE_ERD_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, cookie)
                    .body(Body::from(r#"{"objects": ["Nope__c"], "annotations": []}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_generate_erd_no_session() {
        let (app, _) = app(MockSalesforce::org());

        let response = app
            .oneshot(
                Request::post(GENERATE_ERD_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"objects": ["Account"], "annotations": [], "field_limit": 5}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let (app, sessions) = app(MockSalesforce::org());
        let cookie = login(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::post(LOGOUT_PATH)
                    .header(header::COOKIE, cookie.clone())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(sessions.is_empty());

        let response = app
            .oneshot(
                Request::get(GET_OBJECTS_PATH)
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_conversion() {
        assert!(matches!(
            ErdApiError::from(SalesforceError::SessionExpired),
            ErdApiError::SalesforceUnauthorized(_)
        ));
        assert!(matches!(
            ErdApiError::from(SalesforceError::Transport("timeout".into())),
            ErdApiError::Upstream(_)
        ));
    }
}
