//! Browser-side calls into the ERD REST backend

#[cfg(not(feature = "ssr"))]
use crate::core::api::{
    GENERATE_ERD_PATH, GET_OBJECTS_PATH, INSTANCE_URL_HEADER, LOGIN_PATH, LOGOUT_PATH,
};
use crate::core::api::{GenerateErdRequest, GenerateErdResponse, LoginRequest, LoginResponse};

/// Outcome of a failed backend call
#[derive(Clone, Debug, PartialEq)]
pub enum ApiCallError {
    /// The server no longer recognises the session (HTTP 401)
    Unauthorized,
    /// Network failure, non-2xx status or an undecodable body
    Failed(String),
}

impl std::fmt::Display for ApiCallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiCallError::Unauthorized => write!(f, "Session expired. Please log in again."),
            ApiCallError::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

/// Map an HTTP status to the error the editor reacts to
#[cfg_attr(feature = "ssr", allow(dead_code))]
fn status_result(status: u16) -> Result<(), ApiCallError> {
    match status {
        401 => Err(ApiCallError::Unauthorized),
        200..=299 => Ok(()),
        status => Err(ApiCallError::Failed(format!("HTTP {}", status))),
    }
}

#[cfg(not(feature = "ssr"))]
fn check_status(response: &gloo_net::http::Response) -> Result<(), ApiCallError> {
    status_result(response.status())
}

#[cfg(not(feature = "ssr"))]
fn network_error(err: gloo_net::Error) -> ApiCallError {
    ApiCallError::Failed(err.to_string())
}

/// POST /login. Authentication failures come back as `success: false`.
#[cfg(not(feature = "ssr"))]
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, ApiCallError> {
    use gloo_net::http::Request;

    let response = Request::post(LOGIN_PATH)
        .json(request)
        .map_err(network_error)?
        .send()
        .await
        .map_err(network_error)?;

    check_status(&response)?;
    response.json::<LoginResponse>().await.map_err(network_error)
}

#[cfg(feature = "ssr")]
pub async fn login(_request: &LoginRequest) -> Result<LoginResponse, ApiCallError> {
    Err(ApiCallError::Failed("Login not available on server".to_string()))
}

/// POST /logout. Failures are ignored, local state is cleared regardless.
#[cfg(not(feature = "ssr"))]
pub async fn logout() {
    use gloo_net::http::Request;

    if let Err(e) = Request::post(LOGOUT_PATH).send().await {
        leptos::logging::warn!("Logout request failed: {}", e);
    }
}

#[cfg(feature = "ssr")]
pub async fn logout() {}

/// GET /get_objects
#[cfg(not(feature = "ssr"))]
pub async fn get_objects(instance_url: &str) -> Result<Vec<String>, ApiCallError> {
    use gloo_net::http::Request;

    let response = Request::get(GET_OBJECTS_PATH)
        .header(INSTANCE_URL_HEADER, instance_url)
        .send()
        .await
        .map_err(network_error)?;

    check_status(&response)?;
    response.json::<Vec<String>>().await.map_err(network_error)
}

#[cfg(feature = "ssr")]
pub async fn get_objects(_instance_url: &str) -> Result<Vec<String>, ApiCallError> {
    Err(ApiCallError::Failed("Not available on server".to_string()))
}

/// POST /generate_erd
#[cfg(not(feature = "ssr"))]
pub async fn generate_erd(
    instance_url: &str,
    request: &GenerateErdRequest,
) -> Result<GenerateErdResponse, ApiCallError> {
    use gloo_net::http::Request;

    let response = Request::post(GENERATE_ERD_PATH)
        .header(INSTANCE_URL_HEADER, instance_url)
        .json(request)
        .map_err(network_error)?
        .send()
        .await
        .map_err(network_error)?;

    check_status(&response)?;
    response
        .json::<GenerateErdResponse>()
        .await
        .map_err(network_error)
}

#[cfg(feature = "ssr")]
pub async fn generate_erd(
    _instance_url: &str,
    _request: &GenerateErdRequest,
) -> Result<GenerateErdResponse, ApiCallError> {
    Err(ApiCallError::Failed("Not available on server".to_string()))
}
