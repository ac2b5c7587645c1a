//! Wire types shared by the REST backend and the browser client
//!
//! Endpoints:
//! - POST /login - Authenticate against a Salesforce org
//! - GET  /get_objects - List sObject names of the org
//! - POST /generate_erd - Describe selected objects into a diagram
//! - POST /logout - Drop the server-side session

use serde::{Deserialize, Serialize};

use super::erd::{Annotation, ErdObject, Relationship};

pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const GET_OBJECTS_PATH: &str = "/get_objects";
pub const GENERATE_ERD_PATH: &str = "/generate_erd";

/// Header carrying the org instance URL the client believes it is signed into
pub const INSTANCE_URL_HEADER: &str = "Instance-URL";

/// Local storage key holding the instance URL on the client
pub const STORAGE_KEY_INSTANCE_URL: &str = "instance_url";

pub const DEFAULT_FIELD_LIMIT: usize = 5;

/// Field limit choices offered by the editor. 999 means "all fields".
pub const FIELD_LIMIT_OPTIONS: [(usize, &str); 4] = [
    (5, "5 Fields"),
    (10, "10 Fields"),
    (20, "20 Fields"),
    (999, "All Fields"),
];

/// Salesforce environment picked on the login form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginEnvironment {
    Production,
    Sandbox,
    Custom,
}

impl LoginEnvironment {
    pub const ALL: [LoginEnvironment; 3] = [
        LoginEnvironment::Production,
        LoginEnvironment::Sandbox,
        LoginEnvironment::Custom,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            LoginEnvironment::Production => "production",
            LoginEnvironment::Sandbox => "sandbox",
            LoginEnvironment::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoginEnvironment::Production => "Production",
            LoginEnvironment::Sandbox => "Sandbox",
            LoginEnvironment::Custom => "Custom",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.value() == value)
    }

    /// Instance URL sent to `/login`. Custom requires a non-blank URL.
    pub fn instance_url(&self, custom_url: &str) -> Option<String> {
        match self {
            LoginEnvironment::Production => Some("https://login.salesforce.com".to_string()),
            LoginEnvironment::Sandbox => Some("https://test.salesforce.com".to_string()),
            LoginEnvironment::Custom => {
                let url = custom_url.trim();
                (!url.is_empty()).then(|| url.to_string())
            }
        }
    }
}

/// POST /login body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub instance_url: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub security_token: String,
}

/// POST /login response. Authentication failures still answer 200.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn ok(instance_url: impl Into<String>) -> Self {
        Self {
            success: true,
            instance_url: Some(instance_url.into()),
            error: None,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            instance_url: None,
            error: Some("Authentication failed".to_string()),
            message: Some(message.into()),
        }
    }
}

/// POST /generate_erd body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateErdRequest {
    pub objects: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub field_limit: Option<usize>,
}

/// POST /generate_erd response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateErdResponse {
    pub objects: Vec<ErdObject>,
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Error body returned with any non-2xx status
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Generic `{ "success": true }` body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuccessBody {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            LoginEnvironment::Production.instance_url(""),
            Some("https://login.salesforce.com".to_string())
        );
        assert_eq!(
            LoginEnvironment::Sandbox.instance_url("ignored"),
            Some("https://test.salesforce.com".to_string())
        );
        assert_eq!(
            LoginEnvironment::Custom.instance_url(" https://acme.my.salesforce.com "),
            Some("https://acme.my.salesforce.com".to_string())
        );
        assert_eq!(LoginEnvironment::Custom.instance_url("  "), None);
    }

    #[test]
    fn test_environment_parse() {
        for env in LoginEnvironment::ALL {
            assert_eq!(LoginEnvironment::parse(env.value()), Some(env));
        }
        assert_eq!(LoginEnvironment::parse("staging"), None);
    }

    #[test]
    fn test_login_request_token_optional() {
        let json = r#"{
            "instance_url": "https://test.salesforce.com",
            "username": "test@example.com",
            "password": "password123"
        }"#;

        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "test@example.com");
        assert!(request.security_token.is_empty());
    }

    #[test]
    fn test_login_response_shapes() {
        let ok = serde_json::to_value(LoginResponse::ok("https://na1.salesforce.com")).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["instance_url"], "https://na1.salesforce.com");
        assert!(ok.get("error").is_none());

        let failed = serde_json::to_value(LoginResponse::failed("INVALID_LOGIN")).unwrap();
        assert_eq!(failed["success"], false);
        assert_eq!(failed["error"], "Authentication failed");
        assert_eq!(failed["message"], "INVALID_LOGIN");
    }

    #[test]
    fn test_generate_request_defaults() {
        let request: GenerateErdRequest =
            serde_json::from_str(r#"{"objects": ["Account"]}"#).unwrap();
        assert_eq!(request.objects, vec!["Account".to_string()]);
        assert!(request.annotations.is_empty());
        assert_eq!(request.field_limit, None);
    }

    #[test]
    fn test_error_body_serialization() {
        let body = ErrorBody::new("Session expired or not authenticated");
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(!json.contains("message"));

        let body = ErrorBody::new("x").with_message("y");
        assert_eq!(body.message.as_deref(), Some("y"));
    }
}
