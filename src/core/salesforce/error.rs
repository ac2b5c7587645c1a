/// Errors talking to a Salesforce org
#[derive(Debug, thiserror::Error)]
pub enum SalesforceError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Salesforce session expired or invalid")]
    SessionExpired,

    #[error("Salesforce returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request to Salesforce failed: {0}")]
    Transport(String),

    #[error("Unexpected Salesforce response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SalesforceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SalesforceError::Decode(err.to_string())
        } else {
            SalesforceError::Transport(err.to_string())
        }
    }
}

impl From<quick_xml::Error> for SalesforceError {
    fn from(err: quick_xml::Error) -> Self {
        SalesforceError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SalesforceError::AuthenticationFailed("INVALID_LOGIN".into()).to_string(),
            "Authentication failed: INVALID_LOGIN"
        );
        assert_eq!(
            SalesforceError::Http {
                status: 503,
                body: "down".into()
            }
            .to_string(),
            "Salesforce returned HTTP 503: down"
        );
    }
}
