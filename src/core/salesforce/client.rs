//! HTTP implementation of [`SalesforceApi`] on top of `reqwest`

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use super::error::SalesforceError;
use super::soap;
use super::{SalesforceApi, SalesforceSession};
use crate::core::erd::Field;

#[derive(Deserialize)]
struct DescribeGlobal {
    sobjects: Vec<SObjectSummary>,
}

#[derive(Deserialize)]
struct SObjectSummary {
    name: String,
}

#[derive(Deserialize)]
struct SObjectDescribe {
    fields: Vec<Field>,
}

/// Talks to real Salesforce orgs
#[derive(Clone)]
pub struct HttpSalesforce {
    http: reqwest::Client,
    api_version: String,
}

impl HttpSalesforce {
    pub fn new(api_version: impl Into<String>, timeout: Duration) -> Result<Self, SalesforceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_version: api_version.into(),
        })
    }

    /// REST data endpoint for `segments`, each one percent-encoded.
    /// The URL keeps the trailing slash Salesforce expects.
    fn data_url(
        &self,
        session: &SalesforceSession,
        segments: &[&str],
    ) -> Result<reqwest::Url, SalesforceError> {
        let instance = &session.instance_url;
        let invalid = || SalesforceError::Transport(format!("invalid instance URL: {instance}"));
        let mut url = reqwest::Url::parse(instance).map_err(|_| invalid())?;
        let version = format!("v{}", self.api_version);
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["services", "data", version.as_str()])
            .extend(segments)
            .push("");
        Ok(url)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        session: &SalesforceSession,
        segments: &[&str],
    ) -> Result<T, SalesforceError> {
        let response = self
            .http
            .get(self.data_url(session, segments)?)
            .bearer_auth(&session.session_id)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SalesforceError::SessionExpired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SalesforceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

impl SalesforceApi for HttpSalesforce {
    async fn login(
        &self,
        instance_url: &str,
        username: &str,
        password: &str,
        security_token: &str,
    ) -> Result<SalesforceSession, SalesforceError> {
        let domain = soap::login_domain(instance_url);
        let url = soap::login_url(&domain, &self.api_version);
        tracing::debug!("SOAP login against {}", url);

        let response = self
            .http
            .post(url)
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("SOAPAction", "login")
            .body(soap::login_envelope(username, password, security_token))
            .send()
            .await?;

        // Faults come back as HTTP 500 with a SOAP body, so parse regardless of status
        let status = response.status();
        let body = response.text().await?;
        match soap::parse_login_response(&body) {
            Err(SalesforceError::Decode(_)) if !status.is_success() => Err(SalesforceError::Http {
                status: status.as_u16(),
                body,
            }),
            other => other,
        }
    }

    async fn list_objects(
        &self,
        session: &SalesforceSession,
    ) -> Result<Vec<String>, SalesforceError> {
        let global: DescribeGlobal = self.get_json(session, &["sobjects"]).await?;
        Ok(global.sobjects.into_iter().map(|o| o.name).collect())
    }

    async fn describe_fields(
        &self,
        session: &SalesforceSession,
        object: &str,
    ) -> Result<Vec<Field>, SalesforceError> {
        let describe: SObjectDescribe = self
            .get_json(session, &["sobjects", object, "describe"])
            .await?;
        Ok(describe.fields)
    }
}
