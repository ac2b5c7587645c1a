//! SOAP partner API `login` call: request envelope and response parsing

use quick_xml::Reader;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::Event;

use super::SalesforceSession;
use super::error::SalesforceError;

const SESSION_ID_TAG: &str = "sessionId";
const SERVER_URL_TAG: &str = "serverUrl";
const FAULT_TAG: &str = "faultstring";

/// Turn the instance URL typed on the login form into a login domain.
///
/// `https://test.salesforce.com` becomes `test`,
/// `https://acme.my.salesforce.com` becomes `acme.my`.
pub fn login_domain(instance_url: &str) -> String {
    let trimmed = instance_url.trim().trim_end_matches('/');
    let without_scheme = trimmed.strip_prefix("https://").unwrap_or(trimmed);
    without_scheme
        .strip_suffix(".salesforce.com")
        .unwrap_or(without_scheme)
        .to_string()
}

/// SOAP endpoint for the `login` call
pub fn login_url(domain: &str, api_version: &str) -> String {
    format!("https://{domain}.salesforce.com/services/Soap/u/{api_version}")
}

/// Build the login envelope. The security token is appended to the password.
pub fn login_envelope(username: &str, password: &str, security_token: &str) -> String {
    let secret = format!("{password}{security_token}");
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
        xmlns:urn="urn:partner.soap.sforce.com">
    <env:Header>
        <urn:CallOptions>
            <urn:client>sferd</urn:client>
            <urn:defaultNamespace>sf</urn:defaultNamespace>
        </urn:CallOptions>
    </env:Header>
    <env:Body>
        <n1:login xmlns:n1="urn:partner.soap.sforce.com">
            <n1:username>{}</n1:username>
            <n1:password>{}</n1:password>
        </n1:login>
    </env:Body>
</env:Envelope>"#,
        escape(username),
        escape(secret.as_str())
    )
}

/// Parse a `login` response body into a session.
///
/// A SOAP fault yields `AuthenticationFailed` with the fault string.
pub fn parse_login_response(body: &str) -> Result<SalesforceSession, SalesforceError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut current: Option<String> = None;
    let mut session_id = String::new();
    let mut server_url = String::new();
    let mut fault: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                current = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::End(_) => current = None,
            Event::Text(t) => {
                let raw = String::from_utf8_lossy(&t).into_owned();
                let text = unescape(&raw)
                    .map(|c| c.into_owned())
                    .unwrap_or(raw);
                append_text(&current, &text, &mut session_id, &mut server_url, &mut fault);
            }
            Event::GeneralRef(r) => {
                let entity = format!("&{};", String::from_utf8_lossy(&r));
                if let Ok(text) = unescape(&entity) {
                    append_text(&current, &text, &mut session_id, &mut server_url, &mut fault);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(message) = fault {
        return Err(SalesforceError::AuthenticationFailed(message));
    }

    if session_id.is_empty() || server_url.is_empty() {
        return Err(SalesforceError::Decode(
            "login response is missing sessionId or serverUrl".to_string(),
        ));
    }

    let host = reqwest::Url::parse(&server_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .ok_or_else(|| SalesforceError::Decode(format!("invalid serverUrl: {server_url}")))?;

    Ok(SalesforceSession {
        instance_url: format!("https://{host}"),
        session_id,
    })
}

fn append_text(
    current: &Option<String>,
    text: &str,
    session_id: &mut String,
    server_url: &mut String,
    fault: &mut Option<String>,
) {
    match current.as_deref() {
        Some(SESSION_ID_TAG) => session_id.push_str(text),
        Some(SERVER_URL_TAG) => server_url.push_str(text),
        Some(FAULT_TAG) => fault.get_or_insert_with(String::new).push_str(text),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="urn:partner.soap.sforce.com">
  <soapenv:Body>
    <loginResponse>
      <result>
        <metadataServerUrl>https://na1.salesforce.com/services/Soap/m/60.0/00D</metadataServerUrl>
        <passwordExpired>false</passwordExpired>
        <serverUrl>https://na1.salesforce.com/services/Soap/u/60.0/00D</serverUrl>
        <sessionId>00D!AQ0AQ.session</sessionId>
      </result>
    </loginResponse>
  </soapenv:Body>
</soapenv:Envelope>"#;

    const FAULT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>INVALID_LOGIN</faultcode>
      <faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</faultstring>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#;

    #[test]
    fn test_login_domain_normalization() {
        assert_eq!(login_domain("https://login.salesforce.com"), "login");
        assert_eq!(login_domain("https://test.salesforce.com"), "test");
        assert_eq!(login_domain("https://acme.my.salesforce.com/"), "acme.my");
        assert_eq!(login_domain("acme--dev.sandbox.my"), "acme--dev.sandbox.my");
    }

    #[test]
    fn test_login_url() {
        assert_eq!(
            login_url("test", "60.0"),
            "https://test.salesforce.com/services/Soap/u/60.0"
        );
    }

    #[test]
    fn test_envelope_escapes_credentials() {
        let envelope = login_envelope("a&b@example.com", "p<ss", "TOKEN");
        assert!(envelope.contains("<n1:username>a&amp;b@example.com</n1:username>"));
        assert!(envelope.contains("<n1:password>p&lt;ssTOKEN</n1:password>"));
    }

    #[test]
    fn test_parse_success() {
        let session = parse_login_response(SUCCESS).unwrap();
        assert_eq!(session.instance_url, "https://na1.salesforce.com");
        assert_eq!(session.session_id, "00D!AQ0AQ.session");
    }

    #[test]
    fn test_parse_fault() {
        match parse_login_response(FAULT) {
            Err(SalesforceError::AuthenticationFailed(msg)) => {
                assert!(msg.starts_with("INVALID_LOGIN"));
            }
            other => panic!("expected auth failure, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_session() {
        let body = "<Envelope><Body><loginResponse/></Body></Envelope>";
        assert!(matches!(
            parse_login_response(body),
            Err(SalesforceError::Decode(_))
        ));
    }
}
