//! DTEK shutdowns client.
//!
//! The provider gates its AJAX status endpoint behind a session cookie and a
//! per-session CSRF token embedded in the shutdowns page. One fetch is two
//! requests on the same client: GET the page (the cookie jar picks up the
//! session), extract the `csrf-token` meta tag, then POST the `getHomeNum`
//! form with the token in the `x-csrf-token` header.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use regex::Regex;
use reqwest_middleware::ClientWithMiddleware;
use url::Url;

use super::{ProviderError, StatusSource};
use crate::models::StatusPayload;

/// Matches `<meta name="csrf-token" content="...">` in the shutdowns page.
const CSRF_META_PATTERN: &str = r#"<meta\s+name="csrf-token"\s+content="([^"]+)""#;

/// `StatusSource` implementation for the DTEK regional shutdowns endpoint.
///
/// The client passed in must have its cookie store enabled: the CSRF token
/// is only honored together with the session cookie issued by the page
/// request.
pub struct DtekShutdownsSource {
    base_url: Url,
    city: String,
    street: String,
    client: Arc<ClientWithMiddleware>,
    timezone: Tz,
    csrf_pattern: Regex,
}

impl DtekShutdownsSource {
    /// Creates a new source for one configured city and street.
    pub fn new(
        base_url: Url,
        city: &str,
        street: &str,
        client: Arc<ClientWithMiddleware>,
        timezone: Tz,
    ) -> Self {
        Self {
            base_url,
            city: city.to_string(),
            street: street.to_string(),
            client,
            timezone,
            csrf_pattern: Regex::new(CSRF_META_PATTERN).unwrap(),
        }
    }

    async fn fetch_csrf_token(&self) -> Result<String, ProviderError> {
        let url = format!("{}ua/shutdowns", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ErrorStatus(status));
        }

        let page = response.text().await?;
        self.csrf_pattern
            .captures(&page)
            .and_then(|captures| captures.get(1))
            .map(|token| token.as_str().to_string())
            .ok_or(ProviderError::CsrfTokenMissing)
    }
}

#[async_trait]
impl StatusSource for DtekShutdownsSource {
    async fn fetch_outage_status(&self) -> Result<StatusPayload, ProviderError> {
        let csrf_token = self.fetch_csrf_token().await?;
        tracing::debug!("obtained provider session and CSRF token");

        let update_fact = Utc::now()
            .with_timezone(&self.timezone)
            .format("%d.%m.%Y, %H:%M:%S")
            .to_string();

        let form = [
            ("method", "getHomeNum"),
            ("data[0][name]", "city"),
            ("data[0][value]", self.city.as_str()),
            ("data[1][name]", "street"),
            ("data[1][value]", self.street.as_str()),
            ("data[2][name]", "updateFact"),
            ("data[2][value]", update_fact.as_str()),
        ];

        let url = format!("{}ua/ajax", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-requested-with", "XMLHttpRequest")
            .header("x-csrf-token", &csrf_token)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ErrorStatus(status));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::Europe::Kyiv;
    use mockito::Matcher;

    use super::*;

    const SHUTDOWNS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="csrf-token" content="token-123">
</head>
<body></body>
</html>"#;

    fn source_for(server: &mockito::Server) -> DtekShutdownsSource {
        let client =
            Arc::new(reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build());
        let base_url = Url::parse(&server.url()).unwrap();
        DtekShutdownsSource::new(base_url, "Київ", "вул. Хрещатик", client, Kyiv)
    }

    #[tokio::test]
    async fn fetch_echoes_the_page_csrf_token_in_the_ajax_call() {
        let mut server = mockito::Server::new_async().await;
        let page_mock = server
            .mock("GET", "/ua/shutdowns")
            .with_status(200)
            .with_body(SHUTDOWNS_PAGE)
            .create_async()
            .await;
        let ajax_mock = server
            .mock("POST", "/ua/ajax")
            .match_header("x-csrf-token", "token-123")
            .match_header("x-requested-with", "XMLHttpRequest")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("method".into(), "getHomeNum".into()),
                Matcher::UrlEncoded("data[0][value]".into(), "Київ".into()),
                Matcher::UrlEncoded("data[1][value]".into(), "вул. Хрещатик".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"data":{"12":{"sub_type":"Планове","start_date":"10:00","end_date":"14:00","type":"x"}},"updateTimestamp":"06.08.2026 09:55"}"#,
            )
            .create_async()
            .await;

        let payload = source_for(&server).fetch_outage_status().await.unwrap();

        let slot = &payload.data.unwrap()["12"];
        assert_eq!(slot.sub_type, "Планове");
        assert_eq!(payload.update_timestamp.as_deref(), Some("06.08.2026 09:55"));
        page_mock.assert_async().await;
        ajax_mock.assert_async().await;
    }

    #[tokio::test]
    async fn page_without_csrf_token_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ua/shutdowns")
            .with_status(200)
            .with_body("<html><head></head><body></body></html>")
            .create_async()
            .await;

        let result = source_for(&server).fetch_outage_status().await;
        assert!(matches!(result, Err(ProviderError::CsrfTokenMissing)));
    }

    #[tokio::test]
    async fn non_success_ajax_status_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ua/shutdowns")
            .with_status(200)
            .with_body(SHUTDOWNS_PAGE)
            .create_async()
            .await;
        server.mock("POST", "/ua/ajax").with_status(503).create_async().await;

        let result = source_for(&server).fetch_outage_status().await;
        assert!(matches!(
            result,
            Err(ProviderError::ErrorStatus(status)) if status.as_u16() == 503
        ));
    }
}
