//! API client for the Horus signoff service.

use anyhow::Result;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::auth::Credential;
use crate::config::Config;
use crate::models::{Assignment, CatalogResponse, RawGroup, RawSignoff, Track};

use super::{ApiError, GradingService};

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for Horus.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    group_set_id: i64,
    programming_set_id: i64,
    design_set_id: i64,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            group_set_id: config.group_set_id,
            programming_set_id: config.programming_set_id,
            design_set_id: config.design_set_id,
        })
    }

    fn catalog_id(&self, track: Track) -> i64 {
        match track {
            Track::Programming => self.programming_set_id,
            Track::Design => self.design_set_id,
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get_text(&self, credential: &Credential, url: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, credential.header_value())
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        url: &str,
    ) -> Result<T, ApiError> {
        let text = self.get_text(credential, url).await?;
        serde_json::from_str(&text)
            .map_err(|err| ApiError::InvalidResponse(format!("{err} in response from {url}")))
    }
}

impl GradingService for ApiClient {
    async fn fetch_roster(&self, credential: &Credential) -> Result<Vec<RawGroup>, ApiError> {
        let url = format!("{}/groupSets/{}/groups", self.base_url, self.group_set_id);
        let text = self.get_text(credential, &url).await?;

        // The endpoint serves a bare array today; tolerate a wrapper too.
        if let Ok(groups) = serde_json::from_str::<Vec<RawGroup>>(&text) {
            debug!(groups = groups.len(), "roster received");
            return Ok(groups);
        }

        #[derive(Deserialize)]
        struct GroupsWrapper {
            #[serde(default)]
            groups: Vec<RawGroup>,
        }

        match serde_json::from_str::<GroupsWrapper>(&text) {
            Ok(wrapper) if !wrapper.groups.is_empty() => {
                debug!(groups = wrapper.groups.len(), "roster received (wrapped)");
                Ok(wrapper.groups)
            }
            _ => Err(ApiError::InvalidResponse(format!(
                "unrecognized roster payload from {url}"
            ))),
        }
    }

    async fn fetch_catalog(
        &self,
        credential: &Credential,
        track: Track,
    ) -> Result<Vec<Assignment>, ApiError> {
        let url = format!("{}/assignmentSets/{}", self.base_url, self.catalog_id(track));
        let response: CatalogResponse = self.get_json(credential, &url).await?;
        debug!(track = %track, assignments = response.assignments.len(), "catalog received");

        Ok(response
            .assignments
            .into_iter()
            .map(|raw| raw.into_assignment(track))
            .collect())
    }

    async fn fetch_signoff_history(
        &self,
        credential: &Credential,
        participant_id: i64,
        assignment_id: i64,
    ) -> Result<Vec<RawSignoff>, ApiError> {
        let url = format!(
            "{}/signoff/history?participantId={}&assignmentId={}",
            self.base_url, participant_id, assignment_id
        );
        self.get_json(credential, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_follow_config() {
        let config = Config::default();
        let client = ApiClient::new(&config).expect("client should build");
        assert_eq!(client.catalog_id(Track::Programming), 170);
        assert_eq!(client.catalog_id(Track::Design), 171);
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let config = Config {
            base_url: "https://horus.apps.utwente.nl/api/".to_string(),
            ..Config::default()
        };
        let client = ApiClient::new(&config).expect("client should build");
        assert_eq!(client.base_url, "https://horus.apps.utwente.nl/api");
    }

    #[test]
    fn test_parse_catalog_response() {
        let json = r#"{"assignments": [
            {"id": 1221, "name": "P-1.6"},
            {"id": 1222, "name": "P-1.8"}
        ]}"#;
        let response: CatalogResponse = serde_json::from_str(json).expect("should parse");
        assert_eq!(response.assignments.len(), 2);
        assert_eq!(response.assignments[0].id, 1221);
        assert_eq!(response.assignments[1].name, "P-1.8");
    }

    #[test]
    fn test_parse_signoff_history_response() {
        let json = r#"[{"signedAt": "2022-12-05T16:30:00Z"}, {"signedAt": "2022-12-01T09:00:00Z"}]"#;
        let history: Vec<RawSignoff> = serde_json::from_str(json).expect("should parse");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].signed_at, "2022-12-05T16:30:00Z");
    }
}
