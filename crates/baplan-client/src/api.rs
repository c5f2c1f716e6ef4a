use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use baplan_core::models::survey::{NewSurvey, SurveyRecord};

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// HTTP client for the survey service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a survey and wait for the generated plan.
    pub async fn submit(&self, survey: &NewSurvey) -> Result<SurveyRecord, ClientError> {
        let url = format!("{}/api/survey", self.base_url);
        debug!(%url, "submitting survey");
        let response = self.http.post(&url).json(survey).send().await?;
        read_record(response).await
    }

    pub async fn fetch(&self, id: i64) -> Result<SurveyRecord, ClientError> {
        let url = format!("{}/api/survey/{id}", self.base_url);
        debug!(%url, "fetching survey");
        let response = self.http.get(&url).send().await?;
        read_record(response).await
    }
}

async fn read_record(response: Response) -> Result<SurveyRecord, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
