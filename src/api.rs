/// CuraQ REST client
///
/// Only transport failures are errors here; HTTP statuses are returned to the
/// gateway, which owns their meaning.

use crate::error::ApiError;
use crate::tab_data::PendingArticle;
use async_trait::async_trait;
use serde::Deserialize;

/// Status and optional server message of an API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub message: Option<String>,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[async_trait(?Send)]
pub trait CuraqApi {
    /// `GET /articles?limit=1`, used only as an authenticated probe
    async fn probe(&self, token: &str) -> Result<ApiReply, ApiError>;

    /// `POST /articles` with `{url, title}`
    async fn create_article(&self, token: &str, article: &PendingArticle) -> Result<ApiReply, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        ReqwestApi {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn articles_url(&self) -> String {
        format!("{}/articles", self.base_url)
    }
}

#[async_trait(?Send)]
impl CuraqApi for ReqwestApi {
    async fn probe(&self, token: &str) -> Result<ApiReply, ApiError> {
        let url = self.articles_url();
        log::debug!("Checking token validity at {}?limit=1", url);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", "1")])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        log::debug!("Token check response status: {}", status);

        if !response.status().is_success() {
            // Body is only interesting for diagnosing unexpected statuses
            let body = response.text().await.unwrap_or_default();
            log::debug!("Token check response body: {}", body);
        }

        Ok(ApiReply {
            status,
            message: None,
        })
    }

    async fn create_article(&self, token: &str, article: &PendingArticle) -> Result<ApiReply, ApiError> {
        let response = self
            .client
            .post(self.articles_url())
            .bearer_auth(token)
            .json(article)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(ApiReply {
                status,
                message: None,
            });
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty());

        Ok(ApiReply { status, message })
    }
}
