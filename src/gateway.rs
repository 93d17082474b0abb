/// Token & API gateway: the background side of the extension
///
/// Owns the stored token and every call to the CuraQ API. Each operation
/// turns its failures into an `Ack` or a `TokenStatus`; nothing escapes as an
/// error across the message boundary.

use crate::api::CuraqApi;
use crate::config::{Settings, WindowSize};
use crate::error::ShellError;
use crate::links::{confirm_page_path, share_page_url};
use crate::protocol::{Ack, Reply, Request};
use crate::status::{TokenStatus, classify_probe};
use crate::storage::TokenStore;
use crate::tab_data::{PendingArticle, TabInfo};
use async_trait::async_trait;

pub const NO_TOKEN_MESSAGE: &str = "No API token is configured";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save the article";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send the article";

const SAVED_TITLE: &str = "Saved";
const SAVED_MESSAGE: &str = "The article was saved to CuraQ";
const ERROR_TITLE: &str = "Error";

/// Tabs, windows and notifications of the hosting browser
#[async_trait(?Send)]
pub trait BrowserShell {
    async fn get_tab(&self, tab_id: i32) -> Result<TabInfo, ShellError>;
    /// Fire-and-forget; only a synchronous failure is reported
    fn open_tab(&self, url: &str) -> Result<(), ShellError>;
    fn open_popup_window(&self, url: &str, size: WindowSize) -> Result<(), ShellError>;
    /// Absolute URL of a page bundled with the extension
    fn extension_url(&self, path: &str) -> String;
    fn notify(&self, title: &str, message: &str);
}

pub struct Gateway<S, A, B> {
    store: S,
    api: A,
    shell: B,
    settings: Settings,
}

impl<S, A, B> Gateway<S, A, B>
where
    S: TokenStore,
    A: CuraqApi,
    B: BrowserShell,
{
    pub fn new(store: S, api: A, shell: B, settings: Settings) -> Self {
        Gateway {
            store,
            api,
            shell,
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn shell(&self) -> &B {
        &self.shell
    }

    /// Stored token, if any. A storage failure reads as "no token".
    pub async fn get_token(&self) -> Option<String> {
        match self.store.load().await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::error!("Failed to read API token: {}", e);
                None
            }
        }
    }

    /// Store the token as given; trimming is the caller's job
    pub async fn save_token(&self, token: &str) -> Ack {
        match self.store.store(token).await {
            Ok(()) => Ack::ok(),
            Err(e) => {
                log::error!("Failed to store API token: {}", e);
                Ack::failed(e.to_string())
            }
        }
    }

    pub async fn clear_token(&self) -> Ack {
        match self.store.remove().await {
            Ok(()) => Ack::ok(),
            Err(e) => {
                log::error!("Failed to clear API token: {}", e);
                Ack::failed(e.to_string())
            }
        }
    }

    pub async fn check_token_validity(&self) -> TokenStatus {
        let Some(token) = self.get_token().await else {
            log::debug!("No token found");
            return TokenStatus::no_token();
        };

        match self.api.probe(&token).await {
            Ok(reply) => {
                let status = classify_probe(reply.status);
                log::debug!("Token check classified {} as {:?}", reply.status, status);
                status
            }
            Err(e) => {
                log::error!("Token check failed: {}", e);
                TokenStatus::network_error(e.to_string())
            }
        }
    }

    /// Create the article with the stored token, notifying the user of the outcome
    pub async fn submit_article(&self, article: &PendingArticle) -> Ack {
        let Some(token) = self.get_token().await else {
            return Ack::failed(NO_TOKEN_MESSAGE);
        };

        match self.api.create_article(&token, article).await {
            Ok(reply) if reply.is_success() => {
                self.shell.notify(SAVED_TITLE, SAVED_MESSAGE);
                Ack::ok()
            }
            Ok(reply) => {
                let message = reply
                    .message
                    .unwrap_or_else(|| SAVE_FAILED_MESSAGE.to_string());
                log::warn!("Article rejected with status {}: {}", reply.status, message);
                self.shell.notify(ERROR_TITLE, &message);
                Ack::failed(message)
            }
            Err(e) => {
                log::error!("Send article URL error: {}", e);
                self.shell.notify(ERROR_TITLE, SEND_FAILED_MESSAGE);
                Ack::failed(SEND_FAILED_MESSAGE)
            }
        }
    }

    /// Open the public share page in a new tab
    pub fn open_share_page(&self, url: &str, title: &str) -> Ack {
        let opened = share_page_url(&self.settings.share_page_url(), url, title)
            .map_err(|e| e.to_string())
            .and_then(|share| self.shell.open_tab(&share).map_err(|e| e.to_string()));

        match opened {
            Ok(()) => Ack::ok(),
            Err(e) => {
                log::error!("Share page open error: {}", e);
                Ack::failed(e)
            }
        }
    }

    /// Share-page path for the popup: look the tab up, then open the share page
    pub async fn save_article(&self, tab_id: i32) -> Ack {
        match self.shell.get_tab(tab_id).await {
            Ok(tab) => self.open_share_page(&tab.url, &tab.title),
            Err(e) => {
                log::error!("Failed to look up tab {}: {}", tab_id, e);
                Ack::failed(e.to_string())
            }
        }
    }

    /// Context menu click: confirmation window with a token, share page without
    pub async fn save_from_context_menu(&self, tab: &TabInfo) {
        let result = if self.get_token().await.is_some() {
            let confirm_url = self
                .shell
                .extension_url(&confirm_page_path(&tab.url, &tab.title));
            self.shell
                .open_popup_window(&confirm_url, self.settings.confirm_window)
                .map_err(|e| e.to_string())
        } else {
            share_page_url(&self.settings.share_page_url(), &tab.url, &tab.title)
                .map_err(|e| e.to_string())
                .and_then(|share| self.shell.open_tab(&share).map_err(|e| e.to_string()))
        };

        if let Err(e) = result {
            log::error!("Context menu save error: {}", e);
            self.shell.notify(ERROR_TITLE, SAVE_FAILED_MESSAGE);
        }
    }

    pub async fn handle(&self, request: Request) -> Reply {
        match request {
            Request::SaveArticle { tab_id } => Reply::Ack(self.save_article(tab_id).await),
            Request::SendArticleUrl { url, title } => {
                Reply::Ack(self.submit_article(&PendingArticle { url, title }).await)
            }
            Request::CheckToken => Reply::Status(self.check_token_validity().await),
            Request::SaveToken { token } => Reply::Ack(self.save_token(&token).await),
            Request::ClearToken => Reply::Ack(self.clear_token().await),
        }
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod http_tests {
    use super::*;
    use crate::api::ReqwestApi;
    use crate::status::TokenProblem;
    use crate::storage::MemoryTokenStore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct QuietShell;

    #[async_trait(?Send)]
    impl BrowserShell for QuietShell {
        async fn get_tab(&self, tab_id: i32) -> Result<TabInfo, ShellError> {
            Err(ShellError::TabNotFound(tab_id))
        }

        fn open_tab(&self, _url: &str) -> Result<(), ShellError> {
            Ok(())
        }

        fn open_popup_window(&self, _url: &str, _size: WindowSize) -> Result<(), ShellError> {
            Ok(())
        }

        fn extension_url(&self, path: &str) -> String {
            path.to_string()
        }

        fn notify(&self, _title: &str, _message: &str) {}
    }

    async fn check_against(status: u16) -> TokenStatus {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/articles"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let gw = Gateway::new(
            MemoryTokenStore::with_token("abc123"),
            ReqwestApi::new(format!("{}/api/v1", server.uri())),
            QuietShell,
            Settings::default(),
        );
        gw.check_token_validity().await
    }

    #[tokio::test]
    async fn test_check_against_mock_service() {
        assert_eq!(check_against(200).await, TokenStatus::valid());
        assert_eq!(check_against(401).await, TokenStatus::invalid(TokenProblem::InvalidToken));
        assert_eq!(check_against(403).await, TokenStatus::invalid(TokenProblem::NoProPlan));
        assert_eq!(check_against(500).await, TokenStatus::invalid(TokenProblem::ApiError(500)));
    }

    #[tokio::test]
    async fn test_check_without_token_hits_no_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let gw = Gateway::new(
            MemoryTokenStore::new(),
            ReqwestApi::new(format!("{}/api/v1", server.uri())),
            QuietShell,
            Settings::default(),
        );

        assert_eq!(gw.check_token_validity().await, TokenStatus::no_token());
    }
}
