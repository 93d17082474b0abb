/// Performs controller effects against the extension APIs

use crate::controller::{Effect, Msg};
use crate::protocol::{Ack, Request};
use crate::status::TokenStatus;
use crate::tab_data::TabInfo;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn sendMessage(request: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    fn openTab(url: &str);

    fn closeWindow();
}

/// Run one effect; returns the message carrying its result, if it has one
pub async fn perform(effect: Effect) -> Option<Msg> {
    match effect {
        Effect::CheckToken { purpose, ticket } => {
            let status = request::<TokenStatus>(&Request::CheckToken)
                .await
                .unwrap_or_else(TokenStatus::network_error);
            log::debug!("Token check #{} ({:?}): {:?}", ticket, purpose, status);
            Some(Msg::TokenChecked {
                purpose,
                ticket,
                status,
            })
        }
        Effect::SaveToken { token } => {
            let ack = request_ack(&Request::SaveToken { token }).await;
            Some(Msg::TokenSaved(ack))
        }
        Effect::ClearToken => {
            let ack = request_ack(&Request::ClearToken).await;
            log::debug!("Token cleared: {:?}", ack);
            Some(Msg::TokenCleared(ack))
        }
        Effect::QueryActiveTab => Some(Msg::ActiveTabLoaded(active_tab().await)),
        Effect::OpenSharePage { tab_id } => {
            let ack = request_ack(&Request::SaveArticle { tab_id }).await;
            Some(Msg::SharePageOpened(ack))
        }
        Effect::SubmitArticle { article } => {
            let ack = request_ack(&Request::SendArticleUrl {
                url: article.url,
                title: article.title,
            })
            .await;
            Some(Msg::ArticleSubmitted(ack))
        }
        Effect::OpenTab { url } => {
            openTab(&url);
            None
        }
        Effect::ClosePopup => {
            closeWindow();
            None
        }
        Effect::ClosePopupAfter { delay_ms } => {
            TimeoutFuture::new(delay_ms).await;
            closeWindow();
            None
        }
    }
}

async fn request<T: DeserializeOwned>(request: &Request) -> Result<T, String> {
    let payload = request
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to encode request: {}", e))?;

    let reply = sendMessage(payload)
        .await
        .map_err(|e| format!("Background did not answer: {:?}", e))?;

    serde_wasm_bindgen::from_value(reply).map_err(|e| format!("Failed to parse reply: {}", e))
}

async fn request_ack(message: &Request) -> Ack {
    match request::<Ack>(message).await {
        Ok(ack) => ack,
        Err(e) => {
            log::error!("{}", e);
            Ack::failed(e)
        }
    }
}

async fn active_tab() -> Result<TabInfo, String> {
    let tab_js = getActiveTab()
        .await
        .map_err(|e| format!("Failed to get the current tab: {:?}", e))?;

    serde_wasm_bindgen::from_value(tab_js).map_err(|e| format!("Failed to parse tab: {}", e))
}
