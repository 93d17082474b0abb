/// Background worker: wires the gateway to chrome.* through the JS bridge

use crate::api::ReqwestApi;
use crate::config::{CONTEXT_MENU_ID, CONTEXT_MENU_TITLE, Settings, WindowSize};
use crate::error::{ShellError, StorageError};
use crate::gateway::{BrowserShell, Gateway, SAVE_FAILED_MESSAGE};
use crate::protocol::Request;
use crate::storage::{StorageRecord, TOKEN_KEY, TokenStore};
use crate::tab_data::TabInfo;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

// Import JS bridge functions
#[wasm_bindgen(module = "/background.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn storageGet(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn storageSet(key: &str, value: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn storageRemove(key: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getTab(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    fn openTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn openPopupWindow(url: &str, width: u32, height: u32) -> Result<(), JsValue>;

    fn extensionUrl(path: &str) -> String;

    fn showNotification(title: &str, message: &str);

    fn installContextMenu(id: &str, title: &str);

    fn onContextMenuClick(handler: &js_sys::Function);

    fn onMessage(handler: &js_sys::Function);
}

type BrowserGateway = Gateway<ChromeStorage, ReqwestApi, ChromeShell>;

/// Best-effort text of a thrown JS value
fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{:?}", value),
    }
}

/// chrome.storage.local
pub struct ChromeStorage;

#[async_trait(?Send)]
impl TokenStore for ChromeStorage {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        let value = storageGet(TOKEN_KEY)
            .await
            .map_err(|e| StorageError::Unavailable(js_message(&e)))?;

        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }

        let record: StorageRecord = serde_wasm_bindgen::from_value(value)
            .map_err(|e| StorageError::Malformed(e.to_string()))?;
        Ok(record.token())
    }

    async fn store(&self, token: &str) -> Result<(), StorageError> {
        storageSet(TOKEN_KEY, token)
            .await
            .map_err(|e| StorageError::Unavailable(js_message(&e)))
    }

    async fn remove(&self) -> Result<(), StorageError> {
        storageRemove(TOKEN_KEY)
            .await
            .map_err(|e| StorageError::Unavailable(js_message(&e)))
    }
}

/// chrome.tabs / chrome.windows / chrome.notifications
pub struct ChromeShell;

#[async_trait(?Send)]
impl BrowserShell for ChromeShell {
    async fn get_tab(&self, tab_id: i32) -> Result<TabInfo, ShellError> {
        let tab_js = getTab(tab_id)
            .await
            .map_err(|e| ShellError::Call(js_message(&e)))?;

        if tab_js.is_null() || tab_js.is_undefined() {
            return Err(ShellError::TabNotFound(tab_id));
        }

        serde_wasm_bindgen::from_value(tab_js)
            .map_err(|e| ShellError::Call(format!("Failed to parse tab: {}", e)))
    }

    fn open_tab(&self, url: &str) -> Result<(), ShellError> {
        openTab(url).map_err(|e| ShellError::Call(js_message(&e)))
    }

    fn open_popup_window(&self, url: &str, size: WindowSize) -> Result<(), ShellError> {
        openPopupWindow(url, size.width, size.height).map_err(|e| ShellError::Call(js_message(&e)))
    }

    fn extension_url(&self, path: &str) -> String {
        extensionUrl(path)
    }

    fn notify(&self, title: &str, message: &str) {
        showNotification(title, message);
    }
}

/// `info` argument of chrome.contextMenus.onClicked
#[derive(Debug, Deserialize)]
struct MenuClick {
    #[serde(rename = "menuItemId")]
    menu_item_id: String,
}

/// Register the context menu and the popup message listener
pub fn start() {
    let settings = Settings::load();
    let gateway: Rc<BrowserGateway> = Rc::new(Gateway::new(
        ChromeStorage,
        ReqwestApi::new(settings.api_base_url.clone()),
        ChromeShell,
        settings,
    ));

    installContextMenu(CONTEXT_MENU_ID, CONTEXT_MENU_TITLE);

    let menu_handler = {
        let gateway = gateway.clone();
        Closure::<dyn FnMut(JsValue, JsValue)>::new(move |info: JsValue, tab: JsValue| {
            let click: MenuClick = match serde_wasm_bindgen::from_value(info) {
                Ok(click) => click,
                Err(e) => {
                    log::warn!("Unreadable context menu click: {}", e);
                    return;
                }
            };
            if click.menu_item_id != CONTEXT_MENU_ID {
                return;
            }

            let gateway = gateway.clone();
            spawn_local(async move {
                match serde_wasm_bindgen::from_value::<TabInfo>(tab) {
                    Ok(tab) => gateway.save_from_context_menu(&tab).await,
                    Err(e) => {
                        log::error!("Context menu save error: {}", e);
                        gateway.shell().notify("Error", SAVE_FAILED_MESSAGE);
                    }
                }
            });
        })
    };
    onContextMenuClick(menu_handler.as_ref().unchecked_ref());
    menu_handler.forget();

    // Returns a promise for requests we answer, undefined for anything else
    let message_handler = Closure::<dyn FnMut(JsValue) -> JsValue>::new(move |message: JsValue| {
        let request: Request = match serde_wasm_bindgen::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                log::debug!("Ignoring message: {}", e);
                return JsValue::UNDEFINED;
            }
        };

        let gateway = gateway.clone();
        future_to_promise(async move {
            let reply = gateway.handle(request).await;
            reply
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(JsValue::from)
        })
        .into()
    });
    onMessage(message_handler.as_ref().unchecked_ref());
    message_handler.forget();

    log::info!("CuraQ background worker started");
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use std::cell::RefCell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen(module = "/background.js")]
    extern "C" {
        fn routeMessage(request: JsValue, send_response: &js_sys::Function) -> bool;
    }

    #[wasm_bindgen_test]
    async fn test_message_before_handler_is_answered_once_installed() {
        let replies: Rc<RefCell<Vec<JsValue>>> = Rc::new(RefCell::new(Vec::new()));
        let send_response = {
            let replies = replies.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |reply: JsValue| replies.borrow_mut().push(reply))
        };

        // Worker woke up with a message; wasm handlers are not installed yet
        assert!(routeMessage(JsValue::from_str("checkToken"), send_response.as_ref().unchecked_ref()));
        TimeoutFuture::new(0).await;
        assert!(replies.borrow().is_empty());

        let handler = Closure::<dyn FnMut(JsValue) -> JsValue>::new(|request: JsValue| {
            js_sys::Promise::resolve(&request).into()
        });
        onMessage(handler.as_ref().unchecked_ref());
        TimeoutFuture::new(0).await;

        assert_eq!(*replies.borrow(), vec![JsValue::from_str("checkToken")]);

        // Later messages go straight to the handler
        assert!(routeMessage(JsValue::from_str("clearToken"), send_response.as_ref().unchecked_ref()));
        TimeoutFuture::new(0).await;
        assert_eq!(replies.borrow().len(), 2);

        handler.forget();
        send_response.forget();
    }
}
