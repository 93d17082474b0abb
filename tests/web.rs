//! Browser smoke tests, run with `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use curaq_saver::config::Settings;
use curaq_saver::controller::{Msg, Origin, PopupState, Screen, update};
use curaq_saver::links::{article_from_query, confirm_page_path};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn confirm_window_reads_its_article() {
    let href = format!(
        "chrome-extension://curaq/{}",
        confirm_page_path("https://example.com/a b", "A & B")
    );
    let article = article_from_query(&href).expect("article in query");
    assert_eq!(article.url, "https://example.com/a b");
    assert_eq!(article.title, "A & B");

    let state = PopupState::new(Origin::ContextMenu(Some(article)), &Settings::default());
    let (state, effects) = update(state, Msg::Opened);
    assert!(matches!(state.screen(), Screen::Confirmation { .. }));
    assert!(effects.is_empty());
}
