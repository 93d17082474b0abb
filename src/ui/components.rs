/// Reusable UI components

use crate::controller::{HintReason, TokenEntry};
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TokenFormProps {
    pub entry: TokenEntry,
    pub on_submit: Callback<(TokenEntry, String)>,
    #[prop_or_default]
    pub label: Option<String>,
}

/// Token input with a save button; Enter submits too
#[function_component(TokenForm)]
pub fn token_form(props: &TokenFormProps) -> Html {
    let value = use_state(String::new);

    let on_input = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                value.set(input.value());
            }
        })
    };

    let on_keypress = {
        let value = value.clone();
        let on_submit = props.on_submit.clone();
        let entry = props.entry;
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_submit.emit((entry, (*value).clone()));
            }
        })
    };

    let on_click = {
        let value = value.clone();
        let on_submit = props.on_submit.clone();
        let entry = props.entry;
        Callback::from(move |_| {
            on_submit.emit((entry, (*value).clone()));
        })
    };

    html! {
        <div class="token-form">
            if let Some(label) = &props.label {
                <p class="token-label">{label}</p>
            }
            <input
                type="password"
                class="token-input"
                placeholder="API token"
                value={(*value).clone()}
                oninput={on_input}
                onkeypress={on_keypress}
            />
            <Button onclick={on_click} variant={ButtonVariant::Primary} block={true}>
                {"Save token"}
            </Button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ArticleCardProps {
    pub title: String,
    pub url: String,
}

#[function_component(ArticleCard)]
pub fn article_card(props: &ArticleCardProps) -> Html {
    let title = if props.title.is_empty() {
        "(untitled)".to_string()
    } else {
        props.title.clone()
    };

    html! {
        <div class="article-card">
            <p class="article-title">{title}</p>
            <p class="article-url">{&props.url}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProHintProps {
    pub reason: HintReason,
    pub on_setup: Callback<MouseEvent>,
}

/// Shown on the ready view when saving will fall back to the share page
#[function_component(ProHint)]
pub fn pro_hint(props: &ProHintProps) -> Html {
    html! {
        <div class="no-token-hint">
            <p class="message-paragraph">{hint_text(props.reason)}</p>
            <Button onclick={props.on_setup.clone()} variant={ButtonVariant::Link}>
                {"Set up token"}
            </Button>
        </div>
    }
}

pub fn hint_text(reason: HintReason) -> &'static str {
    match reason {
        HintReason::NoToken => {
            "Pro users can save directly from here by setting an API token. Otherwise the share page opens."
        }
        HintReason::InvalidToken => "Your API token was rejected. Set a new one to save directly.",
        HintReason::NoProPlan => "Direct saving needs a Pro plan. The share page opens instead.",
        HintReason::Unavailable => "CuraQ could not be reached. The share page opens instead.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_hint_has_text() {
        for reason in [
            HintReason::NoToken,
            HintReason::InvalidToken,
            HintReason::NoProPlan,
            HintReason::Unavailable,
        ] {
            assert!(!hint_text(reason).is_empty());
        }
    }
}
