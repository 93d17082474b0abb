/// Popup UI for CuraQ Saver, also hosting the context-menu confirmation window

use crate::config::Settings;
use crate::controller::{Effect, Msg, Origin, PopupState, Screen, SettingsSection, TokenEntry, update};
use crate::ui::components::{ArticleCard, ProHint, TokenForm};
use crate::ui::runner;
use patternfly_yew::prelude::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Controller state plus the effects still waiting to run. The queue is shared
/// by every model version so transitions reduced between renders keep theirs.
pub struct PopupModel {
    state: PopupState,
    effects: Rc<RefCell<VecDeque<Effect>>>,
    generation: u64,
}

impl PopupModel {
    fn new(state: PopupState) -> Self {
        PopupModel {
            state,
            effects: Rc::new(RefCell::new(VecDeque::new())),
            generation: 0,
        }
    }

    /// Everything queued since the last call, oldest first
    fn take_effects(&self) -> Vec<Effect> {
        self.effects.borrow_mut().drain(..).collect()
    }
}

impl Reducible for PopupModel {
    type Action = Msg;

    fn reduce(self: Rc<Self>, msg: Msg) -> Rc<Self> {
        let (state, effects) = update(self.state.clone(), msg);
        self.effects.borrow_mut().extend(effects);
        Rc::new(PopupModel {
            state,
            effects: self.effects.clone(),
            generation: self.generation + 1,
        })
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub origin: Origin,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let model = {
        let origin = props.origin.clone();
        use_reducer(move || PopupModel::new(PopupState::new(origin, &Settings::load())))
    };
    let dispatcher = model.dispatcher();

    // Kick off the start sequence on mount
    {
        let dispatcher = dispatcher.clone();
        use_effect_with((), move |_| {
            dispatcher.dispatch(Msg::Opened);
            || ()
        });
    }

    // Drain the queue after each transition; every effect runs exactly once
    {
        let generation = model.generation;
        let model = model.clone();
        let dispatcher = dispatcher.clone();
        use_effect_with(generation, move |_| {
            for effect in model.take_effects() {
                let dispatcher = dispatcher.clone();
                spawn_local(async move {
                    if let Some(msg) = runner::perform(effect).await {
                        dispatcher.dispatch(msg);
                    }
                });
            }
            || ()
        });
    }

    let send = {
        let dispatcher = dispatcher.clone();
        move |msg: Msg| {
            let dispatcher = dispatcher.clone();
            Callback::from(move |_: MouseEvent| dispatcher.dispatch(msg.clone()))
        }
    };

    let on_token_submit = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |(entry, raw): (TokenEntry, String)| {
            dispatcher.dispatch(Msg::TokenSubmitted { entry, raw });
        })
    };

    let state = &model.state;

    html! {
        <div class="padding-20">
            <div class="popup-header">
                <h1 class="popup-title">{"CuraQ Saver"}</h1>
                if state.settings_available() {
                    <Button onclick={send(Msg::SettingsToggled)} variant={ButtonVariant::Plain}>
                        {"⚙"}
                    </Button>
                }
            </div>

            {match state.screen() {
                Screen::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Checking your token..."}</p>
                    </div>
                },
                Screen::Ready { hint, busy } => html! {
                    <div class="flex-column-gap">
                        <Button onclick={send(Msg::SaveClicked)} disabled={*busy} variant={ButtonVariant::Primary} block={true}>
                            {if *busy { "Opening..." } else { "Save this article" }}
                        </Button>
                        if let Some(reason) = hint {
                            <ProHint reason={*reason} on_setup={send(Msg::SetupTokenClicked)} />
                        }
                        <Button onclick={send(Msg::DashboardClicked)} disabled={*busy} variant={ButtonVariant::Secondary} block={true}>
                            {"Open CuraQ"}
                        </Button>
                    </div>
                },
                Screen::Confirmation { article, sending } => html! {
                    <div class="flex-column-gap">
                        <p class="message-text">{"Save this article?"}</p>
                        <ArticleCard title={article.title.clone()} url={article.url.clone()} />
                        <Button onclick={send(Msg::ConfirmSendClicked)} disabled={*sending} variant={ButtonVariant::Primary} block={true}>
                            {if *sending { "Sending..." } else { "Send" }}
                        </Button>
                        <Button onclick={send(Msg::CancelClicked)} disabled={*sending} variant={ButtonVariant::Secondary} block={true}>
                            {"Cancel"}
                        </Button>
                    </div>
                },
                Screen::Success => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Success} title={"Saved to CuraQ"} inline={true}>
                        </Alert>
                    </div>
                },
                Screen::Error { message } => html! {
                    <div class="message-top-margin flex-column-gap">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {message.clone()}
                        </Alert>
                        <Button onclick={send(Msg::RetryClicked)} variant={ButtonVariant::Secondary} block={true}>
                            {match state.origin() {
                                Origin::Toolbar => "Retry",
                                Origin::ContextMenu(Some(_)) => "Back",
                                Origin::ContextMenu(None) => "Close",
                            }}
                        </Button>
                        if *state.origin() == Origin::Toolbar {
                            <TokenForm
                                entry={TokenEntry::Retry}
                                on_submit={on_token_submit.clone()}
                                label={Some("Or enter a new API token:".to_string())}
                            />
                        }
                    </div>
                },
                Screen::Settings { section } => html! {
                    <div class="flex-column-gap">
                        <h2 class="stats-title">{"Settings"}</h2>
                        {match section {
                            SettingsSection::Checking => html! { <Spinner /> },
                            SettingsSection::TokenSet => html! {
                                <>
                                    <p class="message-text">{"An API token is already set."}</p>
                                    <TokenForm
                                        entry={TokenEntry::Settings}
                                        on_submit={on_token_submit.clone()}
                                        label={Some("Replace it with a new token:".to_string())}
                                    />
                                    <Button onclick={send(Msg::ClearTokenClicked)} variant={ButtonVariant::Danger} block={true}>
                                        {"Clear token"}
                                    </Button>
                                </>
                            },
                            SettingsSection::SetUp => html! {
                                <TokenForm
                                    entry={TokenEntry::Onboarding}
                                    on_submit={on_token_submit.clone()}
                                    label={Some("Paste the API token from your CuraQ settings:".to_string())}
                                />
                            },
                        }}
                        <Button onclick={send(Msg::BackClicked)} variant={ButtonVariant::Link}>
                            {"Back"}
                        </Button>
                    </div>
                },
            }}
        </div>
    }
}
