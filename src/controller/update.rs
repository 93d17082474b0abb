use crate::controller::state::Awaiting;
use crate::controller::{
    CheckPurpose, Effect, HintReason, Msg, Origin, PopupState, Screen, SettingsSection, TokenEntry,
};
use crate::status::TokenProblem;

pub const SHARE_FALLBACK_MESSAGE: &str = "Failed to save";
pub const SEND_FALLBACK_MESSAGE: &str = "Failed to send";
pub const MISSING_ARTICLE_MESSAGE: &str = "There is no page to save";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PopupState, msg: Msg) -> (PopupState, Vec<Effect>) {
    let effects = match msg {
        Msg::Opened => match state.origin.clone() {
            Origin::Toolbar => begin_startup_check(&mut state),
            Origin::ContextMenu(Some(article)) => {
                state.enter_confirmation(article);
                Vec::new()
            }
            Origin::ContextMenu(None) => {
                state.show_error(MISSING_ARTICLE_MESSAGE);
                Vec::new()
            }
        },
        Msg::TokenChecked {
            purpose,
            ticket,
            status,
        } => {
            if !state.accept(Awaiting::TokenCheck { purpose, ticket }) {
                log::warn!(
                    "Ignoring stale {:?} token check #{} while showing {:?}",
                    purpose,
                    ticket,
                    state.screen
                );
                return (state, Vec::new());
            }
            match purpose {
                CheckPurpose::Startup => {
                    state.token_status = Some(status);
                    state.show_ready();
                }
                CheckPurpose::AfterSave => {
                    let keep_token = status.valid || status.error == Some(TokenProblem::NoProPlan);
                    let label = status.error_label();
                    state.token_status = Some(status);
                    if keep_token {
                        state.show_ready();
                    } else {
                        log::warn!("Token validation failed: {}", label);
                        state.show_error(format!("Token validation failed: {}", label));
                    }
                }
                CheckPurpose::Settings => {
                    let section = if status.has_token() {
                        SettingsSection::TokenSet
                    } else {
                        SettingsSection::SetUp
                    };
                    state.token_status = Some(status);
                    state.show(Screen::Settings { section });
                }
            }
            Vec::new()
        }
        Msg::TokenSubmitted { entry, raw } => {
            let token = raw.trim();
            let accepts_token = match entry {
                TokenEntry::Retry => matches!(state.screen, Screen::Error { .. }),
                TokenEntry::Onboarding | TokenEntry::Settings => {
                    matches!(state.screen, Screen::Settings { .. })
                }
            };
            if token.is_empty() || !accepts_token || state.origin != Origin::Toolbar {
                Vec::new()
            } else {
                log::debug!("Saving token entered from {:?}", entry);
                state.show(Screen::Loading);
                state.awaiting = Some(Awaiting::TokenSave);
                vec![Effect::SaveToken {
                    token: token.to_string(),
                }]
            }
        }
        Msg::TokenSaved(ack) => {
            if !state.accept(Awaiting::TokenSave) {
                log::warn!("Ignoring late token save reply");
                Vec::new()
            } else if ack.success {
                vec![state.check_token(CheckPurpose::AfterSave)]
            } else {
                state.show_error(format!(
                    "Could not store the token: {}",
                    ack.error_or("storage unavailable")
                ));
                Vec::new()
            }
        }
        Msg::TokenCleared(ack) => {
            if !state.accept(Awaiting::TokenClear) {
                log::warn!("Ignoring late token clear reply");
                Vec::new()
            } else if ack.success {
                state.token_status = None;
                begin_startup_check(&mut state)
            } else {
                state.show_error(format!(
                    "Could not clear the token: {}",
                    ack.error_or("storage unavailable")
                ));
                Vec::new()
            }
        }
        Msg::SaveClicked => match state.screen {
            Screen::Ready { hint, busy: false } => {
                state.show(Screen::Ready { hint, busy: true });
                vec![Effect::QueryActiveTab]
            }
            _ => Vec::new(),
        },
        Msg::ActiveTabLoaded(result) => {
            if !matches!(state.screen, Screen::Ready { busy: true, .. }) {
                Vec::new()
            } else {
                match result {
                    Ok(tab) if state.token_status.as_ref().is_some_and(|s| s.valid) => {
                        state.enter_confirmation(tab.article());
                        Vec::new()
                    }
                    Ok(tab) => vec![Effect::OpenSharePage { tab_id: tab.id }],
                    Err(e) => {
                        log::error!("Save error: {}", e);
                        state.show_error(e);
                        Vec::new()
                    }
                }
            }
        }
        Msg::SharePageOpened(ack) => match state.screen {
            Screen::Ready { busy: true, .. } => {
                if ack.success {
                    vec![Effect::ClosePopup]
                } else {
                    state.show_error(ack.error_or(SHARE_FALLBACK_MESSAGE));
                    Vec::new()
                }
            }
            _ => Vec::new(),
        },
        Msg::ConfirmSendClicked => {
            let idle = matches!(state.screen, Screen::Confirmation { sending: false, .. });
            match state.pending.take() {
                Some(article) if idle => {
                    if let Screen::Confirmation { sending, .. } = &mut state.screen {
                        *sending = true;
                    }
                    vec![Effect::SubmitArticle { article }]
                }
                untouched => {
                    state.pending = untouched;
                    Vec::new()
                }
            }
        }
        Msg::ArticleSubmitted(ack) => match state.screen {
            Screen::Confirmation { sending: true, .. } => {
                if ack.success {
                    state.show(Screen::Success);
                    vec![Effect::ClosePopupAfter {
                        delay_ms: state.close_delay_ms,
                    }]
                } else {
                    state.show_error(ack.error_or(SEND_FALLBACK_MESSAGE));
                    Vec::new()
                }
            }
            _ => Vec::new(),
        },
        Msg::CancelClicked => match state.screen {
            Screen::Confirmation { sending: false, .. } => match state.origin {
                Origin::Toolbar => {
                    state.show_ready();
                    Vec::new()
                }
                Origin::ContextMenu(_) => {
                    state.pending = None;
                    vec![Effect::ClosePopup]
                }
            },
            _ => Vec::new(),
        },
        Msg::RetryClicked => {
            if !matches!(state.screen, Screen::Error { .. }) {
                Vec::new()
            } else {
                match state.origin.clone() {
                    Origin::Toolbar => begin_startup_check(&mut state),
                    Origin::ContextMenu(Some(article)) => {
                        state.enter_confirmation(article);
                        Vec::new()
                    }
                    Origin::ContextMenu(None) => vec![Effect::ClosePopup],
                }
            }
        }
        Msg::SettingsToggled => {
            if !state.settings_available() {
                Vec::new()
            } else if matches!(state.screen, Screen::Settings { .. }) {
                begin_startup_check(&mut state)
            } else {
                state.show(Screen::Settings {
                    section: SettingsSection::Checking,
                });
                vec![state.check_token(CheckPurpose::Settings)]
            }
        }
        Msg::SetupTokenClicked => match state.screen {
            Screen::Ready {
                hint: Some(_),
                busy: false,
            } => {
                state.show(Screen::Settings {
                    section: SettingsSection::SetUp,
                });
                Vec::new()
            }
            _ => Vec::new(),
        },
        Msg::BackClicked => match state.screen {
            Screen::Settings { .. } => begin_startup_check(&mut state),
            _ => Vec::new(),
        },
        Msg::ClearTokenClicked => match state.screen {
            Screen::Settings {
                section: SettingsSection::TokenSet,
            } => {
                state.show(Screen::Loading);
                state.awaiting = Some(Awaiting::TokenClear);
                vec![Effect::ClearToken]
            }
            _ => Vec::new(),
        },
        Msg::DashboardClicked => match state.screen {
            Screen::Ready { .. } | Screen::Success => vec![
                Effect::OpenTab {
                    url: state.dashboard_url.clone(),
                },
                Effect::ClosePopup,
            ],
            _ => Vec::new(),
        },
    };

    (state, effects)
}

fn begin_startup_check(state: &mut PopupState) -> Vec<Effect> {
    state.show(Screen::Loading);
    vec![state.check_token(CheckPurpose::Startup)]
}

/// Convenience for callers that only need the hint of a ready view
pub fn ready_hint(state: &PopupState) -> Option<HintReason> {
    match state.screen {
        Screen::Ready { hint, .. } => hint,
        _ => None,
    }
}
