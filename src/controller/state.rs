use crate::config::Settings;
use crate::controller::{CheckPurpose, Effect};
use crate::status::{TokenProblem, TokenStatus};
use crate::tab_data::PendingArticle;

/// Why the ready view shows the "connect your Pro account" hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintReason {
    NoToken,
    InvalidToken,
    NoProPlan,
    /// The service could not be asked (network or unexpected status)
    Unavailable,
}

impl HintReason {
    /// `None` when the token is usable and the hint stays hidden
    pub fn for_status(status: &TokenStatus) -> Option<HintReason> {
        if status.valid {
            return None;
        }
        Some(match status.error {
            Some(TokenProblem::NoToken) => HintReason::NoToken,
            Some(TokenProblem::InvalidToken) => HintReason::InvalidToken,
            Some(TokenProblem::NoProPlan) => HintReason::NoProPlan,
            Some(TokenProblem::NetworkError) | Some(TokenProblem::ApiError(_)) | None => {
                HintReason::Unavailable
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    /// Waiting for the token check
    Checking,
    TokenSet,
    SetUp,
}

/// The single view currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Ready {
        hint: Option<HintReason>,
        /// Save button disabled while the tab lookup / share page call runs
        busy: bool,
    },
    Confirmation {
        article: PendingArticle,
        sending: bool,
    },
    Success,
    Error {
        message: String,
    },
    Settings {
        section: SettingsSection,
    },
}

/// Which page hosts the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Toolbar popup
    Toolbar,
    /// Window opened by the context menu; `None` if its query was unusable
    ContextMenu(Option<PendingArticle>),
}

/// The gateway reply the controller is waiting for. Anything else is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Awaiting {
    TokenCheck { purpose: CheckPurpose, ticket: u64 },
    TokenSave,
    TokenClear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupState {
    pub(crate) screen: Screen,
    pub(crate) origin: Origin,
    pub(crate) token_status: Option<TokenStatus>,
    pub(crate) pending: Option<PendingArticle>,
    pub(crate) dashboard_url: String,
    pub(crate) close_delay_ms: u32,
    pub(crate) awaiting: Option<Awaiting>,
    last_ticket: u64,
}

impl PopupState {
    pub fn new(origin: Origin, settings: &Settings) -> Self {
        PopupState {
            screen: Screen::Loading,
            origin,
            token_status: None,
            pending: None,
            dashboard_url: settings.site_url.clone(),
            close_delay_ms: settings.success_close_delay_ms,
            awaiting: None,
            last_ticket: 0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Last known token status; replaces any ambient cache
    pub fn token_status(&self) -> Option<&TokenStatus> {
        self.token_status.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingArticle> {
        self.pending.as_ref()
    }

    pub fn hint_visible(&self) -> bool {
        matches!(self.screen, Screen::Ready { hint: Some(_), .. })
    }

    /// Whether the gear button is offered
    pub fn settings_available(&self) -> bool {
        self.origin == Origin::Toolbar
            && !matches!(
                self.screen,
                Screen::Ready { busy: true, .. } | Screen::Confirmation { sending: true, .. }
            )
            && !matches!(self.awaiting, Some(Awaiting::TokenSave | Awaiting::TokenClear))
    }

    /// Switch views. Leaving the confirmation view always drops the pending article,
    /// and any reply still outstanding for the old view becomes stale.
    pub(crate) fn show(&mut self, screen: Screen) {
        if !matches!(screen, Screen::Confirmation { .. }) {
            self.pending = None;
        }
        self.awaiting = None;
        self.screen = screen;
    }

    /// Issue a token check under a fresh ticket
    pub(crate) fn check_token(&mut self, purpose: CheckPurpose) -> Effect {
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.awaiting = Some(Awaiting::TokenCheck { purpose, ticket });
        Effect::CheckToken { purpose, ticket }
    }

    /// Consume the outstanding request if `reply` answers it
    pub(crate) fn accept(&mut self, reply: Awaiting) -> bool {
        if self.awaiting == Some(reply) {
            self.awaiting = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn show_ready(&mut self) {
        let hint = self
            .token_status
            .as_ref()
            .map_or(Some(HintReason::NoToken), HintReason::for_status);
        self.show(Screen::Ready { hint, busy: false });
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.show(Screen::Error {
            message: message.into(),
        });
    }

    pub(crate) fn enter_confirmation(&mut self, article: PendingArticle) {
        self.pending = Some(article.clone());
        self.screen = Screen::Confirmation {
            article,
            sending: false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_reason_for_status() {
        assert_eq!(HintReason::for_status(&TokenStatus::valid()), None);
        assert_eq!(HintReason::for_status(&TokenStatus::no_token()), Some(HintReason::NoToken));
        assert_eq!(
            HintReason::for_status(&TokenStatus::invalid(TokenProblem::NoProPlan)),
            Some(HintReason::NoProPlan)
        );
        assert_eq!(
            HintReason::for_status(&TokenStatus::invalid(TokenProblem::ApiError(502))),
            Some(HintReason::Unavailable)
        );
        assert_eq!(
            HintReason::for_status(&TokenStatus::network_error("offline")),
            Some(HintReason::Unavailable)
        );
    }

    #[test]
    fn test_new_state_is_loading() {
        let state = PopupState::new(Origin::Toolbar, &Settings::default());

        assert_eq!(state.screen(), &Screen::Loading);
        assert_eq!(state.pending(), None);
        assert_eq!(state.dashboard_url, "https://curaq.app");
    }

    #[test]
    fn test_leaving_confirmation_drops_pending() {
        let mut state = PopupState::new(Origin::Toolbar, &Settings::default());
        state.enter_confirmation(PendingArticle::new("https://example.com/a", "Example"));
        assert!(state.pending().is_some());

        state.show(Screen::Settings {
            section: SettingsSection::Checking,
        });

        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_only_the_latest_check_is_accepted() {
        let mut state = PopupState::new(Origin::Toolbar, &Settings::default());
        let first = state.check_token(CheckPurpose::Startup);
        let second = state.check_token(CheckPurpose::Startup);
        assert_ne!(first, second);

        assert!(!state.accept(Awaiting::TokenCheck {
            purpose: CheckPurpose::Startup,
            ticket: 1
        }));
        assert!(state.accept(Awaiting::TokenCheck {
            purpose: CheckPurpose::Startup,
            ticket: 2
        }));
        assert_eq!(state.awaiting, None);
    }

    #[test]
    fn test_switching_views_drops_outstanding_reply() {
        let mut state = PopupState::new(Origin::Toolbar, &Settings::default());
        state.awaiting = Some(Awaiting::TokenClear);
        assert!(!state.settings_available());

        state.show_ready();

        assert!(!state.accept(Awaiting::TokenClear));
        assert!(state.settings_available());
    }

    #[test]
    fn test_ready_without_known_status_shows_hint() {
        let mut state = PopupState::new(Origin::Toolbar, &Settings::default());
        state.show_ready();
        assert!(state.hint_visible());
    }
}
