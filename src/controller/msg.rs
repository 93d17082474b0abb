use crate::controller::CheckPurpose;
use crate::protocol::Ack;
use crate::status::TokenStatus;
use crate::tab_data::TabInfo;

/// Where a token was typed in; all three submit the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEntry {
    /// Settings, when no token is stored yet
    Onboarding,
    /// The error view
    Retry,
    /// Settings, replacing a stored token
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The popup or confirmation window was opened.
    Opened,
    /// A token check finished.
    TokenChecked {
        purpose: CheckPurpose,
        ticket: u64,
        status: TokenStatus,
    },
    /// User submitted a token (untrimmed input).
    TokenSubmitted { entry: TokenEntry, raw: String },
    TokenSaved(Ack),
    TokenCleared(Ack),
    /// User clicked "Save this article".
    SaveClicked,
    ActiveTabLoaded(Result<TabInfo, String>),
    /// The share page was (or failed to be) opened.
    SharePageOpened(Ack),
    ConfirmSendClicked,
    ArticleSubmitted(Ack),
    CancelClicked,
    RetryClicked,
    /// Gear button: open settings, or leave them if already open.
    SettingsToggled,
    /// "Set up token" on the ready hint.
    SetupTokenClicked,
    BackClicked,
    ClearTokenClicked,
    DashboardClicked,
}
