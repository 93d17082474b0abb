//! Popup state controller: a pure state machine plus the effects it asks for.
//!
//! The UI feeds user actions and gateway replies in as [`Msg`]s and performs
//! the returned [`Effect`]s, dispatching their results back as new messages.
mod effect;
mod msg;
mod state;
mod update;

pub use effect::{CheckPurpose, Effect};
pub use msg::{Msg, TokenEntry};
pub use state::{HintReason, Origin, PopupState, Screen, SettingsSection};
pub use update::{
    MISSING_ARTICLE_MESSAGE, SEND_FALLBACK_MESSAGE, SHARE_FALLBACK_MESSAGE, ready_hint, update,
};
