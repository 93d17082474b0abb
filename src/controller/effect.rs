use crate::tab_data::PendingArticle;

/// Which question a token check answers; echoed back with the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPurpose {
    /// Popup opened, retry, back from settings, after clearing
    Startup,
    /// Verifying a token the user just saved
    AfterSave,
    /// Choosing which settings section to show
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `ticket` is echoed back so a superseded check can be told apart
    CheckToken { purpose: CheckPurpose, ticket: u64 },
    SaveToken { token: String },
    ClearToken,
    QueryActiveTab,
    OpenSharePage { tab_id: i32 },
    SubmitArticle { article: PendingArticle },
    OpenTab { url: String },
    ClosePopup,
    ClosePopupAfter { delay_ms: u32 },
}
