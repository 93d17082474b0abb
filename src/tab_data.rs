/// Data structures for CuraQ Saver
use serde::{Deserialize, Serialize};

/// The parts of a browser tab the extension cares about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabInfo {
    pub id: i32,
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl TabInfo {
    pub fn new(id: i32, url: String, title: String) -> TabInfo {
        TabInfo { id, url, title }
    }

    pub fn article(&self) -> PendingArticle {
        PendingArticle {
            url: self.url.clone(),
            title: self.title.clone(),
        }
    }
}

/// An article waiting for the user to confirm the send
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingArticle {
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl PendingArticle {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> PendingArticle {
        PendingArticle {
            url: url.into(),
            title: title.into(),
        }
    }
}
