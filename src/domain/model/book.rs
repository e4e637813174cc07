use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 欠損フィールドの既定値（タイトル・著者）
pub const UNKNOWN: &str = "Unknown";

/// ページ数。数値または入力そのままの文字列を保持し、保存→読込で形を変えない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pages {
    Count(u64),
    Text(String),
}

impl Pages {
    /// 比較用の文字列表現
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Pages::Count(n) => Cow::Owned(n.to_string()),
            Pages::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl Default for Pages {
    fn default() -> Self {
        Pages::Count(0)
    }
}

impl From<u64> for Pages {
    fn from(n: u64) -> Self {
        Pages::Count(n)
    }
}

impl From<String> for Pages {
    fn from(s: String) -> Self {
        Pages::Text(s)
    }
}

impl From<&str> for Pages {
    fn from(s: &str) -> Self {
        Pages::Text(s.to_string())
    }
}

impl fmt::Display for Pages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pages::Count(n) => write!(f, "{n}"),
            Pages::Text(s) => f.write_str(s),
        }
    }
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// 1冊分のレコード。同一性はtitleのみで判定する（大文字小文字を区別する完全一致）。
/// Libraryが所有し、既読切替もLibrary経由で行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    #[serde(default = "unknown")]
    title: String,
    #[serde(default = "unknown")]
    author: String,
    #[serde(default)]
    pages: Pages,
    #[serde(default)]
    is_read: bool,
}

impl BookRecord {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        pages: impl Into<Pages>,
        is_read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            pages: pages.into(),
            is_read,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    pub fn is_read(&self) -> bool {
        self.is_read
    }

    pub(crate) fn toggle_read(&mut self) -> bool {
        self.is_read = !self.is_read;
        self.is_read
    }
}

impl Default for BookRecord {
    fn default() -> Self {
        Self::new(UNKNOWN, UNKNOWN, Pages::default(), false)
    }
}
