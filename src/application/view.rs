use serde::Serialize;

use crate::domain::model::book::{BookRecord, Pages};
use crate::domain::model::library::Library;

/// 重複追加時に利用者へ見せるメッセージ
pub const DUPLICATE_MESSAGE: &str = "This book already exists in your library";

/// 1冊分の表示カード。titleは操作時にそのまま返してもらう識別子を兼ねる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookCard {
    pub title: String,
    pub author: String,
    pub pages: String,
    pub read_label: String,
    pub is_read: bool,
}

impl BookCard {
    pub fn from_record(book: &BookRecord) -> Self {
        Self {
            title: book.title().to_string(),
            author: format!("by {}", book.author()),
            pages: format!("{} pages", book.pages()),
            read_label: read_label(book.is_read()).to_string(),
            is_read: book.is_read(),
        }
    }
}

fn read_label(is_read: bool) -> &'static str {
    if is_read {
        "Read"
    } else {
        "Not Read"
    }
}

/// 追加フォームの入力値。pagesは入力された文字列のまま保持する。
#[derive(Debug, Clone, Default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub pages: String,
    pub is_read: bool,
}

impl BookForm {
    pub fn into_record(self) -> BookRecord {
        BookRecord::new(self.title, self.author, Pages::Text(self.pages), self.is_read)
    }
}

/// Libraryの現在順でカード列を作る。
pub fn render_cards(library: &Library) -> Vec<BookCard> {
    library.iter().map(BookCard::from_record).collect()
}

/// カード列をテキストに変換する。1行1冊。
pub fn render_text(library: &Library) -> String {
    let mut buf = format!("# Library ({} books)\n\n", library.len());
    for (i, card) in render_cards(library).iter().enumerate() {
        buf.push_str(&format!(
            "{}. {} | {} | {} | [{}]\n",
            i + 1,
            card.title,
            card.author,
            card.pages,
            card.read_label
        ));
    }
    buf
}
