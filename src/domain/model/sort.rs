use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::book::BookRecord;
use super::collation::locale_compare;
use crate::domain::error::DomainError;

/// 並び替えのキー。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Author,
    /// 数値モードで比較する（"9" < "10"）
    Pages,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Pages => "pages",
        }
    }

    pub fn compare(&self, a: &BookRecord, b: &BookRecord) -> Ordering {
        match self {
            SortField::Title => locale_compare(a.title(), b.title(), false),
            SortField::Author => locale_compare(a.author(), b.author(), false),
            SortField::Pages => locale_compare(&a.pages().as_text(), &b.pages().as_text(), true),
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "pages" => Ok(SortField::Pages),
            other => Err(DomainError::UnknownSortField(other.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_fields() {
        assert_eq!("title".parse::<SortField>().unwrap(), SortField::Title);
        assert_eq!("author".parse::<SortField>().unwrap(), SortField::Author);
        assert_eq!("pages".parse::<SortField>().unwrap(), SortField::Pages);
    }

    #[test]
    fn parse_rejects_unknown_field() {
        let err = "isRead".parse::<SortField>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownSortField(ref f) if f == "isRead"));
        assert!("Title".parse::<SortField>().is_err());
    }

    #[test]
    fn pages_compare_numerically_across_shapes() {
        let nine = BookRecord::new("A", "X", "9", false);
        let ten = BookRecord::new("B", "X", 10, false);
        assert_eq!(SortField::Pages.compare(&nine, &ten), Ordering::Less);
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for field in [SortField::Title, SortField::Author, SortField::Pages] {
            assert_eq!(field.to_string().parse::<SortField>().unwrap(), field);
        }
    }
}
