//! "en" 照合順序の近似。
//!
//! 一次比較はアクセントと大文字小文字を無視し、空白 < 記号 < 数字 < 文字 の順。
//! 文字は正準分解して基底文字で比べる（"É" は一次では "e"）。
//! numericモードでは連続したASCII数字を数値として比較する（"9" < "10"）。
//! 一次で同順なら二次でアクセント（無印が先）、それも同じなら三次で小文字を先にする。

use std::cmp::Ordering;

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

#[derive(Debug, Clone)]
enum Element<'a> {
    Space,
    Symbol(char),
    /// 数字列（非numericモードでは1桁ずつ）
    Digits(&'a str),
    Letter {
        /// 小文字化した基底文字
        base: char,
        /// 結合文字（分解順）
        marks: Vec<char>,
        upper: bool,
    },
}

impl Element<'_> {
    fn rank(&self) -> u8 {
        match self {
            Element::Space => 0,
            Element::Symbol(_) => 1,
            Element::Digits(_) => 2,
            Element::Letter { .. } => 3,
        }
    }

    fn primary_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Element::Symbol(a), Element::Symbol(b)) => a.cmp(b),
            (Element::Digits(a), Element::Digits(b)) => numeric_cmp(a, b),
            (Element::Letter { base: a, .. }, Element::Letter { base: b, .. }) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn marks(&self) -> &[char] {
        match self {
            Element::Letter { marks, .. } => marks,
            _ => &[],
        }
    }

    fn is_upper(&self) -> bool {
        matches!(self, Element::Letter { upper: true, .. })
    }
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// 正準分解して (基底文字, 結合文字列) に分ける。
/// 基底 + 結合文字 の形に分解できない文字（ハングル音節など）はそのまま返す。
fn split_accents(c: char) -> (char, Vec<char>) {
    let mut parts = Vec::new();
    decompose_canonical(c, |d| parts.push(d));
    match parts.split_first() {
        Some((&base, rest)) if rest.iter().all(|&m| is_combining_mark(m)) => (base, rest.to_vec()),
        _ => (c, Vec::new()),
    }
}

/// 先頭ゼロを無視して数字列を数値比較する。桁数の上限はない。
fn numeric_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn elements(s: &str, numeric: bool) -> Vec<Element<'_>> {
    let mut out: Vec<Element<'_>> = Vec::with_capacity(s.len());
    let mut chars = s.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        // 分解済み入力の結合文字は直前の文字に付ける
        if is_combining_mark(c) {
            if let Some(Element::Letter { marks, .. }) = out.last_mut() {
                marks.push(c);
                continue;
            }
        }
        let element = if c.is_ascii_digit() {
            let mut end = start + c.len_utf8();
            if numeric {
                while let Some(&(i, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
            }
            Element::Digits(&s[start..end])
        } else if c.is_whitespace() {
            Element::Space
        } else if c.is_alphanumeric() {
            let (base, marks) = split_accents(c);
            Element::Letter {
                base: fold_case(base),
                marks,
                upper: c.is_uppercase(),
            }
        } else {
            Element::Symbol(c)
        };
        out.push(element);
    }
    out
}

/// 2つの文字列を "en" ロケール相当の順序で比較する。
pub fn locale_compare(a: &str, b: &str, numeric: bool) -> Ordering {
    let ea = elements(a, numeric);
    let eb = elements(b, numeric);

    for (x, y) in ea.iter().zip(eb.iter()) {
        let ord = x.primary_cmp(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    let ord = ea.len().cmp(&eb.len());
    if ord != Ordering::Equal {
        return ord;
    }

    // 二次比較: アクセント無し < アクセント有り
    let ord = ea
        .iter()
        .map(Element::marks)
        .cmp(eb.iter().map(Element::marks));
    if ord != Ordering::Equal {
        return ord;
    }

    // 三次比較: 小文字 < 大文字
    ea.iter()
        .map(Element::is_upper)
        .cmp(eb.iter().map(Element::is_upper))
}
