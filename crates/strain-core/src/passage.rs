//! Passage-history parsing.
//!
//! A left-to-right scanner over the passage text. The uppercase of the
//! current character selects a small sub-grammar that consumes one token
//! and emits exactly one canonical part; any dead end abandons the whole
//! passage and reports the original text as unrecognized.

use regex::Regex;
use std::sync::LazyLock;

/// Optional tail shared by the substrate patterns: further stages, an
/// isolate/clone suffix, a `+digit` suffix, a trailing `(YYYY-MM-DD)` date.
const STAGE_TAIL: &str =
    r"(?:/[^ ]*)?(?: ?(?:ISOLATE|CLONE)[ -]?\d+)?(?:\+\d)?(?: \(\d{4}-\d{2}-\d{2}\))?$";

/// Egg-substrate markers, anchored at the front of the passage string.
static EGG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:E|SPF(?:CE)?|SPE|EGG)(?:\d+|\?)?{STAGE_TAIL}"))
        .expect("valid egg pattern")
});

/// Cell-substrate markers, same tail conventions as the egg pattern.
static CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:MDCK|SIAT|QMC|MK|CKC|CEK|CACO|LLC|LLK|PRMK|MEK|SPFCK|C)(?:\d+|\?)?{STAGE_TAIL}"
    ))
    .expect("valid cell pattern")
});

/// Substrate classification of a finished passage string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassageCategory {
    Egg,
    Cell,
    Other,
}

/// Parse a raw passage-history string.
///
/// Returns `(canonical, unrecognized)`; the unrecognized remainder is
/// non-empty exactly when the canonical passage is empty.
pub fn parse_passage(raw: &str) -> (String, String) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (String::new(), String::new());
    }
    match scan(&trimmed.to_uppercase()) {
        Some(canonical) if !canonical.is_empty() => (canonical, String::new()),
        _ => (String::new(), trimmed.to_string()),
    }
}

/// Whether the passage string indicates egg propagation.
pub fn is_egg(passage: &str) -> bool {
    EGG_RE.is_match(passage)
}

/// Whether the passage string indicates cell propagation.
pub fn is_cell(passage: &str) -> bool {
    CELL_RE.is_match(passage)
}

pub fn classify_passage(passage: &str) -> PassageCategory {
    if is_cell(passage) {
        PassageCategory::Cell
    } else if is_egg(passage) {
        PassageCategory::Egg
    } else {
        PassageCategory::Other
    }
}

/// Strip a trailing ` (YYYY-MM-DD)` date suffix.
///
/// Exactly the fixed 13-character form is removed; the check looks only at
/// the fixed-offset characters (space, parens, the two hyphens).
pub fn without_date(passage: &str) -> &str {
    let bytes = passage.as_bytes();
    let n = bytes.len();
    if n >= 13 {
        let suffix = &bytes[n - 13..];
        if suffix[0] == b' '
            && suffix[1] == b'('
            && suffix[6] == b'-'
            && suffix[9] == b'-'
            && suffix[12] == b')'
        {
            return &passage[..n - 13];
        }
    }
    passage
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    out: String,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            out: String::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Consume the literal if it is next, byte for byte.
    fn eat(&mut self, literal: &str) -> bool {
        let end = self.pos + literal.chars().count();
        if end > self.chars.len() {
            return false;
        }
        if self.chars[self.pos..end].iter().collect::<String>() == literal {
            self.pos = end;
            return true;
        }
        false
    }

    /// Consume a digit run, if any.
    fn eat_digits(&mut self) -> Option<String> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.chars[start..self.pos].iter().collect())
    }

    /// At end of input or in front of a stage separator.
    fn at_boundary(&self) -> bool {
        matches!(self.peek(), None | Some(' ' | '/' | ',' | '+'))
    }

    fn emit(&mut self, part: &str) {
        if !self.out.is_empty() && !self.out.ends_with('/') {
            self.out.push('/');
        }
        self.out.push_str(part);
    }

    fn emit_separator(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('/') {
            self.out.push('/');
        }
    }

    /// Counted substrate: digits, `X`/`?`, or nothing before a boundary.
    fn counted(&mut self, code: &str) -> Option<()> {
        if let Some(digits) = self.eat_digits() {
            self.emit(&format!("{code}{digits}"));
            return Some(());
        }
        if matches!(self.peek(), Some('X' | '?')) {
            self.bump();
            self.emit(&format!("{code}?"));
            return Some(());
        }
        if self.at_boundary() {
            self.emit(&format!("{code}?"));
            return Some(());
        }
        None
    }

    fn scan_c(&mut self) -> Option<()> {
        // Clinical-specimen spellings mean no propagation at all.
        if self.eat("LINICAL") {
            self.eat_specimen_tail();
            self.emit("OR");
            return Some(());
        }
        if self.eat("S-ORI") {
            self.eat("GINAL");
            self.emit("OR");
            return Some(());
        }
        self.counted("MDCK")
    }

    fn eat_specimen_tail(&mut self) {
        let saved = self.pos;
        if matches!(self.peek(), Some(' ' | '-')) {
            self.pos += 1;
        }
        if !(self.eat("SPECIMEN") || self.eat("SAMPLE")) {
            self.pos = saved;
        }
    }

    fn scan_m(&mut self) -> Option<()> {
        if self.eat("DCK") {
            if matches!(self.peek(), Some('-')) {
                self.pos += 1;
            }
            if self.eat("SIAT") {
                return self.siat_count();
            }
            return self.counted("MDCK");
        }
        if self.eat("K") {
            return self.counted("MK");
        }
        None
    }

    /// `SIAT1` is the line name when more digits follow, a count otherwise.
    fn siat_count(&mut self) -> Option<()> {
        if self.peek() == Some('1')
            && self
                .chars
                .get(self.pos + 1)
                .is_some_and(|c| c.is_ascii_digit())
        {
            self.pos += 1;
        }
        self.counted("SIAT")
    }

    fn scan_o(&mut self) -> Option<()> {
        if !self.eat("R") {
            return None;
        }
        self.eat("IGINAL");
        self.eat_specimen_tail();
        self.emit("OR");
        Some(())
    }

    fn scan_p(&mut self) -> Option<()> {
        if let Some(digits) = self.eat_digits() {
            self.emit(&format!("X{digits}"));
            return Some(());
        }
        if self.peek() == Some('X') {
            self.bump();
            self.emit("X?");
            return Some(());
        }
        None
    }

    fn scan_q(&mut self) -> Option<()> {
        if !self.eat("MC") {
            return None;
        }
        self.counted("QMC")
    }

    fn scan_s(&mut self) -> Option<()> {
        if !self.eat("IAT") {
            return None;
        }
        self.siat_count()
    }

    fn scan_x(&mut self) -> Option<()> {
        if let Some(digits) = self.eat_digits() {
            self.emit(&format!("X{digits}"));
            return Some(());
        }
        if self.peek() == Some('?') {
            self.bump();
        }
        self.emit("X?");
        Some(())
    }
}

/// Inner scan: `None` is the dead-end short circuit that abandons the
/// whole passage.
fn scan(text: &str) -> Option<String> {
    let mut scanner = Scanner::new(text);
    while let Some(ch) = scanner.peek() {
        match ch {
            ' ' => {
                scanner.pos += 1;
            }
            '/' | ',' | '+' => {
                scanner.pos += 1;
                scanner.emit_separator();
            }
            'C' => {
                scanner.pos += 1;
                scanner.scan_c()?;
            }
            'D' => {
                scanner.pos += 1;
                scanner.counted("D")?;
            }
            'E' => {
                scanner.pos += 1;
                scanner.counted("E")?;
            }
            'M' => {
                scanner.pos += 1;
                scanner.scan_m()?;
            }
            'O' => {
                scanner.pos += 1;
                scanner.scan_o()?;
            }
            'P' => {
                scanner.pos += 1;
                scanner.scan_p()?;
            }
            'Q' => {
                scanner.pos += 1;
                scanner.scan_q()?;
            }
            'S' => {
                scanner.pos += 1;
                scanner.scan_s()?;
            }
            'X' => {
                scanner.pos += 1;
                scanner.scan_x()?;
            }
            _ => return None,
        }
    }
    let mut out = scanner.out;
    while out.ends_with('/') {
        out.pop();
    }
    Some(out)
}
