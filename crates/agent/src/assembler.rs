//! Token reassembly.
//!
//! Models emit text as a sequence of opaque tokens. `assemble` folds one token
//! into the text accumulated so far, deciding whether the token needs a
//! leading space. The checks run in a fixed order and the first match wins:
//!
//! | Kind | Token | Joined with |
//! |------|-------|-------------|
//! | Newline | `"\n"` | nothing |
//! | Punctuation | `.` `!` `?` `,` | nothing |
//! | NumberContinuation | integer in `[0, 1000)` after a digit or comma | nothing |
//! | EndOfStream | `""` | text returned unchanged |
//! | Word | anything else | one space, none at the start of the text |
//!
//! Large numbers arrive as three-digit groups ("999", "999"), which the
//! continuation rule glues back together.
//!
//! A word the tokenizer splits into sub-word pieces gets a space between the
//! pieces. There is no sub-word boundary information to do better, and
//! downstream consumers rely on this exact output.

/// How a token joins the accumulated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Newline,
    Punctuation,
    NumberContinuation,
    EndOfStream,
    Word,
}

const PUNCTUATION: [&str; 4] = [".", "!", "?", ","];

/// Whether `s` reads as a number in `[0, 1000)`.
///
/// `""`, `" "` and `"\n"` are never numbers. Anything that does not parse is
/// simply not a number.
pub fn is_small_number(s: &str) -> bool {
    if matches!(s, "" | " " | "\n") {
        return false;
    }
    s.trim()
        .parse::<f64>()
        .is_ok_and(|n| (0.0..1000.0).contains(&n))
}

/// Classify `token` against the text it would be appended to.
pub fn classify(text: &str, token: &str) -> TokenKind {
    if token == "\n" {
        return TokenKind::Newline;
    }
    if PUNCTUATION.contains(&token) {
        return TokenKind::Punctuation;
    }
    if is_small_number(token) && ends_with_digit_group(text) {
        return TokenKind::NumberContinuation;
    }
    if token.is_empty() {
        return TokenKind::EndOfStream;
    }
    TokenKind::Word
}

fn ends_with_digit_group(text: &str) -> bool {
    match text.chars().last() {
        Some(',') => true,
        Some(c) => {
            let mut buf = [0u8; 4];
            is_small_number(c.encode_utf8(&mut buf))
        }
        None => false,
    }
}

/// Append `token` to `text`, returning the new text.
pub fn assemble(text: &str, token: &str) -> String {
    match classify(text, token) {
        TokenKind::Newline | TokenKind::Punctuation | TokenKind::NumberContinuation => {
            format!("{text}{token}")
        }
        TokenKind::EndOfStream => text.to_string(),
        TokenKind::Word if text.is_empty() => token.to_string(),
        TokenKind::Word => format!("{text} {token}"),
    }
}

/// Fold a whole token sequence, starting from empty text.
pub fn assemble_all<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .fold(String::new(), |text, token| assemble(&text, token.as_ref()))
}
