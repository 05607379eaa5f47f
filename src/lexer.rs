//! Line lexer for source code.
//!
//! Splits one line into word tokens (maximal `[A-Za-z0-9_]` runs) and
//! operator tokens (maximal runs of a single repeated punctuation character,
//! so `::` and `==` come out as one token each while `->` splits into `-`
//! and `>`). Lexing is restartable per line; there is no cross-line state.

/// Keywords that mark a line as declaration-like. Case-sensitive.
const IMPORTANT_KEYWORDS: [&str; 4] = ["sub", "public", "private", "package"];

/// One lexed token. `position_in_line` counts emitted tokens, not characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub position_in_line: u32,
    pub important: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CharClass {
    Word,
    Operator,
    Separator,
}

fn classify(ch: char) -> CharClass {
    if ch.is_ascii_alphanumeric() || ch == '_' {
        CharClass::Word
    } else if matches!(ch, '!'..='/' | ':'..='@') && ch != ';' {
        CharClass::Operator
    } else {
        CharClass::Separator
    }
}

/// Whether a word token is one of the declaration keywords.
pub fn is_important(text: &str) -> bool {
    IMPORTANT_KEYWORDS.contains(&text)
}

/// Lex a single line into tokens, left to right.
pub fn lex(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_is_word = false;
    // Operator runs only extend while the same character repeats
    let mut run_char: Option<char> = None;

    let flush = |current: &mut String, is_word: bool, tokens: &mut Vec<Token>| {
        if current.is_empty() {
            return;
        }
        let important = is_word && is_important(current);
        tokens.push(Token {
            text: std::mem::take(current),
            position_in_line: tokens.len() as u32,
            important,
        });
    };

    for ch in line.chars() {
        match classify(ch) {
            CharClass::Word => {
                if !current_is_word {
                    flush(&mut current, false, &mut tokens);
                    run_char = None;
                }
                current_is_word = true;
                current.push(ch);
            }
            CharClass::Operator => {
                if current_is_word || run_char != Some(ch) {
                    flush(&mut current, current_is_word, &mut tokens);
                }
                current_is_word = false;
                run_char = Some(ch);
                current.push(ch);
            }
            CharClass::Separator => {
                flush(&mut current, current_is_word, &mut tokens);
                current_is_word = false;
                run_char = None;
            }
        }
    }
    flush(&mut current, current_is_word, &mut tokens);

    tokens
}

/// Decode raw bytes to a string, dropping undecodable sequences entirely.
/// Malformed input is never an error on the write path.
pub fn clean_utf8(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => String::from_utf8_lossy(bytes)
            .chars()
            .filter(|&c| c != char::REPLACEMENT_CHARACTER)
            .collect(),
    }
}
