//! Query construction.
//!
//! Turns the user's raw query string into the term list sent to the remote
//! engine: `@`-prefixed words become path-only terms, everything else is
//! lexed with the same rules as indexed content so query terms line up with
//! indexed tokens. The scoring formula itself is the engine's business; the
//! front end only declares the terms and an optional "all terms on one line"
//! intent.

use crate::lexer;
use serde::{Deserialize, Serialize};

/// Marker prefix routing a query word to the path-only clause.
pub const PATH_MARKER: char = '@';

/// One content term with its stable index, used by payload-bearing match
/// state to report which query token matched where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTerm {
    pub text: String,
    pub index: u32,
}

/// The query shape handed to the engine's relevance evaluator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Content terms, one per lexed token, indexed 0..n.
    pub terms: Vec<QueryTerm>,
    /// Terms restricted to the file-path token stream.
    pub path_terms: Vec<String>,
    /// Restrict the result to a single document id (whole-file view).
    pub id: Option<String>,
    /// Ask the engine to require every content term on one line.
    pub same_line: bool,
}

impl SearchQuery {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.path_terms.is_empty() && self.id.is_none()
    }
}

/// Build the engine query from a raw user string.
pub fn build_query(raw: &str, same_line: bool) -> SearchQuery {
    let mut path_terms = Vec::new();
    let mut content = String::new();

    for word in raw.split_whitespace() {
        if let Some(rest) = word.strip_prefix(PATH_MARKER) {
            // Path words are lexed too, so "@src/io" matches the indexed
            // path tokens "src" and "io"
            for token in lexer::lex(rest) {
                path_terms.push(token.text);
            }
        } else {
            if !content.is_empty() {
                content.push(' ');
            }
            content.push_str(word);
        }
    }

    let terms = lexer::lex(&content)
        .into_iter()
        .enumerate()
        .map(|(i, token)| QueryTerm {
            text: token.text,
            index: i as u32,
        })
        .collect();

    SearchQuery {
        terms,
        path_terms,
        id: None,
        same_line,
    }
}
