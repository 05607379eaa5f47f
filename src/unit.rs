//! Indexable-unit builder (write path).
//!
//! Turns one file into the document shape the remote engine stores: the raw
//! display content plus a space-joined stream of `token|payload` pairs. Two
//! logical streams share the pair list: content tokens (line offset 0) and
//! path tokens (line offset [`PATH_LINE_OFFSET`], `in_path` flag set), so
//! path matches can be told apart from content matches downstream.

use crate::lexer::{self, clean_utf8};
use crate::payload::{self, PATH_LINE_OFFSET};

/// One file, ready to hand to the remote engine. Built per indexing pass and
/// discarded after transmission.
#[derive(Debug, Clone)]
pub struct IndexableUnit {
    /// Relative file path, the document id.
    pub id: String,
    /// Cleaned file content, stored verbatim by the engine for display.
    pub display_content: String,
    /// Space-joined `token|payload` pairs, content stream then path stream.
    pub encoded_tokens: String,
    /// CRC32 of `encoded_tokens`, for change detection.
    pub content_hash: u32,
}

/// Split on `\r` or `\n`. `\r\n` therefore produces an empty line between
/// the two terminators, which keeps content line numbers aligned with the
/// same split applied on the read path.
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content.split(['\r', '\n'])
}

/// Build the indexable unit for one file. Deterministic: identical input
/// bytes always yield an identical token stream, which the hash-based
/// change detection relies on.
pub fn build(rel_path: &str, raw_content: &[u8]) -> IndexableUnit {
    let display_content = clean_utf8(raw_content);

    let mut pairs: Vec<String> = Vec::new();
    for (line_index, line) in split_lines(&display_content).enumerate() {
        encode_line(line, line_index as u32, 0, false, &mut pairs);
    }
    // The whole path is one logical line in its own number space
    encode_line(rel_path, 0, PATH_LINE_OFFSET, true, &mut pairs);

    let encoded_tokens = pairs.join(" ");
    let content_hash = crc32fast::hash(encoded_tokens.as_bytes());

    IndexableUnit {
        id: rel_path.to_string(),
        display_content,
        encoded_tokens,
        content_hash,
    }
}

fn encode_line(
    line: &str,
    line_index: u32,
    line_offset: u32,
    in_path: bool,
    pairs: &mut Vec<String>,
) {
    let tokens = lexer::lex(line);
    let line_important = tokens.iter().any(|t| t.important);

    for token in &tokens {
        // The keyword itself does not carry the important-line flag; only
        // its neighbours do, so the declaration keyword cannot out-score
        // the line it introduces.
        let important = line_important && !token.important;
        let p = payload::encode(
            line_index,
            token.position_in_line,
            important,
            in_path,
            line_offset,
        );
        pairs.push(format!("{}|{}", token.text, p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Payload;

    fn pairs(unit: &IndexableUnit) -> Vec<(String, u32)> {
        unit.encoded_tokens
            .split(' ')
            .filter(|s| !s.is_empty())
            .map(|pair| {
                let (text, payload) = pair.rsplit_once('|').unwrap();
                (text.to_string(), payload.parse().unwrap())
            })
            .collect()
    }

    #[test]
    fn test_content_and_path_streams() {
        let unit = build("a/b.c", b"public void run()\nint x = 1;");
        let pairs = pairs(&unit);

        // Content tokens come first, on their own lines
        let run = pairs.iter().find(|(t, _)| t == "run").unwrap();
        assert_eq!(Payload::decode(run.1).line_index, 0);
        assert!(!Payload::decode(run.1).in_path);

        let x = pairs.iter().find(|(t, _)| t == "x").unwrap();
        assert_eq!(Payload::decode(x.1).line_index, 1);

        // Path tokens live in the offset line-number space
        let path_tok = pairs.iter().find(|(t, _)| t == "b").unwrap();
        let decoded = Payload::decode(path_tok.1);
        assert!(decoded.in_path);
        assert_eq!(decoded.line_index, PATH_LINE_OFFSET);
    }

    #[test]
    fn test_important_line_flag_skips_the_keyword() {
        let unit = build("f", b"public void run()");
        let pairs = pairs(&unit);

        let public = pairs.iter().find(|(t, _)| t == "public").unwrap();
        assert!(!Payload::decode(public.1).important_line);

        let void = pairs.iter().find(|(t, _)| t == "void").unwrap();
        assert!(Payload::decode(void.1).important_line);
    }

    #[test]
    fn test_plain_line_has_no_importance() {
        let unit = build("f", b"foo bar");
        assert!(
            pairs(&unit)
                .iter()
                .all(|(_, p)| !Payload::decode(*p).important_line)
        );
    }

    #[test]
    fn test_positions_increment_per_token() {
        let unit = build("f", b"a::b");
        let positions: Vec<u32> = pairs(&unit)
            .iter()
            .filter(|(_, p)| !Payload::decode(*p).in_path)
            .map(|(_, p)| Payload::decode(*p).position_in_line)
            .collect();
        assert_eq!(positions, [0, 1, 2]);
    }

    #[test]
    fn test_deterministic() {
        let a = build("src/x.rs", b"fn main() {}\nlet y = 2;");
        let b = build("src/x.rs", b"fn main() {}\nlet y = 2;");
        assert_eq!(a.encoded_tokens, b.encoded_tokens);
        assert_eq!(a.content_hash, b.content_hash);
    }

    #[test]
    fn test_hash_tracks_content() {
        let a = build("f", b"alpha");
        let b = build("f", b"beta");
        assert_ne!(a.content_hash, b.content_hash);
    }

    #[test]
    fn test_undecodable_bytes_are_dropped() {
        let unit = build("f", b"ok\xFF\xFEline");
        assert_eq!(unit.display_content, "okline");
    }

    #[test]
    fn test_crlf_keeps_line_numbers_aligned() {
        // "\r\n" yields an empty line between the terminators; what matters
        // is that the write path and read path agree
        let unit = build("f", b"one\r\ntwo");
        let pairs = pairs(&unit);
        let two = pairs.iter().find(|(t, _)| t == "two").unwrap();
        let line = Payload::decode(two.1).line_index;

        let read_side: Vec<&str> = split_lines("one\r\ntwo").collect();
        assert_eq!(read_side[line as usize], "two");
    }
}
