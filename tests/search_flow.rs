//! End-to-end tests over the full write/read cycle.
//!
//! A minimal in-process engine speaks the wire protocol on a loopback TCP
//! socket: it stores the documents it is sent and answers searches by
//! scanning the stored `token|payload` pairs. That keeps the whole
//! index-then-search flow honest without depending on a real engine.

use beeline::engine::protocol::{
    Document, Hit, Request, Response, SearchResults, read_message, write_message,
};
use beeline::engine::{EngineClient, EngineError};
use beeline::highlight;
use beeline::matches::{LineMatches, MatchState, PayloadMatch};
use beeline::query::build_query;
use beeline::unit;
use std::collections::HashMap;
use std::io::{BufReader, BufWriter};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;

/// A stored-document engine good enough for these tests.
#[derive(Default)]
struct FakeEngine {
    docs: Vec<Document>,
}

impl FakeEngine {
    fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::Save { documents, .. } => {
                let indexed = documents.len();
                self.docs.extend(documents);
                Response::Saved { indexed }
            }
            Request::Hashes { .. } => Response::Hashes {
                hashes: self
                    .docs
                    .iter()
                    .map(|d| (d.id.clone(), d.content_hash))
                    .collect(),
            },
            Request::Search { query, .. } => {
                let mut hits = Vec::new();
                for doc in &self.docs {
                    if let Some(id) = &query.id {
                        if id != &doc.id {
                            continue;
                        }
                    }

                    let mut state = Vec::new();
                    for pair in doc.encoded_tokens.split(' ').filter(|s| !s.is_empty()) {
                        let (text, payload) = pair.rsplit_once('|').unwrap();
                        let payload: u32 = payload.parse().unwrap();
                        for term in &query.terms {
                            if term.text == text {
                                state.push(PayloadMatch {
                                    payload,
                                    query_token_index: term.index,
                                });
                            }
                        }
                    }

                    if !state.is_empty() || query.id.is_some() {
                        hits.push(Hit {
                            id: doc.id.clone(),
                            score: state.len() as f32,
                            display_content: doc.display_content.clone(),
                            match_state: MatchState::Payloads(state),
                        });
                    }
                }

                Response::Results(SearchResults {
                    total: hits.len() as u64,
                    took_ms: 0.0,
                    hits,
                })
            }
            Request::Stat => Response::Error {
                message: "stat not supported by the fake engine".to_string(),
            },
        }
    }
}

/// Serve one client connection, then stop.
fn spawn_engine(mut engine: FakeEngine) -> (String, JoinHandle<FakeEngine>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().unwrap().to_string();

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        serve(&mut engine, stream);
        engine
    });

    (addr, handle)
}

fn serve(engine: &mut FakeEngine, stream: TcpStream) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut writer = BufWriter::new(stream);

    loop {
        let request: Request = match read_message(&mut reader) {
            Ok(r) => r,
            Err(_) => break, // client hung up
        };
        let response = engine.handle(request);
        write_message(&mut writer, &response).expect("write response");
    }
}

#[test]
fn test_index_then_search_two_line_file() {
    let (addr, handle) = spawn_engine(FakeEngine::default());
    let mut client = EngineClient::connect(&addr, "code").unwrap();

    let unit = unit::build("a/b.c", b"public void run()\nint x = 1;");
    let indexed = client
        .save(
            vec![Document {
                id: unit.id.clone(),
                display_content: unit.display_content.clone(),
                encoded_tokens: unit.encoded_tokens.clone(),
                content_hash: unit.content_hash,
            }],
            true,
        )
        .unwrap();
    assert_eq!(indexed, 1);

    let results = client.search(build_query("run", false), 0, 10).unwrap();
    assert_eq!(results.total, 1);

    let hit = &results.hits[0];
    assert_eq!(hit.id, "a/b.c");

    let matches = LineMatches::from_state(&hit.match_state);
    assert_eq!(matches.matched_lines(), 1);
    assert!(matches.is_best(0));

    let lines: Vec<&str> = unit::split_lines(&hit.display_content).collect();
    let rendered = highlight::render(&lines, &matches, false, 2);

    assert!(rendered[0].emphasized);
    assert!(rendered[0].shown);
    // No preceding context exists; the following line is pulled in
    assert!(rendered[1].shown);
    assert!(!rendered[1].emphasized);

    let excerpt = highlight::excerpt_html(&rendered);
    assert_eq!(excerpt, "<b>public void run()</b>\nint x = 1;");

    drop(client);
    handle.join().unwrap();
}

#[test]
fn test_stored_hashes_support_change_detection() {
    let (addr, handle) = spawn_engine(FakeEngine::default());
    let mut client = EngineClient::connect(&addr, "code").unwrap();

    let unit = unit::build("src/x.rs", b"fn main() {}");
    client
        .save(
            vec![Document {
                id: unit.id.clone(),
                display_content: unit.display_content.clone(),
                encoded_tokens: unit.encoded_tokens.clone(),
                content_hash: unit.content_hash,
            }],
            false,
        )
        .unwrap();

    let hashes: HashMap<String, u32> = client.hashes().unwrap();
    assert_eq!(hashes.get("src/x.rs"), Some(&unit.content_hash));

    // Rebuilding from identical bytes reproduces the stored hash, so the
    // indexer would skip this unit
    let rebuilt = unit::build("src/x.rs", b"fn main() {}");
    assert_eq!(hashes.get("src/x.rs"), Some(&rebuilt.content_hash));

    drop(client);
    handle.join().unwrap();
}

#[test]
fn test_whole_file_request_by_id() {
    let (addr, handle) = spawn_engine(FakeEngine::default());
    let mut client = EngineClient::connect(&addr, "code").unwrap();

    let unit = unit::build("lib.rs", b"fn a() {}\nfn b() {}\nfn c() {}\nfn d() {}");
    client
        .save(
            vec![Document {
                id: unit.id.clone(),
                display_content: unit.display_content.clone(),
                encoded_tokens: unit.encoded_tokens.clone(),
                content_hash: unit.content_hash,
            }],
            false,
        )
        .unwrap();

    let mut query = build_query("fn b", false);
    query.id = Some("lib.rs".to_string());
    let results = client.search(query, 0, 10).unwrap();
    let hit = &results.hits[0];

    let matches = LineMatches::from_state(&hit.match_state);
    let lines: Vec<&str> = unit::split_lines(&hit.display_content).collect();
    let rendered = highlight::render(&lines, &matches, true, 2);

    // Every line is returned; emphasis marking is unchanged
    assert!(rendered.iter().all(|l| l.shown));
    assert!(rendered[1].emphasized);
    assert_eq!(rendered.len(), 4);

    drop(client);
    handle.join().unwrap();
}

#[test]
fn test_engine_error_surfaces_as_single_condition() {
    let (addr, handle) = spawn_engine(FakeEngine::default());
    let mut client = EngineClient::connect(&addr, "code").unwrap();

    // The fake engine rejects Stat
    let err = client.stat().unwrap_err();
    match err {
        EngineError::Engine(message) => assert!(message.contains("not supported")),
        other => panic!("expected engine error, got {other:?}"),
    }

    drop(client);
    handle.join().unwrap();
}

#[test]
fn test_path_terms_reach_the_path_stream() {
    // The path stream carries its own tokens; a query like "@b run" lexes
    // the marker word into path terms that exist in the encoded stream
    let unit = unit::build("a/b.c", b"public void run()");
    let query = build_query("@b run", false);

    assert_eq!(query.path_terms, ["b"]);
    assert!(
        unit.encoded_tokens
            .split(' ')
            .any(|pair| pair.starts_with("b|"))
    );
}
