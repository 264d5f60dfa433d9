use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use word_lookup::request::{Endpoint, LookupRequest, RelationKind};
use word_lookup::render::render_failure;
use word_lookup::transport::LexicalTransport;
use word_lookup::view::WordView;
use word_lookup::{ErrorKind, LookupConfig, LookupEngine, LookupError, Result};

/// Serves canned payloads per endpoint and records every URL it was asked for.
#[derive(Default)]
struct CannedTransport {
    payloads: HashMap<Endpoint, Value>,
    requested: Mutex<Vec<String>>,
}

impl CannedTransport {
    fn with(mut self, endpoint: Endpoint, payload: Value) -> Self {
        self.payloads.insert(endpoint, payload);
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl LexicalTransport for CannedTransport {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn fetch_json(&self, request: &LookupRequest) -> Result<Value> {
        self.requested.lock().unwrap().push(request.url().to_string());
        self.payloads
            .get(&request.endpoint())
            .cloned()
            .ok_or_else(|| LookupError::transport(request.endpoint().to_string(), "network error"))
    }
}

fn hello_payload() -> Value {
    json!([{
        "word": "hello",
        "phonetics": [
            {"text": "/həˈləʊ/", "audio": "https://api.dictionaryapi.dev/media/pronunciations/en/hello-uk.mp3"},
            {"text": "/hɛˈloʊ/"}
        ],
        "origin": "early 19th century: variant of earlier hollo ; related to holla.",
        "meanings": [
            {
                "partOfSpeech": "exclamation",
                "definitions": [{
                    "definition": "used as a greeting or to begin a phone conversation.",
                    "example": "hello there, Katie!",
                    "synonyms": [],
                    "antonyms": []
                }]
            },
            {
                "partOfSpeech": "noun",
                "definitions": [{
                    "definition": "an utterance of ‘hello’; a greeting.",
                    "example": "she was getting polite nods and hellos from people",
                    "synonyms": [],
                    "antonyms": []
                }],
                "synonyms": ["greeting"]
            }
        ]
    }])
}

fn full_hello() -> CannedTransport {
    CannedTransport::default()
        .with(Endpoint::Dictionary, hello_payload())
        .with(
            Endpoint::Relation(RelationKind::Synonym),
            json!([{"word": "hi", "score": 1539}, {"word": "howdy", "score": 1270}]),
        )
        .with(
            Endpoint::Relation(RelationKind::Related),
            json!([{"word": "hello", "score": 40001}, {"word": "hi", "score": 40000}]),
        )
        .with(
            Endpoint::Relation(RelationKind::Rhyme),
            json!([{"word": "bellow", "score": 2000}]),
        )
        .with(
            Endpoint::Relation(RelationKind::Frequency),
            json!([{"word": "hello", "score": 1, "tags": ["f:27.793619"]}]),
        )
        .with(
            Endpoint::Relation(RelationKind::SoundsLike),
            json!([{"word": "hello", "score": 100}, {"word": "hallo", "score": 95}]),
        )
}

fn engine(transport: Arc<CannedTransport>) -> LookupEngine {
    LookupEngine::new(LookupConfig::default(), transport)
}

#[tokio::test]
async fn test_hello_lookup_succeeds() {
    let engine = engine(Arc::new(full_hello()));
    let result = engine.lookup("hello").await.unwrap();

    let parts: Vec<&str> = result
        .entry
        .meanings
        .iter()
        .map(|m| m.part_of_speech.as_str())
        .collect();
    assert_eq!(parts, vec!["exclamation", "noun"]);
    assert!(result.entry.meanings.iter().all(|m| !m.definitions.is_empty()));
    assert!(!result.related(RelationKind::Synonym).is_empty());

    let view = WordView::build(&result);
    assert!(view.etymology.is_some());
    assert!(view.frequency.is_some());
    let related = view
        .sections
        .iter()
        .find(|s| s.kind == RelationKind::Related)
        .unwrap();
    assert!(related.tags.iter().all(|t| t.word != "hello"));
}

#[tokio::test]
async fn test_unknown_word_is_not_found() {
    let transport = full_hello().with(
        Endpoint::Dictionary,
        json!({
            "title": "No Definitions Found",
            "message": "Sorry pal, we couldn't find definitions for the word you were looking for.",
            "resolution": "You can try the search again at later time or head to the web instead."
        }),
    );
    let engine = engine(Arc::new(transport));
    let err = engine.lookup("zzzxcv123").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(render_failure("zzzxcv123", &err, false).starts_with("Word Not Found"));
}

#[tokio::test]
async fn test_frequency_failure_only_drops_frequency() {
    let mut transport = full_hello();
    transport
        .payloads
        .remove(&Endpoint::Relation(RelationKind::Frequency));
    let engine = engine(Arc::new(transport));
    let result = engine.lookup("hello").await.unwrap();

    assert_eq!(result.degraded, vec![RelationKind::Frequency]);
    let view = WordView::build(&result);
    assert!(view.frequency.is_none());
    assert_eq!(view.sections.len(), 4);
}

#[tokio::test]
async fn test_primary_transport_failure_is_distinct_but_rendered_the_same() {
    let mut transport = full_hello();
    transport.payloads.remove(&Endpoint::Dictionary);
    let engine = engine(Arc::new(transport));
    let err = engine.lookup("hello").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    let not_found = LookupError::NotFound("hello".into());
    assert_eq!(
        render_failure("hello", &err, false),
        render_failure("hello", &not_found, false)
    );
    assert_ne!(
        render_failure("hello", &err, true),
        render_failure("hello", &not_found, true)
    );
}

#[tokio::test]
async fn test_repeated_lookups_are_equivalent() {
    let engine = engine(Arc::new(full_hello()));
    let first = engine.lookup("hello").await.unwrap();
    let second = engine.lookup("hello").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_padded_and_cased_input_sends_identical_requests() {
    let padded = Arc::new(full_hello());
    let plain = Arc::new(full_hello());
    engine(padded.clone()).lookup(" Run ").await.ok();
    engine(plain.clone()).lookup("run").await.ok();

    let mut a = padded.requested();
    let mut b = plain.requested();
    a.sort();
    b.sort();
    assert_eq!(a.len(), 6);
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_blank_input_sends_nothing() {
    let transport = Arc::new(full_hello());
    let err = engine(transport.clone()).lookup("   ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
    assert!(transport.requested().is_empty());
}
