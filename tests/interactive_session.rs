use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use word_lookup::request::{Endpoint, LookupRequest};
use word_lookup::session::run_interactive;
use word_lookup::transport::LexicalTransport;
use word_lookup::{LookupConfig, LookupEngine, LookupError, Result};

/// Dictionary entries echo the requested word; "slow" answers late, "panic"
/// panics and anything starting with "missing" is unknown. Relations always
/// fail.
struct EchoTransport;

#[async_trait]
impl LexicalTransport for EchoTransport {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn fetch_json(&self, request: &LookupRequest) -> Result<Value> {
        if request.endpoint() != Endpoint::Dictionary {
            return Err(LookupError::transport(request.endpoint().to_string(), "offline"));
        }
        let word = request
            .url()
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();
        if word == "panic" {
            panic!("transport bug");
        }
        if word == "slow" {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        if word.starts_with("missing") {
            return Ok(json!({"title": "No Definitions Found", "message": "", "resolution": ""}));
        }
        Ok(json!([{
            "word": word,
            "meanings": [{"partOfSpeech": "noun", "definitions": [{"definition": format!("the word {}", word)}]}]
        }]))
    }
}

async fn run(input: &str) -> String {
    let config = LookupConfig {
        dictionary_url: "http://dictionary.test/en/".to_string(),
        datamuse_url: "http://relations.test/words".to_string(),
        ..LookupConfig::default()
    };
    let engine = LookupEngine::new(config, Arc::new(EchoTransport));
    let mut output = Vec::new();
    run_interactive(engine, input.as_bytes(), &mut output)
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_line_is_normalized_and_looked_up() {
    let output = run("Apple\n").await;
    assert!(output.contains("Gathering comprehensive data for \"apple\"..."));
    assert!(output.contains("1. the word apple"));
}

#[tokio::test]
async fn test_unknown_word_shows_generic_message() {
    let output = run("missingword\n").await;
    assert!(output.contains("Word Not Found"));
    assert!(output.contains("\"missingword\""));
}

#[tokio::test]
async fn test_blank_line_prompts_for_a_word() {
    let output = run("   \n").await;
    assert_eq!(output, "Please enter a word to search.\n");
}

#[tokio::test]
async fn test_late_result_does_not_replace_newer_one() {
    let output = run("slow\nquick\n").await;
    assert!(output.contains("1. the word quick"));
    assert!(!output.contains("1. the word slow"));
}

#[tokio::test]
async fn test_quit_stops_reading() {
    let output = run("one\n:quit\ntwo\n").await;
    assert!(output.contains("1. the word one"));
    assert!(!output.contains("\"two\""));
}

#[tokio::test]
async fn test_panicking_lookup_does_not_hang_session() {
    let output = tokio::time::timeout(Duration::from_secs(5), run("panic\n"))
        .await
        .expect("session should finish at end of input");
    assert!(output.contains("Word Not Found"));
    assert!(output.contains("\"panic\""));
}
