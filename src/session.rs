//! Interactive Session
//!
//! Owns what is currently displayed. Every query gets a sequence number when
//! it is issued; a result older than the one on screen is dropped, so a slow
//! earlier query can never overwrite a newer answer.

use crate::aggregator::AggregatedResult;
use crate::engine::LookupEngine;
use crate::error::{LookupError, Result};
use crate::render::{loading_line, render_failure};
use crate::view::WordView;
use crate::word::Word;
use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

pub type QuerySeq = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Idle,
    Showing {
        seq: QuerySeq,
        view: WordView,
        shown_at: DateTime<Utc>,
    },
    Failed {
        seq: QuerySeq,
        message: String,
        shown_at: DateTime<Utc>,
    },
}

impl DisplayState {
    pub fn seq(&self) -> Option<QuerySeq> {
        match self {
            DisplayState::Idle => None,
            DisplayState::Showing { seq, .. } | DisplayState::Failed { seq, .. } => Some(*seq),
        }
    }
}

pub struct SessionController {
    next_seq: QuerySeq,
    precise_errors: bool,
    state: DisplayState,
}

impl SessionController {
    pub fn new(precise_errors: bool) -> Self {
        Self {
            next_seq: 1,
            precise_errors,
            state: DisplayState::Idle,
        }
    }

    /// Allocate the sequence number for a new query.
    pub fn issue(&mut self) -> QuerySeq {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Apply a finished query. Returns the new display state, or `None` when
    /// the result is older than what is already displayed.
    pub fn accept(
        &mut self,
        seq: QuerySeq,
        word: &str,
        result: Result<AggregatedResult>,
    ) -> Option<&DisplayState> {
        if let Some(shown) = self.state.seq() {
            if seq < shown {
                debug!("Dropping stale result #{} for '{}' (showing #{})", seq, word, shown);
                return None;
            }
        }

        let shown_at = Utc::now();
        self.state = match result {
            Ok(result) => DisplayState::Showing {
                seq,
                view: WordView::build(&result),
                shown_at,
            },
            Err(e) => DisplayState::Failed {
                seq,
                message: render_failure(word, &e, self.precise_errors),
                shown_at,
            },
        };
        Some(&self.state)
    }
}

struct Finished {
    seq: QuerySeq,
    word: String,
    result: Result<AggregatedResult>,
}

/// Read words line by line and print each lookup as it completes. Lookups run
/// concurrently; input ends at EOF or `:quit`, after in-flight lookups finish.
pub async fn run_interactive<R, W>(engine: LookupEngine, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut controller = SessionController::new(engine.config().precise_errors);
    let mut tasks: JoinSet<Finished> = JoinSet::new();
    let mut lines = reader.lines();
    let mut input_open = true;

    while input_open || !tasks.is_empty() {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                if line.trim() == ":quit" {
                    input_open = false;
                    continue;
                }
                let word = match Word::parse(&line) {
                    Ok(word) => word,
                    Err(e) => {
                        write_block(&mut writer, &render_failure("", &e, false)).await?;
                        continue;
                    }
                };

                let seq = controller.issue();
                write_block(&mut writer, &loading_line(word.as_str())).await?;

                let engine = engine.clone();
                tasks.spawn(async move {
                    let result = engine.lookup_word(&word).await;
                    Finished { seq, word: word.to_string(), result }
                });
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                let Some(Finished { seq, word, result }) = completed(joined) else {
                    continue;
                };
                match controller.accept(seq, &word, result) {
                    Some(DisplayState::Showing { view, .. }) => {
                        write_block(&mut writer, &view.to_string()).await?;
                    }
                    Some(DisplayState::Failed { message, .. }) => {
                        write_block(&mut writer, message).await?;
                    }
                    Some(DisplayState::Idle) | None => {}
                }
            }
            else => break,
        }
    }

    info!("Interactive session finished");
    writer.flush().await.map_err(LookupError::from)
}

/// A lookup task that panicked or was cancelled still counts as finished; it
/// just has nothing to show.
fn completed(joined: std::result::Result<Finished, JoinError>) -> Option<Finished> {
    match joined {
        Ok(finished) => Some(finished),
        Err(e) => {
            warn!("Lookup task ended without a result: {}", e);
            None
        }
    }
}

async fn write_block<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> Result<()> {
    writer.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;
    Ok(())
}
