//! Plain-text terminal rendering of lookup views and failures.

use crate::error::{ErrorKind, LookupError};
use crate::view::{FrequencyView, MeaningView, PhoneticView, RelationTag, WordView, ATTRIBUTION};
use std::fmt;

const BAR_WIDTH: usize = 30;

pub fn loading_line(word: &str) -> String {
    format!("Gathering comprehensive data for \"{}\"...", word)
}

impl fmt::Display for WordView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headword)?;
        writeln!(f, "{}", "=".repeat(self.headword.chars().count().max(1)))?;
        for phonetic in &self.phonetics {
            write!(f, "{}", phonetic)?;
        }

        if let Some(frequency) = &self.frequency {
            writeln!(f)?;
            write!(f, "{}", frequency)?;
        }

        if let Some(origin) = &self.etymology {
            writeln!(f, "\nEtymology & Origin\n  {}", origin)?;
        }

        for meaning in &self.meanings {
            write!(f, "{}", meaning)?;
        }

        for section in &self.sections {
            let tags: Vec<String> = section.tags.iter().map(RelationTag::to_string).collect();
            writeln!(f, "\n{}\n  {}", section.title, tags.join(", "))?;
        }

        if self.additional_entries > 0 {
            writeln!(
                f,
                "\n({} more dictionary entr{} not shown)",
                self.additional_entries,
                if self.additional_entries == 1 { "y" } else { "ies" }
            )?;
        }

        writeln!(f, "\n{}", ATTRIBUTION)
    }
}

impl fmt::Display for PhoneticView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.text, &self.audio_url) {
            (Some(text), Some(audio)) => writeln!(f, "  {}  [play: {}]", text, audio),
            (Some(text), None) => writeln!(f, "  {}", text),
            (None, Some(audio)) => writeln!(f, "  [play: {}]", audio),
            (None, None) => Ok(()),
        }
    }
}

impl fmt::Display for FrequencyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = ((self.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        writeln!(f, "Usage Frequency: {}", self.level.label())?;
        writeln!(
            f,
            "  [{}{}] {:.0}%",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            self.percent
        )
    }
}

impl fmt::Display for MeaningView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n[{}]", self.part_of_speech)?;
        for def in &self.definitions {
            writeln!(f, "  {}. {}", def.number, def.text)?;
            if let Some(example) = &def.example {
                writeln!(f, "     \"{}\"", example)?;
            }
            if !def.synonyms.is_empty() {
                writeln!(f, "     Synonyms: {}", def.synonyms.join(", "))?;
            }
            if !def.antonyms.is_empty() {
                writeln!(f, "     Antonyms: {}", def.antonyms.join(", "))?;
            }
        }
        if !self.related.is_empty() {
            writeln!(f, "  Related: {}", self.related.join(", "))?;
        }
        if !self.opposites.is_empty() {
            writeln!(f, "  Opposites: {}", self.opposites.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for RelationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score {
            Some(score) => write!(f, "{} ({})", self.word, score),
            None => write!(f, "{}", self.word),
        }
    }
}

/// User-facing text for a failed lookup. Transport failures and missing words
/// share one message unless `precise` is set.
pub fn render_failure(word: &str, error: &LookupError, precise: bool) -> String {
    match error.kind() {
        ErrorKind::Input => "Please enter a word to search.\n".to_string(),
        ErrorKind::Config => format!("Configuration problem: {}\n", error),
        ErrorKind::Transport if precise => format!(
            "Lookup Failed\nThe dictionary service could not be reached for \"{}\".\n{}\n",
            word, error
        ),
        ErrorKind::NotFound | ErrorKind::Transport => format!(
            "Word Not Found\nCould not find comprehensive data for \"{}\"\n\
             The word may be misspelled or not available in our databases.\n",
            word
        ),
    }
}
