//! Display model derived from an aggregated lookup.
//!
//! Decides what is shown: which sections exist, how many tags each holds,
//! and how the frequency figure maps to a level.

use crate::aggregator::AggregatedResult;
use crate::request::RelationKind;
use crate::schema::{Definition, Meaning, Phonetic, RelatedWord};
use serde::Serialize;

pub const ATTRIBUTION: &str = "Data aggregated from: Free Dictionary API, Datamuse API";

/// Cap on meaning-level synonym and antonym tags.
const MEANING_TAG_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordView {
    pub headword: String,
    pub phonetics: Vec<PhoneticView>,
    pub frequency: Option<FrequencyView>,
    pub etymology: Option<String>,
    pub meanings: Vec<MeaningView>,
    pub sections: Vec<RelationSection>,
    pub additional_entries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhoneticView {
    pub text: Option<String>,
    /// Pronunciation audio; the renderer offers it as the playback target.
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrequencyLevel {
    VeryCommon,
    Common,
    Moderate,
    Rare,
}

impl FrequencyLevel {
    pub fn label(self) -> &'static str {
        match self {
            FrequencyLevel::VeryCommon => "Very Common",
            FrequencyLevel::Common => "Common",
            FrequencyLevel::Moderate => "Moderate",
            FrequencyLevel::Rare => "Rare",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyView {
    /// Occurrences per million words, as reported.
    pub per_million: f64,
    /// Bar fill, 0..=100.
    pub percent: f64,
    pub level: FrequencyLevel,
}

impl FrequencyView {
    pub fn from_per_million(per_million: f64) -> Self {
        let percent = (per_million * 2.0).clamp(0.0, 100.0);
        let level = if percent > 70.0 {
            FrequencyLevel::VeryCommon
        } else if percent > 40.0 {
            FrequencyLevel::Common
        } else if percent > 15.0 {
            FrequencyLevel::Moderate
        } else {
            FrequencyLevel::Rare
        };
        Self {
            per_million,
            percent,
            level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeaningView {
    pub part_of_speech: String,
    pub definitions: Vec<DefinitionView>,
    pub related: Vec<String>,
    pub opposites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinitionView {
    pub number: usize,
    pub text: String,
    pub example: Option<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationSection {
    pub kind: RelationKind,
    pub title: &'static str,
    pub tags: Vec<RelationTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationTag {
    pub word: String,
    pub score: Option<f64>,
}

/// Section layout: relation, title, tag limit, and whether the queried word
/// itself is filtered out.
const SECTION_LAYOUT: [(RelationKind, &str, usize, bool); 4] = [
    (RelationKind::Synonym, "Synonyms & Similar Words", 30, false),
    (RelationKind::Related, "Related Words & Concepts", 30, true),
    (RelationKind::Rhyme, "Rhymes", 25, false),
    (RelationKind::SoundsLike, "Sounds Like", 20, true),
];

impl WordView {
    pub fn build(result: &AggregatedResult) -> Self {
        let entry = &result.entry;
        let headword = if entry.word.trim().is_empty() {
            result.word.to_string()
        } else {
            entry.word.clone()
        };

        let sections = SECTION_LAYOUT
            .iter()
            .filter_map(|&(kind, title, limit, drop_self)| {
                let tags: Vec<RelationTag> = result
                    .related(kind)
                    .iter()
                    .filter(|w| !drop_self || w.word != result.word.as_str())
                    .take(limit)
                    .map(RelationTag::from)
                    .collect();
                (!tags.is_empty()).then_some(RelationSection { kind, title, tags })
            })
            .collect();

        Self {
            headword,
            phonetics: entry.phonetics.iter().filter_map(PhoneticView::from_phonetic).collect(),
            frequency: result.frequency().map(FrequencyView::from_per_million),
            etymology: entry
                .origin
                .as_deref()
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string),
            meanings: entry.meanings.iter().map(MeaningView::from).collect(),
            sections,
            additional_entries: result.additional_entries,
        }
    }
}

impl PhoneticView {
    /// `None` when the entry has neither text nor audio.
    fn from_phonetic(phonetic: &Phonetic) -> Option<Self> {
        let text = non_empty(phonetic.text.as_deref())
            .map(|t| format!("/{}/", t.trim_matches('/')));
        let audio_url = non_empty(phonetic.audio.as_deref()).map(str::to_string);
        if text.is_none() && audio_url.is_none() {
            return None;
        }
        Some(Self { text, audio_url })
    }
}

impl From<&Meaning> for MeaningView {
    fn from(meaning: &Meaning) -> Self {
        Self {
            part_of_speech: meaning.part_of_speech.clone(),
            definitions: meaning
                .definitions
                .iter()
                .enumerate()
                .map(|(idx, def)| DefinitionView::new(idx + 1, def))
                .collect(),
            related: meaning.synonyms.iter().take(MEANING_TAG_LIMIT).cloned().collect(),
            opposites: meaning.antonyms.iter().take(MEANING_TAG_LIMIT).cloned().collect(),
        }
    }
}

impl DefinitionView {
    fn new(number: usize, def: &Definition) -> Self {
        Self {
            number,
            text: def.definition.clone(),
            example: non_empty(def.example.as_deref()).map(str::to_string),
            synonyms: def.synonyms.clone(),
            antonyms: def.antonyms.clone(),
        }
    }
}

impl From<&RelatedWord> for RelationTag {
    fn from(word: &RelatedWord) -> Self {
        Self {
            word: word.word.clone(),
            score: word.score,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
