//! The journal response document.
//!
//! A document has a fixed, total shape: four prompt sections of exactly five
//! answers each (`step1`..`step4`) and a final section holding the
//! synthesized ikigai statement (`step5`). Unanswered prompts are empty
//! strings, never absent.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of prompts in each of the four prompt sections.
pub const PROMPTS_PER_SECTION: usize = 5;

/// Total number of answerable fields in a document (4 x 5 prompts + ikigai).
pub const FIELD_COUNT: usize = 21;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Answers to the five prompts of one section.
///
/// Missing prompts deserialize to empty strings; unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptAnswers {
    pub prompt1: String,
    pub prompt2: String,
    pub prompt3: String,
    pub prompt4: String,
    pub prompt5: String,
}

impl PromptAnswers {
    pub fn get(&self, index: PromptIndex) -> &str {
        match index {
            PromptIndex::One => &self.prompt1,
            PromptIndex::Two => &self.prompt2,
            PromptIndex::Three => &self.prompt3,
            PromptIndex::Four => &self.prompt4,
            PromptIndex::Five => &self.prompt5,
        }
    }

    fn slot_mut(&mut self, index: PromptIndex) -> &mut String {
        match index {
            PromptIndex::One => &mut self.prompt1,
            PromptIndex::Two => &mut self.prompt2,
            PromptIndex::Three => &mut self.prompt3,
            PromptIndex::Four => &mut self.prompt4,
            PromptIndex::Five => &mut self.prompt5,
        }
    }

    /// Answers in prompt order.
    pub fn answers(&self) -> [&str; PROMPTS_PER_SECTION] {
        PromptIndex::ALL.map(|index| self.get(index))
    }
}

/// The final section: a single free-text purpose statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IkigaiStatement {
    pub ikigai: String,
}

/// The full set of answers for one journal.
///
/// All five sections are required on input. Construct an empty document
/// with [`ResponseDocument::initial`] and derive edited copies with
/// [`ResponseDocument::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseDocument {
    pub step1: PromptAnswers,
    pub step2: PromptAnswers,
    pub step3: PromptAnswers,
    pub step4: PromptAnswers,
    pub step5: IkigaiStatement,
}

impl ResponseDocument {
    /// A document with every field set to the empty string.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn section(&self, section: PromptSection) -> &PromptAnswers {
        match section {
            PromptSection::Love => &self.step1,
            PromptSection::GoodAt => &self.step2,
            PromptSection::WorldNeeds => &self.step3,
            PromptSection::PaidFor => &self.step4,
        }
    }

    fn section_mut(&mut self, section: PromptSection) -> &mut PromptAnswers {
        match section {
            PromptSection::Love => &mut self.step1,
            PromptSection::GoodAt => &mut self.step2,
            PromptSection::WorldNeeds => &mut self.step3,
            PromptSection::PaidFor => &mut self.step4,
        }
    }

    /// Current value of a single field.
    pub fn get(&self, field: ResponseField) -> &str {
        match field {
            ResponseField::Prompt(section, index) => self.section(section).get(index),
            ResponseField::Ikigai => &self.step5.ikigai,
        }
    }

    /// Return a new document with exactly `field` replaced by `value`.
    ///
    /// `self` is left untouched, so other holders of the previous document
    /// never observe the edit.
    #[must_use]
    pub fn update(&self, field: ResponseField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            ResponseField::Prompt(section, index) => next.section_mut(section).slot_mut(index),
            ResponseField::Ikigai => &mut next.step5.ikigai,
        };
        *slot = value.into();
        next
    }

    /// Number of fields holding a non-blank answer.
    pub fn answered_count(&self) -> usize {
        ResponseField::all()
            .filter(|field| !self.get(*field).trim().is_empty())
            .count()
    }

    /// `true` when no field holds a non-blank answer.
    pub fn is_blank(&self) -> bool {
        self.answered_count() == 0
    }
}

// ---------------------------------------------------------------------------
// Field addressing
// ---------------------------------------------------------------------------

/// The four prompt sections of the ikigai framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptSection {
    Love,
    GoodAt,
    WorldNeeds,
    PaidFor,
}

impl PromptSection {
    pub const ALL: [Self; 4] = [Self::Love, Self::GoodAt, Self::WorldNeeds, Self::PaidFor];

    /// Document key of the section (`step1`..`step4`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Love => "step1",
            Self::GoodAt => "step2",
            Self::WorldNeeds => "step3",
            Self::PaidFor => "step4",
        }
    }

    /// Human-readable heading used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::Love => "What You Love",
            Self::GoodAt => "What You're Good At",
            Self::WorldNeeds => "What The World Needs",
            Self::PaidFor => "What You Can Be Paid For",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.key() == key)
    }
}

/// Position of a prompt within its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptIndex {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl PromptIndex {
    pub const ALL: [Self; PROMPTS_PER_SECTION] =
        [Self::One, Self::Two, Self::Three, Self::Four, Self::Five];

    /// Document key of the prompt (`prompt1`..`prompt5`).
    pub fn key(self) -> &'static str {
        match self {
            Self::One => "prompt1",
            Self::Two => "prompt2",
            Self::Three => "prompt3",
            Self::Four => "prompt4",
            Self::Five => "prompt5",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|index| index.key() == key)
    }
}

/// Key of the single field in the final section.
pub const IKIGAI_SECTION_KEY: &str = "step5";
pub const IKIGAI_FIELD_KEY: &str = "ikigai";

/// Address of one answerable field.
///
/// Invalid section/field combinations cannot be expressed with this type;
/// string keys go through [`ResponseField::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseField {
    Prompt(PromptSection, PromptIndex),
    Ikigai,
}

impl ResponseField {
    /// Every field of the document, in document order.
    pub fn all() -> impl Iterator<Item = Self> {
        PromptSection::ALL
            .into_iter()
            .flat_map(|section| {
                PromptIndex::ALL
                    .into_iter()
                    .map(move |index| Self::Prompt(section, index))
            })
            .chain(std::iter::once(Self::Ikigai))
    }

    /// Resolve a `(section, field)` key pair such as `("step3", "prompt2")`.
    pub fn parse(section: &str, field: &str) -> Result<Self, CoreError> {
        if section == IKIGAI_SECTION_KEY {
            return if field == IKIGAI_FIELD_KEY {
                Ok(Self::Ikigai)
            } else {
                Err(CoreError::Validation(format!(
                    "Section '{section}' only has the field '{IKIGAI_FIELD_KEY}', got '{field}'"
                )))
            };
        }

        let prompt_section = PromptSection::from_key(section).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown section '{section}'. Must be one of: step1, step2, step3, step4, step5"
            ))
        })?;
        let index = PromptIndex::from_key(field).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown field '{field}' for section '{section}'. Must be prompt1..prompt5"
            ))
        })?;

        Ok(Self::Prompt(prompt_section, index))
    }

    pub fn section_key(self) -> &'static str {
        match self {
            Self::Prompt(section, _) => section.key(),
            Self::Ikigai => IKIGAI_SECTION_KEY,
        }
    }

    pub fn field_key(self) -> &'static str {
        match self {
            Self::Prompt(_, index) => index.key(),
            Self::Ikigai => IKIGAI_FIELD_KEY,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
