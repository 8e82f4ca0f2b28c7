//! Summary shown once the journal reaches its final screen.

use serde::Serialize;

use crate::responses::{PromptSection, ResponseDocument};

/// Maximum number of answers highlighted per section.
pub const HIGHLIGHT_LIMIT: usize = 3;

/// Text shown in place of an empty ikigai statement.
pub const IKIGAI_PLACEHOLDER: &str =
    "Your discovered purpose will appear here once you complete the final step...";

/// Highlighted answers for one prompt section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionHighlights {
    pub section: PromptSection,
    pub label: &'static str,
    /// Up to [`HIGHLIGHT_LIMIT`] non-empty answers, in prompt order.
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalSummary {
    pub sections: Vec<SectionHighlights>,
    /// The ikigai statement, or [`IKIGAI_PLACEHOLDER`] when blank.
    pub ikigai: String,
    pub ikigai_provided: bool,
}

impl JournalSummary {
    pub fn from_document(doc: &ResponseDocument) -> Self {
        let sections = PromptSection::ALL
            .into_iter()
            .map(|section| SectionHighlights {
                section,
                label: section.label(),
                answers: doc
                    .section(section)
                    .answers()
                    .into_iter()
                    .filter(|answer| !answer.is_empty())
                    .take(HIGHLIGHT_LIMIT)
                    .map(str::to_owned)
                    .collect(),
            })
            .collect();

        let ikigai_provided = !doc.step5.ikigai.is_empty();
        let ikigai = if ikigai_provided {
            doc.step5.ikigai.clone()
        } else {
            IKIGAI_PLACEHOLDER.to_owned()
        };

        Self {
            sections,
            ikigai,
            ikigai_provided,
        }
    }
}
