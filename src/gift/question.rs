//! Structured question records.
//!
//! A `Question` is a transient value: it is built by the parser from one
//! raw block, consumed by the validator, formatter or shuffle utility, and
//! discarded. Persistence is owned by external collaborators.

use serde::{Deserialize, Serialize};

/// One answer option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Visible option content, with marker and weight tokens stripped.
    pub text: String,
    pub is_correct: bool,
    /// Per-option explanation (the `#feedback` suffix of an answer line).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Signed partial-credit weight as encoded in the source (`%-33.33333%`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_percent: Option<f64>,
}

impl AnswerOption {
    pub fn correct(text: impl Into<String>) -> Self {
        AnswerOption {
            text: text.into(),
            is_correct: true,
            feedback: None,
            weight_percent: None,
        }
    }

    pub fn incorrect(text: impl Into<String>) -> Self {
        AnswerOption {
            text: text.into(),
            is_correct: false,
            feedback: None,
            weight_percent: None,
        }
    }
}

/// A parsed multiple-choice question.
///
/// Option order is significant and preserved through parsing; it may be
/// altered at presentation time by [`crate::gift::shuffle::shuffle_options`],
/// in which case the correct index must be recomputed, never assumed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Question {
    /// The question prompt. HTML fragments are passed through verbatim.
    pub statement: String,
    pub options: Vec<AnswerOption>,
    /// Free-form explanation block (`#### RETROALIMENTACIÓN:`).
    pub general_feedback: Option<String>,
    /// `#### DESGLOSE ESTRUCTURADO:` block.
    pub structured_breakdown: Option<String>,
    /// `#### APLICACIÓN PRÁCTICA:` block.
    pub practical_application: Option<String>,
    /// `#### REGLA MNEMOTÉCNICA:` block.
    pub mnemonic_rule: Option<String>,
    /// Standalone `Referencia:` marker, suppressed when its text already
    /// occurs inside `general_feedback`.
    pub reference: Option<String>,
}

impl Question {
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }

    pub fn incorrect_count(&self) -> usize {
        self.options.iter().filter(|o| !o.is_correct).count()
    }

    /// Index of the first correct option, if any. Downstream consumers
    /// expect exactly one; violations surface as validator diagnostics.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.is_correct)
    }
}
