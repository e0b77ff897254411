//! # gift-quiz
//!
//! Parser, validator and serializer for a GIFT quiz format dialect:
//! brace-delimited answer sections, `=`/`~` correctness markers, optional
//! `%weight%` tokens and `####`-labelled auxiliary sections.
//!
//! The pipeline is synchronous and stateless; every entry point is a pure
//! function over its inputs. Storage, transport and question generation are
//! owned by external collaborators.

pub mod gift;

pub use gift::analysis::{
    suggest_question_count, AnalysisConfig, AnalysisReport, AnalysisStrategy, ContentType, Level,
    Rounding,
};
pub use gift::blocks::split_blocks;
pub use gift::formatter::format_question;
pub use gift::options::{normalize_options, normalize_options_str};
pub use gift::parser::{parse_question, ParseError};
pub use gift::question::{AnswerOption, Question};
pub use gift::shuffle::shuffle_options;
pub use gift::validator::{
    validate_batch, LengthProfile, ValidationConfig, ValidationIssue, ValidationReport,
};
