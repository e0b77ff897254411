//! Batch validation of raw question blocks against a target profile.
//!
//! Validation never fails and never stops at the first problem: every
//! violation is aggregated into a diagnostic report meant to guide a human
//! or an upstream generator to fix content, not to halt a pipeline.
//!
//! Two orthogonal length regimes exist. The messaging-poll profile has a
//! hard wire-level character budget; the other profiles are pedagogical
//! style guidelines measured in words. They are modelled as a tagged
//! union selected by profile so both regimes are never applied at once.

use once_cell::sync::Lazy;
use serde::Serialize;

use super::parser::parse_option_line;
use super::question::AnswerOption;
use super::sections::{self, SectionKind};

/// Character ceilings of the messaging poll API.
pub const STATEMENT_CHAR_LIMIT: usize = 300;
pub const OPTION_CHAR_LIMIT: usize = 150;
pub const FEEDBACK_CHAR_LIMIT: usize = 200;

/// Expected marker counts per block.
const EXPECTED_CORRECT: usize = 1;
const EXPECTED_INCORRECT: usize = 3;

static FEEDBACK_HEADING: Lazy<String> =
    Lazy::new(|| format!("#### {}:", sections::GENERAL_FEEDBACK_LABEL));

/// Target length regime for option content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthProfile {
    /// At most 3 words per option.
    VeryShort,
    /// Between 3 and 15 words per option, inclusive.
    Medium,
    /// At least 10 words per option.
    Long,
    /// Hard character budget of the messaging poll API, including
    /// statement and feedback ceilings.
    MessagingPoll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LengthRule {
    Chars { max: usize },
    Words { min: Option<usize>, max: Option<usize> },
}

impl LengthProfile {
    fn option_rule(self) -> LengthRule {
        match self {
            LengthProfile::VeryShort => LengthRule::Words {
                min: None,
                max: Some(3),
            },
            LengthProfile::Medium => LengthRule::Words {
                min: Some(3),
                max: Some(15),
            },
            LengthProfile::Long => LengthRule::Words {
                min: Some(10),
                max: None,
            },
            LengthProfile::MessagingPoll => LengthRule::Chars {
                max: OPTION_CHAR_LIMIT,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationConfig {
    pub expected_question_count: usize,
    pub profile: LengthProfile,
}

/// One aggregated violation: what failed, why the rule exists, and an
/// actionable fix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub reason: String,
    pub why: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub expected_count: usize,
    pub found_count: usize,
    pub issues: Vec<ValidationIssue>,
}

/// Validate a batch of raw, already-segmented blocks. Never fails.
pub fn validate_batch(blocks: &[String], config: &ValidationConfig) -> ValidationReport {
    let mut issues = Vec::new();

    if blocks.len() != config.expected_question_count {
        issues.push(ValidationIssue {
            reason: format!(
                "Expected {} questions but found {}.",
                config.expected_question_count,
                blocks.len()
            ),
            why: "The generated question count does not match the requested one, which \
                  breaks batch import downstream."
                .to_string(),
            suggestion: "Generate the missing questions or remove the extra ones.".to_string(),
        });
    }

    for (idx, block) in blocks.iter().enumerate() {
        check_block(idx, block, config, &mut issues);
    }

    ValidationReport {
        is_valid: issues.is_empty(),
        expected_count: config.expected_question_count,
        found_count: blocks.len(),
        issues,
    }
}

fn check_block(idx: usize, block: &str, config: &ValidationConfig, issues: &mut Vec<ValidationIssue>) {
    let number = idx + 1;
    let options: Vec<AnswerOption> = block.lines().filter_map(parse_option_line).collect();

    let correct = options.iter().filter(|o| o.is_correct).count();
    let incorrect = options.len() - correct;
    if correct != EXPECTED_CORRECT || incorrect != EXPECTED_INCORRECT {
        issues.push(ValidationIssue {
            reason: format!(
                "Question {}: must have exactly {} correct and {} incorrect options \
                 (found {} correct, {} incorrect).",
                number, EXPECTED_CORRECT, EXPECTED_INCORRECT, correct, incorrect
            ),
            why: "The format requires exactly one answer line starting with '=' and three \
                  starting with '~' for the question to be importable."
                .to_string(),
            suggestion: "Adjust the answer lines so exactly one starts with '=' and three \
                         start with '~'."
                .to_string(),
        });
    }

    if !block.contains(FEEDBACK_HEADING.as_str()) {
        issues.push(ValidationIssue {
            reason: format!("Question {}: missing the required feedback section.", number),
            why: format!(
                "Every question must include a '{}' section so the student gets an \
                 explanation or reference.",
                FEEDBACK_HEADING.as_str()
            ),
            suggestion: format!(
                "Add a line starting with '{}' followed by an explanation.",
                FEEDBACK_HEADING.as_str()
            ),
        });
    }

    match config.profile.option_rule() {
        LengthRule::Chars { max } => {
            check_statement_chars(number, block, issues);
            for (i, option) in options.iter().enumerate() {
                let chars = option.text.chars().count();
                if chars > max {
                    issues.push(ValidationIssue {
                        reason: format!(
                            "Question {}, option {}: {} characters long (limit {}).",
                            number,
                            i + 1,
                            chars,
                            max
                        ),
                        why: "The messaging poll API truncates or rejects options over the \
                              character budget."
                            .to_string(),
                        suggestion: format!("Rewrite the option to at most {} characters.", max),
                    });
                }
            }
            check_feedback_chars(number, block, issues);
        }
        LengthRule::Words { min, max } => {
            for (i, option) in options.iter().enumerate() {
                let words = option.text.split_whitespace().count();
                if let Some(max) = max {
                    if words > max {
                        issues.push(ValidationIssue {
                            reason: format!(
                                "Question {}, option {}: {} words long (maximum {}).",
                                number,
                                i + 1,
                                words,
                                max
                            ),
                            why: "The requested option length keeps answers quick to read \
                                  and compare."
                                .to_string(),
                            suggestion: format!("Shorten the option to at most {} words.", max),
                        });
                        continue;
                    }
                }
                if let Some(min) = min {
                    if words < min {
                        issues.push(ValidationIssue {
                            reason: format!(
                                "Question {}, option {}: {} words long (minimum {}).",
                                number,
                                i + 1,
                                words,
                                min
                            ),
                            why: "The requested option length asks for enough detail and \
                                  context in every answer."
                                .to_string(),
                            suggestion: format!("Expand the option to at least {} words.", min),
                        });
                    }
                }
            }
        }
    }
}

fn check_statement_chars(number: usize, block: &str, issues: &mut Vec<ValidationIssue>) {
    let statement = block.lines().next().unwrap_or("").trim();
    let chars = statement.chars().count();
    if chars > STATEMENT_CHAR_LIMIT {
        issues.push(ValidationIssue {
            reason: format!(
                "Question {}: statement is {} characters long (limit {}).",
                number, chars, STATEMENT_CHAR_LIMIT
            ),
            why: "The messaging poll API rejects questions over the statement character \
                  budget without truncation."
                .to_string(),
            suggestion: format!(
                "Rewrite the statement to at most {} characters.",
                STATEMENT_CHAR_LIMIT
            ),
        });
    }
}

fn check_feedback_chars(number: usize, block: &str, issues: &mut Vec<ValidationIssue>) {
    let feedback = sections::scan_sections(block)
        .into_iter()
        .find(|s| s.kind == SectionKind::GeneralFeedback)
        .map(|s| s.body);
    if let Some(feedback) = feedback {
        let chars = feedback.chars().count();
        if chars > FEEDBACK_CHAR_LIMIT {
            issues.push(ValidationIssue {
                reason: format!(
                    "Question {}: feedback is {} characters long (limit {}).",
                    number, chars, FEEDBACK_CHAR_LIMIT
                ),
                why: "The messaging poll API truncates explanations over the character \
                      budget."
                    .to_string(),
                suggestion: format!(
                    "Reduce the feedback to at most {} characters or accept truncation.",
                    FEEDBACK_CHAR_LIMIT
                ),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(statement: &str, feedback: bool) -> String {
        let mut b = format!("{}\n{{\n=a\n~b\n~c\n~d\n", statement);
        if feedback {
            b.push_str("#### RETROALIMENTACIÓN: ok\n");
        }
        b.push('}');
        b
    }

    #[test]
    fn test_valid_batch() {
        let blocks = vec![block("Q one?", true)];
        let report = validate_batch(
            &blocks,
            &ValidationConfig {
                expected_question_count: 1,
                profile: LengthProfile::VeryShort,
            },
        );
        assert!(report.is_valid, "unexpected issues: {:?}", report.issues);
        assert_eq!(report.found_count, 1);
    }

    #[test]
    fn test_count_mismatch_names_both_numbers() {
        let report = validate_batch(
            &[block("Q?", true)],
            &ValidationConfig {
                expected_question_count: 3,
                profile: LengthProfile::VeryShort,
            },
        );
        assert!(!report.is_valid);
        assert!(report.issues[0].reason.contains('3'));
        assert!(report.issues[0].reason.contains('1'));
    }

    #[test]
    fn test_word_profile_bounds() {
        let b = "Q?\n{\n=one two three four\n~b\n~c\n~d\n#### RETROALIMENTACIÓN: ok\n}".to_string();
        let report = validate_batch(
            &[b],
            &ValidationConfig {
                expected_question_count: 1,
                profile: LengthProfile::VeryShort,
            },
        );
        // Only the 4-word option violates the very-short profile.
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].reason.contains("option 1"));
        assert!(report.issues[0].reason.contains("maximum 3"));
    }

    #[test]
    fn test_medium_profile_lower_bound() {
        let b = "Q?\n{\n=a b c\n~too short\n~three whole words\n~four words right here\n\
                 #### RETROALIMENTACIÓN: ok\n}"
            .to_string();
        let report = validate_batch(
            &[b],
            &ValidationConfig {
                expected_question_count: 1,
                profile: LengthProfile::Medium,
            },
        );
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].reason.contains("minimum 3"));
    }
}
