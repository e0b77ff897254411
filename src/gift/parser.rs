//! Parser for one raw question block.
//!
//! A block is free text followed by a brace-delimited answer section and
//! optional `####` feedback sections. Brace positions come from the token
//! stream, so escaped braces never delimit the answer section. Nested
//! braces are not supported.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexer::{tokenize_with_spans, Token};
use super::question::{AnswerOption, Question};
use super::sections::{self, SectionKind};

/// Failure to parse a single block. Batch callers decide whether to
/// skip-and-log or abort; nothing here crosses block boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The block is empty or otherwise unusable.
    MalformedBlock { text: String },
    /// No brace-delimited answer section (`{` or `}` absent).
    MissingAnswerBlock { text: String },
    /// The answer section contains no `=`/`~` option lines.
    NoOptionsFound { text: String },
}

impl ParseError {
    /// The offending block text.
    pub fn block_text(&self) -> &str {
        match self {
            ParseError::MalformedBlock { text }
            | ParseError::MissingAnswerBlock { text }
            | ParseError::NoOptionsFound { text } => text,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedBlock { text } => {
                write!(f, "malformed question block: {:?}", preview(text))
            }
            ParseError::MissingAnswerBlock { text } => {
                write!(
                    f,
                    "question block has no brace-delimited answer section: {:?}",
                    preview(text)
                )
            }
            ParseError::NoOptionsFound { text } => {
                write!(
                    f,
                    "no =/~ answer options found in question block: {:?}",
                    preview(text)
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

fn preview(text: &str) -> String {
    let mut p: String = text.chars().take(80).collect();
    if p.len() < text.len() {
        p.push_str("...");
    }
    p
}

/// One answer line: leading `=` or `~` marker, optional `%signed-float%`
/// weight token, then the option text. Only the line-leading character is
/// a marker; later `=`/`~` occurrences belong to the text.
static OPTION_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([=~])(%[-+]?\d+(?:\.\d+)?%)?(.*)$").unwrap());

/// Legacy `// ...::IDENTIFIER::...` comment line at the start of a statement.
static LEGACY_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^//.*?::.*?::\n?").unwrap());

/// `::title::` prefix carried over from exported question banks.
static TITLE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^::.*?::").unwrap());

/// Parse one answer line into an option. Lines not matching the marker
/// syntax yield `None` and are ignored by the caller; they may be feedback
/// or comment lines embedded in the same answer section.
pub(crate) fn parse_option_line(line: &str) -> Option<AnswerOption> {
    let caps = OPTION_LINE_RE.captures(line)?;
    let is_correct = &caps[1] == "=";
    let weight_percent = caps
        .get(2)
        .and_then(|m| m.as_str().trim_matches('%').parse::<f64>().ok());

    let raw_text = caps[3].trim();
    if raw_text.is_empty() {
        return None;
    }

    // `option text#feedback` carries a per-option explanation.
    let (text, feedback) = match raw_text.split_once('#') {
        Some((text, feedback)) => (
            text.trim().to_string(),
            Some(feedback.trim().to_string()).filter(|f| !f.is_empty()),
        ),
        None => (raw_text.to_string(), None),
    };
    if text.is_empty() {
        return None;
    }

    Some(AnswerOption {
        text,
        is_correct,
        feedback,
        weight_percent,
    })
}

/// Parse one raw block into a structured [`Question`].
///
/// Zero correct or zero incorrect options are not parse failures; they are
/// reported by the validator so that malformed generation output stays
/// inspectable instead of being silently discarded.
pub fn parse_question(block: &str) -> Result<Question, ParseError> {
    if block.trim().is_empty() {
        return Err(ParseError::MalformedBlock {
            text: block.to_string(),
        });
    }

    let tokens = tokenize_with_spans(block);
    let open = tokens
        .iter()
        .find(|(t, _)| *t == Token::OpenBrace)
        .map(|(_, s)| s.clone())
        .ok_or_else(|| ParseError::MissingAnswerBlock {
            text: block.to_string(),
        })?;
    let close = tokens
        .iter()
        .find(|(t, s)| *t == Token::CloseBrace && s.start >= open.end)
        .map(|(_, s)| s.clone())
        .ok_or_else(|| ParseError::MissingAnswerBlock {
            text: block.to_string(),
        })?;

    let statement = extract_statement(&block[..open.start]);
    if statement.is_empty() {
        tracing::warn!("question block has an empty statement");
    }

    let options: Vec<AnswerOption> = block[open.end..close.start]
        .lines()
        .filter_map(parse_option_line)
        .collect();
    if options.is_empty() {
        return Err(ParseError::NoOptionsFound {
            text: block.to_string(),
        });
    }

    let correct = options.iter().filter(|o| o.is_correct).count();
    if correct == 0 {
        tracing::warn!("question has no correct option marked with '='");
    }
    if correct == options.len() {
        tracing::warn!("question has no incorrect option marked with '~'");
    }

    let mut question = Question {
        statement,
        options,
        ..Question::default()
    };

    for section in sections::scan_sections(block) {
        let slot = match section.kind {
            SectionKind::GeneralFeedback => &mut question.general_feedback,
            SectionKind::StructuredBreakdown => &mut question.structured_breakdown,
            SectionKind::PracticalApplication => &mut question.practical_application,
            SectionKind::MnemonicRule => &mut question.mnemonic_rule,
        };
        if slot.is_none() {
            *slot = Some(section.body);
        }
    }

    question.reference = sections::scan_reference(block)
        .and_then(|(full, content)| match &question.general_feedback {
            // Already part of the feedback; do not surface it twice.
            Some(feedback) if feedback.contains(&full) => None,
            _ => Some(content),
        })
        .filter(|r| !r.is_empty());

    Ok(question)
}

fn extract_statement(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_id = LEGACY_ID_RE.replace(trimmed, "");
    let without_title = TITLE_PREFIX_RE.replace(&without_id, "");
    without_title.trim().to_string()
}
