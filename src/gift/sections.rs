//! Auxiliary-section scanning.
//!
//! Sections are found in a single tokenizer pass rather than one pattern
//! match per label: each `####` marker opens a section whose body runs to
//! the next `####`, the closing `}` of the answer section, or the end of
//! the block. This guarantees sections never overlap and makes adding a
//! new label a one-line change to `LABELS`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexer::{tokenize_with_spans, Token};

/// General feedback heading label (`#### RETROALIMENTACIÓN:`).
pub const GENERAL_FEEDBACK_LABEL: &str = "RETROALIMENTACIÓN";
pub const STRUCTURED_BREAKDOWN_LABEL: &str = "DESGLOSE ESTRUCTURADO";
pub const PRACTICAL_APPLICATION_LABEL: &str = "APLICACIÓN PRÁCTICA";
pub const MNEMONIC_RULE_LABEL: &str = "REGLA MNEMOTÉCNICA";
/// Inline reference marker, recognized outside the `####` heading scheme.
pub const REFERENCE_MARKER: &str = "Referencia:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    GeneralFeedback,
    StructuredBreakdown,
    PracticalApplication,
    MnemonicRule,
}

const LABELS: &[(&str, SectionKind)] = &[
    (GENERAL_FEEDBACK_LABEL, SectionKind::GeneralFeedback),
    (STRUCTURED_BREAKDOWN_LABEL, SectionKind::StructuredBreakdown),
    (PRACTICAL_APPLICATION_LABEL, SectionKind::PracticalApplication),
    (MNEMONIC_RULE_LABEL, SectionKind::MnemonicRule),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: String,
}

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Referencia:([^\n]*)").unwrap());

/// Scan a full block (not just the answer section) for `####`-labelled
/// sections. A section without a recognized label counts as general
/// feedback; historical content often omits the label.
pub fn scan_sections(block: &str) -> Vec<Section> {
    let tokens = tokenize_with_spans(block);
    let mut sections = Vec::new();

    for (i, (token, span)) in tokens.iter().enumerate() {
        if *token != Token::SectionMarker {
            continue;
        }
        let end = tokens[i + 1..]
            .iter()
            .find(|(t, _)| matches!(t, Token::SectionMarker | Token::CloseBrace))
            .map(|(_, s)| s.start)
            .unwrap_or(block.len());
        let (kind, body) = classify(&block[span.end..end]);
        if !body.is_empty() {
            sections.push(Section { kind, body });
        }
    }

    sections
}

/// First `Referencia:` marker in the block, as `(full_match, content)`.
/// The full match is what callers test against the general feedback body
/// when deciding whether the reference is a duplicate.
pub fn scan_reference(block: &str) -> Option<(String, String)> {
    let caps = REFERENCE_RE.captures(block)?;
    Some((caps[0].to_string(), caps[1].trim().to_string()))
}

fn classify(raw: &str) -> (SectionKind, String) {
    let trimmed = raw.trim_start();
    for (label, kind) in LABELS {
        if let Some(rest) = trimmed.strip_prefix(label) {
            let rest = rest.trim_start();
            let rest = rest.strip_prefix(':').unwrap_or(rest);
            return (*kind, rest.trim().to_string());
        }
    }
    (SectionKind::GeneralFeedback, raw.trim().to_string())
}
