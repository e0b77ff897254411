//! Serializer back into the block text format, the inverse of the parser.
//!
//! Round-trip contract: `parse_question(format_question(q))` is equal to
//! `q` on statement, option texts, correctness flags and feedback body for
//! any `q` the parser produced from well-formed input. Weights are
//! documentation metadata; when the source never specified them they are
//! inferred, not round-tripped bit for bit.

use super::question::{AnswerOption, Question};
use super::sections;

/// Equal negative share of the complement of full credit, e.g. three
/// incorrect options yield -33.33333 each.
fn default_incorrect_weight(incorrect_count: usize) -> f64 {
    -100.0 / incorrect_count as f64
}

fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{}", weight as i64)
    } else {
        format!("{:.5}", weight)
    }
}

/// Serialize one option as an answer line (without trailing newline).
/// The correct option is conventionally left unweighted (implicit full
/// credit); incorrect options carry an explicit negative share.
pub fn format_option(option: &AnswerOption, incorrect_count: usize) -> String {
    let marker = if option.is_correct { '=' } else { '~' };
    let weight = match (option.is_correct, option.weight_percent) {
        (_, Some(w)) => format!("%{}%", format_weight(w)),
        (true, None) => String::new(),
        (false, None) if incorrect_count > 0 => {
            format!("%{}%", format_weight(default_incorrect_weight(incorrect_count)))
        }
        (false, None) => String::new(),
    };
    let feedback = option
        .feedback
        .as_deref()
        .map(|f| format!("#{}", f))
        .unwrap_or_default();
    format!("{}{}{}{}", marker, weight, option.text, feedback)
}

/// Serialize a question into the block text format.
pub fn format_question(question: &Question) -> String {
    let incorrect_count = question.incorrect_count();
    let mut out = String::new();

    out.push_str(question.statement.trim());
    out.push_str(" {\n");

    for option in &question.options {
        out.push_str(&format_option(option, incorrect_count));
        out.push('\n');
    }

    // The reference line goes before the heading so it never ends up
    // inside a section body on reparse.
    if let Some(reference) = &question.reference {
        out.push_str(sections::REFERENCE_MARKER);
        out.push(' ');
        out.push_str(reference);
        out.push('\n');
    }

    let labelled = [
        (sections::GENERAL_FEEDBACK_LABEL, &question.general_feedback),
        (
            sections::STRUCTURED_BREAKDOWN_LABEL,
            &question.structured_breakdown,
        ),
        (
            sections::PRACTICAL_APPLICATION_LABEL,
            &question.practical_application,
        ),
        (sections::MNEMONIC_RULE_LABEL, &question.mnemonic_rule),
    ];
    for (label, body) in labelled {
        if let Some(body) = body {
            out.push_str(&format!("#### {}: {}\n", label, body));
        }
    }

    out.push_str("}\n");
    out
}
