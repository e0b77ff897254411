//! Integration tests for batch validation: diagnostic aggregation and the
//! two length regimes (character budget vs. word bounds).

use gift_quiz::{validate_batch, LengthProfile, ValidationConfig};
use rstest::rstest;

fn config(expected: usize, profile: LengthProfile) -> ValidationConfig {
    ValidationConfig {
        expected_question_count: expected,
        profile,
    }
}

fn block_with(statement: &str, options: &[&str], feedback: Option<&str>) -> String {
    let mut block = format!("{}\n{{\n", statement);
    for option in options {
        block.push_str(option);
        block.push('\n');
    }
    if let Some(feedback) = feedback {
        block.push_str(&format!("#### RETROALIMENTACIÓN: {}\n", feedback));
    }
    block.push('}');
    block
}

fn well_formed(statement: &str) -> String {
    block_with(statement, &["=a", "~b", "~c", "~d"], Some("ok"))
}

#[test]
fn test_aggregates_every_violation() {
    // 2 blocks where 3 were expected, one with two correct markers, one
    // missing the feedback heading: at least 3 distinct diagnostics.
    let blocks = vec![
        block_with("Q1?", &["=a", "=b", "~c", "~d"], Some("ok")),
        block_with("Q2?", &["=a", "~b", "~c", "~d"], None),
    ];
    let report = validate_batch(&blocks, &config(3, LengthProfile::VeryShort));
    assert!(!report.is_valid);
    assert_eq!(report.issues.len(), 3);
    assert!(report.issues[0].reason.contains("Expected 3"));
    assert!(report.issues[1].reason.contains("Question 1"));
    assert!(report.issues[2].reason.contains("Question 2"));
    for issue in &report.issues {
        assert!(!issue.why.is_empty());
        assert!(!issue.suggestion.is_empty());
    }
}

#[test]
fn test_messaging_statement_boundary() {
    let at_limit = well_formed(&"x".repeat(300));
    let report = validate_batch(&[at_limit], &config(1, LengthProfile::MessagingPoll));
    assert!(report.is_valid, "300 chars must pass: {:?}", report.issues);

    let over_limit = well_formed(&"x".repeat(301));
    let report = validate_batch(&[over_limit], &config(1, LengthProfile::MessagingPoll));
    assert!(!report.is_valid);
    assert_eq!(report.issues.len(), 1);
    assert!(report.issues[0].reason.contains("301"));
    assert!(report.issues[0].reason.contains("300"));
}

#[test]
fn test_messaging_option_and_feedback_limits() {
    let long_option = format!("~{}", "o".repeat(151));
    let block = block_with(
        "Q?",
        &["=a", long_option.as_str(), "~c", "~d"],
        Some(&"f".repeat(201)),
    );
    let report = validate_batch(&[block], &config(1, LengthProfile::MessagingPoll));
    let reasons: Vec<&str> = report.issues.iter().map(|i| i.reason.as_str()).collect();
    assert_eq!(report.issues.len(), 2, "issues: {:?}", reasons);
    assert!(reasons[0].contains("option 2"));
    assert!(reasons[0].contains("151"));
    assert!(reasons[0].contains("150"));
    assert!(reasons[1].contains("feedback"));
    assert!(reasons[1].contains("201"));
    assert!(reasons[1].contains("200"));
}

#[rstest]
#[case(LengthProfile::VeryShort, "~one two three four", "maximum 3")]
#[case(LengthProfile::Medium, "~just two", "minimum 3")]
#[case(LengthProfile::Medium, "~a b c d e f g h i j k l m n o p", "maximum 15")]
#[case(LengthProfile::Long, "~not ten words here", "minimum 10")]
fn test_word_profiles(#[case] profile: LengthProfile, #[case] bad: &str, #[case] expect: &str) {
    let ok: &str = match profile {
        LengthProfile::VeryShort => "=one two",
        LengthProfile::Medium => "=three word option",
        _ => "=this option is made of exactly ten whitespace separated words",
    };
    let block = block_with("Q?", &[ok, bad, bad, bad], Some("ok"));
    let report = validate_batch(&[block], &config(1, profile));
    assert!(!report.is_valid);
    assert_eq!(report.issues.len(), 3, "issues: {:?}", report.issues);
    for issue in &report.issues {
        assert!(issue.reason.contains(expect), "{:?}", issue.reason);
    }
}

#[test]
fn test_valid_batch_has_no_issues() {
    let blocks = vec![well_formed("Q1?"), well_formed("Q2?")];
    let report = validate_batch(&blocks, &config(2, LengthProfile::VeryShort));
    assert!(report.is_valid);
    assert!(report.issues.is_empty());
    assert_eq!(report.expected_count, 2);
    assert_eq!(report.found_count, 2);
}
