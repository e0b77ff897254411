//! Block segmentation for multi-question GIFT text.
//!
//! Splitting on blank lines mis-splits whenever a feedback body contains
//! one, so block boundaries are keyed on brace balance instead: a block
//! runs from the text after the previous block to the end of the line
//! holding the `}` that closes its unescaped `{`. Nested braces are not
//! supported (single level, as in the rest of the pipeline).

use super::lexer::{tokenize_with_spans, Token};

/// Split a multi-question source text into raw question blocks.
/// Comment lines (`//`) are dropped; trailing text without a complete
/// answer section is logged and discarded.
pub fn split_blocks(source: &str) -> Vec<String> {
    let tokens = tokenize_with_spans(source);
    let mut blocks = Vec::new();
    let mut block_start = 0usize;
    let mut open = false;

    for (token, span) in &tokens {
        match token {
            Token::OpenBrace if !open => open = true,
            Token::CloseBrace if open => {
                let end = source[span.end..]
                    .find('\n')
                    .map(|i| span.end + i)
                    .unwrap_or(source.len());
                let block = strip_comment_lines(&source[block_start..end]);
                if !block.is_empty() {
                    blocks.push(block);
                }
                block_start = end;
                open = false;
            }
            _ => {}
        }
    }

    let tail = source[block_start..].trim();
    if !tail.is_empty() {
        tracing::warn!(
            "dropping trailing text without a complete answer section: {:?}",
            tail.chars().take(80).collect::<String>()
        );
    }

    blocks
}

fn strip_comment_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
