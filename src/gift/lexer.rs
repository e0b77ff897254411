//! Block tokenizer for the GIFT dialect.
//!
//! Tokenization only tracks the structural characters the parser cares
//! about: braces (with their escaped forms, so `\{` never opens an answer
//! section), `####` section markers and line breaks. Everything else is
//! opaque text. The tokens are defined with the logos derive macro.

use logos::Logos;

/// Structural tokens of one question block.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    #[token("\\{")]
    EscapedOpenBrace,
    #[token("\\}")]
    EscapedCloseBrace,

    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    /// Auxiliary-section heading marker. Longest-match wins, so `####`
    /// never decomposes into four `Hash` tokens.
    #[token("####")]
    SectionMarker,
    #[token("#")]
    Hash,

    #[token("\n")]
    Newline,

    #[token("\\")]
    Backslash,

    /// Opaque text between structural characters.
    #[regex(r"[^\\{}\n#]+")]
    Text,
}

/// Tokenize a block, keeping each token's byte span in the source.
pub fn tokenize_with_spans(source: &str) -> Vec<(Token, logos::Span)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize_with_spans(source).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_braces_and_text() {
        assert_eq!(
            kinds("Q? {=a}"),
            vec![Token::Text, Token::OpenBrace, Token::Text, Token::CloseBrace]
        );
    }

    #[test]
    fn test_escaped_braces_are_not_structural() {
        assert_eq!(
            kinds(r"a \{ b \}"),
            vec![
                Token::Text,
                Token::EscapedOpenBrace,
                Token::Text,
                Token::EscapedCloseBrace,
            ]
        );
    }

    #[test]
    fn test_section_marker_beats_hash() {
        assert_eq!(kinds("####"), vec![Token::SectionMarker]);
        assert_eq!(kinds("#"), vec![Token::Hash]);
        assert_eq!(kinds("#####"), vec![Token::SectionMarker, Token::Hash]);
    }

    #[test]
    fn test_spans_point_into_source() {
        let source = "ab{cd}";
        let tokens = tokenize_with_spans(source);
        let (open, span) = tokens
            .iter()
            .find(|(t, _)| *t == Token::OpenBrace)
            .cloned()
            .unwrap();
        assert_eq!(open, Token::OpenBrace);
        assert_eq!(&source[span], "{");
    }
}
