//! Question-count heuristics over source text.
//!
//! Two strategies share one entry point: a deterministic word-count
//! estimate, and a richer lexical-density estimate that rewards passages
//! dense in definitional, scientific or process vocabulary. The marker
//! vocabulary is Spanish because that is what the upstream content uses.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    Floor,
    #[default]
    Round,
    Ceil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisStrategy {
    /// `max(1, round(words / words_per_question))`. The deterministic
    /// fallback when a richer analysis is unavailable.
    #[default]
    WordCount,
    /// Word-count baseline plus weighted marker increments and a density
    /// bonus for short, marker-dense passages.
    LexicalDensity,
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub words_per_question: usize,
    pub rounding: Rounding,
    pub strategy: AnalysisStrategy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            words_per_question: 100,
            rounding: Rounding::Round,
            strategy: AnalysisStrategy::WordCount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Theoretical,
    Practical,
    Mixed,
    Filler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

/// Content classification reported alongside the numeric suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub suggested_questions: usize,
    pub reasoning: String,
    pub content_type: ContentType,
    pub concept_density: Level,
    pub importance: Level,
}

// Marker pattern classes, weighted by how strongly each signals content
// worth evaluating.
static DEFINITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(es|son|significa|define|concepto|término|caracteriza|consiste|representa|implica|refiere)\b").unwrap()
});
static QUESTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[¿?]").unwrap());
static ENUMERATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+[.)]|primero|segundo|tercero|además|también|por último|finalmente|asimismo)\b").unwrap()
});
static TECHNICAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z]{2,}|\b\w+[Aa]ción\b|\b\w+[Ii]dad\b|\b\w+[Mm]iento\b|\b\w+[Ii]smo\b")
        .unwrap()
});
static EMPHASIS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(importante|fundamental|esencial|clave|básico|crítico|crucial|principal|primordial|vital)\b").unwrap()
});
static PROCESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(proceso|método|procedimiento|sistema|técnica|estrategia|algoritmo)\b")
        .unwrap()
});
static SCIENTIFIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(teoría|principio|ley|ecuación|fórmula|hipótesis|experimento)\b").unwrap()
});
static EDUCATIONAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(aprend|estudi|enseñ|comprend|analiz|evalú|memoriz)\w*").unwrap()
});

/// Suggest how many questions a body of source text deserves.
/// Deterministic for identical input and configuration; never below 1.
pub fn suggest_question_count(text: &str, config: &AnalysisConfig) -> (usize, AnalysisReport) {
    let words = text.split_whitespace().count();
    if words == 0 {
        let report = AnalysisReport {
            suggested_questions: 1,
            reasoning: "Empty text; falling back to a single question.".to_string(),
            content_type: ContentType::Filler,
            concept_density: Level::Low,
            importance: Level::Low,
        };
        return (1, report);
    }

    match config.strategy {
        AnalysisStrategy::WordCount => {
            let raw = words as f64 / config.words_per_question.max(1) as f64;
            let suggested = apply_rounding(raw, config.rounding).max(1);
            let report = AnalysisReport {
                suggested_questions: suggested,
                reasoning: format!(
                    "{} words at {} words per question -> {} questions",
                    words, config.words_per_question, suggested
                ),
                content_type: ContentType::Mixed,
                concept_density: Level::Medium,
                importance: Level::Medium,
            };
            (suggested, report)
        }
        AnalysisStrategy::LexicalDensity => {
            let report = analyze_lexical_density(text, words, config);
            (report.suggested_questions, report)
        }
    }
}

fn apply_rounding(raw: f64, rounding: Rounding) -> usize {
    let rounded = match rounding {
        Rounding::Floor => raw.floor(),
        Rounding::Round => raw.round(),
        Rounding::Ceil => raw.ceil(),
    };
    rounded as usize
}

fn analyze_lexical_density(text: &str, words: usize, config: &AnalysisConfig) -> AnalysisReport {
    let definitions = DEFINITION_RE.find_iter(text).count();
    let questions = QUESTION_RE.find_iter(text).count();
    let enumerations = ENUMERATION_RE.find_iter(text).count();
    let technical = TECHNICAL_RE.find_iter(text).count();
    let emphasis = EMPHASIS_RE.find_iter(text).count();
    let processes = PROCESS_RE.find_iter(text).count();
    let scientific = SCIENTIFIC_RE.find_iter(text).count();
    let educational = EDUCATIONAL_RE.find_iter(text).count();

    let mut score = (words as f64 / config.words_per_question.max(1) as f64).max(1.0);
    score += definitions as f64 * 0.5;
    score += scientific as f64 * 0.4;
    score += processes as f64 * 0.3;
    score += emphasis as f64 * 0.3;
    score += questions as f64 * 0.2;
    score += technical as f64 * 0.15;
    score += enumerations as f64 * 0.15;
    score += educational as f64 * 0.1;

    // Markers per 10 words; short passages dense in markers deserve more
    // questions than their word count alone implies.
    let total_markers = definitions + scientific + processes + emphasis + technical;
    let density = total_markers as f64 / (words as f64 / 10.0).max(1.0);
    if density > 0.5 {
        score *= 1.3;
    } else if density > 0.3 {
        score *= 1.15;
    }

    let suggested = (score.round() as usize).max(1);

    let mut content_type = ContentType::Mixed;
    let mut concept_density = Level::Medium;
    let mut importance = Level::Medium;
    if definitions >= 2 || scientific >= 2 || technical >= 3 {
        content_type = ContentType::Theoretical;
        concept_density = Level::High;
        importance = Level::High;
    } else if enumerations >= 2 || processes >= 1 || questions >= 1 {
        content_type = ContentType::Practical;
        concept_density = if density > 0.3 { Level::High } else { Level::Medium };
        importance = if emphasis >= 1 { Level::High } else { Level::Medium };
    } else if definitions == 0 && technical == 0 && emphasis == 0 && scientific == 0 {
        content_type = ContentType::Filler;
        concept_density = Level::Low;
        importance = Level::Low;
    }
    if words < 50 && total_markers >= 3 {
        concept_density = Level::High;
        importance = Level::High;
    }

    AnalysisReport {
        suggested_questions: suggested,
        reasoning: format!(
            "{} definitional, {} scientific, {} technical, {} emphasis, {} process markers; \
             density {:.2}; {} words -> {} questions",
            definitions, scientific, technical, emphasis, processes, density, words, suggested
        ),
        content_type,
        concept_density,
        importance,
    }
}
