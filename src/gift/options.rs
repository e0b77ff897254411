//! Recovery of option lists from legacy serialized encodings.
//!
//! The persisted options field has accumulated several encodings over
//! time: proper JSON arrays, JSON strings, unquoted `[a,b,c]` / `{a,b,c}`
//! literals, quasi-JSON with single quotes or bare keys, and plain free
//! text. Recovery is an ordered list of strategies evaluated in order;
//! the first one producing at least two usable items wins. This component
//! never fails: on total recovery failure it substitutes a clearly
//! labelled placeholder set, preserving pipeline liveness over precision.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Fixed vocabulary used to pad 2-3 item lists up to four options.
const GENERIC_OPTIONS: [&str; 4] = [
    "Todas son correctas",
    "Ninguna es correcta",
    "No sabe",
    "No contesta",
];

/// Placeholder set returned when no strategy recovers two options.
const PLACEHOLDER_OPTIONS: [&str; 4] = ["Opción A", "Opción B", "Opción C", "Opción D"];

/// Poll transport limits, applied defensively here as well as at
/// validation time.
const MAX_OPTION_COUNT: usize = 10;
const MAX_OPTION_CHARS: usize = 90;
const TRUNCATED_CHARS: usize = 87;

/// Leading weight marker left over from already-GIFT-encoded values,
/// e.g. `"%-33.33333%"Texto` or `%100%Texto`.
static WEIGHT_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^["']?%-?\d+(\.\d+)?%["']?"#).unwrap());

static BARE_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\s*:").unwrap());
static SINGLE_QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*'([^']*)'").unwrap());
static MISSING_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\]}])[,\s]*([\[{])").unwrap());

type Strategy = fn(&str) -> Option<Vec<String>>;

/// Evaluated in order, first success wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("json-array", parse_json_array),
    ("unquoted-literal", split_unquoted_literal),
    ("repaired-json", parse_repaired_json),
    ("line-split", split_lines),
    ("comma-split", split_commas),
    ("period-split", split_periods),
];

/// Recover an ordered option list from an arbitrary persisted value.
/// Always returns a usable sequence of at least 4 strings; never fails.
pub fn normalize_options(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(items) => finish(items.iter().map(value_to_string).collect()),
        Value::String(s) => normalize_options_str(s),
        other => {
            tracing::warn!("options value is neither an array nor a string: {}", other);
            placeholder()
        }
    }
}

/// String entry point of [`normalize_options`].
pub fn normalize_options_str(raw: &str) -> Vec<String> {
    for (name, strategy) in STRATEGIES {
        if let Some(items) = strategy(raw) {
            let items: Vec<String> = items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if items.len() >= 2 {
                tracing::debug!("recovered {} options via {} strategy", items.len(), name);
                return finish(items);
            }
        }
    }

    tracing::warn!(
        "no strategy recovered at least two options from {:?}, substituting placeholders",
        raw.chars().take(50).collect::<String>()
    );
    placeholder()
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn placeholder() -> Vec<String> {
    PLACEHOLDER_OPTIONS.iter().map(|s| s.to_string()).collect()
}

/// Post-processing applied to every surviving item regardless of the
/// recovery path: weight-marker strip, padding to 4, count and length
/// clamps. Idempotent on its own output.
fn finish(items: Vec<String>) -> Vec<String> {
    let mut items: Vec<String> = items
        .iter()
        .map(|s| WEIGHT_PREFIX_RE.replace(s.trim(), "").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if items.len() < 2 {
        tracing::warn!(count = items.len(), "fewer than two usable options");
        return placeholder();
    }

    let mut generic = GENERIC_OPTIONS.iter();
    while items.len() < 4 {
        match generic.next() {
            Some(filler) => items.push(filler.to_string()),
            None => break,
        }
    }

    if items.len() > MAX_OPTION_COUNT {
        tracing::warn!(
            count = items.len(),
            "too many options, truncating to {}",
            MAX_OPTION_COUNT
        );
        items.truncate(MAX_OPTION_COUNT);
    }

    for item in &mut items {
        let chars = item.chars().count();
        if chars > MAX_OPTION_CHARS {
            tracing::warn!(
                chars,
                "option too long, truncating to {} characters",
                MAX_OPTION_CHARS
            );
            let mut truncated: String = item.chars().take(TRUNCATED_CHARS).collect();
            truncated.push_str("...");
            *item = truncated;
        }
    }

    items
}

fn parse_json_array(raw: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Array(items) => Some(items.iter().map(value_to_string).collect()),
        _ => None,
    }
}

/// Non-standard bracket/brace literal without proper quoting, e.g.
/// `[Canarias,Norte,Sur,Este]` or `{Leve,Grave,"Muy Grave",Delito}`.
/// Commas inside double quotes (including escaped `\"`) do not split.
fn split_unquoted_literal(raw: &str) -> Option<Vec<String>> {
    let trimmed = raw.trim();
    let content = trimmed
        .strip_prefix('[')
        .or_else(|| trimmed.strip_prefix('{'))?;
    let content = content
        .strip_suffix(']')
        .or_else(|| content.strip_suffix('}'))
        .unwrap_or(content);

    let items: Vec<String> = split_respecting_quotes(content)
        .iter()
        .map(|s| strip_surrounding_quotes(s))
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn split_respecting_quotes(content: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => {
                inside_quotes = !inside_quotes;
                current.push('"');
            }
            ',' if !inside_quotes => {
                items.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        items.push(current.trim().to_string());
    }

    items
}

fn strip_surrounding_quotes(s: &str) -> String {
    let t = s.trim();
    if t.len() >= 2 && t.starts_with('"') && t.ends_with('"') {
        t[1..t.len() - 1].to_string()
    } else {
        t.to_string()
    }
}

/// Clean nested bracket artifacts and quasi-JSON, then retry the
/// structured parse: `{` -> `[`, `}` -> `]`, bare keys quoted, single
/// quotes doubled, missing commas between nested values restored.
fn parse_repaired_json(raw: &str) -> Option<Vec<String>> {
    let mut cleaned = raw.trim().to_string();
    if cleaned.starts_with('{') {
        cleaned.replace_range(0..1, "[");
    }
    if cleaned.ends_with('}') {
        let n = cleaned.len();
        cleaned.replace_range(n - 1..n, "]");
    }
    let cleaned = BARE_KEY_RE.replace_all(&cleaned, "\"$1\":").to_string();
    let cleaned = SINGLE_QUOTED_RE.replace_all(&cleaned, ":\"$1\"").to_string();
    let cleaned = MISSING_COMMA_RE.replace_all(&cleaned, "$1,$2").to_string();
    parse_json_array(&cleaned)
}

fn split_lines(raw: &str) -> Option<Vec<String>> {
    collect_split(raw.lines())
}

fn split_commas(raw: &str) -> Option<Vec<String>> {
    collect_split(raw.split(','))
}

fn split_periods(raw: &str) -> Option<Vec<String>> {
    collect_split(raw.split('.'))
}

fn collect_split<'a>(parts: impl Iterator<Item = &'a str>) -> Option<Vec<String>> {
    let items: Vec<String> = parts
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.len() >= 2 {
        Some(items)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_proper_array_passes_through() {
        let raw = json!(["a", "b", "c", "d"]);
        assert_eq!(normalize_options(&raw), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_short_array_padded_with_generics() {
        let raw = json!(["sí", "no"]);
        assert_eq!(
            normalize_options(&raw),
            vec!["sí", "no", "Todas son correctas", "Ninguna es correcta"]
        );
    }

    #[test]
    fn test_json_string() {
        let out = normalize_options_str(r#"["a","b","c","d"]"#);
        assert_eq!(out, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_unquoted_bracket_literal() {
        let out = normalize_options_str("[Canarias,Norte,Sur,Este]");
        assert_eq!(out, vec!["Canarias", "Norte", "Sur", "Este"]);
    }

    #[test]
    fn test_brace_literal_with_quoted_comma() {
        let out = normalize_options_str(r#"{Leve,Grave,"Muy, Grave",Delito}"#);
        assert_eq!(out, vec!["Leve", "Grave", "Muy, Grave", "Delito"]);
    }

    #[test]
    fn test_brace_literal_with_escaped_quotes() {
        let out = normalize_options_str(r#"{Leve,Grave,\"Muy Grave\",Delito}"#);
        assert_eq!(out, vec!["Leve", "Grave", "Muy Grave", "Delito"]);
    }

    #[test]
    fn test_line_split_fallback() {
        let out = normalize_options_str("uno\ndos\ntres\ncuatro");
        assert_eq!(out, vec!["uno", "dos", "tres", "cuatro"]);
    }

    #[test]
    fn test_comma_split_fallback() {
        let out = normalize_options_str("uno, dos, tres, cuatro");
        assert_eq!(out, vec!["uno", "dos", "tres", "cuatro"]);
    }

    #[test]
    fn test_total_failure_yields_placeholders() {
        assert_eq!(
            normalize_options_str("solo una cosa"),
            vec!["Opción A", "Opción B", "Opción C", "Opción D"]
        );
        assert_eq!(normalize_options(&json!(42)).len(), 4);
    }

    #[test]
    fn test_weight_prefix_stripped() {
        let raw = json!(["%-33.33333%Texto", "\"%100%\"Otro", "c", "d"]);
        assert_eq!(normalize_options(&raw), vec!["Texto", "Otro", "c", "d"]);
    }

    #[test]
    fn test_count_clamped_to_ten() {
        let raw = json!((0..14).map(|i| format!("opt {}", i)).collect::<Vec<_>>());
        assert_eq!(normalize_options(&raw).len(), 10);
    }

    #[test]
    fn test_long_item_truncated_with_ellipsis() {
        let long = "x".repeat(120);
        let raw = json!([long, "b", "c", "d"]);
        let out = normalize_options(&raw);
        assert_eq!(out[0].chars().count(), 90);
        assert!(out[0].ends_with("..."));
    }
}
