//! Reply variant generator — deterministic tone rewrites of a base reply.
//!
//! Every variant is computed from the base reply on its own, never from
//! another variant. Rules match whole words case-insensitively and run in
//! the order they are listed; a replacement inherits the capitalisation of
//! the first letter of the word it replaces.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Salutation placed in front of the professional variant.
pub const PROFESSIONAL_SALUTATION: &str = "Prezado(a), ";

/// Three tone renderings of one base reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyVariantSet {
    pub informal: String,
    pub formal: String,
    pub professional: String,
}

struct WordRule {
    pattern: Regex,
    replacement: &'static str,
}

fn rule(words: &str, replacement: &'static str) -> WordRule {
    WordRule {
        pattern: Regex::new(&format!(r"(?i)\b(?:{words})\b")).expect("static word rule"),
        replacement,
    }
}

static INFORMAL_RULES: LazyLock<Vec<WordRule>> = LazyLock::new(|| {
    vec![
        rule("olá", "oi"),
        rule("vocês", "vcs"),
        rule("você", "vc"),
        rule("seu", "teu"),
        rule("sua", "tua"),
    ]
});

static FORMAL_RULES: LazyLock<Vec<WordRule>> = LazyLock::new(|| {
    vec![
        rule("oi", "olá"),
        rule("vcs", "vocês"),
        rule("vc", "você"),
        rule("teu", "seu"),
        rule("tua", "sua"),
        rule("pra", "para"),
    ]
});

static PROFESSIONAL_RULES: LazyLock<Vec<WordRule>> = LazyLock::new(|| {
    vec![
        rule("oi|olá", "bom dia"),
        rule("vcs|vocês", "os senhores"),
        rule("vc|você", "o(a) senhor(a)"),
        rule("teu", "seu"),
        rule("tua", "sua"),
        rule("pra", "para"),
    ]
});

/// Emoji, pictographs, dingbats and the joiners that glue them together.
static DECORATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{1F000}-\x{1FAFF}\x{2600}-\x{27BF}\x{2B00}-\x{2BFF}\x{FE0F}\x{200D}]")
        .expect("static decorative pattern")
});

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("static whitespace pattern"));

/// Derive the informal, formal, and professional variants of `base`.
pub fn generate_variants(base: &str) -> ReplyVariantSet {
    ReplyVariantSet {
        informal: informal(base),
        formal: formal(base),
        professional: professional(base),
    }
}

fn informal(base: &str) -> String {
    let mut text = apply_rules(base, &INFORMAL_RULES);
    text.push(' ');
    text
}

fn formal(base: &str) -> String {
    let text = apply_rules(base, &FORMAL_RULES);
    let mut text = strip_decorative(&text);
    text.push(' ');
    text
}

fn professional(base: &str) -> String {
    let text = apply_rules(base, &PROFESSIONAL_RULES);
    let text = strip_decorative(&text).replace('!', ".");
    format!("{PROFESSIONAL_SALUTATION}{text} ")
}

fn apply_rules(text: &str, rules: &[WordRule]) -> String {
    rules.iter().fold(text.to_string(), |acc, rule| {
        rule.pattern
            .replace_all(&acc, |caps: &Captures| match_case(&caps[0], rule.replacement))
            .into_owned()
    })
}

/// Capitalise `replacement` when `matched` starts with an upper-case letter.
fn match_case(matched: &str, replacement: &str) -> String {
    let starts_upper = matched.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Remove decorative symbols and tidy the gaps they leave.
fn strip_decorative(text: &str) -> String {
    let stripped = DECORATIVE.replace_all(text, "");
    SPACE_RUNS.replace_all(&stripped, " ").trim().to_string()
}
