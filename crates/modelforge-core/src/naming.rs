//! Entity-name normalization, field labels and pluralization.

use std::sync::LazyLock;

use regex::Regex;

/// Suffix every generated model name carries.
pub const MODEL_SUFFIX: &str = "_model";

/// String transform used to derive table names from entity names.
pub trait Inflector {
    fn pluralize(&self, word: &str) -> String;
}

/// Normalize a model name: append [`MODEL_SUFFIX`] if missing, then
/// upper-case the first letter. Idempotent.
pub fn normalize_entity_name(name: &str) -> String {
    let name = name.trim();
    let mut normalized = String::with_capacity(name.len() + MODEL_SUFFIX.len());
    normalized.push_str(name);
    if !normalized.ends_with(MODEL_SUFFIX) {
        normalized.push_str(MODEL_SUFFIX);
    }
    upper_first(&normalized)
}

/// Default table name for a normalized entity name: the suffix removed,
/// lower-cased and pluralized.
pub fn default_table_name(entity_name: &str, inflector: &dyn Inflector) -> String {
    let base = entity_name.replace(MODEL_SUFFIX, "").to_lowercase();
    inflector.pluralize(&base)
}

/// Human-readable label for a field: underscores become spaces and the first
/// letter of every word is upper-cased. Other letters are left untouched.
pub fn field_label(field: &str) -> String {
    let mut label = String::with_capacity(field.len());
    let mut at_word_start = true;
    for ch in field.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if at_word_start {
            label.extend(ch.to_uppercase());
        } else {
            label.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    label
}

fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const UNCOUNTABLE: &[&str] = &[
    "audio",
    "bison",
    "chassis",
    "compensation",
    "coreopsis",
    "data",
    "deer",
    "education",
    "emoji",
    "equipment",
    "fish",
    "furniture",
    "gold",
    "information",
    "knowledge",
    "love",
    "rain",
    "money",
    "moose",
    "nutrition",
    "offspring",
    "plankton",
    "pokemon",
    "police",
    "rice",
    "series",
    "sheep",
    "species",
    "swine",
    "traffic",
    "wheat",
];

// First match wins; the final rule always matches.
static PLURAL_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        ("(quiz)$", "${1}zes"),
        ("^(ox)$", "${1}en"),
        ("([ml])ouse$", "${1}ice"),
        ("(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        ("(x|ch|ss|sh)$", "${1}es"),
        ("([^aeiouy]|qu)y$", "${1}ies"),
        ("(hive)$", "${1}s"),
        ("(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        ("sis$", "ses"),
        ("([ti])um$", "${1}a"),
        ("(p)erson$", "${1}eople"),
        ("(m)an$", "${1}en"),
        ("(c)hild$", "${1}hildren"),
        ("(buffal|tomat)o$", "${1}oes"),
        ("(bu|campu)s$", "${1}ses"),
        ("(alias|status|virus)$", "${1}es"),
        ("(octop)us$", "${1}i"),
        ("(ax|cris|test)is$", "${1}es"),
        ("s$", "s"),
        ("$", "s"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        let regex = Regex::new(pattern).expect("plural rules are valid regexes");
        (regex, replacement)
    })
    .collect()
});

/// Rule-based English pluralizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl Inflector for EnglishInflector {
    fn pluralize(&self, word: &str) -> String {
        if word.is_empty() || UNCOUNTABLE.contains(&word.to_lowercase().as_str()) {
            return word.to_string();
        }

        PLURAL_RULES
            .iter()
            .find(|(regex, _)| regex.is_match(word))
            .map(|(regex, replacement)| regex.replace(word, *replacement).into_owned())
            .unwrap_or_else(|| word.to_string())
    }
}
