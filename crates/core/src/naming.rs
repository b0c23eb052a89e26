//! Case-convention transforms applied to mapped field names.

use serde::{Deserialize, Serialize};

/// Transform applied to a mapped field name before it is resolved on the
/// record schema. Dotted paths are transformed segment by segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Use the mapped name as written.
    #[default]
    None,
    /// `first name` → `firstName`
    CamelCase,
    /// `first name` → `FirstName`
    PascalCase,
    /// `FirstName` → `first_name`
    SnakeCase,
    /// `FirstName` → `first-name`
    KebabCase,
}

impl NamingStrategy {
    /// Apply the strategy to a (possibly dotted) field name.
    #[must_use]
    pub fn transform(self, name: &str) -> String {
        if self == NamingStrategy::None {
            return name.to_string();
        }

        name.split('.')
            .map(|segment| self.transform_segment(segment))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn transform_segment(self, segment: &str) -> String {
        let words = split_words(segment);
        match self {
            NamingStrategy::None => segment.to_string(),
            NamingStrategy::CamelCase => {
                let mut out = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(&word.to_lowercase());
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
            NamingStrategy::PascalCase => words.iter().map(|w| capitalize(w)).collect(),
            NamingStrategy::SnakeCase => join_lower(&words, "_"),
            NamingStrategy::KebabCase => join_lower(&words, "-"),
        }
    }
}

fn join_lower(words: &[String], sep: &str) -> String {
    words
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<String>>()
        .join(sep)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::new();
    out.extend(first.to_uppercase());
    out.push_str(&chars.as_str().to_lowercase());
    out
}

/// Split on separators and on case boundaries (`firstName`, `HTTPServer`).
/// Digits stay attached to the preceding word.
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}
