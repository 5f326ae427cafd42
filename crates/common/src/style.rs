//! Naming styles for generated file names

use crate::GeneratorError;
use std::fmt;
use std::str::FromStr;

/// Naming convention applied to generated file names
///
/// The accepted spellings show the convention applied to the words
/// "go" and "zero".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// `gozero`: lowercase, words joined
    #[default]
    Lower,
    /// `go_zero`
    Snake,
    /// `goZero`
    Camel,
}

impl Style {
    /// Apply the style to a name such as `user_service` or `UserService`
    pub fn format(&self, name: &str) -> String {
        let words = split_words(name);
        match self {
            Style::Lower => words.concat(),
            Style::Snake => words.join("_"),
            Style::Camel => {
                let mut out = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(word);
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
        }
    }
}

impl FromStr for Style {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "gozero" => Ok(Style::Lower),
            "go_zero" => Ok(Style::Snake),
            "goZero" => Ok(Style::Camel),
            other => Err(GeneratorError::InvalidStyle(other.to_string())),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Lower => write!(f, "gozero"),
            Style::Snake => write!(f, "go_zero"),
            Style::Camel => write!(f, "goZero"),
        }
    }
}

/// Convert a name to a Go exported identifier (`user_service` -> `UserService`)
pub fn pascal_case(name: &str) -> String {
    split_words(name).iter().map(|w| capitalize(w)).collect()
}

/// Split on separators and lower-to-upper case boundaries, lowercasing each word
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in name.chars() {
        if matches!(ch, '_' | '-' | '.' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
