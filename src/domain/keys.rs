//! Key derivation for outline nodes.
//!
//! Two keys are derived when a node is created:
//! - full number key: numbering tokens from level 1 down, joined with `/`
//! - content key: titles from level 1 down, joined with `-`
//!
//! The separator is only inserted below a non-empty parent key, so level-1
//! keys never start with a separator.

use crate::domain::error::{DomainError, DomainResult};

pub const NUMBER_KEY_SEPARATOR: &str = "/";
pub const CONTENT_KEY_SEPARATOR: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySeparators {
    number: String,
    content: String,
}

impl Default for KeySeparators {
    fn default() -> Self {
        Self {
            number: NUMBER_KEY_SEPARATOR.to_string(),
            content: CONTENT_KEY_SEPARATOR.to_string(),
        }
    }
}

impl KeySeparators {
    pub fn new(number: impl Into<String>, content: impl Into<String>) -> DomainResult<Self> {
        let number = number.into();
        let content = content.into();
        if number.is_empty() {
            return Err(DomainError::EmptySeparator("number"));
        }
        if content.is_empty() {
            return Err(DomainError::EmptySeparator("content"));
        }
        Ok(Self { number, content })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn full_number_key(&self, parent: &str, number_key: &str) -> String {
        join_key(parent, &self.number, number_key)
    }

    pub fn content_key(&self, parent: &str, title: &str) -> String {
        join_key(parent, &self.content, title)
    }
}

pub fn join_key(parent: &str, separator: &str, part: &str) -> String {
    if parent.is_empty() {
        part.to_string()
    } else {
        format!("{parent}{separator}{part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_root_parent_when_deriving_then_no_leading_separator() {
        let seps = KeySeparators::default();
        assert_eq!(seps.full_number_key("", "一、"), "一、");
        assert_eq!(seps.content_key("", "Intro"), "Intro");
    }

    #[test]
    fn given_nested_parent_when_deriving_then_joins_with_separator() {
        let seps = KeySeparators::default();
        assert_eq!(seps.full_number_key("一、/（一）", "1."), "一、/（一）/1.");
        assert_eq!(seps.content_key("Intro-Background", "History"), "Intro-Background-History");
    }

    #[test]
    fn given_empty_separator_when_creating_then_errors() {
        assert!(matches!(
            KeySeparators::new("", "-"),
            Err(DomainError::EmptySeparator("number"))
        ));
        assert!(matches!(
            KeySeparators::new("/", ""),
            Err(DomainError::EmptySeparator("content"))
        ));
    }
}
