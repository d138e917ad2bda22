use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(pub i64);

impl TagId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("tag id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<TagId> for i64 {
    fn from(value: TagId) -> Self {
        value.0
    }
}

/// Canonical tag label: trimmed and lowercased, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagLabel(String);

impl TagLabel {
    pub fn normalize(token: &str) -> Option<Self> {
        let label = token.trim().to_lowercase();
        if label.is_empty() {
            None
        } else {
            Some(Self(label))
        }
    }

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        Self::normalize(&value)
            .ok_or_else(|| DomainError::Validation("tag label cannot be empty".into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub label: TagLabel,
}

/// Raw tag input as typed by a user, one entry per token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTokens(Vec<String>);

impl TagTokens {
    /// Splits comma separated input such as `"ruby, Go ,rust"`.
    pub fn parse(input: &str) -> Self {
        Self(input.split(',').map(str::to_owned).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Distinct normalized labels in first-seen order.
    pub fn labels(&self) -> Vec<TagLabel> {
        let mut labels: Vec<TagLabel> = Vec::with_capacity(self.0.len());
        for label in self.0.iter().filter_map(|token| TagLabel::normalize(token)) {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}

impl<S: Into<String>> FromIterator<S> for TagTokens {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_collapse_case_and_whitespace() {
        let tokens: TagTokens = ["ruby", "Ruby", " go "].into_iter().collect();
        let labels: Vec<String> = tokens.labels().iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["ruby", "go"]);
    }

    #[test]
    fn parse_splits_on_commas_and_skips_blanks() {
        let tokens = TagTokens::parse("ops, Deploy,, ");
        assert_eq!(tokens.as_slice().len(), 4);
        let labels: Vec<String> = tokens.labels().iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["ops", "deploy"]);
    }

    #[test]
    fn empty_label_is_a_validation_error() {
        assert!(matches!(TagLabel::new("  "), Err(DomainError::Validation(_))));
    }
}
