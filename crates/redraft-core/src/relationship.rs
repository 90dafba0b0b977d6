//! Class-diagram relationship vocabulary.
//!
//! Relationship edges are written as `From ["m"] <arrow> ["m"] To [: label]`.
//! Edit operations may name the arrow either by its token (`<|--`) or by the
//! relationship it denotes (`inheritance`); [`resolve_arrow`] maps both forms
//! onto the token that is written into the diagram.

use std::{fmt, str::FromStr};

/// The relationship kinds a class diagram can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Inheritance,
    Composition,
    Aggregation,
    Association,
    Dependency,
    Realization,
    Bidirectional,
    Link,
    DashedLink,
}

impl RelationshipKind {
    /// All kinds, longest arrow token first.
    pub const ALL: [RelationshipKind; 9] = [
        RelationshipKind::Bidirectional,
        RelationshipKind::Inheritance,
        RelationshipKind::Realization,
        RelationshipKind::Composition,
        RelationshipKind::Aggregation,
        RelationshipKind::Association,
        RelationshipKind::Dependency,
        RelationshipKind::Link,
        RelationshipKind::DashedLink,
    ];

    /// Returns the arrow token written into the diagram.
    pub fn arrow(&self) -> &'static str {
        match self {
            RelationshipKind::Inheritance => "<|--",
            RelationshipKind::Composition => "*--",
            RelationshipKind::Aggregation => "o--",
            RelationshipKind::Association => "-->",
            RelationshipKind::Dependency => "..>",
            RelationshipKind::Realization => "..|>",
            RelationshipKind::Bidirectional => "<-->",
            RelationshipKind::Link => "--",
            RelationshipKind::DashedLink => "..",
        }
    }

    /// Returns the lowercase relationship name.
    pub fn name(&self) -> &'static str {
        match self {
            RelationshipKind::Inheritance => "inheritance",
            RelationshipKind::Composition => "composition",
            RelationshipKind::Aggregation => "aggregation",
            RelationshipKind::Association => "association",
            RelationshipKind::Dependency => "dependency",
            RelationshipKind::Realization => "realization",
            RelationshipKind::Bidirectional => "bidirectional",
            RelationshipKind::Link => "link",
            RelationshipKind::DashedLink => "dashed",
        }
    }

    /// Look up a kind by its exact arrow token.
    pub fn from_arrow(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.arrow() == token)
    }
}

impl FromStr for RelationshipKind {
    type Err = &'static str;

    /// Parse a relationship name (case-insensitive) or an arrow token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(kind) = Self::from_arrow(s) {
            return Ok(kind);
        }
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or("Unsupported relationship type")
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolve a relationship `type` value into the arrow token to write.
///
/// Known names and tokens map onto the canonical token; anything else is
/// passed through trimmed, so diagrams using arrows outside the vocabulary
/// (for example `<|..`) can still be edited.
///
/// # Examples
///
/// ```
/// # use redraft_core::relationship::resolve_arrow;
/// assert_eq!(resolve_arrow("Composition"), "*--");
/// assert_eq!(resolve_arrow("..>"), "..>");
/// assert_eq!(resolve_arrow(" <|.. "), "<|..");
/// ```
pub fn resolve_arrow(value: &str) -> String {
    value
        .parse::<RelationshipKind>()
        .map(|kind| kind.arrow().to_string())
        .unwrap_or_else(|_| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_tokens_round_trip() {
        for kind in RelationshipKind::ALL {
            assert_eq!(RelationshipKind::from_arrow(kind.arrow()), Some(kind));
        }
    }

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!(
            "Inheritance".parse::<RelationshipKind>(),
            Ok(RelationshipKind::Inheritance)
        );
        assert_eq!(
            "dashed".parse::<RelationshipKind>(),
            Ok(RelationshipKind::DashedLink)
        );
        assert!("teleport".parse::<RelationshipKind>().is_err());
    }

    #[test]
    fn test_resolve_arrow_passthrough() {
        assert_eq!(resolve_arrow("realization"), "..|>");
        assert_eq!(resolve_arrow("-->"), "-->");
        assert_eq!(resolve_arrow("<|.."), "<|..");
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(RelationshipKind::Aggregation.to_string(), "aggregation");
    }
}
