//! Relationship line grammar.
//!
//! A class-diagram relationship is a single line of the form
//!
//! ```text
//! From ["m"] <arrow> ["m"] To [: label]
//! ```
//!
//! [`RelationshipLine`] parses that form into its parts so a mutator can swap
//! one part and render the line back. Lines that do not fit the grammar are
//! left to the caller's fallback.

use std::fmt::{self, Write as _};

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{delimited, opt, preceded, terminated},
    error::{ContextError, ModalResult},
    token::{rest, take_till, take_while},
};

type IResult<O> = ModalResult<O, ContextError>;

/// The parts of one relationship line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipLine<'a> {
    pub from: &'a str,
    pub multiplicity_from: Option<&'a str>,
    pub arrow: &'a str,
    pub multiplicity_to: Option<&'a str>,
    pub to: &'a str,
    pub label: Option<&'a str>,
}

impl<'a> RelationshipLine<'a> {
    /// A bare `From <arrow> To` line.
    pub fn new(from: &'a str, arrow: &'a str, to: &'a str) -> Self {
        Self {
            from,
            multiplicity_from: None,
            arrow,
            multiplicity_to: None,
            to,
            label: None,
        }
    }

    /// Parse a relationship line. Surrounding whitespace is ignored.
    ///
    /// Returns `None` if the line does not fit the relationship grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// # use redraft_editor::relationship::RelationshipLine;
    /// let line = RelationshipLine::parse(r#"  Order "1" --> "*" Item : contains"#).unwrap();
    /// assert_eq!(line.from, "Order");
    /// assert_eq!(line.multiplicity_to, Some("*"));
    /// assert_eq!(line.label, Some("contains"));
    ///
    /// assert!(RelationshipLine::parse("class Order").is_none());
    /// ```
    pub fn parse(line: &'a str) -> Option<Self> {
        relationship_line.parse(line.trim()).ok()
    }
}

impl fmt::Display for RelationshipLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = String::from(self.from);
        if let Some(multiplicity) = self.multiplicity_from {
            write!(line, " \"{multiplicity}\"")?;
        }
        write!(line, " {}", self.arrow)?;
        if let Some(multiplicity) = self.multiplicity_to {
            write!(line, " \"{multiplicity}\"")?;
        }
        write!(line, " {}", self.to)?;
        if let Some(label) = self.label {
            write!(line, " : {label}")?;
        }
        f.write_str(&line)
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '~'
}

fn is_arrow_char(c: char) -> bool {
    matches!(c, '<' | '>' | '|' | '*' | 'o' | '.' | '-')
}

/// Class name, including `~T~` generics.
fn identifier<'a>(input: &mut &'a str) -> IResult<&'a str> {
    take_while(1.., is_identifier_char).parse_next(input)
}

/// A quoted multiplicity such as `"1..*"`; returns the text between quotes.
fn multiplicity<'a>(input: &mut &'a str) -> IResult<&'a str> {
    terminated(delimited('"', take_till(0.., '"'), '"'), space0).parse_next(input)
}

/// Arrow token: a run of arrow characters with at least one line segment.
fn arrow<'a>(input: &mut &'a str) -> IResult<&'a str> {
    take_while(1.., is_arrow_char)
        .verify(|arrow: &str| arrow.contains('-') || arrow.contains('.'))
        .parse_next(input)
}

fn label<'a>(input: &mut &'a str) -> IResult<Option<&'a str>> {
    opt(preceded((':', space0), rest))
        .map(|label: Option<&str>| label.map(str::trim_end).filter(|label| !label.is_empty()))
        .parse_next(input)
}

fn relationship_line<'a>(input: &mut &'a str) -> IResult<RelationshipLine<'a>> {
    let from = identifier.parse_next(input)?;
    space0.parse_next(input)?;
    let multiplicity_from = opt(multiplicity).parse_next(input)?;
    let arrow = arrow.parse_next(input)?;
    space0.parse_next(input)?;
    let multiplicity_to = opt(multiplicity).parse_next(input)?;
    let to = identifier.parse_next(input)?;
    space0.parse_next(input)?;
    let label = label.parse_next(input)?;

    Ok(RelationshipLine {
        from,
        multiplicity_from,
        arrow,
        multiplicity_to,
        to,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_edge() {
        let line = RelationshipLine::parse("User <|-- Admin").unwrap();
        assert_eq!(line, RelationshipLine::new("User", "<|--", "Admin"));
    }

    #[test]
    fn test_parse_full_edge() {
        let line = RelationshipLine::parse(r#"Order "1" *-- "1..*" LineItem : has"#).unwrap();
        assert_eq!(line.from, "Order");
        assert_eq!(line.multiplicity_from, Some("1"));
        assert_eq!(line.arrow, "*--");
        assert_eq!(line.multiplicity_to, Some("1..*"));
        assert_eq!(line.to, "LineItem");
        assert_eq!(line.label, Some("has"));
    }

    #[test]
    fn test_parse_aggregation_and_generics() {
        let line = RelationshipLine::parse("Car o-- Wheel~T~").unwrap();
        assert_eq!(line.arrow, "o--");
        assert_eq!(line.to, "Wheel~T~");

        let line = RelationshipLine::parse("Shape ..|> Drawable").unwrap();
        assert_eq!(line.arrow, "..|>");
    }

    #[test]
    fn test_parse_rejects_non_edges() {
        assert!(RelationshipLine::parse("User : +name String").is_none());
        assert!(RelationshipLine::parse("note for User \"x\"").is_none());
        assert!(RelationshipLine::parse("A --> B C").is_none());
        assert!(RelationshipLine::parse("A <> B").is_none());
    }

    #[test]
    fn test_empty_label_is_none() {
        let line = RelationshipLine::parse("A --> B :   ").unwrap();
        assert_eq!(line.label, None);
    }

    #[test]
    fn test_display() {
        let line = RelationshipLine {
            multiplicity_from: Some("1"),
            multiplicity_to: Some("*"),
            label: Some("places"),
            ..RelationshipLine::new("Customer", "-->", "Order")
        };
        assert_eq!(line.to_string(), r#"Customer "1" --> "*" Order : places"#);
        assert_eq!(
            RelationshipLine::new("A", "..>", "B").to_string(),
            "A ..> B"
        );
    }
}
