//! Diagram dialect classification.
//!
//! The dialect of a diagram is fixed by its opening keyword. Every downstream
//! heuristic (locators, note shapes, insertion points) branches on the
//! [`DiagramKind`] detected here.

use std::fmt;

/// The notation family a diagram is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiagramKind {
    Class,
    Sequence,
    State,
    Flow,
    Gantt,
    /// No recognised header keyword was found.
    #[default]
    Unknown,
}

/// Header keywords, lowercase, in detection order.
const HEADERS: [(&str, DiagramKind); 5] = [
    ("classdiagram", DiagramKind::Class),
    ("sequencediagram", DiagramKind::Sequence),
    ("statediagram", DiagramKind::State),
    ("flowchart", DiagramKind::Flow),
    ("gantt", DiagramKind::Gantt),
];

impl DiagramKind {
    /// Classify a diagram from its lines.
    ///
    /// Lines are scanned top-down and the first one whose trimmed, lowercased
    /// text starts with a known header keyword decides the kind. Returns
    /// [`DiagramKind::Unknown`] when no line matches.
    ///
    /// # Examples
    ///
    /// ```
    /// # use redraft_core::kind::DiagramKind;
    /// let lines = ["%% billing", "stateDiagram-v2", "[*] --> Idle"];
    /// assert_eq!(DiagramKind::detect(&lines), DiagramKind::State);
    /// ```
    pub fn detect<S: AsRef<str>>(lines: &[S]) -> Self {
        Self::locate_header(lines)
            .map(|(_, kind)| kind)
            .unwrap_or_default()
    }

    /// Find the header line and the kind it declares.
    ///
    /// Returns the index of the header line together with its kind, or `None`
    /// if the diagram has no recognised header.
    pub fn locate_header<S: AsRef<str>>(lines: &[S]) -> Option<(usize, Self)> {
        lines.iter().enumerate().find_map(|(idx, line)| {
            let lowered = line.as_ref().trim().to_lowercase();
            HEADERS
                .iter()
                .find(|(keyword, _)| lowered.starts_with(keyword))
                .map(|(_, kind)| (idx, *kind))
        })
    }

    /// Returns the canonical lowercase name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::Class => "class",
            DiagramKind::Sequence => "sequence",
            DiagramKind::State => "state",
            DiagramKind::Flow => "flowchart",
            DiagramKind::Gantt => "gantt",
            DiagramKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
