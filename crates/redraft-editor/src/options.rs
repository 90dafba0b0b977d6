//! Tunables for the edit engine.

/// Options that shape the lines the editor writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// Arrow written by `add_relationship` when the edit names no type.
    pub default_relationship_type: String,
    /// Arrow written by `add_message` when the edit names no type.
    pub default_message_type: String,
    /// Indentation added per nesting level, e.g. inside a composite state.
    pub indent_unit: String,
    /// Indent inserted lines like their neighbours.
    pub match_indentation: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_relationship_type: "-->".to_string(),
            default_message_type: "->>".to_string(),
            indent_unit: "    ".to_string(),
            match_indentation: true,
        }
    }
}

impl EditorOptions {
    pub fn with_default_relationship_type(mut self, arrow: impl Into<String>) -> Self {
        self.default_relationship_type = arrow.into();
        self
    }

    pub fn with_default_message_type(mut self, arrow: impl Into<String>) -> Self {
        self.default_message_type = arrow.into();
        self
    }

    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    pub fn with_match_indentation(mut self, enabled: bool) -> Self {
        self.match_indentation = enabled;
        self
    }
}
