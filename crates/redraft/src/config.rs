//! Configuration types for Redraft.
//!
//! This module provides configuration structures that control how edits are
//! written into a diagram and how raw input is cleaned up before editing.
//! All types implement [`serde::Deserialize`] for loading from external
//! sources, and every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining editor and input settings.
//! - [`EditorConfig`] - Arrows and indentation used for inserted lines.
//! - [`InputConfig`] - Clean-up applied to diagram text and edit scripts.
//!
//! # Example
//!
//! ```
//! # use redraft::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.editor().default_relationship_type(), "-->");
//! assert!(config.input().strip_code_fences());
//! ```

use serde::Deserialize;

use redraft_editor::EditorOptions;

/// Top-level application configuration.
///
/// Groups [`EditorConfig`] and [`InputConfig`] into a single configuration
/// root, matching the `[editor]` and `[input]` sections of a config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Editor configuration section.
    #[serde(default)]
    editor: EditorConfig,

    /// Input configuration section.
    #[serde(default)]
    input: InputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `editor` - Arrow and indentation settings.
    /// * `input` - Input clean-up settings.
    pub fn new(editor: EditorConfig, input: InputConfig) -> Self {
        Self { editor, input }
    }

    /// Returns the editor configuration.
    pub fn editor(&self) -> &EditorConfig {
        &self.editor
    }

    /// Returns the input configuration.
    pub fn input(&self) -> &InputConfig {
        &self.input
    }
}

/// Settings for the lines the editor writes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Arrow or relationship name used when `add_relationship` names no type.
    default_relationship_type: String,

    /// Arrow used when `add_message` names no type.
    default_message_type: String,

    /// Indentation added per nesting level.
    indent_unit: String,

    /// Indent inserted lines like the neighbouring body lines.
    match_indentation: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let options = EditorOptions::default();
        Self {
            default_relationship_type: options.default_relationship_type,
            default_message_type: options.default_message_type,
            indent_unit: options.indent_unit,
            match_indentation: options.match_indentation,
        }
    }
}

impl EditorConfig {
    pub fn default_relationship_type(&self) -> &str {
        &self.default_relationship_type
    }

    pub fn default_message_type(&self) -> &str {
        &self.default_message_type
    }

    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    pub fn match_indentation(&self) -> bool {
        self.match_indentation
    }

    /// Build the engine options described by this section.
    pub fn to_options(&self) -> EditorOptions {
        EditorOptions::default()
            .with_default_relationship_type(self.default_relationship_type.as_str())
            .with_default_message_type(self.default_message_type.as_str())
            .with_indent_unit(self.indent_unit.as_str())
            .with_match_indentation(self.match_indentation)
    }
}

/// Clean-up applied to raw input before editing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Strip markdown code fences around the diagram, and pull the JSON
    /// object out of surrounding prose in the edit script.
    strip_code_fences: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            strip_code_fences: true,
        }
    }
}

impl InputConfig {
    /// Creates a new [`InputConfig`].
    pub fn new(strip_code_fences: bool) -> Self {
        Self { strip_code_fences }
    }

    /// Returns `true` if code fences are stripped from input.
    pub fn strip_code_fences(&self) -> bool {
        self.strip_code_fences
    }
}
