use serde::{Deserialize, Serialize};

use crate::capture::Tool;
use crate::color::{default_palette, Color};
use crate::error::AnnotatorError;

/// Startup options handed over by the host page as JSON. Every field is
/// optional.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ToolConfig {
    pub palette: Vec<Color>,
    pub color: Color,
    pub tool: Tool,
    pub notes_visible: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            color: Color::WHITE,
            tool: Tool::Rect,
            notes_visible: true,
        }
    }
}

impl ToolConfig {
    pub fn from_json(text: &str) -> Result<Self, AnnotatorError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }
}
