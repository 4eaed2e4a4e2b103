use serde::{Deserialize, Serialize};

/// Tunables shared by the history, the selection decorator and the tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of entries kept on each of the undo and redo stacks
    pub history_limit: usize,
    /// Edge length of a resize handle, in canvas pixels
    pub handle_size: f32,
    /// Pointer travel below which a press is treated as a click
    pub drag_threshold: f32,
    /// Smallest width and height the rectangle and ellipse tools will create
    pub min_shape_size: f32,
    /// Shortest line the line tool will create
    pub min_line_length: f32,
}

pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_HANDLE_SIZE: f32 = 6.0;

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            handle_size: DEFAULT_HANDLE_SIZE,
            drag_threshold: 3.0,
            min_shape_size: 5.0,
            min_line_length: 5.0,
        }
    }
}
