//! Host application boundary.
//!
//! The host CAD application supplies command display names and, per
//! workspace, a snapshot of its toolbar control tree. Snapshots are plain
//! tagged values built once at the boundary, so the pipeline never walks
//! live host objects.

use std::collections::HashMap;

/// Resolves command identifiers to display names.
pub trait CommandRegistry {
    /// Display name for `command_id`, or `None` when the host does not know
    /// the command.
    fn command_name(&self, command_id: &str) -> Option<String>;
}

impl CommandRegistry for HashMap<String, String> {
    fn command_name(&self, command_id: &str) -> Option<String> {
        self.get(command_id).cloned()
    }
}

/// One workspace's toolbar state, captured at query time.
#[derive(Debug, Clone)]
pub struct WorkspaceSnapshot {
    pub id: String,
    pub name: String,
    /// Host product classification. An empty or absent marker means the
    /// workspace cannot be classified and its commands are not indexed.
    pub product_type: Option<String>,
    pub controls: Vec<ToolbarControl>,
}

/// A toolbar control: a command button or a nested drop-down group.
#[derive(Debug, Clone)]
pub enum ToolbarControl {
    /// A command button. `command_id` is `None` when the host failed to
    /// resolve the control's command definition.
    Command { command_id: Option<String> },
    /// A drop-down containing further controls.
    Group { children: Vec<ToolbarControl> },
}

impl ToolbarControl {
    pub fn command(command_id: impl Into<String>) -> Self {
        ToolbarControl::Command {
            command_id: Some(command_id.into()),
        }
    }

    /// A command button whose command definition could not be read.
    pub fn unresolved() -> Self {
        ToolbarControl::Command { command_id: None }
    }

    pub fn group(children: Vec<ToolbarControl>) -> Self {
        ToolbarControl::Group { children }
    }
}
