//! Command-to-workspace index built from toolbar snapshots.
//!
//! Rebuilt fresh for every report request; toolbar state can change between
//! invocations within a session, so nothing here is cached.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::host::{ToolbarControl, WorkspaceSnapshot};

/// Which workspaces expose which commands, for one query.
#[derive(Debug, Default)]
pub struct CommandWorkspaceIndex {
    command_workspaces: HashMap<String, BTreeSet<String>>,
    /// Display names of workspaces that contributed at least one command,
    /// keyed by workspace id.
    workspace_names: BTreeMap<String, String>,
}

impl CommandWorkspaceIndex {
    /// Depth-first walk over every classified workspace's control tree.
    ///
    /// Workspaces without a product classification are skipped wholesale.
    /// Controls whose command definition could not be read are skipped
    /// without aborting the walk; toolbar state is observational and
    /// partial data beats total failure.
    pub fn build(workspaces: &[WorkspaceSnapshot]) -> Self {
        let mut index = Self::default();
        for workspace in workspaces {
            match workspace.product_type.as_deref() {
                Some(product) if !product.is_empty() => {}
                _ => {
                    debug!("skipping unclassified workspace {}", workspace.id);
                    continue;
                }
            }
            index.walk(&workspace.controls, workspace);
        }
        debug!(
            "indexed {} command(s) across {} workspace(s)",
            index.command_workspaces.len(),
            index.workspace_names.len()
        );
        index
    }

    fn walk(&mut self, controls: &[ToolbarControl], workspace: &WorkspaceSnapshot) {
        for control in controls {
            match control {
                ToolbarControl::Command {
                    command_id: Some(command_id),
                } => {
                    self.command_workspaces
                        .entry(command_id.clone())
                        .or_default()
                        .insert(workspace.id.clone());
                    self.workspace_names
                        .entry(workspace.id.clone())
                        .or_insert_with(|| workspace.name.clone());
                }
                ToolbarControl::Command { command_id: None } => {
                    warn!(
                        "could not read the command for a control in workspace {}; skipping",
                        workspace.id
                    );
                }
                ToolbarControl::Group { children } => self.walk(children, workspace),
            }
        }
    }

    /// Workspace ids exposing `command_id`; empty when the command was not
    /// found in any toolbar.
    pub fn workspaces_for(&self, command_id: &str) -> impl Iterator<Item = &str> {
        self.command_workspaces
            .get(command_id)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// `(id, name)` of every workspace that contributed at least one
    /// command, ordered by id.
    pub fn used_workspaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.workspace_names
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn workspace_name(&self, workspace_id: &str) -> Option<&str> {
        self.workspace_names.get(workspace_id).map(String::as_str)
    }
}
