//! Grouping, filtering and rendering of the shortcut report.
//!
//! [`HotkeyReport::build`] resolves and fans bindings out into workspace
//! groups once per query; [`HotkeyReport::render`] is a pure function of
//! the built data and the caller's filters, so UI glue can re-render on
//! every filter change without re-reading anything.

use std::collections::HashSet;
use std::fmt::Write;

use tracing::{debug, warn};

use crate::host::CommandRegistry;
use crate::hotkeys::HotkeyBinding;
use crate::workspaces::CommandWorkspaceIndex;

/// Group id for commands not found in any workspace's toolbars.
pub const UNCLASSIFIED_GROUP_ID: &str = "UNCLASSIFIED";
const UNCLASSIFIED_GROUP_NAME: &str = "General";

const REPORT_TITLE: &str = "Keyboard Shortcuts";
const USER_DEFINED_LEGEND: &str = "* = User-defined";
const NAME_COLUMN_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    ByName,
    ByKeySequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rich-text subset (`<pre>`, `<b>`, `<br>`) for the dialog's text box.
    #[default]
    Markup,
    /// Underline-style headers and a trailing legend, for clipboard copy.
    Plain,
}

/// Caller-selected filters for one rendering of the report.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Keep only user-customized bindings.
    pub only_user_defined: bool,
    /// Restrict output to one workspace id (or [`UNCLASSIFIED_GROUP_ID`]).
    pub workspace_filter: Option<String>,
    pub sort: SortMode,
    pub format: OutputFormat,
}

/// A binding resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHotkey {
    /// Registry display name (the raw command id when unresolved), with
    /// the command argument appended when present.
    pub name: String,
    pub argument: Option<String>,
    pub is_user_defined: bool,
    pub key_sequence: String,
}

/// One rendered section of the report.
#[derive(Debug, Clone)]
pub struct WorkspaceGroup {
    pub id: String,
    pub name: String,
    pub hotkeys: Vec<ResolvedHotkey>,
}

/// Query-scoped report data, discarded after rendering.
#[derive(Debug, Clone)]
pub struct HotkeyReport {
    groups: Vec<WorkspaceGroup>,
}

impl HotkeyReport {
    /// Resolves display names and fans every binding out into each
    /// workspace group its command appears in. A command found in no
    /// workspace lands in the unclassified group instead of being dropped.
    pub fn build(
        bindings: &[HotkeyBinding],
        index: &CommandWorkspaceIndex,
        registry: &dyn CommandRegistry,
    ) -> Self {
        let mut groups: Vec<WorkspaceGroup> = index
            .used_workspaces()
            .map(|(id, name)| WorkspaceGroup {
                id: id.to_string(),
                name: name.to_string(),
                hotkeys: Vec::new(),
            })
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));

        let mut unclassified = WorkspaceGroup {
            id: UNCLASSIFIED_GROUP_ID.to_string(),
            name: UNCLASSIFIED_GROUP_NAME.to_string(),
            hotkeys: Vec::new(),
        };

        for binding in bindings {
            let resolved = resolve(binding, registry);
            let workspace_ids: HashSet<&str> = index.workspaces_for(&binding.command_id).collect();
            if workspace_ids.is_empty() {
                unclassified.hotkeys.push(resolved);
                continue;
            }
            for group in groups.iter_mut() {
                if workspace_ids.contains(group.id.as_str()) {
                    group.hotkeys.push(resolved.clone());
                }
            }
        }
        groups.push(unclassified);

        debug!(
            "built report with {} group(s) from {} binding(s)",
            groups.len(),
            bindings.len()
        );
        Self { groups }
    }

    /// All groups in render order (workspaces by display name, the
    /// unclassified group last). Lets UI glue populate its filter dropdown.
    pub fn groups(&self) -> &[WorkspaceGroup] {
        &self.groups
    }

    /// Renders the report for one set of filters.
    pub fn render(&self, options: &ReportOptions) -> String {
        let newline = match options.format {
            OutputFormat::Markup => "<br>",
            OutputFormat::Plain => "\n",
        };

        let mut out = String::new();
        match options.format {
            OutputFormat::Markup => out.push_str("<pre>"),
            OutputFormat::Plain => {
                push_underlined(&mut out, REPORT_TITLE);
                out.push('\n');
            }
        }

        for group in &self.groups {
            if let Some(filter) = &options.workspace_filter {
                if *filter != group.id {
                    continue;
                }
            }

            let mut hotkeys: Vec<&ResolvedHotkey> = group.hotkeys.iter().collect();
            // Filter before dedup, so a default binding can never mask a
            // user-defined one sharing the same name and argument.
            if options.only_user_defined {
                hotkeys.retain(|hotkey| hotkey.is_user_defined);
            }
            if hotkeys.is_empty() {
                continue;
            }
            let mut hotkeys = deduplicate(hotkeys);
            match options.sort {
                SortMode::ByName => hotkeys.sort_by_key(|hotkey| hotkey.name.clone()),
                SortMode::ByKeySequence => {
                    hotkeys.sort_by_key(|hotkey| hotkey.key_sequence.clone())
                }
            }

            match options.format {
                OutputFormat::Markup => {
                    let _ = write!(out, "<b>{}</b><br>", group.name);
                }
                OutputFormat::Plain => push_underlined(&mut out, &group.name),
            }
            for hotkey in hotkeys {
                let mut name = hotkey.name.clone();
                if hotkey.is_user_defined {
                    name.push('*');
                }
                let _ = write!(
                    out,
                    "{:<width$} {}",
                    name,
                    hotkey.key_sequence,
                    width = NAME_COLUMN_WIDTH
                );
                out.push_str(newline);
            }
            out.push_str(newline);
        }

        match options.format {
            OutputFormat::Markup => out.push_str("</pre>"),
            OutputFormat::Plain => out.push_str(USER_DEFINED_LEGEND),
        }
        out
    }
}

fn resolve(binding: &HotkeyBinding, registry: &dyn CommandRegistry) -> ResolvedHotkey {
    let mut name = match registry.command_name(&binding.command_id) {
        Some(name) => name,
        None => {
            warn!(
                "no display name for command {}; showing the identifier",
                binding.command_id
            );
            binding.command_id.clone()
        }
    };
    if let Some(argument) = &binding.command_argument {
        let _ = write!(name, " → {argument}");
    }
    ResolvedHotkey {
        name,
        argument: binding.command_argument.clone(),
        is_user_defined: binding.is_user_defined,
        key_sequence: binding.display_sequence.clone(),
    }
}

/// Keeps the first binding per (display name, argument) pair. Distinct raw
/// command ids can resolve to the same visible name; only one line should
/// be shown for them.
fn deduplicate(hotkeys: Vec<&ResolvedHotkey>) -> Vec<&ResolvedHotkey> {
    let mut seen = HashSet::new();
    hotkeys
        .into_iter()
        .filter(|hotkey| seen.insert((hotkey.name.clone(), hotkey.argument.clone())))
        .collect()
}

fn push_underlined(out: &mut String, header: &str) {
    out.push_str(header);
    out.push('\n');
    out.push_str(&"=".repeat(header.chars().count()));
    out.push('\n');
}
