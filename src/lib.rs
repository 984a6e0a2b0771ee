/*!
 * Hotkey Report
 *
 * Reads a CAD host application's keyboard shortcut configuration, resolves
 * command display names and physical key labels, groups bindings by the
 * workspaces that expose them, and renders a copy-paste friendly report.
 *
 * The host itself stays behind two seams: [`CommandRegistry`] for display
 * names and [`WorkspaceSnapshot`] values for toolbar state. Everything is
 * query-scoped; nothing is cached between report requests.
 */

pub mod error;
pub mod host;
pub mod hotkeys;
pub mod keys;
pub mod options;
pub mod report;
pub mod workspaces;

pub use error::{Error, Result};
pub use host::{CommandRegistry, ToolbarControl, WorkspaceSnapshot};
pub use hotkeys::{parse_hotkeys, parse_hotkeys_file, HotkeyBinding};
pub use keys::{
    platform_resolver, KeyCode, KeyLabelResolver, KeyboardLayout, LayoutResolver,
    PassthroughResolver,
};
pub use options::{default_options_root, find_options_files};
pub use report::{
    HotkeyReport, OutputFormat, ReportOptions, ResolvedHotkey, SortMode, WorkspaceGroup,
    UNCLASSIFIED_GROUP_ID,
};
pub use workspaces::CommandWorkspaceIndex;

use std::path::Path;

/// Runs the full pipeline for one report request: parse the options file,
/// index the toolbar snapshots, aggregate and render.
///
/// Locate/parse failures propagate and fail the whole request; everything
/// else (unknown commands, unmapped keys, unreadable controls) degrades
/// gracefully. Callers re-rendering on filter changes should keep the
/// [`HotkeyReport`] from [`HotkeyReport::build`] and call
/// [`HotkeyReport::render`] directly instead of re-running the pipeline.
pub fn generate_report(
    options_file: &Path,
    workspaces: &[WorkspaceSnapshot],
    registry: &dyn CommandRegistry,
    resolver: &dyn KeyLabelResolver,
    options: &ReportOptions,
) -> Result<String> {
    let bindings = hotkeys::parse_hotkeys_file(options_file, resolver)?;
    let index = CommandWorkspaceIndex::build(workspaces);
    let report = HotkeyReport::build(&bindings, &index, registry);
    Ok(report.render(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .try_init();
    }

    #[test]
    fn test_end_to_end_report() -> anyhow::Result<()> {
        init_tracing();

        // A profile directory layout like the host's options root.
        let root = tempfile::tempdir()?;
        let profile = root.path().join("profile-1");
        fs::create_dir(&profile)?;
        let json = r#"{"hotkeys":[
            {"hotkey_sequence":"Ctrl+E","commands":[
                {"command_id":"ExtrudeCmd","command_argument":null,"isDefault":true}]},
            {"hotkey_sequence":"Ctrl+1","commands":[
                {"command_id":"SetViewCmd","command_argument":"FrontView","isDefault":false}]},
            {"commands":[
                {"command_id":"UnboundCmd","command_argument":null,"isDefault":true}]}
        ]}"#;
        fs::write(
            profile.join(options::OPTIONS_FILE_NAME),
            format!(
                "<NGlobalOptions><HotKeyGroup>\
                 <HotKeyJSONString Value='{json}'/>\
                 </HotKeyGroup></NGlobalOptions>"
            ),
        )?;

        let candidates = find_options_files(root.path())?;
        assert_eq!(candidates.len(), 1);

        let workspaces = vec![WorkspaceSnapshot {
            id: "DesignWs".to_string(),
            name: "Design".to_string(),
            product_type: Some("design".to_string()),
            controls: vec![ToolbarControl::group(vec![ToolbarControl::command(
                "ExtrudeCmd",
            )])],
        }];
        let registry: HashMap<String, String> = [
            ("ExtrudeCmd".to_string(), "Extrude".to_string()),
            ("SetViewCmd".to_string(), "Set View".to_string()),
        ]
        .into();

        let text = generate_report(
            &candidates[0],
            &workspaces,
            &registry,
            &PassthroughResolver,
            &ReportOptions {
                format: OutputFormat::Plain,
                ..ReportOptions::default()
            },
        )?;

        assert!(text.contains("Design"));
        assert!(text.contains("Extrude"));
        assert!(text.contains("Ctrl+E"));
        // Not on any toolbar, so it lands in the unclassified group,
        // marked as user-defined, with its argument appended.
        assert!(text.contains("General"));
        assert!(text.contains("Set View → FrontView*"));
        // Unbound commands never appear.
        assert!(!text.contains("UnboundCmd"));
        Ok(())
    }

    #[test]
    fn test_missing_options_file_fails_the_request() {
        let missing = Path::new("/definitely/not/here/NGlobalOptions.xml");
        let err = generate_report(
            missing,
            &[],
            &HashMap::<String, String>::new(),
            &PassthroughResolver,
            &ReportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
