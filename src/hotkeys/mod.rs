/*!
 * Hotkey configuration model.
 *
 * The parser turns the host's options file into a flat list of
 * [`HotkeyBinding`] records for the aggregator to group and render.
 */

pub mod parser;

pub use parser::{parse_hotkeys, parse_hotkeys_file};

/// One keyboard binding from the options file.
///
/// Several bindings can share a key sequence (one per command bound to the
/// chord), and several can target the same command id with different
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBinding {
    /// Host action identifier, opaque to this crate.
    pub command_id: String,
    /// Qualifier distinguishing bindings that invoke the same command with
    /// different parameters.
    pub command_argument: Option<String>,
    /// True when the user customized the binding away from the factory
    /// default.
    pub is_user_defined: bool,
    /// The chord as stored in configuration; may name shifted symbols
    /// rather than physical keys.
    pub raw_sequence: String,
    /// Physical-key label form of `raw_sequence`, derived for the current
    /// platform and layout. Never persisted and not part of binding
    /// identity.
    pub display_sequence: String,
}
