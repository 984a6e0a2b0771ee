/*!
 * Key-label resolution.
 *
 * The options file stores chord triggers in the host's internal encoding,
 * which may name a shifted symbol (`!`) rather than the physical key the
 * user presses (`1` on a US layout, where `!` is typed as Shift+1).
 * Resolvers translate the trigger segment of a raw sequence into the label
 * of the physical key on the active keyboard layout.
 */

#[cfg(windows)]
pub mod windows;

use tracing::warn;

/// Layout-independent identity of a trigger key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, to be located on the active layout.
    Char(char),
    /// A virtual key code for a named non-printable key.
    Virtual(u16),
}

/// Maps a raw trigger token to its layout-independent key code.
///
/// Single-character triggers are their own character code regardless of
/// case. Multi-character triggers are looked up in a fixed name table.
/// Virtual key codes follow the Win32 assignments:
/// https://docs.microsoft.com/en-us/windows/win32/inputdev/virtual-key-codes
pub fn trigger_key_code(trigger: &str) -> Option<KeyCode> {
    let mut chars = trigger.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let code = match trigger {
        "Slash" => return Some(KeyCode::Char('/')),
        "backspace" => 0x08,
        "return" => 0x0d,
        "escape" => 0x1b,
        "space" => 0x20,
        "delete" => 0x2e,
        "f1" => 0x70,
        "f2" => 0x71,
        "f3" => 0x72,
        "f4" => 0x73,
        "f5" => 0x74,
        "f6" => 0x75,
        "f7" => 0x76,
        "f8" => 0x77,
        "f9" => 0x78,
        "f10" => 0x79,
        "f11" => 0x7a,
        "f12" => 0x7b,
        "f13" => 0x7c,
        "f14" => 0x7d,
        "f15" => 0x7e,
        "f16" => 0x7f,
        "f17" => 0x80,
        "f18" => 0x81,
        "f19" => 0x82,
        "f20" => 0x83,
        "f21" => 0x84,
        "f22" => 0x85,
        "f23" => 0x86,
        "f24" => 0x87,
        _ => return None,
    };
    Some(KeyCode::Virtual(code))
}

/// Translates raw key sequences to display sequences.
///
/// A raw sequence is segments joined by `+`; the last segment is the
/// trigger key, earlier segments are modifier names. Only the trigger is
/// translated, modifiers pass through unchanged.
pub trait KeyLabelResolver {
    fn display_sequence(&self, raw: &str) -> String;
}

/// Conservative no-op strategy for platforms without keyboard layout
/// introspection. Correct only for sequences that already name physical
/// keys.
pub struct PassthroughResolver;

impl KeyLabelResolver for PassthroughResolver {
    fn display_sequence(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Active-keyboard-layout introspection seam.
pub trait KeyboardLayout {
    /// Label of the physical key producing `code` on this layout, or
    /// `None` when the layout has no such key.
    fn key_label(&self, code: KeyCode) -> Option<String>;
}

/// Layout-aware strategy: maps the trigger to a key code and asks the OS
/// layout for the physical key's label.
pub struct LayoutResolver<L> {
    layout: L,
}

impl<L: KeyboardLayout> LayoutResolver<L> {
    pub fn new(layout: L) -> Self {
        Self { layout }
    }

    fn trigger_label(&self, trigger: &str) -> String {
        let Some(code) = trigger_key_code(trigger) else {
            warn!("no key mapping for \"{trigger}\", leaving as-is");
            return trigger.to_string();
        };
        match self.layout.key_label(code) {
            Some(label) => label,
            None => {
                warn!("active layout has no label for {code:?}, leaving \"{trigger}\" as-is");
                trigger.to_string()
            }
        }
    }
}

impl<L: KeyboardLayout> KeyLabelResolver for LayoutResolver<L> {
    fn display_sequence(&self, raw: &str) -> String {
        match raw.rsplit_once('+') {
            Some((modifiers, trigger)) if !trigger.is_empty() => {
                format!("{modifiers}+{}", self.trigger_label(trigger))
            }
            // Trailing '+' has no trigger token to translate.
            Some(_) => raw.to_string(),
            None => self.trigger_label(raw),
        }
    }
}

/// Resolver for the current platform: layout-aware where the OS exposes
/// layout introspection, passthrough elsewhere.
pub fn platform_resolver() -> Box<dyn KeyLabelResolver> {
    #[cfg(windows)]
    {
        Box::new(LayoutResolver::new(windows::Win32Layout))
    }

    #[cfg(not(windows))]
    {
        Box::new(PassthroughResolver)
    }
}
