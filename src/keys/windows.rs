//! Win32 keyboard layout introspection.
//!
//! Translates a key code to the label of the physical key on the thread's
//! active input locale: virtual key -> scan code -> key name text.

use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyNameTextW, GetKeyboardLayout, MapVirtualKeyExW, VkKeyScanW, MAPVK_VK_TO_VSC_EX,
};

use super::{KeyCode, KeyboardLayout};

/// The active keyboard layout of the current thread.
pub struct Win32Layout;

impl KeyboardLayout for Win32Layout {
    fn key_label(&self, code: KeyCode) -> Option<String> {
        let vk = match code {
            KeyCode::Char(c) => {
                let unit = u16::try_from(c as u32).ok()?;
                let scan = unsafe { VkKeyScanW(unit) };
                if scan == -1 {
                    return None;
                }
                // Low byte is the virtual key; the high byte shift state is
                // irrelevant here, the physical key is the same either way.
                (scan as u16 & 0xff) as u32
            }
            KeyCode::Virtual(vk) => vk as u32,
        };

        let layout = unsafe { GetKeyboardLayout(0) };
        let scan_code = unsafe { MapVirtualKeyExW(vk, MAPVK_VK_TO_VSC_EX, layout) };
        if scan_code == 0 {
            return None;
        }

        let mut name = [0u16; 32];
        let len = unsafe { GetKeyNameTextW((scan_code << 16) as i32, &mut name) };
        if len <= 0 {
            return None;
        }
        Some(String::from_utf16_lossy(&name[..len as usize]))
    }
}
