/*!
 * Options file parser.
 *
 * The options file is an XML document in which a single `HotKeyJSONString`
 * element carries the whole hotkey table as a JSON string attribute.
 */

use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::keys::KeyLabelResolver;

use super::HotkeyBinding;

const JSON_ELEMENT: &str = "HotKeyJSONString";
const JSON_ATTRIBUTE: &str = "Value";

#[derive(Deserialize)]
struct HotkeyTable {
    hotkeys: Vec<HotkeyGroup>,
}

#[derive(Deserialize)]
struct HotkeyGroup {
    /// Absent for unbound commands; such groups yield no bindings.
    hotkey_sequence: Option<String>,
    #[serde(default)]
    commands: Vec<CommandBinding>,
}

#[derive(Deserialize)]
struct CommandBinding {
    command_id: String,
    command_argument: Option<String>,
    #[serde(rename = "isDefault", default)]
    is_default: bool,
}

/// Reads and parses one options file.
pub fn parse_hotkeys_file(
    path: &Path,
    resolver: &dyn KeyLabelResolver,
) -> Result<Vec<HotkeyBinding>> {
    let xml = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_hotkeys(&xml, resolver)
}

/// Parses options XML into a flat binding list.
///
/// Every (key sequence, command) pair becomes one binding; bindings under
/// the same group share the raw and display sequences. Pure function of the
/// document text and the resolver.
pub fn parse_hotkeys(xml: &str, resolver: &dyn KeyLabelResolver) -> Result<Vec<HotkeyBinding>> {
    let payload = extract_json_payload(xml)?;
    let table: HotkeyTable = serde_json::from_str(&payload)
        .map_err(|e| Error::parse(format!("unexpected hotkey JSON shape: {e}")))?;

    let mut bindings = Vec::new();
    for group in table.hotkeys {
        let Some(raw_sequence) = group.hotkey_sequence else {
            continue;
        };
        let display_sequence = resolver.display_sequence(&raw_sequence);
        for command in group.commands {
            bindings.push(HotkeyBinding {
                command_id: command.command_id,
                command_argument: command.command_argument.filter(|a| !a.is_empty()),
                is_user_defined: !command.is_default,
                raw_sequence: raw_sequence.clone(),
                display_sequence: display_sequence.clone(),
            });
        }
    }

    debug!("parsed {} hotkey binding(s)", bindings.len());
    Ok(bindings)
}

/// Pulls the JSON string out of the XML envelope.
fn extract_json_payload(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() != JSON_ELEMENT.as_bytes() {
                    continue;
                }
                for attr in e.attributes() {
                    let attr =
                        attr.map_err(|e| Error::parse(format!("malformed attribute: {e}")))?;
                    if attr.key.as_ref() == JSON_ATTRIBUTE.as_bytes() {
                        let value = attr
                            .unescape_value()
                            .map_err(|e| Error::parse(format!("malformed attribute: {e}")))?;
                        return Ok(value.into_owned());
                    }
                }
                return Err(Error::parse(format!(
                    "{JSON_ELEMENT} element has no {JSON_ATTRIBUTE} attribute"
                )));
            }
            Ok(Event::Eof) => {
                return Err(Error::parse(format!(
                    "no {JSON_ELEMENT} element in options XML"
                )))
            }
            Err(e) => return Err(Error::parse(format!("malformed XML: {e}"))),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::PassthroughResolver;

    /// Wraps a JSON payload in the host's XML envelope. Single-quoted
    /// attribute so the JSON's double quotes need no escaping.
    fn options_xml(json: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?>\
             <NGlobalOptions><HotKeyGroup>\
             <HotKeyJSONString Value='{json}'/>\
             </HotKeyGroup></NGlobalOptions>"
        )
    }

    #[test]
    fn test_sequence_less_groups_yield_no_bindings() {
        let xml = options_xml(
            r#"{"hotkeys":[
                {"hotkey_sequence":"Ctrl+A","commands":[
                    {"command_id":"C1","command_argument":null,"isDefault":true}]},
                {"commands":[
                    {"command_id":"C2","command_argument":null,"isDefault":true}]}
            ]}"#,
        );
        let bindings = parse_hotkeys(&xml, &PassthroughResolver).unwrap();

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].command_id, "C1");
        assert_eq!(bindings[0].raw_sequence, "Ctrl+A");
        assert!(!bindings[0].is_user_defined);
    }

    #[test]
    fn test_commands_in_a_group_share_the_sequence() {
        let xml = options_xml(
            r#"{"hotkeys":[
                {"hotkey_sequence":"Ctrl+D","commands":[
                    {"command_id":"C1","command_argument":null,"isDefault":true},
                    {"command_id":"C2","command_argument":"TOP","isDefault":false}]}
            ]}"#,
        );
        let bindings = parse_hotkeys(&xml, &PassthroughResolver).unwrap();

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].raw_sequence, "Ctrl+D");
        assert_eq!(bindings[1].raw_sequence, "Ctrl+D");
        assert_eq!(bindings[1].command_argument.as_deref(), Some("TOP"));
        assert!(bindings[1].is_user_defined);
    }

    #[test]
    fn test_empty_argument_is_treated_as_absent() {
        let xml = options_xml(
            r#"{"hotkeys":[
                {"hotkey_sequence":"S","commands":[
                    {"command_id":"C1","command_argument":"","isDefault":true}]}
            ]}"#,
        );
        let bindings = parse_hotkeys(&xml, &PassthroughResolver).unwrap();
        assert_eq!(bindings[0].command_argument, None);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let xml = options_xml(
            r#"{"hotkeys":[
                {"hotkey_sequence":"Ctrl+Z","commands":[
                    {"command_id":"Undo","command_argument":null,"isDefault":true}]}
            ]}"#,
        );
        let first = parse_hotkeys(&xml, &PassthroughResolver).unwrap();
        let second = parse_hotkeys(&xml, &PassthroughResolver).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let err = parse_hotkeys("<NGlobalOptions><open", &PassthroughResolver).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_json_element_is_parse_error() {
        let err = parse_hotkeys("<NGlobalOptions/>", &PassthroughResolver).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_value_attribute_is_parse_error() {
        let xml = "<NGlobalOptions><HotKeyGroup><HotKeyJSONString/></HotKeyGroup></NGlobalOptions>";
        let err = parse_hotkeys(xml, &PassthroughResolver).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_unexpected_json_shape_is_parse_error() {
        let xml = options_xml(r#"{"not_hotkeys": []}"#);
        let err = parse_hotkeys(&xml, &PassthroughResolver).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_xml_escaped_payload_is_unescaped() {
        // Real options files store the JSON with XML entities for quotes.
        let xml = "<NGlobalOptions><HotKeyGroup>\
             <HotKeyJSONString Value=\"{&quot;hotkeys&quot;:[]}\"/>\
             </HotKeyGroup></NGlobalOptions>";
        let bindings = parse_hotkeys(xml, &PassthroughResolver).unwrap();
        assert!(bindings.is_empty());
    }
}
