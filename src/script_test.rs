use super::*;
use canvas::input::Button;

#[test]
fn parses_events_skipping_comments_and_blanks() {
    let text = r#"
# warm up
{"type":"pointer_enter"}

{"type":"pointer_down","x":85,"y":65,"button":"primary"}
   {"type":"frame"}
"#;
    let events = parse_events(text).unwrap();
    assert_eq!(
        events,
        vec![
            InputEvent::PointerEnter,
            InputEvent::PointerDown { x: 85.0, y: 65.0, button: Button::Primary },
            InputEvent::Frame,
        ]
    );
}

#[test]
fn reports_offending_line_number() {
    let text = "{\"type\":\"frame\"}\n# ok\n{\"type\":\"teleport\"}\n";
    let err = parse_events(text).unwrap_err();
    assert_eq!(err.line, 3);
    assert!(err.to_string().starts_with("line 3:"));
}

#[test]
fn empty_script_is_empty() {
    assert!(parse_events("").unwrap().is_empty());
}
