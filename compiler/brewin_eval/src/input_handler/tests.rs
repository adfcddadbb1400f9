use super::*;
use pretty_assertions::assert_eq;

#[test]
fn scripted_handler_serves_lines_in_order() {
    let handler = scripted_handler(["first", "second"]);
    assert_eq!(handler.read_line().as_deref(), Some("first"));
    assert_eq!(handler.read_line().as_deref(), Some("second"));
    assert_eq!(handler.read_line(), None);
}
