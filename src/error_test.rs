use std::error::Error as _;

use super::*;

struct NullLogger;

impl log::Log for NullLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        false
    }

    fn log(&self, _record: &log::Record<'_>) {}

    fn flush(&self) {}
}

static NULL_LOGGER: NullLogger = NullLogger;

#[test]
fn second_logger_install_converts_to_logger_error() {
    // Only this test installs a logger, so the second call always fails.
    let _first = log::set_logger(&NULL_LOGGER);
    let raw = log::set_logger(&NULL_LOGGER).unwrap_err();
    let err = CanvasError::from(raw);
    assert!(matches!(err, CanvasError::Logger(_)));
    assert!(err.to_string().starts_with("logger install failed"));
    assert!(err.source().is_some());
}

#[test]
fn unknown_names_are_reported_verbatim() {
    assert_eq!(CanvasError::UnknownTool("eraser".into()).to_string(), "unknown tool: eraser");
    assert_eq!(CanvasError::UnknownElementKind("blob".into()).to_string(), "unknown element kind: blob");
}

#[test]
fn bad_uuid_converts_to_invalid_element_id() {
    let raw = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
    assert!(matches!(CanvasError::from(raw), CanvasError::InvalidElementId(_)));
}
