//! Integration tests for Error types
//!
//! Tests error construction, display, and context.

use keyfold_foundation::{BuildLimit, Error, ErrorContext, ErrorKind};

#[test]
fn error_invalid_key_display() {
    let err = Error::invalid_key(12);
    assert!(matches!(err.kind, ErrorKind::InvalidKey { index: 12 }));
    assert!(format!("{err}").contains("12"));
}

#[test]
fn error_limit_display() {
    let err = Error::limit_exceeded(BuildLimit::MaxRecords { limit: 5 });
    assert_eq!(format!("{err}"), "limit exceeded: max records (5) exceeded");
}

#[test]
fn error_context_frames() {
    let err = Error::invalid_key(0).with_context(
        ErrorContext::new()
            .with_source("posts")
            .with_frame("sync")
            .with_frame("build"),
    );

    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.stack, vec!["sync".to_string(), "build".to_string()]);
    let rendered = format!("{ctx}");
    assert!(rendered.contains("in posts"));
    assert!(rendered.contains("  in sync"));
}

#[test]
fn error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Error::invalid_key(0));
}
