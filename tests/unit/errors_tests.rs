/*!
 * Tests for error types and conversions
 */

use std::io;
use annotrack::errors::{AnnotationError, AppError, DatasetError, TimestampError, TrainingError};

/// Test error messages carry their details
#[test]
fn test_annotationErrorDisplay_shouldIncludeDetails() {
    let malformed = AnnotationError::MalformedRow { line: 7, columns: 4, expected: 9 };
    assert_eq!(
        malformed.to_string(),
        "Malformed row at line 7: expected at least 9 columns, found 4"
    );

    let io_error = AnnotationError::io("exports/a.txt", io::Error::new(io::ErrorKind::NotFound, "gone"));
    let message = io_error.to_string();
    assert!(message.contains("exports/a.txt"));
    assert!(message.contains("gone"));
}

/// Test the timestamp error messages
#[test]
fn test_timestampErrorDisplay_shouldNameComponent() {
    let err = TimestampError::InvalidComponent { component: "seconds", value: "00:00:xx.000".to_string() };
    assert_eq!(err.to_string(), "Invalid seconds in timestamp: 00:00:xx.000");
}

/// Test wrapping into the application error
#[test]
fn test_appErrorFrom_shouldWrapEachKind() {
    let app: AppError = AnnotationError::NoData.into();
    assert!(matches!(app, AppError::Annotation(AnnotationError::NoData)));

    let app: AppError = DatasetError::ZeroBatchSize.into();
    assert!(app.to_string().starts_with("Dataset error:"));

    let app: AppError = TrainingError::EmptyLoader.into();
    assert_eq!(app.to_string(), "Training error: Data loader is empty");

    let app: AppError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(app, AppError::Unknown(ref msg) if msg == "boom"));
}

/// Test that the I/O error keeps its source
#[test]
fn test_annotationErrorSource_shouldBeIoError() {
    use std::error::Error;

    let err = AnnotationError::io("x", io::Error::new(io::ErrorKind::Other, "inner"));
    assert_eq!(err.source().map(|s| s.to_string()), Some("inner".to_string()));
}
