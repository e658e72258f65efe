use loro::error::{LoroError, Result};
use std::error::Error;

#[test]
fn test_error_display() {
    let error = LoroError::Endpoint("Repository not found".to_string());
    assert_eq!(format!("{}", error), "Repository not found");

    let error = LoroError::Status(404);
    assert_eq!(format!("{}", error), "Request failed with status 404");

    let error = LoroError::InvalidEndpoint("nope".to_string());
    assert_eq!(format!("{}", error), "Invalid endpoint URL: nope");

    let error = LoroError::Actor("gone".to_string());
    assert_eq!(format!("{}", error), "Lookup actor error: gone");
}

#[test]
fn test_error_source() {
    let error = LoroError::Status(500);
    assert!(error.source().is_none());

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: LoroError = json_error.into();
    assert!(error.source().is_some());
}

#[test]
fn test_error_conversion() {
    let json_error = serde_json::from_str::<loro::types::RepoSummary>("{}").unwrap_err();
    let error: LoroError = json_error.into();
    assert!(matches!(error, LoroError::MalformedResponse(_)));
    assert!(error.to_string().contains("missing field"));
}

#[test]
fn test_result_type() {
    fn returns_result() -> Result<String> {
        Ok("success".to_string())
    }

    let result = returns_result();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "success");

    fn returns_error() -> Result<String> {
        Err(LoroError::Status(503))
    }

    let result = returns_error();
    assert!(result.is_err());
}
