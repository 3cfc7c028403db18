//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn validation_error() -> DomainError {
    DomainError::validation("lines", "recipe needs at least one ingredient")
}

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = DomainError::invalid_request("bad");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(DomainError::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(DomainError::not_found("x"), ErrorCode::NotFound)]
#[case(DomainError::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(DomainError::internal("x"), ErrorCode::InternalError)]
fn convenience_constructors_set_codes(#[case] err: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(DomainErrorValidationError::EmptyMessage)));
}

#[rstest]
fn validation_errors_name_the_field(validation_error: DomainError) {
    assert_eq!(validation_error.code(), ErrorCode::InvalidRequest);
    assert_eq!(validation_error.field(), Some("lines"));
    assert_eq!(
        validation_error.to_string(),
        "recipe needs at least one ingredient"
    );
}

#[rstest]
fn field_is_none_without_details() {
    assert!(DomainError::internal("boom").field().is_none());
}

#[rstest]
fn serialises_in_camel_case(validation_error: DomainError) {
    let value = serde_json::to_value(&validation_error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "recipe needs at least one ingredient",
            "details": { "field": "lines" }
        })
    );
}

#[rstest]
fn deserialising_blank_message_fails() {
    let payload = json!({ "code": "internal_error", "message": "  " });
    let result: Result<DomainError, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn round_trips_through_json(validation_error: DomainError) {
    let json = serde_json::to_string(&validation_error).expect("serialise");
    let parsed: DomainError = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(parsed, validation_error);
}
