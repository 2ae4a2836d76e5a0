//! Regression coverage for user-domain validation and serialization.

use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::ProviderIdentity;

fn fixture_profile(plan: PlanTier) -> UserProfile {
    UserProfile::new(
        UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
        EmailAddress::new("ada@example.com").expect("fixture email"),
        UserName::new("Ada Lovelace").expect("fixture name"),
        plan,
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).single().expect("fixture timestamp"),
    )
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("  3fa85f64", UserValidationError::InvalidId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
fn rejects_invalid_user_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
    let err = UserId::new(raw).expect_err("invalid id must fail");
    assert_eq!(err, expected);
}

#[test]
fn random_user_ids_parse_as_uuids() {
    let id = UserId::random();
    assert!(UserId::new(id.as_ref()).is_ok());
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("nope", UserValidationError::InvalidEmail)]
#[case("a@b", UserValidationError::InvalidEmail)]
#[case("spaces in@example.com", UserValidationError::InvalidEmail)]
#[case("a@@example.com", UserValidationError::InvalidEmail)]
fn rejects_malformed_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
    let err = EmailAddress::new(raw).expect_err("invalid email must fail");
    assert_eq!(err, expected);
}

#[rstest]
#[case("ada@example.com")]
#[case("  ada@example.com  ")]
#[case("first.last+tag@sub.example.co.uk")]
fn accepts_reasonable_emails(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), raw.trim());
}

#[test]
fn rejects_blank_and_oversized_names() {
    assert_eq!(
        UserName::new("   ").expect_err("blank name"),
        UserValidationError::EmptyName
    );
    let oversized = "x".repeat(USER_NAME_MAX + 1);
    assert_eq!(
        UserName::new(oversized).expect_err("oversized name"),
        UserValidationError::NameTooLong { max: USER_NAME_MAX }
    );
}

#[test]
fn profile_serializes_camel_case() {
    let value = serde_json::to_value(fixture_profile(PlanTier::Pro)).expect("profile serializes");
    assert_eq!(value.get("plan").and_then(Value::as_str), Some("pro"));
    assert!(value.get("createdAt").is_some());
    assert!(value.get("created_at").is_none());
}

#[test]
fn profile_round_trips_through_json() {
    let profile = fixture_profile(PlanTier::Free);
    let encoded = serde_json::to_string(&profile).expect("encode");
    let decoded: UserProfile = serde_json::from_str(&encoded).expect("decode");
    assert_eq!(decoded, profile);
}

#[test]
fn profile_rejects_invalid_wire_data() {
    let result: Result<UserProfile, _> = serde_json::from_str(
        r#"{"id":"nope","email":"ada@example.com","name":"Ada","plan":"free","createdAt":"2025-01-15T09:30:00Z"}"#,
    );
    assert!(result.is_err(), "invalid id must fail deserialization");
}

#[test]
fn authenticated_user_prefers_provider_name_and_profile_plan() {
    let profile = fixture_profile(PlanTier::Ultra);
    let identity = ProviderIdentity {
        id: profile.id().clone(),
        email: profile.email().clone(),
        name: Some(UserName::new("Provider Ada").expect("name")),
    };

    let user = AuthenticatedUser::from_parts(&identity, Some(&profile));
    assert_eq!(user.name.as_ref().map(AsRef::as_ref), Some("Provider Ada"));
    assert_eq!(user.plan, PlanTier::Ultra);
}

#[test]
fn authenticated_user_defaults_to_free_without_profile() {
    let identity = ProviderIdentity {
        id: UserId::random(),
        email: EmailAddress::new("ada@example.com").expect("email"),
        name: None,
    };

    let user = AuthenticatedUser::from_parts(&identity, None);
    assert_eq!(user.plan, PlanTier::Free);
    assert!(user.name.is_none());

    let value = serde_json::to_value(&user).expect("user serializes");
    assert!(value.get("name").is_none(), "absent name must be omitted");
}
