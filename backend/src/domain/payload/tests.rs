//! Tests for payload validation and sanitisation.

use super::*;
use crate::domain::ErrorCode;
use rstest::{fixture, rstest};

#[fixture]
fn homer() -> AccountPayload {
    AccountPayload {
        first_name: "Homer".to_owned(),
        last_name: "Simpson".to_owned(),
        email: "homer@simpson.com".to_owned(),
        password: "secret".to_owned(),
        user_type: None,
    }
}

#[fixture]
fn customs_house() -> MonumentPayload {
    MonumentPayload {
        title: "Customs House".to_owned(),
        description: "Neoclassical 18th century building".to_owned(),
        province: "Leinster".to_owned(),
        county: "Dublin".to_owned(),
        latitude: "53.347".to_owned(),
        longitude: "-6.234".to_owned(),
        categories: vec!["Georgian".to_owned()],
    }
}

fn failing_fields(errors: &[FieldError]) -> Vec<&'static str> {
    errors.iter().map(|error| error.field).collect()
}

#[rstest]
fn valid_account_passes(homer: AccountPayload) {
    assert!(validate_account_payload(&homer).is_ok());
}

#[rstest]
#[case::missing_first_name(AccountPayload { first_name: String::new(), ..homer() }, "firstName")]
#[case::bad_email(AccountPayload { email: "homer".to_owned(), ..homer() }, "email")]
#[case::short_password(AccountPayload { password: "abcd".to_owned(), ..homer() }, "password")]
#[case::unknown_type(
    AccountPayload { user_type: Some("Owner".to_owned()), ..homer() },
    "userType"
)]
fn invalid_account_reports_field(#[case] payload: AccountPayload, #[case] field: &str) {
    let errors = validate_account_payload(&payload).expect_err("payload must fail");
    assert_eq!(failing_fields(&errors), vec![field]);
}

#[rstest]
fn valid_monument_passes(customs_house: MonumentPayload) {
    assert!(validate_monument_payload(&customs_house).is_ok());
}

#[rstest]
fn non_numeric_monument_fields_fail() {
    let payload = MonumentPayload {
        title: "4949494".to_owned(),
        description: "30303030".to_owned(),
        ..MonumentPayload::default()
    };
    let errors = validate_monument_payload(&payload).expect_err("payload must fail");
    assert_eq!(
        failing_fields(&errors),
        vec!["county", "province", "latitude", "longitude"]
    );
}

#[rstest]
fn unknown_province_is_rejected(customs_house: MonumentPayload) {
    let payload = MonumentPayload {
        province: "Dublin".to_owned(),
        ..customs_house
    };
    let errors = validate_monument_payload(&payload).expect_err("payload must fail");
    assert_eq!(failing_fields(&errors), vec!["province"]);
}

#[rstest]
fn sanitising_clean_monument_keeps_values(customs_house: MonumentPayload) {
    let (draft, selection) = sanitize_monument_payload(customs_house).expect("clean payload");
    assert_eq!(draft.title, "Customs House");
    assert_eq!(draft.province, Province::Leinster);
    assert_eq!(draft.coordinates, Coordinates::new(53.347, -6.234));
    assert_eq!(selection, CategorySelection::Single("Georgian".to_owned()));
}

#[rstest]
fn script_only_description_fails_sanitisation(customs_house: MonumentPayload) {
    let payload = MonumentPayload {
        description: "<script>alert('test')</script>".to_owned(),
        ..customs_house
    };
    assert!(sanitize_monument_payload(payload).is_none());
}

#[rstest]
#[case("<b>Customs</b> House", "Customs House")]
#[case("Trim & Slane", "Trim & Slane")]
#[case("  padded  ", "padded")]
#[case("&lt;script&gt;x&lt;/script&gt;Customs House", "Customs House")]
#[case("&amp;lt;b&amp;gt;Custom&amp;lt;/b&amp;gt;s", "Customs")]
#[case("a &lt; b", "a < b")]
fn strip_markup_leaves_plain_text(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(strip_markup(raw), expected);
}

#[rstest]
fn sanitising_account_defaults_user_type(homer: AccountPayload) {
    let details = sanitize_account_payload(homer).expect("clean payload");
    assert_eq!(details.user_type, UserType::User);
    assert_eq!(details.password.as_str(), "secret");
}

#[rstest]
fn script_only_name_fails_account_sanitisation(homer: AccountPayload) {
    let payload = AccountPayload {
        first_name: "<script>x()</script>".to_owned(),
        ..homer
    };
    assert!(sanitize_account_payload(payload).is_none());
}

#[rstest]
fn invalid_payload_maps_to_invalid_request(customs_house: MonumentPayload) {
    let payload = MonumentPayload {
        latitude: "north".to_owned(),
        ..customs_house
    };
    let error = monument_draft_from_payload(payload).expect_err("payload must fail");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "latitude must be a number");
}

#[rstest]
fn escaped_script_never_survives_monument_sanitisation(customs_house: MonumentPayload) {
    let payload = MonumentPayload {
        title: "&lt;script&gt;alert(1)&lt;/script&gt;Customs House".to_owned(),
        ..customs_house
    };
    let (draft, _) = sanitize_monument_payload(payload).expect("clean payload");
    assert_eq!(draft.title, "Customs House");
    assert!(!draft.title.contains("<script"));
}

#[rstest]
fn escaped_script_only_title_fails_sanitisation(customs_house: MonumentPayload) {
    let payload = MonumentPayload {
        title: "&lt;script&gt;alert(1)&lt;/script&gt;".to_owned(),
        ..customs_house
    };
    assert!(sanitize_monument_payload(payload).is_none());
}
