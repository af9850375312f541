//! Tests for user account primitives.

use super::*;
use rstest::rstest;

#[rstest]
#[case(Some("Admin"), UserType::Admin)]
#[case(Some("User"), UserType::User)]
#[case(Some("admin"), UserType::User)]
#[case(None, UserType::User)]
fn form_value_defaults_to_regular_user(#[case] raw: Option<&str>, #[case] expected: UserType) {
    assert_eq!(UserType::from_form_value(raw), expected);
}

#[rstest]
fn stored_labels_round_trip() {
    for user_type in [UserType::User, UserType::Admin] {
        let parsed: UserType = user_type.as_str().parse().expect("known label");
        assert_eq!(parsed, user_type);
    }
    assert!("Owner".parse::<UserType>().is_err());
}

#[rstest]
fn password_hash_debug_is_redacted() {
    let hash = PasswordHash::new("$argon2id$v=19$secret");
    assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
}

#[rstest]
fn full_name_joins_first_and_last() {
    let user = User {
        id: UserId::random(),
        first_name: "Homer".to_owned(),
        last_name: "Simpson".to_owned(),
        email: "homer@simpson.com".to_owned(),
        password_hash: PasswordHash::new("hash"),
        user_type: UserType::User,
        last_login: None,
        last_updated: None,
        record_count: 0,
    };
    assert_eq!(user.full_name(), "Homer Simpson");
}
