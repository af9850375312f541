//! Tests for the account pages.

use crate::domain::UserType;
use crate::inbound::web::test_pages::browser;
use crate::test_support::{TestCatalogue, fixture_catalogue, seed_user};
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};

#[fixture]
fn catalogue() -> TestCatalogue {
    fixture_catalogue()
}

#[rstest]
#[actix_web::test]
async fn landing_and_forms_render_without_a_session(catalogue: TestCatalogue) {
    let mut browser = browser(catalogue.state).await;

    for uri in ["/", "/signup", "/login"] {
        let page = browser.get(uri).await;
        assert_eq!(page.status, StatusCode::OK, "{uri}");
        assert!(page.body.starts_with("<!DOCTYPE html>"));
    }
}

#[rstest]
#[case("/home")]
#[case("/report")]
#[case("/settings")]
#[case("/adminDashboard")]
#[actix_web::test]
async fn protected_pages_redirect_to_login(catalogue: TestCatalogue, #[case] uri: &str) {
    let mut browser = browser(catalogue.state).await;

    let page = browser.get(uri).await;

    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/login"));
}

#[rstest]
#[actix_web::test]
async fn signup_opens_a_session_and_lands_on_home(catalogue: TestCatalogue) {
    let mut browser = browser(catalogue.state.clone()).await;

    let page = browser.sign_up("Homer", "homer@simpson.com", "User").await;

    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/home"));
    assert!(browser.signed_in());
    let home = browser.get("/home").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("Homer Simpson"));
    assert_eq!(catalogue.state.accounts.count().await.expect("count"), 1);
}

#[rstest]
#[actix_web::test]
async fn duplicate_signup_shows_the_error(catalogue: TestCatalogue) {
    seed_user(&catalogue.state, "Homer", "homer@simpson.com", UserType::User).await;
    let mut browser = browser(catalogue.state).await;

    let page = browser.sign_up("Homer", "homer@simpson.com", "User").await;

    assert_eq!(page.status, StatusCode::CONFLICT);
    assert!(page.body.contains("an account already exists for homer@simpson.com"));
    assert!(!browser.signed_in());
}

#[rstest]
#[actix_web::test]
async fn invalid_signup_lists_each_field(catalogue: TestCatalogue) {
    let mut browser = browser(catalogue.state).await;

    let page = browser
        .post_form(
            "/signup",
            &[("firstName", ""), ("lastName", "Simpson"), ("email", "nope"), ("password", "abc")],
        )
        .await;

    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(page.body.matches("<li>").count() >= 3);
}

#[rstest]
#[actix_web::test]
async fn login_stamps_the_login_time(catalogue: TestCatalogue) {
    let homer = seed_user(&catalogue.state, "Homer", "homer@simpson.com", UserType::User).await;
    let mut browser = browser(catalogue.state.clone()).await;

    let page = browser
        .post_form("/login", &[("email", "homer@simpson.com"), ("password", "secret")])
        .await;

    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/report"));
    let stored = catalogue.state.accounts.find(&homer.id).await.expect("user");
    assert!(stored.last_login.is_some());
}

#[rstest]
#[case("secret-ish", StatusCode::UNAUTHORIZED)]
#[case("", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn failed_login_rerenders_the_form(
    catalogue: TestCatalogue,
    #[case] password: &str,
    #[case] status: StatusCode,
) {
    seed_user(&catalogue.state, "Homer", "homer@simpson.com", UserType::User).await;
    let mut browser = browser(catalogue.state).await;

    let page = browser
        .post_form("/login", &[("email", "homer@simpson.com"), ("password", password)])
        .await;

    assert_eq!(page.status, status);
    assert!(page.body.contains("class=\"errors\""));
    assert!(!browser.signed_in());
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session(catalogue: TestCatalogue) {
    let mut browser = browser(catalogue.state).await;
    browser.sign_up("Homer", "homer@simpson.com", "User").await;

    let page = browser.get("/logout").await;

    assert_eq!(page.location.as_deref(), Some("/"));
    assert!(!browser.signed_in());
    assert_eq!(browser.get("/home").await.status, StatusCode::SEE_OTHER);
}

#[rstest]
#[actix_web::test]
async fn settings_update_shows_the_notice(catalogue: TestCatalogue) {
    let mut browser = browser(catalogue.state.clone()).await;
    browser.sign_up("Homer", "homer@simpson.com", "User").await;
    assert!(!browser.get("/settings").await.body.contains("Settings updated"));

    let page = browser
        .post_form(
            "/settings",
            &[
                ("firstName", "Max"),
                ("lastName", "Power"),
                ("email", "max@power.com"),
                ("password", "secret"),
                ("userType", "User"),
            ],
        )
        .await;
    assert_eq!(page.location.as_deref(), Some("/settings"));

    let settings = browser.get("/settings").await;
    assert!(settings.body.contains("Settings updated"));
    assert!(settings.body.contains("max@power.com"));
}

#[rstest]
#[actix_web::test]
async fn dashboard_is_for_admins(catalogue: TestCatalogue) {
    let mut user = browser(catalogue.state.clone()).await;
    user.sign_up("Homer", "homer@simpson.com", "User").await;
    assert_eq!(user.get("/adminDashboard").await.status, StatusCode::FORBIDDEN);

    let mut admin = browser(catalogue.state).await;
    admin.sign_up("Marge", "marge@simpson.com", "Admin").await;
    let page = admin.get("/adminDashboard").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("homer@simpson.com"));
    assert!(page.body.contains("marge@simpson.com"));
}

#[rstest]
#[actix_web::test]
async fn deleting_your_own_account_signs_you_out(catalogue: TestCatalogue) {
    let mut browser = browser(catalogue.state.clone()).await;
    browser.sign_up("Homer", "homer@simpson.com", "User").await;
    let homer = catalogue.state.accounts.list().await.expect("users").remove(0);

    let page = browser
        .send(actix_web::test::TestRequest::post().uri(&format!("/deleteAccount/{}", homer.id)))
        .await;
    assert_eq!(page.location.as_deref(), Some("/accountDeleted"));

    let page = browser.get("/accountDeleted").await;
    assert!(page.body.contains("Your account has been deleted."));
    assert!(!browser.signed_in());
    assert_eq!(catalogue.state.accounts.count().await.expect("count"), 0);
}

#[rstest]
#[actix_web::test]
async fn admins_delete_other_accounts_from_the_dashboard(catalogue: TestCatalogue) {
    let homer = seed_user(&catalogue.state, "Homer", "homer@simpson.com", UserType::User).await;
    let mut admin = browser(catalogue.state.clone()).await;
    admin.sign_up("Marge", "marge@simpson.com", "Admin").await;

    let page = admin
        .send(actix_web::test::TestRequest::post().uri(&format!("/deleteAccount/{}", homer.id)))
        .await;

    assert_eq!(page.location.as_deref(), Some("/adminDashboard"));
    assert!(admin.signed_in());
    assert_eq!(catalogue.state.accounts.count().await.expect("count"), 1);
}

#[rstest]
#[actix_web::test]
async fn users_cannot_delete_other_accounts(catalogue: TestCatalogue) {
    let marge = seed_user(&catalogue.state, "Marge", "marge@simpson.com", UserType::Admin).await;
    let mut browser = browser(catalogue.state.clone()).await;
    browser.sign_up("Homer", "homer@simpson.com", "User").await;

    let page = browser
        .send(actix_web::test::TestRequest::post().uri(&format!("/deleteAccount/{}", marge.id)))
        .await;

    assert_eq!(page.status, StatusCode::FORBIDDEN);
    assert_eq!(catalogue.state.accounts.count().await.expect("count"), 2);
}
