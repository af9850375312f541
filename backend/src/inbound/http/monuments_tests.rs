//! Tests for monuments API handlers.

use super::*;
use crate::domain::{DEFAULT_IMAGE_URL, User, UserType};
use crate::test_support::multipart::{Part, content_type, customs_house, encode};
use crate::test_support::{TestCatalogue, bearer_for, fixture_catalogue, seed_user};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::Value;

#[fixture]
fn catalogue() -> TestCatalogue {
    fixture_catalogue()
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api").configure(configure))
}

async fn send(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(state)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn form_request(
    request: actix_test::TestRequest,
    bearer: Option<&str>,
    parts: &[Part<'_>],
) -> actix_test::TestRequest {
    let request = request
        .insert_header(("content-type", content_type()))
        .set_payload(encode(parts));
    match bearer {
        Some(value) => request.insert_header(("authorization", value.to_owned())),
        None => request,
    }
}

async fn homer(state: &HttpState) -> (User, String) {
    let user = seed_user(state, "Homer", "homer@simpson.com", UserType::User).await;
    let bearer = bearer_for(state, &user);
    (user, bearer)
}

async fn create_customs_house(state: &HttpState, bearer: &str, categories: &[&str]) -> Value {
    let (status, body) = send(
        state.clone(),
        form_request(
            actix_test::TestRequest::post().uri("/api/monuments"),
            Some(bearer),
            &customs_house(categories, &[]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("monument id").to_owned()
}

#[rstest]
#[actix_web::test]
async fn create_requires_a_bearer_token(catalogue: TestCatalogue) {
    let (status, body) = send(
        catalogue.state.clone(),
        form_request(
            actix_test::TestRequest::post().uri("/api/monuments"),
            None,
            &customs_house(&[], &[]),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert!(catalogue.state.monuments.list().await.expect("list").is_empty());
}

#[rstest]
#[actix_web::test]
async fn create_rejects_a_forged_token(catalogue: TestCatalogue) {
    let (status, _) = send(
        catalogue.state,
        form_request(
            actix_test::TestRequest::post().uri("/api/monuments"),
            Some("Bearer not.a.token"),
            &customs_house(&[], &[]),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn create_without_files_records_the_placeholder_image(catalogue: TestCatalogue) {
    let (user, bearer) = homer(&catalogue.state).await;

    let body = create_customs_house(&catalogue.state, &bearer, &["Georgian"]).await;

    assert_eq!(body["title"], "Customs House");
    assert_eq!(body["province"], "Leinster");
    assert_eq!(body["userId"], user.id.to_string());
    assert_eq!(body["categories"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["images"].as_array().map(Vec::len), Some(1));

    let (status, listing) = send(
        catalogue.state.clone(),
        actix_test::TestRequest::get().uri(&format!("/api/monuments/{}/images", id_of(&body))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["numberOfResults"], 1);
    assert_eq!(listing["images"][0]["url"], DEFAULT_IMAGE_URL);

    let owner = catalogue.state.accounts.find(&user.id).await.expect("owner");
    assert_eq!(owner.record_count, 1);
}

#[rstest]
#[actix_web::test]
async fn create_uploads_every_file_in_order(catalogue: TestCatalogue) {
    let (_, bearer) = homer(&catalogue.state).await;
    let parts = customs_house(
        &[],
        &[
            ("front.jpg", b"front".as_slice()),
            ("side.jpg", b"side".as_slice()),
        ],
    );

    let (status, body) = send(
        catalogue.state.clone(),
        form_request(
            actix_test::TestRequest::post().uri("/api/monuments"),
            Some(&bearer),
            &parts,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, listing) = send(
        catalogue.state,
        actix_test::TestRequest::get().uri(&format!("/api/monuments/{}/images", id_of(&body))),
    )
    .await;
    assert_eq!(listing["numberOfResults"], 2);
    assert_eq!(listing["images"][0]["title"], "front.jpg");
    assert_eq!(listing["images"][0]["url"], "/uploads/front.jpg");
    assert_eq!(listing["images"][1]["title"], "side.jpg");
}

#[rstest]
#[actix_web::test]
async fn invalid_monument_fields_are_rejected(catalogue: TestCatalogue) {
    let (_, bearer) = homer(&catalogue.state).await;
    let mut parts = customs_house(&[], &[]);
    parts.retain(|part| !matches!(part, Part::Text("province", _)));
    parts.push(Part::Text("province", "Atlantis"));

    let (status, body) = send(
        catalogue.state,
        form_request(
            actix_test::TestRequest::post().uri("/api/monuments"),
            Some(&bearer),
            &parts,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = body["details"]["fields"]
        .as_array()
        .expect("field errors listed");
    assert!(fields.iter().any(|error| error["field"] == "province"));
}

#[rstest]
#[actix_web::test]
async fn list_and_fetch_monuments(catalogue: TestCatalogue) {
    let (_, bearer) = homer(&catalogue.state).await;
    let created = create_customs_house(&catalogue.state, &bearer, &[]).await;

    let (status, body) = send(
        catalogue.state.clone(),
        actix_test::TestRequest::get().uri("/api/monuments"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) = send(
        catalogue.state,
        actix_test::TestRequest::get().uri(&format!("/api/monuments/{}", id_of(&created))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["county"], "Dublin");
    assert_eq!(body["coordinates"]["latitude"], 53.3487);
}

#[rstest]
#[case("1234")]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[actix_web::test]
async fn unknown_monuments_are_not_found(catalogue: TestCatalogue, #[case] id: &str) {
    for uri in [
        format!("/api/monuments/{id}"),
        format!("/api/monuments/{id}/weather"),
        format!("/api/monuments/{id}/images"),
    ] {
        let (status, body) = send(
            catalogue.state.clone(),
            actix_test::TestRequest::get().uri(&uri),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["code"], "not_found");
    }
}

#[rstest]
#[actix_web::test]
async fn categories_and_provinces_are_listed_separately(catalogue: TestCatalogue) {
    let (_, bearer) = homer(&catalogue.state).await;
    create_customs_house(&catalogue.state, &bearer, &["Georgian", "Quayside"]).await;

    let (status, categories) = send(
        catalogue.state.clone(),
        actix_test::TestRequest::get().uri("/api/monuments/categories"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = categories
        .as_array()
        .expect("category list")
        .iter()
        .filter_map(|category| category["title"].as_str())
        .collect();
    assert_eq!(titles, ["Georgian", "Quayside"]);
    assert_eq!(categories[0]["monuments"][0]["title"], "Customs House");

    let (status, provinces) = send(
        catalogue.state,
        actix_test::TestRequest::get().uri("/api/monuments/provinces"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let leinster = provinces
        .as_array()
        .expect("province list")
        .iter()
        .find(|province| province["title"] == "Leinster")
        .expect("Leinster listed");
    assert_eq!(leinster["monuments"].as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn weather_failure_reports_unavailable(catalogue: TestCatalogue) {
    let (_, bearer) = homer(&catalogue.state).await;
    let mut parts = customs_house(&[], &[]);
    parts.retain(|part| !matches!(part, Part::Text("latitude" | "longitude", _)));
    parts.push(Part::Text("latitude", "89"));
    parts.push(Part::Text("longitude", "179"));
    let (_, created) = send(
        catalogue.state.clone(),
        form_request(
            actix_test::TestRequest::post().uri("/api/monuments"),
            Some(&bearer),
            &parts,
        ),
    )
    .await;

    let (status, body) = send(
        catalogue.state,
        actix_test::TestRequest::get()
            .uri(&format!("/api/monuments/{}/weather", id_of(&created))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weatherAvailable"], false);
    assert!(body["currentWeather"].is_null());
}

#[rstest]
#[actix_web::test]
async fn edit_keeps_images_unless_cleared(catalogue: TestCatalogue) {
    let (_, bearer) = homer(&catalogue.state).await;
    let created = create_customs_house(&catalogue.state, &bearer, &["Georgian"]).await;
    let uri = format!("/api/monuments/{}", id_of(&created));
    let original_images = created["images"].clone();

    let mut parts = customs_house(&["Quayside"], &[]);
    parts.retain(|part| !matches!(part, Part::Text("title", _)));
    parts.push(Part::Text("title", "The Custom House"));
    let (status, body) = send(
        catalogue.state.clone(),
        form_request(actix_test::TestRequest::put().uri(&uri), Some(&bearer), &parts),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "The Custom House");
    assert_eq!(body["images"], original_images);

    let (_, categories) = send(
        catalogue.state.clone(),
        actix_test::TestRequest::get().uri("/api/monuments/categories"),
    )
    .await;
    let georgian = categories
        .as_array()
        .expect("category list")
        .iter()
        .find(|category| category["title"] == "Georgian")
        .expect("Georgian kept");
    assert_eq!(georgian["monuments"].as_array().map(Vec::len), Some(0));

    let mut parts = customs_house(&[], &[]);
    parts.push(Part::Text("imagesCleared", "true"));
    let (status, body) = send(
        catalogue.state,
        form_request(actix_test::TestRequest::patch().uri(&uri), Some(&bearer), &parts),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["images"].as_array().map(Vec::len), Some(1));
    assert_ne!(body["images"], original_images);
}

#[rstest]
#[actix_web::test]
async fn delete_removes_memberships_and_images(catalogue: TestCatalogue) {
    let (user, bearer) = homer(&catalogue.state).await;
    let created = create_customs_house(&catalogue.state, &bearer, &[]).await;
    let uri = format!("/api/monuments/{}", id_of(&created));

    let (status, _) = send(
        catalogue.state.clone(),
        actix_test::TestRequest::delete().uri(&uri),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        catalogue.state.clone(),
        actix_test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("authorization", bearer.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        catalogue.state.clone(),
        actix_test::TestRequest::get().uri(&uri),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let provinces = catalogue
        .state
        .monuments
        .categories()
        .find_province_categories()
        .await
        .expect("provinces");
    assert!(provinces.iter().all(|entry| entry.monuments.is_empty()));
    let monument_id: MonumentId = id_of(&created).parse().expect("monument id");
    let images = catalogue
        .state
        .monuments
        .images()
        .images_for_monument(&monument_id)
        .await
        .expect("images");
    assert!(images.is_empty());
    let owner = catalogue.state.accounts.find(&user.id).await.expect("owner");
    assert_eq!(owner.record_count, 0);
}

#[rstest]
#[actix_web::test]
async fn delete_all_empties_the_catalogue(catalogue: TestCatalogue) {
    let (_, bearer) = homer(&catalogue.state).await;
    create_customs_house(&catalogue.state, &bearer, &["Georgian"]).await;
    create_customs_house(&catalogue.state, &bearer, &[]).await;

    let (status, _) = send(
        catalogue.state.clone(),
        actix_test::TestRequest::delete()
            .uri("/api/monuments")
            .insert_header(("authorization", bearer)),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(catalogue.state.monuments.list().await.expect("list").is_empty());
    let counts = catalogue.state.monuments.counts().await.expect("counts");
    assert_eq!(counts.monuments, 0);
    assert_eq!(counts.categories, 2);
}
