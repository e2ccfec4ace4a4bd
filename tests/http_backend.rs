//! HttpBackend against a mock allocation server

use staffing::api::{AllocationBackend, HttpBackend};
use staffing::config::ServerSettings;
use staffing::error::StaffingError;
use staffing::form::{CollaboratorForm, FormKind, StagedRow};
use staffing::models::{AllocationRow, AssignmentId, Matricule, ProfileId};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// The blocking client owns a runtime of its own, so it is built and dropped
// off the test's async threads.
async fn blocking<T, F>(server: &MockServer, call: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&HttpBackend) -> T + Send + 'static,
{
    let base_url = server.uri();
    tokio::task::spawn_blocking(move || {
        let backend = HttpBackend::new(&ServerSettings {
            base_url,
            request_timeout_secs: Some(5),
        })
        .unwrap();
        call(&backend)
    })
    .await
    .unwrap()
}

fn filled_form(kind: FormKind) -> CollaboratorForm {
    let mut form = CollaboratorForm::new(kind);
    form.matricule = "M001".into();
    form.nom = "DUPONT".into();
    form.prenom = "Jeanne".into();
    form.profile = Some(ProfileId::new(2));
    form.assignment = Some(AssignmentId::new(5));
    form.base_hours = "1600".into();
    form.build = "60".into();
    form.run = "40".into();
    form.secondary
        .table
        .push(StagedRow::new(ProfileId::new(7), "QA", "10", "5"));
    form
}

#[tokio::test(flavor = "multi_thread")]
async fn fetches_rows_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collaborateurs/repartition/get/M001"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"repartitions": [
                {"profil_id": 1, "profil_nom": "A", "pourcentage_build": 10, "pourcentage_run": 5},
                {"profil_id": 3, "profil_nom": null, "pourcentage_build": 0, "pourcentage_run": 20}
            ]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let rows = blocking(&server, |b| b.fetch_repartitions(&Matricule::new("M001")))
        .await
        .unwrap();

    assert_eq!(
        rows,
        vec![
            AllocationRow::new(ProfileId::new(1), "A", 10.0, 5.0),
            AllocationRow::new(ProfileId::new(3), "Profile #3", 0.0, 20.0),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_list_yields_no_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collaborateurs/repartition/get/M002"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"repartitions": []}"#))
        .mount(&server)
        .await;

    let rows = blocking(&server, |b| b.fetch_repartitions(&Matricule::new("M002")))
        .await
        .unwrap();

    assert!(rows.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = blocking(&server, |b| b.fetch_repartitions(&Matricule::new("M001"))).await;

    assert!(matches!(result, Err(StaffingError::Http(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_a_schema_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = blocking(&server, |b| b.fetch_repartitions(&Matricule::new("M001"))).await;

    assert!(matches!(result, Err(StaffingError::Schema(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_form_posts_rows_and_accepts_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/collaborateurs/ajouter"))
        .and(body_string_contains("matricule=M001"))
        .and(body_string_contains("rep_profil_id%5B%5D=7"))
        .and(body_string_contains("rep_build%5B%5D=10"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/collaborateurs"))
        .expect(1)
        .mount(&server)
        .await;

    let submission = filled_form(FormKind::Add).prepare_submission().unwrap();
    let receipt = blocking(&server, move |b| b.submit(&submission)).await.unwrap();

    assert_eq!(receipt.status, 302);
    assert_eq!(receipt.location.as_deref(), Some("/collaborateurs"));
}

#[tokio::test(flavor = "multi_thread")]
async fn edit_form_posts_to_the_matricule() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/collaborateurs/modifier/M001"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let submission = filled_form(FormKind::Edit).prepare_submission().unwrap();
    assert!(submission.values("matricule").is_empty());

    let receipt = blocking(&server, move |b| b.submit(&submission)).await.unwrap();

    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.location, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_post_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let submission = filled_form(FormKind::Add).prepare_submission().unwrap();
    let result = blocking(&server, move |b| b.submit(&submission)).await;

    assert!(matches!(result, Err(StaffingError::Http(_))));
}
