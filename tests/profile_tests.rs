mod test_utils;

use reqwest::{multipart, StatusCode};
use serde_json::{json, Value};
use test_data::*;
use test_utils::*;
use uuid::Uuid;

fn pdf_form(field: &str, bytes: &'static [u8], mime: &str) -> multipart::Form {
    let part = multipart::Part::bytes(bytes)
        .file_name("document.pdf")
        .mime_str(mime)
        .expect("valid mime");
    multipart::Form::new().part(field.to_string(), part)
}

#[actix_rt::test]
async fn partial_profile_updates_keep_other_fields() {
    let app = TestApp::spawn().await;
    let (student, _) = app.student().await;

    app.set_profile(&student, &json!({"roll_number": "21BCE1001", "cgpa": 8.25, "branch": "CSE", "course": "B.Tech"}))
        .await;
    app.set_profile(&student, &json!({"phone": "+91 98765 43210"})).await;

    let profile: Value = student.get(app.url("/api/profile")).send().await.unwrap().json().await.unwrap();
    assert_eq!(profile["cgpa"], "8.25");
    assert_eq!(profile["branch"], "CSE");
    assert_eq!(profile["phone"], "+91 98765 43210");

    app.set_profile(&student, &json!({"phone": null})).await;
    let profile: Value = student.get(app.url("/api/profile")).send().await.unwrap().json().await.unwrap();
    assert!(profile["phone"].is_null());
    assert_eq!(profile["roll_number"], "21BCE1001");
}

#[actix_rt::test]
async fn profile_rejects_out_of_range_grade() {
    let app = TestApp::spawn().await;
    let (student, _) = app.student().await;

    let response = student
        .patch(app.url("/api/profile"))
        .json(&json!({"cgpa": "12.5"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn roll_numbers_are_unique() {
    let app = TestApp::spawn().await;
    let (first, _) = app.student().await;
    let (second, _) = app.student().await;
    app.set_profile(&first, &json!({"roll_number": "21BCE0001"})).await;

    let response = second
        .patch(app.url("/api/profile"))
        .json(&json!({"roll_number": "21BCE0001"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn admin_reads_and_edits_student_profiles() {
    let app = TestApp::spawn().await;
    let (admin, admin_id) = app.admin().await;
    let (student, student_id) = app.student().await;
    app.set_profile(&student, &profile_payload("7.1", "IT", "B.Tech")).await;

    let path = format!("/api/students/{student_id}/profile");
    let profile: Value = admin.get(app.url(&path)).send().await.unwrap().json().await.unwrap();
    assert_eq!(profile["branch"], "IT");

    let updated: Value = admin
        .patch(app.url(&path))
        .json(&json!({"cgpa": "7.40"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["cgpa"], "7.40");
    assert_eq!(updated["branch"], "IT");

    let response = admin
        .get(app.url(&format!("/api/students/{admin_id}/profile")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = admin
        .get(app.url(&format!("/api/students/{}/profile", Uuid::new_v4())))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = student.get(app.url(&path)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn resume_upload_stores_pdf_and_serves_it_back() {
    let app = TestApp::spawn().await;
    let (student, _) = app.student().await;

    let response = student
        .post(app.url("/api/profile/resume"))
        .multipart(pdf_form("resume", PDF_BYTES, "application/pdf"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let file_url = body["file_url"].as_str().unwrap().to_string();
    assert!(file_url.starts_with("/uploads/resume-"));
    assert!(file_url.ends_with(".pdf"));

    let profile: Value = student.get(app.url("/api/profile")).send().await.unwrap().json().await.unwrap();
    assert_eq!(profile["resume_url"], file_url);

    let response = student.get(app.url(&file_url)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[reqwest::header::CONTENT_TYPE], "application/pdf");
    assert_eq!(response.bytes().await.unwrap().as_ref(), PDF_BYTES);

    let anonymous = app.client();
    let response = anonymous.get(app.url(&file_url)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn resume_upload_rejects_non_pdf() {
    let app = TestApp::spawn().await;
    let (student, _) = app.student().await;

    let response = student
        .post(app.url("/api/profile/resume"))
        .multipart(pdf_form("resume", b"plain text pretending", "text/plain"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = student
        .post(app.url("/api/profile/resume"))
        .multipart(pdf_form("resume", b"plain text pretending", "application/pdf"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let profile: Value = student.get(app.url("/api/profile")).send().await.unwrap().json().await.unwrap();
    assert!(profile["resume_url"].is_null());
}

#[actix_rt::test]
async fn oversized_upload_is_rejected() {
    let app = TestApp::spawn().await;
    let (student, _) = app.student().await;

    let mut big = PDF_BYTES.to_vec();
    big.resize(app.config.max_upload_bytes + 1, b' ');
    let part = multipart::Part::bytes(big).file_name("big.pdf").mime_str("application/pdf").unwrap();

    let response = student
        .post(app.url("/api/profile/resume"))
        .multipart(multipart::Form::new().part("resume", part))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[actix_rt::test]
async fn upload_paths_cannot_escape_the_store() {
    let app = TestApp::spawn().await;
    let (student, _) = app.student().await;

    for name in ["..%2F..%2Fetc%2Fpasswd", ".env", "cv%22.pdf"] {
        let response = student.get(app.url(&format!("/uploads/{name}"))).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{name}");
    }

    let response = student.get(app.url("/uploads/missing.pdf")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
