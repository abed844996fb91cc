//! Integration tests for preset management.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The admin server running (cargo run -p prism-admin)
//! - A seeded test account (prism-cli user create)
//!
//! Run with: cargo test -p prism-integration-tests -- --ignored

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use uuid::Uuid;

use prism_integration_tests::TestContext;

fn lrtemplate_part() -> Part {
    Part::bytes(b"s = { id = \"test\" }".to_vec())
        .file_name("moody-sunset.lrtemplate")
        .mime_str("application/octet-stream")
        .expect("mime")
}

fn image_part(name: &str) -> Part {
    // A minimal JPEG header is enough; the server checks content type, not
    // image validity.
    Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
        .file_name(name.to_owned())
        .mime_str("image/jpeg")
        .expect("mime")
}

fn preset_form(name: &str) -> Form {
    Form::new()
        .text("name", name.to_owned())
        .text("description", "Warm golden hour tones")
        .text("category", "portrait")
        .text("price", "$12.99")
        .part("file", lrtemplate_part())
        .part("images", image_part("preview1.jpg"))
}

async fn create_preset(ctx: &TestContext, name: &str) -> Value {
    let resp = ctx
        .client
        .post(format!("{}/api/presets", ctx.base_url))
        .bearer_auth(&ctx.token)
        .multipart(preset_form(name))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("JSON body")
}

// ============================================================================
// CRUD
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_create_list_update_delete_roundtrip() {
    let ctx = TestContext::login().await;
    let name = format!("Test Preset {}", Uuid::new_v4());

    // Create
    let created = create_preset(&ctx, &name).await;
    assert_eq!(created["success"], json!(true));
    let preset = &created["preset"];
    let id = preset["id"].as_i64().expect("preset id");
    assert_eq!(preset["name"], json!(name));
    assert_eq!(preset["category"], json!("portrait"));
    assert!(preset["filePath"].as_str().is_some_and(|p| p.ends_with(".lrtemplate")));
    assert_eq!(preset["imagePaths"].as_array().map(Vec::len), Some(1));

    // List includes it, newest first
    let resp = ctx.get("/api/presets").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed: Value = resp.json().await.expect("JSON body");
    let names: Vec<&str> = listed["presets"]
        .as_array()
        .expect("presets array")
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert!(names.contains(&name.as_str()));

    // Partial update: change price only, nothing else moves
    let resp = ctx
        .client
        .put(format!("{}/api/presets/{id}", ctx.base_url))
        .bearer_auth(&ctx.token)
        .multipart(Form::new().text("price", "$9.99"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("JSON body");
    assert_eq!(updated["preset"]["price"], json!("$9.99"));
    assert_eq!(updated["preset"]["name"], json!(name));

    // Delete, then the row is gone
    let resp = ctx.delete(&format!("/api/presets/{id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx.delete(&format!("/api/presets/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_stored_asset_is_served() {
    let ctx = TestContext::login().await;
    let name = format!("Served Preset {}", Uuid::new_v4());

    let created = create_preset(&ctx, &name).await;
    let id = created["preset"]["id"].as_i64().expect("preset id");
    let image = created["preset"]["imagePaths"][0]
        .as_str()
        .expect("stored image name");

    let resp = ctx
        .client
        .get(format!("{}/uploads/{image}", ctx.base_url))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    ctx.delete(&format!("/api/presets/{id}")).await;
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_create_requires_name_and_category() {
    let ctx = TestContext::login().await;

    let resp = ctx
        .client
        .post(format!("{}/api/presets", ctx.base_url))
        .bearer_auth(&ctx.token)
        .multipart(Form::new().text("description", "no name"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_wrong_file_extension_rejected() {
    let ctx = TestContext::login().await;

    let bad_file = Part::bytes(b"zipzip".to_vec())
        .file_name("archive.zip")
        .mime_str("application/zip")
        .expect("mime");
    let form = Form::new()
        .text("name", "Bad File")
        .text("category", "portrait")
        .part("file", bad_file);

    let resp = ctx
        .client
        .post(format!("{}/api/presets", ctx.base_url))
        .bearer_auth(&ctx.token)
        .multipart(form)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("JSON body");
    assert_eq!(body["message"], json!("Only .lrtemplate files are allowed"));
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_too_many_images_rejected() {
    let ctx = TestContext::login().await;

    let mut form = Form::new()
        .text("name", "Too Many Images")
        .text("category", "landscape");
    for i in 0..5 {
        form = form.part("images", image_part(&format!("preview{i}.jpg")));
    }

    let resp = ctx
        .client
        .post(format!("{}/api/presets", ctx.base_url))
        .bearer_auth(&ctx.token)
        .multipart(form)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("JSON body");
    assert_eq!(body["message"], json!("Maximum 4 images allowed"));
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_non_image_preview_rejected() {
    let ctx = TestContext::login().await;

    let not_an_image = Part::bytes(b"%PDF-1.4".to_vec())
        .file_name("notes.pdf")
        .mime_str("application/pdf")
        .expect("mime");
    let form = Form::new()
        .text("name", "Bad Preview")
        .text("category", "vintage")
        .part("images", not_an_image);

    let resp = ctx
        .client
        .post(format!("{}/api/presets", ctx.base_url))
        .bearer_auth(&ctx.token)
        .multipart(form)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_unknown_category_rejected() {
    let ctx = TestContext::login().await;

    let form = Form::new().text("name", "Weird Category").text("category", "abstract");

    let resp = ctx
        .client
        .post(format!("{}/api/presets", ctx.base_url))
        .bearer_auth(&ctx.token)
        .multipart(form)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
