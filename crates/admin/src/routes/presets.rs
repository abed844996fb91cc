//! Preset management routes.
//!
//! All four endpoints require a bearer token. Create and update accept
//! `multipart/form-data` carrying text fields plus an optional `.lrtemplate`
//! asset (`file`) and up to four preview images (`images`). The whole form
//! is read and validated before anything is written to disk or the
//! database, so a rejected request leaves no orphaned files.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Serialize;
use serde_json::{Value, json};

use prism_core::{PresetCategory, PresetId};

use crate::{
    db::{NewPreset, PresetChanges, PresetRepository},
    error::AppError,
    middleware::RequireAuth,
    models::Preset,
    services::assets::{self, MAX_IMAGES, MAX_UPLOAD_BYTES, UploadedFile},
    state::AppState,
};

/// Body limit for multipart uploads: the preset file plus a full image set,
/// each at the per-file cap, with headroom for text fields.
const MULTIPART_BODY_LIMIT: usize = (MAX_IMAGES + 1) * MAX_UPLOAD_BYTES + 64 * 1024;

/// Build the presets router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/presets", get(list_presets).post(create_preset))
        .route("/api/presets/{id}", put(update_preset).delete(delete_preset))
        .layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT))
}

/// Response wrapper for a list of presets.
#[derive(Debug, Serialize)]
struct PresetListResponse {
    success: bool,
    presets: Vec<Preset>,
}

/// Response wrapper for a single preset.
#[derive(Debug, Serialize)]
struct PresetResponse {
    success: bool,
    preset: Preset,
}

/// GET /api/presets
async fn list_presets(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<PresetListResponse>, AppError> {
    let presets = PresetRepository::new(state.pool()).list().await?;

    Ok(Json(PresetListResponse {
        success: true,
        presets,
    }))
}

/// Fields collected from a preset multipart form. Create and update share
/// the shape; create additionally requires name and category.
#[derive(Debug, Default)]
struct PresetForm {
    name: Option<String>,
    description: Option<String>,
    category: Option<PresetCategory>,
    price: Option<String>,
    file: Option<UploadedFile>,
    images: Vec<UploadedFile>,
}

/// Drain a multipart request into a [`PresetForm`], buffering files in
/// memory. Unknown field names are ignored.
async fn read_preset_form(mut multipart: Multipart) -> Result<PresetForm, AppError> {
    let mut form = PresetForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "price" => form.price = Some(read_text(field).await?),
            "category" => {
                let raw = read_text(field).await?;
                let category = raw
                    .parse::<PresetCategory>()
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                form.category = Some(category);
            }
            "file" => form.file = Some(read_file(field).await?),
            "images" => form.images.push(read_file(field).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

async fn read_file(field: axum::extract::multipart::Field<'_>) -> Result<UploadedFile, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_owned();
    let content_type = field.content_type().map(ToOwned::to_owned);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(UploadedFile {
        file_name,
        content_type,
        bytes,
    })
}

/// Validate the form's uploads, then write them to disk. Returns the stored
/// filename of the preset asset (if any) and of each image.
async fn persist_uploads(
    state: &AppState,
    form: &PresetForm,
) -> Result<(Option<String>, Vec<String>), AppError> {
    if let Some(file) = &form.file {
        assets::validate_preset_file(file)?;
    }
    assets::validate_images(&form.images)?;

    let file_path = match &form.file {
        Some(file) => Some(state.assets().store(file).await?),
        None => None,
    };

    let mut image_paths = Vec::with_capacity(form.images.len());
    for image in &form.images {
        image_paths.push(state.assets().store(image).await?);
    }

    Ok((file_path, image_paths))
}

/// POST /api/presets
async fn create_preset(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PresetResponse>), AppError> {
    let form = read_preset_form(multipart).await?;

    let name = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Preset name is required".to_owned()))?
        .to_owned();
    let category = form
        .category
        .ok_or_else(|| AppError::Validation("Category is required".to_owned()))?;

    let (file_path, image_paths) = persist_uploads(&state, &form).await?;

    let preset = PresetRepository::new(state.pool())
        .create(NewPreset {
            name,
            description: form.description.unwrap_or_default(),
            category,
            price: form.price.unwrap_or_default(),
            file_path,
            image_paths,
        })
        .await?;

    tracing::info!(preset_id = %preset.id, name = %preset.name, "Created preset");
    Ok((
        StatusCode::CREATED,
        Json(PresetResponse {
            success: true,
            preset,
        }),
    ))
}

/// PUT /api/presets/{id}
///
/// Partial update: absent text fields keep their current value; supplying a
/// new asset file or any images replaces (and removes) the old ones.
async fn update_preset(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<PresetResponse>, AppError> {
    let id = PresetId::new(id);
    let repo = PresetRepository::new(state.pool());

    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("preset {id}")))?;

    let form = read_preset_form(multipart).await?;
    let (file_path, image_paths) = persist_uploads(&state, &form).await?;
    let images_replaced = !image_paths.is_empty();

    let preset = repo
        .update(
            id,
            PresetChanges {
                name: form.name.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty()),
                description: form.description,
                category: form.category,
                price: form.price,
                file_path,
                image_paths: images_replaced.then_some(image_paths),
            },
        )
        .await?;

    // Replaced assets are removed only after the row update succeeds.
    if form.file.is_some() {
        if let Some(old) = &existing.file_path {
            state.assets().remove(old).await;
        }
    }
    if images_replaced {
        for old in &existing.image_paths {
            state.assets().remove(old).await;
        }
    }

    tracing::info!(preset_id = %preset.id, "Updated preset");
    Ok(Json(PresetResponse {
        success: true,
        preset,
    }))
}

/// DELETE /api/presets/{id}
async fn delete_preset(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let id = PresetId::new(id);

    let deleted = PresetRepository::new(state.pool()).delete(id).await?;

    if let Some(file) = &deleted.file_path {
        state.assets().remove(file).await;
    }
    for image in &deleted.image_paths {
        state.assets().remove(image).await;
    }

    tracing::info!(preset_id = %id, "Deleted preset");
    Ok(Json(
        json!({ "success": true, "message": "Preset deleted" }),
    ))
}
