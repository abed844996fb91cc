//! Preset domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use prism_core::{PresetCategory, PresetId};

/// A preset: a purchasable digital asset bundle managed by the admin.
///
/// `file_path` and `image_paths` hold stored filenames under the uploads
/// directory; the server exposes them read-only at `/uploads/{name}`.
/// Field names serialize in camelCase to match the SPA's wire format.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Unique preset ID.
    pub id: PresetId,
    /// Display name.
    pub name: String,
    /// Longer description shown on the product page.
    pub description: String,
    /// One of the fixed category set.
    pub category: PresetCategory,
    /// Price display string (shown verbatim, e.g. "$12.99").
    pub price: String,
    /// Stored filename of the downloadable asset, if uploaded.
    pub file_path: Option<String>,
    /// Stored filenames of up to 4 preview images.
    pub image_paths: Vec<String>,
    /// When the preset was created.
    pub created_at: DateTime<Utc>,
    /// When the preset was last updated.
    pub updated_at: DateTime<Utc>,
}
