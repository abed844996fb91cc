//! Preset repository for database operations.

use sqlx::PgPool;

use prism_core::{PresetCategory, PresetId};

use super::RepositoryError;
use crate::models::Preset;

const RETURNING_PRESET: &str = r"
    RETURNING id, name, description, category, price, file_path, image_paths,
              created_at, updated_at
";

/// Fields for creating a preset. Asset paths are the stored filenames,
/// already written to disk by the asset store.
#[derive(Debug)]
pub struct NewPreset {
    pub name: String,
    pub description: String,
    pub category: PresetCategory,
    pub price: String,
    pub file_path: Option<String>,
    pub image_paths: Vec<String>,
}

/// Partial update of a preset; `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct PresetChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<PresetCategory>,
    pub price: Option<String>,
    /// Replacement asset file (the previous one is removed by the caller).
    pub file_path: Option<String>,
    /// Replacement image set (the previous ones are removed by the caller).
    pub image_paths: Option<Vec<String>>,
}

impl PresetChanges {
    /// True when the update carries nothing to change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.file_path.is_none()
            && self.image_paths.is_none()
    }
}

/// Repository for preset database operations.
pub struct PresetRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PresetRepository<'a> {
    /// Create a new preset repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all presets, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Preset>, RepositoryError> {
        let presets = sqlx::query_as::<_, Preset>(
            r"
            SELECT id, name, description, category, price, file_path, image_paths,
                   created_at, updated_at
            FROM presets
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(presets)
    }

    /// Get a preset by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: PresetId) -> Result<Option<Preset>, RepositoryError> {
        let preset = sqlx::query_as::<_, Preset>(
            r"
            SELECT id, name, description, category, price, file_path, image_paths,
                   created_at, updated_at
            FROM presets
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(preset)
    }

    /// Create a new preset.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: NewPreset) -> Result<Preset, RepositoryError> {
        let preset = sqlx::query_as::<_, Preset>(&format!(
            r"
            INSERT INTO presets (name, description, category, price, file_path, image_paths)
            VALUES ($1, $2, $3, $4, $5, $6)
            {RETURNING_PRESET}
            "
        ))
        .bind(new.name)
        .bind(new.description)
        .bind(new.category)
        .bind(new.price)
        .bind(new.file_path)
        .bind(new.image_paths)
        .fetch_one(self.pool)
        .await?;

        Ok(preset)
    }

    /// Apply a partial update to a preset.
    ///
    /// Reads the current row, merges the supplied changes, and writes the
    /// result back. Returns the updated preset.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the preset doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: PresetId,
        changes: PresetChanges,
    ) -> Result<Preset, RepositoryError> {
        let current = self.get(id).await?.ok_or(RepositoryError::NotFound)?;

        let preset = sqlx::query_as::<_, Preset>(&format!(
            r"
            UPDATE presets
            SET name = $1, description = $2, category = $3, price = $4,
                file_path = $5, image_paths = $6, updated_at = now()
            WHERE id = $7
            {RETURNING_PRESET}
            "
        ))
        .bind(changes.name.unwrap_or(current.name))
        .bind(changes.description.unwrap_or(current.description))
        .bind(changes.category.unwrap_or(current.category))
        .bind(changes.price.unwrap_or(current.price))
        .bind(changes.file_path.or(current.file_path))
        .bind(changes.image_paths.unwrap_or(current.image_paths))
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(preset)
    }

    /// Delete a preset, returning the deleted row so the caller can clean
    /// up its stored files.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the preset doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: PresetId) -> Result<Preset, RepositoryError> {
        let preset = sqlx::query_as::<_, Preset>(&format!(
            r"
            DELETE FROM presets
            WHERE id = $1
            {RETURNING_PRESET}
            "
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_changes() {
        assert!(PresetChanges::default().is_empty());

        let changes = PresetChanges {
            price: Some("$9.99".to_owned()),
            ..PresetChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
