//! Status and category enums.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Preset category.
///
/// The admin UI offers a fixed set of categories; anything else is a
/// validation error. Stored in Postgres as the `preset_category` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "preset_category", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PresetCategory {
    Portrait,
    Landscape,
    Cinematic,
    BlackAndWhite,
    Vintage,
}

impl PresetCategory {
    /// All categories, in the order the admin UI presents them.
    pub const ALL: [Self; 5] = [
        Self::Portrait,
        Self::Landscape,
        Self::Cinematic,
        Self::BlackAndWhite,
        Self::Vintage,
    ];

    /// Human-readable label, matching the admin UI.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Portrait => "Portrait",
            Self::Landscape => "Landscape",
            Self::Cinematic => "Cinematic",
            Self::BlackAndWhite => "Black & White",
            Self::Vintage => "Vintage",
        }
    }
}

impl fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a category string is not one of the fixed set.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown preset category: {0}")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for PresetCategory {
    type Err = UnknownCategory;

    /// Accepts both the UI labels ("Black & White") and the wire form
    /// ("black_and_white"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            "cinematic" => Ok(Self::Cinematic),
            "black & white" | "black_and_white" => Ok(Self::BlackAndWhite),
            "vintage" => Ok(Self::Vintage),
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}

/// Order status.
///
/// Orders are created by the storefront purchase flow; the admin API only
/// reads them. Stored in Postgres as the `order_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}
