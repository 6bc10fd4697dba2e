use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lotwise_core::{CategoryId, Entity};

/// Colour used for a category that could not be resolved.
pub const UNRESOLVED_COLOR: &str = "transparent";

/// Luminance at or below which a background counts as dark.
const DARK_LUMINANCE_MAX: f64 = 0.5;

/// Category record as supplied by the lot source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    #[serde(rename = "categoryName")]
    pub name: String,
    /// Display colour, usually `#rrggbb`.
    #[serde(rename = "associatedColor")]
    pub color: String,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Outcome of looking a category identifier up.
///
/// A miss is a recoverable degradation, not an error: display falls back to
/// the raw identifier and grouping still proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryResolution<'a> {
    Hit(&'a Category),
    Miss,
}

/// Foreground tone to draw on top of a category colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTone {
    /// Light text, for dark backgrounds.
    Light,
    /// Dark text, for light or unknown backgrounds.
    Dark,
}

/// Resolved display fields for a lot's category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryDisplay {
    pub label: String,
    pub color: String,
    /// `false` when the label is the raw identifier because the lookup missed.
    pub resolved: bool,
}

impl CategoryDisplay {
    pub fn text_tone(&self) -> TextTone {
        match luminance(&self.color) {
            Some(l) if l <= DARK_LUMINANCE_MAX => TextTone::Light,
            _ => TextTone::Dark,
        }
    }
}

/// Relative luminance in `[0, 1]` of a `#rrggbb` colour.
fn luminance(color: &str) -> Option<f64> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok().map(f64::from);
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    Some((0.299 * r + 0.587 * g + 0.114 * b) / 255.0)
}

/// Read-only lookup table from category identifier to display fields.
///
/// Passed alongside lots for each aggregation pass; lots never hold a live
/// reference to a category.
#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    by_id: HashMap<CategoryId, Category>,
}

impl CategoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory. On duplicate identifiers the last record wins.
    pub fn from_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let by_id = categories
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        Self { by_id }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn resolve(&self, id: &CategoryId) -> CategoryResolution<'_> {
        match self.by_id.get(id) {
            Some(category) => CategoryResolution::Hit(category),
            None => CategoryResolution::Miss,
        }
    }

    /// Display fields for `id`, falling back to the raw identifier on a miss.
    pub fn display(&self, id: &CategoryId) -> CategoryDisplay {
        match self.resolve(id) {
            CategoryResolution::Hit(category) => CategoryDisplay {
                label: category.name.clone(),
                color: category.color.clone(),
                resolved: true,
            },
            CategoryResolution::Miss => {
                tracing::debug!(category_id = %id, "category lookup missed; using raw id");
                CategoryDisplay {
                    label: id.to_string(),
                    color: UNRESOLVED_COLOR.to_string(),
                    resolved: false,
                }
            }
        }
    }
}
