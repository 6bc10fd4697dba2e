//! Identity keying: which lots belong to the same group.

use lotwise_catalog::{CategoryDirectory, CategoryDisplay};
use lotwise_core::{CategoryId, ValueObject};

use crate::lot::RawLot;

/// Category component of a [`GroupKey`].
///
/// A resolved label and an unresolved raw identifier never compare equal, even
/// when their text matches, so a lookup miss always forms its own group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Resolved(String),
    Unresolved(CategoryId),
}

/// Grouping identity of a lot: `(product name, resolved category)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    name: String,
    category: CategoryKey,
}

impl ValueObject for GroupKey {}

impl GroupKey {
    pub fn new(name: impl Into<String>, category: CategoryKey) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Key for a lot whose category has already been looked up.
    pub fn from_display(name: &str, raw_category: &CategoryId, display: &CategoryDisplay) -> Self {
        let category = if display.resolved {
            CategoryKey::Resolved(display.label.clone())
        } else {
            CategoryKey::Unresolved(raw_category.clone())
        };
        Self::new(name, category)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &CategoryKey {
        &self.category
    }
}

/// Resolve a lot's category and derive its key in one lookup.
pub fn identify(lot: &RawLot, categories: &CategoryDirectory) -> (GroupKey, CategoryDisplay) {
    let display = categories.display(&lot.category);
    let key = GroupKey::from_display(&lot.name, &lot.category, &display);
    (key, display)
}

/// Grouping key of a lot.
pub fn key(lot: &RawLot, categories: &CategoryDirectory) -> GroupKey {
    identify(lot, categories).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lotwise_catalog::Category;
    use lotwise_core::LotId;
    use rust_decimal::Decimal;

    fn lot(id: &str, name: &str, category: &str) -> RawLot {
        let now = Utc::now();
        RawLot {
            id: LotId::new(id).unwrap(),
            name: name.to_string(),
            category: CategoryId::new(category).unwrap(),
            quantity: 1,
            unit_cost: Decimal::ONE,
            created_at: now,
            updated_at: now,
        }
    }

    fn directory() -> CategoryDirectory {
        CategoryDirectory::from_categories([
            Category {
                id: CategoryId::new("c1").unwrap(),
                name: "Lacteos".to_string(),
                color: "#ffffff".to_string(),
            },
            Category {
                id: CategoryId::new("c1-legacy").unwrap(),
                name: "Lacteos".to_string(),
                color: "#eeeeee".to_string(),
            },
        ])
    }

    #[test]
    fn same_name_and_category_share_a_key() {
        let dir = directory();
        assert_eq!(key(&lot("a", "Leche", "c1"), &dir), key(&lot("b", "Leche", "c1"), &dir));
    }

    #[test]
    fn key_is_by_resolved_label_not_raw_id() {
        let dir = directory();
        assert_eq!(
            key(&lot("a", "Leche", "c1"), &dir),
            key(&lot("b", "Leche", "c1-legacy"), &dir)
        );
    }

    #[test]
    fn different_names_split() {
        let dir = directory();
        assert_ne!(key(&lot("a", "Leche", "c1"), &dir), key(&lot("b", "Queso", "c1"), &dir));
    }

    #[test]
    fn miss_never_collides_with_a_resolved_label() {
        let dir = directory();
        // Raw id text equals a real category's label.
        let missed = key(&lot("a", "Leche", "Lacteos"), &dir);
        let resolved = key(&lot("b", "Leche", "c1"), &dir);
        assert_ne!(missed, resolved);
        assert!(matches!(
            missed.category(),
            CategoryKey::Unresolved(id) if id.as_str() == "Lacteos"
        ));
    }

    #[test]
    fn identify_returns_display_for_the_same_lookup() {
        let dir = directory();
        let (k, display) = identify(&lot("a", "Leche", "zz"), &dir);
        assert_eq!(k.name(), "Leche");
        assert_eq!(display.label, "zz");
        assert!(!display.resolved);
    }
}
