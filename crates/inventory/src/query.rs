//! Lookups over an aggregated snapshot.

use crate::position::AggregatedPosition;

/// Positions whose name or category label contains `term`.
///
/// Case-sensitive substring match. A blank term keeps everything. Order is
/// preserved.
pub fn search<'a>(positions: &'a [AggregatedPosition], term: &str) -> Vec<&'a AggregatedPosition> {
    let term = term.trim();
    positions
        .iter()
        .filter(|p| term.is_empty() || p.name.contains(term) || p.category.label.contains(term))
        .collect()
}

pub fn find_position<'a>(
    positions: &'a [AggregatedPosition],
    name: &str,
    category_label: &str,
) -> Option<&'a AggregatedPosition> {
    positions
        .iter()
        .find(|p| p.name == name && p.category.label == category_label)
}

pub fn find_position_mut<'a>(
    positions: &'a mut [AggregatedPosition],
    name: &str,
    category_label: &str,
) -> Option<&'a mut AggregatedPosition> {
    positions
        .iter_mut()
        .find(|p| p.name == name && p.category.label == category_label)
}

/// Whether a group with this name and category label is already stocked.
pub fn group_exists(positions: &[AggregatedPosition], name: &str, category_label: &str) -> bool {
    find_position(positions, name, category_label).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lotwise_catalog::CategoryDisplay;
    use lotwise_core::LotId;
    use rust_decimal::Decimal;

    fn position(name: &str, label: &str) -> AggregatedPosition {
        let now = Utc::now();
        AggregatedPosition {
            id: LotId::new(format!("{name}-{label}")).unwrap(),
            name: name.to_string(),
            category: CategoryDisplay {
                label: label.to_string(),
                color: "#000000".to_string(),
                resolved: true,
            },
            quantity: 10,
            unit_cost: Decimal::ONE,
            average_unit_cost: Decimal::ONE,
            current_sale_price: Decimal::ONE,
            most_expensive_unit_cost: Decimal::ONE,
            most_expensive_lot: LotId::new("x").unwrap(),
            lot_count: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn snapshot() -> Vec<AggregatedPosition> {
        vec![
            position("Cafe molido", "Granos"),
            position("Leche", "Lacteos"),
            position("Cafe en grano", "Granos"),
        ]
    }

    #[test]
    fn search_matches_name_or_category_in_order() {
        let all = snapshot();
        let hits: Vec<_> = search(&all, "Cafe").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(hits, vec!["Cafe molido", "Cafe en grano"]);

        let hits: Vec<_> = search(&all, "Lact").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(hits, vec!["Leche"]);
    }

    #[test]
    fn search_is_case_sensitive_and_blank_keeps_all() {
        let all = snapshot();
        assert!(search(&all, "cafe").is_empty());
        assert_eq!(search(&all, "  ").len(), 3);
    }

    #[test]
    fn find_and_exists_need_both_name_and_category() {
        let mut all = snapshot();
        assert!(group_exists(&all, "Leche", "Lacteos"));
        assert!(!group_exists(&all, "Leche", "Granos"));
        assert_eq!(find_position(&all, "Cafe molido", "Granos").unwrap().quantity, 10);

        find_position_mut(&mut all, "Leche", "Lacteos").unwrap().quantity = 3;
        assert_eq!(find_position(&all, "Leche", "Lacteos").unwrap().quantity, 3);
    }
}
