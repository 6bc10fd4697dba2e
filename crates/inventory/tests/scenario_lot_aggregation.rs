use rust_decimal::Decimal;

use lotwise_catalog::{Category, CategoryDirectory};
use lotwise_inventory::{
    AggregationMode, CostingConfig, RawLotRecord, StockLevel, aggregate, parse_records, search,
};

const CATEGORIES: &str = r##"[
    {"_id": "c1", "categoryName": "Bebidas", "associatedColor": "#0d47a1"},
    {"_id": "c2", "categoryName": "Limpieza", "associatedColor": "#fff59d"}
]"##;

const LOTS: &str = r#"[
    {"_id": "l1", "name": "A", "category": "c1", "quantity": 10, "unitCost": 5,
     "createdAt": "2024-03-01T08:00:00.000Z", "updatedAt": "2024-03-01T08:00:00.000Z"},
    {"_id": "l2", "name": "Jabon", "category": "c2", "quantity": 150, "unitCost": "1.10",
     "createdAt": "2024-03-01T09:00:00.000Z", "updatedAt": "2024-03-04T09:00:00.000Z"},
    {"_id": "l3", "name": "A", "category": "c1", "quantity": 5, "unitCost": 9,
     "createdAt": "2024-03-02T08:00:00+00:00", "updatedAt": "2024-03-02 08:00:00"},
    {"_id": "l4", "name": "A", "category": "gone", "quantity": 1, "unitCost": 3,
     "createdAt": "2024-02-01", "updatedAt": "2024-02-01"}
]"#;

fn load() -> (Vec<lotwise_inventory::RawLot>, CategoryDirectory) {
    let records: Vec<RawLotRecord> = serde_json::from_str(LOTS).unwrap();
    let categories: Vec<Category> = serde_json::from_str(CATEGORIES).unwrap();
    (
        parse_records(records).unwrap(),
        CategoryDirectory::from_categories(categories),
    )
}

#[test]
fn inventory_display_pass_from_source_json() {
    let (lots, dir) = load();
    let positions = aggregate(&lots, &dir, AggregationMode::Cost);

    assert_eq!(positions.len(), 3);

    let a = &positions[0];
    assert_eq!((a.name.as_str(), a.category.label.as_str()), ("A", "Bebidas"));
    assert_eq!(a.quantity, 15);
    assert_eq!(a.most_expensive_unit_cost, Decimal::from(9));
    assert_eq!(a.average_unit_cost, Decimal::new(75, 1));
    assert_eq!(a.current_sale_price, Decimal::from(9));
    assert_eq!(a.created_at, lots[0].created_at);
    assert_eq!(a.updated_at, lots[2].updated_at);

    let jabon = &positions[1];
    assert_eq!(jabon.current_sale_price, Decimal::new(132, 2));
    assert_eq!(jabon.stock_level(&CostingConfig::default()), StockLevel::Low);

    let orphan = &positions[2];
    assert_eq!(orphan.name, "A");
    assert_eq!(orphan.category.label, "gone");
    assert_eq!(orphan.category.color, "transparent");
    assert_eq!(orphan.quantity, 1);
}

#[test]
fn sell_flow_pass_keeps_latest_cost() {
    let (lots, dir) = load();
    let positions = aggregate(&lots, &dir, AggregationMode::Sum);
    let a = &positions[0];
    assert_eq!(a.quantity, 15);
    assert_eq!(a.unit_cost, Decimal::from(9));
    assert_eq!(a.current_sale_price, Decimal::from(9));
}

#[test]
fn both_modes_share_one_key_space() {
    let (lots, dir) = load();
    let cost: Vec<_> = aggregate(&lots, &dir, AggregationMode::Cost)
        .iter()
        .map(|p| p.key())
        .collect();
    let sum: Vec<_> = aggregate(&lots, &dir, AggregationMode::Sum)
        .iter()
        .map(|p| p.key())
        .collect();
    assert_eq!(cost, sum);
}

#[test]
fn reaggregation_is_a_pure_snapshot() {
    let (lots, dir) = load();
    let first = aggregate(&lots, &dir, AggregationMode::Cost);
    let second = aggregate(&lots, &dir, AggregationMode::Cost);
    assert_eq!(first, second);
}

#[test]
fn search_over_display_positions() {
    let (lots, dir) = load();
    let positions = aggregate(&lots, &dir, AggregationMode::Cost);
    let hits = search(&positions, "Limp");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Jabon");
}
