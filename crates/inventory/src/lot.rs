use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lotwise_core::{CategoryId, DomainError, DomainResult, Entity, LotId, parse_instant};

/// One purchase batch as recorded by the lot source.
///
/// Immutable once read. Numeric fields are taken as-is: a negative cost or
/// quantity is passed straight through aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLot {
    pub id: LotId,
    pub name: String,
    pub category: CategoryId,
    pub quantity: i64,
    pub unit_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for RawLot {
    type Id = LotId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Wire shape of a lot as the lot source serves it.
///
/// Timestamps stay strings until [`RawLotRecord::parse`]; unknown fields
/// (`averageUnitCost`, `currentSalePrice`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLotRecord {
    #[serde(rename = "_id")]
    pub id: LotId,
    pub name: String,
    pub category: CategoryId,
    pub quantity: i64,
    #[serde(rename = "unitCost")]
    pub unit_cost: Decimal,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl RawLotRecord {
    /// Convert to a [`RawLot`], parsing both timestamps into instants.
    pub fn parse(self) -> DomainResult<RawLot> {
        let created_at = parse_instant("createdAt", &self.created_at)?;
        let updated_at = parse_instant("updatedAt", &self.updated_at)?;
        Ok(RawLot {
            id: self.id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            unit_cost: self.unit_cost,
            created_at,
            updated_at,
        })
    }
}

/// Parse every record, failing on the first malformed one.
pub fn parse_records(records: impl IntoIterator<Item = RawLotRecord>) -> DomainResult<Vec<RawLot>> {
    records.into_iter().map(RawLotRecord::parse).collect()
}

/// A purchase form submission, validated and ready to hand to the lot source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLot {
    pub name: String,
    pub category: CategoryId,
    pub quantity: i64,
    #[serde(rename = "unitCost")]
    pub unit_cost: Decimal,
}

impl NewLot {
    /// Validate raw form input.
    pub fn validate(
        name: &str,
        category: &str,
        quantity: &str,
        unit_cost: &str,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let category = CategoryId::new(category.trim())
            .map_err(|_| DomainError::validation("category is required"))?;

        let quantity: i64 = quantity
            .trim()
            .parse()
            .map_err(|_| {
                DomainError::validation(format!("quantity is not a whole number: {quantity:?}"))
            })?;
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let unit_cost = Decimal::from_str(unit_cost.trim()).map_err(|_| {
            DomainError::validation(format!("unit cost is not a number: {unit_cost:?}"))
        })?;
        if unit_cost.is_sign_negative() {
            return Err(DomainError::validation("unit cost cannot be negative"));
        }

        Ok(Self {
            name: name.to_string(),
            category,
            quantity,
            unit_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(created: &str, updated: &str) -> RawLotRecord {
        RawLotRecord {
            id: LotId::new("lot-1").unwrap(),
            name: "Cafe".to_string(),
            category: CategoryId::new("c1").unwrap(),
            quantity: 12,
            unit_cost: Decimal::new(350, 2),
            created_at: created.to_string(),
            updated_at: updated.to_string(),
        }
    }

    #[test]
    fn parse_converts_timestamps_to_instants() {
        let lot = record("2024-05-01T10:00:00.000Z", "2024-05-02 09:15:00")
            .parse()
            .unwrap();
        assert_eq!(lot.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        assert_eq!(lot.updated_at, Utc.with_ymd_and_hms(2024, 5, 2, 9, 15, 0).unwrap());
        assert_eq!(lot.unit_cost, Decimal::new(35, 1));
    }

    #[test]
    fn parse_names_the_bad_field() {
        let err = record("2024-05-01", "N/A").parse().unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimestamp { field: "updatedAt", .. }));
    }

    #[test]
    fn parse_records_stops_on_first_failure() {
        let out = parse_records([record("2024-05-01", "2024-05-01"), record("soon", "2024-05-01")]);
        assert!(matches!(out, Err(DomainError::InvalidTimestamp { field: "createdAt", .. })));
    }

    #[test]
    fn deserializes_source_json_ignoring_derived_fields() {
        let json = r#"{
            "_id": "66aa01",
            "name": "Arroz",
            "category": "c7",
            "quantity": 40,
            "unitCost": 2.5,
            "averageUnitCost": 0,
            "currentSalePrice": 0,
            "createdAt": "2024-06-01T00:00:00.000Z",
            "updatedAt": "2024-06-03T00:00:00.000Z"
        }"#;
        let rec: RawLotRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id.as_str(), "66aa01");
        assert_eq!(rec.unit_cost, Decimal::new(25, 1));
        assert!(rec.parse().is_ok());
    }

    #[test]
    fn new_lot_accepts_trimmed_form_input() {
        let lot = NewLot::validate("  Azucar ", "c2", " 30", "1.75").unwrap();
        assert_eq!(lot.name, "Azucar");
        assert_eq!(lot.quantity, 30);
        assert_eq!(lot.unit_cost, Decimal::new(175, 2));
    }

    #[test]
    fn new_lot_rejects_bad_input() {
        for (name, cat, qty, cost) in [
            ("", "c1", "1", "1"),
            ("A", " ", "1", "1"),
            ("A", "c1", "0", "1"),
            ("A", "c1", "-3", "1"),
            ("A", "c1", "2.5", "1"),
            ("A", "c1", "1", "abc"),
            ("A", "c1", "1", "-0.01"),
        ] {
            let err = NewLot::validate(name, cat, qty, cost).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{name:?} {cat:?} {qty:?} {cost:?}");
        }
    }

    #[test]
    fn new_lot_serializes_as_form_body() {
        let lot = NewLot::validate("Sal", "c3", "5", "0.80").unwrap();
        let json = serde_json::to_value(&lot).unwrap();
        assert_eq!(json["name"], "Sal");
        assert_eq!(json["category"], "c3");
        assert_eq!(json["unitCost"], "0.80");
    }
}
