use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use lotwise_catalog::{Category, CategoryDirectory, TextTone};
use lotwise_inventory::{
    AggregatedPosition, AggregationMode, Aggregator, CostingConfig, RawLot, RawLotRecord,
    StockLevel, find_position_mut, parse_records, search,
};
use lotwise_sales::{InMemorySaleLedger, SaleRecord, sell_and_record};

/// Source snapshot files.
#[derive(Debug, Clone, Args)]
pub struct Inputs {
    /// JSON array of lot records
    #[arg(long)]
    pub lots: PathBuf,

    /// JSON array of category records
    #[arg(long)]
    pub categories: PathBuf,
}

/// A position plus its display badges.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    #[serde(flatten)]
    pub position: AggregatedPosition,
    pub stock_level: StockLevel,
    pub text_tone: TextTone,
}

impl PositionView {
    fn new(position: AggregatedPosition, config: &CostingConfig) -> Self {
        Self {
            stock_level: position.stock_level(config),
            text_tone: position.category.text_tone(),
            position,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SellOutcome {
    pub sale: SaleRecord,
    pub remaining: PositionView,
}

pub fn load_lots(path: &Path) -> Result<Vec<RawLot>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading lots from {}", path.display()))?;
    let records: Vec<RawLotRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing lots in {}", path.display()))?;
    Ok(parse_records(records)?)
}

pub fn load_categories(path: &Path) -> Result<CategoryDirectory> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading categories from {}", path.display()))?;
    let categories: Vec<Category> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing categories in {}", path.display()))?;
    Ok(CategoryDirectory::from_categories(categories))
}

fn load(
    input: &Inputs,
    mode: AggregationMode,
    config: &CostingConfig,
) -> Result<Vec<AggregatedPosition>> {
    let lots = load_lots(&input.lots)?;
    let categories = load_categories(&input.categories)?;
    Ok(Aggregator::new(config).aggregate(&lots, &categories, mode))
}

pub fn aggregate(
    input: &Inputs,
    mode: AggregationMode,
    term: Option<&str>,
    config: &CostingConfig,
) -> Result<Vec<PositionView>> {
    let positions = load(input, mode, config)?;
    let kept = search(&positions, term.unwrap_or(""));
    Ok(kept
        .into_iter()
        .map(|p| PositionView::new(p.clone(), config))
        .collect())
}

pub fn sell(
    input: &Inputs,
    name: &str,
    category: &str,
    quantity: i64,
    price: Option<Decimal>,
    config: &CostingConfig,
) -> Result<SellOutcome> {
    let mut positions = load(input, AggregationMode::Sum, config)?;
    let position = find_position_mut(&mut positions, name, category)
        .ok_or_else(|| anyhow!("no stock for {name:?} in category {category:?}"))?;

    let price = price.unwrap_or(position.current_sale_price);
    let ledger = InMemorySaleLedger::new();
    let sale = sell_and_record(position, quantity, price, Utc::now(), &ledger)?;

    Ok(SellOutcome {
        sale,
        remaining: PositionView::new(position.clone(), config),
    })
}
