//! Costing and stock-badge tunables.

use core::str::FromStr;

use rust_decimal::Decimal;

use lotwise_core::{DomainError, DomainResult};

use crate::blend::{BIAS_FACTOR, CostBlender, MARKUP};

/// Positions with fewer units than this are critically low.
pub const CRITICAL_STOCK_BELOW: i64 = 100;

/// Positions with fewer units than this (but not critical) are low.
pub const LOW_STOCK_BELOW: i64 = 200;

pub const ENV_BIAS_FACTOR: &str = "LOTWISE_BIAS_FACTOR";
pub const ENV_MARKUP: &str = "LOTWISE_MARKUP";
pub const ENV_CRITICAL_STOCK_BELOW: &str = "LOTWISE_CRITICAL_STOCK_BELOW";
pub const ENV_LOW_STOCK_BELOW: &str = "LOTWISE_LOW_STOCK_BELOW";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostingConfig {
    pub bias_factor: Decimal,
    pub markup: Decimal,
    pub critical_stock_below: i64,
    pub low_stock_below: i64,
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            bias_factor: BIAS_FACTOR,
            markup: MARKUP,
            critical_stock_below: CRITICAL_STOCK_BELOW,
            low_stock_below: LOW_STOCK_BELOW,
        }
    }
}

impl CostingConfig {
    /// Read overrides from `LOTWISE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// A value that does not parse is ignored with a warning. If the combined
    /// result fails [`CostingConfig::validate`], the defaults are used instead.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let config = Self {
            bias_factor: read(&lookup, ENV_BIAS_FACTOR, defaults.bias_factor),
            markup: read(&lookup, ENV_MARKUP, defaults.markup),
            critical_stock_below: read(
                &lookup,
                ENV_CRITICAL_STOCK_BELOW,
                defaults.critical_stock_below,
            ),
            low_stock_below: read(&lookup, ENV_LOW_STOCK_BELOW, defaults.low_stock_below),
        };

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!(error = %e, "costing overrides rejected; using defaults");
                defaults
            }
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.bias_factor < Decimal::ZERO || self.bias_factor > Decimal::ONE {
            return Err(DomainError::validation("bias factor must be within [0, 1]"));
        }
        if self.markup < Decimal::ONE {
            return Err(DomainError::validation("markup cannot be below 1"));
        }
        if self.critical_stock_below > self.low_stock_below {
            return Err(DomainError::validation(
                "critical stock threshold cannot exceed low stock threshold",
            ));
        }
        Ok(())
    }

    pub fn blender(&self) -> CostBlender {
        CostBlender::new(self.bias_factor, self.markup)
    }
}

fn read<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable override");
            default
        }
    }
}
