use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use lotwise_inventory::{AggregationMode, CostingConfig};

mod commands;

#[derive(Parser)]
#[command(name = "lotwise")]
#[command(about = "Lot aggregation and costing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold lots into positions and print them as JSON lines
    Aggregate {
        #[command(flatten)]
        input: commands::Inputs,

        /// cost: weighted average + sale price; sum: latest cost only
        #[arg(long, value_enum, default_value_t = ModeArg::Cost)]
        mode: ModeArg,

        /// Keep only positions whose name or category contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Settle a sale against a position (aggregated in sum mode)
    Sell {
        #[command(flatten)]
        input: commands::Inputs,

        /// Product name
        #[arg(long)]
        name: String,

        /// Category label as displayed
        #[arg(long)]
        category: String,

        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,

        /// Unit sale price; defaults to the position's current price
        #[arg(long)]
        price: Option<Decimal>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Cost,
    Sum,
}

impl From<ModeArg> for AggregationMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Cost => AggregationMode::Cost,
            ModeArg::Sum => AggregationMode::Sum,
        }
    }
}

fn main() -> Result<()> {
    lotwise_observability::init_with_default("warn");

    let config = CostingConfig::from_env();
    tracing::debug!(?config, "costing configuration");
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Aggregate {
            input,
            mode,
            search,
        } => {
            let views = commands::aggregate(&input, mode.into(), search.as_deref(), &config)?;
            for view in &views {
                println!("{}", serde_json::to_string(view)?);
            }
        }
        Commands::Sell {
            input,
            name,
            category,
            quantity,
            price,
        } => {
            let outcome = commands::sell(&input, &name, &category, quantity, price, &config)?;
            println!("{}", serde_json::to_string(&outcome)?);
        }
    }

    Ok(())
}
