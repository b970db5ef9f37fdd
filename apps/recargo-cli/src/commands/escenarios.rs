//! # escenarios
//!
//! Net amount for each whole surcharge percentage, so the operator can
//! see where the net crosses the cash amount.

use clap::Args;
use recargo_core::{Catalog, ScenarioRange};
use rust_decimal::Decimal;

use crate::error::CliError;
use crate::output::{Report, ScenarioReport};

#[derive(Debug, Clone, Args)]
pub struct EscenariosArgs {
    /// Plan id
    #[arg(long)]
    pub plan: u32,

    /// Cash amount
    #[arg(long)]
    pub monto: Decimal,

    /// First percentage
    #[arg(long, default_value_t = 0)]
    pub min: u32,

    /// Last percentage (inclusive)
    #[arg(long, default_value_t = 20)]
    pub max: u32,
}

pub fn run(args: &EscenariosArgs, catalog: &Catalog) -> Result<Report, CliError> {
    let range = ScenarioRange {
        min: args.min,
        max: args.max,
    };
    let escenarios = catalog.scenarios_for_plan(args.monto, args.plan, range)?;
    Ok(Report::Scenarios(ScenarioReport {
        plan_id: args.plan,
        monto_efectivo: args.monto,
        escenarios,
    }))
}
