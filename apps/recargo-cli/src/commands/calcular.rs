//! # calcular
//!
//! Resolves a plan in the catalog and prints the full breakdown. With
//! `--auto` the surcharge is first solved with the full pipeline, then the
//! breakdown runs at that surcharge.

use chrono::{DateTime, Utc};
use clap::Args;
use recargo_core::{CalcRequest, Catalog, CoreError};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::CliError;
use crate::output::{CalculationReport, Report};

#[derive(Debug, Clone, Args)]
pub struct CalcularArgs {
    /// Plan id
    #[arg(long)]
    pub plan: u32,

    /// Cash amount
    #[arg(long)]
    pub monto: Decimal,

    /// Customer surcharge in percent (20 = 20%)
    #[arg(long, conflicts_with = "auto")]
    pub recargo: Option<Decimal>,

    /// Solve the surcharge automatically
    #[arg(long)]
    pub auto: bool,

    /// Installments (defaults to the plan's)
    #[arg(long)]
    pub cuotas: Option<u32>,

    /// Evaluate validity windows at this instant (RFC 3339) instead of now
    #[arg(long)]
    pub fecha: Option<DateTime<Utc>>,
}

pub fn run(args: &CalcularArgs, catalog: &Catalog, now: DateTime<Utc>) -> Result<Report, CliError> {
    let plan = catalog
        .plan(args.plan)
        .ok_or(CoreError::PlanNotFound(args.plan))?;

    let (recargo_cliente_pct, recargo_auto) = if args.auto {
        let pct = catalog.auto_surcharge_for_plan(args.monto, args.plan)?;
        info!(plan_id = args.plan, percent = pct, "Surcharge solved");
        (Decimal::from(pct) / Decimal::ONE_HUNDRED, Some(pct))
    } else {
        (
            args.recargo.unwrap_or_default() / Decimal::ONE_HUNDRED,
            None,
        )
    };

    let request = CalcRequest {
        plan_id: args.plan,
        monto_efectivo: args.monto,
        recargo_cliente_pct,
        cuotas: args.cuotas.unwrap_or(plan.rates.cuotas),
    };
    let calculation = catalog.calculate(&request, args.fecha.unwrap_or(now))?;

    Ok(Report::Calculation(CalculationReport {
        calculation,
        recargo_auto,
    }))
}
