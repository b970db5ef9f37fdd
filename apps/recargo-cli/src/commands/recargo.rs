//! # recargo
//!
//! Prints the smallest whole surcharge that keeps the net at the cash
//! amount. The full pipeline is the default; `--simplificado` switches to
//! the shortcut formula, which also charges the real financing cost of
//! multi-installment plans.

use clap::Args;
use recargo_core::Catalog;
use rust_decimal::Decimal;

use crate::error::CliError;
use crate::output::{Report, SolverMethod, SurchargeReport};

#[derive(Debug, Clone, Args)]
pub struct RecargoArgs {
    /// Plan id
    #[arg(long)]
    pub plan: u32,

    /// Cash amount
    #[arg(long)]
    pub monto: Decimal,

    /// Use the simplified net formula
    #[arg(long)]
    pub simplificado: bool,
}

pub fn run(args: &RecargoArgs, catalog: &Catalog) -> Result<Report, CliError> {
    let (recargo_porcentaje, metodo) = if args.simplificado {
        (
            catalog.simplified_surcharge_for_plan(args.monto, args.plan)?,
            SolverMethod::Simplificado,
        )
    } else {
        (
            catalog.auto_surcharge_for_plan(args.monto, args.plan)?,
            SolverMethod::Completo,
        )
    };

    Ok(Report::Surcharge(SurchargeReport {
        plan_id: args.plan,
        monto_efectivo: args.monto,
        recargo_porcentaje,
        metodo,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::sample_catalog;
    use crate::error::ErrorCode;
    use recargo_core::CoreError;
    use rust_decimal_macros::dec;

    fn percent(plan: u32, simplificado: bool) -> u32 {
        let args = RecargoArgs {
            plan,
            monto: dec!(10000),
            simplificado,
        };
        match run(&args, &sample_catalog()).unwrap() {
            Report::Surcharge(report) => report.recargo_porcentaje,
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[test]
    fn test_full_pipeline() {
        assert_eq!(percent(1, false), 7);
        assert_eq!(percent(3, false), 8);
    }

    #[test]
    fn test_simplified_adds_financing_cost() {
        // Single installment: no financing term, both formulas agree.
        assert_eq!(percent(1, true), 7);
        // Six installments at 25% real interest.
        assert_eq!(percent(3, true), 34);
    }

    #[test]
    fn test_amount_out_of_range() {
        for (monto, simplificado) in [
            (dec!(0), false),
            (dec!(0), true),
            (dec!(60000000000000000000000000000), false),
            (dec!(60000000000000000000000000000), true),
        ] {
            let args = RecargoArgs {
                plan: 1,
                monto,
                simplificado,
            };
            let err = run(&args, &sample_catalog()).unwrap_err();
            assert_eq!(err.code(), ErrorCode::ValidationError);
        }
    }

    #[test]
    fn test_unknown_plan() {
        let args = RecargoArgs {
            plan: 404,
            monto: dec!(10000),
            simplificado: true,
        };
        assert!(matches!(
            run(&args, &sample_catalog()),
            Err(CliError::Core(CoreError::PlanNotFound(404)))
        ));
    }
}
