//! # planes
//!
//! Lists active plans, optionally for one processor and/or card.

use clap::Args;
use recargo_core::Catalog;

use crate::output::{PlanSummary, Report};

#[derive(Debug, Clone, Args)]
pub struct PlanesArgs {
    /// Only plans of this processor (empresa id)
    #[arg(long)]
    pub empresa: Option<u32>,

    /// Only plans for this card (tarjeta id)
    #[arg(long)]
    pub tarjeta: Option<u32>,
}

pub fn run(args: &PlanesArgs, catalog: &Catalog) -> Report {
    let plans = catalog
        .plans_for(args.empresa, args.tarjeta)
        .into_iter()
        .map(|plan| PlanSummary {
            id: plan.id,
            empresa: catalog
                .company(plan.empresa_id)
                .map(|c| c.nombre.clone())
                .unwrap_or_default(),
            tarjeta: catalog
                .card(plan.tarjeta_id)
                .map(|c| c.nombre.clone())
                .unwrap_or_default(),
            nombre: plan.nombre.clone(),
            codigo_operativo: plan.codigo_operativo.clone(),
            cuotas: plan.rates.cuotas,
            costo_total_porcentaje: plan.rates.all_in_rate(),
        })
        .collect();
    Report::Plans(plans)
}
