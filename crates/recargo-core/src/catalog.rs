//! # Configuration Catalog
//!
//! The reference data a calculation is resolved against: processors
//! (empresas), cards, plans, installment interest and global parameters.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CalcRequest { planId, montoEfectivo, recargoClientePct, cuotas }       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_calc_request ──► ValidationError                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan(planId) ──► PlanNotFound / PlanInactive / InstallmentMismatch     │
//! │       │                                                                 │
//! │       ├── interest_at(cuotas, at)   first record in force at `at`       │
//! │       ├── global_params_at(at)      first record in force at `at`       │
//! │       ▼                                                                 │
//! │  engine::calculate ──► Calculation { input, plan, interest, params,     │
//! │                                      result }                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is plain immutable data. Callers load it however they like
//! (the CLI reads a TOML file) and pass it in explicitly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use ts_rs::TS;

use crate::engine;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::solver;
use crate::scenarios::surcharge_scenarios;
use crate::types::{
    CalcRequest, CalcResult, GlobalParams, InterestConfig, RateConfig, ScenarioRange,
    ScenarioRow, SurchargeParams,
};
use crate::validation::{
    validate_calc_request, validate_card, validate_cash_amount, validate_company,
    validate_global_params, validate_interest, validate_plan, validate_scenario_range,
};

// =============================================================================
// Records
// =============================================================================

/// A payment processor or terminal provider (empresa / dispositivo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Company {
    pub id: u32,
    pub nombre: String,
}

/// A card brand or family (tarjeta).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Card {
    pub id: u32,
    pub nombre: String,
}

/// A payment plan: the rates one processor charges for one card and
/// installment count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: u32,
    pub empresa_id: u32,
    pub tarjeta_id: u32,
    pub nombre: String,

    /// Processor-side plan code (e.g. "Plan Z" is code 11).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub codigo_operativo: Option<String>,

    #[serde(flatten)]
    pub rates: RateConfig,

    #[serde(default = "default_active")]
    pub activo: bool,

    /// Start of validity; absent means "always".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>", optional)]
    pub vigencia_desde: Option<DateTime<Utc>>,

    /// End of validity; absent means "open-ended".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>", optional)]
    pub vigencia_hasta: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// Installment interest rates with their validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InterestRecord {
    pub id: u32,
    pub cuotas: u32,
    #[ts(as = "f64")]
    pub interes_taller: Decimal,
    #[ts(as = "f64")]
    pub interes_real: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>", optional)]
    pub vigencia_desde: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>", optional)]
    pub vigencia_hasta: Option<DateTime<Utc>>,
}

impl InterestRecord {
    /// The engine-facing part of this record.
    pub fn config(&self) -> InterestConfig {
        InterestConfig {
            cuotas: self.cuotas,
            interes_taller: self.interes_taller,
            interes_real: self.interes_real,
        }
    }
}

/// Global calculation parameters with their validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GlobalParamsRecord {
    pub id: u32,
    /// Informational only; every plan carries its own VAT rate.
    #[serde(rename = "pctIVAporDefecto")]
    #[ts(as = "f64")]
    pub pct_iva_por_defecto: Decimal,
    #[serde(rename = "incluirIVAComoCosto", default)]
    pub incluir_iva_como_costo: bool,
    #[serde(default = "default_decimals")]
    pub redondeo_decimales: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>", optional)]
    pub vigencia_desde: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>", optional)]
    pub vigencia_hasta: Option<DateTime<Utc>>,
}

fn default_decimals() -> u32 {
    crate::DEFAULT_DECIMALS
}

impl GlobalParamsRecord {
    /// The engine-facing part of this record.
    pub fn params(&self) -> GlobalParams {
        GlobalParams {
            redondeo_decimales: self.redondeo_decimales,
            incluir_iva_como_costo: self.incluir_iva_como_costo,
        }
    }
}

/// `desde <= at` (or no start) and `hasta >= at` (or no end).
fn in_force(desde: Option<DateTime<Utc>>, hasta: Option<DateTime<Utc>>, at: DateTime<Utc>) -> bool {
    desde.map_or(true, |d| d <= at) && hasta.map_or(true, |h| h >= at)
}

// =============================================================================
// Calculation Snapshot
// =============================================================================

/// Everything a calculation was resolved from, plus its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Calculation {
    pub input: CalcRequest,
    pub plan: Plan,
    #[serde(rename = "interesPorCuotas")]
    pub interest: Option<InterestRecord>,
    #[serde(rename = "parametrosGlobales")]
    pub params: Option<GlobalParamsRecord>,
    #[serde(rename = "resultados")]
    pub result: CalcResult,
}

// =============================================================================
// Catalog
// =============================================================================

/// All reference records, as loaded from storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub companies: Vec<Company>,
    pub cards: Vec<Card>,
    pub plans: Vec<Plan>,
    pub interest: Vec<InterestRecord>,
    pub global_params: Vec<GlobalParamsRecord>,
}

impl Catalog {
    /// Validates every record, rejects duplicate ids and checks that plans
    /// reference existing companies and cards.
    pub fn validate(&self) -> CoreResult<()> {
        check_unique("empresa", self.companies.iter().map(|c| c.id))?;
        check_unique("tarjeta", self.cards.iter().map(|c| c.id))?;
        check_unique("plan", self.plans.iter().map(|p| p.id))?;
        check_unique("interes", self.interest.iter().map(|i| i.id))?;
        check_unique("parametrosGlobales", self.global_params.iter().map(|g| g.id))?;

        for company in &self.companies {
            validate_company(company)?;
        }
        for card in &self.cards {
            validate_card(card)?;
        }
        for record in &self.interest {
            validate_interest(record)?;
        }
        for record in &self.global_params {
            validate_global_params(record)?;
        }
        for plan in &self.plans {
            validate_plan(plan)?;
            if self.company(plan.empresa_id).is_none() {
                return Err(CoreError::UnknownCompany {
                    plan_id: plan.id,
                    empresa_id: plan.empresa_id,
                });
            }
            if self.card(plan.tarjeta_id).is_none() {
                return Err(CoreError::UnknownCard {
                    plan_id: plan.id,
                    tarjeta_id: plan.tarjeta_id,
                });
            }
        }
        Ok(())
    }

    pub fn plan(&self, id: u32) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn company(&self, id: u32) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn card(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Active plans, optionally filtered by company and card, ordered by
    /// installment count.
    pub fn plans_for(&self, empresa_id: Option<u32>, tarjeta_id: Option<u32>) -> Vec<&Plan> {
        let mut plans: Vec<&Plan> = self
            .plans
            .iter()
            .filter(|p| p.activo)
            .filter(|p| empresa_id.map_or(true, |id| p.empresa_id == id))
            .filter(|p| tarjeta_id.map_or(true, |id| p.tarjeta_id == id))
            .collect();
        plans.sort_by_key(|p| (p.rates.cuotas, p.id));
        plans
    }

    /// First interest record for `cuotas` in force at `at`.
    pub fn interest_at(&self, cuotas: u32, at: DateTime<Utc>) -> Option<&InterestRecord> {
        self.interest
            .iter()
            .find(|i| i.cuotas == cuotas && in_force(i.vigencia_desde, i.vigencia_hasta, at))
    }

    /// First interest record for `cuotas`, regardless of validity.
    pub fn interest_for_installments(&self, cuotas: u32) -> Option<&InterestRecord> {
        self.interest.iter().find(|i| i.cuotas == cuotas)
    }

    /// First global parameters record in force at `at`.
    pub fn global_params_at(&self, at: DateTime<Utc>) -> Option<&GlobalParamsRecord> {
        self.global_params
            .iter()
            .find(|g| in_force(g.vigencia_desde, g.vigencia_hasta, at))
    }

    /// Resolves a request against the catalog and runs the formula pipeline.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] when the request is out of range
    /// - [`CoreError::PlanNotFound`] / [`CoreError::PlanInactive`]
    /// - [`CoreError::InstallmentMismatch`] when `cuotas` differs from the plan's
    #[instrument(skip(self, request), fields(plan_id = request.plan_id))]
    pub fn calculate(&self, request: &CalcRequest, at: DateTime<Utc>) -> CoreResult<Calculation> {
        validate_calc_request(request)?;
        let plan = self.active_plan(request.plan_id)?;
        if plan.rates.cuotas != request.cuotas {
            return Err(CoreError::InstallmentMismatch {
                plan_id: plan.id,
                plan_cuotas: plan.rates.cuotas,
                requested: request.cuotas,
            });
        }

        let interest = self.interest_at(request.cuotas, at);
        let params = self.global_params_at(at);
        debug!(
            interest_id = interest.map(|i| i.id),
            params_id = params.map(|g| g.id),
            "Catalog records resolved"
        );

        let result = engine::calculate(
            &request.input(),
            &plan.rates,
            interest.map(InterestRecord::config).as_ref(),
            params.map(GlobalParamsRecord::params).as_ref(),
        );

        Ok(Calculation {
            input: request.clone(),
            plan: plan.clone(),
            interest: interest.cloned(),
            params: params.cloned(),
            result,
        })
    }

    /// Solves the surcharge for a plan with the full pipeline.
    ///
    /// Interest is matched on the plan's installment count without a
    /// validity check.
    #[instrument(skip(self))]
    pub fn auto_surcharge_for_plan(&self, monto_efectivo: Decimal, plan_id: u32) -> CoreResult<u32> {
        validate_cash_amount(monto_efectivo)?;
        let plan = self.active_plan(plan_id)?;
        let interest = self
            .interest_for_installments(plan.rates.cuotas)
            .map(InterestRecord::config);
        Ok(solver::auto_surcharge_full(
            monto_efectivo,
            &plan.rates,
            interest.as_ref(),
        ))
    }

    /// Solves the surcharge for a plan with the simplified net formula.
    #[instrument(skip(self))]
    pub fn simplified_surcharge_for_plan(
        &self,
        monto_efectivo: Decimal,
        plan_id: u32,
    ) -> CoreResult<u32> {
        validate_cash_amount(monto_efectivo)?;
        let params = self.surcharge_params_for_plan(plan_id)?;
        Ok(solver::auto_surcharge(monto_efectivo, &params))
    }

    /// Simplified-solver parameters for a plan, with its matched interest.
    pub fn surcharge_params_for_plan(&self, plan_id: u32) -> CoreResult<SurchargeParams> {
        let plan = self.active_plan(plan_id)?;
        let interest = self
            .interest_for_installments(plan.rates.cuotas)
            .map(InterestRecord::config);
        Ok(SurchargeParams::from_rates(&plan.rates, interest.as_ref()))
    }

    /// Scenario table for a plan.
    #[instrument(skip(self))]
    pub fn scenarios_for_plan(
        &self,
        monto_efectivo: Decimal,
        plan_id: u32,
        range: ScenarioRange,
    ) -> CoreResult<Vec<ScenarioRow>> {
        validate_cash_amount(monto_efectivo)?;
        validate_scenario_range(&range)?;
        let params = self.surcharge_params_for_plan(plan_id)?;
        Ok(surcharge_scenarios(monto_efectivo, &params, range).collect())
    }

    fn active_plan(&self, plan_id: u32) -> CoreResult<&Plan> {
        let plan = self.plan(plan_id).ok_or(CoreError::PlanNotFound(plan_id))?;
        if !plan.activo {
            return Err(CoreError::PlanInactive(plan_id));
        }
        Ok(plan)
    }
}

fn check_unique(field: &str, ids: impl Iterator<Item = u32>) -> CoreResult<()> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::Duplicate {
                field: format!("{field}.id"),
                value: id.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
