//! # Domain Types
//!
//! Inputs and outputs of the calculation engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   RateConfig    │   │ InterestConfig  │   │  GlobalParams   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  pct_comision   │   │  cuotas         │   │  redondeo (2)   │       │
//! │  │  pct_arancel    │   │  interes_taller │   │  iva_como_costo │       │
//! │  │  pct_iva/iibb   │   │  interes_real   │   └─────────────────┘       │
//! │  │  base_iva/iibb  │   └─────────────────┘                             │
//! │  └────────┬────────┘                                                    │
//! │           │              ┌─────────────────┐                            │
//! │  CalcInput ──► engine ──►│   CalcResult    │── interes_info?            │
//! │                          └─────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Every record serializes with the camelCase names used by the JSON API
//! (`montoConTarjeta`, `ivaRPesos`, `baseIVA`, ...). Decimals travel as
//! JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DEFAULT_DECIMALS;

// =============================================================================
// Tax Bases
// =============================================================================

/// Amount the VAT (IVA) rate is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaseIva {
    /// Commission plus tariff (the usual acquirer invoice).
    #[default]
    ComisionArancel,
    /// Commission only.
    SoloComision,
    /// The cash reference amount.
    MontoEfectivo,
    /// The gross amount charged to the card.
    MontoTarjeta,
}

/// Amount the gross-receipts (IIBB) rate is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaseIibb {
    #[default]
    MontoTarjeta,
    MontoEfectivo,
}

// =============================================================================
// Rate Configuration
// =============================================================================

/// Effective rate parameters of a payment plan.
///
/// All percentages are fractions: `0.21` means 21%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    /// Merchant-services commission (G).
    #[ts(as = "f64")]
    pub pct_comision: Decimal,

    /// Card network tariff (I).
    #[ts(as = "f64")]
    pub pct_arancel: Decimal,

    /// VAT rate (K).
    #[serde(rename = "pctIVA")]
    #[ts(as = "f64")]
    pub pct_iva: Decimal,

    /// Gross-receipts tax rate (M).
    #[serde(rename = "pctIIBB")]
    #[ts(as = "f64")]
    pub pct_iibb: Decimal,

    #[serde(rename = "baseIVA")]
    pub base_iva: BaseIva,

    #[serde(rename = "baseIIBB")]
    pub base_iibb: BaseIibb,

    /// Installment count (D).
    pub cuotas: u32,
}

impl RateConfig {
    /// Approximate all-in rate over the card amount, before rounding.
    ///
    /// `G + I + M + (G + I) * K`
    pub fn all_in_rate(&self) -> Decimal {
        let fees = self.pct_comision + self.pct_arancel;
        fees + self.pct_iibb + fees * self.pct_iva
    }
}

/// Financing interest for an installment count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InterestConfig {
    pub cuotas: u32,

    /// Surcharge fraction charged to the customer.
    #[ts(as = "f64")]
    pub interes_taller: Decimal,

    /// Actual cost-of-money fraction.
    #[ts(as = "f64")]
    pub interes_real: Decimal,
}

/// Cross-cutting rounding and aggregation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalParams {
    /// Decimal places every intermediate figure is rounded to.
    pub redondeo_decimales: u32,

    /// Whether VAT counts toward `costoTotalPesos`.
    #[serde(rename = "incluirIVAComoCosto")]
    pub incluir_iva_como_costo: bool,
}

impl Default for GlobalParams {
    fn default() -> Self {
        GlobalParams {
            redondeo_decimales: DEFAULT_DECIMALS,
            incluir_iva_como_costo: false,
        }
    }
}

// =============================================================================
// Calculation Input / Output
// =============================================================================

/// The transaction being priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalcInput {
    /// Cash reference amount (E).
    #[ts(as = "f64")]
    pub monto_efectivo: Decimal,

    /// Customer surcharge fraction (U).
    #[ts(as = "f64")]
    pub recargo_cliente_pct: Decimal,

    /// Installment count (D).
    pub cuotas: u32,
}

/// A calculation request against a catalog plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalcRequest {
    pub plan_id: u32,
    #[ts(as = "f64")]
    pub monto_efectivo: Decimal,
    #[ts(as = "f64")]
    pub recargo_cliente_pct: Decimal,
    pub cuotas: u32,
}

impl CalcRequest {
    /// The engine input carried by this request.
    pub fn input(&self) -> CalcInput {
        CalcInput {
            monto_efectivo: self.monto_efectivo,
            recargo_cliente_pct: self.recargo_cliente_pct,
            cuotas: self.cuotas,
        }
    }
}

/// Fee, tax and net breakdown of one calculation.
///
/// Entirely derived from the inputs; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalcResult {
    /// F: gross amount charged to the card.
    #[ts(as = "f64")]
    pub monto_con_tarjeta: Decimal,
    /// H
    #[ts(as = "f64")]
    pub comision_pesos: Decimal,
    /// J
    #[ts(as = "f64")]
    pub arancel_pesos: Decimal,
    /// L
    #[ts(as = "f64")]
    pub iva_r_pesos: Decimal,
    /// N
    #[ts(as = "f64")]
    pub iibb_pesos: Decimal,
    /// P
    #[serde(rename = "montoAntesIVA")]
    #[ts(as = "f64")]
    pub monto_antes_iva: Decimal,
    /// R: what the merchant actually takes home.
    #[ts(as = "f64")]
    pub monto_neto: Decimal,
    /// S
    #[ts(as = "f64")]
    pub costo_total_pesos: Decimal,
    /// O: all-in rate as a fraction of F.
    #[ts(as = "f64")]
    pub costo_total_porcentaje: Decimal,
    #[ts(as = "f64")]
    pub valor_cuota: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub interes_info: Option<InterestInfo>,
}

/// Secondary interest allocation, reported alongside the main result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InterestInfo {
    /// Financing cost absorbed by the system.
    #[serde(rename = "interesMIPOL")]
    #[ts(as = "f64")]
    pub interes_mipol: Decimal,
    /// Financing surcharge charged to the customer.
    #[ts(as = "f64")]
    pub interes_cliente: Decimal,
    /// Margin retained by the system.
    #[ts(as = "f64")]
    pub interes_sistema: Decimal,
    #[ts(as = "f64")]
    pub monto_cobrar_cliente: Decimal,
    #[ts(as = "f64")]
    pub monto_total_sistema: Decimal,
}

// =============================================================================
// Surcharge Solver Inputs / Outputs
// =============================================================================

/// Rate parameters for the surcharge solver and the scenario table.
///
/// Unlike [`RateConfig`], the installment count and interest rates are
/// optional: the simplified net formula only adds the financing term when
/// both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SurchargeParams {
    #[ts(as = "f64")]
    pub pct_comision: Decimal,
    #[ts(as = "f64")]
    pub pct_arancel: Decimal,
    #[serde(rename = "pctIVA")]
    #[ts(as = "f64")]
    pub pct_iva: Decimal,
    #[serde(rename = "pctIIBB")]
    #[ts(as = "f64")]
    pub pct_iibb: Decimal,
    #[serde(rename = "baseIVA")]
    pub base_iva: BaseIva,
    #[serde(rename = "baseIIBB")]
    pub base_iibb: BaseIibb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cuotas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>", optional)]
    pub interes_taller: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<f64>", optional)]
    pub interes_real: Option<Decimal>,
}

impl SurchargeParams {
    /// Builds solver parameters from a plan's rates and an optional
    /// interest configuration.
    pub fn from_rates(rates: &RateConfig, interest: Option<&InterestConfig>) -> Self {
        SurchargeParams {
            pct_comision: rates.pct_comision,
            pct_arancel: rates.pct_arancel,
            pct_iva: rates.pct_iva,
            pct_iibb: rates.pct_iibb,
            base_iva: rates.base_iva,
            base_iibb: rates.base_iibb,
            cuotas: Some(rates.cuotas),
            interes_taller: interest.map(|i| i.interes_taller),
            interes_real: interest.map(|i| i.interes_real),
        }
    }
}

/// Inclusive range of integer surcharge percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScenarioRange {
    pub min: u32,
    pub max: u32,
}

impl Default for ScenarioRange {
    fn default() -> Self {
        ScenarioRange { min: 0, max: 20 }
    }
}

/// One row of the surcharge comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRow {
    pub recargo_porcentaje: u32,
    #[ts(as = "f64")]
    pub monto_con_recargo: Decimal,
    #[ts(as = "f64")]
    pub monto_neto: Decimal,
    #[ts(as = "f64")]
    pub diferencia_neto: Decimal,
    pub es_igual_o_superior: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
