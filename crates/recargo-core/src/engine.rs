//! # Formula Pipeline
//!
//! Turns one transaction and one plan's rates into the full fee, tax and
//! net breakdown.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  E (cash)  U (surcharge)                                                │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  F = E × (1 + U) ──┬──► H = F × comision                                │
//! │                    ├──► J = F × arancel                                 │
//! │                    ├──► N = base_iibb(E, F) × iibb                      │
//! │                    └──► L = base_iva(E, F, H, J) × iva                  │
//! │                                                                         │
//! │  P = F − H − J − N        (before VAT)                                  │
//! │  R = P − L                (merchant's net)   ◄── solver target          │
//! │  S = H + J + N [+ L]      (total cost)                                  │
//! │  O = G + I + M + (G+I)×K  (all-in rate)                                 │
//! │  cuota = F / D                                                          │
//! │                                                                         │
//! │  every arrow rounds to GlobalParams.redondeo_decimales                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline never fails. Zero, negative or otherwise nonsensical inputs
//! produce the arithmetic that follows from them; rejecting them is the
//! caller's job (see [`crate::validation`]).

use rust_decimal::Decimal;

use crate::money::Precision;
use crate::types::{
    BaseIibb, BaseIva, CalcInput, CalcResult, GlobalParams, InterestConfig, InterestInfo,
    RateConfig,
};

/// Runs the formula pipeline.
///
/// `interest` adds the informational [`InterestInfo`] block; `params`
/// defaults to 2-decimal rounding with VAT excluded from total cost.
///
/// ## Example
/// ```rust
/// use recargo_core::engine::calculate;
/// use recargo_core::types::{BaseIibb, BaseIva, CalcInput, RateConfig};
/// use rust_decimal_macros::dec;
///
/// let rates = RateConfig {
///     pct_comision: dec!(0.018),
///     pct_arancel: dec!(0.1104),
///     pct_iva: dec!(0.21),
///     pct_iibb: dec!(0.05),
///     base_iva: BaseIva::ComisionArancel,
///     base_iibb: BaseIibb::MontoTarjeta,
///     cuotas: 6,
/// };
/// let input = CalcInput {
///     monto_efectivo: dec!(10000),
///     recargo_cliente_pct: dec!(0.20),
///     cuotas: 6,
/// };
///
/// let result = calculate(&input, &rates, None, None);
/// assert_eq!(result.monto_con_tarjeta, dec!(12000));
/// assert_eq!(result.monto_neto, dec!(9535.63));
/// assert_eq!(result.valor_cuota, dec!(2000));
/// ```
pub fn calculate(
    input: &CalcInput,
    rates: &RateConfig,
    interest: Option<&InterestConfig>,
    params: Option<&GlobalParams>,
) -> CalcResult {
    let params = params.copied().unwrap_or_default();
    let precision = Precision::from(&params);
    let round = |value: Decimal| precision.round(value);

    let e = input.monto_efectivo;
    let u = input.recargo_cliente_pct;

    let f = round(e * (Decimal::ONE + u));
    let h = round(f * rates.pct_comision);
    let j = round(f * rates.pct_arancel);
    let n = round(iibb_base(rates.base_iibb, e, f) * rates.pct_iibb);
    let l = round(iva_base(rates.base_iva, e, f, h, j) * rates.pct_iva);

    let p = round(f - h - j - n);
    let r = round(p - l);

    let vat_cost = if params.incluir_iva_como_costo {
        l
    } else {
        Decimal::ZERO
    };
    let s = round(h + j + n + vat_cost);
    let o = round(rates.all_in_rate());

    let valor_cuota = if input.cuotas > 0 {
        round(f / Decimal::from(input.cuotas))
    } else {
        Decimal::ZERO
    };

    CalcResult {
        monto_con_tarjeta: f,
        comision_pesos: h,
        arancel_pesos: j,
        iva_r_pesos: l,
        iibb_pesos: n,
        monto_antes_iva: p,
        monto_neto: r,
        costo_total_pesos: s,
        costo_total_porcentaje: o,
        valor_cuota,
        interes_info: interest.map(|config| interest_allocation(e, config, precision)),
    }
}

/// Splits the financing interest between customer, system and cost of money.
///
/// Informational only: nothing here feeds back into the main pipeline.
pub fn interest_allocation(
    monto_efectivo: Decimal,
    interest: &InterestConfig,
    precision: Precision,
) -> InterestInfo {
    let round = |value: Decimal| precision.round(value);

    let interes_mipol = round(monto_efectivo * interest.interes_real);
    let interes_cliente = round(monto_efectivo * interest.interes_taller);
    let interes_sistema = round(interes_cliente - interes_mipol);

    InterestInfo {
        interes_mipol,
        interes_cliente,
        interes_sistema,
        monto_cobrar_cliente: round(monto_efectivo + interes_cliente),
        monto_total_sistema: round(monto_efectivo + interes_sistema),
    }
}

/// Selects the amount VAT is charged on.
pub(crate) fn iva_base(
    base: BaseIva,
    monto_efectivo: Decimal,
    monto_con_tarjeta: Decimal,
    comision: Decimal,
    arancel: Decimal,
) -> Decimal {
    match base {
        BaseIva::ComisionArancel => comision + arancel,
        BaseIva::SoloComision => comision,
        BaseIva::MontoEfectivo => monto_efectivo,
        BaseIva::MontoTarjeta => monto_con_tarjeta,
    }
}

/// Selects the amount gross-receipts tax is charged on.
pub(crate) fn iibb_base(
    base: BaseIibb,
    monto_efectivo: Decimal,
    monto_con_tarjeta: Decimal,
) -> Decimal {
    match base {
        BaseIibb::MontoTarjeta => monto_con_tarjeta,
        BaseIibb::MontoEfectivo => monto_efectivo,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
