//! # Automatic Surcharge Solver
//!
//! Finds the smallest whole surcharge percentage that leaves the merchant's
//! net at or above the cash amount.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lo = 0%                     mid                        hi = 100%       │
//! │   ├───────────────────────────┼───────────────────────────┤             │
//! │                                                                         │
//! │  diff = net(mid) − E                                                    │
//! │    |diff| ≤ 0.01  → accept mid                                          │
//! │    diff < 0       → lo = mid   (not enough surcharge)                   │
//! │    diff > 0       → hi = mid   (too much)                               │
//! │                                                                         │
//! │  stop when hi − lo ≤ 0.001 (17 halvings), capped at 20 iterations      │
//! │  result = ceil(mid)  → never under-compensates the merchant             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Net Formulas
//! The search can drive either of two net-amount calculations, and the two
//! are intentionally kept apart:
//!
//! - [`simplified_net`]: `F − (H + J + IVA + IIBB [+ financing])`, used by
//!   [`auto_surcharge`] and the scenario table.
//! - [`full_pipeline_net`]: `monto_neto` from [`crate::engine::calculate`],
//!   used by [`auto_surcharge_full`] when a complete plan is at hand.
//!
//! They agree for most plans but not bit-for-bit in every configuration
//! (the simplified one adds the real financing cost for multi-installment
//! plans; the full one never does).
//!
//! If no percentage in `[0, 100]` reaches the cash amount the solver returns
//! its best estimate (typically `100`). That is an approximation, not an error.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace, warn};

use crate::engine::{self, iibb_base, iva_base};
use crate::money::Precision;
use crate::types::{CalcInput, GlobalParams, InterestConfig, RateConfig, SurchargeParams};
use crate::{DEFAULT_DECIMALS, MAX_SOLVER_ITERATIONS};

/// Upper bound of the search, in percent.
const SEARCH_CEILING: Decimal = dec!(100);

/// The search stops once the bracket is narrower than this (in percent).
const BRACKET_WIDTH: Decimal = dec!(0.001);

/// One cent: a net within this distance of the cash amount is accepted.
const NET_TOLERANCE: Decimal = dec!(0.01);

/// Outcome of one bisection run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurchargeSearch {
    /// Fractional surcharge percentage the search settled on.
    pub fractional: Decimal,
    /// `ceil(fractional)`: the surcharge to actually charge.
    pub percent: u32,
    pub iterations: usize,
    /// Whether a midpoint landed within one cent of the cash amount.
    pub converged: bool,
}

// =============================================================================
// Public Operations
// =============================================================================

/// Solves the surcharge with the simplified net formula at 2 decimals.
///
/// ## Example
/// ```rust
/// use recargo_core::solver::{auto_surcharge, simplified_net};
/// use recargo_core::money::Precision;
/// use recargo_core::types::{BaseIibb, BaseIva, SurchargeParams};
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// let params = SurchargeParams {
///     pct_comision: dec!(0.03),
///     pct_arancel: dec!(0.01),
///     pct_iva: dec!(0.21),
///     pct_iibb: dec!(0.01),
///     base_iva: BaseIva::ComisionArancel,
///     base_iibb: BaseIibb::MontoTarjeta,
///     cuotas: None,
///     interes_taller: None,
///     interes_real: None,
/// };
///
/// let pct = auto_surcharge(dec!(10000), &params);
/// assert_eq!(pct, 7);
///
/// let net = simplified_net(dec!(10000), Decimal::from(pct) / dec!(100), &params, Precision::new(2));
/// assert!(net >= dec!(10000));
/// ```
pub fn auto_surcharge(monto_efectivo: Decimal, params: &SurchargeParams) -> u32 {
    auto_surcharge_with_precision(monto_efectivo, params, DEFAULT_DECIMALS)
}

/// Solves the surcharge with the simplified net formula at `decimals` places.
pub fn auto_surcharge_with_precision(
    monto_efectivo: Decimal,
    params: &SurchargeParams,
    decimals: u32,
) -> u32 {
    let precision = Precision::new(decimals);
    let search = bisect_surcharge(monto_efectivo, |recargo| {
        simplified_net(monto_efectivo, recargo, params, precision)
    });
    debug!(
        %monto_efectivo,
        percent = search.percent,
        iterations = search.iterations,
        "Simplified surcharge solved"
    );
    search.percent
}

/// Solves the surcharge by running the full pipeline at every step.
///
/// Uses the plan's own installment count, the interest configuration
/// matched to it, and 2-decimal rounding with VAT excluded from cost.
pub fn auto_surcharge_full(
    monto_efectivo: Decimal,
    rates: &RateConfig,
    interest: Option<&InterestConfig>,
) -> u32 {
    let params = GlobalParams {
        redondeo_decimales: DEFAULT_DECIMALS,
        incluir_iva_como_costo: false,
    };
    let search = bisect_surcharge(monto_efectivo, |recargo| {
        full_pipeline_net(monto_efectivo, recargo, rates, interest, &params)
    });
    debug!(
        %monto_efectivo,
        cuotas = rates.cuotas,
        percent = search.percent,
        iterations = search.iterations,
        "Full-pipeline surcharge solved"
    );
    search.percent
}

// =============================================================================
// Net Amount Strategies
// =============================================================================

/// Net amount via the shortcut formula used inside the search.
///
/// `recargo` is a fraction (`0.05` = 5%). Fees and taxes are rounded one
/// by one, summed without rounding, and subtracted from the card amount.
/// When the plan has more than one installment and a non-zero real
/// interest rate, the rounded financing cost is subtracted as well.
pub fn simplified_net(
    monto_efectivo: Decimal,
    recargo: Decimal,
    params: &SurchargeParams,
    precision: Precision,
) -> Decimal {
    let round = |value: Decimal| precision.round(value);
    let e = monto_efectivo;

    let f = round(e * (Decimal::ONE + recargo));
    let comision = round(f * params.pct_comision);
    let arancel = round(f * params.pct_arancel);
    let iva = round(iva_base(params.base_iva, e, f, comision, arancel) * params.pct_iva);
    let iibb = round(iibb_base(params.base_iibb, e, f) * params.pct_iibb);

    let mut costo = comision + arancel + iva + iibb;
    if let (Some(cuotas), Some(interes_real)) = (params.cuotas, params.interes_real) {
        if cuotas > 1 && !interes_real.is_zero() {
            costo += round(e * interes_real);
        }
    }

    round(f - costo)
}

/// Net amount as reported by the full formula pipeline.
pub fn full_pipeline_net(
    monto_efectivo: Decimal,
    recargo: Decimal,
    rates: &RateConfig,
    interest: Option<&InterestConfig>,
    params: &GlobalParams,
) -> Decimal {
    let input = CalcInput {
        monto_efectivo,
        recargo_cliente_pct: recargo,
        cuotas: rates.cuotas,
    };
    engine::calculate(&input, rates, interest, Some(params)).monto_neto
}

// =============================================================================
// Bisection
// =============================================================================

/// Bisects `[0, 100]` for the surcharge that makes `net_at` match the cash amount.
///
/// `net_at` receives the surcharge as a fraction and returns the net amount.
/// A zero cash amount needs no surcharge and short-circuits to `0`.
pub fn bisect_surcharge<F>(monto_efectivo: Decimal, mut net_at: F) -> SurchargeSearch
where
    F: FnMut(Decimal) -> Decimal,
{
    if monto_efectivo.is_zero() {
        return SurchargeSearch {
            fractional: Decimal::ZERO,
            percent: 0,
            iterations: 0,
            converged: true,
        };
    }

    let mut lo = Decimal::ZERO;
    let mut hi = SEARCH_CEILING;
    let mut accepted = None;
    let mut iterations = 0;

    while hi - lo > BRACKET_WIDTH && iterations < MAX_SOLVER_ITERATIONS {
        iterations += 1;
        let mid = (lo + hi) / Decimal::TWO;
        let net = net_at(mid / Decimal::ONE_HUNDRED);
        let diff = net - monto_efectivo;
        trace!(iteration = iterations, %mid, %net, %diff, "Bisection step");

        if diff.abs() <= NET_TOLERANCE {
            accepted = Some(mid);
            break;
        } else if diff.is_sign_negative() {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let converged = accepted.is_some();
    let fractional = accepted.unwrap_or_else(|| (lo + hi) / Decimal::TWO);
    if !converged && SEARCH_CEILING - fractional <= BRACKET_WIDTH {
        warn!(
            %monto_efectivo,
            "No surcharge up to 100% reaches the cash amount; returning the ceiling"
        );
    }

    SurchargeSearch {
        fractional,
        percent: fractional.ceil().to_u32().unwrap_or(0),
        iterations,
        converged,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BaseIibb, BaseIva};

    fn basic_params() -> SurchargeParams {
        SurchargeParams {
            pct_comision: dec!(0.03),
            pct_arancel: dec!(0.01),
            pct_iva: dec!(0.21),
            pct_iibb: dec!(0.01),
            base_iva: BaseIva::ComisionArancel,
            base_iibb: BaseIibb::MontoTarjeta,
            cuotas: None,
            interes_taller: None,
            interes_real: None,
        }
    }

    fn six_installments() -> RateConfig {
        RateConfig {
            pct_comision: dec!(0.018),
            pct_arancel: dec!(0.1104),
            pct_iva: dec!(0.21),
            pct_iibb: dec!(0.05),
            base_iva: BaseIva::ComisionArancel,
            base_iibb: BaseIibb::MontoTarjeta,
            cuotas: 6,
        }
    }

    fn net_at_percent(monto: Decimal, pct: u32, params: &SurchargeParams) -> Decimal {
        simplified_net(
            monto,
            Decimal::from(pct) / Decimal::ONE_HUNDRED,
            params,
            Precision::new(2),
        )
    }

    /// The returned percentage reaches the cash amount and one less does not.
    fn assert_minimal(monto: Decimal, pct: u32, params: &SurchargeParams) {
        assert!(net_at_percent(monto, pct, params) >= monto - NET_TOLERANCE);
        if pct > 0 {
            assert!(net_at_percent(monto, pct - 1, params) < monto);
        }
    }

    #[test]
    fn test_simplified_net_values() {
        let params = basic_params();
        assert_eq!(net_at_percent(dec!(10000), 0, &params), dec!(9416));
        assert_eq!(net_at_percent(dec!(10000), 6, &params), dec!(9980.96));
        assert_eq!(net_at_percent(dec!(10000), 7, &params), dec!(10075.12));
    }

    #[test]
    fn test_basic_surcharge() {
        let params = basic_params();
        let pct = auto_surcharge(dec!(10000), &params);
        assert_eq!(pct, 7);
        assert_minimal(dec!(10000), pct, &params);
    }

    #[test]
    fn test_surcharge_with_financing_cost() {
        let params = SurchargeParams {
            cuotas: Some(6),
            interes_taller: Some(dec!(0.30)),
            interes_real: Some(dec!(0.25)),
            ..basic_params()
        };
        let pct = auto_surcharge(dec!(50000), &params);
        assert_eq!(pct, 33);
        assert_eq!(net_at_percent(dec!(50000), 33, &params), dec!(50116.40));
        assert_eq!(net_at_percent(dec!(50000), 32, &params), dec!(49645.60));
        assert_minimal(dec!(50000), pct, &params);
    }

    #[test]
    fn test_financing_cost_ignored_for_single_installment() {
        let params = SurchargeParams {
            cuotas: Some(1),
            interes_real: Some(dec!(0.25)),
            ..basic_params()
        };
        assert_eq!(
            net_at_percent(dec!(10000), 7, &params),
            net_at_percent(dec!(10000), 7, &basic_params())
        );
    }

    #[test]
    fn test_rounds_up_to_whole_percent() {
        let params = SurchargeParams {
            pct_comision: dec!(0.025),
            pct_arancel: dec!(0.007),
            pct_iibb: dec!(0.009),
            ..basic_params()
        };
        let pct = auto_surcharge(dec!(15000), &params);
        assert_eq!(pct, 6);
        assert_eq!(net_at_percent(dec!(15000), 6, &params), dec!(15141.25));
        assert_eq!(net_at_percent(dec!(15000), 5, &params), dec!(14998.41));
    }

    #[test]
    fn test_zero_cash_needs_no_surcharge() {
        assert_eq!(auto_surcharge(Decimal::ZERO, &basic_params()), 0);
        let search = bisect_surcharge(Decimal::ZERO, |_| Decimal::ZERO);
        assert!(search.converged);
        assert_eq!(search.iterations, 0);
    }

    #[test]
    fn test_full_pipeline_surcharge() {
        let rates = six_installments();
        let pct = auto_surcharge_full(dec!(10000), &rates, None);
        assert_eq!(pct, 26);

        let params = GlobalParams::default();
        let at = |p: u32| {
            full_pipeline_net(
                dec!(10000),
                Decimal::from(p) / Decimal::ONE_HUNDRED,
                &rates,
                None,
                &params,
            )
        };
        assert_eq!(at(26), dec!(10012.41));
        assert_eq!(at(25), dec!(9932.95));
    }

    #[test]
    fn test_strategies_diverge_with_financing_cost() {
        let rates = six_installments();
        let interest = InterestConfig {
            cuotas: 6,
            interes_taller: dec!(0.20),
            interes_real: dec!(0.16),
        };

        // The full pipeline reports interest separately; the net is unchanged.
        assert_eq!(auto_surcharge_full(dec!(10000), &rates, Some(&interest)), 26);

        // The shortcut subtracts the real financing cost from the net.
        let params = SurchargeParams::from_rates(&rates, Some(&interest));
        assert_eq!(auto_surcharge(dec!(10000), &params), 46);

        // Without interest both agree on this plan.
        let bare = SurchargeParams::from_rates(&rates, None);
        assert_eq!(auto_surcharge(dec!(10000), &bare), 26);
    }

    #[test]
    fn test_unreachable_target_returns_ceiling() {
        let params = SurchargeParams {
            pct_comision: dec!(0.9),
            pct_arancel: dec!(0.5),
            ..basic_params()
        };
        let search = bisect_surcharge(dec!(10000), |recargo| {
            simplified_net(dec!(10000), recargo, &params, Precision::new(2))
        });
        assert!(!search.converged);
        assert_eq!(search.percent, 100);
        assert!(search.iterations <= MAX_SOLVER_ITERATIONS);
    }

    #[test]
    fn test_iterations_are_bounded() {
        // A net that never settles still terminates.
        let mut flip = false;
        let search = bisect_surcharge(dec!(10000), |_| {
            flip = !flip;
            if flip {
                dec!(0)
            } else {
                dec!(20000)
            }
        });
        assert!(search.iterations <= MAX_SOLVER_ITERATIONS);
        assert!(search.percent <= 100);
    }

    #[test]
    fn test_four_decimal_search() {
        let params = basic_params();
        let pct = auto_surcharge_with_precision(dec!(10000), &params, 4);
        assert_eq!(pct, 7);
    }
}
