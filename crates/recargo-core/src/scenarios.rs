//! # Surcharge Scenarios
//!
//! Side-by-side table of what the merchant nets at each whole surcharge
//! percentage, so the operator can pick one by eye.
//!
//! ```text
//!   %   con recargo      neto      diferencia   cubre
//!   0     10000.00     9416.00      -584.00      no
//!   ...
//!   7     10700.00    10075.12        75.12      sí
//! ```
//!
//! Rows are produced lazily; nothing is computed until the iterator is
//! consumed.

use rust_decimal::Decimal;

use crate::money::Precision;
use crate::solver::simplified_net;
use crate::types::{ScenarioRange, ScenarioRow, SurchargeParams};

/// One row per integer percentage in `range.min..=range.max`.
///
/// The net column uses the same simplified formula as the solver at
/// 2 decimals. `monto_con_recargo` is left unrounded. A range with
/// `min > max` yields nothing.
///
/// ## Example
/// ```rust
/// use recargo_core::scenarios::surcharge_scenarios;
/// use recargo_core::types::{BaseIibb, BaseIva, ScenarioRange, SurchargeParams};
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
/// let first = surcharge_scenarios(dec!(10000), &params, ScenarioRange::default())
///     .find(|row| row.es_igual_o_superior)
///     .unwrap();
/// assert_eq!(first.recargo_porcentaje, 7);
/// ```
pub fn surcharge_scenarios(
    monto_efectivo: Decimal,
    params: &SurchargeParams,
    range: ScenarioRange,
) -> impl Iterator<Item = ScenarioRow> + '_ {
    let precision = Precision::new(2);
    (range.min..=range.max).map(move |pct| {
        let fraction = Decimal::from(pct) / Decimal::ONE_HUNDRED;
        let monto_neto = simplified_net(monto_efectivo, fraction, params, precision);
        ScenarioRow {
            recargo_porcentaje: pct,
            monto_con_recargo: monto_efectivo * (Decimal::ONE + fraction),
            monto_neto,
            diferencia_neto: monto_neto - monto_efectivo,
            es_igual_o_superior: monto_neto >= monto_efectivo,
        }
    })
}
