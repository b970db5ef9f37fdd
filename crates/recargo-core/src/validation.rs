//! # Validation Module
//!
//! Boundary checks for requests and catalog records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / file parsing                                            │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── Unknown enum values rejected by serde                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Ranges (amount ≥ 0.01, surcharge ≤ 200%, rates in [0, 1])          │
//! │  └── Required names, validity windows                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine                                                        │
//! │  └── NO checks: any numbers in, numbers out                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use recargo_core::types::CalcRequest;
//! use recargo_core::validation::validate_calc_request;
//! use rust_decimal_macros::dec;
//!
//! let request = CalcRequest {
//!     plan_id: 1,
//!     monto_efectivo: dec!(10000),
//!     recargo_cliente_pct: dec!(0.20),
//!     cuotas: 6,
//! };
//! assert!(validate_calc_request(&request).is_ok());
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::catalog::{Card, Company, GlobalParamsRecord, InterestRecord, Plan};
use crate::error::ValidationError;
use crate::types::{CalcRequest, ScenarioRange};
use crate::{
    MAX_CASH_AMOUNT, MAX_CUSTOMER_SURCHARGE, MAX_ROUNDING_DECIMALS, MAX_SCENARIO_PERCENT,
    MIN_CASH_AMOUNT,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Request Validators
// =============================================================================

/// Validates a calculation request.
///
/// ## Rules
/// - `montoEfectivo` between 0.01 and [`MAX_CASH_AMOUNT`]
/// - `recargoClientePct` between 0 and 2 (0% to 200%)
/// - `cuotas` at least 1
///
/// ## Example
/// ```rust
/// use recargo_core::types::CalcRequest;
/// use recargo_core::validation::validate_calc_request;
/// use rust_decimal_macros::dec;
///
/// let request = CalcRequest {
///     plan_id: 1,
///     monto_efectivo: dec!(0),
///     recargo_cliente_pct: dec!(0.10),
///     cuotas: 1,
/// };
/// assert!(validate_calc_request(&request).is_err());
/// ```
pub fn validate_calc_request(request: &CalcRequest) -> ValidationResult<()> {
    validate_cash_amount(request.monto_efectivo)?;
    in_range(
        "recargoClientePct",
        request.recargo_cliente_pct,
        Decimal::ZERO,
        MAX_CUSTOMER_SURCHARGE,
    )?;
    positive_count("cuotas", request.cuotas)
}

/// Validates the cash amount fed to the engine, the solver or a scenario
/// table: between 0.01 and [`MAX_CASH_AMOUNT`].
pub fn validate_cash_amount(monto_efectivo: Decimal) -> ValidationResult<()> {
    at_least("montoEfectivo", monto_efectivo, MIN_CASH_AMOUNT)?;
    if monto_efectivo > MAX_CASH_AMOUNT {
        return Err(ValidationError::TooLarge {
            field: "montoEfectivo".to_string(),
            max: MAX_CASH_AMOUNT,
            value: monto_efectivo,
        });
    }
    Ok(())
}

/// Validates a scenario range: `min <= max <= 100`.
pub fn validate_scenario_range(range: &ScenarioRange) -> ValidationResult<()> {
    if range.min > range.max {
        return Err(ValidationError::InvalidRange {
            field: "escenarios".to_string(),
            min: range.min,
            max: range.max,
        });
    }
    if range.max > MAX_SCENARIO_PERCENT {
        return Err(ValidationError::CountOutOfRange {
            field: "max".to_string(),
            min: range.min,
            max: MAX_SCENARIO_PERCENT,
            value: range.max,
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a company record: the name is required.
pub fn validate_company(company: &Company) -> ValidationResult<()> {
    required("nombre", &company.nombre)
}

/// Validates a card record: the name is required.
pub fn validate_card(card: &Card) -> ValidationResult<()> {
    required("nombre", &card.nombre)
}

/// Validates a plan record.
///
/// ## Rules
/// - Name is required
/// - `cuotas` at least 1
/// - Every rate between 0 and 1
/// - `vigenciaHasta`, when set, not before `vigenciaDesde`
pub fn validate_plan(plan: &Plan) -> ValidationResult<()> {
    required("nombre", &plan.nombre)?;
    positive_count("cuotas", plan.rates.cuotas)?;

    let rates = &plan.rates;
    for (field, value) in [
        ("pctComision", rates.pct_comision),
        ("pctArancel", rates.pct_arancel),
        ("pctIVA", rates.pct_iva),
        ("pctIIBB", rates.pct_iibb),
    ] {
        in_range(field, value, Decimal::ZERO, Decimal::ONE)?;
    }

    window("plan", plan.vigencia_desde, plan.vigencia_hasta)
}

/// Validates an installment interest record: `cuotas >= 1`, rates `>= 0`.
pub fn validate_interest(record: &InterestRecord) -> ValidationResult<()> {
    positive_count("cuotas", record.cuotas)?;
    at_least("interesTaller", record.interes_taller, Decimal::ZERO)?;
    at_least("interesReal", record.interes_real, Decimal::ZERO)?;
    window("interes", record.vigencia_desde, record.vigencia_hasta)
}

/// Validates a global parameters record.
///
/// ## Rules
/// - `pctIVAporDefecto` between 0 and 1
/// - `redondeoDecimales` between 0 and 4
pub fn validate_global_params(record: &GlobalParamsRecord) -> ValidationResult<()> {
    in_range(
        "pctIVAporDefecto",
        record.pct_iva_por_defecto,
        Decimal::ZERO,
        Decimal::ONE,
    )?;
    if record.redondeo_decimales > MAX_ROUNDING_DECIMALS {
        return Err(ValidationError::CountOutOfRange {
            field: "redondeoDecimales".to_string(),
            min: 0,
            max: MAX_ROUNDING_DECIMALS,
            value: record.redondeo_decimales,
        });
    }
    window(
        "parametrosGlobales",
        record.vigencia_desde,
        record.vigencia_hasta,
    )
}

// =============================================================================
// Primitive Checks
// =============================================================================

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn positive_count(field: &str, value: u32) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn at_least(field: &str, value: Decimal, min: Decimal) -> ValidationResult<()> {
    if value < min {
        return Err(ValidationError::TooSmall {
            field: field.to_string(),
            min,
            value,
        });
    }
    Ok(())
}

fn in_range(field: &str, value: Decimal, min: Decimal, max: Decimal) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        });
    }
    Ok(())
}

fn window(
    field: &str,
    desde: Option<DateTime<Utc>>,
    hasta: Option<DateTime<Utc>>,
) -> ValidationResult<()> {
    if let (Some(desde), Some(hasta)) = (desde, hasta) {
        if hasta < desde {
            return Err(ValidationError::InvalidWindow {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BaseIibb, BaseIva, RateConfig};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn request() -> CalcRequest {
        CalcRequest {
            plan_id: 1,
            monto_efectivo: dec!(10000),
            recargo_cliente_pct: dec!(0.20),
            cuotas: 6,
        }
    }

    fn plan() -> Plan {
        Plan {
            id: 1,
            empresa_id: 1,
            tarjeta_id: 1,
            nombre: "6 cuotas".to_string(),
            codigo_operativo: None,
            rates: RateConfig {
                pct_comision: dec!(0.032),
                pct_arancel: dec!(0.01),
                pct_iva: dec!(0.21),
                pct_iibb: dec!(0.015),
                base_iva: BaseIva::ComisionArancel,
                base_iibb: BaseIibb::MontoTarjeta,
                cuotas: 6,
            },
            activo: true,
            vigencia_desde: None,
            vigencia_hasta: None,
        }
    }

    #[test]
    fn test_validate_calc_request() {
        assert!(validate_calc_request(&request()).is_ok());

        let edge = CalcRequest {
            monto_efectivo: dec!(0.01),
            recargo_cliente_pct: dec!(2),
            cuotas: 1,
            ..request()
        };
        assert!(validate_calc_request(&edge).is_ok());

        let too_small = CalcRequest {
            monto_efectivo: dec!(0.009),
            ..request()
        };
        assert!(matches!(
            validate_calc_request(&too_small),
            Err(ValidationError::TooSmall { .. })
        ));

        let too_much = CalcRequest {
            recargo_cliente_pct: dec!(2.01),
            ..request()
        };
        assert!(validate_calc_request(&too_much).is_err());

        let negative = CalcRequest {
            recargo_cliente_pct: dec!(-0.01),
            ..request()
        };
        assert!(validate_calc_request(&negative).is_err());

        let no_cuotas = CalcRequest {
            cuotas: 0,
            ..request()
        };
        assert!(matches!(
            validate_calc_request(&no_cuotas),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_validate_plan() {
        assert!(validate_plan(&plan()).is_ok());

        let mut unnamed = plan();
        unnamed.nombre = "   ".to_string();
        assert!(matches!(
            validate_plan(&unnamed),
            Err(ValidationError::Required { .. })
        ));

        let mut huge_rate = plan();
        huge_rate.rates.pct_arancel = dec!(1.5);
        assert!(validate_plan(&huge_rate).is_err());

        let mut zero_cuotas = plan();
        zero_cuotas.rates.cuotas = 0;
        assert!(validate_plan(&zero_cuotas).is_err());
    }

    #[test]
    fn test_validate_plan_window() {
        let mut backwards = plan();
        backwards.vigencia_desde = Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        backwards.vigencia_hasta = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert!(matches!(
            validate_plan(&backwards),
            Err(ValidationError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_validate_interest() {
        let record = InterestRecord {
            id: 1,
            cuotas: 6,
            interes_taller: dec!(0.30),
            interes_real: dec!(0.25),
            vigencia_desde: None,
            vigencia_hasta: None,
        };
        assert!(validate_interest(&record).is_ok());

        let negative = InterestRecord {
            interes_real: dec!(-0.1),
            ..record.clone()
        };
        assert!(validate_interest(&negative).is_err());

        let zero = InterestRecord { cuotas: 0, ..record };
        assert!(validate_interest(&zero).is_err());
    }

    #[test]
    fn test_validate_global_params() {
        let record = GlobalParamsRecord {
            id: 1,
            pct_iva_por_defecto: dec!(0.21),
            incluir_iva_como_costo: false,
            redondeo_decimales: 2,
            vigencia_desde: None,
            vigencia_hasta: None,
        };
        assert!(validate_global_params(&record).is_ok());

        let five = GlobalParamsRecord {
            redondeo_decimales: 5,
            ..record.clone()
        };
        assert!(matches!(
            validate_global_params(&five),
            Err(ValidationError::CountOutOfRange { .. })
        ));

        let iva = GlobalParamsRecord {
            pct_iva_por_defecto: dec!(1.21),
            ..record
        };
        assert!(validate_global_params(&iva).is_err());
    }

    #[test]
    fn test_validate_scenario_range() {
        assert!(validate_scenario_range(&ScenarioRange::default()).is_ok());
        assert!(validate_scenario_range(&ScenarioRange { min: 0, max: 100 }).is_ok());
        assert!(validate_scenario_range(&ScenarioRange { min: 5, max: 5 }).is_ok());
        assert!(matches!(
            validate_scenario_range(&ScenarioRange { min: 0, max: 101 }),
            Err(ValidationError::CountOutOfRange { value: 101, .. })
        ));

        let err = validate_scenario_range(&ScenarioRange { min: 10, max: 5 }).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRange { min: 10, max: 5, .. }));
        assert_eq!(err.to_string(), "escenarios: range start 10 is after its end 5");
    }

    #[test]
    fn test_validate_cash_amount() {
        assert!(validate_cash_amount(dec!(0.01)).is_ok());
        assert!(validate_cash_amount(MAX_CASH_AMOUNT).is_ok());
        assert!(matches!(
            validate_cash_amount(Decimal::ZERO),
            Err(ValidationError::TooSmall { .. })
        ));
        assert!(matches!(
            validate_cash_amount(MAX_CASH_AMOUNT + dec!(0.01)),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_oversized_request_rejected() {
        let huge = CalcRequest {
            monto_efectivo: dec!(30000000000000000000000000000),
            recargo_cliente_pct: dec!(2),
            ..request()
        };
        let err = validate_calc_request(&huge).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));
        assert_eq!(
            err.to_string(),
            "montoEfectivo must be at most 1000000000000, got 30000000000000000000000000000"
        );
    }

    #[test]
    fn test_names_required() {
        assert!(validate_company(&Company {
            id: 1,
            nombre: "Nave".to_string()
        })
        .is_ok());
        assert!(validate_card(&Card {
            id: 1,
            nombre: String::new()
        })
        .is_err());
    }
}
