//! # Error Types
//!
//! Domain-specific error types for recargo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  recargo-core errors (this file)                                        │
//! │  ├── CoreError        - Catalog resolution failures                     │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  recargo-cli errors (in app)                                            │
//! │  └── CliError         - Settings / catalog file loading                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine, the solver and the scenario table never fail: any numeric
//! input yields numeric output. Errors only come from looking things up in
//! the [`crate::catalog::Catalog`] and from boundary validation.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while resolving a calculation against the catalog.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No plan with this id exists in the catalog.
    #[error("Plan not found: {0}")]
    PlanNotFound(u32),

    /// The plan exists but is switched off.
    #[error("Plan {0} is inactive")]
    PlanInactive(u32),

    /// The request asks for a different number of installments than the plan offers.
    ///
    /// ## When This Occurs
    /// ```text
    /// calcular --plan 3 --cuotas 12
    ///      │
    ///      ▼
    /// Plan 3 is "3 cuotas sin interés"
    ///      │
    ///      ▼
    /// InstallmentMismatch { plan_id: 3, plan_cuotas: 3, requested: 12 }
    /// ```
    #[error("Plan {plan_id} has {plan_cuotas} installments, requested {requested}")]
    InstallmentMismatch {
        plan_id: u32,
        plan_cuotas: u32,
        requested: u32,
    },

    /// A plan references a company that is not in the catalog.
    #[error("Plan {plan_id} references unknown company {empresa_id}")]
    UnknownCompany { plan_id: u32, empresa_id: u32 },

    /// A plan references a card that is not in the catalog.
    #[error("Plan {plan_id} references unknown card {tarjeta_id}")]
    UnknownCard { plan_id: u32, tarjeta_id: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary, before any figure is computed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Decimal value is outside its allowed range (inclusive).
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
        value: Decimal,
    },

    /// Decimal value is below its minimum (inclusive).
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: String,
        min: Decimal,
        value: Decimal,
    },

    /// Decimal value is above its maximum (inclusive).
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: String,
        max: Decimal,
        value: Decimal,
    },

    /// Integer count is outside its allowed range (inclusive).
    #[error("{field} must be between {min} and {max}, got {value}")]
    CountOutOfRange {
        field: String,
        min: u32,
        max: u32,
        value: u32,
    },

    /// A range starts after it ends.
    #[error("{field}: range start {min} is after its end {max}")]
    InvalidRange { field: String, min: u32, max: u32 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A validity window ends before it starts.
    #[error("{field}: validity ends before it starts")]
    InvalidWindow { field: String },

    /// Duplicate id within one catalog table.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
