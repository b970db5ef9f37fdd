//! # recargo-core: Card Surcharge Calculations
//!
//! Everything needed to price a card payment against its cash equivalent:
//! the fee/tax pipeline, the automatic surcharge solver and the scenario
//! table. Pure functions only; no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Surcharge Calculator                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    recargo-cli (apps/)                          │   │
//! │  │   settings ──► catalog.toml ──► calcular / recargo / escenarios │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &Catalog, CalcRequest                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ recargo-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ catalog  │─►│  engine  │◄─│  solver  │◄─│  scenarios   │   │   │
//! │  │   │ lookups  │  │ F,H,J,L, │  │ bisection│  │ 0%..20% rows │   │   │
//! │  │   │ windows  │  │ N,P,R,S  │  │ ceil(%)  │  │              │   │   │
//! │  │   └──────────┘  └────┬─────┘  └──────────┘  └──────────────┘   │   │
//! │  │                      │                                          │   │
//! │  │               money (rounding, es-AR format)                    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Rates, inputs and result records
//! - [`money`] - Step-wise rounding and display formatting
//! - [`engine`] - The fee/tax/net formula pipeline
//! - [`solver`] - Automatic surcharge search
//! - [`scenarios`] - Net amount per whole surcharge percentage
//! - [`catalog`] - Plans, interest and parameters with validity windows
//! - [`validation`] - Boundary checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Decimal Money**: amounts and rates are `rust_decimal::Decimal`, never floats
//! 2. **Round Every Step**: each intermediate figure is rounded before it is reused
//! 3. **Infallible Math**: the engine, solver and scenarios never fail; validation is separate
//! 4. **Explicit Context**: catalog records are passed in, never fetched
//!
//! ## Example Usage
//!
//! ```rust
//! use recargo_core::engine::calculate;
//! use recargo_core::types::{BaseIibb, BaseIva, CalcInput, RateConfig};
//! use rust_decimal_macros::dec;
//!
//! let rates = RateConfig {
//!     pct_comision: dec!(0.018),
//!     pct_arancel: dec!(0.1104),
//!     pct_iva: dec!(0.21),
//!     pct_iibb: dec!(0.05),
//!     base_iva: BaseIva::ComisionArancel,
//!     base_iibb: BaseIibb::MontoTarjeta,
//!     cuotas: 6,
//! };
//! let input = CalcInput {
//!     monto_efectivo: dec!(10000),
//!     recargo_cliente_pct: dec!(0.20),
//!     cuotas: 6,
//! };
//!
//! let result = calculate(&input, &rates, None, None);
//! assert_eq!(result.monto_con_tarjeta, dec!(12000));
//! assert_eq!(result.monto_neto, dec!(9535.63));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod error;
pub mod money;
pub mod scenarios;
pub mod solver;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Calculation, Catalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Precision;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Decimal places used when no global parameters are in force.
pub const DEFAULT_DECIMALS: u32 = 2;

/// Most decimal places a global parameters record may ask for.
pub const MAX_ROUNDING_DECIMALS: u32 = 4;

/// Upper bound on bisection steps.
///
/// Halving `[0, 100]` down to a 0.001 bracket takes 17 steps; the cap only
/// matters for a net function that never settles.
pub const MAX_SOLVER_ITERATIONS: usize = 20;

/// Smallest cash amount a request may carry.
pub const MIN_CASH_AMOUNT: Decimal = dec!(0.01);

/// Largest cash amount a request may carry.
///
/// Keeps every product in the pipeline and the solver well inside
/// `Decimal`'s range.
pub const MAX_CASH_AMOUNT: Decimal = dec!(1_000_000_000_000);

/// Largest customer surcharge a request may carry (200%).
pub const MAX_CUSTOMER_SURCHARGE: Decimal = dec!(2);

/// Largest percentage a scenario table may reach.
pub const MAX_SCENARIO_PERCENT: u32 = 100;
