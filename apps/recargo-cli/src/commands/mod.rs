//! # Commands
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (dispatch)
//! ├── calcular.rs   ◄─── Full breakdown for one plan
//! ├── recargo.rs    ◄─── Automatic surcharge
//! ├── escenarios.rs ◄─── Net per surcharge percentage
//! └── planes.rs     ◄─── Active plan listing
//! ```
//!
//! Every command takes the loaded [`Catalog`] and returns a [`Report`];
//! printing is left to [`crate::output`].

pub mod calcular;
pub mod escenarios;
pub mod planes;
pub mod recargo;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use recargo_core::Catalog;
use tracing::debug;

use crate::error::CliError;
use crate::output::Report;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fee, tax and net breakdown for a plan
    Calcular(calcular::CalcularArgs),
    /// Smallest whole surcharge that keeps the net at the cash amount
    Recargo(recargo::RecargoArgs),
    /// Net amount for each surcharge percentage in a range
    Escenarios(escenarios::EscenariosArgs),
    /// List active plans
    Planes(planes::PlanesArgs),
}

impl Command {
    /// Runs the command against `catalog`; `now` selects the records in force.
    pub fn run(&self, catalog: &Catalog, now: DateTime<Utc>) -> Result<Report, CliError> {
        debug!(command = ?self, "Running command");
        match self {
            Command::Calcular(args) => calcular::run(args, catalog, now),
            Command::Recargo(args) => recargo::run(args, catalog),
            Command::Escenarios(args) => escenarios::run(args, catalog),
            Command::Planes(args) => Ok(planes::run(args, catalog)),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use recargo_core::Catalog;

    use crate::catalog_file::parse_catalog;

    pub fn sample_catalog() -> Catalog {
        parse_catalog(
            include_str!("../../catalog.example.toml"),
            Path::new("catalog.example.toml"),
        )
        .unwrap()
    }
}
