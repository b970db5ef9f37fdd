//! Catalog file loading.
//!
//! The catalog is a TOML document with `[[companies]]`, `[[cards]]`,
//! `[[plans]]`, `[[interest]]` and `[[global_params]]` tables. Record keys
//! use the same camelCase names as the JSON output (`empresaId`, `pctIVA`,
//! `vigenciaDesde`, ...). Dates are RFC 3339 strings.

use std::path::Path;

use recargo_core::Catalog;
use tracing::{debug, info};

use crate::error::CliError;

/// Reads, parses and validates the catalog at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, CliError> {
    debug!(?path, "Reading catalog");
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&contents, path)?;
    info!(
        ?path,
        plans = catalog.plans.len(),
        interest = catalog.interest.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

/// Parses and validates catalog text; `path` is only used in errors.
pub fn parse_catalog(contents: &str, path: &Path) -> Result<Catalog, CliError> {
    let catalog: Catalog = toml::from_str(contents).map_err(|source| CliError::CatalogParse {
        path: path.to_path_buf(),
        source,
    })?;
    catalog.validate()?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::{TimeZone, Utc};
    use recargo_core::{BaseIva, CoreError};
    use rust_decimal_macros::dec;

    const SAMPLE: &str = include_str!("../catalog.example.toml");

    fn sample() -> Catalog {
        parse_catalog(SAMPLE, Path::new("catalog.example.toml")).unwrap()
    }

    #[test]
    fn test_sample_catalog_loads() {
        let catalog = sample();
        assert_eq!(catalog.companies.len(), 2);
        assert_eq!(catalog.cards.len(), 2);
        assert_eq!(catalog.plans.len(), 11);
        assert_eq!(catalog.interest.len(), 6);
        assert_eq!(catalog.global_params.len(), 1);
    }

    #[test]
    fn test_sample_plan_fields() {
        let catalog = sample();
        let plan_z = catalog.plan(6).unwrap();
        assert_eq!(plan_z.nombre, "Plan Z");
        assert_eq!(plan_z.codigo_operativo.as_deref(), Some("11"));
        assert_eq!(plan_z.rates.cuotas, 11);
        assert_eq!(plan_z.rates.pct_comision, dec!(0.045));
        assert_eq!(plan_z.rates.base_iva, BaseIva::ComisionArancel);
        assert_eq!(
            plan_z.vigencia_desde,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_sample_interest_in_force() {
        let catalog = sample();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let interest = catalog.interest_at(12, now).unwrap();
        assert_eq!(interest.interes_taller, dec!(0.60));
        assert_eq!(interest.interes_real, dec!(0.50));
        assert!(catalog.global_params_at(now).is_some());
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let err = parse_catalog("[[plans]]\nid = \"x\"\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, CliError::CatalogParse { .. }));
        assert_eq!(err.code(), ErrorCode::ConfigError);
    }

    #[test]
    fn test_dangling_company_rejected() {
        let text = SAMPLE.replacen("empresaId = 1", "empresaId = 9", 1);
        let err = parse_catalog(&text, Path::new("catalog.toml")).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(CoreError::UnknownCompany { empresa_id: 9, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/recargo/catalog.toml")).unwrap_err();
        assert!(matches!(err, CliError::CatalogRead { .. }));
    }
}
