//! # Output Rendering
//!
//! Every command produces a [`Report`]; this module prints it either as
//! pretty JSON (camelCase wire names) or as an es-AR formatted table.

use std::fmt::Write as _;

use recargo_core::money::{format_currency, format_percentage};
use recargo_core::{Calculation, ScenarioRow};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CliError;
use crate::settings::OutputFormat;

/// Result of one command, ready to print.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Calculation(CalculationReport),
    Surcharge(SurchargeReport),
    Scenarios(ScenarioReport),
    Plans(Vec<PlanSummary>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationReport {
    #[serde(flatten)]
    pub calculation: Calculation,
    /// Surcharge picked by the solver when `--auto` was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recargo_auto: Option<u32>,
}

/// Which net formula drove the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverMethod {
    Completo,
    Simplificado,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurchargeReport {
    pub plan_id: u32,
    pub monto_efectivo: Decimal,
    pub recargo_porcentaje: u32,
    pub metodo: SolverMethod,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub plan_id: u32,
    pub monto_efectivo: Decimal,
    pub escenarios: Vec<ScenarioRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub id: u32,
    pub empresa: String,
    pub tarjeta: String,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_operativo: Option<String>,
    pub cuotas: u32,
    /// Fee + tax rate on the card amount (comisión + arancel + IIBB + IVA on fees).
    pub costo_total_porcentaje: Decimal,
}

/// Renders a report in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(render_table(report)),
    }
}

fn render_table(report: &Report) -> String {
    let mut out = String::new();
    match report {
        Report::Calculation(report) => calculation_table(&mut out, report),
        Report::Surcharge(report) => {
            let _ = writeln!(
                out,
                "Recargo sugerido para {} en plan {}: {}% ({})",
                format_currency(report.monto_efectivo),
                report.plan_id,
                report.recargo_porcentaje,
                match report.metodo {
                    SolverMethod::Completo => "cálculo completo",
                    SolverMethod::Simplificado => "cálculo simplificado",
                }
            );
        }
        Report::Scenarios(report) => scenario_table(&mut out, report),
        Report::Plans(plans) => plan_table(&mut out, plans),
    }
    out
}

fn line(out: &mut String, label: &str, value: String) {
    let _ = writeln!(out, "{label:<22}{value:>20}");
}

fn calculation_table(out: &mut String, report: &CalculationReport) {
    let calc = &report.calculation;
    let r = &calc.result;

    let _ = writeln!(out, "Plan {} · {}", calc.plan.id, calc.plan.nombre);
    line(out, "Monto efectivo", format_currency(calc.input.monto_efectivo));
    let recargo = format_percentage(calc.input.recargo_cliente_pct);
    match report.recargo_auto {
        Some(_) => line(out, "Recargo (auto)", recargo),
        None => line(out, "Recargo cliente", recargo),
    }
    line(out, "Monto con tarjeta", format_currency(r.monto_con_tarjeta));
    line(out, "Comisión", format_currency(r.comision_pesos));
    line(out, "Arancel", format_currency(r.arancel_pesos));
    line(out, "IVA", format_currency(r.iva_r_pesos));
    line(out, "IIBB", format_currency(r.iibb_pesos));
    line(out, "Monto antes de IVA", format_currency(r.monto_antes_iva));
    line(out, "Monto neto", format_currency(r.monto_neto));
    line(out, "Costo total", format_currency(r.costo_total_pesos));
    line(out, "Costo total %", format_percentage(r.costo_total_porcentaje));
    line(
        out,
        "Valor cuota",
        format!("{} x {}", calc.input.cuotas, format_currency(r.valor_cuota)),
    );

    if let Some(info) = &r.interes_info {
        let _ = writeln!(out, "Interés por cuotas");
        line(out, "  Interés MIPOL", format_currency(info.interes_mipol));
        line(out, "  Interés cliente", format_currency(info.interes_cliente));
        line(out, "  Interés sistema", format_currency(info.interes_sistema));
        line(out, "  A cobrar al cliente", format_currency(info.monto_cobrar_cliente));
        line(out, "  Total sistema", format_currency(info.monto_total_sistema));
    }
}

fn scenario_table(out: &mut String, report: &ScenarioReport) {
    let _ = writeln!(
        out,
        "Plan {} · efectivo {}",
        report.plan_id,
        format_currency(report.monto_efectivo)
    );
    let _ = writeln!(
        out,
        "{:>4} {:>18} {:>18} {:>16}  {}",
        "%", "Con recargo", "Neto", "Diferencia", "Cubre"
    );
    for row in &report.escenarios {
        let _ = writeln!(
            out,
            "{:>4} {:>18} {:>18} {:>16}  {}",
            row.recargo_porcentaje,
            format_currency(row.monto_con_recargo),
            format_currency(row.monto_neto),
            format_currency(row.diferencia_neto),
            if row.es_igual_o_superior { "sí" } else { "no" }
        );
    }
}

fn plan_table(out: &mut String, plans: &[PlanSummary]) {
    if plans.is_empty() {
        let _ = writeln!(out, "No hay planes activos.");
        return;
    }
    let _ = writeln!(
        out,
        "{:>4}  {:<10} {:<16} {:<16} {:>6} {:>10}",
        "ID", "Empresa", "Tarjeta", "Plan", "Cuotas", "Costo"
    );
    for plan in plans {
        let _ = writeln!(
            out,
            "{:>4}  {:<10} {:<16} {:<16} {:>6} {:>10}",
            plan.id,
            plan.empresa,
            plan.tarjeta,
            plan.nombre,
            plan.cuotas,
            format_percentage(plan.costo_total_porcentaje)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scenarios() -> Report {
        Report::Scenarios(ScenarioReport {
            plan_id: 1,
            monto_efectivo: dec!(10000),
            escenarios: vec![
                ScenarioRow {
                    recargo_porcentaje: 6,
                    monto_con_recargo: dec!(10600),
                    monto_neto: dec!(9992.09),
                    diferencia_neto: dec!(-7.91),
                    es_igual_o_superior: false,
                },
                ScenarioRow {
                    recargo_porcentaje: 7,
                    monto_con_recargo: dec!(10700),
                    monto_neto: dec!(10086.35),
                    diferencia_neto: dec!(86.35),
                    es_igual_o_superior: true,
                },
            ],
        })
    }

    #[test]
    fn test_scenario_table() {
        let text = render(&scenarios(), OutputFormat::Table).unwrap();
        assert!(text.contains("$\u{a0}10.086,35"));
        assert!(text.contains("-$\u{a0}7,91"));
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().last().unwrap().ends_with("sí"));
    }

    #[test]
    fn test_scenario_json() {
        let text = render(&scenarios(), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["planId"], 1);
        assert_eq!(json["escenarios"][1]["recargoPorcentaje"], 7);
        assert_eq!(json["escenarios"][1]["esIgualOSuperior"], true);
        assert_eq!(json["escenarios"][0]["montoNeto"], serde_json::json!(9992.09));
    }

    #[test]
    fn test_surcharge_line() {
        let report = Report::Surcharge(SurchargeReport {
            plan_id: 3,
            monto_efectivo: dec!(10000),
            recargo_porcentaje: 8,
            metodo: SolverMethod::Completo,
        });
        let text = render(&report, OutputFormat::Table).unwrap();
        assert!(text.contains(": 8% (cálculo completo)"));

        let json: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["metodo"], "completo");
        assert_eq!(json["recargoPorcentaje"], 8);
    }

    #[test]
    fn test_empty_plan_list() {
        let text = render(&Report::Plans(Vec::new()), OutputFormat::Table).unwrap();
        assert_eq!(text.trim(), "No hay planes activos.");
        assert_eq!(render(&Report::Plans(Vec::new()), OutputFormat::Json).unwrap(), "[]");
    }
}
