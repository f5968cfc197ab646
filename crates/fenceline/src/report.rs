use colored::*;

use crate::cost::CostBreakdown;

/// Which fencing option a comparison favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceOption {
  Virtual,
  Metal,
}

impl FenceOption {
  pub fn label(&self) -> &'static str {
    match self {
      FenceOption::Virtual => "virtual",
      FenceOption::Metal => "metal",
    }
  }
}

/// One row of the comparison table.
#[derive(Debug, Clone)]
pub struct ReportRow {
  pub factor: &'static str,
  pub virtual_cell: String,
  pub metal_cell: String,
}

/// Side-by-side cost comparison between the two fencing options.
/// Produced and displayed within one request; nothing is retained.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
  pub rows: Vec<ReportRow>,
  pub virtual_total: f64,
  pub metal_total: f64,
  pub favor: FenceOption,
}

/// Assemble the fixed five-row comparison table and the verdict.
///
/// The verdict favors virtual fencing only when its total is strictly
/// lower; a tie favors metal.
pub fn build_report(vf: &CostBreakdown, mf: &CostBreakdown, horizon_periods: f64) -> ComparisonReport {
  let virtual_total = vf.total(horizon_periods);
  let metal_total = mf.total(horizon_periods);

  let rows = vec![
    ReportRow {
      factor: "Initial Setup Cost",
      virtual_cell: drover::money(vf.initial_setup),
      metal_cell: drover::money(mf.initial_setup),
    },
    ReportRow {
      factor: "Annual Maintenance Cost",
      virtual_cell: drover::money(vf.annual_upkeep),
      metal_cell: drover::money(mf.annual_upkeep),
    },
    ReportRow {
      factor: "Labor Savings",
      virtual_cell: drover::money(vf.labor_savings),
      metal_cell: drover::money(mf.labor_savings),
    },
    ReportRow {
      factor: "Grazing Benefits",
      virtual_cell: drover::money(vf.grazing_benefits),
      metal_cell: drover::money(mf.grazing_benefits),
    },
    ReportRow {
      factor: "Total Cost",
      virtual_cell: drover::money(virtual_total),
      metal_cell: drover::money(metal_total),
    },
  ];

  let favor =
    if virtual_total < metal_total { FenceOption::Virtual } else { FenceOption::Metal };

  ComparisonReport { rows, virtual_total, metal_total, favor }
}

/// Print the comparison table and the verdict line.
pub fn display(report: &ComparisonReport) {
  const VIRTUAL_HEADER: &str = "Virtual Fencing";
  const METAL_HEADER: &str = "Metal Fencing";

  let factor_width = report
    .rows
    .iter()
    .map(|row| row.factor.len())
    .max()
    .unwrap_or(0)
    .max("Cost Factor".len());
  let cell_width = report
    .rows
    .iter()
    .map(|row| row.virtual_cell.len().max(row.metal_cell.len()))
    .max()
    .unwrap_or(0)
    .max(VIRTUAL_HEADER.len());

  // Pad before coloring so ANSI codes do not skew the columns.
  println!(
    "{}  {}  {}",
    format!("{:<factor_width$}", "Cost Factor").bold(),
    format!("{VIRTUAL_HEADER:>cell_width$}").cyan().bold(),
    format!("{METAL_HEADER:>cell_width$}").yellow().bold(),
  );

  for row in &report.rows {
    let line = format!(
      "{:<factor_width$}  {:>cell_width$}  {:>cell_width$}",
      row.factor, row.virtual_cell, row.metal_cell
    );
    if row.factor == "Total Cost" {
      println!("{}", line.bold());
    } else {
      println!("{line}");
    }
  }

  println!();
  println!(
    "{} Favor: {} fencing ({} vs {})",
    "✓".green(),
    report.favor.label().bold(),
    drover::money(report.virtual_total),
    drover::money(report.metal_total),
  );
}

#[cfg(test)]
mod tests {
  use super::*;

  fn breakdown(setup: f64, upkeep: f64, savings: f64, benefits: f64) -> CostBreakdown {
    CostBreakdown {
      initial_setup: setup,
      annual_upkeep: upkeep,
      labor_savings: savings,
      grazing_benefits: benefits,
    }
  }

  #[test]
  fn report_has_the_five_fixed_rows_in_order() {
    let report = build_report(&breakdown(1.0, 2.0, 0.0, 3.0), &breakdown(4.0, 5.0, 0.0, 0.0), 20.0);

    let factors: Vec<&str> = report.rows.iter().map(|row| row.factor).collect();
    assert_eq!(
      factors,
      vec![
        "Initial Setup Cost",
        "Annual Maintenance Cost",
        "Labor Savings",
        "Grazing Benefits",
        "Total Cost"
      ]
    );
  }

  #[test]
  fn favor_tracks_the_strictly_cheaper_option() {
    let cheaper_virtual =
      build_report(&breakdown(100.0, 0.0, 0.0, 0.0), &breakdown(200.0, 0.0, 0.0, 0.0), 20.0);
    assert_eq!(cheaper_virtual.favor, FenceOption::Virtual);

    let cheaper_metal =
      build_report(&breakdown(300.0, 0.0, 0.0, 0.0), &breakdown(200.0, 0.0, 0.0, 0.0), 20.0);
    assert_eq!(cheaper_metal.favor, FenceOption::Metal);
  }

  #[test]
  fn a_tie_favors_metal() {
    let tied =
      build_report(&breakdown(200.0, 0.0, 0.0, 0.0), &breakdown(200.0, 0.0, 0.0, 0.0), 20.0);
    assert_eq!(tied.favor, FenceOption::Metal);
  }

  #[test]
  fn cells_carry_currency_formatting() {
    let report =
      build_report(&breakdown(2_500.0, 4_000.0, 0.0, 24_000.0), &breakdown(150_000.0, 500.0, 0.0, 0.0), 20.0);

    assert_eq!(report.rows[0].virtual_cell, "$2500.00");
    assert_eq!(report.rows[0].metal_cell, "$150000.00");
    assert_eq!(report.rows[4].virtual_cell, "$58500.00");
    assert_eq!(report.rows[4].metal_cell, "$160000.00");
  }

  #[test]
  fn negative_totals_render_as_is() {
    let report =
      build_report(&breakdown(100.0, 0.0, 0.0, 5_000.0), &breakdown(200.0, 0.0, 0.0, 0.0), 20.0);

    assert!(report.virtual_total < 0.0);
    assert_eq!(report.rows[4].virtual_cell, "-$4900.00");
    assert_eq!(report.favor, FenceOption::Virtual);
  }
}
