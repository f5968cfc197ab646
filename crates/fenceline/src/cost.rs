use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FencelineError;

/// Reported state of the ranch's existing perimeter fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FenceCondition {
  Excellent,
  Good,
  Fair,
  Poor,
}

impl FenceCondition {
  pub fn label(&self) -> &'static str {
    match self {
      FenceCondition::Excellent => "excellent",
      FenceCondition::Good => "good",
      FenceCondition::Fair => "fair",
      FenceCondition::Poor => "poor",
    }
  }
}

/// Rancher-supplied parameters for one comparison request. Built fresh
/// per request from shell input and never persisted.
#[derive(Debug, Clone)]
pub struct RanchProfile {
  pub ranch_size_acres: f64,
  pub exterior_fence_miles: f64,
  pub cattle_count: f64,
  pub fence_condition: FenceCondition,
  pub uses_rotational_grazing: bool,
  pub annual_maintenance_cost: f64,
}

/// Calibration constants for the cost formulas: fixed assumed real-world
/// rates, not derived values. Any subset can be overridden through the
/// JSON rates file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
  /// Forage value recovered per acre under collar-controlled grazing
  #[serde(default = "default_grazing_benefit_per_acre")]
  pub grazing_benefit_per_acre: f64,
  /// Virtual-fence hardware cost per acre at the reference acreage
  #[serde(default = "default_vf_cost_per_acre")]
  pub vf_cost_per_acre: f64,
  /// Collar subscription cost per head per billing period
  #[serde(default = "default_subscription_cost_per_head")]
  pub subscription_cost_per_head: f64,
  /// Installed metal fence cost per mile
  #[serde(default = "default_mf_cost_per_mile")]
  pub mf_cost_per_mile: f64,
  /// Numerator of the nonlinear setup-cost curve
  #[serde(default = "default_scaling_factor")]
  pub scaling_factor: f64,
  /// Acreage at which setup cost equals scaling_factor x vf_cost_per_acre
  #[serde(default = "default_reference_acreage")]
  pub reference_acreage: f64,
  /// Billing and maintenance periods aggregated into each total. Shared
  /// by both options so the two totals span the same horizon.
  #[serde(default = "default_horizon_periods")]
  pub horizon_periods: f64,
}

fn default_grazing_benefit_per_acre() -> f64 {
  20.0
}
fn default_vf_cost_per_acre() -> f64 {
  1.0
}
fn default_subscription_cost_per_head() -> f64 {
  40.0
}
fn default_mf_cost_per_mile() -> f64 {
  15_000.0
}
fn default_scaling_factor() -> f64 {
  25_000.0
}
fn default_reference_acreage() -> f64 {
  12_000.0
}
fn default_horizon_periods() -> f64 {
  20.0
}

impl Default for CostRates {
  fn default() -> Self {
    Self {
      grazing_benefit_per_acre: default_grazing_benefit_per_acre(),
      vf_cost_per_acre: default_vf_cost_per_acre(),
      subscription_cost_per_head: default_subscription_cost_per_head(),
      mf_cost_per_mile: default_mf_cost_per_mile(),
      scaling_factor: default_scaling_factor(),
      reference_acreage: default_reference_acreage(),
      horizon_periods: default_horizon_periods(),
    }
  }
}

/// One option's cost components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
  pub initial_setup: f64,
  pub annual_upkeep: f64,
  pub labor_savings: f64,
  pub grazing_benefits: f64,
}

impl CostBreakdown {
  /// Lifetime total over the given horizon: setup plus per-period upkeep,
  /// minus savings and benefits. May be negative when benefits exceed
  /// outlay; never clamped.
  pub fn total(&self, horizon_periods: f64) -> f64 {
    self.initial_setup + self.annual_upkeep * horizon_periods
      - self.labor_savings
      - self.grazing_benefits
  }
}

/// Reject profiles the cost model must not run on: comparisons need
/// strictly positive acreage and fence mileage, and every money or size
/// field must be a non-negative finite number.
pub fn validate(profile: &RanchProfile) -> Result<(), FencelineError> {
  let fields = [
    ("ranch size", profile.ranch_size_acres),
    ("exterior fencing", profile.exterior_fence_miles),
    ("cattle count", profile.cattle_count),
    ("annual maintenance cost", profile.annual_maintenance_cost),
  ];
  for (label, value) in fields {
    if !value.is_finite() || value < 0.0 {
      return Err(FencelineError::InvalidInput(format!("{label} must be a non-negative number")));
    }
  }

  if profile.ranch_size_acres <= 0.0 {
    return Err(FencelineError::InvalidInput(
      "ranch size must be greater than zero acres".to_string(),
    ));
  }
  if profile.exterior_fence_miles <= 0.0 {
    return Err(FencelineError::InvalidInput(
      "exterior fencing must be greater than zero miles".to_string(),
    ));
  }

  Ok(())
}

/// Cost components of virtual fencing for this ranch. Setup follows a
/// curve anchored at the reference acreage; upkeep is the per-head collar
/// subscription; grazing benefit accrues on every managed acre.
pub fn virtual_fence_breakdown(profile: &RanchProfile, rates: &CostRates) -> CostBreakdown {
  CostBreakdown {
    initial_setup: rates.scaling_factor
      * (profile.ranch_size_acres / rates.reference_acreage)
      * rates.vf_cost_per_acre,
    annual_upkeep: rates.subscription_cost_per_head * profile.cattle_count,
    labor_savings: 0.0,
    grazing_benefits: profile.ranch_size_acres * rates.grazing_benefit_per_acre,
  }
}

/// Cost components of a metal perimeter fence for this ranch.
pub fn metal_fence_breakdown(profile: &RanchProfile, rates: &CostRates) -> CostBreakdown {
  CostBreakdown {
    initial_setup: profile.exterior_fence_miles * rates.mf_cost_per_mile,
    annual_upkeep: profile.annual_maintenance_cost,
    labor_savings: 0.0,
    grazing_benefits: 0.0,
  }
}

/// Lifetime virtual-fence total over the configured horizon.
pub fn virtual_fence_cost(profile: &RanchProfile, rates: &CostRates) -> f64 {
  virtual_fence_breakdown(profile, rates).total(rates.horizon_periods)
}

/// Lifetime metal-fence total over the configured horizon.
pub fn metal_fence_cost(profile: &RanchProfile, rates: &CostRates) -> f64 {
  metal_fence_breakdown(profile, rates).total(rates.horizon_periods)
}
