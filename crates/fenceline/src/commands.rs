use anyhow::{anyhow, Result};
use colored::*;

use crate::config::Config;
use crate::cost::{self, RanchProfile};
use crate::embedding::EmbeddingModel;
use crate::error::FencelineError;
use crate::knowledge;
use crate::matcher;
use crate::report;

#[cfg(feature = "neural")]
fn embedding_model() -> Result<Box<dyn EmbeddingModel>> {
  Ok(Box::new(crate::embedding::OnnxEmbeddingModel::new()?))
}

#[cfg(not(feature = "neural"))]
fn embedding_model() -> Result<Box<dyn EmbeddingModel>> {
  Ok(Box::new(crate::embedding::LexicalEmbeddingModel::from_knowledge()))
}

/// Answer a free-text question from the canned knowledge set.
///
/// Blank questions are rejected here, before any embedding provider is
/// constructed or invoked.
pub fn ask(terms: &[String]) -> Result<()> {
  let query = terms.join(" ");
  if query.trim().is_empty() {
    return Err(FencelineError::EmptyQuery.into());
  }

  let mut model = embedding_model()?;
  let matched = matcher::match_query(knowledge::shared(), model.as_mut(), &query)?;

  println!(
    "=== {} {} ===",
    matched.title.cyan().bold(),
    format!("({:.2})", matched.score).green()
  );
  println!("{}", matched.body);
  Ok(())
}

/// Compare lifetime costs of virtual vs. metal fencing for a ranch.
pub fn compare(profile: &RanchProfile, config: &Config) -> Result<()> {
  cost::validate(profile)?;

  let vf = cost::virtual_fence_breakdown(profile, &config.rates);
  let mf = cost::metal_fence_breakdown(profile, &config.rates);
  let comparison = report::build_report(&vf, &mf, config.rates.horizon_periods);

  println!(
    "Ranch: {} acres, {} miles exterior fence, {} head",
    profile.ranch_size_acres, profile.exterior_fence_miles, profile.cattle_count
  );
  println!(
    "Fence condition: {}, rotational grazing: {}",
    profile.fence_condition.label(),
    if profile.uses_rotational_grazing { "yes" } else { "no" }
  );
  println!();
  report::display(&comparison);
  Ok(())
}

/// List the question titles the assistant can answer.
pub fn topics() -> Result<()> {
  for entry in knowledge::shared().entries() {
    println!("{}: {}", entry.title.cyan(), entry.summary);
  }
  Ok(())
}

/// Print one knowledge entry by its exact title.
pub fn show(title: &str) -> Result<()> {
  let kb = knowledge::shared();

  match kb.entries().iter().find(|entry| entry.title.eq_ignore_ascii_case(title)) {
    Some(entry) => {
      println!("=== {} ===", entry.title.cyan().bold());
      println!("{}", entry.body);
      Ok(())
    }
    None => Err(anyhow!("no entry titled '{title}'; run `fenceline topics` to list them")),
  }
}
