use anyhow::Result;
use once_cell::sync::{Lazy, OnceCell};

use crate::embedding::EmbeddingModel;

/// A single canned question-and-answer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeEntry {
  pub title: &'static str,
  pub summary: &'static str,
  pub body: &'static str,
}

impl KnowledgeEntry {
  /// The text handed to the embedding provider for this entry.
  pub fn embedding_text(&self) -> String {
    format!("{} {} {}", self.title, self.summary, self.body)
  }
}

/// The fixed answer set. Order matters: the matcher breaks ties toward
/// the earliest entry.
const ENTRIES: [KnowledgeEntry; 5] = [
  KnowledgeEntry {
    title: "What is Virtual Fencing",
    summary: "GPS collars replace physical barriers",
    body: "Virtual fencing contains livestock with GPS-enabled collars instead of physical \
           barriers. Each animal wears a collar that knows the pasture boundary you draw in a map \
           application; when an animal approaches the line the collar plays an audio cue, and if \
           it keeps going the collar delivers a mild electric pulse. Boundaries can be redrawn \
           from a phone in minutes without driving a single post.",
  },
  KnowledgeEntry {
    title: "Cost of VF",
    summary: "What virtual fencing costs to buy and run",
    body: "How much you pay for virtual fencing depends on herd size and acreage. Expect an \
           upfront cost for collars and a base station, plus a subscription cost per head for the \
           satellite and software service. The total price scales with the number of collared \
           animals, so cost per acre falls as ranches get larger. Offsetting the expense, \
           controlled grazing recovers forage value on every acre you manage.",
  },
  KnowledgeEntry {
    title: "Rotational Grazing Benefits",
    summary: "Why moving the herd pays off",
    body: "Rotational grazing moves the herd through smaller paddocks so each one rests and \
           regrows before it is grazed again. Rested pasture produces more forage, holds soil \
           moisture, and carries more head per acre across a season. Virtual boundaries make \
           rotations practical on terrain where building interior paddock fences never penciled \
           out.",
  },
  KnowledgeEntry {
    title: "Animal Welfare and Training",
    summary: "How cattle learn the collars",
    body: "Cattle learn the audio cue within a few days of wearing a collar. Training starts in a \
           small familiar paddock where animals associate the warning tone with the boundary; \
           after that most animals turn back on the tone alone and pulses become rare. Collars \
           are sized to the animal, and welfare studies show stress responses comparable to \
           conventional electric fencing.",
  },
  KnowledgeEntry {
    title: "Virtual vs Metal Fencing",
    summary: "How the two approaches differ day to day",
    body: "A metal perimeter fence is a one-time build that then demands ongoing repair: posts \
           heave, wire sags, and storm damage has to be walked and fixed. Virtual boundaries need \
           no materials or labor to move, follow terrain that is impractical to fence, and shift \
           with the season. Most ranches keep a physical perimeter along roads and property lines \
           and use virtual lines for interior management.",
  },
];

/// The fixed, ordered answer set with embeddings computed once per
/// process. Entries are pure data; there is nothing to tear down.
pub struct KnowledgeBase {
  entries: &'static [KnowledgeEntry],
  embeddings: OnceCell<Vec<Vec<f32>>>,
}

impl Default for KnowledgeBase {
  fn default() -> Self {
    Self::new()
  }
}

impl KnowledgeBase {
  pub fn new() -> Self {
    Self { entries: &ENTRIES, embeddings: OnceCell::new() }
  }

  pub fn entries(&self) -> &[KnowledgeEntry] {
    self.entries
  }

  /// Embeddings for every entry, in entry order. Computed through the
  /// given provider on first access and cached for the life of the
  /// process; concurrent first access computes exactly once. A provider
  /// failure leaves the cache empty so a later call can retry.
  pub fn embeddings(&self, model: &mut dyn EmbeddingModel) -> Result<&[Vec<f32>]> {
    let vectors = self.embeddings.get_or_try_init(|| {
      let texts: Vec<String> = self.entries.iter().map(KnowledgeEntry::embedding_text).collect();
      tracing::debug!(count = texts.len(), "computing knowledge-base embeddings");
      model.compute_embeddings(&texts)
    })?;
    Ok(vectors)
  }
}

/// Embedding text for every entry, used to prime the lexical provider.
pub fn embedding_corpus() -> Vec<String> {
  ENTRIES.iter().map(KnowledgeEntry::embedding_text).collect()
}

/// Process-wide knowledge base instance.
pub fn shared() -> &'static KnowledgeBase {
  static SHARED: Lazy<KnowledgeBase> = Lazy::new(KnowledgeBase::new);
  &SHARED
}
