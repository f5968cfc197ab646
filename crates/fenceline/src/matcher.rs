use anyhow::Result;

use crate::embedding::EmbeddingModel;
use crate::error::FencelineError;
use crate::knowledge::KnowledgeBase;
use crate::similarity::cosine_similarity;

/// The knowledge-base entry a query resolved to.
#[derive(Debug, Clone)]
pub struct QueryMatch {
  pub title: String,
  pub body: String,
  pub score: f32,
}

/// Match a free-text query against the knowledge base.
///
/// Encodes the query, scores it against each entry embedding by cosine
/// similarity, and returns the highest-scoring entry. Ties break to the
/// earliest entry in the fixed ordering. There is no "no match" outcome:
/// even a completely unrelated query resolves to the closest of the five.
///
/// Callers must not pass a blank query; the interaction shell rejects
/// those before any provider is constructed.
pub fn match_query(
  kb: &KnowledgeBase,
  model: &mut dyn EmbeddingModel,
  query: &str,
) -> Result<QueryMatch> {
  let entry_embeddings =
    kb.embeddings(model).map_err(|e| FencelineError::Embedding(format!("{e:#}")))?;

  let query_embedding = model
    .compute_embeddings(&[query.to_string()])
    .map_err(|e| FencelineError::Embedding(format!("{e:#}")))?
    .into_iter()
    .next()
    .ok_or_else(|| FencelineError::Embedding("no vector returned for the query".to_string()))?;

  let mut best_index = 0;
  let mut best_score = f32::NEG_INFINITY;
  for (index, embedding) in entry_embeddings.iter().enumerate() {
    let score = cosine_similarity(&query_embedding, embedding);
    tracing::debug!(index, score, "scored knowledge entry");
    if score > best_score {
      best_index = index;
      best_score = score;
    }
  }

  let entry = &kb.entries()[best_index];
  Ok(QueryMatch { title: entry.title.to_string(), body: entry.body.to_string(), score: best_score })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::embedding::{LexicalEmbeddingModel, MockEmbeddingModel};

  /// Mock wired so each entry embeds to a distinct basis vector.
  fn basis_mock(kb: &KnowledgeBase) -> MockEmbeddingModel {
    let mut mock = MockEmbeddingModel::new();
    for (index, entry) in kb.entries().iter().enumerate() {
      let mut vector = vec![0.0; 5];
      vector[index] = 1.0;
      mock = mock.with_vector_for(entry.embedding_text(), vector);
    }
    mock
  }

  #[test]
  fn returns_the_closest_entry() {
    let kb = KnowledgeBase::new();
    let mut mock =
      basis_mock(&kb).with_vector_for("tell me about collars", vec![0.1, 0.2, 0.9, 0.1, 0.0]);

    let matched = match_query(&kb, &mut mock, "tell me about collars").unwrap();
    assert_eq!(matched.title, kb.entries()[2].title);
    assert!(matched.score > 0.9);
  }

  #[test]
  fn ties_break_to_the_earliest_entry() {
    let kb = KnowledgeBase::new();
    let mut mock = MockEmbeddingModel::new();
    // First two entries share an embedding; the query hits both exactly.
    for (index, entry) in kb.entries().iter().enumerate() {
      let vector = match index {
        0 | 1 => vec![1.0, 0.0, 0.0],
        _ => vec![0.0, 1.0, 0.0],
      };
      mock = mock.with_vector_for(entry.embedding_text(), vector);
    }
    let mut mock = mock.with_vector_for("ambiguous", vec![1.0, 0.0, 0.0]);

    let matched = match_query(&kb, &mut mock, "ambiguous").unwrap();
    assert_eq!(matched.title, kb.entries()[0].title);
  }

  #[test]
  fn always_returns_one_of_the_fixed_titles() {
    let kb = KnowledgeBase::new();
    let titles: Vec<&str> = kb.entries().iter().map(|e| e.title).collect();

    let mut mock = basis_mock(&kb).with_fallback(vec![vec![0.3, -0.2, 0.8, 0.1, -0.5]]);
    let matched = match_query(&kb, &mut mock, "something else entirely").unwrap();
    assert!(titles.contains(&matched.title.as_str()));
  }

  #[test]
  fn repeated_queries_return_the_identical_title() {
    let kb = KnowledgeBase::new();
    let mut mock =
      basis_mock(&kb).with_vector_for("same question", vec![0.2, 0.9, 0.1, 0.0, 0.0]);

    let first = match_query(&kb, &mut mock, "same question").unwrap();
    let second = match_query(&kb, &mut mock, "same question").unwrap();
    assert_eq!(first.title, second.title);
  }

  #[test]
  fn pricing_question_resolves_to_the_cost_entry() {
    let kb = KnowledgeBase::new();
    let mut model = LexicalEmbeddingModel::from_knowledge();

    let matched = match_query(&kb, &mut model, "How much does virtual fencing cost?").unwrap();
    assert_eq!(matched.title, "Cost of VF");
  }

  #[test]
  fn unrelated_query_still_resolves_to_an_entry() {
    let kb = KnowledgeBase::new();
    let mut model = LexicalEmbeddingModel::from_knowledge();

    let matched = match_query(&kb, &mut model, "xylophone quartet rehearsal").unwrap();
    let titles: Vec<&str> = kb.entries().iter().map(|e| e.title).collect();
    assert!(titles.contains(&matched.title.as_str()));
  }
}
