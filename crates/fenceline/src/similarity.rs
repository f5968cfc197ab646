/// Calculate cosine similarity between two embeddings.
///
/// Returns 0.0 for mismatched lengths or zero-magnitude vectors, which
/// ranks such pairs below any genuinely similar pair.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
  if a.len() != b.len() {
    return 0.0;
  }

  let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
  let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
  let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

  if magnitude_a == 0.0 || magnitude_b == 0.0 {
    0.0
  } else {
    dot / (magnitude_a * magnitude_b)
  }
}
