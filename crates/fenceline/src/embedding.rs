use std::collections::{HashMap, HashSet};

use anyhow::Result;

#[cfg(feature = "neural")]
use anyhow::anyhow;
#[cfg(feature = "neural")]
use ort::{
  session::{builder::GraphOptimizationLevel, Session},
  value::TensorRef,
};
#[cfg(feature = "neural")]
use tokenizers::Tokenizer;

/// Trait for computing text embeddings - allows swapping providers and
/// testing with scripted vectors. Vectors are fixed-length and consistent
/// across calls within one provider instance; the dimensionality itself
/// is a provider detail callers must not assume.
pub trait EmbeddingModel {
  fn compute_embeddings(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Common English stop words filtered out before weighting terms.
const STOP_WORDS: &[&str] = &[
  "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "over",
  "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
  "would", "could", "should", "you", "your", "we", "our", "us", "they", "them", "their", "it",
  "its",
];

/// Deterministic lexical embedding provider.
///
/// Builds a vocabulary and inverse-document-frequency weights from the
/// corpus it will be matched against, then embeds text as a
/// unit-normalized TF-IDF vector. Pure Rust and fully offline; the
/// default provider when the `neural` feature is disabled.
pub struct LexicalEmbeddingModel {
  vocabulary: HashMap<String, usize>,
  idf: Vec<f32>,
}

impl LexicalEmbeddingModel {
  /// Build vocabulary and document-frequency weights from a corpus.
  /// Vocabulary indices follow first appearance across the documents, so
  /// a fixed corpus always produces the same mapping.
  pub fn from_corpus<S: AsRef<str>>(documents: &[S]) -> Self {
    let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

    let mut vocabulary: HashMap<String, usize> = HashMap::new();
    let mut document_frequency: HashMap<String, usize> = HashMap::new();

    for tokens in &tokenized {
      for token in tokens {
        if !vocabulary.contains_key(token) {
          let index = vocabulary.len();
          vocabulary.insert(token.clone(), index);
        }
      }
      let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
      for token in unique {
        *document_frequency.entry(token.to_string()).or_insert(0) += 1;
      }
    }

    let document_count = documents.len().max(1) as f32;
    let mut idf = vec![0.0f32; vocabulary.len()];
    for (token, &index) in &vocabulary {
      let frequency = *document_frequency.get(token).unwrap_or(&0) as f32;
      idf[index] = (document_count / frequency.max(1.0)).ln() + 1.0;
    }

    Self { vocabulary, idf }
  }

  /// Provider primed with the knowledge-base vocabulary.
  pub fn from_knowledge() -> Self {
    Self::from_corpus(&crate::knowledge::embedding_corpus())
  }

  fn embed_one(&self, text: &str) -> Vec<f32> {
    let mut vector = vec![0.0f32; self.idf.len()];
    for token in tokenize(text) {
      if let Some(&index) = self.vocabulary.get(&token) {
        vector[index] += self.idf[index];
      }
    }
    normalize(&mut vector);
    vector
  }
}

impl EmbeddingModel for LexicalEmbeddingModel {
  fn compute_embeddings(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    Ok(texts.iter().map(|text| self.embed_one(text)).collect())
  }
}

/// Lowercase, split on non-alphanumeric boundaries, drop one-letter
/// fragments and stop words.
fn tokenize(text: &str) -> Vec<String> {
  text
    .to_lowercase()
    .split(|c: char| !c.is_alphanumeric())
    .filter(|word| word.len() > 1 && !STOP_WORDS.contains(word))
    .map(str::to_string)
    .collect()
}

/// Scale a vector to unit length in place; zero vectors stay zero.
fn normalize(vector: &mut [f32]) {
  let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
  if norm > 0.0 {
    for value in vector.iter_mut() {
      *value /= norm;
    }
  }
}

/// Neural sentence-embedding provider backed by all-MiniLM-L6-v2 over
/// ONNX Runtime. The model is fetched on first construction; the
/// tokenizer loads from `FENCELINE_TOKENIZER` or `data/tokenizer.json`.
#[cfg(feature = "neural")]
pub struct OnnxEmbeddingModel {
  session: Session,
  tokenizer: Tokenizer,
}

#[cfg(feature = "neural")]
impl OnnxEmbeddingModel {
  pub fn new() -> Result<Self> {
    ort::init()
      .with_name("fenceline-model")
      .commit()
      .map_err(|e| anyhow!("failed to initialize ONNX Runtime: {e}"))?;

    let session = Session::builder()
      .map_err(|e| anyhow!("failed to create session builder: {e}"))?
      .with_optimization_level(GraphOptimizationLevel::Level1)
      .map_err(|e| anyhow!("failed to set optimization level: {e}"))?
      .with_intra_threads(1)
      .map_err(|e| anyhow!("failed to set thread count: {e}"))?
      .commit_from_url("https://cdn.pyke.io/0/pyke:ort-rs/example-models@0.0.0/all-MiniLM-L6-v2.onnx")
      .map_err(|e| anyhow!("failed to load model: {e}"))?;

    let tokenizer_path = std::env::var("FENCELINE_TOKENIZER").map(std::path::PathBuf::from).unwrap_or_else(|_| {
      std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("tokenizer.json")
    });

    let tokenizer = Tokenizer::from_file(&tokenizer_path)
      .map_err(|e| anyhow!("failed to load tokenizer from {}: {e}", tokenizer_path.display()))?;

    Ok(Self { session, tokenizer })
  }
}

#[cfg(feature = "neural")]
impl EmbeddingModel for OnnxEmbeddingModel {
  fn compute_embeddings(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    if texts.is_empty() {
      return Ok(vec![]);
    }

    let encodings = self
      .tokenizer
      .encode_batch(texts.to_vec(), true)
      .map_err(|e| anyhow!("failed to encode texts: {e}"))?;

    // Pad every sequence to the longest in the batch so the tensors are
    // rectangular even when the tokenizer config carries no padding.
    let max_tokens = encodings.iter().map(|e| e.len()).max().unwrap_or(0);

    let mut ids: Vec<i64> = Vec::with_capacity(texts.len() * max_tokens);
    let mut mask: Vec<i64> = Vec::with_capacity(texts.len() * max_tokens);
    for encoding in &encodings {
      let token_ids = encoding.get_ids();
      let attention = encoding.get_attention_mask();
      ids.extend(token_ids.iter().map(|&id| id as i64));
      ids.extend(std::iter::repeat(0).take(max_tokens - token_ids.len()));
      mask.extend(attention.iter().map(|&m| m as i64));
      mask.extend(std::iter::repeat(0).take(max_tokens - attention.len()));
    }

    let ids_tensor = TensorRef::from_array_view(([texts.len(), max_tokens], &*ids))?;
    let mask_tensor = TensorRef::from_array_view(([texts.len(), max_tokens], &*mask))?;

    let outputs = self.session.run(ort::inputs![ids_tensor, mask_tensor])?;

    // Sentence-transformer exports put pooled embeddings at output 1.
    let pooled = if outputs.len() > 1 { &outputs[1] } else { &outputs[0] };
    let embeddings = pooled.try_extract_array::<f32>()?.into_dimensionality::<ndarray::Ix2>()?;

    let mut result = Vec::with_capacity(texts.len());
    for row in 0..texts.len() {
      let view = embeddings.index_axis(ndarray::Axis(0), row);
      result.push(view.iter().copied().collect());
    }

    Ok(result)
  }
}

/// Scripted embedding provider for tests.
pub struct MockEmbeddingModel {
  fail_on_texts: Vec<String>,
  scripted: HashMap<String, Vec<f32>>,
  fallback: Vec<Vec<f32>>,
  /// Number of compute_embeddings calls observed.
  pub calls: usize,
}

impl Default for MockEmbeddingModel {
  fn default() -> Self {
    Self::new()
  }
}

impl MockEmbeddingModel {
  pub fn new() -> Self {
    Self {
      fail_on_texts: vec![],
      scripted: HashMap::new(),
      fallback: vec![vec![0.1, 0.2, 0.3]],
      calls: 0,
    }
  }

  /// Fail whenever this exact text is embedded.
  pub fn with_failure_on(mut self, text: impl Into<String>) -> Self {
    self.fail_on_texts.push(text.into());
    self
  }

  /// Return this exact vector for this exact text.
  pub fn with_vector_for(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
    self.scripted.insert(text.into(), vector);
    self
  }

  /// Vectors cycled for texts with no scripted entry.
  pub fn with_fallback(mut self, vectors: Vec<Vec<f32>>) -> Self {
    self.fallback = vectors;
    self
  }
}

impl EmbeddingModel for MockEmbeddingModel {
  fn compute_embeddings(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    self.calls += 1;

    let mut result = Vec::with_capacity(texts.len());
    for (index, text) in texts.iter().enumerate() {
      if self.fail_on_texts.contains(text) {
        return Err(anyhow::anyhow!("mock failure for text: {text}"));
      }
      match self.scripted.get(text) {
        Some(vector) => result.push(vector.clone()),
        None => result.push(self.fallback[index % self.fallback.len()].clone()),
      }
    }

    Ok(result)
  }
}
