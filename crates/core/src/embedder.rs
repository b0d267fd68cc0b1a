use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::TensorRef;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};
use tracing::info;

use crate::error::EmbedError;

pub const MAX_SEQUENCE_TOKENS: usize = 512;

pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

pub trait Embedder {
    fn dimensions(&self) -> usize;
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

pub struct OnnxEmbedder {
    // Session::run takes &mut self while the embedder is shared behind &self.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    dimensions: usize,
    wants_token_types: bool,
}

impl OnnxEmbedder {
    pub fn load(model_dir: &Path, dimensions: usize) -> Result<Self, EmbedError> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            return Err(EmbedError::ModelNotFound(model_path));
        }
        if !tokenizer_path.exists() {
            return Err(EmbedError::ModelNotFound(tokenizer_path));
        }

        let session = Session::builder()
            .map_err(|error| EmbedError::ModelInit(error.to_string()))?
            .with_intra_threads(2)
            .map_err(|error| EmbedError::ModelInit(error.to_string()))?
            .commit_from_file(&model_path)
            .map_err(|error| EmbedError::ModelInit(error.to_string()))?;
        let wants_token_types = session.inputs().len() > 2;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|error| EmbedError::ModelInit(error.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_TOKENS,
                ..TruncationParams::default()
            }))
            .map_err(|error| EmbedError::ModelInit(error.to_string()))?;
        tokenizer.with_padding(Some(PaddingParams::default()));

        info!(
            model = %model_path.display(),
            dimensions,
            token_type_inputs = wants_token_types,
            "embedding model loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            dimensions,
            wants_token_types,
        })
    }

    fn infer_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|error| EmbedError::Tokenization(error.to_string()))?;

        let batch = encodings.len();
        let seq_len = encodings
            .first()
            .map(|encoding| encoding.get_ids().len())
            .unwrap_or(0);
        if seq_len == 0 {
            return Err(EmbedError::Tokenization("batch encoded to zero tokens".to_string()));
        }

        let mut input_ids = Vec::with_capacity(batch * seq_len);
        let mut attention_mask = Vec::with_capacity(batch * seq_len);
        let mut token_types = Vec::with_capacity(batch * seq_len);
        for encoding in &encodings {
            if encoding.get_ids().len() != seq_len {
                return Err(EmbedError::Tokenization(
                    "batch was not padded to a uniform length".to_string(),
                ));
            }
            input_ids.extend(encoding.get_ids().iter().map(|&id| id as i64));
            attention_mask.extend(encoding.get_attention_mask().iter().map(|&mask| mask as i64));
            token_types.extend(encoding.get_type_ids().iter().map(|&kind| kind as i64));
        }
        let mask_values = attention_mask.clone();

        let ids_array = ndarray::Array2::from_shape_vec((batch, seq_len), input_ids)
            .map_err(|error| EmbedError::Inference(error.to_string()))?;
        let mask_array = ndarray::Array2::from_shape_vec((batch, seq_len), attention_mask)
            .map_err(|error| EmbedError::Inference(error.to_string()))?;
        let type_array = ndarray::Array2::from_shape_vec((batch, seq_len), token_types)
            .map_err(|error| EmbedError::Inference(error.to_string()))?;

        let ids_tensor = TensorRef::from_array_view(&ids_array)
            .map_err(|error| EmbedError::Inference(error.to_string()))?;
        let mask_tensor = TensorRef::from_array_view(&mask_array)
            .map_err(|error| EmbedError::Inference(error.to_string()))?;
        let type_tensor = TensorRef::from_array_view(&type_array)
            .map_err(|error| EmbedError::Inference(error.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| EmbedError::Inference("session lock poisoned".to_string()))?;

        let outputs = if self.wants_token_types {
            session.run(ort::inputs![ids_tensor, mask_tensor, type_tensor])
        } else {
            session.run(ort::inputs![ids_tensor, mask_tensor])
        }
        .map_err(|error| EmbedError::Inference(error.to_string()))?;

        let (shape, hidden) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|error| EmbedError::Inference(error.to_string()))?;

        if shape.len() != 3
            || shape[0] as usize != batch
            || shape[1] as usize != seq_len
            || shape[2] as usize != self.dimensions
        {
            return Err(EmbedError::Inference(format!(
                "unexpected output shape {shape:?}, expected [{batch}, {seq_len}, {}]",
                self.dimensions
            )));
        }

        let row_width = seq_len * self.dimensions;
        let vectors = (0..batch)
            .map(|row| {
                mean_pool(
                    &hidden[row * row_width..(row + 1) * row_width],
                    &mask_values[row * seq_len..(row + 1) * seq_len],
                    self.dimensions,
                )
            })
            .collect();

        Ok(vectors)
    }
}

impl Embedder for OnnxEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vectors = self.infer_batch(&[text])?;
        vectors
            .pop()
            .ok_or_else(|| EmbedError::Inference("model returned no vector".to_string()))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        self.infer_batch(texts)
    }
}

fn mean_pool(hidden: &[f32], mask: &[i64], dimensions: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; dimensions];
    let mut mask_total = 0.0f32;

    for (token_index, &mask_value) in mask.iter().enumerate() {
        let weight = mask_value as f32;
        mask_total += weight;
        let offset = token_index * dimensions;
        for (dimension, slot) in pooled.iter_mut().enumerate() {
            *slot += hidden[offset + dimension] * weight;
        }
    }

    if mask_total > 0.0 {
        for value in &mut pooled {
            *value /= mask_total;
        }
    }

    pooled
}

#[derive(Debug, Clone, Copy)]
pub struct HashedNgramEmbedder {
    pub dimensions: usize,
}

impl Default for HashedNgramEmbedder {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}

impl HashedNgramEmbedder {
    fn bucket_vector(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0f32; self.dimensions.max(1)];
        let lowered = text.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();

        if chars.is_empty() {
            return vector;
        }

        for window in chars.windows(3) {
            let token = window.iter().collect::<String>();
            let mut hash = 1469598103934665603u64;
            for byte in token.bytes() {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(1099511628211);
            }
            let bucket = (hash % vector.len() as u64) as usize;
            vector[bucket] += 1.0;
        }

        let magnitude = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }

        vector
    }
}

impl Embedder for HashedNgramEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        Ok(self.bucket_vector(text))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts.iter().map(|text| self.bucket_vector(text)).collect())
    }
}
