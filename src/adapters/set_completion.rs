//! Set-completion model loaded from a safetensors artifact.
//!
//! The artifact provides `embedding` `[V, E]`, `decoder` `[E, V]` and an
//! optional `decoder_bias` `[V]`. Logits are the mean embedding of the input
//! tokens projected through the decoder. Requires the `ml-models` feature.

use super::traits::SetCompletion;
use super::vocab::Vocabulary;
use crate::error::{ModelErrorKind, RecipeIntelError, Result};
use std::path::Path;

/// Weights file looked up inside the models directory
pub const SET_COMPLETION_ARTIFACT: &str = "set_completion.safetensors";

/// Optional vocabulary file looked up inside the models directory
pub const SET_COMPLETION_VOCAB: &str = "set_completion.vocab.json";

/// [`SetCompletion`] backed by embedding and decoder tensors.
pub struct EmbeddingSetCompletion {
    #[cfg(feature = "ml-models")]
    weights: candle_weights::Weights,
    vocab_size: usize,
    vocabulary: Option<Vocabulary>,
}

impl std::fmt::Debug for EmbeddingSetCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingSetCompletion")
            .field("vocab_size", &self.vocab_size)
            .field("vocabulary", &self.vocabulary.as_ref().map(Vocabulary::len))
            .finish()
    }
}

impl EmbeddingSetCompletion {
    /// Load weights and an optional vocabulary.
    ///
    /// A vocabulary whose ids exceed the weight matrix is rejected.
    pub fn load(weights_path: &Path, vocab_path: Option<&Path>) -> Result<Self> {
        if !weights_path.exists() {
            return Err(RecipeIntelError::artifact_not_found(weights_path));
        }
        Self::load_weights(weights_path, vocab_path)
    }

    #[cfg(feature = "ml-models")]
    fn load_weights(weights_path: &Path, vocab_path: Option<&Path>) -> Result<Self> {
        let weights = candle_weights::Weights::load(weights_path)?;
        let vocab_size = weights.vocab_size();
        let vocabulary = load_vocabulary(vocab_path, vocab_size)?;
        Ok(Self {
            weights,
            vocab_size,
            vocabulary,
        })
    }

    #[cfg(not(feature = "ml-models"))]
    fn load_weights(_weights_path: &Path, _vocab_path: Option<&Path>) -> Result<Self> {
        Err(RecipeIntelError::model(
            "loading set-completion model",
            ModelErrorKind::FeatureDisabled("ml-models"),
        ))
    }
}

#[cfg_attr(not(feature = "ml-models"), allow(dead_code))]
fn load_vocabulary(vocab_path: Option<&Path>, vocab_size: usize) -> Result<Option<Vocabulary>> {
    let Some(path) = vocab_path else {
        return Ok(None);
    };
    match Vocabulary::from_path(path) {
        Ok(vocab) => {
            if let Some(max_id) = vocab.max_id() {
                if max_id as usize >= vocab_size {
                    return Err(RecipeIntelError::model(
                        format!("loading {}", path.display()),
                        ModelErrorKind::MalformedArtifact(format!(
                            "token id {max_id} exceeds vocabulary size {vocab_size}"
                        )),
                    ));
                }
            }
            Ok(Some(vocab))
        }
        Err(e) if e.is_absent_artifact() => Ok(None),
        Err(e) => Err(e),
    }
}

impl SetCompletion for EmbeddingSetCompletion {
    fn complete(&self, token_ids: &[u32]) -> Result<Vec<f32>> {
        if token_ids.is_empty() {
            return Err(RecipeIntelError::inference("empty token set"));
        }
        if let Some(bad) = token_ids.iter().find(|id| **id as usize >= self.vocab_size) {
            return Err(RecipeIntelError::inference(format!(
                "token id {bad} out of range for vocabulary of {}",
                self.vocab_size
            )));
        }

        #[cfg(feature = "ml-models")]
        {
            self.weights.logits(token_ids)
        }
        #[cfg(not(feature = "ml-models"))]
        {
            Err(RecipeIntelError::model(
                "set-completion inference",
                ModelErrorKind::FeatureDisabled("ml-models"),
            ))
        }
    }

    fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    fn name(&self) -> &'static str {
        "embedding-set-completion"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(feature = "ml-models")]
mod candle_weights {
    use crate::error::{ModelErrorKind, RecipeIntelError, Result};
    use candle_core::{DType, Device, Tensor};
    use std::path::Path;

    pub(super) struct Weights {
        embedding: Tensor,
        decoder: Tensor,
        bias: Option<Tensor>,
        vocab_size: usize,
    }

    fn candle_err(context: &str) -> impl Fn(candle_core::Error) -> RecipeIntelError + '_ {
        move |e| {
            RecipeIntelError::model(
                context.to_string(),
                ModelErrorKind::MalformedArtifact(e.to_string()),
            )
        }
    }

    fn malformed(message: String) -> RecipeIntelError {
        RecipeIntelError::model(
            "loading set-completion model",
            ModelErrorKind::MalformedArtifact(message),
        )
    }

    impl Weights {
        pub(super) fn load(path: &Path) -> Result<Self> {
            let mut tensors = candle_core::safetensors::load(path, &Device::Cpu)
                .map_err(candle_err("reading safetensors"))?;

            let embedding = tensors
                .remove("embedding")
                .ok_or_else(|| malformed("missing 'embedding' tensor".to_string()))?
                .to_dtype(DType::F32)
                .map_err(candle_err("converting embedding"))?;
            let decoder = tensors
                .remove("decoder")
                .ok_or_else(|| malformed("missing 'decoder' tensor".to_string()))?
                .to_dtype(DType::F32)
                .map_err(candle_err("converting decoder"))?;

            let (vocab_size, embed_dim) =
                embedding.dims2().map_err(candle_err("embedding shape"))?;
            let (dec_in, dec_out) = decoder.dims2().map_err(candle_err("decoder shape"))?;
            if dec_in != embed_dim || dec_out != vocab_size {
                return Err(malformed(format!(
                    "decoder shape [{dec_in}, {dec_out}] does not match embedding [{vocab_size}, {embed_dim}]"
                )));
            }

            let bias = match tensors.remove("decoder_bias") {
                Some(bias) => {
                    let bias = bias
                        .to_dtype(DType::F32)
                        .map_err(candle_err("converting decoder bias"))?;
                    let len = bias.dims1().map_err(candle_err("decoder bias shape"))?;
                    if len != vocab_size {
                        return Err(malformed(format!(
                            "decoder bias length {len} does not match vocabulary size {vocab_size}"
                        )));
                    }
                    Some(bias.unsqueeze(0).map_err(candle_err("decoder bias shape"))?)
                }
                None => None,
            };

            Ok(Self {
                embedding,
                decoder,
                bias,
                vocab_size,
            })
        }

        pub(super) const fn vocab_size(&self) -> usize {
            self.vocab_size
        }

        pub(super) fn logits(&self, token_ids: &[u32]) -> Result<Vec<f32>> {
            let infer = |e: candle_core::Error| RecipeIntelError::inference(e.to_string());
            let ids = Tensor::new(token_ids, &Device::Cpu).map_err(infer)?;
            let pooled = self
                .embedding
                .index_select(&ids, 0)
                .and_then(|rows| rows.mean_keepdim(0))
                .map_err(infer)?;
            let mut logits = pooled.matmul(&self.decoder).map_err(infer)?;
            if let Some(bias) = &self.bias {
                logits = logits.broadcast_add(bias).map_err(infer)?;
            }
            logits
                .squeeze(0)
                .and_then(|row| row.to_vec1::<f32>())
                .map_err(infer)
        }
    }
}
