//! candle BERT wrappers for the two oracle models.
//!
//! CTI-BERT ships as a standard HF directory (`config.json`,
//! `model.safetensors`, `tokenizer.json`). [`BertEncoder`] exposes it as a
//! sentence encoder (mean pooling); [`BertSeqClassifier`] as a sequence
//! classifier over a fixed label space.

use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

fn load_bert(vb: VarBuilder, config: &Config) -> Result<BertModel> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("roberta"), config)
    } else {
        BertModel::load(vb, config)
    }
}

fn load_config(model_dir: &Path) -> Result<Config> {
    let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;
    serde_json::from_str(&config_content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))
}

struct BertEncoderImpl {
    bert: BertModel,
    hidden_size: usize,
}

impl BertEncoderImpl {
    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let hidden = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;

        // Mean pooling over the sequence dimension. Single-sequence inputs
        // carry no padding, so a plain mean is equivalent to masked pooling.
        hidden.mean(1)
    }
}

/// Sentence encoder: BERT forward pass + mean pooling.
#[derive(Clone)]
pub struct BertEncoder(std::sync::Arc<BertEncoderImpl>);

impl BertEncoder {
    /// Loads from an HF model directory.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config = load_config(model_dir)?;
        let weights_path = model_dir.join("model.safetensors");

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let bert = load_bert(vb, &config)?;

        Ok(Self(std::sync::Arc::new(BertEncoderImpl {
            bert,
            hidden_size: config.hidden_size,
        })))
    }

    /// Mean-pooled sentence vector, shape `[batch, hidden_size]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }

    /// Hidden size of the loaded model.
    pub fn hidden_size(&self) -> usize {
        self.0.hidden_size
    }
}

struct BertSeqClassifierImpl {
    bert: BertModel,
    classifier: Linear,
    num_labels: usize,
}

impl BertSeqClassifierImpl {
    fn load(vb: VarBuilder, config: &Config, num_labels: usize) -> Result<Self> {
        let bert = load_bert(vb.clone(), config)?;
        let classifier = candle_nn::linear(config.hidden_size, num_labels, vb.pp("classifier"))?;

        Ok(Self {
            bert,
            classifier,
            num_labels,
        })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;
        self.classifier.forward(&cls_token)
    }
}

/// Sequence classifier: BERT CLS token + linear head over `num_labels`.
#[derive(Clone)]
pub struct BertSeqClassifier(std::sync::Arc<BertSeqClassifierImpl>);

impl BertSeqClassifier {
    /// Loads from an HF model directory with a `num_labels`-wide head.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device, num_labels: usize) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config = load_config(model_dir)?;
        let weights_path = model_dir.join("model.safetensors");

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = BertSeqClassifierImpl::load(vb, &config, num_labels)?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    /// Raw logits, shape `[batch, num_labels]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }

    /// Width of the classification head.
    pub fn num_labels(&self) -> usize {
        self.0.num_labels
    }
}
