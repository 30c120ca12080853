//! OpenAI-compatible HTTP embedding provider.

use std::time::Duration;

use engram_core::config::EmbeddingConfig;
use engram_core::errors::{EmbeddingError, EngramResult};
use engram_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for a `/embeddings` endpoint.
pub struct ApiEmbedder {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl ApiEmbedder {
    pub fn from_config(config: &EmbeddingConfig) -> EngramResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP client error: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            dimensions: config.dimensions,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_embeddings(&self, texts: &[String]) -> EngramResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(count = texts.len(), model = %self.model, "requesting embeddings");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
                dimensions: self.dimensions,
            })
            .send()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP error: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let resp: EmbedResponse = response.json().map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("JSON parse error: {e}"),
        })?;
        let embeddings = decode(resp, self.dimensions);
        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "expected {} embeddings, got {}",
                    texts.len(),
                    embeddings.len()
                ),
            }
            .into());
        }
        Ok(embeddings)
    }
}

/// Order by `index` and fit every vector to `dims`.
fn decode(resp: EmbedResponse, dims: usize) -> Vec<Vec<f32>> {
    let mut data = resp.data;
    data.sort_by_key(|d| d.index);
    data.into_iter()
        .map(|d| {
            let mut v = d.embedding;
            v.resize(dims, 0.0);
            v
        })
        .collect()
}

impl IEmbeddingProvider for ApiEmbedder {
    fn embed(&self, text: &str) -> EngramResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> EngramResult<Vec<Vec<f32>>> {
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url() {
        let config = EmbeddingConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            api_key: "k".to_string(),
            ..EmbeddingConfig::default()
        };
        let p = ApiEmbedder::from_config(&config).unwrap();
        assert_eq!(p.endpoint(), "http://localhost:8080/v1/embeddings");
    }

    #[test]
    fn decode_orders_by_index_and_fits_dimensions() {
        let resp: EmbedResponse = serde_json::from_str(
            r#"{"data":[
                {"index":1,"embedding":[0.5,0.5,0.5,0.5]},
                {"index":0,"embedding":[1.0]}
            ]}"#,
        )
        .unwrap();
        let out = decode(resp, 3);
        assert_eq!(out, vec![vec![1.0, 0.0, 0.0], vec![0.5, 0.5, 0.5]]);
    }

    #[test]
    fn request_body_shape() {
        let input = vec!["hello".to_string()];
        let body = serde_json::to_value(EmbedRequest {
            model: "m",
            input: &input,
            dimensions: 8,
        })
        .unwrap();
        assert_eq!(body["model"], "m");
        assert_eq!(body["input"][0], "hello");
        assert_eq!(body["dimensions"], 8);
    }
}
