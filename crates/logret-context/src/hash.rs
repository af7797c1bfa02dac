//! Deterministic pseudo-embedder.
//!
//! Derives a fixed-dimension unit vector from a sha256 stream over the input
//! text. Bit-identical across calls and processes, so it doubles as the test
//! stub and as an offline backend for smoke runs. Carries no semantics.

use anyhow::Result;
use async_trait::async_trait;
use logret_core::traits::Embedder;
use sha2::{Digest, Sha256};

pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn pseudo_vector(&self, text: &str) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.dim);
        let mut counter: u32 = 0;

        while out.len() < self.dim {
            let mut hasher = Sha256::new();
            hasher.update(text.as_bytes());
            hasher.update(counter.to_le_bytes());
            for byte in hasher.finalize() {
                // Map bytes into [-1, 1]
                out.push(byte as f32 / 127.5 - 1.0);
                if out.len() == self.dim {
                    break;
                }
            }
            counter += 1;
        }

        let norm = out.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in out.iter_mut() {
                *v /= norm;
            }
        }
        out
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.pseudo_vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.pseudo_vector(t)).collect())
    }
}
