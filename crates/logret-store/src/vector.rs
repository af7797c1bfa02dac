//! f32 vector <-> little-endian blob codec and distance math.

use logret_core::RetrievalError;

/// Serialize a vector to the stored blob layout: dim consecutive
/// little-endian f32 values, 4 bytes each.
pub fn encode_vector(vector: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(vector.len() * 4);
    for v in vector {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

/// Deserialize a stored blob, verifying it holds exactly `dim` f32 values.
pub fn decode_vector(blob: &[u8], dim: usize) -> Result<Vec<f32>, RetrievalError> {
    if blob.len() != dim * 4 {
        return Err(RetrievalError::storage(
            "vector decode",
            format!(
                "vector blob is {} bytes, expected {} for dimension {}",
                blob.len(),
                dim * 4,
                dim
            ),
        ));
    }
    Ok(blob
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Cosine distance: `1 - cos(a, b)`. Zero-norm inputs are maximally distant.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}
