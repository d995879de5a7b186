//! Vector helpers shared by the engines.

/// Cosine similarity of two vectors of the same length.
///
/// Returns `0.0` if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    dot / denom
}

pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Per-column mean and sample standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
}

impl ColumnStats {
    /// Computes statistics over `rows`, all of which have `width` columns. The standard
    /// deviation uses the `n - 1` denominator and is `0.0` for fewer than two rows.
    pub fn from_rows<'a>(rows: impl Iterator<Item = &'a [f64]> + Clone, width: usize) -> ColumnStats {
        let mut count = 0usize;
        let mut mean = vec![0.0; width];
        for row in rows.clone() {
            count += 1;
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        if count == 0 {
            return ColumnStats {
                mean,
                std_dev: vec![0.0; width],
            };
        }
        for m in mean.iter_mut() {
            *m /= count as f64;
        }

        let mut std_dev = vec![0.0; width];
        if count > 1 {
            for row in rows {
                for ((s, v), m) in std_dev.iter_mut().zip(row).zip(&mean) {
                    *s += (v - m) * (v - m);
                }
            }
            for s in std_dev.iter_mut() {
                *s = (*s / (count - 1) as f64).sqrt();
            }
        }
        ColumnStats { mean, std_dev }
    }

    /// Z-score of `values`. A column without spread normalizes to `0.0`.
    pub fn normalize(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(self.mean.iter().zip(&self.std_dev))
            .map(|(v, (mean, std_dev))| {
                if *std_dev > 0.0 && std_dev.is_finite() {
                    (v - mean) / std_dev
                } else {
                    0.0
                }
            })
            .collect()
    }
}
