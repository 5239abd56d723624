//! Binned spike counts from a neural recording.
//!
//! A [`SpikeCounts`] matrix holds one row per time bin and one column per
//! neuron. Recordings are typically longer and wider than the analysis needs
//! (extra hours, neurons from other layers), so the matrix supports range
//! selection before being standardized for the state model.

use std::ops::Range;

use ndarray::{s, Array2};

use ethomap_core::{EthomapError, Result};

/// A `(bins × neurons)` spike-count matrix.
#[derive(Debug, Clone)]
pub struct SpikeCounts {
    counts: Array2<f64>,
}

impl SpikeCounts {
    /// Wrap a `(bins × neurons)` matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix has zero bins or zero neurons.
    pub fn new(counts: Array2<f64>) -> Result<Self> {
        if counts.nrows() == 0 || counts.ncols() == 0 {
            return Err(EthomapError::InvalidInput(format!(
                "spike count matrix must be non-empty, got {} bins x {} neurons",
                counts.nrows(),
                counts.ncols()
            )));
        }
        Ok(Self { counts })
    }

    /// Wrap a `(neurons × bins)` matrix, as spike sorters commonly emit, by
    /// transposing it into bin-major order.
    pub fn from_neuron_major(counts: Array2<f64>) -> Result<Self> {
        Self::new(counts.reversed_axes().as_standard_layout().to_owned())
    }

    /// Number of time bins.
    pub fn n_bins(&self) -> usize {
        self.counts.nrows()
    }

    /// Number of neurons.
    pub fn n_neurons(&self) -> usize {
        self.counts.ncols()
    }

    /// The underlying matrix.
    pub fn counts(&self) -> &Array2<f64> {
        &self.counts
    }

    /// Restrict to a bin range and neuron range.
    ///
    /// Used to truncate a recording to the analysis window (e.g. the first
    /// hour) and to the neuron population of interest (e.g. one cortical
    /// layer).
    ///
    /// # Errors
    ///
    /// Returns an error if either range is empty or exceeds the matrix shape.
    pub fn select(&self, bins: Range<usize>, neurons: Range<usize>) -> Result<Self> {
        if bins.is_empty() || bins.end > self.n_bins() {
            return Err(EthomapError::InvalidInput(format!(
                "bin range {bins:?} invalid for {} bins",
                self.n_bins()
            )));
        }
        if neurons.is_empty() || neurons.end > self.n_neurons() {
            return Err(EthomapError::InvalidInput(format!(
                "neuron range {neurons:?} invalid for {} neurons",
                self.n_neurons()
            )));
        }
        Ok(Self {
            counts: self.counts.slice(s![bins, neurons]).to_owned(),
        })
    }

    /// Standardize each neuron to zero mean and unit variance across bins.
    ///
    /// Neurons with constant counts become all-zero columns rather than
    /// dividing by a zero standard deviation.
    pub fn zscored(&self) -> Self {
        let mut z = self.counts.clone();
        let n = z.nrows() as f64;
        for mut col in z.columns_mut() {
            let mean = col.sum() / n;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            if std == 0.0 {
                col.fill(0.0);
            } else {
                col.mapv_inplace(|v| (v - mean) / std);
            }
        }
        Self { counts: z }
    }
}
