//! FFT front-end for the spectrum view.
//!
//! Owns the plan, the Hann window and a reusable complex buffer so the
//! per-frame `analyze` call does no allocation beyond its output vector.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Default transform size. Matches the sample ring capacity so one frame
/// of ring contents fills the window exactly.
pub const DEFAULT_FFT_SIZE: usize = 2048;

const SMOOTHING: f32 = 0.6;

pub struct SpectrumAnalyzer {
    fft_size: usize,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    fft_buffer: Vec<Complex<f32>>,
    previous: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_size: usize) -> Self {
        let fft_size = fft_size.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        let window: Vec<f32> = (0..fft_size)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / fft_size as f32).cos()))
            .collect();

        Self {
            fft_size,
            fft,
            window,
            fft_buffer: vec![Complex::new(0.0, 0.0); fft_size],
            previous: vec![0.0; fft_size / 2],
        }
    }

    /// Transform one window of mono samples into normalized bin magnitudes.
    ///
    /// Input shorter than the transform size is zero-padded; longer input
    /// is truncated. Returns `fft_size / 2` values in [0, 1], smoothed
    /// against the previous frame so the display does not flicker.
    pub fn analyze(&mut self, samples: &[f32]) -> Vec<f32> {
        let count = samples.len().min(self.fft_size);
        for (i, &sample) in samples.iter().enumerate().take(count) {
            self.fft_buffer[i] = Complex::new(sample * self.window[i], 0.0);
        }
        for slot in self.fft_buffer.iter_mut().skip(count) {
            *slot = Complex::new(0.0, 0.0);
        }

        self.fft.process(&mut self.fft_buffer);

        let mut magnitudes: Vec<f32> = self.fft_buffer[..self.fft_size / 2]
            .iter()
            .map(|c| c.norm())
            .collect();

        let max = magnitudes.iter().cloned().fold(0.0f32, f32::max);
        if max > 0.0 {
            for mag in &mut magnitudes {
                *mag = (*mag / max).clamp(0.0, 1.0);
            }
        }

        for (mag, prev) in magnitudes.iter_mut().zip(self.previous.iter_mut()) {
            *mag = *prev * SMOOTHING + *mag * (1.0 - SMOOTHING);
            *prev = *mag;
        }

        magnitudes
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_FFT_SIZE)
    }
}
