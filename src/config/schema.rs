use serde::Deserialize;

use crate::session::VisualizerMode;
use crate::visual;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/aria/config.toml` or `~/.config/aria/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ARIA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub visualizer: VisualizerSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: [
                "flac", "alac", "wav", "aiff", "aif", "wv", "mp3", "m4a", "aac", "opus", "ogg",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial output volume in [0.0, 1.0].
    pub volume: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
    /// Which display starts active.
    pub mode: VisualizerModeSetting,
    /// Samples retained for the visualizer window.
    pub sample_capacity: usize,
    /// FFT transform size for the spectrum display.
    pub fft_size: usize,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            mode: VisualizerModeSetting::Spectrum,
            sample_capacity: visual::ring::DEFAULT_CAPACITY,
            fft_size: visual::analysis::DEFAULT_FFT_SIZE,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizerModeSetting {
    #[serde(alias = "scope", alias = "waveform")]
    Oscilloscope,
    #[serde(alias = "bands")]
    Spectrum,
}

impl From<VisualizerModeSetting> for VisualizerMode {
    fn from(mode: VisualizerModeSetting) -> Self {
        match mode {
            VisualizerModeSetting::Oscilloscope => VisualizerMode::Oscilloscope,
            VisualizerModeSetting::Spectrum => VisualizerMode::Spectrum,
        }
    }
}
