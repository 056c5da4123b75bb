//! Oscilloscope: downsamples the ring into per-column signed peaks and
//! paints them as a braille waveform with auto-gain.

use std::collections::BTreeMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use super::ring::SampleRing;

// Braille left-column dot bits for sub-positions 0-3, top to bottom.
const DOT_BITS: [u32; 4] = [0x01, 0x02, 0x04, 0x40];
const BRAILLE_BASE: u32 = 0x2800;
const SUBCELLS_PER_ROW: usize = 4;

/// Downsample raw samples to one signed peak per column.
///
/// Each column covers `max(1, len / column_count)` samples and takes the
/// value with the largest absolute magnitude (first occurrence wins a
/// tie). Columns past the end of the data yield 0.
pub fn compute_peaks(samples: &[f32], column_count: usize) -> Vec<f32> {
    let block_size = (samples.len() / column_count.max(1)).max(1);
    let mut peaks = Vec::with_capacity(column_count);

    for col in 0..column_count {
        let start = col * block_size;
        let end = (start + block_size).min(samples.len());
        if start >= end {
            peaks.push(0.0);
            continue;
        }
        let mut peak = 0.0f32;
        for &sample in &samples[start..end] {
            if sample.abs() > peak.abs() {
                peak = sample;
            }
        }
        peaks.push(peak);
    }
    peaks
}

/// Auto-normalization gain: the loudest peak fills ~80% of half-height,
/// capped at 20x. Near-silence gets unity gain instead of a blown-up
/// noise floor.
pub fn compute_gain(peaks: &[f32]) -> f32 {
    let max_abs = peaks.iter().fold(0.0f32, |acc, p| acc.max(p.abs()));
    if max_abs > 0.001 {
        (0.8 / max_abs).min(20.0)
    } else {
        1.0
    }
}

/// Map a peak to a vertical sub-cell level: +1.0 is level 0 (top), -1.0
/// is `total_levels - 1` (bottom), 0.0 the midpoint.
pub fn level_for_peak(peak: f32, gain: f32, total_levels: usize) -> usize {
    if total_levels == 0 {
        return 0;
    }
    let scaled = (peak * gain).clamp(-1.0, 1.0);
    let normalized = (1.0 - scaled) / 2.0;
    let level = (normalized * (total_levels - 1) as f32) as usize;
    level.min(total_levels - 1)
}

/// Paint the waveform for the ring's current contents into `area`.
///
/// Levels are computed at 4 sub-rows per character cell; when adjacent
/// columns differ by more than one sub-row the gap is filled so the trace
/// reads as a line rather than scattered dots.
pub fn render(ring: &SampleRing, area: Rect, style: Style, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let samples = ring.read(ring.capacity());
    let peaks = compute_peaks(&samples, area.width as usize);
    let gain = compute_gain(&peaks);
    let total_levels = area.height as usize * SUBCELLS_PER_ROW;

    let mut prev_level: Option<usize> = None;
    for (col, &peak) in peaks.iter().enumerate() {
        let x = area.x + col as u16;
        let level = level_for_peak(peak, gain, total_levels);

        let mut levels = vec![level];
        if let Some(prev) = prev_level {
            if prev.abs_diff(level) > 1 {
                let lo = prev.min(level) + 1;
                let hi = prev.max(level);
                levels.extend(lo..hi);
            }
        }

        let mut row_bits: BTreeMap<usize, u32> = BTreeMap::new();
        for lvl in levels {
            let row = lvl / SUBCELLS_PER_ROW;
            let sub = lvl % SUBCELLS_PER_ROW;
            *row_bits.entry(row).or_insert(0) |= DOT_BITS[sub];
        }

        for (row, bits) in row_bits {
            let y = area.y + row as u16;
            if y >= area.y + area.height {
                continue;
            }
            if let Some(glyph) = char::from_u32(BRAILLE_BASE | bits) {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(glyph);
                    cell.set_style(style);
                }
            }
        }

        prev_level = Some(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_peaks_downsamples_to_signed_max_abs() {
        // 8 samples, 2 columns: each column picks the signed peak of 4.
        let samples = [0.1, -0.5, 0.3, 0.2, 0.4, 0.1, -0.8, 0.2];
        let peaks = compute_peaks(&samples, 2);
        assert_eq!(peaks, vec![-0.5, -0.8]);
    }

    #[test]
    fn compute_peaks_all_zeros() {
        let samples = [0.0f32; 8];
        assert_eq!(compute_peaks(&samples, 4), vec![0.0; 4]);
    }

    #[test]
    fn compute_peaks_preserves_sign_of_largest_magnitude() {
        let samples = [0.1, -0.9, 0.3, 0.4];
        assert_eq!(compute_peaks(&samples, 1), vec![-0.9]);
    }

    #[test]
    fn compute_peaks_trailing_columns_yield_zero() {
        // 4 samples over 3 columns: block size 1, columns past the data
        // still appear, and 6 columns over 4 samples pads with zeros.
        let samples = [0.5, -0.2, 0.1, 0.3];
        let peaks = compute_peaks(&samples, 6);
        assert_eq!(peaks.len(), 6);
        assert_eq!(&peaks[4..], &[0.0, 0.0]);
    }

    #[test]
    fn compute_gain_normal_input() {
        let gain = compute_gain(&[0.2, -0.5, 0.3]);
        assert!((gain - 1.6).abs() < 1e-6);
    }

    #[test]
    fn compute_gain_near_silence_is_unity() {
        assert_eq!(compute_gain(&[0.0001, -0.0001, 0.0005]), 1.0);
        assert_eq!(compute_gain(&[]), 1.0);
    }

    #[test]
    fn compute_gain_is_capped_at_twenty() {
        assert_eq!(compute_gain(&[0.01, -0.005]), 20.0);
    }

    #[test]
    fn compute_gain_monotone_above_threshold() {
        let mut last = f32::INFINITY;
        for max_abs in [0.002, 0.01, 0.1, 0.5, 1.0, 2.0] {
            let gain = compute_gain(&[max_abs]);
            assert!(gain <= last);
            last = gain;
        }
    }

    #[test]
    fn level_for_peak_extremes_and_center() {
        assert_eq!(level_for_peak(1.0, 1.0, 20), 0);
        assert_eq!(level_for_peak(-1.0, 1.0, 20), 19);
        // normalized 0.5 * 19 = 9.5, floored.
        assert_eq!(level_for_peak(0.0, 1.0, 20), 9);
    }

    #[test]
    fn level_for_peak_clamps_overdrive() {
        assert_eq!(level_for_peak(2.0, 1.0, 20), 0);
        assert_eq!(level_for_peak(-3.0, 1.0, 20), 19);
    }

    #[test]
    fn render_no_ops_on_zero_area() {
        let ring = SampleRing::new(16);
        ring.write(&[0.5; 16]);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        render(&ring, area, Style::default(), &mut buf);
        assert_eq!(buf, Buffer::empty(Rect::new(0, 0, 4, 4)));
    }

    #[test]
    fn render_paints_braille_cells() {
        let ring = SampleRing::new(64);
        ring.write(&[0.5; 64]);
        let area = Rect::new(0, 0, 8, 4);
        let mut buf = Buffer::empty(area);
        render(&ring, area, Style::default(), &mut buf);

        let painted = area
            .positions()
            .filter(|p| buf[*p].symbol() != " ")
            .count();
        assert!(painted > 0);
    }
}
