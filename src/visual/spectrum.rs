//! Spectrum display: groups pre-computed frequency magnitudes into
//! log-spaced bands and paints them as vertical bars.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

// Lower eighth-block glyphs, one per sub-cell fill level.
const EIGHTHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Map a linear magnitude array into `band_count` log-scaled bands.
///
/// Band boundaries are spaced exponentially across the bins, so low
/// frequencies get more resolution and highs are grouped coarsely. Each
/// band's value is the mean magnitude of the bins it covers.
pub fn log_bands(magnitudes: &[f32], band_count: usize) -> Vec<f32> {
    if band_count == 0 {
        return Vec::new();
    }
    if magnitudes.is_empty() {
        return vec![0.0; band_count];
    }

    let n = magnitudes.len();
    let mut bands = Vec::with_capacity(band_count);
    for i in 0..band_count {
        let t0 = i as f32 / band_count as f32;
        let t1 = (i + 1) as f32 / band_count as f32;
        // Exponential boundary curve mapping t=0 to bin 0 and t=1 to n.
        let lo = ((n as f32).powf(t0).floor() as usize)
            .saturating_sub(1)
            .min(n - 1);
        let hi = ((n as f32).powf(t1).ceil() as usize).clamp(lo + 1, n);

        let sum: f32 = magnitudes[lo..hi].iter().sum();
        bands.push(sum / (hi - lo) as f32);
    }
    bands
}

/// Paint one bar per column into `area`, bottom-aligned, with eighth-block
/// sub-cell resolution. Magnitudes are expected in [0, 1]; values beyond
/// that are clamped.
pub fn render(magnitudes: &[f32], area: Rect, style: Style, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let bands = log_bands(magnitudes, area.width as usize);
    let sub_rows = area.height as usize * 8;

    for (col, &band) in bands.iter().enumerate() {
        let x = area.x + col as u16;
        let filled = (band.clamp(0.0, 1.0) * sub_rows as f32).round() as usize;
        if filled == 0 {
            continue;
        }

        let full_cells = filled / 8;
        let remainder = filled % 8;

        for row in 0..full_cells.min(area.height as usize) {
            let y = area.y + area.height - 1 - row as u16;
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char('█');
                cell.set_style(style);
            }
        }
        if remainder > 0 && full_cells < area.height as usize {
            let y = area.y + area.height - 1 - full_cells as u16;
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(EIGHTHS[remainder - 1]);
                cell.set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_magnitudes_yield_zero_bands() {
        assert_eq!(log_bands(&[], 4), vec![0.0; 4]);
    }

    #[test]
    fn zero_band_count_yields_empty() {
        assert_eq!(log_bands(&[1.0, 2.0, 3.0], 0), Vec::<f32>::new());
    }

    #[test]
    fn single_band_averages_everything() {
        let result = log_bands(&[1.0, 2.0, 3.0, 4.0], 1);
        assert_eq!(result.len(), 1);
        assert!((result[0] - 2.5).abs() < 0.01);
    }

    #[test]
    fn band_count_is_preserved() {
        let magnitudes = vec![1.0f32; 64];
        assert_eq!(log_bands(&magnitudes, 10).len(), 10);
        assert_eq!(log_bands(&magnitudes, 64).len(), 64);
        assert_eq!(log_bands(&[0.5], 7).len(), 7);
    }

    #[test]
    fn energy_in_bin_zero_lands_in_first_band() {
        let mut magnitudes = vec![0.0f32; 32];
        magnitudes[0] = 10.0;
        let result = log_bands(&magnitudes, 4);
        assert!(result[0] > 0.0);
    }

    #[test]
    fn energy_in_the_top_bin_lands_in_the_last_band() {
        let mut magnitudes = vec![0.0f32; 32];
        magnitudes[31] = 8.0;
        let result = log_bands(&magnitudes, 8);
        assert!(result[7] > 0.0);
        assert!(result[..7].iter().all(|&band| band == 0.0));
    }

    #[test]
    fn uniform_input_yields_uniform_output() {
        let magnitudes = vec![1.0f32; 64];
        for band in log_bands(&magnitudes, 8) {
            assert!((band - 1.0).abs() < 0.01);
        }
    }

    #[test]
    fn render_no_ops_on_zero_area() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        render(&[1.0; 16], Rect::new(0, 0, 4, 0), Style::default(), &mut buf);
        assert_eq!(buf, Buffer::empty(Rect::new(0, 0, 4, 4)));
    }

    #[test]
    fn render_fills_from_the_bottom() {
        let area = Rect::new(0, 0, 2, 4);
        let mut buf = Buffer::empty(area);
        render(&[1.0; 8], area, Style::default(), &mut buf);
        // Full-scale bands fill the whole column.
        assert_eq!(buf[(0, 3)].symbol(), "█");
        assert_eq!(buf[(0, 0)].symbol(), "█");
    }
}
