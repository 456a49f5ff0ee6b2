/// Histogram of the reference image
/// Draws either feature histogram as a bar chart on a canvas
use iced::widget::canvas;
use iced::{Color, Point, Rectangle, Size};

use crate::features::{ColorHistogram, IntensityHistogram};
use crate::Message;

/// Bar chart data: one (count, color) per bucket
#[derive(Debug, Clone)]
pub struct HistogramChart {
    pub bars: Vec<(u32, Color)>,
}

/// Midpoint of a 64-wide channel band, as a 0..1 color component
fn band_center(band: usize) -> f32 {
    (band as f32 * 64.0 + 32.0) / 255.0
}

impl HistogramChart {
    /// Gray bars, darkest bucket on the left
    pub fn intensity(hist: &IntensityHistogram) -> Self {
        let bars = hist
            .bins()
            .iter()
            .enumerate()
            .map(|(bucket, &count)| {
                let level = ((bucket as f32 * 10.0 + 5.0) / 255.0).min(1.0);
                (count, Color::from_rgb(level, level, level))
            })
            .collect();
        Self { bars }
    }

    /// Each bar painted in the color its code stands for
    pub fn color(hist: &ColorHistogram) -> Self {
        let bars = hist
            .bins()
            .iter()
            .enumerate()
            .map(|(code, &count)| {
                let color = Color::from_rgb(
                    band_center(code / 16),
                    band_center((code / 4) % 4),
                    band_center(code % 4),
                );
                (count, color)
            })
            .collect();
        Self { bars }
    }
}

impl canvas::Program<Message> for HistogramChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        // Find maximum bucket for normalization
        let max_value = self.bars.iter().map(|&(count, _)| count).max().unwrap_or(0) as f32;

        if max_value < 1.0 || self.bars.is_empty() {
            return vec![frame.into_geometry()];
        }

        let width = bounds.width;
        let height = bounds.height;
        let bar_width = width / self.bars.len() as f32;

        for (i, &(count, color)) in self.bars.iter().enumerate() {
            if count == 0 {
                continue;
            }

            let bar_height = count as f32 / max_value * height;
            let x = i as f32 * bar_width;

            frame.fill_rectangle(
                Point::new(x, height - bar_height),
                Size::new((bar_width - 1.0).max(1.0), bar_height),
                color,
            );
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_has_one_bar_per_bucket() {
        assert_eq!(HistogramChart::intensity(&IntensityHistogram::new()).bars.len(), 25);
        assert_eq!(HistogramChart::color(&ColorHistogram::new()).bars.len(), 64);
    }

    #[test]
    fn test_color_bar_matches_code() {
        let mut hist = ColorHistogram::new();
        hist.increment(48);
        let chart = HistogramChart::color(&hist);

        let (count, color) = chart.bars[48];
        assert_eq!(count, 1);
        assert!(color.r > 0.8 && color.g < 0.2 && color.b < 0.2);
    }
}
