//! Rendering surfaces
//!
//! A surface receives the chart layout and the current series on every
//! redraw. [`TextSurface`] draws into a string buffer for terminals.

use super::series::TrendSeries;

/// Static description of one line dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStyle {
    pub label: &'static str,
    pub border_color: &'static str,
    pub background_color: &'static str,
}

/// Static chart layout: titles and the three datasets in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    pub title: &'static str,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
    pub y_min: u64,
    pub datasets: [DatasetStyle; 3],
}

/// Sentiment trend line chart
pub const TREND_CHART: ChartLayout = ChartLayout {
    title: "Sentiment Trends Over Time",
    x_axis: "Time",
    y_axis: "Number of Tweets",
    y_min: 0,
    datasets: [
        DatasetStyle {
            label: "Positive",
            border_color: "#4CAF50",
            background_color: "rgba(76, 175, 80, 0.1)",
        },
        DatasetStyle {
            label: "Negative",
            border_color: "#f44336",
            background_color: "rgba(244, 67, 54, 0.1)",
        },
        DatasetStyle {
            label: "Neutral",
            border_color: "#ff9800",
            background_color: "rgba(255, 152, 0, 0.1)",
        },
    ],
};

/// Something a chart can be drawn onto
pub trait RenderSurface: Send {
    fn draw(&mut self, layout: &ChartLayout, series: &TrendSeries);
}

/// Plain-text chart surface with horizontal bars
#[derive(Debug, Clone)]
pub struct TextSurface {
    bar_width: usize,
    buffer: String,
}

impl TextSurface {
    pub fn new(bar_width: usize) -> Self {
        Self {
            bar_width: bar_width.max(1),
            buffer: String::new(),
        }
    }

    /// Output of the last draw
    pub fn output(&self) -> &str {
        &self.buffer
    }

    fn bar(&self, value: u64, max: u64) -> String {
        if max == 0 {
            return String::new();
        }
        let len = (value as f64 / max as f64 * self.bar_width as f64).round() as usize;
        "#".repeat(len)
    }
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::new(20)
    }
}

impl RenderSurface for TextSurface {
    fn draw(&mut self, layout: &ChartLayout, series: &TrendSeries) {
        let mut out = String::new();
        out.push_str(layout.title);
        out.push('\n');
        out.push_str(&"=".repeat(layout.title.len()));
        out.push('\n');

        if series.is_empty() {
            out.push_str("(no data)\n");
            self.buffer = out;
            return;
        }

        let max = series.max_value();
        let columns = [series.positive(), series.negative(), series.neutral()];
        let label_width = series
            .labels()
            .iter()
            .map(|l| l.len())
            .chain(std::iter::once(layout.x_axis.len()))
            .max()
            .unwrap_or(0);

        for (i, label) in series.labels().iter().enumerate() {
            for (j, (dataset, values)) in layout.datasets.iter().zip(columns.iter()).enumerate() {
                let shown = if j == 0 { label.as_str() } else { "" };
                out.push_str(&format!(
                    "{:<width$}  {:<8} {:>5} {}\n",
                    shown,
                    dataset.label,
                    values[i],
                    self.bar(values[i], max),
                    width = label_width
                ));
            }
        }

        out.push_str(&format!("x: {}  y: {} (min {})\n", layout.x_axis, layout.y_axis, layout.y_min));
        self.buffer = out;
    }
}
