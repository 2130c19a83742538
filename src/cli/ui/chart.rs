//! Horizontal text bar charts.

use crate::domain::Month;

use super::formatting::format_money;

pub const BAR_WIDTH: usize = 30;
const FILLED: char = '#';
const EMPTY: char = '.';

/// Length of the bar drawn for `value` on an axis topped at `ceiling`.
/// Negative values draw an empty bar.
pub fn bar_length(value: f64, ceiling: f64, width: usize) -> usize {
    if ceiling <= 0.0 || value <= 0.0 {
        return 0;
    }
    let scaled = (value / ceiling * width as f64).round() as usize;
    scaled.min(width)
}

pub fn bar(value: f64, ceiling: f64) -> String {
    let filled = bar_length(value, ceiling, BAR_WIDTH);
    let mut out = String::with_capacity(BAR_WIDTH);
    out.extend(std::iter::repeat(FILLED).take(filled));
    out.extend(std::iter::repeat(EMPTY).take(BAR_WIDTH - filled));
    out
}

/// One line per month: short label, bar, and formatted value.
pub fn monthly_bars(values: &[f64], ceiling: f64, symbol: &str) -> Vec<String> {
    Month::all()
        .zip(values.iter())
        .map(|(month, value)| {
            format!(
                "{:<3} |{}| {}",
                month.short_label(),
                bar(*value, ceiling),
                format_money(*value, symbol)
            )
        })
        .collect()
}
