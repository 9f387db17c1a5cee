use crate::domain::model::ChartPoint;

const BAR_CHAR: char = '#';

pub const MIN_CHART_WIDTH: usize = 1;
pub const MAX_CHART_WIDTH: usize = 500;

/// Renders one horizontal bar per point, scaled so the highest score fills
/// `width` columns. `width` is clamped to `MIN_CHART_WIDTH..=MAX_CHART_WIDTH`.
/// Returns `None` when there is nothing to draw.
pub fn render_bar_chart(points: &[ChartPoint], width: usize) -> Option<Vec<String>> {
    if points.is_empty() {
        return None;
    }

    let width = width.clamp(MIN_CHART_WIDTH, MAX_CHART_WIDTH);

    let label_width = points
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);
    let max_score = i64::from(points.iter().map(|p| p.score).max().unwrap_or(0).max(1));
    let columns = i64::try_from(width).unwrap_or(0);

    let lines = points
        .iter()
        .map(|p| {
            let filled = i64::from(p.score)
                .checked_mul(columns)
                .map(|scaled| scaled / max_score)
                .and_then(|bar| usize::try_from(bar).ok())
                .unwrap_or(0)
                .min(width);
            let bar: String = std::iter::repeat(BAR_CHAR).take(filled).collect();
            format!(
                "{:<label_width$} | {:<width$} {}",
                p.name,
                bar,
                p.score,
                label_width = label_width,
                width = width
            )
        })
        .collect();

    Some(lines)
}
