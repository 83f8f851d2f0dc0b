use ratatui::{prelude::*, widgets::*};

use crate::projection::{ChartDataset, TreeRow};

/// Bar heights are scaled into `0..=BAR_SCALE` so fractional values keep their proportions
pub const BAR_SCALE: u64 = 1000;

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut in_string = false;
        let mut is_key = false;

        for c in line.chars() {
            match c {
                '"' => {
                    if !current.is_empty() {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }

                    if in_string {
                        // End of string
                        current.push(c);
                        let color = if is_key { Color::Cyan } else { Color::Green };
                        spans.push(Span::styled(current.clone(), Style::default().fg(color)));
                        current.clear();
                        in_string = false;
                        is_key = false;
                    } else {
                        // Start of string; a key is followed by ':'
                        in_string = true;
                        current.push(c);
                        is_key = line[line.find('"').unwrap_or(0)..].contains("\":");
                    }
                }
                ':' if !in_string => {
                    if !current.is_empty() {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }
                    spans.push(Span::styled(":", Style::default().fg(Color::White)));
                }
                '{' | '}' | '[' | ']' if !in_string => {
                    if !current.is_empty() {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }
                    spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
                }
                't' | 'r' | 'u' | 'e' | 'f' | 'a' | 'l' | 's' | 'n' if !in_string => {
                    current.push(c);
                    if current.trim() == "true" || current.trim() == "false" || current.trim() == "null" {
                        spans.push(Span::styled(current.clone(), Style::default().fg(Color::Magenta)));
                        current.clear();
                    }
                }
                _ => current.push(c),
            }
        }

        if !current.is_empty() {
            let trimmed = current.trim_end_matches(',').trim();
            if !trimmed.is_empty() && trimmed.parse::<f64>().is_ok() {
                spans.push(Span::styled(current, Style::default().fg(Color::Yellow)));
            } else {
                spans.push(Span::raw(current));
            }
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Indented outline of a flattened response tree
pub fn tree_lines(rows: &[TreeRow]) -> Vec<Line<'static>> {
    rows.iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let (marker, style) = if row.is_leaf {
                ("• ", Style::default().fg(Color::Green))
            } else {
                ("▾ ", Style::default().fg(Color::Cyan).bold())
            };
            Line::from(vec![
                Span::raw(indent),
                Span::styled(marker, Style::default().fg(Color::DarkGray)),
                Span::styled(row.label.clone(), style),
            ])
        })
        .collect()
}

/// Scale values to bar heights; negatives draw as empty bars
pub fn bar_heights(values: &[f64]) -> Vec<u64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    values
        .iter()
        .map(|v| {
            if max <= 0.0 || *v <= 0.0 {
                0
            } else {
                ((v / max) * BAR_SCALE as f64).round() as u64
            }
        })
        .collect()
}

/// Compact label for a bar's value
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// Categorical bar chart for a numeric dataset
pub fn bar_chart<'a>(dataset: &ChartDataset, block: Block<'a>, width: u16) -> BarChart<'a> {
    let heights = bar_heights(&dataset.values);
    let bars: Vec<Bar> = dataset
        .categories
        .iter()
        .zip(dataset.values.iter())
        .zip(heights)
        .map(|((category, value), height)| {
            Bar::default()
                .value(height)
                .text_value(format_value(*value))
                .label(Line::from(category.clone()))
        })
        .collect();

    // Fit bars to the inner width, one column of gap between them
    let count = dataset.len().max(1) as u16;
    let bar_width = (width.saturating_sub(2) / count).saturating_sub(1).clamp(1, 12);

    BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(BAR_SCALE)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}
