//! Chartability check and categorical dataset extraction

use serde_json::Value;

use crate::error::{AppError, JsonField, VisualizationIssue};

/// Bar chart data: `values[i]` belongs to `categories[i]`
#[derive(Clone, Debug, PartialEq)]
pub struct ChartDataset {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartDataset {
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// True for a non-empty object whose every value is a finite number
pub fn is_chartable(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty() && map.values().all(|v| finite_number(v).is_some()),
        _ => false,
    }
}

fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// Build the dataset for a flat numeric object
pub fn render(value: &Value) -> Result<ChartDataset, AppError> {
    let map = match value {
        Value::Object(map) if is_chartable(value) => map,
        _ => return Err(AppError::Visualization(VisualizationIssue::NotNumericMap)),
    };

    let mut categories = Vec::with_capacity(map.len());
    let mut values = Vec::with_capacity(map.len());
    for (key, v) in map {
        categories.push(key.clone());
        values.push(finite_number(v).unwrap_or_default());
    }
    Ok(ChartDataset { categories, values })
}

/// Parse the current response text and chart it
pub fn visualize_text(text: &str) -> Result<ChartDataset, AppError> {
    let value: Value =
        serde_json::from_str(text).map_err(|_| AppError::MalformedJson(JsonField::Response))?;
    render(&value)
}
