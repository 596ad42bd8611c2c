use serde::Serialize;

// ---------------------------------------------------------------------------
// ChartSpec – declarative, renderer-agnostic chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Scatter,
}

/// One pie wedge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// One scatter marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub category: String,
}

/// Table behind a chart, with the source column names that label its axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    Pie {
        names_field: String,
        values_field: String,
        slices: Vec<Slice>,
    },
    Scatter {
        x_field: String,
        y_field: String,
        color_field: String,
        points: Vec<ScatterPoint>,
    },
}

/// What the renderer draws. Built fresh per event and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub data: ChartData,
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self.data {
            ChartData::Pie { .. } => ChartKind::Pie,
            ChartData::Scatter { .. } => ChartKind::Scatter,
        }
    }

    /// Number of slices or points.
    pub fn len(&self) -> usize {
        match &self.data {
            ChartData::Pie { slices, .. } => slices.len(),
            ChartData::Scatter { points, .. } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pretty JSON for the "Copy JSON" action.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
