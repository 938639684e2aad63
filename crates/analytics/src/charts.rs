//! Chart figures in Plotly's JSON format.
//!
//! A `Figure` is `{"data": [trace, ...], "layout": {...}}`, which the
//! browser hands straight to `Plotly.newPlot`. Only the handful of chart
//! kinds the dashboard and the reports need are supported.

use serde::Serialize;
use serde_json::{json, Value};

/// Catalog brand red, used for single-series charts
pub const PRIMARY_COLOR: &str = "#E50914";
/// Dark grey paired with `PRIMARY_COLOR` in two-slice pies
pub const SECONDARY_COLOR: &str = "#564d4d";

/// Axis titles of a cartesian chart
#[derive(Debug, Clone, Copy)]
pub struct AxisLabels<'a> {
    pub x: &'a str,
    pub y: &'a str,
}

impl<'a> AxisLabels<'a> {
    pub fn new(x: &'a str, y: &'a str) -> Self {
        Self { x, y }
    }
}

/// Bar direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A Plotly figure document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    fn with_layout(title: &str, axis: Option<AxisLabels<'_>>) -> Self {
        let mut layout = json!({ "title": { "text": title } });
        if let Some(axis) = axis {
            layout["xaxis"] = json!({ "title": { "text": axis.x } });
            layout["yaxis"] = json!({ "title": { "text": axis.y } });
        }
        Self {
            data: Vec::new(),
            layout,
        }
    }

    /// Pie chart; `colors` is cycled over the slices by Plotly
    pub fn pie<L: Serialize, V: Serialize>(title: &str, labels: &[L], values: &[V], colors: &[&str]) -> Self {
        let mut figure = Self::with_layout(title, None);
        figure.data.push(json!({
            "type": "pie",
            "labels": labels,
            "values": values,
            "marker": { "colors": colors },
            "textinfo": "percent+label",
        }));
        figure
    }

    /// Bar chart with one bar per category
    pub fn bar<C: Serialize, V: Serialize>(
        title: &str,
        axis: AxisLabels<'_>,
        categories: &[C],
        values: &[V],
        color: &str,
        orientation: Orientation,
    ) -> Self {
        let mut figure = Self::with_layout(title, Some(axis));
        let trace = match orientation {
            Orientation::Vertical => json!({
                "type": "bar",
                "x": categories,
                "y": values,
                "orientation": "v",
                "marker": { "color": color },
            }),
            Orientation::Horizontal => json!({
                "type": "bar",
                "x": values,
                "y": categories,
                "orientation": "h",
                "marker": { "color": color },
            }),
        };
        figure.data.push(trace);
        figure
    }

    /// Line chart with markers; `smooth` draws a spline through the points
    pub fn line<X: Serialize, Y: Serialize>(
        title: &str,
        axis: AxisLabels<'_>,
        x: &[X],
        y: &[Y],
        color: &str,
        smooth: bool,
    ) -> Self {
        let mut figure = Self::with_layout(title, Some(axis));
        let shape = if smooth { "spline" } else { "linear" };
        figure.data.push(json!({
            "type": "scatter",
            "mode": "lines+markers",
            "x": x,
            "y": y,
            "line": {
                "color": color,
                "shape": shape,
            },
        }));
        figure
    }

    /// Histogram of raw values, binned by Plotly
    pub fn histogram<V: Serialize>(title: &str, axis: AxisLabels<'_>, values: &[V], bins: usize, color: &str) -> Self {
        let mut figure = Self::with_layout(title, Some(axis));
        figure.data.push(json!({
            "type": "histogram",
            "x": values,
            "nbinsx": bins,
            "marker": { "color": color, "line": { "width": 1, "color": "white" } },
        }));
        figure
    }

    /// Largest bar at the top of a horizontal bar chart
    pub fn largest_first(mut self) -> Self {
        self.layout["yaxis"]["categoryorder"] = json!("total ascending");
        self
    }

    /// Restrict the x axis to `[min, max]`
    pub fn x_range(mut self, min: f64, max: f64) -> Self {
        self.layout["xaxis"]["range"] = json!([min, max]);
        self
    }

    /// Dashed horizontal reference line across the plot
    pub fn with_reference_line(mut self, y: f64, label: &str) -> Self {
        self.layout["shapes"] = json!([{
            "type": "line",
            "xref": "paper",
            "x0": 0,
            "x1": 1,
            "y0": y,
            "y1": y,
            "line": { "color": "red", "dash": "dash" },
        }]);
        self.layout["annotations"] = json!([{
            "xref": "paper",
            "x": 1,
            "y": y,
            "text": label,
            "showarrow": false,
        }]);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.layout["title"]["text"].as_str()
    }

    /// Serialize to the JSON string Plotly expects
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// JSON that can be pasted inside an HTML `<script>` element
    ///
    /// `<`, `>` and `&` only ever occur inside JSON strings, where the
    /// `\uXXXX` escapes decode to the same characters.
    pub fn to_script_json(&self) -> serde_json::Result<String> {
        Ok(self
            .to_json()?
            .replace('<', "\\u003c")
            .replace('>', "\\u003e")
            .replace('&', "\\u0026"))
    }
}
