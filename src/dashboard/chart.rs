use serde::Serialize;

pub const AVERAGE_COLOR: &str = "#1f77b4";
pub const MEDIAN_COLOR: &str = "#ff7f0e";
pub const RANKING_COLOR: &str = "#4c78a8";
pub const UNIT_LABEL: &str = "仟元/人";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    GroupedBar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: String,
    pub y: Option<f64>,
    /// Label drawn on the bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub points: Vec<Point>,
}

/// Declarative description of one chart; drawing it is up to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_range: Option<[f64; 2]>,
    pub series: Vec<Series>,
}

impl ChartPanel {
    pub fn bar(title: &str, x_label: &str, series: Series) -> Self {
        Self {
            title: title.to_string(),
            kind: ChartKind::Bar,
            x_label: x_label.to_string(),
            y_label: UNIT_LABEL.to_string(),
            y_range: None,
            series: vec![series],
        }
    }

    pub fn grouped(title: &str, x_label: &str, series: Vec<Series>) -> Self {
        Self {
            title: title.to_string(),
            kind: ChartKind::GroupedBar,
            x_label: x_label.to_string(),
            y_label: UNIT_LABEL.to_string(),
            y_range: None,
            series,
        }
    }

    pub fn with_ceiling(mut self, ceiling: Option<f64>) -> Self {
        self.y_range = ceiling.map(|top| [0.0, top]);
        self
    }
}

/// Formats a salary figure: whole numbers without decimals, with thousands separators.
pub fn format_value(value: f64) -> String {
    let rendered = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    };
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
