//! SVG rendering for line charts.

use super::{LineChart, Series};

/// Document width in user units
pub(crate) const WIDTH: f64 = 640.0;
/// Document height in user units
pub(crate) const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 84.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 60.0;
/// Fraction of the data range added on each side of the plot.
const DATA_MARGIN: f64 = 0.05;
const TARGET_TICKS: f64 = 6.0;
const MAX_TICKS: f64 = 50.0;
/// Smallest half-width of a plotted range, keeping tick steps representable.
const MIN_HALF_WIDTH: f64 = 1e-300;
const GRID_COLOR: &str = "#d9d9d9";
const AXIS_COLOR: &str = "#333333";

/// Closed interval of plotted values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Range covering every finite value, widened when flat.
    ///
    /// Falls back to `[0, 1]` when there are no finite values.
    pub(crate) fn from_values(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        if min == max {
            let adjust = if min == 0.0 {
                1.0
            } else {
                (min.abs() * 0.1).max(MIN_HALF_WIDTH)
            };
            return Self {
                min: min - adjust,
                max: max + adjust,
            };
        }
        if max - min < 2.0 * MIN_HALF_WIDTH {
            let mid = min / 2.0 + max / 2.0;
            return Self {
                min: mid - MIN_HALF_WIDTH,
                max: mid + MIN_HALF_WIDTH,
            };
        }

        let pad = (max - min) * DATA_MARGIN;
        Self {
            min: min - pad,
            max: max + pad,
        }
    }

    fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Tick positions on a 1-2-5 scale inside `extent`.
///
/// Returns no ticks when the range cannot be stepped.
pub(crate) fn ticks(extent: Extent) -> (Vec<f64>, f64) {
    let step = nice_step(extent.span() / TARGET_TICKS);
    if !step.is_finite() || step <= 0.0 {
        return (Vec::new(), step);
    }

    let first = (extent.min / step).ceil();
    let last = (extent.max / step).floor();
    if !first.is_finite() || !last.is_finite() || last - first > MAX_TICKS {
        return (Vec::new(), step);
    }

    let ticks = (first as i64..=last as i64)
        .map(|i| i as f64 * step)
        .collect();
    (ticks, step)
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual < 1.5 {
        1.0
    } else if residual < 3.0 {
        2.0
    } else if residual < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick label with just enough decimals for the tick step.
pub(crate) fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    let text = format!("{:.*}", decimals, value);
    // Avoid "-0" labels at the origin
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

struct Frame {
    x: Extent,
    y: Extent,
}

impl Frame {
    fn plot_width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn px(&self, x: f64) -> f64 {
        MARGIN_LEFT + (x - self.x.min) / self.x.span() * Self::plot_width()
    }

    fn py(&self, y: f64) -> f64 {
        MARGIN_TOP + (1.0 - (y - self.y.min) / self.y.span()) * Self::plot_height()
    }
}

/// Render `chart` as a standalone SVG document.
pub(crate) fn render(chart: &LineChart) -> String {
    let frame = Frame {
        x: Extent::from_values(chart.series.iter().flat_map(|s| s.points.iter().map(|p| p.0))),
        y: Extent::from_values(chart.series.iter().flat_map(|s| s.points.iter().map(|p| p.1))),
    };

    let mut svg = String::new();
    svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    svg.push('\n');
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    ));
    svg.push_str(
        r#"<style>text{font-family:DejaVu Sans,Arial,sans-serif;font-size:11px;fill:#333}</style>"#,
    );
    svg.push_str(&format!(
        r##"<rect x="0" y="0" width="{WIDTH}" height="{HEIGHT}" fill="#ffffff" />"##
    ));

    draw_grid(&mut svg, &frame);
    draw_frame(&mut svg);
    for series in &chart.series {
        draw_series(&mut svg, &frame, series);
    }
    draw_labels(&mut svg, chart);
    draw_legend(&mut svg, &chart.series);

    svg.push_str("</svg>\n");
    svg
}

fn draw_grid(svg: &mut String, frame: &Frame) {
    let left = MARGIN_LEFT;
    let right = WIDTH - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = HEIGHT - MARGIN_BOTTOM;

    let (x_ticks, x_step) = ticks(frame.x);
    for x in x_ticks {
        let px = frame.px(x);
        svg.push_str(&format!(
            r#"<line x1="{px:.2}" y1="{top:.2}" x2="{px:.2}" y2="{bottom:.2}" stroke="{GRID_COLOR}" stroke-width="0.8" />"#
        ));
        svg.push_str(&format!(
            r#"<line x1="{px:.2}" y1="{bottom:.2}" x2="{px:.2}" y2="{tick:.2}" stroke="{AXIS_COLOR}" stroke-width="1" />"#,
            tick = bottom + 4.0
        ));
        svg.push_str(&format!(
            r#"<text x="{px:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            y = bottom + 17.0,
            label = format_tick(x, x_step)
        ));
    }

    let (y_ticks, y_step) = ticks(frame.y);
    for y in y_ticks {
        let py = frame.py(y);
        svg.push_str(&format!(
            r#"<line x1="{left:.2}" y1="{py:.2}" x2="{right:.2}" y2="{py:.2}" stroke="{GRID_COLOR}" stroke-width="0.8" />"#
        ));
        svg.push_str(&format!(
            r#"<line x1="{tick:.2}" y1="{py:.2}" x2="{left:.2}" y2="{py:.2}" stroke="{AXIS_COLOR}" stroke-width="1" />"#,
            tick = left - 4.0
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
            x = left - 7.0,
            y = py + 4.0,
            label = format_tick(y, y_step)
        ));
    }
}

fn draw_frame(svg: &mut String) {
    svg.push_str(&format!(
        r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="none" stroke="{AXIS_COLOR}" stroke-width="1" />"#,
        x = MARGIN_LEFT,
        y = MARGIN_TOP,
        w = Frame::plot_width(),
        h = Frame::plot_height()
    ));
}

fn draw_series(svg: &mut String, frame: &Frame, series: &Series) {
    let coords: Vec<(f64, f64)> = series
        .points
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|&(x, y)| (frame.px(x), frame.py(y)))
        .collect();

    match coords.as_slice() {
        [] => {}
        [(x, y)] => svg.push_str(&format!(
            r#"<circle cx="{x:.2}" cy="{y:.2}" r="2.5" fill="{color}" />"#,
            color = series.color
        )),
        _ => {
            let points = coords
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            svg.push_str(&format!(
                r#"<polyline fill="none" stroke="{color}" stroke-width="1.8" points="{points}" />"#,
                color = series.color
            ));
        }
    }
}

fn draw_labels(svg: &mut String, chart: &LineChart) {
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" style="font-size:14px">{title}</text>"#,
        x = MARGIN_LEFT + Frame::plot_width() / 2.0,
        y = MARGIN_TOP - 16.0,
        title = escape_xml(&chart.title)
    ));
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
        x = MARGIN_LEFT + Frame::plot_width() / 2.0,
        y = HEIGHT - 18.0,
        label = escape_xml(&chart.x_label)
    ));
    let y_mid = MARGIN_TOP + Frame::plot_height() / 2.0;
    svg.push_str(&format!(
        r#"<text x="18" y="{y:.2}" text-anchor="middle" transform="rotate(-90 18 {y:.2})">{label}</text>"#,
        y = y_mid,
        label = escape_xml(&chart.y_label)
    ));
}

fn draw_legend(svg: &mut String, series_list: &[Series]) {
    if series_list.is_empty() {
        return;
    }

    let x = MARGIN_LEFT + 10.0;
    let y = MARGIN_TOP + 10.0;
    let longest = series_list
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0) as f64;
    let width = 42.0 + longest * 6.2;
    let height = 8.0 + series_list.len() as f64 * 18.0;

    svg.push_str(&format!(
        r##"<rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="#ffffff" fill-opacity="0.85" stroke="#cccccc" rx="3" />"##
    ));
    for (i, series) in series_list.iter().enumerate() {
        let row = y + 16.0 + i as f64 * 18.0;
        svg.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{ly:.2}" x2="{x2:.2}" y2="{ly:.2}" stroke="{color}" stroke-width="1.8" />"#,
            x1 = x + 8.0,
            x2 = x + 30.0,
            ly = row - 4.0,
            color = series.color
        ));
        svg.push_str(&format!(
            r#"<text x="{tx:.2}" y="{row:.2}" text-anchor="start">{label}</text>"#,
            tx = x + 36.0,
            label = escape_xml(&series.label)
        ));
    }
}
