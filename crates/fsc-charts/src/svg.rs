//! SVG renderer for bar and area figures.
//!
//! Produces an inline SVG fragment with a fixed viewBox that CSS scales
//! to the container: horizontal gridlines with axis labels, the plotted
//! series, a zero baseline when values go negative, and a legend when
//! more than one series is drawn. Fills reference CSS custom properties
//! with hard-coded fallbacks, so the figure follows the page theme but
//! stays presentable on its own.

use fsc_core::{ChartKind, html_escape};

use crate::config::ChartConfig;

/// Fixed drawing surface; CSS scales the rendered element.
pub const VIEW_WIDTH: f64 = 680.0;
pub const VIEW_HEIGHT: f64 = 340.0;

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 32.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Series fills: theme property plus fallback, by series index.
const PALETTE: &[(&str, &str)] = &[
    ("--fsc-c0", "#2563eb"),
    ("--fsc-c1", "#f59e0b"),
    ("--fsc-c2", "#10b981"),
    ("--fsc-c3", "#ef4444"),
];

/// Render a config into an inline SVG fragment.
pub fn render(config: &ChartConfig) -> String {
    let scale = Scale::for_config(config);
    let slot_w = slot_width(config);

    let grid = render_grid(config, &scale);
    let figure = match config.kind {
        ChartKind::Bar => render_bars(config, &scale, slot_w),
        ChartKind::Area => render_area(config, &scale, slot_w),
    };
    let baseline = if scale.y_min < 0.0 {
        let y0 = scale.y(0.0);
        format!(
            r#"<line class="fsc-baseline" x1="{x1:.1}" y1="{y0:.1}" x2="{x2:.1}" y2="{y0:.1}" stroke="var(--fsc-axis, #9ca3af)" stroke-width="1.5"/>"#,
            x1 = MARGIN_LEFT,
            x2 = VIEW_WIDTH - MARGIN_RIGHT,
        )
    } else {
        String::new()
    };
    let x_labels = render_x_labels(config, slot_w);
    let legend = if config.series.len() > 1 {
        render_legend(config)
    } else {
        String::new()
    };

    format!(
        r#"<svg viewBox="0 0 {w:.0} {h:.0}" role="img" aria-label="{label}" class="fsc-chart" preserveAspectRatio="xMidYMid meet">{grid}{figure}{baseline}{x_labels}{legend}</svg>"#,
        w = VIEW_WIDTH,
        h = VIEW_HEIGHT,
        label = html_escape(&config.title),
    )
}

fn slot_width(config: &ChartConfig) -> f64 {
    let plot_w = VIEW_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    plot_w / config.labels.len().max(1) as f64
}

// ── Vertical scale ─────────────────────────────────────────────────

/// Maps values to pixel rows. The range always includes zero; the top
/// is rounded up to a tick-friendly bound, the bottom rounded down
/// only when the data goes negative.
struct Scale {
    y_min: f64,
    y_max: f64,
}

impl Scale {
    fn for_config(config: &ChartConfig) -> Self {
        let y_max = nice_bound(config.max_value());
        let raw_min = config.min_value();
        let y_min = if raw_min < 0.0 {
            -nice_bound(-raw_min)
        } else {
            0.0
        };
        Self { y_min, y_max }
    }

    fn y(&self, value: f64) -> f64 {
        let span = self.y_max - self.y_min;
        let plot_h = VIEW_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        MARGIN_TOP + plot_h - (value - self.y_min) / span * plot_h
    }
}

/// Round up to the next 1 / 2 / 2.5 / 5 step of the value's magnitude.
fn nice_bound(raw: f64) -> f64 {
    if raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let scaled = raw / magnitude;
    let step = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 2.5 {
        2.5
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

// ── Fragments ──────────────────────────────────────────────────────

fn render_grid(config: &ChartConfig, scale: &Scale) -> String {
    let mut out = String::new();
    let steps = 4;
    for i in 0..=steps {
        let value = scale.y_min + (scale.y_max - scale.y_min) * f64::from(i) / f64::from(steps);
        let y = scale.y(value);
        out.push_str(&format!(
            r#"<line class="fsc-grid" x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="var(--fsc-grid, #e5e7eb)" stroke-width="1"/>"#,
            x1 = MARGIN_LEFT,
            x2 = VIEW_WIDTH - MARGIN_RIGHT,
        ));
        out.push_str(&format!(
            r#"<text class="fsc-ylabel" x="{x:.1}" y="{ty:.1}" text-anchor="end" font-size="11" fill="var(--fsc-muted, #6b7280)">{label}</text>"#,
            x = MARGIN_LEFT - 8.0,
            ty = y + 4.0,
            label = html_escape(&config.value_format.format(value)),
        ));
    }
    out
}

fn render_bars(config: &ChartConfig, scale: &Scale, slot_w: f64) -> String {
    let mut out = String::new();
    let y_zero = scale.y(0.0);

    if config.stacked {
        let bar_w = slot_w * 0.6;
        for i in 0..config.labels.len() {
            let x = MARGIN_LEFT + i as f64 * slot_w + slot_w * 0.2;
            let mut cumulative = 0.0;
            for (j, series) in config.series.iter().enumerate() {
                let value = series.values.get(i).copied().unwrap_or(0.0);
                if value <= 0.0 {
                    continue;
                }
                let y_top = scale.y(cumulative + value);
                let height = scale.y(cumulative) - y_top;
                out.push_str(&format!(
                    r#"<rect class="fsc-bar" x="{x:.1}" y="{y_top:.1}" width="{bar_w:.1}" height="{height:.1}" fill="{fill}"/>"#,
                    fill = palette_fill(j),
                ));
                cumulative += value;
            }
        }
    } else {
        let lanes = config.series.len().max(1) as f64;
        let bar_w = slot_w * 0.6 / lanes;
        for i in 0..config.labels.len() {
            let x0 = MARGIN_LEFT + i as f64 * slot_w + slot_w * 0.2;
            for (j, series) in config.series.iter().enumerate() {
                let value = series.values.get(i).copied().unwrap_or(0.0);
                if value == 0.0 {
                    continue;
                }
                let x = x0 + j as f64 * bar_w;
                let y_val = scale.y(value);
                let (y, height) = if value >= 0.0 {
                    (y_val, y_zero - y_val)
                } else {
                    (y_zero, y_val - y_zero)
                };
                out.push_str(&format!(
                    r#"<rect class="fsc-bar" x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{height:.1}" fill="{fill}"/>"#,
                    w = bar_w * 0.92,
                    fill = palette_fill(j),
                ));
            }
        }
    }
    out
}

fn render_area(config: &ChartConfig, scale: &Scale, slot_w: f64) -> String {
    let mut out = String::new();
    let y_zero = scale.y(0.0);
    for (j, series) in config.series.iter().enumerate() {
        if series.values.is_empty() {
            continue;
        }
        let fill = palette_fill(j);
        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (MARGIN_LEFT + (i as f64 + 0.5) * slot_w, scale.y(*v)))
            .collect();

        let mut line = String::new();
        for (i, (x, y)) in points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            line.push_str(&format!("{cmd}{x:.1},{y:.1}"));
        }
        let first_x = points[0].0;
        let last_x = points[points.len() - 1].0;

        out.push_str(&format!(
            r#"<path class="fsc-area" d="{line}L{last_x:.1},{y_zero:.1}L{first_x:.1},{y_zero:.1}Z" fill="{fill}" opacity="0.25"/>"#
        ));
        out.push_str(&format!(
            r#"<path class="fsc-line" d="{line}" fill="none" stroke="{fill}" stroke-width="2.5"/>"#
        ));
        for (x, y) in &points {
            out.push_str(&format!(
                r#"<circle class="fsc-dot" cx="{x:.1}" cy="{y:.1}" r="3" fill="{fill}"/>"#
            ));
        }
    }
    out
}

fn render_x_labels(config: &ChartConfig, slot_w: f64) -> String {
    let mut out = String::new();
    for (i, label) in config.labels.iter().enumerate() {
        let x = MARGIN_LEFT + (i as f64 + 0.5) * slot_w;
        out.push_str(&format!(
            r#"<text class="fsc-xlabel" x="{x:.1}" y="{y:.1}" text-anchor="middle" font-size="11" fill="var(--fsc-muted, #6b7280)">{t}</text>"#,
            y = VIEW_HEIGHT - 14.0,
            t = html_escape(label),
        ));
    }
    out
}

fn render_legend(config: &ChartConfig) -> String {
    let mut out = String::new();
    let entry_w = 120.0;
    let mut x = VIEW_WIDTH - MARGIN_RIGHT - config.series.len() as f64 * entry_w;
    for (j, series) in config.series.iter().enumerate() {
        out.push_str(&format!(
            r#"<rect class="fsc-legend" x="{x:.1}" y="10" width="12" height="12" rx="2" fill="{fill}"/>"#,
            fill = palette_fill(j),
        ));
        out.push_str(&format!(
            r#"<text class="fsc-legend-label" x="{tx:.1}" y="20" font-size="11" fill="var(--fsc-muted, #6b7280)">{name}</text>"#,
            tx = x + 18.0,
            name = html_escape(&series.name),
        ));
        x += entry_w;
    }
    out
}

fn palette_fill(index: usize) -> String {
    let (var, fallback) = PALETTE[index % PALETTE.len()];
    format!("var({var}, {fallback})")
}
