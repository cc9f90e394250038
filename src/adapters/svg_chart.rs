//! Inline SVG rendering of line-chart specifications.

use crate::domain::chart::ChartSpec;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 360.0;
const PADDING: f64 = 56.0;

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_value(v: f64) -> String {
    if v.abs() < 1.0 {
        format!("{:.4}", v)
    } else {
        format!("{:.2}", v)
    }
}

/// Draws `spec` as a standalone `<svg>` element. Null values break the line.
pub fn render_line_chart_svg(spec: &ChartSpec) -> String {
    let title = escape_xml(&spec.title);
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" role="img" aria-label="{title}">
<rect width="{w:.0}" height="{h:.0}" fill="white"/>
<text x="{cx:.1}" y="24" text-anchor="middle" font-size="16">{title}</text>
"#,
        w = WIDTH,
        h = HEIGHT,
        cx = WIDTH / 2.0,
        title = title,
    );

    let (Some((first, last)), Some((min_v, max_v))) = (spec.date_range(), spec.value_range())
    else {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="gray">No data in selected range</text>
</svg>"#,
            WIDTH / 2.0,
            HEIGHT / 2.0
        ));
        return svg;
    };

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;
    let span_days = (last - first).num_days();
    let scale_x = if span_days > 0 {
        plot_width / span_days as f64
    } else {
        0.0
    };
    let range = max_v - min_v;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let x_of = |date: chrono::NaiveDate| {
        if span_days > 0 {
            PADDING + (date - first).num_days() as f64 * scale_x
        } else {
            WIDTH / 2.0
        }
    };
    let y_of = |v: f64| {
        if range > 0.0 {
            HEIGHT - PADDING - (v - min_v) * scale_y
        } else {
            HEIGHT / 2.0
        }
    };

    // axes
    svg.push_str(&format!(
        r#"<line x1="{p:.1}" y1="{p:.1}" x2="{p:.1}" y2="{b:.1}" stroke="black"/>
<line x1="{p:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="black"/>
"#,
        p = PADDING,
        b = HEIGHT - PADDING,
        r = WIDTH - PADDING,
    ));

    // one polyline per run of non-null values
    let mut segments: Vec<Vec<String>> = vec![Vec::new()];
    for point in &spec.points {
        match point.value {
            Some(v) => {
                if let Some(seg) = segments.last_mut() {
                    seg.push(format!("{:.1},{:.1}", x_of(point.date), y_of(v)));
                }
            }
            None => {
                if segments.last().is_some_and(|s| !s.is_empty()) {
                    segments.push(Vec::new());
                }
            }
        }
    }
    for seg in segments.iter().filter(|s| !s.is_empty()) {
        if seg.len() == 1 {
            let (x, y) = seg[0].split_once(',').unwrap_or(("0", "0"));
            svg.push_str(&format!(
                r#"<circle cx="{x}" cy="{y}" r="2" fill="steelblue"/>
"#
            ));
        } else {
            svg.push_str(&format!(
                r#"<polyline fill="none" stroke="steelblue" stroke-width="1.5" points="{}"/>
"#,
                seg.join(" ")
            ));
        }
    }

    // labels
    svg.push_str(&format!(
        r#"<text x="{p:.1}" y="{yl:.1}" text-anchor="start" font-size="11">{first}</text>
<text x="{r:.1}" y="{yl:.1}" text-anchor="end" font-size="11">{last}</text>
<text x="{xl:.1}" y="{top:.1}" text-anchor="end" font-size="11">{max}</text>
<text x="{xl:.1}" y="{bottom:.1}" text-anchor="end" font-size="11">{min}</text>
<text x="{cx:.1}" y="{xt:.1}" text-anchor="middle" font-size="12">{x_field}</text>
<text x="14" y="{cy:.1}" text-anchor="middle" font-size="12" transform="rotate(-90 14 {cy:.1})">{y_field}</text>
</svg>"#,
        p = PADDING,
        r = WIDTH - PADDING,
        yl = HEIGHT - PADDING + 16.0,
        xl = PADDING - 6.0,
        top = PADDING + 4.0,
        bottom = HEIGHT - PADDING,
        cx = WIDTH / 2.0,
        cy = HEIGHT / 2.0,
        xt = HEIGHT - 12.0,
        first = first,
        last = last,
        max = format_value(max_v),
        min = format_value(min_v),
        x_field = escape_xml(&spec.x_field),
        y_field = escape_xml(spec.y_field.as_str()),
    ));

    svg
}
