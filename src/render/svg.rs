//! SVG output for a `Chart`
//!
//! Model space (unit disc, y down) is scaled so radius 1.0 touches the
//! shorter canvas edge. Sectors carry `data-*` attributes so the dashboard
//! can turn a click into a focus request; hover text is a native `<title>`.

use std::fmt::Write;

use super::{Chart, Shape};
use crate::layout::{ArcSpan, Point};
use crate::utils::escape_xml;

struct Canvas {
    cx: f64,
    cy: f64,
    scale: f64,
}

impl Canvas {
    fn for_chart(chart: &Chart) -> Self {
        let w = chart.width as f64;
        let h = chart.height as f64;
        Self {
            cx: w / 2.0,
            cy: h / 2.0,
            scale: w.min(h) / 2.0,
        }
    }

    fn map(&self, p: Point) -> (f64, f64) {
        (self.cx + p.x * self.scale, self.cy + p.y * self.scale)
    }

    fn polar(&self, radius: f64, angle: f64) -> (f64, f64) {
        self.map(Point::polar(radius, angle))
    }
}

impl Chart {
    pub fn to_svg(&self) -> String {
        let canvas = Canvas::for_chart(self);
        let mut svg = String::with_capacity(64 * 1024);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="{title}" class="lifecycle-diagram">"#,
            w = self.width,
            h = self.height,
            title = escape_xml(&self.title),
        );
        svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");

        for shape in &self.shapes {
            write_shape(&mut svg, shape, &canvas);
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn write_shape(svg: &mut String, shape: &Shape, canvas: &Canvas) {
    match shape {
        Shape::Disc { radius, fill, stroke } => {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="{}"/>"#,
                canvas.cx,
                canvas.cy,
                radius * canvas.scale,
                escape_xml(fill),
                escape_xml(stroke)
            );
        }
        Shape::Sector {
            ring,
            stage,
            category,
            name,
            arc,
            fill,
            opacity,
            tooltip,
        } => {
            let category_attr = category
                .as_ref()
                .map(|c| format!(r#" data-category="{}""#, escape_xml(c)))
                .unwrap_or_default();
            let _ = writeln!(
                svg,
                r#"  <g class="sector sector-{ring}" data-ring="{ring}" data-stage="{stage}"{category_attr} data-name="{name}">"#,
                ring = ring.as_str(),
                stage = escape_xml(stage),
                name = escape_xml(name),
            );
            let _ = writeln!(svg, "    <title>{}</title>", escape_xml(tooltip));
            let _ = writeln!(
                svg,
                r#"    <path d="{}" fill="{}" fill-opacity="{:.2}" stroke="white" stroke-width="1"/>"#,
                sector_path(arc, canvas),
                escape_xml(fill),
                opacity
            );
            svg.push_str("  </g>\n");
        }
        Shape::Separator {
            angle,
            inner_radius,
            outer_radius,
            color,
        } => {
            let (x1, y1) = canvas.polar(*inner_radius, *angle);
            let (x2, y2) = canvas.polar(*outer_radius, *angle);
            let _ = writeln!(
                svg,
                r#"  <line class="separator" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="2"/>"#,
                x1,
                y1,
                x2,
                y2,
                escape_xml(color)
            );
        }
        Shape::Connector {
            from,
            to,
            kind,
            dashed,
            curve,
            arrowhead,
            color,
            width,
        } => {
            let (sx, sy) = canvas.map(curve.start);
            let (c1x, c1y) = canvas.map(curve.ctrl1);
            let (c2x, c2y) = canvas.map(curve.ctrl2);
            let (ex, ey) = canvas.map(curve.end);
            let dash = if *dashed { r#" stroke-dasharray="6 4""# } else { "" };
            let color = escape_xml(color);

            let _ = writeln!(
                svg,
                r#"  <g class="connector connector-{}" data-from="{}" data-to="{}">"#,
                kind.as_str(),
                escape_xml(from),
                escape_xml(to)
            );
            let _ = writeln!(svg, "    <title>{} → {}</title>", escape_xml(from), escape_xml(to));
            let _ = writeln!(
                svg,
                r#"    <path d="M {:.1} {:.1} C {:.1} {:.1} {:.1} {:.1} {:.1} {:.1}" fill="none" stroke="{}" stroke-width="{:.1}"{} stroke-linecap="round"/>"#,
                sx, sy, c1x, c1y, c2x, c2y, ex, ey, color, width, dash
            );
            let points: Vec<String> = arrowhead
                .iter()
                .map(|p| {
                    let (x, y) = canvas.map(*p);
                    format!("{:.1},{:.1}", x, y)
                })
                .collect();
            let _ = writeln!(
                svg,
                r#"    <polygon points="{}" fill="{}"/>"#,
                points.join(" "),
                color
            );
            svg.push_str("  </g>\n");
        }
        Shape::Label {
            ring,
            text,
            position,
            rotation,
            font_size,
            color,
        } => {
            let (x, y) = canvas.map(*position);
            let _ = writeln!(
                svg,
                r#"  <text class="label label-{}" x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="middle" font-size="{:.1}" fill="{}" transform="rotate({:.1} {:.1} {:.1})" pointer-events="none">{}</text>"#,
                ring.as_str(),
                x,
                y,
                font_size,
                escape_xml(color),
                rotation,
                x,
                y,
                escape_xml(text)
            );
        }
        Shape::Title {
            lines,
            font_size,
            color,
        } => {
            let line_height = font_size * 1.2;
            let top = canvas.cy - line_height * (lines.len() as f64 - 1.0) / 2.0;
            let _ = writeln!(
                svg,
                r#"  <text class="title" text-anchor="middle" dominant-baseline="middle" font-size="{:.1}" font-weight="600" fill="{}" pointer-events="none">"#,
                font_size,
                escape_xml(color)
            );
            for (i, line) in lines.iter().enumerate() {
                let _ = writeln!(
                    svg,
                    r#"    <tspan x="{:.1}" y="{:.1}">{}</tspan>"#,
                    canvas.cx,
                    top + i as f64 * line_height,
                    escape_xml(line)
                );
            }
            svg.push_str("  </text>\n");
        }
    }
}

/// Annular sector path, drawn as two half arcs per edge so a full ring also renders
fn sector_path(arc: &ArcSpan, canvas: &Canvas) -> String {
    let mid = arc.mid_angle();
    let ro = arc.outer_radius * canvas.scale;
    let ri = arc.inner_radius * canvas.scale;

    let (os_x, os_y) = canvas.polar(arc.outer_radius, arc.start_angle);
    let (om_x, om_y) = canvas.polar(arc.outer_radius, mid);
    let (oe_x, oe_y) = canvas.polar(arc.outer_radius, arc.end_angle);
    let (ie_x, ie_y) = canvas.polar(arc.inner_radius, arc.end_angle);
    let (im_x, im_y) = canvas.polar(arc.inner_radius, mid);
    let (is_x, is_y) = canvas.polar(arc.inner_radius, arc.start_angle);

    format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 0 1 {:.2} {:.2} A {:.2} {:.2} 0 0 1 {:.2} {:.2} \
         L {:.2} {:.2} A {:.2} {:.2} 0 0 0 {:.2} {:.2} A {:.2} {:.2} 0 0 0 {:.2} {:.2} Z",
        os_x, os_y, ro, ro, om_x, om_y, ro, ro, oe_x, oe_y,
        ie_x, ie_y, ri, ri, im_x, im_y, ri, ri, is_x, is_y
    )
}
