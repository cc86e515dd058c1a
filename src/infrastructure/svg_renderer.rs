// SVG adapter for the scene graph
use crate::application::scene_renderer::SceneRenderer;
use crate::domain::scene::{Label, Line, Primitive, Rect, Scene};
use std::fmt::Write;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderer;

impl SceneRenderer for SvgRenderer {
    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn render(&self, scene: &Scene) -> anyhow::Result<String> {
        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%" viewBox="0 0 {} {}">"#,
            scene.width, scene.height
        )?;

        for primitive in &scene.primitives {
            match primitive {
                Primitive::Rect(rect) => write_rect(&mut svg, rect)?,
                Primitive::Line(line) => write_line(&mut svg, line)?,
                Primitive::Label(label) => write_label(&mut svg, label)?,
            }
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

fn write_rect(svg: &mut String, rect: &Rect) -> std::fmt::Result {
    writeln!(
        svg,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        escape(rect.fill.as_str()),
        rect.opacity
    )
}

fn write_line(svg: &mut String, line: &Line) -> std::fmt::Result {
    writeln!(
        svg,
        r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        escape(line.stroke.as_str())
    )
}

fn write_label(svg: &mut String, label: &Label) -> std::fmt::Result {
    writeln!(
        svg,
        r#"  <text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
        label.x,
        label.y,
        escape(&label.font.family),
        label.font.size,
        escape(label.fill.as_str()),
        escape(&label.content)
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
