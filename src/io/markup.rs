// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! HTML image map generation.
//!
//! Shapes are written as one `<map>` element holding an `<area>` per shape,
//! in collection order, ready to paste next to an `<img usemap="#name">`.

use crate::models::shape::Shape;
use anyhow::Result;
use std::fmt::Write as _;
use std::path::Path;

/// Escape text for use inside a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a single `<area>` element.
pub fn render_area(shape: &Shape) -> String {
    let kind = shape.kind().html_name();
    let coords = shape
        .coords()
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let alt = if shape.title.is_empty() {
        format!("{} area", kind)
    } else {
        shape.title.clone()
    };

    format!(
        r#"<area shape="{}" coords="{}" href="{}" title="{}" alt="{}">"#,
        kind,
        coords,
        escape_attr(&shape.href),
        escape_attr(&shape.title),
        escape_attr(&alt),
    )
}

/// Render the full `<map>` element.
pub fn render(map_name: &str, shapes: &[Shape]) -> String {
    let mut out = format!("<map name=\"{}\">\n", escape_attr(map_name));
    for shape in shapes {
        // Writing to a String cannot fail
        let _ = writeln!(out, "  {}", render_area(shape));
    }
    out.push_str("</map>");
    out
}

/// Write the markup to an HTML file.
pub fn export_html(map_name: &str, shapes: &[Shape], path: &Path) -> Result<()> {
    let mut html = render(map_name, shapes);
    html.push('\n');
    std::fs::write(path, html)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shape::{Geometry, Point};

    fn rect() -> Shape {
        Shape::new(1, Geometry::rect(Point::new(50, 50), Point::new(150, 150)), [0, 0, 0])
    }

    #[test]
    fn test_render_area_defaults() {
        assert_eq!(
            render_area(&rect()),
            r##"<area shape="rect" coords="50,50,150,150" href="#" title="" alt="rect area">"##
        );
    }

    #[test]
    fn test_render_area_uses_title_for_alt() {
        let mut shape = Shape::new(
            2,
            Geometry::Polygon {
                vertices: vec![Point::new(0, 0), Point::new(100, 0), Point::new(100, 100)],
            },
            [0, 0, 0],
        );
        shape.href = "/shop?a=1&b=2".to_string();
        shape.title = "Say \"hi\"".to_string();

        assert_eq!(
            render_area(&shape),
            r#"<area shape="poly" coords="0,0,100,0,100,100" href="/shop?a=1&amp;b=2" title="Say &quot;hi&quot;" alt="Say &quot;hi&quot;">"#
        );
    }

    #[test]
    fn test_render_map() {
        let circle = Shape::new(3, Geometry::Circle { cx: 200, cy: 200, r: 50 }, [0, 0, 0]);
        let markup = render("image-map", &[rect(), circle]);
        let expected = concat!(
            "<map name=\"image-map\">\n",
            "  <area shape=\"rect\" coords=\"50,50,150,150\" href=\"#\" title=\"\" alt=\"rect area\">\n",
            "  <area shape=\"circle\" coords=\"200,200,50\" href=\"#\" title=\"\" alt=\"circle area\">\n",
            "</map>"
        );
        assert_eq!(markup, expected);
    }

    #[test]
    fn test_render_empty_map() {
        assert_eq!(render("image-map", &[]), "<map name=\"image-map\">\n</map>");
    }

    #[test]
    fn test_render_is_deterministic() {
        let shapes = vec![rect(), rect()];
        assert_eq!(render("m", &shapes), render("m", &shapes));
    }
}
