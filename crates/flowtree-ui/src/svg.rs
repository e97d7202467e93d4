//! Standalone SVG output for a laid-out tree.

use std::fmt::Write as _;

use crate::layout::{LaidOutNode, Layout};
use crate::session::{DOT_RADIUS, RenderSession};
use crate::wrap::{estimate_text_width, wrap_words};

/// Horizontal padding subtracted from the box width before wrapping.
const TEXT_PADDING: f64 = 20.0;
/// Distance from the dot to the text anchor.
const TEXT_OFFSET: f64 = 10.0;
const LINE_HEIGHT_EM: f64 = 1.1;
const NAME_DY_EM: f64 = -1.5;
const DESCRIPTION_DY_EM: f64 = 1.0;
const DIMMED_OPACITY: f64 = 0.2;

const STYLE: &str = "\
.link { fill: none; stroke: #ccc; stroke-width: 1.5px; }
.node-bg { fill: #f8f8f8; stroke: #ddd; }
.node circle { fill: #fff; stroke: steelblue; stroke-width: 1.5px; }
.node.match .node-bg { stroke: #ff8f40; stroke-width: 2px; }
.node-end circle { stroke: #6cbf43; }
.node-cycle circle { stroke: #f07178; }
.node-condition circle, .node-else circle { stroke: #e6b450; }
.node-action circle { stroke: #a37acc; }
";

#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub font_size: f64,
    pub description_font_size: f64,
    pub font_family: String,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            description_font_size: 12.0,
            font_family: "sans-serif".to_string(),
        }
    }
}

/// Render the layout as an SVG document, applying the session's zoom,
/// search dimming and highlight.
pub fn render_svg(layout: &Layout, session: &RenderSession, options: &SvgOptions) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_document(&mut out, layout, session, options);
    out
}

fn write_document(
    out: &mut String,
    layout: &Layout,
    session: &RenderSession,
    options: &SvgOptions,
) -> std::fmt::Result {
    let zoom = session.zoom;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}" font-size="{size}">"#,
        w = num(layout.width),
        h = num(layout.height),
        font = escape(&options.font_family),
        size = num(options.font_size),
    )?;
    writeln!(out, "<style>\n{STYLE}</style>")?;
    writeln!(
        out,
        r#"<g class="viewport" transform="translate({},{}) scale({})">"#,
        num(zoom.translate_x),
        num(zoom.translate_y),
        num(zoom.scale),
    )?;
    writeln!(
        out,
        r#"<g transform="translate({},{})">"#,
        num(layout.options.margin_left),
        num(layout.options.margin_top),
    )?;

    for link in &layout.links {
        let (Some(source), Some(target)) = (layout.node(link.source), layout.node(link.target))
        else {
            continue;
        };
        let mid_x = (source.x + target.x) / 2.0;
        write!(
            out,
            r#"<path class="link" d="M{},{}C{},{} {},{} {},{}""#,
            num(source.x),
            num(source.y),
            num(mid_x),
            num(source.y),
            num(mid_x),
            num(target.y),
            num(target.x),
            num(target.y),
        )?;
        if session.is_dimmed(target.id) {
            write!(out, r#" opacity="{}""#, num(DIMMED_OPACITY))?;
        }
        writeln!(out, "/>")?;
    }

    for node in &layout.nodes {
        write_node(out, node, layout, session, options)?;
    }

    writeln!(out, "</g>\n</g>\n</svg>")
}

fn write_node(
    out: &mut String,
    node: &LaidOutNode,
    layout: &Layout,
    session: &RenderSession,
    options: &SvgOptions,
) -> std::fmt::Result {
    let width = layout.options.node_width;
    let height = layout.options.node_height;

    let mut class = format!("node node-{}", node.kind.as_str());
    if session.is_match(node.id) {
        class.push_str(" match");
    }
    write!(
        out,
        r#"<g class="{class}" transform="translate({},{})""#,
        num(node.x),
        num(node.y),
    )?;
    if session.is_dimmed(node.id) {
        write!(out, r#" opacity="{}""#, num(DIMMED_OPACITY))?;
    }
    writeln!(out, ">")?;

    writeln!(out, "<title>{}</title>", escape(&node.tooltip_text()))?;
    writeln!(
        out,
        r#"<rect class="node-bg" x="{}" y="{}" width="{}" height="{}" rx="5" ry="5"/>"#,
        num(node.box_x(width)),
        num(-height / 2.0),
        num(width),
        num(height),
    )?;
    writeln!(out, r#"<circle r="{}"/>"#, num(DOT_RADIUS))?;

    let (anchor, text_x) = if node.has_children {
        ("end", -TEXT_OFFSET)
    } else {
        ("start", TEXT_OFFSET)
    };
    let wrap_width = width - TEXT_PADDING;

    write_text(
        out,
        &node.name,
        &TextStyle {
            class: "name",
            anchor,
            x: text_x,
            dy: NAME_DY_EM,
            font_size: options.font_size,
            fill: None,
        },
        wrap_width,
    )?;
    if let Some(description) = node.description.as_deref() {
        write_text(
            out,
            description,
            &TextStyle {
                class: "description",
                anchor,
                x: text_x,
                dy: DESCRIPTION_DY_EM,
                font_size: options.description_font_size,
                fill: Some("#666"),
            },
            wrap_width,
        )?;
    }

    writeln!(out, "</g>")
}

struct TextStyle<'a> {
    class: &'a str,
    anchor: &'a str,
    x: f64,
    dy: f64,
    font_size: f64,
    fill: Option<&'a str>,
}

fn write_text(out: &mut String, text: &str, style: &TextStyle<'_>, wrap_width: f64) -> std::fmt::Result {
    let lines = wrap_words(text, wrap_width, |s| estimate_text_width(s, style.font_size));
    if lines.is_empty() {
        return Ok(());
    }

    write!(
        out,
        r#"<text class="{}" text-anchor="{}" font-size="{}""#,
        style.class,
        style.anchor,
        num(style.font_size),
    )?;
    if let Some(fill) = style.fill {
        write!(out, r#" fill="{fill}""#)?;
    }
    write!(out, ">")?;
    for (i, line) in lines.iter().enumerate() {
        write!(
            out,
            r#"<tspan x="{}" y="0" dy="{}em">{}</tspan>"#,
            num(style.x),
            num(style.dy + i as f64 * LINE_HEIGHT_EM),
            escape(line),
        )?;
    }
    writeln!(out, "</text>")
}

/// Format a coordinate with at most two decimals and no negative zero.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    format!("{rounded}")
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
