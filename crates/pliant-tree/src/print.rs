//! Debug outline of a subtree.
//!
//! Output is one `<div ...>` element per node, indented two spaces per
//! level. Only style that differs from the defaults is listed.

use std::fmt::Write;

use pliant_common::LogLevel;
use pliant_style::{Edge, Edges, Style, Value};

use crate::node::NodeId;
use crate::tree::Tree;

/// What to include for each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Computed width, height, top and left.
    pub layout: bool,
    /// Non-default style properties.
    pub style: bool,
    /// Recurse into children.
    pub children: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            layout: true,
            style: true,
            children: true,
        }
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Auto => "auto".to_string(),
        Value::Point(v) => format!("{v}px"),
        Value::Percent(v) => format!("{v}%"),
    }
}

fn push_keyword<T: PartialEq + std::fmt::Display>(
    out: &mut String,
    key: &str,
    value: T,
    default: T,
) {
    if value != default {
        let _ = write!(out, "{key}: {value}; ");
    }
}

fn push_value(out: &mut String, key: &str, value: Value, default: Value) {
    if value != default {
        let _ = write!(out, "{key}: {}; ", value_text(value));
    }
}

fn push_factor(out: &mut String, key: &str, value: Option<f32>) {
    if let Some(v) = value {
        let _ = write!(out, "{key}: {v}; ");
    }
}

fn push_edges(out: &mut String, key: &str, edges: &Edges) {
    for (edge, value) in edges.defined() {
        match edge {
            Edge::All => {
                let _ = write!(out, "{key}: {}; ", value_text(value));
            }
            other => {
                let _ = write!(out, "{key}-{other}: {}; ", value_text(value));
            }
        }
    }
}

fn style_text(style: &Style, defaults: &Style) -> String {
    let mut out = String::new();
    push_keyword(&mut out, "direction", style.direction, defaults.direction);
    push_keyword(&mut out, "flex-direction", style.flex_direction, defaults.flex_direction);
    push_keyword(&mut out, "justify-content", style.justify_content, defaults.justify_content);
    push_keyword(&mut out, "align-items", style.align_items, defaults.align_items);
    push_keyword(&mut out, "align-content", style.align_content, defaults.align_content);
    push_keyword(&mut out, "align-self", style.align_self, defaults.align_self);
    push_factor(&mut out, "flex-grow", style.flex_grow);
    push_factor(&mut out, "flex-shrink", style.flex_shrink);
    push_value(&mut out, "flex-basis", style.flex_basis, defaults.flex_basis);
    push_factor(&mut out, "flex", style.flex);
    push_keyword(&mut out, "flex-wrap", style.flex_wrap, defaults.flex_wrap);
    push_keyword(&mut out, "overflow", style.overflow, defaults.overflow);
    push_keyword(&mut out, "display", style.display, defaults.display);
    push_edges(&mut out, "margin", &style.margin);
    push_edges(&mut out, "padding", &style.padding);
    push_edges(&mut out, "border", &style.border);
    push_value(&mut out, "width", style.dimensions.width, defaults.dimensions.width);
    push_value(&mut out, "height", style.dimensions.height, defaults.dimensions.height);
    push_value(&mut out, "max-width", style.max_dimensions.width, Value::Undefined);
    push_value(&mut out, "max-height", style.max_dimensions.height, Value::Undefined);
    push_value(&mut out, "min-width", style.min_dimensions.width, Value::Undefined);
    push_value(&mut out, "min-height", style.min_dimensions.height, Value::Undefined);
    push_keyword(&mut out, "position", style.position_type, defaults.position_type);
    push_edges(&mut out, "position", &style.position);
    push_factor(&mut out, "aspect-ratio", style.aspect_ratio);
    out
}

impl Tree {
    /// Render the subtree rooted at `id` as text.
    #[must_use]
    pub fn print_to_string(&self, id: NodeId, options: PrintOptions) -> String {
        let mut out = String::new();
        self.print_node(&mut out, id, options, 0);
        out
    }

    /// Log the subtree rooted at `id` at debug level.
    pub fn print(&self, id: NodeId, options: PrintOptions) {
        let text = self.print_to_string(id, options);
        self.log(Some(id), LogLevel::Debug, &text);
    }

    fn print_node(&self, out: &mut String, id: NodeId, options: PrintOptions, level: usize) {
        let Some(node) = self.get(id) else {
            return;
        };
        let indent = "  ".repeat(level);
        out.push_str(&indent);
        out.push_str("<div ");
        if options.layout {
            let layout = &node.layout;
            let _ = write!(
                out,
                "layout=\"width: {}; height: {}; top: {}; left: {};\" ",
                layout.width(),
                layout.height(),
                layout.top(),
                layout.left()
            );
        }
        if options.style {
            let defaults = Style::initial(node.use_web_defaults());
            let _ = write!(out, "style=\"{}\" ", style_text(node.style(), &defaults));
        }
        if node.has_measure_func() {
            out.push_str("has-custom-measure=\"true\"");
        }
        out.push('>');

        let children = node.children();
        if options.children && !children.is_empty() {
            for &child in children {
                out.push('\n');
                self.print_node(out, child, options, level + 1);
            }
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str("</div>");
    }
}
