//! Visualization of expression trees
//!
//! Supports multiple output formats:
//! - Mermaid diagrams (for markdown/web rendering)
//! - DOT/Graphviz (for generating PNG/SVG)
//! - ASCII tree (for terminal viewing)

use crate::ast::ExprNode;
use crate::token::TokenKind;
use std::fmt::Write as FmtWrite;

/// Visualization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationFormat {
    /// Mermaid diagram format (renders in markdown, GitHub, etc.)
    Mermaid,
    /// DOT/Graphviz format (can be rendered with `dot` command)
    Dot,
    /// ASCII tree format (for terminal viewing)
    AsciiTree,
}

/// Trait for types that can be visualized
pub trait Visualize {
    /// Generate visualization in the specified format
    fn visualize(&self, format: VisualizationFormat) -> String;
}

impl Visualize for ExprNode {
    fn visualize(&self, format: VisualizationFormat) -> String {
        match format {
            VisualizationFormat::Mermaid => {
                let mut output = String::from("graph TD\n");
                visit_graph(self, format, &mut output);
                output
            }
            VisualizationFormat::Dot => {
                let mut output = String::from("digraph ExprTree {\n");
                output.push_str("    node [shape=box, style=rounded];\n");
                visit_graph(self, format, &mut output);
                output.push_str("}\n");
                output
            }
            VisualizationFormat::AsciiTree => {
                let mut output = String::new();
                visit_ascii(self, &mut output);
                output
            }
        }
    }
}

fn children(node: &ExprNode) -> Vec<&ExprNode> {
    match node {
        ExprNode::Leaf { .. } => Vec::new(),
        ExprNode::UnaryOp { operand, .. } => vec![operand.as_ref()],
        ExprNode::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
    }
}

/// Pre-order walk with an explicit stack; node ids follow visit order
fn visit_graph(root: &ExprNode, format: VisualizationFormat, output: &mut String) {
    let mut counter = 0;
    let mut stack: Vec<(&ExprNode, Option<usize>)> = vec![(root, None)];

    while let Some((node, parent_id)) = stack.pop() {
        let current_id = counter;
        counter += 1;

        let label = node_label(node).replace('"', "\\\"");
        match format {
            VisualizationFormat::Dot => {
                let _ = writeln!(output, "    n{} [label=\"{}\"];", current_id, label);
                if let Some(parent) = parent_id {
                    let _ = writeln!(output, "    n{} -> n{};", parent, current_id);
                }
            }
            _ => {
                let _ = writeln!(output, "    n{}[\"{}\"]", current_id, label);
                if let Some(parent) = parent_id {
                    let _ = writeln!(output, "    n{} --> n{}", parent, current_id);
                }
            }
        }

        for child in children(node).into_iter().rev() {
            stack.push((child, Some(current_id)));
        }
    }
}

fn visit_ascii(root: &ExprNode, output: &mut String) {
    let mut stack = vec![(root, 0)];
    while let Some((node, depth)) = stack.pop() {
        let _ = writeln!(output, "{}├─ {}", "  ".repeat(depth), node_label(node));
        for child in children(node).into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }
}

fn node_label(node: &ExprNode) -> String {
    match node {
        ExprNode::Leaf { token } => match token.kind {
            TokenKind::Number => format!("Number: {}", token.text),
            TokenKind::Name => format!("Name: {}", token.text),
            kind => format!("{}: {}", kind, token.text),
        },
        ExprNode::UnaryOp { operator, .. } => format!("Unary: {}", operator.symbol()),
        ExprNode::BinaryOp { operator, .. } => format!("Binary: {}", operator.symbol()),
    }
}
