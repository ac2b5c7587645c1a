//! Mermaid `erDiagram` text generation
//!
//! The rendering engine only ever sees the text produced here.

use std::collections::HashSet;
use std::fmt::Write;

use super::erd::ErdState;

/// Builds the diagram description for the current state and selection
pub struct MermaidBuilder<'a> {
    state: &'a ErdState,
    selected: HashSet<&'a str>,
    show_all_relationships: bool,
}

impl<'a> MermaidBuilder<'a> {
    pub fn new(state: &'a ErdState) -> Self {
        Self {
            state,
            selected: HashSet::new(),
            show_all_relationships: false,
        }
    }

    /// Objects whose mutual relationships are drawn when `show_all` is off
    pub fn selected(mut self, selected: &'a [String]) -> Self {
        self.selected = selected.iter().map(String::as_str).collect();
        self
    }

    pub fn show_all_relationships(mut self, show_all: bool) -> Self {
        self.show_all_relationships = show_all;
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::from("erDiagram\n");

        for obj in &self.state.objects {
            let _ = writeln!(out, "  {} {{", sanitize_identifier(&obj.name));
            for field in &obj.fields {
                let _ = writeln!(
                    out,
                    "    {} {}",
                    sanitize_identifier(&field.field_type),
                    sanitize_identifier(&field.name)
                );
            }
            out.push_str("  }\n");
        }

        for rel in &self.state.relationships {
            if self.show_all_relationships
                || (self.selected.contains(rel.from.as_str())
                    && self.selected.contains(rel.to.as_str()))
            {
                let _ = writeln!(
                    out,
                    "  {} ||--|| {} : \"{}\"",
                    sanitize_identifier(&rel.from),
                    sanitize_identifier(&rel.to),
                    rel.field_name.replace('"', "")
                );
            }
        }

        for ann in &self.state.annotations {
            let _ = writeln!(out, "  %% Note: {}", ann.text.replace('\n', " "));
        }

        out
    }
}

/// Replace anything Mermaid would not accept in an entity/attribute name.
/// Names must start with a letter or `_`, so anything else gets a `_` prefix.
pub fn sanitize_identifier(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len() + 1);
    let mut chars = name.trim().chars().peekable();

    match chars.peek() {
        Some(c) if c.is_ascii_alphabetic() || *c == '_' => {}
        _ => cleaned.push('_'),
    }

    cleaned.extend(chars.map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            c
        } else {
            '_'
        }
    }));
    cleaned
}
