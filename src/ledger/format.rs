//! Rendering of field-level diff values.
//!
//! History values are arbitrary JSON. Rendering is total: absent values
//! get a placeholder, structured values are serialized with sorted keys,
//! and deep or huge values are elided rather than rendered in full.

use std::fmt::Write as _;

use serde_json::Value;

/// Placeholder for absent or null values.
pub const PLACEHOLDER: &str = "N/A";

/// Nesting depth beyond which structured values are elided.
pub const MAX_DEPTH: usize = 8;

/// Maximum rendered length, in characters, before truncation.
pub const MAX_CHARS: usize = 200;

const ELLIPSIS: char = '…';

/// Renders a diff value for display.
///
/// - `None` and `null` render as [`PLACEHOLDER`];
/// - strings render verbatim, numbers and booleans in their natural form;
/// - arrays and objects render as compact JSON with object keys sorted.
#[must_use]
pub fn format_diff_value(value: Option<&Value>) -> String {
    let rendered = match value {
        None | Some(Value::Null) => return PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(structured) => {
            let mut out = String::new();
            write_structured(&mut out, structured, 0);
            out
        }
    };
    truncate(rendered)
}

fn write_structured(out: &mut String, value: &Value, depth: usize) {
    if depth >= MAX_DEPTH {
        out.push(ELLIPSIS);
        return;
    }
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_structured(out, item, depth + 1);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{}:", Value::String(key.clone()));
                if let Some(v) = map.get(key) {
                    write_structured(out, v, depth + 1);
                }
            }
            out.push('}');
        }
        scalar => {
            let _ = write!(out, "{scalar}");
        }
    }
}

fn truncate(rendered: String) -> String {
    if rendered.chars().count() <= MAX_CHARS {
        return rendered;
    }
    let mut cut: String = rendered.chars().take(MAX_CHARS).collect();
    cut.push(ELLIPSIS);
    cut
}
