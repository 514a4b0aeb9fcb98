//! Text formatting shared by the human views.

use crate::colorize::Colorize;
use std::time::Duration;
use tfview_types::{Diagnostic, Severity, Value};

/// Render a value in configuration syntax, indenting nested collections by
/// two spaces per level starting from `indent`.
pub fn format_value(value: &Value, indent: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Unknown => "(known after apply)".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format_string(s, indent),
        Value::List(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            let pad = " ".repeat(indent + 2);
            let mut out = String::from("[\n");
            for item in items {
                out.push_str(&pad);
                out.push_str(&format_value(item, indent + 2));
                out.push_str(",\n");
            }
            out.push_str(&" ".repeat(indent));
            out.push(']');
            out
        }
        Value::Map(entries) => {
            if entries.is_empty() {
                return "{}".to_string();
            }
            let keys: Vec<String> = entries.keys().map(|k| format_key(k)).collect();
            let width = keys.iter().map(|k| k.chars().count()).max().unwrap_or(0);
            let pad = " ".repeat(indent + 2);
            let mut out = String::from("{\n");
            for (key, value) in keys.iter().zip(entries.values()) {
                out.push_str(&pad);
                out.push_str(&format!("{:<width$} = ", key, width = width));
                out.push_str(&format_value(value, indent + 2));
                out.push('\n');
            }
            out.push_str(&" ".repeat(indent));
            out.push('}');
            out
        }
    }
}

fn format_string(s: &str, indent: usize) -> String {
    // Multi-line strings that end in a newline read better as heredocs
    if s.len() > 1 && s.ends_with('\n') && s[..s.len() - 1].contains('\n') {
        let pad = " ".repeat(indent);
        let mut out = String::from("<<EOT\n");
        for line in s.lines() {
            out.push_str(&pad);
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&pad);
        out.push_str("EOT");
        return out;
    }
    quote(s)
}

fn format_key(key: &str) -> String {
    let is_ident = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if is_ident { key.to_string() } else { quote(key) }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

/// Whole-second duration in the `1h2m3s` notation.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h{}m{}s", h, m, s)
    } else if m > 0 {
        format!("{}m{}s", m, s)
    } else {
        format!("{}s", s)
    }
}

/// Diagnostic block framed with box-drawing characters, for color terminals.
pub fn format_diagnostic(diag: &Diagnostic, color: Colorize) -> String {
    let (leader, label) = severity_label(diag.severity, color);
    let leader_blank = leader.trim_end().to_string();

    let mut lines = vec![format!("{}{}: {}", leader, label, color.bold(&diag.summary))];
    if let Some(address) = &diag.address {
        lines.push(leader_blank.clone());
        lines.push(format!("{}  with {},", leader, address));
    }
    if !diag.detail.is_empty() {
        lines.push(leader_blank.clone());
        for line in diag.detail.lines() {
            if line.is_empty() {
                lines.push(leader_blank.clone());
            } else {
                lines.push(format!("{}{}", leader, line));
            }
        }
    }

    let (top, bottom) = match diag.severity {
        Severity::Error => (color.red("╷"), color.red("╵")),
        Severity::Warning => (color.yellow("╷"), color.yellow("╵")),
    };

    let mut out = format!("\n{}\n", top);
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&bottom);
    out.push('\n');
    out
}

/// Unframed diagnostic block, used when color is disabled.
pub fn format_diagnostic_plain(diag: &Diagnostic) -> String {
    let mut out = format!("\n{}: {}\n", diag.severity, diag.summary);
    if let Some(address) = &diag.address {
        out.push_str(&format!("\n  with {},\n", address));
    }
    if !diag.detail.is_empty() {
        out.push('\n');
        out.push_str(&diag.detail);
        out.push('\n');
    }
    out
}

fn severity_label(severity: Severity, color: Colorize) -> (String, String) {
    match severity {
        Severity::Error => (color.red("│ "), color.bold_red("Error")),
        Severity::Warning => (color.yellow("│ "), color.bold_yellow("Warning")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_scalars() {
        assert_eq!(format_value(&Value::string("web"), 0), "\"web\"");
        assert_eq!(format_value(&Value::number(3), 0), "3");
        assert_eq!(format_value(&Value::Null, 0), "null");
        assert_eq!(format_value(&Value::Unknown, 0), "(known after apply)");
    }

    #[test]
    fn test_format_nested_collections() {
        let value = Value::from(json!({"ids": ["a", "b"], "port": 80}));
        insta::assert_snapshot!(format_value(&value, 0), @r#"
        {
          ids  = [
            "a",
            "b",
          ]
          port = 80
        }
        "#);
    }

    #[test]
    fn test_format_map_quotes_non_identifier_keys() {
        let value = Value::from(json!({"a b": true}));
        assert_eq!(format_value(&value, 0), "{\n  \"a b\" = true\n}");
    }

    #[test]
    fn test_format_heredoc() {
        let value = Value::string("line one\nline two\n");
        assert_eq!(format_value(&value, 0), "<<EOT\nline one\nline two\nEOT");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(400)), "0s");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "1m5s");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "1h2m5s");
    }

    #[test]
    fn test_plain_diagnostic_layout() {
        let diag = Diagnostic::error("Provider failed", "request timed out")
            .with_address("aws_instance.web");
        assert_eq!(
            format_diagnostic_plain(&diag),
            "\nError: Provider failed\n\n  with aws_instance.web,\n\nrequest timed out\n"
        );
    }

    #[test]
    fn test_framed_diagnostic_without_color() {
        let diag = Diagnostic::warning("Deprecated", "");
        assert_eq!(
            format_diagnostic(&diag, Colorize::disabled()),
            "\n╷\n│ Warning: Deprecated\n╵\n"
        );
    }
}
