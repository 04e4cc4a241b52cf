use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// A response that renders as one table row in `--format table`.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Render a single serializable response. Tables show one key/value pair
/// per line.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => render_key_value(value),
    }
}

/// Render a list of rows. JSON formats emit an array.
pub fn render_rows<T: Serialize + TableRow>(
    rows: &[T],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Raw => Ok(serde_json::to_string(rows)?),
        OutputFormat::Table if rows.is_empty() => Ok(String::from("(no rows)")),
        OutputFormat::Table => {
            let cells = rows.iter().map(TableRow::cells).collect::<Vec<_>>();
            Ok(table::render_table(T::HEADERS, &cells, table_options()))
        }
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print rows in the requested format.
pub fn output_rows<T: Serialize + TableRow>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render_rows(rows, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_key_value<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let rows = match serde_json::to_value(value)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| vec![key, value_to_cell(&value)])
            .collect::<Vec<_>>(),
        scalar => vec![vec![String::from("value"), value_to_cell(&scalar)]],
    };
    Ok(table::render_table(&["key", "value"], &rows, table_options()))
}

/// Flatten a JSON value into one table cell.
pub fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => String::from(if *v { "yes" } else { "no" }),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::{TableRow, render, render_rows, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    impl TableRow for Example {
        const HEADERS: &'static [&'static str] = &["id", "value"];

        fn cells(&self) -> Vec<String> {
            vec![self.id.to_string(), self.value.to_string()]
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("key")));
        assert!(out.lines().any(|line| line.starts_with("value") && line.ends_with('7')));
    }

    #[test]
    fn rows_render_in_header_order() {
        let rows = [Example { id: "a", value: 1 }, Example { id: "b", value: 22 }];
        let out = render_rows(&rows, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id  value");
        assert_eq!(lines[3], "b   22");
    }

    #[test]
    fn empty_rows_in_json_are_an_empty_array() {
        let rows: [Example; 0] = [];
        assert_eq!(render_rows(&rows, OutputFormat::Raw).unwrap(), "[]");
        assert_eq!(render_rows(&rows, OutputFormat::Table).unwrap(), "(no rows)");
    }

    #[test]
    fn cells_flatten_json() {
        assert_eq!(value_to_cell(&json!(null)), "-");
        assert_eq!(value_to_cell(&json!(true)), "yes");
        assert_eq!(value_to_cell(&json!("x")), "x");
        assert_eq!(value_to_cell(&json!([1, 2])), "[1,2]");
    }
}
