//! Rendering record lists as JSON, a markdown table or CSV.

use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The output format for list commands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// A JSON array of objects.
    Json,
    /// A markdown table.
    #[default]
    Table,
    /// CSV with a header row.
    Csv,
}

serde_plain::derive_display_from_serialize!(Format);
serde_plain::derive_fromstr_from_deserialize!(Format);

/// Rows in the requested output format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rows {
    /// JSON array of objects where each row is a self-describing object with field names as keys.
    Json(serde_json::Value),
    /// Markdown table as a single formatted string.
    Table(String),
    /// CSV data as a properly escaped string.
    Csv(String),
}

impl Rows {
    /// Renders `rows` in `format`. Fields appear in declaration order, and every field must be a
    /// scalar for the table and CSV formats.
    pub fn new<T>(rows: &[T], format: Format) -> Result<Self>
    where
        T: Serialize,
    {
        Ok(match format {
            Format::Json => {
                Rows::Json(serde_json::to_value(rows).context("Unable to serialize rows")?)
            }
            Format::Csv => Rows::Csv(to_csv(rows)?),
            Format::Table => Rows::Table(csv_to_markdown(&to_csv(rows)?)?),
        })
    }
}

fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).context("Unable to write a CSV row")?;
    }
    let bytes = writer.into_inner().context("Unable to finish CSV output")?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

fn csv_to_markdown(csv: &str) -> Result<String> {
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers = reader.headers().context("Unable to read CSV headers")?.clone();
    if headers.is_empty() {
        return Ok(String::new());
    }
    let mut out = String::new();
    push_row(&mut out, headers.iter());
    push_row(&mut out, headers.iter().map(|_| "---"));
    for record in reader.records() {
        let record = record.context("Unable to read a CSV row")?;
        push_row(&mut out, record.iter());
    }
    Ok(out)
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&cell.replace('|', "\\|"));
        out.push_str(" |");
    }
    out.push('\n');
}

impl Debug for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => write!(f, "Rows::Json({:?})", v),
            Rows::Table(s) => write!(f, "Rows::Table({} chars)", s.len()),
            Rows::Csv(s) => write!(f, "Rows::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Rows::Table(s) => write!(f, "{}", s),
            Rows::Csv(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed;

    #[test]
    fn test_table_keeps_field_order() {
        let rows = Rows::new(&seed::invoices()[..1], Format::Table).unwrap();
        let expected = "\
| id | number | client | amount | issueDate | dueDate | status |
| --- | --- | --- | --- | --- | --- | --- |
| 1 | INV-001 | ABC Corporation | $2,500.00 | 2024-01-15 | 2024-02-15 | paid |
";
        assert_eq!(rows.to_string(), expected);
    }

    #[test]
    fn test_csv_escapes_commas() {
        let rows = Rows::new(&seed::clients()[..1], Format::Csv).unwrap();
        let text = rows.to_string();
        assert!(text.starts_with("id,name,email,phone,address,company,status"));
        assert!(text.contains("\"123 Business St, New York, NY 10001\""));
        assert!(text.contains("\"$45,000.00\""));
    }

    #[test]
    fn test_table_escapes_pipes() {
        #[derive(Serialize)]
        struct Row {
            text: &'static str,
        }
        let rows = Rows::new(&[Row { text: "a|b" }], Format::Table).unwrap();
        assert_eq!(rows.to_string(), "| text |\n| --- |\n| a\\|b |\n");
    }

    #[test]
    fn test_json_array() {
        let rows = Rows::new(&seed::expenses(), Format::Json).unwrap();
        match rows {
            Rows::Json(serde_json::Value::Array(items)) => {
                assert_eq!(items.len(), 5);
                assert_eq!(items[2]["hasReceipt"], false);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_empty_table() {
        let rows: Vec<crate::model::Invoice> = Vec::new();
        assert_eq!(Rows::new(&rows, Format::Table).unwrap().to_string(), "");
    }
}
