//! JSON and CSV rendering of data that is already on screen.
//!
//! Sections are kept as `serde_json::Value` so the JSON document carries them
//! verbatim and the CSV writer sees the same column order as the wire
//! (struct field order, via `preserve_order`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use common::ParseEnumError;
use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::date_range::DateRange;
use crate::error::ExportError;
use crate::filter::TransactionFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Json, ExportFormat::Csv];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv;charset=utf-8",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Csv => "CSV",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(ParseEnumError {
                kind: "export format",
                value: s.to_string(),
            }),
        }
    }
}

/// `<prefix>-<YYYY-MM-DD>.<ext>`
pub fn file_name(prefix: &str, format: ExportFormat, date: NaiveDate) -> String {
    format!("{}-{}.{}", prefix, date.format("%Y-%m-%d"), format.extension())
}

/// The `meta` object of a JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMeta {
    pub exported_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
}

impl ExportMeta {
    pub fn new(exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at,
            date_range: None,
            filters: BTreeMap::new(),
        }
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Snapshot of the filters that were active, keyed by wire name.
    pub fn with_filters(mut self, filter: &TransactionFilter) -> Self {
        self.filters = filter
            .active()
            .into_iter()
            .map(|(key, value)| (key.param_name().to_string(), value))
            .collect();
        self
    }
}

/// One named block of the export. `value` is an array of records or a single
/// record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSection {
    pub name: String,
    pub title: String,
    pub value: Value,
}

impl ExportSection {
    pub fn new<T: Serialize>(
        name: impl Into<String>,
        title: impl Into<String>,
        rows: &[T],
    ) -> Result<Self, ExportError> {
        Ok(Self {
            name: name.into(),
            title: title.into(),
            value: serde_json::to_value(rows)?,
        })
    }

    pub fn single<T: Serialize>(
        name: impl Into<String>,
        title: impl Into<String>,
        record: &T,
    ) -> Result<Self, ExportError> {
        Ok(Self {
            name: name.into(),
            title: title.into(),
            value: serde_json::to_value(record)?,
        })
    }

    fn rows(&self) -> Vec<&Value> {
        match &self.value {
            Value::Array(items) => items.iter().collect(),
            Value::Null => Vec::new(),
            other => vec![other],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportDataset {
    pub sections: Vec<ExportSection>,
}

impl ExportDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: ExportSection) -> Self {
        self.sections.push(section);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Pretty-printed `{"meta": .., "<section>": ..}`.
pub fn to_json(dataset: &ExportDataset, meta: &ExportMeta) -> Result<String, ExportError> {
    let mut doc = Map::new();
    doc.insert("meta".to_string(), serde_json::to_value(meta)?);
    for section in &dataset.sections {
        doc.insert(section.name.clone(), section.value.clone());
    }
    Ok(serde_json::to_string_pretty(&Value::Object(doc))?)
}

/// Header from the keys of each section's first record, one line per record,
/// `\n` line endings. With more than one section every table is preceded by
/// its title and tables are separated by a blank line.
pub fn to_csv(dataset: &ExportDataset) -> Result<String, ExportError> {
    let titled = dataset.sections.len() > 1;
    let tables = dataset
        .sections
        .iter()
        .map(|section| section_to_csv(section, titled))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tables.join("\n"))
}

pub fn render(
    format: ExportFormat,
    dataset: &ExportDataset,
    meta: &ExportMeta,
) -> Result<String, ExportError> {
    let output = match format {
        ExportFormat::Json => to_json(dataset, meta)?,
        ExportFormat::Csv => to_csv(dataset)?,
    };
    debug!(
        "Rendered {} export with {} sections ({} bytes)",
        format,
        dataset.sections.len(),
        output.len()
    );
    Ok(output)
}

fn section_to_csv(section: &ExportSection, titled: bool) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if titled {
        writer.write_record([section.title.as_str()])?;
    }

    let rows = section.rows();
    let mut columns: Vec<&str> = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let Value::Object(record) = row else {
            return Err(ExportError::Row {
                section: section.name.clone(),
                row: index,
            });
        };
        if index == 0 {
            columns = record.keys().map(String::as_str).collect();
            writer.write_record(&columns)?;
        }
        writer.write_record(columns.iter().map(|column| cell(record.get(*column))))?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}

/// Dropdown next to the export button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportMenu {
    #[default]
    Idle,
    MenuOpen,
}

impl ExportMenu {
    pub fn is_open(&self) -> bool {
        matches!(self, ExportMenu::MenuOpen)
    }

    pub fn open(&mut self) {
        *self = ExportMenu::MenuOpen;
    }

    pub fn toggle(&mut self) {
        *self = match self {
            ExportMenu::Idle => ExportMenu::MenuOpen,
            ExportMenu::MenuOpen => ExportMenu::Idle,
        };
    }

    /// Returns the format to export, or `None` if the menu was not open.
    pub fn pick(&mut self, format: ExportFormat) -> Option<ExportFormat> {
        match self {
            ExportMenu::MenuOpen => {
                *self = ExportMenu::Idle;
                Some(format)
            }
            ExportMenu::Idle => None,
        }
    }

    pub fn click_outside(&mut self) {
        *self = ExportMenu::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use common::{DailyStat, PaymentMethod, PaymentMethodStat, TxnStatus};
    use csv::ReaderBuilder;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::filter::FilterChange;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meta() -> ExportMeta {
        ExportMeta::new(Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap())
    }

    #[derive(Serialize)]
    struct Note {
        id: u32,
        text: String,
    }

    #[test]
    fn test_csv_escaping_survives_round_trip() {
        let tricky = "Refund, \"duplicate\"\nsecond line".to_string();
        let rows = vec![
            Note { id: 1, text: tricky.clone() },
            Note { id: 2, text: "plain".to_string() },
        ];
        let dataset =
            ExportDataset::new().with_section(ExportSection::new("notes", "Notes", &rows).unwrap());

        let csv_text = to_csv(&dataset).unwrap();
        assert!(csv_text.contains("\"Refund, \"\"duplicate\"\"\nsecond line\""));

        let mut reader = ReaderBuilder::new().from_reader(csv_text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["id", "text"]);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][1], tricky.as_str());
        assert_eq!(&records[1][1], "plain");
    }

    #[test]
    fn test_csv_single_section_has_no_title() {
        let stats = vec![PaymentMethodStat {
            payment_method: PaymentMethod::NetBanking,
            count: 12,
        }];
        let dataset = ExportDataset::new()
            .with_section(ExportSection::new("paymentMethods", "Payment Methods", &stats).unwrap());

        assert_eq!(to_csv(&dataset).unwrap(), "paymentMethod,count\nNET_BANKING,12\n");
    }

    #[test]
    fn test_csv_sections_are_titled_and_separated() {
        let daily = vec![DailyStat {
            date: date(2024, 5, 1),
            txn_count: 3,
            total_amount: Decimal::new(4500, 0),
            success_count: 2,
            pending_count: 0,
            failed_count: 1,
        }];
        let methods = vec![PaymentMethodStat {
            payment_method: PaymentMethod::Upi,
            count: 3,
        }];
        let dataset = ExportDataset::new()
            .with_section(ExportSection::new("daily", "Daily Trends", &daily).unwrap())
            .with_section(ExportSection::new("paymentMethods", "Payment Methods", &methods).unwrap());

        let csv_text = to_csv(&dataset).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();
        assert_eq!(lines[0], "Daily Trends");
        assert_eq!(
            lines[1],
            "date,txnCount,totalAmount,successCount,pendingCount,failedCount"
        );
        assert!(lines[2].starts_with("2024-05-01,3,"));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Payment Methods");
        assert_eq!(lines[5], "paymentMethod,count");
        assert_eq!(lines[6], "UPI,3");
    }

    #[test]
    fn test_csv_null_and_missing_values_are_empty() {
        let section = ExportSection {
            name: "rows".to_string(),
            title: "Rows".to_string(),
            value: json!([
                {"a": 1, "b": null, "c": "x"},
                {"a": 2, "c": [1, 2]}
            ]),
        };
        let csv_text = to_csv(&ExportDataset::new().with_section(section)).unwrap();
        assert_eq!(csv_text, "a,b,c\n1,,x\n2,,\"[1,2]\"\n");
    }

    #[test]
    fn test_csv_rejects_non_object_rows() {
        let section = ExportSection {
            name: "numbers".to_string(),
            title: "Numbers".to_string(),
            value: json!([1, 2]),
        };
        let err = to_csv(&ExportDataset::new().with_section(section)).unwrap_err();
        assert!(matches!(err, ExportError::Row { row: 0, .. }));
    }

    #[test]
    fn test_json_document_has_meta_and_sections() {
        let mut filter = TransactionFilter::default();
        filter.apply(FilterChange::Status(Some(TxnStatus::Failed)));
        let meta = meta()
            .with_range(DateRange::new(date(2024, 4, 25), date(2024, 5, 2)))
            .with_filters(&filter);
        let stats = json!({"totalGtv": 1000.0, "totalTxns": 4});
        let dataset = ExportDataset::new()
            .with_section(ExportSection::single("stats", "Summary", &stats).unwrap());

        let doc: Value = serde_json::from_str(&to_json(&dataset, &meta).unwrap()).unwrap();
        assert_eq!(doc["meta"]["exportedAt"], "2024-05-02T09:30:00Z");
        assert_eq!(doc["meta"]["dateRange"]["start"], "2024-04-25");
        assert_eq!(doc["meta"]["dateRange"]["end"], "2024-05-02");
        assert_eq!(doc["meta"]["filters"]["status"], "FAILED");
        assert_eq!(doc["stats"], stats);
    }

    #[test]
    fn test_json_meta_omits_absent_context() {
        let output = to_json(&ExportDataset::new(), &meta()).unwrap();
        let doc: Value = serde_json::from_str(&output).unwrap();
        assert!(doc["meta"].get("dateRange").is_none());
        assert!(doc["meta"].get("filters").is_none());
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_parsing_and_file_name() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!(" csv ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(
            file_name("analytics", ExportFormat::Csv, date(2024, 5, 2)),
            "analytics-2024-05-02.csv"
        );
    }

    #[test]
    fn test_export_menu_transitions() {
        let mut menu = ExportMenu::default();
        assert_eq!(menu.pick(ExportFormat::Json), None);

        menu.open();
        assert!(menu.is_open());
        assert_eq!(menu.pick(ExportFormat::Csv), Some(ExportFormat::Csv));
        assert_eq!(menu, ExportMenu::Idle);

        menu.toggle();
        menu.click_outside();
        assert!(!menu.is_open());
    }
}
