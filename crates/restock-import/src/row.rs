//! Reading inventory CSV rows and normalizing them into typed item rows.
//!
//! Parsing happens in two stages. [`read_rows`] deserializes each record into
//! a [`RawRow`] (every column optional); records that are structurally broken
//! are kept as errors so the importer can skip them with a line number.
//! [`normalize_row`] then trims, parses money, and validates enumerated
//! columns against the allowed-value table in `restock_core`.

use std::path::Path;
use std::str::FromStr;

use restock_core::{canonicalize, Field, DEFAULT_STATUS};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::{ImportError, RowError};

/// One CSV record before validation. Unknown columns are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRow {
    pub sku: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    /// Older header spelling of `type`; sheets may carry both.
    pub category: Option<String>,
    pub configuration: Option<String>,
    pub unit_type: Option<String>,
    pub fuel: Option<String>,
    pub brand: Option<String>,
    pub model_number: Option<String>,
    pub condition: Option<String>,
    pub price: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl RawRow {
    /// Trimmed appliance type: the `type` column when filled, else `category`.
    #[must_use]
    pub fn type_value(&self) -> Option<String> {
        clean(self.item_type.as_deref()).or_else(|| clean(self.category.as_deref()))
    }
}

/// A CSV record with its 1-based line number. `raw` is `Err` when the record
/// could not be read (ragged row, bad UTF-8, duplicate columns).
#[derive(Debug)]
pub struct SourceRow {
    pub line: u64,
    pub raw: Result<RawRow, String>,
}

impl SourceRow {
    /// Trimmed SKU, if the record parsed and carried one.
    #[must_use]
    pub fn sku_hint(&self) -> Option<String> {
        self.raw
            .as_ref()
            .ok()
            .and_then(|r| clean(r.sku.as_deref()))
    }
}

/// A validated row, ready to be written to the items table.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub sku: String,
    pub item_type: &'static str,
    pub configuration: Option<&'static str>,
    pub unit_type: Option<&'static str>,
    pub fuel: Option<&'static str>,
    pub brand: Option<String>,
    pub model_number: Option<String>,
    pub condition: Option<&'static str>,
    /// `None` means "Call for Price".
    pub price: Option<Decimal>,
    pub status: &'static str,
    pub notes: Option<String>,
}

impl ItemRow {
    /// JSON body for the items upsert. Absent fields are sent as `null` so a
    /// re-import clears values removed from the sheet.
    #[must_use]
    pub fn payload(&self, brand_id: Option<Uuid>) -> serde_json::Value {
        json!({
            "sku": self.sku,
            "brand_id": brand_id,
            "model_number": self.model_number,
            "type": self.item_type,
            "configuration": self.configuration,
            "unit_type": self.unit_type,
            "fuel": self.fuel,
            "condition": self.condition,
            "price": self.price.and_then(|p| p.to_f64()),
            "status": self.status,
            "notes": self.notes,
        })
    }
}

/// Reads every record of the CSV at `path`.
///
/// # Errors
///
/// Returns [`ImportError::Csv`] if the file cannot be opened or its header
/// row cannot be read, and [`ImportError::MissingColumn`] if the header has
/// no `sku` column or no `type`/`category` column.
pub fn read_rows(path: &Path) -> Result<Vec<SourceRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    // Column names match case-insensitively.
    let headers = csv::StringRecord::from(
        reader
            .headers()?
            .iter()
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>(),
    );
    validate_headers(&headers)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Header is line 1. Multi-line quoted fields make this drift, so
        // prefer the reader's own position when it has one.
        let fallback = idx as u64 + 2;
        let row = match result {
            Ok(record) => SourceRow {
                line: record.position().map_or(fallback, csv::Position::line),
                raw: record
                    .deserialize::<RawRow>(Some(&headers))
                    .map_err(|e| e.to_string()),
            },
            Err(e) => SourceRow {
                line: fallback,
                raw: Err(e.to_string()),
            },
        };
        rows.push(row);
    }

    Ok(rows)
}

fn validate_headers(headers: &csv::StringRecord) -> Result<(), ImportError> {
    let has = |name: &str| headers.iter().any(|h| h == name);
    if !has("sku") {
        return Err(ImportError::MissingColumn("sku".to_string()));
    }
    if !has("type") && !has("category") {
        return Err(ImportError::MissingColumn("type".to_string()));
    }
    Ok(())
}

/// Trims a field; blank becomes `None`.
fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parses a money-like field by dropping everything except digits and `.`.
///
/// `"$1,299.00"` → `1299.00`; a value with no digits left (blank, `"Call"`)
/// is `None`.
///
/// # Errors
///
/// Returns [`RowError::InvalidPrice`] if what remains is not a number, e.g.
/// `"1.2.3"`.
pub fn parse_money(raw: &str) -> Result<Option<Decimal>, RowError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    Decimal::from_str(&cleaned)
        .map(Some)
        .map_err(|_| RowError::InvalidPrice(raw.to_string()))
}

/// Validates and normalizes one CSV record.
///
/// # Errors
///
/// - [`RowError::MissingField`] if `sku` or `type` is blank.
/// - [`RowError::Invalid`] if an enumerated column holds a value outside its
///   allowed set.
/// - [`RowError::InvalidPrice`] if `price` is present but unparsable.
pub fn normalize_row(raw: RawRow) -> Result<ItemRow, RowError> {
    let sku = clean(raw.sku.as_deref()).ok_or(RowError::MissingField("sku"))?;
    let raw_type = raw.type_value().ok_or(RowError::MissingField("type"))?;
    let item_type = canonicalize(Field::Type, &raw_type, None)?;

    let enumerated =
        |field: Field, value: Option<&str>| -> Result<Option<&'static str>, RowError> {
            clean(value)
                .map(|v| canonicalize(field, &v, Some(item_type)))
                .transpose()
                .map_err(RowError::from)
        };

    let configuration = enumerated(Field::Configuration, raw.configuration.as_deref())?;
    let unit_type = enumerated(Field::UnitType, raw.unit_type.as_deref())?;
    let fuel = enumerated(Field::Fuel, raw.fuel.as_deref())?;
    let condition = enumerated(Field::Condition, raw.condition.as_deref())?;
    let status = enumerated(Field::Status, raw.status.as_deref())?.unwrap_or(DEFAULT_STATUS);

    let price = match clean(raw.price.as_deref()) {
        Some(p) => parse_money(&p)?,
        None => None,
    };

    Ok(ItemRow {
        sku,
        item_type,
        configuration,
        unit_type,
        fuel,
        brand: clean(raw.brand.as_deref()),
        model_number: clean(raw.model_number.as_deref()),
        condition,
        price,
        status,
        notes: clean(raw.notes.as_deref()),
    })
}

#[cfg(test)]
#[path = "row_test.rs"]
mod tests;
