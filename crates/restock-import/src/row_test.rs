use std::io::Write;

use super::*;

fn raw(sku: &str, item_type: &str) -> RawRow {
    RawRow {
        sku: Some(sku.to_string()),
        item_type: Some(item_type.to_string()),
        ..RawRow::default()
    }
}

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn parse_money_strips_symbols_and_separators() {
    let price = parse_money("$1,299.00").unwrap().unwrap();
    assert_eq!(price, Decimal::from(1299));
}

#[test]
fn parse_money_without_digits_is_absent() {
    assert_eq!(parse_money("").unwrap(), None);
    assert_eq!(parse_money("Call").unwrap(), None);
}

#[test]
fn parse_money_rejects_multiple_decimal_points() {
    let err = parse_money("1.2.3").unwrap_err();
    assert!(matches!(err, RowError::InvalidPrice(ref v) if v == "1.2.3"));
}

#[test]
fn normalize_trims_and_blanks_become_absent() {
    let row = normalize_row(RawRow {
        model_number: Some("  WTW5000DW ".to_string()),
        notes: Some("   ".to_string()),
        ..raw(" W-250819-001 ", "Washer")
    })
    .unwrap();

    assert_eq!(row.sku, "W-250819-001");
    assert_eq!(row.model_number.as_deref(), Some("WTW5000DW"));
    assert_eq!(row.notes, None);
    assert_eq!(row.price, None);
}

#[test]
fn normalize_defaults_status_to_draft() {
    let row = normalize_row(raw("W-1", "Washer")).unwrap();
    assert_eq!(row.status, "Draft");
}

#[test]
fn normalize_canonicalizes_enum_spelling() {
    let row = normalize_row(RawRow {
        configuration: Some("front load".to_string()),
        unit_type: Some("SET".to_string()),
        fuel: Some("gas".to_string()),
        condition: Some("refurbished".to_string()),
        status: Some("published".to_string()),
        ..raw("D-1", "dryer")
    })
    .unwrap();

    assert_eq!(row.item_type, "Dryer");
    assert_eq!(row.configuration, Some("Front Load"));
    assert_eq!(row.unit_type, Some("Set"));
    assert_eq!(row.fuel, Some("Gas"));
    assert_eq!(row.condition, Some("Refurbished"));
    assert_eq!(row.status, "Published");
}

#[test]
fn normalize_rejects_unknown_type() {
    let err = normalize_row(raw("B-1", "Blender")).unwrap_err();
    assert!(
        matches!(
            err,
            RowError::Invalid(restock_core::CoreError::InvalidValue { field: Field::Type, .. })
        ),
        "got: {err:?}"
    );
}

#[test]
fn normalize_rejects_configuration_for_wrong_type() {
    let err = normalize_row(RawRow {
        configuration: Some("Top Load".to_string()),
        ..raw("S-1", "Stove")
    })
    .unwrap_err();
    assert!(err.to_string().contains("configuration"), "got: {err}");
}

#[test]
fn normalize_requires_sku_and_type() {
    assert!(matches!(
        normalize_row(raw("", "Washer")),
        Err(RowError::MissingField("sku"))
    ));
    assert!(matches!(
        normalize_row(raw("W-1", "  ")),
        Err(RowError::MissingField("type"))
    ));
}

#[test]
fn payload_uses_table_column_names() {
    let row = normalize_row(RawRow {
        price: Some("$1,299.00".to_string()),
        ..raw("W-1", "Washer")
    })
    .unwrap();
    let payload = row.payload(None);

    assert_eq!(payload["sku"], "W-1");
    assert_eq!(payload["type"], "Washer");
    assert_eq!(payload["status"], "Draft");
    assert_eq!(payload["price"].as_f64(), Some(1299.0));
    assert!(payload["brand_id"].is_null());
    assert!(payload["notes"].is_null());
}

#[test]
fn read_rows_maps_headers_and_ignores_unknown_columns() {
    let file = write_csv(
        "SKU,Category,brand,model_number,condition,price,status,notes,warehouse_bin\n\
         W-250819-001,Washer,Whirlpool,WTW5000DW,Refurbished,399,Published,\"minor scratch\",A4\n",
    );

    let rows = read_rows(file.path()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].line, 2);

    let raw = rows[0].raw.as_ref().unwrap();
    assert_eq!(raw.sku.as_deref(), Some("W-250819-001"));
    assert_eq!(raw.type_value().as_deref(), Some("Washer"));
    assert_eq!(raw.notes.as_deref(), Some("minor scratch"));
}

#[test]
fn read_rows_accepts_both_type_and_category_columns() {
    let file = write_csv(
        "sku,category,type\n\
         W-1,Washer,Washer\n\
         D-1,Dryer,\n\
         S-1,,Stove\n",
    );

    let rows = read_rows(file.path()).unwrap();
    let types: Vec<Option<String>> = rows
        .iter()
        .map(|r| r.raw.as_ref().expect("record should parse").type_value())
        .collect();
    assert_eq!(
        types,
        vec![
            Some("Washer".to_string()),
            Some("Dryer".to_string()),
            Some("Stove".to_string()),
        ]
    );
}

#[test]
fn normalize_prefers_type_over_category() {
    let row = normalize_row(RawRow {
        category: Some("Dryer".to_string()),
        ..raw("W-1", "Washer")
    })
    .unwrap();
    assert_eq!(row.item_type, "Washer");

    let row = normalize_row(RawRow {
        item_type: None,
        category: Some("range".to_string()),
        ..raw("R-1", "")
    })
    .unwrap();
    assert_eq!(row.item_type, "Range");
}

#[test]
fn read_rows_quarantines_ragged_records() {
    let file = write_csv(
        "sku,type,price\n\
         W-1,Washer,100\n\
         W-2,Washer\n\
         W-3,Dryer,200\n",
    );

    let rows = read_rows(file.path()).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].raw.is_ok());
    assert!(rows[1].raw.is_err(), "short record should be quarantined");
    assert!(rows[2].raw.is_ok());
    assert_eq!(rows[2].sku_hint().as_deref(), Some("W-3"));
}

#[test]
fn read_rows_requires_key_and_type_columns() {
    let file = write_csv("title,price\nWasher,100\n");
    assert!(matches!(
        read_rows(file.path()),
        Err(ImportError::MissingColumn(ref c)) if c == "sku"
    ));

    let file = write_csv("sku,price\nW-1,100\n");
    assert!(matches!(
        read_rows(file.path()),
        Err(ImportError::MissingColumn(ref c)) if c == "type"
    ));
}
