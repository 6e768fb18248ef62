//! Inventory vocabulary: target tables, enumerated fields, and their allowed
//! values.
//!
//! Every enumerated column is validated through the single `ALLOWED` table
//! so importer and storefront agree on spelling. Matching is ASCII
//! case-insensitive; the canonical spelling from the table is what gets
//! stored.

use rust_decimal::Decimal;

use crate::CoreError;

/// Status assigned to rows that leave the column blank.
pub const DEFAULT_STATUS: &str = "Draft";

/// Table and key names for one generation of the backend schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub items: &'static str,
    pub item_key: &'static str,
    pub brands: &'static str,
    pub brand_key: &'static str,
    pub photos: &'static str,
}

/// The normalized schema read by the storefront (`items_new` with brands
/// split into `brands_new`).
pub const NORMALIZED_SCHEMA: Schema = Schema {
    items: "items_new",
    item_key: "sku",
    brands: "brands_new",
    brand_key: "name",
    photos: "item_photos_new",
};

/// An enumerated item column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Type,
    Configuration,
    UnitType,
    Fuel,
    Condition,
    Status,
}

impl Field {
    /// Column name in the items table (and in the CSV header).
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Configuration => "configuration",
            Field::UnitType => "unit_type",
            Field::Fuel => "fuel",
            Field::Condition => "condition",
            Field::Status => "status",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

enum AllowedValues {
    Fixed(&'static [&'static str]),
    /// Allowed set depends on the row's appliance type.
    ByType(&'static [(&'static str, &'static [&'static str])]),
}

const LAUNDRY_CONFIGURATIONS: &[&str] = &["Front Load", "Top Load", "Stacked Unit"];
const COOKING_CONFIGURATIONS: &[&str] = &["Freestanding", "Slide-In", "Drop-In"];

const ALLOWED: &[(Field, AllowedValues)] = &[
    (
        Field::Type,
        AllowedValues::Fixed(&["Washer", "Dryer", "Stove", "Range"]),
    ),
    (
        Field::Configuration,
        AllowedValues::ByType(&[
            ("Washer", LAUNDRY_CONFIGURATIONS),
            ("Dryer", LAUNDRY_CONFIGURATIONS),
            ("Stove", COOKING_CONFIGURATIONS),
            ("Range", COOKING_CONFIGURATIONS),
        ]),
    ),
    (
        Field::UnitType,
        AllowedValues::Fixed(&["Individual", "Set"]),
    ),
    (Field::Fuel, AllowedValues::Fixed(&["Electric", "Gas"])),
    (
        Field::Condition,
        AllowedValues::Fixed(&["New", "Like New", "Refurbished", "Used", "For Parts"]),
    ),
    (
        Field::Status,
        AllowedValues::Fixed(&["Draft", "Published", "Archived"]),
    ),
];

/// Returns the allowed values for `field`.
///
/// For type-dependent fields `item_type` selects the set; an absent or
/// unrecognized type yields the union across all types.
#[must_use]
pub fn allowed_values(field: Field, item_type: Option<&str>) -> Vec<&'static str> {
    let Some((_, allowed)) = ALLOWED.iter().find(|(f, _)| *f == field) else {
        return Vec::new();
    };

    match allowed {
        AllowedValues::Fixed(values) => values.to_vec(),
        AllowedValues::ByType(by_type) => {
            let matched = item_type.and_then(|t| {
                by_type
                    .iter()
                    .find(|(ty, _)| ty.eq_ignore_ascii_case(t))
                    .map(|(_, values)| values.to_vec())
            });
            matched.unwrap_or_else(|| {
                let mut union: Vec<&'static str> = Vec::new();
                for value in by_type.iter().flat_map(|(_, values)| values.iter().copied()) {
                    if !union.contains(&value) {
                        union.push(value);
                    }
                }
                union
            })
        }
    }
}

/// Validates `value` for `field` and returns its canonical spelling.
///
/// # Errors
///
/// Returns [`CoreError::InvalidValue`] when `value` is not in the allowed set.
pub fn canonicalize(
    field: Field,
    value: &str,
    item_type: Option<&str>,
) -> Result<&'static str, CoreError> {
    let allowed = allowed_values(field, item_type);
    allowed
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(value))
        .ok_or_else(|| CoreError::InvalidValue {
            field,
            value: value.to_string(),
            allowed,
        })
}

/// Human-facing price: `$1299`, `$399.50`, or `Call for Price` when unpriced.
#[must_use]
pub fn price_label(price: Option<Decimal>) -> String {
    match price.map(|p| p.normalize()) {
        Some(p) if p.scale() == 0 => format!("${p}"),
        Some(p) => format!("${p:.2}"),
        None => "Call for Price".to_string(),
    }
}
