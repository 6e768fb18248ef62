//! Per-row outcomes and run totals.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    /// Item written. `photos` counts photos that ended with both an object
    /// and a record; `photo_failures` counts the ones that did not.
    Imported { photos: usize, photo_failures: usize },
    /// Dry run: the row validated and would upload `photos` files.
    Planned { photos: usize },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    /// 1-based line in the CSV (the header is line 1).
    pub line: u64,
    pub sku: Option<String>,
    pub status: RowStatus,
}

/// Everything a run did, in CSV order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub rows: Vec<RowOutcome>,
}

impl ImportReport {
    #[must_use]
    pub fn processed(&self) -> usize {
        self.rows.len()
    }

    /// Rows actually written to the store.
    #[must_use]
    pub fn imported(&self) -> usize {
        self.count(|s| matches!(s, RowStatus::Imported { .. }))
    }

    /// Rows that validated on a dry run.
    #[must_use]
    pub fn planned(&self) -> usize {
        self.count(|s| matches!(s, RowStatus::Planned { .. }))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, RowStatus::Skipped { .. }))
    }

    #[must_use]
    pub fn photos(&self) -> usize {
        self.rows
            .iter()
            .map(|r| match r.status {
                RowStatus::Imported { photos, .. } | RowStatus::Planned { photos } => photos,
                RowStatus::Skipped { .. } => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn photo_failures(&self) -> usize {
        self.rows
            .iter()
            .map(|r| match r.status {
                RowStatus::Imported { photo_failures, .. } => photo_failures,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&RowStatus) -> bool) -> usize {
        self.rows.iter().filter(|r| pred(&r.status)).count()
    }

    pub(crate) fn push(&mut self, line: u64, sku: Option<String>, status: RowStatus) {
        self.rows.push(RowOutcome { line, sku, status });
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "processed {} rows: ", self.processed())?;
        // Dry runs write nothing, so their valid rows are "planned".
        if self.planned() > 0 {
            write!(f, "{} planned, ", self.planned())?;
        }
        if self.imported() > 0 || self.planned() == 0 {
            write!(f, "{} imported, ", self.imported())?;
        }
        write!(
            f,
            "{} skipped, {} photos, {} photo failures",
            self.skipped(),
            self.photos(),
            self.photo_failures()
        )
    }
}
