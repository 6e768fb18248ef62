//! `restock import`: runs the importer against the live store and prints a
//! summary.

use std::path::Path;

use restock_core::AppConfig;
use restock_import::{ImportOptions, Importer, RowStatus};
use restock_store::SupabaseStore;

/// Fails fast on paths that cannot work, before any config or network setup.
pub(crate) fn check_inputs(csv: &Path, photos_root: &Path) -> anyhow::Result<()> {
    if !csv.is_file() {
        anyhow::bail!("CSV not found: {}", csv.display());
    }
    if !photos_root.is_dir() {
        anyhow::bail!("photo root is not a directory: {}", photos_root.display());
    }
    Ok(())
}

/// Imports every row, then prints totals and one line per skipped row.
///
/// Row failures do not make this return an error; only an unreadable CSV or
/// a missing required column does.
pub(crate) async fn run_import(
    store: &SupabaseStore,
    config: &AppConfig,
    csv: &Path,
    photos_root: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let options = ImportOptions::from_config(config, dry_run);
    let report = Importer::new(store, options)
        .run(csv, photos_root)
        .await
        .map_err(|e| anyhow::anyhow!("import of {} failed: {e}", csv.display()))?;

    for row in &report.rows {
        if let RowStatus::Skipped { reason } = &row.status {
            println!(
                "  line {} ({}): skipped: {reason}",
                row.line,
                row.sku.as_deref().unwrap_or("no sku")
            );
        }
    }

    if dry_run {
        println!("dry-run: {report}");
    } else {
        println!("{report}");
    }
    Ok(())
}
