use anyhow::{Context, Result};
use encarte_config::Config;
use encarte_core::DuplicateNameCorrector;
use encarte_sheets::{create_backup, load_dataset, save_dataset};
use std::path::PathBuf;

use super::render_table;

pub fn handle(
    config: &Config,
    file: Option<PathBuf>,
    sheet: Option<String>,
    column: Option<String>,
    dry_run: bool,
    backup: bool,
) -> Result<()> {
    let path = file.unwrap_or_else(|| config.workbook.path.clone());
    let sheet = sheet.or_else(|| config.workbook.sheet.clone());
    let column = column.unwrap_or_else(|| config.workbook.name_column.clone());

    let corrector =
        DuplicateNameCorrector::new(config.dedupe.rules.clone(), config.dedupe.marker.clone());

    let mut dataset = load_dataset(&path, sheet.as_deref())
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let report = corrector.correct(&mut dataset, &column)?;

    for outcome in &report.outcomes {
        if outcome.skipped() {
            println!(
                "  - '{}': {} match(es), nothing to fix",
                outcome.label, outcome.matches
            );
        }
        for rename in &outcome.renames {
            println!("  Row {}: '{}' -> '{}'", rename.row, rename.from, rename.to);
        }
    }

    if dry_run {
        println!("Dry run: {} not modified", path.display());
    } else {
        if backup {
            let backup_path = create_backup(&path)?;
            println!("  Backup: {}", backup_path.display());
        }

        save_dataset(&dataset, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ Updated {}", path.display());
    }

    let affected = corrector.affected_rows(&dataset, &column)?;
    if affected.is_empty() {
        println!("\nNo matching records.");
    } else {
        println!("\nMatching records ({}):", affected.len());
        let rows: Vec<_> = affected
            .iter()
            .map(|&idx| (idx, dataset.records[idx].cells.as_slice()))
            .collect();
        print!("{}", render_table(&dataset.headers, &rows));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use encarte_core::{Dataset, Record};

    fn write_products(path: &std::path::Path) {
        let dataset = Dataset::new(
            "Sheet1",
            vec!["nome".into(), "preco".into()],
            vec![
                Record::new(vec!["Sardinha Pescador".into(), 7.5.into()]),
                Record::new(vec!["Sardinha Pescador".into(), 8.0.into()]),
                Record::new(vec!["Arroz".into(), 20.0.into()]),
            ],
        );
        save_dataset(&dataset, path).unwrap();
    }

    fn names(path: &std::path::Path) -> Vec<String> {
        load_dataset(path, None)
            .unwrap()
            .records
            .iter()
            .map(|r| r.text(0).unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("produtos.xlsx");
        write_products(&path);

        handle(&Config::default(), Some(path.clone()), None, None, false, false).unwrap();

        assert_eq!(
            names(&path),
            vec!["Sardinha Pescador", "Sardinha Pescador-2", "Arroz"]
        );
    }

    #[test]
    fn test_dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("produtos.xlsx");
        write_products(&path);
        let before = std::fs::read(&path).unwrap();

        handle(&Config::default(), Some(path.clone()), None, None, true, false).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_backup_written_next_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("produtos.xlsx");
        write_products(&path);

        handle(&Config::default(), Some(path.clone()), None, None, false, true).unwrap();

        let backups = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".backup."))
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("produtos.xlsx");

        let err = handle(&Config::default(), Some(path), None, None, false, false).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }

    #[test]
    fn test_unknown_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("produtos.xlsx");
        write_products(&path);

        let result = handle(
            &Config::default(),
            Some(path),
            None,
            Some("produto".into()),
            false,
            false,
        );
        assert!(result.is_err());
    }
}
