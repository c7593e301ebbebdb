use anyhow::{Context, Result};
use encarte_config::Config;
use encarte_security::Redactor;
use std::io::{Read, Write};
use std::path::PathBuf;

pub fn handle(config: &Config, path: Option<PathBuf>, in_place: bool) -> Result<()> {
    let redactor = Redactor::with_placeholder(config.redaction.placeholder.clone());

    let (source_id, data) = match &path {
        Some(p) => (
            p.display().to_string(),
            std::fs::read(p).with_context(|| format!("Failed to read {}", p.display()))?,
        ),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            ("stdin".to_string(), buf)
        }
    };

    let redacted = redactor.redact_bytes(&source_id, &data);

    if let Some((_, infos)) = &redacted {
        for info in infos {
            eprintln!("  {}: {}", info.redaction_type, info.count);
        }
    }

    match (path, redacted) {
        (Some(p), Some((bytes, infos))) if in_place => {
            let total: usize = infos.iter().map(|i| i.count).sum();
            std::fs::write(&p, bytes)
                .with_context(|| format!("Failed to write {}", p.display()))?;
            println!("✓ Redacted {} secret(s) in {}", total, p.display());
        }
        (Some(p), None) if in_place => {
            println!("No secrets found in {}", p.display());
        }
        (_, redacted) => {
            let bytes = redacted.map(|(bytes, _)| bytes).unwrap_or(data);
            std::io::stdout().write_all(&bytes)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_place_rewrites_secrets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.local");
        std::fs::write(&path, "SUPABASE_URL=https://abcxyz.supabase.co\nPORT=3000\n").unwrap();

        handle(&Config::default(), Some(path.clone()), true).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "SUPABASE_URL=[REDACTED]\nPORT=3000\n"
        );
    }

    #[test]
    fn test_in_place_without_secrets_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# Encarte\n").unwrap();

        handle(&Config::default(), Some(path.clone()), true).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Encarte\n");
    }

    #[test]
    fn test_in_place_handles_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.bin");
        let mut data = b"\xff\xfeurl=".to_vec();
        data.extend_from_slice(b"https://abcxyz.supabase.co\n");
        std::fs::write(&path, &data).unwrap();

        handle(&Config::default(), Some(path.clone()), true).unwrap();

        assert_eq!(
            std::fs::read(&path).unwrap(),
            "\u{FFFD}\u{FFFD}url=[REDACTED]\n".as_bytes()
        );
    }

    #[test]
    fn test_invalid_utf8_without_secrets_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        let data = b"\x89PNG\r\n\x1a\n\xff\x00".to_vec();
        std::fs::write(&path, &data).unwrap();

        handle(&Config::default(), Some(path.clone()), true).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), data);
    }
}
