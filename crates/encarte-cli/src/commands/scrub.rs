use anyhow::Result;
use encarte_config::Config;
use encarte_security::HistoryScrubber;
use encarte_security::history::FILTER_REPO_BIN;
use std::path::{Path, PathBuf};

pub fn handle(
    config: &Config,
    repo: PathBuf,
    force: bool,
    messages: bool,
    dry_run: bool,
) -> Result<()> {
    let scrubber = HistoryScrubber::new(repo)
        .with_placeholder(config.redaction.placeholder.clone())
        .force(force)
        .include_messages(messages);

    if dry_run {
        let expressions = Path::new("<expressions-file>");
        let args: Vec<String> = scrubber
            .args(expressions)
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        println!("Expressions:");
        print!("{}", scrubber.replace_text_rules()?);
        println!("\nCommand (in {}):", scrubber.repo().display());
        println!("  {} {}", FILTER_REPO_BIN, args.join(" "));
        return Ok(());
    }

    println!("Running {}...", FILTER_REPO_BIN);
    let outcome = scrubber.run()?;
    if !outcome.stdout.trim().is_empty() {
        println!("{}", outcome.stdout.trim_end());
    }

    println!("✓ Repository history rewritten");
    println!("Next steps:");
    println!("  1. Verify that the secrets are gone from every branch");
    println!("  2. Force push to the remote: git push origin --force --all");

    Ok(())
}
