//! Operator confirmation on the terminal

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use aurora_echo_orchestrations::providers::Confirmer;
use std::io::{self, BufRead, Write};

/// Asks on stdout and reads the answer from stdin. Anything but `y`/`yes` is a no.
pub struct StdinConfirmer;

#[async_trait]
impl Confirmer for StdinConfirmer {
    async fn confirm(&self, message: &str) -> Result<bool> {
        let message = message.to_string();
        tokio::task::spawn_blocking(move || ask(&message))
            .await
            .context("confirmation prompt panicked")?
    }
}

fn ask(message: &str) -> Result<bool> {
    print!("{} [y/N]: ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        bail!("stdin closed before an answer was given");
    }

    Ok(is_yes(&input))
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES \n"));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n\n"));
        assert!(!is_yes("yep\n"));
    }
}
