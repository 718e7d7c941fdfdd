//! User-facing notifications: success and error toasts plus yes/no prompts.

use std::io::{self, BufRead, Write};

/// Where commands report outcomes to the user.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    /// Asks a yes/no question; anything but an explicit yes is a no.
    fn confirm(&self, message: &str) -> bool;
}

/// Prints to the terminal and reads confirmations from stdin.
pub struct ConsoleNotifier {
    assume_yes: bool,
}

impl ConsoleNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("✓ {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [s/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        read_confirmation(io::stdin().lock())
    }
}

/// Reads one answer line. Accepts s/si/sí/y/yes in any case.
pub fn read_confirmation(mut input: impl BufRead) -> bool {
    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        return false;
    }
    matches!(
        line.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_confirmation_accepts_yes_answers() {
        for answer in ["s\n", "Si\n", "SÍ\n", "y\n", "yes\n"] {
            assert!(read_confirmation(answer.as_bytes()), "{:?}", answer);
        }
    }

    #[test]
    fn test_read_confirmation_defaults_to_no() {
        for answer in ["\n", "n\n", "no\n", "quizás\n", ""] {
            assert!(!read_confirmation(answer.as_bytes()), "{:?}", answer);
        }
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let notifier = ConsoleNotifier::new(true);
        assert!(notifier.confirm("¿Continuar?"));
    }
}
