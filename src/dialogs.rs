// src/dialogs.rs
//! Blocking user interaction: confirmations before destructive actions and acknowledgements

use std::io::{self, BufRead, Write};

pub trait Dialogs {
    /// Ask a yes/no question. Anything but an explicit yes counts as no.
    fn confirm(&mut self, message: &str) -> bool;

    fn alert(&mut self, message: &str);
}

/// Prompts on stdout and reads the answer from stdin
pub struct ConsoleDialogs {
    assume_yes: bool,
}

impl ConsoleDialogs {
    pub fn new() -> Self {
        Self { assume_yes: false }
    }

    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }
}

impl Default for ConsoleDialogs {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialogs for ConsoleDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            app_log!(debug, "Auto-confirmed: {}", message);
            return true;
        }

        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                app_log!(warn, "Failed to read confirmation answer: {}", e);
                false
            }
        }
    }

    fn alert(&mut self, message: &str) {
        println!("{}", message);
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
