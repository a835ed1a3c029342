//! Styled terminal output for wordbench
//!
//! Provides consistent message formatting with console styling and symbols.

use crate::bench::{Measurement, StrategySummary};
use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {:<20} {}", style(key).dim(), styled_value);
        }
    }

    /// One line per measurement, like `SerialCPU: 1234 occurrences in 56 ms`
    pub fn measurement(&self, m: &Measurement) {
        if self.quiet {
            return;
        }
        match m.occurrences() {
            Some(occurrences) => println!(
                "{} {}: {} occurrences in {} ms",
                style("❯").cyan(),
                style(&m.strategy).bold(),
                occurrences,
                m.elapsed_millis
            ),
            None => println!(
                "{} {}: {} ({})",
                style("✗").red().bold(),
                style(&m.strategy).bold(),
                style("failed").red(),
                m.failure().map(|k| k.as_str()).unwrap_or("unknown")
            ),
        }
    }

    /// Summary row for one strategy
    pub fn summary(&self, s: &StrategySummary) {
        if self.quiet {
            return;
        }
        let timing = match (s.min_millis, s.mean_millis, s.max_millis) {
            (Some(min), Some(mean), Some(max)) => {
                format!("min {} / mean {:.1} / max {} ms", min, mean, max)
            }
            _ => "no successful runs".to_string(),
        };
        let occurrences = s
            .occurrences
            .map(|o| o.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<14} {:>10} {}  {}",
            style(&s.strategy).bold(),
            style(occurrences).yellow(),
            style(timing).dim(),
            if s.failed_runs > 0 {
                style(format!("({} failed)", s.failed_runs)).red().to_string()
            } else {
                String::new()
            }
        );
    }

    /// Print pre-rendered multi-line text as-is
    pub fn block(&self, text: &str) {
        if !self.quiet {
            print!("{}", text);
        }
    }

    /// Print blank line
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }
}
