use console::style;

/// Styled terminal output for command results
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    /// Aligned label/value line, used by path and source listings
    pub fn field(&self, label: &str, value: &str) {
        println!("  {:<12} {}", style(label).dim(), value);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
