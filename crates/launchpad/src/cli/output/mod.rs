//! Output formatting utilities

use console::{style, Style};

use launchpad_core::types::Author;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for version numbers
pub fn version_style() -> Style {
    Style::new().green().bold()
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// Single line rendering of a manifest author
pub fn format_author(author: &Author) -> String {
    match author {
        Author::Text(text) => text.clone(),
        Author::Structured { name, email, url } => {
            let mut out = name.clone().unwrap_or_default();
            if let Some(email) = email {
                out.push_str(&format!(" <{}>", email));
            }
            if let Some(url) = url {
                out.push_str(&format!(" ({})", url));
            }
            out.trim().to_string()
        }
    }
}
