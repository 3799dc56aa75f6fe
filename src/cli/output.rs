//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::{Access, Profile, UserRole};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Format a role as a colored string
pub fn format_role(role: UserRole) -> String {
    match role {
        UserRole::Admin => role.to_string().magenta().to_string(),
        UserRole::Employee => role.to_string().cyan().to_string(),
    }
}

/// Format a guard decision as a colored string
pub fn format_access(access: &Access) -> String {
    match access {
        Access::Allow => "allow".green().to_string(),
        Access::Redirect(to) => format!("{} -> {}", "redirect".yellow(), to),
    }
}

/// Print a profile as a two-column table
pub fn print_profile_table(profile: &Profile) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Field").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let role_color = match profile.role {
        UserRole::Admin => Color::Magenta,
        UserRole::Employee => Color::Green,
    };

    table.add_row(vec![Cell::new("ID"), Cell::new(profile.id)]);
    table.add_row(vec![Cell::new("Name"), Cell::new(&profile.name)]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&profile.email)]);
    table.add_row(vec![
        Cell::new("Role"),
        Cell::new(profile.role.to_string()).fg(role_color),
    ]);
    table.add_row(vec![Cell::new("Status"), Cell::new(&profile.status)]);

    println!("{table}");
}
