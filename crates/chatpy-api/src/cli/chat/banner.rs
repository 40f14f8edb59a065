//! Welcome banner display for chat sessions.

use console::style;

/// Print the banner shown before the intake form.
pub fn print_welcome_banner(institution: &str, base_url: &str, message_quota: u32) {
    println!();
    println!("  * {}", style("ChatPy").cyan().bold());
    println!("  {}", style(format!("Questions about {institution}? Ask away.")).dim());
    println!();
    println!("  {}  {}", style("Backend:").bold(), style(base_url).dim());
    println!(
        "  {}    {}",
        style("Quota:").bold(),
        style(format!("{message_quota} messages per session")).dim()
    );
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
