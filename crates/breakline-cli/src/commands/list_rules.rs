//! List rules command implementation.

use breakline_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<34} {:<8} Description", "Code", "Name", "Fixable");
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<8} {:<34} {:<8} {}",
            rule.code(),
            rule.name(),
            if rule.fixable() { "yes" } else { "no" },
            rule.description()
        );
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  breakline check --rules multiline-if-statement");
    println!("  breakline check --rules BL001,BL003");
}
