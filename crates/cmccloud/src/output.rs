//! Terminal output helpers

use cmccloud_task::{OrderOutcome, TaskStatus};
use colored::Colorize;

pub fn print_task(label: &str, status: &TaskStatus) {
    println!(
        "{} {} (task {}: {})",
        "✓".green().bold(),
        label.green().bold(),
        status.id.cyan(),
        status.status
    );
}

pub fn print_order(label: &str, outcome: &OrderOutcome) {
    print_task(label, &outcome.status);
    println!("  price: {}", outcome.order.price.to_string().yellow());
}

pub fn print_field(name: &str, value: impl std::fmt::Display) {
    println!("  {:<14} {}", format!("{}:", name).dimmed(), value);
}

pub fn waiting(message: &str) {
    println!("{}", message.yellow());
}
