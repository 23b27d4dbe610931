use colored::*;

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.red());
}

pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message);
}
