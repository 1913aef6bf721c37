use colored::Colorize;
use ideaseed::api::{CmdMessage, MessageLevel};
use ideaseed::config::Settings;
use ideaseed::error::IdeaseedError;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_url(url: &str) {
    println!("{}", url.cyan().underline());
}

/// One `key = value` line per setting, unset keys dimmed.
pub fn print_settings(settings: &Settings) {
    for key in Settings::keys() {
        match settings.get(key) {
            Some(value) => println!("{} = {}", key.bold(), value),
            None => println!("{}", format!("{key} = (not set)").dimmed()),
        }
    }
}

pub fn print_error(error: &IdeaseedError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
    if matches!(error, IdeaseedError::RateLimited { .. }) {
        eprintln!(
            "{}",
            "Your idea is still in your shell history, re-run the command later.".yellow()
        );
    }
}
