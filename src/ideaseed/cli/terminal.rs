use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};
use ideaseed::error::{IdeaseedError, Result};
use ideaseed::prompt::Prompter;

/// Asks questions on the controlling terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

fn prompt_error(e: dialoguer::Error) -> IdeaseedError {
    IdeaseedError::Prompt(e.to_string())
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn text(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(prompt_error)
    }

    fn password(&mut self, question: &str) -> Result<String> {
        Password::with_theme(&self.theme)
            .with_prompt(question)
            .interact()
            .map_err(prompt_error)
    }

    fn select(&mut self, question: &str, choices: &[&str]) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(question)
            .items(choices)
            .default(0)
            .interact()
            .map_err(prompt_error)
    }
}

/// Opens `url` with the platform's default handler.
pub fn open_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn()?;
    }
    Ok(())
}
