use crate::commands::{CmdMessage, CmdResult, IdeaseedPaths};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("ideaseed {VERSION}")));
    result
}

pub fn about(paths: &IdeaseedPaths) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("ideaseed {VERSION}")));
    result.add_message(CmdMessage::info(
        "Note down your ideas and get them to the right place, without leaving your terminal.",
    ));
    result.add_message(CmdMessage::info(format!(
        "Settings:    {}",
        paths.settings.display()
    )));
    result.add_message(CmdMessage::info(format!(
        "Credentials: {}",
        paths.auth_cache.display()
    )));
    result
}

pub fn update() -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "You are running ideaseed {VERSION}. To upgrade, run:"
    )));
    result.add_message(CmdMessage::info("cargo install ideaseed --force"));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn about_shows_where_things_are_kept() {
        let paths = IdeaseedPaths {
            settings: PathBuf::from("/cfg/settings.json"),
            auth_cache: PathBuf::from("/cache/auth.json"),
        };
        let result = about(&paths);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("/cfg/settings.json")));
        assert!(result.messages[0].content.contains(VERSION));
    }

    #[test]
    fn update_prints_the_upgrade_command() {
        assert!(update().messages[1].content.contains("cargo install"));
    }
}
