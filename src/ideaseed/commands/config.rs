use crate::commands::{CmdMessage, CmdResult};
use crate::config::Settings;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(settings_path: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let settings = Settings::load(settings_path)?;
            Ok(CmdResult::default().with_settings(settings))
        }
        ConfigAction::ShowKey(key) => {
            let settings = Settings::load(settings_path)?;
            let mut result = CmdResult::default();
            match settings.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None if Settings::is_known_key(&crate::options::canonical_key(&key)) => {
                    result.add_message(CmdMessage::info(format!("{key} is not set")))
                }
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {key}")))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut settings = Settings::load(settings_path)?;
            if let Err(e) = settings.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            settings.save(settings_path)?;
            let display_val = settings.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_settings(settings);
            result.add_message(CmdMessage::success(format!(
                "{key} set to {display_val}"
            )));
            Ok(result)
        }
    }
}
