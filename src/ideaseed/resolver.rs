//! Find-or-create lookup shared by every kind of remote object.

use crate::commands::CmdMessage;
use crate::error::Result;
use crate::prompt::Prompter;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Project,
    Column,
    Label,
    Milestone,
    Tag,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectKind::Project => "project",
            ObjectKind::Column => "column",
            ObjectKind::Label => "label",
            ObjectKind::Milestone => "milestone",
            ObjectKind::Tag => "tag",
        })
    }
}

/// Per-invocation state threaded through every lookup.
pub struct Resolution<'a> {
    pub create_missing: bool,
    pub prompter: &'a mut dyn Prompter,
    pub messages: &'a mut Vec<CmdMessage>,
}

impl<'a> Resolution<'a> {
    pub fn new(
        create_missing: bool,
        prompter: &'a mut dyn Prompter,
        messages: &'a mut Vec<CmdMessage>,
    ) -> Self {
        Self {
            create_missing,
            prompter,
            messages,
        }
    }

    /// Returns the candidate named `target` (ignoring case), or creates it.
    ///
    /// `create` only runs when creation is allowed and the user agreed to it; it
    /// may ask further questions through the prompter it is given. `None` means
    /// the object is missing and the caller must stop.
    pub fn find_or_create<T>(
        &mut self,
        kind: ObjectKind,
        target: &str,
        candidates: impl IntoIterator<Item = T>,
        name_of: impl Fn(&T) -> &str,
        create: impl FnOnce(&mut dyn Prompter) -> Result<T>,
    ) -> Result<Option<T>> {
        let wanted = target.to_lowercase();
        if let Some(found) = candidates
            .into_iter()
            .find(|candidate| name_of(candidate).to_lowercase() == wanted)
        {
            tracing::debug!(%kind, name = target, "found existing object");
            return Ok(Some(found));
        }

        if !self.create_missing {
            self.messages.push(CmdMessage::error(format!(
                "The {kind} '{target}' does not exist. \
                 Use --create-missing to create it when it is missing."
            )));
            return Ok(None);
        }

        let question = format!("Create missing {kind} '{target}'?");
        if !self.prompter.confirm(&question, true)? {
            self.messages.push(CmdMessage::warning(format!(
                "Not creating the {kind} '{target}', nothing was done past this point."
            )));
            return Ok(None);
        }

        let created = create(&mut *self.prompter)?;
        tracing::info!(%kind, name = target, "created missing object");
        self.messages
            .push(CmdMessage::info(format!("Created {kind} '{target}'")));
        Ok(Some(created))
    }
}
