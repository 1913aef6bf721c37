use crate::auth::AuthCache;
use crate::backend::{github, notes};
use crate::commands::{CmdMessage, CmdResult};
use crate::connect::Connector;
use crate::error::Result;
use crate::mirror::{self, Idea};
use crate::options::{Destination, InvocationOptions};
use crate::placement::{self, PlacementOutcome, PlacementReport};
use crate::prompt::Prompter;
use crate::resolver::Resolution;

pub fn run<C: Connector>(
    connector: &mut C,
    options: &InvocationOptions,
    prompter: &mut dyn Prompter,
) -> Result<CmdResult> {
    let mut messages = Vec::new();

    let outcome = match options.destination() {
        Destination::Notes => {
            let cache = AuthCache::new(options.auth_cache.clone(), notes::SERVICE);
            let store = connector.note_store(&cache, prompter, &mut messages)?;
            let mut resolution = Resolution::new(options.create_missing, prompter, &mut messages);
            placement::place_on_note_store(store, options, &mut resolution)?
        }
        Destination::Repository(_) | Destination::Account => {
            let cache = AuthCache::new(options.auth_cache.clone(), github::SERVICE);
            let host = connector.code_host(&cache, prompter, &mut messages)?;
            let mut resolution = Resolution::new(options.create_missing, prompter, &mut messages);
            placement::place_on_code_host(host, options, &mut resolution)?
        }
    };

    let report = match outcome {
        PlacementOutcome::Placed(report) => report,
        PlacementOutcome::Aborted => {
            return Ok(CmdResult::default().with_messages(messages).aborted());
        }
    };

    for planned in &report.planned {
        messages.push(CmdMessage::info(format!("[dry run] would {planned}")));
    }
    messages.push(CmdMessage::success(describe(&report, options)));

    if let Some(root) = &options.local_copy {
        let idea = Idea::from_report(options, &report);
        if options.dry_run {
            messages.push(CmdMessage::info(format!(
                "[dry run] would save a local copy to {}",
                idea.path_in(root).display()
            )));
        } else {
            match mirror::save(root, &idea, prompter)? {
                Some(path) => messages.push(CmdMessage::info(format!(
                    "Saved a local copy to {}",
                    path.display()
                ))),
                None => messages.push(CmdMessage::info("Kept the existing local copy")),
            }
        }
    }

    Ok(CmdResult::default()
        .with_messages(messages)
        .with_url(report.url))
}

/// One line saying where the idea went.
fn describe(report: &PlacementReport, options: &InvocationOptions) -> String {
    let board = match (&report.placement.project, &report.placement.column) {
        (Some(project), Some(column)) => format!(" › {project} › {column}"),
        _ => String::new(),
    };
    let owner = report
        .repo
        .as_ref()
        .map(|repo| repo.to_string())
        .or_else(|| report.username.clone())
        .unwrap_or_default();
    let verb = if options.dry_run {
        "Would create"
    } else {
        "Created"
    };

    match report.destination {
        Destination::Notes => format!("{verb} a note"),
        _ if options.creates_issue() => match report.issue_number {
            Some(number) => format!("{verb} issue #{number} in {owner}{board}"),
            None => format!("{verb} an issue in {owner}{board}"),
        },
        _ => format!("{verb} a card in {owner}{board}"),
    }
}
