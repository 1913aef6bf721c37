use clap::{Args, Parser, Subcommand, ValueEnum};
use ideaseed::api::Service;
use ideaseed::options::RawFlags;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ideaseed",
    bin_name = "ideaseed",
    version,
    about = "Note down your ideas and get them to the right place, without leaving your terminal",
    override_usage = "ideaseed [OPTIONS] [[[[REPO] PROJECT] COLUMN] TITLE] BODY\n       ideaseed <COMMAND>"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub create: CreateArgs,

    /// Where credentials are cached ("<None>" turns caching off)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub auth_cache: Option<String>,

    /// Do not read or write cached credentials for this run
    #[arg(long, global = true, help_heading = "Options")]
    pub no_auth_cache: bool,

    /// Settings file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Flags of the default mode, which writes an idea down.
#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// [[[[REPO] PROJECT] COLUMN] TITLE] BODY
    #[arg(value_name = "IDEA")]
    pub tokens: Vec<String>,

    /// Title of the issue or note
    #[arg(short = 'T', long, help_heading = "Placement")]
    pub title: Option<String>,

    /// Repository, as OWNER/NAME or NAME; the user keyword targets your profile
    #[arg(long, help_heading = "Placement")]
    pub repo: Option<String>,

    /// Project board
    #[arg(short, long, help_heading = "Placement")]
    pub project: Option<String>,

    /// Column of the project board
    #[arg(long, help_heading = "Placement")]
    pub column: Option<String>,

    /// Label or note tag (repeatable)
    #[arg(short, long = "tag", value_name = "TAG", help_heading = "Issue")]
    pub tags: Vec<String>,

    /// Same as --tag (repeatable)
    #[arg(short, long = "label", value_name = "LABEL", help_heading = "Issue")]
    pub labels: Vec<String>,

    /// Assignee or note collaborator (repeatable)
    #[arg(short, long = "assign-to", value_name = "USER", help_heading = "Issue")]
    pub assign_to: Vec<String>,

    /// Do not assign the issue to yourself
    #[arg(long, help_heading = "Issue")]
    pub no_self_assign: bool,

    /// Milestone of the issue
    #[arg(short = 'M', long, help_heading = "Issue")]
    pub milestone: Option<String>,

    /// Color of the note
    #[arg(short, long, help_heading = "Note")]
    pub color: Option<String>,

    /// Pin the note
    #[arg(long, help_heading = "Note")]
    pub pin: bool,

    /// Offer to create projects, columns, labels, milestones and tags that do not exist
    #[arg(short = 'm', long, help_heading = "Behavior")]
    pub create_missing: bool,

    /// Put a card on the board instead of creating an issue
    #[arg(short = 'I', long, help_heading = "Behavior")]
    pub no_issue: bool,

    /// Report what would be created without writing anything
    #[arg(long, help_heading = "Behavior")]
    pub dry_run: bool,

    /// Open the created issue, card or note in a browser
    #[arg(short, long, help_heading = "Behavior")]
    pub open: bool,

    /// Directory receiving a markdown copy of every idea
    #[arg(long, value_name = "DIR", help_heading = "Behavior")]
    pub local_copy: Option<String>,

    /// Project template for repositories ({repository}, {owner}, {username})
    #[arg(long, value_name = "TEMPLATE", help_heading = "Defaults")]
    pub default_project: Option<String>,

    /// Column template for repositories ({project} also works)
    #[arg(long, value_name = "TEMPLATE", help_heading = "Defaults")]
    pub default_column: Option<String>,

    /// Project template for your profile
    #[arg(long, value_name = "TEMPLATE", help_heading = "Defaults")]
    pub default_user_project: Option<String>,

    /// Column template for your profile
    #[arg(long, value_name = "TEMPLATE", help_heading = "Defaults")]
    pub default_user_column: Option<String>,

    /// REPO value meaning "my profile" instead of a repository
    #[arg(long, value_name = "KEYWORD", help_heading = "Defaults")]
    pub user_keyword: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log into a service and cache the credentials
    Login {
        #[arg(value_enum, default_value_t = ServiceArg::Github)]
        service: ServiceArg,
    },

    /// Forget every cached credential
    Logout,

    /// Show or change settings
    Config {
        /// Setting to show or change
        key: Option<String>,
        /// New value ("<None>" turns the feature off)
        value: Option<String>,
    },

    /// Describe ideaseed and where it keeps its files
    About,

    /// Print the version
    Version,

    /// Show how to upgrade
    Update,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ServiceArg {
    Github,
    Notes,
}

impl From<ServiceArg> for Service {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Github => Service::Github,
            ServiceArg::Notes => Service::Notes,
        }
    }
}

impl Cli {
    /// Command-line flag source, keyed by long flag name.
    pub fn raw_flags(&self) -> RawFlags {
        let create = &self.create;
        let mut labels = create.tags.clone();
        labels.extend(create.labels.iter().cloned());

        RawFlags::new()
            .with("--title", create.title.clone())
            .with("--repo", create.repo.clone())
            .with("--project", create.project.clone())
            .with("--column", create.column.clone())
            .with("--label", labels)
            .with("--assign-to", create.assign_to.clone())
            .with("--no-self-assign", create.no_self_assign)
            .with("--milestone", create.milestone.clone())
            .with("--color", create.color.clone())
            .with("--pin", create.pin)
            .with("--create-missing", create.create_missing)
            .with("--no-issue", create.no_issue)
            .with("--dry-run", create.dry_run)
            .with("--open", create.open)
            .with("--local-copy", create.local_copy.clone())
            .with("--default-project", create.default_project.clone())
            .with("--default-column", create.default_column.clone())
            .with("--default-user-project", create.default_user_project.clone())
            .with("--default-user-column", create.default_user_column.clone())
            .with("--user-keyword", create.user_keyword.clone())
            .with("--auth-cache", self.auth_cache.clone())
            .with("--no-auth-cache", self.no_auth_cache)
    }
}
