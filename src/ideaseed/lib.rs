//! # Ideaseed Architecture
//!
//! Ideaseed turns one line typed in a shell into a note, an issue or a project
//! card, in the right place. Like any client of it, the command line is a thin
//! layer over a library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts on the terminal, prints        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Layers command line, settings file and built-in defaults │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - create, login/logout, config, about/version/update       │
//! │  - Returns CmdResult messages, never prints                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - options: positional roles, flag merge, validation        │
//! │  - defaults: {placeholder} templates for project/column     │
//! │  - resolver: find-or-create with confirmation               │
//! │  - placement: repository, account and notes destinations    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backends (backend/)                                        │
//! │  - CodeHost and NoteStore traits                            │
//! │  - GitHub REST, GraphQL notes, in-memory, dry-run wrappers  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - Asks questions only through the [`prompt::Prompter`] trait
//!
//! Network access goes through [`connect::Connector`], so the whole create
//! flow runs against in-memory backends and a scripted prompter in tests.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per command
//! - [`options`]: Typed invocation options from positionals and flags
//! - [`defaults`]: Default project and column templates
//! - [`resolver`]: Find-or-create lookups
//! - [`placement`]: Where an idea goes and the creation sequence
//! - [`auth`]: Credentials cache and login flow
//! - [`backend`]: Remote services and their test doubles
//! - [`connect`]: Logged-in backends for commands
//! - [`mirror`]: Local markdown copies
//! - [`config`]: Settings file
//! - [`color`]: Note colors
//! - [`prompt`]: Interactive questions
//! - [`error`]: Error types
//! - `cli`: Argument parsing, terminal prompts and printing for the binary (not part of the lib API)

pub mod api;
pub mod auth;
pub mod backend;
pub mod color;
pub mod commands;
pub mod config;
pub mod connect;
pub mod defaults;
pub mod error;
pub mod mirror;
pub mod options;
pub mod placement;
pub mod prompt;
pub mod resolver;
