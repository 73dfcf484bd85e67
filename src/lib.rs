// Library root
// -----------
// The binary (`main.rs`) is a thin wrapper around these modules.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the Trello REST API behind the
//   `TrelloApi` trait.
// - `models`: Trello entities and the `Resource` sum type the formatters
//   render.
// - `request`: typed requests and the batch validation table.
// - `execute`: runs a request against a `TrelloApi`.
// - `batch`: batch document loading and the sequential runner.
// - `format`: JSON and Markdown output with field filtering and a token
//   ceiling.
// - `config`: config file and credential resolution.
// - `cli`, `commands`: clap definitions and command handlers.
// - `ui`, `logging`: terminal helpers and tracing setup.
pub mod api;
pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod execute;
pub mod format;
pub mod logging;
pub mod models;
pub mod request;
pub mod ui;
