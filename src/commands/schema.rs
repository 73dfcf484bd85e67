//! Machine-readable description of the command tree, built from the clap
//! definitions so it cannot drift from the real flags.

use anyhow::Result;
use clap::{Arg, ArgAction, CommandFactory};
use serde::Serialize;

use crate::cli::Cli;
use crate::request::{ActionSpec, ACTION_TABLE};

#[derive(Debug, Serialize)]
struct Schema {
    name: String,
    version: &'static str,
    description: String,
    global_flags: Vec<FlagSchema>,
    commands: Vec<CommandSchema>,
    batch_actions: &'static [ActionSpec],
}

#[derive(Debug, Serialize)]
struct CommandSchema {
    name: String,
    description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<ArgSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    flags: Vec<FlagSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    subcommands: Vec<CommandSchema>,
}

#[derive(Debug, Serialize)]
struct ArgSchema {
    name: String,
    description: String,
    required: bool,
}

#[derive(Debug, Serialize)]
struct FlagSchema {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    short: Option<char>,
    description: String,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<String>,
    required: bool,
}

pub fn render() -> Result<String> {
    Ok(serde_json::to_string_pretty(&build())?)
}

fn build() -> Schema {
    let root = Cli::command();
    Schema {
        name: root.get_name().to_string(),
        version: env!("CARGO_PKG_VERSION"),
        description: root.get_about().map(|s| s.to_string()).unwrap_or_default(),
        global_flags: root.get_arguments().filter_map(flag).collect(),
        commands: root.get_subcommands().map(command).collect(),
        batch_actions: ACTION_TABLE,
    }
}

fn command(cmd: &clap::Command) -> CommandSchema {
    CommandSchema {
        name: cmd.get_name().to_string(),
        description: cmd.get_about().map(|s| s.to_string()).unwrap_or_default(),
        arguments: cmd
            .get_positionals()
            .map(|arg| ArgSchema {
                name: arg.get_id().to_string(),
                description: help(arg),
                required: arg.is_required_set(),
            })
            .collect(),
        flags: cmd.get_arguments().filter_map(flag).collect(),
        subcommands: cmd
            .get_subcommands()
            .filter(|sub| sub.get_name() != "help")
            .map(command)
            .collect(),
    }
}

/// Named options only; positionals and the built-in help/version are skipped.
fn flag(arg: &Arg) -> Option<FlagSchema> {
    let name = arg.get_long()?;
    if matches!(name, "help" | "version") {
        return None;
    }
    let kind = match arg.get_action() {
        ArgAction::SetTrue | ArgAction::SetFalse => "bool",
        ArgAction::Append => "list",
        _ if !arg.get_possible_values().is_empty() => "enum",
        _ => "string",
    };
    Some(FlagSchema {
        name: name.to_string(),
        short: arg.get_short(),
        description: help(arg),
        kind,
        values: if kind == "enum" {
            arg.get_possible_values()
                .iter()
                .filter(|v| !v.is_hide_set())
                .map(|v| v.get_name().to_string())
                .collect()
        } else {
            Vec::new()
        },
        required: arg.is_required_set(),
    })
}

fn help(arg: &Arg) -> String {
    arg.get_help().map(|s| s.to_string()).unwrap_or_default()
}
