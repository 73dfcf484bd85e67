use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::format::OutputFormat;
use crate::request::{
    AttachmentRequest, BoardRequest, CardRequest, CheckState, ChecklistRequest, LabelRequest,
    ListRequest, MemberRequest, NewCard, Position, Request,
};

#[derive(Parser, Debug)]
#[command(name = "trello-cli")]
#[command(about = "Manage Trello boards, lists and cards from the command line")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Trello API key
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Trello API token
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format (json, markdown)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Comma-separated fields to include in the output
    #[arg(long, global = true, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Approximate token ceiling for the output (0 = unlimited)
    #[arg(long, global = true)]
    pub max_tokens: Option<usize>,

    /// Include every optional section in Markdown output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors in the exit code
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log API calls and internal steps to stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage boards
    #[command(subcommand)]
    Board(BoardCommand),

    /// Manage lists
    #[command(subcommand)]
    List(ListCommand),

    /// Manage cards
    #[command(subcommand)]
    Card(CardCommand),

    /// Manage labels
    #[command(subcommand)]
    Label(LabelCommand),

    /// Manage checklists
    #[command(subcommand)]
    Checklist(ChecklistCommand),

    /// Look up members
    #[command(subcommand)]
    Member(MemberCommand),

    /// Manage card attachments
    #[command(subcommand)]
    Attachment(AttachmentCommand),

    /// Run many operations from a JSON or YAML document
    #[command(subcommand)]
    Batch(BatchCommand),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Print a JSON description of every command
    Schema,

    /// Print a usage guide for LLM agents
    LlmHelp,
}

#[derive(Subcommand, Debug)]
pub enum BoardCommand {
    /// List boards of the authenticated member
    List,
    /// Show one board
    Get { id: String },
    /// Create a board
    Create {
        name: String,
        #[arg(long)]
        desc: Option<String>,
    },
    /// Delete a board
    Delete { id: String },
    /// Invite a member to a board by email
    AddMember { id: String, email: String },
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List the lists of a board
    List {
        #[arg(long)]
        board: String,
    },
    /// Show one list
    Get { id: String },
    /// Create a list on a board
    Create {
        #[arg(long)]
        board: String,
        name: String,
    },
    /// Archive a list
    Archive { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CardCommand {
    /// List the cards of a list
    List {
        #[arg(long)]
        list: String,
    },
    /// Show one card
    Get { id: String },
    /// Create a card
    Create {
        #[arg(long)]
        list: String,
        name: String,
        #[arg(long)]
        desc: Option<String>,
        /// top, bottom or a number
        #[arg(long)]
        pos: Option<Position>,
    },
    /// Move a card to another list
    Move {
        id: String,
        #[arg(long)]
        list: String,
    },
    /// Copy a card into a list
    Copy {
        id: String,
        #[arg(long)]
        list: String,
    },
    /// Delete a card
    Delete { id: String },
    /// Archive a card
    Archive { id: String },
}

#[derive(Subcommand, Debug)]
pub enum LabelCommand {
    /// List the labels of a board
    List {
        #[arg(long)]
        board: String,
    },
    /// Show one label
    Get { id: String },
    /// Create a label on a board
    Create {
        #[arg(long)]
        board: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        color: String,
    },
    /// Add a label to a card
    Add { card_id: String, label_id: String },
}

#[derive(Subcommand, Debug)]
pub enum ChecklistCommand {
    /// List the checklists of a card
    List {
        #[arg(long)]
        card: String,
    },
    /// Show one checklist
    Get { id: String },
    /// Create a checklist on a card
    Create {
        #[arg(long)]
        card: String,
        name: String,
    },
    /// Add an item to a checklist
    AddItem { checklist_id: String, name: String },
    /// Mark a checklist item complete or incomplete
    SetItem {
        card_id: String,
        item_id: String,
        #[arg(long, value_enum)]
        state: CheckState,
    },
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    /// Show a member by ID or username ("me" for yourself)
    Get { id: String },
    /// List the boards of a member
    Boards { id: String },
}

#[derive(Subcommand, Debug)]
pub enum AttachmentCommand {
    /// List the attachments of a card
    List {
        #[arg(long)]
        card: String,
    },
    /// Attach a URL to a card
    Add {
        #[arg(long)]
        card: String,
        url: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Upload a local file to a card
    Upload {
        #[arg(long)]
        card: String,
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum BatchCommand {
    /// Read operations from a file
    File { path: PathBuf },
    /// Read operations from standard input
    Stdin,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Save credentials and defaults (uses --api-key, --token, --max-tokens)
    Set {
        #[arg(long)]
        default_format: Option<OutputFormat>,
    },
    /// Show the current configuration with secrets masked
    Show,
    /// Print the configuration file path
    Path,
    /// Create the configuration file interactively
    Init,
}

impl From<BoardCommand> for Request {
    fn from(cmd: BoardCommand) -> Self {
        Request::Board(match cmd {
            BoardCommand::List => BoardRequest::List,
            BoardCommand::Get { id } => BoardRequest::Get { id },
            BoardCommand::Create { name, desc } => BoardRequest::Create { name, desc },
            BoardCommand::Delete { id } => BoardRequest::Delete { id },
            BoardCommand::AddMember { id, email } => BoardRequest::AddMember { id, email },
        })
    }
}

impl From<ListCommand> for Request {
    fn from(cmd: ListCommand) -> Self {
        Request::List(match cmd {
            ListCommand::List { board } => ListRequest::List { board_id: board },
            ListCommand::Get { id } => ListRequest::Get { id },
            ListCommand::Create { board, name } => ListRequest::Create {
                board_id: board,
                name,
            },
            ListCommand::Archive { id } => ListRequest::Archive { id },
        })
    }
}

impl From<CardCommand> for Request {
    fn from(cmd: CardCommand) -> Self {
        Request::Card(match cmd {
            CardCommand::List { list } => CardRequest::List { list_id: list },
            CardCommand::Get { id } => CardRequest::Get { id },
            CardCommand::Create {
                list,
                name,
                desc,
                pos,
            } => CardRequest::Create(NewCard {
                list_id: list,
                name,
                desc,
                pos,
            }),
            CardCommand::Move { id, list } => CardRequest::Move { id, list_id: list },
            CardCommand::Copy { id, list } => CardRequest::Copy { id, list_id: list },
            CardCommand::Delete { id } => CardRequest::Delete { id },
            CardCommand::Archive { id } => CardRequest::Archive { id },
        })
    }
}

impl From<LabelCommand> for Request {
    fn from(cmd: LabelCommand) -> Self {
        Request::Label(match cmd {
            LabelCommand::List { board } => LabelRequest::List { board_id: board },
            LabelCommand::Get { id } => LabelRequest::Get { id },
            LabelCommand::Create { board, name, color } => LabelRequest::Create {
                board_id: board,
                name,
                color,
            },
            LabelCommand::Add { card_id, label_id } => LabelRequest::Add { card_id, label_id },
        })
    }
}

impl From<ChecklistCommand> for Request {
    fn from(cmd: ChecklistCommand) -> Self {
        Request::Checklist(match cmd {
            ChecklistCommand::List { card } => ChecklistRequest::List { card_id: card },
            ChecklistCommand::Get { id } => ChecklistRequest::Get { id },
            ChecklistCommand::Create { card, name } => ChecklistRequest::Create {
                card_id: card,
                name,
            },
            ChecklistCommand::AddItem { checklist_id, name } => {
                ChecklistRequest::AddItem { checklist_id, name }
            }
            ChecklistCommand::SetItem {
                card_id,
                item_id,
                state,
            } => ChecklistRequest::SetItem {
                card_id,
                item_id,
                state,
            },
        })
    }
}

impl From<MemberCommand> for Request {
    fn from(cmd: MemberCommand) -> Self {
        Request::Member(match cmd {
            MemberCommand::Get { id } => MemberRequest::Get { id },
            MemberCommand::Boards { id } => MemberRequest::Boards { id },
        })
    }
}

impl From<AttachmentCommand> for Request {
    fn from(cmd: AttachmentCommand) -> Self {
        Request::Attachment(match cmd {
            AttachmentCommand::List { card } => AttachmentRequest::List { card_id: card },
            AttachmentCommand::Add { card, url, name } => AttachmentRequest::Add {
                card_id: card,
                url,
                name,
            },
            AttachmentCommand::Upload { card, path } => AttachmentRequest::Upload {
                card_id: card,
                path,
            },
        })
    }
}
