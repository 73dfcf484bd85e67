// Runs a typed `Request` against a `TrelloApi`.
//
// Both the CLI subcommands and the batch runner end up here. Remote errors
// get a short context line ("failed to get card") on top of the API error.
// Actions that only report success fetch the entity first so the message
// can name it.

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::api::TrelloApi;
use crate::models::Resource;
use crate::request::{
    AttachmentRequest, BoardRequest, CardRequest, ChecklistRequest, LabelRequest, ListRequest,
    MemberRequest, Request,
};

/// Result of one executed request.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Resource(Resource),
    Done(String),
}

impl Reply {
    /// JSON form used as batch result data.
    pub fn into_value(self) -> serde_json::Result<Value> {
        match self {
            Reply::Resource(resource) => serde_json::to_value(resource),
            Reply::Done(message) => Ok(json!({ "status": "success", "message": message })),
        }
    }
}

pub fn execute(api: &dyn TrelloApi, request: &Request) -> Result<Reply> {
    let (kind, action) = request.name();
    tracing::debug!(%kind, action, "executing request");
    match request {
        Request::Board(r) => board(api, r),
        Request::List(r) => list(api, r),
        Request::Card(r) => card(api, r),
        Request::Label(r) => label(api, r),
        Request::Checklist(r) => checklist(api, r),
        Request::Member(r) => member(api, r),
        Request::Attachment(r) => attachment(api, r),
    }
}

fn board(api: &dyn TrelloApi, request: &BoardRequest) -> Result<Reply> {
    let reply = match request {
        BoardRequest::List => Resource::Boards(api.my_boards().context("failed to get boards")?),
        BoardRequest::Get { id } => Resource::Board(api.get_board(id).context("failed to get board")?),
        BoardRequest::Create { name, desc } => Resource::Board(
            api.create_board(name, desc.as_deref())
                .context("failed to create board")?,
        ),
        BoardRequest::Delete { id } => {
            let board = api.get_board(id).context("failed to get board")?;
            api.delete_board(id).context("failed to delete board")?;
            return Ok(Reply::Done(format!("Board '{}' deleted successfully", board.name)));
        }
        BoardRequest::AddMember { id, email } => {
            let board = api.get_board(id).context("failed to get board")?;
            api.add_board_member(id, email).context("failed to add member")?;
            return Ok(Reply::Done(format!("Member {email} added to board '{}'", board.name)));
        }
    };
    Ok(Reply::Resource(reply))
}

fn list(api: &dyn TrelloApi, request: &ListRequest) -> Result<Reply> {
    let reply = match request {
        ListRequest::List { board_id } => {
            Resource::Lists(api.board_lists(board_id).context("failed to get lists")?)
        }
        ListRequest::Get { id } => Resource::List(api.get_list(id).context("failed to get list")?),
        ListRequest::Create { board_id, name } => {
            Resource::List(api.create_list(board_id, name).context("failed to create list")?)
        }
        ListRequest::Archive { id } => {
            let list = api.get_list(id).context("failed to get list")?;
            api.archive_list(id).context("failed to archive list")?;
            return Ok(Reply::Done(format!("List '{}' archived successfully", list.name)));
        }
    };
    Ok(Reply::Resource(reply))
}

fn card(api: &dyn TrelloApi, request: &CardRequest) -> Result<Reply> {
    let reply = match request {
        CardRequest::List { list_id } => {
            Resource::Cards(api.list_cards(list_id).context("failed to get cards")?)
        }
        CardRequest::Get { id } => Resource::Card(api.get_card(id).context("failed to get card")?),
        CardRequest::Create(new) => Resource::Card(api.create_card(new).context("failed to create card")?),
        CardRequest::Move { id, list_id } => {
            let list = api.get_list(list_id).context("failed to get list")?;
            let card = api.move_card(id, list_id).context("failed to move card")?;
            return Ok(Reply::Done(format!("Card '{}' moved to list '{}'", card.name, list.name)));
        }
        CardRequest::Copy { id, list_id } => {
            let list = api.get_list(list_id).context("failed to get list")?;
            let copy = api.copy_card(id, list_id).context("failed to copy card")?;
            return Ok(Reply::Done(format!(
                "Card '{}' copied to list '{}' (new ID: {})",
                copy.name, list.name, copy.id
            )));
        }
        CardRequest::Delete { id } => {
            let card = api.get_card(id).context("failed to get card")?;
            api.delete_card(id).context("failed to delete card")?;
            return Ok(Reply::Done(format!("Card '{}' deleted successfully", card.name)));
        }
        CardRequest::Archive { id } => {
            let card = api.archive_card(id).context("failed to archive card")?;
            return Ok(Reply::Done(format!("Card '{}' archived successfully", card.name)));
        }
    };
    Ok(Reply::Resource(reply))
}

fn label(api: &dyn TrelloApi, request: &LabelRequest) -> Result<Reply> {
    let reply = match request {
        LabelRequest::List { board_id } => {
            Resource::Labels(api.board_labels(board_id).context("failed to get labels")?)
        }
        LabelRequest::Get { id } => Resource::Label(api.get_label(id).context("failed to get label")?),
        LabelRequest::Create { board_id, name, color } => Resource::Label(
            api.create_label(board_id, name, color)
                .context("failed to create label")?,
        ),
        LabelRequest::Add { card_id, label_id } => {
            let card = api.get_card(card_id).context("failed to get card")?;
            api.add_label_to_card(card_id, label_id)
                .context("failed to add label")?;
            return Ok(Reply::Done(format!("Label {label_id} added to card '{}'", card.name)));
        }
    };
    Ok(Reply::Resource(reply))
}

fn checklist(api: &dyn TrelloApi, request: &ChecklistRequest) -> Result<Reply> {
    let reply = match request {
        ChecklistRequest::List { card_id } => Resource::Checklists(
            api.card_checklists(card_id)
                .context("failed to get checklists")?,
        ),
        ChecklistRequest::Get { id } => {
            Resource::Checklist(api.get_checklist(id).context("failed to get checklist")?)
        }
        ChecklistRequest::Create { card_id, name } => Resource::Checklist(
            api.create_checklist(card_id, name)
                .context("failed to create checklist")?,
        ),
        ChecklistRequest::AddItem { checklist_id, name } => Resource::CheckItem(
            api.add_check_item(checklist_id, name)
                .context("failed to add item")?,
        ),
        ChecklistRequest::SetItem { card_id, item_id, state } => Resource::CheckItem(
            api.set_check_item_state(card_id, item_id, *state)
                .context("failed to update item")?,
        ),
    };
    Ok(Reply::Resource(reply))
}

fn member(api: &dyn TrelloApi, request: &MemberRequest) -> Result<Reply> {
    let reply = match request {
        MemberRequest::Get { id } => Resource::Member(api.get_member(id).context("failed to get member")?),
        MemberRequest::Boards { id } => {
            Resource::Boards(api.member_boards(id).context("failed to get boards")?)
        }
    };
    Ok(Reply::Resource(reply))
}

fn attachment(api: &dyn TrelloApi, request: &AttachmentRequest) -> Result<Reply> {
    let reply = match request {
        AttachmentRequest::List { card_id } => Resource::Attachments(
            api.card_attachments(card_id)
                .context("failed to get attachments")?,
        ),
        AttachmentRequest::Add { card_id, url, name } => Resource::Attachment(
            api.add_url_attachment(card_id, url, name.as_deref())
                .context("failed to add attachment")?,
        ),
        AttachmentRequest::Upload { card_id, path } => Resource::Attachment(
            api.upload_attachment(card_id, path)
                .with_context(|| format!("failed to upload {}", path.display()))?,
        ),
    };
    Ok(Reply::Resource(reply))
}
