//! Typed requests shared by the CLI and the batch runner.
//!
//! A batch [`Operation`] carries an untyped `data` map. [`validate`] checks it
//! against [`ACTION_TABLE`] once, and [`Request::from_operation`] turns it into
//! the same typed [`Request`] the CLI subcommands build directly.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::batch::Operation;
use crate::models::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Board,
    List,
    Card,
    Label,
    Checklist,
    Member,
    Attachment,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Board,
        EntityKind::List,
        EntityKind::Card,
        EntityKind::Label,
        EntityKind::Checklist,
        EntityKind::Member,
        EntityKind::Attachment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Board => "board",
            EntityKind::List => "list",
            EntityKind::Card => "card",
            EntityKind::Label => "label",
            EntityKind::Checklist => "checklist",
            EntityKind::Member => "member",
            EntityKind::Attachment => "attachment",
        }
    }

    fn id_label(self) -> &'static str {
        match self {
            EntityKind::Member => "member ID or username",
            EntityKind::Board => "board ID",
            EntityKind::List => "list ID",
            EntityKind::Card => "card ID",
            EntityKind::Label => "label ID",
            EntityKind::Checklist => "checklist ID",
            EntityKind::Attachment => "attachment ID",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("operation type is required")]
    MissingType,

    #[error("operation resource is required")]
    MissingResource,

    #[error("operation action is required")]
    MissingAction,

    #[error("invalid operation type: {0} (valid: board, list, card, label, checklist, member, attachment)")]
    InvalidType(String),

    #[error("unsupported {kind} action: {action}")]
    UnsupportedAction { kind: EntityKind, action: String },

    #[error("{} is required for {action} action", kind.id_label())]
    MissingId { kind: EntityKind, action: String },

    #[error("{field} is required for {action} action on {kind}")]
    MissingField {
        field: &'static str,
        action: String,
        kind: EntityKind,
    },

    #[error("{field} must be a string for {action} action on {kind}")]
    NotAString {
        field: &'static str,
        action: String,
        kind: EntityKind,
    },

    #[error("invalid {field} value: {value} ({expected})")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// One row of the batch validation table.
#[derive(Debug, Serialize)]
pub struct ActionSpec {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub action: &'static str,
    pub requires_id: bool,
    pub required: &'static [&'static str],
}

const fn spec(
    kind: EntityKind,
    action: &'static str,
    requires_id: bool,
    required: &'static [&'static str],
) -> ActionSpec {
    ActionSpec {
        kind,
        action,
        requires_id,
        required,
    }
}

/// Every `(type, action)` pair a batch operation may use.
pub const ACTION_TABLE: &[ActionSpec] = &[
    spec(EntityKind::Board, "list", false, &[]),
    spec(EntityKind::Board, "get", true, &[]),
    spec(EntityKind::Board, "create", false, &["name"]),
    spec(EntityKind::Board, "delete", true, &[]),
    spec(EntityKind::Board, "add-member", true, &["email"]),
    spec(EntityKind::List, "list", false, &["board_id"]),
    spec(EntityKind::List, "get", true, &[]),
    spec(EntityKind::List, "create", false, &["name", "board_id"]),
    spec(EntityKind::List, "archive", true, &[]),
    spec(EntityKind::Card, "list", false, &["list_id"]),
    spec(EntityKind::Card, "get", true, &[]),
    spec(EntityKind::Card, "create", false, &["name", "list_id"]),
    spec(EntityKind::Card, "move", true, &["list_id"]),
    spec(EntityKind::Card, "copy", true, &["list_id"]),
    spec(EntityKind::Card, "delete", true, &[]),
    spec(EntityKind::Card, "archive", true, &[]),
    spec(EntityKind::Label, "list", false, &["board_id"]),
    spec(EntityKind::Label, "get", true, &[]),
    spec(EntityKind::Label, "create", false, &["name", "color", "board_id"]),
    spec(EntityKind::Label, "add", false, &["card_id", "label_id"]),
    spec(EntityKind::Checklist, "list", false, &["card_id"]),
    spec(EntityKind::Checklist, "get", true, &[]),
    spec(EntityKind::Checklist, "create", false, &["name", "card_id"]),
    spec(EntityKind::Checklist, "add-item", false, &["checklist_id", "item_name"]),
    spec(EntityKind::Checklist, "set-item", false, &["card_id", "item_id", "state"]),
    spec(EntityKind::Member, "get", true, &[]),
    spec(EntityKind::Member, "boards", true, &[]),
    spec(EntityKind::Attachment, "list", false, &["card_id"]),
    spec(EntityKind::Attachment, "add", false, &["card_id", "url"]),
    spec(EntityKind::Attachment, "upload", false, &["card_id", "path"]),
];

/// Static shape check of a batch operation. Runs before any network call.
pub fn validate(op: &Operation) -> Result<&'static ActionSpec, ValidationError> {
    if op.kind.is_empty() {
        return Err(ValidationError::MissingType);
    }
    if op.resource.is_empty() {
        return Err(ValidationError::MissingResource);
    }
    if op.action.is_empty() {
        return Err(ValidationError::MissingAction);
    }

    let kind: EntityKind = op.kind.parse()?;
    let spec = ACTION_TABLE
        .iter()
        .find(|s| s.kind == kind && s.action == op.action)
        .ok_or_else(|| ValidationError::UnsupportedAction {
            kind,
            action: op.action.clone(),
        })?;

    if spec.requires_id && op.target_id().is_none() {
        return Err(ValidationError::MissingId {
            kind,
            action: op.action.clone(),
        });
    }
    for &field in spec.required {
        if text_field(op, kind, field)?.is_none() {
            return Err(ValidationError::MissingField {
                field,
                action: op.action.clone(),
                kind,
            });
        }
    }
    Ok(spec)
}

/// Looks a string field up in `data`, then in `parameters`. Empty strings
/// count as absent.
fn text_field(op: &Operation, kind: EntityKind, field: &'static str) -> Result<Option<String>, ValidationError> {
    match op.data.get(field) {
        Some(Value::String(s)) if !s.is_empty() => return Ok(Some(s.clone())),
        Some(Value::String(_)) | Some(Value::Null) | None => {}
        Some(_) => {
            return Err(ValidationError::NotAString {
                field,
                action: op.action.clone(),
                kind,
            })
        }
    }
    Ok(op
        .parameters
        .get(field)
        .filter(|s| !s.is_empty())
        .cloned())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    Top,
    Bottom,
    At(f64),
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Position::Top),
            "bottom" => Ok(Position::Bottom),
            other => other
                .parse::<f64>()
                .map(Position::At)
                .map_err(|_| format!("expected top, bottom or a number, got {other}")),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Top => f.write_str("top"),
            Position::Bottom => f.write_str("bottom"),
            Position::At(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckState {
    Complete,
    Incomplete,
}

impl CheckState {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckState::Complete => "complete",
            CheckState::Incomplete => "incomplete",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub list_id: String,
    pub name: String,
    pub desc: Option<String>,
    pub pos: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardRequest {
    List,
    Get { id: String },
    Create { name: String, desc: Option<String> },
    Delete { id: String },
    AddMember { id: String, email: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListRequest {
    List { board_id: String },
    Get { id: String },
    Create { board_id: String, name: String },
    Archive { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardRequest {
    List { list_id: String },
    Get { id: String },
    Create(NewCard),
    Move { id: String, list_id: String },
    Copy { id: String, list_id: String },
    Delete { id: String },
    Archive { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LabelRequest {
    List { board_id: String },
    Get { id: String },
    Create { board_id: String, name: String, color: String },
    Add { card_id: String, label_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChecklistRequest {
    List { card_id: String },
    Get { id: String },
    Create { card_id: String, name: String },
    AddItem { checklist_id: String, name: String },
    SetItem { card_id: String, item_id: String, state: CheckState },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberRequest {
    Get { id: String },
    Boards { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentRequest {
    List { card_id: String },
    Add { card_id: String, url: String, name: Option<String> },
    Upload { card_id: String, path: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Board(BoardRequest),
    List(ListRequest),
    Card(CardRequest),
    Label(LabelRequest),
    Checklist(ChecklistRequest),
    Member(MemberRequest),
    Attachment(AttachmentRequest),
}

impl Request {
    /// Validates a batch operation and builds the typed request.
    pub fn from_operation(op: &Operation) -> Result<Request, ValidationError> {
        let spec = validate(op)?;
        let kind = spec.kind;
        let field = |name: &'static str| -> Result<String, ValidationError> {
            text_field(op, kind, name)?.ok_or_else(|| ValidationError::MissingField {
                field: name,
                action: op.action.clone(),
                kind,
            })
        };
        let optional = |name: &'static str| text_field(op, kind, name);
        let id = || op.target_id().unwrap_or_default().to_string();

        let request = match (kind, spec.action) {
            (EntityKind::Board, "list") => Request::Board(BoardRequest::List),
            (EntityKind::Board, "get") => Request::Board(BoardRequest::Get { id: id() }),
            (EntityKind::Board, "create") => Request::Board(BoardRequest::Create {
                name: field("name")?,
                desc: optional("desc")?,
            }),
            (EntityKind::Board, "delete") => Request::Board(BoardRequest::Delete { id: id() }),
            (EntityKind::Board, "add-member") => Request::Board(BoardRequest::AddMember {
                id: id(),
                email: field("email")?,
            }),

            (EntityKind::List, "list") => Request::List(ListRequest::List {
                board_id: field("board_id")?,
            }),
            (EntityKind::List, "get") => Request::List(ListRequest::Get { id: id() }),
            (EntityKind::List, "create") => Request::List(ListRequest::Create {
                board_id: field("board_id")?,
                name: field("name")?,
            }),
            (EntityKind::List, "archive") => Request::List(ListRequest::Archive { id: id() }),

            (EntityKind::Card, "list") => Request::Card(CardRequest::List {
                list_id: field("list_id")?,
            }),
            (EntityKind::Card, "get") => Request::Card(CardRequest::Get { id: id() }),
            (EntityKind::Card, "create") => Request::Card(CardRequest::Create(NewCard {
                list_id: field("list_id")?,
                name: field("name")?,
                desc: optional("desc")?,
                pos: position(op)?,
            })),
            (EntityKind::Card, "move") => Request::Card(CardRequest::Move {
                id: id(),
                list_id: field("list_id")?,
            }),
            (EntityKind::Card, "copy") => Request::Card(CardRequest::Copy {
                id: id(),
                list_id: field("list_id")?,
            }),
            (EntityKind::Card, "delete") => Request::Card(CardRequest::Delete { id: id() }),
            (EntityKind::Card, "archive") => Request::Card(CardRequest::Archive { id: id() }),

            (EntityKind::Label, "list") => Request::Label(LabelRequest::List {
                board_id: field("board_id")?,
            }),
            (EntityKind::Label, "get") => Request::Label(LabelRequest::Get { id: id() }),
            (EntityKind::Label, "create") => Request::Label(LabelRequest::Create {
                board_id: field("board_id")?,
                name: field("name")?,
                color: field("color")?,
            }),
            (EntityKind::Label, "add") => Request::Label(LabelRequest::Add {
                card_id: field("card_id")?,
                label_id: field("label_id")?,
            }),

            (EntityKind::Checklist, "list") => Request::Checklist(ChecklistRequest::List {
                card_id: field("card_id")?,
            }),
            (EntityKind::Checklist, "get") => Request::Checklist(ChecklistRequest::Get { id: id() }),
            (EntityKind::Checklist, "create") => Request::Checklist(ChecklistRequest::Create {
                card_id: field("card_id")?,
                name: field("name")?,
            }),
            (EntityKind::Checklist, "add-item") => Request::Checklist(ChecklistRequest::AddItem {
                checklist_id: field("checklist_id")?,
                name: field("item_name")?,
            }),
            (EntityKind::Checklist, "set-item") => Request::Checklist(ChecklistRequest::SetItem {
                card_id: field("card_id")?,
                item_id: field("item_id")?,
                state: check_state(&field("state")?)?,
            }),

            (EntityKind::Member, "get") => Request::Member(MemberRequest::Get { id: id() }),
            (EntityKind::Member, "boards") => Request::Member(MemberRequest::Boards { id: id() }),

            (EntityKind::Attachment, "list") => Request::Attachment(AttachmentRequest::List {
                card_id: field("card_id")?,
            }),
            (EntityKind::Attachment, "add") => Request::Attachment(AttachmentRequest::Add {
                card_id: field("card_id")?,
                url: field("url")?,
                name: optional("name")?,
            }),
            (EntityKind::Attachment, "upload") => Request::Attachment(AttachmentRequest::Upload {
                card_id: field("card_id")?,
                path: PathBuf::from(field("path")?),
            }),

            (kind, action) => {
                return Err(ValidationError::UnsupportedAction {
                    kind,
                    action: action.to_string(),
                })
            }
        };
        Ok(request)
    }

    /// Entity type and action name, e.g. `(Card, "move")`.
    pub fn name(&self) -> (EntityKind, &'static str) {
        match self {
            Request::Board(r) => (
                EntityKind::Board,
                match r {
                    BoardRequest::List => "list",
                    BoardRequest::Get { .. } => "get",
                    BoardRequest::Create { .. } => "create",
                    BoardRequest::Delete { .. } => "delete",
                    BoardRequest::AddMember { .. } => "add-member",
                },
            ),
            Request::List(r) => (
                EntityKind::List,
                match r {
                    ListRequest::List { .. } => "list",
                    ListRequest::Get { .. } => "get",
                    ListRequest::Create { .. } => "create",
                    ListRequest::Archive { .. } => "archive",
                },
            ),
            Request::Card(r) => (
                EntityKind::Card,
                match r {
                    CardRequest::List { .. } => "list",
                    CardRequest::Get { .. } => "get",
                    CardRequest::Create(_) => "create",
                    CardRequest::Move { .. } => "move",
                    CardRequest::Copy { .. } => "copy",
                    CardRequest::Delete { .. } => "delete",
                    CardRequest::Archive { .. } => "archive",
                },
            ),
            Request::Label(r) => (
                EntityKind::Label,
                match r {
                    LabelRequest::List { .. } => "list",
                    LabelRequest::Get { .. } => "get",
                    LabelRequest::Create { .. } => "create",
                    LabelRequest::Add { .. } => "add",
                },
            ),
            Request::Checklist(r) => (
                EntityKind::Checklist,
                match r {
                    ChecklistRequest::List { .. } => "list",
                    ChecklistRequest::Get { .. } => "get",
                    ChecklistRequest::Create { .. } => "create",
                    ChecklistRequest::AddItem { .. } => "add-item",
                    ChecklistRequest::SetItem { .. } => "set-item",
                },
            ),
            Request::Member(r) => (
                EntityKind::Member,
                match r {
                    MemberRequest::Get { .. } => "get",
                    MemberRequest::Boards { .. } => "boards",
                },
            ),
            Request::Attachment(r) => (
                EntityKind::Attachment,
                match r {
                    AttachmentRequest::List { .. } => "list",
                    AttachmentRequest::Add { .. } => "add",
                    AttachmentRequest::Upload { .. } => "upload",
                },
            ),
        }
    }

    /// Shape of the resource this request returns, or `None` when it only
    /// reports a success message.
    pub fn expected_kind(&self) -> Option<ResourceKind> {
        use ResourceKind as K;
        match self {
            Request::Board(BoardRequest::List) => Some(K::Boards),
            Request::Board(BoardRequest::Get { .. } | BoardRequest::Create { .. }) => Some(K::Board),
            Request::Board(_) => None,
            Request::List(ListRequest::List { .. }) => Some(K::Lists),
            Request::List(ListRequest::Get { .. } | ListRequest::Create { .. }) => Some(K::List),
            Request::List(ListRequest::Archive { .. }) => None,
            Request::Card(CardRequest::List { .. }) => Some(K::Cards),
            Request::Card(CardRequest::Get { .. } | CardRequest::Create(_)) => Some(K::Card),
            Request::Card(_) => None,
            Request::Label(LabelRequest::List { .. }) => Some(K::Labels),
            Request::Label(LabelRequest::Get { .. } | LabelRequest::Create { .. }) => Some(K::Label),
            Request::Label(LabelRequest::Add { .. }) => None,
            Request::Checklist(ChecklistRequest::List { .. }) => Some(K::Checklists),
            Request::Checklist(ChecklistRequest::Get { .. } | ChecklistRequest::Create { .. }) => {
                Some(K::Checklist)
            }
            Request::Checklist(ChecklistRequest::AddItem { .. } | ChecklistRequest::SetItem { .. }) => {
                Some(K::CheckItem)
            }
            Request::Member(MemberRequest::Get { .. }) => Some(K::Member),
            Request::Member(MemberRequest::Boards { .. }) => Some(K::Boards),
            Request::Attachment(AttachmentRequest::List { .. }) => Some(K::Attachments),
            Request::Attachment(_) => Some(K::Attachment),
        }
    }
}

fn position(op: &Operation) -> Result<Option<Position>, ValidationError> {
    let invalid = |value: String| ValidationError::InvalidValue {
        field: "pos",
        value,
        expected: "top, bottom or a number",
    };
    match op.data.get("pos") {
        None | Some(Value::Null) => match op.parameters.get("pos") {
            Some(s) => s.parse().map(Some).map_err(|_| invalid(s.clone())),
            None => Ok(None),
        },
        Some(Value::Number(n)) => n
            .as_f64()
            .map(|n| Some(Position::At(n)))
            .ok_or_else(|| invalid(n.to_string())),
        Some(Value::String(s)) => s.parse().map(Some).map_err(|_| invalid(s.clone())),
        Some(other) => Err(invalid(other.to_string())),
    }
}

fn check_state(value: &str) -> Result<CheckState, ValidationError> {
    CheckState::from_str(value, true).map_err(|_| ValidationError::InvalidValue {
        field: "state",
        value: value.to_string(),
        expected: "complete or incomplete",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn op(kind: &str, action: &str, id: Option<&str>, data: Value) -> Operation {
        Operation {
            kind: kind.into(),
            resource: kind.into(),
            action: action.into(),
            id: id.map(str::to_string),
            data: data.as_object().cloned().unwrap_or_default(),
            parameters: Default::default(),
        }
    }

    fn error(op: &Operation) -> String {
        Request::from_operation(op).unwrap_err().to_string()
    }

    #[test]
    fn empty_board_id_is_rejected() {
        let msg = error(&op("board", "get", Some(""), json!({})));
        assert_eq!(msg, "board ID is required for get action");
    }

    #[test]
    fn missing_shape_fields() {
        let mut o = op("", "get", None, json!({}));
        assert_eq!(error(&o), "operation type is required");
        o.kind = "card".into();
        o.resource.clear();
        assert_eq!(error(&o), "operation resource is required");
        o.resource = "card".into();
        o.action.clear();
        assert_eq!(error(&o), "operation action is required");
    }

    #[test]
    fn unknown_type_lists_valid_types() {
        let msg = error(&op("sprint", "get", Some("x"), json!({})));
        assert!(msg.starts_with("invalid operation type: sprint"));
        assert!(msg.contains("attachment"));
    }

    #[test]
    fn unsupported_action_for_type() {
        let msg = error(&op("member", "delete", Some("m1"), json!({})));
        assert_eq!(msg, "unsupported member action: delete");
    }

    #[test]
    fn every_required_field_is_named() {
        for spec in ACTION_TABLE {
            for missing in spec.required {
                let data: serde_json::Map<String, Value> = spec
                    .required
                    .iter()
                    .filter(|f| *f != missing)
                    .map(|f| (f.to_string(), json!("complete")))
                    .collect();
                let o = Operation {
                    kind: spec.kind.to_string(),
                    resource: spec.kind.to_string(),
                    action: spec.action.to_string(),
                    id: Some("x1".into()),
                    data,
                    parameters: Default::default(),
                };
                let msg = error(&o);
                assert!(
                    msg.contains(missing),
                    "{} {}: {msg}",
                    spec.kind,
                    spec.action
                );
            }
        }
    }

    #[test]
    fn member_id_message() {
        let msg = error(&op("member", "boards", None, json!({})));
        assert_eq!(msg, "member ID or username is required for boards action");
    }

    #[test]
    fn label_add_names_card_id() {
        let msg = error(&op("label", "add", None, json!({ "label_id": "l1" })));
        assert_eq!(msg, "card_id is required for add action on label");
    }

    #[test]
    fn non_string_field_is_rejected() {
        let msg = error(&op("board", "create", None, json!({ "name": 42 })));
        assert_eq!(msg, "name must be a string for create action on board");
    }

    #[test]
    fn builds_typed_card_create() {
        let o = op(
            "card",
            "create",
            None,
            json!({ "name": "Task", "list_id": "l1", "desc": "details", "pos": "top" }),
        );
        let request = Request::from_operation(&o).unwrap();
        assert_eq!(
            request,
            Request::Card(CardRequest::Create(NewCard {
                list_id: "l1".into(),
                name: "Task".into(),
                desc: Some("details".into()),
                pos: Some(Position::Top),
            }))
        );
        assert_eq!(request.expected_kind(), Some(ResourceKind::Card));
        assert_eq!(request.name(), (EntityKind::Card, "create"));
    }

    #[test]
    fn member_boards_render_as_boards() {
        let request = Request::from_operation(&op("member", "boards", Some("me"), json!({}))).unwrap();
        assert_eq!(request.expected_kind(), Some(ResourceKind::Boards));
    }

    #[test]
    fn numeric_position() {
        let o = op("card", "create", None, json!({ "name": "T", "list_id": "l1", "pos": 3.5 }));
        match Request::from_operation(&o).unwrap() {
            Request::Card(CardRequest::Create(card)) => assert_eq!(card.pos, Some(Position::At(3.5))),
            other => panic!("unexpected request {other:?}"),
        }
        let bad = op("card", "create", None, json!({ "name": "T", "list_id": "l1", "pos": "middle" }));
        assert!(error(&bad).contains("invalid pos value: middle"));
    }

    #[test]
    fn parameters_are_a_fallback() {
        let mut o = op("card", "move", Some("c1"), json!({}));
        o.parameters.insert("list_id".into(), "l9".into());
        assert_eq!(
            Request::from_operation(&o).unwrap(),
            Request::Card(CardRequest::Move {
                id: "c1".into(),
                list_id: "l9".into()
            })
        );
    }

    #[test]
    fn check_item_state_is_checked() {
        let o = op(
            "checklist",
            "set-item",
            None,
            json!({ "card_id": "c1", "item_id": "i1", "state": "done" }),
        );
        assert!(error(&o).contains("invalid state value: done"));
    }
}
