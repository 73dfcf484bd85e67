// Trello entity payloads. Field names follow the API's camelCase JSON so the
// same names work for deserializing responses and for `--fields` filtering.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub url: String,
    pub closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_last_activity: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct List {
    pub id: String,
    pub name: String,
    pub closed: bool,
    pub pos: f64,
    pub id_board: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub url: String,
    pub closed: bool,
    pub pos: f64,
    /// ISO-8601 timestamp as returned by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    pub id_list: String,
    pub id_board: String,
    pub labels: Vec<Label>,
    pub id_labels: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub id_board: String,
}

impl Label {
    /// `name (color)`, or `(unnamed) (color)` for labels without a name.
    pub fn display_name(&self) -> String {
        let name = if self.name.is_empty() {
            "(unnamed)"
        } else {
            self.name.as_str()
        };
        let color = self.color.as_deref().filter(|c| !c.is_empty()).unwrap_or("none");
        format!("{name} ({color})")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Checklist {
    pub id: String,
    pub name: String,
    pub id_card: String,
    pub id_board: String,
    pub check_items: Vec<CheckItem>,
}

impl Checklist {
    pub fn completed(&self) -> usize {
        self.check_items.iter().filter(|i| i.is_complete()).count()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckItem {
    pub id: String,
    pub name: String,
    /// `complete` or `incomplete`.
    pub state: String,
    pub id_checklist: String,
    pub pos: f64,
}

impl CheckItem {
    pub fn is_complete(&self) -> bool {
        self.state == "complete"
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Member {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Any result the formatter knows how to render. Serializes as the inner
/// payload so JSON output carries no wrapper.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Resource {
    Board(Board),
    Boards(Vec<Board>),
    List(List),
    Lists(Vec<List>),
    Card(Card),
    Cards(Vec<Card>),
    Label(Label),
    Labels(Vec<Label>),
    Checklist(Checklist),
    Checklists(Vec<Checklist>),
    CheckItem(CheckItem),
    Member(Member),
    Attachment(Attachment),
    Attachments(Vec<Attachment>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Board,
    Boards,
    List,
    Lists,
    Card,
    Cards,
    Label,
    Labels,
    Checklist,
    Checklists,
    CheckItem,
    Member,
    Attachment,
    Attachments,
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Board(_) => ResourceKind::Board,
            Resource::Boards(_) => ResourceKind::Boards,
            Resource::List(_) => ResourceKind::List,
            Resource::Lists(_) => ResourceKind::Lists,
            Resource::Card(_) => ResourceKind::Card,
            Resource::Cards(_) => ResourceKind::Cards,
            Resource::Label(_) => ResourceKind::Label,
            Resource::Labels(_) => ResourceKind::Labels,
            Resource::Checklist(_) => ResourceKind::Checklist,
            Resource::Checklists(_) => ResourceKind::Checklists,
            Resource::CheckItem(_) => ResourceKind::CheckItem,
            Resource::Member(_) => ResourceKind::Member,
            Resource::Attachment(_) => ResourceKind::Attachment,
            Resource::Attachments(_) => ResourceKind::Attachments,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Board => "board",
            ResourceKind::Boards => "boards",
            ResourceKind::List => "list",
            ResourceKind::Lists => "lists",
            ResourceKind::Card => "card",
            ResourceKind::Cards => "cards",
            ResourceKind::Label => "label",
            ResourceKind::Labels => "labels",
            ResourceKind::Checklist => "checklist",
            ResourceKind::Checklists => "checklists",
            ResourceKind::CheckItem => "check item",
            ResourceKind::Member => "member",
            ResourceKind::Attachment => "attachment",
            ResourceKind::Attachments => "attachments",
        };
        f.write_str(name)
    }
}
