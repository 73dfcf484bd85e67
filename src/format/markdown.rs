use std::fmt::Write as _;

use super::{truncate_to_token_limit, FormatError, FormatOptions, Formatter};
use crate::models::{
    Attachment, Board, Card, CheckItem, Checklist, Label, List, Member, Resource,
};

const BOARD_DESC_PREVIEW: usize = 100;
const CARD_DESC_PREVIEW: usize = 150;

/// Human-oriented Markdown. Id and name are always rendered; every other
/// section needs `--verbose` or its name in `--fields`.
pub struct MarkdownFormatter {
    options: FormatOptions,
}

impl MarkdownFormatter {
    pub fn new(options: FormatOptions) -> Self {
        MarkdownFormatter { options }
    }

    fn shows(&self, field: &str) -> bool {
        self.options.shows(field)
    }

    fn board(&self, out: &mut String, b: &Board) {
        let _ = write!(out, "# Board: {}\n\n**ID:** `{}`\n\n", b.name, b.id);
        if self.shows("desc") && !b.desc.is_empty() {
            let _ = write!(out, "**Description:** {}\n\n", b.desc);
        }
        if self.shows("url") {
            let _ = write!(out, "**URL:** {}\n\n", b.url);
        }
        if self.shows("closed") {
            let _ = write!(out, "**Closed:** {}\n\n", b.closed);
        }
        if self.shows("dateLastActivity") {
            if let Some(date) = &b.date_last_activity {
                let _ = write!(out, "**Last Activity:** {date}\n\n");
            }
        }
    }

    fn boards(&self, out: &mut String, boards: &[Board]) {
        let _ = write!(out, "# Boards ({})\n\n", boards.len());
        for b in boards {
            let _ = write!(out, "## {} [{}]\n- **ID:** `{}`\n", b.name, status(b.closed), b.id);
            if self.shows("desc") && !b.desc.is_empty() {
                let _ = writeln!(out, "- **Description:** {}", preview(&b.desc, BOARD_DESC_PREVIEW));
            }
            if self.shows("url") {
                let _ = writeln!(out, "- **URL:** {}", b.url);
            }
            out.push('\n');
        }
    }

    fn list(&self, out: &mut String, l: &List) {
        let _ = write!(out, "# List: {}\n\n**ID:** `{}`\n\n", l.name, l.id);
        if self.shows("closed") {
            let _ = write!(out, "**Closed:** {}\n\n", l.closed);
        }
        if self.shows("pos") {
            let _ = write!(out, "**Position:** {:.2}\n\n", l.pos);
        }
    }

    fn lists(&self, out: &mut String, lists: &[List]) {
        let _ = write!(out, "# Lists ({})\n\n", lists.len());
        for l in lists {
            let _ = write!(out, "## {} [{}]\n- **ID:** `{}`\n", l.name, status(l.closed), l.id);
            if self.shows("pos") {
                let _ = writeln!(out, "- **Position:** {:.2}", l.pos);
            }
            out.push('\n');
        }
    }

    fn card(&self, out: &mut String, c: &Card) {
        let _ = write!(out, "# Card: {}\n\n**ID:** `{}`\n\n", c.name, c.id);
        if self.shows("desc") && !c.desc.is_empty() {
            let _ = write!(out, "**Description:**\n\n{}\n\n", c.desc);
        }
        if self.shows("url") {
            let _ = write!(out, "**URL:** {}\n\n", c.url);
        }
        if self.shows("due") {
            if let Some(due) = &c.due {
                let _ = write!(out, "**Due:** {due}\n\n");
            }
        }
        if self.shows("labels") && !c.labels.is_empty() {
            out.push_str("**Labels:**\n");
            for label in &c.labels {
                let _ = writeln!(out, "- {}", label.display_name());
            }
            out.push('\n');
        }
        if self.shows("closed") {
            let _ = write!(out, "**Closed:** {}\n\n", c.closed);
        }
    }

    fn cards(&self, out: &mut String, cards: &[Card]) {
        let _ = write!(out, "# Cards ({})\n\n", cards.len());
        for c in cards {
            let _ = write!(out, "## {} [{}]\n- **ID:** `{}`\n", c.name, status(c.closed), c.id);
            if self.shows("desc") && !c.desc.is_empty() {
                let _ = writeln!(out, "- **Description:** {}", preview(&c.desc, CARD_DESC_PREVIEW));
            }
            if self.shows("labels") && !c.labels.is_empty() {
                let names: Vec<String> = c.labels.iter().map(Label::display_name).collect();
                let _ = writeln!(out, "- **Labels:** {}", names.join(", "));
            }
            if self.shows("due") {
                if let Some(due) = &c.due {
                    // Date part of the ISO timestamp.
                    let _ = writeln!(out, "- **Due:** {}", due.get(..10).unwrap_or(due.as_str()));
                }
            }
            out.push('\n');
        }
    }

    fn label(&self, out: &mut String, l: &Label) {
        let _ = write!(out, "# Label: {}\n\n**ID:** `{}`\n\n", l.display_name(), l.id);
        if self.shows("idBoard") && !l.id_board.is_empty() {
            let _ = write!(out, "**Board:** `{}`\n\n", l.id_board);
        }
    }

    fn labels(&self, out: &mut String, labels: &[Label]) {
        let _ = write!(out, "# Labels ({})\n\n", labels.len());
        for l in labels {
            let _ = writeln!(out, "- {} - ID: `{}`", l.display_name(), l.id);
        }
    }

    fn checklist(&self, out: &mut String, cl: &Checklist) {
        let _ = write!(out, "# Checklist: {}\n\n**ID:** `{}`\n\n", cl.name, cl.id);
        if !cl.check_items.is_empty() {
            out.push_str("## Items:\n\n");
            for item in &cl.check_items {
                let _ = writeln!(out, "- {} {}", checkbox(item), item.name);
            }
        }
    }

    fn checklists(&self, out: &mut String, checklists: &[Checklist]) {
        let _ = write!(out, "# Checklists ({})\n\n", checklists.len());
        for cl in checklists {
            let _ = write!(
                out,
                "## {}\n- **ID:** `{}`\n- **Progress:** {}/{} items complete\n",
                cl.name,
                cl.id,
                cl.completed(),
                cl.check_items.len()
            );
            if self.shows("checkItems") {
                for item in &cl.check_items {
                    let _ = writeln!(out, "  - {} {}", checkbox(item), item.name);
                }
            }
            out.push('\n');
        }
    }

    fn check_item(&self, out: &mut String, item: &CheckItem) {
        let _ = write!(
            out,
            "# Check Item: {}\n\n**ID:** `{}`\n\n**State:** {} {}\n\n",
            item.name,
            item.id,
            checkbox(item),
            item.state
        );
    }

    fn member(&self, out: &mut String, m: &Member) {
        let _ = write!(
            out,
            "# Member: {}\n\n**ID:** `{}`\n\n**Username:** {}\n\n",
            m.full_name, m.id, m.username
        );
        if self.shows("url") {
            let _ = write!(out, "**URL:** {}\n\n", m.url);
        }
    }

    fn attachment(&self, out: &mut String, a: &Attachment) {
        let _ = write!(out, "# Attachment: {}\n\n**ID:** `{}`\n\n**URL:** {}\n\n", a.name, a.id, a.url);
        if self.shows("bytes") {
            if let Some(bytes) = a.bytes {
                let _ = write!(out, "**Size:** {bytes} bytes\n\n");
            }
        }
        if self.shows("mimeType") {
            if let Some(mime) = &a.mime_type {
                let _ = write!(out, "**Type:** {mime}\n\n");
            }
        }
    }

    fn attachments(&self, out: &mut String, attachments: &[Attachment]) {
        let _ = write!(out, "# Attachments ({})\n\n", attachments.len());
        for a in attachments {
            let _ = writeln!(out, "- **{}** - [Link]({}) (ID: `{}`)", a.name, a.url, a.id);
        }
    }
}

impl Formatter for MarkdownFormatter {
    fn format(&self, resource: &Resource) -> Result<String, FormatError> {
        let mut out = String::new();
        match resource {
            Resource::Board(b) => self.board(&mut out, b),
            Resource::Boards(bs) => self.boards(&mut out, bs),
            Resource::List(l) => self.list(&mut out, l),
            Resource::Lists(ls) => self.lists(&mut out, ls),
            Resource::Card(c) => self.card(&mut out, c),
            Resource::Cards(cs) => self.cards(&mut out, cs),
            Resource::Label(l) => self.label(&mut out, l),
            Resource::Labels(ls) => self.labels(&mut out, ls),
            Resource::Checklist(cl) => self.checklist(&mut out, cl),
            Resource::Checklists(cls) => self.checklists(&mut out, cls),
            Resource::CheckItem(item) => self.check_item(&mut out, item),
            Resource::Member(m) => self.member(&mut out, m),
            Resource::Attachment(a) => self.attachment(&mut out, a),
            Resource::Attachments(atts) => self.attachments(&mut out, atts),
        }
        Ok(truncate_to_token_limit(out, self.options.max_tokens))
    }

    fn format_success(&self, message: &str) -> String {
        format!("✅ **Success:** {message}\n")
    }
}

fn status(closed: bool) -> &'static str {
    if closed {
        "Archived"
    } else {
        "Active"
    }
}

fn checkbox(item: &CheckItem) -> &'static str {
    if item.is_complete() {
        "[x]"
    } else {
        "[ ]"
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TRUNCATION_MARKER;
    use crate::models::ResourceKind;

    fn plain() -> MarkdownFormatter {
        MarkdownFormatter::new(FormatOptions::default())
    }

    fn item(name: &str, state: &str) -> CheckItem {
        CheckItem {
            name: name.into(),
            state: state.into(),
            ..CheckItem::default()
        }
    }

    #[test]
    fn checklist_items_render_as_checkboxes() {
        let checklist = Checklist {
            id: "cl1".into(),
            name: "Launch".into(),
            check_items: vec![item("Task 1", "complete"), item("Task 2", "incomplete")],
            ..Checklist::default()
        };
        let out = plain().format(&Resource::Checklist(checklist)).unwrap();
        assert!(out.contains("[x] Task 1"));
        assert!(out.contains("[ ] Task 2"));
    }

    #[test]
    fn checklist_progress() {
        let checklist = Checklist {
            name: "QA".into(),
            check_items: vec![item("a", "complete"), item("b", "incomplete"), item("c", "complete")],
            ..Checklist::default()
        };
        let out = plain().format(&Resource::Checklists(vec![checklist])).unwrap();
        assert!(out.contains("# Checklists (1)"));
        assert!(out.contains("2/3 items complete"));
    }

    #[test]
    fn collections_show_archive_status() {
        let cards = vec![
            Card {
                id: "c1".into(),
                name: "Active Card".into(),
                ..Card::default()
            },
            Card {
                id: "c2".into(),
                name: "Archived Card".into(),
                closed: true,
                ..Card::default()
            },
        ];
        let out = plain().format(&Resource::Cards(cards)).unwrap();
        assert!(out.contains("## Active Card [Active]"));
        assert!(out.contains("## Archived Card [Archived]"));
    }

    #[test]
    fn labels_render_name_and_color() {
        let labels = vec![
            Label {
                id: "l1".into(),
                name: "Bug".into(),
                color: Some("red".into()),
                ..Label::default()
            },
            Label {
                id: "l2".into(),
                color: Some("blue".into()),
                ..Label::default()
            },
        ];
        let out = plain().format(&Resource::Labels(labels)).unwrap();
        assert!(out.contains("Bug (red)"));
        assert!(out.contains("(unnamed) (blue)"));
    }

    #[test]
    fn optional_sections_need_verbose_or_field() {
        let card = Card {
            id: "c1".into(),
            name: "Ship".into(),
            desc: "Ship the release".into(),
            url: "https://trello.com/c/c1".into(),
            ..Card::default()
        };

        let out = plain().format(&Resource::Card(card.clone())).unwrap();
        assert!(out.contains("# Card: Ship"));
        assert!(out.contains("`c1`"));
        assert!(!out.contains("Ship the release"));
        assert!(!out.contains("**URL:**"));

        let fields = MarkdownFormatter::new(FormatOptions {
            fields: vec!["desc".into()],
            ..FormatOptions::default()
        });
        let out = fields.format(&Resource::Card(card.clone())).unwrap();
        assert!(out.contains("Ship the release"));
        assert!(!out.contains("**URL:**"));

        let verbose = MarkdownFormatter::new(FormatOptions {
            verbose: true,
            ..FormatOptions::default()
        });
        let out = verbose.format(&Resource::Card(card)).unwrap();
        assert!(out.contains("**URL:** https://trello.com/c/c1"));
        assert!(out.contains("**Closed:** false"));
    }

    #[test]
    fn long_descriptions_are_previewed_in_lists() {
        let board = Board {
            name: "Big".into(),
            desc: "x".repeat(120),
            ..Board::default()
        };
        let f = MarkdownFormatter::new(FormatOptions {
            fields: vec!["desc".into()],
            ..FormatOptions::default()
        });
        let out = f.format(&Resource::Boards(vec![board])).unwrap();
        assert!(out.contains(&format!("{}...", "x".repeat(100))));
        assert!(!out.contains(&"x".repeat(101)));
    }

    #[test]
    fn token_ceiling_truncates_output() {
        let board = Board {
            name: "Roadmap".into(),
            desc: "a very long description ".repeat(20),
            ..Board::default()
        };
        let f = MarkdownFormatter::new(FormatOptions {
            verbose: true,
            max_tokens: 10,
            ..FormatOptions::default()
        });
        let out = f.format(&Resource::Board(board)).unwrap();
        assert!(out.ends_with(TRUNCATION_MARKER));
        assert_eq!(out.chars().count(), 40 + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn same_input_same_output() {
        let member = Member {
            id: "m1".into(),
            username: "ada".into(),
            full_name: "Ada Lovelace".into(),
            ..Member::default()
        };
        let f = plain();
        let a = f.format(&Resource::Member(member.clone())).unwrap();
        let b = f.format(&Resource::Member(member)).unwrap();
        assert_eq!(a, b);
        assert!(a.contains("**Username:** ada"));
    }

    #[test]
    fn type_mismatch_produces_no_output() {
        let err = plain()
            .format_as(ResourceKind::Board, &Resource::Card(Card::default()))
            .unwrap_err();
        assert!(matches!(err, FormatError::TypeMismatch { .. }));
    }
}
