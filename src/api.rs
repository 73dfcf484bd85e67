// API client module: a small blocking HTTP client for the Trello REST API.
// Every call carries the key and token as query parameters. The `TrelloApi`
// trait is what the rest of the crate depends on, so tests can swap in a
// fake without a network.

use std::fs::File;
use std::path::Path;

use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::models::{Attachment, Board, Card, CheckItem, Checklist, Label, List, Member};
use crate::request::{CheckState, NewCard};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

/// Remote operations used by the CLI and batch paths.
pub trait TrelloApi {
    fn my_boards(&self) -> Result<Vec<Board>>;
    fn get_board(&self, id: &str) -> Result<Board>;
    fn create_board(&self, name: &str, desc: Option<&str>) -> Result<Board>;
    fn delete_board(&self, id: &str) -> Result<()>;
    fn add_board_member(&self, board_id: &str, email: &str) -> Result<()>;
    fn board_lists(&self, board_id: &str) -> Result<Vec<List>>;
    fn board_labels(&self, board_id: &str) -> Result<Vec<Label>>;

    fn get_list(&self, id: &str) -> Result<List>;
    fn create_list(&self, board_id: &str, name: &str) -> Result<List>;
    fn archive_list(&self, id: &str) -> Result<List>;
    fn list_cards(&self, list_id: &str) -> Result<Vec<Card>>;

    fn get_card(&self, id: &str) -> Result<Card>;
    fn create_card(&self, card: &NewCard) -> Result<Card>;
    fn move_card(&self, id: &str, list_id: &str) -> Result<Card>;
    fn copy_card(&self, id: &str, list_id: &str) -> Result<Card>;
    fn delete_card(&self, id: &str) -> Result<()>;
    fn archive_card(&self, id: &str) -> Result<Card>;

    fn get_label(&self, id: &str) -> Result<Label>;
    fn create_label(&self, board_id: &str, name: &str, color: &str) -> Result<Label>;
    fn add_label_to_card(&self, card_id: &str, label_id: &str) -> Result<()>;

    fn card_checklists(&self, card_id: &str) -> Result<Vec<Checklist>>;
    fn get_checklist(&self, id: &str) -> Result<Checklist>;
    fn create_checklist(&self, card_id: &str, name: &str) -> Result<Checklist>;
    fn add_check_item(&self, checklist_id: &str, name: &str) -> Result<CheckItem>;
    fn set_check_item_state(&self, card_id: &str, item_id: &str, state: CheckState) -> Result<CheckItem>;

    fn get_member(&self, id: &str) -> Result<Member>;
    fn member_boards(&self, id: &str) -> Result<Vec<Board>>;

    fn card_attachments(&self, card_id: &str) -> Result<Vec<Attachment>>;
    fn add_url_attachment(&self, card_id: &str, url: &str, name: Option<&str>) -> Result<Attachment>;
    fn upload_attachment(&self, card_id: &str, path: &Path) -> Result<Attachment>;
}

/// Blocking reqwest client holding the base URL and credentials.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    api_key: String,
    token: String,
}

impl HttpClient {
    /// Base URL comes from `TRELLO_API_URL` or defaults to the public API.
    pub fn new(auth: &AuthConfig) -> Result<Self> {
        let base_url = std::env::var("TRELLO_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::with_base_url(auth, base_url)
    }

    pub fn with_base_url(auth: &AuthConfig, base_url: impl Into<String>) -> Result<Self> {
        let raw = base_url.into();
        let invalid = |reason: String| Error::BaseUrl {
            url: raw.clone(),
            reason,
        };
        let base_url = Url::parse(raw.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".into()));
        }

        let client = Client::builder()
            .user_agent(concat!("trello-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpClient {
            client,
            base_url,
            api_key: auth.api_key.clone(),
            token: auth.token.clone(),
        })
    }

    /// Appends `segments` to the base URL. Each one is percent-encoded, so an
    /// id containing `/`, `?` or `#` stays inside its own segment. Empty and
    /// dot segments are refused since the URL parser would drop them.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(Error::InvalidId(bad.to_string()));
        }
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str], params: &[(&str, &str)]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%method, path = url.path(), "calling Trello API");
        Ok(self
            .client
            .request(method, url)
            .query(&[("key", self.api_key.as_str()), ("token", self.token.as_str())])
            .query(params))
    }

    fn checked(&self, req: RequestBuilder) -> Result<Response> {
        let res = req.send()?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }
        Ok(res)
    }

    fn call<T: DeserializeOwned>(&self, method: Method, path: &[&str], params: &[(&str, &str)]) -> Result<T> {
        let res = self.checked(self.request(method, path, params)?)?;
        Ok(res.json()?)
    }

    fn call_unit(&self, method: Method, path: &[&str], params: &[(&str, &str)]) -> Result<()> {
        self.checked(self.request(method, path, params)?)?;
        Ok(())
    }
}

impl TrelloApi for HttpClient {
    fn my_boards(&self) -> Result<Vec<Board>> {
        self.member_boards("me")
    }

    fn get_board(&self, id: &str) -> Result<Board> {
        self.call(Method::GET, &["boards", id], &[])
    }

    fn create_board(&self, name: &str, desc: Option<&str>) -> Result<Board> {
        let mut params = vec![("name", name)];
        if let Some(desc) = desc {
            params.push(("desc", desc));
        }
        self.call(Method::POST, &["boards"], &params)
    }

    fn delete_board(&self, id: &str) -> Result<()> {
        self.call_unit(Method::DELETE, &["boards", id], &[])
    }

    fn add_board_member(&self, board_id: &str, email: &str) -> Result<()> {
        self.call_unit(
            Method::PUT,
            &["boards", board_id, "members"],
            &[("email", email), ("type", "normal")],
        )
    }

    fn board_lists(&self, board_id: &str) -> Result<Vec<List>> {
        self.call(Method::GET, &["boards", board_id, "lists"], &[])
    }

    fn board_labels(&self, board_id: &str) -> Result<Vec<Label>> {
        self.call(Method::GET, &["boards", board_id, "labels"], &[])
    }

    fn get_list(&self, id: &str) -> Result<List> {
        self.call(Method::GET, &["lists", id], &[])
    }

    fn create_list(&self, board_id: &str, name: &str) -> Result<List> {
        self.call(Method::POST, &["lists"], &[("name", name), ("idBoard", board_id)])
    }

    fn archive_list(&self, id: &str) -> Result<List> {
        self.call(Method::PUT, &["lists", id, "closed"], &[("value", "true")])
    }

    fn list_cards(&self, list_id: &str) -> Result<Vec<Card>> {
        self.call(Method::GET, &["lists", list_id, "cards"], &[])
    }

    fn get_card(&self, id: &str) -> Result<Card> {
        self.call(Method::GET, &["cards", id], &[])
    }

    fn create_card(&self, card: &NewCard) -> Result<Card> {
        let pos = card.pos.map(|p| p.to_string());
        let mut params = vec![("idList", card.list_id.as_str()), ("name", card.name.as_str())];
        if let Some(desc) = &card.desc {
            params.push(("desc", desc.as_str()));
        }
        if let Some(pos) = &pos {
            params.push(("pos", pos.as_str()));
        }
        self.call(Method::POST, &["cards"], &params)
    }

    fn move_card(&self, id: &str, list_id: &str) -> Result<Card> {
        self.call(Method::PUT, &["cards", id], &[("idList", list_id)])
    }

    fn copy_card(&self, id: &str, list_id: &str) -> Result<Card> {
        self.call(
            Method::POST,
            &["cards"],
            &[("idList", list_id), ("idCardSource", id), ("keepFromSource", "all")],
        )
    }

    fn delete_card(&self, id: &str) -> Result<()> {
        self.call_unit(Method::DELETE, &["cards", id], &[])
    }

    fn archive_card(&self, id: &str) -> Result<Card> {
        self.call(Method::PUT, &["cards", id], &[("closed", "true")])
    }

    fn get_label(&self, id: &str) -> Result<Label> {
        self.call(Method::GET, &["labels", id], &[])
    }

    fn create_label(&self, board_id: &str, name: &str, color: &str) -> Result<Label> {
        self.call(
            Method::POST,
            &["labels"],
            &[("name", name), ("color", color), ("idBoard", board_id)],
        )
    }

    fn add_label_to_card(&self, card_id: &str, label_id: &str) -> Result<()> {
        self.call_unit(
            Method::POST,
            &["cards", card_id, "idLabels"],
            &[("value", label_id)],
        )
    }

    fn card_checklists(&self, card_id: &str) -> Result<Vec<Checklist>> {
        self.call(Method::GET, &["cards", card_id, "checklists"], &[])
    }

    fn get_checklist(&self, id: &str) -> Result<Checklist> {
        self.call(Method::GET, &["checklists", id], &[])
    }

    fn create_checklist(&self, card_id: &str, name: &str) -> Result<Checklist> {
        self.call(Method::POST, &["checklists"], &[("idCard", card_id), ("name", name)])
    }

    fn add_check_item(&self, checklist_id: &str, name: &str) -> Result<CheckItem> {
        self.call(
            Method::POST,
            &["checklists", checklist_id, "checkItems"],
            &[("name", name)],
        )
    }

    fn set_check_item_state(&self, card_id: &str, item_id: &str, state: CheckState) -> Result<CheckItem> {
        self.call(
            Method::PUT,
            &["cards", card_id, "checkItem", item_id],
            &[("state", state.as_str())],
        )
    }

    fn get_member(&self, id: &str) -> Result<Member> {
        self.call(Method::GET, &["members", id], &[])
    }

    fn member_boards(&self, id: &str) -> Result<Vec<Board>> {
        self.call(Method::GET, &["members", id, "boards"], &[])
    }

    fn card_attachments(&self, card_id: &str) -> Result<Vec<Attachment>> {
        self.call(Method::GET, &["cards", card_id, "attachments"], &[])
    }

    fn add_url_attachment(&self, card_id: &str, url: &str, name: Option<&str>) -> Result<Attachment> {
        let mut params = vec![("url", url)];
        if let Some(name) = name {
            params.push(("name", name));
        }
        self.call(Method::POST, &["cards", card_id, "attachments"], &params)
    }

    /// Uploads a local file as multipart/form-data.
    fn upload_attachment(&self, card_id: &str, path: &Path) -> Result<Attachment> {
        let file = File::open(path).map_err(|e| Error::io("failed to open", path, e))?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("attachment")
            .to_string();

        let part = multipart::Part::reader(file)
            .file_name(file_name.clone())
            .mime_str("application/octet-stream")?;
        let form = multipart::Form::new()
            .text("name", file_name)
            .part("file", part);

        let req = self
            .request(Method::POST, &["cards", card_id, "attachments"], &[])?
            .multipart(form);
        Ok(self.checked(req)?.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthSource;

    fn auth() -> AuthConfig {
        AuthConfig {
            api_key: "k".into(),
            token: "t".into(),
            source: AuthSource::Flags,
        }
    }

    #[test]
    fn trims_trailing_slash() {
        let client = HttpClient::with_base_url(&auth(), "http://localhost:9999/1/").unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:9999/1");
        let url = client.endpoint(&["boards", "b1", "lists"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9999/1/boards/b1/lists");
    }

    #[test]
    fn ids_stay_inside_their_segment() {
        let client = HttpClient::with_base_url(&auth(), "http://localhost:9999/1").unwrap();
        let url = client.endpoint(&["cards", "abc/../../boards/B1"]).unwrap();
        assert_eq!(url.path(), "/1/cards/abc%2F..%2F..%2Fboards%2FB1");
        let url = client.endpoint(&["cards", "c1?closed=true#x"]).unwrap();
        assert_eq!(url.path(), "/1/cards/c1%3Fclosed=true%23x");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn dot_and_empty_ids_are_refused() {
        let client = HttpClient::with_base_url(&auth(), "http://localhost:9999/1").unwrap();
        for id in ["", ".", ".."] {
            let err = client.delete_card(id).unwrap_err();
            assert!(matches!(err, Error::InvalidId(_)), "{err}");
        }
    }

    #[test]
    fn rejects_malformed_base_url() {
        let err = HttpClient::with_base_url(&auth(), "not a url").err().unwrap();
        assert!(matches!(err, Error::BaseUrl { .. }), "{err}");
    }

    #[test]
    fn transport_errors_hide_credentials() {
        let secret = AuthConfig {
            api_key: "SECRETKEY".into(),
            token: "SECRETTOKEN".into(),
            source: AuthSource::Flags,
        };
        let client = HttpClient::with_base_url(&secret, "http://127.0.0.1:9/1").unwrap();
        let err = client.get_card("c1").unwrap_err();
        for text in [err.to_string(), format!("{:#}", anyhow::Error::new(err))] {
            assert!(!text.contains("SECRETKEY"), "{text}");
            assert!(!text.contains("SECRETTOKEN"), "{text}");
        }
    }

    #[test]
    fn transport_error_chain_is_not_repeated() {
        let client = HttpClient::with_base_url(&auth(), "http://127.0.0.1:9/1").unwrap();
        let err = client.get_card("c1").unwrap_err();
        assert_eq!(err.to_string(), "HTTP request failed");
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches("error sending request").count(), 1, "{chain}");
    }

    #[test]
    fn unreachable_server_is_an_http_error() {
        // Port 9 (discard) is closed on test machines; the call fails fast.
        let client = HttpClient::with_base_url(&auth(), "http://127.0.0.1:9/1").unwrap();
        let err = client.get_board("b1").unwrap_err();
        assert!(matches!(err, Error::Http(_)), "{err}");
    }

    #[test]
    fn upload_of_missing_file_names_path() {
        let client = HttpClient::with_base_url(&auth(), "http://127.0.0.1:9/1").unwrap();
        let err = client
            .upload_attachment("c1", Path::new("/nonexistent/report.pdf"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/report.pdf"));
    }
}
