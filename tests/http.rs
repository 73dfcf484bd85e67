//! `HttpClient` against a one-shot HTTP server on a loopback port. Each test
//! checks the method, path and query the client actually sends.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use tempfile::TempDir;

use trello_cli::api::{HttpClient, TrelloApi};
use trello_cli::config::{AuthConfig, AuthSource};
use trello_cli::error::Error;
use trello_cli::request::CheckState;

/// What the server saw.
struct Seen {
    method: String,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Seen {
    fn param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    fn assert_authenticated(&self) {
        assert_eq!(self.param("key"), Some("k"), "query: {:?}", self.query);
        assert_eq!(self.param("token"), Some("t"), "query: {:?}", self.query);
    }
}

/// Accepts one connection, records the request and answers with `status`
/// and a JSON `reply`. Returns the base URL to point the client at.
fn serve_once(status: &'static str, reply: &'static str) -> (String, JoinHandle<Seen>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let mut parts = line.split_whitespace();
        let method = parts.next().unwrap().to_string();
        let target = parts.next().unwrap().to_string();
        let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));
        let query = query
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| {
                let (k, v) = p.split_once('=').unwrap_or((p, ""));
                (k.to_string(), v.to_string())
            })
            .collect();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.push((k.trim().to_ascii_lowercase(), v.trim().to_string()));
            }
        }

        let seen_header = |name: &str| headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone());
        let body = if seen_header("transfer-encoding").is_some_and(|v| v.contains("chunked")) {
            read_chunked(&mut reader)
        } else {
            let len = seen_header("content-length").map_or(0, |v| v.parse().unwrap());
            let mut body = vec![0; len];
            reader.read_exact(&mut body).unwrap();
            body
        };

        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
            reply.len()
        )
        .unwrap();

        Seen {
            method,
            path: path.to_string(),
            query,
            headers,
            body,
        }
    });
    (format!("http://{addr}/1"), handle)
}

fn read_chunked(reader: &mut impl BufRead) -> Vec<u8> {
    let mut body = Vec::new();
    loop {
        let mut size = String::new();
        reader.read_line(&mut size).unwrap();
        let size = usize::from_str_radix(size.trim().split(';').next().unwrap(), 16).unwrap();
        let mut chunk = vec![0; size + 2];
        reader.read_exact(&mut chunk).unwrap();
        if size == 0 {
            return body;
        }
        body.extend_from_slice(&chunk[..size]);
    }
}

fn client(base_url: &str) -> HttpClient {
    let auth = AuthConfig {
        api_key: "k".into(),
        token: "t".into(),
        source: AuthSource::Flags,
    };
    HttpClient::with_base_url(&auth, base_url).unwrap()
}

#[test]
fn set_check_item_state_puts_state() {
    let (url, server) = serve_once("200 OK", r#"{"id":"i1","name":"Write tests","state":"complete"}"#);
    let item = client(&url)
        .set_check_item_state("c1", "i1", CheckState::Complete)
        .unwrap();
    let seen = server.join().unwrap();

    assert_eq!(seen.method, "PUT");
    assert_eq!(seen.path, "/1/cards/c1/checkItem/i1");
    assert_eq!(seen.param("state"), Some("complete"));
    seen.assert_authenticated();
    assert!(item.is_complete());
}

#[test]
fn add_label_posts_label_id() {
    let (url, server) = serve_once("200 OK", r#"["l1"]"#);
    client(&url).add_label_to_card("c1", "l1").unwrap();
    let seen = server.join().unwrap();

    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/1/cards/c1/idLabels");
    assert_eq!(seen.param("value"), Some("l1"));
    seen.assert_authenticated();
}

#[test]
fn copy_card_names_the_source() {
    let (url, server) = serve_once("200 OK", r#"{"id":"c2","name":"Release notes","idList":"l2"}"#);
    let card = client(&url).copy_card("c1", "l2").unwrap();
    let seen = server.join().unwrap();

    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/1/cards");
    assert_eq!(seen.param("idCardSource"), Some("c1"));
    assert_eq!(seen.param("idList"), Some("l2"));
    assert_eq!(seen.param("keepFromSource"), Some("all"));
    seen.assert_authenticated();
    assert_eq!(card.id, "c2");
}

#[test]
fn upload_sends_multipart_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.txt");
    std::fs::write(&path, "quarterly numbers").unwrap();

    let (url, server) = serve_once(
        "200 OK",
        r#"{"id":"a1","name":"report.txt","url":"https://trello.com/a1"}"#,
    );
    let attachment = client(&url).upload_attachment("c1", &path).unwrap();
    let seen = server.join().unwrap();

    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/1/cards/c1/attachments");
    seen.assert_authenticated();
    let content_type = seen.header("content-type").unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="), "{content_type}");
    let body = String::from_utf8_lossy(&seen.body);
    assert!(body.contains(r#"name="file"; filename="report.txt""#), "{body}");
    assert!(body.contains("quarterly numbers"), "{body}");
    assert_eq!(attachment.name, "report.txt");
}

#[test]
fn ids_are_escaped_in_the_path() {
    let (url, server) = serve_once("200 OK", r#"{"id":"abc","name":"Card"}"#);
    client(&url).get_card("abc/../../boards/B1").unwrap();
    let seen = server.join().unwrap();

    assert_eq!(seen.method, "GET");
    assert_eq!(seen.path, "/1/cards/abc%2F..%2F..%2Fboards%2FB1");
    seen.assert_authenticated();
}

#[test]
fn error_status_keeps_the_body() {
    let (url, server) = serve_once("404 Not Found", "The requested resource was not found.");
    let err = client(&url).delete_card("c404").unwrap_err();
    let seen = server.join().unwrap();

    assert_eq!(seen.method, "DELETE");
    assert_eq!(seen.path, "/1/cards/c404");
    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "The requested resource was not found.");
        }
        other => panic!("unexpected error {other}"),
    }
}
