//! HTTP client for the flashcard backend API.

use super::DataSource;
use crate::error::{AppError, Result};
use crate::models::{Deck, Flashcard, Folder};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Backend client issuing blocking JSON GET requests
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // Normalize URL - no trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::InvalidUrl(base_url));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send()?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(AppError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json()?)
    }
}

impl DataSource for ApiClient {
    fn get_folders(&self) -> Result<Vec<Folder>> {
        self.get_json("api/folder")
    }

    fn get_unfiled_decks(&self) -> Result<Vec<Deck>> {
        self.get_json("api/deck/nofolder")
    }

    fn get_decks_by_folder_id(&self, folder_id: i64) -> Result<Vec<Deck>> {
        self.get_json(&format!("api/deck/byfolder/{}", folder_id))
    }

    fn get_deck_by_id(&self, deck_id: i64) -> Result<Deck> {
        self.get_json(&format!("api/deck/{}", deck_id))
    }

    fn get_flashcards_by_deck_id(&self, deck_id: i64) -> Result<Vec<Flashcard>> {
        self.get_json(&format!("api/flashcard/bydeck/{}", deck_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers a single request on a loopback port with a canned response.
    /// Returns the base URL and a handle yielding the request line received.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (base_url, handle)
    }

    fn client_for(base_url: &str) -> ApiClient {
        ApiClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_not_found_status() {
        let (base_url, server) = serve_once("404 Not Found", "");
        let result = client_for(&base_url).get_deck_by_id(3);

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(server.join().unwrap().starts_with("GET /api/deck/3 "));
    }

    #[test]
    fn test_server_error_status() {
        let (base_url, server) = serve_once("500 Internal Server Error", "database offline");
        let result = client_for(&base_url).get_folders();

        match result {
            Err(AppError::Server { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "database offline");
            }
            other => panic!("expected server error, got {:?}", other.map(|f| f.len())),
        }
        assert!(server.join().unwrap().starts_with("GET /api/folder "));
    }

    #[test]
    fn test_decodes_deck_without_folder() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"DeckId":7,"DeckName":"Capitals","DeckDescription":"","CreationDate":"2023-10-01T08:00:00","FolderId":null}"#,
        );
        let deck = client_for(&base_url).get_deck_by_id(7).unwrap();

        assert_eq!(deck.id, 7);
        assert_eq!(deck.name, "Capitals");
        assert_eq!(deck.owning_folder(), None);
        assert!(server.join().unwrap().starts_with("GET /api/deck/7 "));
    }

    #[test]
    fn test_decodes_flashcards_for_deck() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"FlashcardId":1,"Question":"Norway","Answer":"Oslo","CreationDate":"2023-10-01","DeckId":7}]"#,
        );
        let cards = client_for(&base_url).get_flashcards_by_deck_id(7).unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].answer, "Oslo");
        assert!(server.join().unwrap().starts_with("GET /api/flashcard/bydeck/7 "));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.url("/api/deck/3"),
            "http://localhost:5000/api/deck/3"
        );
        assert_eq!(
            client.url("api/flashcard/bydeck/3"),
            "http://localhost:5000/api/flashcard/bydeck/3"
        );
    }

    #[test]
    fn test_rejects_non_http_url() {
        let result = ApiClient::new("localhost:5000", Duration::from_secs(5));
        assert!(matches!(result, Err(AppError::InvalidUrl(_))));
    }
}
