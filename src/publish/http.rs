//! Blocking HTTP client for the publishing service.
//!
//! | Step | Request | Success |
//! |---|---|---|
//! | authenticate | `POST {endpoint}/login` JSON `{username, password}` | `{"token": "..."}` |
//! | upload | `POST {endpoint}/media` multipart `file` + `caption`, bearer token | `{"id": ...}` |
//! | close | `POST {endpoint}/logout`, bearer token | any 2xx |
//!
//! Transport failures map to [`PublishError::Network`]; a non-2xx login to
//! [`PublishError::Auth`]; a non-2xx upload to [`PublishError::Rejected`].

use super::PublishError;
use super::service::{Credentials, PostId, PublishingService};
use reqwest::blocking::{Client, Response, multipart};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct HttpService {
    client: Client,
    endpoint: String,
}

/// Bearer token returned by a successful login.
pub struct HttpSession {
    token: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// The id comes back as a number from some deployments and a string from others.
#[derive(Deserialize)]
struct UploadResponse {
    id: serde_json::Value,
}

fn network(e: reqwest::Error) -> PublishError {
    PublishError::Network(e.to_string())
}

fn describe_failure(res: Response) -> String {
    let status = res.status();
    let body = res.text().unwrap_or_default();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{status} - {body}")
    }
}

impl HttpService {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(network)?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }
}

impl PublishingService for HttpService {
    type Session = HttpSession;

    fn authenticate(&self, credentials: &Credentials) -> Result<HttpSession, PublishError> {
        let res = self
            .client
            .post(self.url("login"))
            .json(&LoginRequest {
                username: &credentials.identity,
                password: &credentials.secret,
            })
            .send()
            .map_err(network)?;
        if !res.status().is_success() {
            return Err(PublishError::Auth(describe_failure(res)));
        }
        let login: LoginResponse = res
            .json()
            .map_err(|e| PublishError::Auth(format!("unexpected login response: {e}")))?;
        Ok(HttpSession { token: login.token })
    }

    fn upload(
        &self,
        session: &HttpSession,
        image: Vec<u8>,
        caption: &str,
    ) -> Result<PostId, PublishError> {
        let part = multipart::Part::bytes(image)
            .file_name("upload.jpg")
            .mime_str("image/jpeg")
            .map_err(network)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("caption", caption.to_string());

        let res = self
            .client
            .post(self.url("media"))
            .bearer_auth(&session.token)
            .multipart(form)
            .send()
            .map_err(network)?;
        if !res.status().is_success() {
            return Err(PublishError::Rejected(describe_failure(res)));
        }
        let uploaded: UploadResponse = res
            .json()
            .map_err(|e| PublishError::Rejected(format!("unexpected upload response: {e}")))?;
        let id = match uploaded.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(PostId(id))
    }

    fn close(&self, session: HttpSession) {
        let result = self
            .client
            .post(self.url("logout"))
            .bearer_auth(&session.token)
            .send();
        match result {
            Ok(res) if res.status().is_success() => {}
            Ok(res) => log::warn!("Logout failed: {}", describe_failure(res)),
            Err(e) => log::warn!("Logout failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serve canned `(status, json body)` replies, one connection each.
    /// The handle yields each request line with its body.
    fn serve(replies: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<(String, String)>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in replies {
                let (mut stream, _) = listener.accept().unwrap();
                seen.push(read_request(&mut stream));
                let reply = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(reply.as_bytes()).unwrap();
            }
            seen
        });
        (format!("http://{addr}/api/"), handle)
    }

    fn read_request(stream: &mut std::net::TcpStream) -> (String, String) {
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                length = v.trim().parse().unwrap();
            }
        }
        let mut body = vec![0; length];
        reader.read_exact(&mut body).unwrap();
        (
            request_line.trim().to_string(),
            String::from_utf8_lossy(&body).to_string(),
        )
    }

    fn service(endpoint: &str) -> HttpService {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpService::with_client(client, endpoint)
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let svc =
            HttpService::new("https://posts.example.com/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(svc.url("login"), "https://posts.example.com/api/login");
    }

    #[test]
    fn login_upload_logout_round() {
        let (endpoint, server) = serve(vec![
            (200, r#"{"token":"abc123"}"#),
            (201, r#"{"id":1789}"#),
            (200, "{}"),
        ]);
        let svc = service(&endpoint);

        let session = svc
            .authenticate(&Credentials::new("gallery", "pw"))
            .unwrap();
        let id = svc
            .upload(&session, b"jpeg".to_vec(), "sunset #bw")
            .unwrap();
        svc.close(session);

        assert_eq!(id, PostId("1789".into()));
        let seen = server.join().unwrap();
        assert_eq!(seen[0].0, "POST /api/login HTTP/1.1");
        assert!(seen[0].1.contains(r#""username":"gallery""#));
        assert_eq!(seen[1].0, "POST /api/media HTTP/1.1");
        assert!(seen[1].1.contains("sunset #bw"));
        assert_eq!(seen[2].0, "POST /api/logout HTTP/1.1");
    }

    #[test]
    fn rejected_login_is_auth_error() {
        let (endpoint, server) = serve(vec![(401, r#"{"error":"bad password"}"#)]);

        let result = service(&endpoint).authenticate(&Credentials::new("gallery", "nope"));

        match result {
            Err(PublishError::Auth(msg)) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other.map(|_| ())),
        }
        server.join().unwrap();
    }

    #[test]
    fn rejected_upload_is_rejected_error() {
        let (endpoint, server) = serve(vec![(422, r#"{"error":"aspect ratio"}"#)]);
        let svc = service(&endpoint);
        let session = HttpSession {
            token: "abc".into(),
        };

        let result = svc.upload(&session, b"jpeg".to_vec(), "x");

        assert!(matches!(result, Err(PublishError::Rejected(msg)) if msg.contains("aspect ratio")));
        server.join().unwrap();
    }

    #[test]
    fn string_post_id_is_kept_verbatim() {
        let (endpoint, server) = serve(vec![(200, r#"{"id":"C0ffee_1"}"#)]);
        let svc = service(&endpoint);
        let session = HttpSession {
            token: "abc".into(),
        };

        let id = svc.upload(&session, vec![1, 2, 3], "x").unwrap();
        assert_eq!(id, PostId("C0ffee_1".into()));
        server.join().unwrap();
    }

    #[test]
    fn unreachable_endpoint_is_network_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let svc = service(&format!("http://127.0.0.1:{port}"));

        let result = svc.authenticate(&Credentials::new("gallery", "pw"));
        assert!(matches!(result, Err(PublishError::Network(_))));
    }
}
