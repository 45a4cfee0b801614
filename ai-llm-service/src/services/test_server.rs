//! One-shot loopback HTTP responder for client tests.

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

/// What the responder saw.
pub struct CapturedRequest {
    /// Request line plus headers, header names lower-cased.
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    /// Value of header `name` (lower-case), if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            (k.trim() == name).then_some(v.trim())
        })
    }
}

/// Binds a random loopback port, answers exactly one request with `status`
/// and a JSON `body`, and yields the captured request.
///
/// Returns the base URL (`http://127.0.0.1:<port>`) and the join handle.
pub async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let head = lower_header_names(&head);
        let content_length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body_bytes = &buf[header_end..(header_end + content_length).min(buf.len())];
        let request_body = String::from_utf8_lossy(body_bytes).to_string();

        let response = format!(
            "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {len}\r\nconnection: close\r\n\r\n{body}",
            reason = reason(status),
            len = body.len(),
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        CapturedRequest {
            head,
            body: request_body,
        }
    });

    (base, handle)
}

fn lower_header_names(head: &str) -> String {
    head.lines()
        .enumerate()
        .map(|(i, line)| match line.split_once(':') {
            Some((k, v)) if i > 0 => format!("{}:{}", k.to_ascii_lowercase(), v),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
