use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use crate::data::store::PlayerStore;

pub mod api;
pub mod routes;

/// Uploaded player records can be large; anything beyond this is rejected.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Connections are served one at a time, so a stalled client may hold the
/// loop for at most this long per read or write.
pub const IO_TIMEOUT: Duration = Duration::from_secs(5);

pub fn run_server(bind_addr: &str, store: &PlayerStore) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    tracing::info!("brawlview server listening on http://{bind_addr}");
    serve(&listener, store, IO_TIMEOUT)
}

/// Accept loop over an already bound listener.
pub fn serve(
    listener: &TcpListener,
    store: &PlayerStore,
    io_timeout: Duration,
) -> std::io::Result<()> {
    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, store, io_timeout) {
                    tracing::warn!(error = %err, "request error");
                }
            }
            Err(err) => tracing::warn!(error = %err, "connection failed"),
        }
    }

    Ok(())
}

pub struct ParsedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Read a request line, headers, and a `Content-Length` body.
pub fn read_request(stream: impl Read) -> std::io::Result<Option<ParsedRequest>> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Ok(None);
    }
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET").to_string();
    let path = request_parts.next().unwrap_or("/").to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            break;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    if content_length > MAX_BODY_BYTES {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("request body of {content_length} bytes exceeds {MAX_BODY_BYTES}"),
        ));
    }

    let mut body = vec![0_u8; content_length];
    reader.read_exact(&mut body)?;

    Ok(Some(ParsedRequest {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}

fn handle_connection(
    stream: &mut TcpStream,
    store: &PlayerStore,
    io_timeout: Duration,
) -> std::io::Result<()> {
    stream.set_read_timeout(Some(io_timeout))?;
    stream.set_write_timeout(Some(io_timeout))?;

    let Some(request) = read_request(&mut *stream)? else {
        return Ok(());
    };
    tracing::debug!(method = %request.method, path = %request.path, "request");

    let response = routes::route_request(store, &request.method, &request.path, &request.body)
        .to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}
