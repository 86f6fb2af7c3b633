use crate::data::store::PlayerStore;
use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }

    fn json(body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }
}

pub fn route_request(store: &PlayerStore, method: &str, path: &str, body: &str) -> HttpResponse {
    let route = path.split('?').next().unwrap_or(path);
    match (method, route) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/player") => match api::player_payload(store) {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("PUT", "/api/player") => match api::player_put_payload(store, body) {
            Ok(payload) => HttpResponse::json(payload),
            Err(api::UploadError::Player(err)) => {
                tracing::warn!(error = %err, "rejected player upload");
                error_response(400, "Bad Request", &err.to_string())
            }
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/brawlers") => match api::brawlers_payload(store, path) {
            Ok(payload) => HttpResponse::json(payload),
            Err(api::GalleryPayloadError::Query(err)) => {
                error_response(400, "Bad Request", &err.to_string())
            }
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", route) if route.starts_with("/api/brawlers/") => {
            let id = route.trim_start_matches("/api/brawlers/").trim_end_matches('/');
            match api::brawler_detail_payload(store, id) {
                Ok(payload) => HttpResponse::json(payload),
                Err(api::DetailError::NotFound) => {
                    error_response(404, "Not Found", "Brawler not found")
                }
                Err(err @ api::DetailError::InvalidId(_)) => {
                    error_response(400, "Bad Request", &err.to_string())
                }
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        ("POST", "/api/totals") => match api::totals_payload(store, body) {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => {
                let message = format!("Invalid request body: {err}");
                error_response(400, "Bad Request", &message)
            }
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Brawlview API Console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    input { width: 100%; padding: 8px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
  </style>
</head>
<body>
  <h1>Brawlview Local API</h1>

  <div class="card">
    <strong>Brawlers</strong>
    <label for="search">Search</label>
    <input id="search" placeholder="Search brawlers..." />
    <div><button id="brawlers-btn">GET /api/brawlers</button></div>
  </div>

  <div class="card">
    <strong>Totals</strong>
    <label for="gold">Current gold</label>
    <input id="gold" value="0" />
    <label for="pp">Current power points</label>
    <input id="pp" value="0" />
    <div><button id="totals-btn">POST /api/totals</button></div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');

    async function request(path, options) {
      output.textContent = 'Loading…';
      const response = await fetch(path, options);
      output.textContent = 'HTTP ' + response.status + '\n' + await response.text();
    }

    document.getElementById('brawlers-btn').addEventListener('click', () => {
      const q = document.getElementById('search').value;
      request('/api/brawlers?q=' + encodeURIComponent(q), { method: 'GET' });
    });

    document.getElementById('totals-btn').addEventListener('click', () => {
      request('/api/totals', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({
          current_gold: document.getElementById('gold').value,
          current_power_points: document.getElementById('pp').value,
        }),
      });
    });
  </script>
</body>
</html>
"#
    .to_string()
}
