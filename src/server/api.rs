use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::player::{BrawlerId, PlayerError};
use crate::data::store::{PlayerStore, PlayerSummary};
use crate::gallery::{brawler_detail, build_gallery, GalleryError, GalleryQuery};
use crate::totals::{compute_totals, BuffyFlags, HyperchargeFlags, Totals};

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "brawlview-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn player_payload(store: &PlayerStore) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PlayerSummary::from_loaded(&store.current()))
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error("{0}")]
    Serialize(serde_json::Error),
}

pub fn player_put_payload(store: &PlayerStore, body: &str) -> Result<String, UploadError> {
    let loaded = store.replace_from_json(body)?;
    tracing::info!(
        revision = loaded.revision,
        brawlers = loaded.player.brawlers.len(),
        "player record replaced"
    );
    serde_json::to_string_pretty(&PlayerSummary::from_loaded(&loaded))
        .map_err(UploadError::Serialize)
}

#[derive(Debug, thiserror::Error)]
pub enum GalleryPayloadError {
    #[error(transparent)]
    Query(#[from] GalleryError),
    #[error("{0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn brawlers_payload(store: &PlayerStore, path: &str) -> Result<String, GalleryPayloadError> {
    let query = parse_gallery_query(path)?;
    let player = store.player();
    serde_json::to_string_pretty(&build_gallery(&player, &query)).map_err(Into::into)
}

fn parse_gallery_query(path: &str) -> Result<GalleryQuery, GalleryError> {
    Ok(GalleryQuery {
        search: query_param(path, "q").unwrap_or_default(),
        sort: query_param(path, "sort").unwrap_or_default().parse()?,
        columns: query_param(path, "columns").unwrap_or_default().parse()?,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum DetailError {
    #[error("invalid brawler id '{0}'")]
    InvalidId(String),
    #[error("Brawler not found")]
    NotFound,
    #[error("{0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn brawler_detail_payload(store: &PlayerStore, raw_id: &str) -> Result<String, DetailError> {
    let id: BrawlerId = raw_id
        .parse()
        .map_err(|_| DetailError::InvalidId(raw_id.to_string()))?;
    let player = store.player();
    let card = brawler_detail(&player, id).ok_or(DetailError::NotFound)?;
    Ok(serde_json::to_string_pretty(&card)?)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TotalsRequest {
    pub hypercharges: HyperchargeFlags,
    pub buffies: BuffyFlags,
    /// Free text as typed by the user; numbers are accepted too.
    pub current_gold: Option<Value>,
    pub current_power_points: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsResponse {
    pub status: &'static str,
    pub gold: i64,
    pub power_points: i64,
    pub gold_display: String,
    pub power_points_display: String,
    pub brawler_count: usize,
}

impl TotalsResponse {
    fn new(totals: Totals, brawler_count: usize) -> Self {
        Self {
            status: "ok",
            gold: totals.gold,
            power_points: totals.power_points,
            gold_display: totals.gold_display(),
            power_points_display: totals.power_points_display(),
            brawler_count,
        }
    }
}

/// An empty body is treated as `{}`: no flags set, both base inputs 0.
pub fn totals_payload(store: &PlayerStore, body: &str) -> Result<String, serde_json::Error> {
    let request: TotalsRequest = if body.trim().is_empty() {
        TotalsRequest::default()
    } else {
        serde_json::from_str(body)?
    };
    let player = store.player();
    let totals = compute_totals(
        &player.brawlers,
        &request.hypercharges,
        &request.buffies,
        &input_text(request.current_gold.as_ref()),
        &input_text(request.current_power_points.as_ref()),
    );
    serde_json::to_string_pretty(&TotalsResponse::new(totals, player.brawlers.len()))
}

fn input_text(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// First value for `name` in the query string, percent-decoded.
pub fn query_param(path: &str, name: &str) -> Option<String> {
    let query = path.split_once('?').map(|(_, q)| q)?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == name).then(|| percent_decode(value))
    })
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'+' => out.push(b' '),
            b'%' if index + 2 < bytes.len() => {
                match (hex_value(bytes[index + 1]), hex_value(bytes[index + 2])) {
                    (Some(high), Some(low)) => {
                        out.push((high << 4) | low);
                        index += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            other => out.push(other),
        }
        index += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    char::from(byte).to_digit(16).and_then(|digit| u8::try_from(digit).ok())
}
