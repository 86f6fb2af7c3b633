use brawlview::data::player::load_player;
use brawlview::data::store::PlayerStore;
use brawlview::server::routes::route_request;

fn store() -> PlayerStore {
    PlayerStore::new(load_player("data/player.json").expect("sample record should load"))
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("response should be valid json")
}

#[test]
fn health_endpoint_returns_ok_json() {
    let response = route_request(&store(), "GET", "/api/health", "");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
}

#[test]
fn index_serves_console_page() {
    let response = route_request(&store(), "GET", "/", "");
    assert_eq!(response.status_code, 200);
    assert!(response.content_type.starts_with("text/html"));
    assert!(response.body.contains("/api/totals"));
}

#[test]
fn player_endpoint_summarises_record() {
    let response = route_request(&store(), "GET", "/api/player", "");
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    assert_eq!(payload["name"], "IWantCrow");
    assert_eq!(payload["name_color"], "#1ba5f5");
    assert_eq!(payload["club"], "Murder Crows");
    assert_eq!(payload["three_vs_three_victories"], 1834);
    assert_eq!(payload["brawler_count"], 4);
    assert_eq!(payload["revision"], 1);
}

#[test]
fn totals_endpoint_applies_flags_and_base_inputs() {
    let body = r#"{
        "hypercharges": { "16000012": true },
        "buffies": { "16000000": { "hyper": true, "gadget": true, "starPower": true } },
        "current_gold": "1000",
        "current_power_points": 250
    }"#;
    let response = route_request(&store(), "POST", "/api/totals", body);
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    assert_eq!(payload["gold"], 30530 + 5000 + 3000 + 1000);
    assert_eq!(payload["power_points"], 7480 + 6000 + 250);
    assert_eq!(payload["gold_display"], "39,530");
    assert_eq!(payload["power_points_display"], "13,730");
}

#[test]
fn totals_endpoint_accepts_empty_body_and_bad_text() {
    let store = store();
    let empty = json(&route_request(&store, "POST", "/api/totals", "").body);
    let junk = json(
        &route_request(
            &store,
            "POST",
            "/api/totals",
            r#"{"current_gold":"abc","current_power_points":""}"#,
        )
        .body,
    );
    assert_eq!(empty["gold"], 30530);
    assert_eq!(empty, junk);
}

#[test]
fn totals_endpoint_rejects_invalid_json() {
    let response = route_request(&store(), "POST", "/api/totals", "{bad json}");
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("Invalid request body"));
}

#[test]
fn brawlers_endpoint_filters_sorts_and_chunks() {
    let response = route_request(
        &store(),
        "GET",
        "/api/brawlers?q=&sort=trophies&columns=2",
        "",
    );
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    assert_eq!(payload["columns"], 2);
    assert_eq!(payload["matched"], 4);
    let rows = payload["rows"].as_array().expect("rows should be an array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0]["name"], "CROW");
    assert_eq!(rows[0][1]["name"], "SHELLY");
    assert_eq!(rows[1][1]["name"], "BROCK");

    let response = route_request(&store(), "GET", "/api/brawlers?q=cRo", "");
    let payload = json(&response.body);
    assert_eq!(payload["matched"], 1);
    assert_eq!(payload["rows"][0][0]["id"], 16000012);
}

#[test]
fn brawlers_endpoint_reports_empty_search() {
    let response = route_request(&store(), "GET", "/api/brawlers?q=mortis", "");
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    assert_eq!(payload["matched"], 0);
    assert_eq!(payload["empty_message"], "No brawlers found for \"mortis\"");
}

#[test]
fn brawlers_endpoint_rejects_bad_query() {
    let response = route_request(&store(), "GET", "/api/brawlers?sort=speed", "");
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("unknown sort key"));

    let response = route_request(&store(), "GET", "/api/brawlers?columns=4", "");
    assert_eq!(response.status_code, 400);
}

#[test]
fn brawler_detail_endpoint() {
    let store = store();
    let response = route_request(&store, "GET", "/api/brawlers/16000000", "");
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    assert_eq!(payload["name"], "SHELLY");
    assert_eq!(payload["rank_tier"], "legendary");
    assert_eq!(payload["gears"][0], "SPEED Lv3");

    let missing = route_request(&store, "GET", "/api/brawlers/42", "");
    assert_eq!(missing.status_code, 404);

    let invalid = route_request(&store, "GET", "/api/brawlers/crow", "");
    assert_eq!(invalid.status_code, 400);
}

#[test]
fn upload_replaces_in_memory_record() {
    let store = store();
    let upload = r#"{"name":"Uploaded","brawlers":[{"id":1,"name":"NITA","power":11}]}"#;
    let response = route_request(&store, "PUT", "/api/player", upload);
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    assert_eq!(payload["name"], "Uploaded");
    assert_eq!(payload["revision"], 2);

    let totals = json(&route_request(&store, "POST", "/api/totals", "{}").body);
    assert_eq!(totals["gold"], 7765);
    assert_eq!(totals["power_points"], 3740);
}

#[test]
fn invalid_upload_is_rejected_and_record_kept() {
    let store = store();
    let response = route_request(&store, "PUT", "/api/player", "[1,2,3]");
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("invalid player record"));

    let payload = json(&route_request(&store, "GET", "/api/player", "").body);
    assert_eq!(payload["name"], "IWantCrow");
    assert_eq!(payload["revision"], 1);
}

#[test]
fn array_upload_is_not_a_player_record() {
    let store = store();
    for body in ["[]", "null", "\"IWantCrow\""] {
        let response = route_request(&store, "PUT", "/api/player", body);
        assert_eq!(response.status_code, 400, "{body}");
        assert!(response.body.contains("expected a JSON object"), "{body}");
    }

    assert_eq!(store.player().brawlers.len(), 4);
    let payload = json(&route_request(&store, "GET", "/api/player", "").body);
    assert_eq!(payload["name"], "IWantCrow");
    assert_eq!(payload["revision"], 1);
}

#[test]
fn unknown_route_is_not_found() {
    let response = route_request(&store(), "DELETE", "/api/player", "");
    assert_eq!(response.status_code, 404);
    assert!(response.body.contains("Route not found"));
}
