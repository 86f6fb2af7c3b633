use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::data::player::{load_player, Player};
use crate::data::store::PlayerStore;
use crate::data::validate::{validate_player_file, ValidationSeverity};
use crate::gallery::{brawler_detail, build_gallery, GalleryError, GalleryQuery};
use crate::server;
use crate::totals::{compute_totals, UpgradeFlags};

const USAGE: &str = "usage: brawlview <serve|totals|list|show|validate> [--player PATH]";

/// Options that take a value; everything else not starting with `--` is positional.
const VALUE_FLAGS: &[&str] = &["--player", "--gold", "--pp", "--flags", "--sort", "--columns"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Totals,
    List,
    Show,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("totals") => Some(Command::Totals),
        Some("list") => Some(Command::List),
        Some("show") => Some(Command::Show),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let config = Config::from_env().with_player_path(flag_value(args, "--player"));
    match command {
        Command::Serve => handle_serve(&config),
        Command::Totals => handle_totals(args, &config),
        Command::List => handle_list(args, &config),
        Command::Show => handle_show(args, &config),
        Command::Validate => handle_validate(args, &config),
    }
}

fn handle_serve(config: &Config) -> i32 {
    let player = match load_player(&config.player_path) {
        Ok(player) => player,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "starting with an empty player record; upload one via PUT /api/player"
            );
            Player::default()
        }
    };
    let store = PlayerStore::new(player);
    match server::run_server(&config.bind_addr, &store) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlagsError {
    #[error("unable to read flags file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid flags file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_flags(path: impl AsRef<Path>) -> Result<UpgradeFlags, FlagsError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| FlagsError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| FlagsError::Parse {
        path: display,
        source,
    })
}

fn handle_totals(args: &[String], config: &Config) -> i32 {
    let Some(player) = load_or_report(config) else {
        return 1;
    };
    let flags = match flag_value(args, "--flags") {
        Some(path) => match load_flags(path) {
            Ok(flags) => flags,
            Err(err) => {
                eprintln!("{err}");
                return 1;
            }
        },
        None => UpgradeFlags::default(),
    };

    let totals = compute_totals(
        &player.brawlers,
        &flags.hypercharges,
        &flags.buffies,
        flag_value(args, "--gold").unwrap_or(""),
        flag_value(args, "--pp").unwrap_or(""),
    );

    if has_switch(args, "--table") {
        println!("gold\t{}", totals.gold_display());
        println!("power_points\t{}", totals.power_points_display());
        0
    } else {
        print_json(&totals)
    }
}

fn handle_list(args: &[String], config: &Config) -> i32 {
    let query = match gallery_query(args) {
        Ok(query) => query,
        Err(err) => {
            eprintln!("{err}");
            return 2;
        }
    };
    let Some(player) = load_or_report(config) else {
        return 1;
    };
    print_json(&build_gallery(&player, &query))
}

fn gallery_query(args: &[String]) -> Result<GalleryQuery, GalleryError> {
    Ok(GalleryQuery {
        search: positional(args).next().unwrap_or_default().to_string(),
        sort: flag_value(args, "--sort").unwrap_or_default().parse()?,
        columns: flag_value(args, "--columns").unwrap_or_default().parse()?,
    })
}

fn handle_show(args: &[String], config: &Config) -> i32 {
    let Some(id) = positional(args).next().and_then(|raw| raw.parse::<u32>().ok()) else {
        eprintln!("usage: brawlview show <brawler-id>");
        return 2;
    };
    let Some(player) = load_or_report(config) else {
        return 1;
    };
    match brawler_detail(&player, id) {
        Some(card) => print_json(&card),
        None => {
            eprintln!("brawler {id} not found");
            1
        }
    }
}

fn handle_validate(args: &[String], config: &Config) -> i32 {
    let path = positional(args)
        .next()
        .map(Path::new)
        .unwrap_or(config.player_path.as_path());

    match validate_player_file(path) {
        Ok(report) if !report.has_errors() => {
            for diagnostic in &report.diagnostics {
                eprintln!("- {diagnostic}");
            }
            println!("validation passed: {}", path.display());
            0
        }
        Ok(report) => {
            eprintln!(
                "validation failed: {} issue(s)",
                report.count(ValidationSeverity::Error)
            );
            for diagnostic in &report.diagnostics {
                eprintln!("- {diagnostic}");
            }
            1
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn load_or_report(config: &Config) -> Option<Player> {
    match load_player(&config.player_path) {
        Ok(player) => Some(player),
        Err(err) => {
            eprintln!("failed to load player: {err}");
            None
        }
    }
}

fn print_json(value: &impl Serialize) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}

fn has_switch(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}

/// Positional arguments after the command name, skipping option values.
fn positional<'a>(args: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
    let mut skip_next = false;
    args.iter().skip(2).filter_map(move |arg| {
        if skip_next {
            skip_next = false;
            return None;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            return None;
        }
        if arg.starts_with("--") {
            return None;
        }
        Some(arg.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(&args(&["brawlview", "totals"])), Some(Command::Totals));
        assert_eq!(parse_command(&args(&["brawlview", "show", "1"])), Some(Command::Show));
        assert_eq!(parse_command(&args(&["brawlview", "simulate"])), None);
        assert_eq!(parse_command(&args(&["brawlview"])), None);
    }

    #[test]
    fn positional_skips_option_values() {
        let argv = args(&[
            "brawlview", "list", "--sort", "rank", "crow", "--table", "--player", "p.json",
        ]);
        let found: Vec<_> = positional(&argv).collect();
        assert_eq!(found, ["crow"]);
        assert_eq!(flag_value(&argv, "--sort"), Some("rank"));
        assert_eq!(flag_value(&argv, "--gold"), None);
        assert!(has_switch(&argv, "--table"));
    }

    #[test]
    fn gallery_query_rejects_bad_columns() {
        let argv = args(&["brawlview", "list", "--columns", "5"]);
        assert!(matches!(
            gallery_query(&argv),
            Err(GalleryError::UnsupportedColumns(_))
        ));
    }
}
