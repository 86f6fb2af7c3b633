use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::data::player::{load_player, Player, PlayerError, MAX_POWER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

pub fn validate_player_file(path: impl AsRef<Path>) -> Result<ValidationReport, PlayerError> {
    let player = load_player(path)?;
    Ok(validate_player(&player))
}

pub fn validate_player(player: &Player) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_ids = HashSet::new();

    for (index, brawler) in player.brawlers.iter().enumerate() {
        let context = format!("brawlers[{index}] id={}", brawler.id);

        if !seen_ids.insert(brawler.id) {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.id"),
                format!("duplicate brawler id {}", brawler.id),
            );
        }

        if brawler.name.trim().is_empty() {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.name"),
                "missing non-empty 'name'",
            );
        }

        if !(1..=MAX_POWER).contains(&brawler.power) {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.power"),
                format!("power {} outside 1..={MAX_POWER}", brawler.power),
            );
        }

        if brawler.trophies > brawler.highest_trophies {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.trophies"),
                format!(
                    "trophies {} exceed highestTrophies {}",
                    brawler.trophies, brawler.highest_trophies
                ),
            );
        }

        for (gear_index, gear) in brawler.gears.iter().enumerate() {
            if gear.level == 0 {
                report.push(
                    ValidationSeverity::Warning,
                    format!("{context}.gears[{gear_index}]"),
                    format!("gear '{}' has level 0", gear.name),
                );
            }
        }

        if !brawler.has_upgrades() {
            report.push(
                ValidationSeverity::Info,
                context,
                "no upgrades unlocked",
            );
        }
    }

    report
}
