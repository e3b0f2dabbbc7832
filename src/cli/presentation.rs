//! CLI presentation: text and json formatters.

use crate::config::GameConfig;
use crate::error::GameError;
use crate::script::{FlushReport, ScriptReport};
use crate::state::StateSnapshot;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_report_json(report: &ScriptReport) -> Result<String, GameError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn format_report_text(report: &ScriptReport) -> String {
    let mut out = String::new();
    for flush in &report.flushes {
        out.push_str(&format_flush(flush));
        out.push('\n');
    }
    if report.flushes.is_empty() {
        out.push_str(&format!("{}\n\n", "No changes to flush".dimmed()));
    }

    for rejected in &report.rejected {
        out.push_str(&format!(
            "{} {}: {}\n",
            "rejected".yellow().bold(),
            rejected.step,
            rejected.error
        ));
    }
    if !report.rejected.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!("{}\n", "Final state".bold()));
    out.push_str(&format_state_table(&report.final_state));
    out
}

fn format_flush(flush: &FlushReport) -> String {
    let heading = format!("Flush #{} ({} observers)", flush.index, flush.invoked);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Observer", "Coins", "Stars", "Characters"]);
    for n in &flush.notifications {
        table.add_row(vec![
            n.observer.clone(),
            n.state.coins.to_string(),
            n.state.stars.to_string(),
            format_characters(&n.state),
        ]);
    }
    format!("{}\n{}\n", heading.cyan().bold(), table)
}

fn format_state_table(state: &StateSnapshot) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Coins", "Stars", "Characters"]);
    table.add_row(vec![
        state.coins.to_string(),
        state.stars.to_string(),
        format_characters(state),
    ]);
    table.to_string()
}

fn format_characters(state: &StateSnapshot) -> String {
    if state.characters.is_empty() {
        return "-".to_string();
    }
    state
        .characters
        .iter()
        .map(|c| format!("#{} L{}", c.id, c.level))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_config_toml(config: &GameConfig) -> Result<String, GameError> {
    Ok(toml::to_string_pretty(config)?)
}
