use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use std::fmt::Write as _;

use crate::api::models::{HeatmapRequest, HeatmapResponse};
use crate::config::settings::AppConfig;
use crate::services::prediction::PredictionService;

const WEEKDAY_LABELS: [&str; 7] = ["D+0", "D+1", "D+2", "D+3", "D+4", "D+5", "D+6"];

pub struct ForecastService {
    predictions: PredictionService,
}

impl ForecastService {
    pub fn new(config: AppConfig) -> Self {
        Self {
            predictions: PredictionService::new(config),
        }
    }

    pub async fn run(&self, request: &HeatmapRequest, as_json: bool) -> Result<()> {
        let heatmap = self.predictions.rush_heatmap(request).await;
        let output = if as_json {
            serde_json::to_string_pretty(&heatmap).context("Failed to serialize heatmap")?
        } else {
            render_table(&heatmap)
        };
        println!("{}", output);
        Ok(())
    }
}

/// One row per day, one column per hour, scores shown as 0-9
pub fn render_table(heatmap: &HeatmapResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Week from {}", heatmap.week_start);

    let header: String = (0..24).map(|h| format!("{:>3}", h)).collect();
    let _ = writeln!(out, "     {}", header);

    for (day, cells) in heatmap.cells.chunks(24).enumerate() {
        let label = WEEKDAY_LABELS.get(day).copied().unwrap_or("D+?");
        let row: String = cells
            .iter()
            .map(|cell| format!("  {}", shade(cell.rush_score)))
            .collect();
        let _ = writeln!(out, "{:<5}{}", label, row);
    }
    out
}

fn shade(score: f64) -> ColoredString {
    let level = ((score * 9.0).round() as u8).min(9).to_string();
    let digit = level.as_str();
    match digit {
        "0" | "1" | "2" => digit.green(),
        "3" | "4" | "5" => digit.yellow(),
        "6" | "7" => digit.truecolor(255, 140, 0),
        _ => digit.red().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::HeatmapCell;

    #[test]
    fn test_render_table_layout() {
        colored::control::set_override(false);
        let cells = (0..168)
            .map(|i| HeatmapCell {
                day_offset: i / 24,
                hour: i % 24,
                date_time: String::new(),
                rush_score: if i % 24 == 19 { 1.0 } else { 0.0 },
            })
            .collect();
        let table = render_table(&HeatmapResponse {
            week_start: "2024-06-03T00:00:00Z".to_string(),
            cells,
        });

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Week from 2024-06-03T00:00:00Z");
        assert!(lines[2].starts_with("D+0"));
        assert_eq!(lines[2].matches('9').count(), 1);
        assert_eq!(lines[8].matches('0').count(), 23);
    }
}
