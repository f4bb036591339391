//! The temperature readout overlaid on the scene.

use nalssi_core::Units;
use nalssi_fonts::build_temp_art;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};

use crate::weather::WeatherSnapshot;

/// Daily high marker color.
const HIGH_COLOR: Color = Color::Rgb(0xff, 0x3b, 0x00);

/// Daily low marker color.
const LOW_COLOR: Color = Color::Rgb(0x42, 0x8c, 0xf4);

/// Number of terminal rows the readout occupies.
pub const READOUT_HEIGHT: u16 = 10;

/// Build the readout block: big temperature digits, the day's range, and a
/// one-line summary.
pub fn readout_lines(snapshot: &WeatherSnapshot, units: Units) -> Vec<Line<'static>> {
    let temp = units.from_celsius(snapshot.temp_c);
    let high = units.from_celsius(snapshot.high_c);
    let low = units.from_celsius(snapshot.low_c);

    let mut lines: Vec<Line> = build_temp_art(temp, units)
        .into_iter()
        .map(|row| Line::from(row).style(Style::new().fg(Color::White)))
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(format!("▲ {high}{}", units.suffix()), Style::new().fg(HIGH_COLOR)),
        Span::raw("   "),
        Span::styled(format!("▼ {low}{}", units.suffix()), Style::new().fg(LOW_COLOR)),
    ]));
    lines.push(Line::from(snapshot.summary.clone()).white());

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalssi_core::Conditions;
    use std::time::Instant;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            conditions: Conditions::default(),
            temp_c: 21,
            high_c: 25,
            low_c: 14,
            summary: "Partly cloudy".to_string(),
            fetched_at: Instant::now(),
        }
    }

    #[test]
    fn test_readout_height_matches_constant() {
        let lines = readout_lines(&snapshot(), Units::Celsius);
        assert_eq!(lines.len(), READOUT_HEIGHT as usize);
    }

    #[test]
    fn test_range_line_converts_units() {
        let lines = readout_lines(&snapshot(), Units::Fahrenheit);
        let range: String = lines[8].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(range.contains("▲ 77°F"));
        assert!(range.contains("▼ 57°F"));
    }

    #[test]
    fn test_summary_is_the_last_line() {
        let lines = readout_lines(&snapshot(), Units::Celsius);
        let summary: String = lines[9].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(summary, "Partly cloudy");
    }
}
