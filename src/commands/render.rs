//! Terminal rendering for the result, history and sensor views.
//!
//! Functions return Strings so commands decide where output goes.

use chrono::{DateTime, Local, TimeZone};
use colored::*;
use leafscan::history::{HistoryRecord, HistorySummary};
use leafscan::sensor::SensorSnapshot;
use leafscan::DiagnosisResult;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// `██████░░░░` for a 0.0..=1.0 fraction
pub fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Trim a trailing `.0` so 28.0 prints as `28`
fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

pub fn diagnosis(d: &DiagnosisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Detection Result".bold());
    let _ = writeln!(out);

    let status = if d.is_healthy {
        "Healthy".green().bold()
    } else {
        "Disease Detected".red().bold()
    };
    let _ = writeln!(out, "  {}  [{}]", d.disease_name.bold(), status);
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "  Confidence Level     {} {}%",
        bar(f64::from(d.confidence_percent) / 100.0, BAR_WIDTH),
        d.confidence_percent
    );
    if !d.is_healthy {
        let _ = writeln!(
            out,
            "  Estimated Crop Loss  {}",
            format!("{}%", d.crop_loss_percent).yellow().bold()
        );
        let _ = writeln!(out, "                       Based on disease severity and current spread");
    }
    let _ = writeln!(
        out,
        "  Temperature          {}°C",
        num(d.temperature)
    );
    let _ = writeln!(out, "  Humidity             {}%", num(d.humidity));
    let _ = writeln!(out);

    let _ = writeln!(out, "  {}", "Recommendation".bold());
    for line in d.recommendation_text.lines() {
        let _ = writeln!(out, "    {}", line);
    }

    if let Some(image) = &d.image_reference {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Image: {}", image);
    }
    out
}

/// `Jun 10, 2024 • 06:13 AM`
pub fn timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{} • {}", at.format("%b %-d, %Y"), at.format("%I:%M %p"))
}

pub fn history(records: &[HistoryRecord], summary: HistorySummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Scan History".bold());
    let noun = if summary.total == 1 { "record" } else { "records" };
    let _ = writeln!(out, "{} {} found", summary.total, noun);
    let _ = writeln!(out);

    if records.is_empty() {
        let _ = writeln!(out, "  No scans yet");
        let _ = writeln!(out, "  Start by capturing a leaf image: leafscan scan <IMAGE>");
        return out;
    }

    for record in records {
        let (mark, disease) = if record.is_healthy {
            ("✓".green(), record.disease_name.green())
        } else {
            ("⚠".red(), record.disease_name.red())
        };
        let _ = writeln!(
            out,
            "  {} {}  {}  {}",
            mark,
            record.crop_name.bold(),
            disease,
            timestamp(&record.timestamp.with_timezone(&Local)).dimmed()
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Total Scans: {}   Healthy Crops: {}",
        summary.total,
        summary.healthy.to_string().green()
    );
    out
}

pub fn sensors(snapshot: &SensorSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Sensor Readings".bold());
    let _ = writeln!(out);
    for reading in snapshot.readings() {
        let value = format!("{}{}", num(reading.value), reading.unit);
        let value = if reading.in_range() {
            value.green()
        } else {
            value.yellow()
        };
        let _ = writeln!(out, "  {:<14} {}", reading.name, value.bold());
        let _ = writeln!(out, "  {:<14} {}", "", bar(reading.fraction(), BAR_WIDTH));
        let _ = writeln!(
            out,
            "  {:<14} Optimal range: {}-{}{}",
            "",
            num(*reading.optimal.start()),
            num(*reading.optimal.end()),
            reading.unit
        );
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leafscan::diagnosis::recommend::MOCK_DISCLAIMER;

    fn plain() {
        colored::control::set_override(false);
    }

    fn diseased() -> DiagnosisResult {
        DiagnosisResult {
            disease_name: "Tomato Early Blight".to_string(),
            confidence_percent: 92,
            is_healthy: false,
            crop_loss_percent: 17,
            temperature: 28.0,
            humidity: 72.5,
            recommendation_text: format!("Remove leaves.{}", MOCK_DISCLAIMER),
            image_reference: Some("leaf.jpg".to_string()),
        }
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(0.5, 10), "█████░░░░░");
        assert_eq!(bar(0.0, 4), "░░░░");
        assert_eq!(bar(2.0, 4), "████");
    }

    #[test]
    fn test_diagnosis_view() {
        plain();
        let out = diagnosis(&diseased());
        assert!(out.contains("Tomato Early Blight  [Disease Detected]"));
        assert!(out.contains("92%"));
        assert!(out.contains("Estimated Crop Loss  17%"));
        assert!(out.contains("28°C"));
        assert!(out.contains("72.5%"));
        assert!(out.contains("This is a mock prediction"));
        assert!(out.contains("Image: leaf.jpg"));
    }

    #[test]
    fn test_healthy_view_hides_crop_loss() {
        plain();
        let mut d = diseased();
        d.is_healthy = true;
        d.crop_loss_percent = 0;
        let out = diagnosis(&d);
        assert!(out.contains("[Healthy]"));
        assert!(!out.contains("Estimated Crop Loss"));
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 6, 10, 18, 5, 0).unwrap();
        assert_eq!(timestamp(&at), "Jun 10, 2024 • 06:05 PM");
    }

    #[test]
    fn test_history_view() {
        plain();
        let records = vec![HistoryRecord {
            id: "1".to_string(),
            crop_name: "Tomato".to_string(),
            timestamp: Utc::now(),
            disease_name: "Tomato Healthy".to_string(),
            is_healthy: true,
        }];
        let out = history(&records, HistorySummary::of(&records));
        assert!(out.contains("1 record found"));
        assert!(out.contains("Tomato Healthy"));
        assert!(out.contains("Total Scans: 1   Healthy Crops: 1"));

        let empty = history(&[], HistorySummary::of(&[]));
        assert!(empty.contains("0 records found"));
        assert!(empty.contains("No scans yet"));
    }

    #[test]
    fn test_sensor_view() {
        plain();
        let out = sensors(&SensorSnapshot::default());
        assert!(out.contains("Temperature"));
        assert!(out.contains("28°C"));
        assert!(out.contains("Optimal range: 20-30°C"));
        assert!(out.contains("Optimal range: 40-60%"));
    }
}
