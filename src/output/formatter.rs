//! Output formatters for match reports

use crate::analysis::response::AnalysisResponse;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::{Color, Colorize};

const NOT_SPECIFIED: &str = "Not specified";

/// Trait for rendering a match report to text
pub trait OutputFormatter: Send + Sync {
    fn format_response(&self, response: &AnalysisResponse) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and API integration
pub struct JsonFormatter {
    pretty: bool,
}

pub fn formatter_for(format: &OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

/// Whole percentages print without decimals, others with one.
pub fn format_percentage(percentage: f64) -> String {
    if percentage.fract() == 0.0 {
        format!("{:.0}%", percentage)
    } else {
        format!("{:.1}%", percentage)
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn score_color(percentage: f64) -> Color {
        match percentage {
            p if p >= 80.0 => Color::Green,
            p if p >= 60.0 => Color::BrightGreen,
            p if p >= 40.0 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_tags(&self, items: &[String], color: Color, empty_message: &str) -> String {
        if items.is_empty() {
            return format!("  {}\n", self.colorize(empty_message, Color::BrightBlack));
        }

        let tags: Vec<String> = items.iter().map(|item| self.colorize(item, color)).collect();
        format!("  {}\n", tags.join(", "))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_response(&self, response: &AnalysisResponse) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("ATS MATCH REPORT"));

        let percentage = format_percentage(response.match_percentage);
        let percentage = if self.use_colors {
            percentage
                .color(Self::score_color(response.match_percentage))
                .bold()
                .to_string()
        } else {
            percentage
        };
        output.push_str(&format!("Match: {}\n", percentage));

        let industry = response
            .detected_industry
            .as_deref()
            .filter(|industry| !industry.trim().is_empty())
            .unwrap_or(NOT_SPECIFIED);
        output.push_str(&format!("Detected Industry: {}\n", industry));

        output.push_str(&self.format_header("Matched Keywords"));
        output.push_str(&self.format_tags(
            &response.matched_keywords,
            Color::Green,
            "No keyword matches found",
        ));

        output.push_str(&self.format_header("Missing Keywords"));
        output.push_str(&self.format_tags(
            &response.missing_keywords,
            Color::Red,
            "All important keywords matched",
        ));

        output.push_str(&self.format_header("Matched Skills"));
        output.push_str(&self.format_tags(
            &response.matched_skills,
            Color::Green,
            "No directly matched skills found",
        ));

        output.push_str(&self.format_header("Missing Skills"));
        output.push_str(&self.format_tags(
            &response.missing_skills,
            Color::Red,
            "No important skills missing",
        ));

        output.push_str(&self.format_header("Optimization Tips"));
        if response.optimization_tips.is_empty() {
            output.push_str(&format!(
                "  {}\n",
                self.colorize("No optimization tips available", Color::BrightBlack)
            ));
        } else {
            for (i, tip) in response.optimization_tips.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, tip));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_response(&self, response: &AnalysisResponse) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(response)?)
        } else {
            Ok(serde_json::to_string(response)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResponse {
        AnalysisResponse {
            match_percentage: 80.0,
            matched_keywords: vec!["Go".into()],
            missing_keywords: vec!["Kubernetes".into()],
            matched_skills: vec![],
            missing_skills: vec![],
            optimization_tips: vec!["Add more detail".into()],
            detected_industry: Some("Engineering".into()),
        }
    }

    #[test]
    fn test_percentage_formatting() {
        assert_eq!(format_percentage(80.0), "80%");
        assert_eq!(format_percentage(66.666), "66.7%");
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false).format_response(&sample()).unwrap();

        assert!(output.contains("Match: 80%"));
        assert!(output.contains("Detected Industry: Engineering"));
        assert!(output.contains("  Go\n"));
        assert!(output.contains("No directly matched skills found"));
        assert!(output.contains("No important skills missing"));
        assert!(output.contains("1. Add more detail"));
    }

    #[test]
    fn test_console_fallbacks() {
        let mut response = sample();
        response.detected_industry = None;
        response.matched_keywords.clear();
        response.missing_keywords.clear();
        response.optimization_tips.clear();

        let output = ConsoleFormatter::new(false).format_response(&response).unwrap();
        assert!(output.contains("Detected Industry: Not specified"));
        assert!(output.contains("No keyword matches found"));
        assert!(output.contains("All important keywords matched"));
        assert!(output.contains("No optimization tips available"));
    }

    #[test]
    fn test_json_round_trips_response() {
        let json = JsonFormatter::new(false).format_response(&sample()).unwrap();
        let decoded: AnalysisResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, sample());
        assert!(json.contains("\"matchPercentage\":80.0"));
    }

    #[test]
    fn test_formatter_for_matches_configured_format() {
        let console = formatter_for(&OutputFormat::Console, false);
        assert_eq!(console.supports_format(), OutputFormat::Console);

        let json = formatter_for(&OutputFormat::Json, false);
        assert_eq!(json.supports_format(), OutputFormat::Json);
    }
}
