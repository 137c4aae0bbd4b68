//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::Location;

/// Text formatter - outputs one block per location
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, locations: &[Location]) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("{} result(s)\n", locations.len()));

        for (index, location) in locations.iter().enumerate() {
            output.push('\n');
            output.push_str(&format!(
                "[{}] {}\n",
                index + 1,
                location.feature_name().unwrap_or("(unnamed)")
            ));

            let coordinate = |value: Option<f64>| match value {
                Some(v) => format!("{:.6}", v),
                None => "-".to_string(),
            };
            output.push_str(&format!(
                "  Coordinates: ({}, {})\n",
                coordinate(location.latitude()),
                coordinate(location.longitude())
            ));

            for line in location.address_lines() {
                output.push_str(&format!("  {}\n", line));
            }

            let fields = [
                ("Locality", location.locality()),
                ("Admin area", location.admin_area()),
                ("Postal code", location.postal_code()),
                ("Country", location.country_name()),
                ("Phone", location.phone()),
                ("URL", location.url()),
            ];
            for (label, value) in fields {
                if let Some(value) = value {
                    output.push_str(&format!("  {}: {}\n", label, value));
                }
            }

            for (key, value) in location.extras() {
                output.push_str(&format!("  extra.{} = {}\n", key, value));
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::ExtraValue;

    #[test]
    fn test_text_format() {
        let locations = vec![Location::builder()
            .feature_name("Sydney Opera House")
            .address_line("Bennelong Point")
            .address_line("Sydney NSW 2000")
            .locality("Sydney")
            .country_name("Australia")
            .latitude(-33.8568)
            .longitude(151.2153)
            .extra("rating", ExtraValue::Double(4.7))
            .build()];

        let output = TextFormatter.format(&locations).unwrap();

        assert!(output.starts_with("1 result(s)"));
        assert!(output.contains("[1] Sydney Opera House"));
        assert!(output.contains("Coordinates: (-33.856800, 151.215300)"));
        assert!(output.contains("  Bennelong Point\n"));
        assert!(output.contains("Locality: Sydney"));
        assert!(output.contains("Country: Australia"));
        assert!(output.contains("extra.rating = 4.7"));
        assert!(!output.contains("Phone"));
    }

    #[test]
    fn test_text_missing_coordinate() {
        let output = TextFormatter.format(&[Location::default()]).unwrap();
        assert!(output.contains("[1] (unnamed)"));
        assert!(output.contains("Coordinates: (-, -)"));
    }

    #[test]
    fn test_text_formatter_info() {
        let formatter = TextFormatter;
        assert_eq!(formatter.name(), "text");
        assert!(!formatter.description().is_empty());
    }
}
