//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::Location;

/// JSON formatter - outputs the result list as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON array of locations"
    }

    fn format(&self, locations: &[Location]) -> Result<String> {
        Ok(serde_json::to_string_pretty(locations)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::ExtraValue;

    #[test]
    fn test_json_format() {
        let locations = vec![
            Location::builder()
                .feature_name("Brandenburger Tor")
                .locality("Berlin")
                .latitude(52.5163)
                .longitude(13.3777)
                .extra("rank", ExtraValue::Integer(1))
                .build(),
            Location::default(),
        ];

        let output = JsonFormatter.format(&locations).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(2));
        assert_eq!(parsed[0]["locality"], "Berlin");
        assert_eq!(parsed[0]["has_longitude"], true);
        assert_eq!(parsed[1]["has_latitude"], false);
        assert_eq!(parsed[1]["max_address_line_index"], -1);
    }

    #[test]
    fn test_json_empty_list() {
        assert_eq!(JsonFormatter.format(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_json_formatter_info() {
        let formatter = JsonFormatter;
        assert_eq!(formatter.name(), "json");
        assert!(!formatter.description().is_empty());
    }
}
