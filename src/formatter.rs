//! Converts pasted diagnostic result text into markdown.
//!
//! Section markers become headings, `key<TAB>value` lines become bold list
//! items, and an available location is appended as its own section.

use crate::location::LocationResult;
use crate::markers::MARKER_TABLE;

/// Replace every known section marker with its heading
pub fn apply_markers(raw: &str) -> String {
    let mut text = raw.to_string();
    for (marker, heading) in MARKER_TABLE {
        if text.contains(marker) {
            text = text.replace(marker, heading);
        }
    }
    text
}

/// Convert a `key<TAB>value` line into `- **key**: value`.
///
/// Returns `None` when the line has no tab, more than one tab, or nothing on
/// one side of the tab. Both sides are trimmed only after that check, so a
/// whitespace-only key or value still yields a list item.
pub fn format_pair_line(line: &str) -> Option<String> {
    let (key, value) = line.split_once('\t')?;
    if value.contains('\t') || key.is_empty() || value.is_empty() {
        return None;
    }
    Some(format!("- **{}**: {}", key.trim(), value.trim()))
}

/// Format raw result text as markdown, appending the location if one is available.
///
/// Deterministic and total: the output depends only on the two inputs.
pub fn format_markdown(raw: &str, location: &LocationResult) -> String {
    let mut text = apply_markers(raw);

    if let Some(location_text) = location.available_text() {
        text.push_str("\n\n## Location\n");
        text.push_str(location_text);
    }

    let mut pairs = 0;
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| match format_pair_line(line) {
            Some(item) => {
                pairs += 1;
                item
            }
            None => line.to_string(),
        })
        .collect();

    tracing::debug!(lines = lines.len(), pairs, "formatted markdown");
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCATION: &str =
        "Latitude: 1.0\nLongitude: 2.0\nAddress: 1 Main St, City, ST 00000, Country";

    #[test]
    fn test_ethernet_section() {
        let out = format_markdown("ethernet_green Test\nStatus\tOK", &LocationResult::Unset);
        assert_eq!(out, "# Ethernet Test\n- **Status**: OK");
    }

    #[test]
    fn test_poe_section_with_location() {
        let location = LocationResult::Available(LOCATION.to_string());
        let out = format_markdown("flash_on_green PoE\nWatts\t15.4", &location);
        assert_eq!(
            out,
            "## PoE\n- **Watts**: 15.4\n\n## Location\nLatitude: 1.0\nLongitude: 2.0\nAddress: 1 Main St, City, ST 00000, Country"
        );
    }

    #[test]
    fn test_two_tabs_pass_through() {
        assert_eq!(format_markdown("a\tb\tc", &LocationResult::Unset), "a\tb\tc");
    }

    #[test]
    fn test_every_marker_replaced() {
        let raw: Vec<&str> = MARKER_TABLE.iter().map(|(m, _)| *m).collect();
        let raw = raw.join("\nsome text\n");
        let out = format_markdown(&raw, &LocationResult::Unset);
        for (marker, heading) in MARKER_TABLE {
            assert!(!out.contains(marker), "Marker '{}' left in output", marker);
            assert!(out.contains(heading), "Heading '{}' missing", heading);
        }
        assert_eq!(out.matches("some text").count(), MARKER_TABLE.len() - 1);
    }

    #[test]
    fn test_repeated_marker_all_occurrences() {
        let out = apply_markers("ll_dns_black DNS x ll_dns_black DNS");
        assert_eq!(out, "## DNS x ## DNS");
    }

    #[test]
    fn test_unknown_text_unchanged() {
        let raw = "Hello there\n\nNo markers here: ll_dns_green DNS";
        assert_eq!(format_markdown(raw, &LocationResult::Unset), raw);
    }

    #[test]
    fn test_pair_line_trimming() {
        assert_eq!(
            format_pair_line("  IP Address \t 10.0.0.2  ").as_deref(),
            Some("- **IP Address**: 10.0.0.2")
        );
        assert_eq!(format_pair_line("Status\t"), None);
        assert_eq!(format_pair_line("\tOK"), None);
        assert_eq!(format_pair_line("no tab"), None);
    }

    #[test]
    fn test_whitespace_only_side_still_converts() {
        assert_eq!(format_pair_line("  \tOK").as_deref(), Some("- ****: OK"));
        assert_eq!(
            format_pair_line("Status\t  ").as_deref(),
            Some("- **Status**: ")
        );
        assert_eq!(format_pair_line("   \t  ").as_deref(), Some("- ****: "));

        let out = format_markdown("ll_dhcp_green DHCP\n \tleased", &LocationResult::Unset);
        assert_eq!(out, "## DHCP\n- ****: leased");
    }

    #[test]
    fn test_windows_line_endings_trimmed() {
        let out = format_markdown("Speed\t1000 Mbps\r\nDuplex\tFull\r", &LocationResult::Unset);
        assert_eq!(out, "- **Speed**: 1000 Mbps\n- **Duplex**: Full");
    }

    #[test]
    fn test_blank_lines_kept() {
        let out = format_markdown("ll_link_green Link\n\nSpeed\t1G\n", &LocationResult::Unset);
        assert_eq!(out, "## Link\n\n- **Speed**: 1G\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_markdown("", &LocationResult::Unset), "");
        let location = LocationResult::Available("Here".to_string());
        assert_eq!(format_markdown("", &location), "\n\n## Location\nHere");
    }

    #[test]
    fn test_no_block_without_location() {
        for location in [
            LocationResult::Unset,
            LocationResult::Pending,
            LocationResult::Unavailable("Error retrieving location: offline".to_string()),
        ] {
            let out = format_markdown("ll_www_green TCP\nPort\t443", &location);
            assert_eq!(out, "## TCP\n- **Port**: 443");
            assert!(!out.contains("## Location"));
        }
    }

    #[test]
    fn test_location_ends_output() {
        let location = LocationResult::Available(LOCATION.to_string());
        let out = format_markdown("ll_gateway_green Gateway\nReachable\tyes", &location);
        assert!(out.ends_with(&format!("\n\n## Location\n{}", LOCATION)));
    }

    #[test]
    fn test_deterministic() {
        let raw = "ll_dhcp_green DHCP\nLease\t3600 s\nx\ty\tz";
        let location = LocationResult::Available(LOCATION.to_string());
        assert_eq!(format_markdown(raw, &location), format_markdown(raw, &location));
    }
}
