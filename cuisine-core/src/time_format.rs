//! Human-friendly cooking times.

/// Format a cooking time for display.
///
/// Short times are exact, longer ones are bucketed into ranges:
/// `25` -> "25 mins", `45` -> "40-50 mins", `75` -> "1-1.5 hours",
/// `200` -> "~3 hours". Missing or zero renders as "N/A".
pub fn format_cooking_time(minutes: Option<u32>) -> String {
    let minutes = match minutes {
        None | Some(0) => return "N/A".to_string(),
        Some(m) => m,
    };

    if minutes <= 30 {
        return format!("{} mins", minutes);
    }

    if minutes <= 60 {
        let lower = minutes / 10 * 10;
        return format!("{}-{} mins", lower, lower + 10);
    }

    if minutes <= 120 {
        let lower_halves = minutes / 30;
        return format!(
            "{}-{} hours",
            half_hours(lower_halves),
            half_hours(lower_halves + 1)
        );
    }

    // Rounds half up
    format!("~{} hours", (minutes + 30) / 60)
}

/// Render a count of half hours as hours: 3 -> "1.5", 4 -> "2".
fn half_hours(halves: u32) -> String {
    if halves % 2 == 0 {
        (halves / 2).to_string()
    } else {
        format!("{}.5", halves / 2)
    }
}
