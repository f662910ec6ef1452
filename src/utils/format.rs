use chrono::{DateTime, Utc};

#[cfg(all(feature = "web"))]
pub fn pad2(n: i32) -> String {
    if n < 10 {
        format!("0{}", n)
    } else {
        n.to_string()
    }
}

/// Browser-local `HH:MM:SS` for "last updated" lines.
#[cfg(all(feature = "web"))]
pub fn format_clock(rfc3339: &str) -> String {
    use js_sys::Date;
    let d = Date::new(&wasm_bindgen::JsValue::from_str(rfc3339));
    if d.get_time().is_nan() {
        return rfc3339.to_string();
    }
    format!(
        "{}:{}:{}",
        pad2(d.get_hours() as i32),
        pad2(d.get_minutes() as i32),
        pad2(d.get_seconds() as i32)
    )
}

#[cfg(not(all(feature = "web")))]
pub fn format_clock(rfc3339: &str) -> String {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc).format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}

pub fn format_battery(level: f64) -> String {
    format!("{}%", level.round() as i64)
}

pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        "Just now".to_string()
    } else if secs < 3_600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3_600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn battery() {
        assert_eq!(format_battery(85.0), "85%");
        assert_eq!(format_battery(78.5), "79%");
        assert_eq!(format_battery(0.2), "0%");
    }

    #[test]
    fn relative_time() {
        let now = Utc::now();
        assert_eq!(time_ago(now - Duration::seconds(5), now), "Just now");
        assert_eq!(time_ago(now + Duration::seconds(5), now), "Just now");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3h ago");
        assert_eq!(time_ago(now - Duration::days(2), now), "2d ago");
    }

    #[cfg(not(feature = "web"))]
    #[test]
    fn clock_falls_back_to_input() {
        assert_eq!(format_clock("2025-03-01T09:05:07Z"), "09:05:07 UTC");
        assert_eq!(format_clock("yesterday"), "yesterday");
    }
}
