//! Remote prompt formatting.
//!
//! Each context section renders under its own heading only when present.
//! Missing scalar fields render as `unknown`.

use std::fmt::Write;

use triton_core::{PortInfo, QueryContext, RouteInfo, VesselInfo, WeatherInfo};

const SYSTEM_PROMPT: &str = "You are Triton AI, a specialized maritime assistant for shipping and vessel management.
Provide expert, concise answers about vessel tracking, routes, weather conditions and maritime operations.
For safety issues, emphasize maritime best practices and regulations.";

const UNKNOWN: &str = "unknown";

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN)
}

fn num_or_unknown(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.1}{unit}"),
        None => UNKNOWN.to_string(),
    }
}

fn vessel_section(vessel: &VesselInfo) -> String {
    let position = match vessel.position {
        Some(p) => format!("{}, {}", p.lat, p.lon),
        None => UNKNOWN.to_string(),
    };
    format!(
        "Name: {}\nIMO: {}\nPosition: {}\nSpeed: {}\nCourse: {}",
        or_unknown(vessel.name.as_deref()),
        or_unknown(vessel.imo.as_deref()),
        position,
        num_or_unknown(vessel.speed_knots, " knots"),
        num_or_unknown(vessel.course, "°"),
    )
}

fn weather_section(weather: &WeatherInfo) -> String {
    format!(
        "Conditions: {}, Wind: {}, Waves: {}",
        or_unknown(weather.description.as_deref()),
        or_unknown(weather.wind.as_deref()),
        or_unknown(weather.waves.as_deref()),
    )
}

fn ports_section(ports: &[PortInfo]) -> String {
    ports
        .iter()
        .map(|p| {
            format!(
                "- {}: Status {}, Capacity {}",
                p.name,
                or_unknown(p.status.as_deref()),
                or_unknown(p.capacity.as_deref()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn route_section(route: &RouteInfo) -> String {
    let mut out = format!(
        "From {} to {}",
        or_unknown(route.origin.as_deref()),
        or_unknown(route.destination.as_deref()),
    );
    if !route.waypoints.is_empty() {
        let _ = write!(out, "\nWaypoints: {}", route.waypoints.len());
    }
    out
}

/// Build the structured prompt sent to the remote backend.
pub fn build_remote_prompt(query: &str, context: &QueryContext) -> String {
    let mut sections: Vec<(&str, String)> = vec![("System", SYSTEM_PROMPT.to_string())];

    if let Some(vessel) = &context.vessel {
        sections.push(("Vessel Information", vessel_section(vessel)));
    }
    if let Some(weather) = &context.weather {
        sections.push(("Weather Conditions", weather_section(weather)));
    }
    if !context.ports.is_empty() {
        sections.push(("Port Information", ports_section(&context.ports)));
    }
    if let Some(route) = &context.route {
        sections.push(("Route", route_section(route)));
    }
    if let Some(info) = &context.additional_info {
        let rendered = match info {
            serde_json::Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_default(),
        };
        sections.push(("Additional Context", rendered));
    }
    sections.push(("User Query", query.trim().to_string()));

    let mut prompt = String::new();
    for (heading, body) in sections {
        let _ = write!(prompt, "### {heading}\n{body}\n\n");
    }
    prompt.push_str("### Response\n");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_query_has_only_system_and_query() {
        let prompt = build_remote_prompt("Distance Rotterdam to Hamburg?", &QueryContext::default());
        assert!(prompt.starts_with("### System\n"));
        assert!(prompt.contains("### User Query\nDistance Rotterdam to Hamburg?\n"));
        assert!(prompt.ends_with("### Response\n"));
        assert!(!prompt.contains("### Vessel Information"));
    }

    #[test]
    fn present_sections_render_in_order_with_unknowns() {
        let ctx: QueryContext = serde_json::from_value(json!({
            "vessel": { "name": "MV Aurora", "position": { "lat": 10.5, "lon": -40.2 } },
            "weather": { "description": "Gale" },
            "ports": [{ "name": "Rotterdam", "status": "congested" }],
            "route": { "origin": "Rotterdam", "waypoints": [{ "lat": 1.0, "lon": 2.0 }] }
        }))
        .unwrap();

        let prompt = build_remote_prompt("Risk?", &ctx);
        assert!(prompt.contains("Name: MV Aurora\nIMO: unknown\nPosition: 10.5, -40.2"));
        assert!(prompt.contains("Conditions: Gale, Wind: unknown, Waves: unknown"));
        assert!(prompt.contains("- Rotterdam: Status congested, Capacity unknown"));
        assert!(prompt.contains("From Rotterdam to unknown\nWaypoints: 1"));

        let vessel = prompt.find("### Vessel Information").unwrap();
        let weather = prompt.find("### Weather Conditions").unwrap();
        let query = prompt.find("### User Query").unwrap();
        assert!(vessel < weather && weather < query);
    }
}
