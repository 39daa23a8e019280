//! Canned responses served when no backend can answer.

use triton_core::TaskCategory;

pub const DEFAULT_OFFLINE_RESPONSE: &str = "Triton is operating in offline mode and cannot reach its AI services. \
Please retry once connectivity is restored.";

/// Fixed offline message for a task category.
///
/// Unrecognized categories get [`DEFAULT_OFFLINE_RESPONSE`].
pub fn offline_response(task: &TaskCategory) -> &'static str {
    match task {
        TaskCategory::RouteOptimization => {
            "Route optimization is unavailable in offline mode. Use the last approved passage plan \
and verify it against current notices to mariners."
        }
        TaskCategory::WeatherAnalysis => {
            "Weather data cannot be retrieved in offline mode. Please re-establish connection for \
current weather information and consult official forecasts before departure."
        }
        TaskCategory::EtaPrediction => {
            "ETA prediction is unavailable in offline mode. Estimates based on the last reported \
speed and remaining distance may be inaccurate."
        }
        TaskCategory::VesselTracking => {
            "Unable to provide current vessel positions in offline mode. Last known position data \
is not available."
        }
        TaskCategory::BasicQuery => DEFAULT_OFFLINE_RESPONSE,
        TaskCategory::PortOperations => {
            "Port status cannot be confirmed in offline mode. Contact the port authority or agent \
directly for berth and congestion information."
        }
        TaskCategory::CriticalSafety => {
            "AI safety guidance is unavailable in offline mode. Follow the vessel's safety management \
system procedures and contact the designated person ashore or MRCC if in distress."
        }
        TaskCategory::Other(_) => DEFAULT_OFFLINE_RESPONSE,
    }
}
