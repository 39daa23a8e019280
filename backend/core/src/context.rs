//! Maritime query context.
//!
//! Each section is optional; prompt builders branch on presence instead of
//! probing arbitrary JSON. Fields the model does not know about are kept in
//! `extra` so they still reach the local backend and the fingerprint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys treated as call-time metadata and stripped before fingerprinting.
pub const VOLATILE_KEYS: &[&str] = &["timestamp", "requestId", "request_id", "queryId"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel: Option<VesselInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteInfo>,

    /// Free-form caller data appended to prompts as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Value>,

    /// Call-time metadata; callers send strings or epoch numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(deserialize_with = "lenient::coordinate")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient::coordinate")]
    pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselInfo {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub imo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub speed_knots: Option<f64>,
    /// Course over ground, degrees.
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub course: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherInfo {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub wind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub waves: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortInfo {
    #[serde(deserialize_with = "lenient::required_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waypoints: Vec<Position>,
}

impl QueryContext {
    pub fn is_empty(&self) -> bool {
        self.normalized() == QueryContext::default()
    }

    /// Copy of this context with call-time metadata removed.
    ///
    /// Two contexts that differ only in `timestamp`/`requestId`-like fields
    /// normalize to the same value.
    pub fn normalized(&self) -> QueryContext {
        let mut ctx = self.clone();
        ctx.timestamp = None;
        ctx.request_id = None;
        strip_volatile(&mut ctx.extra);
        if let Some(Value::Object(map)) = ctx.additional_info.as_mut() {
            strip_volatile(map);
        }
        ctx
    }
}

fn strip_volatile(map: &mut Map<String, Value>) {
    for key in VOLATILE_KEYS {
        map.remove(*key);
    }
}

/// Section scalars accept whatever JSON scalar the caller had at hand.
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn render(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    fn to_number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(render(Value::deserialize(d)?))
    }

    pub fn required_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        render(Value::deserialize(d)?).ok_or_else(|| D::Error::custom("expected a name"))
    }

    /// Unparsable values read as absent.
    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(to_number(&Value::deserialize(d)?))
    }

    pub fn coordinate<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(d)?;
        to_number(&value).ok_or_else(|| D::Error::custom(format!("invalid coordinate {value}")))
    }
}
