#![cfg(feature = "server")]
use async_trait::async_trait;
use chrono::Utc;
use dioxus::logger::tracing::{debug, error, warn};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::error::Error as _;

use crate::fleet::model::{FleetSnapshot, VehicleRecord, VehicleStatus};
use crate::fleet::source::{FetchError, FleetSource};

pub const CALL_KW_PATH: &str = "/web/dataset/call_kw";
pub const VEHICLE_FIELDS: [&str; 7] = [
    "id",
    "license_plate",
    "model",
    "driver",
    "location",
    "battery_level",
    "status",
];

// The refresher applies its own deadline on top of this.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .connect_timeout(std::time::Duration::from_secs(2))
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .unwrap_or_else(|e| {
            error!("[odoo] falling back to default HTTP client: {e}");
            Client::new()
        })
});

/// Reads vehicles through Odoo's JSON-RPC `call_kw` endpoint.
pub struct OdooFleetSource {
    base_url: String,
    model: String,
    session_id: Option<String>,
}

impl OdooFleetSource {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        session_id: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            session_id,
        }
    }

    pub async fn call_kw(
        &self,
        method: &str,
        args: Value,
        kwargs: Value,
    ) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, CALL_KW_PATH);
        debug!("[odoo] {}.{} via {}", self.model, method, url);
        let mut req = CLIENT
            .post(&url)
            .header("Cache-Control", "no-store")
            .json(&call_kw_body(&self.model, method, args, kwargs));
        if let Some(sid) = &self.session_id {
            req = req.header("Cookie", format!("session_id={sid}"));
        }

        let res = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                error!("[odoo] request error on POST {}: {}", url, e);
                if e.is_timeout() {
                    warn!("[odoo] hint: request timed out (client timeout ~10s)");
                }
                if e.is_connect() {
                    warn!("[odoo] hint: connection failed (DNS/route/refused/TLS). Check ODOO_URL");
                }
                let mut chain = Vec::new();
                let mut src: Option<&dyn std::error::Error> = e.source();
                while let Some(s) = src {
                    chain.push(s.to_string());
                    src = s.source();
                }
                if !chain.is_empty() {
                    debug!("[odoo] error chain: {}", chain.join(" -> "));
                }
                return Err(FetchError::Unavailable(format!("POST {url}: {e}")));
            }
        };

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            error!("[odoo] request failed: status={} body=\n{}", status, text);
            return Err(FetchError::Unavailable(format!("POST {url} failed with status {status}")));
        }
        let bytes = res
            .bytes()
            .await
            .map_err(|e| FetchError::Unavailable(format!("reading body from {url}: {e}")))?;
        let envelope: RpcEnvelope = serde_json::from_slice(&bytes).map_err(|e| {
            let snip = String::from_utf8_lossy(&bytes)
                .chars()
                .take(300)
                .collect::<String>();
            FetchError::Malformed(format!("decoding JSON from {url}: {e}\nBody snippet: {snip}"))
        })?;
        envelope.into_result()
    }
}

#[async_trait]
impl FleetSource for OdooFleetSource {
    fn name(&self) -> &str {
        "odoo"
    }

    async fn fetch_snapshot(&self) -> Result<FleetSnapshot, FetchError> {
        let result = self
            .call_kw("search_read", json!([]), json!({ "fields": VEHICLE_FIELDS }))
            .await?;
        let vehicles = parse_vehicles(result)?;
        Ok(FleetSnapshot::from_vehicles(vehicles, Utc::now()))
    }
}

pub fn call_kw_body(model: &str, method: &str, args: Value, kwargs: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "call",
        "params": {
            "model": model,
            "method": method,
            "args": args,
            "kwargs": kwargs,
        },
    })
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<RpcErrorData>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorData {
    #[serde(default)]
    message: Option<String>,
}

impl RpcEnvelope {
    fn into_result(self) -> Result<Value, FetchError> {
        if let Some(err) = self.error {
            // data.message carries the server-side exception text, message is usually generic
            let detail = err
                .data
                .and_then(|d| d.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(err.message);
            return Err(FetchError::Rejected(detail));
        }
        self.result
            .ok_or_else(|| FetchError::Malformed("response has neither result nor error".into()))
    }
}

#[derive(Debug, Deserialize)]
struct OdooVehicle {
    id: i64,
    #[serde(default)]
    license_plate: Value,
    #[serde(default)]
    model: Value,
    #[serde(default)]
    driver: Value,
    #[serde(default)]
    location: Value,
    #[serde(default)]
    battery_level: Value,
    #[serde(default)]
    status: Value,
}

/// Odoo sends `false` for empty char/selection fields.
fn odoo_str(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        // many2one fields come back as [id, display_name]
        Value::Array(pair) => pair.get(1).and_then(odoo_str),
        _ => None,
    }
}

fn odoo_battery(v: &Value) -> i64 {
    v.as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.round() as i64)
        .unwrap_or(0)
}

pub fn parse_vehicles(result: Value) -> Result<Vec<VehicleRecord>, FetchError> {
    let rows: Vec<OdooVehicle> = serde_json::from_value(result)
        .map_err(|e| FetchError::Malformed(format!("search_read rows: {e}")))?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let status = odoo_str(&row.status)
                .map(|s| VehicleStatus::from(s.as_str()))
                .unwrap_or_else(|| VehicleStatus::Unknown(String::new()));
            if !status.is_known() {
                debug!("[odoo] vehicle {} has unrecognized status {}", row.id, row.status);
            }
            let mut record = VehicleRecord::new(
                row.id,
                odoo_str(&row.license_plate).unwrap_or_default(),
                odoo_str(&row.model).unwrap_or_default(),
                odoo_battery(&row.battery_level),
                status,
            );
            record.driver = odoo_str(&row.driver);
            record.location = odoo_str(&row.location);
            record
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_envelope_shape() {
        let body = call_kw_body(
            "fleet.smart.vehicle",
            "search_read",
            json!([]),
            json!({ "fields": VEHICLE_FIELDS }),
        );
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["method"], "call");
        assert_eq!(body["params"]["model"], "fleet.smart.vehicle");
        assert_eq!(body["params"]["method"], "search_read");
        assert_eq!(body["params"]["kwargs"]["fields"][5], "battery_level");
    }

    #[test]
    fn decodes_search_read_rows() {
        let rows = json!([
            {
                "id": 7,
                "license_plate": "EV-007",
                "model": "Kia EV6",
                "driver": false,
                "location": "Depot North",
                "battery_level": 70.6,
                "status": "charging"
            },
            {
                "id": 8,
                "license_plate": "EV-008",
                "model": "Renault Zoe",
                "driver": [12, "Ana Ruiz"],
                "location": false,
                "battery_level": 140.0,
                "status": "decommissioned"
            }
        ]);
        let vehicles = parse_vehicles(rows).unwrap();
        assert_eq!(vehicles.len(), 2);

        let kia = &vehicles[0];
        assert_eq!(kia.driver, None);
        assert_eq!(kia.location.as_deref(), Some("Depot North"));
        assert_eq!(kia.battery_level, 71);
        assert_eq!(kia.status, VehicleStatus::Charging);

        let zoe = &vehicles[1];
        assert_eq!(zoe.driver.as_deref(), Some("Ana Ruiz"));
        assert_eq!(zoe.location, None);
        assert_eq!(zoe.battery_level, 100);
        assert_eq!(zoe.status, VehicleStatus::Unknown("decommissioned".into()));
    }

    #[test]
    fn missing_battery_is_zero() {
        let vehicles = parse_vehicles(json!([{ "id": 1, "status": "available" }])).unwrap();
        assert_eq!(vehicles[0].battery_level, 0);
        assert_eq!(vehicles[0].license_plate, "");
    }

    #[test]
    fn rows_without_id_are_malformed() {
        let err = parse_vehicles(json!([{ "license_plate": "EV-1" }])).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
        assert!(parse_vehicles(json!({ "records": [] })).is_err());
    }

    #[test]
    fn error_envelope_prefers_server_detail() {
        let env: RpcEnvelope = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {
                "code": 200,
                "message": "Odoo Server Error",
                "data": { "message": "Access Denied" }
            }
        }))
        .unwrap();
        match env.into_result() {
            Err(FetchError::Rejected(msg)) => assert_eq!(msg, "Access Denied"),
            other => panic!("unexpected: {other:?}"),
        }

        let env: RpcEnvelope =
            serde_json::from_value(json!({ "error": { "message": "Session expired" } })).unwrap();
        assert!(matches!(
            env.into_result(),
            Err(FetchError::Rejected(m)) if m == "Session expired"
        ));

        let env: RpcEnvelope = serde_json::from_value(json!({ "jsonrpc": "2.0" })).unwrap();
        assert!(matches!(env.into_result(), Err(FetchError::Malformed(_))));
    }
}
