//! SISGPO integration models.
//!
//! Wire-level shapes exchanged with SISGPO. Field names and enum values
//! follow the SISGPO API surface, not local conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Claim set of a signed SSO assertion presented to SISGPO.
///
/// Created fresh per session exchange and never persisted. Caller-supplied
/// extra claims ride along in `extra`; the fixed fields always win over them
/// (see `sisgpo::assertion`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsoAssertionClaims {
    /// Subject — local user ID (stringified).
    pub sub: String,
    /// User display name.
    pub name: Option<String>,
    /// User email; SISGPO matches accounts by email.
    pub email: String,
    /// Fixed marker identifying the issuing system.
    pub origin: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Additional caller-supplied claims.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Vehicle status as understood by SISGPO's status-integration endpoint.
///
/// SIGO only emits transition notifications; the state machine itself lives
/// on the SISGPO side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    /// Engaged on an occurrence.
    Empenhada,
    /// Free for dispatch.
    Disponivel,
    /// Under maintenance.
    Manutencao,
    /// Out of service.
    Indisponivel,
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VehicleStatus::Empenhada => "EMPENHADA",
            VehicleStatus::Disponivel => "DISPONIVEL",
            VehicleStatus::Manutencao => "MANUTENCAO",
            VehicleStatus::Indisponivel => "INDISPONIVEL",
        };
        f.write_str(s)
    }
}

/// Identifies a vehicle on the SISGPO side: local numeric id or the
/// external prefix/code painted on the vehicle (e.g. `ABT-0123`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleRef {
    Id(i64),
    Code(String),
}

impl VehicleRef {
    /// Path segment used to address the vehicle.
    pub fn as_path_segment(&self) -> String {
        match self {
            VehicleRef::Id(id) => id.to_string(),
            VehicleRef::Code(code) => code.clone(),
        }
    }
}

impl fmt::Display for VehicleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleRef::Id(id) => write!(f, "{id}"),
            VehicleRef::Code(code) => f.write_str(code),
        }
    }
}

impl From<i64> for VehicleRef {
    fn from(id: i64) -> Self {
        VehicleRef::Id(id)
    }
}

impl From<&str> for VehicleRef {
    fn from(code: &str) -> Self {
        VehicleRef::Code(code.to_string())
    }
}

/// Body of the status-integration PATCH.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSyncPayload {
    pub status: VehicleStatus,
    pub ocorrencia_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_wire_values() {
        assert_eq!(
            serde_json::to_value(VehicleStatus::Empenhada).unwrap(),
            serde_json::json!("EMPENHADA")
        );
        assert_eq!(
            serde_json::to_value(VehicleStatus::Disponivel).unwrap(),
            serde_json::json!("DISPONIVEL")
        );
        assert_eq!(
            serde_json::to_value(VehicleStatus::Manutencao).unwrap(),
            serde_json::json!("MANUTENCAO")
        );
        assert_eq!(
            serde_json::to_value(VehicleStatus::Indisponivel).unwrap(),
            serde_json::json!("INDISPONIVEL")
        );
    }

    #[test]
    fn payload_uses_camel_case_occurrence_id() {
        let payload = StatusSyncPayload {
            status: VehicleStatus::Empenhada,
            ocorrencia_id: 55,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": "EMPENHADA", "ocorrenciaId": 55})
        );
    }

    #[test]
    fn vehicle_ref_path_segment() {
        assert_eq!(VehicleRef::Id(12).as_path_segment(), "12");
        assert_eq!(VehicleRef::from("ABT-0123").as_path_segment(), "ABT-0123");
    }

    #[test]
    fn assertion_claims_flatten_extras() {
        let mut extra = serde_json::Map::new();
        extra.insert("posto".into(), serde_json::json!("1º SGT"));
        let claims = SsoAssertionClaims {
            sub: "2".into(),
            name: None,
            email: "a@b.com".into(),
            origin: "sigo".into(),
            iat: 100,
            exp: 190,
            extra,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["posto"], "1º SGT");
        assert_eq!(value["origin"], "sigo");
        assert_eq!(value["sub"], "2");
    }
}
