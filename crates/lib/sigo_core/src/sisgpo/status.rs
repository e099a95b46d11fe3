//! Vehicle status sync (fire-and-forget).
//!
//! After a vehicle is dispatched to or released from an occurrence, SIGO
//! notifies SISGPO's status-integration endpoint. The notification is
//! best-effort: every failure is absorbed here and logged, and the caller's
//! business transaction proceeds regardless. Callers are expected to
//! dispatch it as its own task (`tokio::spawn`) so it outlives the
//! triggering request; the only bound is the sync timeout.

use tracing::{debug, error};

use super::{Sisgpo, SisgpoError};
use crate::models::sisgpo::{StatusSyncPayload, VehicleRef, VehicleStatus};

impl Sisgpo {
    /// Notify SISGPO of a vehicle status transition. Never fails.
    pub async fn sync_status(
        &self,
        vehicle: &VehicleRef,
        status: VehicleStatus,
        ocorrencia_id: i64,
        bearer: Option<&str>,
    ) {
        match self
            .try_sync_status(vehicle, status, ocorrencia_id, bearer)
            .await
        {
            Ok(()) => {
                debug!(vehicle = %vehicle, status = %status, ocorrencia_id, "vehicle status synced");
            }
            Err(e) => {
                error!(
                    vehicle = %vehicle,
                    status = %status,
                    ocorrencia_id,
                    error = %e,
                    "vehicle status sync failed"
                );
            }
        }
    }

    /// Mark a vehicle as engaged on an occurrence (`EMPENHADA`).
    pub async fn mark_engaged(
        &self,
        vehicle: &VehicleRef,
        ocorrencia_id: i64,
        bearer: Option<&str>,
    ) {
        self.sync_status(vehicle, VehicleStatus::Empenhada, ocorrencia_id, bearer)
            .await
    }

    /// Mark a vehicle as free for dispatch (`DISPONIVEL`).
    pub async fn mark_available(
        &self,
        vehicle: &VehicleRef,
        ocorrencia_id: i64,
        bearer: Option<&str>,
    ) {
        self.sync_status(vehicle, VehicleStatus::Disponivel, ocorrencia_id, bearer)
            .await
    }

    async fn try_sync_status(
        &self,
        vehicle: &VehicleRef,
        status: VehicleStatus,
        ocorrencia_id: i64,
        bearer: Option<&str>,
    ) -> Result<(), SisgpoError> {
        let url = self.endpoint(&format!(
            "/api/admin/viaturas/{}/status-integracao",
            vehicle.as_path_segment()
        ));

        let mut req = self
            .http()
            .patch(&url)
            .timeout(self.config().sync_timeout)
            .json(&StatusSyncPayload {
                status,
                ocorrencia_id,
            });
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                SisgpoError::Connectivity(format!(
                    "status sync timed out after {:?}",
                    self.config().sync_timeout
                ))
            } else if e.is_connect() {
                SisgpoError::Connectivity(e.to_string())
            } else {
                SisgpoError::Integration(format!("status sync request: {e}"))
            }
        })?;

        if !resp.status().is_success() {
            let http_status = resp.status();
            let body = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(SisgpoError::Integration(format!(
                "status sync HTTP {http_status}: {body}"
            )));
        }

        Ok(())
    }
}
