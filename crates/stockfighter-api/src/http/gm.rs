/*
[INPUT]:  Level names, instance ids and judging verdicts
[OUTPUT]: Raw ApiResponse values from the game master API
[POS]:    HTTP layer - level control endpoints under /gm
[UPDATE]: When adding new game master endpoints
*/

use crate::http::{paths, ApiResponse, Result, StockfighterClient};
use crate::types::JudgeRequest;
use tracing::error;

impl StockfighterClient {
    /// Start a level; the reply carries the `instanceId` used by the other calls
    ///
    /// POST /gm/levels/{level}
    pub async fn gm_start(&self, level: &str) -> Result<ApiResponse> {
        let response = self.gm_post_empty(&paths::level(level)).await?;
        if !response.is_ok() {
            error!(level, error = %response.error_message(), "could not start level");
        }
        Ok(response)
    }

    /// GET /gm/instances/{instance}
    pub async fn gm_status(&self, instance_id: u64) -> Result<ApiResponse> {
        let response = self.gm_get(&paths::instance(instance_id)).await?;
        if !response.is_ok() {
            error!(instance_id, error = %response.error_message(), "could not get instance status");
        }
        Ok(response)
    }

    /// POST /gm/instances/{instance}/stop
    pub async fn gm_stop(&self, instance_id: u64) -> Result<ApiResponse> {
        self.instance_action(instance_id, "stop").await
    }

    /// POST /gm/instances/{instance}/restart
    ///
    /// Some older clients posted restarts to `/stop`; this always targets
    /// `/restart`, so it never stops the level by accident.
    pub async fn gm_restart(&self, instance_id: u64) -> Result<ApiResponse> {
        self.instance_action(instance_id, "restart").await
    }

    /// POST /gm/instances/{instance}/resume
    pub async fn gm_resume(&self, instance_id: u64) -> Result<ApiResponse> {
        self.instance_action(instance_id, "resume").await
    }

    /// Submit a verdict for judging
    ///
    /// POST /gm/instances/{instance}/judge
    pub async fn gm_judge(&self, instance_id: u64, verdict: &JudgeRequest) -> Result<ApiResponse> {
        let response = self
            .gm_post(&paths::instance_action(instance_id, "judge"), verdict)
            .await?;
        if !response.is_ok() {
            error!(instance_id, error = %response.error_message(), "could not submit verdict");
        }
        Ok(response)
    }

    async fn instance_action(&self, instance_id: u64, action: &'static str) -> Result<ApiResponse> {
        let response = self
            .gm_post_empty(&paths::instance_action(instance_id, action))
            .await?;
        if !response.is_ok() {
            error!(instance_id, action, error = %response.error_message(), "instance action failed");
        }
        Ok(response)
    }
}
