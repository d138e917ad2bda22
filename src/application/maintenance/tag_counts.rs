use super::MaintenanceService;
use crate::application::{dto::TagCountReset, error::ApplicationResult};

impl MaintenanceService {
    /// Recomputes every article's cached tag count from its tag links.
    pub async fn reset_tag_counts(&self) -> ApplicationResult<TagCountReset> {
        let corrected = self.tag_repo.reset_tag_counts().await?;
        if corrected > 0 {
            tracing::warn!(corrected, "tag counts were out of sync");
        }
        Ok(TagCountReset { corrected })
    }
}
