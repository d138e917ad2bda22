use std::sync::Arc;

use crate::{
    application::ports::{jobs::JobScheduler, time::Clock},
    domain::article::{ArticleReadRepository, ArticleWriteRepository, TagRepository},
};

/// Periodic upkeep run by the maintenance binary.
pub struct MaintenanceService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) jobs: Arc<dyn JobScheduler>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) sweep_limit: u32,
}

impl MaintenanceService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        write_repo: Arc<dyn ArticleWriteRepository>,
        tag_repo: Arc<dyn TagRepository>,
        jobs: Arc<dyn JobScheduler>,
        clock: Arc<dyn Clock>,
        sweep_limit: u32,
    ) -> Self {
        Self {
            read_repo,
            write_repo,
            tag_repo,
            jobs,
            clock,
            sweep_limit,
        }
    }
}
