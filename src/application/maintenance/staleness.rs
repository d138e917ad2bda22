use super::MaintenanceService;
use crate::{
    application::{dto::StalenessSweepReport, error::ApplicationResult, ports::jobs::Job},
    domain::article::{ArticleFilter, ArticleOrdering, ArticleScope, ArticleUpdate},
};

impl MaintenanceService {
    /// Queues a reminder for each stale, unarchived article whose author has
    /// not been reminded within the last week, and stamps
    /// `last_notified_author_at`. The stamp is bookkeeping: it leaves
    /// `updated_at` alone so the article stays stale until someone actually
    /// edits it, and it announces nothing to subscribers.
    pub async fn sweep_stale_articles(&self) -> ApplicationResult<StalenessSweepReport> {
        let now = self.clock.now();
        let scope = ArticleScope::stale(now)
            .filter(ArticleFilter::Unarchived)
            .filter(ArticleFilter::AuthorReminderDue(now))
            .order_by(ArticleOrdering::Current)
            .limit(self.sweep_limit);

        let candidates = self.read_repo.list(&scope).await?;
        let mut report = StalenessSweepReport::default();

        for article in candidates {
            report.examined += 1;
            if !article.ready_to_notify_author_of_staleness(now) {
                report.skipped_recently_notified += 1;
                continue;
            }

            let job = Job::stale_article_reminder(article.id, article.author_id);
            if let Err(err) = self.jobs.schedule(job).await {
                tracing::warn!(article_id = %article.id, error = %err, "failed to schedule staleness reminder");
                report.failed += 1;
                continue;
            }

            let stamp = ArticleUpdate::new(article.id, article.updated_at).with_author_notified_at(now);
            match self.write_repo.update(stamp).await {
                Ok(_) => report.reminded += 1,
                Err(err) => {
                    tracing::warn!(article_id = %article.id, error = %err, "failed to record staleness reminder");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            examined = report.examined,
            reminded = report.reminded,
            failed = report.failed,
            "staleness sweep finished"
        );
        Ok(report)
    }
}
