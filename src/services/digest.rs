//! Digest notification tasks.
//!
//! Two fixed-interval background jobs: a daily digest (new applications and
//! upcoming follow-ups per user) and a weekly summary (application counts
//! by status per user). Both are pure read-and-notify passes over the
//! database; the result is posted as JSON to the configured webhook.
//! Failures are logged and never affect request handling.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{json, Value as JsonValue};
use tokio::time::interval;
use tracing::{error, info};

use crate::db::job_applications::{UserApplicationCount, UserStatusCount};
use crate::db::DbPool;
use crate::entity::job_application;
use crate::error::AppResult;

/// Configuration for the digest tasks.
#[derive(Clone)]
pub struct DigestConfig {
    /// Webhook receiving digest payloads; digests are disabled when unset.
    pub webhook_url: Option<String>,
    /// How often to run the daily digest (in seconds).
    pub daily_interval_secs: u64,
    /// How often to run the weekly summary (in seconds).
    pub weekly_interval_secs: u64,
}

/// Start the digest background tasks.
///
/// Spawns one tokio task per digest. Each tick reads the database and posts
/// one JSON payload per run to the webhook.
pub fn start_digest_tasks(pool: Arc<DbPool>, config: DigestConfig) {
    let Some(webhook_url) = config.webhook_url.clone() else {
        info!("Digest notifications disabled (no webhook configured)");
        return;
    };

    let client = reqwest::Client::new();

    {
        let pool = pool.clone();
        let client = client.clone();
        let webhook_url = webhook_url.clone();
        let interval_secs = config.daily_interval_secs;
        tokio::spawn(async move {
            info!(
                "Starting daily digest task (interval: {} seconds)",
                interval_secs
            );
            let mut ticker = interval(Duration::from_secs(interval_secs));
            // The first tick fires immediately; skip it so a restart does
            // not double-send.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = run_daily_digest(&pool, &client, &webhook_url).await {
                    error!("Daily digest error: {}", e);
                }
            }
        });
    }

    {
        let interval_secs = config.weekly_interval_secs;
        tokio::spawn(async move {
            info!(
                "Starting weekly summary task (interval: {} seconds)",
                interval_secs
            );
            let mut ticker = interval(Duration::from_secs(interval_secs));
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = run_weekly_summary(&pool, &client, &webhook_url).await {
                    error!("Weekly summary error: {}", e);
                }
            }
        });
    }
}

/// Run one daily digest cycle.
async fn run_daily_digest(
    pool: &DbPool,
    client: &reqwest::Client,
    webhook_url: &str,
) -> AppResult<()> {
    let now = Utc::now();
    let since = now - ChronoDuration::hours(24);

    let counts = pool.applications_created_since(since).await?;
    let today = now.date_naive();
    let follow_ups = pool
        .follow_ups_due_between(today, today + ChronoDuration::days(1))
        .await?;

    let entries = build_daily_entries(&counts, &follow_ups);
    if entries.is_empty() {
        return Ok(());
    }

    info!("Sending daily digest for {} users", entries.len());
    post_digest(client, webhook_url, "daily", entries).await
}

/// Run one weekly summary cycle.
async fn run_weekly_summary(
    pool: &DbPool,
    client: &reqwest::Client,
    webhook_url: &str,
) -> AppResult<()> {
    let since = Utc::now() - ChronoDuration::days(7);

    let counts = pool.status_counts_since(since).await?;
    let entries = build_weekly_entries(&counts);
    if entries.is_empty() {
        return Ok(());
    }

    info!("Sending weekly summary for {} users", entries.len());
    post_digest(client, webhook_url, "weekly", entries).await
}

/// Build one daily-digest entry per user with activity.
fn build_daily_entries(
    counts: &[UserApplicationCount],
    follow_ups: &[job_application::Model],
) -> Vec<JsonValue> {
    let mut by_user: BTreeMap<uuid::Uuid, (i64, Vec<JsonValue>)> = BTreeMap::new();

    for count in counts {
        by_user.entry(count.user_id).or_default().0 = count.count;
    }

    for app in follow_ups {
        by_user.entry(app.user_id).or_default().1.push(json!({
            "application_id": app.id,
            "company": app.company,
            "job_title": app.job_title,
            "follow_up_date": app.follow_up_date,
        }));
    }

    by_user
        .into_iter()
        .map(|(user_id, (new_applications, follow_ups))| {
            json!({
                "user_id": user_id,
                "new_applications": new_applications,
                "follow_ups": follow_ups,
            })
        })
        .collect()
}

/// Build one weekly-summary entry per user.
fn build_weekly_entries(counts: &[UserStatusCount]) -> Vec<JsonValue> {
    let mut by_user: BTreeMap<uuid::Uuid, BTreeMap<String, i64>> = BTreeMap::new();

    for row in counts {
        by_user
            .entry(row.user_id)
            .or_default()
            .insert(row.status.clone(), row.count);
    }

    by_user
        .into_iter()
        .map(|(user_id, by_status)| {
            let total: i64 = by_status.values().sum();
            json!({
                "user_id": user_id,
                "total_applications": total,
                "by_status": by_status,
            })
        })
        .collect()
}

/// Post one digest payload to the webhook.
async fn post_digest(
    client: &reqwest::Client,
    webhook_url: &str,
    kind: &str,
    entries: Vec<JsonValue>,
) -> AppResult<()> {
    let payload = json!({
        "digest": kind,
        "generated_at": Utc::now(),
        "entries": entries,
    });

    match client.post(webhook_url).json(&payload).send().await {
        Ok(response) if response.status().is_success() => Ok(()),
        Ok(response) => {
            error!(
                "Digest webhook returned status {} for {} digest",
                response.status(),
                kind
            );
            Ok(())
        }
        Err(e) => {
            error!("Failed to post {} digest: {}", kind, e);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn application(user_id: Uuid, company: &str) -> job_application::Model {
        let now = Utc::now();
        job_application::Model {
            id: Uuid::new_v4(),
            user_id,
            job_title: "Engineer".to_string(),
            company: company.to_string(),
            application_date: now.date_naive(),
            status: "applied".to_string(),
            follow_up_date: Some(now.date_naive()),
            notes: None,
            feedback: None,
            match_score: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_daily_entries_merge_counts_and_follow_ups() {
        let user = Uuid::new_v4();
        let counts = vec![UserApplicationCount {
            user_id: user,
            count: 2,
        }];
        let follow_ups = vec![application(user, "Acme")];

        let entries = build_daily_entries(&counts, &follow_ups);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["new_applications"], 2);
        assert_eq!(entries[0]["follow_ups"].as_array().unwrap().len(), 1);
        assert_eq!(entries[0]["follow_ups"][0]["company"], "Acme");
    }

    #[test]
    fn test_daily_entries_follow_up_only_user() {
        // A user with a due follow-up but no new applications still gets an
        // entry, with a zero count.
        let user = Uuid::new_v4();
        let entries = build_daily_entries(&[], &[application(user, "Acme")]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["new_applications"], 0);
    }

    #[test]
    fn test_weekly_entries_totals() {
        let user = Uuid::new_v4();
        let counts = vec![
            UserStatusCount {
                user_id: user,
                status: "applied".to_string(),
                count: 3,
            },
            UserStatusCount {
                user_id: user,
                status: "interview".to_string(),
                count: 1,
            },
        ];

        let entries = build_weekly_entries(&counts);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["total_applications"], 4);
        assert_eq!(entries[0]["by_status"]["applied"], 3);
        assert_eq!(entries[0]["by_status"]["interview"], 1);
    }

    #[test]
    fn test_no_activity_produces_no_entries() {
        assert!(build_daily_entries(&[], &[]).is_empty());
        assert!(build_weekly_entries(&[]).is_empty());
    }
}
