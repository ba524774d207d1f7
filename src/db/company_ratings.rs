//! Database queries and read-time aggregation for company ratings.
//!
//! Statistics are computed at read time over the stored rows; there is no
//! materialized aggregate table. Company names group by exact,
//! case-sensitive equality.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, Set,
    Statement,
};
use uuid::Uuid;

use crate::entity::company_rating::{self, ActiveModel, Entity as Rating};
use crate::entity::job_application;
use crate::error::{AppError, AppResult};
use crate::models::{CompanyStats, CreateCompanyRatingRequest, TopCompany};

use super::DbPool;

/// Compute aggregate statistics over one company's ratings.
///
/// Each sub-rating mean averages only the rows where that dimension is
/// present. An empty slice yields count 0 and all means absent - there is
/// no division by zero.
pub fn compute_stats(company_name: &str, ratings: &[company_rating::Model]) -> CompanyStats {
    fn mean(values: impl Iterator<Item = i16>) -> Option<f64> {
        let collected: Vec<i16> = values.collect();
        if collected.is_empty() {
            return None;
        }
        let sum: i64 = collected.iter().map(|v| *v as i64).sum();
        Some(sum as f64 / collected.len() as f64)
    }

    CompanyStats {
        company_name: company_name.to_string(),
        ratings_count: ratings.len() as u64,
        avg_overall: mean(ratings.iter().map(|r| r.overall_rating)),
        avg_interview_process: mean(ratings.iter().filter_map(|r| r.interview_process_rating)),
        avg_work_life_balance: mean(ratings.iter().filter_map(|r| r.work_life_balance_rating)),
        avg_compensation: mean(ratings.iter().filter_map(|r| r.compensation_rating)),
        avg_career_growth: mean(ratings.iter().filter_map(|r| r.career_growth_rating)),
    }
}

impl DbPool {
    /// Insert a new company rating.
    ///
    /// When the rating references a job application, the application must
    /// belong to the same user.
    pub async fn insert_rating(
        &self,
        user_id: Uuid,
        request: &CreateCompanyRatingRequest,
    ) -> AppResult<company_rating::Model> {
        if let Some(application_id) = request.job_application_id {
            let owned = job_application::Entity::find_by_id(application_id)
                .filter(job_application::Column::UserId.eq(user_id))
                .one(self.connection())
                .await
                .map_err(|e| AppError::Database(format!("Failed to check application: {}", e)))?;

            if owned.is_none() {
                return Err(AppError::NotFound(format!(
                    "Job application {}",
                    application_id
                )));
            }
        }

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            job_application_id: Set(request.job_application_id),
            company_name: Set(request.company_name.trim().to_string()),
            overall_rating: Set(request.overall_rating),
            interview_process_rating: Set(request.interview_process_rating),
            work_life_balance_rating: Set(request.work_life_balance_rating),
            compensation_rating: Set(request.compensation_rating),
            career_growth_rating: Set(request.career_growth_rating),
            review: Set(request.review.clone()),
            pros: Set(request.pros.clone()),
            cons: Set(request.cons.clone()),
            anonymous: Set(request.anonymous),
            created_at: Set(Utc::now()),
        };

        let inserted = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert rating: {}", e)))?;

        Ok(inserted)
    }

    /// List the caller's own ratings, newest first.
    pub async fn list_my_ratings(&self, user_id: Uuid) -> AppResult<Vec<company_rating::Model>> {
        let ratings = Rating::find()
            .filter(company_rating::Column::UserId.eq(user_id))
            .order_by_desc(company_rating::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list ratings: {}", e)))?;

        Ok(ratings)
    }

    /// Fetch every rating for one company (exact name match), newest first.
    pub async fn list_ratings_for_company(
        &self,
        company_name: &str,
    ) -> AppResult<Vec<company_rating::Model>> {
        let ratings = Rating::find()
            .filter(company_rating::Column::CompanyName.eq(company_name))
            .order_by_desc(company_rating::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list company ratings: {}", e)))?;

        Ok(ratings)
    }

    /// Top-rated companies: mean overall rating per company over groups
    /// with at least `min_ratings` ratings, sorted by mean descending and
    /// company name ascending, truncated to `limit`.
    pub async fn top_rated_companies(
        &self,
        min_ratings: u64,
        limit: u64,
    ) -> AppResult<Vec<TopCompany>> {
        #[derive(Debug, FromQueryResult)]
        struct TopRow {
            company_name: String,
            avg_overall: f64,
            ratings_count: i64,
        }

        let rows: Vec<TopRow> = TopRow::find_by_statement(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            SELECT
                company_name,
                AVG(overall_rating)::double precision AS avg_overall,
                COUNT(*) AS ratings_count
            FROM company_ratings
            GROUP BY company_name
            HAVING COUNT(*) >= $1
            ORDER BY avg_overall DESC, company_name ASC
            LIMIT $2
            "#,
            [(min_ratings as i64).into(), (limit as i64).into()],
        ))
        .all(self.connection())
        .await
        .map_err(|e| AppError::Database(format!("Failed to get top companies: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| TopCompany {
                company_name: row.company_name,
                avg_overall: row.avg_overall,
                ratings_count: row.ratings_count,
            })
            .collect())
    }

    /// Delete one of the caller's ratings.
    pub async fn delete_rating(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let result = Rating::delete_many()
            .filter(company_rating::Column::Id.eq(id))
            .filter(company_rating::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete rating: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Company rating {}", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(overall: i16, interview: Option<i16>) -> company_rating::Model {
        company_rating::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_application_id: None,
            company_name: "Acme".to_string(),
            overall_rating: overall,
            interview_process_rating: interview,
            work_life_balance_rating: None,
            compensation_rating: None,
            career_growth_rating: None,
            review: None,
            pros: None,
            cons: None,
            anonymous: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_mean_over_three_ratings() {
        let ratings = vec![rating(5, None), rating(4, None), rating(3, None)];
        let stats = compute_stats("Acme", &ratings);

        assert_eq!(stats.ratings_count, 3);
        assert_eq!(stats.avg_overall, Some(4.0));
        assert_eq!(stats.avg_interview_process, None);
    }

    #[test]
    fn test_stats_empty_company() {
        let stats = compute_stats("Nowhere", &[]);

        assert_eq!(stats.ratings_count, 0);
        assert_eq!(stats.avg_overall, None);
        assert_eq!(stats.avg_work_life_balance, None);
    }

    #[test]
    fn test_sub_rating_mean_skips_absent_rows() {
        // Only two of three rows carry the interview dimension; the mean
        // averages those two.
        let ratings = vec![rating(5, Some(2)), rating(4, Some(4)), rating(3, None)];
        let stats = compute_stats("Acme", &ratings);

        assert_eq!(stats.avg_overall, Some(4.0));
        assert_eq!(stats.avg_interview_process, Some(3.0));
    }

    #[test]
    fn test_stats_fractional_mean() {
        let ratings = vec![rating(5, None), rating(4, None)];
        let stats = compute_stats("Acme", &ratings);

        assert_eq!(stats.avg_overall, Some(4.5));
    }
}
