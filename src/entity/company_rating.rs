//! Company rating entity.
//!
//! Rows with `anonymous = true` must never expose `user_id` outside the
//! owning user's own listing; the redaction happens at DTO conversion.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "company_ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_application_id: Option<Uuid>,
    pub company_name: String,
    pub overall_rating: i16,
    pub interview_process_rating: Option<i16>,
    pub work_life_balance_rating: Option<i16>,
    pub compensation_rating: Option<i16>,
    pub career_growth_rating: Option<i16>,
    pub review: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub anonymous: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job_application::Entity",
        from = "Column::JobApplicationId",
        to = "super::job_application::Column::Id"
    )]
    Application,
}

impl Related<super::job_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
