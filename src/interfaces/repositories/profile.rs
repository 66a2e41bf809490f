use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::profile::{ProfileChanges, StudentProfile, PROFILE_COLUMNS},
    errors::{unique_violation, AppError},
    repositories::sqlx_repo::SqlxProfileRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get_profile(&self, user_id: &Uuid) -> Result<Option<StudentProfile>, AppError>;

    /// Creates the profile on first write; otherwise applies only the fields
    /// the changes touch.
    async fn upsert_profile(&self, user_id: &Uuid, changes: &ProfileChanges) -> Result<StudentProfile, AppError>;
}

impl SqlxProfileRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProfileRepo { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn get_profile(&self, user_id: &Uuid) -> Result<Option<StudentProfile>, AppError> {
        let profile = sqlx::query_as::<_, StudentProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM student_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn upsert_profile(&self, user_id: &Uuid, changes: &ProfileChanges) -> Result<StudentProfile, AppError> {
        let (roll_set, roll_number) = changes.roll_number.clone().into_update();
        let (cgpa_set, cgpa) = changes.cgpa.clone().into_update();
        let (branch_set, branch) = changes.branch.clone().into_update();
        let (course_set, course) = changes.course.clone().into_update();
        let (phone_set, phone) = changes.phone.clone().into_update();
        let (resume_set, resume_url) = changes.resume_url.clone().into_update();

        let sql = format!(
            r#"
            INSERT INTO student_profiles (user_id, roll_number, cgpa, branch, course, phone, resume_url)
            VALUES ($1, $3, $5::NUMERIC, $7, $9, $11, $13)
            ON CONFLICT (user_id) DO UPDATE SET
                roll_number = CASE WHEN $2 THEN EXCLUDED.roll_number ELSE student_profiles.roll_number END,
                cgpa = CASE WHEN $4 THEN EXCLUDED.cgpa ELSE student_profiles.cgpa END,
                branch = CASE WHEN $6 THEN EXCLUDED.branch ELSE student_profiles.branch END,
                course = CASE WHEN $8 THEN EXCLUDED.course ELSE student_profiles.course END,
                phone = CASE WHEN $10 THEN EXCLUDED.phone ELSE student_profiles.phone END,
                resume_url = CASE WHEN $12 THEN EXCLUDED.resume_url ELSE student_profiles.resume_url END,
                updated_at = NOW()
            RETURNING {PROFILE_COLUMNS}
            "#
        );

        let profile = sqlx::query_as::<_, StudentProfile>(&sql)
            .bind(user_id)
            .bind(roll_set)
            .bind(roll_number)
            .bind(cgpa_set)
            .bind(cgpa.map(|g| g.to_string()))
            .bind(branch_set)
            .bind(branch)
            .bind(course_set)
            .bind(course)
            .bind(phone_set)
            .bind(phone)
            .bind(resume_set)
            .bind(resume_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique_violation(e, "Roll number already in use"))?;

        Ok(profile)
    }
}
