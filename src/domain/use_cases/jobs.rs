use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    eligibility::{check_eligibility, is_eligible},
    entities::{
        application::JobApplication,
        job::{Job, JobChanges, JobListing, NewJobRequest, UpdateJobRequest},
        token::Claims,
    },
    errors::{AppError, AuthError},
    repositories::{application::ApplicationRepository, job::JobRepository, profile::ProfileRepository},
};

#[derive(Clone)]
pub struct JobHandler {
    pub job_repo: Arc<dyn JobRepository>,
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub application_repo: Arc<dyn ApplicationRepository>,
}

impl JobHandler {
    pub fn new(
        job_repo: Arc<dyn JobRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
    ) -> Self {
        JobHandler { job_repo, profile_repo, application_repo }
    }

    /// Every job, newest first. Students also see whether they are eligible
    /// and whether they already applied.
    pub async fn list_jobs(&self, claims: &Claims) -> Result<Vec<JobListing>, AppError> {
        let jobs = self.job_repo.list_jobs().await?;
        if claims.is_admin() {
            return Ok(jobs.into_iter().map(JobListing::plain).collect());
        }

        let student_id = claims.user_id()?;
        let profile = self.profile_repo.get_profile(&student_id).await?;
        let applied: HashSet<Uuid> = self
            .application_repo
            .list_by_student(&student_id)
            .await?
            .into_iter()
            .map(|a| a.job_id)
            .collect();

        Ok(jobs
            .into_iter()
            .map(|job| JobListing {
                eligible: Some(is_eligible(profile.as_ref(), &job)),
                has_applied: Some(applied.contains(&job.id)),
                job,
            })
            .collect())
    }

    pub async fn eligible_jobs(&self, user_id: &Uuid) -> Result<Vec<Job>, AppError> {
        let profile = self.profile_repo.get_profile(user_id).await?;
        let jobs = self.job_repo.list_jobs().await?;
        Ok(jobs
            .into_iter()
            .filter(|job| is_eligible(profile.as_ref(), job))
            .collect())
    }

    pub async fn get_job(&self, id: &Uuid) -> Result<Job, AppError> {
        self.job_repo
            .get_job(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".into()))
    }

    pub async fn create_job(&self, request: NewJobRequest, posted_by: &Uuid) -> Result<Job, AppError> {
        request.validate()?;
        let job = self.job_repo.create_job(&request.prepare_for_insert(*posted_by)).await?;
        tracing::info!(job_id = %job.id, company = %job.company_name, "Job posted");
        Ok(job)
    }

    pub async fn update_job(&self, id: &Uuid, request: UpdateJobRequest) -> Result<Job, AppError> {
        request.validate()?;
        let changes = JobChanges::from(request);
        self.job_repo
            .update_job(id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".into()))
    }

    pub async fn delete_job(&self, id: &Uuid) -> Result<(), AppError> {
        if !self.job_repo.delete_job(id).await? {
            return Err(AppError::NotFound("Job not found".into()));
        }
        tracing::info!(job_id = %id, "Job deleted");
        Ok(())
    }

    pub async fn applications_for_job(&self, job_id: &Uuid) -> Result<Vec<JobApplication>, AppError> {
        self.get_job(job_id).await?;
        self.application_repo.list_by_job(job_id).await
    }

    /// Records an application after checking, in order: the job exists, its
    /// deadline has not passed, the student is eligible, and no earlier
    /// application exists.
    pub async fn apply(&self, claims: &Claims, job_id: &Uuid, now: DateTime<Utc>) -> Result<JobApplication, AppError> {
        if claims.is_admin() {
            return Err(AuthError::Forbidden("Only students can apply to jobs".into()).into());
        }
        let student_id = claims.user_id()?;
        let job = self.get_job(job_id).await?;

        if !job.is_open_at(now) {
            return Err(AppError::InvalidInput("Application deadline has passed".into()));
        }

        let profile = self.profile_repo.get_profile(&student_id).await?;
        check_eligibility(profile.as_ref(), &job)
            .map_err(|reason| AppError::InvalidInput(reason.to_string()))?;

        let application = self
            .application_repo
            .insert_if_absent(job_id, &student_id)
            .await?
            .ok_or_else(|| AppError::Conflict("Already applied to this job".into()))?;

        tracing::info!(job_id = %job_id, student_id = %student_id, "Application recorded");
        Ok(application)
    }

    pub async fn my_applications(&self, student_id: &Uuid) -> Result<Vec<JobApplication>, AppError> {
        self.application_repo.list_by_student(student_id).await
    }
}
