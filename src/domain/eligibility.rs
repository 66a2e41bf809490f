//! Whether a student may apply to a job.
//!
//! Pure and synchronous: the same profile and job always give the same answer,
//! and the order of the allowed-branch or allowed-course lists never matters.

use derive_more::Display;

use crate::entities::{job::Job, profile::StudentProfile};

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
pub enum Ineligibility {
    #[display("Complete your profile (CGPA, branch and course) before applying")]
    IncompleteProfile,

    #[display("CGPA is below the minimum required for this job")]
    GradeBelowMinimum,

    #[display("Your branch is not eligible for this job")]
    BranchNotAllowed,

    #[display("Your course is not eligible for this job")]
    CourseNotAllowed,
}

/// Returns the first reason the student cannot apply, checking grade, then
/// branch, then course.
pub fn check_eligibility(profile: Option<&StudentProfile>, job: &Job) -> Result<(), Ineligibility> {
    let (cgpa, branch, course) = profile
        .and_then(StudentProfile::academic_record)
        .ok_or(Ineligibility::IncompleteProfile)?;

    if cgpa < job.min_cgpa {
        return Err(Ineligibility::GradeBelowMinimum);
    }
    if !contains_code(&job.allowed_branches, branch) {
        return Err(Ineligibility::BranchNotAllowed);
    }
    if !contains_code(&job.allowed_courses, course) {
        return Err(Ineligibility::CourseNotAllowed);
    }
    Ok(())
}

pub fn is_eligible(profile: Option<&StudentProfile>, job: &Job) -> bool {
    check_eligibility(profile, job).is_ok()
}

fn contains_code(allowed: &[String], code: &str) -> bool {
    let code = code.trim();
    allowed.iter().any(|candidate| candidate.trim() == code)
}
