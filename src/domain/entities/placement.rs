use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::validation::{validate_code, validate_not_blank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Placement {
    pub id: Uuid,
    pub company_name: String,
    pub students_placed: i32,
    pub year: i32,
    pub branch: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPlacementRequest {
    #[validate(length(min = 1, max = 120), custom(function = "validate_not_blank"))]
    pub company_name: String,

    #[validate(range(min = 0, max = 100000, message = "Must be between 0 and 100000"))]
    pub students_placed: i32,

    #[validate(range(min = 1950, max = 2100, message = "Must be between 1950 and 2100"))]
    pub year: i32,

    #[validate(custom(function = "validate_code"))]
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementInsert {
    pub company_name: String,
    pub students_placed: i32,
    pub year: i32,
    pub branch: String,
    pub created_by: Uuid,
}

impl NewPlacementRequest {
    pub fn prepare_for_insert(self, created_by: Uuid) -> PlacementInsert {
        PlacementInsert {
            company_name: self.company_name.trim().to_string(),
            students_placed: self.students_placed,
            year: self.year,
            branch: self.branch.trim().to_string(),
            created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_counts_are_rejected() {
        let request = NewPlacementRequest {
            company_name: "Google".into(),
            students_placed: -1,
            year: 2024,
            branch: "CSE".into(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("students_placed"));
    }
}
