pub mod eligibility;
pub mod entities;
pub mod placement_stats;
pub mod use_cases;
