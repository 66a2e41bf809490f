//! Group-and-sum folds over placement records for the statistics charts.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::entities::placement::Placement;

/// The fields of a placement record the folds read.
pub trait PlacementRecord {
    fn company_name(&self) -> &str;
    fn students_placed(&self) -> i64;
    fn year(&self) -> i32;
    fn branch(&self) -> &str;
}

impl PlacementRecord for Placement {
    fn company_name(&self) -> &str {
        &self.company_name
    }

    fn students_placed(&self) -> i64 {
        i64::from(self.students_placed)
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn branch(&self) -> &str {
        &self.branch
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyTotal {
    pub company_name: String,
    pub students_placed: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTotal {
    pub branch: String,
    pub students_placed: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTotal {
    pub year: i32,
    pub students_placed: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementStats {
    pub company_wise: Vec<CompanyTotal>,
    pub branch_wise: Vec<BranchTotal>,
    pub year_wise: Vec<YearTotal>,
    pub total_students: i64,
    pub has_data: bool,
}

// Sums counts per key, emitting keys in the order they first appear.
fn group_sum<R, K, F>(records: &[R], key: F) -> Vec<(K, i64)>
where
    R: PlacementRecord,
    K: Eq + Hash + Clone,
    F: Fn(&R) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut totals: Vec<(K, i64)> = Vec::new();
    for record in records {
        let k = key(record);
        match index.get(&k) {
            Some(&at) => totals[at].1 += record.students_placed(),
            None => {
                index.insert(k.clone(), totals.len());
                totals.push((k, record.students_placed()));
            }
        }
    }
    totals
}

pub fn company_wise<R: PlacementRecord>(records: &[R]) -> Vec<CompanyTotal> {
    group_sum(records, |r| r.company_name().to_string())
        .into_iter()
        .map(|(company_name, students_placed)| CompanyTotal { company_name, students_placed })
        .collect()
}

pub fn branch_wise<R: PlacementRecord>(records: &[R]) -> Vec<BranchTotal> {
    group_sum(records, |r| r.branch().to_string())
        .into_iter()
        .map(|(branch, students_placed)| BranchTotal { branch, students_placed })
        .collect()
}

pub fn year_wise<R: PlacementRecord>(records: &[R]) -> Vec<YearTotal> {
    let mut totals: Vec<YearTotal> = group_sum(records, |r| r.year())
        .into_iter()
        .map(|(year, students_placed)| YearTotal { year, students_placed })
        .collect();
    totals.sort_by_key(|t| t.year);
    totals
}

impl PlacementStats {
    pub fn from_records<R: PlacementRecord>(records: &[R]) -> Self {
        PlacementStats {
            company_wise: company_wise(records),
            branch_wise: branch_wise(records),
            year_wise: year_wise(records),
            total_students: records.iter().map(PlacementRecord::students_placed).sum(),
            has_data: !records.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, i64, i32, &'static str);

    impl PlacementRecord for Row {
        fn company_name(&self) -> &str {
            self.0
        }

        fn students_placed(&self) -> i64 {
            self.1
        }

        fn year(&self) -> i32 {
            self.2
        }

        fn branch(&self) -> &str {
            self.3
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            Row("Google", 5, 2023, "CSE"),
            Row("Google", 3, 2024, "CSE"),
            Row("Infosys", 10, 2023, "ECE"),
        ]
    }

    #[test]
    fn folds_sample_records() {
        let records = sample();
        assert_eq!(
            company_wise(&records),
            vec![
                CompanyTotal { company_name: "Google".into(), students_placed: 8 },
                CompanyTotal { company_name: "Infosys".into(), students_placed: 10 },
            ]
        );
        assert_eq!(
            year_wise(&records),
            vec![
                YearTotal { year: 2023, students_placed: 15 },
                YearTotal { year: 2024, students_placed: 3 },
            ]
        );
        assert_eq!(
            branch_wise(&records),
            vec![
                BranchTotal { branch: "CSE".into(), students_placed: 8 },
                BranchTotal { branch: "ECE".into(), students_placed: 10 },
            ]
        );
    }

    #[test]
    fn keeps_first_occurrence_order_and_sorts_years() {
        let records = vec![
            Row("Wipro", 1, 2025, "IT"),
            Row("Amazon", 2, 2021, "CSE"),
            Row("Wipro", 4, 2022, "CSE"),
        ];
        let companies: Vec<_> = company_wise(&records).into_iter().map(|c| c.company_name).collect();
        assert_eq!(companies, vec!["Wipro", "Amazon"]);
        let branches: Vec<_> = branch_wise(&records).into_iter().map(|b| b.branch).collect();
        assert_eq!(branches, vec!["IT", "CSE"]);
        let years: Vec<_> = year_wise(&records).into_iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2021, 2022, 2025]);
    }

    #[test]
    fn group_sums_preserve_the_total() {
        let records = sample();
        let total: i64 = records.iter().map(|r| r.1).sum();
        let stats = PlacementStats::from_records(&records);
        assert_eq!(stats.total_students, total);
        assert_eq!(stats.company_wise.iter().map(|c| c.students_placed).sum::<i64>(), total);
        assert_eq!(stats.branch_wise.iter().map(|b| b.students_placed).sum::<i64>(), total);
        assert_eq!(stats.year_wise.iter().map(|y| y.students_placed).sum::<i64>(), total);
        assert!(stats.has_data);
    }

    #[test]
    fn folds_are_idempotent() {
        let records = sample();
        assert_eq!(PlacementStats::from_records(&records), PlacementStats::from_records(&records));
    }

    #[test]
    fn empty_input_yields_empty_stats() {
        let stats = PlacementStats::from_records::<Row>(&[]);
        assert!(stats.company_wise.is_empty());
        assert!(stats.branch_wise.is_empty());
        assert!(stats.year_wise.is_empty());
        assert_eq!(stats.total_students, 0);
        assert!(!stats.has_data);
    }

    #[test]
    fn large_counts_do_not_overflow() {
        let records = vec![Row("Big", i64::from(i32::MAX), 2024, "CSE"), Row("Big", i64::from(i32::MAX), 2024, "CSE")];
        assert_eq!(company_wise(&records)[0].students_placed, 2 * i64::from(i32::MAX));
    }
}
