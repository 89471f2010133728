//! `adjgraph people` command - Gender breakdown per professional domain.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::RunOptions;
use crate::people::{domains, in_domain, load_people, GenderBreakdown, Person};
use crate::report::emit;

#[derive(Debug, Serialize)]
pub struct PeopleReport {
    pub domains: Vec<String>,
    pub breakdowns: Vec<GenderBreakdown>,
}

impl PeopleReport {
    /// Breakdown for `domain`, or for everyone followed by every domain.
    pub fn compute(people: &[Person], domain: Option<&str>) -> Result<Self> {
        let names = domains(people);
        let breakdowns = match domain {
            Some(d) => vec![GenderBreakdown::compute(Some(d), &in_domain(people, d))?],
            None => {
                let everyone: Vec<&Person> = people.iter().collect();
                let mut all = vec![GenderBreakdown::compute(None, &everyone)?];
                for &d in &names {
                    all.push(GenderBreakdown::compute(Some(d), &in_domain(people, d))?);
                }
                all
            }
        };

        Ok(Self {
            domains: names.into_iter().map(str::to_string).collect(),
            breakdowns,
        })
    }
}

impl fmt::Display for PeopleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Domains: [{}]", self.domains.join(", "))?;
        writeln!(
            f,
            "{:<28} {:>7} {:>8} {:>8}",
            "domain", "people", "male", "female"
        )?;
        for b in &self.breakdowns {
            writeln!(f, "{}", b)?;
        }
        Ok(())
    }
}

/// Execute the `people` command.
pub fn execute(input: &Path, domain: Option<&str>, opts: &RunOptions) -> Result<()> {
    let people = load_people(input, &opts.settings)?;
    emit(&PeopleReport::compute(&people, domain)?, opts.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, gender: &str, domain: &str) -> Person {
        Person {
            name: name.into(),
            gender: gender.into(),
            domain: domain.into(),
        }
    }

    fn sample() -> Vec<Person> {
        vec![
            person("Plato", "Male", "HUMANITIES"),
            person("Ada Lovelace", "Female", "SCIENCE & TECHNOLOGY"),
            person("Hypatia", "Female", "SCIENCE & TECHNOLOGY"),
            person("Cicero", "Male", "BUSINESS & LAW"),
        ]
    }

    #[test]
    fn test_report_all_domains() {
        let report = PeopleReport::compute(&sample(), None).unwrap();
        assert_eq!(report.domains.len(), 3);
        assert_eq!(report.breakdowns.len(), 4);
        assert_eq!(report.breakdowns[0].domain, None);
        assert_eq!(report.breakdowns[0].male_percent, 50.0);
        assert_eq!(report.breakdowns[2].female_percent, 100.0);
    }

    #[test]
    fn test_report_single_domain() {
        let report = PeopleReport::compute(&sample(), Some("HUMANITIES")).unwrap();
        assert_eq!(report.breakdowns.len(), 1);
        assert_eq!(report.breakdowns[0].male_percent, 100.0);
    }

    #[test]
    fn test_report_unknown_domain() {
        assert!(PeopleReport::compute(&sample(), Some("SPORTS")).is_err());
    }

    #[test]
    fn test_report_no_people() {
        assert!(PeopleReport::compute(&[], None).is_err());
    }
}
