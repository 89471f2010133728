//! Person records from a node CSV, grouped by professional domain.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::ingest::split_record;

const NAME_COLUMN: usize = 1;
const GENDER_COLUMN: usize = 5;
const DOMAIN_COLUMN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub name: String,
    pub gender: String,
    pub domain: String,
}

impl Person {
    pub fn is_male(&self) -> bool {
        self.gender == "Male"
    }
}

pub fn read_people<R: BufRead>(reader: R, settings: &Settings) -> Result<Vec<Person>> {
    let mut people = Vec::new();

    for (n, line) in reader.lines().enumerate() {
        let line_no = n + 1;
        let line = line.with_context(|| format!("reading line {}", line_no))?;
        if (line_no == 1 && settings.has_header) || line.trim().is_empty() {
            continue;
        }

        let mut fields = split_record(&line, settings.delimiter);
        if fields.len() <= DOMAIN_COLUMN {
            bail!(
                "line {}: expected at least {} fields, found {}",
                line_no,
                DOMAIN_COLUMN + 1,
                fields.len()
            );
        }
        let domain = std::mem::take(&mut fields[DOMAIN_COLUMN]);
        let gender = std::mem::take(&mut fields[GENDER_COLUMN]);
        let name = std::mem::take(&mut fields[NAME_COLUMN]);
        people.push(Person {
            name,
            gender,
            domain,
        });
    }

    info!(people = people.len(), "loaded person records");
    Ok(people)
}

pub fn load_people(path: &Path, settings: &Settings) -> Result<Vec<Person>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_people(BufReader::new(file), settings)
        .with_context(|| format!("loading people {}", path.display()))
}

/// Distinct domains in first-seen order.
pub fn domains(people: &[Person]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for p in people {
        if !seen.contains(&p.domain.as_str()) {
            seen.push(&p.domain);
        }
    }
    seen
}

pub fn in_domain<'a>(people: &'a [Person], domain: &str) -> Vec<&'a Person> {
    people.iter().filter(|p| p.domain == domain).collect()
}

/// Share of men and women in a selection of people. Any gender other than
/// `Male` counts toward the female share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderBreakdown {
    /// `None` when computed over everyone.
    pub domain: Option<String>,
    pub people: usize,
    pub male_percent: f64,
    pub female_percent: f64,
}

impl GenderBreakdown {
    pub fn compute(domain: Option<&str>, selection: &[&Person]) -> Result<Self> {
        if selection.is_empty() {
            match domain {
                Some(d) => bail!("no people in domain '{}'", d),
                None => bail!("no people to summarize"),
            }
        }

        let total = selection.len();
        let men = selection.iter().filter(|p| p.is_male()).count();
        let women = total - men;

        Ok(Self {
            domain: domain.map(str::to_string),
            people: total,
            male_percent: men as f64 / total as f64 * 100.0,
            female_percent: women as f64 / total as f64 * 100.0,
        })
    }
}

impl fmt::Display for GenderBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<28} {:>7} {:>7.2}% {:>7.2}%",
            self.domain.as_deref().unwrap_or("ALL"),
            self.people,
            self.male_percent,
            self.female_percent
        )
    }
}
