//! Country names for world-cup fields, weighted by population.
//!
//! Reads a CSV with `Country/Territory`, `Continent` and `2022 Population`
//! columns, then samples a fixed share of entrants per continent with
//! population-proportional weights. Falls back gracefully when the file is
//! missing so tournaments still run with generic team names.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use crate::sim::Rng;

pub const DEFAULT_WORLD_POPULATION_PATH: &str = "data/world_population.csv";

const COUNTRY_COLUMN: &str = "Country/Territory";
const CONTINENT_COLUMN: &str = "Continent";
const POPULATION_COLUMN: &str = "2022 Population";

/// Share of the field allocated per continent; the remainder goes to Europe.
const CONTINENT_SHARES: [(&str, f64); 5] = [
    ("Oceania", 0.05),
    ("North America", 0.08),
    ("South America", 0.10),
    ("Africa", 0.12),
    ("Asia", 0.25),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub name: String,
    pub population: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    continents: HashMap<String, Vec<Country>>,
}

impl CountryTable {
    pub fn continent(&self, name: &str) -> &[Country] {
        self.continents.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Draws `count` team names: a fixed share per continent, countries picked
    /// population-weighted without replacement within each continent.
    pub fn sample_names(&self, count: usize, rng: &mut Rng) -> Vec<String> {
        let mut names = Vec::with_capacity(count);
        for (continent, quota) in allocation(count) {
            let countries = self.continent(continent);
            let quota = quota.min(countries.len());
            if quota == 0 {
                continue;
            }
            let weights: Vec<u32> = countries.iter().map(|c| c.population.max(1)).collect();
            let mut picked: Vec<&str> = Vec::with_capacity(quota);
            while picked.len() < quota {
                let candidate = countries[rng.weighted_index(&weights)].name.as_str();
                if !picked.contains(&candidate) {
                    picked.push(candidate);
                }
            }
            names.extend(picked.into_iter().map(String::from));
        }
        names
    }
}

/// Per-continent entrant counts for a field of `count` teams.
pub fn allocation(count: usize) -> Vec<(&'static str, usize)> {
    let mut shares = Vec::with_capacity(CONTINENT_SHARES.len() + 1);
    let mut allocated = 0;
    for (continent, share) in CONTINENT_SHARES {
        let quota = (count as f64 * share).round() as usize;
        shares.push((continent, quota));
        allocated += quota;
    }
    shares.push(("Europe", count.saturating_sub(allocated)));
    shares
}

/// Loads the population table; `None` when the file is missing or the header
/// is unusable. Rows that fail to parse are skipped.
pub fn load_country_table(path: &Path) -> Option<CountryTable> {
    let mut reader = csv::Reader::from_path(path).ok()?;
    let headers = reader.headers().ok()?.clone();
    let country_col = headers.iter().position(|h| h == COUNTRY_COLUMN)?;
    let continent_col = headers.iter().position(|h| h == CONTINENT_COLUMN)?;
    let population_col = headers.iter().position(|h| h == POPULATION_COLUMN)?;

    let mut table = CountryTable::default();
    for record in reader.records() {
        // A malformed row drops that row, not the whole table.
        let Ok(record) = record else {
            continue;
        };
        let (Some(country), Some(continent), Some(raw_population)) = (
            record.get(country_col),
            record.get(continent_col),
            record.get(population_col),
        ) else {
            continue;
        };
        // Population cells use thousands separators.
        let Ok(population) = raw_population.replace(',', "").parse::<u32>() else {
            continue;
        };
        table
            .continents
            .entry(continent.to_string())
            .or_default()
            .push(Country {
                name: country.to_string(),
                population,
            });
    }
    Some(table)
}

/// World-cup entrant names: population-weighted countries when the table loads,
/// otherwise `"Team 1"..` placeholders.
pub fn pick_team_names(count: usize, path: &Path, rng: &mut Rng) -> Vec<String> {
    match load_country_table(path) {
        Some(table) => {
            let names = table.sample_names(count, rng);
            if names.len() == count {
                return names;
            }
            debug!(
                "country table at {} only yielded {} of {count} names, falling back",
                path.display(),
                names.len()
            );
            (1..=count).map(|i| format!("Team {i}")).collect()
        }
        None => {
            debug!(
                "no country table at {}, using generic team names",
                path.display()
            );
            (1..=count).map(|i| format!("Team {i}")).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn unique_temp_path(name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("quidditch-{name}-{stamp}.csv"))
    }

    fn sample_csv() -> String {
        let mut rows = vec![format!(
            "{COUNTRY_COLUMN},{CONTINENT_COLUMN},{POPULATION_COLUMN}"
        )];
        let continents = [
            ("Oceania", 3),
            ("North America", 4),
            ("South America", 4),
            ("Africa", 8),
            ("Asia", 20),
            ("Europe", 30),
        ];
        for (continent, count) in continents {
            for i in 1..=count {
                rows.push(format!(
                    "\"{continent} Country {i}\",{continent},\"{}\"",
                    format_args!("{},000,000", i)
                ));
            }
        }
        rows.join("\n")
    }

    #[test]
    fn allocation_splits_a_16_team_field() {
        let shares = allocation(16);
        assert_eq!(
            shares,
            vec![
                ("Oceania", 1),
                ("North America", 1),
                ("South America", 2),
                ("Africa", 2),
                ("Asia", 4),
                ("Europe", 6),
            ]
        );
        let total: usize = shares.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 16);
    }

    #[test]
    fn allocation_always_covers_the_full_field() {
        for count in [4, 16, 32, 64] {
            let total: usize = allocation(count).iter().map(|(_, n)| n).sum();
            assert_eq!(total, count);
        }
    }

    #[test]
    fn table_loads_and_samples_distinct_names() {
        let path = unique_temp_path("countries");
        fs::write(&path, sample_csv()).expect("write csv");
        let table = load_country_table(&path).expect("table should load");
        fs::remove_file(&path).ok();

        assert_eq!(table.continent("Oceania").len(), 3);
        assert_eq!(table.continent("Europe").len(), 30);
        assert_eq!(table.continent("Atlantis").len(), 0);

        let mut rng = Rng::new(8);
        let names = table.sample_names(16, &mut rng);
        assert_eq!(names.len(), 16);
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let path = unique_temp_path("countries-bad-rows");
        let csv = format!(
            "{COUNTRY_COLUMN},{CONTINENT_COLUMN},{POPULATION_COLUMN}\n\
             Shorelandia,Europe,\"1,000,000\"\n\
             Tornfield,Europe\n\
             Overrun,Europe,2,000,000,extra\n\
             Gustheim,Europe,not-a-number\n\
             Windmere,Oceania,\"2,500,000\"\n"
        );
        fs::write(&path, csv).expect("write csv");
        let table = load_country_table(&path).expect("table should still load");
        fs::remove_file(&path).ok();

        // Rows with the wrong field count or an unparsable population drop
        // individually; the well-formed rows around them survive.
        assert_eq!(table.continent("Europe").len(), 1);
        assert_eq!(table.continent("Europe")[0].name, "Shorelandia");
        assert_eq!(table.continent("Oceania").len(), 1);
        assert_eq!(table.continent("Oceania")[0].name, "Windmere");
    }

    #[test]
    fn missing_file_falls_back_to_generic_names() {
        let mut rng = Rng::new(9);
        let names = pick_team_names(4, Path::new("/nonexistent/populations.csv"), &mut rng);
        assert_eq!(names, vec!["Team 1", "Team 2", "Team 3", "Team 4"]);
    }
}
