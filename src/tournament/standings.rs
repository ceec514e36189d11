//! Group standings and point rules.
//!
//! Two scoring schemes are supported: FIFA-style (win 1, draw 0.5, ranked by
//! points/diff/scored) and cannon-style (win 2 with margin bonuses, ranked by
//! points, snitches caught, total catch time, diff, scored). Rows are updated
//! from [MatchReport]s only; the standings never look inside the engine.

use std::cmp::Ordering;

use serde::Serialize;

use crate::sim::MatchReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRules {
    Fifa,
    Cannon,
}

impl PointRules {
    /// Cannon groups cut matches off at four hours; FIFA groups play to the catch.
    pub const fn match_limit(self) -> Option<u32> {
        match self {
            PointRules::Fifa => None,
            PointRules::Cannon => Some(240),
        }
    }

    /// How many teams advance from a group.
    pub const fn qualifier_count(self) -> usize {
        match self {
            PointRules::Fifa => 2,
            PointRules::Cannon => 1,
        }
    }

    /// Ranking order between two rows, best first.
    pub fn compare(self, a: &StandingRow, b: &StandingRow) -> Ordering {
        match self {
            PointRules::Fifa => b
                .points
                .total_cmp(&a.points)
                .then_with(|| b.diff().cmp(&a.diff()))
                .then_with(|| b.scored.cmp(&a.scored)),
            PointRules::Cannon => b
                .points
                .total_cmp(&a.points)
                .then_with(|| b.snitches.cmp(&a.snitches))
                .then_with(|| a.catch_minutes.cmp(&b.catch_minutes))
                .then_with(|| b.diff().cmp(&a.diff()))
                .then_with(|| b.scored.cmp(&a.scored)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StandingRow {
    pub points: f64,
    pub scored: u32,
    pub conceded: u32,
    pub snitches: u32,
    /// Total minutes of the matches whose snitch this team caught; lower is
    /// better under cannon rules (faster catches).
    pub catch_minutes: u32,
}

impl StandingRow {
    pub fn diff(&self) -> i64 {
        i64::from(self.scored) - i64::from(self.conceded)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingEntry {
    pub team: String,
    pub row: StandingRow,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Standings {
    entries: Vec<StandingEntry>,
}

impl Standings {
    pub fn new<I>(teams: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            entries: teams
                .into_iter()
                .map(|team| StandingEntry {
                    team: team.into(),
                    row: StandingRow::default(),
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[StandingEntry] {
        &self.entries
    }

    pub fn row(&self, team: &str) -> Option<&StandingRow> {
        self.entries
            .iter()
            .find(|entry| entry.team == team)
            .map(|entry| &entry.row)
    }

    fn row_mut(&mut self, team: &str) -> Option<&mut StandingRow> {
        self.entries
            .iter_mut()
            .find(|entry| entry.team == team)
            .map(|entry| &mut entry.row)
    }

    /// Folds one match result into the table under the given rules. Teams not
    /// present in the table are ignored.
    pub fn record(&mut self, rules: PointRules, report: &MatchReport) {
        let [home_score, away_score] = report.score;
        let margin = u32::abs_diff(home_score, away_score);

        for (index, team) in report.teams.iter().enumerate() {
            let Some(row) = self.row_mut(team) else {
                continue;
            };
            let (scored, conceded) = if index == 0 {
                (home_score, away_score)
            } else {
                (away_score, home_score)
            };
            row.scored += scored;
            row.conceded += conceded;
            row.points += match rules {
                PointRules::Fifa => match scored.cmp(&conceded) {
                    Ordering::Greater => 1.0,
                    Ordering::Equal => 0.5,
                    Ordering::Less => 0.0,
                },
                PointRules::Cannon => match scored.cmp(&conceded) {
                    Ordering::Greater => 2.0 + f64::from(cannon_margin_bonus(margin)),
                    Ordering::Equal => 1.0,
                    Ordering::Less => 0.0,
                },
            };
        }

        if rules == PointRules::Cannon {
            if let Some(catcher) = &report.snitch_catcher {
                if let Some(row) = self.row_mut(catcher) {
                    row.snitches += 1;
                    row.catch_minutes += report.minutes;
                }
            }
        }
    }

    /// Entries sorted best-first under the given rules.
    pub fn ranked(&self, rules: PointRules) -> Vec<&StandingEntry> {
        let mut ranked: Vec<&StandingEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| rules.compare(&a.row, &b.row));
        ranked
    }
}

const fn cannon_margin_bonus(margin: u32) -> u32 {
    if margin > 150 {
        5
    } else if margin > 100 {
        3
    } else if margin > 50 {
        1
    } else {
        0
    }
}
