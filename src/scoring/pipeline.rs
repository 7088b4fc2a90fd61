use glob::Pattern;
use tracing::{debug, warn};

use super::engine::RoleScorer;
use super::filter::{PlayerFilter, Restriction};
use super::ranker::{rank, ScoreResult, DEFAULT_TOP_N};
use crate::error::UnscoreableRole;
use crate::players::{PlayerDataset, PlayerRecord};
use crate::roles::{Role, RoleCatalog};

/// Goalkeeper-family abbreviations skipped when goalkeepers are excluded
pub const DEFAULT_GOALKEEPER_ROLES: &[&str] = &["gkd", "skd", "sks", "ska"];

/// What to rank: which roles, over which players, how many per role.
#[derive(Debug, Clone)]
pub struct Selection {
    pub roles: Vec<String>,
    pub filter: PlayerFilter,
    pub top_n: usize,
    pub exclude_goalkeepers: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            roles: Vec::new(),
            filter: PlayerFilter::default(),
            top_n: DEFAULT_TOP_N,
            exclude_goalkeepers: false,
        }
    }
}

/// Glob patterns naming the goalkeeper roles, e.g. `gkd` or `sk*`
#[derive(Debug, Clone)]
pub struct GoalkeeperRoles {
    patterns: Vec<Pattern>,
}

impl GoalkeeperRoles {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, glob::PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, abbreviation: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(abbreviation))
    }
}

impl Default for GoalkeeperRoles {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_GOALKEEPER_ROLES
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoleRanking<'a> {
    pub role: &'a Role,
    pub results: Vec<ScoreResult<'a>>,
}

/// Rankings for every selected role, in catalog order
#[derive(Debug, Clone, Default)]
pub struct RankingReport<'a> {
    pub rankings: Vec<RoleRanking<'a>>,
    pub skipped: Vec<UnscoreableRole>,
    /// Selected abbreviations that are not in the catalog
    pub unknown: Vec<String>,
}

impl<'a> RankingReport<'a> {
    /// First ranking whose role has this display name
    pub fn get(&self, role_name: &str) -> Option<&RoleRanking<'a>> {
        self.rankings.iter().find(|r| r.role.name == role_name)
    }

    /// Every ranking whose role has this display name, in catalog order
    pub fn get_all<'r>(
        &'r self,
        role_name: &'r str,
    ) -> impl Iterator<Item = &'r RoleRanking<'a>> + 'r {
        self.rankings.iter().filter(move |r| r.role.name == role_name)
    }

    pub fn by_abbreviation(&self, abbreviation: &str) -> Option<&RoleRanking<'a>> {
        self.rankings.iter().find(|r| r.role.abbreviation == abbreviation)
    }
}

/// Score and rank `candidates` for one role.
pub fn rank_role<'a>(
    role: &'a Role,
    candidates: &[&'a PlayerRecord],
    top_n: usize,
) -> Result<Vec<ScoreResult<'a>>, UnscoreableRole> {
    let scorer = RoleScorer::new(role).ok_or_else(|| UnscoreableRole {
        role: role.name.clone(),
        abbreviation: role.abbreviation.clone(),
    })?;

    let scored = candidates
        .iter()
        .map(|&player| (player, scorer.score(player)))
        .collect();

    Ok(rank(role, scored, top_n))
}

/// Filter → score → rank, once per selected role.
///
/// Per-role problems are absorbed: an unscoreable role lands in `skipped` and the
/// rest of the run continues. No matching players gives an empty list, not an error.
pub fn rank_roles<'a>(
    catalog: &'a RoleCatalog,
    dataset: &'a PlayerDataset,
    selection: &Selection,
    goalkeepers: &GoalkeeperRoles,
) -> RankingReport<'a> {
    let mut report = RankingReport {
        unknown: selection
            .roles
            .iter()
            .filter(|abbr| catalog.role(abbr).is_none())
            .cloned()
            .collect(),
        ..Default::default()
    };
    for abbr in &report.unknown {
        warn!("unknown role abbreviation '{}'", abbr);
    }

    let candidates = selection.filter.apply(dataset);
    debug!(
        "{} of {} players pass the filter",
        candidates.len(),
        dataset.len()
    );

    for role in catalog.roles_by_abbreviation(selection.roles.as_slice()) {
        if selection.exclude_goalkeepers && goalkeepers.matches(&role.abbreviation) {
            debug!("skipping goalkeeper role {}", role.abbreviation);
            continue;
        }

        match rank_role(role, &candidates, selection.top_n) {
            Ok(results) => report.rankings.push(RoleRanking { role, results }),
            Err(unscoreable) => {
                warn!("{}", unscoreable);
                report.skipped.push(unscoreable);
            }
        }
    }

    report
}

#[derive(Debug, Clone)]
pub struct SquadRow<'a> {
    pub player: &'a PlayerRecord,
    pub scores: Vec<f64>, // parallel to SquadReport::roles
}

/// Every player of one club against every role
#[derive(Debug, Clone, Default)]
pub struct SquadReport<'a> {
    pub club: String,
    pub roles: Vec<&'a Role>,
    pub rows: Vec<SquadRow<'a>>,
    pub skipped: Vec<UnscoreableRole>,
}

impl<'a> SquadReport<'a> {
    /// The role this player scores highest in, if any
    pub fn best_role(&self, row: &SquadRow<'a>) -> Option<(&'a Role, f64)> {
        self.roles
            .iter()
            .zip(&row.scores)
            .fold(None, |best: Option<(&'a Role, f64)>, (role, score)| match best {
                Some((_, s)) if s >= *score => best,
                _ => Some((*role, *score)),
            })
    }
}

/// Score one club's players against the whole catalog, in dataset order.
pub fn squad_scores<'a>(
    catalog: &'a RoleCatalog,
    dataset: &'a PlayerDataset,
    club: &str,
    exclude_goalkeepers: bool,
    goalkeepers: &GoalkeeperRoles,
) -> SquadReport<'a> {
    let mut scorers = Vec::new();
    let mut skipped = Vec::new();

    for role in catalog.roles() {
        if exclude_goalkeepers && goalkeepers.matches(&role.abbreviation) {
            continue;
        }
        match RoleScorer::new(role) {
            Some(scorer) => scorers.push(scorer),
            None => {
                let unscoreable = UnscoreableRole {
                    role: role.name.clone(),
                    abbreviation: role.abbreviation.clone(),
                };
                warn!("{}", unscoreable);
                skipped.push(unscoreable);
            }
        }
    }

    let filter = PlayerFilter {
        club: Restriction::Exactly(club.to_string()),
        ..Default::default()
    };

    let rows = filter
        .apply(dataset)
        .into_iter()
        .map(|player| SquadRow {
            player,
            scores: scorers.iter().map(|s| s.score(player)).collect(),
        })
        .collect();

    SquadReport {
        club: club.to_string(),
        roles: scorers.iter().map(|s| s.role()).collect(),
        rows,
        skipped,
    }
}
