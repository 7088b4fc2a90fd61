use crate::players::{PlayerDataset, PlayerRecord};

/// Sentinel accepted for "no restriction" on a text filter
pub const ANY_SENTINEL: &str = "-ALL-";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Restriction {
    #[default]
    Any,
    Exactly(String),
}

impl Restriction {
    /// `-ALL-` and blank mean no restriction; anything else is an exact match
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ANY_SENTINEL {
            Restriction::Any
        } else {
            Restriction::Exactly(value.to_string())
        }
    }

    pub fn from_option(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }

    pub fn allows(&self, value: &str) -> bool {
        match self {
            Restriction::Any => true,
            Restriction::Exactly(expected) => expected == value,
        }
    }
}

/// Player predicate over division, nationality, club and an inclusive age range.
///
/// `min_age > max_age` is allowed and matches nobody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFilter {
    pub division: Restriction,
    pub nationality: Restriction,
    pub club: Restriction,
    pub min_age: u32,
    pub max_age: u32,
}

impl Default for PlayerFilter {
    fn default() -> Self {
        Self {
            division: Restriction::Any,
            nationality: Restriction::Any,
            club: Restriction::Any,
            min_age: 0,
            max_age: u32::MAX,
        }
    }
}

impl PlayerFilter {
    pub fn build(
        division: Restriction,
        nationality: Restriction,
        club: Restriction,
        min_age: u32,
        max_age: u32,
    ) -> Self {
        Self {
            division,
            nationality,
            club,
            min_age,
            max_age,
        }
    }

    pub fn matches(&self, player: &PlayerRecord) -> bool {
        self.division.allows(&player.division)
            && self.nationality.allows(&player.nationality)
            && self.club.allows(&player.club)
            && self.min_age <= player.age
            && player.age <= self.max_age
    }

    /// Matching players in dataset order
    pub fn apply<'a>(&self, dataset: &'a PlayerDataset) -> Vec<&'a PlayerRecord> {
        self.select(dataset.iter())
    }

    pub fn select<'a>(
        &self,
        players: impl IntoIterator<Item = &'a PlayerRecord>,
    ) -> Vec<&'a PlayerRecord> {
        players.into_iter().filter(|p| self.matches(p)).collect()
    }
}
