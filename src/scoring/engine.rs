use tracing::trace;

use crate::players::{PlayerRecord, DEFAULT_ATTRIBUTE_VALUE};
use crate::roles::{Role, MAX_WEIGHT};

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeContribution {
    pub attribute: String,
    pub value: u32,
    pub weight: f64,
    pub defaulted: bool, // value came from the missing-attribute default
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub total_weight: f64,
    pub contributions: Vec<AttributeContribution>,
}

impl ScoreBreakdown {
    pub fn defaulted_attributes(&self) -> impl Iterator<Item = &str> {
        self.contributions
            .iter()
            .filter(|c| c.defaulted)
            .map(|c| c.attribute.as_str())
    }
}

/// Scores players against one role.
///
/// The weight sum is computed once here instead of once per player.
#[derive(Debug, Clone, Copy)]
pub struct RoleScorer<'a> {
    role: &'a Role,
    total_weight: f64,
}

impl<'a> RoleScorer<'a> {
    /// Returns `None` when the role cannot be scored: a weight lies outside
    /// `0..=MAX_WEIGHT` or the weights do not sum to a positive number.
    pub fn new(role: &'a Role) -> Option<Self> {
        let in_range = role
            .weights
            .iter()
            .all(|w| (0.0..=MAX_WEIGHT).contains(&w.weight));
        let total_weight = role.total_weight();
        if in_range && total_weight > 0.0 {
            Some(Self { role, total_weight })
        } else {
            None
        }
    }

    pub fn role(&self) -> &'a Role {
        self.role
    }

    /// Weighted average of the role's attributes for this player.
    /// Missing attributes count as 1.
    pub fn score(&self, player: &PlayerRecord) -> f64 {
        let weighted: f64 = self
            .role
            .weights
            .iter()
            .map(|w| f64::from(attribute_value(player, &w.attribute).0) * w.weight)
            .sum();
        weighted / self.total_weight
    }

    /// Same as `score`, with the per-attribute working shown
    pub fn explain(&self, player: &PlayerRecord) -> ScoreBreakdown {
        let contributions: Vec<AttributeContribution> = self
            .role
            .weights
            .iter()
            .map(|w| {
                let (value, defaulted) = attribute_value(player, &w.attribute);
                AttributeContribution {
                    attribute: w.attribute.clone(),
                    value,
                    weight: w.weight,
                    defaulted,
                }
            })
            .collect();

        let weighted: f64 = contributions
            .iter()
            .map(|c| f64::from(c.value) * c.weight)
            .sum();

        ScoreBreakdown {
            score: weighted / self.total_weight,
            total_weight: self.total_weight,
            contributions,
        }
    }
}

fn attribute_value(player: &PlayerRecord, attribute: &str) -> (u32, bool) {
    match player.attribute(attribute) {
        Some(value) => (value, false),
        None => {
            trace!(
                player = %player.name,
                attribute,
                "attribute missing, using default {}",
                DEFAULT_ATTRIBUTE_VALUE
            );
            (DEFAULT_ATTRIBUTE_VALUE, true)
        }
    }
}

/// Score one player against one role. `None` if the role is not scoreable.
pub fn score(role: &Role, player: &PlayerRecord) -> Option<f64> {
    RoleScorer::new(role).map(|scorer| scorer.score(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::AttributeWeight;

    fn role(weights: &[(&str, f64)]) -> Role {
        Role {
            name: "Target Man".to_string(),
            abbreviation: "tm".to_string(),
            category: "Strikers".to_string(),
            weights: weights
                .iter()
                .map(|(a, w)| AttributeWeight {
                    attribute: a.to_string(),
                    weight: *w,
                })
                .collect(),
        }
    }

    fn player(name: &str, attrs: &[(&str, u32)]) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            attributes: attrs.iter().map(|(a, v)| (a.to_string(), *v)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_weighted_average() {
        let tm = role(&[("Str", 3.0), ("Jum", 2.0)]);
        let a = player("A", &[("Str", 18), ("Jum", 10)]);
        let b = player("B", &[("Str", 10), ("Jum", 18)]);

        assert!((score(&tm, &a).unwrap() - 14.8).abs() < 1e-9);
        assert!((score(&tm, &b).unwrap() - 13.2).abs() < 1e-9);
    }

    #[test]
    fn test_missing_attribute_counts_as_one() {
        let tm = role(&[("Str", 1.0), ("Jum", 1.0)]);
        let p = player("P", &[("Str", 15)]);
        assert!((score(&tm, &p).unwrap() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_extra_attributes_ignored() {
        let tm = role(&[("Str", 2.0)]);
        let p = player("P", &[("Str", 12), ("Pac", 20)]);
        assert!((score(&tm, &p).unwrap() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_role_not_scoreable() {
        let idle = role(&[("Str", 0.0)]);
        let p = player("P", &[("Str", 15)]);
        assert!(RoleScorer::new(&idle).is_none());
        assert!(score(&idle, &p).is_none());

        let empty = role(&[]);
        assert!(score(&empty, &p).is_none());
    }

    #[test]
    fn test_oversized_weight_not_scoreable() {
        let big = role(&[("Str", 1e308), ("Jum", 1.0)]);
        assert!(RoleScorer::new(&big).is_none());

        let nan = role(&[("Str", f64::NAN), ("Jum", 1.0)]);
        assert!(RoleScorer::new(&nan).is_none());
    }

    #[test]
    fn test_max_weights_score_finite() {
        let heavy = role(&[("Str", MAX_WEIGHT), ("Jum", MAX_WEIGHT)]);
        let p = player("P", &[("Str", u32::MAX), ("Jum", u32::MAX)]);
        let s = score(&heavy, &p).unwrap();
        assert!(s.is_finite());
        assert!((s - f64::from(u32::MAX)).abs() < 1.0);
    }

    #[test]
    fn test_score_within_attribute_bounds() {
        let roles = [
            role(&[("Str", 3.0), ("Jum", 2.0), ("Pac", 0.5)]),
            role(&[("Str", 1.0)]),
            role(&[("Str", 0.0), ("Jum", 7.0), ("Pac", 1.0)]),
        ];
        let players = [
            player("A", &[("Str", 18), ("Jum", 10), ("Pac", 3)]),
            player("B", &[("Str", 1), ("Jum", 20), ("Pac", 20)]),
            player("C", &[("Str", 7), ("Jum", 7), ("Pac", 7)]),
        ];

        for r in &roles {
            let scorer = RoleScorer::new(r).unwrap();
            for p in &players {
                let values: Vec<u32> = r
                    .weights
                    .iter()
                    .map(|w| p.attribute_or_default(&w.attribute))
                    .collect();
                let min = f64::from(*values.iter().min().unwrap());
                let max = f64::from(*values.iter().max().unwrap());
                let s = scorer.score(p);
                assert!(s >= min - 1e-9 && s <= max + 1e-9, "{} not in [{}, {}]", s, min, max);
            }
        }
    }

    #[test]
    fn test_explain_matches_score() {
        let tm = role(&[("Str", 3.0), ("Jum", 2.0), ("Hea", 1.0)]);
        let p = player("A", &[("Str", 18), ("Jum", 10)]);
        let scorer = RoleScorer::new(&tm).unwrap();

        let breakdown = scorer.explain(&p);
        assert!((breakdown.score - scorer.score(&p)).abs() < 1e-12);
        assert_eq!(breakdown.total_weight, 6.0);
        assert_eq!(breakdown.contributions.len(), 3);
        assert_eq!(breakdown.contributions[0].value, 18);
        assert!(!breakdown.contributions[0].defaulted);
        assert_eq!(breakdown.defaulted_attributes().collect::<Vec<_>>(), vec!["Hea"]);
    }
}
