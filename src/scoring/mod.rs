pub mod engine;
pub mod filter;
pub mod pipeline;
pub mod ranker;

pub use engine::{score, AttributeContribution, RoleScorer, ScoreBreakdown};
pub use filter::{PlayerFilter, Restriction, ANY_SENTINEL};
pub use pipeline::{
    rank_role, rank_roles, squad_scores, GoalkeeperRoles, RankingReport, RoleRanking, Selection,
    SquadReport, SquadRow, DEFAULT_GOALKEEPER_ROLES,
};
pub use ranker::{diff_to_first_pct, rank, ScoreResult, DEFAULT_TOP_N, MAX_TOP_N};
