pub mod export;
pub mod formatter;

pub use export::{role_file_name, squad_file_name, write_ranking, write_report, write_squad};
pub use formatter::{
    format_breakdown, format_catalog, format_facet, format_ranking_table, format_report,
    format_score, format_squad_table, should_use_colors,
};
