use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::players::PlayerRecord;
use crate::roles::{Role, RoleCatalog};
use crate::scoring::{RankingReport, RoleRanking, ScoreBreakdown, SquadReport};

const NAME_WIDTH: usize = 25;
const AGE_WIDTH: usize = 5;
const POSITION_WIDTH: usize = 10;
const CLUB_WIDTH: usize = 25;
const DIVISION_WIDTH: usize = 15;
const MEASURE_WIDTH: usize = 7;
const FOOT_WIDTH: usize = 15;
const SCORE_WIDTH: usize = 6;
const SQUAD_COLUMN_WIDTH: usize = 6;
const MAX_RULE_WIDTH: usize = 140;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Two decimal places, as shown in tables
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Age/height/weight for display; 0 means unknown
fn format_measure(value: u32) -> String {
    if value == 0 {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Truncate text to fit a column of `max_width` terminal cells.
/// Wide characters take two cells, combining marks none.
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let (budget, ellipsis) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ellipsis);
    out
}

/// Left-aligned column, padded by display width rather than `char` count
fn cell(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

/// Horizontal rule, capped at the terminal width when there is one
fn rule() -> String {
    let width = terminal_size()
        .map(|(Width(w), _)| (w as usize).min(MAX_RULE_WIDTH))
        .unwrap_or(MAX_RULE_WIDTH);
    "-".repeat(width)
}

fn header_line() -> String {
    format!(
        "    {} {} {} {} {} {} {} {} {:>score$} {}",
        cell("Name", NAME_WIDTH),
        cell("Age", AGE_WIDTH),
        cell("Position", POSITION_WIDTH),
        cell("Club", CLUB_WIDTH),
        cell("Division", DIVISION_WIDTH),
        cell("Height", MEASURE_WIDTH),
        cell("Weight", MEASURE_WIDTH),
        cell("Preferred Foot", FOOT_WIDTH),
        "Score",
        "Diff to 1st (%)",
        score = SCORE_WIDTH,
    )
}

fn player_columns(player: &PlayerRecord) -> String {
    format!(
        "{} {} {} {} {} {} {} {}",
        cell(&player.name, NAME_WIDTH),
        cell(&format_measure(player.age), AGE_WIDTH),
        cell(&player.position, POSITION_WIDTH),
        cell(&player.club, CLUB_WIDTH),
        cell(&player.division, DIVISION_WIDTH),
        cell(&format_measure(player.height), MEASURE_WIDTH),
        cell(&format_measure(player.weight), MEASURE_WIDTH),
        cell(&player.preferred_foot, FOOT_WIDTH),
    )
}

/// Format one role's ranking as a titled table.
/// Rank column: 3 chars (fits "99."), right-aligned
pub fn format_ranking_table(ranking: &RoleRanking, use_colors: bool) -> String {
    let title = format!("{} ({})", ranking.role.name, ranking.role.abbreviation);
    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];

    if ranking.results.is_empty() {
        lines.push("  No players match the current filters.".to_string());
        return lines.join("\n");
    }

    lines.push(header_line());
    lines.push(rule());

    for result in &ranking.results {
        let index_str = format!("{:>2}.", result.rank);
        let score_str = format!("{:>width$}", format_score(result.score), width = SCORE_WIDTH);
        let diff_str = format_score(result.diff_to_first_pct);
        let line = if use_colors {
            format!(
                "{} {} {} {}",
                index_str.dimmed(),
                player_columns(result.player),
                score_str.bold(),
                diff_str.yellow()
            )
        } else {
            format!(
                "{} {} {} {}",
                index_str,
                player_columns(result.player),
                score_str,
                diff_str
            )
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Format all rankings, followed by any roles that had to be skipped
pub fn format_report(report: &RankingReport, use_colors: bool) -> String {
    if report.rankings.is_empty() && report.skipped.is_empty() {
        return "No roles selected.".to_string();
    }

    let mut sections: Vec<String> = report
        .rankings
        .iter()
        .map(|ranking| format_ranking_table(ranking, use_colors))
        .collect();

    for skipped in &report.skipped {
        sections.push(format!("Skipped: {}", skipped));
    }

    sections.join("\n\n")
}

/// Format the squad matrix: one row per player, one column per role abbreviation.
/// Each player's best role is highlighted when colors are on.
pub fn format_squad_table(squad: &SquadReport, use_colors: bool) -> String {
    if squad.rows.is_empty() {
        return format!("No players found for club '{}'.", squad.club);
    }

    let mut header = format!("{} {}", cell("Name", NAME_WIDTH), cell("Position", POSITION_WIDTH));
    for role in &squad.roles {
        header.push_str(&format!(
            " {:>width$}",
            truncate(&role.abbreviation, SQUAD_COLUMN_WIDTH),
            width = SQUAD_COLUMN_WIDTH
        ));
    }
    header.push_str("  Best");

    let mut lines = vec![header, rule()];

    for row in &squad.rows {
        let best = squad.best_role(row);
        let mut line = format!(
            "{} {}",
            cell(&row.player.name, NAME_WIDTH),
            cell(&row.player.position, POSITION_WIDTH)
        );
        for (role, score) in squad.roles.iter().zip(&row.scores) {
            let value = format!("{:>width$.1}", score, width = SQUAD_COLUMN_WIDTH);
            let is_best = best.is_some_and(|(b, _)| std::ptr::eq(b, *role));
            if use_colors && is_best {
                line.push_str(&format!(" {}", value.green().bold()));
            } else {
                line.push_str(&format!(" {}", value));
            }
        }
        if let Some((role, _)) = best {
            line.push_str(&format!("  {}", role.name));
        }
        lines.push(line);
    }

    for skipped in &squad.skipped {
        lines.push(format!("Skipped: {}", skipped));
    }

    lines.join("\n")
}

/// Format weights as "Str x3, Jum x2"
fn format_weights(role: &Role) -> String {
    role.weights
        .iter()
        .map(|w| format!("{} x{}", w.attribute, w.weight))
        .collect::<Vec<_>>()
        .join(", ")
}

/// List every category and its roles
pub fn format_catalog(catalog: &RoleCatalog, use_colors: bool) -> String {
    if catalog.is_empty() {
        return "No roles defined.".to_string();
    }

    catalog
        .all_categories()
        .iter()
        .map(|category| {
            let mut lines = vec![if use_colors {
                category.name.bold().to_string()
            } else {
                category.name.clone()
            }];
            for role in &category.roles {
                let abbr = format!("{:<6}", role.abbreviation);
                if use_colors {
                    lines.push(format!(
                        "  {} {}  {}",
                        abbr.cyan(),
                        role.name,
                        format_weights(role).dimmed()
                    ));
                } else {
                    lines.push(format!("  {} {}  {}", abbr, role.name, format_weights(role)));
                }
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a single score with its per-attribute working (for `explain`)
pub fn format_breakdown(
    role: &Role,
    player: &PlayerRecord,
    breakdown: &ScoreBreakdown,
    use_colors: bool,
) -> String {
    let mut lines = vec![format!("{} as {} ({})", player.name, role.name, role.abbreviation)];

    for c in &breakdown.contributions {
        let marker = if c.defaulted { "  (missing, default)" } else { "" };
        lines.push(format!(
            "  {:<8} {:>3} x {:<5} = {:>7.2}{}",
            c.attribute,
            c.value,
            c.weight,
            f64::from(c.value) * c.weight,
            marker
        ));
    }

    let total = format!(
        "  Score: {} (weight total {})",
        format_score(breakdown.score),
        breakdown.total_weight
    );
    lines.push(if use_colors {
        total.bold().to_string()
    } else {
        total
    });

    lines.join("\n")
}

/// Format a titled list of distinct values, one per line
pub fn format_facet(title: &str, values: &[&str], use_colors: bool) -> String {
    let heading = format!("{} ({})", title, values.len());
    let mut lines = vec![if use_colors {
        heading.bold().to_string()
    } else {
        heading
    }];
    lines.extend(values.iter().map(|v| format!("  {}", v)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::PlayerDataset;
    use crate::scoring::{rank_role, squad_scores, GoalkeeperRoles, RoleScorer};

    const CATALOG: &str = r#"{
        "Strikers": [
            { "role": "Target Man", "role_abbr": "tm", "Str": 3, "Jum": 2 },
            { "role": "Poacher", "role_abbr": "p", "Fin": 1 }
        ]
    }"#;

    fn player(name: &str, attrs: &[(&str, u32)]) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            age: 24,
            position: "ST (C)".to_string(),
            club: "Rovers".to_string(),
            division: "League One".to_string(),
            height: 188,
            preferred_foot: "Right".to_string(),
            attributes: attrs.iter().map(|(a, v)| (a.to_string(), *v)).collect(),
            ..Default::default()
        }
    }

    fn dataset() -> PlayerDataset {
        PlayerDataset::new(vec![
            player("Alan Striker", &[("Str", 18), ("Jum", 10), ("Fin", 9)]),
            player("Ben Header", &[("Str", 10), ("Jum", 18), ("Fin", 14)]),
        ])
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(14.8), "14.80");
        assert_eq!(format_score(10.8108108), "10.81");
        assert_eq!(format_score(0.0), "0.00");
    }

    #[test]
    fn test_format_measure_unknown() {
        assert_eq!(format_measure(0), "-");
        assert_eq!(format_measure(180), "180");
    }

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("Rovers", 25), "Rovers");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("Borussia Monchengladbach II", 15), "Borussia Mon...");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("Müller-Wohlfahrt", 9), "Müller...");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // 4 characters, 8 cells
        assert_eq!(truncate("中村俊輔", 8), "中村俊輔");
        assert_eq!(truncate("中村俊輔", 7), "中村...");
        assert_eq!(truncate("中村俊輔", 3), "中");
    }

    #[test]
    fn test_cell_pads_by_display_width() {
        assert_eq!(cell("中村", 6), "中村  ");
        assert_eq!(cell("中村", 6).width(), 6);

        // "u" followed by a combining diaeresis renders as one cell
        let combining = "Mu\u{308}ller";
        assert_eq!(cell(combining, 8).width(), 8);
        assert_eq!(cell(combining, 8), format!("{}  ", combining));
    }

    #[test]
    fn test_format_ranking_table() {
        let catalog = RoleCatalog::from_json_str(CATALOG).unwrap();
        let data = dataset();
        let role = catalog.role("tm").unwrap();
        let candidates: Vec<_> = data.iter().collect();
        let ranking = RoleRanking {
            role,
            results: rank_role(role, &candidates, 10).unwrap(),
        };

        let output = format_ranking_table(&ranking, false);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "Target Man (tm)");
        assert!(lines[1].contains("Diff to 1st (%)"));
        assert!(lines[3].starts_with(" 1. Alan Striker"));
        assert!(lines[3].contains("14.80"));
        assert!(lines[3].ends_with(" 0.00"));
        assert!(lines[4].starts_with(" 2. Ben Header"));
        assert!(lines[4].ends_with("10.81"));
    }

    #[test]
    fn test_format_empty_ranking() {
        let catalog = RoleCatalog::from_json_str(CATALOG).unwrap();
        let ranking = RoleRanking {
            role: catalog.role("p").unwrap(),
            results: vec![],
        };
        let output = format_ranking_table(&ranking, false);
        assert!(output.contains("No players match"));
    }

    #[test]
    fn test_format_report_empty() {
        assert_eq!(format_report(&RankingReport::default(), false), "No roles selected.");
    }

    #[test]
    fn test_format_squad_table() {
        let catalog = RoleCatalog::from_json_str(CATALOG).unwrap();
        let data = dataset();
        let squad = squad_scores(&catalog, &data, "Rovers", false, &GoalkeeperRoles::default());

        let output = format_squad_table(&squad, false);
        let lines: Vec<_> = output.lines().collect();
        assert!(lines[0].contains("tm"));
        assert!(lines[0].ends_with("Best"));
        assert!(lines[2].contains("14.8"));
        assert!(lines[2].ends_with("Target Man"));
        assert!(lines[3].ends_with("Poacher"));
    }

    #[test]
    fn test_format_catalog() {
        let catalog = RoleCatalog::from_json_str(CATALOG).unwrap();
        let output = format_catalog(&catalog, false);
        assert!(output.starts_with("Strikers"));
        assert!(output.contains("tm     Target Man  Str x3, Jum x2"));
    }

    #[test]
    fn test_format_breakdown() {
        let catalog = RoleCatalog::from_json_str(CATALOG).unwrap();
        let role = catalog.role("tm").unwrap();
        let p = player("Solo", &[("Str", 18)]);
        let breakdown = RoleScorer::new(role).unwrap().explain(&p);

        let output = format_breakdown(role, &p, &breakdown, false);
        assert!(output.starts_with("Solo as Target Man (tm)"));
        assert!(output.contains("(missing, default)"));
        assert!(output.contains("Score: 11.20"));
    }

    #[test]
    fn test_format_facet() {
        let output = format_facet("Divisions", &["League One", "League Two"], false);
        assert_eq!(output, "Divisions (2)\n  League One\n  League Two");
    }
}
