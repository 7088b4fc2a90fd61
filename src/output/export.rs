use std::fs;
use std::path::{Path, PathBuf};

use atomic_write_file::AtomicWriteFile;
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::error::ExportError;
use crate::roles::Role;
use crate::scoring::{RankingReport, RoleRanking, SquadReport};

/// Column layout of a per-role score file
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Position")]
    position: &'a str,
    #[serde(rename = "Club")]
    club: &'a str,
    #[serde(rename = "Division")]
    division: &'a str,
    #[serde(rename = "Height")]
    height: u32,
    #[serde(rename = "Weight")]
    weight: u32,
    #[serde(rename = "Preferred Foot")]
    preferred_foot: &'a str,
    #[serde(rename = "Score")]
    score: f64,
    #[serde(rename = "Diff to 1st (%)")]
    diff_to_first_pct: f64,
}

const SQUAD_COLUMNS: &[&str] = &[
    "Name",
    "Age",
    "Position",
    "Club",
    "Division",
    "Nat",
    "Height",
    "Weight",
    "Preferred Foot",
];

/// Keep file names on one path component
fn file_stem(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect()
}

/// "<role name lowercased>_<abbreviation>_<YYYY_MM_DD_HH_MM_SS>.csv"
///
/// Role names may repeat across categories; abbreviations are unique.
pub fn role_file_name(role: &Role, generated_at: &NaiveDateTime) -> String {
    format!(
        "{}_{}_{}.csv",
        file_stem(&role.name),
        file_stem(&role.abbreviation),
        generated_at.format("%Y_%m_%d_%H_%M_%S")
    )
}

/// "<club lowercased>_<YYYY_MM_DD>.csv"
pub fn squad_file_name(club: &str, generated_at: &NaiveDateTime) -> String {
    format!("{}_{}.csv", file_stem(club), generated_at.format("%Y_%m_%d"))
}

/// Write a CSV file atomically: readers never observe a half-written file.
fn write_csv<F>(path: &Path, write_rows: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut csv::Writer<&mut AtomicWriteFile>) -> csv::Result<()>,
{
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = AtomicWriteFile::open(path).map_err(io_error)?;
    {
        let mut writer = csv::Writer::from_writer(&mut file);
        write_rows(&mut writer).map_err(|source| ExportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_error)?;
    }
    file.commit().map_err(io_error)?;
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write one role's ranking to `dir`. Returns the path written.
pub fn write_ranking(
    dir: &Path,
    ranking: &RoleRanking,
    generated_at: &NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    ensure_dir(dir)?;
    let path = dir.join(role_file_name(ranking.role, generated_at));

    write_csv(&path, |writer| {
        for result in &ranking.results {
            let player = result.player;
            writer.serialize(ExportRow {
                name: &player.name,
                age: player.age,
                position: &player.position,
                club: &player.club,
                division: &player.division,
                height: player.height,
                weight: player.weight,
                preferred_foot: &player.preferred_foot,
                score: result.score,
                diff_to_first_pct: result.diff_to_first_pct,
            })?;
        }
        Ok(())
    })?;

    info!("saved {} scores to {}", ranking.role.name, path.display());
    Ok(path)
}

/// Write one file per ranked role. Roles without results produce no file.
pub fn write_report(
    dir: &Path,
    report: &RankingReport,
    generated_at: &NaiveDateTime,
) -> Result<Vec<PathBuf>, ExportError> {
    report
        .rankings
        .iter()
        .filter(|ranking| !ranking.results.is_empty())
        .map(|ranking| write_ranking(dir, ranking, generated_at))
        .collect()
}

/// Write the squad matrix: metadata columns, then `<abbr>_score` per role.
pub fn write_squad(
    dir: &Path,
    squad: &SquadReport,
    generated_at: &NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    ensure_dir(dir)?;
    let path = dir.join(squad_file_name(&squad.club, generated_at));

    write_csv(&path, |writer| {
        let mut header: Vec<String> = SQUAD_COLUMNS.iter().map(|c| c.to_string()).collect();
        header.extend(squad.roles.iter().map(|r| format!("{}_score", r.abbreviation)));
        writer.write_record(&header)?;

        for row in &squad.rows {
            let p = row.player;
            let mut record = vec![
                p.name.clone(),
                p.age.to_string(),
                p.position.clone(),
                p.club.clone(),
                p.division.clone(),
                p.nationality.clone(),
                p.height.to_string(),
                p.weight.to_string(),
                p.preferred_foot.clone(),
            ];
            record.extend(row.scores.iter().map(|s| s.to_string()));
            writer.write_record(&record)?;
        }
        Ok(())
    })?;

    info!("saved squad scores for {} to {}", squad.club, path.display());
    Ok(path)
}
