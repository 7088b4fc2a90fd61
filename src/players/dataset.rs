use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use super::normalize::{CellValue, Column};
use super::record::PlayerRecord;
use crate::error::ImportError;

/// Upper bound on rows accepted from one player table
pub const MAX_PLAYERS: usize = 100_000;

/// All players from one import. Replaced wholesale on reimport.
#[derive(Debug, Clone, Default)]
pub struct PlayerDataset {
    players: Vec<PlayerRecord>,
}

impl PlayerDataset {
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// First player with this exact name
    pub fn find(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Distinct non-empty divisions, sorted
    pub fn divisions(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.division.as_str()))
    }

    /// Distinct non-empty nationalities, sorted
    pub fn nationalities(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.nationality.as_str()))
    }

    /// Distinct non-empty clubs, sorted
    pub fn clubs(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.club.as_str()))
    }

    /// Distinct clubs playing in `division`, sorted
    pub fn clubs_in_division(&self, division: &str) -> Vec<&str> {
        distinct(
            self.players
                .iter()
                .filter(|p| p.division == division)
                .map(|p| p.club.as_str()),
        )
    }

    /// Parse a delimited player table with a header row.
    ///
    /// Rows with an empty `Name` are dropped. Short rows are padded with absent
    /// cells, which the normalizer turns into defaults.
    pub fn from_reader<R: Read>(rdr: R, delimiter: u8) -> Result<Self, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let columns: Vec<Column> = reader.headers()?.iter().map(Column::classify).collect();
        if !columns.contains(&Column::Name) {
            return Err(ImportError::MissingColumn("Name"));
        }

        let mut players = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row?;
            let player = build_record(&columns, &row);
            if player.name.is_empty() {
                debug!("dropping row {}: no player name", line + 2);
                continue;
            }
            if players.len() == MAX_PLAYERS {
                return Err(ImportError::TooLarge { limit: MAX_PLAYERS });
            }
            players.push(player);
        }

        Ok(Self::new(players))
    }
}

fn build_record(columns: &[Column], row: &csv::StringRecord) -> PlayerRecord {
    let mut player = PlayerRecord::default();

    for (i, column) in columns.iter().enumerate() {
        let value = column.normalize(row.get(i));
        match column {
            Column::Name => player.name = value.into_text(),
            Column::Position => player.position = value.into_text(),
            Column::Club => player.club = value.into_text(),
            Column::Division => player.division = value.into_text(),
            Column::Nationality => player.nationality = value.into_text(),
            Column::PreferredFoot => player.preferred_foot = value.into_text(),
            Column::Age => player.age = value.as_int().unwrap_or_default(),
            Column::Height => player.height = value.as_int().unwrap_or_default(),
            Column::Weight => player.weight = value.as_int().unwrap_or_default(),
            Column::Attribute(name) => {
                if let CellValue::Int(n) = value {
                    player.attributes.insert(name.clone(), n);
                }
            }
            Column::Info | Column::Recommendation => {}
        }
    }

    player
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Load a player table from disk.
///
/// The delimiter defaults to tab for `.tsv` files and comma otherwise.
pub fn load_players(path: &Path, delimiter: Option<u8>) -> Result<PlayerDataset, ImportError> {
    let delimiter = delimiter.unwrap_or_else(|| {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        }
    });

    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = PlayerDataset::from_reader(file, delimiter)?;
    info!("imported {} players from {}", dataset.len(), path.display());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Inf,Name,Age,Position,Club,Division,Nat,Height,Weight,Preferred Foot,Str,Jum,Pac
,Alan Striker,23 yrs,ST (C),Rovers,League One,ENG,188 cm,84 kg,Right,18,10-12,-
Inj,Ben Winger,19,AM (RL),United,League Two,SCO,175 cm,70 kg,Left,10,18,16
,,30,GK,Rovers,League One,ENG,190 cm,88 kg,Right,5,5,5
,Carl Keeper,31,GK,Rovers,League One,WAL,,,Right,12,14
";

    #[test]
    fn test_import_normalizes_rows() {
        let dataset = PlayerDataset::from_reader(TABLE.as_bytes(), b',').unwrap();
        assert_eq!(dataset.len(), 3);

        let alan = dataset.find("Alan Striker").unwrap();
        assert_eq!(alan.age, 23);
        assert_eq!(alan.height, 188);
        assert_eq!(alan.weight, 84);
        assert_eq!(alan.nationality, "ENG");
        assert_eq!(alan.attribute("Str"), Some(18));
        assert_eq!(alan.attribute("Jum"), Some(10));
        assert_eq!(alan.attribute("Pac"), Some(1));
        assert!(alan.attribute("Inf").is_none());
    }

    #[test]
    fn test_import_drops_nameless_rows() {
        let dataset = PlayerDataset::from_reader(TABLE.as_bytes(), b',').unwrap();
        assert!(dataset.iter().all(|p| !p.name.is_empty()));
    }

    #[test]
    fn test_import_pads_short_rows() {
        let dataset = PlayerDataset::from_reader(TABLE.as_bytes(), b',').unwrap();
        let carl = dataset.find("Carl Keeper").unwrap();
        assert_eq!(carl.height, 0);
        assert_eq!(carl.weight, 0);
        assert_eq!(carl.attribute("Pac"), Some(1));
    }

    #[test]
    fn test_import_requires_name_column() {
        let result = PlayerDataset::from_reader("Age,Club\n20,Rovers\n".as_bytes(), b',');
        assert!(matches!(result, Err(ImportError::MissingColumn("Name"))));
    }

    #[test]
    fn test_import_tab_delimited() {
        let table = "Name\tAge\tStr\nDan\t20\t11\n";
        let dataset = PlayerDataset::from_reader(table.as_bytes(), b'\t').unwrap();
        assert_eq!(dataset.players()[0].attribute("Str"), Some(11));
    }

    #[test]
    fn test_facets() {
        let dataset = PlayerDataset::from_reader(TABLE.as_bytes(), b',').unwrap();
        assert_eq!(dataset.divisions(), vec!["League One", "League Two"]);
        assert_eq!(dataset.nationalities(), vec!["ENG", "SCO", "WAL"]);
        assert_eq!(dataset.clubs(), vec!["Rovers", "United"]);
        assert_eq!(dataset.clubs_in_division("League Two"), vec!["United"]);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("role_scout_test_missing_players.csv");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(load_players(&path, None), Err(ImportError::Io { .. })));
    }
}
