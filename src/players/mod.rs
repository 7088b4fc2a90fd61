pub mod dataset;
pub mod normalize;
pub mod record;

pub use dataset::{load_players, PlayerDataset, MAX_PLAYERS};
pub use normalize::{normalize, CellValue, Column, DEFAULT_ATTRIBUTE_VALUE};
pub use record::PlayerRecord;
