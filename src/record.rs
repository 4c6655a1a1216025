use serde::{Deserialize, Serialize};

/// One row of the VGChartz listing. Every field is kept as the text shown on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub rank: String,
    pub game: String,
    pub platform: String,
    pub publisher: String,
    pub developer: String,
    pub vgchartz_score: String,
    pub critic_score: String,
    pub user_score: String,
    pub total_shipped: String,
    pub total_sales: String,
    pub north_america_sales: String,
    /// Europe, most of Asia (minus Japan, South Korea, Taiwan and the Philippines), Africa,
    /// most of South America and Australia.
    pub pal_sales: String,
    pub japan_sales: String,
    pub other_sales: String,
    pub release_date: String,
    pub last_update_date: String,
}

pub const FIELD_COUNT: usize = 16;

impl GameRecord {
    /// CSV header, in serialization order.
    pub const HEADER: [&'static str; FIELD_COUNT] = [
        "rank",
        "game",
        "platform",
        "publisher",
        "developer",
        "vgchartz_score",
        "critic_score",
        "user_score",
        "total_shipped",
        "total_sales",
        "north_america_sales",
        "pal_sales",
        "japan_sales",
        "other_sales",
        "release_date",
        "last_update_date",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matches_serialized_field_order() {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(GameRecord::default()).unwrap();
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let header_line = out.lines().next().unwrap();

        assert_eq!(header_line, GameRecord::HEADER.join(","));
    }
}
