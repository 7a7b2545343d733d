use serde::Serialize;
use time::Date;
use uuid::Uuid;

/// A game row from the `games` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Assigned by the store on insert, never changed afterwards
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub author: String,
    #[serde(with = "iso_date")]
    pub published_date: Date,
}

/// The four business fields of a game, already validated.
///
/// Used both for inserts and for full-replacement updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub name: String,
    pub url: String,
    pub author: String,
    pub published_date: Date,
}

impl NewGame {
    /// Attach an identifier, producing the stored shape.
    pub fn with_id(self, id: Uuid) -> Game {
        Game {
            id,
            name: self.name,
            url: self.url,
            author: self.author,
            published_date: self.published_date,
        }
    }
}

/// `YYYY-MM-DD` output format for [`Date`] fields.
pub mod iso_date {
    use serde::Serializer;
    use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

    pub const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn game_serializes_with_camel_case_and_plain_date() {
        let game = Game {
            id: Uuid::nil(),
            name: "Chess".to_string(),
            url: "https://chess.com".to_string(),
            author: "Carl".to_string(),
            published_date: date!(2020 - 01 - 01),
        };

        let value = serde_json::to_value(&game).unwrap();
        assert_eq!(value["publishedDate"], "2020-01-01");
        assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");
        assert!(value.get("published_date").is_none());
    }
}
