//! Shape rules for game payloads, identifiers, and responses.

use garde::Validate;
use gamedex_db::{models::iso_date, Game, NewGame};
use gamedex_http::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
};
use uuid::Uuid;

/// Wire names of the business fields, all mandatory.
const GAME_FIELDS: [&str; 4] = ["name", "url", "author", "publishedDate"];

/// Incoming game body, after the field types have been checked.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GamePayload {
    #[garde(length(utf16, min = 4))]
    pub name: String,
    #[garde(url)]
    pub url: String,
    #[garde(length(utf16, min = 4))]
    pub author: String,
    #[garde(custom(parseable_date))]
    pub published_date: String,
}

/// Path parameters of `/games/{id}`.
#[derive(Debug, Deserialize)]
pub struct GameIdParams {
    pub id: String,
}

/// Query parameters of `GET /games`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

impl SearchParams {
    /// The search term, with an empty one treated as absent.
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }
}

/// A stored game as emitted by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    #[garde(skip)]
    pub id: Uuid,
    #[garde(length(utf16, min = 4))]
    pub name: String,
    #[garde(url)]
    pub url: String,
    #[garde(length(utf16, min = 4))]
    pub author: String,
    #[garde(skip)]
    #[serde(with = "iso_date")]
    pub published_date: Date,
}

/// ISO date-time without an offset, read as UTC.
const LOCAL_DATE_TIME: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);

/// Calendar day (in UTC) of an ISO date or date-time.
fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text, iso_date::FORMAT)
        .ok()
        .or_else(|| {
            OffsetDateTime::parse(text, &Rfc3339)
                .ok()
                .map(|at| at.to_offset(UtcOffset::UTC).date())
        })
        .or_else(|| PrimitiveDateTime::parse(text, LOCAL_DATE_TIME).ok().map(|at| at.date()))
}

fn parseable_date(value: &String, _ctx: &()) -> garde::Result {
    match parse_date(value) {
        Some(_) => Ok(()),
        None => Err(garde::Error::new(
            "not a valid date; expected an ISO 8601 date or date-time",
        )),
    }
}

fn to_wire_name(path: &str) -> String {
    let mut name = String::with_capacity(path.len());
    let mut upper_next = false;
    for ch in path.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            name.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            name.push(ch);
        }
    }
    name
}

fn report_details(report: &garde::Report) -> Vec<Value> {
    report
        .iter()
        .map(|(path, error)| {
            json!({
                "field": to_wire_name(&path.to_string()),
                "error": error.message(),
            })
        })
        .collect()
}

/// Missing or non-string business fields, one entry each.
fn field_type_errors(body: &Value) -> Vec<Value> {
    let Some(object) = body.as_object() else {
        return vec![json!({ "field": "body", "error": "expected a JSON object" })];
    };

    GAME_FIELDS
        .iter()
        .filter_map(|field| match object.get(*field) {
            None => Some(json!({ "field": field, "error": "required" })),
            Some(Value::String(_)) => None,
            Some(_) => Some(json!({ "field": field, "error": "expected a string" })),
        })
        .collect()
}

/// Validate an arbitrary request body into the four business fields.
pub fn validate_game(body: Value) -> Result<NewGame, AppError> {
    let type_errors = field_type_errors(&body);
    if !type_errors.is_empty() {
        return Err(AppError::validation(type_errors, "Invalid game payload"));
    }

    let payload: GamePayload = serde_json::from_value(body).map_err(|e| {
        AppError::validation(
            vec![json!({ "field": "body", "error": e.to_string() })],
            "Invalid game payload",
        )
    })?;

    payload
        .validate()
        .map_err(|report| AppError::validation(report_details(&report), "Invalid game payload"))?;

    let published_date = parse_date(&payload.published_date).ok_or_else(|| {
        AppError::validation(
            vec![json!({ "field": "publishedDate", "error": "not a valid date" })],
            "Invalid game payload",
        )
    })?;

    Ok(NewGame {
        name: payload.name,
        url: payload.url,
        author: payload.author,
        published_date,
    })
}

/// Validate the `id` path parameter as a hyphenated UUID.
pub fn validate_id(params: &GameIdParams) -> Result<Uuid, AppError> {
    Uuid::try_parse(&params.id)
        .ok()
        .filter(|id| id.hyphenated().to_string().eq_ignore_ascii_case(&params.id))
        .ok_or_else(|| {
            AppError::validation(
                vec![json!({ "field": "id", "error": "must be a UUID" })],
                "Invalid game id",
            )
        })
}

/// Re-check a stored record before it leaves the API.
///
/// A failure means the store holds data the schema would never accept.
pub fn shape(game: Game) -> Result<GameResponse, AppError> {
    let response = GameResponse {
        id: game.id,
        name: game.name,
        url: game.url,
        author: game.author,
        published_date: game.published_date,
    };

    response.validate().map_err(|report| {
        AppError::Internal(anyhow::anyhow!(
            "stored game {} does not match the game schema: {}",
            response.id,
            report
        ))
    })?;

    Ok(response)
}

pub fn shape_all(games: Vec<Game>) -> Result<Vec<GameResponse>, AppError> {
    games.into_iter().map(shape).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn chess() -> Value {
        json!({
            "name": "Chess",
            "url": "https://chess.com",
            "author": "Carl",
            "publishedDate": "2020-01-01"
        })
    }

    fn invalid_fields(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation { details, .. } => details
                .iter()
                .map(|d| d["field"].as_str().unwrap().to_string())
                .collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_payload_is_normalized() {
        let game = validate_game(chess()).unwrap();
        assert_eq!(game.name, "Chess");
        assert_eq!(game.url, "https://chess.com");
        assert_eq!(game.author, "Carl");
        assert_eq!(game.published_date, date!(2020 - 01 - 01));
    }

    #[test]
    fn timestamp_dates_keep_their_calendar_day() {
        let mut body = chess();
        body["publishedDate"] = json!("2020-01-01T10:30:00Z");
        let game = validate_game(body).unwrap();
        assert_eq!(game.published_date, date!(2020 - 01 - 01));
    }

    #[test]
    fn timestamps_without_offset_are_accepted_as_utc() {
        for text in ["2020-01-01T10:00:00", "2020-01-01T10:00:00.000", "2020-01-01T10:00"] {
            let mut body = chess();
            body["publishedDate"] = json!(text);
            let game = validate_game(body).unwrap();
            assert_eq!(game.published_date, date!(2020 - 01 - 01), "{text}");
        }
    }

    #[test]
    fn offset_timestamps_are_converted_to_the_utc_day() {
        let mut body = chess();
        body["publishedDate"] = json!("2020-01-01T23:00:00-05:00");
        assert_eq!(validate_game(body).unwrap().published_date, date!(2020 - 01 - 02));

        let mut body = chess();
        body["publishedDate"] = json!("2020-01-02T01:00:00+03:00");
        assert_eq!(validate_game(body).unwrap().published_date, date!(2020 - 01 - 01));
    }

    #[test]
    fn short_name_and_author_are_rejected() {
        let mut body = chess();
        body["name"] = json!("Go");
        body["author"] = json!("Al");

        let fields = invalid_fields(validate_game(body).unwrap_err());
        assert_eq!(fields.len(), 2);
        assert!(fields.contains(&"name".to_string()));
        assert!(fields.contains(&"author".to_string()));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut body = chess();
        body["name"] = json!("ééé");
        assert_eq!(invalid_fields(validate_game(body).unwrap_err()), ["name"]);

        let mut body = chess();
        body["name"] = json!("éééé");
        assert!(validate_game(body).is_ok());
    }

    #[test]
    fn malformed_url_is_rejected() {
        let mut body = chess();
        body["url"] = json!("chess dot com");
        assert_eq!(invalid_fields(validate_game(body).unwrap_err()), ["url"]);
    }

    #[test]
    fn unparseable_date_is_reported_with_wire_name() {
        let mut body = chess();
        body["publishedDate"] = json!("first of january");
        assert_eq!(
            invalid_fields(validate_game(body).unwrap_err()),
            ["publishedDate"]
        );
    }

    #[test]
    fn missing_and_mistyped_fields_are_enumerated() {
        let body = json!({ "name": "Chess", "url": 42 });
        assert_eq!(
            invalid_fields(validate_game(body).unwrap_err()),
            ["url", "author", "publishedDate"]
        );
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(invalid_fields(validate_game(json!([1, 2])).unwrap_err()), ["body"]);
    }

    #[test]
    fn id_must_be_a_hyphenated_uuid() {
        let id = Uuid::new_v4();
        let params = GameIdParams { id: id.to_string() };
        assert_eq!(validate_id(&params).unwrap(), id);

        let upper = GameIdParams {
            id: id.to_string().to_uppercase(),
        };
        assert_eq!(validate_id(&upper).unwrap(), id);

        let simple = id.simple().to_string();
        for bad in ["42", "not-a-uuid", simple.as_str()] {
            let params = GameIdParams { id: bad.to_string() };
            assert_eq!(invalid_fields(validate_id(&params).unwrap_err()), ["id"]);
        }
    }

    #[test]
    fn empty_search_counts_as_absent() {
        let params = SearchParams {
            search: Some(String::new()),
        };
        assert_eq!(params.term(), None);

        let params = SearchParams {
            search: Some("chess".to_string()),
        };
        assert_eq!(params.term(), Some("chess"));
    }

    #[test]
    fn shape_rejects_records_that_break_the_schema() {
        let game = Game {
            id: Uuid::new_v4(),
            name: "Go".to_string(),
            url: "https://example.com".to_string(),
            author: "Someone".to_string(),
            published_date: date!(2020 - 01 - 01),
        };
        assert!(matches!(shape(game), Err(AppError::Internal(_))));
    }

    #[test]
    fn shape_serializes_with_wire_names() {
        let id = Uuid::new_v4();
        let shaped = shape(validate_game(chess()).unwrap().with_id(id)).unwrap();
        let mut expected = chess();
        expected["id"] = json!(id);
        assert_eq!(serde_json::to_value(shaped).unwrap(), expected);
    }
}
