//! The matching entry: one user's album recommendation and match preferences
//!
//! [`EntrySchema`] turns an untyped decoded record into a [`MatchingEntry`].
//! Every field is checked independently and all failures come back together
//! in one [`FieldErrors`], keyed by field name.
//!
//! # Example
//!
//! ```
//! use albumswap::entry::EntrySchema;
//! use serde_json::json;
//!
//! let schema = EntrySchema::new();
//! let errors = schema
//!     .validate(&json!({"album_spotify_id": "short", "match_macrogenre": ["Pop"]}))
//!     .into_result()
//!     .unwrap_err();
//!
//! assert_eq!(
//!     errors.get("album_spotify_id").unwrap(),
//!     &["Your Spotify ID was invalid.".to_string()]
//! );
//! assert!(errors.contains("match_macrogenre"));
//! assert!(errors.contains("triplet"));
//! ```

pub mod choices;
mod fields;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use choices::{
    adjective_vocabulary, AgreementLevel, Choice, InvalidChoice, MacroGenre, MusicDecade, OkLevel,
    TalkativityPreference, ADJECTIVE_CHOICES,
};
pub use fields::{SpotifyId, SpotifyIdFormat, INVALID_SPOTIFY_ID};

use crate::error::NON_FIELD_ERRORS;
use crate::guard::{holds_falsy_non_list, GuardedField, ListFieldGuard};
use crate::string_list::StringListValidator;
use crate::{FieldErrors, Validation};
use fields::{boolean, choice, spotify_id, TextField, REQUIRED};

/// A validated matching entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingEntry {
    /// The album being recommended.
    pub album_spotify_id: SpotifyId,
    /// Broad genre of the album.
    pub album_macrogenre: MacroGenre,
    /// Free description of the album.
    pub album_description: String,
    /// Microgenre(s) of the album; may be blank.
    pub album_microgenre: String,
    /// Decade the album sounds like.
    pub album_decade: MusicDecade,
    /// Adjectives describing the album.
    pub album_adjectives: Vec<String>,
    /// Musical elements loved most about the album.
    pub album_musical_elements: Vec<String>,
    /// Country the album comes from; may be blank.
    pub album_country: String,
    /// First recommended artist.
    pub artist_1_spotify_id: SpotifyId,
    /// Second recommended artist.
    pub artist_2_spotify_id: SpotifyId,
    /// What the user wants out of the exchange.
    pub talkativity_preference: TalkativityPreference,
    /// How acceptable a match who wants to chat is.
    pub minds_talking: OkLevel,
    /// How acceptable a match who does not want to talk is.
    pub minds_not_talking: OkLevel,
    /// "I'm adventurous and want to try something very new."
    pub adventurous: AgreementLevel,
    /// "I want someone who listens to my type of music."
    pub person_above_adventure: AgreementLevel,
    /// Willing to be matched in a triplet.
    pub triplet: bool,
    /// Acceptable macrogenres for the match, in order of preference.
    pub match_macrogenre: Vec<String>,
    /// Language preference for the match.
    pub match_language: String,
    /// Happy to receive an instrumental album.
    pub match_instrumental: bool,
    /// The kind of album wanted.
    pub match_description: String,
    /// Microgenre(s) wanted; may be blank.
    pub match_microgenre: String,
    /// Adjectives the match should embody.
    pub match_adjectives: Vec<String>,
    /// Musical elements the match should have.
    pub match_musical_elements: Vec<String>,
    /// Countries the match should come from; may be blank.
    pub match_country: String,
    /// What the user wants out of taking part.
    pub what_get_out: String,
}

/// A list-valued field of the entry and how an absent value is treated.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListField {
    name: &'static str,
    required: bool,
    guarded: bool,
    validator: StringListValidator,
}

impl ListField {
    fn parse(&self, record: &Map<String, Value>) -> Validation<Vec<String>, FieldErrors> {
        match record.get(self.name) {
            None if self.required => Validation::failure(FieldErrors::single(self.name, REQUIRED)),
            None => Validation::success(Vec::new()),
            // left to the record-level guard
            Some(value) if self.guarded && holds_falsy_non_list(value) => {
                Validation::success(Vec::new())
            }
            Some(value) => self.validator.validate_field(self.name, value),
        }
    }
}

/// Validation rules for a whole matching entry.
///
/// Built once and reused; holds no per-call state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySchema {
    album_adjectives: ListField,
    album_musical_elements: ListField,
    match_macrogenre: ListField,
    match_adjectives: ListField,
    match_musical_elements: ListField,
    guard: ListFieldGuard,
}

impl Default for EntrySchema {
    fn default() -> Self {
        Self::new()
    }
}

impl EntrySchema {
    /// The schema of the matching exchange.
    pub fn new() -> Self {
        let optional = |name, validator| ListField {
            name,
            required: false,
            guarded: true,
            validator,
        };

        Self {
            album_adjectives: optional(
                "album_adjectives",
                StringListValidator::new("Your album adjectives were invalid.")
                    .with_field_name("album adjectives")
                    .with_choices(adjective_vocabulary()),
            ),
            album_musical_elements: optional(
                "album_musical_elements",
                StringListValidator::new("Your album musical elements are invalid."),
            ),
            match_macrogenre: ListField {
                name: "match_macrogenre",
                required: true,
                guarded: false,
                validator: StringListValidator::new(
                    "Your match macrogenre was invalid, you might not have selected enough genres.",
                )
                .with_field_name("match macrogenre")
                .with_choices(MacroGenre::vocabulary())
                .with_min_items(2),
            },
            match_adjectives: optional(
                "match_adjectives",
                StringListValidator::new("Your match adjectives are invalid.")
                    .with_field_name("match adjectives")
                    .with_choices(adjective_vocabulary()),
            ),
            match_musical_elements: optional(
                "match_musical_elements",
                StringListValidator::new("Your match musical elements are invalid."),
            ),
            guard: ListFieldGuard::new([
                GuardedField::labeled("album_adjectives", "album adjectives"),
                GuardedField::labeled("album_musical_elements", "album musical elements"),
                GuardedField::labeled("match_adjectives", "match adjectives"),
                GuardedField::labeled("match_musical_elements", "match musical elements"),
            ]),
        }
    }

    /// The validator used for a list field, by field name.
    pub fn list_validator(&self, field: &str) -> Option<&StringListValidator> {
        self.list_fields()
            .into_iter()
            .find(|list| list.name == field)
            .map(|list| &list.validator)
    }

    /// The record-level guard over optional list fields.
    pub fn guard(&self) -> &ListFieldGuard {
        &self.guard
    }

    fn list_fields(&self) -> [&ListField; 5] {
        [
            &self.album_adjectives,
            &self.album_musical_elements,
            &self.match_macrogenre,
            &self.match_adjectives,
            &self.match_musical_elements,
        ]
    }

    /// Validate a decoded record.
    ///
    /// Unknown keys are ignored, as are the read-only `user` and
    /// `created_at` keys.
    pub fn validate(&self, input: &Value) -> Validation<MatchingEntry, FieldErrors> {
        let Some(record) = input.as_object() else {
            return Validation::failure(FieldErrors::single(
                NON_FIELD_ERRORS,
                "Invalid data. Expected a dictionary.",
            ));
        };

        let album = Validation::all((
            spotify_id(record, "album_spotify_id"),
            choice::<MacroGenre>(record, "album_macrogenre", None),
            TextField::required("album_description").parse(record),
            TextField::optional("album_microgenre").max_len(200).parse(record),
            choice(record, "album_decade", Some(MusicDecade::NoChoice)),
            self.album_adjectives.parse(record),
            self.album_musical_elements.parse(record),
            TextField::optional("album_country").max_len(70).parse(record),
        ));

        let artists = Validation::all((
            spotify_id(record, "artist_1_spotify_id"),
            spotify_id(record, "artist_2_spotify_id"),
        ));

        let preferences = Validation::all((
            choice::<TalkativityPreference>(record, "talkativity_preference", None),
            choice::<OkLevel>(record, "minds_talking", None),
            choice::<OkLevel>(record, "minds_not_talking", None),
            choice::<AgreementLevel>(record, "adventurous", None),
            choice::<AgreementLevel>(record, "person_above_adventure", None),
            boolean(record, "triplet"),
        ));

        let wished = Validation::all((
            self.match_macrogenre.parse(record),
            TextField::optional("match_language")
                .defaulting_to("English")
                .max_len(80)
                .parse(record),
            boolean(record, "match_instrumental"),
            TextField::required("match_description").parse(record),
            TextField::optional("match_microgenre").max_len(100).parse(record),
            self.match_adjectives.parse(record),
            self.match_musical_elements.parse(record),
            TextField::optional("match_country").max_len(100).parse(record),
            TextField::optional("what_get_out").parse(record),
        ));

        let consistency = self.guard.check(&self.with_list_defaults(record));

        let result = Validation::all((album, artists, preferences, wished))
            .and(consistency)
            .map(
                |((
                    (
                        album_spotify_id,
                        album_macrogenre,
                        album_description,
                        album_microgenre,
                        album_decade,
                        album_adjectives,
                        album_musical_elements,
                        album_country,
                    ),
                    (artist_1_spotify_id, artist_2_spotify_id),
                    (
                        talkativity_preference,
                        minds_talking,
                        minds_not_talking,
                        adventurous,
                        person_above_adventure,
                        triplet,
                    ),
                    (
                        match_macrogenre,
                        match_language,
                        match_instrumental,
                        match_description,
                        match_microgenre,
                        match_adjectives,
                        match_musical_elements,
                        match_country,
                        what_get_out,
                    ),
                ), ())| MatchingEntry {
                    album_spotify_id,
                    album_macrogenre,
                    album_description,
                    album_microgenre,
                    album_decade,
                    album_adjectives,
                    album_musical_elements,
                    album_country,
                    artist_1_spotify_id,
                    artist_2_spotify_id,
                    talkativity_preference,
                    minds_talking,
                    minds_not_talking,
                    adventurous,
                    person_above_adventure,
                    triplet,
                    match_macrogenre,
                    match_language,
                    match_instrumental,
                    match_description,
                    match_microgenre,
                    match_adjectives,
                    match_musical_elements,
                    match_country,
                    what_get_out,
                },
            );

        if let Validation::Failure(errors) = &result {
            tracing::debug!(
                fields = ?errors.fields().collect::<Vec<_>>(),
                "matching entry rejected"
            );
        }
        result
    }

    // Absent optional list fields read as empty lists before the guard runs.
    fn with_list_defaults(&self, record: &Map<String, Value>) -> Map<String, Value> {
        let mut effective = record.clone();
        for list in self.list_fields() {
            if !list.required {
                effective
                    .entry(list.name)
                    .or_insert_with(|| Value::Array(Vec::new()));
            }
        }
        effective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_input() -> Value {
        json!({
            "album_spotify_id": "4aawyAB9vmqN3uQ7FjRGTy",
            "album_macrogenre": "Jazz, Soul, Neo-Soul and Funk",
            "album_description": "Warm late-night record.",
            "album_adjectives": ["Vibey", "Chill/slow-paced/ballads"],
            "artist_1_spotify_id": "0OdUWJ0sBjDrqHygGUXeCF",
            "artist_2_spotify_id": "3WrFJ7ztbogyGnTHbHJFl2",
            "talkativity_preference": "Talking",
            "minds_talking": "Totally OK",
            "minds_not_talking": "Medium OK",
            "adventurous": 1,
            "person_above_adventure": -2,
            "triplet": false,
            "match_macrogenre": ["Pop", "Other"],
            "match_instrumental": true,
            "match_description": "Anything with horns."
        })
    }

    fn errors_for(input: Value) -> FieldErrors {
        EntrySchema::new().validate(&input).into_result().unwrap_err()
    }

    #[test]
    fn accepts_minimal_entry_with_defaults() {
        let entry = EntrySchema::new().validate(&valid_input()).into_result().unwrap();
        assert_eq!(entry.album_adjectives, vec!["Vibey", "Chill/slow-paced/ballads"]);
        assert!(entry.album_musical_elements.is_empty());
        assert_eq!(entry.album_decade, MusicDecade::NoChoice);
        assert_eq!(entry.match_language, "English");
        assert_eq!(entry.adventurous, AgreementLevel::SomewhatAgree);
        assert_eq!(entry.match_macrogenre, vec!["Pop", "Other"]);
    }

    #[test]
    fn rejects_non_object() {
        let errors = errors_for(json!([1, 2]));
        assert!(errors.contains(NON_FIELD_ERRORS));
    }

    #[test]
    fn reports_every_bad_field() {
        let mut input = valid_input();
        input["album_spotify_id"] = json!("bad");
        input["album_decade"] = json!("30s");
        input["triplet"] = json!("no");
        input["album_country"] = json!("x".repeat(71));
        let errors = errors_for(input);
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["album_country", "album_decade", "album_spotify_id", "triplet"]
        );
    }

    #[test]
    fn match_macrogenre_needs_two_known_genres() {
        let mut input = valid_input();
        input["match_macrogenre"] = json!(["Pop"]);
        assert_eq!(
            errors_for(input.clone()).get("match_macrogenre").unwrap(),
            &["Your match macrogenre was invalid, you might not have selected enough genres."
                .to_string()]
        );

        input["match_macrogenre"] = json!(["Pop", "Polka"]);
        assert_eq!(
            errors_for(input.clone()).get("match_macrogenre").unwrap(),
            &["Your choice \"Polka\" is not one of the allowed choices in match macrogenre."
                .to_string()]
        );

        input.as_object_mut().unwrap().remove("match_macrogenre");
        assert_eq!(
            errors_for(input).get("match_macrogenre").unwrap(),
            &[REQUIRED.to_string()]
        );
    }

    #[test]
    fn falsy_list_fields_are_caught_by_guard() {
        let mut input = valid_input();
        input["album_adjectives"] = json!(0);
        input["match_musical_elements"] = json!(false);
        let errors = errors_for(input);
        assert_eq!(
            errors.get("album_adjectives").unwrap(),
            &["The album adjectives are not in a valid list.".to_string()]
        );
        assert_eq!(
            errors.get("match_musical_elements").unwrap(),
            &["The match musical elements are not in a valid list.".to_string()]
        );
    }

    #[test]
    fn truthy_non_list_is_caught_by_field_validator() {
        let mut input = valid_input();
        input["album_musical_elements"] = json!({"a": "b"});
        assert_eq!(
            errors_for(input).get("album_musical_elements").unwrap(),
            &["Your album musical elements are invalid.".to_string()]
        );
    }

    #[test]
    fn serde_round_trip_keeps_wire_values() {
        let entry = EntrySchema::new().validate(&valid_input()).into_result().unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["adventurous"], json!(1));
        assert_eq!(json["album_decade"], json!(""));
        let back: MatchingEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn exposes_list_validators() {
        let schema = EntrySchema::new();
        assert_eq!(
            schema.list_validator("match_macrogenre").and_then(|v| v.min_items()),
            Some(2)
        );
        assert!(schema.list_validator("album_country").is_none());
        assert_eq!(schema.guard().fields().len(), 4);
    }
}
