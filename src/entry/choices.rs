//! Fixed vocabularies of the matching entry

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::string_list::Vocabulary;

/// A closed set of wire values, each with a display label.
pub trait Choice: Copy + Sized + 'static {
    /// Every choice in display order.
    const ALL: &'static [Self];

    /// The wire value as text.
    fn key(self) -> Cow<'static, str>;

    /// The display label.
    fn label(self) -> &'static str;

    /// Look up a choice by its wire value.
    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.key() == key)
    }

    /// All choices as a labeled vocabulary.
    fn vocabulary() -> Vocabulary {
        Vocabulary::from_labeled_pairs(
            Self::ALL
                .iter()
                .map(|choice| (choice.key().into_owned(), choice.label())),
        )
    }
}

/// A value that is not one of a field's choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice(pub String);

impl fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" is not a valid choice.", self.0)
    }
}

impl std::error::Error for InvalidChoice {}

macro_rules! string_choices {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($value:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// The wire value.
            pub fn value(self) -> &'static str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$( $name::$variant ),+];

            fn key(self) -> Cow<'static, str> {
                Cow::Borrowed(self.value())
            }

            fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidChoice;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_key(&value).ok_or(InvalidChoice(value))
            }
        }

        impl From<$name> for String {
            fn from(choice: $name) -> String {
                choice.value().to_string()
            }
        }
    };
}

string_choices! {
    /// Broad genre of an album.
    MacroGenre {
        /// Country, folk and blues.
        CountryFolkBlues => ("Country, Folk & Blues", "Country, Folk & Blues"),
        /// Classical.
        Classical => ("Classical", "Classical"),
        /// Electronic and dance.
        ElectronicDance => ("Electronic and Dance", "Electronic and Dance"),
        /// Hip hop and R&B.
        HipHopRnb => ("Hip Hop and R&B", "Hip Hop and R&B"),
        /// Indie, indie pop, emo and pop punk.
        IndiePopPunk => ("Indie, Indie Pop, Emo and Pop Punk", "Indie, Indie Pop, Emo and Pop Punk"),
        /// Jazz, soul, neo-soul and funk.
        JazzSoulFunk => ("Jazz, Soul, Neo-Soul and Funk", "Jazz, Soul, Neo-Soul and Funk"),
        /// Pop.
        Pop => ("Pop", "Pop"),
        /// Rock, metal, punk and neighbours.
        RockMetalPunk => (
            "Rock, Metal, Punk, Noise, Prog, Post-Rock, Industrial",
            "Rock, Metal, Punk, Noise, Prog, Post-Rock, Industrial"
        ),
        /// Anything else.
        Other => ("Other", "Other"),
    }
}

string_choices! {
    /// Decade an album sounds like.
    MusicDecade {
        /// No preference given; the blank value.
        NoChoice => ("", "No Choice"),
        /// Before the fifties.
        Pre50s => ("Pre-50s", "Pre-50s"),
        /// 1950s.
        D50s => ("50s", "50s"),
        /// 1960s.
        D60s => ("60s", "60s"),
        /// 1970s.
        D70s => ("70s", "70s"),
        /// 1980s.
        D80s => ("80s", "80s"),
        /// 1990s.
        D90s => ("90s", "90s"),
        /// 2000s.
        D00s => ("00s", "2000s"),
        /// 2010s and 2020s.
        D10s20s => ("10s-20s", "2010s-20s"),
    }
}

string_choices! {
    /// What a user wants out of the exchange.
    TalkativityPreference {
        /// Talk about music as well as swap recommendations.
        Talking => ("Talking", "Talking and Recommendation"),
        /// Only swap recommendations.
        RecommendationOnly => ("Rec Only", "Recommendation Only"),
        /// Meet other people in the scene.
        Networking => ("Networking", "Networking"),
    }
}

string_choices! {
    /// How acceptable a kind of match is.
    OkLevel {
        /// Fine.
        TotallyOk => ("Totally OK", "Totally OK"),
        /// Acceptable, not preferred.
        MediumOk => ("Medium OK", "OK but preferably not"),
        /// Not acceptable.
        NotOk => ("Not OK", "Not OK"),
    }
}

/// Agreement with a statement, on a five-point scale.
///
/// Travels on the wire as an integer from -2 to 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum AgreementLevel {
    /// -2
    StronglyDisagree,
    /// -1
    SomewhatDisagree,
    /// 0
    Neither,
    /// 1
    SomewhatAgree,
    /// 2
    StronglyAgree,
}

impl AgreementLevel {
    /// The wire value.
    pub fn value(self) -> i8 {
        match self {
            AgreementLevel::StronglyAgree => 2,
            AgreementLevel::SomewhatAgree => 1,
            AgreementLevel::Neither => 0,
            AgreementLevel::SomewhatDisagree => -1,
            AgreementLevel::StronglyDisagree => -2,
        }
    }
}

impl Choice for AgreementLevel {
    const ALL: &'static [Self] = &[
        AgreementLevel::StronglyAgree,
        AgreementLevel::SomewhatAgree,
        AgreementLevel::Neither,
        AgreementLevel::SomewhatDisagree,
        AgreementLevel::StronglyDisagree,
    ];

    fn key(self) -> Cow<'static, str> {
        Cow::Owned(self.value().to_string())
    }

    fn label(self) -> &'static str {
        match self {
            AgreementLevel::StronglyAgree => "Strongly Agree",
            AgreementLevel::SomewhatAgree => "Somewhat Agree",
            AgreementLevel::Neither => "Neither",
            AgreementLevel::SomewhatDisagree => "Somewhat Disagree",
            AgreementLevel::StronglyDisagree => "Strongly Disagree",
        }
    }
}

impl TryFrom<i64> for AgreementLevel {
    type Error = InvalidChoice;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| i64::from(level.value()) == value)
            .ok_or_else(|| InvalidChoice(value.to_string()))
    }
}

impl From<AgreementLevel> for i64 {
    fn from(level: AgreementLevel) -> i64 {
        i64::from(level.value())
    }
}

/// Adjectives a user may pick to describe an album or a wished-for match.
pub const ADJECTIVE_CHOICES: &[&str] = &[
    "All over the place",
    "Ambitious/epic",
    "Angry/passionate/intense",
    "Chill/slow-paced/ballads",
    "Classic/influential",
    "Concept album",
    "Danceable/festival",
    "Disturbing/disgusting",
    "Domestic/wholesome/sincere",
    "Dreamy/meditative",
    "Empowering/proud",
    "Experimental/strange",
    "Fast-paced/Upbeat",
    "Funny",
    "Happy/joyful",
    "Heartbreaking/break-up",
    "Instrumental (i.e. no lyrics)",
    "Loud",
    "LGBT",
    "Lyrical",
    "Musically complex",
    "Musically simple/acoustic",
    "Political",
    "Psychedelic",
    "Quiet",
    "Romantic",
    "Sad/melancholic/sombre",
    "Screaming/shouting",
    "Silly",
    "Summery",
    "Vibey",
    "Wintery",
];

/// [`ADJECTIVE_CHOICES`] as a plain vocabulary.
pub fn adjective_vocabulary() -> Vocabulary {
    Vocabulary::from_values(ADJECTIVE_CHOICES.iter().copied())
}
