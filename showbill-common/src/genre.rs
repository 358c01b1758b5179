//! Genre vocabulary for venues and artists
//!
//! Genres are stored in one comma-joined TEXT column. Keeping the values in
//! a closed enum guarantees no stored token contains the delimiter, so the
//! column always splits back into exactly the genres that were written.

use serde::{Deserialize, Serialize};

/// Musical genres offered by the listing forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    #[serde(rename = "Heavy Metal")]
    HeavyMetal,
    Instrumental,
    Jazz,
    #[serde(rename = "Musical Theatre")]
    MusicalTheatre,
    Pop,
    Punk,
    #[serde(rename = "R&B")]
    RnB,
    Reggae,
    #[serde(rename = "Rock n Roll")]
    RockNRoll,
    Soul,
    Other,
}

impl Genre {
    /// Parse a genre from its form/database token
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Alternative" => Some(Genre::Alternative),
            "Blues" => Some(Genre::Blues),
            "Classical" => Some(Genre::Classical),
            "Country" => Some(Genre::Country),
            "Electronic" => Some(Genre::Electronic),
            "Folk" => Some(Genre::Folk),
            "Funk" => Some(Genre::Funk),
            "Hip-Hop" => Some(Genre::HipHop),
            "Heavy Metal" => Some(Genre::HeavyMetal),
            "Instrumental" => Some(Genre::Instrumental),
            "Jazz" => Some(Genre::Jazz),
            "Musical Theatre" => Some(Genre::MusicalTheatre),
            "Pop" => Some(Genre::Pop),
            "Punk" => Some(Genre::Punk),
            "R&B" => Some(Genre::RnB),
            "Reggae" => Some(Genre::Reggae),
            "Rock n Roll" => Some(Genre::RockNRoll),
            "Soul" => Some(Genre::Soul),
            "Other" => Some(Genre::Other),
            _ => None,
        }
    }

    /// Canonical token used in forms and in the database column
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Alternative => "Alternative",
            Genre::Blues => "Blues",
            Genre::Classical => "Classical",
            Genre::Country => "Country",
            Genre::Electronic => "Electronic",
            Genre::Folk => "Folk",
            Genre::Funk => "Funk",
            Genre::HipHop => "Hip-Hop",
            Genre::HeavyMetal => "Heavy Metal",
            Genre::Instrumental => "Instrumental",
            Genre::Jazz => "Jazz",
            Genre::MusicalTheatre => "Musical Theatre",
            Genre::Pop => "Pop",
            Genre::Punk => "Punk",
            Genre::RnB => "R&B",
            Genre::Reggae => "Reggae",
            Genre::RockNRoll => "Rock n Roll",
            Genre::Soul => "Soul",
            Genre::Other => "Other",
        }
    }

    /// All genre variants, for form option listings and validation
    pub fn all() -> &'static [Genre] {
        &[
            Genre::Alternative,
            Genre::Blues,
            Genre::Classical,
            Genre::Country,
            Genre::Electronic,
            Genre::Folk,
            Genre::Funk,
            Genre::HipHop,
            Genre::HeavyMetal,
            Genre::Instrumental,
            Genre::Jazz,
            Genre::MusicalTheatre,
            Genre::Pop,
            Genre::Punk,
            Genre::RnB,
            Genre::Reggae,
            Genre::RockNRoll,
            Genre::Soul,
            Genre::Other,
        ]
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize a genre list into the delimited database column value
pub fn join_genres(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|g| g.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Split a delimited database column value back into genres
///
/// Unknown or empty tokens are skipped rather than failing the read; the
/// write path only ever stores canonical tokens.
pub fn split_genres(field: &str) -> Vec<Genre> {
    field.split(',').filter_map(Genre::from_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_through_delimited_column() {
        let genres = vec![Genre::Jazz, Genre::Reggae];
        let field = join_genres(&genres);
        assert_eq!(field, "Jazz,Reggae");
        assert_eq!(split_genres(&field), genres);
    }

    #[test]
    fn no_token_contains_the_delimiter() {
        for genre in Genre::all() {
            assert!(
                !genre.as_str().contains(','),
                "{} would corrupt the delimited column",
                genre
            );
        }
    }

    #[test]
    fn every_token_parses_back() {
        for genre in Genre::all() {
            assert_eq!(Genre::from_str(genre.as_str()), Some(*genre));
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert_eq!(Genre::from_str("Polka"), None);
        assert_eq!(Genre::from_str(""), None);
    }

    #[test]
    fn empty_field_splits_to_nothing() {
        assert!(split_genres("").is_empty());
    }
}
