//! Form payloads and field-level validation
//!
//! Validation fully fails before any write: a payload either passes every
//! check or is rejected with `InvalidInput` naming the first offending
//! field. Enum membership (state codes, genres) is checked against the
//! closed vocabularies in [`crate::us_state`] and [`crate::genre`].

use crate::error::Error;
use crate::genre::{join_genres, Genre};
use crate::us_state::UsState;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Submission payload for creating or editing a venue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl VenueForm {
    /// Check every field constraint; no partial acceptance
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("city", &self.city)?;
        require("state", &self.state)?;
        require("address", &self.address)?;
        require("phone", &self.phone)?;
        parse_state(&self.state)?;
        parse_genres(&self.genres)?;
        Ok(())
    }

    /// Canonical comma-joined column value for the genres field
    pub fn genres_joined(&self) -> Result<String> {
        Ok(join_genres(&parse_genres(&self.genres)?))
    }
}

/// Submission payload for creating or editing an artist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    /// Check every field constraint; no partial acceptance
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("city", &self.city)?;
        require("state", &self.state)?;
        require("phone", &self.phone)?;
        parse_state(&self.state)?;
        parse_genres(&self.genres)?;
        Ok(())
    }

    /// Canonical comma-joined column value for the genres field
    pub fn genres_joined(&self) -> Result<String> {
        Ok(join_genres(&parse_genres(&self.genres)?))
    }
}

/// Submission payload for listing a show
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowForm {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

impl ShowForm {
    /// Check every field constraint; no partial acceptance
    pub fn validate(&self) -> Result<()> {
        if self.artist_id < 1 {
            return Err(Error::InvalidInput(format!(
                "artist_id must be positive, got {}",
                self.artist_id
            )));
        }
        if self.venue_id < 1 {
            return Err(Error::InvalidInput(format!(
                "venue_id must be positive, got {}",
                self.venue_id
            )));
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

/// Validate a state code against the closed vocabulary
pub fn parse_state(code: &str) -> Result<UsState> {
    UsState::from_str(code)
        .ok_or_else(|| Error::InvalidInput(format!("unknown state code: {code}")))
}

/// Validate a multi-select genre submission against the closed vocabulary
pub fn parse_genres(raw: &[String]) -> Result<Vec<Genre>> {
    raw.iter()
        .map(|token| {
            Genre::from_str(token)
                .ok_or_else(|| Error::InvalidInput(format!("unknown genre: {token}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue_form() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom St".to_string(),
            phone: "123-123-1234".to_string(),
            genres: vec!["Jazz".to_string(), "Reggae".to_string()],
            seeking_talent: true,
            ..VenueForm::default()
        }
    }

    #[test]
    fn complete_venue_form_passes() {
        assert!(venue_form().validate().is_ok());
    }

    #[test]
    fn missing_name_rejects() {
        let form = VenueForm {
            name: "  ".to_string(),
            ..venue_form()
        };
        assert!(matches!(form.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn unknown_state_rejects() {
        let form = VenueForm {
            state: "XX".to_string(),
            ..venue_form()
        };
        assert!(matches!(form.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn unknown_genre_rejects_whole_submission() {
        let form = VenueForm {
            genres: vec!["Jazz".to_string(), "Polka".to_string()],
            ..venue_form()
        };
        assert!(matches!(form.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn genres_join_canonically() {
        assert_eq!(venue_form().genres_joined().unwrap(), "Jazz,Reggae");
    }

    #[test]
    fn artist_form_has_no_address_requirement() {
        let form = ArtistForm {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            genres: vec!["Rock n Roll".to_string()],
            ..ArtistForm::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn show_form_rejects_non_positive_ids() {
        let form = ShowForm {
            artist_id: 0,
            venue_id: 1,
            start_time: Utc::now(),
        };
        assert!(matches!(form.validate(), Err(Error::InvalidInput(_))));
    }
}
