//! US state codes accepted by the listing forms

use serde::{Deserialize, Serialize};

/// Two-letter US state codes (50 states plus DC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum UsState {
    AL, AK, AZ, AR, CA, CO, CT, DE, DC, FL,
    GA, HI, ID, IL, IN, IA, KS, KY, LA, ME,
    MD, MA, MI, MN, MS, MO, MT, NE, NV, NH,
    NJ, NM, NY, NC, ND, OH, OK, OR, PA, RI,
    SC, SD, TN, TX, UT, VT, VA, WA, WV, WI,
    WY,
}

impl UsState {
    /// Parse a state code, accepting any letter case
    pub fn from_str(s: &str) -> Option<Self> {
        let code = s.to_uppercase();
        UsState::all().iter().copied().find(|st| st.code() == code)
    }

    /// Canonical two-letter code
    pub fn code(&self) -> &'static str {
        match self {
            UsState::AL => "AL", UsState::AK => "AK", UsState::AZ => "AZ",
            UsState::AR => "AR", UsState::CA => "CA", UsState::CO => "CO",
            UsState::CT => "CT", UsState::DE => "DE", UsState::DC => "DC",
            UsState::FL => "FL", UsState::GA => "GA", UsState::HI => "HI",
            UsState::ID => "ID", UsState::IL => "IL", UsState::IN => "IN",
            UsState::IA => "IA", UsState::KS => "KS", UsState::KY => "KY",
            UsState::LA => "LA", UsState::ME => "ME", UsState::MD => "MD",
            UsState::MA => "MA", UsState::MI => "MI", UsState::MN => "MN",
            UsState::MS => "MS", UsState::MO => "MO", UsState::MT => "MT",
            UsState::NE => "NE", UsState::NV => "NV", UsState::NH => "NH",
            UsState::NJ => "NJ", UsState::NM => "NM", UsState::NY => "NY",
            UsState::NC => "NC", UsState::ND => "ND", UsState::OH => "OH",
            UsState::OK => "OK", UsState::OR => "OR", UsState::PA => "PA",
            UsState::RI => "RI", UsState::SC => "SC", UsState::SD => "SD",
            UsState::TN => "TN", UsState::TX => "TX", UsState::UT => "UT",
            UsState::VT => "VT", UsState::VA => "VA", UsState::WA => "WA",
            UsState::WV => "WV", UsState::WI => "WI", UsState::WY => "WY",
        }
    }

    /// All state codes, for form option listings
    pub fn all() -> &'static [UsState] {
        use UsState::*;
        &[
            AL, AK, AZ, AR, CA, CO, CT, DE, DC, FL,
            GA, HI, ID, IL, IN, IA, KS, KY, LA, ME,
            MD, MA, MI, MN, MS, MO, MT, NE, NV, NH,
            NJ, NM, NY, NC, ND, OH, OK, OR, PA, RI,
            SC, SD, TN, TX, UT, VT, VA, WA, WV, WI,
            WY,
        ]
    }
}

impl std::fmt::Display for UsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
