//! Record types hydrated from Sunlight API responses.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A member of Congress (Senator or Representative).
///
/// Every scalar field is optional: a legislator embedded in a committee's
/// member list usually carries only `state`, while one fetched through
/// `legislators.get` is fully populated. The two are not interchangeable.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Legislator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bioguide_id: Option<String>,
    /// "Sen", "Rep", "Del", or "Com"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middlename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Party affiliation (e.g., "R", "D", "I")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    /// State abbreviation (e.g., "NY")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// District number for House members, "Senior Seat" or "Junior Seat" for Senators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senate_class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congress_office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_rss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congresspedia_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub votesmart_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fec_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub govtrack_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crp_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eventful_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunlight_old_id: Option<String>,

    /// Committees this legislator sits on. Only populated by
    /// `CongressClient::load_committees`, which replaces the whole list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committees: Option<Vec<Committee>>,
}

impl Legislator {
    /// `YouTube` channel name derived from `youtube_url`.
    ///
    /// Accepts both `youtube.com/<name>` and `youtube.com/user/<name>` forms.
    #[must_use]
    pub fn youtube_id(&self) -> Option<&str> {
        let url = self.youtube_url.as_deref()?;
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        let rest = rest.strip_prefix("www.").unwrap_or(rest);
        let rest = rest.strip_prefix("youtube.com/")?;
        let rest = rest.strip_prefix("user/").unwrap_or(rest);
        let id = rest
            .split(['?', '#'])
            .next()
            .unwrap_or(rest)
            .trim_end_matches('/');
        (!id.is_empty()).then_some(id)
    }
}

/// Chamber of Congress a committee belongs to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Chamber {
    House,
    Senate,
    Joint,
}

impl Chamber {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "House",
            Self::Senate => "Senate",
            Self::Joint => "Joint",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known chamber name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chamber '{0}', expected House, Senate, or Joint")]
pub struct UnknownChamber(pub String);

impl FromStr for Chamber {
    type Err = UnknownChamber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "House" => Ok(Self::House),
            "Senate" => Ok(Self::Senate),
            "Joint" => Ok(Self::Joint),
            other => Err(UnknownChamber(other.to_string())),
        }
    }
}

/// A congressional committee with its nested subcommittees and members.
///
/// `None` for `subcommittees` or `members` means the payload did not carry
/// the key at all; `Some(vec![])` means it carried an empty list.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Committee {
    /// Committee code (e.g., "JSPR")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chamber: Option<Chamber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcommittees: Option<Vec<Committee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Legislator>>,
}

/// A jurisdiction: state plus House district number or Senate seat.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct District {
    pub state: String,
    pub number: String,
}

impl District {
    pub fn new(state: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            number: number.into(),
        }
    }
}

/// A name-search hit with the service's confidence in `[0, 1]`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredCandidate {
    pub score: f64,
    pub legislator: Legislator,
}

/// The two senators and one representative for a location.
///
/// Each seat is looked up independently, so any of them may be missing.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Delegation {
    pub senior_senator: Option<Legislator>,
    pub junior_senator: Option<Legislator>,
    pub representative: Option<Legislator>,
}
