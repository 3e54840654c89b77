//! Assignment catalog entries and the validated name parser.
//!
//! Assignment names encode the track and the course week (`P-3.2` is the
//! second Programming assignment of week 3). The name is parsed exactly once,
//! when the catalog is ingested; everything downstream works with the parsed
//! `AssignmentName` and never re-splits the raw string.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// The two assignment tracks that earn house points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Programming,
    Design,
}

impl Track {
    /// Processing order: Programming assignments are always resolved first.
    pub const ALL: [Track; 2] = [Track::Programming, Track::Design];

    /// Name prefix used in the assignment catalog.
    pub fn prefix(self) -> &'static str {
        match self {
            Track::Programming => "P-",
            Track::Design => "D-",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Track::Programming => "Programming",
            Track::Design => "Design",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed assignment name: {0:?}")]
pub struct MalformedName(pub String);

/// A validated `<track>-<week>[.<minor>]` assignment name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentName {
    pub track: Track,
    pub week: u32,
    pub minor: Option<u32>,
}

impl FromStr for AssignmentName {
    type Err = MalformedName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (track, rest) = if let Some(rest) = s.strip_prefix("P-") {
            (Track::Programming, rest)
        } else if let Some(rest) = s.strip_prefix("D-") {
            (Track::Design, rest)
        } else {
            return Err(MalformedName(s.to_string()));
        };

        let (week_part, minor_part) = match rest.split_once('.') {
            Some((week, minor)) => (week, Some(minor)),
            None => (rest, None),
        };

        let week = week_part
            .parse()
            .map_err(|_| MalformedName(s.to_string()))?;
        let minor = match minor_part {
            Some(minor) => Some(minor.parse().map_err(|_| MalformedName(s.to_string()))?),
            None => None,
        };

        Ok(AssignmentName { track, week, minor })
    }
}

/// One entry of a track's assignment catalog.
///
/// `slot` is `None` when the raw name did not parse for this catalog's track;
/// such assignments have no deadline and are excluded from eligibility.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub id: i64,
    pub name: String,
    pub slot: Option<AssignmentName>,
}

/// Raw `assignmentSets/{id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub assignments: Vec<RawAssignment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAssignment {
    pub id: i64,
    pub name: String,
}

impl RawAssignment {
    /// Parse the name once at ingestion, against the catalog's track.
    pub fn into_assignment(self, track: Track) -> Assignment {
        let slot = match self.name.parse::<AssignmentName>() {
            Ok(parsed) if parsed.track == track => Some(parsed),
            Ok(parsed) => {
                warn!(
                    assignment = %self.name,
                    expected = %track,
                    found = %parsed.track,
                    "assignment listed under the wrong track; it will not earn points"
                );
                None
            }
            Err(_) => {
                warn!(
                    assignment = %self.name,
                    track = %track,
                    "assignment name does not follow the {}<week> convention; it will not earn points",
                    track.prefix()
                );
                None
            }
        };

        Assignment {
            id: self.id,
            name: self.name,
            slot,
        }
    }
}
