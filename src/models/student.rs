//! Students and the raw group roster they are flattened from.

use serde::Deserialize;
use tracing::warn;

/// One student flattened out of the group roster.
///
/// `student_number` (the Horus login id, e.g. `s3008432`) is the identity key
/// for everything downstream, including the final export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub participant_id: i64,
    pub student_number: String,
    pub external_id: String,
    pub group_name: String,
    pub group_set_id: i64,
    pub group_set_external_id: String,
}

/// Raw group record from `groupSets/{id}/groups`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGroup {
    pub name: String,
    #[serde(rename = "externalId", default)]
    pub external_id: String,
    #[serde(rename = "groupSet")]
    pub group_set: RawGroupSet,
    #[serde(default)]
    pub participants: Vec<RawParticipant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGroupSet {
    pub id: i64,
    #[serde(rename = "externalId", default)]
    pub external_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawParticipant {
    pub id: i64,
    pub person: RawPerson,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPerson {
    #[serde(rename = "loginId")]
    pub login_id: String,
}

/// Extract the category from a `Pairs <Category>-<n>` group name.
///
/// `Pairs Minor-13` yields `Minor`. Returns `None` when the name does not
/// follow the convention.
pub fn group_category(name: &str) -> Option<&str> {
    let rest = name.strip_prefix("Pairs ")?;
    let (category, number) = rest.rsplit_once('-')?;
    if category.is_empty() || number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(category)
}

/// Flatten the group roster into individual students, excluding every group
/// whose category is blacklisted.
///
/// A group name that does not follow the naming convention is reported and
/// its members are kept; one odd group must not abort roster construction.
pub fn flatten_roster(groups: &[RawGroup], blacklist: &[String]) -> Vec<Student> {
    let mut roster = Vec::new();

    for group in groups {
        match group_category(&group.name) {
            Some(category) if blacklist.iter().any(|entry| entry == category) => continue,
            Some(_) => {}
            None => {
                warn!(
                    group = %group.name,
                    "group name does not follow the 'Pairs <Category>-<n>' convention; keeping its members"
                );
            }
        }

        for participant in &group.participants {
            roster.push(Student {
                participant_id: participant.id,
                student_number: participant.person.login_id.clone(),
                external_id: group.external_id.clone(),
                group_name: group.name.clone(),
                group_set_id: group.group_set.id,
                group_set_external_id: group.group_set.external_id.clone(),
            });
        }
    }

    roster
}
