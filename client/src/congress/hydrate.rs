//! Building typed records from decoded JSON.
//!
//! Each record type owns a fixed table of the keys it recognizes. Keys
//! outside that table are ignored so that new fields added by the service
//! do not break older clients. Two keys on a committee are structural and
//! recurse instead of being assigned:
//!
//! - `subcommittees`: `[{"committee": {...}}, ...]`
//! - `members`: `[{"legislator": {...}}, ...]`
//!
//! A wrapper entry with the wrong key, or a list field holding something
//! other than a list, is a [`CongressApiError::MalformedPayload`].

use serde_json::{Map, Value};

use super::error::CongressApiError;
use super::types::{Chamber, Committee, District, Legislator};

/// The record types the hydrator can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Legislator,
    Committee,
}

impl RecordKind {
    /// Key wrapping each element when this kind appears inside a list.
    #[must_use]
    pub const fn wrapper_key(self) -> &'static str {
        match self {
            Self::Legislator => "legislator",
            Self::Committee => "committee",
        }
    }
}

/// A hydrated record of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Legislator(Legislator),
    Committee(Committee),
}

/// Hydrate a single unwrapped mapping as the given kind.
///
/// # Errors
/// Returns `MalformedPayload` if `raw` is not an object or any recognized
/// key holds a value of the wrong shape.
pub fn hydrate(kind: RecordKind, raw: &Value) -> Result<Record, CongressApiError> {
    match kind {
        RecordKind::Legislator => Legislator::hydrate(raw).map(Record::Legislator),
        RecordKind::Committee => Committee::hydrate(raw).map(Record::Committee),
    }
}

/// Types that can be built from an unwrapped JSON mapping.
pub(crate) trait Hydrate: Sized {
    const KIND: RecordKind;

    fn hydrate_map(raw: &Map<String, Value>) -> Result<Self, CongressApiError>;

    fn hydrate(raw: &Value) -> Result<Self, CongressApiError> {
        let map = raw.as_object().ok_or_else(|| {
            CongressApiError::malformed(format!(
                "expected object for {}, got {}",
                Self::KIND.wrapper_key(),
                type_name(raw)
            ))
        })?;
        Self::hydrate_map(map)
    }
}

impl Hydrate for Legislator {
    const KIND: RecordKind = RecordKind::Legislator;

    fn hydrate_map(raw: &Map<String, Value>) -> Result<Self, CongressApiError> {
        let mut legislator = Self::default();
        for (key, value) in raw {
            if let Some(slot) = legislator.field_mut(key) {
                *slot = scalar(key, value)?;
            }
        }
        Ok(legislator)
    }
}

impl Legislator {
    fn field_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        let slot = match key {
            "bioguide_id" => &mut self.bioguide_id,
            "title" => &mut self.title,
            "firstname" => &mut self.firstname,
            "middlename" => &mut self.middlename,
            "lastname" => &mut self.lastname,
            "name_suffix" => &mut self.name_suffix,
            "nickname" => &mut self.nickname,
            "party" => &mut self.party,
            "state" => &mut self.state,
            "district" => &mut self.district,
            "in_office" => &mut self.in_office,
            "gender" => &mut self.gender,
            "birthdate" => &mut self.birthdate,
            "senate_class" => &mut self.senate_class,
            "phone" => &mut self.phone,
            "fax" => &mut self.fax,
            "email" => &mut self.email,
            "website" => &mut self.website,
            "webform" => &mut self.webform,
            "congress_office" => &mut self.congress_office,
            "twitter_id" => &mut self.twitter_id,
            "youtube_url" => &mut self.youtube_url,
            "official_rss" => &mut self.official_rss,
            "congresspedia_url" => &mut self.congresspedia_url,
            "votesmart_id" => &mut self.votesmart_id,
            "fec_id" => &mut self.fec_id,
            "govtrack_id" => &mut self.govtrack_id,
            "crp_id" => &mut self.crp_id,
            "eventful_id" => &mut self.eventful_id,
            "sunlight_old_id" => &mut self.sunlight_old_id,
            _ => return None,
        };
        Some(slot)
    }
}

impl Hydrate for Committee {
    const KIND: RecordKind = RecordKind::Committee;

    fn hydrate_map(raw: &Map<String, Value>) -> Result<Self, CongressApiError> {
        let mut committee = Self::default();
        for (key, value) in raw {
            match key.as_str() {
                "id" => committee.id = scalar(key, value)?,
                "name" => committee.name = scalar(key, value)?,
                "chamber" => {
                    committee.chamber = scalar(key, value)?
                        .map(|name| name.parse::<Chamber>())
                        .transpose()
                        .map_err(|e| CongressApiError::malformed(format!("chamber: {e}")))?;
                }
                "subcommittees" => committee.subcommittees = wrapped_list_field(key, value)?,
                "members" => committee.members = wrapped_list_field(key, value)?,
                _ => {}
            }
        }
        Ok(committee)
    }
}

/// Hydrate a `District` from `{"state": ..., "number": ...}`.
pub(crate) fn hydrate_district(raw: &Value) -> Result<District, CongressApiError> {
    let field = |key: &str| {
        raw.get(key)
            .map(|value| scalar(key, value))
            .transpose()?
            .flatten()
            .ok_or_else(|| CongressApiError::malformed(format!("district is missing '{key}'")))
    };
    Ok(District::new(field("state")?, field("number")?))
}

/// Unwrap `{"<kind>": {...}}` and hydrate the inner mapping.
pub(crate) fn hydrate_wrapped<T: Hydrate>(entry: &Value) -> Result<T, CongressApiError> {
    let key = T::KIND.wrapper_key();
    let inner = entry
        .as_object()
        .and_then(|map| map.get(key))
        .ok_or_else(|| CongressApiError::malformed(format!("expected entry wrapped in '{key}'")))?;
    T::hydrate(inner)
}

/// Hydrate a list of wrapped entries, preserving order.
pub(crate) fn hydrate_wrapped_list<T: Hydrate>(value: &Value) -> Result<Vec<T>, CongressApiError> {
    let entries = value.as_array().ok_or_else(|| {
        CongressApiError::malformed(format!(
            "expected list of '{}' entries, got {}",
            T::KIND.wrapper_key(),
            type_name(value)
        ))
    })?;
    entries.iter().map(hydrate_wrapped).collect()
}

fn wrapped_list_field<T: Hydrate>(
    key: &str,
    value: &Value,
) -> Result<Option<Vec<T>>, CongressApiError> {
    if value.is_null() {
        return Ok(None);
    }
    hydrate_wrapped_list(value).map(Some).map_err(|e| match e {
        CongressApiError::MalformedPayload(message) => {
            CongressApiError::malformed(format!("{key}: {message}"))
        }
        other => other,
    })
}

fn scalar(key: &str, value: &Value) -> Result<Option<String>, CongressApiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(CongressApiError::malformed(format!(
            "expected scalar under '{key}', got {}",
            type_name(value)
        ))),
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn example_committee() -> Value {
        json!({
            "chamber": "Joint",
            "id": "JSPR",
            "name": "Joint Committee on Printing",
            "members": [{"legislator": {"state": "GA"}}],
            "subcommittees": [
                {"committee": {"chamber": "Joint", "id": "JSPR", "name": "Subcommittee on Ink"}}
            ]
        })
    }

    #[test]
    fn test_committee_from_example_payload() {
        let comm = Committee::hydrate(&example_committee()).unwrap();

        assert_eq!(comm.name.as_deref(), Some("Joint Committee on Printing"));
        assert_eq!(comm.chamber, Some(Chamber::Joint));
        assert_eq!(comm.id.as_deref(), Some("JSPR"));

        let subs = comm.subcommittees.unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name.as_deref(), Some("Subcommittee on Ink"));
        assert_eq!(subs[0].members, None);

        let members = comm.members.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].state.as_deref(), Some("GA"));
        assert_eq!(members[0].bioguide_id, None);
    }

    #[test]
    fn test_children_keep_input_order() {
        let raw = json!({
            "id": "SSAF",
            "subcommittees": [
                {"committee": {"id": "SSAF13"}},
                {"committee": {"id": "SSAF14"}},
                {"committee": {"id": "SSAF15"}}
            ],
            "members": [
                {"legislator": {"firstname": "Jessie"}},
                {"legislator": {"firstname": "Edward"}}
            ]
        });

        let comm = Committee::hydrate(&raw).unwrap();

        let sub_ids: Vec<_> = comm
            .subcommittees
            .unwrap()
            .into_iter()
            .filter_map(|c| c.id)
            .collect();
        assert_eq!(sub_ids, ["SSAF13", "SSAF14", "SSAF15"]);

        let names: Vec<_> = comm
            .members
            .unwrap()
            .into_iter()
            .filter_map(|l| l.firstname)
            .collect();
        assert_eq!(names, ["Jessie", "Edward"]);
    }

    #[test]
    fn test_missing_members_is_distinct_from_empty() {
        let missing = Committee::hydrate(&json!({"id": "JSPR"})).unwrap();
        assert_eq!(missing.members, None);
        assert_eq!(missing.subcommittees, None);

        let empty = Committee::hydrate(&json!({"id": "JSPR", "members": []})).unwrap();
        assert_eq!(empty.members, Some(vec![]));
    }

    #[test]
    fn test_subcommittees_nest_arbitrarily_deep() {
        let raw = json!({
            "id": "A",
            "subcommittees": [{"committee": {
                "id": "B",
                "subcommittees": [{"committee": {
                    "id": "C",
                    "subcommittees": [{"committee": {"id": "D"}}]
                }}]
            }}]
        });

        let mut current = Committee::hydrate(&raw).unwrap();
        let mut path = vec![current.id.clone().unwrap()];
        while let Some(mut subs) = current.subcommittees.take() {
            current = subs.remove(0);
            path.push(current.id.clone().unwrap());
        }
        assert_eq!(path, ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_legislator_ignores_unknown_keys() {
        let raw = json!({
            "firstname": "Carolyn",
            "lastname": "McCarthy",
            "district": "4",
            "favorite_color": "teal",
            "committees": [{"committee": {"id": "HSAS"}}]
        });

        let carolyn = Legislator::hydrate(&raw).unwrap();

        assert_eq!(carolyn.firstname.as_deref(), Some("Carolyn"));
        assert_eq!(carolyn.district.as_deref(), Some("4"));
        assert_eq!(carolyn.committees, None);
    }

    #[test]
    fn test_legislator_stringifies_scalars() {
        let raw = json!({"in_office": true, "district": 7, "nickname": null});

        let legislator = Legislator::hydrate(&raw).unwrap();

        assert_eq!(legislator.in_office.as_deref(), Some("true"));
        assert_eq!(legislator.district.as_deref(), Some("7"));
        assert_eq!(legislator.nickname, None);
    }

    #[test]
    fn test_hydrate_dispatches_on_kind() {
        let record = hydrate(RecordKind::Legislator, &json!({"state": "GA"})).unwrap();
        assert!(matches!(record, Record::Legislator(l) if l.state.as_deref() == Some("GA")));

        let record = hydrate(RecordKind::Committee, &example_committee()).unwrap();
        assert!(matches!(record, Record::Committee(c) if c.id.as_deref() == Some("JSPR")));
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        let cases = [
            (json!({"members": [{"senator": {"state": "GA"}}]}), "wrong member wrapper"),
            (json!({"subcommittees": [{"legislator": {}}]}), "wrong subcommittee wrapper"),
            (json!({"members": {"legislator": {"state": "GA"}}}), "members not a list"),
            (json!({"subcommittees": "none"}), "subcommittees a string"),
            (json!({"members": [{"legislator": "GA"}]}), "legislator not an object"),
            (json!({"name": {"short": "Ink"}}), "object in scalar field"),
            (json!({"chamber": "Pahrump"}), "unknown chamber"),
            (json!(["JSPR"]), "top level not an object"),
        ];

        for (raw, desc) in cases {
            let result = Committee::hydrate(&raw);
            assert!(
                matches!(result, Err(CongressApiError::MalformedPayload(_))),
                "case '{desc}': {result:?}"
            );
        }
    }

    #[test]
    fn test_wrapped_list_requires_list() {
        let result = hydrate_wrapped_list::<Legislator>(&json!({"legislator": {}}));
        assert!(matches!(result, Err(CongressApiError::MalformedPayload(_))));
    }

    #[test]
    fn test_district_requires_state_and_number() {
        let district = hydrate_district(&json!({"state": "NY", "number": "4"})).unwrap();
        assert_eq!(district, District::new("NY", "4"));

        let result = hydrate_district(&json!({"state": "NY"}));
        assert!(matches!(result, Err(CongressApiError::MalformedPayload(_))));
    }
}
