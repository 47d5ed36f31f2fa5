//! Party name to political ideology resolution.
//!
//! Party names change between elections and differ per province, so the
//! mapping is data: an ordered [`PartyMapping`] loaded from configuration.
//! Resolution never fails; unknown parties are [`PoliticalIdeology::Independent`]
//! and a missing party is [`PoliticalIdeology::NonPartisan`].

use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Ideology groupings used for template targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum PoliticalIdeology {
    Conservative,
    Liberal,
    Ndp,
    Green,
    /// Quebec nationalist parties.
    Bloc,
    /// Independents and parties outside the configured groups.
    Independent,
    /// No party at all, typically municipal.
    NonPartisan,
}

impl PoliticalIdeology {
    pub const ALL: [Self; 7] = [
        Self::Conservative,
        Self::Liberal,
        Self::Ndp,
        Self::Green,
        Self::Bloc,
        Self::Independent,
        Self::NonPartisan,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Liberal => "Liberal",
            Self::Ndp => "Ndp",
            Self::Green => "Green",
            Self::Bloc => "Bloc",
            Self::Independent => "Independent",
            Self::NonPartisan => "NonPartisan",
        }
    }
}

impl fmt::Display for PoliticalIdeology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no [`PoliticalIdeology`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown political ideology: {0}")]
pub struct ParseIdeologyError(pub String);

impl FromStr for PoliticalIdeology {
    type Err = ParseIdeologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|ideology| ideology.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseIdeologyError(s.to_string()))
    }
}

impl TryFrom<String> for PoliticalIdeology {
    type Error = ParseIdeologyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ─── Grouping table ─────────────────────────────────────────────────────────

/// One named group of party names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeologyGroup {
    /// Ideology key as written in configuration, e.g. `"conservative"`.
    #[serde(skip)]
    pub key: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub parties: Vec<String>,
}

impl IdeologyGroup {
    pub fn new<I, S>(key: impl Into<String>, parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            display_name: String::new(),
            parties: parties.into_iter().map(Into::into).collect(),
        }
    }

    fn contains_party(&self, party_name: &str) -> bool {
        let wanted = party_name.to_lowercase();
        self.parties.iter().any(|party| party.to_lowercase() == wanted)
    }
}

/// Ordered ideology → party-name table.
///
/// Deserializes from `{ "ideologies": { "<key>": { "displayName", "parties" } } }`
/// keeping the groups in file order, which decides ties when a party name is
/// listed under more than one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyMapping {
    groups: Vec<IdeologyGroup>,
}

impl PartyMapping {
    #[must_use]
    pub const fn new(groups: Vec<IdeologyGroup>) -> Self {
        Self { groups }
    }

    /// A table with no groups: every named party resolves to `Independent`.
    #[must_use]
    pub const fn empty() -> Self {
        Self { groups: Vec::new() }
    }

    #[must_use]
    pub fn groups(&self) -> &[IdeologyGroup] {
        &self.groups
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Resolve a party name against this table.
    #[must_use]
    pub fn resolve(&self, party_name: Option<&str>) -> PoliticalIdeology {
        resolve_ideology(party_name, self)
    }
}

/// Map a free-text party name to an ideology.
///
/// Blank names are `NonPartisan` before the table is consulted. Otherwise the
/// first group listing the name (case-insensitive equality) wins; a group
/// key that is not an ideology name falls back to `Independent`, as does a
/// name found in no group.
#[must_use]
pub fn resolve_ideology(party_name: Option<&str>, table: &PartyMapping) -> PoliticalIdeology {
    let Some(party_name) = party_name.filter(|name| !name.trim().is_empty()) else {
        return PoliticalIdeology::NonPartisan;
    };

    table
        .groups
        .iter()
        .find(|group| group.contains_party(party_name))
        .map_or(PoliticalIdeology::Independent, |group| {
            group
                .key
                .parse()
                .unwrap_or(PoliticalIdeology::Independent)
        })
}

#[derive(Deserialize)]
struct PartyMappingFile {
    #[serde(default)]
    ideologies: OrderedGroups,
}

#[derive(Default)]
struct OrderedGroups(Vec<IdeologyGroup>);

impl<'de> Deserialize<'de> for OrderedGroups {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = OrderedGroups;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of ideology keys to party groups")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, mut group)) = map.next_entry::<String, IdeologyGroup>()? {
                    group.key = key;
                    groups.push(group);
                }
                Ok(OrderedGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

impl<'de> Deserialize<'de> for PartyMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let file = PartyMappingFile::deserialize(deserializer)?;
        Ok(Self::new(file.ideologies.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> PartyMapping {
        PartyMapping::new(vec![
            IdeologyGroup::new("conservative", ["Conservative", "Progressive Conservative"]),
            IdeologyGroup::new("liberal", ["Liberal", "Ontario Liberal Party"]),
            IdeologyGroup::new("ndp", ["NDP", "New Democratic Party"]),
            IdeologyGroup::new("bloc", ["Bloc Québécois"]),
            IdeologyGroup::new("populist", ["People's Party"]),
        ])
    }

    #[test]
    fn blank_party_is_non_partisan() {
        let table = sample_table();
        assert_eq!(table.resolve(None), PoliticalIdeology::NonPartisan);
        assert_eq!(table.resolve(Some("")), PoliticalIdeology::NonPartisan);
        assert_eq!(table.resolve(Some("  \t")), PoliticalIdeology::NonPartisan);
    }

    #[test]
    fn exact_name_matches_ignoring_case() {
        let table = sample_table();
        assert_eq!(table.resolve(Some("liberal")), PoliticalIdeology::Liberal);
        assert_eq!(
            table.resolve(Some("PROGRESSIVE CONSERVATIVE")),
            PoliticalIdeology::Conservative
        );
        assert_eq!(table.resolve(Some("bloc québécois")), PoliticalIdeology::Bloc);
    }

    #[test]
    fn substring_does_not_match() {
        let table = sample_table();
        assert_eq!(
            table.resolve(Some("Liberal Party of Canada")),
            PoliticalIdeology::Independent
        );
    }

    #[test]
    fn unknown_group_key_falls_back_to_independent() {
        let table = sample_table();
        assert_eq!(
            table.resolve(Some("People's Party")),
            PoliticalIdeology::Independent
        );
    }

    #[test]
    fn first_group_wins() {
        let table = PartyMapping::new(vec![
            IdeologyGroup::new("green", ["Shared"]),
            IdeologyGroup::new("liberal", ["Shared"]),
        ]);
        assert_eq!(table.resolve(Some("Shared")), PoliticalIdeology::Green);
    }

    #[test]
    fn empty_table_resolves_everything_independent() {
        let table = PartyMapping::empty();
        assert_eq!(table.resolve(Some("Liberal")), PoliticalIdeology::Independent);
        assert_eq!(table.resolve(None), PoliticalIdeology::NonPartisan);
    }

    #[test]
    fn deserializes_groups_in_file_order() {
        let json = r#"{
            "ideologies": {
                "ndp": { "displayName": "NDP", "parties": ["NDP"] },
                "conservative": { "displayName": "Conservative", "parties": ["Conservative"] },
                "liberal": { "parties": ["Liberal"] }
            }
        }"#;
        let table: PartyMapping = serde_json::from_str(json).expect("should parse");
        let keys: Vec<&str> = table.groups().iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["ndp", "conservative", "liberal"]);
        assert_eq!(table.groups()[0].display_name, "NDP");
        assert_eq!(table.resolve(Some("Liberal")), PoliticalIdeology::Liberal);
    }

    #[test]
    fn missing_ideologies_key_is_empty_table() {
        let table: PartyMapping = serde_json::from_str("{}").expect("should parse");
        assert!(table.is_empty());
    }

    #[test]
    fn ideology_parses_case_insensitively() {
        assert_eq!("NDP".parse(), Ok(PoliticalIdeology::Ndp));
        assert_eq!("nonpartisan".parse(), Ok(PoliticalIdeology::NonPartisan));
        assert!("socialist".parse::<PoliticalIdeology>().is_err());
    }
}
