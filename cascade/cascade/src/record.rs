use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Id of the upstream entity (organization, department) whose selection
/// drives a dependent dropdown. Treated as an opaque token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParentId(String);

impl ParentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The placeholder option carries an empty value; selecting it yields a blank id.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ParentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ParentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&ParentId> for ParentId {
    fn from(value: &ParentId) -> Self {
        value.clone()
    }
}

impl From<u64> for ParentId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// One selectable choice as served by the helper endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
    pub name: String,
}

impl OptionRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Wire shape: `{ "data": [ { "id": 1, "name": "HR" }, ... ] }`.
#[derive(Debug, Deserialize)]
pub struct OptionsResponse {
    pub data: Vec<OptionRecord>,
}

impl OptionsResponse {
    pub fn parse(body: &str) -> Result<Vec<OptionRecord>, serde_json::Error> {
        serde_json::from_str::<Self>(body).map(|response| response.data)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarId {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

fn id_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ScalarId::deserialize(deserializer)? {
        ScalarId::Signed(id) => id.to_string(),
        ScalarId::Unsigned(id) => id.to_string(),
        ScalarId::Text(id) => id,
    })
}
