//! Passive catalog: the named passives a Base E.G.O. carries.

use core::fmt;

/// Identifier of a passive.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PassiveId(String);

impl PassiveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PassiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PassiveId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Enumerated choice some passives require (an ailment, a damage type).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveChoice {
    pub prompt: String,
    pub options: Vec<String>,
}

impl PassiveChoice {
    pub fn allows(&self, value: &str) -> bool {
        self.options.iter().any(|option| option == value)
    }
}

/// A named passive. `template` may reference `{choice}`; the stored
/// description keeps the placeholder unresolved until a choice is supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveSpec {
    pub id: PassiveId,
    pub name: String,
    pub template: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub choice: Option<PassiveChoice>,
}

impl PassiveSpec {
    pub fn new(id: impl Into<PassiveId>, name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            template: template.into(),
            choice: None,
        }
    }

    pub fn with_choice(mut self, prompt: impl Into<String>, options: Vec<String>) -> Self {
        self.choice = Some(PassiveChoice {
            prompt: prompt.into(),
            options,
        });
        self
    }
}

/// Read-only lookup over passives.
pub trait PassiveOracle: Send + Sync {
    fn passive(&self, id: &PassiveId) -> Option<&PassiveSpec>;

    /// Every passive in this catalog, in catalog order.
    fn all_passives(&self) -> Vec<&PassiveSpec>;
}
