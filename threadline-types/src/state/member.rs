use serde::{Deserialize, Deserializer, Serialize};

use super::comment::MemberRef;

/// The signed-in member for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_image: Option<String>,
    #[serde(default)]
    pub paid: bool,
}

impl Member {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: None,
            bio: None,
            email: None,
            avatar_image: None,
            paid: false,
        }
    }

    /// Author reference as it appears on comments written by this member.
    pub fn to_ref(&self) -> MemberRef {
        MemberRef {
            uuid: self.uuid.clone(),
            name: self.name.clone(),
            bio: self.bio.clone(),
            avatar_image: self.avatar_image.clone(),
        }
    }
}

/// Requested profile change. `bio: Some(None)` clears the bio; `bio: None`
/// leaves it untouched. `name` cannot be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub bio: Option<Option<String>>,
}

/// Fields of a [`MemberUpdate`] that actually differ from the stored member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<Option<String>>,
}

impl MemberPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.bio.is_none()
    }
}

impl MemberUpdate {
    /// Keep only the fields that change something. An empty name is ignored.
    pub fn diff(&self, current: Option<&Member>) -> MemberPatch {
        let current_name = current.and_then(|m| m.name.as_deref());
        let current_bio = current.and_then(|m| m.bio.as_deref());

        let name = self
            .name
            .as_ref()
            .filter(|name| !name.is_empty() && current_name != Some(name.as_str()))
            .cloned();
        let bio = self
            .bio
            .as_ref()
            .filter(|bio| bio.as_deref() != current_bio)
            .cloned();

        MemberPatch { name, bio }
    }
}

// A present-but-null field decodes to Some(None), an absent one to None.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
