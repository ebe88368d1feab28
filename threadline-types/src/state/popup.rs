use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Descriptor of the popup the presentation layer should show.
///
/// The engine only stores and clears it; `props` is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl Popup {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), props: Map::new() }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}
