/// Serialized description of one path effect.
///
/// `params` is interpreted according to `kind`; combinators nest further
/// `EffectInstance` objects inside their params.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectInstance {
    /// Effect kind, e.g. `"dash"` or `"compose"`.
    pub kind: String,
    /// Kind-specific parameters.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl EffectInstance {
    /// Build an instance from a kind and a JSON params object.
    pub fn new(kind: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }
}
