use std::path::Path;

use anyhow::Context as _;

use crate::config::model::EffectInstance;
use crate::effects::path_effect::PathEffect;
use crate::effects::trim::TrimMode;
use crate::foundation::error::{PathFxError, PathFxResult};

/// Build a path effect from its description.
///
/// Missing or ill-typed parameters are errors. Parameters that are well
/// formed but describe no effect (a zero-length dash, a trim keeping the
/// whole path, ...) yield `Ok(None)`.
#[tracing::instrument(skip(inst), fields(kind = %inst.kind))]
pub fn parse_path_effect(inst: &EffectInstance) -> PathFxResult<Option<PathEffect>> {
    let kind = inst.kind.trim().to_ascii_lowercase().replace(['_', '-'], "");
    if kind.is_empty() {
        return Err(PathFxError::validation("effect kind must be non-empty"));
    }
    let params = &inst.params;

    let effect = match kind.as_str() {
        "dash" => {
            let intervals = get_f64_array(params, "intervals")?;
            let phase = opt_f64(params, "phase")?.unwrap_or(0.0);
            PathEffect::dash(&intervals, phase)
        }
        "trim" => {
            let start = opt_f64(params, "start")?.unwrap_or(0.0);
            let stop = opt_f64(params, "stop")?.unwrap_or(1.0);
            let mode = match params.get("mode") {
                None => TrimMode::Normal,
                Some(v) => match v.as_str().map(|s| s.trim().to_ascii_lowercase()) {
                    Some(s) if s == "normal" => TrimMode::Normal,
                    Some(s) if s == "inverted" => TrimMode::Inverted,
                    _ => {
                        return Err(PathFxError::validation(
                            "trim.mode must be \"normal\" or \"inverted\"",
                        ));
                    }
                },
            };
            PathEffect::trim(start, stop, mode)
        }
        "discrete" => {
            let seg_length = get_f64(params, "seg_length")?;
            let deviation = get_f64(params, "deviation")?;
            let seed = opt_u32(params, "seed")?.unwrap_or(0);
            PathEffect::discrete(seg_length, deviation, seed)
        }
        "corner" => {
            let radius = get_f64(params, "radius")?;
            PathEffect::corner(radius)
        }
        "compose" => {
            let outer = parse_child(params, "outer")?;
            let inner = parse_child(params, "inner")?;
            match (outer, inner) {
                (Some(outer), Some(inner)) => Some(PathEffect::compose(outer, inner)),
                (one, None) | (None, one) => one,
            }
        }
        "sum" => {
            let first = parse_child(params, "first")?;
            let second = parse_child(params, "second")?;
            match (first, second) {
                (Some(first), Some(second)) => Some(PathEffect::sum(first, second)),
                (one, None) | (None, one) => one,
            }
        }
        _ => {
            return Err(PathFxError::validation(format!(
                "unknown path effect kind '{}'",
                inst.kind
            )));
        }
    };

    if effect.is_none() {
        tracing::debug!("effect description resolves to no effect");
    }
    Ok(effect)
}

/// Parse a JSON [`EffectInstance`] and build the effect.
pub fn path_effect_from_json_str(s: &str) -> PathFxResult<Option<PathEffect>> {
    let inst: EffectInstance =
        serde_json::from_str(s).map_err(|e| PathFxError::serde(e.to_string()))?;
    parse_path_effect(&inst)
}

/// Read a JSON [`EffectInstance`] from `path` and build the effect.
pub fn path_effect_from_json_file(path: impl AsRef<Path>) -> PathFxResult<Option<PathEffect>> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read effect description '{}'", path.display()))?;
    path_effect_from_json_str(&s)
}

fn parse_child(obj: &serde_json::Value, key: &str) -> PathFxResult<Option<PathEffect>> {
    let Some(v) = obj.get(key) else {
        return Err(PathFxError::validation(format!(
            "missing effect param '{key}'"
        )));
    };
    let child: EffectInstance =
        serde_json::from_value(v.clone()).map_err(|e| PathFxError::serde(e.to_string()))?;
    parse_path_effect(&child)
}

fn get_f64(obj: &serde_json::Value, key: &str) -> PathFxResult<f64> {
    opt_f64(obj, key)?.ok_or_else(|| {
        PathFxError::validation(format!("missing effect param '{key}'"))
    })
}

fn opt_f64(obj: &serde_json::Value, key: &str) -> PathFxResult<Option<f64>> {
    let Some(v) = obj.get(key) else {
        return Ok(None);
    };
    let Some(n) = v.as_f64() else {
        return Err(PathFxError::validation(format!(
            "effect param '{key}' must be a number"
        )));
    };
    Ok(Some(n))
}

fn opt_u32(obj: &serde_json::Value, key: &str) -> PathFxResult<Option<u32>> {
    let Some(v) = obj.get(key) else {
        return Ok(None);
    };
    let Some(n) = v.as_u64() else {
        return Err(PathFxError::validation(format!(
            "effect param '{key}' must be an integer"
        )));
    };
    u32::try_from(n)
        .map(Some)
        .map_err(|_| PathFxError::validation(format!("effect param '{key}' is out of range")))
}

fn get_f64_array(obj: &serde_json::Value, key: &str) -> PathFxResult<Vec<f64>> {
    let Some(v) = obj.get(key) else {
        return Err(PathFxError::validation(format!(
            "missing effect param '{key}'"
        )));
    };
    let Some(arr) = v.as_array() else {
        return Err(PathFxError::validation(format!(
            "effect param '{key}' must be an array"
        )));
    };
    arr.iter()
        .map(|x| {
            x.as_f64().ok_or_else(|| {
                PathFxError::validation(format!("effect param '{key}' entries must be numbers"))
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/config/parse.rs"]
mod tests;
