use crate::count::StrategyKind;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Values supplied on the command line, highest priority layer
///
/// Unset options and empty lists are dropped before merging so they never mask lower
/// layers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub query: Option<String>,
    pub repetitions: Option<usize>,
    pub strategies: Vec<StrategyKind>,
    pub parallel: ParallelOverrides,
    pub output: OutputOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParallelOverrides {
    pub workers: Option<usize>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputOverrides {
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub chart: Option<bool>,
}

impl ConfigOverrides {
    /// Serialized form with nulls, empty arrays and empty tables removed
    pub fn to_value(&self) -> Value {
        prune(self)
    }
}

/// Remove nulls, empty arrays and empty objects from any serializable structure
pub fn prune<T: Serialize>(input: T) -> Value {
    let mut value = serde_json::to_value(input).unwrap_or(Value::Null);
    prune_recursive(&mut value);
    value
}

fn prune_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            // Recursively prune nested objects first so emptied tables are dropped too
            for (_, v) in map.iter_mut() {
                prune_recursive(v);
            }

            map.retain(|_, v| match v {
                Value::Null => false,
                Value::Array(arr) => !arr.is_empty(),
                Value::Object(obj) => !obj.is_empty(),
                _ => true,
            });
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                prune_recursive(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_prune_to_empty_object() {
        let value = ConfigOverrides::default().to_value();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_set_values_survive() {
        let overrides = ConfigOverrides {
            query: Some("Quixote".to_string()),
            strategies: vec![StrategyKind::Serial, StrategyKind::ParallelGpu],
            parallel: ParallelOverrides {
                workers: Some(2),
                ..Default::default()
            },
            ..Default::default()
        };

        let value = overrides.to_value();
        assert_eq!(
            value,
            serde_json::json!({
                "query": "Quixote",
                "strategies": ["serial", "parallel-gpu"],
                "parallel": { "workers": 2 }
            })
        );
    }
}
