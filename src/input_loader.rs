/*!
 * Input loading.
 *
 * Reads the source document and turns it into an ordered batch of pending
 * translation units. Every structural problem is reported here, before
 * any provider call is made.
 */

use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::errors::InputError;
use crate::translation::unit::{Batch, TranslationUnit};

const BOM: char = '\u{feff}';

/// Load a flat JSON key/value document as a batch.
///
/// Object entries become units in document order. String values are
/// translatable; any other value is carried through verbatim. A non-empty
/// top-level array passes validation but yields an empty batch.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Batch, InputError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(content.trim_start_matches(BOM)).map_err(|source| {
        InputError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let structure_error = |reason: &str| InputError::Structure {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    match value {
        Value::Object(map) if map.is_empty() => Err(structure_error("document is an empty object")),
        Value::Object(map) => {
            let units: Vec<TranslationUnit> = map
                .into_iter()
                .map(|(key, value)| match value {
                    Value::String(text) => TranslationUnit::new(key, text),
                    other => {
                        debug!("Key '{}' holds a non-string value, it will be copied as-is", key);
                        TranslationUnit::verbatim(key, other)
                    }
                })
                .collect();
            debug!("Loaded {} entries from {}", units.len(), path.display());
            Ok(Batch::new(units))
        }
        Value::Array(items) if items.is_empty() => Err(structure_error("document is an empty array")),
        Value::Array(items) => {
            warn!(
                "{} holds a top-level array of {} items; only key/value objects are translated",
                path.display(),
                items.len()
            );
            Ok(Batch::default())
        }
        _ => Err(structure_error("top-level value must be an object")),
    }
}
