use std::path::Path;

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::result::Result;

/// Checks a whole document against a schema before the structural checks
/// run. Implementations return one message per nonconformance.
pub trait SchemaValidator {
    fn validate(&self, doc: &Value) -> Vec<String>;
}

impl<F> SchemaValidator for F
where
    F: Fn(&Value) -> Vec<String>,
{
    fn validate(&self, doc: &Value) -> Vec<String> {
        self(doc)
    }
}

/// A compiled JSON Schema. The draft is taken from the schema's `$schema`
/// keyword.
pub struct JsonSchema {
    compiled: JSONSchema,
}

impl JsonSchema {
    pub fn new(schema: &Value) -> Result<JsonSchema> {
        let compiled =
            JSONSchema::compile(schema).map_err(|e| format!("Invalid schema: {}", e))?;
        Ok(JsonSchema { compiled })
    }

    /// Loads and compiles the schema stored in the JSON file at `path`.
    pub fn read(path: &Path) -> Result<JsonSchema> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Could not read schema {}: {}", path.display(), e))?;
        let schema: Value = serde_json::from_str(&text)
            .map_err(|e| format!("Could not parse schema {}: {}", path.display(), e))?;
        JsonSchema::new(&schema)
    }
}

impl SchemaValidator for JsonSchema {
    fn validate(&self, doc: &Value) -> Vec<String> {
        match self.compiled.validate(doc) {
            Ok(()) => vec![],
            Err(errors) => errors.map(|e| e.to_string()).collect(),
        }
    }
}
