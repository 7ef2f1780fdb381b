use crate::domain::event::{is_reserved, Properties};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

pub mod registry;
pub mod validators;

pub use registry::SchemaRegistry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid field {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Leaf predicate over a single JSON value.
pub type Predicate = fn(&Value) -> Result<(), String>;

#[derive(Clone)]
pub enum FieldRule {
    /// Primitive or named leaf check.
    Check(Predicate),
    /// Array whose elements each satisfy a leaf check.
    ArrayOf(Predicate),
    /// Sub-map validated recursively against its own schema.
    Nested(Schema),
    /// Array of sub-maps, each validated against the same schema.
    ArrayOfNested(Schema),
}

#[derive(Clone)]
pub enum CrossRule {
    /// At most one of the named fields may be present.
    MutuallyExclusive(&'static [&'static str]),
    /// `field` must be present whenever `unless` is absent.
    RequiredUnless {
        field: &'static str,
        unless: &'static str,
    },
    /// All named fields must be present.
    Required(&'static [&'static str]),
}

/// Immutable per-event-type field table plus cross-field rules. Built once
/// by the registry and shared across all events of that type.
#[derive(Clone, Default)]
pub struct Schema {
    pub fields: BTreeMap<&'static str, FieldRule>,
    pub cross_rules: Vec<CrossRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rule: FieldRule) -> Self {
        self.fields.insert(name, rule);
        self
    }

    pub fn rule(mut self, rule: CrossRule) -> Self {
        self.cross_rules.push(rule);
        self
    }

    /// Fail-fast structural validation: the first offending field aborts.
    /// Reserved keys must be declared; free-form keys pass untouched.
    /// Cross-field rules run only after every per-field check has passed.
    pub fn validate(&self, properties: &Properties, prefix: &str) -> Result<(), ValidationError> {
        for (key, value) in properties {
            if !is_reserved(key) {
                continue;
            }
            let path = join_path(prefix, key);
            let Some(rule) = self.fields.get(key.as_str()) else {
                return Err(ValidationError::new(path, "unknown reserved field"));
            };
            self.check_rule(rule, value, &path)?;
        }

        for rule in &self.cross_rules {
            match rule {
                CrossRule::MutuallyExclusive(names) => {
                    let present: Vec<&&str> =
                        names.iter().filter(|n| properties.contains_key(**n)).collect();
                    if present.len() > 1 {
                        return Err(ValidationError::new(
                            join_path(prefix, present[1]),
                            format!("cannot have both {} and {}", present[0], present[1]),
                        ));
                    }
                }
                CrossRule::RequiredUnless { field, unless } => {
                    if !properties.contains_key(*field) && !properties.contains_key(*unless) {
                        return Err(ValidationError::new(
                            join_path(prefix, field),
                            format!("required when {unless} is absent"),
                        ));
                    }
                }
                CrossRule::Required(names) => {
                    for name in *names {
                        if !properties.contains_key(*name) {
                            return Err(ValidationError::new(
                                join_path(prefix, name),
                                "required field is missing",
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn check_rule(
        &self,
        rule: &FieldRule,
        value: &Value,
        path: &str,
    ) -> Result<(), ValidationError> {
        match rule {
            FieldRule::Check(predicate) => {
                predicate(value).map_err(|reason| ValidationError::new(path, reason))
            }
            FieldRule::ArrayOf(predicate) => {
                let Some(items) = value.as_array() else {
                    return Err(ValidationError::new(path, "must be an array"));
                };
                for (i, item) in items.iter().enumerate() {
                    predicate(item)
                        .map_err(|reason| ValidationError::new(format!("{path}[{i}]"), reason))?;
                }
                Ok(())
            }
            FieldRule::Nested(schema) => {
                let Some(map) = value.as_object() else {
                    return Err(ValidationError::new(path, "must be an object"));
                };
                schema.validate(map, path)
            }
            FieldRule::ArrayOfNested(schema) => {
                let Some(items) = value.as_array() else {
                    return Err(ValidationError::new(path, "must be an array"));
                };
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    let Some(map) = item.as_object() else {
                        return Err(ValidationError::new(item_path, "must be an object"));
                    };
                    schema.validate(map, &item_path)?;
                }
                Ok(())
            }
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
