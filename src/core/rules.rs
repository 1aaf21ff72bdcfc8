// src/core/rules.rs

use crate::models::GlobalConfig;
use thiserror::Error;

/// Aggregate of every rule violation found in a single validation pass.
/// Nothing is applied partially: callers get either a clean config or the
/// full list of problems.
#[derive(Error, Debug)]
#[error("{}", .violations.join(", "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

/// A mutable view into one validated field of the configuration.
#[derive(Debug)]
pub enum FieldRef<'a> {
    Text(&'a mut String),
    Flag(&'a mut bool),
}

/// One entry of the rule table: which field, whether it is required, and
/// the default it takes at its zero value.
#[derive(Debug)]
pub struct FieldRule<'a> {
    pub name: &'static str,
    pub required: bool,
    pub default: Option<&'static str>,
    pub field: FieldRef<'a>,
}

/// The declarative rule table for [`GlobalConfig`]. `checked_tools` is
/// declared required, but the required rule only ever fires for text
/// fields, so the declaration is inert (see `apply_rules`).
fn rule_table(config: &mut GlobalConfig) -> Vec<FieldRule<'_>> {
    let GlobalConfig {
        debug,
        pprof_enabled,
        pprof_addr,
        log_format,
        kubeconfig,
        checked_tools,
        projects: _,
        current_cmd: _,
    } = config;

    vec![
        FieldRule {
            name: "debug",
            required: false,
            default: Some("false"),
            field: FieldRef::Flag(debug),
        },
        FieldRule {
            name: "pprof_enabled",
            required: false,
            default: Some("false"),
            field: FieldRef::Flag(pprof_enabled),
        },
        FieldRule {
            name: "pprof_addr",
            required: false,
            default: Some("localhost:6060"),
            field: FieldRef::Text(pprof_addr),
        },
        FieldRule {
            name: "log_format",
            required: false,
            default: Some("text"),
            field: FieldRef::Text(log_format),
        },
        FieldRule {
            name: "kubeconfig",
            required: false,
            default: None,
            field: FieldRef::Text(kubeconfig),
        },
        FieldRule {
            name: "checked_tools",
            required: true,
            default: None,
            field: FieldRef::Flag(checked_tools),
        },
    ]
}

/// Evaluates a rule table: records a violation for every required text
/// field that is empty, and fills defaults into fields at their zero value.
///
/// For flags the defaulting rule is deliberately narrow: a default is
/// applied only when the flag is already `true` and the declared default is
/// the literal `"true"`. A `false` flag is never flipped to `true` by
/// defaulting.
pub fn apply_rules(rules: Vec<FieldRule<'_>>) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    for rule in rules {
        match rule.field {
            FieldRef::Text(value) => {
                if rule.required && value.is_empty() {
                    violations.push(format!("{} is required but not set", rule.name));
                    continue;
                }
                if let Some(default) = rule.default
                    && value.is_empty()
                {
                    *value = default.to_string();
                }
            }
            FieldRef::Flag(value) => {
                // The required rule only applies to text fields.
                if let Some(default) = rule.default
                    && *value
                    && default == "true"
                {
                    *value = true;
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

/// Applies the per-field `required` / `default` rules to a configuration.
/// Invoked when materializing the compiled-in defaults and when loading a
/// snapshot from disk.
pub fn validate_and_set_defaults(config: &mut GlobalConfig) -> Result<(), ValidationError> {
    apply_rules(rule_table(config))
}
