//! Settings reconciliation: forward-ports a persisted (possibly stale)
//! settings document onto the shipped defaults tree without clobbering
//! user data.
use toml::Value;

/// Deep-merge `defaults` into `persisted` and return the merged tree.
///
/// Rules, per key of `defaults`:
/// - missing from `persisted`: the default is copied over, with every
///   protected key stripped from it first so opted-out branches are never
///   reseeded;
/// - present in both and both are tables: recurse;
/// - present in `persisted` as a scalar or array: the persisted value
///   stays. A protected key present in `persisted` always stays as-is.
///
/// Keys present only in `persisted` are kept untouched.
pub fn reconcile(defaults: &Value, persisted: Value, protected: &[&str]) -> Value {
    let (defaults, mut merged) = match (defaults, persisted) {
        (Value::Table(d), Value::Table(p)) => (d, p),
        (_, p) => return p,
    };

    for (key, default_value) in defaults {
        if protected.contains(&key.as_str()) {
            // persisted wins when present; absent means opted out
            continue;
        }
        match merged.get_mut(key) {
            None => {
                merged.insert(key.clone(), strip_protected(default_value.clone(), protected));
            }
            Some(existing) => {
                if default_value.is_table() && existing.is_table() {
                    let sub = std::mem::replace(existing, Value::Boolean(false));
                    *existing = reconcile(default_value, sub, protected);
                }
                // scalars and arrays: persisted value is authoritative
            }
        }
    }

    Value::Table(merged)
}

fn strip_protected(value: Value, protected: &[&str]) -> Value {
    match value {
        Value::Table(table) => Value::Table(
            table
                .into_iter()
                .filter(|(key, _)| !protected.contains(&key.as_str()))
                .map(|(key, nested)| (key, strip_protected(nested, protected)))
                .collect(),
        ),
        other => other,
    }
}

/// Second load-time pass: replace a service's persisted
/// `available_languages` with the shipped seed whenever its persisted
/// `version` is strictly older than the default's.
///
/// This is the only case where previously-persisted array data is
/// intentionally overwritten.
pub fn reseed_languages(defaults: &Value, merged: &mut Value) {
    let default_services = match defaults.get("services").and_then(Value::as_table) {
        Some(table) => table,
        None => return,
    };
    let merged_services = match merged.get_mut("services").and_then(Value::as_table_mut) {
        Some(table) => table,
        None => return,
    };

    for (service, default_entry) in default_services {
        let default_version = default_entry
            .get("version")
            .and_then(Value::as_integer)
            .unwrap_or(1);
        let seed = match default_entry.get("available_languages") {
            Some(languages) => languages.clone(),
            None => continue,
        };

        if let Some(entry) = merged_services.get_mut(service).and_then(Value::as_table_mut) {
            let persisted_version = entry
                .get("version")
                .and_then(Value::as_integer)
                .unwrap_or(1);
            if persisted_version < default_version {
                tracing::debug!(
                    service,
                    persisted_version,
                    default_version,
                    "reseeding stale language list"
                );
                entry.insert("available_languages".to_string(), seed);
                entry.insert("version".to_string(), Value::Integer(default_version));
            }
        }
    }
}
