use crate::error::OptionPayloadError;
use crate::schema::{DropdownOption, OptionId, RemoteOptions};
use serde::Deserialize;
use serde_json::Value;

/// Resolved, ordered options of one dropdown field.
pub type DropdownOptionSet = Vec<DropdownOption>;

/// Maps a remote lookup payload into options using the configured id and
/// name fields. The payload is either a bare list or an object with a `data`
/// list; any malformed record rejects the whole payload.
pub fn map_option_payload(
    payload: &Value,
    source: &RemoteOptions,
) -> Result<DropdownOptionSet, OptionPayloadError> {
    let records = match payload {
        Value::Array(records) => records,
        Value::Object(obj) => match obj.get("data") {
            Some(Value::Array(records)) => records,
            _ => return Err(OptionPayloadError::NotAList),
        },
        _ => return Err(OptionPayloadError::NotAList),
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let id = OptionId::deserialize(lookup(record, index, &source.id_field)?).map_err(
                |_| OptionPayloadError::UnsupportedValue {
                    index,
                    field: source.id_field.clone(),
                },
            )?;
            let name = match lookup(record, index, &source.name_field)? {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => {
                    return Err(OptionPayloadError::UnsupportedValue {
                        index,
                        field: source.name_field.clone(),
                    })
                }
            };
            Ok(DropdownOption { id, name })
        })
        .collect()
}

fn lookup<'a>(record: &'a Value, index: usize, field: &str) -> Result<&'a Value, OptionPayloadError> {
    match record.get(field) {
        Some(Value::Null) | None => Err(OptionPayloadError::MissingField {
            index,
            field: field.to_string(),
        }),
        Some(value) => Ok(value),
    }
}
