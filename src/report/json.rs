use serde::Serialize;

pub fn to_json<T: Serialize>(batch: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(batch)
}
