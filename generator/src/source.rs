use sdp_schema::Schema;

use crate::error::GeneratorError;

/// Loads a schema from a file path or an `http(s)://` URL.
pub fn load(source: &str) -> Result<Schema, GeneratorError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        tracing::debug!(url = source, "fetching schema");
        let text = reqwest::blocking::get(source)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|source_err| GeneratorError::Fetch {
                url: source.to_owned(),
                source: source_err,
            })?;
        Ok(sdp_schema::parse_schema(&text)?)
    } else {
        Ok(sdp_schema::load_schema(source)?)
    }
}
