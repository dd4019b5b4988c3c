use serde::{de, Deserialize, Deserializer};
use std::{fmt, str::FromStr};

/// Query-string helper: `?type=` and `?type=%20` deserialize to `None`
/// instead of failing to parse.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        kind: Option<i32>,
    }

    #[test]
    fn test_empty_value_is_none() {
        let p: Params = serde_json::from_str(r#"{"kind": ""}"#).unwrap();
        assert_eq!(p.kind, None);
        let p: Params = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.kind, None);
    }

    #[test]
    fn test_number_is_parsed() {
        let p: Params = serde_json::from_str(r#"{"kind": " 2 "}"#).unwrap();
        assert_eq!(p.kind, Some(2));
        assert!(serde_json::from_str::<Params>(r#"{"kind": "x"}"#).is_err());
    }
}
