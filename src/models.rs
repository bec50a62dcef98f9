pub mod auth;
pub mod rental;
pub mod report;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, de};

// Query string: `?limit=` conta como ausente, não como número inválido.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::{rental::AvailableInventoryQuery, report::TopRentedQuery};

    #[test]
    fn empty_query_values_are_absent() {
        let query: TopRentedQuery = serde_json::from_str(r#"{"limit": ""}"#).unwrap();
        assert_eq!(query.limit, None);

        let query: TopRentedQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, None);

        let query: AvailableInventoryQuery =
            serde_json::from_str(r#"{"film_id": " ", "limit": "3"}"#).unwrap();
        assert_eq!(query.film_id, None);
        assert_eq!(query.limit, Some(3));
    }

    #[test]
    fn non_numeric_query_values_still_fail() {
        let result = serde_json::from_str::<TopRentedQuery>(r#"{"limit": "ten"}"#);
        assert!(result.is_err());
    }
}
