use ::anyhow::Result;
use ::serde::Serialize;
use ::std::fmt::Display;
use ::std::fmt::Formatter;
use ::std::fmt::Result as FmtResult;
use ::url::form_urlencoded;

/// An ordered multimap of form parameters.
///
/// Repeated keys are kept side by side, in the order they were added,
/// as an url encoded form would hold them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormParams {
    pairs: Vec<(String, String)>,
}

impl FormParams {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn add<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.pairs.push((key.into(), value.into()));
    }

    /// Serializes the value given as an url encoded form,
    /// and adds each of the resulting pairs.
    pub fn add_serialized<V>(&mut self, params: V) -> Result<()>
    where
        V: Serialize,
    {
        let value_raw = ::serde_urlencoded::to_string(params)?;
        self.add_raw(&value_raw);

        Ok(())
    }

    /// Parses an already encoded query string, such as `a=1&b=2`,
    /// adding each pair found.
    pub fn add_raw(&mut self, value_raw: &str) {
        let pairs = form_urlencoded::parse(value_raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()));

        self.pairs.extend(pairs);
    }

    pub fn extend(&mut self, other: &FormParams) {
        self.pairs.extend(other.pairs.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn has_content(&self) -> bool {
        !self.is_empty()
    }

    /// Encodes these params after those already in the query given.
    pub fn merged_after_query(&self, maybe_query: Option<&str>) -> String {
        let mut merged = FormParams::new();
        if let Some(query) = maybe_query {
            merged.add_raw(query);
        }
        merged.extend(self);

        merged.to_string()
    }
}

impl Display for FormParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();

        write!(f, "{encoded}")
    }
}


#[cfg(test)]
mod test_add_serialized {
    use super::*;
    use ::pretty_assertions::assert_eq;
    use ::serde::Serialize;

    #[derive(Serialize)]
    struct Search {
        query: String,
        page: u32,
    }

    #[test]
    fn it_should_add_multiple_key_values() {
        let mut params = FormParams::new();

        params
            .add_serialized(&[("key", "value"), ("another", "value")])
            .unwrap();

        assert_eq!("key=value&another=value", params.to_string());
    }

    #[test]
    fn it_should_add_structs() {
        let mut params = FormParams::new();

        params
            .add_serialized(&Search {
                query: "rust".to_string(),
                page: 2,
            })
            .unwrap();

        assert_eq!("query=rust&page=2", params.to_string());
    }

    #[test]
    fn it_should_reject_raw_string() {
        let mut params = FormParams::new();

        let result = params.add_serialized("key=value");

        assert!(result.is_err());
    }
}
