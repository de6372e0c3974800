/// Query parameters for upstream requests
///
/// Keeps insertion order for the outbound URL. Parameters set to `None` are
/// dropped from both the URL and the cache signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, Option<String>)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.0.push((name.to_string(), Some(value.to_string())));
        self
    }

    pub fn with_opt<V: ToString>(mut self, name: &str, value: Option<V>) -> Self {
        self.0.push((name.to_string(), value.map(|v| v.to_string())));
        self
    }

    /// Parameters that carry a value, in insertion order
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_values_are_omitted() {
        let params = Params::new()
            .with("competition_id", 152)
            .with_opt::<String>("team_id", None)
            .with_opt("date", Some("2024-05-01"));

        let present: Vec<_> = params.present().collect();
        assert_eq!(present, vec![("competition_id", "152"), ("date", "2024-05-01")]);
        assert!(Params::new().with_opt::<u32>("page", None).is_empty());
    }
}
