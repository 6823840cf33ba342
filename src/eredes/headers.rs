use crate::error::ConfigError;

/// Normalized extra request headers.
///
/// Header names are matched case-insensitively; a `Host` entry is extracted
/// into a distinct field so the transport can apply it to the request target
/// instead of the plain header list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraHeaders {
    host: Option<String>,
    headers: Vec<(String, String)>,
}

impl ExtraHeaders {
    /// Parses a `Name=Value;Name2=Value2` specification.
    ///
    /// Empty segments are ignored; a segment without `=` is a configuration
    /// error. Names and values are trimmed.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let pairs = spec
            .split(';')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (name, value) = segment.split_once('=').ok_or_else(|| {
                    ConfigError::invalid(
                        "extra_headers",
                        format!("segment '{}' is not Name=Value", segment),
                    )
                })?;
                Ok((name.trim().to_string(), value.trim().to_string()))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self::from_pairs(pairs))
    }

    /// Builds the mapping from name/value pairs, pulling out `host`.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut host = None;
        let mut headers = Vec::new();
        for (name, value) in pairs {
            if name.eq_ignore_ascii_case("host") {
                host = Some(value);
            } else {
                headers.push((name, value));
            }
        }
        Self { host, headers }
    }

    /// The request-target host override, if configured.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The remaining headers, in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_header() {
        let headers = ExtraHeaders::parse("X-Custom=abc").unwrap();
        assert_eq!(headers.host(), None);
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec![("X-Custom", "abc")]);
    }

    #[test]
    fn test_parse_multiple_headers() {
        let headers = ExtraHeaders::parse("X-A=1; X-B=2").unwrap();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![("X-A", "1"), ("X-B", "2")]
        );
    }

    #[test]
    fn test_parse_extracts_host_case_insensitively() {
        for spec in ["Host=online.example.pt", "HOST=online.example.pt", "host=online.example.pt"] {
            let headers = ExtraHeaders::parse(spec).unwrap();
            assert_eq!(headers.host(), Some("online.example.pt"));
            assert_eq!(headers.iter().count(), 0);
        }
    }

    #[test]
    fn test_parse_host_mixed_with_headers() {
        let headers = ExtraHeaders::parse("X-A=1;Host=h.example;X-B=2").unwrap();
        assert_eq!(headers.host(), Some("h.example"));
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![("X-A", "1"), ("X-B", "2")]
        );
    }

    #[test]
    fn test_parse_value_may_contain_equals() {
        let headers = ExtraHeaders::parse("Authorization-Hint=a=b=c").unwrap();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![("Authorization-Hint", "a=b=c")]
        );
    }

    #[test]
    fn test_parse_empty_spec() {
        let headers = ExtraHeaders::parse("").unwrap();
        assert_eq!(headers, ExtraHeaders::default());
        let headers = ExtraHeaders::parse(" ; ;").unwrap();
        assert_eq!(headers, ExtraHeaders::default());
    }

    #[test]
    fn test_parse_rejects_segment_without_equals() {
        let result = ExtraHeaders::parse("X-Broken");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("X-Broken"));
    }

    #[test]
    fn test_from_pairs_last_host_wins() {
        let headers = ExtraHeaders::from_pairs(vec![
            ("Host".to_string(), "first".to_string()),
            ("hOsT".to_string(), "second".to_string()),
        ]);
        assert_eq!(headers.host(), Some("second"));
    }
}
