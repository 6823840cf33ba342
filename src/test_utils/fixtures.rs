//! Sample provider payloads for tests.

/// A sign-in response carrying the given token at `Body.Result.token`.
pub fn sample_sign_in_body(token: &str) -> String {
    format!(r#"{{"Body":{{"Result":{{"token":"{}"}}}}}}"#, token)
}

/// A usage response with `count` quarter-hour load-curve records at the
/// default extraction path.
pub fn sample_usage_body(count: usize) -> String {
    let curves = (0..count)
        .map(|i| {
            format!(
                r#"{{"date":"2021-01-01 {:02}:{:02}:00","value":"{}.5"}}"#,
                i / 4,
                (i % 4) * 15,
                10 + i
            )
        })
        .collect::<Vec<_>>()
        .join(",");

    format!(
        r#"{{"Body":{{"Result":{{"utilitiesDevices":[{{"meterLoadCurves":[{{"loadCurves":[{}]}}]}}]}}}}}}"#,
        curves
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_sign_in_body_is_valid_json() {
        let body: serde_json::Value =
            serde_json::from_str(&sample_sign_in_body("abc123")).unwrap();
        assert_eq!(body["Body"]["Result"]["token"], "abc123");
    }

    #[test]
    fn test_sample_usage_body_record_count() {
        for count in [0, 1, 5] {
            let body: serde_json::Value =
                serde_json::from_str(&sample_usage_body(count)).unwrap();
            let curves = &body["Body"]["Result"]["utilitiesDevices"][0]["meterLoadCurves"][0]
                ["loadCurves"];
            assert_eq!(curves.as_array().unwrap().len(), count);
        }
    }

    #[test]
    fn test_sample_usage_body_timestamps_advance() {
        let body: serde_json::Value = serde_json::from_str(&sample_usage_body(3)).unwrap();
        let curves = body["Body"]["Result"]["utilitiesDevices"][0]["meterLoadCurves"][0]
            ["loadCurves"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(curves[0]["date"], "2021-01-01 00:00:00");
        assert_eq!(curves[1]["date"], "2021-01-01 00:15:00");
        assert_eq!(curves[2]["date"], "2021-01-01 00:30:00");
    }
}
