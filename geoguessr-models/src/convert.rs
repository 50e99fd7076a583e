//! Total scalar coercion from arbitrary JSON values
//!
//! Every function here takes a `&Value` and never panics. Missing object keys come
//! through serde_json indexing as `Value::Null`, so `to_int(&data["level"])` is the
//! single call each model field needs. Anything that cannot be coerced yields `None`,
//! except [`big_number_or_numeric`] which falls back to `0.0`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Timestamp layout used by every dated field of the API
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Width of a timestamp rendered with [`TIMESTAMP_FORMAT`]
const TIMESTAMP_LEN: usize = 19;

/// Type tag of the duel server's string-encoded numbers
pub const BIG_NUMBER_TAG: &str = "Big Number";

/// Coerce to an integer
///
/// Accepts integers, finite floats (truncated toward zero), numeric strings and
/// booleans (0 or 1).
pub fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Coerce to a boolean
///
/// Accepts booleans, numbers (non-zero is `true`) and the strings `true`, `false`,
/// `1` and `0` in any case.
pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerce to a string
///
/// Numbers and booleans are rendered; null, arrays and objects yield `None`.
pub fn to_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerce to a finite float
pub fn to_float(value: &Value) -> Option<f64> {
    let float = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    float.filter(|f| f.is_finite())
}

/// Parse a `YYYY-MM-DDTHH:MM:SS` timestamp
///
/// The string is cut at its first `.` and at the width of the pattern, which drops
/// fractional seconds and any timezone suffix. Non-strings yield `None`.
pub fn to_timestamp(value: &Value) -> Option<NaiveDateTime> {
    let raw = value.as_str()?;
    let truncated = raw.split_once('.').map_or(raw, |(head, _)| head);
    let truncated = truncated.get(..TIMESTAMP_LEN).unwrap_or(truncated);
    NaiveDateTime::parse_from_str(truncated, TIMESTAMP_FORMAT).ok()
}

/// Interpret a number of milliseconds since the Unix epoch
pub fn to_epoch_millis(value: &Value) -> Option<DateTime<Utc>> {
    let millis = to_float(value)?;
    DateTime::from_timestamp_millis(millis as i64)
}

/// Normalize a plain number or a tagged Big Number object to a float
///
/// `{"type": "Big Number", "value": "123n"}` becomes `123.0` (the trailing `n`
/// marker is stripped), `45` becomes `45.0` and booleans become `1.0` or `0.0`.
/// Every other shape becomes `0.0`.
pub fn big_number_or_numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Object(map) if map.get("type").and_then(Value::as_str) == Some(BIG_NUMBER_TAG) => {
            let Some(raw) = map.get("value").and_then(to_str) else {
                return 0.0;
            };
            let raw = raw.trim();
            raw.strip_suffix('n')
                .unwrap_or(raw)
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Keep a raw JSON value as-is unless it is null
pub fn non_null(value: &Value) -> Option<Value> {
    (!value.is_null()).then(|| value.clone())
}

/// Iterate over the non-null elements of an array, in order
///
/// Non-arrays iterate as empty.
pub fn non_null_items(value: &Value) -> impl Iterator<Item = &Value> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter(|item| !item.is_null())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use proptest::prelude::*;
    use serde_json::json;

    /// Arbitrary JSON documents, nested a few levels deep
    pub(crate) fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_map(Value::from),
            ".{0,12}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::from),
                prop::collection::btree_map("[a-zA-Z]{1,8}", inner, 0..6)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    #[test]
    fn test_to_int_cases() {
        assert_eq!(to_int(&Value::Null), None);
        assert_eq!(to_int(&json!("abc")), None);
        assert_eq!(to_int(&json!("42")), Some(42));
        assert_eq!(to_int(&json!(" 42 ")), Some(42));
        assert_eq!(to_int(&json!(7)), Some(7));
        assert_eq!(to_int(&json!(3.9)), Some(3));
        assert_eq!(to_int(&json!(-3.9)), Some(-3));
        assert_eq!(to_int(&json!(true)), Some(1));
        assert_eq!(to_int(&json!([1])), None);
        assert_eq!(to_int(&json!({"a": 1})), None);
    }

    #[test]
    fn test_to_bool_cases() {
        assert_eq!(to_bool(&Value::Null), None);
        assert_eq!(to_bool(&json!(true)), Some(true));
        assert_eq!(to_bool(&json!(0)), Some(false));
        assert_eq!(to_bool(&json!(2.5)), Some(true));
        assert_eq!(to_bool(&json!("FALSE")), Some(false));
        assert_eq!(to_bool(&json!("1")), Some(true));
        assert_eq!(to_bool(&json!("maybe")), None);
        assert_eq!(to_bool(&json!({})), None);
    }

    #[test]
    fn test_to_str_and_float_cases() {
        assert_eq!(to_str(&json!("FR")), Some("FR".to_string()));
        assert_eq!(to_str(&json!(12)), Some("12".to_string()));
        assert_eq!(to_str(&json!(false)), Some("false".to_string()));
        assert_eq!(to_str(&Value::Null), None);
        assert_eq!(to_str(&json!(["x"])), None);

        assert_eq!(to_float(&json!(1.5)), Some(1.5));
        assert_eq!(to_float(&json!("2.25")), Some(2.25));
        assert_eq!(to_float(&json!("1,234")), None);
        assert_eq!(to_float(&Value::Null), None);
        assert_eq!(to_float(&json!("NaN")), None);
        assert_eq!(to_float(&json!("inf")), None);
    }

    #[test]
    fn test_to_timestamp_truncates_suffixes() {
        let ts = to_timestamp(&json!("2023-04-05T06:07:08.123Z")).unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2023, 4, 5));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (6, 7, 8));

        let ts = to_timestamp(&json!("2023-04-05T06:07:08+00:00")).unwrap();
        assert_eq!(ts.second(), 8);

        assert_eq!(to_timestamp(&json!("2023-04-05T06:07:08")), Some(ts));
    }

    #[test]
    fn test_to_timestamp_rejects_malformed() {
        assert_eq!(to_timestamp(&Value::Null), None);
        assert_eq!(to_timestamp(&json!(1680674828)), None);
        assert_eq!(to_timestamp(&json!("yesterday")), None);
        assert_eq!(to_timestamp(&json!("2023-13-05T06:07:08")), None);
        assert_eq!(to_timestamp(&json!("")), None);
    }

    #[test]
    fn test_to_epoch_millis() {
        let dt = to_epoch_millis(&json!(1_700_000_000_000i64)).unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
        assert_eq!(to_epoch_millis(&json!("1700000000000")), Some(dt));
        assert_eq!(to_epoch_millis(&json!("soon")), None);
    }

    #[test]
    fn test_big_number_or_numeric() {
        assert_eq!(big_number_or_numeric(&json!({"type": "Big Number", "value": "123n"})), 123.0);
        assert_eq!(big_number_or_numeric(&json!({"type": "Big Number", "value": "-4.5n"})), -4.5);
        assert_eq!(big_number_or_numeric(&json!({"type": "Big Number", "value": "77"})), 77.0);
        assert_eq!(big_number_or_numeric(&json!(45)), 45.0);
        assert_eq!(big_number_or_numeric(&json!(45.5)), 45.5);
        assert_eq!(big_number_or_numeric(&json!({"type": "Other"})), 0.0);
        assert_eq!(big_number_or_numeric(&json!({"type": "Big Number"})), 0.0);
        assert_eq!(big_number_or_numeric(&json!({"type": "Big Number", "value": "xn"})), 0.0);
        assert_eq!(big_number_or_numeric(&json!("45")), 0.0);
        assert_eq!(big_number_or_numeric(&Value::Null), 0.0);
        assert_eq!(big_number_or_numeric(&json!(true)), 1.0);
        assert_eq!(big_number_or_numeric(&json!(false)), 0.0);
    }

    #[test]
    fn test_non_null_items_drops_nulls_in_order() {
        let value = json!([1, null, 2, null, 3]);
        let items: Vec<_> = non_null_items(&value).cloned().collect();
        assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
        assert_eq!(non_null_items(&json!({"a": 1})).count(), 0);
        assert_eq!(non_null(&Value::Null), None);
        assert_eq!(non_null(&json!({"a": 1})), Some(json!({"a": 1})));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_coercions_are_total(value in arb_json()) {
            let _ = to_int(&value);
            let _ = to_bool(&value);
            let _ = to_str(&value);
            let _ = to_float(&value);
            let _ = to_timestamp(&value);
            let _ = to_epoch_millis(&value);
            let _ = big_number_or_numeric(&value);
        }

        #[test]
        fn prop_int_strings_round_trip(n in any::<i64>()) {
            prop_assert_eq!(to_int(&Value::from(n.to_string())), Some(n));
            prop_assert_eq!(to_int(&Value::from(n)), Some(n));
        }

        #[test]
        fn prop_big_number_matches_plain_number(n in -1_000_000i64..1_000_000i64) {
            let tagged = serde_json::json!({"type": "Big Number", "value": format!("{}n", n)});
            prop_assert_eq!(big_number_or_numeric(&tagged), n as f64);
            prop_assert_eq!(big_number_or_numeric(&Value::from(n)), n as f64);
        }
    }
}
