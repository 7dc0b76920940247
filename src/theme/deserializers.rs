use gpui::{AbsoluteLength, DefiniteLength, Pixels, SharedString, px, rems};
use serde::{Deserialize, Deserializer, de::Error};
use smallvec::SmallVec;

use super::ThemeVariant;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrFloat {
    String(String),
    Float(f32),
}

/// A length parsed from a theme file before it is narrowed to a gpui type.
#[derive(Debug, PartialEq)]
enum ParsedLength {
    Pixels(f32),
    Rems(f32),
    Percent(f32),
}

fn parse_length(value: StringOrFloat) -> Option<ParsedLength> {
    let string = match value {
        StringOrFloat::Float(num) => return Some(ParsedLength::Pixels(num)),
        StringOrFloat::String(string) => string,
    };

    let string = string.trim();

    if let Some(value) = string.strip_suffix("rem") {
        value.trim().parse().ok().map(ParsedLength::Rems)
    } else if let Some(value) = string.strip_suffix("px") {
        value.trim().parse().ok().map(ParsedLength::Pixels)
    } else if let Some(value) = string.strip_suffix('%') {
        value.trim().parse().ok().map(ParsedLength::Percent)
    } else {
        None
    }
}

pub fn de_string_or_non_empty_list<'de, D>(
    deserializer: D,
) -> Result<SmallVec<[SharedString; 1]>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        One(SharedString),
        Many(SmallVec<[SharedString; 1]>),
    }

    match StringOrVec::deserialize(deserializer)? {
        StringOrVec::One(string) => Ok(SmallVec::from_buf([string])),
        StringOrVec::Many(vec) if vec.is_empty() => Err(D::Error::custom("list can't be empty.")),
        StringOrVec::Many(vec) => Ok(vec),
    }
}

pub fn de_variants<'de, D>(deserializer: D) -> Result<SmallVec<[ThemeVariant; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SmallVec::deserialize(deserializer)?;

    if value.is_empty() {
        return Err(D::Error::custom(
            "at least one theme variant needs to be provided.",
        ));
    }

    Ok(value)
}

pub fn de_pixels<'de, D>(deserializer: D) -> Result<Pixels, D::Error>
where
    D: Deserializer<'de>,
{
    match parse_length(StringOrFloat::deserialize(deserializer)?) {
        Some(ParsedLength::Pixels(pixels)) => Ok(px(pixels)),
        _ => Err(D::Error::custom(
            "expected f32 or string containing a f32 ending with 'px'",
        )),
    }
}

pub fn de_abs_length<'de, D>(deserializer: D) -> Result<AbsoluteLength, D::Error>
where
    D: Deserializer<'de>,
{
    match parse_length(StringOrFloat::deserialize(deserializer)?) {
        Some(ParsedLength::Pixels(value)) => Ok(AbsoluteLength::Pixels(px(value))),
        Some(ParsedLength::Rems(value)) => Ok(AbsoluteLength::Rems(rems(value))),
        _ => Err(D::Error::custom(
            "expected f32 or string containing a f32 ending with 'rem' or 'px'",
        )),
    }
}

pub fn de_def_length<'de, D>(deserializer: D) -> Result<DefiniteLength, D::Error>
where
    D: Deserializer<'de>,
{
    match parse_length(StringOrFloat::deserialize(deserializer)?) {
        Some(ParsedLength::Pixels(value)) => {
            Ok(DefiniteLength::Absolute(AbsoluteLength::Pixels(px(value))))
        }
        Some(ParsedLength::Rems(value)) => {
            Ok(DefiniteLength::Absolute(AbsoluteLength::Rems(rems(value))))
        }
        Some(ParsedLength::Percent(value)) => Ok(DefiniteLength::Fraction(value / 100.)),
        None => Err(D::Error::custom(
            "expected f32 or string containing a f32 ending with 'rem', 'px' or '%'",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Lengths {
        #[serde(deserialize_with = "de_pixels")]
        pixels: Pixels,
        #[serde(deserialize_with = "de_abs_length")]
        absolute: AbsoluteLength,
        #[serde(deserialize_with = "de_def_length")]
        definite: DefiniteLength,
    }

    #[test]
    fn test_parse_length_suffixes() {
        assert_eq!(
            parse_length(StringOrFloat::String("12px".into())),
            Some(ParsedLength::Pixels(12.))
        );
        assert_eq!(
            parse_length(StringOrFloat::String("1.5rem".into())),
            Some(ParsedLength::Rems(1.5))
        );
        assert_eq!(
            parse_length(StringOrFloat::String("140%".into())),
            Some(ParsedLength::Percent(140.))
        );
        assert_eq!(
            parse_length(StringOrFloat::Float(3.)),
            Some(ParsedLength::Pixels(3.))
        );
        assert_eq!(parse_length(StringOrFloat::String("12em".into())), None);
    }

    #[test]
    fn test_lengths_from_json() {
        let lengths: Lengths =
            serde_json::from_str(r#"{ "pixels": "8px", "absolute": "2rem", "definite": "150%" }"#)
                .unwrap();

        assert_eq!(lengths.pixels, px(8.));
        assert_eq!(lengths.absolute, AbsoluteLength::Rems(rems(2.)));
        assert_eq!(lengths.definite, DefiniteLength::Fraction(1.5));
    }

    #[test]
    fn test_pixels_rejects_rems() {
        let result: Result<Lengths, _> =
            serde_json::from_str(r#"{ "pixels": "1rem", "absolute": 4, "definite": 4 }"#);
        assert!(result.is_err(), "Pixels should reject rem values");
    }
}
