//! FHIR primitive types and the `Primitive<T>` element wrapper
//!
//! Every primitive on the wire is one of a closed set of types. Several types
//! share a Rust representation (all string-like types are `String`, the three
//! integer types are `i32`) but differ in their lexical or range rules, which
//! [`PrimitiveType::check_str`] and [`PrimitiveType::check_integer`] enforce.

use crate::calendar::{Date, DateTime, Instant, Time};
use crate::element::{Element, Extension};
use crate::error::{Error, Result};
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Number, Value as JsonValue};
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Integer,
    PositiveInt,
    UnsignedInt,
    Decimal,
    String,
    Code,
    Id,
    Uri,
    Url,
    Canonical,
    Oid,
    Uuid,
    Markdown,
    Base64Binary,
    Xhtml,
    Date,
    DateTime,
    Time,
    Instant,
}

impl PrimitiveType {
    /// FHIR type name, also used as the choice-field suffix (capitalised).
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::PositiveInt => "positiveInt",
            PrimitiveType::UnsignedInt => "unsignedInt",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::String => "string",
            PrimitiveType::Code => "code",
            PrimitiveType::Id => "id",
            PrimitiveType::Uri => "uri",
            PrimitiveType::Url => "url",
            PrimitiveType::Canonical => "canonical",
            PrimitiveType::Oid => "oid",
            PrimitiveType::Uuid => "uuid",
            PrimitiveType::Markdown => "markdown",
            PrimitiveType::Base64Binary => "base64Binary",
            PrimitiveType::Xhtml => "xhtml",
            PrimitiveType::Date => "date",
            PrimitiveType::DateTime => "dateTime",
            PrimitiveType::Time => "time",
            PrimitiveType::Instant => "instant",
        }
    }

    /// Validates the lexical form of a string-represented type.
    pub fn check_str(&self, value: &str) -> Result<()> {
        let ok = match self {
            PrimitiveType::String => !value.is_empty(),
            PrimitiveType::Markdown => !value.trim().is_empty(),
            PrimitiveType::Code => lexical(&CODE_RE, r"^[^\s]+( [^\s]+)*$").is_match(value),
            PrimitiveType::Id => lexical(&ID_RE, r"^[A-Za-z0-9\-.]{1,64}$").is_match(value),
            PrimitiveType::Uri | PrimitiveType::Url | PrimitiveType::Canonical => {
                !value.is_empty() && !value.chars().any(char::is_whitespace)
            }
            PrimitiveType::Oid => {
                lexical(&OID_RE, r"^urn:oid:[0-2](\.(0|[1-9][0-9]*))+$").is_match(value)
            }
            PrimitiveType::Uuid => lexical(
                &UUID_RE,
                r"^urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
            )
            .is_match(value),
            PrimitiveType::Base64Binary => {
                lexical(&BASE64_RE, r"^(\s*([0-9a-zA-Z+/=]){4}\s*)+$").is_match(value)
            }
            PrimitiveType::Xhtml => value.trim_start().starts_with("<div"),
            _ => true,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidLexical {
                kind: self.name(),
                value: value.to_string(),
            })
        }
    }

    /// Validates the range of an integer-represented type.
    pub fn check_integer(&self, value: i64) -> Result<i32> {
        let min = match self {
            PrimitiveType::PositiveInt => 1,
            PrimitiveType::UnsignedInt => 0,
            _ => i64::from(i32::MIN),
        };
        if value < min || value > i64::from(i32::MAX) {
            return Err(Error::OutOfRange {
                kind: self.name(),
                value: value.to_string(),
            });
        }
        Ok(value as i32)
    }
}

fn lexical(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("primitive regex must compile"))
}

static CODE_RE: OnceLock<Regex> = OnceLock::new();
static ID_RE: OnceLock<Regex> = OnceLock::new();
static OID_RE: OnceLock<Regex> = OnceLock::new();
static UUID_RE: OnceLock<Regex> = OnceLock::new();
static BASE64_RE: OnceLock<Regex> = OnceLock::new();

/// Conversion between a Rust leaf representation and its JSON form.
pub trait FhirPrimitive: Sized {
    fn from_json(ty: PrimitiveType, value: &JsonValue) -> Result<Self>;
    fn to_json(&self) -> JsonValue;
}

fn unexpected(ty: PrimitiveType, expected: &'static str) -> Error {
    Error::UnexpectedJson {
        kind: ty.name(),
        expected,
    }
}

impl FhirPrimitive for bool {
    fn from_json(ty: PrimitiveType, value: &JsonValue) -> Result<Self> {
        value.as_bool().ok_or_else(|| unexpected(ty, "boolean"))
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::Bool(*self)
    }
}

impl FhirPrimitive for i32 {
    fn from_json(ty: PrimitiveType, value: &JsonValue) -> Result<Self> {
        match value.as_i64() {
            Some(n) => ty.check_integer(n),
            None if value.is_u64() => Err(Error::OutOfRange {
                kind: ty.name(),
                value: value.to_string(),
            }),
            None => Err(unexpected(ty, "integer")),
        }
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::from(*self)
    }
}

/// Decimals keep the integral/fractional distinction of the source number:
/// `100` re-encodes as an integer, `1.0` and `0.5` as floats.
impl FhirPrimitive for Decimal {
    fn from_json(ty: PrimitiveType, value: &JsonValue) -> Result<Self> {
        let JsonValue::Number(n) = value else {
            return Err(unexpected(ty, "number"));
        };
        let text = n.to_string();
        let parsed = if let Some(i) = n.as_i64() {
            Ok(Decimal::from(i))
        } else if text.contains(['e', 'E']) {
            Decimal::from_scientific(&text)
        } else {
            Decimal::from_str(&text)
        };
        let mut decimal = parsed.map_err(|_| Error::OutOfRange {
            kind: ty.name(),
            value: text.clone(),
        })?;
        if n.is_f64() && decimal.scale() == 0 {
            decimal.rescale(1);
        }
        Ok(decimal)
    }

    fn to_json(&self) -> JsonValue {
        if self.scale() == 0 {
            if let Some(i) = self.to_i64() {
                return JsonValue::from(i);
            }
            if let Some(u) = self.to_u64() {
                return JsonValue::from(u);
            }
        }
        self.to_f64()
            .and_then(Number::from_f64)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

impl FhirPrimitive for String {
    fn from_json(ty: PrimitiveType, value: &JsonValue) -> Result<Self> {
        let s = value.as_str().ok_or_else(|| unexpected(ty, "string"))?;
        ty.check_str(s)?;
        Ok(s.to_string())
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::String(self.clone())
    }
}

macro_rules! calendar_primitive {
    ($ty:ty) => {
        impl FhirPrimitive for $ty {
            fn from_json(ty: PrimitiveType, value: &JsonValue) -> Result<Self> {
                value
                    .as_str()
                    .ok_or_else(|| unexpected(ty, "string"))?
                    .parse()
            }

            fn to_json(&self) -> JsonValue {
                JsonValue::String(self.to_string())
            }
        }
    };
}

calendar_primitive!(Date);
calendar_primitive!(DateTime);
calendar_primitive!(Time);
calendar_primitive!(Instant);

/// A primitive value together with its element metadata.
///
/// Either half may be absent on the wire (`"given": ["Peter", null]` with
/// `"_given": [null, {"id": "a"}]`), but never both.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive<T> {
    value: Option<T>,
    element: Element,
}

impl<T> Primitive<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Some(value),
            element: Element::default(),
        }
    }

    pub fn from_parts(value: Option<T>, element: Element) -> Result<Self> {
        if value.is_none() && element.is_empty() {
            return Err(Error::EmptyPrimitive);
        }
        Ok(Self { value, element })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.element.id = Some(id.into());
        self
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.element.extension.push(extension);
        self
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn id(&self) -> Option<&str> {
        self.element.id.as_deref()
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.element.extension
    }

    pub fn has_metadata(&self) -> bool {
        !self.element.is_empty()
    }
}

impl<T: FhirPrimitive> Primitive<T> {
    pub fn value_json(&self) -> Option<JsonValue> {
        self.value.as_ref().map(FhirPrimitive::to_json)
    }
}

impl<T> From<T> for Primitive<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_kinds() {
        assert!(PrimitiveType::Id.check_str("example-1.a").is_ok());
        assert!(PrimitiveType::Id.check_str("has space").is_err());
        assert!(PrimitiveType::Id.check_str(&"a".repeat(65)).is_err());
        assert!(PrimitiveType::Code.check_str("final").is_ok());
        assert!(PrimitiveType::Code.check_str("two words").is_ok());
        assert!(PrimitiveType::Code.check_str(" leading").is_err());
        assert!(PrimitiveType::Oid.check_str("urn:oid:1.2.3.4").is_ok());
        assert!(PrimitiveType::Oid.check_str("urn:oid:1.02").is_err());
        assert!(PrimitiveType::Uuid
            .check_str("urn:uuid:c757873d-ec9a-4326-a141-556f43239520")
            .is_ok());
        assert!(PrimitiveType::Uri.check_str("http://example.org/a b").is_err());
        assert!(PrimitiveType::String.check_str("").is_err());
        assert!(PrimitiveType::Base64Binary.check_str("SGVsbG8=").is_ok());
        assert!(PrimitiveType::Xhtml
            .check_str("<div xmlns=\"http://www.w3.org/1999/xhtml\">x</div>")
            .is_ok());
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(PrimitiveType::PositiveInt.check_integer(1), Ok(1));
        assert!(PrimitiveType::PositiveInt.check_integer(0).is_err());
        assert_eq!(PrimitiveType::UnsignedInt.check_integer(0), Ok(0));
        assert!(PrimitiveType::UnsignedInt.check_integer(-1).is_err());
        assert!(PrimitiveType::Integer.check_integer(i64::from(i32::MAX) + 1).is_err());
        assert_eq!(PrimitiveType::Integer.check_integer(-5), Ok(-5));
    }

    #[test]
    fn test_integer_from_json_range() {
        assert_eq!(i32::from_json(PrimitiveType::Integer, &json!(42)), Ok(42));
        assert!(matches!(
            i32::from_json(PrimitiveType::Integer, &json!(i64::MAX)),
            Err(Error::OutOfRange { kind: "integer", .. })
        ));
        assert_eq!(
            i32::from_json(PrimitiveType::UnsignedInt, &json!(18446744073709551615u64)),
            Err(Error::OutOfRange {
                kind: "unsignedInt",
                value: "18446744073709551615".to_string(),
            })
        );
        assert!(matches!(
            i32::from_json(PrimitiveType::Integer, &json!(1.5)),
            Err(Error::UnexpectedJson { .. })
        ));
    }

    #[test]
    fn test_decimal_keeps_number_shape() {
        for raw in [
            json!(100),
            json!(1.0),
            json!(0.5),
            json!(-12.75),
            json!(185),
            json!(9223372036854775808u64),
            json!(18446744073709551615u64),
        ] {
            let decimal = Decimal::from_json(PrimitiveType::Decimal, &raw).unwrap();
            assert_eq!(decimal.to_json(), raw);
        }
        assert!(Decimal::from_json(PrimitiveType::Decimal, &json!("1.0")).is_err());
    }

    #[test]
    fn test_calendar_from_json() {
        let date = Date::from_json(PrimitiveType::Date, &json!("1974-12-25")).unwrap();
        assert_eq!(date.to_json(), json!("1974-12-25"));
        assert!(Date::from_json(PrimitiveType::Date, &json!("1974-02-30")).is_err());
        assert!(Date::from_json(PrimitiveType::Date, &json!(1974)).is_err());
    }

    #[test]
    fn test_primitive_requires_value_or_metadata() {
        assert_eq!(
            Primitive::<bool>::from_parts(None, Element::default()),
            Err(Error::EmptyPrimitive)
        );
        let only_id = Primitive::<bool>::from_parts(None, Element::with_id("x")).unwrap();
        assert_eq!(only_id.id(), Some("x"));
        assert!(only_id.value().is_none());
    }
}
