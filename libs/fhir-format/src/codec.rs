use crate::decode::Decoder;
use crate::encode;
use crate::error::Result;
use crate::options::FormatOptions;
use serde_json::Value as JsonValue;
use tessera_context::{registry_for, FhirVersion, ShapeRegistry};
use tessera_models::Resource;

/// JSON codec bound to one FHIR version's registry.
///
/// A codec holds only shared, read-only state and can be used from any number
/// of threads at once.
#[derive(Clone)]
pub struct JsonCodec<'r> {
    registry: &'r dyn ShapeRegistry,
    options: FormatOptions,
}

impl<'r> JsonCodec<'r> {
    pub fn new(registry: &'r dyn ShapeRegistry, options: FormatOptions) -> Self {
        Self { registry, options }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn version(&self) -> FhirVersion {
        self.registry.version()
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Decodes a JSON document. When `expected` is given the document's
    /// `resourceType` must equal it.
    pub fn decode(&self, input: &str, expected: Option<&str>) -> Result<Resource> {
        let json: JsonValue = serde_json::from_str(input)?;
        self.decode_value(&json, expected)
    }

    pub fn decode_value(&self, json: &JsonValue, expected: Option<&str>) -> Result<Resource> {
        tracing::debug!(
            version = %self.version(),
            resource_type = json.get("resourceType").and_then(JsonValue::as_str),
            "decoding resource"
        );
        Decoder::new(self.registry, &self.options).resource(json, expected, None)
    }

    /// Encodes a resource as JSON text, indented when `pretty` is set.
    pub fn encode(&self, resource: &Resource) -> String {
        let json = self.encode_value(resource);
        if self.options.pretty {
            format!("{json:#}")
        } else {
            json.to_string()
        }
    }

    pub fn encode_value(&self, resource: &Resource) -> JsonValue {
        tracing::debug!(
            version = %self.version(),
            resource_type = resource.resource_type(),
            "encoding resource"
        );
        encode::resource(resource)
    }
}

impl JsonCodec<'static> {
    /// Codec over the built-in registry for `version`, with default options.
    pub fn for_version(version: FhirVersion) -> Self {
        Self::new(registry_for(version), FormatOptions::default())
    }
}

impl std::fmt::Debug for JsonCodec<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCodec")
            .field("version", &self.version())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::options::UnknownFieldPolicy;

    #[test]
    fn test_codec_reports_version() {
        assert_eq!(JsonCodec::for_version(FhirVersion::Stu3).version(), FhirVersion::Stu3);
        assert_eq!(JsonCodec::for_version(FhirVersion::R4).version(), FhirVersion::R4);
    }

    #[test]
    fn test_syntax_errors() {
        let codec = JsonCodec::for_version(FhirVersion::R4);
        let err = codec.decode("{\"resourceType\": ", None).unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        let err = codec.decode("[]", None).unwrap_err();
        assert!(matches!(err, Error::ExpectedObject(path) if path == "$"));
    }

    #[test]
    fn test_encode_pretty_and_compact() {
        let codec = JsonCodec::for_version(FhirVersion::R4);
        let basic = codec
            .decode(r#"{"resourceType":"Basic","code":{"text":"x"}}"#, Some("Basic"))
            .unwrap();
        assert_eq!(
            codec.encode(&basic),
            r#"{"resourceType":"Basic","code":{"text":"x"}}"#
        );

        let pretty = codec.with_options(FormatOptions::default().with_pretty(true));
        assert!(pretty.encode(&basic).contains("\n  \"code\": {"));
    }

    #[test]
    fn test_options_are_carried() {
        let options = FormatOptions::default().with_unknown_fields(UnknownFieldPolicy::Ignore);
        let codec = JsonCodec::for_version(FhirVersion::R4).with_options(options.clone());
        assert_eq!(codec.options(), &options);
    }
}
