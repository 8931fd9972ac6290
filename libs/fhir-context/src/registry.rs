//! Shape registries
//!
//! The codec knows nothing about concrete resource shapes; it asks a
//! [`ShapeRegistry`] for the descriptor behind a type name. Each FHIR
//! generation ships one [`StaticRegistry`] backed by a compile-time perfect
//! hash map, so lookups are O(1), allocation-free and safe to share across
//! threads.

use crate::shape::{ChoiceOption, ShapeDescriptor, ShapeKind};
use crate::version::FhirVersion;
use crate::{r4, stu3};

pub trait ShapeRegistry: Send + Sync {
    fn version(&self) -> FhirVersion;

    /// Descriptor for a resource, datatype or backbone element name.
    fn lookup(&self, name: &str) -> Option<&'static ShapeDescriptor>;

    /// Permitted `value[x]` alternatives of `Extension`.
    fn extension_value_types(&self) -> &'static [ChoiceOption];

    /// Descriptor for a resource type name; datatypes are not resources.
    fn lookup_resource(&self, name: &str) -> Option<&'static ShapeDescriptor> {
        self.lookup(name).filter(|shape| shape.is_resource())
    }
}

pub struct StaticRegistry {
    version: FhirVersion,
    shapes: &'static phf::Map<&'static str, &'static ShapeDescriptor>,
    extension_values: &'static [ChoiceOption],
}

impl StaticRegistry {
    pub const fn new(
        version: FhirVersion,
        shapes: &'static phf::Map<&'static str, &'static ShapeDescriptor>,
        extension_values: &'static [ChoiceOption],
    ) -> Self {
        Self {
            version,
            shapes,
            extension_values,
        }
    }

    /// Names of all registered resource types, in no particular order.
    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> {
        self.shapes
            .entries()
            .filter(|(_, shape)| shape.kind == ShapeKind::Resource)
            .map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl ShapeRegistry for StaticRegistry {
    fn version(&self) -> FhirVersion {
        self.version
    }

    fn lookup(&self, name: &str) -> Option<&'static ShapeDescriptor> {
        self.shapes.get(name).copied()
    }

    fn extension_value_types(&self) -> &'static [ChoiceOption] {
        self.extension_values
    }
}

impl std::fmt::Debug for StaticRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticRegistry")
            .field("version", &self.version)
            .field("shapes", &self.shapes.len())
            .finish()
    }
}

/// The built-in registry of a generation.
pub fn registry_for(version: FhirVersion) -> &'static StaticRegistry {
    match version {
        FhirVersion::Stu3 => &stu3::REGISTRY,
        FhirVersion::R4 => &r4::REGISTRY,
    }
}
