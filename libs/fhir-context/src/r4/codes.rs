//! Required value sets of FHIR R4

use crate::shape::CodeSet;
use phf::phf_set;

pub const NARRATIVE_STATUS: CodeSet = CodeSet {
    name: "NarrativeStatus",
    codes: phf_set! { "generated", "extensions", "additional", "empty" },
};

pub const ADMINISTRATIVE_GENDER: CodeSet = CodeSet {
    name: "AdministrativeGender",
    codes: phf_set! { "male", "female", "other", "unknown" },
};

pub const IDENTIFIER_USE: CodeSet = CodeSet {
    name: "IdentifierUse",
    codes: phf_set! { "usual", "official", "temp", "secondary", "old" },
};

pub const NAME_USE: CodeSet = CodeSet {
    name: "NameUse",
    codes: phf_set! { "usual", "official", "temp", "nickname", "anonymous", "old", "maiden" },
};

pub const CONTACT_POINT_SYSTEM: CodeSet = CodeSet {
    name: "ContactPointSystem",
    codes: phf_set! { "phone", "fax", "email", "pager", "url", "sms", "other" },
};

pub const CONTACT_POINT_USE: CodeSet = CodeSet {
    name: "ContactPointUse",
    codes: phf_set! { "home", "work", "temp", "old", "mobile" },
};

pub const ADDRESS_USE: CodeSet = CodeSet {
    name: "AddressUse",
    codes: phf_set! { "home", "work", "temp", "old", "billing" },
};

pub const ADDRESS_TYPE: CodeSet = CodeSet {
    name: "AddressType",
    codes: phf_set! { "postal", "physical", "both" },
};

pub const QUANTITY_COMPARATOR: CodeSet = CodeSet {
    name: "QuantityComparator",
    codes: phf_set! { "<", "<=", ">=", ">" },
};

pub const LINK_TYPE: CodeSet = CodeSet {
    name: "LinkType",
    codes: phf_set! { "replaced-by", "replaces", "refer", "seealso" },
};

pub const OBSERVATION_STATUS: CodeSet = CodeSet {
    name: "ObservationStatus",
    codes: phf_set! {
        "registered", "preliminary", "final", "amended", "corrected",
        "cancelled", "entered-in-error", "unknown",
    },
};

pub const MEDICATION_STATEMENT_STATUS: CodeSet = CodeSet {
    name: "MedicationStatementStatus",
    codes: phf_set! {
        "active", "completed", "entered-in-error", "intended",
        "stopped", "on-hold", "unknown", "not-taken",
    },
};

pub const BUNDLE_TYPE: CodeSet = CodeSet {
    name: "BundleType",
    codes: phf_set! {
        "document", "message", "transaction", "transaction-response",
        "batch", "batch-response", "history", "searchset", "collection",
    },
};

pub const SEARCH_ENTRY_MODE: CodeSet = CodeSet {
    name: "SearchEntryMode",
    codes: phf_set! { "match", "include", "outcome" },
};

pub const HTTP_VERB: CodeSet = CodeSet {
    name: "HTTPVerb",
    codes: phf_set! { "GET", "HEAD", "POST", "PUT", "DELETE", "PATCH" },
};

pub const ACCOUNT_STATUS: CodeSet = CodeSet {
    name: "AccountStatus",
    codes: phf_set! { "active", "inactive", "entered-in-error", "on-hold", "unknown" },
};
