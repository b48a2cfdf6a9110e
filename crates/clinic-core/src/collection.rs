//! # Collection Naming
//!
//! The document store keeps each record kind in a collection named after
//! the kind's type name, lowercased. `BlogPost` is the one documented
//! exception and maps to `blogs`.

/// Type names whose collection does not follow the lowercase rule.
const COLLECTION_OVERRIDES: &[(&str, &str)] = &[("BlogPost", "blogs")];

/// Collection name for a record type name.
///
/// ```
/// use clinic_core::collection_name;
///
/// assert_eq!(collection_name("Appointment"), "appointment");
/// assert_eq!(collection_name("BlogPost"), "blogs");
/// ```
pub fn collection_name(type_name: &str) -> String {
    COLLECTION_OVERRIDES
        .iter()
        .find(|(name, _)| *name == type_name)
        .map_or_else(|| type_name.to_lowercase(), |(_, collection)| (*collection).to_string())
}
