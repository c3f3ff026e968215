//! Canton lookup by loose name match.

use std::borrow::Cow;

use super::filter::contains_ignore_case;
use super::BoundaryError;
use crate::models::{Feature, PropertyKeys, UNNAMED};

/// Display name of a canton feature, falling back to [`UNNAMED`].
pub fn display_name<'a>(feature: &'a Feature, keys: &PropertyKeys) -> Cow<'a, str> {
    keys.first_text(&feature.properties)
        .unwrap_or(Cow::Borrowed(UNNAMED))
}

/// Case-insensitive containment in either direction.
pub fn names_match(candidate: &str, query: &str) -> bool {
    contains_ignore_case(query, candidate) || contains_ignore_case(candidate, query)
}

/// First feature whose display name matches `name`.
pub fn find_canton<'a>(
    features: &[&'a Feature],
    name: &str,
    keys: &PropertyKeys,
) -> Result<&'a Feature, BoundaryError> {
    features
        .iter()
        .copied()
        .find(|f| names_match(&display_name(f, keys), name))
        .ok_or_else(|| BoundaryError::CantonNotFound {
            name: name.to_string(),
        })
}

/// Copy of `feature` with its display name written to the `name` property.
pub fn with_display_name(feature: &Feature, keys: &PropertyKeys) -> Feature {
    let name = display_name(feature, keys).into_owned();
    let mut renamed = feature.clone();
    renamed.properties.insert("name".to_string(), name.into());
    renamed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundaries::KNOWN_CANTONS;
    use crate::models::{Geometry, Properties};
    use serde_json::json;

    fn canton(name: &str) -> Feature {
        let mut properties = Properties::new();
        properties.insert("NAME_2".to_string(), json!(name));
        Feature::new(properties, Geometry::default())
    }

    #[test]
    fn test_display_name_fallbacks() {
        let keys = PropertyKeys::canton();
        assert_eq!(display_name(&canton("Daule"), &keys), "Daule");

        let mut generic = Properties::new();
        generic.insert("name".to_string(), json!("Nobol"));
        let generic = Feature::new(generic, Geometry::default());
        assert_eq!(display_name(&generic, &keys), "Nobol");

        assert_eq!(display_name(&Feature::default(), &keys), UNNAMED);
    }

    #[test]
    fn test_match_is_bidirectional_and_case_insensitive() {
        let features = [canton("Guayaquil"), canton("El Empalme")];
        let refs: Vec<&Feature> = features.iter().collect();
        let keys = PropertyKeys::canton();

        for query in ["guayaquil", "GUAYAQUIL", "Guaya", "Cantón Guayaquil"] {
            let found = find_canton(&refs, query, &keys).unwrap();
            assert_eq!(display_name(found, &keys), "Guayaquil");
        }

        let found = find_canton(&refs, "el empalme", &keys).unwrap();
        assert_eq!(display_name(found, &keys), "El Empalme");
    }

    #[test]
    fn test_first_match_wins() {
        let features = [canton("Naranjal"), canton("Naranjito")];
        let refs: Vec<&Feature> = features.iter().collect();

        let found = find_canton(&refs, "naran", &PropertyKeys::canton()).unwrap();
        assert!(std::ptr::eq(found, &features[0]));
    }

    #[test]
    fn test_not_found() {
        let features = [canton("Milagro")];
        let refs: Vec<&Feature> = features.iter().collect();

        let err = find_canton(&refs, "Quito", &PropertyKeys::canton()).unwrap_err();
        assert!(matches!(err, BoundaryError::CantonNotFound { ref name } if name == "Quito"));
    }

    #[test]
    fn test_every_known_canton_resolves() {
        let features: Vec<Feature> = KNOWN_CANTONS.iter().map(|n| canton(n)).collect();
        let refs: Vec<&Feature> = features.iter().collect();

        for name in KNOWN_CANTONS {
            assert!(find_canton(&refs, name, &PropertyKeys::canton()).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_with_display_name_keeps_other_properties() {
        let mut properties = Properties::new();
        properties.insert("NAME_1".to_string(), json!("Guayas"));
        properties.insert("NAME_2".to_string(), json!("Salitre"));
        let mut feature = Feature::new(properties, Geometry::default());
        feature.id = Some(json!(921));

        let renamed = with_display_name(&feature, &PropertyKeys::canton());
        assert_eq!(renamed.id, Some(json!(921)));
        assert_eq!(renamed.properties["name"], "Salitre");
        assert_eq!(renamed.properties["NAME_1"], "Guayas");
        assert!(!feature.properties.contains_key("name"));
    }
}
