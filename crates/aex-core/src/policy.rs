//! Handling of properties whose value category has no document form.

use crate::error::AexError;
use crate::options::UnsupportedPropertyBehavior;
use crate::state::AexState;
use aex_data::model::{AexProperty, PropertyType};

/// Routes an unsupported property through the configured behavior.
///
/// `Ok(None)` omits the property, `Ok(Some(_))` emits a value-less stub and
/// `Err` aborts the read. Metadata stubs never carry `value` or `keys`.
pub fn unsupported_property(
    state: &mut AexState,
    name: &str,
    match_name: &str,
    kind: PropertyType,
) -> Result<Option<AexProperty>, AexError> {
    match state.get_options.unsupported_property_behavior {
        UnsupportedPropertyBehavior::Skip => Ok(None),
        UnsupportedPropertyBehavior::Log => {
            state.warn(
                format!(
                    "Property '{match_name}' of type {} is unsupported and was skipped",
                    kind.tag()
                ),
                Some(match_name),
            );
            Ok(None)
        }
        UnsupportedPropertyBehavior::Throw => Err(AexError::UnsupportedProperty {
            match_name: match_name.to_string(),
            value_type: kind.tag().to_string(),
        }),
        UnsupportedPropertyBehavior::Metadata => Ok(Some(AexProperty {
            kind,
            name: Some(name.to_string()),
            match_name: match_name.to_string(),
            ..AexProperty::default()
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GetOptions;

    fn state(behavior: UnsupportedPropertyBehavior) -> AexState {
        AexState::for_get(GetOptions {
            unsupported_property_behavior: behavior,
        })
    }

    #[test]
    fn skip_is_silent() {
        let mut s = state(UnsupportedPropertyBehavior::Skip);
        let out = unsupported_property(&mut s, "Histogram", "ADBE Easy Levels2-0002", PropertyType::Custom);
        assert!(matches!(out, Ok(None)));
        assert!(s.log.is_empty());
    }

    #[test]
    fn log_records_the_match_name() {
        let mut s = state(UnsupportedPropertyBehavior::Log);
        let out = unsupported_property(&mut s, "Histogram", "ADBE Easy Levels2-0002", PropertyType::Custom);
        assert!(matches!(out, Ok(None)));
        assert_eq!(s.log.len(), 1);
        assert_eq!(s.log[0].match_name.as_deref(), Some("ADBE Easy Levels2-0002"));
        assert!(s.log[0].message.contains("is unsupported"));
    }

    #[test]
    fn throw_names_the_property() {
        let mut s = state(UnsupportedPropertyBehavior::Throw);
        let err = unsupported_property(&mut s, "Histogram", "ADBE Easy Levels2-0002", PropertyType::Custom)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("ADBE Easy Levels2-0002"));
        assert!(message.contains("is not supported."));
    }

    #[test]
    fn metadata_keeps_shape_without_value() {
        let mut s = state(UnsupportedPropertyBehavior::Metadata);
        let stub = unsupported_property(&mut s, "Histogram", "ADBE Easy Levels2-0002", PropertyType::Custom)
            .unwrap()
            .unwrap();
        let json = serde_json::to_value(&stub).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "aex:property:custom",
                "name": "Histogram",
                "matchName": "ADBE Easy Levels2-0002"
            })
        );
    }
}
