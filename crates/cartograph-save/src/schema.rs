//! The region document schema.
//!
//! Tag and attribute names are part of the save format and must not change.
//! [`REGION_FIELDS`] is the single source of truth for which attributes are
//! written, in what order, under what condition, and which are required on
//! read. The writer walks it in order; the reader checks its required
//! entries before decoding.

/// Root element of a region-set document.
pub const REGIONS_TAG: &str = "regions";
/// Element holding one region.
pub const REGION_TAG: &str = "region";
/// Repeating element naming one child region by identifier.
pub const CHILD_TAG: &str = "child";

/// Identifier attribute, on both `region` and `child`.
pub const ID_TAG: &str = "id";
/// Player-assigned name.
pub const NAME_TAG: &str = "name";
/// Canonical localization key.
pub const NAME_KEY_TAG: &str = "nameKey";
/// Region type.
pub const TYPE_TAG: &str = "type";
/// Prediscovered flag.
pub const PREDISCOVERED_TAG: &str = "prediscovered";
/// Claimable flag.
pub const CLAIMABLE_TAG: &str = "claimable";
/// Discoverable flag.
pub const DISCOVERABLE_TAG: &str = "discoverable";
/// Parent region identifier.
pub const PARENT_TAG: &str = "parent";
/// Turn number of discovery.
pub const DISCOVERED_IN_TAG: &str = "discoveredIn";
/// Discovering player identifier.
pub const DISCOVERED_BY_TAG: &str = "discoveredBy";
/// Discovery score.
pub const SCORE_VALUE_TAG: &str = "scoreValue";

/// A scalar region field stored as an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// `id`
    Id,
    /// `name`
    Name,
    /// `nameKey`
    NameKey,
    /// `type`
    Type,
    /// `prediscovered`
    Prediscovered,
    /// `claimable`
    Claimable,
    /// `discoverable`
    Discoverable,
    /// `parent`
    Parent,
    /// `discoveredIn`
    DiscoveredIn,
    /// `discoveredBy`
    DiscoveredBy,
    /// `scoreValue`
    ScoreValue,
}

impl Field {
    /// The attribute name.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Id => ID_TAG,
            Self::Name => NAME_TAG,
            Self::NameKey => NAME_KEY_TAG,
            Self::Type => TYPE_TAG,
            Self::Prediscovered => PREDISCOVERED_TAG,
            Self::Claimable => CLAIMABLE_TAG,
            Self::Discoverable => DISCOVERABLE_TAG,
            Self::Parent => PARENT_TAG,
            Self::DiscoveredIn => DISCOVERED_IN_TAG,
            Self::DiscoveredBy => DISCOVERED_BY_TAG,
            Self::ScoreValue => SCORE_VALUE_TAG,
        }
    }
}

/// When an attribute is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Every time.
    Always,
    /// Only when the field holds a value.
    IfSet,
    /// Only when the numeric value is greater than zero.
    IfPositive,
}

/// A field value extracted for writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// The field is unset.
    Absent,
    /// Free text or an identifier.
    Text(String),
    /// A boolean flag.
    Flag(bool),
    /// A non-negative number.
    Number(u32),
}

impl FieldValue {
    /// The attribute text, or `None` when absent.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Text(text) => Some(text),
            Self::Flag(flag) => Some(flag.to_string()),
            Self::Number(n) => Some(n.to_string()),
        }
    }
}

impl Presence {
    /// Whether a value with this policy is written.
    pub const fn admits(self, value: &FieldValue) -> bool {
        match (self, value) {
            (_, FieldValue::Absent) => false,
            (Self::IfPositive, FieldValue::Number(n)) => *n > 0,
            (Self::Always | Self::IfSet | Self::IfPositive, _) => true,
        }
    }
}

/// One row of the attribute policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// The field.
    pub field: Field,
    /// Write condition.
    pub presence: Presence,
    /// Whether reading fails when the attribute is missing. Optional
    /// attributes fall back to their defaults instead.
    pub required: bool,
}

const fn rule(field: Field, presence: Presence, required: bool) -> FieldRule {
    FieldRule {
        field,
        presence,
        required,
    }
}

/// Region attributes in write order.
pub const REGION_FIELDS: [FieldRule; 11] = [
    rule(Field::Id, Presence::Always, true),
    rule(Field::Name, Presence::IfSet, false),
    rule(Field::NameKey, Presence::Always, true),
    rule(Field::Type, Presence::Always, true),
    rule(Field::Prediscovered, Presence::Always, false),
    rule(Field::Claimable, Presence::Always, false),
    rule(Field::Discoverable, Presence::Always, false),
    rule(Field::Parent, Presence::IfSet, false),
    rule(Field::DiscoveredIn, Presence::IfSet, false),
    rule(Field::DiscoveredBy, Presence::IfSet, false),
    rule(Field::ScoreValue, Presence::IfPositive, false),
];

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn every_field_listed_once() {
        let fields: BTreeSet<Field> = REGION_FIELDS.iter().map(|r| r.field).collect();
        assert_eq!(fields.len(), REGION_FIELDS.len());
    }

    #[test]
    fn identity_comes_first() {
        assert_eq!(REGION_FIELDS.first().map(|r| r.field), Some(Field::Id));
        assert_eq!(REGION_FIELDS.last().map(|r| r.field), Some(Field::ScoreValue));
    }

    #[test]
    fn only_identity_and_classification_required() {
        let required: Vec<&str> = REGION_FIELDS
            .iter()
            .filter(|r| r.required)
            .map(|r| r.field.tag())
            .collect();
        assert_eq!(required, vec!["id", "nameKey", "type"]);
    }

    #[test]
    fn presence_rules() {
        assert!(Presence::Always.admits(&FieldValue::Flag(false)));
        assert!(!Presence::IfSet.admits(&FieldValue::Absent));
        assert!(Presence::IfSet.admits(&FieldValue::Number(0)));
        assert!(!Presence::IfPositive.admits(&FieldValue::Number(0)));
        assert!(Presence::IfPositive.admits(&FieldValue::Number(1)));
    }

    #[test]
    fn values_render_as_attribute_text() {
        assert_eq!(FieldValue::Flag(true).into_text().as_deref(), Some("true"));
        assert_eq!(FieldValue::Number(42).into_text().as_deref(), Some("42"));
        assert_eq!(FieldValue::Absent.into_text(), None);
    }
}
