//! Region document writer.
//!
//! Attributes are emitted in [`REGION_FIELDS`] order, filtered by each
//! rule's [`Presence`](crate::schema::Presence). Children are written as
//! empty `child` elements carrying only an identifier; the child regions
//! themselves are written separately. Output is deterministic, so writing a
//! freshly read region reproduces its input byte for byte.

use std::io::Write;

use cartograph_world::{Region, RegionMap};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::error::SaveError;
use crate::schema::{CHILD_TAG, Field, FieldValue, ID_TAG, REGION_FIELDS, REGION_TAG, REGIONS_TAG};

/// Indentation used for documents produced by this crate.
const INDENT: usize = 2;

/// Extract the value of one field from a region.
fn field_value(region: &Region, field: Field) -> FieldValue {
    match field {
        Field::Id => FieldValue::Text(region.id().to_string()),
        Field::Name => region
            .name()
            .map_or(FieldValue::Absent, |n| FieldValue::Text(n.to_owned())),
        Field::NameKey => FieldValue::Text(region.name_key().to_owned()),
        Field::Type => FieldValue::Text(region.region_type().as_str().to_owned()),
        Field::Prediscovered => FieldValue::Flag(region.is_prediscovered()),
        Field::Claimable => FieldValue::Flag(region.is_claimable()),
        Field::Discoverable => FieldValue::Flag(region.is_discoverable()),
        Field::Parent => region
            .parent()
            .map_or(FieldValue::Absent, |p| FieldValue::Text(p.to_string())),
        Field::DiscoveredIn => region
            .discovered_in()
            .map_or(FieldValue::Absent, |t| FieldValue::Number(t.number())),
        Field::DiscoveredBy => region
            .discovered_by()
            .map_or(FieldValue::Absent, |p| FieldValue::Text(p.to_string())),
        Field::ScoreValue => FieldValue::Number(region.score_value()),
    }
}

/// Write one `region` element.
///
/// # Errors
///
/// Returns [`SaveError`] if the underlying writer fails.
pub fn write_region<W: Write>(writer: &mut Writer<W>, region: &Region) -> Result<(), SaveError> {
    let mut start = BytesStart::new(REGION_TAG);
    for rule in REGION_FIELDS {
        let value = field_value(region, rule.field);
        if !rule.presence.admits(&value) {
            continue;
        }
        if let Some(text) = value.into_text() {
            start.push_attribute((rule.field.tag(), text.as_str()));
        }
    }

    if region.is_leaf() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in region.children() {
        let mut element = BytesStart::new(CHILD_TAG);
        element.push_attribute((ID_TAG, child.to_string().as_str()));
        writer.write_event(Event::Empty(element))?;
    }
    writer.write_event(Event::End(BytesEnd::new(REGION_TAG)))?;
    Ok(())
}

/// Serialize a single region to an XML fragment.
///
/// # Errors
///
/// Returns [`SaveError`] if writing fails.
pub fn region_to_string(region: &Region) -> Result<String, SaveError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
    write_region(&mut writer, region)?;
    into_string(writer)
}

/// Serialize every region in the map to a `regions` document, in
/// identifier order.
///
/// # Errors
///
/// Returns [`SaveError`] if writing fails.
pub fn write_regions(regions: &RegionMap) -> Result<String, SaveError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(REGIONS_TAG)))?;
    for region in regions.iter() {
        write_region(&mut writer, region)?;
    }
    writer.write_event(Event::End(BytesEnd::new(REGIONS_TAG)))?;
    tracing::debug!(count = regions.len(), "Wrote region document");
    into_string(writer)
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String, SaveError> {
    String::from_utf8(writer.into_inner()).map_err(|e| SaveError::Utf8(e.utf8_error()))
}
