//! Region document reader.
//!
//! `id`, `nameKey` and `type` are required. Every other attribute falls
//! back to its default when missing or malformed: no name, flags false,
//! score 0, no discovery turn, no parent, no discovering player. The
//! discovering player is only kept if the [`PlayerLookup`] knows it.
//!
//! Parent and child identifiers may name regions that have not been read
//! yet; they are recorded as forward references in the [`RegionMap`] and
//! resolved when (if) those regions arrive.

use std::collections::{BTreeMap, BTreeSet};

use cartograph_types::{PlayerId, RegionId, RegionType, Turn};
use cartograph_world::{Region, RegionMap};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::SaveError;
use crate::schema::{
    CHILD_TAG, CLAIMABLE_TAG, DISCOVERABLE_TAG, DISCOVERED_BY_TAG, DISCOVERED_IN_TAG, ID_TAG,
    NAME_KEY_TAG, NAME_TAG, PARENT_TAG, PREDISCOVERED_TAG, REGION_FIELDS, REGION_TAG,
    REGIONS_TAG, SCORE_VALUE_TAG, TYPE_TAG,
};

/// Resolves player identifiers found in a document.
pub trait PlayerLookup {
    /// Whether the player exists in the game being loaded.
    fn has_player(&self, id: PlayerId) -> bool;
}

impl PlayerLookup for BTreeSet<PlayerId> {
    fn has_player(&self, id: PlayerId) -> bool {
        self.contains(&id)
    }
}

/// Raw attribute values of one element.
type Attributes = BTreeMap<String, String>;

fn attributes(element: &BytesStart<'_>) -> Result<Attributes, SaveError> {
    let mut out = Attributes::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_owned();
        let value = attr.unescape_value()?.into_owned();
        out.insert(key, value);
    }
    Ok(out)
}

fn required<'a>(attrs: &'a Attributes, attribute: &'static str) -> Result<&'a str, SaveError> {
    attrs
        .get(attribute)
        .map(String::as_str)
        .ok_or(SaveError::MissingAttribute {
            element: REGION_TAG,
            attribute,
        })
}

fn invalid(attribute: &'static str, value: &str, reason: &dyn core::fmt::Display) -> SaveError {
    SaveError::InvalidValue {
        attribute,
        value: value.to_owned(),
        reason: reason.to_string(),
    }
}

/// Parse an optional attribute, treating a malformed value as absent.
fn lenient<T: core::str::FromStr>(attrs: &Attributes, attribute: &'static str) -> Option<T> {
    let raw = attrs.get(attribute)?;
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        tracing::debug!(attribute, value = %raw, "Ignoring malformed attribute");
    }
    parsed
}

fn flag(attrs: &Attributes, attribute: &'static str) -> bool {
    lenient(attrs, attribute).unwrap_or(false)
}

/// Decode a region from the attributes of its element.
fn decode(
    attrs: &Attributes,
    regions: &mut RegionMap,
    players: &dyn PlayerLookup,
) -> Result<Region, SaveError> {
    for rule in REGION_FIELDS.iter().filter(|r| r.required) {
        required(attrs, rule.field.tag())?;
    }

    let raw_id = required(attrs, ID_TAG)?;
    let id: RegionId = raw_id.parse().map_err(|e| invalid(ID_TAG, raw_id, &e))?;
    let raw_type = required(attrs, TYPE_TAG)?;
    let region_type: RegionType = raw_type.parse().map_err(|e| invalid(TYPE_TAG, raw_type, &e))?;
    let mut region = Region::new(id, region_type, required(attrs, NAME_KEY_TAG)?);

    region.set_name(attrs.get(NAME_TAG).cloned());
    region.set_claimable(flag(attrs, CLAIMABLE_TAG));
    region.set_discoverable(flag(attrs, DISCOVERABLE_TAG));
    region.set_prediscovered(flag(attrs, PREDISCOVERED_TAG));
    region.set_score_value(lenient(attrs, SCORE_VALUE_TAG).unwrap_or(0));
    region.set_discovered_in(lenient(attrs, DISCOVERED_IN_TAG).map(Turn::new));

    let discovered_by: Option<PlayerId> = lenient(attrs, DISCOVERED_BY_TAG);
    region.set_discovered_by(discovered_by.filter(|p| {
        let known = players.has_player(*p);
        if !known {
            tracing::debug!(region = %id, player = %p, "Dropping unknown discovering player");
        }
        known
    }));

    let parent: Option<RegionId> = lenient(attrs, PARENT_TAG);
    if let Some(parent) = parent {
        regions.reference(parent);
    }
    region.set_parent(parent);

    Ok(region)
}

/// Read the body of a `region` element up to its end tag, rebuilding the
/// child list from scratch.
fn read_children(
    reader: &mut Reader<&[u8]>,
    region: &mut Region,
    regions: &mut RegionMap,
) -> Result<(), SaveError> {
    let mut children = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Empty(e) if e.name().as_ref() == CHILD_TAG.as_bytes() => {
                push_child(&e, region.id(), &mut children, regions)?;
            }
            Event::Start(e) if e.name().as_ref() == CHILD_TAG.as_bytes() => {
                push_child(&e, region.id(), &mut children, regions)?;
                reader.read_to_end(e.name())?;
            }
            Event::Start(e) => {
                tracing::debug!(
                    element = %String::from_utf8_lossy(e.name().as_ref()),
                    "Skipping unknown element inside region"
                );
                reader.read_to_end(e.name())?;
            }
            Event::End(e) if e.name().as_ref() == REGION_TAG.as_bytes() => break,
            Event::Eof => return Err(SaveError::UnexpectedEof),
            _ => {}
        }
    }
    region.set_children(children);
    Ok(())
}

fn push_child(
    element: &BytesStart<'_>,
    parent: RegionId,
    children: &mut Vec<RegionId>,
    regions: &mut RegionMap,
) -> Result<(), SaveError> {
    let attrs = attributes(element)?;
    match lenient::<RegionId>(&attrs, ID_TAG) {
        Some(child) => {
            regions.reference(child);
            children.push(child);
        }
        None => tracing::warn!(region = %parent, "Skipping child element without a valid id"),
    }
    Ok(())
}

/// Read one `region` element whose start tag has just been consumed.
fn read_region_element(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    has_body: bool,
    regions: &mut RegionMap,
    players: &dyn PlayerLookup,
) -> Result<Region, SaveError> {
    let attrs = attributes(start)?;
    let mut region = decode(&attrs, regions, players)?;
    if has_body {
        read_children(reader, &mut region, regions)?;
    }
    Ok(region)
}

fn new_reader(xml: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    reader
}

fn unexpected(name: &[u8], expected: &'static str) -> SaveError {
    SaveError::UnexpectedElement {
        expected,
        found: String::from_utf8_lossy(name).into_owned(),
    }
}

/// Read a single `region` element into `regions`, replacing any region
/// with the same identifier. Returns the identifier read.
///
/// # Errors
///
/// Returns [`SaveError`] on malformed XML, a missing or invalid required
/// attribute, or a document that holds no region.
pub fn read_region(
    xml: &str,
    regions: &mut RegionMap,
    players: &dyn PlayerLookup,
) -> Result<RegionId, SaveError> {
    let mut reader = new_reader(xml);
    loop {
        let region = match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == REGION_TAG.as_bytes() => {
                read_region_element(&mut reader, &e, true, regions, players)?
            }
            Event::Empty(e) if e.name().as_ref() == REGION_TAG.as_bytes() => {
                read_region_element(&mut reader, &e, false, regions, players)?
            }
            Event::Start(e) | Event::Empty(e) => return Err(unexpected(e.name().as_ref(), REGION_TAG)),
            Event::Eof => return Err(SaveError::UnexpectedEof),
            _ => continue,
        };
        let id = region.id();
        regions.replace(region);
        return Ok(id);
    }
}

/// Read a `regions` document into a new [`RegionMap`]. References to
/// regions absent from the document are kept and logged.
///
/// # Errors
///
/// Returns [`SaveError`] on malformed XML, a missing or invalid required
/// attribute, or a region identifier that appears twice.
pub fn read_regions(xml: &str, players: &dyn PlayerLookup) -> Result<RegionMap, SaveError> {
    let mut reader = new_reader(xml);
    let mut regions = RegionMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == REGIONS_TAG.as_bytes() => break,
            Event::Empty(e) if e.name().as_ref() == REGIONS_TAG.as_bytes() => return Ok(regions),
            Event::Start(e) | Event::Empty(e) => return Err(unexpected(e.name().as_ref(), REGIONS_TAG)),
            Event::Eof => return Err(SaveError::UnexpectedEof),
            _ => {}
        }
    }

    loop {
        let region = match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == REGION_TAG.as_bytes() => {
                read_region_element(&mut reader, &e, true, &mut regions, players)?
            }
            Event::Empty(e) if e.name().as_ref() == REGION_TAG.as_bytes() => {
                read_region_element(&mut reader, &e, false, &mut regions, players)?
            }
            Event::Start(e) | Event::Empty(e) => return Err(unexpected(e.name().as_ref(), REGION_TAG)),
            Event::End(e) if e.name().as_ref() == REGIONS_TAG.as_bytes() => break,
            Event::Eof => return Err(SaveError::UnexpectedEof),
            _ => continue,
        };
        regions.insert(region)?;
    }

    for id in regions.unresolved() {
        tracing::warn!(region = %id, "Region referenced but not present in document");
    }
    tracing::debug!(count = regions.len(), "Read region document");
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use cartograph_world::PACIFIC_NAME_KEY;

    use super::*;
    use crate::writer::{region_to_string, write_regions};

    fn no_players() -> BTreeSet<PlayerId> {
        BTreeSet::new()
    }

    fn read_one(xml: &str, players: &dyn PlayerLookup) -> Option<Region> {
        let mut map = RegionMap::new();
        let id = read_region(xml, &mut map, players).ok()?;
        map.remove(id)
    }

    #[test]
    fn minimal_region_gets_defaults() {
        let id = RegionId::new();
        let xml = format!(r#"<region id="{id}" nameKey="model.region.x" type="LAND"/>"#);
        let region = read_one(&xml, &no_players());
        assert_eq!(
            region,
            Some(Region::new(id, RegionType::Land, "model.region.x"))
        );
    }

    #[test]
    fn sparse_round_trip() {
        let mut region = Region::new(RegionId::new(), RegionType::Ocean, "model.region.atlantic");
        region.set_parent(Some(RegionId::new()));
        region.set_prediscovered(true);
        let xml = region_to_string(&region).unwrap_or_default();

        for absent in ["name=", "discoveredIn=", "discoveredBy=", "scoreValue="] {
            assert!(!xml.contains(absent), "{absent} should be omitted");
        }
        for present in ["parent=", "nameKey=", "type=", "prediscovered=", "claimable=", "discoverable="] {
            assert!(xml.contains(present), "{present} should be written");
        }

        let restored = read_one(&xml, &no_players());
        assert_eq!(restored.as_ref(), Some(&region));
        assert_eq!(restored.as_ref().and_then(Region::name), None);
    }

    #[test]
    fn children_keep_order() {
        let mut region = Region::new(RegionId::new(), RegionType::Land, "model.region.north");
        let ids = vec![RegionId::new(), RegionId::new(), RegionId::new()];
        region.set_children(ids.clone());
        let xml = region_to_string(&region).unwrap_or_default();

        let mut map = RegionMap::new();
        assert!(read_region(&xml, &mut map, &no_players()).is_ok());
        assert_eq!(map.children(region.id()), ids.as_slice());
        assert_eq!(map.unresolved().count(), 3);
    }

    #[test]
    fn rewrite_is_byte_identical() {
        let player = PlayerId::new();
        let players: BTreeSet<PlayerId> = [player].into_iter().collect();
        let mut region = Region::new(RegionId::new(), RegionType::River, "model.region.river");
        region.set_name(Some("Rio & Grande".to_owned()));
        region.set_discoverable(true);
        region.set_claimable(true);
        region.set_score_value(8);
        region.set_discovered_in(Some(Turn::new(40)));
        region.set_discovered_by(Some(player));
        region.add_child(RegionId::new());

        let first = region_to_string(&region).unwrap_or_default();
        let second = read_one(&first, &players)
            .and_then(|r| region_to_string(&r).ok())
            .unwrap_or_default();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn reading_replaces_previous_children() {
        let mut region = Region::new(RegionId::new(), RegionType::Land, "model.region.west");
        region.add_child(RegionId::new());
        let mut map = RegionMap::new();
        let _ = map.insert(region.clone());

        region.set_children(Vec::new());
        let xml = region_to_string(&region).unwrap_or_default();
        assert!(read_region(&xml, &mut map, &no_players()).is_ok());
        assert!(map.get(region.id()).is_some_and(Region::is_leaf));
    }

    #[test]
    fn malformed_optionals_default() {
        let id = RegionId::new();
        let xml = format!(
            r#"<region id="{id}" nameKey="k" type="DESERT" claimable="yes" discoverable="true"
                scoreValue="-4" discoveredIn="soon" discoveredBy="nobody" parent="?"/>"#
        );
        let region = read_one(&xml, &no_players());
        assert_eq!(region.as_ref().map(Region::is_claimable), Some(false));
        assert_eq!(region.as_ref().map(Region::is_discoverable), Some(true));
        assert_eq!(region.as_ref().map(Region::score_value), Some(0));
        assert_eq!(region.as_ref().and_then(Region::discovered_in), None);
        assert_eq!(region.as_ref().and_then(Region::discovered_by), None);
        assert_eq!(region.as_ref().and_then(Region::parent), None);
    }

    #[test]
    fn unknown_player_dropped() {
        let id = RegionId::new();
        let xml = format!(
            r#"<region id="{id}" nameKey="k" type="LAKE" discoveredBy="{}"/>"#,
            PlayerId::new()
        );
        let region = read_one(&xml, &no_players());
        assert_eq!(region.and_then(|r| r.discovered_by()), None);
    }

    #[test]
    fn missing_required_attribute_fails() {
        let xml = format!(r#"<region id="{}" type="LAKE"/>"#, RegionId::new());
        let mut map = RegionMap::new();
        assert!(matches!(
            read_region(&xml, &mut map, &no_players()),
            Err(SaveError::MissingAttribute {
                attribute: "nameKey",
                ..
            })
        ));
    }

    #[test]
    fn bad_type_fails() {
        let xml = format!(r#"<region id="{}" nameKey="k" type="SWAMP"/>"#, RegionId::new());
        let mut map = RegionMap::new();
        assert!(matches!(
            read_region(&xml, &mut map, &no_players()),
            Err(SaveError::InvalidValue { attribute: "type", .. })
        ));
    }

    #[test]
    fn wrong_root_fails() {
        let mut map = RegionMap::new();
        assert!(matches!(
            read_region("<colony/>", &mut map, &no_players()),
            Err(SaveError::UnexpectedElement { .. })
        ));
        assert!(matches!(
            read_region("", &mut map, &no_players()),
            Err(SaveError::UnexpectedEof)
        ));
    }

    #[test]
    fn unknown_elements_skipped() {
        let id = RegionId::new();
        let child = RegionId::new();
        let xml = format!(
            r#"<region id="{id}" nameKey="k" type="LAND"><note><b>x</b></note><child id="{child}"/></region>"#
        );
        let mut map = RegionMap::new();
        assert!(read_region(&xml, &mut map, &no_players()).is_ok());
        assert_eq!(map.children(id), &[child]);
    }

    #[test]
    fn document_round_trip_resolves_forward_references() {
        let mut map = RegionMap::new();
        let pacific = RegionId::new();
        let north = RegionId::new();
        let south = RegionId::new();
        let _ = map.insert(Region::new(pacific, RegionType::Ocean, PACIFIC_NAME_KEY));
        let _ = map.insert(Region::new(north, RegionType::Ocean, "model.region.northPacific"));
        let _ = map.insert(Region::new(south, RegionType::Ocean, "model.region.southPacific"));
        let _ = map.attach(pacific, north);
        let _ = map.attach(pacific, south);

        let xml = write_regions(&map).unwrap_or_default();
        let restored = read_regions(&xml, &no_players());
        assert!(restored.is_ok());
        let restored = restored.unwrap_or_default();

        assert_eq!(restored.len(), 3);
        assert_eq!(restored.unresolved().count(), 0);
        assert!(restored.validate().is_ok());
        assert_eq!(restored.children(pacific), &[north, south]);
        assert!(restored.is_pacific(south));
        assert_eq!(write_regions(&restored).unwrap_or_default(), xml);
    }

    #[test]
    fn document_keeps_dangling_references() {
        let mut region = Region::new(RegionId::new(), RegionType::Land, "model.region.orphan");
        let missing = RegionId::new();
        region.set_parent(Some(missing));
        let mut map = RegionMap::new();
        let _ = map.insert(region);

        let xml = write_regions(&map).unwrap_or_default();
        let restored = read_regions(&xml, &no_players()).unwrap_or_default();
        assert_eq!(restored.unresolved().collect::<Vec<_>>(), vec![missing]);
    }

    #[test]
    fn duplicate_region_in_document_fails() {
        let region = Region::new(RegionId::new(), RegionType::Land, "model.region.twice");
        let one = region_to_string(&region).unwrap_or_default();
        let xml = format!("<regions>{one}{one}</regions>");
        assert!(matches!(
            read_regions(&xml, &no_players()),
            Err(SaveError::World(_))
        ));
    }

    #[test]
    fn empty_document_root() {
        let map = read_regions("<regions/>", &no_players());
        assert!(map.is_ok_and(|m| m.is_empty()));
    }
}
