//! End-to-end tests for a game session: configuration, discovery through
//! the region hierarchy, history messages and save documents.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::items_after_statements,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::indexing_slicing
)]

use cartograph_core::{Game, GameConfig, GameError};
use cartograph_types::{
    Label, MessageCatalog, Player, PlayerId, RegionId, RegionType, Turn, Unit, UnitId,
};
use cartograph_world::{DiscoveryState, PACIFIC_NAME_KEY, Region};

/// A three-level hierarchy: a prediscovered root, the Pacific below it and
/// one ocean region inside the Pacific.
struct World {
    game: Game,
    player: PlayerId,
    unit: UnitId,
    root: RegionId,
    pacific: RegionId,
    inner: RegionId,
}

fn world(yaml: &str) -> World {
    let config = GameConfig::parse(yaml).expect("valid config");
    let mut game = Game::from_config(&config);
    let player = game.add_player(Player::new(Label::key("model.nation.dutch.name")));
    let unit = game.add_unit(Unit::new(player)).expect("owner registered");

    let mut root = Region::new(RegionId::new(), RegionType::Ocean, "model.region.ocean");
    root.set_prediscovered(true);
    let mut pacific = Region::new(RegionId::new(), RegionType::Ocean, PACIFIC_NAME_KEY);
    pacific.set_discoverable(true);
    pacific.set_score_value(25);
    let mut inner = Region::new(RegionId::new(), RegionType::Ocean, "model.region.northPacific");
    inner.set_discoverable(true);
    inner.set_score_value(4);

    let (root_id, pacific_id, inner_id) = (root.id(), pacific.id(), inner.id());
    let regions = game.regions_mut();
    regions.insert(root).unwrap();
    regions.insert(pacific).unwrap();
    regions.insert(inner).unwrap();
    regions.attach(root_id, pacific_id).unwrap();
    regions.attach(pacific_id, inner_id).unwrap();

    for _ in 0..5 {
        game.advance_turn();
    }

    World {
        game,
        player,
        unit,
        root: root_id,
        pacific: pacific_id,
        inner: inner_id,
    }
}

#[test]
fn pacific_discovery_keeps_canonical_name() {
    let mut w = world("");
    let event = w
        .game
        .discover_region(w.unit, w.pacific, "New Name")
        .unwrap()
        .unwrap();

    let pacific = w.game.regions().get(w.pacific).unwrap();
    assert_eq!(pacific.name(), None);
    assert!(!pacific.is_discoverable());
    assert_eq!(pacific.discovered_by(), Some(w.player));
    assert_eq!(pacific.discovered_in(), Some(Turn::new(5)));
    assert_eq!(pacific.discovery_state(), DiscoveryState::Discovered);

    let inner = w.game.regions().get(w.inner).unwrap();
    assert!(!inner.is_discoverable());
    assert_eq!(inner.discovered_by(), None);

    assert_eq!(event.score, 25);
    assert_eq!(event.turn, Turn::new(5));
    assert_eq!(w.game.score(w.player), 25);
    assert_eq!(
        w.game.regions().label(w.pacific),
        Some(Label::key(PACIFIC_NAME_KEY))
    );
}

#[test]
fn scoring_follows_config() {
    let mut w = world("options:\n  exploration_points: false\n");
    let event = w
        .game
        .discover_region(w.unit, w.pacific, "New Name")
        .unwrap()
        .unwrap();
    assert_eq!(event.score, 0);
}

#[test]
fn second_entry_finds_nothing() {
    let mut w = world("");
    w.game
        .discover_region(w.unit, w.pacific, "New Name")
        .unwrap();

    // The inner region lost its discoverable flag in the cascade and the
    // Pacific is already discovered; the root was never discoverable.
    let again = w.game.discover_region(w.unit, w.inner, "Other").unwrap();
    assert!(again.is_none());
    assert_eq!(w.game.history().len(), 1);
    assert_eq!(
        w.game.regions().get(w.root).unwrap().discovery_state(),
        DiscoveryState::Prediscovered
    );
}

#[test]
fn history_message_names_nation_and_region() {
    let mut w = world("");
    let event = w
        .game
        .discover_region(w.unit, w.pacific, "Mare Pacificum")
        .unwrap()
        .unwrap();

    let catalog: MessageCatalog = [
        ("model.nation.dutch.name", "Dutch"),
        (
            "model.history.DISCOVER_REGION",
            "The %nation% discover the %region%.",
        ),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        event.describe(&catalog),
        "The Dutch discover the Mare Pacificum."
    );
}

#[test]
fn save_and_load_preserves_discovery() {
    let mut w = world("");
    w.game
        .discover_region(w.unit, w.pacific, "New Name")
        .unwrap();

    let xml = w.game.save_regions().unwrap();
    assert!(xml.contains(&format!(r#"discoveredBy="{}""#, w.player)));
    assert!(xml.contains(r#"discoveredIn="5""#));

    let before = w.game.regions().clone();
    w.game.load_regions(&xml).unwrap();

    let pacific = w.game.regions().get(w.pacific).unwrap();
    assert_eq!(pacific.discovered_by(), Some(w.player));
    assert_eq!(pacific.children(), &[w.inner]);
    assert_eq!(w.game.regions().len(), before.len());
    assert!(w.game.regions().validate().is_ok());
    assert_eq!(w.game.save_regions().unwrap(), xml);
}

#[test]
fn load_drops_unknown_discoverer() {
    let mut w = world("");
    w.game
        .discover_region(w.unit, w.pacific, "New Name")
        .unwrap();
    let xml = w.game.save_regions().unwrap();

    // A fresh session without the discovering player.
    let mut other = Game::default();
    other.load_regions(&xml).unwrap();
    let pacific = other.regions().get(w.pacific).unwrap();
    assert_eq!(pacific.discovered_by(), None);
    assert_eq!(pacific.discovered_in(), Some(Turn::new(5)));
}

#[test]
fn malformed_document_is_rejected() {
    let mut game = Game::default();
    let result = game.load_regions(r#"<regions><region id="r1"/></regions>"#);
    assert!(matches!(result, Err(GameError::Save(_))));
}
