//! Save store integration tests
//!
//! Round-trips characters that have actually played through battles and the
//! store, and checks slot bookkeeping across several saves.

use druids::battle::award_victory;
use druids::character::{Character, CharacterClass, CharacterSnapshot, SaveError, SaveManager};
use druids::items::{find_store_item, EquipmentSlot};
use druids::store::purchase;
use druids::zones::Location;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use tempfile::TempDir;

fn seasoned_wizard() -> Character {
    let mut rng = ChaCha8Rng::seed_from_u64(19);
    let mut wizard = Character::new(CharacterClass::Wizard, "Merla the Wise");
    for location in [Location::Arena, Location::Arena, Location::Maze] {
        award_victory(&mut wizard, location, &mut rng);
    }
    let staff = find_store_item("Steel Blade").expect("catalog item");
    assert!(purchase(&mut wizard, &staff).success);
    let potion = find_store_item("Health Potion").expect("catalog item");
    assert!(purchase(&mut wizard, &potion).success);
    wizard.take_damage(17);
    wizard.mana = 42;
    wizard
}

#[test]
fn test_played_character_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    let manager = SaveManager::with_dir(dir.path()).unwrap();
    let wizard = seasoned_wizard();

    let key = manager.save(&wizard, Some(wizard.name.as_str())).unwrap();
    assert_eq!(key, "battle_druids_merla_the_wise");

    let loaded = manager.load(&key).unwrap();
    assert_eq!(loaded, wizard);
    assert_eq!(loaded.progression.victories_at("Arena"), 2);
    assert_eq!(
        loaded
            .equipped_item(EquipmentSlot::Weapon)
            .map(|item| item.name.as_str()),
        Some("Steel Blade")
    );
    assert_eq!(loaded.max_health, 110);
}

#[test]
fn test_key_value_map_round_trip() {
    let wizard = seasoned_wizard();
    let map = wizard.to_snapshot().to_key_values().unwrap();
    assert!(map.contains_key("progression"));
    assert!(map.contains_key("equipment"));

    let snapshot = CharacterSnapshot::from_key_values(&map).unwrap();
    assert_eq!(Character::from_snapshot(snapshot).unwrap(), wizard);
}

#[test]
fn test_slots_listing_and_deletion() {
    let dir = TempDir::new().unwrap();
    let manager = SaveManager::with_dir(dir.path()).unwrap();

    let wizard = seasoned_wizard();
    let knight = Character::new(CharacterClass::Knight, "Aldric");
    manager.save(&wizard, Some("first")).unwrap();
    manager.quick_save(&knight).unwrap();
    let auto_key = manager.auto_save(&knight).unwrap();

    let saves = manager.list_saves().unwrap();
    assert_eq!(saves.len(), 3);
    assert!(saves.iter().all(|s| !s.is_corrupted));
    assert_eq!(saves.iter().filter(|s| s.is_quick_save).count(), 1);
    assert_eq!(saves.iter().filter(|s| s.is_auto_save).count(), 1);

    let first = saves.iter().find(|s| s.key == "battle_druids_first").unwrap();
    assert_eq!(first.level, 4);
    assert_eq!(first.class_name, "Wizard");

    manager.delete(&auto_key).unwrap();
    assert_eq!(manager.list_saves().unwrap().len(), 2);
    assert!(matches!(manager.load(&auto_key), Err(SaveError::NotFound(_))));
}

#[test]
fn test_hand_edited_save_is_rejected() {
    let dir = TempDir::new().unwrap();
    let manager = SaveManager::with_dir(dir.path()).unwrap();
    let key = manager.quick_save(&seasoned_wizard()).unwrap();

    let path = dir.path().join(format!("{}.json", key));
    let mut envelope: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    envelope["character"]["progression"]["dragon_shards"] = serde_json::json!(9_999);
    fs::write(&path, envelope.to_string()).unwrap();

    assert!(matches!(
        manager.load_quick_save(),
        Err(SaveError::ChecksumMismatch(_))
    ));
}

#[test]
fn test_export_and_import_between_directories() {
    let home = TempDir::new().unwrap();
    let manager = SaveManager::with_dir(home.path()).unwrap();
    let wizard = seasoned_wizard();
    let knight = Character::new(CharacterClass::Knight, "Aldric");
    manager.save(&wizard, Some("campaign")).unwrap();
    manager.quick_save(&knight).unwrap();
    fs::write(home.path().join("battle_druids_broken.json"), "{ not json").unwrap();

    let backup = manager.export_saves().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&backup).unwrap();
    assert_eq!(parsed["version"], "1.0.0");
    assert!(parsed["exportDate"].is_string());
    assert_eq!(parsed["saves"].as_array().unwrap().len(), 2);

    assert_eq!(manager.clear_all().unwrap(), 3);
    assert!(manager.list_saves().unwrap().is_empty());

    let elsewhere = TempDir::new().unwrap();
    let restored = SaveManager::with_dir(elsewhere.path()).unwrap();
    assert_eq!(restored.import_saves(&backup).unwrap(), 2);
    assert_eq!(restored.load("campaign").unwrap(), wizard);
    assert_eq!(restored.load_quick_save().unwrap(), knight);
    assert!(restored.list_saves().unwrap().iter().all(|s| !s.is_corrupted));
}
