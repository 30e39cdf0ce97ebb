//! The content shipped with the simulator must load cleanly.

use std::path::PathBuf;

use combat_content::ContentFactory;
use combat_core::{Role, SkillScope};

fn factory() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("content"))
}

#[test]
fn templates_resolve_against_the_catalog() {
    let factory = factory();
    let config = factory.load_config().unwrap();
    assert_eq!(config.spawn_global_aggro, 0);

    let skills = factory.load_skills().unwrap();
    let templates = factory.load_templates(&skills).unwrap();
    assert_eq!(templates["ogre_warlord"].role, Role::RaidBoss);
    assert!(templates["bomb_imp"].skills.has(SkillScope::Suicide));
    assert!(templates["orc_shaman"].skills.has(SkillScope::Immobilize));
}

#[test]
fn every_scenario_references_known_templates() {
    let factory = factory();
    let skills = factory.load_skills().unwrap();
    let templates = factory.load_templates(&skills).unwrap();

    for (name, duration_ms) in [("ambush", 20_000), ("raid", 25_000)] {
        let scenario = factory.load_scenario(name).unwrap();
        assert_eq!(scenario.duration_ms, Some(duration_ms), "{name}");
        assert!(!scenario.script.is_empty(), "{name} has no script");
        for npc in &scenario.npcs {
            assert!(
                templates.contains_key(&npc.template),
                "{name}: unknown template {}",
                npc.template
            );
        }
    }
}
