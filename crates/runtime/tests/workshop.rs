//! End-to-end workshop flows over the in-memory repository.

use std::sync::Arc;

use async_trait::async_trait;
use forge_core::ability::{DamageKind, DefenseKind, DieIndex, DieType, EgoBenefit};
use forge_core::catalog::{BaseId, ModuleId, ModuleRank, PassiveId};
use forge_core::character::{Character, CharacterId};
use forge_core::progression::{AdvanceGate, BlockReason, ProgressionError};
use forge_core::stats::{CoreStats, StatName};
use forge_runtime::{
    CharacterRepository, MemoryCharacterRepository, RuntimeError, StorageError, Workshop,
};

const SLASH: DieType = DieType::Damage(DamageKind::Slash);
const BLOCK: DieType = DieType::Defense(DefenseKind::Block);

fn stats_with_intellect(intellect: i32) -> CoreStats {
    let mut stats = CoreStats::default();
    stats.intellect = intellect;
    stats
}

/// Builds the Burning Blade skill from the standard catalog: innate quota
/// exactly 3 rank-1 + 1 rank-2, zero spares.
fn build_burning_blade(
    workshop: &mut Workshop<MemoryCharacterRepository>,
    id: &CharacterId,
) -> String {
    workshop.begin_skill(id).unwrap();
    workshop
        .select_base(id, &BaseId::new("triple_threat"))
        .unwrap();
    workshop.configure_die_type(id, DieIndex(0), SLASH).unwrap();
    workshop.configure_die_type(id, DieIndex(1), BLOCK).unwrap();
    workshop.configure_die_type(id, DieIndex(2), SLASH).unwrap();
    workshop.add_innate_modules(id).unwrap();
    for (module, rank, die) in [
        ("stronger", ModuleRank::One, 1),
        ("burn", ModuleRank::One, 0),
        ("stronger", ModuleRank::One, 0),
        ("bigger", ModuleRank::Two, 2),
    ] {
        workshop
            .add_module(id, &ModuleId::new(module), rank, Some(DieIndex(die)), false, None)
            .unwrap();
    }
    workshop.finalize_build(id, Some("Burning Blade")).unwrap()
}

fn build_base_ego(workshop: &mut Workshop<MemoryCharacterRepository>, id: &CharacterId) {
    workshop.begin_base_ego(id).unwrap();
    workshop.select_base(id, &BaseId::new("twin_fang")).unwrap();
    for (module, rank, die) in [
        ("burn", ModuleRank::One, Some(0)),
        ("stronger", ModuleRank::One, Some(0)),
        ("stronger", ModuleRank::One, Some(1)),
        ("bigger", ModuleRank::Two, Some(1)),
        ("overflow", ModuleRank::Three, None),
    ] {
        workshop
            .add_module(
                id,
                &ModuleId::new(module),
                rank,
                die.map(|die| DieIndex(die)),
                false,
                None,
            )
            .unwrap();
    }
    workshop.choose_benefit(id, EgoBenefit::PowerSurge).unwrap();
    workshop
        .select_passive(id, &PassiveId::new("ember"), None)
        .unwrap();
    workshop.finalize_build(id, Some("Unbroken Oath")).unwrap();
}

#[tokio::test]
async fn skill_build_round_trips_through_storage() {
    let repository = Arc::new(MemoryCharacterRepository::new());
    let mut workshop = Workshop::new(Arc::clone(&repository));
    let id = workshop.create_character("Ezra", stats_with_intellect(3));

    // Intellect 3, no finalized skills: three rank-1 spares available.
    assert_eq!(workshop.available_modules(&id).unwrap().rank1, 3);

    let description = build_burning_blade(&mut workshop, &id);
    assert!(description.starts_with("Burning Blade (2 Light)"));
    assert!(description.contains("[Block] d6+1"));
    assert_eq!(description.matches("Inflict 2 Burn").count(), 1);

    // The innate quota consumed nothing from the pool.
    assert_eq!(workshop.available_modules(&id).unwrap().rank1, 3);
    assert_eq!(workshop.character(&id).unwrap().skills.len(), 1);

    assert_eq!(workshop.ability_slots(&id).unwrap(), 3);

    // The record is a plain serializable value and survives storage intact.
    workshop.save_now(&id).await.unwrap();
    let stored: Character = repository.load(&id).await.unwrap().expect("record saved");
    assert_eq!(&stored, workshop.character(&id).unwrap());

    // A second workshop over the same store sees the same character.
    let mut other = Workshop::new(Arc::clone(&repository));
    assert!(other.load_character(&id).await.unwrap());
    assert_eq!(other.character(&id).unwrap(), workshop.character(&id).unwrap());

    other.delete_character(&id).await.unwrap();
    assert!(!other.load_character(&id).await.unwrap());
}

#[tokio::test]
async fn progression_gates_on_the_base_ego() {
    let repository = Arc::new(MemoryCharacterRepository::new());
    let mut workshop = Workshop::new(Arc::clone(&repository));
    let id = workshop.create_character("Noor", stats_with_intellect(3));

    workshop.advance_level(&id, Some(4)).unwrap();
    assert!(matches!(
        workshop.can_advance(&id).unwrap(),
        AdvanceGate::Blocked(BlockReason::PendingLevelUps { count: 3 })
    ));
    for level in 2..=4 {
        workshop.apply_level_benefits(&id, level).unwrap();
    }

    // Levels 2, 3, and 4 each granted a stat token.
    assert!(matches!(
        workshop.can_advance(&id).unwrap(),
        AdvanceGate::Blocked(BlockReason::UnresolvedStatTokens { count: 3 })
    ));
    workshop.apply_stat_increase(&id, "might", 0).unwrap();
    workshop.apply_stat_increase(&id, "vitality", 0).unwrap();
    workshop.apply_stat_increase(&id, "persona", 0).unwrap();

    // Everything resolved except the level-4 Base E.G.O. demand.
    assert!(matches!(
        workshop.can_advance(&id).unwrap(),
        AdvanceGate::Blocked(BlockReason::BaseEgoMissing)
    ));
    assert!(matches!(
        workshop.advance_level(&id, None),
        Err(RuntimeError::Progression(ProgressionError::Blocked { .. }))
    ));

    build_base_ego(&mut workshop, &id);
    assert!(workshop.can_advance(&id).unwrap().is_clear());
    workshop.advance_level(&id, Some(5)).unwrap();

    let character = workshop.character(&id).unwrap();
    assert!(character.ego.has_base());
    assert_eq!(character.stats.level, 5);
    assert_eq!(character.stats.get(StatName::Might), 3);
}

#[tokio::test]
async fn unknown_stat_names_are_rejected_at_the_boundary() {
    let repository = Arc::new(MemoryCharacterRepository::new());
    let mut workshop = Workshop::new(repository);
    let id = workshop.create_character("Vesper", CoreStats::default());
    workshop.advance_level(&id, Some(2)).unwrap();
    workshop.apply_level_benefits(&id, 2).unwrap();
    assert!(matches!(
        workshop.apply_stat_increase(&id, "luck", 0),
        Err(RuntimeError::Progression(ProgressionError::InvalidStat { .. }))
    ));
}

#[tokio::test]
async fn cancelling_a_session_discards_the_draft() {
    let repository = Arc::new(MemoryCharacterRepository::new());
    let mut workshop = Workshop::new(repository);
    let id = workshop.create_character("Juno", stats_with_intellect(3));

    workshop.begin_skill(&id).unwrap();
    workshop
        .select_base(&id, &BaseId::new("triple_threat"))
        .unwrap();
    assert!(matches!(
        workshop.begin_skill(&id),
        Err(RuntimeError::SessionAlreadyActive { .. })
    ));

    let preview = workshop.describe_draft(&id).unwrap();
    assert!(preview.starts_with("Triple Threat (2 Light)"));

    workshop.cancel_build(&id);
    assert!(matches!(
        workshop.describe_draft(&id),
        Err(RuntimeError::NoActiveSession { .. })
    ));
    assert!(workshop.character(&id).unwrap().skills.is_empty());
    workshop.begin_skill(&id).unwrap();
}

/// A repository whose saves always fail.
struct BrokenRepository;

#[async_trait]
impl CharacterRepository for BrokenRepository {
    async fn load(&self, _id: &CharacterId) -> Result<Option<Character>, StorageError> {
        Ok(None)
    }

    async fn save(&self, _character: &Character) -> Result<(), StorageError> {
        Err(StorageError("disk on fire".into()))
    }

    async fn delete(&self, _id: &CharacterId) -> Result<(), StorageError> {
        Ok(())
    }
}

#[tokio::test]
async fn storage_failures_never_block_the_engine() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("forge_runtime=debug")
        .try_init();
    let mut workshop = Workshop::new(Arc::new(BrokenRepository));
    let id = workshop.create_character("Mara", stats_with_intellect(3));

    // Mutations keep working; the failed background saves only warn.
    workshop.advance_level(&id, Some(2)).unwrap();
    workshop.apply_level_benefits(&id, 2).unwrap();
    tokio::task::yield_now().await;
    assert_eq!(workshop.character(&id).unwrap().stats.level, 2);

    // The synchronous path surfaces the failure to the caller.
    assert!(matches!(
        workshop.save_now(&id).await,
        Err(RuntimeError::Storage(_))
    ));
}
