//! The workshop service: characters, sessions, and persistence wiring.
//!
//! All rules run synchronously in forge-core; the workshop owns the
//! in-memory characters, routes user intents into the progression engine and
//! build sessions, and hands each new snapshot to the repository
//! fire-and-forget. The in-memory state is authoritative; a failed save is
//! logged and the last writer wins. The service is expected to live inside a
//! tokio runtime.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use forge_core::ability::{DieIndex, DieType, EgoBenefit};
use forge_core::build::{AddModuleOutcome, BuildDraft, BuildSession, FinalizedAbility};
use forge_core::catalog::{BaseId, ModuleId, ModuleRank, PassiveId};
use forge_core::character::{Character, CharacterId, ImprovementId, ImprovementKind};
use forge_core::pool::{ModuleCounts, ResourcePool};
use forge_core::progression::{
    AdvanceGate, ImprovementDetails, LevelTable, ProgressionEngine, parse_stat,
};
use forge_core::render;
use forge_core::stats::CoreStats;
use forge_content::{StandardCatalog, standard_level_table};

use crate::error::{Result, RuntimeError};
use crate::repository::CharacterRepository;

/// Owns characters and their build sessions; one per player process.
pub struct Workshop<R: CharacterRepository + 'static> {
    repository: Arc<R>,
    catalog: StandardCatalog,
    level_table: LevelTable,
    characters: HashMap<CharacterId, Character>,
    sessions: HashMap<CharacterId, BuildSession>,
    next_id: u64,
}

impl<R: CharacterRepository + 'static> Workshop<R> {
    /// Workshop over the built-in catalog and level table.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_catalog(repository, StandardCatalog::standard(), standard_level_table())
    }

    /// Workshop over injected reference data (e.g. a loaded expansion pack).
    pub fn with_catalog(
        repository: Arc<R>,
        catalog: StandardCatalog,
        level_table: LevelTable,
    ) -> Self {
        Self {
            repository,
            catalog,
            level_table,
            characters: HashMap::new(),
            sessions: HashMap::new(),
            next_id: 0,
        }
    }

    // ========================================================================
    // Characters
    // ========================================================================

    /// Create a fresh character and schedule its first save.
    pub fn create_character(&mut self, name: &str, stats: CoreStats) -> CharacterId {
        self.next_id += 1;
        let id = CharacterId::new(format!("fixer-{}", self.next_id));
        let character = Character::new(id.clone(), name, stats);
        self.spawn_save(character.clone());
        self.characters.insert(id.clone(), character);
        debug!(%id, %name, "character created");
        id
    }

    pub fn character(&self, id: &CharacterId) -> Result<&Character> {
        self.characters
            .get(id)
            .ok_or_else(|| RuntimeError::CharacterNotFound { id: id.clone() })
    }

    /// Pull a character from storage into the workshop.
    ///
    /// Returns false when no record exists.
    pub async fn load_character(&mut self, id: &CharacterId) -> Result<bool> {
        match self.repository.load(id).await? {
            Some(character) => {
                self.characters.insert(id.clone(), character);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Synchronous save for shutdown paths and tests; regular mutation uses
    /// the fire-and-forget path.
    pub async fn save_now(&self, id: &CharacterId) -> Result<()> {
        let character = self.character(id)?;
        self.repository.save(character).await?;
        Ok(())
    }

    /// Remove a character from the workshop and from storage.
    pub async fn delete_character(&mut self, id: &CharacterId) -> Result<()> {
        self.repository.delete(id).await?;
        self.characters.remove(id);
        self.sessions.remove(id);
        info!(%id, "character deleted");
        Ok(())
    }

    // ========================================================================
    // Progression
    // ========================================================================

    pub fn can_advance(&self, id: &CharacterId) -> Result<AdvanceGate> {
        let engine = ProgressionEngine::new(&self.level_table);
        Ok(engine.can_advance(self.character(id)?))
    }

    pub fn advance_level(&mut self, id: &CharacterId, target: Option<u8>) -> Result<()> {
        let engine = ProgressionEngine::new(&self.level_table);
        let character = self
            .characters
            .get_mut(id)
            .ok_or_else(|| RuntimeError::CharacterNotFound { id: id.clone() })?;
        engine.advance_level(character, target)?;
        let snapshot = character.clone();
        debug!(%id, level = snapshot.stats.level, "level advanced");
        self.spawn_save(snapshot);
        Ok(())
    }

    pub fn apply_level_benefits(&mut self, id: &CharacterId, level: u8) -> Result<()> {
        let engine = ProgressionEngine::new(&self.level_table);
        let character = self
            .characters
            .get_mut(id)
            .ok_or_else(|| RuntimeError::CharacterNotFound { id: id.clone() })?;
        engine.apply_level_benefits(character, level)?;
        let snapshot = character.clone();
        self.spawn_save(snapshot);
        Ok(())
    }

    /// Spend a stat-increase token. The stat arrives as player input and is
    /// parsed here; unknown names fail with `InvalidStat`.
    pub fn apply_stat_increase(&mut self, id: &CharacterId, stat: &str, token: usize) -> Result<()> {
        let stat = parse_stat(stat)?;
        let engine = ProgressionEngine::new(&self.level_table);
        let character = self
            .characters
            .get_mut(id)
            .ok_or_else(|| RuntimeError::CharacterNotFound { id: id.clone() })?;
        engine.apply_stat_increase(character, stat, token)?;
        let snapshot = character.clone();
        self.spawn_save(snapshot);
        Ok(())
    }

    pub fn apply_improvement(
        &mut self,
        id: &CharacterId,
        kind: ImprovementKind,
        improvement: &ImprovementId,
        details: Option<ImprovementDetails>,
    ) -> Result<()> {
        let engine = ProgressionEngine::new(&self.level_table);
        let character = self
            .characters
            .get_mut(id)
            .ok_or_else(|| RuntimeError::CharacterNotFound { id: id.clone() })?;
        engine.apply_improvement(character, kind, improvement, details)?;
        let snapshot = character.clone();
        self.spawn_save(snapshot);
        Ok(())
    }

    // ========================================================================
    // Resource queries
    // ========================================================================

    pub fn available_modules(&self, id: &CharacterId) -> Result<ModuleCounts> {
        Ok(ResourcePool::available_modules(self.character(id)?))
    }

    pub fn ability_slots(&self, id: &CharacterId) -> Result<u32> {
        Ok(ResourcePool::ability_slots(self.character(id)?))
    }

    // ========================================================================
    // Build sessions
    // ========================================================================

    /// Open a skill build session for a character.
    pub fn begin_skill(&mut self, id: &CharacterId) -> Result<()> {
        if self.sessions.contains_key(id) {
            return Err(RuntimeError::SessionAlreadyActive { id: id.clone() });
        }
        let character = self.character(id)?;
        let slots = ResourcePool::ability_slots(character);
        if character.skills.len() as u32 >= slots {
            return Err(RuntimeError::NoFreeSlot { slots });
        }
        let budget = ResourcePool::available_modules(character);
        self.sessions.insert(id.clone(), BuildSession::new_skill(budget));
        debug!(%id, "skill build session opened");
        Ok(())
    }

    /// Open the Base E.G.O. build session for a character.
    pub fn begin_base_ego(&mut self, id: &CharacterId) -> Result<()> {
        if self.sessions.contains_key(id) {
            return Err(RuntimeError::SessionAlreadyActive { id: id.clone() });
        }
        let character = self.character(id)?;
        if character.ego.has_base() {
            return Err(RuntimeError::BaseEgoExists);
        }
        self.sessions.insert(id.clone(), BuildSession::new_base_ego());
        debug!(%id, "Base E.G.O. build session opened");
        Ok(())
    }

    /// Discard the active draft. Persisted state is untouched.
    pub fn cancel_build(&mut self, id: &CharacterId) {
        if self.sessions.remove(id).is_some() {
            debug!(%id, "build session cancelled");
        }
    }

    /// Read-only draft snapshot for presentation.
    pub fn draft(&self, id: &CharacterId) -> Result<&BuildDraft> {
        Ok(self.session(id)?.draft())
    }

    /// Current display text for the in-progress draft.
    pub fn describe_draft(&self, id: &CharacterId) -> Result<String> {
        Ok(render::describe_draft(self.session(id)?.draft()))
    }

    pub fn select_base(&mut self, id: &CharacterId, base: &BaseId) -> Result<()> {
        let source = self.catalog.as_source();
        let session = Self::session_mut(&mut self.sessions, id)?;
        session.select_base(&source, base)?;
        Ok(())
    }

    pub fn configure_die_type(
        &mut self,
        id: &CharacterId,
        die: DieIndex,
        choice: DieType,
    ) -> Result<()> {
        let session = Self::session_mut(&mut self.sessions, id)?;
        session.configure_die_type(die, choice)?;
        Ok(())
    }

    pub fn add_innate_modules(&mut self, id: &CharacterId) -> Result<()> {
        let session = Self::session_mut(&mut self.sessions, id)?;
        session.add_innate_modules()?;
        Ok(())
    }

    pub fn add_module(
        &mut self,
        id: &CharacterId,
        module: &ModuleId,
        rank: ModuleRank,
        target: Option<DieIndex>,
        as_spare: bool,
        option: Option<&str>,
    ) -> Result<AddModuleOutcome> {
        let source = self.catalog.as_source();
        let session = Self::session_mut(&mut self.sessions, id)?;
        Ok(session.add_module(&source, module, rank, target, as_spare, option)?)
    }

    pub fn remove_module(&mut self, id: &CharacterId, index: usize) -> Result<()> {
        let session = Self::session_mut(&mut self.sessions, id)?;
        session.remove_module(index)?;
        Ok(())
    }

    pub fn choose_benefit(&mut self, id: &CharacterId, benefit: EgoBenefit) -> Result<()> {
        let session = Self::session_mut(&mut self.sessions, id)?;
        session.choose_benefit(benefit)?;
        Ok(())
    }

    pub fn select_passive(
        &mut self,
        id: &CharacterId,
        passive: &PassiveId,
        choice: Option<&str>,
    ) -> Result<()> {
        let source = self.catalog.as_source();
        let session = Self::session_mut(&mut self.sessions, id)?;
        session.select_passive(&source, passive, choice)?;
        Ok(())
    }

    /// Finalize the active session, merge the artifact into the character,
    /// and schedule a save. Returns the baked description.
    pub fn finalize_build(&mut self, id: &CharacterId, name: Option<&str>) -> Result<String> {
        let session = Self::session_mut(&mut self.sessions, id)?;
        let artifact = session.finalize(name)?;
        // The session is consumed-and-destroyed on success.
        self.sessions.remove(id);

        let character = self
            .characters
            .get_mut(id)
            .ok_or_else(|| RuntimeError::CharacterNotFound { id: id.clone() })?;
        let description = match artifact {
            FinalizedAbility::Skill(skill) => {
                let description = skill.description.clone();
                info!(%id, name = %skill.name, "skill finalized");
                character.add_skill(skill);
                description
            }
            FinalizedAbility::Ego(ego) => {
                let description = ego.description.clone();
                info!(%id, name = %ego.name, "Base E.G.O. finalized");
                character.set_base_ego(ego);
                description
            }
        };
        let snapshot = character.clone();
        self.spawn_save(snapshot);
        Ok(description)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn session(&self, id: &CharacterId) -> Result<&BuildSession> {
        self.sessions
            .get(id)
            .ok_or_else(|| RuntimeError::NoActiveSession { id: id.clone() })
    }

    fn session_mut<'s>(
        sessions: &'s mut HashMap<CharacterId, BuildSession>,
        id: &CharacterId,
    ) -> Result<&'s mut BuildSession> {
        sessions
            .get_mut(id)
            .ok_or_else(|| RuntimeError::NoActiveSession { id: id.clone() })
    }

    /// Hand a snapshot to the repository without waiting on it.
    fn spawn_save(&self, character: Character) {
        let repository = Arc::clone(&self.repository);
        tokio::spawn(async move {
            let id = character.id.clone();
            if let Err(error) = repository.save(&character).await {
                warn!(%id, %error, "background save failed; in-memory state stays authoritative");
            }
        });
    }
}
