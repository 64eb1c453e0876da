//! Content core for the portfolio site.
//! Owns storage, ordering rules and admin use-cases for every content kind.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod snapshot;

pub use config::{CmsConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::character::{Character, CharacterDraft};
pub use model::experience::{Experience, ExperienceDraft};
pub use model::ordering::{
    assignments_from_sequence, plan_move, Collection, OrderAssignment, Orderable, OrderingError,
    RecordId, DEFAULT_ORDER,
};
pub use model::project::{Project, ProjectDraft, FEATURED_PROJECT_LIMIT};
pub use model::skill::{Skill, SkillDraft, SkillListQuery, CORE_SKILL_CATEGORIES};
pub use model::ValidationError;
pub use repo::character_repo::{CharacterRepository, SqliteCharacterRepository};
pub use repo::experience_repo::SqliteExperienceRepository;
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::skill_repo::{SkillRepository, SqliteSkillRepository};
pub use repo::{OrderedRepository, RepoError, RepoResult};
pub use seed::{seed_defaults, SeedSummary};
pub use service::character_service::CharacterService;
pub use service::collection_service::{
    CollectionService, ExperienceService, ProjectService, SkillService,
};
pub use service::{ContentError, ContentResult};
pub use snapshot::{export_snapshot, import_snapshot, Snapshot, SnapshotError};

