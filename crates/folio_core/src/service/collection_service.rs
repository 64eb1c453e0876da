//! Ordered collection use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/reorder/list for any orderable collection.
//! - Reject malformed reorder requests before they reach storage.
//! - Run the drag-and-drop splice server-side (`move_record`).
//!
//! # Invariants
//! - A reorder either persists every assignment or none of them.
//! - Deletion never renumbers the remaining records.
//! - Concurrent reorders are last-committed-wins; `order` is not unique.

use crate::model::ordering::{
    assignments_from_sequence, plan_move, validate_assignments, Collection, OrderAssignment,
    Orderable, RecordId,
};
use crate::model::project::Project;
use crate::model::skill::{Skill, SkillListQuery};
use crate::repo::experience_repo::SqliteExperienceRepository;
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::skill_repo::{SkillRepository, SqliteSkillRepository};
use crate::repo::OrderedRepository;
use crate::service::{ContentError, ContentResult};
use log::{info, warn};

/// Experience timeline service over SQLite.
pub type ExperienceService<'conn> = CollectionService<SqliteExperienceRepository<'conn>>;
/// Skill/certification service over SQLite.
pub type SkillService<'conn> = CollectionService<SqliteSkillRepository<'conn>>;
/// Project showcase service over SQLite.
pub type ProjectService<'conn> = CollectionService<SqliteProjectRepository<'conn>>;

/// Use-case facade for one ordered collection.
pub struct CollectionService<R: OrderedRepository> {
    repo: R,
}

impl<R: OrderedRepository> CollectionService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn collection(&self) -> Collection {
        self.repo.collection()
    }

    /// Creates one record. `order` defaults to 0; no uniqueness check.
    pub fn create(&self, draft: &R::Draft) -> ContentResult<R::Record> {
        let record = self.repo.create(draft)?;
        info!(
            "event=record_create module=service status=ok collection={} id={} order={}",
            self.collection(),
            record.id(),
            record.order()
        );
        Ok(record)
    }

    /// Replaces payload fields of one record.
    pub fn update(&self, id: RecordId, draft: &R::Draft) -> ContentResult<R::Record> {
        let record = self.repo.update(id, draft)?;
        info!(
            "event=record_update module=service status=ok collection={} id={}",
            self.collection(),
            id
        );
        Ok(record)
    }

    pub fn get(&self, id: RecordId) -> ContentResult<Option<R::Record>> {
        Ok(self.repo.get(id)?)
    }

    /// Deletes one record. Absent ids are a no-op.
    pub fn delete(&self, id: RecordId) -> ContentResult<()> {
        let removed = self.repo.delete(id)?;
        info!(
            "event=record_delete module=service status={} collection={} id={}",
            if removed { "ok" } else { "noop" },
            self.collection(),
            id
        );
        Ok(())
    }

    /// Applies a client-computed reorder atomically.
    ///
    /// # Errors
    /// - `InvalidArgument` for empty input or duplicate ids; storage untouched.
    /// - `NotFound` when any id is unknown; no record changes.
    pub fn reorder(&self, assignments: &[OrderAssignment]) -> ContentResult<()> {
        if let Err(err) = validate_assignments(assignments) {
            warn!(
                "event=collection_reorder module=service status=rejected collection={} count={} reason={}",
                self.collection(),
                assignments.len(),
                err
            );
            return Err(err.into());
        }
        self.repo.reorder(assignments).map_err(Into::into)
    }

    /// Reorders by position: the record at index `i` receives `order = i`.
    pub fn reorder_sequence(&self, ids: &[RecordId]) -> ContentResult<()> {
        self.reorder(&assignments_from_sequence(ids))
    }

    /// Lists the collection in display order.
    pub fn list(&self) -> ContentResult<Vec<R::Record>> {
        Ok(self.repo.list()?)
    }

    /// Moves the record displayed at `from` to position `to`, renumbering the
    /// full sequence, and returns the refreshed list.
    pub fn move_record(&self, from: usize, to: usize) -> ContentResult<Vec<R::Record>> {
        let ids: Vec<RecordId> = self.repo.list()?.iter().map(|record| record.id()).collect();
        let plan = plan_move(&ids, from, to).map_err(ContentError::from)?;
        self.reorder(&plan)?;
        self.list()
    }
}

impl<R: SkillRepository> CollectionService<R> {
    /// Lists skills matching a category filter.
    pub fn list_filtered(&self, query: &SkillListQuery) -> ContentResult<Vec<Skill>> {
        Ok(self.repo.list_filtered(query)?)
    }

    /// Lists skills outside the core skill categories.
    pub fn list_certifications(&self) -> ContentResult<Vec<Skill>> {
        self.list_filtered(&SkillListQuery::certifications())
    }
}

impl<R: ProjectRepository> CollectionService<R> {
    /// Lists the first `limit` projects in display order.
    pub fn list_featured(&self, limit: u32) -> ContentResult<Vec<Project>> {
        Ok(self.repo.list_featured(limit)?)
    }

    /// Removes one image URL from a project.
    ///
    /// A missing project is `NotFound`; a URL the project does not carry is a
    /// no-op.
    pub fn remove_project_image(&self, id: RecordId, image_url: &str) -> ContentResult<Project> {
        Ok(self.repo.remove_image(id, image_url)?)
    }
}
