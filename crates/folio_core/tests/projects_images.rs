use folio_core::db::open_db_in_memory;
use folio_core::{
    ContentError, ProjectDraft, ProjectService, SqliteProjectRepository, FEATURED_PROJECT_LIMIT,
};
use uuid::Uuid;

fn draft_with_images(title: &str, images: &[&str]) -> ProjectDraft {
    let mut draft = ProjectDraft::new(title, "Enterprise pipeline", "AI, Python");
    draft.images = images.iter().map(|value| value.to_string()).collect();
    draft
}

#[test]
fn create_stores_images_in_upload_order() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    let created = service
        .create(&draft_with_images(
            "Neural Vision API",
            &["/uploads/one.png", "/uploads/two.png"],
        ))
        .unwrap();

    let loaded = service.get(created.id).unwrap().unwrap();
    assert_eq!(loaded.images, vec!["/uploads/one.png", "/uploads/two.png"]);
    assert_eq!(loaded.cover_image(), Some("/uploads/one.png"));
}

#[test]
fn update_appends_new_images_and_keeps_existing_ones() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    let created = service
        .create(&draft_with_images("Revenue Operations", &["/uploads/a.png"]))
        .unwrap();

    let no_new_images = service
        .update(created.id, &draft_with_images("Revenue Operations", &[]))
        .unwrap();
    assert_eq!(no_new_images.images, vec!["/uploads/a.png"]);

    let appended = service
        .update(
            created.id,
            &draft_with_images("Revenue Ops", &["/uploads/b.png", "/uploads/c.png"]),
        )
        .unwrap();
    assert_eq!(appended.title, "Revenue Ops");
    assert_eq!(
        appended.images,
        vec!["/uploads/a.png", "/uploads/b.png", "/uploads/c.png"]
    );
}

#[test]
fn remove_image_drops_matching_urls_only() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    let created = service
        .create(&draft_with_images(
            "ChatBot Orchestrator",
            &["/uploads/a.png", "/uploads/b.png", "/uploads/a.png"],
        ))
        .unwrap();

    let updated = service
        .remove_project_image(created.id, "/uploads/a.png")
        .unwrap();
    assert_eq!(updated.images, vec!["/uploads/b.png"]);

    let unchanged = service
        .remove_project_image(created.id, "/uploads/missing.png")
        .unwrap();
    assert_eq!(unchanged.images, vec!["/uploads/b.png"]);
}

#[test]
fn remove_image_on_missing_project_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    let missing = Uuid::new_v4();
    let err = service
        .remove_project_image(missing, "/uploads/a.png")
        .unwrap_err();
    assert!(matches!(err, ContentError::NotFound(id) if id == missing));
}

#[test]
fn update_missing_project_does_not_create_one() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    let err = service
        .update(Uuid::new_v4(), &draft_with_images("Ghost", &["/uploads/x.png"]))
        .unwrap_err();
    assert!(matches!(err, ContentError::NotFound(_)));
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn featured_projects_follow_display_order() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    let mut ids = Vec::new();
    for index in 0..6 {
        let mut draft = draft_with_images(&format!("Project {index}"), &[]);
        draft.order = Some(5 - index);
        ids.push(service.create(&draft).unwrap().id);
    }

    let featured = service.list_featured(FEATURED_PROJECT_LIMIT).unwrap();
    let featured_ids: Vec<_> = featured.iter().map(|item| item.id).collect();
    assert_eq!(featured_ids, vec![ids[5], ids[4], ids[3], ids[2]]);
}

#[test]
fn draft_built_from_stored_project_keeps_image_list_on_update() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    let created = service
        .create(&draft_with_images(
            "Tech Stack Arsenal",
            &["/uploads/a.png", "/uploads/b.png"],
        ))
        .unwrap();

    let mut draft = ProjectDraft::from(&created);
    assert!(draft.images.is_empty());
    draft.title = "Tech Stack".to_string();
    let updated = service.update(created.id, &draft).unwrap();

    assert_eq!(updated.title, "Tech Stack");
    assert_eq!(updated.images, vec!["/uploads/a.png", "/uploads/b.png"]);
    assert_eq!(updated.order, created.order);
}
