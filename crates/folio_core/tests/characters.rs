use folio_core::db::open_db_in_memory;
use folio_core::{
    CharacterDraft, CharacterService, ContentError, SqliteCharacterRepository,
};
use uuid::Uuid;

#[test]
fn new_characters_start_inactive() {
    let conn = open_db_in_memory().unwrap();
    let service = CharacterService::new(SqliteCharacterRepository::try_new(&conn).unwrap());

    let mut draft = CharacterDraft::new("Pixel", "/uploads/pixel.glb");
    draft.image_url = Some("/uploads/pixel.png".to_string());
    let created = service.create(&draft).unwrap();

    assert!(!created.active);
    assert_eq!(created.image_url.as_deref(), Some("/uploads/pixel.png"));
    assert!(service.active().unwrap().is_none());
}

#[test]
fn activation_is_exclusive() {
    let conn = open_db_in_memory().unwrap();
    let service = CharacterService::new(SqliteCharacterRepository::try_new(&conn).unwrap());

    let first = service
        .create(&CharacterDraft::new("Pixel", "/uploads/pixel.glb"))
        .unwrap();
    let second = service
        .create(&CharacterDraft::new("Robot", "/uploads/robot.glb"))
        .unwrap();

    service.activate(first.id).unwrap();
    service.activate(second.id).unwrap();

    let active: Vec<_> = service
        .list()
        .unwrap()
        .into_iter()
        .filter(|item| item.active)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);
    assert_eq!(service.active().unwrap().unwrap().id, second.id);
}

#[test]
fn activating_missing_character_keeps_current_one() {
    let conn = open_db_in_memory().unwrap();
    let service = CharacterService::new(SqliteCharacterRepository::try_new(&conn).unwrap());

    let current = service
        .create(&CharacterDraft::new("Pixel", "/uploads/pixel.glb"))
        .unwrap();
    service.activate(current.id).unwrap();

    let missing = Uuid::new_v4();
    let err = service.activate(missing).unwrap_err();
    assert!(matches!(err, ContentError::NotFound(id) if id == missing));
    assert_eq!(service.active().unwrap().unwrap().id, current.id);
}

#[test]
fn model_url_is_required() {
    let conn = open_db_in_memory().unwrap();
    let service = CharacterService::new(SqliteCharacterRepository::try_new(&conn).unwrap());

    let err = service
        .create(&CharacterDraft::new("Pixel", " "))
        .unwrap_err();
    assert!(matches!(err, ContentError::InvalidArgument(_)));
}

#[test]
fn list_is_newest_first_and_delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let service = CharacterService::new(SqliteCharacterRepository::try_new(&conn).unwrap());

    let old = service
        .create(&CharacterDraft::new("Old", "/uploads/old.glb"))
        .unwrap();
    let new = service
        .create(&CharacterDraft::new("New", "/uploads/new.glb"))
        .unwrap();
    conn.execute(
        "UPDATE characters SET created_at = 1000 WHERE id = ?1;",
        [old.id.to_string()],
    )
    .unwrap();

    let ids: Vec<_> = service.list().unwrap().into_iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![new.id, old.id]);

    service.delete(old.id).unwrap();
    service.delete(old.id).unwrap();
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn back_to_back_characters_list_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let service = CharacterService::new(SqliteCharacterRepository::try_new(&conn).unwrap());

    for round in 0..20 {
        let older = service
            .create(&CharacterDraft::new(format!("Older {round}"), "/uploads/older.glb"))
            .unwrap();
        let newer = service
            .create(&CharacterDraft::new(format!("Newer {round}"), "/uploads/newer.glb"))
            .unwrap();

        let ids: Vec<_> = service
            .list()
            .unwrap()
            .into_iter()
            .take(2)
            .map(|item| item.id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id], "round {round}");
    }
}
