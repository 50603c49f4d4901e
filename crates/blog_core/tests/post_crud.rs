use blog_core::db::open_db_in_memory;
use blog_core::{
    PostCategory, PostDraft, PostListQuery, PostRepository, PostService, RepoError,
    SqlitePostRepository, ValidationConfig, ValidationError,
};

fn draft(title: &str, category: &str) -> PostDraft {
    PostDraft {
        title: Some(title.to_string()),
        content: Some("Lorem ipsum ".repeat(25)),
        summary: Some("A post worth reading.".to_string()),
        category: Some(category.to_string()),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let created = service
        .create_post(&draft("Top 10 Secrets", "Fiction"))
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.title, "Top 10 Secrets");
    assert_eq!(created.content.chars().count(), 300);
    assert_eq!(created.category, PostCategory::Fiction);
    assert!(created.created_at > 0);
    assert_eq!(created.updated_at, None);

    assert_eq!(service.get_post(created.id).unwrap().unwrap(), created);
}

#[test]
fn create_rejects_invalid_drafts_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let err = service
        .create_post(&draft("A Quiet Evening", "Fiction"))
        .unwrap_err();
    assert!(matches!(
        err.as_validation(),
        Some(ValidationError::TitleNotClickbait { .. })
    ));

    let err = service
        .create_post(&draft("Guess Who", "fiction"))
        .unwrap_err();
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::InvalidCategory("fiction".to_string()))
    );

    let mut short = draft("Guess Who", "Fiction");
    short.content = Some("c".repeat(249));
    let err = service.create_post(&short).unwrap_err();
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::ContentTooShort { len: 249 })
    );

    assert!(service
        .list_posts(&PostListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn field_setters_update_one_field_and_set_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());
    let created = service
        .create_post(&draft("Top 10 Secrets", "Fiction"))
        .unwrap();

    let updated = service.set_title(created.id, "Guess What Happened").unwrap();
    assert_eq!(updated.title, "Guess What Happened");
    assert_eq!(updated.content, created.content);
    assert!(updated.updated_at.is_some());

    let updated = service.set_category(created.id, "Non-Fiction").unwrap();
    assert_eq!(updated.category, PostCategory::NonFiction);

    let updated = service.set_summary(created.id, &"s".repeat(250)).unwrap();
    assert_eq!(updated.summary.len(), 250);

    let updated = service.set_content(created.id, &"c".repeat(250)).unwrap();
    assert_eq!(updated.content.len(), 250);
    assert_eq!(updated.title, "Guess What Happened");
}

#[test]
fn failed_field_update_leaves_record_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());
    let created = service
        .create_post(&draft("Top 10 Secrets", "Fiction"))
        .unwrap();

    let err = service.set_summary(created.id, &"s".repeat(251)).unwrap_err();
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::SummaryTooLong { len: 251 })
    );
    let err = service.set_title(created.id, "   ").unwrap_err();
    assert_eq!(err.as_validation(), Some(&ValidationError::TitleRequired));
    let err = service.set_category(created.id, "").unwrap_err();
    assert_eq!(err.as_validation(), Some(&ValidationError::CategoryRequired));

    assert_eq!(service.get_post(created.id).unwrap().unwrap(), created);
}

#[test]
fn repository_update_validates_full_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());
    let mut post = service
        .create_post(&draft("Top 10 Secrets", "Fiction"))
        .unwrap();

    post.content = "short".to_string();
    let err = repo.update_post(&post).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::ContentTooShort { len: 5 })
    ));
}

#[test]
fn custom_config_changes_accepted_titles() {
    let conn = open_db_in_memory().unwrap();
    let config =
        ValidationConfig::from_json_str(r#"{"clickbait_markers": ["Shocking"]}"#).unwrap();
    let service =
        PostService::new(SqlitePostRepository::try_with_config(&conn, config).unwrap());

    service
        .create_post(&draft("Shocking Discovery", "Non-Fiction"))
        .unwrap();
    let err = service
        .create_post(&draft("Top 10 Secrets", "Fiction"))
        .unwrap_err();
    assert!(matches!(
        err.as_validation(),
        Some(ValidationError::TitleNotClickbait { .. })
    ));
}

#[test]
fn list_filters_by_category_and_paginates() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());
    let first = service.create_post(&draft("Top A", "Fiction")).unwrap();
    service.create_post(&draft("Top B", "Non-Fiction")).unwrap();
    let third = service.create_post(&draft("Top C", "Fiction")).unwrap();

    let fiction = service
        .list_posts(&PostListQuery {
            category: Some(PostCategory::Fiction),
            ..PostListQuery::default()
        })
        .unwrap();
    let ids: Vec<i64> = fiction.iter().map(|post| post.id).collect();
    assert_eq!(ids, vec![first.id, third.id]);

    let page = service
        .list_posts(&PostListQuery {
            category: None,
            limit: Some(1),
            offset: 1,
        })
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "Top B");
}

#[test]
fn delete_and_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());
    let created = service.create_post(&draft("Top A", "Fiction")).unwrap();

    service.delete_post(created.id).unwrap();
    assert!(service.get_post(created.id).unwrap().is_none());

    let err = service.delete_post(created.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "post", .. }));
    let err = service.set_title(created.id, "Top B").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "post", .. }));
}

#[test]
fn read_rejects_unknown_category_in_storage() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute(
        "INSERT INTO posts (title, content, summary, category)
         VALUES ('Top', 'x', 'y', 'Poetry');",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();

    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    let err = repo.get_post(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("Poetry")));
}

#[test]
fn post_serializes_with_expected_wire_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());
    let created = service.create_post(&draft("Top B", "Non-Fiction")).unwrap();

    let json = serde_json::to_value(&created).unwrap();
    assert_eq!(json["id"], created.id);
    assert_eq!(json["title"], "Top B");
    assert_eq!(json["category"], "Non-Fiction");
    assert!(json["updated_at"].is_null());
}
