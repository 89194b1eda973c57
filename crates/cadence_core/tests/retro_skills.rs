use cadence_core::db::open_db_in_memory;
use cadence_core::{
    Project, ProjectRepository, RetroService, RetroServiceError, SkillRequest, SkillStore,
    SkillType, SqliteProjectRepository, SqliteSkillStore,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded_project(conn: &Connection) -> Project {
    let project = Project::new("learning log", day(2026, 3, 1), None);
    SqliteProjectRepository::new(conn)
        .create_project(&project)
        .unwrap();
    project
}

fn skill_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM skills ORDER BY name ASC;")
        .unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut names = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        names.push(row.get(0).unwrap());
    }
    names
}

#[test]
fn update_skills_creates_missing_skills_and_associations() {
    let mut conn = open_db_in_memory().unwrap();
    let project = seeded_project(&conn);

    let mut service = RetroService::new(SqliteSkillStore::new(&mut conn));
    let retro = service
        .create_retrospective(project.id, day(2026, 3, 14), "paired on the parser")
        .unwrap();

    let request = SkillRequest {
        soft: vec!["Pairing".to_string()],
        hard: vec!["Rust".to_string()],
    };
    let diff = service.update_skills(retro.id, &request).unwrap();

    assert_eq!(diff.to_add.len(), 2);
    assert!(diff.to_remove.is_empty());

    let linked = service.skills(retro.id).unwrap();
    assert_eq!(linked.len(), 2);
    assert_eq!(linked[0].skill_name, "Pairing");
    assert_eq!(linked[0].association.skill_type, SkillType::Soft);
    assert_eq!(linked[1].skill_name, "Rust");
    assert_eq!(linked[1].association.skill_type, SkillType::Hard);
}

#[test]
fn repeating_the_same_request_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    let project = seeded_project(&conn);

    let mut service = RetroService::new(SqliteSkillStore::new(&mut conn));
    let retro = service
        .create_retrospective(project.id, day(2026, 3, 14), "entry")
        .unwrap();

    let request = SkillRequest {
        soft: vec!["Writing".to_string()],
        hard: vec!["SQL".to_string()],
    };
    service.update_skills(retro.id, &request).unwrap();

    let second = service.update_skills(retro.id, &request).unwrap();
    assert!(second.is_empty());
    assert_eq!(service.skills(retro.id).unwrap().len(), 2);
}

#[test]
fn name_in_both_lists_creates_one_skill_tagged_hard() {
    let mut conn = open_db_in_memory().unwrap();
    let project = seeded_project(&conn);

    {
        let mut service = RetroService::new(SqliteSkillStore::new(&mut conn));
        let retro = service
            .create_retrospective(project.id, day(2026, 3, 14), "entry")
            .unwrap();

        let request = SkillRequest {
            soft: vec!["Java".to_string()],
            hard: vec!["Java".to_string()],
        };
        let diff = service.update_skills(retro.id, &request).unwrap();

        assert_eq!(diff.to_add.len(), 1);
        let linked = service.skills(retro.id).unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].association.skill_type, SkillType::Hard);
    }

    assert_eq!(skill_names(&conn), vec!["Java".to_string()]);
}

#[test]
fn dropped_names_remove_associations_but_keep_skills() {
    let mut conn = open_db_in_memory().unwrap();
    let project = seeded_project(&conn);

    {
        let mut service = RetroService::new(SqliteSkillStore::new(&mut conn));
        let retro = service
            .create_retrospective(project.id, day(2026, 3, 14), "entry")
            .unwrap();

        service
            .update_skills(
                retro.id,
                &SkillRequest {
                    soft: vec!["Facilitation".to_string(), "Listening".to_string()],
                    hard: vec![],
                },
            )
            .unwrap();

        let diff = service
            .update_skills(
                retro.id,
                &SkillRequest {
                    soft: vec!["Facilitation".to_string()],
                    hard: vec![],
                },
            )
            .unwrap();

        assert!(diff.to_add.is_empty());
        assert_eq!(diff.to_remove.len(), 1);
        assert_eq!(diff.to_remove[0].skill_name, "Listening");

        let linked = service.skills(retro.id).unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].skill_name, "Facilitation");
    }

    // Shared skill rows survive association removal.
    assert_eq!(
        skill_names(&conn),
        vec!["Facilitation".to_string(), "Listening".to_string()]
    );
}

#[test]
fn surviving_name_keeps_its_original_type() {
    let mut conn = open_db_in_memory().unwrap();
    let project = seeded_project(&conn);

    let mut service = RetroService::new(SqliteSkillStore::new(&mut conn));
    let retro = service
        .create_retrospective(project.id, day(2026, 3, 14), "entry")
        .unwrap();

    service
        .update_skills(
            retro.id,
            &SkillRequest {
                soft: vec!["Estimation".to_string()],
                hard: vec![],
            },
        )
        .unwrap();

    // Requesting the same name under the other type changes nothing; a
    // type flip would require remove + re-add.
    let diff = service
        .update_skills(
            retro.id,
            &SkillRequest {
                soft: vec![],
                hard: vec!["Estimation".to_string()],
            },
        )
        .unwrap();

    assert!(diff.is_empty());
    let linked = service.skills(retro.id).unwrap();
    assert_eq!(linked[0].association.skill_type, SkillType::Soft);
}

#[test]
fn existing_skills_are_reused_across_retrospectives() {
    let mut conn = open_db_in_memory().unwrap();
    let project = seeded_project(&conn);

    {
        let mut service = RetroService::new(SqliteSkillStore::new(&mut conn));
        let first = service
            .create_retrospective(project.id, day(2026, 3, 14), "first")
            .unwrap();
        let second = service
            .create_retrospective(project.id, day(2026, 3, 21), "second")
            .unwrap();

        let request = SkillRequest {
            soft: vec![],
            hard: vec!["Rust".to_string()],
        };
        let first_diff = service.update_skills(first.id, &request).unwrap();
        let second_diff = service.update_skills(second.id, &request).unwrap();

        assert_eq!(first_diff.to_add[0].skill_id, second_diff.to_add[0].skill_id);
    }

    assert_eq!(skill_names(&conn), vec!["Rust".to_string()]);
}

#[test]
fn create_skill_tolerates_an_existing_name() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSkillStore::new(&mut conn);

    let first = store.create_skill("Kubernetes").unwrap();
    let second = store.create_skill("Kubernetes").unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Kubernetes");
}

#[test]
fn fetch_skills_by_names_returns_only_matches() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqliteSkillStore::new(&mut conn);

    store.create_skill("Rust").unwrap();
    store.create_skill("SQL").unwrap();

    let found = store
        .fetch_skills_by_names(&["Rust".to_string(), "Go".to_string()])
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Rust");

    assert!(store.fetch_skills_by_names(&[]).unwrap().is_empty());
}

#[test]
fn unknown_retrospective_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = RetroService::new(SqliteSkillStore::new(&mut conn));

    let missing = Uuid::new_v4();
    let err = service
        .update_skills(missing, &SkillRequest::default())
        .unwrap_err();
    assert!(matches!(
        err,
        RetroServiceError::RetrospectiveNotFound(id) if id == missing
    ));
}
