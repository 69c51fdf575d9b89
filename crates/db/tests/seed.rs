//! Integration tests for transactional fixture seeding.

use assert_matches::assert_matches;
use movingday_db::models::checklist::ChecklistFields;
use movingday_db::models::contact::ContactFields;
use movingday_db::models::moving_box::MovingBoxFields;
use movingday_db::models::user::CreateUser;
use movingday_db::seed::{seed_fixtures, Fixtures, SeedError};
use sqlx::PgPool;

fn user(user_name: &str) -> CreateUser {
    CreateUser {
        user_name: user_name.to_string(),
        full_name: user_name.to_uppercase(),
        password: "hash".to_string(),
        notes: Some("some notes".to_string()),
        moving_date: None,
    }
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("{table} count failed: {e}"));
    n
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_inserts_all_tables(pool: PgPool) {
    let fixtures = Fixtures {
        users: vec![user("one"), user("two")],
        boxes: vec![(0, MovingBoxFields {
            box_name: Some("box".into()),
            ..Default::default()
        })],
        contacts: vec![(1, ContactFields {
            contact_name: Some("contact".into()),
            ..Default::default()
        })],
        lists: vec![(0, ChecklistFields {
            list_name: Some("list".into()),
            ..Default::default()
        })],
    };

    let seeded = seed_fixtures(&pool, &fixtures).await.unwrap();

    assert_eq!(seeded.users.len(), 2);
    assert_eq!(seeded.boxes[0].user_id, seeded.users[0].id);
    assert_eq!(seeded.contacts[0].user_id, seeded.users[1].id);
    assert_eq!(seeded.lists[0].user_id, seeded.users[0].id);
    assert_eq!(count(&pool, "movingday_boxes").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_seed_leaves_nothing_behind(pool: PgPool) {
    let fixtures = Fixtures {
        users: vec![user("lonely")],
        boxes: vec![(0, MovingBoxFields {
            box_name: Some("ok".into()),
            ..Default::default()
        })],
        contacts: vec![(5, ContactFields {
            contact_name: Some("orphan".into()),
            ..Default::default()
        })],
        lists: vec![],
    };

    let result = seed_fixtures(&pool, &fixtures).await;
    assert_matches!(result, Err(SeedError::UnknownOwner(5)));

    assert_eq!(count(&pool, "movingday_users").await, 0);
    assert_eq!(count(&pool, "movingday_boxes").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_user_name_rolls_back(pool: PgPool) {
    let fixtures = Fixtures {
        users: vec![user("twin"), user("twin")],
        ..Default::default()
    };

    let result = seed_fixtures(&pool, &fixtures).await;
    assert_matches!(result, Err(SeedError::Database(_)));
    assert_eq!(count(&pool, "movingday_users").await, 0);
}
