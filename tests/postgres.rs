//! Store tests against a live PostgreSQL. Run with
//! `cargo test --test postgres -- --ignored` and `DATABASE_URL` set.

use dotenv::dotenv;
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use uuid::Uuid;

use taskvault::models::{CreateTaskDto, GetTasksFilterDto, TaskStatus, User};
use taskvault::store::{PgTasksStore, PgUsersStore, TasksStore, UsersStore};
use taskvault::AppError;

async fn pool() -> PgPool {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Usernames are unique per run so tests can share one database.
async fn create_user(users: &PgUsersStore) -> User {
    let username = format!("pg_{}", &Uuid::new_v4().simple().to_string()[..12]);
    users.create_user(&username, "not-a-real-hash").await.unwrap()
}

fn dto(title: &str, description: &str) -> CreateTaskDto {
    CreateTaskDto {
        title: title.to_string(),
        description: description.to_string(),
    }
}

/// Titles of the matching tasks, sorted since Postgres applies no ordering.
async fn titles(tasks: &PgTasksStore, owner_id: Uuid, filter: GetTasksFilterDto) -> Vec<String> {
    let mut titles: Vec<String> = tasks
        .get_tasks(&filter, owner_id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    titles.sort();
    titles
}

#[actix_rt::test]
#[ignore]
async fn test_duplicate_username_conflicts() {
    let users = PgUsersStore::new(pool().await);
    let user = create_user(&users).await;

    let err = users
        .create_user(&user.username, "another-hash")
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Conflict("Username already exists".into()));

    let stored = users.find_one(&user.username).await.unwrap().unwrap();
    assert_eq!(stored.id, user.id);
    assert_eq!(stored.password, "not-a-real-hash");
    assert!(users.find_one("pg_nobody_here").await.unwrap().is_none());
}

#[actix_rt::test]
#[ignore]
async fn test_task_access_is_keyed_by_owner() {
    let pool = pool().await;
    let users = PgUsersStore::new(pool.clone());
    let tasks = PgTasksStore::new(pool);
    let owner = create_user(&users).await;
    let intruder = create_user(&users).await;

    let task = tasks
        .create_task(dto("Owned", "by one user"), owner.id)
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Open);
    assert_eq!(task.user_id, owner.id);

    assert!(tasks.find_one(task.id, intruder.id).await.unwrap().is_none());
    assert_eq!(tasks.delete(task.id, intruder.id).await.unwrap(), 0);

    let mut hijacked = task.clone();
    hijacked.user_id = intruder.id;
    hijacked.status = TaskStatus::Done;
    assert!(matches!(
        tasks.save(&hijacked).await,
        Err(AppError::NotFound(_))
    ));

    let unchanged = tasks.find_one(task.id, owner.id).await.unwrap().unwrap();
    assert_eq!(unchanged, task);

    let mut done = task.clone();
    done.status = TaskStatus::Done;
    assert_eq!(tasks.save(&done).await.unwrap().status, TaskStatus::Done);

    assert_eq!(tasks.delete(task.id, owner.id).await.unwrap(), 1);
    assert!(tasks.find_one(task.id, owner.id).await.unwrap().is_none());
}

#[actix_rt::test]
#[ignore]
async fn test_get_tasks_filters() {
    let pool = pool().await;
    let users = PgUsersStore::new(pool.clone());
    let tasks = PgTasksStore::new(pool);
    let owner = create_user(&users).await;
    let other = create_user(&users).await;

    let milk = tasks
        .create_task(dto("Buy milk", "2% only"), owner.id)
        .await
        .unwrap();
    tasks
        .create_task(dto("Report", "FOO numbers"), owner.id)
        .await
        .unwrap();
    tasks
        .create_task(dto("Sale", "20 percent off"), owner.id)
        .await
        .unwrap();
    tasks
        .create_task(dto("foo elsewhere", "not mine"), other.id)
        .await
        .unwrap();

    let mut in_progress = milk.clone();
    in_progress.status = TaskStatus::InProgress;
    tasks.save(&in_progress).await.unwrap();

    assert_eq!(
        titles(&tasks, owner.id, GetTasksFilterDto::default()).await,
        vec!["Buy milk", "Report", "Sale"]
    );
    assert_eq!(
        titles(&tasks, owner.id, GetTasksFilterDto {
            status: Some(TaskStatus::Open),
            search: None,
        })
        .await,
        vec!["Report", "Sale"]
    );
    assert_eq!(
        titles(&tasks, owner.id, GetTasksFilterDto {
            status: None,
            search: Some("foo".into()),
        })
        .await,
        vec!["Report"]
    );
    assert_eq!(
        titles(&tasks, owner.id, GetTasksFilterDto {
            status: Some(TaskStatus::InProgress),
            search: Some("MILK".into()),
        })
        .await,
        vec!["Buy milk"]
    );

    // `%` matches itself only, not "20 percent".
    assert_eq!(
        titles(&tasks, owner.id, GetTasksFilterDto {
            status: None,
            search: Some("2%".into()),
        })
        .await,
        vec!["Buy milk"]
    );
    assert!(titles(&tasks, owner.id, GetTasksFilterDto {
        status: None,
        search: Some("_ale".into()),
    })
    .await
    .is_empty());
}
