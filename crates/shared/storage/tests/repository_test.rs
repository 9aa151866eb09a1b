//! Repository tests against an in-memory SQLite database.

use storage::{
    migration_status, CourseRepository, CourseStore, Database, EnrollmentRepository,
    EnrollmentStore, FeedbackRepository, FeedbackStore, UserRepository, UserStore,
};

use domain::{Course, CourseChanges, Enrollment, NewFeedback, NewUser, UserChanges};

async fn database() -> Database {
    Database::connect("sqlite::memory:").await.unwrap()
}

fn course(course_id: &str, title: &str) -> Course {
    Course {
        course_id: course_id.to_string(),
        title: title.to_string(),
        description: None,
        instructor: None,
    }
}

#[tokio::test]
async fn test_enrollments_listed_in_insertion_order() {
    let db = database().await;
    let repo = EnrollmentStore::new(db.get_connection());

    repo.insert(Enrollment::new("alice", "c2")).await.unwrap();
    repo.insert(Enrollment::new("bob", "c1")).await.unwrap();
    repo.insert(Enrollment::new("alice", "c1")).await.unwrap();

    let rows = repo.find_by_username("alice").await.unwrap();
    assert_eq!(
        rows,
        vec![Enrollment::new("alice", "c2"), Enrollment::new("alice", "c1")]
    );
    assert!(repo.find_by_username("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_enrollments_are_kept() {
    let db = database().await;
    let repo = EnrollmentStore::new(db.get_connection());

    repo.insert(Enrollment::new("alice", "c1")).await.unwrap();
    repo.insert(Enrollment::new("alice", "c1")).await.unwrap();

    assert_eq!(repo.find_by_username("alice").await.unwrap().len(), 2);

    // Only one of the duplicates is removed
    assert!(repo.delete_one("alice", "c1").await.unwrap());
    assert_eq!(repo.find_by_username("alice").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_one_matches_pair() {
    let db = database().await;
    let repo = EnrollmentStore::new(db.get_connection());

    repo.insert(Enrollment::new("alice", "c1")).await.unwrap();

    assert!(!repo.update_one("alice", "c9", "c2").await.unwrap());
    assert!(!repo.update_one("bob", "c1", "c2").await.unwrap());
    assert_eq!(
        repo.find_by_username("alice").await.unwrap(),
        vec![Enrollment::new("alice", "c1")]
    );

    assert!(repo.update_one("alice", "c1", "c2").await.unwrap());
    assert_eq!(
        repo.find_by_username("alice").await.unwrap(),
        vec![Enrollment::new("alice", "c2")]
    );
}

#[tokio::test]
async fn test_delete_one_reports_missing() {
    let db = database().await;
    let repo = EnrollmentStore::new(db.get_connection());

    repo.insert(Enrollment::new("alice", "c1")).await.unwrap();

    assert!(repo.delete_one("alice", "c1").await.unwrap());
    assert!(!repo.delete_one("alice", "c1").await.unwrap());
}

#[tokio::test]
async fn test_count_by_course() {
    let db = database().await;
    let repo = EnrollmentStore::new(db.get_connection());

    for (username, course_id) in [("u1", "c1"), ("u2", "c1"), ("u3", "c2")] {
        repo.insert(Enrollment::new(username, course_id)).await.unwrap();
    }

    let mut counts = repo.count_by_course().await.unwrap();
    counts.sort_by(|a, b| a.course_id.cmp(&b.course_id));

    let pairs: Vec<_> = counts
        .iter()
        .map(|c| (c.course_id.as_str(), c.count))
        .collect();
    assert_eq!(pairs, vec![("c1", 2), ("c2", 1)]);
}

#[tokio::test]
async fn test_course_crud() {
    let db = database().await;
    let repo = CourseStore::new(db.get_connection());

    repo.create(course("c1", "Intro to Rust")).await.unwrap();
    assert_eq!(
        repo.find("c1").await.unwrap().map(|c| c.title),
        Some("Intro to Rust".to_string())
    );

    let changes = CourseChanges {
        instructor: Some("Ferris".to_string()),
        ..Default::default()
    };
    let updated = repo.update("c1", changes).await.unwrap().unwrap();
    assert_eq!(updated.instructor.as_deref(), Some("Ferris"));
    assert_eq!(updated.title, "Intro to Rust");

    assert!(repo.update("c9", CourseChanges::default()).await.unwrap().is_none());
    assert!(repo.delete("c1").await.unwrap());
    assert!(!repo.delete("c1").await.unwrap());
    assert!(repo.find("c1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_course_id_rejected() {
    let db = database().await;
    let repo = CourseStore::new(db.get_connection());

    repo.create(course("c1", "First")).await.unwrap();
    assert!(repo.create(course("c1", "Second")).await.is_err());
}

#[tokio::test]
async fn test_user_crud() {
    let db = database().await;
    let repo = UserStore::new(db.get_connection());

    let created = repo
        .create(NewUser {
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
            email: None,
            name: Some("Alice".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(created.username, "alice");

    let changes = UserChanges {
        email: Some("alice@example.com".to_string()),
        name: None,
    };
    let updated = repo.update("alice", changes).await.unwrap().unwrap();
    assert_eq!(updated.email.as_deref(), Some("alice@example.com"));
    assert_eq!(updated.name.as_deref(), Some("Alice"));

    assert_eq!(repo.list().await.unwrap().len(), 1);
    assert!(repo.delete("alice").await.unwrap());
    assert!(repo.find_by_username("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn test_feedback_listed_per_course() {
    let db = database().await;
    let repo = FeedbackStore::new(db.get_connection());

    for (username, course_id, rating) in [("u1", "c1", 4.5), ("u2", "c2", 3.0), ("u3", "c1", 5.0)] {
        repo.create(NewFeedback {
            username: username.to_string(),
            course_id: course_id.to_string(),
            rating,
            comment: "ok".to_string(),
        })
        .await
        .unwrap();
    }

    let entries = repo.list_by_course("c1").await.unwrap();
    let users: Vec<_> = entries.iter().map(|f| f.username.as_str()).collect();
    assert_eq!(users, vec!["u1", "u3"]);
    assert_eq!(entries[0].rating, 4.5);
}

#[tokio::test]
async fn test_migration_status_all_applied() {
    let db = database().await;
    let status = migration_status(&db.get_connection()).await.unwrap();

    assert_eq!(status.len(), 4);
    assert!(status.iter().all(|(_, applied)| *applied));
}

