//! Integration tests for [`storage::SightingRepository`].
//!
//! Covers duplicate detection, classification updates, geotagging of the latest untagged photo,
//! listing, stats and the missing-file audit, using a temp-dir SQLite database.

use storage::{ClassificationOutcome, NewSighting, SightingRepository};
use tempfile::TempDir;

async fn open_repo() -> (TempDir, SightingRepository) {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("file:{}", dir.path().join("habitat.db").display());
    let repo = SightingRepository::new(&url)
        .await
        .expect("Failed to create repository");
    (dir, repo)
}

fn sighting(user_id: i64, photo_id: &str) -> NewSighting {
    NewSighting {
        user_id,
        photo_id: photo_id.to_string(),
        photo_path: format!("photos/{}.jpg", photo_id),
    }
}

/// **Test: a photo counts as duplicate only for the user who uploaded it.**
#[tokio::test]
async fn test_exists_is_scoped_to_user() {
    let (_dir, repo) = open_repo().await;

    repo.insert(&sighting(1, "AgACAgIAAx")).await.unwrap();

    assert!(repo.exists(1, "AgACAgIAAx").await.unwrap());
    assert!(!repo.exists(2, "AgACAgIAAx").await.unwrap());
    assert!(!repo.exists(1, "other").await.unwrap());
}

/// **Test: insert stores defaults: not classified, file present, no geotag.**
#[tokio::test]
async fn test_insert_defaults() {
    let (_dir, repo) = open_repo().await;

    let id = repo.insert(&sighting(5, "p1")).await.unwrap();
    let record = repo.get_by_id(id).await.unwrap().expect("inserted row");

    assert_eq!(record.user_id, 5);
    assert_eq!(record.photo_path, "photos/p1.jpg");
    assert!(record.file_exists);
    assert!(!record.classified);
    assert!(!record.classification_success);
    assert!(!record.is_geotagged());
}

/// **Test: record_classification fills the primary classification columns.**
#[tokio::test]
async fn test_record_classification() {
    let (_dir, repo) = open_repo().await;
    let id = repo.insert(&sighting(5, "p1")).await.unwrap();

    let outcome = ClassificationOutcome {
        model: "ResNet50".to_string(),
        class_name: "Большая синица".to_string(),
        probability: 0.93,
        success: true,
    };
    let updated = repo.record_classification(5, "p1", &outcome).await.unwrap();

    assert_eq!(updated, 1);
    let record = repo.get_by_id(id).await.unwrap().unwrap();
    assert!(record.classified);
    assert!(record.classification_success);
    assert_eq!(record.classification_1_model.as_deref(), Some("ResNet50"));
    assert_eq!(
        record.classification_1_class.as_deref(),
        Some("Большая синица")
    );
    assert_eq!(record.classification_1_probability, Some(0.93));
    assert!(record.classification_2_model.is_none());
}

/// **Test: a low-confidence classification is stored as classified but not successful.**
#[tokio::test]
async fn test_record_classification_low_confidence() {
    let (_dir, repo) = open_repo().await;
    let id = repo.insert(&sighting(5, "p1")).await.unwrap();

    let outcome = ClassificationOutcome {
        model: "ResNet50".to_string(),
        class_name: "Сорока".to_string(),
        probability: 0.41,
        success: false,
    };
    repo.record_classification(5, "p1", &outcome).await.unwrap();

    let record = repo.get_by_id(id).await.unwrap().unwrap();
    assert!(record.classified);
    assert!(!record.classification_success);
}

/// **Test: a location tags the newest untagged photo of that user only.**
#[tokio::test]
async fn test_tag_latest_untagged() {
    let (_dir, repo) = open_repo().await;
    let first = repo.insert(&sighting(1, "a")).await.unwrap();
    let second = repo.insert(&sighting(1, "b")).await.unwrap();
    let other_user = repo.insert(&sighting(2, "c")).await.unwrap();

    let tagged = repo.tag_latest_untagged(1, 59.93, 30.31).await.unwrap();
    assert_eq!(tagged, Some(second));

    let tagged = repo.tag_latest_untagged(1, 60.0, 30.0).await.unwrap();
    assert_eq!(tagged, Some(first));

    assert_eq!(repo.tag_latest_untagged(1, 1.0, 1.0).await.unwrap(), None);

    let record = repo.get_by_id(second).await.unwrap().unwrap();
    assert_eq!(record.latitude, Some(59.93));
    assert_eq!(record.longitude, Some(30.31));
    assert!(!repo.get_by_id(other_user).await.unwrap().unwrap().is_geotagged());
}

/// **Test: latest_untagged and attach_location as separate steps.**
#[tokio::test]
async fn test_latest_untagged_and_attach_location() {
    let (_dir, repo) = open_repo().await;
    assert_eq!(repo.latest_untagged(1).await.unwrap(), None);

    let id = repo.insert(&sighting(1, "a")).await.unwrap();
    assert_eq!(repo.latest_untagged(1).await.unwrap(), Some(id));

    assert!(repo.attach_location(id, 10.5, -3.25).await.unwrap());
    assert_eq!(repo.latest_untagged(1).await.unwrap(), None);
    assert!(!repo.attach_location(9999, 0.0, 0.0).await.unwrap());
}

/// **Test: list_by_user returns only that user's rows, newest first, limited.**
#[tokio::test]
async fn test_list_by_user() {
    let (_dir, repo) = open_repo().await;
    for i in 0..5 {
        repo.insert(&sighting(1, &format!("u1-{}", i))).await.unwrap();
        repo.insert(&sighting(2, &format!("u2-{}", i))).await.unwrap();
    }

    let records = repo.list_by_user(1, 3).await.unwrap();

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.user_id == 1));
    assert_eq!(records[0].photo_id, "u1-4");
    assert!(records[0].id > records[1].id);
}

/// **Test: stats over all users and over one user.**
#[tokio::test]
async fn test_get_stats() {
    let (_dir, repo) = open_repo().await;

    let empty = repo.get_stats(None).await.unwrap();
    assert_eq!(empty.total, 0);
    assert!(empty.first_sighting.is_none());

    repo.insert(&sighting(1, "a")).await.unwrap();
    repo.insert(&sighting(1, "b")).await.unwrap();
    repo.insert(&sighting(2, "c")).await.unwrap();
    repo.record_classification(
        1,
        "a",
        &ClassificationOutcome {
            model: "ResNet50".to_string(),
            class_name: "Снегирь".to_string(),
            probability: 0.97,
            success: true,
        },
    )
    .await
    .unwrap();
    repo.record_classification(
        1,
        "b",
        &ClassificationOutcome {
            model: "ResNet50".to_string(),
            class_name: "Снегирь".to_string(),
            probability: 0.3,
            success: false,
        },
    )
    .await
    .unwrap();
    repo.tag_latest_untagged(2, 1.0, 2.0).await.unwrap();

    let all = repo.get_stats(None).await.unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.classified, 2);
    assert_eq!(all.identified, 1);
    assert_eq!(all.geotagged, 1);
    assert_eq!(all.unique_users, 2);
    assert!(all.first_sighting.is_some());
    assert!(all.last_sighting.is_some());

    let user = repo.get_stats(Some(1)).await.unwrap();
    assert_eq!(user.total, 2);
    assert_eq!(user.geotagged, 0);
    assert_eq!(user.unique_users, 1);
}

/// **Test: the audit marks rows whose photo file no longer exists.**
#[tokio::test]
async fn test_mark_missing_files() {
    let (dir, repo) = open_repo().await;
    let present_path = dir.path().join("present.jpg");
    std::fs::write(&present_path, b"jpeg").unwrap();

    let present = repo
        .insert(&NewSighting {
            user_id: 1,
            photo_id: "present".to_string(),
            photo_path: present_path.to_string_lossy().into_owned(),
        })
        .await
        .unwrap();
    let missing = repo
        .insert(&NewSighting {
            user_id: 1,
            photo_id: "missing".to_string(),
            photo_path: dir.path().join("gone.jpg").to_string_lossy().into_owned(),
        })
        .await
        .unwrap();

    let elsewhere = tempfile::tempdir().unwrap();
    assert_eq!(repo.mark_missing_files(elsewhere.path()).await.unwrap(), 1);
    assert_eq!(repo.mark_missing_files(elsewhere.path()).await.unwrap(), 0);
    assert!(repo.get_by_id(present).await.unwrap().unwrap().file_exists);
    assert!(!repo.get_by_id(missing).await.unwrap().unwrap().file_exists);
}

/// **Test: relative photo paths are checked against the given base directory, not the process cwd.**
#[tokio::test]
async fn test_mark_missing_files_resolves_relative_paths() {
    let (dir, repo) = open_repo().await;
    std::fs::create_dir_all(dir.path().join("photos")).unwrap();
    std::fs::write(dir.path().join("photos/kept.jpg"), b"jpeg").unwrap();

    let kept = repo
        .insert(&NewSighting {
            user_id: 1,
            photo_id: "kept".to_string(),
            photo_path: "photos/kept.jpg".to_string(),
        })
        .await
        .unwrap();
    let lost = repo
        .insert(&NewSighting {
            user_id: 1,
            photo_id: "lost".to_string(),
            photo_path: "photos/lost.jpg".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(repo.mark_missing_files(dir.path()).await.unwrap(), 1);
    assert!(repo.get_by_id(kept).await.unwrap().unwrap().file_exists);
    assert!(!repo.get_by_id(lost).await.unwrap().unwrap().file_exists);
}
