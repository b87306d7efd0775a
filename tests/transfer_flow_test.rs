mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};

use common::{seed_user, session_for, setup_db};
use traslados_core::centers::{CenterRepository, CenterRepositoryTrait, CenterUpdate, NewCenter};
use traslados_core::storage::{BlobStore, LocalBlobStore};
use traslados_core::transfers::{
    TransferFilter, TransferRepository, TransferService, TransferSubmission,
};
use traslados_core::users::{Role, UserRepository, UserRepositoryTrait};

fn submission(plate: &str, center_id: &str) -> TransferSubmission {
    TransferSubmission {
        plate: plate.to_string(),
        destination_center_id: center_id.to_string(),
        has_appointment: false,
        is_atypical: false,
        image_url: None,
    }
}

fn build_service(
    pool: &Arc<traslados_core::db::DbPool>,
    blob_root: &std::path::Path,
) -> TransferService {
    TransferService::new(
        Arc::new(TransferRepository::new(pool.clone())),
        Arc::new(CenterRepository::new(pool.clone())),
        Arc::new(LocalBlobStore::new(blob_root).expect("blob store")),
    )
}

#[tokio::test]
async fn manager_submits_and_admin_moderates() {
    let (dir, pool) = setup_db();

    let manager = seed_user(&pool, "m1", "Luis", Role::Manager);
    let admin = seed_user(&pool, "a1", "Ana", Role::Admin);
    let center_repo = CenterRepository::new(pool.clone());
    let center = center_repo
        .create(NewCenter {
            name: "Centro Norte".to_string(),
            responsible_manager_id: manager.id.clone(),
        })
        .unwrap();

    let service = build_service(&pool, dir.path());
    let manager_session = session_for(&manager);
    let admin_session = session_for(&admin);

    let transfer = service
        .submit_transfer(&manager_session, submission("ABC-123", &center.id))
        .unwrap();
    assert_eq!(transfer.manager_name, "Luis");
    assert!(!transfer.read);
    assert!(transfer.observations.is_empty());

    // Admins cannot submit, managers cannot moderate.
    assert!(service
        .submit_transfer(&admin_session, submission("XYZ-987", &center.id))
        .is_err());
    assert!(service.mark_read(&manager_session, &transfer.id).is_err());

    let read = service.mark_read(&admin_session, &transfer.id).unwrap();
    assert!(read.read);

    // Owner updates observations; another account may not.
    let updated = service
        .update_observations(&manager_session, &transfer.id, "llegó sin llaves")
        .unwrap();
    assert_eq!(updated.observations, "llegó sin llaves");
    assert!(updated.read, "read flag survives observation updates");
    assert!(service
        .update_observations(&admin_session, &transfer.id, "x")
        .is_err());

    let mine = service.my_transfers(&manager_session).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].observations, "llegó sin llaves");
}

#[tokio::test]
async fn filters_match_flags_manager_and_inclusive_dates() {
    let (dir, pool) = setup_db();

    let luis = seed_user(&pool, "m1", "Luis", Role::Manager);
    let marta = seed_user(&pool, "m2", "Marta", Role::Manager);
    let admin = seed_user(&pool, "a1", "Ana", Role::Admin);
    let center = CenterRepository::new(pool.clone())
        .create(NewCenter {
            name: "Centro Sur".to_string(),
            responsible_manager_id: luis.id.clone(),
        })
        .unwrap();

    let service = build_service(&pool, dir.path());
    let admin_session = session_for(&admin);

    service
        .submit_transfer(&session_for(&luis), submission("AAA-111", &center.id))
        .unwrap();
    service
        .submit_transfer(
            &session_for(&marta),
            TransferSubmission {
                is_atypical: true,
                ..submission("BBB-222", &center.id)
            },
        )
        .unwrap();

    let atypical = service
        .search(
            &admin_session,
            &TransferFilter {
                is_atypical: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(atypical.len(), 1);
    assert_eq!(atypical[0].plate, "BBB-222");

    let by_manager = service
        .search(
            &admin_session,
            &TransferFilter {
                manager_name: Some("Luis".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(by_manager.len(), 1);
    assert_eq!(by_manager[0].plate, "AAA-111");

    // End date is inclusive of the whole day.
    let today = Utc::now().date_naive();
    let through_today = service
        .search(
            &admin_session,
            &TransferFilter {
                start_date: Some(today),
                end_date: Some(today),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(through_today.len(), 2);

    let starting_tomorrow = service
        .search(
            &admin_session,
            &TransferFilter {
                start_date: Some(today + Duration::days(1)),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(starting_tomorrow.is_empty());
}

#[tokio::test]
async fn bulk_delete_removes_rows_and_images_best_effort() {
    let (dir, pool) = setup_db();

    let manager = seed_user(&pool, "m1", "Luis", Role::Manager);
    let admin = seed_user(&pool, "a1", "Ana", Role::Admin);
    let center = CenterRepository::new(pool.clone())
        .create(NewCenter {
            name: "Centro Este".to_string(),
            responsible_manager_id: manager.id.clone(),
        })
        .unwrap();

    let blob_store = LocalBlobStore::new(dir.path().join("uploads")).unwrap();
    let image_url = blob_store.put("evidencia.jpg", b"jpeg-bytes").await.unwrap();

    let service = TransferService::new(
        Arc::new(TransferRepository::new(pool.clone())),
        Arc::new(CenterRepository::new(pool.clone())),
        Arc::new(LocalBlobStore::new(dir.path().join("uploads")).unwrap()),
    );
    let manager_session = session_for(&manager);
    let admin_session = session_for(&admin);

    service
        .submit_transfer(
            &manager_session,
            TransferSubmission {
                image_url: Some(image_url.clone()),
                ..submission("AAA-111", &center.id)
            },
        )
        .unwrap();
    // A record pointing at an already-missing image must not abort the bulk
    // delete.
    service
        .submit_transfer(
            &manager_session,
            TransferSubmission {
                image_url: Some("file:///uploads/desaparecida.jpg".to_string()),
                ..submission("BBB-222", &center.id)
            },
        )
        .unwrap();

    let today = Utc::now().date_naive();
    let deleted = service
        .delete_by_date_range(&admin_session, today, today)
        .await
        .unwrap();
    assert_eq!(deleted, 2);

    // Rows are gone and the stored image was cleaned up.
    assert!(service.history_page(&admin_session, 0).unwrap().is_empty());
    assert!(blob_store.delete(&image_url).await.is_err());
}

#[tokio::test]
async fn export_rows_flatten_transfers_for_admins() {
    let (dir, pool) = setup_db();

    let manager = seed_user(&pool, "m1", "Luis", Role::Manager);
    let admin = seed_user(&pool, "a1", "Ana", Role::Admin);
    let center = CenterRepository::new(pool.clone())
        .create(NewCenter {
            name: "Centro Oeste".to_string(),
            responsible_manager_id: manager.id.clone(),
        })
        .unwrap();

    let service = build_service(&pool, dir.path());

    service
        .submit_transfer(
            &session_for(&manager),
            TransferSubmission {
                has_appointment: true,
                ..submission("ABC-123", &center.id)
            },
        )
        .unwrap();

    let rows = service
        .export_rows(&session_for(&admin), &TransferFilter::default())
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].plate, "ABC-123");
    assert_eq!(rows[0].manager_name, "Luis");
    assert_eq!(rows[0].destination_center, "Centro Oeste");
    assert_eq!(rows[0].has_appointment, "Sí");
    assert_eq!(rows[0].is_atypical, "No");

    // Managers cannot export.
    assert!(service
        .export_rows(&session_for(&manager), &TransferFilter::default())
        .is_err());
}

#[tokio::test]
async fn center_reassignment_keeps_references_consistent() {
    let (_dir, pool) = setup_db();

    let luis = seed_user(&pool, "m1", "Luis", Role::Manager);
    let marta = seed_user(&pool, "m2", "Marta", Role::Manager);
    let users = UserRepository::new(pool.clone());
    let centers = CenterRepository::new(pool.clone());

    let center = centers
        .create(NewCenter {
            name: "Centro Norte".to_string(),
            responsible_manager_id: luis.id.clone(),
        })
        .unwrap();
    assert_eq!(
        users.get_by_id("m1").unwrap().center_id.as_deref(),
        Some(center.id.as_str())
    );

    // Reassigning releases the previous manager and claims the new one in
    // the same transaction.
    centers
        .update(CenterUpdate {
            id: center.id.clone(),
            name: "Centro Norte".to_string(),
            responsible_manager_id: marta.id.clone(),
        })
        .unwrap();
    assert_eq!(users.get_by_id("m1").unwrap().center_id, None);
    assert_eq!(
        users.get_by_id("m2").unwrap().center_id.as_deref(),
        Some(center.id.as_str())
    );

    centers.delete(&center.id).unwrap();
    assert_eq!(users.get_by_id("m2").unwrap().center_id, None);
    assert!(centers.get_name(&center.id).unwrap().is_none());
}
