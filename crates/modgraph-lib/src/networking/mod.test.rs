use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[tokio::test]
async fn test_networking_manager_creation() {
    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    assert_eq!(manager.max_jobs(), 8);
}

#[test]
fn test_zero_jobs_rejected() {
    let config = NetworkingConfig {
        max_jobs: 0,
        ..Default::default()
    };

    assert!(matches!(
        NetworkingManager::new(config),
        Err(NetworkingError::InvalidJobCount { count: 0 })
    ));
}

#[tokio::test]
async fn test_empty_item_list_yields_no_results() {
    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();

    let results = manager
        .run_all(Vec::<String>::new(), |_client, item| async move { Ok(item) })
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_results_preserve_input_order() {
    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    let items: Vec<u64> = (0..20).collect();

    let results = manager
        .run_all(items, |_client, item| async move {
            // Later items finish first
            tokio::time::sleep(std::time::Duration::from_millis(20 - item)).await;
            Ok(item * 2)
        })
        .await
        .unwrap();

    let values: Vec<u64> = results.into_iter().map(|r| r.unwrap()).collect();
    assert_eq!(values, (0..20).map(|i| i * 2).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_concurrency_bounded_by_max_jobs() {
    let config = NetworkingConfig {
        max_jobs: 2,
        ..Default::default()
    };
    let manager = NetworkingManager::new(config).unwrap();

    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (active_ref, peak_ref) = (active.clone(), peak.clone());

    let results = manager
        .run_all((0..8).collect::<Vec<u32>>(), move |_client, item| {
            let active = active_ref.clone();
            let peak = peak_ref.clone();
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                Ok(item)
            }
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 8);
    assert!(peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_task_errors_are_returned_per_item() {
    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();

    let results = manager
        .run_all(vec!["ok", "missing"], |_client, item| async move {
            if item == "missing" {
                Err(NetworkingError::NoVersion {
                    artifact: item.to_string(),
                })
            } else {
                Ok(item.to_string())
            }
        })
        .await
        .unwrap();

    assert_eq!(results[0].as_deref().unwrap(), "ok");
    assert!(matches!(results[1], Err(NetworkingError::NoVersion { .. })));
}
