mod common;

use chrono::{NaiveTime, TimeZone, Utc};
use std::fs;
use tempfile::TempDir;
use urania::cache::CachedChartRecord;
use urania::{
    assemble_chart, BirthFingerprint, CacheError, ChartCache, ChartStore, FileChartStore,
    GeoCoordinate, MemoryChartStore, NatalChart,
};

fn sample_chart() -> NatalChart {
    assemble_chart(
        &common::kyiv_details(),
        &common::raw_chart(),
        Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 0).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_memory_round_trip() {
    let cache = ChartCache::new(MemoryChartStore::new());
    let details = common::kyiv_details();
    let chart = sample_chart();

    assert!(cache.find(&details).unwrap().is_none());
    cache.save(&chart, &details).unwrap();
    let found = cache.find(&details).unwrap().unwrap();
    assert_eq!(found, chart);
}

#[test]
fn test_equivalent_details_hit() {
    let cache = ChartCache::new(MemoryChartStore::new());
    cache.save(&sample_chart(), &common::kyiv_details()).unwrap();

    let mut query = common::kyiv_details();
    query.name = "Someone else".to_string();
    query.location = " kyiv, UKRAINE".to_string();
    query.birth_time = NaiveTime::from_hms_milli_opt(12, 0, 0, 300).unwrap();
    query.coordinate = Some(GeoCoordinate::new(50.45005, 30.51995).unwrap());
    assert!(cache.find(&query).unwrap().is_some());
}

#[test]
fn test_distant_coordinate_misses() {
    let cache = ChartCache::new(MemoryChartStore::new());
    cache.save(&sample_chart(), &common::kyiv_details()).unwrap();

    let mut query = common::kyiv_details();
    query.coordinate = Some(GeoCoordinate::new(50.4502, 30.52).unwrap());
    assert!(cache.find(&query).unwrap().is_none());

    let mut query = common::kyiv_details();
    query.timezone = "Europe/Kyiv".to_string();
    assert!(cache.find(&query).unwrap().is_none());
}

#[test]
fn test_save_overwrites_matching_entry() {
    let store = MemoryChartStore::new();
    let cache = ChartCache::new(store);
    let details = common::kyiv_details();

    cache.save(&sample_chart(), &details).unwrap();
    let replacement = sample_chart().with_image_reference("charts/olena-v2.png");
    cache.save(&replacement, &details).unwrap();

    assert_eq!(cache.store().record_count(), 1);
    let found = cache.find(&details).unwrap().unwrap();
    assert_eq!(found.image_reference.as_deref(), Some("charts/olena-v2.png"));
}

#[test]
fn test_nearby_coordinates_share_a_bucket() {
    let cache = ChartCache::new(MemoryChartStore::new());
    let near = common::kyiv_details();
    let mut far = common::kyiv_details();
    far.coordinate = Some(GeoCoordinate::new(50.46, 30.52).unwrap());

    cache.save(&sample_chart(), &near).unwrap();
    cache.save(&sample_chart(), &far).unwrap();
    assert_eq!(cache.store().record_count(), 2);

    assert!(cache.remove(&far).unwrap());
    assert!(!cache.remove(&far).unwrap());
    assert_eq!(cache.store().record_count(), 1);
    assert!(cache.find(&near).unwrap().is_some());
    assert!(cache.find(&far).unwrap().is_none());
}

#[test]
fn test_rulers_rebuilt_from_stored_parts() {
    let store = MemoryChartStore::new();
    let details = common::kyiv_details();
    let chart = sample_chart();
    let key = BirthFingerprint::of(&details).bucket_key();

    let record = CachedChartRecord::from_chart(&chart, &details, &key).unwrap();
    let stored = serde_json::to_value(&record).unwrap();
    assert!(stored.get("houseRulers").is_none());
    assert!(stored["planetsJson"].is_string());

    store.store(&key, &[record]).unwrap();
    let cache = ChartCache::new(store);
    let found = cache.find(&details).unwrap().unwrap();
    assert_eq!(found.house_rulers, chart.house_rulers);
    assert_eq!(found.calculated_at, chart.calculated_at);
}

#[test]
fn test_file_store_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let details = common::kyiv_details();
    let chart = sample_chart().with_image_reference("charts/olena.png");

    {
        let cache = ChartCache::new(FileChartStore::new(dir.path()).unwrap());
        cache.save(&chart, &details).unwrap();
    }

    let cache = ChartCache::new(FileChartStore::new(dir.path()).unwrap());
    let found = cache.find(&details).unwrap().unwrap();
    assert_eq!(found, chart);

    let files: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with(".json"));
}

#[test]
fn test_file_store_remove_deletes_bucket() {
    let dir = TempDir::new().unwrap();
    let cache = ChartCache::new(FileChartStore::new(dir.path()).unwrap());
    let details = common::kyiv_details();

    cache.save(&sample_chart(), &details).unwrap();
    assert!(cache.remove(&details).unwrap());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    assert!(cache.find(&details).unwrap().is_none());
}

#[test]
fn test_corrupt_bucket_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let store = FileChartStore::new(dir.path().join("charts")).unwrap();
    let details = common::kyiv_details();
    let key = BirthFingerprint::of(&details).bucket_key();
    fs::write(store.root().join(format!("{}.json", key)), "{ not json").unwrap();

    let cache = ChartCache::new(store);
    assert!(matches!(
        cache.find(&details),
        Err(CacheError::Decode { .. })
    ));
}

#[test]
fn test_save_replaces_corrupt_bucket() {
    let dir = TempDir::new().unwrap();
    let store = FileChartStore::new(dir.path()).unwrap();
    let details = common::kyiv_details();
    let key = BirthFingerprint::of(&details).bucket_key();
    fs::write(store.root().join(format!("{}.json", key)), "{ not json").unwrap();

    let cache = ChartCache::new(store);
    cache.save(&sample_chart(), &details).unwrap();
    assert_eq!(cache.find(&details).unwrap(), Some(sample_chart()));
}

#[test]
fn test_file_stores_sharing_a_directory_leave_no_temp_files() {
    let dir = TempDir::new().unwrap();
    let chart = sample_chart();
    let details = common::kyiv_details();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let chart = &chart;
            let details = &details;
            let root = dir.path();
            scope.spawn(move || {
                // Separate instances share no lock, like separate processes
                let cache = ChartCache::new(FileChartStore::new(root).unwrap());
                for _ in 0..5 {
                    cache.save(chart, details).unwrap();
                }
            });
        }
    });

    let cache = ChartCache::new(FileChartStore::new(dir.path()).unwrap());
    assert_eq!(cache.find(&details).unwrap(), Some(chart));
    let files: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1, "{:?}", files);
    assert!(files[0].ends_with(".json"));
}

#[test]
fn test_concurrent_saves_keep_every_entry() {
    let cache = ChartCache::new(MemoryChartStore::new());
    let chart = sample_chart();

    std::thread::scope(|scope| {
        for i in 0..8 {
            let cache = &cache;
            let chart = &chart;
            scope.spawn(move || {
                let mut details = common::kyiv_details();
                details.coordinate =
                    Some(GeoCoordinate::new(50.0 + i as f64 * 0.01, 30.52).unwrap());
                cache.save(chart, &details).unwrap();
            });
        }
    });

    assert_eq!(cache.store().record_count(), 8);
}
