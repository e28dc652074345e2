use cityscout::ScoutError;
use cityscout::db::{
    CachedRows, EntityKind, LookupKey, NewEvent, NewLocation, NewRecords, NewWeatherDay,
};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_database_url(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "cityscout-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    format!("sqlite:{}", temp_path.display())
}

fn seattle() -> NewLocation {
    NewLocation {
        search_query: "seattle".to_string(),
        formatted_query: "Seattle, WA, USA".to_string(),
        latitude: 47.6062095,
        longitude: -122.3320708,
    }
}

fn days() -> Vec<NewWeatherDay> {
    vec![
        NewWeatherDay {
            forecast: "Rain.".to_string(),
            time: "Mon Mar 04 2019".to_string(),
        },
        NewWeatherDay {
            forecast: "Drizzle.".to_string(),
            time: "Tue Mar 05 2019".to_string(),
        },
    ]
}

#[tokio::test]
async fn location_insert_and_lookup() {
    let db = cityscout::db::spawn(&temp_database_url("db-location"))
        .await
        .expect("failed to spawn store");

    // 1) fresh store => miss, not an error
    let rows = db
        .find(
            EntityKind::Location,
            LookupKey::SearchQuery("seattle".to_string()),
        )
        .await
        .expect("find failed");
    assert!(rows.is_empty());
    assert_eq!(rows.kind(), EntityKind::Location);

    // 2) insert => store assigns the id
    let row = db.insert_one(seattle()).await.expect("insert failed");
    assert!(row.id > 0);
    assert_eq!(row.search_query, "seattle");
    assert_eq!(row.formatted_query, "Seattle, WA, USA");

    // 3) lookup by exact search text returns the same row
    let found = db
        .find_location("seattle")
        .await
        .expect("find failed")
        .expect("row should be cached");
    assert_eq!(found, row);
    assert!(db.find_location("Seattle").await.expect("find failed").is_none());

    // 4) a second insert for the same text returns the existing row
    let again = db.insert_one(seattle()).await.expect("insert failed");
    assert_eq!(again.id, row.id);

    db.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
async fn weather_batch_is_deduplicated_and_evictable() {
    let db = cityscout::db::spawn(&temp_database_url("db-weather"))
        .await
        .expect("failed to spawn store");
    let location = db.insert_one(seattle()).await.expect("insert failed");

    let stored = db
        .insert_batch(NewRecords::WeatherDays {
            location_id: location.id,
            days: days(),
        })
        .await
        .expect("batch failed")
        .into_weather_days()
        .expect("weather rows");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|r| r.location_id == location.id));
    assert_eq!(stored[0].created_at, stored[1].created_at);

    // Re-inserting the same days must not grow the cached set.
    db.insert_batch(NewRecords::WeatherDays {
        location_id: location.id,
        days: days(),
    })
    .await
    .expect("batch failed");
    let cached = db.find_weather(location.id).await.expect("find failed");
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0].time, "Mon Mar 04 2019");

    let deleted = db
        .delete_by_location(EntityKind::WeatherDay, location.id)
        .await
        .expect("delete failed");
    assert_eq!(deleted, 2);
    assert!(db.find_weather(location.id).await.expect("find failed").is_empty());

    db.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
async fn event_batch_keeps_null_summary() {
    let db = cityscout::db::spawn(&temp_database_url("db-events"))
        .await
        .expect("failed to spawn store");
    let location = db.insert_one(seattle()).await.expect("insert failed");

    let rows = db
        .insert_batch(NewRecords::Events {
            location_id: location.id,
            events: vec![
                NewEvent {
                    link: "https://e/1".to_string(),
                    name: "Jazz Night".to_string(),
                    event_date: "Sun Mar 10 2019".to_string(),
                    summary: None,
                },
                NewEvent {
                    link: "https://e/2".to_string(),
                    name: "Meetup".to_string(),
                    event_date: "Mon Mar 11 2019".to_string(),
                    summary: Some("Bring a laptop".to_string()),
                },
            ],
        })
        .await
        .expect("batch failed");
    assert!(matches!(rows, CachedRows::Events(ref r) if r.len() == 2));

    let cached = db.find_events(location.id).await.expect("find failed");
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0].summary, None);
    assert_eq!(cached[1].summary.as_deref(), Some("Bring a laptop"));

    db.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
async fn batch_for_unknown_location_rolls_back() {
    let db = cityscout::db::spawn(&temp_database_url("db-fk"))
        .await
        .expect("failed to spawn store");

    let err = db
        .insert_batch(NewRecords::WeatherDays {
            location_id: 999,
            days: days(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ScoutError::DatabaseError(_)), "{err}");
    assert!(db.find_weather(999).await.expect("find failed").is_empty());

    db.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
async fn mismatched_keys_and_location_deletes_are_rejected() {
    let db = cityscout::db::spawn(&temp_database_url("db-keys"))
        .await
        .expect("failed to spawn store");

    let err = db
        .find(EntityKind::Location, LookupKey::LocationId(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ScoutError::InvalidRequest(_)));

    let err = db
        .find(
            EntityKind::Event,
            LookupKey::SearchQuery("seattle".to_string()),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScoutError::InvalidRequest(_)));

    let err = db
        .delete_by_location(EntityKind::Location, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ScoutError::InvalidRequest(_)));

    db.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
async fn replace_batch_swaps_rows_atomically() {
    let db = cityscout::db::spawn(&temp_database_url("db-replace"))
        .await
        .expect("failed to spawn store");
    let location = db.insert_one(seattle()).await.expect("insert failed");

    let old = db
        .insert_batch(NewRecords::WeatherDays {
            location_id: location.id,
            days: days(),
        })
        .await
        .expect("batch failed")
        .into_weather_days()
        .expect("weather rows");

    // Only the new day survives.
    let fresh = vec![NewWeatherDay {
        forecast: "Sunny.".to_string(),
        time: "Wed Mar 06 2019".to_string(),
    }];
    let replaced = db
        .replace_batch(NewRecords::WeatherDays {
            location_id: location.id,
            days: fresh,
        })
        .await
        .expect("replace failed")
        .into_weather_days()
        .expect("weather rows");
    let cached = db.find_weather(location.id).await.expect("find failed");
    assert_eq!(cached, replaced);
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].forecast, "Sunny.");
    assert!(old.iter().all(|row| row.time != cached[0].time));

    db.shutdown().await.expect("shutdown failed");
}
