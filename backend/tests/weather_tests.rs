//! Weather provider tests
//!
//! Covers snapshot assembly, LRU memoization and fallback behavior:
//! - Rounding and rainfall aggregation
//! - Cache hits, key rounding and eviction
//! - Fallback on upstream errors, empty series and timeouts

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agro_scout_backend::external::{
    ClimateSource, CurrentConditions, OpenMeteoClient, ReferenceWindow, UpstreamError,
};
use agro_scout_backend::services::WeatherProvider;
use shared::{GpsCoordinates, WeatherSnapshot, FALLBACK_WEATHER};

/// Scripted climate source that counts upstream calls
#[derive(Clone)]
struct ScriptedSource {
    current_calls: Arc<AtomicUsize>,
    archive_calls: Arc<AtomicUsize>,
    current: Option<CurrentConditions>,
    daily: Vec<Option<f64>>,
}

impl ScriptedSource {
    fn healthy() -> Self {
        Self {
            current_calls: Arc::new(AtomicUsize::new(0)),
            archive_calls: Arc::new(AtomicUsize::new(0)),
            current: Some(CurrentConditions {
                temperature_celsius: 28.46,
                humidity_percent: 81.0,
            }),
            // 3650 present daily totals of 3.5 mm, interleaved with gaps
            daily: (0..3650)
                .map(|i| if i % 10 == 9 { None } else { Some(3.5) })
                .chain(std::iter::repeat(Some(3.5)).take(365))
                .collect(),
        }
    }

    fn failing() -> Self {
        Self {
            current: None,
            ..Self::healthy()
        }
    }

    fn dry_archive() -> Self {
        Self {
            daily: vec![None; 100],
            ..Self::healthy()
        }
    }

    fn calls(&self) -> (usize, usize) {
        (
            self.current_calls.load(Ordering::SeqCst),
            self.archive_calls.load(Ordering::SeqCst),
        )
    }
}

impl ClimateSource for ScriptedSource {
    async fn current_conditions(
        &self,
        _coords: GpsCoordinates,
    ) -> Result<CurrentConditions, UpstreamError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        self.current
            .ok_or_else(|| UpstreamError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
    }

    async fn daily_precipitation(
        &self,
        _coords: GpsCoordinates,
        _window: ReferenceWindow,
    ) -> Result<Vec<Option<f64>>, UpstreamError> {
        self.archive_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.daily.clone())
    }
}

fn provider(source: ScriptedSource, capacity: usize) -> WeatherProvider<ScriptedSource> {
    WeatherProvider::new(
        source,
        ReferenceWindow::default(),
        NonZeroUsize::new(capacity).unwrap(),
    )
}

const PUNJAB: GpsCoordinates = GpsCoordinates {
    latitude: 30.7333,
    longitude: 76.7794,
};

// ============================================================================
// Snapshot Assembly
// ============================================================================

mod snapshot {
    use super::*;

    #[tokio::test]
    async fn rounds_readings_and_averages_rainfall_per_year() {
        let weather = provider(ScriptedSource::healthy(), 10);
        let snapshot = weather.get_weather(PUNJAB).await;

        // 3650 present days at 3.5 mm over 30 years
        assert_eq!(
            snapshot,
            WeatherSnapshot {
                temperature: 28.5,
                humidity: 81.0,
                rainfall: 425.8,
            }
        );
    }
}

// ============================================================================
// Memoization
// ============================================================================

mod caching {
    use super::*;

    #[tokio::test]
    async fn repeat_lookup_hits_cache() {
        let source = ScriptedSource::healthy();
        let weather = provider(source.clone(), 10);

        let first = weather.get_weather(PUNJAB).await;
        let second = weather.get_weather(PUNJAB).await;

        assert_eq!(first, second);
        assert_eq!(source.calls(), (1, 1));
        assert_eq!(weather.cached_locations(), 1);
    }

    #[tokio::test]
    async fn nearby_coordinates_share_an_entry() {
        let source = ScriptedSource::healthy();
        let weather = provider(source.clone(), 10);

        weather.get_weather(GpsCoordinates::new(30.71, 76.79)).await;
        weather.get_weather(GpsCoordinates::new(30.74, 76.76)).await;

        assert_eq!(source.calls(), (1, 1));
    }

    #[tokio::test]
    async fn distinct_locations_are_fetched_separately() {
        let source = ScriptedSource::healthy();
        let weather = provider(source.clone(), 10);

        weather.get_weather(GpsCoordinates::new(30.7, 76.8)).await;
        weather.get_weather(GpsCoordinates::new(12.9, 77.6)).await;

        assert_eq!(source.calls(), (2, 2));
        assert_eq!(weather.cached_locations(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_share_one_entry() {
        let source = ScriptedSource::healthy();
        let weather = Arc::new(provider(source.clone(), 10));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let weather = Arc::clone(&weather);
                tokio::spawn(async move {
                    let snapshot = weather.get_weather(PUNJAB).await;
                    (snapshot, weather.cached_locations())
                })
            })
            .collect();

        let mut snapshots = Vec::new();
        for task in tasks {
            let (snapshot, cached) = task.await.unwrap();
            assert!(cached <= 1, "cache grew to {} entries", cached);
            snapshots.push(snapshot);
        }

        assert!(snapshots.iter().all(|s| *s == snapshots[0]));
        assert_eq!(weather.cached_locations(), 1);
        // Concurrent misses may each fetch, but never more than once per caller
        let (current, archive) = source.calls();
        assert!((1..=8).contains(&current));
        assert_eq!(current, archive);
    }

    #[tokio::test]
    async fn least_recently_used_entry_is_evicted() {
        let source = ScriptedSource::healthy();
        let weather = provider(source.clone(), 2);
        let a = GpsCoordinates::new(10.0, 10.0);
        let b = GpsCoordinates::new(20.0, 20.0);
        let c = GpsCoordinates::new(30.0, 30.0);

        weather.get_weather(a).await;
        weather.get_weather(b).await;
        // Touch a so b becomes least recently used
        weather.get_weather(a).await;
        weather.get_weather(c).await;
        assert_eq!(source.calls(), (3, 3));
        assert_eq!(weather.cached_locations(), 2);

        weather.get_weather(a).await;
        assert_eq!(source.calls(), (3, 3));
        weather.get_weather(b).await;
        assert_eq!(source.calls(), (4, 4));
    }
}

// ============================================================================
// Fallback
// ============================================================================

mod fallback {
    use super::*;

    #[tokio::test]
    async fn upstream_error_yields_fallback_without_caching() {
        let source = ScriptedSource::failing();
        let weather = provider(source.clone(), 10);

        assert_eq!(weather.get_weather(PUNJAB).await, FALLBACK_WEATHER);
        assert_eq!(weather.cached_locations(), 0);

        // Not cached, so the next request retries upstream
        weather.get_weather(PUNJAB).await;
        assert_eq!(source.calls().0, 2);
    }

    #[tokio::test]
    async fn empty_precipitation_series_yields_fallback() {
        let weather = provider(ScriptedSource::dry_archive(), 10);
        let snapshot = weather.get_weather(PUNJAB).await;
        assert_eq!(snapshot.temperature, 25.0);
        assert_eq!(snapshot.humidity, 60.0);
        assert_eq!(snapshot.rainfall, 1200.0);
    }

    #[tokio::test]
    async fn unreachable_service_yields_fallback() {
        let client = OpenMeteoClient::new(
            "http://127.0.0.1:9/v1/forecast".to_string(),
            "http://127.0.0.1:9/v1/archive".to_string(),
            None,
            Duration::from_secs(2),
        )
        .unwrap();
        let weather = WeatherProvider::new(
            client,
            ReferenceWindow::default(),
            NonZeroUsize::new(4).unwrap(),
        );

        assert_eq!(weather.get_weather(PUNJAB).await, FALLBACK_WEATHER);
        assert_eq!(weather.cached_locations(), 0);
    }

    #[tokio::test]
    async fn slow_service_times_out_to_fallback() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = OpenMeteoClient::new(
            format!("http://{}/v1/forecast", addr),
            format!("http://{}/v1/archive", addr),
            None,
            Duration::from_millis(200),
        )
        .unwrap();
        let weather = WeatherProvider::new(
            client,
            ReferenceWindow::default(),
            NonZeroUsize::new(4).unwrap(),
        );

        let started = std::time::Instant::now();
        assert_eq!(weather.get_weather(PUNJAB).await, FALLBACK_WEATHER);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
