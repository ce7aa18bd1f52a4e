//! Weather provider: climate signals per coordinate with LRU memoization
//!
//! A snapshot combines current temperature and humidity with the average
//! annual rainfall over the reference window. If either upstream call fails
//! the whole snapshot falls back to [`FALLBACK_WEATHER`].

use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use lru::LruCache;
use shared::{round1, GpsCoordinates, WeatherSnapshot, FALLBACK_WEATHER};

use crate::external::weather::{annual_rainfall, ClimateSource, ReferenceWindow, UpstreamError};

/// Cache key: coordinates in integer tenths of a degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CoordKey(i32, i32);

impl From<GpsCoordinates> for CoordKey {
    fn from(coords: GpsCoordinates) -> Self {
        CoordKey(
            (coords.latitude * 10.0).round() as i32,
            (coords.longitude * 10.0).round() as i32,
        )
    }
}

/// Climate data provider backed by a [`ClimateSource`]
pub struct WeatherProvider<S> {
    source: S,
    window: ReferenceWindow,
    cache: Mutex<LruCache<CoordKey, WeatherSnapshot>>,
}

impl<S: ClimateSource> WeatherProvider<S> {
    /// Create a provider caching up to `capacity` locations
    pub fn new(source: S, window: ReferenceWindow, capacity: NonZeroUsize) -> Self {
        Self {
            source,
            window,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Climate signals for `coords`, rounded to one decimal place.
    ///
    /// Coordinates must already be range-checked. Never fails: upstream
    /// problems yield [`FALLBACK_WEATHER`], which is not cached.
    pub async fn get_weather(&self, coords: GpsCoordinates) -> WeatherSnapshot {
        let coords = coords.rounded();
        let key = CoordKey::from(coords);

        if let Some(snapshot) = self.cached(key) {
            tracing::debug!(
                latitude = coords.latitude,
                longitude = coords.longitude,
                "Weather cache hit"
            );
            return snapshot;
        }

        match self.fetch(coords).await {
            Ok(snapshot) => {
                self.lock_cache().put(key, snapshot);
                snapshot
            }
            Err(e) => {
                tracing::warn!(
                    latitude = coords.latitude,
                    longitude = coords.longitude,
                    error = %e,
                    "Weather lookup failed, serving fallback snapshot"
                );
                FALLBACK_WEATHER
            }
        }
    }

    /// Number of locations currently cached
    pub fn cached_locations(&self) -> usize {
        self.lock_cache().len()
    }

    fn cached(&self, key: CoordKey) -> Option<WeatherSnapshot> {
        self.lock_cache().get(&key).copied()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, LruCache<CoordKey, WeatherSnapshot>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn fetch(&self, coords: GpsCoordinates) -> Result<WeatherSnapshot, UpstreamError> {
        let (current, daily) = tokio::try_join!(
            self.source.current_conditions(coords),
            self.source.daily_precipitation(coords, self.window),
        )?;
        let rainfall = annual_rainfall(&daily, self.window.years())?;

        Ok(WeatherSnapshot {
            temperature: round1(current.temperature_celsius),
            humidity: round1(current.humidity_percent),
            rainfall: round1(rainfall),
        })
    }
}
