//! Live weather fetching for the animated scene.
//!
//! Fetches weather data from the wttr.in API in a background thread and maps
//! it to the scalar inputs the scene understands.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Timelike;
use nalssi_core::{Conditions, PrecipKind};
use serde::Deserialize;

/// How often to fetch new weather data (30 minutes).
const FETCH_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Wind speed in km/h that maps to full wind strength.
const MAX_WIND_KMPH: f32 = 50.0;

/// Longest summary shown before truncation.
const SUMMARY_MAX_CHARS: usize = 28;

/// One fetched observation, already mapped to scene inputs.
#[derive(Debug, Clone)]
pub struct WeatherSnapshot {
    /// Scene inputs derived from the observation.
    pub conditions: Conditions,
    /// Current temperature in Celsius.
    pub temp_c: i32,
    /// Today's high in Celsius.
    pub high_c: i32,
    /// Today's low in Celsius.
    pub low_c: i32,
    /// Short textual summary ("Partly cloudy").
    pub summary: String,
    /// Timestamp when this data was fetched.
    pub fetched_at: Instant,
}

impl WeatherSnapshot {
    /// Check if this snapshot is still fresh (less than 30 minutes old).
    pub fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < FETCH_INTERVAL
    }
}

/// wttr.in JSON response structure (partial - only fields we need).
#[derive(Debug, Deserialize)]
struct WttrResponse {
    current_condition: Vec<CurrentCondition>,
    weather: Option<Vec<DailyWeather>>,
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    #[serde(rename = "weatherCode")]
    weather_code: String,
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<DescValue>,
}

#[derive(Debug, Deserialize)]
struct DescValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct DailyWeather {
    astronomy: Vec<Astronomy>,
    #[serde(rename = "maxtempC", default)]
    max_temp_c: String,
    #[serde(rename = "mintempC", default)]
    min_temp_c: String,
}

#[derive(Debug, Deserialize)]
struct Astronomy {
    sunrise: String,
    sunset: String,
}

/// Weather monitor that fetches data in a background thread.
#[derive(Debug)]
pub struct WeatherMonitor {
    /// Latest snapshot (if a fetch has succeeded).
    snapshot: Arc<RwLock<Option<WeatherSnapshot>>>,
    /// Location string (empty for auto-detect).
    location: String,
    /// Flag to signal thread termination.
    running: Arc<RwLock<bool>>,
}

impl WeatherMonitor {
    /// Create a new weather monitor.
    pub fn new(location: String) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(None)),
            location,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start the background fetching thread.
    pub fn start(&self) {
        if let Ok(mut running) = self.running.write() {
            if *running {
                return; // Already running
            }
            *running = true;
        }

        let snapshot = self.snapshot.clone();
        let location = self.location.clone();
        let running = self.running.clone();

        thread::spawn(move || {
            // Fetch immediately on start
            fetch_and_update(&location, &snapshot);

            let mut last_fetch = Instant::now();

            loop {
                if let Ok(is_running) = running.read()
                    && !*is_running
                {
                    break;
                }

                if last_fetch.elapsed() >= FETCH_INTERVAL {
                    fetch_and_update(&location, &snapshot);
                    last_fetch = Instant::now();
                }

                thread::sleep(Duration::from_secs(60));
            }
        });
    }

    /// Stop the background thread.
    pub fn stop(&self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
    }

    /// Get the latest snapshot (if a fetch has succeeded).
    pub fn latest(&self) -> Option<WeatherSnapshot> {
        self.snapshot.read().ok().and_then(|s| s.clone())
    }
}

impl Default for WeatherMonitor {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Drop for WeatherMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Fetch weather data and update shared state.
fn fetch_and_update(location: &str, snapshot: &Arc<RwLock<Option<WeatherSnapshot>>>) {
    match fetch_weather(location) {
        Ok(data) => {
            if let Ok(mut s) = snapshot.write() {
                *s = Some(data);
            }
        }
        Err(_e) => {
            // On error, keep existing data if fresh, otherwise drop it so the
            // app falls back to its default scene
            let stale = snapshot
                .read()
                .map(|s| s.as_ref().map(|d| !d.is_fresh()).unwrap_or(false))
                .unwrap_or(false);

            if stale && let Ok(mut s) = snapshot.write() {
                *s = None;
            }
        }
    }
}

/// Fetch weather data from the wttr.in API.
fn fetch_weather(location: &str) -> Result<WeatherSnapshot, String> {
    let url = if location.is_empty() {
        "https://wttr.in/?format=j1".to_string()
    } else {
        format!("https://wttr.in/{}?format=j1", url_encode(location))
    };

    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build()
        .new_agent();

    let response: WttrResponse = agent
        .get(&url)
        .call()
        .map_err(|e| format!("HTTP error: {e}"))?
        .body_mut()
        .read_json()
        .map_err(|e| format!("JSON parse error: {e}"))?;

    let current = response
        .current_condition
        .first()
        .ok_or("No current condition")?;

    let temp_c = current.temp_c.parse().unwrap_or(15);
    let wind_kmph: f32 = current.windspeed_kmph.parse().unwrap_or(0.0);
    let (precip, precip_amount, cloud_cover) = decode_weather_code(&current.weather_code);

    let is_day = determine_is_day(&response);

    let conditions = Conditions {
        precip,
        precip_amount,
        cloud_cover,
        wind: (wind_kmph / MAX_WIND_KMPH).clamp(0.0, 1.0),
        is_day,
    };

    let today = response.weather.as_ref().and_then(|w| w.first());
    let high_c = today
        .and_then(|d| d.max_temp_c.parse().ok())
        .unwrap_or(temp_c);
    let low_c = today
        .and_then(|d| d.min_temp_c.parse().ok())
        .unwrap_or(temp_c);

    let summary = current
        .weather_desc
        .first()
        .map(|d| truncate_summary(&d.value))
        .unwrap_or_default();

    Ok(WeatherSnapshot {
        conditions,
        temp_c,
        high_c,
        low_c,
        summary,
        fetched_at: Instant::now(),
    })
}

/// Determine whether the sun is up based on sunrise/sunset.
fn determine_is_day(response: &WttrResponse) -> bool {
    let Some(astronomy) = response
        .weather
        .as_ref()
        .and_then(|w| w.first())
        .and_then(|d| d.astronomy.first())
    else {
        return true; // Default to day
    };

    let now = chrono::Local::now();
    let current_minutes = now.hour() * 60 + now.minute();

    let sunrise_mins = parse_time_to_minutes(&astronomy.sunrise).unwrap_or(6 * 60);
    let sunset_mins = parse_time_to_minutes(&astronomy.sunset).unwrap_or(18 * 60);

    current_minutes >= sunrise_mins && current_minutes < sunset_mins
}

/// Parse time string like "06:45 AM" to minutes since midnight.
fn parse_time_to_minutes(time_str: &str) -> Option<u32> {
    let parts: Vec<&str> = time_str.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }

    let time_parts: Vec<&str> = parts[0].split(':').collect();
    if time_parts.len() != 2 {
        return None;
    }

    let mut hours: u32 = time_parts[0].parse().ok()?;
    let minutes: u32 = time_parts[1].parse().ok()?;
    let is_pm = parts[1].to_uppercase() == "PM";

    if is_pm && hours != 12 {
        hours += 12;
    } else if !is_pm && hours == 12 {
        hours = 0;
    }

    Some(hours * 60 + minutes)
}

/// Simple URL encoding for location strings.
fn url_encode(s: &str) -> String {
    s.replace(' ', "+").replace(',', "%2C")
}

/// Cap the summary so it fits next to the readout.
fn truncate_summary(s: &str) -> String {
    if s.chars().count() > SUMMARY_MAX_CHARS {
        let prefix: String = s.chars().take(SUMMARY_MAX_CHARS - 3).collect();
        format!("{}...", prefix.trim_end())
    } else {
        s.to_string()
    }
}

/// Map a wttr.in weather code to precipitation kind, amount, and cloud cover.
/// See: https://www.worldweatheronline.com/developer/api/docs/weather-icons.aspx
fn decode_weather_code(code: &str) -> (PrecipKind, f32, f32) {
    match code {
        // Clear/Sunny
        "113" => (PrecipKind::Rain, 0.0, 0.0),

        // Partly cloudy
        "116" => (PrecipKind::Rain, 0.0, 0.4),

        // Cloudy / Overcast
        "119" => (PrecipKind::Rain, 0.0, 0.75),
        "122" => (PrecipKind::Rain, 0.0, 1.0),

        // Fog/Mist reads as a full deck with nothing falling
        "143" | "248" | "260" => (PrecipKind::Rain, 0.0, 1.0),

        // Light rain/drizzle
        "176" | "263" | "266" | "293" | "296" | "353" => (PrecipKind::Rain, 0.3, 0.8),

        // Moderate rain
        "299" | "302" | "356" => (PrecipKind::Rain, 0.6, 1.0),

        // Heavy rain and thunderstorms
        "305" | "308" | "359" | "200" | "386" | "389" => (PrecipKind::Rain, 1.0, 1.0),

        // Sleet, freezing rain, ice pellets
        "182" | "185" | "281" | "284" | "311" | "314" | "317" | "320" | "350" | "362" | "365"
        | "374" | "377" => (PrecipKind::Sleet, 0.5, 1.0),

        // Light snow
        "179" | "323" | "326" | "368" => (PrecipKind::Snow, 0.3, 0.8),

        // Moderate snow
        "227" | "329" | "332" | "371" | "392" => (PrecipKind::Snow, 0.6, 1.0),

        // Heavy snow and blizzard
        "230" | "335" | "338" | "395" => (PrecipKind::Snow, 1.0, 1.0),

        // Default to an overcast sky for unknown codes
        _ => (PrecipKind::Rain, 0.0, 1.0),
    }
}
