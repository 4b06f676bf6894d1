//! Open-Meteo weather against a local HTTP stub.
//!
//! The stub answers forecast and reverse-geocode requests with recorded
//! bodies and remembers each request line.

#![allow(clippy::disallowed_types)]

use std::{
    io::{BufRead, BufReader, Write},
    net::{SocketAddr, TcpListener},
    sync::{Arc, Mutex},
    thread,
};

use roomlink_app::WeatherService;
use roomlink_core::Location;
use roomlink_tui::{LauncherConfig, OpenMeteoWeather, config::WeatherSource};

const FORECAST: &str = r#"{
    "current": { "temperature_2m": 35.4, "weathercode": 0 },
    "daily": {
        "time": ["2026-03-02", "2026-03-03", "2026-03-04", "2026-03-05", "2026-03-06"],
        "weathercode": [0, 0, 1, 2, 3],
        "temperature_2m_max": [36.1, 35.2, 34.6, 33.9, 33.0]
    }
}"#;

struct Stub {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Serve `connections` requests, answering `/reverse` with `place`.
fn serve(connections: usize, place: &'static str) -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    thread::spawn(move || {
        for stream in listener.incoming().take(connections) {
            let mut stream = stream.unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut header = String::new();
            while reader.read_line(&mut header).unwrap() > 2 {
                header.clear();
            }

            let body = if request_line.contains("/reverse") { place } else { FORECAST };
            seen.lock().unwrap().push(request_line.trim_end().to_owned());
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        }
    });

    Stub { addr, requests }
}

fn weather_at(addr: SocketAddr) -> OpenMeteoWeather {
    let mut config = LauncherConfig::default();
    config.weather.source = WeatherSource::OpenMeteo;
    config.weather.forecast_url = format!("http://{addr}/v1/forecast");
    config.weather.geocode_url = format!("http://{addr}/reverse");
    config.weather.timeout_ms = 2_000;
    OpenMeteoWeather::new(&config.weather)
}

#[tokio::test]
async fn fetches_forecast_and_city() {
    let stub = serve(2, r#"{"address":{"town":"Dubai Marina","country":"UAE"}}"#);
    let weather = weather_at(stub.addr);

    let location = Location { lat: 25.08, lon: 55.14, city: None };
    let snapshot = weather.weather(&location).await.unwrap();

    assert_eq!(snapshot.temp, 35.0);
    assert_eq!(snapshot.condition, "Clear Sky");
    assert_eq!(snapshot.city, "Dubai Marina");
    assert_eq!(snapshot.forecast.len(), 3);
    assert_eq!(snapshot.forecast[0].day, "Tue");
    assert_eq!(snapshot.forecast[2].temp, 34.0);

    let requests = stub.requests.lock().unwrap().clone();
    let forecast = requests.iter().find(|r| r.contains("/v1/forecast")).unwrap();
    assert!(forecast.contains("latitude=25.08"));
    assert!(forecast.contains("daily=weathercode%2Ctemperature_2m_max"));
    let reverse = requests.iter().find(|r| r.contains("/reverse")).unwrap();
    assert!(reverse.contains("zoom=10"));
}

#[tokio::test]
async fn unnamed_place_keeps_location_city() {
    let stub = serve(2, r#"{"error":"Unable to geocode"}"#);
    let weather = weather_at(stub.addr);

    let location = Location { lat: 51.5, lon: -0.12, city: Some("London".into()) };
    let snapshot = weather.weather(&location).await.unwrap();
    assert_eq!(snapshot.city, "London");
}

#[tokio::test]
async fn unreachable_service_yields_nothing() {
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let weather = weather_at(addr);

    assert!(weather.weather(&Location::fallback()).await.is_none());
    assert!(weather.lookup(&Location::fallback()).await.is_err());
}
