#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;
use wiremock::MockServer;

use solarpress::config::BackendConfig;
use solarpress::db::Backend;
use solarpress::models::*;
use solarpress::services::Session;

pub const ANON_KEY: &str = "anon-test-key";
pub const ACCESS_TOKEN: &str = "access-token-0";
pub const REFRESH_TOKEN: &str = "refresh-token-0";
pub const ADMIN_EMAIL: &str = "admin@test.com";

pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("Invalid time format in test helper")
        .with_timezone(&Utc)
}

pub fn uuid(n: u8) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-0000-0000-0000000000{:02x}", n)).unwrap()
}

pub fn backend_for(server: &MockServer) -> Backend {
    let url = Url::parse(&server.uri()).unwrap();
    Backend::new(&BackendConfig::new(url, ANON_KEY)).unwrap()
}

pub fn get_seed_project_0() -> Project {
    Project {
        id: uuid(0),
        title: "Anantapur Solar Park".to_string(),
        description: "Ground-mounted utility scale plant".to_string(),
        location: "Anantapur, Andhra Pradesh".to_string(),
        capacity: "12 MW".to_string(),
        image_url: "https://img.test/anantapur.jpg".to_string(),
        status: ProjectStatus::Operational,
        completion_date: NaiveDate::from_ymd_opt(2023, 3, 31),
        featured: true,
        order_index: 0,
        created_at: parse_time("2026-01-04T22:15:06Z"),
        updated_at: parse_time("2026-01-04T22:15:06Z"),
    }
}

pub fn get_seed_project_1() -> Project {
    Project {
        id: uuid(1),
        title: "Kurnool Rooftop Cluster".to_string(),
        description: "Distributed rooftop installations".to_string(),
        location: "Kurnool, Andhra Pradesh".to_string(),
        capacity: "4 MW".to_string(),
        image_url: String::new(),
        status: ProjectStatus::Completed,
        completion_date: None,
        featured: false,
        order_index: 1,
        created_at: parse_time("2026-01-05T13:22:56Z"),
        updated_at: parse_time("2026-01-05T13:22:56Z"),
    }
}

pub fn get_seed_project_2() -> Project {
    Project {
        id: uuid(2),
        title: "Tumkur Expansion".to_string(),
        description: "Second phase".to_string(),
        location: "Tumkur, Karnataka".to_string(),
        capacity: "10 MW".to_string(),
        image_url: String::new(),
        status: ProjectStatus::UnderConstruction,
        completion_date: None,
        featured: true,
        order_index: 2,
        created_at: parse_time("2026-01-06T09:35:22Z"),
        updated_at: parse_time("2026-01-06T09:35:22Z"),
    }
}

pub fn seed_projects() -> Vec<Project> {
    vec![get_seed_project_0(), get_seed_project_1(), get_seed_project_2()]
}

pub fn get_seed_content(section: &str, n: u8) -> SiteContent {
    SiteContent {
        id: uuid(0x10 + n),
        section: section.to_string(),
        title: format!("{section} title"),
        content: format!("{section} body"),
        image_url: None,
        data: json!({}),
        updated_at: parse_time("2026-01-04T22:15:06Z"),
    }
}

pub fn get_seed_tab(tab: &str) -> ProjectTabContent {
    ProjectTabContent {
        tab: tab.to_string(),
        image_url: format!("https://img.test/{}.jpg", tab.to_lowercase()),
        title: format!("{tab} portfolio"),
        description: format!("All of our {tab} sites"),
    }
}

pub fn json_of<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}

/// Body of a successful password or refresh grant.
pub fn token_body(access_token: &str, refresh_token: &str, expires_in: i64) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "token_type": "bearer",
        "expires_in": expires_in,
        "user": { "id": uuid(0xa0).to_string(), "email": ADMIN_EMAIL }
    })
}

pub fn signed_in_session() -> Session {
    Session {
        user_id: uuid(0xa0),
        email: ADMIN_EMAIL.to_string(),
        access_token: ACCESS_TOKEN.to_string(),
        refresh_token: REFRESH_TOKEN.to_string(),
        expires_at: Utc::now() + Duration::hours(1),
    }
}

pub fn expired_session() -> Session {
    Session {
        expires_at: Utc::now() - Duration::minutes(5),
        ..signed_in_session()
    }
}
