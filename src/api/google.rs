//! Google Calendar REST API v3 event source.
//!
//! ## Endpoints
//!
//! - `GET {api_url}/calendars/{id}`: calendar metadata; 404/400 means the
//!   id is invalid
//! - `GET {api_url}/calendars/{id}/events`: expanded single events between
//!   `timeMin` and `timeMax`, ordered by start time, paged via `nextPageToken`
//!
//! ## Field mapping
//!
//! | Google                               | RawEvent  |
//! |--------------------------------------|-----------|
//! | `summary`                            | `title`   |
//! | `colorId`                            | `color`   |
//! | `organizer.self == true`             | `OWNER`   |
//! | attendee with `self == true`         | its `responseStatus` |
//! | `start.dateTime` / `start.date`      | `start` (all-day at local midnight) |
//!
//! ## Authentication
//!
//! A bearer token is taken from `CALSUM_GOOGLE_TOKEN` when set, otherwise
//! from the encrypted token cache, prompting on first use. When Google
//! answers 401 the cached token is dropped and the user is asked again, up
//! to [`MAX_RETRY_COUNT`] times.

use super::{EventSource, SourceCalendar, MAX_RETRY_COUNT};
use crate::libs::config::ConfigModule;
use crate::libs::error::ReportError;
use crate::libs::event::RawEvent;
use crate::libs::messages::Message;
use crate::libs::secret::Secret;
use crate::libs::window::TimeWindow;
use crate::{msg_debug, msg_print, msg_warning};
use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/calendar/v3";
pub const TOKEN_ENV_VAR: &str = "CALSUM_GOOGLE_TOKEN";
const TOKEN_FILE: &str = ".google_token";
const PAGE_SIZE: &str = "250";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GoogleConfig {
    pub api_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl GoogleConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "google".to_string(),
            name: Message::ConfigModuleGoogle.to_string(),
        }
    }

    pub fn init(config: &Option<GoogleConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleGoogle);
        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptGoogleApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CalendarResource {
    id: String,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsPage {
    #[serde(default)]
    items: Vec<EventResource>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventResource {
    status: Option<String>,
    summary: Option<String>,
    color_id: Option<String>,
    start: Option<EventTime>,
    end: Option<EventTime>,
    organizer: Option<Person>,
    #[serde(default)]
    attendees: Vec<Attendee>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    date: Option<NaiveDate>,
    date_time: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize)]
struct Person {
    #[serde(rename = "self", default)]
    is_self: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Attendee {
    #[serde(rename = "self", default)]
    is_self: bool,
    response_status: Option<String>,
}

impl EventTime {
    fn instant(&self) -> Option<DateTime<FixedOffset>> {
        if let Some(date_time) = self.date_time {
            return Some(date_time);
        }
        self.date.and_then(|date| local_instant(date.and_time(NaiveTime::MIN)))
    }
}

impl EventResource {
    fn my_status(&self) -> Option<String> {
        if self.organizer.as_ref().is_some_and(|o| o.is_self) {
            return Some("OWNER".to_string());
        }
        self.attendees.iter().find(|a| a.is_self).and_then(|a| a.response_status.clone())
    }

    fn into_raw(self) -> Option<RawEvent> {
        if self.status.as_deref() == Some("cancelled") {
            return None;
        }
        let start = self.start.as_ref()?.instant()?;
        let end = self.end.as_ref()?.instant()?;
        let status = self.my_status();
        Some(RawEvent {
            title: self.summary.unwrap_or_default(),
            color: self.color_id.unwrap_or_default(),
            status,
            start,
            end,
        })
    }
}

fn local_instant(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    Local.from_local_datetime(&naive).earliest().map(|dt| dt.fixed_offset())
}

pub struct GoogleCalendar {
    client: Client,
    config: GoogleConfig,
    token: Option<String>,
    secret: Option<Secret>,
    retry: i32,
}

impl GoogleCalendar {
    /// Client using `CALSUM_GOOGLE_TOKEN` or the encrypted token cache.
    pub fn new(config: &GoogleConfig) -> Self {
        let token = std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.trim().is_empty());
        let secret = match token {
            Some(_) => None,
            None => Some(Secret::new(TOKEN_FILE, &Message::PromptGoogleToken.to_string())),
        };
        Self {
            client: Client::new(),
            config: config.clone(),
            token,
            secret,
            retry: 0,
        }
    }

    /// Client with a fixed token; a 401 is not retried.
    pub fn with_token(config: &GoogleConfig, token: &str) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            token: Some(token.to_string()),
            secret: None,
            retry: 0,
        }
    }

    fn access_token(&mut self) -> Result<String, ReportError> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }
        let secret = self.secret.as_ref().ok_or_else(|| ReportError::source(Message::GoogleTokenRejected))?;
        let token = match self.retry > 0 {
            true => secret.prompt(),
            false => secret.get_or_prompt(),
        }
        .map_err(ReportError::source)?;
        self.token = Some(token.clone());
        Ok(token)
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ReportError> {
        let mut url = Url::parse(&self.config.api_url).map_err(ReportError::source)?;
        url.path_segments_mut()
            .map_err(|_| ReportError::source(format!("invalid API url {}", self.config.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET, re-asking for the token on 401 while retries remain.
    async fn get(&mut self, url: Url, query: &[(&str, String)]) -> Result<Response, ReportError> {
        loop {
            let token = self.access_token()?;
            msg_debug!(format!("GET {}", url));
            let response = self
                .client
                .get(url.clone())
                .bearer_auth(&token)
                .query(query)
                .send()
                .await
                .map_err(|e| ReportError::source(Message::GoogleRequestFailed(e.to_string())))?;

            if response.status() != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }

            msg_warning!(Message::GoogleTokenRejected);
            let Some(secret) = &self.secret else {
                return Err(ReportError::source(Message::GoogleTokenRejected));
            };
            if self.retry >= MAX_RETRY_COUNT {
                return Err(ReportError::source(Message::GoogleTokenRetryLimit));
            }
            secret.clear().map_err(ReportError::source)?;
            self.token = None;
            self.retry += 1;
        }
    }
}

fn rfc3339(naive: NaiveDateTime) -> Result<String, ReportError> {
    local_instant(naive)
        .map(|dt| dt.to_rfc3339())
        .ok_or_else(|| ReportError::source(format!("{} does not exist in the local time zone", naive)))
}

impl EventSource for GoogleCalendar {
    async fn calendar(&mut self, id: &str) -> Result<SourceCalendar, ReportError> {
        let url = self.url(&["calendars", id])?;
        let response = self.get(url, &[]).await?;
        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
                return Err(ReportError::InvalidCalendarIdentifier(id.to_string()))
            }
            status if !status.is_success() => return Err(ReportError::source(Message::GoogleUnexpectedStatus(status.as_u16()))),
            _ => {}
        }
        let resource: CalendarResource = response.json().await.map_err(ReportError::source)?;
        Ok(SourceCalendar {
            name: resource.summary.unwrap_or_else(|| resource.id.clone()),
            id: resource.id,
        })
    }

    async fn events(&mut self, calendar: &SourceCalendar, window: &TimeWindow) -> Result<Vec<RawEvent>, ReportError> {
        let url = self.url(&["calendars", &calendar.id, "events"])?;
        let time_min = rfc3339(window.start)?;
        let time_max = rfc3339(window.end)?;

        let mut events = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![
                ("timeMin", time_min.clone()),
                ("timeMax", time_max.clone()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let response = self.get(url.clone(), &query).await?;
            match response.status() {
                StatusCode::NOT_FOUND => return Err(ReportError::InvalidCalendarIdentifier(calendar.id.clone())),
                status if !status.is_success() => return Err(ReportError::source(Message::GoogleUnexpectedStatus(status.as_u16()))),
                _ => {}
            }
            let page: EventsPage = response.json().await.map_err(ReportError::source)?;
            events.extend(page.items.into_iter().filter_map(EventResource::into_raw));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(events)
    }
}
