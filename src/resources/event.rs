//! The audit event stream. Read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiClient, HttpMethod};
use crate::rest::binder::QueryOptions;
use crate::rest::errors::ApiError;
use crate::rest::link::RestLink;
use crate::rest::operation::{BinderSpec, RemoteOperation};
use crate::rest::representation::{Representation, ResourceCollection};

/// Fixed path of the events collection.
pub const EVENTS_PATH: &str = "/events";

/// Wire representation of an audit event.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "event", default)]
pub struct EventDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(rename = "actionPerformed", skip_serializing_if = "Option::is_none")]
    pub action_performed: Option<String>,
    /// Login of the user the action is attributed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enterprise: Option<String>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for EventDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.event+xml";
    const NAME: &'static str = "Event";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of the events collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "events", default)]
pub struct EventsDto {
    #[serde(rename = "event")]
    collection: Vec<EventDto>,
}

impl ResourceCollection for EventsDto {
    type Item = EventDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.events+xml";

    fn into_items(self) -> Vec<EventDto> {
        self.collection
    }
}

const EVENT_LIST: RemoteOperation = RemoteOperation {
    name: "event.list",
    method: HttpMethod::Get,
    binder: BinderSpec::None,
    accept: EventsDto::MEDIA_TYPE,
    absent_on: &[],
};

/// An audit event. Server-written; this client only reads them.
#[derive(Clone, Debug)]
pub struct Event {
    dto: EventDto,
}

impl Event {
    /// Lists events, most recent first, honoring server-side filters
    /// passed as query options (e.g. `severity`, `datefrom`).
    pub async fn list(client: &ApiClient, options: &QueryOptions) -> Result<Vec<Self>, ApiError> {
        let items = client
            .list::<EventsDto>(&EVENT_LIST, EVENTS_PATH, options)
            .await?;
        Ok(items.into_iter().map(|dto| Self { dto }).collect())
    }

    /// The held wire representation.
    #[must_use]
    pub fn dto(&self) -> &EventDto {
        &self.dto
    }

    /// When the event happened.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.dto.timestamp
    }

    /// The event severity, e.g. `"INFO"` or `"ERROR"`.
    #[must_use]
    pub fn severity(&self) -> Option<&str> {
        self.dto.severity.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_dto_parses_timestamp_and_actor() {
        let xml = r#"<event>
            <id>12</id>
            <timestamp>2014-06-02T10:15:30Z</timestamp>
            <severity>INFO</severity>
            <actionPerformed>VAPP_DEPLOY</actionPerformed>
            <performer>admin</performer>
        </event>"#;
        let dto: EventDto = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(dto.severity.as_deref(), Some("INFO"));
        assert_eq!(dto.action_performed.as_deref(), Some("VAPP_DEPLOY"));
        assert!(dto.timestamp.is_some());
    }

    #[test]
    fn test_events_collection_parses() {
        let xml = r#"<events><event><severity>WARNING</severity></event></events>"#;
        let collection: EventsDto = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(collection.into_items().len(), 1);
    }
}
