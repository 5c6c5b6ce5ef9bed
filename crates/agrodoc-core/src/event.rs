//! Management-event flavor of a record component.

use crate::{Component, DocError, DocKind, RecordCollection};

/// The recognized management-event codes of an `event` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Planting,
    Irrigation,
    Fertilizer,
    Tillage,
    OrganicMatter,
    Harvest,
    MulchAdd,
    MulchRemove,
    /// Missing or unrecognized event code.
    Invalid,
}

impl EventKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "planting" => Self::Planting,
            "irrigation" => Self::Irrigation,
            "fertilizer" => Self::Fertilizer,
            "tillage" => Self::Tillage,
            "organic_matter" => Self::OrganicMatter,
            "harvest" => Self::Harvest,
            "mulch_add" => Self::MulchAdd,
            "mulch_remove" => Self::MulchRemove,
            _ => Self::Invalid,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Planting => "planting",
            Self::Irrigation => "irrigation",
            Self::Fertilizer => "fertilizer",
            Self::Tillage => "tillage",
            Self::OrganicMatter => "organic_matter",
            Self::Harvest => "harvest",
            Self::MulchAdd => "mulch_add",
            Self::MulchRemove => "mulch_remove",
            Self::Invalid => "invalid",
        }
    }
}

/// One management event: a component of kind [`DocKind::Event`] with its
/// `event` code and `date` cached at construction.
#[derive(Debug, Clone)]
pub struct Event {
    component: Component,
    kind: EventKind,
    date: String,
}

impl Event {
    /// Wraps an event object buffer, reading `event` and `date` up front.
    pub fn from_bytes(buf: Vec<u8>) -> Result<Self, DocError> {
        let component = Component::from_bytes(buf, DocKind::Event);
        let kind = EventKind::from_code(&component.value_or("event", "")?);
        let date = component.value_or("date", "")?;
        Ok(Self {
            component,
            kind,
            date,
        })
    }

    /// Re-wraps an existing component (typically a record from an events
    /// array) as an event.
    pub fn from_component(component: Component) -> Result<Self, DocError> {
        Self::from_bytes(component.into_bytes())
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The event date as stored (empty when absent). Dates sort
    /// lexicographically in the dataset's ISO form.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn into_component(self) -> Component {
        self.component
    }
}

/// Collects an events array into chronological order. The sort is stable, so
/// events sharing a date keep their record order.
pub fn events_sorted(records: &RecordCollection) -> Result<Vec<Event>, DocError> {
    let mut events = Vec::new();
    for record in records {
        events.push(Event::from_component(record?)?);
    }
    events.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(events)
}
