//! The closed catalog of analytics and lifecycle events.
//!
//! Every kind the catalog knows is a variant of [`Event`]; the set is fixed
//! at compile time and enumerable through [`EventKind::ALL`]. Each event
//! exposes a stable string key (the variant name, also the serialized tag)
//! and a free-form string-to-string parameter map.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Free-form string parameters attached to an event.
pub type EventParams = HashMap<String, String>;

/// Every event kind the catalog knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ProfileIdentified,
    ScreenViewed,
    Reset,
    TrackMetric,
    TrackInAppMetric,
    RegisterDeviceToken,
    DeleteDeviceToken,
    NewSubscription,
}

impl EventKind {
    /// All known kinds, in declaration order.
    pub const ALL: [EventKind; 8] = [
        EventKind::ProfileIdentified,
        EventKind::ScreenViewed,
        EventKind::Reset,
        EventKind::TrackMetric,
        EventKind::TrackInAppMetric,
        EventKind::RegisterDeviceToken,
        EventKind::DeleteDeviceToken,
        EventKind::NewSubscription,
    ];

    /// Stable string key for this kind (equal to the serialized tag).
    pub fn key(&self) -> &'static str {
        match self {
            EventKind::ProfileIdentified => "ProfileIdentified",
            EventKind::ScreenViewed => "ScreenViewed",
            EventKind::Reset => "Reset",
            EventKind::TrackMetric => "TrackMetric",
            EventKind::TrackInAppMetric => "TrackInAppMetric",
            EventKind::RegisterDeviceToken => "RegisterDeviceToken",
            EventKind::DeleteDeviceToken => "DeleteDeviceToken",
            EventKind::NewSubscription => "NewSubscription",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for EventKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| StoreError::UnknownEventKind(s.to_string()))
    }
}

/// A single event record.
///
/// Serialized with the kind key as the `type` tag, so [`Event::key`] always
/// equals the tag on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A profile was identified.
    ProfileIdentified {
        identifier: String,
        #[serde(default)]
        params: EventParams,
    },

    /// A screen was viewed.
    ScreenViewed {
        name: String,
        #[serde(default)]
        params: EventParams,
    },

    /// Profile and device state was reset.
    Reset {
        #[serde(default)]
        params: EventParams,
    },

    /// A push metric was tracked.
    TrackMetric {
        delivery_id: String,
        event: String,
        device_token: String,
        #[serde(default)]
        params: EventParams,
    },

    /// An in-app metric was tracked.
    TrackInAppMetric {
        delivery_id: String,
        event: String,
        #[serde(default)]
        params: EventParams,
    },

    /// A device token was registered.
    RegisterDeviceToken {
        token: String,
        #[serde(default)]
        params: EventParams,
    },

    /// The device token was deleted.
    DeleteDeviceToken {
        #[serde(default)]
        params: EventParams,
    },

    /// A subscription was registered for an event kind.
    NewSubscription {
        event_type: String,
        #[serde(default)]
        params: EventParams,
    },
}

impl Event {
    /// A profile was identified.
    pub fn profile_identified(identifier: impl Into<String>) -> Self {
        Event::ProfileIdentified {
            identifier: identifier.into(),
            params: EventParams::new(),
        }
    }

    /// A screen was viewed.
    pub fn screen_viewed(name: impl Into<String>) -> Self {
        Event::ScreenViewed {
            name: name.into(),
            params: EventParams::new(),
        }
    }

    /// Profile and device state was reset.
    pub fn reset() -> Self {
        Event::Reset {
            params: EventParams::new(),
        }
    }

    /// A push metric was tracked.
    pub fn track_metric(
        delivery_id: impl Into<String>,
        event: impl Into<String>,
        device_token: impl Into<String>,
    ) -> Self {
        Event::TrackMetric {
            delivery_id: delivery_id.into(),
            event: event.into(),
            device_token: device_token.into(),
            params: EventParams::new(),
        }
    }

    /// An in-app metric was tracked.
    pub fn track_in_app_metric(delivery_id: impl Into<String>, event: impl Into<String>) -> Self {
        Event::TrackInAppMetric {
            delivery_id: delivery_id.into(),
            event: event.into(),
            params: EventParams::new(),
        }
    }

    /// A device token was registered.
    pub fn register_device_token(token: impl Into<String>) -> Self {
        Event::RegisterDeviceToken {
            token: token.into(),
            params: EventParams::new(),
        }
    }

    /// The device token was deleted.
    pub fn delete_device_token() -> Self {
        Event::DeleteDeviceToken {
            params: EventParams::new(),
        }
    }

    /// A subscription was registered for `kind`; records the kind's key.
    pub fn new_subscription(kind: EventKind) -> Self {
        Event::NewSubscription {
            event_type: kind.key().to_string(),
            params: EventParams::new(),
        }
    }

    /// Replace the parameter map.
    pub fn with_params(mut self, params: EventParams) -> Self {
        *self.params_mut() = params;
        self
    }

    /// Insert one parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params_mut().insert(key.into(), value.into());
        self
    }

    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ProfileIdentified { .. } => EventKind::ProfileIdentified,
            Event::ScreenViewed { .. } => EventKind::ScreenViewed,
            Event::Reset { .. } => EventKind::Reset,
            Event::TrackMetric { .. } => EventKind::TrackMetric,
            Event::TrackInAppMetric { .. } => EventKind::TrackInAppMetric,
            Event::RegisterDeviceToken { .. } => EventKind::RegisterDeviceToken,
            Event::DeleteDeviceToken { .. } => EventKind::DeleteDeviceToken,
            Event::NewSubscription { .. } => EventKind::NewSubscription,
        }
    }

    /// Stable string key for this event (equal to the serialized tag).
    pub fn key(&self) -> &'static str {
        self.kind().key()
    }

    /// Free-form parameters attached to this event.
    pub fn params(&self) -> &EventParams {
        match self {
            Event::ProfileIdentified { params, .. } => params,
            Event::ScreenViewed { params, .. } => params,
            Event::Reset { params, .. } => params,
            Event::TrackMetric { params, .. } => params,
            Event::TrackInAppMetric { params, .. } => params,
            Event::RegisterDeviceToken { params, .. } => params,
            Event::DeleteDeviceToken { params, .. } => params,
            Event::NewSubscription { params, .. } => params,
        }
    }

    fn params_mut(&mut self) -> &mut EventParams {
        match self {
            Event::ProfileIdentified { params, .. } => params,
            Event::ScreenViewed { params, .. } => params,
            Event::Reset { params, .. } => params,
            Event::TrackMetric { params, .. } => params,
            Event::TrackInAppMetric { params, .. } => params,
            Event::RegisterDeviceToken { params, .. } => params,
            Event::DeleteDeviceToken { params, .. } => params,
            Event::NewSubscription { params, .. } => params,
        }
    }
}
