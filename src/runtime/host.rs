use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CapturedValue {
    #[serde(rename = "feedback")]
    Feedback(String),
    #[serde(rename = "text")]
    Text(String),
}

/// One analytics event, in the field order the host tracker receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackEvent {
    pub id: String,
    pub name: String,
    pub group: String,
    #[serde(flatten)]
    pub value: CapturedValue,
    #[serde(rename = "type")]
    pub event_type: String,
    pub event: String,
    pub offset: i64,
}

/// Capabilities the host player provides. Every method defaults to the
/// behavior of a missing capability, so a host only implements what it has.
pub trait Host {
    fn track(&mut self, _channel: &str, _event: &TrackEvent) {}

    fn current_time(&mut self) -> Option<i64> {
        None
    }

    fn seek_to(&mut self, _offset: i64) {}

    fn hide(&mut self) {}
}

/// A host with no capabilities at all.
#[derive(Debug, Default)]
pub struct DetachedHost;

impl Host for DetachedHost {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Track { channel: String, event: TrackEvent },
    SeekTo(i64),
    Hide,
}

/// Records every capability call; playback time is set by the caller.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub playback_offset: i64,
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn events(&self) -> Vec<&TrackEvent> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Track { event, .. } => Some(event),
                _ => None,
            })
            .collect()
    }
}

impl Host for RecordingHost {
    fn track(&mut self, channel: &str, event: &TrackEvent) {
        self.calls.push(HostCall::Track {
            channel: channel.to_string(),
            event: event.clone(),
        });
    }

    fn current_time(&mut self) -> Option<i64> {
        Some(self.playback_offset)
    }

    fn seek_to(&mut self, offset: i64) {
        self.calls.push(HostCall::SeekTo(offset));
    }

    fn hide(&mut self) {
        self.calls.push(HostCall::Hide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn event_serializes_in_tracker_shape() {
        let event = TrackEvent {
            id: "q1".to_string(),
            name: "Quality".to_string(),
            group: "Feedback".to_string(),
            value: CapturedValue::Feedback("4 Stars".to_string()),
            event_type: "BW".to_string(),
            event: "submitted".to_string(),
            offset: 42,
        };
        assert_eq!(
            serde_json::to_string(&event).expect("json"),
            r#"{"id":"q1","name":"Quality","group":"Feedback","feedback":"4 Stars","type":"BW","event":"submitted","offset":42}"#
        );
    }
}
