//! Input events
//!
//! A minimal pointer event model for gesture-driven widgets. Events carry a
//! millisecond timestamp so velocity estimation stays deterministic and
//! testable without reading wall-clock time inside widget code.

/// Event type identifier
pub type EventType = u32;

/// Well-known event type constants
pub mod event_types {
    /// Pointer pressed (mouse down / touch start)
    pub const POINTER_DOWN: u32 = 1;
    /// Pointer moved while tracked
    pub const POINTER_MOVE: u32 = 2;
    /// Pointer released (mouse up / touch end)
    pub const POINTER_UP: u32 = 3;
    /// Pointer left the widget bounds (treated like a release by gestures)
    pub const POINTER_LEAVE: u32 = 4;
}

/// Payload data attached to an event
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventData {
    /// No payload
    None,
    /// Pointer position in widget-local coordinates
    Pointer {
        x: f32,
        y: f32,
        /// Button index (0 = primary / first touch)
        button: u8,
        /// Contact pressure, 1.0 for mouse input
        pressure: f32,
    },
}

/// An input event delivered to a widget
#[derive(Clone, Copy, Debug)]
pub struct Event {
    /// What happened (see [`event_types`])
    pub event_type: EventType,
    /// Event payload
    pub data: EventData,
    /// Monotonic timestamp in milliseconds
    pub timestamp: u64,
}

impl Event {
    /// Create an event with no payload
    pub fn new(event_type: EventType, timestamp: u64) -> Self {
        Self {
            event_type,
            data: EventData::None,
            timestamp,
        }
    }

    /// Create a pointer event at the given widget-local position
    pub fn pointer(event_type: EventType, x: f32, y: f32, timestamp: u64) -> Self {
        Self {
            event_type,
            data: EventData::Pointer {
                x,
                y,
                button: 0,
                pressure: 1.0,
            },
            timestamp,
        }
    }

    /// Pointer x coordinate, if this event carries one
    pub fn pointer_x(&self) -> Option<f32> {
        match self.data {
            EventData::Pointer { x, .. } => Some(x),
            EventData::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_event_carries_position() {
        let event = Event::pointer(event_types::POINTER_DOWN, 42.0, 7.0, 1000);
        assert_eq!(event.event_type, event_types::POINTER_DOWN);
        assert_eq!(event.pointer_x(), Some(42.0));
        assert_eq!(event.timestamp, 1000);
    }

    #[test]
    fn test_bare_event_has_no_position() {
        let event = Event::new(event_types::POINTER_LEAVE, 5);
        assert_eq!(event.pointer_x(), None);
    }
}
