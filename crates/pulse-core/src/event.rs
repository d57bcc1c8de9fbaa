//! Discrete input events

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Well-known input events the core and stock behaviors understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventLabel {
    Exit,
    UpPressed,
    UpReleased,
    DownPressed,
    DownReleased,
    LeftPressed,
    LeftReleased,
    RightPressed,
    RightReleased,
}

impl EventLabel {
    pub const ALL: [EventLabel; 9] = [
        EventLabel::Exit,
        EventLabel::UpPressed,
        EventLabel::UpReleased,
        EventLabel::DownPressed,
        EventLabel::DownReleased,
        EventLabel::LeftPressed,
        EventLabel::LeftReleased,
        EventLabel::RightPressed,
        EventLabel::RightReleased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventLabel::Exit => "exit",
            EventLabel::UpPressed => "up_pressed",
            EventLabel::UpReleased => "up_released",
            EventLabel::DownPressed => "down_pressed",
            EventLabel::DownReleased => "down_released",
            EventLabel::LeftPressed => "left_pressed",
            EventLabel::LeftReleased => "left_released",
            EventLabel::RightPressed => "right_pressed",
            EventLabel::RightReleased => "right_released",
        }
    }
}

impl fmt::Display for EventLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown event label '{}'", s))
    }
}

/// A single input event: either a well-known label or a free-form tag.
///
/// Ordering puts every label before every tag, then compares within the kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Event {
    Label(EventLabel),
    Tag(String),
}

impl Event {
    /// Create a free-form tag event
    pub fn tag(tag: impl Into<String>) -> Self {
        Event::Tag(tag.into())
    }

    /// Parse text into an event. Text naming a label becomes that label,
    /// anything else becomes a tag.
    pub fn parse(s: &str) -> Self {
        match s.parse::<EventLabel>() {
            Ok(label) => Event::Label(label),
            Err(_) => Event::Tag(s.to_string()),
        }
    }

    pub fn label(&self) -> Option<EventLabel> {
        match self {
            Event::Label(label) => Some(*label),
            Event::Tag(_) => None,
        }
    }

    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Event::Label(_) => None,
            Event::Tag(tag) => Some(tag),
        }
    }
}

impl From<EventLabel> for Event {
    fn from(label: EventLabel) -> Self {
        Event::Label(label)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Label(label) => write!(f, "{}", label),
            Event::Tag(tag) => f.write_str(tag),
        }
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Event::parse(&s))
    }
}
