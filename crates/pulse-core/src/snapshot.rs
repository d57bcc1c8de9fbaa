//! Per-frame input snapshot

use crate::event::{Event, EventLabel};

/// The input events captured for one frame, in arrival order.
///
/// Built once per frame by the input source and then only read. Duplicates
/// are kept; membership queries only care whether any event matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSnapshot {
    events: Vec<Event>,
}

impl EventSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&mut self, event: impl Into<Event>) -> &mut Self {
        self.events.push(event.into());
        self
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, event: impl Into<Event>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Does the snapshot contain this label?
    pub fn has(&self, label: EventLabel) -> bool {
        self.events.iter().any(|e| matches!(e, Event::Label(l) if *l == label))
    }

    /// Does the snapshot contain a free-form tag equal to `tag`?
    pub fn has_tag(&self, tag: &str) -> bool {
        self.events.iter().any(|e| matches!(e, Event::Tag(t) if t == tag))
    }

    /// Does the snapshot contain an event equal to `event`?
    pub fn contains(&self, event: &Event) -> bool {
        self.events.contains(event)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<Event> for EventSnapshot {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl Extend<Event> for EventSnapshot {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

impl<'a> IntoIterator for &'a EventSnapshot {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
