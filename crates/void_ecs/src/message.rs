//! Topic-addressed messages
//!
//! A message is an immutable topic plus a type-erased payload. Cloning is
//! cheap: the payload is shared, so a message can be queued for a busy
//! component without copying its contents.

use core::any::Any;
use core::fmt;
use std::rc::Rc;

/// Identifies a message's semantic kind for routing
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic(&'static str);

impl Topic {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Topic({})", self.0)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A topic and its payload
#[derive(Clone)]
pub struct Message {
    topic: Topic,
    payload: Rc<dyn Any>,
}

impl Message {
    pub fn new<T: Any>(topic: Topic, payload: T) -> Self {
        Self { topic, payload: Rc::new(payload) }
    }

    /// A message with no payload
    pub fn signal(topic: Topic) -> Self {
        Self::new(topic, ())
    }

    /// Wrap a payload that crossed a thread boundary
    pub(crate) fn from_boxed(topic: Topic, payload: Box<dyn Any + Send>) -> Self {
        let payload: Rc<dyn Any + Send> = Rc::from(payload);
        Self { topic, payload }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn is(&self, topic: Topic) -> bool {
        self.topic == topic
    }

    /// Borrow the payload as `T`, if that is what it holds
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message").field("topic", &self.topic).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PING: Topic = Topic::new("test.ping");

    #[test]
    fn test_payload_downcast() {
        let msg = Message::new(PING, 42_u32);
        assert!(msg.is(PING));
        assert_eq!(msg.payload::<u32>(), Some(&42));
        assert_eq!(msg.payload::<f32>(), None);
    }

    #[test]
    fn test_boxed_payload() {
        let msg = Message::from_boxed(PING, Box::new(String::from("loaded")));
        assert_eq!(msg.payload::<String>().map(String::as_str), Some("loaded"));
    }

    #[test]
    fn test_clone_shares_payload() {
        let msg = Message::new(PING, vec![1, 2, 3]);
        let copy = msg.clone();
        assert_eq!(copy.payload::<Vec<i32>>(), Some(&vec![1, 2, 3]));
        assert_eq!(copy.topic().to_string(), "test.ping");
    }
}
