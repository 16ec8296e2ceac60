//! End-to-end event flow through a hub: registration, dispatch, drain, sweep.

use std::sync::{Arc, Mutex};

use tickhub::{Category, Config, Event, EventId, Hub, Listener, Payload, Severity, Subscription};

#[derive(Debug, PartialEq)]
struct UserJoined {
    username: String,
}

struct Fixture {
    hub: Hub,
    message_sent: Category,
    user_joined: Category,
    user_left: Category,
}

impl Fixture {
    fn new() -> Self {
        let hub = Hub::new(Config::default()).unwrap();
        let message_sent = hub.category("MESSAGE_SENT");
        let user_joined = hub.category("USER_JOINED");
        let user_left = hub.category("USER_LEFT");
        Self {
            hub,
            message_sent,
            user_joined,
            user_left,
        }
    }

    fn listener(&self) -> Subscription<TestListener> {
        self.hub
            .bus()
            .attach(TestListener::new(vec![self.message_sent, self.user_joined]))
    }

    fn send(&self, lifetime: u8, body: &str) {
        self.hub.bus().create(
            self.message_sent,
            lifetime,
            Payload::message("Sender", "Recipient", body),
        );
    }
}

struct TestListener {
    categories: Vec<Category>,
    handled: Vec<Category>,
    ids: Vec<EventId>,
    messages: Vec<String>,
}

impl TestListener {
    fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            handled: Vec::new(),
            ids: Vec::new(),
            messages: Vec::new(),
        }
    }
}

impl Listener for TestListener {
    fn handle(&mut self, event: &Event) {
        self.handled.push(event.category());
        self.ids.push(event.id);
        self.messages.extend(event.message().map(str::to_owned));
    }

    fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }
}

/// Remembers the last log message at or above a threshold.
struct LastLog {
    min: Severity,
    last: Option<String>,
}

impl Listener for LastLog {
    fn handle(&mut self, event: &Event) {
        if event.category().severity().is_some_and(|s| s >= self.min) {
            self.last = event.message().map(str::to_owned);
        }
    }

    fn categories(&self) -> Vec<Category> {
        Severity::ALL.iter().map(|s| s.category()).collect()
    }
}

#[test]
fn registry_lookup() {
    let fx = Fixture::new();
    let registry = fx.hub.registry();

    assert_eq!(registry.lookup("UNKNOWN"), Category::UNKNOWN);
    assert_ne!(registry.lookup("MESSAGE_SENT"), Category::UNKNOWN);
    assert_ne!(registry.lookup("USER_JOINED"), Category::UNKNOWN);
    assert_ne!(registry.lookup("USER_LEFT"), Category::UNKNOWN);
    assert_eq!(registry.lookup("NON_EXISTENT"), Category::UNKNOWN);
    assert_eq!(registry.register("USER_LEFT"), fx.user_left);
}

#[test]
fn log_thresholds() {
    let fx = Fixture::new();
    let bus = fx.hub.bus();
    let mut loggers: Vec<_> = Severity::ALL
        .iter()
        .map(|&min| bus.attach(LastLog { min, last: None }))
        .collect();
    let drain_all = |loggers: &mut Vec<Subscription<LastLog>>| {
        for logger in loggers.iter_mut() {
            logger.drain();
        }
        loggers
            .iter()
            .map(|l| l.listener().last.clone().unwrap_or_default())
            .collect::<Vec<_>>()
    };

    bus.create(Category::LOG_DEBUG, 1, Payload::log("Debug message"));
    assert_eq!(drain_all(&mut loggers), ["Debug message", "", ""]);

    bus.create(Category::LOG_INFO, 1, Payload::log("Info message"));
    assert_eq!(drain_all(&mut loggers), ["Info message", "Info message", ""]);

    bus.create(Category::LOG_WARNING, 1, Payload::log("Warning message"));
    assert_eq!(
        drain_all(&mut loggers),
        ["Warning message", "Warning message", "Warning message"]
    );
}

#[test]
fn create_and_dispatch() {
    let fx = Fixture::new();
    let mut listener = fx.listener();

    fx.send(1, "Hello");
    listener.drain();

    assert_eq!(listener.listener().handled, vec![fx.message_sent]);
}

#[test]
fn receives_multiple_kinds_in_order() {
    let fx = Fixture::new();
    let mut listener = fx.listener();

    fx.send(1, "Hello");
    fx.hub.bus().create(
        fx.user_joined,
        1,
        Payload::custom(UserJoined {
            username: "NewUser".into(),
        }),
    );
    fx.send(1, "Again");
    listener.drain();

    assert_eq!(
        listener.listener().handled,
        vec![fx.message_sent, fx.user_joined, fx.message_sent]
    );
}

#[test]
fn custom_payload_reaches_listener() {
    let fx = Fixture::new();
    let seen = Arc::new(Mutex::new(None));
    let sink = seen.clone();
    let mut sub = fx.hub.bus().attach_to(
        tickhub::from_fn(move |event: &Event| {
            *sink.lock().unwrap() = event.custom::<UserJoined>().map(|u| u.username.clone());
        }),
        [fx.user_joined],
    );

    fx.hub.bus().create(
        fx.user_joined,
        1,
        Payload::custom(UserJoined {
            username: "NewUser".into(),
        }),
    );
    sub.drain();
    assert_eq!(seen.lock().unwrap().as_deref(), Some("NewUser"));
}

#[test]
fn expiration() {
    let fx = Fixture::new();
    let mut listener = fx.listener();

    fx.send(2, "Hello");

    fx.hub.tick();
    listener.drain();
    assert_eq!(listener.listener().handled.len(), 1);

    fx.hub.tick();
    listener.listener_mut().handled.clear();
    listener.drain();
    assert!(listener.listener().handled.is_empty());
    assert_eq!(fx.hub.bus().live_len(), 0);
}

#[test]
fn queued_but_evicted_events_are_not_observed() {
    let fx = Fixture::new();
    let mut listener = fx.listener();

    fx.send(1, "missed");
    fx.hub.tick();

    assert_eq!(listener.pending(), 1);
    assert_eq!(listener.drain(), 0);
}

#[test]
fn add_remove_listener() {
    let fx = Fixture::new();
    let bus = fx.hub.bus();
    let mut first = fx.listener();
    let mut second = fx.listener();

    fx.send(1, "Hello");
    first.drain();
    second.drain();
    assert_eq!(first.listener().handled.len(), 1);
    assert_eq!(second.listener().handled.len(), 1);

    bus.remove_listener_from(&second, fx.message_sent).unwrap();
    first.listener_mut().handled.clear();
    second.listener_mut().handled.clear();

    fx.send(1, "Hello again");
    first.drain();
    second.drain();
    assert_eq!(first.listener().handled.len(), 1);
    assert!(second.listener().handled.is_empty());

    // still subscribed to the other category
    assert_eq!(second.categories(), vec![fx.user_joined]);
}

#[test]
fn chat_scenario() {
    let hub = Hub::new(Config::default()).unwrap();
    let chat = hub.category("CHAT");
    let mut sub = hub.bus().attach_to(TestListener::new(Vec::new()), [chat]);

    let id = hub.bus().create(chat, 1, Payload::text("hi"));

    assert_eq!(sub.drain(), 1);
    assert_eq!(sub.listener().handled, vec![chat]);
    assert_eq!(sub.listener().messages, ["hi"]);
    assert_eq!(sub.listener().ids, vec![id]);

    hub.tick();
    assert!(!hub.bus().is_live(id));
}

#[test]
fn two_listeners_share_one_event() {
    let fx = Fixture::new();
    let bus = fx.hub.bus();
    let mut first = fx.listener();
    let mut second = fx.listener();

    fx.send(1, "both");
    assert_eq!(first.pending(), 1);
    assert_eq!(second.pending(), 1);

    assert_eq!(second.drain(), 1);
    let shared = second.listener().ids.clone();
    drop(second);
    assert_eq!(bus.subscriber_count(fx.message_sent), 1);

    fx.send(1, "only first");
    assert_eq!(first.drain(), 2);
    assert_eq!(first.listener().messages, ["both", "only first"]);
    // both inboxes referenced the same event
    assert_eq!(first.listener().ids[..1], shared[..]);
}

#[test]
fn responses_are_pulled_by_recipient() {
    let fx = Fixture::new();
    let listener = fx.listener();

    fx.hub.respond(listener.id(), fx.message_sent, Payload::text("direct"));
    // not broadcast
    assert_eq!(listener.pending(), 0);

    let response = fx.hub.responses().take(listener.id()).unwrap();
    assert_eq!(response.message(), Some("direct"));
    assert!(fx.hub.responses().take(listener.id()).is_none());
}
