//! # Example: chat
//!
//! A tiny chat room on top of a [`Hub`].
//!
//! Shows how to:
//! - Register custom categories and attach listeners with [`Bus::attach`].
//! - Publish chat messages and log lines as events.
//! - Hand subscriptions to a [`Ticker`] so they are drained every tick.
//! - Address a reply to one listener through the response store.
//!
//! ## Flow
//! ```text
//! main ─► Hub::new(Config)
//!   ├─► category("USER_JOINED" / "MESSAGE_SENT")
//!   ├─► attach(Room) + attach(LogWriter)
//!   ├─► Ticker::spawn(token)
//!   │     └─► every tick: drain Room / LogWriter, then sweep
//!   ├─► emit(USER_JOINED / MESSAGE_SENT / LOG_*)
//!   └─► token.cancel() ─► TickerReport
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=tickhub=debug cargo run --example chat
//! ```

use std::time::Duration;

use tickhub::{
    Bus, Category, Config, Event, Hub, Listener, LogWriter, Payload, Severity, Ticker,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

struct UserJoined {
    username: String,
}

/// Prints every chat line and greets new users.
struct Room {
    joined: Category,
    message_sent: Category,
    bus: Bus,
}

impl Listener for Room {
    fn handle(&mut self, event: &Event) {
        if event.category() == self.joined {
            if let Some(user) = event.custom::<UserJoined>() {
                println!("[room] {} joined", user.username);
                self.bus.create(
                    Category::LOG_INFO,
                    1,
                    Payload::log(format!("greeted {}", user.username)),
                );
            }
        } else if let Payload::Message {
            sender,
            recipient,
            body,
        } = event.payload()
        {
            println!("[room] {sender} -> {recipient}: {body}");
        }
    }

    fn categories(&self) -> Vec<Category> {
        vec![self.joined, self.message_sent]
    }

    fn name(&self) -> &'static str {
        "room"
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let hub = Hub::new(Config {
        tick: Duration::from_millis(50),
        default_lifetime: 2,
        ..Config::default()
    })?;

    let joined = hub.category("USER_JOINED");
    let message_sent = hub.category("MESSAGE_SENT");

    let room = hub.bus().attach(Room {
        joined,
        message_sent,
        bus: hub.bus().clone(),
    });
    let room_id = room.id();
    let logger = hub.bus().attach(LogWriter::new(Severity::Info));

    let token = CancellationToken::new();
    let ticker = Ticker::new(hub.clone())
        .with_subscription(room)
        .with_subscription(logger)
        .spawn(token.clone());

    hub.emit(
        joined,
        Payload::custom(UserJoined {
            username: "alice".into(),
        }),
    );
    hub.emit(message_sent, Payload::message("alice", "bob", "hi bob"));
    hub.emit(Category::LOG_DEBUG, Payload::log("filtered out by the writer"));
    hub.emit(Category::LOG_WARNING, Payload::log("bob is away"));

    hub.respond(room_id, message_sent, Payload::text("delivered"));
    if let Some(reply) = hub.responses().take(room_id) {
        println!("[room] reply: {}", reply.message().unwrap_or_default());
    }

    tokio::time::sleep(Duration::from_millis(200)).await;
    token.cancel();

    let report = ticker.await?;
    println!(
        "ticks={} handled={} evicted={} panicked={}",
        report.ticks, report.handled, report.evicted, report.panicked
    );
    Ok(())
}
