//! JSON lines on stdout: one per AI event, then one summary per actor.

use combat_core::InMemoryWorld;
use runtime::{AiRuntime, Event, Topic};
use serde_json::json;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::warn;

/// Starts one printer per topic. Each ends once the runtime is shut down.
pub fn spawn_printers(runtime: &AiRuntime) -> Vec<JoinHandle<()>> {
    [Topic::Intention, Topic::Combat, Topic::Diagnostics]
        .into_iter()
        .map(|topic| tokio::spawn(print_events(runtime.subscribe(topic))))
        .collect()
}

async fn print_events(mut events: broadcast::Receiver<Event>) {
    loop {
        match events.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(err) => warn!(%err, "event not serializable"),
            },
            Err(RecvError::Lagged(missed)) => warn!(missed, "event printer lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

/// Prints the final status and order count of every AI-driven actor.
pub fn print_summary(runtime: &AiRuntime, world: &InMemoryWorld) {
    for id in runtime.actors() {
        let Some(handle) = runtime.handle(id) else {
            continue;
        };
        let line = json!({
            "summary": {
                "actor": id,
                "status": handle.status(),
                "orders": world.orders_of(id).len(),
            }
        });
        println!("{line}");
    }
}
