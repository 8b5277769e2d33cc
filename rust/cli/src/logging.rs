//! Tracing subscriber setup for the `holdem` binary.
//!
//! Events go to stderr so stdout stays parseable. `RUST_LOG` overrides the
//! default filter.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn,holdem_engine=info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_ai::scripted::{ScriptedMove, ScriptedPolicy};
    use holdem_ai::simulate::play_hand;
    use holdem_engine::cards::FullDeal;
    use holdem_engine::game::GameState;
    use holdem_engine::rules::Blinds;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::{Layer, Registry};

    /// Records the level and target of every event it sees.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(Level, String)>>>);

    impl<S: tracing::Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            self.0
                .lock()
                .unwrap()
                .push((*meta.level(), meta.target().to_string()));
        }
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn illegal_proposals_are_warned_about() {
        let capture = Capture::default();
        let subscriber = Registry::default().with(capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut policies = vec![
                ScriptedPolicy::new(vec![ScriptedMove::CheckCall]),
                // The big blind's option: a "raise" below the current bet.
                ScriptedPolicy::new(vec![ScriptedMove::RaiseTo(1)]),
            ];
            let state = GameState::new(vec![100, 100], Blinds { small: 1, big: 2 }).unwrap();
            let deal = FullDeal::new(
                vec!["AhKs".parse().unwrap(), "7c2d".parse().unwrap()],
                "KdJs3d7s6s".parse().unwrap(),
            )
            .unwrap();
            play_hand(&mut policies, state, &deal).unwrap();
        });

        let events = capture.0.lock().unwrap();
        assert!(
            events
                .iter()
                .any(|(level, target)| *level == Level::WARN && target.starts_with("holdem_ai"))
        );
        assert!(events.iter().any(|(level, _)| *level == Level::INFO));
    }
}
