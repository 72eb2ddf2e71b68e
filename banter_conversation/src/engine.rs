//! The conversation engine: state transitions and reply scheduling.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use banter_core::{AdviceSource, Message, ReplyClassifier, Sender, TranscriptStore};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::latency::LatencyModel;
use crate::transcript::Transcript;

/// Reply shown when the advice lookup comes back empty.
const ADVICE_FAILURE_REPLY: &str = "I tried to fetch a piece of advice for \
     you, but something went wrong. Let me know what you're curious about and \
     I'll still try to help.";

/// Tuning knobs for the engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Simulated typing delay applied to every reply.
    pub latency: LatencyModel,
    /// Upper bound on one advice lookup; expiry is treated as absence.
    pub advice_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            latency: LatencyModel::default(),
            advice_timeout: Duration::from_secs(5),
        }
    }
}

/// Reply source, decided at submission time.
enum ReplyPlan {
    /// Already classified; just wait out the delay.
    Ready(String),
    /// Look up advice during the delay window.
    Advice(Arc<dyn AdviceSource>),
}

struct Shared {
    transcript: Mutex<Transcript>,
    idle: Notify,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// State machine turning user input into delayed bot replies.
///
/// Two states: Idle and AwaitingReply. [`submit`](Self::submit) moves the
/// engine to AwaitingReply and schedules a single cancelable task that
/// appends the bot reply once the typing delay elapses, then returns to
/// Idle. While AwaitingReply, further submissions are silently ignored, so
/// replies can never overlap or reorder.
pub struct ConversationEngine {
    shared: Arc<Shared>,
    classifier: ReplyClassifier,
    advice: Arc<dyn AdviceSource>,
    store: Arc<dyn TranscriptStore>,
    config: EngineConfig,
    pending: Option<JoinHandle<()>>,
}

impl ConversationEngine {
    /// Create an engine, restoring the transcript from `store` when a valid
    /// snapshot exists.
    pub async fn new(
        classifier: ReplyClassifier,
        advice: Arc<dyn AdviceSource>,
        store: Arc<dyn TranscriptStore>,
        config: EngineConfig,
    ) -> Self {
        let transcript = Transcript::from_snapshot(store.load().await);
        debug!(
            "engine initialized with {} stored message(s)",
            transcript.message_count()
        );

        Self {
            shared: Arc::new(Shared {
                transcript: Mutex::new(transcript),
                idle: Notify::new(),
            }),
            classifier,
            advice,
            store,
            config,
            pending: None,
        }
    }

    /// Submit user input.
    ///
    /// No-op while a reply is pending or when the trimmed text is empty;
    /// that silent rejection is the backpressure keeping replies strictly
    /// ordered. Otherwise the user message is appended immediately and a bot
    /// reply is scheduled after the simulated typing delay.
    pub async fn submit(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        let snapshot = {
            let mut transcript = self.shared.lock();
            if transcript.is_awaiting_reply() {
                debug!("submission ignored: a reply is already pending");
                return;
            }
            transcript.push(Message::new(Sender::User, trimmed));
            transcript.set_awaiting(true);
            transcript.messages().to_vec()
        };
        self.persist(&snapshot).await;

        // Decide the reply source up front so lookup time overlaps the
        // typing delay instead of extending it.
        let plan = if is_advice_request(trimmed) {
            ReplyPlan::Advice(Arc::clone(&self.advice))
        } else {
            ReplyPlan::Ready(self.classifier.classify(trimmed))
        };

        let delay = self.config.latency.delay_for(trimmed);
        let advice_timeout = self.config.advice_timeout;
        let shared = Arc::clone(&self.shared);
        let store = Arc::clone(&self.store);

        self.pending = Some(tokio::spawn(async move {
            let text = match plan {
                ReplyPlan::Ready(text) => {
                    sleep(delay).await;
                    text
                }
                ReplyPlan::Advice(source) => {
                    let lookup = async {
                        tokio::time::timeout(advice_timeout, source.fetch_advice())
                            .await
                            .ok()
                            .flatten()
                    };
                    let (advice, ()) = tokio::join!(lookup, sleep(delay));
                    advice.unwrap_or_else(|| ADVICE_FAILURE_REPLY.to_owned())
                }
            };

            let snapshot = {
                let mut transcript = shared.lock();
                transcript.push(Message::new(Sender::Bot, text));
                transcript.set_awaiting(false);
                transcript.messages().to_vec()
            };
            if let Err(e) = store.save(&snapshot).await {
                warn!("failed to persist transcript: {e:#}");
            }
            shared.idle.notify_waiters();
        }));
    }

    /// Clear the conversation back to the single welcome message.
    ///
    /// Cancels any pending reply so a stale bot message can never appear
    /// after the reset, and forces the engine back to Idle.
    pub async fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let snapshot = {
            let mut transcript = self.shared.lock();
            transcript.replace_with_welcome();
            transcript.messages().to_vec()
        };
        self.persist(&snapshot).await;
        self.shared.idle.notify_waiters();
        debug!("conversation reset");
    }

    /// Ordered snapshot of the current history.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.shared.lock().messages().to_vec()
    }

    /// True while a bot reply is pending.
    #[must_use]
    pub fn is_awaiting_reply(&self) -> bool {
        self.shared.lock().is_awaiting_reply()
    }

    /// Wait until no reply is pending.
    pub async fn wait_until_idle(&self) {
        loop {
            let notified = self.shared.idle.notified();
            tokio::pin!(notified);
            // Register before checking, so a wake between the check and the
            // await cannot be lost.
            notified.as_mut().enable();
            if !self.is_awaiting_reply() {
                return;
            }
            notified.await;
        }
    }

    async fn persist(&self, snapshot: &[Message]) {
        if let Err(e) = self.store.save(snapshot).await {
            warn!("failed to persist transcript: {e:#}");
        }
    }
}

impl Drop for ConversationEngine {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

fn is_advice_request(trimmed: &str) -> bool {
    let lower = trimmed.to_lowercase();
    lower.starts_with("advice") || lower.starts_with("tip")
}
