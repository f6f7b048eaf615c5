//! Word-cycle typewriter: types a phrase one character at a time, holds it,
//! deletes it again, then moves on to the next phrase (wrapping forever).
//!
//! [`Typewriter`] is the pure state machine.  Each [`Typewriter::tick`]
//! performs exactly one transition and returns the delay before the next one,
//! so it can be driven by any clock.  [`TypewriterHandle`] drives it on a
//! tokio task and publishes the latest state over a `watch` channel; a
//! handle started with [`TypewriterHandle::spawn_with_ticks`] also streams
//! every state, in order, to a consumer that must not miss any.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

// ───────────────────────────────────────── config ────────────

/// Errors raised while building a typewriter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypewriterError {
    #[error("invalid typewriter configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

/// Phrases and timings for one typewriter instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    /// Delay between appended characters.
    pub typing_interval: Duration,
    /// Delay between removed characters.
    pub deleting_interval: Duration,
    /// How long a fully typed phrase stays on screen before deletion starts.
    pub pause_after_typed: Duration,
}

impl TypewriterConfig {
    pub const DEFAULT_TYPING: Duration = Duration::from_millis(100);
    pub const DEFAULT_DELETING: Duration = Duration::from_millis(50);
    pub const DEFAULT_PAUSE: Duration = Duration::from_millis(2000);

    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            typing_interval: Self::DEFAULT_TYPING,
            deleting_interval: Self::DEFAULT_DELETING,
            pause_after_typed: Self::DEFAULT_PAUSE,
        }
    }

    pub fn typing_interval(mut self, interval: Duration) -> Self {
        self.typing_interval = interval;
        self
    }

    pub fn deleting_interval(mut self, interval: Duration) -> Self {
        self.deleting_interval = interval;
        self
    }

    pub fn pause_after_typed(mut self, pause: Duration) -> Self {
        self.pause_after_typed = pause;
        self
    }

    /// Reject phrase lists the state machine cannot cycle through.
    pub fn validate(&self) -> Result<(), TypewriterError> {
        if self.phrases.is_empty() {
            return Err(TypewriterError::InvalidConfiguration {
                reason: "at least one phrase is required".into(),
            });
        }
        if let Some(idx) = self.phrases.iter().position(|p| p.is_empty()) {
            return Err(TypewriterError::InvalidConfiguration {
                reason: format!("phrase #{} is empty", idx + 1),
            });
        }
        Ok(())
    }
}

// ───────────────────────────────────────── state machine ─────

/// Direction in which the visible text is currently changing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Typing,
    Deleting,
}

/// Immutable view of the typewriter, published after every tick.
///
/// The page only draws `text`.  The remaining fields are introspection for
/// observers and tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub text: String,
    /// Number of ticks performed so far; 0 for the initial state.
    pub tick: u64,
    pub active_index: usize,
    pub mode: Mode,
    /// `true` while a fully typed phrase is held before deletion.
    pub holding: bool,
}

/// The typing/deleting state machine.
///
/// `text` is always a prefix of `phrases[active_index]`.  All lengths are
/// counted in chars, so multi-byte phrases never split a code point.
#[derive(Debug, Clone)]
pub struct Typewriter {
    config: TypewriterConfig,
    text: String,
    active_index: usize,
    mode: Mode,
    ticks: u64,
}

impl Typewriter {
    pub fn new(config: TypewriterConfig) -> Result<Self, TypewriterError> {
        config.validate()?;
        Ok(Self {
            config,
            text: String::new(),
            active_index: 0,
            mode: Mode::Typing,
            ticks: 0,
        })
    }

    /// Delay before the very first tick.
    pub fn initial_delay(&self) -> Duration {
        self.config.typing_interval
    }

    /// Perform one transition and return the delay until the next tick.
    pub fn tick(&mut self) -> Duration {
        self.ticks += 1;
        let phrase = &self.config.phrases[self.active_index];
        match self.mode {
            Mode::Typing => {
                // `text` is a prefix of `phrase`, so its byte length is a
                // char boundary in `phrase`.
                if let Some(ch) = phrase[self.text.len()..].chars().next() {
                    self.text.push(ch);
                }
                if self.text.len() == phrase.len() {
                    self.mode = Mode::Deleting;
                    self.config.pause_after_typed
                } else {
                    self.config.typing_interval
                }
            }
            Mode::Deleting => {
                self.text.pop();
                if self.text.is_empty() {
                    self.active_index = (self.active_index + 1) % self.config.phrases.len();
                    self.mode = Mode::Typing;
                    self.config.typing_interval
                } else {
                    self.config.deleting_interval
                }
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_phrase(&self) -> &str {
        &self.config.phrases[self.active_index]
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_holding(&self) -> bool {
        self.mode == Mode::Deleting && self.text.len() == self.active_phrase().len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            tick: self.ticks,
            active_index: self.active_index,
            mode: self.mode,
            holding: self.is_holding(),
        }
    }
}

// ───────────────────────────────────────── runner ────────────

/// Owns a running typewriter task.
///
/// The task holds the only mutable reference to its [`Typewriter`]; the
/// outside world only sees [`Snapshot`]s.  Dropping the handle aborts the
/// task, [`TypewriterHandle::shutdown`] stops it and waits for it to finish.
#[derive(Debug)]
pub struct TypewriterHandle {
    snapshots: watch::Receiver<Snapshot>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TypewriterHandle {
    /// Validate `config` and start ticking on the current tokio runtime.
    ///
    /// Fails synchronously with [`TypewriterError::InvalidConfiguration`];
    /// in that case no task is spawned.
    pub fn spawn(config: TypewriterConfig) -> Result<Self, TypewriterError> {
        Self::start(config, None)
    }

    /// Like [`TypewriterHandle::spawn`], but also returns a stream that
    /// receives every snapshot in tick order.  The `watch` channel only keeps
    /// the latest state, so a slow reader of it can miss ticks; this stream
    /// never drops one.
    pub fn spawn_with_ticks(
        config: TypewriterConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Snapshot>), TypewriterError> {
        let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
        let handle = Self::start(config, Some(ticks_tx))?;
        Ok((handle, ticks_rx))
    }

    fn start(
        config: TypewriterConfig,
        mut ticks: Option<mpsc::UnboundedSender<Snapshot>>,
    ) -> Result<Self, TypewriterError> {
        let mut typewriter = Typewriter::new(config)?;
        let (tx, rx) = watch::channel(typewriter.snapshot());
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut delay = typewriter.initial_delay();
            loop {
                tokio::select! {
                    biased;

                    // Fires on an explicit stop and when the handle is dropped.
                    _ = &mut stop_rx => break,
                    () = tokio::time::sleep(delay) => {}
                }

                delay = typewriter.tick();
                let snapshot = typewriter.snapshot();
                if let Some(stream) = &ticks {
                    if stream.send(snapshot.clone()).is_err() {
                        ticks = None; // tick reader went away
                    }
                }
                if tx.send(snapshot).is_err() {
                    break; // every receiver is gone
                }
            }
            tracing::debug!(ticks = typewriter.snapshot().tick, "typewriter stopped");
        });

        Ok(Self {
            snapshots: rx,
            stop: Some(stop_tx),
            task: Some(task),
        })
    }

    /// A new receiver for the latest snapshot.  It is notified after every
    /// tick but only holds the newest value.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// The most recently published snapshot.
    pub fn current(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Stop ticking and wait for the task to exit.  No snapshot is
    /// published after this returns.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::warn!("typewriter task ended abnormally: {err}");
            }
        }
    }
}

impl Drop for TypewriterHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn texts(tw: &mut Typewriter, ticks: usize) -> Vec<String> {
        let mut out = vec![tw.text().to_string()];
        for _ in 0..ticks {
            tw.tick();
            out.push(tw.text().to_string());
        }
        out
    }

    fn fast(phrases: &[&str]) -> TypewriterConfig {
        TypewriterConfig::new(phrases.iter().copied())
            .typing_interval(Duration::from_millis(10))
            .deleting_interval(Duration::from_millis(10))
            .pause_after_typed(Duration::ZERO)
    }

    #[test]
    fn defaults_match_documented_timings() {
        let config = TypewriterConfig::new(["x"]);
        assert_eq!(config.typing_interval, Duration::from_millis(100));
        assert_eq!(config.deleting_interval, Duration::from_millis(50));
        assert_eq!(config.pause_after_typed, Duration::from_millis(2000));
    }

    #[test]
    fn empty_phrase_list_is_rejected() {
        let err = Typewriter::new(TypewriterConfig::new(Vec::<String>::new())).unwrap_err();
        assert!(matches!(err, TypewriterError::InvalidConfiguration { .. }));
    }

    #[test]
    fn empty_phrase_is_rejected() {
        let err = Typewriter::new(TypewriterConfig::new(["ok", ""])).unwrap_err();
        assert_eq!(
            err,
            TypewriterError::InvalidConfiguration {
                reason: "phrase #2 is empty".into()
            }
        );
    }

    #[test]
    fn single_phrase_cycles_through_type_and_delete() {
        let mut tw = Typewriter::new(fast(&["Hi"])).unwrap();
        assert_eq!(
            texts(&mut tw, 6),
            vec!["", "H", "Hi", "H", "", "H", "Hi"]
        );
    }

    #[test]
    fn tick_returns_the_delay_for_the_next_transition() {
        let config = TypewriterConfig::new(["ab"]);
        let mut tw = Typewriter::new(config).unwrap();
        assert_eq!(tw.initial_delay(), Duration::from_millis(100));
        assert_eq!(tw.tick(), Duration::from_millis(100)); // "a"
        assert_eq!(tw.tick(), Duration::from_millis(2000)); // "ab", hold
        assert!(tw.is_holding());
        assert_eq!(tw.tick(), Duration::from_millis(50)); // "a"
        assert!(!tw.is_holding());
        assert_eq!(tw.tick(), Duration::from_millis(100)); // "", next phrase
        assert_eq!(tw.mode(), Mode::Typing);
    }

    #[test]
    fn index_wraps_after_last_phrase() {
        let mut tw = Typewriter::new(fast(&["A", "BB"])).unwrap();
        let seq = texts(&mut tw, 7);
        assert_eq!(seq, vec!["", "A", "", "B", "BB", "B", "", "A"]);
        assert_eq!(tw.active_index(), 0);
    }

    #[test]
    fn index_advances_only_when_text_empties() {
        let mut tw = Typewriter::new(fast(&["one", "three", "xy"])).unwrap();
        let mut prev_index = tw.active_index();
        let mut prev_text = tw.text().to_string();
        for _ in 0..200 {
            tw.tick();
            if tw.active_index() != prev_index {
                assert_eq!(tw.active_index(), (prev_index + 1) % 3);
                assert_eq!(tw.text(), "");
                assert_eq!(prev_text.chars().count(), 1);
            }
            prev_index = tw.active_index();
            prev_text = tw.text().to_string();
        }
    }

    #[test]
    fn text_is_always_a_prefix_of_the_active_phrase() {
        let mut tw = Typewriter::new(fast(&["AI/ML", "Data", "Q"])).unwrap();
        for _ in 0..500 {
            tw.tick();
            assert!(tw.active_phrase().starts_with(tw.text()));
            assert!(tw.text().len() <= tw.active_phrase().len());
        }
    }

    #[test]
    fn multibyte_phrases_advance_by_whole_chars() {
        let mut tw = Typewriter::new(fast(&["héllo ✓"])).unwrap();
        let seq = texts(&mut tw, 7);
        assert_eq!(seq[2], "hé");
        assert_eq!(seq[7], "héllo ✓");
        tw.tick();
        assert_eq!(tw.text(), "héllo ");
    }

    #[test]
    fn identical_configs_produce_identical_sequences() {
        let config = TypewriterConfig::new(["Data Scientist", "Problem Solver"]);
        let mut a = Typewriter::new(config.clone()).unwrap();
        let mut b = Typewriter::new(config).unwrap();
        for _ in 0..100 {
            assert_eq!(a.tick(), b.tick());
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    #[tokio::test]
    async fn spawn_rejects_empty_phrases_without_a_task() {
        let result = TypewriterHandle::spawn(TypewriterConfig::new(Vec::<String>::new()));
        assert!(matches!(
            result,
            Err(TypewriterError::InvalidConfiguration { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn handle_publishes_on_schedule() {
        let start = Instant::now();
        let handle = TypewriterHandle::spawn(TypewriterConfig::new(["Hi"])).unwrap();
        let mut rx = handle.subscribe();
        assert_eq!(rx.borrow().text, "");

        let mut seen = Vec::new();
        for _ in 0..5 {
            rx.changed().await.unwrap();
            let text = rx.borrow_and_update().text.clone();
            seen.push((start.elapsed().as_millis(), text));
        }

        assert_eq!(
            seen,
            vec![
                (100, "H".to_string()),
                (200, "Hi".to_string()),
                (2200, "H".to_string()),
                (2250, "".to_string()),
                (2350, "H".to_string()),
            ]
        );
        handle.shutdown().await;
    }

    #[test]
    fn snapshots_count_ticks() {
        let mut tw = Typewriter::new(fast(&["ab"])).unwrap();
        assert_eq!(tw.snapshot().tick, 0);
        for n in 1..=10 {
            tw.tick();
            assert_eq!(tw.snapshot().tick, n);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn tick_stream_keeps_every_state_for_a_slow_reader() {
        let config = TypewriterConfig::new(["Hi"])
            .typing_interval(Duration::from_millis(1))
            .deleting_interval(Duration::from_millis(1))
            .pause_after_typed(Duration::ZERO);
        let (handle, mut ticks) = TypewriterHandle::spawn_with_ticks(config).unwrap();

        let mut prev_len = 0usize;
        for n in 1..=200u64 {
            let snapshot = ticks.recv().await.unwrap();
            assert_eq!(snapshot.tick, n, "tick {n} was skipped");
            let len = snapshot.text.chars().count();
            assert_eq!(len.abs_diff(prev_len), 1, "jump at tick {n}");
            prev_len = len;
            // Reading is slower than ticking.
            tokio::time::sleep(Duration::from_millis(3)).await;
        }
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn tick_stream_ends_after_shutdown() {
        let (handle, mut ticks) =
            TypewriterHandle::spawn_with_ticks(TypewriterConfig::new(["abc"])).unwrap();
        assert_eq!(ticks.recv().await.unwrap().text, "a");
        handle.shutdown().await;
        assert!(ticks.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_mid_typing_stops_all_updates() {
        let handle = TypewriterHandle::spawn(TypewriterConfig::new(["Deep Learning"])).unwrap();
        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();
        rx.changed().await.unwrap();
        let before = rx.borrow_and_update().clone();
        assert_eq!(before.mode, Mode::Typing);
        assert_eq!(before.text, "De");

        handle.shutdown().await;
        tokio::time::sleep(Duration::from_secs(10)).await;

        // The sender is gone, so `changed` errors instead of yielding a value.
        assert!(rx.changed().await.is_err());
        assert_eq!(*rx.borrow(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_task() {
        let handle = TypewriterHandle::spawn(TypewriterConfig::new(["abc"])).unwrap();
        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();
        drop(handle);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(rx.borrow_and_update().text, "a");
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn independent_handles_do_not_share_state() {
        let a = TypewriterHandle::spawn(TypewriterConfig::new(["aaa"])).unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        let b = TypewriterHandle::spawn(TypewriterConfig::new(["bbb"])).unwrap();
        assert_eq!(a.current().text, "aa");
        assert_eq!(b.current().text, "");
        a.shutdown().await;
        b.shutdown().await;
    }
}
