//! Session runner: the effect-ordering layer.
//!
//! Composes the state machine, the todo ledger and the collaborator sinks,
//! and enforces the completion sequence: alarm, checkmark render, review
//! checkpoint (work intervals only), auto-advance. The machine and the
//! ledger each stay the sole owner of their state; the runner only routes
//! between them.
//!
//! Commands return every event they produce, in order, so the review
//! lifecycle (`ReviewRequested`, `ReviewCommitted`) shows up in the stream
//! alongside the interval events.

use std::collections::BTreeSet;

use crate::clock::Clock;
use crate::events::Event;
use crate::ledger::{CompletedTodo, TodoLedger};
use crate::session::{
    format_mmss, ColorToken, MachineState, ReviewRequest, SessionMachine, TickToken,
};
use crate::sinks::{AlarmSink, RenderSink};

pub struct SessionRunner<C: Clock> {
    machine: SessionMachine<C>,
    ledger: TodoLedger,
    render: Box<dyn RenderSink>,
    alarm: Box<dyn AlarmSink>,
}

impl<C: Clock> SessionRunner<C> {
    pub fn new(clock: C, render: Box<dyn RenderSink>, alarm: Box<dyn AlarmSink>) -> Self {
        Self {
            machine: SessionMachine::new(clock),
            ledger: TodoLedger::new(),
            render,
            alarm,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn machine(&self) -> &SessionMachine<C> {
        &self.machine
    }

    pub fn ledger(&self) -> &TodoLedger {
        &self.ledger
    }

    pub fn tick_token(&self) -> Option<TickToken> {
        self.machine.tick_token()
    }

    /// The open review checkpoint, if a work interval just finished.
    pub fn pending_review(&self) -> Option<&ReviewRequest> {
        self.machine.review_request()
    }

    pub fn snapshot(&self) -> Event {
        self.machine.snapshot()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn add_todo(&mut self, text: &str) -> bool {
        let added = self.ledger.add(text);
        if added {
            self.render
                .todo_list(self.ledger.pending(), self.ledger.completed());
        }
        added
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.machine.start()?;
        self.render_phase();
        Some(event)
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.machine.stop()
    }

    pub fn reset(&mut self) -> Event {
        let event = self.machine.reset();
        self.render.phase_label("Timer", ColorToken::Green);
        self.render.countdown(&format_mmss(0));
        self.render.checkmarks(0);
        event
    }

    /// Deliver one scheduled tick and run the completion sequence when an
    /// interval finishes. Spurious ticks are discarded by the machine.
    ///
    /// An ordinary decrement produces no events. A completed interval yields
    /// `PhaseCompleted` followed by either `ReviewRequested` (work) or the
    /// `SessionStarted` of the auto-advanced next interval.
    pub fn tick(&mut self, token: TickToken) -> Vec<Event> {
        let completed = self.machine.tick(token);
        if self.machine.state() == MachineState::Running {
            self.render
                .countdown(&format_mmss(self.machine.session().remaining_secs));
        }
        let Some(event) = completed else {
            return Vec::new();
        };
        let mut events = Vec::new();
        if let Event::PhaseCompleted { checkmarks, .. } = &event {
            let checkmarks = *checkmarks;
            self.render.countdown(&format_mmss(0));
            // Playback failure never blocks advancement.
            if let Err(err) = self.alarm.play() {
                self.render.warning(&err.to_string());
            }
            self.render.checkmarks(checkmarks);
            events.push(event);
            if let Some(request) = self.machine.review_request() {
                events.push(Event::ReviewRequested {
                    started_at: request.started_at,
                    ended_at: request.ended_at,
                    at: request.ended_at,
                });
            } else if let Some(started) = self.start() {
                events.push(started);
            }
        } else {
            events.push(event);
        }
        events
    }

    /// Commit the open review checkpoint: promote the selected todos with
    /// the work interval's bounds, then auto-advance to the next interval.
    /// `None` if no review is open; otherwise the `ReviewCommitted` event
    /// followed by the next interval's `SessionStarted`.
    pub fn commit_review(&mut self, selected: &BTreeSet<String>) -> Option<Vec<Event>> {
        let request = self.machine.finish_review()?;
        let promoted =
            self.ledger
                .commit_completions(selected, request.started_at, request.ended_at);
        self.render
            .todo_list(self.ledger.pending(), self.ledger.completed());
        let mut events = vec![Event::ReviewCommitted {
            completed: promoted.len(),
            at: self.machine.now(),
        }];
        if let Some(started) = self.start() {
            events.push(started);
        }
        Some(events)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn render_phase(&mut self) {
        if let Some(phase) = self.machine.session().current_phase {
            self.render.phase_label(phase.label(), phase.color());
            self.render
                .countdown(&format_mmss(self.machine.session().remaining_secs));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::AlarmError;
    use crate::ledger::TodoItem;
    use crate::session::Phase;
    use chrono::{Duration, TimeZone, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct RecordingRender {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl RenderSink for RecordingRender {
        fn phase_label(&mut self, label: &str, _color: ColorToken) {
            self.calls.borrow_mut().push(format!("label:{label}"));
        }
        fn countdown(&mut self, mmss: &str) {
            self.calls.borrow_mut().push(format!("countdown:{mmss}"));
        }
        fn checkmarks(&mut self, count: u32) {
            self.calls.borrow_mut().push(format!("checkmarks:{count}"));
        }
        fn todo_list(&mut self, pending: &[TodoItem], completed: &[CompletedTodo]) {
            self.calls
                .borrow_mut()
                .push(format!("todos:{}/{}", pending.len(), completed.len()));
        }
        fn warning(&mut self, message: &str) {
            self.calls.borrow_mut().push(format!("warning:{message}"));
        }
    }

    struct FailingAlarm;

    impl AlarmSink for FailingAlarm {
        fn play(&mut self) -> Result<(), AlarmError> {
            Err(AlarmError::DeviceUnavailable("no output device".into()))
        }
    }

    fn runner_with_recorder() -> (SessionRunner<ManualClock>, ManualClock, Rc<RefCell<Vec<String>>>)
    {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let render = RecordingRender {
            calls: calls.clone(),
        };
        let runner = SessionRunner::new(clock.clone(), Box::new(render), Box::new(FailingAlarm));
        (runner, clock, calls)
    }

    /// Tick the armed countdown until it completes; returns the completion
    /// batch of events.
    fn finish_interval(runner: &mut SessionRunner<ManualClock>, clock: &ManualClock) -> Vec<Event> {
        let token = runner.tick_token().expect("countdown armed");
        loop {
            clock.advance(Duration::seconds(1));
            let events = runner.tick(token);
            if !events.is_empty() {
                return events;
            }
        }
    }

    fn event_names(events: &[Event]) -> Vec<&'static str> {
        events
            .iter()
            .map(|e| match e {
                Event::SessionStarted { .. } => "SessionStarted",
                Event::SessionResumed { .. } => "SessionResumed",
                Event::SessionPaused { .. } => "SessionPaused",
                Event::SessionReset { .. } => "SessionReset",
                Event::PhaseCompleted { .. } => "PhaseCompleted",
                Event::ReviewRequested { .. } => "ReviewRequested",
                Event::ReviewCommitted { .. } => "ReviewCommitted",
                Event::StateSnapshot { .. } => "StateSnapshot",
            })
            .collect()
    }

    #[test]
    fn work_completion_runs_review_and_commit_advances() {
        let (mut runner, clock, _calls) = runner_with_recorder();
        runner.add_todo("A");
        runner.add_todo("B");
        let started_at = clock.now();
        runner.start();

        finish_interval(&mut runner, &clock);
        assert_eq!(runner.machine().state(), MachineState::AwaitingReview);
        let request = *runner.pending_review().unwrap();
        assert_eq!(request.started_at, started_at);

        // Gate is open: start must be inert.
        assert!(runner.start().is_none());
        assert_eq!(runner.machine().session().repetition_count, 1);

        let selected: BTreeSet<String> = ["A".to_string()].into();
        let events = runner.commit_review(&selected).unwrap();
        assert_eq!(event_names(&events), ["ReviewCommitted", "SessionStarted"]);
        assert_eq!(runner.ledger().completed().len(), 1);
        assert_eq!(runner.ledger().completed()[0].duration_minutes, 25);
        assert_eq!(runner.ledger().pending(), &[TodoItem { text: "B".into() }]);

        // Auto-advanced into the short break despite the failing alarm.
        assert_eq!(runner.machine().state(), MachineState::Running);
        assert_eq!(runner.machine().session().repetition_count, 2);
        assert_eq!(
            runner.machine().session().current_phase,
            Some(Phase::ShortBreak)
        );
    }

    #[test]
    fn full_work_cycle_emits_review_lifecycle_events() {
        let (mut runner, clock, _calls) = runner_with_recorder();
        runner.add_todo("A");
        let started_at = clock.now();
        let mut events = vec![runner.start().unwrap()];

        events.extend(finish_interval(&mut runner, &clock));
        let selected: BTreeSet<String> = ["A".to_string()].into();
        events.extend(runner.commit_review(&selected).unwrap());

        assert_eq!(
            event_names(&events),
            [
                "SessionStarted",
                "PhaseCompleted",
                "ReviewRequested",
                "ReviewCommitted",
                "SessionStarted",
            ]
        );
        match events[2] {
            Event::ReviewRequested {
                started_at: s,
                ended_at: e,
                ..
            } => {
                assert_eq!(s, started_at);
                assert_eq!(e, started_at + Duration::seconds(1500));
            }
            ref other => panic!("expected ReviewRequested, got {other:?}"),
        }
        match events[3] {
            Event::ReviewCommitted { completed, .. } => assert_eq!(completed, 1),
            ref other => panic!("expected ReviewCommitted, got {other:?}"),
        }
    }

    #[test]
    fn break_completion_auto_advances_without_review() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap());
        let mut runner = SessionRunner::new(
            clock.clone(),
            Box::new(crate::sinks::NoopRender),
            Box::new(crate::sinks::NoopAlarm),
        );
        runner.start();
        finish_interval(&mut runner, &clock);
        runner.commit_review(&BTreeSet::new()); // empty commit, cycle advances

        // Short break runs and completes; no review, straight to next work.
        let events = finish_interval(&mut runner, &clock);
        assert_eq!(event_names(&events), ["PhaseCompleted", "SessionStarted"]);
        assert_eq!(runner.machine().state(), MachineState::Running);
        assert_eq!(runner.machine().session().repetition_count, 3);
        assert_eq!(runner.machine().session().current_phase, Some(Phase::Work));
    }

    #[test]
    fn completion_renders_checkmarks_after_alarm_warning() {
        let (mut runner, clock, calls) = runner_with_recorder();
        runner.start();
        finish_interval(&mut runner, &clock);
        runner.commit_review(&BTreeSet::new());
        finish_interval(&mut runner, &clock); // short break done, checkmark 1

        let calls = calls.borrow();
        // Alarm failed, was surfaced through the sink, and did not stop the
        // checkmark render or the auto-advance.
        let warn_at = calls
            .iter()
            .position(|c| c.starts_with("warning:"))
            .expect("alarm failure surfaced");
        let marks_at = calls.iter().position(|c| c == "checkmarks:1").unwrap();
        assert!(warn_at < marks_at);
        assert_eq!(calls.last().unwrap(), "countdown:25:00");
    }

    #[test]
    fn reset_renders_cleared_display() {
        let (mut runner, _clock, calls) = runner_with_recorder();
        runner.start();
        runner.reset();
        let calls = calls.borrow();
        let tail: Vec<&String> = calls.iter().rev().take(3).collect();
        assert_eq!(tail[2], "label:Timer");
        assert_eq!(tail[1], "countdown:00:00");
        assert_eq!(tail[0], "checkmarks:0");
    }

    #[test]
    fn blank_todo_renders_nothing() {
        let (mut runner, _clock, calls) = runner_with_recorder();
        assert!(!runner.add_todo("  "));
        assert!(calls.borrow().is_empty());
        assert!(runner.add_todo("Write report"));
        assert_eq!(calls.borrow().last().unwrap(), "todos:1/0");
    }
}
