//! Session - the engine boundary used by the rendering layer
//!
//! A session owns the progression machine, the cable scene of the current
//! chapter and a queue of events. The rendering layer forwards intents
//! (select, toggle, submit, advance, reset, jump, drag) and reads back a
//! [`SessionSnapshot`]. Observation is by polling: [`Session::revision`]
//! changes whenever an intent was applied and [`Session::drain_events`]
//! says what happened.
//!
//! All intents are total. Ones that do not apply are ignored and return
//! `None`, leaving the revision untouched.

pub mod events;
pub mod snapshot;

pub use events::{EventLog, SessionEvent};
pub use snapshot::{CableView, ChapterView, SessionSnapshot};

use crate::content::chapter::{Chapter, Interaction, Module};
use crate::content::task::Task;
use crate::core::config::PlayerConfig;
use crate::core::error::{PlayerError, Result};
use crate::core::types::{HandleId, SessionId, Status};
use crate::drag::{CableScene, DragSignal};
use crate::progression::{Position, ProgressionMachine, Verdict};
use glam::Vec2;
use std::sync::Arc;

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    config: PlayerConfig,
    machine: ProgressionMachine,
    /// Exists while the current chapter is a cable-drag chapter
    cable: Option<CableScene>,
    events: EventLog,
    revision: u64,
    completion_announced: bool,
}

impl Session {
    /// Start a session at the first task of the module
    ///
    /// Fails when the config is inconsistent or the content does not pass
    /// the integrity checks.
    pub fn new(module: Arc<Module>, config: PlayerConfig) -> Result<Self> {
        config.validate().map_err(PlayerError::InvalidConfig)?;
        let machine = ProgressionMachine::new(module, config.navigation.policy())?;

        let mut session = Self {
            id: SessionId::new(),
            events: EventLog::new(config.event_log_capacity),
            config,
            machine,
            cable: None,
            revision: 0,
            completion_announced: false,
        };
        session.enter_chapter();
        session.sync();

        tracing::info!(
            session = %session.id,
            module = %session.machine.module().title,
            chapters = session.machine.module().chapter_count(),
            navigation = ?session.config.navigation,
            "Session started"
        );
        Ok(session)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn module(&self) -> &Arc<Module> {
        self.machine.module()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn position(&self) -> Position {
        self.machine.position()
    }

    pub fn current_chapter(&self) -> &Chapter {
        self.machine.current_chapter()
    }

    pub fn current_task(&self) -> &Task {
        self.machine.current_task()
    }

    pub fn status(&self) -> Status {
        self.machine.status()
    }

    pub fn message(&self) -> Option<&str> {
        self.machine.message()
    }

    pub fn progress_percent(&self) -> u8 {
        self.machine.progress_percent()
    }

    pub fn module_progress_percent(&self) -> u8 {
        self.machine.module_progress_percent()
    }

    pub fn can_advance(&self) -> bool {
        self.machine.can_advance()
    }

    pub fn is_complete(&self) -> bool {
        self.machine.is_complete()
    }

    pub fn is_chapter_reachable(&self, index: usize) -> bool {
        self.machine.is_chapter_reachable(index)
    }

    pub fn is_task_reachable(&self, index: usize) -> bool {
        self.machine.is_task_reachable(index)
    }

    /// Selected options of the current choice task, in authored order
    pub fn selected_options(&self) -> Vec<String> {
        let state = self.machine.state();
        match self.current_task().as_choice() {
            Some(task) => task
                .options
                .iter()
                .filter(|o| state.is_selected(o))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Cable scene, while the current task is answered by dragging
    pub fn cable(&self) -> Option<&CableScene> {
        if self.uses_cable() {
            self.cable.as_ref()
        } else {
            None
        }
    }

    /// Take every event since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let module = self.module();
        let Position { chapter, task } = self.position();
        let hotspots = if self.uses_hotspots() {
            module.hotspots.clone()
        } else {
            None
        };

        SessionSnapshot {
            session_id: self.id,
            revision: self.revision,
            module_title: module.title.clone(),
            chapter: ChapterView::from(self.current_chapter()),
            chapter_count: module.chapter_count(),
            chapter_index: chapter,
            task_index: task,
            task: self.current_task().clone(),
            status: self.status(),
            message: self.message().map(str::to_string),
            progress_percent: self.progress_percent(),
            module_progress_percent: self.module_progress_percent(),
            can_advance: self.can_advance(),
            is_complete: self.is_complete(),
            selected_options: self.selected_options(),
            reachable_chapters: (0..module.chapter_count())
                .map(|i| self.is_chapter_reachable(i))
                .collect(),
            reachable_tasks: (0..self.current_chapter().task_count())
                .map(|i| self.is_task_reachable(i))
                .collect(),
            hotspots,
            cable: self.cable().map(CableView::from),
        }
    }

    // ------------------------------------------------------------------
    // Answer intents
    // ------------------------------------------------------------------

    /// Answer the current click task with a target identifier
    pub fn select_target(&mut self, target_id: &str) -> Option<Verdict> {
        let verdict = self.machine.submit_click_answer(target_id)?;
        self.record_verdict(verdict);
        Some(verdict)
    }

    /// Answer the current click task by clicking a scene point
    ///
    /// Only hotspot chapters accept scene clicks; a click that hits no
    /// hotspot is ignored.
    pub fn select_at(&mut self, point: Vec2) -> Option<Verdict> {
        if !self.uses_hotspots() {
            return None;
        }
        let target = self
            .module()
            .hotspots
            .as_ref()?
            .hit_test(point)?
            .id
            .clone();
        self.select_target(&target)
    }

    pub fn toggle_choice(&mut self, option: &str) -> Option<bool> {
        let selected = self.machine.toggle_choice_option(option)?;
        self.events.push(SessionEvent::OptionToggled {
            option: option.to_string(),
            selected,
        });
        self.touch();
        Some(selected)
    }

    pub fn submit_choice(&mut self) -> Option<Verdict> {
        let verdict = self.machine.submit_choice_answer()?;
        self.record_verdict(verdict);
        Some(verdict)
    }

    fn record_verdict(&mut self, verdict: Verdict) {
        let Position { chapter, task } = self.position();
        self.events.push(SessionEvent::Answered { chapter, task, verdict });
        self.after_transition();
    }

    // ------------------------------------------------------------------
    // Movement intents
    // ------------------------------------------------------------------

    pub fn advance(&mut self) -> Option<Position> {
        let before = self.position();
        let next = self.machine.advance()?;
        self.events.push(SessionEvent::Advanced {
            chapter: next.chapter,
            task: next.task,
        });
        if next.chapter != before.chapter {
            self.enter_chapter();
        } else {
            self.enter_task();
        }
        self.after_transition();
        Some(next)
    }

    pub fn jump_to_chapter(&mut self, index: usize) -> Option<Position> {
        let next = self.machine.jump_to_chapter(index)?;
        self.events.push(SessionEvent::Jumped {
            chapter: next.chapter,
            task: next.task,
        });
        self.enter_chapter();
        self.after_transition();
        Some(next)
    }

    pub fn jump_to_task(&mut self, index: usize) -> Option<Position> {
        let next = self.machine.jump_to_task(index)?;
        self.events.push(SessionEvent::Jumped {
            chapter: next.chapter,
            task: next.task,
        });
        self.enter_task();
        self.after_transition();
        Some(next)
    }

    /// Restart from the first task, forgetting all progress
    pub fn reset(&mut self) {
        self.machine.reset();
        self.completion_announced = false;
        self.events.push(SessionEvent::Reset);
        self.enter_chapter();
        self.after_transition();
        tracing::debug!(session = %self.id, "Session reset");
    }

    // ------------------------------------------------------------------
    // Drag intents
    // ------------------------------------------------------------------

    /// Pointer down on a cable clamp
    pub fn begin_drag(&mut self, handle: HandleId) -> Option<DragSignal> {
        if !self.uses_cable() {
            return None;
        }
        let scene = self.cable.as_mut()?;
        let signal = scene.begin(handle);
        let grabbed = scene.dragging() == Some(handle);

        if let Some(DragSignal::WrongHandle(wrong)) = signal {
            tracing::debug!(session = %self.id, handle = %wrong, "Wrong clamp grabbed");
            self.events.push(SessionEvent::WrongHandle { handle: wrong });
            self.select_target(wrong.as_str());
        }
        if grabbed {
            self.touch();
        }
        signal
    }

    /// Pointer moved to a scene point while holding a clamp
    pub fn move_drag(&mut self, point: Vec2) -> Option<DragSignal> {
        if !self.uses_cable() {
            return None;
        }
        let scene = self.cable.as_mut()?;
        scene.dragging()?;
        let signal = scene.move_to(point);

        if let Some(DragSignal::Disconnected(handle)) = signal {
            scene.mark_disconnected(handle);
            tracing::debug!(session = %self.id, handle = %handle, "Clamp disconnected");
            self.events.push(SessionEvent::HandleDisconnected { handle });
            self.select_target(handle.as_str());
        }
        self.touch();
        signal
    }

    /// Pointer up; returns the clamp that was released
    pub fn end_drag(&mut self) -> Option<HandleId> {
        if !self.uses_cable() {
            return None;
        }
        let released = self.cable.as_mut()?.release()?;
        self.touch();
        Some(released)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn uses_cable(&self) -> bool {
        self.current_chapter().interaction == Interaction::CableDrag
            && self.current_task().as_click().is_some()
    }

    fn uses_hotspots(&self) -> bool {
        self.current_chapter().interaction == Interaction::Hotspots
            && self.current_task().as_click().is_some()
    }

    /// Rebuild the cable scene for a freshly entered chapter
    fn enter_chapter(&mut self) {
        self.cable = match self.current_chapter().interaction {
            Interaction::CableDrag => {
                // Placeholder until enter_task picks the task's own clamp
                Some(CableScene::new(&self.config.drag, HandleId::Negative))
            }
            Interaction::Hotspots => None,
        };
        self.enter_task();
    }

    /// Align the cable scene with the current task
    fn enter_task(&mut self) {
        let required = self.required_handle();
        let mut disconnected = self.disconnected_by_sequence();
        if let (Some(scene), Some(required)) = (self.cable.as_mut(), required) {
            // The clamp this task asks for is always grabbable
            disconnected[required.index()] = false;
            scene.prepare_task(required, disconnected);
        }
    }

    fn required_handle(&self) -> Option<HandleId> {
        self.current_task()
            .as_click()
            .and_then(|task| task.correct_target.parse().ok())
    }

    /// Clamps whose click tasks come before the current task in this chapter
    fn disconnected_by_sequence(&self) -> [bool; 2] {
        let mut flags = [false; 2];
        let current = self.position().task;
        for task in self.current_chapter().tasks.iter().take(current) {
            if let Some(handle) = task
                .as_click()
                .and_then(|t| t.correct_target.parse::<HandleId>().ok())
            {
                flags[handle.index()] = true;
            }
        }
        flags
    }

    fn after_transition(&mut self) {
        self.sync();
        self.touch();
    }

    /// Derive scene gating and completion from the machine's status
    fn sync(&mut self) {
        let disabled = self.status().is_success();
        if let Some(scene) = self.cable.as_mut() {
            scene.set_disabled(disabled);
        }
        if self.machine.is_complete() && !self.completion_announced {
            self.completion_announced = true;
            self.events.push(SessionEvent::ModuleCompleted);
            tracing::info!(session = %self.id, "Module completed");
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
