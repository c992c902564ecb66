//! Read-only view of a session for the rendering layer

use crate::content::chapter::{Chapter, Interaction};
use crate::content::task::Task;
use crate::core::types::{HandleId, SessionId, Status};
use crate::drag::{CableScene, Handle};
use crate::hotspot::HotspotLayer;
use serde::{Deserialize, Serialize};

/// Everything the rendering layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    /// Increases on every applied intent
    pub revision: u64,
    pub module_title: String,
    pub chapter: ChapterView,
    pub chapter_count: usize,
    pub chapter_index: usize,
    pub task_index: usize,
    pub task: Task,
    pub status: Status,
    pub message: Option<String>,
    /// Within the current chapter
    pub progress_percent: u8,
    /// Across the whole module
    pub module_progress_percent: u8,
    pub can_advance: bool,
    pub is_complete: bool,
    /// In authored option order
    pub selected_options: Vec<String>,
    pub reachable_chapters: Vec<bool>,
    /// Tasks of the current chapter
    pub reachable_tasks: Vec<bool>,
    /// Present while the current task is answered by clicking hotspots
    pub hotspots: Option<HotspotLayer>,
    /// Present while the current task is answered by dragging a clamp
    pub cable: Option<CableView>,
}

impl SessionSnapshot {
    pub fn is_chapter_reachable(&self, index: usize) -> bool {
        self.reachable_chapters.get(index).copied().unwrap_or(false)
    }

    pub fn is_task_reachable(&self, index: usize) -> bool {
        self.reachable_tasks.get(index).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterView {
    pub id: String,
    pub title: String,
    pub context: String,
    pub interaction: Interaction,
    pub task_count: usize,
}

impl From<&Chapter> for ChapterView {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id.clone(),
            title: chapter.title.clone(),
            context: chapter.context.clone(),
            interaction: chapter.interaction,
            task_count: chapter.task_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableView {
    pub required: HandleId,
    pub disabled: bool,
    pub dragging: Option<HandleId>,
    pub threshold: f32,
    pub handles: Vec<Handle>,
}

impl From<&CableScene> for CableView {
    fn from(scene: &CableScene) -> Self {
        Self {
            required: scene.required(),
            disabled: scene.is_disabled(),
            dragging: scene.dragging(),
            threshold: scene.threshold(),
            handles: scene.handles().to_vec(),
        }
    }
}

impl CableView {
    pub fn handle(&self, id: HandleId) -> Option<&Handle> {
        self.handles.iter().find(|h| h.id == id)
    }
}
