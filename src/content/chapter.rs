//! Chapters and the module - the fixed, ordered course content

use crate::content::task::Task;
use crate::hotspot::HotspotLayer;
use serde::{Deserialize, Serialize};

/// How click tasks of a chapter are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Click a region of the scene image
    #[default]
    Hotspots,
    /// Drag a cable clamp off its battery terminal
    CableDrag,
}

/// A titled group of ordered tasks sharing context text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub context: String,
    #[serde(default)]
    pub interaction: Interaction,
    /// Never empty once the module has passed integrity checks
    pub tasks: Vec<Task>,
}

impl Chapter {
    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

/// The full ordered sequence of chapters
///
/// Immutable for the lifetime of a session; sessions share it through `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    pub chapters: Vec<Chapter>,
    /// Clickable regions of the scene image used by hotspot chapters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspots: Option<HotspotLayer>,
}

impl Module {
    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Number of tasks across every chapter
    pub fn total_task_count(&self) -> usize {
        self.chapters.iter().map(Chapter::task_count).sum()
    }

    /// Number of tasks in chapters strictly before `chapter_index`
    pub fn tasks_before(&self, chapter_index: usize) -> usize {
        self.chapters
            .iter()
            .take(chapter_index)
            .map(Chapter::task_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::task::TerminalTask;

    fn terminal(id: &str) -> Task {
        Task::Terminal(TerminalTask {
            id: id.into(),
            title: String::new(),
            body: String::new(),
        })
    }

    fn chapter(id: &str, tasks: usize) -> Chapter {
        Chapter {
            id: id.into(),
            title: id.into(),
            context: String::new(),
            interaction: Interaction::Hotspots,
            tasks: (0..tasks).map(|i| terminal(&format!("{}-{}", id, i))).collect(),
        }
    }

    #[test]
    fn test_task_counts() {
        let module = Module {
            title: "m".into(),
            chapters: vec![chapter("a", 2), chapter("b", 3), chapter("c", 1)],
            hotspots: None,
        };
        assert_eq!(module.total_task_count(), 6);
        assert_eq!(module.tasks_before(0), 0);
        assert_eq!(module.tasks_before(2), 5);
        assert!(module.chapter(3).is_none());
    }

    #[test]
    fn test_interaction_defaults_to_hotspots() {
        let json = r#"{"id": "a", "title": "A", "context": "", "tasks": []}"#;
        let chapter: Chapter = serde_json::from_str(json).unwrap();
        assert_eq!(chapter.interaction, Interaction::Hotspots);
    }
}
