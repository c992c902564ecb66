//! Load module content from TOML or JSON files
//!
//! Every entry point runs the integrity checks, so a `Module` returned from
//! here is safe to hand to a session.

use crate::content::chapter::Module;
use crate::content::integrity::check_module;
use crate::core::error::{PlayerError, Result};
use std::path::Path;

impl Module {
    /// Parse and check a module from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let module: Module = toml::from_str(content)?;
        check_module(&module)?;
        Ok(module)
    }

    /// Parse and check a module from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        let module: Module = serde_json::from_str(content)?;
        check_module(&module)?;
        Ok(module)
    }

    /// Load a module file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let content = match extension.as_str() {
            "toml" | "json" => std::fs::read_to_string(path)?,
            _ => return Err(PlayerError::UnsupportedFormat(path.display().to_string())),
        };

        let module = if extension == "json" {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            chapters = module.chapter_count(),
            tasks = module.total_task_count(),
            "Loaded module content"
        );
        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::integrity::IssueKind;
    use crate::content::task::TaskKind;

    const SMALL_MODULE: &str = r#"
title = "Small"

[[chapters]]
id = "intro"
title = "Introduction"
context = "Find things."

[[chapters.tasks]]
type = "click"
id = "find-a"
instruction = "Click A"
correct_target = "a"
success_message = "Yes"
error_message = "No"

[[chapters.tasks]]
type = "mcq"
id = "quiz"
question = "Pick"
options = ["A", "B", "C"]
correct_answers = ["C", "A"]
success_message = "Yes"
error_message = "No"
"#;

    #[test]
    fn test_parse_toml_module() {
        let module = Module::from_toml_str(SMALL_MODULE).unwrap();
        assert_eq!(module.chapter_count(), 1);
        assert_eq!(module.chapters[0].tasks[1].kind(), TaskKind::Choice);
        assert!(module.hotspots.is_none());
    }

    #[test]
    fn test_toml_with_bad_answer_is_refused() {
        let broken = SMALL_MODULE.replace(r#"["C", "A"]"#, r#"["C", "D"]"#);
        match Module::from_toml_str(&broken) {
            Err(PlayerError::InvalidContent(issue)) => {
                assert_eq!(issue.task_id.as_deref(), Some("quiz"));
                assert_eq!(issue.kind, IssueKind::UnknownCorrectAnswer("D".into()));
            }
            other => panic!("expected invalid content, got {:?}", other),
        }
    }

    #[test]
    fn test_json_round_trip_of_builtin() {
        let module = crate::content::builtin::engine_bay();
        let json = serde_json::to_string(&module).unwrap();
        assert_eq!(Module::from_json_str(&json).unwrap(), module);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = Module::load(Path::new("course.yaml"));
        assert!(matches!(result, Err(PlayerError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Module::load(Path::new("definitely/not/here.toml"));
        assert!(matches!(result, Err(PlayerError::IoError(_))));
    }
}
