use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::{strip_json_fences, LlmError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsReport {
    pub skills: Vec<String>,
}

/// Parses model output into a skills report.
///
/// Schema-constrained output normally parses directly; otherwise the text
/// between the first `{` and the last `}` is tried.
pub fn parse_skills_output(raw: &str) -> Result<SkillsReport, LlmError> {
    let text = strip_json_fences(raw);

    let parsed = serde_json::from_str::<SkillsReport>(text).or_else(|first_err| {
        match extract_json_object(text) {
            Some(candidate) => serde_json::from_str::<SkillsReport>(candidate),
            None => Err(first_err),
        }
    });
    let report = parsed.map_err(|source| {
        warn!("Unparseable skill extraction output: {raw}");
        LlmError::Parse {
            source,
            raw: raw.to_string(),
        }
    })?;

    Ok(SkillsReport {
        skills: clean_skills(report.skills),
    })
}

/// Slice from the first `{` through the last `}`, if both exist in order.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Trims, drops empties, dedupes and sorts ascending.
pub fn clean_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn parse_with_logs(raw: &str) -> (Result<SkillsReport, LlmError>, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, || parse_skills_output(raw));
        let text = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
        (result, text)
    }

    #[test]
    fn test_plain_json_parses() {
        let report = parse_skills_output(r#"{"skills": ["Rust", "SQL"]}"#).unwrap();
        assert_eq!(report.skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_prose_around_object_is_cut_away() {
        let raw = "Sure! Here are the skills:\n{\"skills\": [\"Python\", \"Excel\"]}\nHope this helps.";
        let report = parse_skills_output(raw).unwrap();
        assert_eq!(report.skills, vec!["Excel", "Python"]);
    }

    #[test]
    fn test_fenced_output_parses() {
        let raw = "```json\n{\"skills\": [\"Go\"]}\n```";
        assert_eq!(parse_skills_output(raw).unwrap().skills, vec!["Go"]);
    }

    #[test]
    fn test_skills_are_deduped_sorted_and_non_empty() {
        let raw = r#"{"skills": ["SQL", "", "AutoCAD", "SQL", "  ", " MATLAB "]}"#;
        let report = parse_skills_output(raw).unwrap();
        assert_eq!(report.skills, vec!["AutoCAD", "MATLAB", "SQL"]);
    }

    #[test]
    fn test_garbage_keeps_raw_output() {
        let err = parse_skills_output("I could not find any skills.").unwrap_err();
        match err {
            LlmError::Parse { raw, .. } => assert_eq!(raw, "I could not find any skills."),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_skills_key_is_parse_error() {
        assert!(matches!(
            parse_skills_output(r#"{"tools": ["x"]}"#),
            Err(LlmError::Parse { .. })
        ));
    }

    #[test]
    fn test_every_parse_failure_is_logged() {
        // No braces at all, then braces around invalid JSON.
        for raw in ["no skills here", "prefix {not json} suffix"] {
            let (result, logs) = parse_with_logs(raw);
            assert!(matches!(result, Err(LlmError::Parse { .. })));
            assert!(logs.contains("WARN"), "missing warning for {raw:?}: {logs}");
            assert!(logs.contains(raw));
        }
    }
}
