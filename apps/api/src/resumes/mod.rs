//! Resume uploads and the placeholder ATS score.

pub mod handlers;
pub mod upload;

use serde::Serialize;

use crate::models::resume::ResumeRow;

/// ATS score of a user's most recent resume. `scored` is always false:
/// no scoring engine exists and the stored value is the upload default.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AtsScore {
    pub resume_id: i64,
    pub ats_score: i32,
    pub scored: bool,
}

impl From<&ResumeRow> for AtsScore {
    fn from(resume: &ResumeRow) -> Self {
        Self {
            resume_id: resume.id,
            ats_score: resume.ats_score,
            scored: false,
        }
    }
}

/// Storage keys under the user's prefix that no resume row references.
pub fn orphaned_paths(stored: Vec<String>, resumes: &[ResumeRow]) -> Vec<String> {
    let mut orphans: Vec<String> = stored
        .into_iter()
        .filter(|path| !resumes.iter().any(|r| &r.file_path == path))
        .collect();
    orphans.sort();
    orphans
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn resume(id: i64, path: &str) -> ResumeRow {
        ResumeRow {
            id,
            user_id: "user_1".into(),
            public_url: format!("https://cdn.example.com/{path}"),
            file_path: path.into(),
            ats_score: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_orphaned_paths_excludes_referenced_keys() {
        let stored = vec![
            "user_1/300.pdf".to_string(),
            "user_1/100.pdf".to_string(),
            "user_1/200.pdf".to_string(),
        ];
        let rows = vec![resume(1, "user_1/100.pdf")];
        assert_eq!(
            orphaned_paths(stored, &rows),
            vec!["user_1/200.pdf".to_string(), "user_1/300.pdf".to_string()]
        );
    }

    #[test]
    fn test_ats_score_is_never_marked_scored() {
        let score = AtsScore::from(&resume(7, "user_1/1.pdf"));
        assert_eq!(score.resume_id, 7);
        assert_eq!(score.ats_score, 0);
        assert!(!score.scored);
    }
}
