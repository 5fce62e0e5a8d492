//! ATS Scorer — weighted completeness score with per-section feedback.
//!
//! The score is a heuristic proxy for how cleanly an applicant tracking system would pick
//! up each résumé section, not any vendor's actual algorithm.
//!
//! Rule (additive, each component capped, total capped at 100):
//! - personal info: +10 if present
//! - summary: +15 if present
//! - skills: +min(25, 2 × skill count)
//! - experience: +min(30, 10 × entry count)
//! - education: +10 if present
//! - projects: +min(10, 3 × entry count)

use serde::{Deserialize, Serialize};

use crate::models::resume::{PromptFields, ResumeSnapshot};

pub const MAX_SCORE: u32 = 100;

const PERSONAL_INFO_POINTS: u32 = 10;
const SUMMARY_POINTS: u32 = 15;
const EDUCATION_POINTS: u32 = 10;

const POINTS_PER_SKILL: u32 = 2;
const SKILLS_CAP: u32 = 25;
const POINTS_PER_EXPERIENCE: u32 = 10;
const EXPERIENCE_CAP: u32 = 30;
const POINTS_PER_PROJECT: u32 = 3;
const PROJECTS_CAP: u32 = 10;

/// Skill count at which the skills section reads as varied.
const SKILL_VARIETY_THRESHOLD: usize = 10;
/// Experience entries below which we suggest adding more.
const EXPERIENCE_DEPTH_THRESHOLD: usize = 2;

/// Per-section points. `total` is the capped sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub personal_info: u32,
    pub summary: u32,
    pub skills: u32,
    pub experience: u32,
    pub education: u32,
    pub projects: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsFeedback {
    pub suggestions: Vec<String>,
    pub strengths: Vec<String>,
    pub score: u32,
}

pub fn breakdown(resume: &ResumeSnapshot) -> ScoreBreakdown {
    let personal_info = if resume.personal_info.is_blank() {
        0
    } else {
        PERSONAL_INFO_POINTS
    };
    let summary = if resume.has_summary() { SUMMARY_POINTS } else { 0 };
    let skills = capped(resume.skill_count(), POINTS_PER_SKILL, SKILLS_CAP);
    let experience = capped(resume.experience.len(), POINTS_PER_EXPERIENCE, EXPERIENCE_CAP);
    let education = if resume.education.is_empty() {
        0
    } else {
        EDUCATION_POINTS
    };
    let projects = capped(resume.projects.len(), POINTS_PER_PROJECT, PROJECTS_CAP);

    let total = (personal_info + summary + skills + experience + education + projects).min(MAX_SCORE);

    ScoreBreakdown {
        personal_info,
        summary,
        skills,
        experience,
        education,
        projects,
        total,
    }
}

/// ATS compatibility score in `[0, 100]`.
pub fn score(resume: &ResumeSnapshot) -> u32 {
    breakdown(resume).total
}

/// One message per section: a strength when present, a suggestion when absent or thin.
/// `score` is always a fresh `score(resume)`.
pub fn feedback(resume: &ResumeSnapshot) -> AtsFeedback {
    let mut suggestions = Vec::new();
    let mut strengths = Vec::new();

    if resume.personal_info.is_blank() {
        suggestions.push("Add personal information (name, email, phone, location)".to_string());
    } else {
        strengths.push("Personal information is complete".to_string());
    }

    if resume.has_summary() {
        strengths.push("Professional summary is present".to_string());
    } else {
        suggestions.push("Add a professional summary to highlight your expertise".to_string());
    }

    match resume.skill_count() {
        0 => suggestions.push("Add relevant skills for your target role".to_string()),
        n if n < SKILL_VARIETY_THRESHOLD => {
            suggestions.push("Add more skills (aim for 10-15 relevant skills)".to_string())
        }
        _ => strengths.push("Good variety of skills listed".to_string()),
    }

    if resume.experience.is_empty() {
        suggestions.push("Add work experience with measurable achievements".to_string());
    } else {
        strengths.push("Work experience is documented".to_string());
        if resume.experience.len() < EXPERIENCE_DEPTH_THRESHOLD {
            suggestions.push("Add more work experience entries if available".to_string());
        }
    }

    if resume.education.is_empty() {
        suggestions.push("Add your educational background".to_string());
    } else {
        strengths.push("Education is included".to_string());
    }

    if resume.projects.is_empty() {
        suggestions.push("Add relevant projects to showcase your skills".to_string());
    } else {
        strengths.push("Projects are included".to_string());
    }

    AtsFeedback {
        suggestions,
        strengths,
        score: score(resume),
    }
}

fn capped(count: usize, points_each: u32, cap: u32) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(points_each)
        .min(cap)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry};

    fn with_skills(count: usize) -> ResumeSnapshot {
        let mut resume = ResumeSnapshot::default();
        resume.skills.insert(
            "Languages".to_string(),
            (0..count).map(|i| format!("skill-{i}")).collect(),
        );
        resume
    }

    fn experience(count: usize) -> Vec<ExperienceEntry> {
        (0..count)
            .map(|i| ExperienceEntry {
                role: Some(format!("Engineer {i}")),
                ..Default::default()
            })
            .collect()
    }

    fn projects(count: usize) -> Vec<ProjectEntry> {
        (0..count)
            .map(|i| ProjectEntry {
                name: Some(format!("Project {i}")),
                ..Default::default()
            })
            .collect()
    }

    fn saturated() -> ResumeSnapshot {
        let mut resume = with_skills(13);
        resume.personal_info = PersonalInfo {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        resume.summary = Some("Backend engineer focused on reliability.".to_string());
        resume.experience = experience(3);
        resume.education = vec![EducationEntry {
            degree: Some("BSc Computer Science".to_string()),
            ..Default::default()
        }];
        resume.projects = projects(4);
        resume
    }

    #[test]
    fn test_empty_snapshot_scores_zero_with_six_suggestions() {
        let resume = ResumeSnapshot::default();
        assert_eq!(score(&resume), 0);

        let fb = feedback(&resume);
        assert_eq!(fb.score, 0);
        assert_eq!(fb.suggestions.len(), 6);
        assert!(fb.strengths.is_empty());
    }

    #[test]
    fn test_null_sections_score_zero() {
        let resume: ResumeSnapshot = serde_json::from_value(serde_json::json!({
            "personal_info": null,
            "summary": null,
            "skills": null,
            "education": null,
            "experience": null,
            "projects": null
        }))
        .unwrap();

        assert_eq!(score(&resume), 0);
        assert_eq!(feedback(&resume).suggestions.len(), 6);
    }

    #[test]
    fn test_skills_component_is_capped_at_25() {
        assert_eq!(breakdown(&with_skills(3)).skills, 6);
        assert_eq!(breakdown(&with_skills(12)).skills, 24);
        assert_eq!(breakdown(&with_skills(20)).skills, 25);
    }

    #[test]
    fn test_experience_component_is_capped_at_30() {
        let mut resume = ResumeSnapshot::default();
        resume.experience = experience(2);
        assert_eq!(breakdown(&resume).experience, 20);
        resume.experience = experience(4);
        assert_eq!(breakdown(&resume).experience, 30);
    }

    #[test]
    fn test_projects_component_is_capped_at_10() {
        let mut resume = ResumeSnapshot::default();
        resume.projects = projects(1);
        assert_eq!(breakdown(&resume).projects, 3);
        resume.projects = projects(5);
        assert_eq!(breakdown(&resume).projects, 10);
    }

    #[test]
    fn test_saturated_snapshot_scores_100() {
        let resume = saturated();
        let b = breakdown(&resume);
        assert_eq!(
            b,
            ScoreBreakdown {
                personal_info: 10,
                summary: 15,
                skills: 25,
                experience: 30,
                education: 10,
                projects: 10,
                total: 100,
            }
        );
        let fb = feedback(&resume);
        assert!(fb.suggestions.is_empty(), "unexpected: {:?}", fb.suggestions);
        assert_eq!(fb.strengths.len(), 6);
    }

    #[test]
    fn test_partially_filled_snapshot_score() {
        // 10 + 15 + 20 + 20 + 10 + 3
        let mut resume = saturated();
        resume.skills = with_skills(10).skills;
        resume.experience = experience(2);
        resume.projects = projects(1);
        assert_eq!(score(&resume), 78);
    }

    #[test]
    fn test_adding_skills_never_lowers_score() {
        let mut resume = saturated();
        resume.skills.clear();
        let mut previous = score(&resume);
        for n in 1..=30 {
            resume = ResumeSnapshot {
                skills: with_skills(n).skills,
                ..resume
            };
            let current = score(&resume);
            assert!(current >= previous, "score dropped at {n} skills");
            assert!(current <= MAX_SCORE);
            previous = current;
        }
    }

    #[test]
    fn test_score_is_deterministic() {
        let resume = saturated();
        let first = breakdown(&resume);
        for _ in 0..5 {
            assert_eq!(breakdown(&resume), first);
        }
    }

    #[test]
    fn test_feedback_score_matches_score() {
        for resume in [ResumeSnapshot::default(), with_skills(4), saturated()] {
            assert_eq!(feedback(&resume).score, score(&resume));
        }
    }

    #[test]
    fn test_caller_supplied_score_is_ignored() {
        let resume = ResumeSnapshot {
            ats_score: 99,
            ..Default::default()
        };
        assert_eq!(score(&resume), 0);
    }

    #[test]
    fn test_thin_skills_yield_suggestion_not_strength() {
        let fb = feedback(&with_skills(9));
        assert!(fb
            .suggestions
            .iter()
            .any(|s| s.starts_with("Add more skills")));
        assert!(!fb.strengths.iter().any(|s| s.contains("variety")));

        let fb = feedback(&with_skills(10));
        assert!(fb.strengths.iter().any(|s| s.contains("variety")));
    }

    #[test]
    fn test_single_experience_is_strength_plus_suggestion() {
        let mut resume = ResumeSnapshot::default();
        resume.experience = experience(1);
        let fb = feedback(&resume);
        assert!(fb.strengths.contains(&"Work experience is documented".to_string()));
        assert!(fb
            .suggestions
            .contains(&"Add more work experience entries if available".to_string()));
        // 5 absent sections + 1 depth suggestion
        assert_eq!(fb.suggestions.len(), 6);
    }

    #[test]
    fn test_whitespace_summary_is_absent() {
        let resume = ResumeSnapshot {
            summary: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(breakdown(&resume).summary, 0);
    }
}
