//! Generated listings
//!
//! The last tier of the fallback chain. When nothing live can answer, the
//! generator produces plausible listings shaped by the query so the app
//! still has something to render. Content follows the Turkish market the
//! app ships in.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use career_search_core::JobListing;

const COMPANIES: [&str; 8] = [
    "TechCorp Yazılım",
    "Dijital Çözümler A.Ş.",
    "Yazılım Dünyası",
    "Teknoloji Merkezi",
    "İnovasyon Labs",
    "Kod Fabrikası",
    "Veri Sistemleri",
    "Bulut Teknolojileri",
];

const EMPLOYMENT_TYPES: [&str; 4] = ["Tam Zamanlı", "Yarı Zamanlı", "Uzaktan", "Hibrit"];

// Salary bands track the experience level drawn for the listing.
const EXPERIENCE_LEVELS: [(&str, &str); 5] = [
    ("Junior", "8.000 - 15.000 TL"),
    ("Mid-Level", "15.000 - 25.000 TL"),
    ("Senior", "25.000 - 40.000 TL"),
    ("Lead", "35.000 - 55.000 TL"),
    ("Principal", "50.000 - 80.000 TL"),
];

const FRONTEND_SKILLS: &[&str] = &[
    "React", "Vue.js", "Angular", "JavaScript", "TypeScript", "HTML5", "CSS3", "Sass",
];
const BACKEND_SKILLS: &[&str] = &[
    "Node.js", "Python", "Java", "C#", ".NET Core", "PHP", "Go", "Ruby",
];
const MOBILE_SKILLS: &[&str] = &[
    "React Native", "Flutter", "Swift", "Kotlin", "iOS", "Android",
];
const DATA_SKILLS: &[&str] = &[
    "SQL", "PostgreSQL", "MongoDB", "Redis", "Elasticsearch", "Python", "R",
];
const DEVOPS_SKILLS: &[&str] = &[
    "Docker", "Kubernetes", "AWS", "Azure", "Jenkins", "GitLab CI",
];
const DEFAULT_SKILLS: &[&str] = &[
    "JavaScript", "Python", "Java", "Git", "SQL", "REST API",
];

/// Generates substitute listings when no live source is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticJobs;

impl SyntheticJobs {
    /// Create a generator
    pub fn new() -> Self {
        Self
    }

    /// Produce `count` listings for the query. Infallible and purely
    /// in-memory: each listing gets a skill set matching the keywords, an
    /// experience level with a salary band to match, and a posted date
    /// within the last week. The location is echoed verbatim.
    pub fn generate(&self, keywords: &str, location: &str, count: usize) -> Vec<JobListing> {
        let mut rng = rand::thread_rng();
        let skills = skills_for(keywords);
        let today = Utc::now().date_naive();

        (0..count)
            .map(|i| {
                let (level, salary) = EXPERIENCE_LEVELS[rng.gen_range(0..EXPERIENCE_LEVELS.len())];
                let company = COMPANIES[rng.gen_range(0..COMPANIES.len())];
                let employment_type =
                    EMPLOYMENT_TYPES[rng.gen_range(0..EMPLOYMENT_TYPES.len())];
                let posted_date = today - Duration::days(rng.gen_range(0..7));

                let requirement_count = rng.gen_range(4..=6).min(skills.len());
                let requirements: Vec<String> = skills
                    .choose_multiple(&mut rng, requirement_count)
                    .map(|skill| skill.to_string())
                    .collect();

                let id = format!("realistic_{}", i + 1);
                let description = format!(
                    "{} is hiring a {} {} in {}. Day-to-day work centers on {}.",
                    company,
                    level,
                    keywords,
                    location,
                    requirements.join(", ")
                );

                JobListing::new(
                    &id,
                    format!("{} {}", level, keywords),
                    company,
                    location,
                    employment_type,
                    posted_date,
                )
                .with_description(description)
                .with_requirements(requirements)
                .with_salary(salary)
                .with_url(format!("https://example.com/jobs/{}", id))
            })
            .collect()
    }
}

fn skills_for(keywords: &str) -> &'static [&'static str] {
    let lower = keywords.to_lowercase();

    if lower.contains("frontend")
        || lower.contains("front-end")
        || lower.contains("react")
        || lower.contains("vue")
        || lower.contains("angular")
    {
        FRONTEND_SKILLS
    } else if lower.contains("backend")
        || lower.contains("back-end")
        || lower.contains("node")
        || lower.contains("java")
        || lower.contains("python")
        || lower.contains(".net")
    {
        BACKEND_SKILLS
    } else if lower.contains("mobile")
        || lower.contains("android")
        || lower.contains("ios")
        || lower.contains("flutter")
    {
        MOBILE_SKILLS
    } else if lower.contains("data") || lower.contains("sql") || lower.contains("analyst") {
        DATA_SKILLS
    } else if lower.contains("devops") || lower.contains("cloud") || lower.contains("docker") {
        DEVOPS_SKILLS
    } else {
        DEFAULT_SKILLS
    }
}
