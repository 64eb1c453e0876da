//! Stock portfolio content for fresh databases.
//!
//! # Invariants
//! - Only empty collections are seeded; existing content is never touched.
//! - Seeded rows get `order = position` in the lists below.
//! - Seeding runs in one transaction.

use crate::model::experience::ExperienceDraft;
use crate::model::project::ProjectDraft;
use crate::model::skill::SkillDraft;
use crate::repo::experience_repo::SqliteExperienceRepository;
use crate::repo::project_repo::SqliteProjectRepository;
use crate::repo::skill_repo::SqliteSkillRepository;
use crate::repo::{OrderedRepository, RepoResult};
use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};

const JAN_2019_MS: i64 = 1_546_300_800_000;
const JAN_2021_MS: i64 = 1_609_459_200_000;
const JAN_2023_MS: i64 = 1_672_531_200_000;

const EXPERIENCES: &[(&str, &str, i64, Option<i64>, &str)] = &[
    (
        "Senior Product Manager",
        "Tech Corp",
        JAN_2023_MS,
        None,
        "Led the development of AI-driven analytics tools. Improved user retention by 30%.",
    ),
    (
        "AI Specialist",
        "Innovation Labs",
        JAN_2021_MS,
        Some(JAN_2023_MS),
        "Prototyped LLM applications for enterprise clients. Managed cross-functional teams.",
    ),
    (
        "Digital Strategist",
        "Creative Agency",
        JAN_2019_MS,
        Some(JAN_2021_MS),
        "Designed digital transformation roadmaps for Fortune 500 companies.",
    ),
];

const SKILLS: &[(&str, &str, i64)] = &[
    ("Product Strategy", "Product Management", 90),
    ("Roadmapping", "Product Management", 90),
    ("Agile/Scrum", "Product Management", 95),
    ("User Research", "Product Management", 85),
    ("Data Analysis", "Product Management", 80),
    ("Stakeholder Management", "Product Management", 90),
    ("A/B Testing", "Product Management", 85),
    ("Python", "AI & Engineering", 85),
    ("LLMs & Prompt Engineering", "AI & Engineering", 95),
    ("Computer Vision", "AI & Engineering", 75),
    ("RAG Pipelines", "AI & Engineering", 90),
    ("SQL", "AI & Engineering", 80),
    ("TensorFlow/PyTorch", "AI & Engineering", 70),
    ("API Integration", "AI & Engineering", 85),
    ("Figma", "Prototyping & Design", 90),
    ("Next.js / React", "Prototyping & Design", 85),
    ("Tailwind CSS", "Prototyping & Design", 90),
    ("Wireframing", "Prototyping & Design", 95),
    ("UI/UX Design", "Prototyping & Design", 80),
    ("Interactive Prototypes", "Prototyping & Design", 85),
    ("Google Data Analytics", "Certification", 100),
    ("Certified Scrum Master", "Certification", 100),
    ("AWS Certified Practitioner", "Certification", 100),
    ("TensorFlow Developer", "Certification", 100),
];

const PROJECTS: &[(&str, &str, &str)] = &[
    (
        "Neural Vision API",
        "Enterprise-grade computer vision pipeline processing 1M+ images daily.",
        "AI Infrastructure, Python, Computer Vision",
    ),
    (
        "Revenue Operations",
        "ARR Generated: $2.5M",
        "Metrics, Business Impact",
    ),
    (
        "Tech Stack Arsenal",
        "Python, TensorFlow, PostgreSQL, React",
        "Tech Stack, Arsenal",
    ),
    (
        "ChatBot Orchestrator",
        "No-code builder for conversational AI agents.",
        "LLM Product, AI, No-code",
    ),
];

/// Rows inserted per collection by [`seed_defaults`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub experiences: usize,
    pub skills: usize,
    pub projects: usize,
}

/// Inserts the stock content into every empty collection.
pub fn seed_defaults(conn: &Connection) -> RepoResult<SeedSummary> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let mut summary = SeedSummary::default();

    let experiences = SqliteExperienceRepository::try_new(&tx)?;
    if experiences.list()?.is_empty() {
        for (index, (title, company, start, end, description)) in EXPERIENCES.iter().enumerate() {
            let mut draft = ExperienceDraft::new(*title, *company, *start);
            draft.end_date = *end;
            draft.description = (*description).to_string();
            draft.order = Some(index as i64);
            experiences.create(&draft)?;
        }
        summary.experiences = EXPERIENCES.len();
    }

    let skills = SqliteSkillRepository::try_new(&tx)?;
    if skills.list()?.is_empty() {
        for (index, (name, category, proficiency)) in SKILLS.iter().enumerate() {
            let mut draft = SkillDraft::new(*name, *category, *proficiency);
            draft.order = Some(index as i64);
            skills.create(&draft)?;
        }
        summary.skills = SKILLS.len();
    }

    let projects = SqliteProjectRepository::try_new(&tx)?;
    if projects.list()?.is_empty() {
        for (index, (title, description, tags)) in PROJECTS.iter().enumerate() {
            let mut draft = ProjectDraft::new(*title, *description, *tags);
            draft.order = Some(index as i64);
            projects.create(&draft)?;
        }
        summary.projects = PROJECTS.len();
    }

    tx.commit()?;
    info!(
        "event=seed_defaults module=seed status=ok experiences={} skills={} projects={}",
        summary.experiences, summary.skills, summary.projects
    );
    Ok(summary)
}
