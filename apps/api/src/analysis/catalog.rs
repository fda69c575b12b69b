//! Static skill taxonomy and vocabulary lists used by extraction and scoring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How much a skill or certification counts toward its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl Importance {
    pub fn weight(self) -> u32 {
        match self {
            Importance::High => 3,
            Importance::Medium => 2,
            Importance::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    ProgrammingLanguages,
    WebTechnologies,
    Databases,
    CloudPlatforms,
    DataScience,
    Frameworks,
    Tools,
    Methodologies,
    SoftSkills,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 9] = [
        SkillCategory::ProgrammingLanguages,
        SkillCategory::WebTechnologies,
        SkillCategory::Databases,
        SkillCategory::CloudPlatforms,
        SkillCategory::DataScience,
        SkillCategory::Frameworks,
        SkillCategory::Tools,
        SkillCategory::Methodologies,
        SkillCategory::SoftSkills,
    ];

    pub fn importance(self) -> Importance {
        match self {
            SkillCategory::ProgrammingLanguages | SkillCategory::CloudPlatforms => Importance::High,
            SkillCategory::SoftSkills => Importance::Low,
            _ => Importance::Medium,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::ProgrammingLanguages => "Programming Languages",
            SkillCategory::WebTechnologies => "Web Technologies",
            SkillCategory::Databases => "Databases",
            SkillCategory::CloudPlatforms => "Cloud Platforms",
            SkillCategory::DataScience => "Data Science",
            SkillCategory::Frameworks => "Frameworks",
            SkillCategory::Tools => "Tools",
            SkillCategory::Methodologies => "Methodologies",
            SkillCategory::SoftSkills => "Soft Skills",
        }
    }
}

/// A canonical skill. Matched by its lowercased name or any alias.
#[derive(Debug, Clone, Copy)]
pub struct SkillDef {
    pub name: &'static str,
    pub category: SkillCategory,
    pub aliases: &'static [&'static str],
}

impl SkillDef {
    pub fn importance(&self) -> Importance {
        self.category.importance()
    }
}

const fn skill(
    name: &'static str,
    category: SkillCategory,
    aliases: &'static [&'static str],
) -> SkillDef {
    SkillDef {
        name,
        category,
        aliases,
    }
}

use SkillCategory::*;

/// Skill names that are also ordinary English words. These match only with
/// their catalog capitalisation; their aliases still match in any case.
pub const CASE_SENSITIVE_SKILLS: &[&str] = &["Go"];

pub const SKILLS: &[SkillDef] = &[
    // programming languages
    skill("Python", ProgrammingLanguages, &[]),
    skill("Java", ProgrammingLanguages, &[]),
    skill("JavaScript", ProgrammingLanguages, &["ecmascript"]),
    skill("TypeScript", ProgrammingLanguages, &[]),
    skill("C++", ProgrammingLanguages, &["cpp"]),
    skill("C#", ProgrammingLanguages, &["csharp"]),
    skill("Go", ProgrammingLanguages, &["golang"]),
    skill("Rust", ProgrammingLanguages, &[]),
    skill("Ruby", ProgrammingLanguages, &[]),
    skill("PHP", ProgrammingLanguages, &[]),
    skill("Swift", ProgrammingLanguages, &[]),
    skill("Kotlin", ProgrammingLanguages, &[]),
    skill("Scala", ProgrammingLanguages, &[]),
    skill("MATLAB", ProgrammingLanguages, &[]),
    skill("Perl", ProgrammingLanguages, &[]),
    skill("Bash", ProgrammingLanguages, &["shell scripting"]),
    skill("PowerShell", ProgrammingLanguages, &[]),
    skill("SQL", ProgrammingLanguages, &[]),
    // web technologies
    skill("HTML", WebTechnologies, &["html5"]),
    skill("CSS", WebTechnologies, &["css3"]),
    skill("React", WebTechnologies, &["react.js", "reactjs"]),
    skill("Angular", WebTechnologies, &["angularjs"]),
    skill("Vue.js", WebTechnologies, &["vue", "vuejs"]),
    skill("Node.js", WebTechnologies, &["nodejs"]),
    skill("Express.js", WebTechnologies, &["expressjs"]),
    skill("jQuery", WebTechnologies, &[]),
    skill("Bootstrap", WebTechnologies, &[]),
    skill("Sass", WebTechnologies, &["scss"]),
    skill("ASP.NET", WebTechnologies, &[]),
    // databases
    skill("MySQL", Databases, &[]),
    skill("PostgreSQL", Databases, &["postgres"]),
    skill("MongoDB", Databases, &["mongo"]),
    skill("Redis", Databases, &[]),
    skill("Elasticsearch", Databases, &["elastic search"]),
    skill("Oracle", Databases, &[]),
    skill("SQL Server", Databases, &["mssql"]),
    skill("SQLite", Databases, &[]),
    skill("Cassandra", Databases, &[]),
    skill("DynamoDB", Databases, &[]),
    skill("Firebase", Databases, &[]),
    skill("Neo4j", Databases, &[]),
    // cloud platforms
    skill("AWS", CloudPlatforms, &["amazon web services"]),
    skill("Azure", CloudPlatforms, &["microsoft azure"]),
    skill("Google Cloud", CloudPlatforms, &["gcp", "google cloud platform"]),
    skill("Heroku", CloudPlatforms, &[]),
    skill("DigitalOcean", CloudPlatforms, &[]),
    skill("Docker", CloudPlatforms, &[]),
    skill("Kubernetes", CloudPlatforms, &["k8s"]),
    skill("Terraform", CloudPlatforms, &[]),
    skill("Ansible", CloudPlatforms, &[]),
    // data science
    skill("Machine Learning", DataScience, &[]),
    skill("Deep Learning", DataScience, &[]),
    skill("Data Science", DataScience, &[]),
    skill("Data Analysis", DataScience, &["data analytics"]),
    skill("TensorFlow", DataScience, &[]),
    skill("PyTorch", DataScience, &[]),
    skill("Scikit-learn", DataScience, &["sklearn"]),
    skill("Pandas", DataScience, &[]),
    skill("NumPy", DataScience, &[]),
    skill("Jupyter", DataScience, &[]),
    skill("Tableau", DataScience, &[]),
    skill("Power BI", DataScience, &["powerbi"]),
    // frameworks
    skill("Django", Frameworks, &[]),
    skill("Flask", Frameworks, &[]),
    skill("FastAPI", Frameworks, &[]),
    skill("Spring", Frameworks, &[]),
    skill("Spring Boot", Frameworks, &[]),
    skill("Hibernate", Frameworks, &[]),
    skill("Laravel", Frameworks, &[]),
    skill("Ruby on Rails", Frameworks, &["rails"]),
    skill(".NET", Frameworks, &["dotnet"]),
    // tools
    skill("Git", Tools, &[]),
    skill("GitHub", Tools, &[]),
    skill("GitLab", Tools, &[]),
    skill("GitHub Actions", Tools, &[]),
    skill("Jenkins", Tools, &[]),
    skill("CircleCI", Tools, &[]),
    skill("Travis CI", Tools, &[]),
    skill("Jira", Tools, &[]),
    skill("Confluence", Tools, &[]),
    skill("Postman", Tools, &[]),
    skill("Figma", Tools, &[]),
    skill("Sketch", Tools, &[]),
    skill("Photoshop", Tools, &[]),
    skill("Excel", Tools, &[]),
    // methodologies
    skill("Agile", Methodologies, &[]),
    skill("Scrum", Methodologies, &[]),
    skill("Kanban", Methodologies, &[]),
    skill("Waterfall", Methodologies, &[]),
    skill("DevOps", Methodologies, &[]),
    skill("CI/CD", Methodologies, &["continuous integration", "continuous delivery"]),
    skill("TDD", Methodologies, &["test-driven development", "test driven development"]),
    skill("Microservices", Methodologies, &[]),
    // soft skills
    skill("Leadership", SoftSkills, &[]),
    skill("Communication", SoftSkills, &[]),
    skill("Teamwork", SoftSkills, &["collaboration"]),
    skill("Project Management", SoftSkills, &[]),
    skill("Problem Solving", SoftSkills, &["problem-solving"]),
    skill("Mentoring", SoftSkills, &[]),
];

/// Groups of interchangeable skills and how close their members are.
pub const SKILL_FAMILIES: &[(&[&str], f32)] = &[
    (&["JavaScript", "TypeScript"], 0.85),
    (&["C#", ".NET", "ASP.NET"], 0.85),
    (&["Tableau", "Power BI"], 0.85),
    (&["React", "Angular", "Vue.js"], 0.75),
    (&["Java", "Kotlin", "Scala"], 0.75),
    (&["MySQL", "PostgreSQL", "SQLite", "SQL Server", "Oracle"], 0.8),
    (&["MongoDB", "Cassandra", "DynamoDB", "Firebase", "Redis"], 0.72),
    (&["AWS", "Azure", "Google Cloud"], 0.8),
    (&["Docker", "Kubernetes"], 0.75),
    (&["Terraform", "Ansible"], 0.75),
    (&["TensorFlow", "PyTorch", "Scikit-learn"], 0.8),
    (&["Machine Learning", "Deep Learning", "Data Science"], 0.8),
    (&["Django", "Flask", "FastAPI"], 0.8),
    (&["Jenkins", "CircleCI", "Travis CI", "GitHub Actions"], 0.75),
    (&["Git", "GitHub", "GitLab"], 0.8),
    (&["Agile", "Scrum", "Kanban"], 0.8),
    (&["Pandas", "NumPy"], 0.75),
    (&["Figma", "Sketch"], 0.8),
    (&["Jira", "Confluence"], 0.72),
];

/// Certifications in display form. Matched case-insensitively.
pub const CERTIFICATIONS: &[&str] = &[
    "AWS Certified",
    "Azure Certified",
    "Google Cloud Certified",
    "PMP",
    "CISSP",
    "CISA",
    "CISM",
    "CompTIA",
    "Cisco Certified",
    "Microsoft Certified",
    "Oracle Certified",
    "Salesforce Certified",
    "Certified Scrum Master",
    "ITIL",
    "Six Sigma",
];

/// Keywords that make a certification high-importance.
pub const HIGH_VALUE_CERT_MARKERS: &[&str] = &["aws", "azure", "google", "pmp"];

pub const JOB_TITLES: &[&str] = &[
    "software engineer",
    "software developer",
    "full stack developer",
    "frontend developer",
    "backend developer",
    "devops engineer",
    "data scientist",
    "data analyst",
    "machine learning engineer",
    "product manager",
    "project manager",
    "scrum master",
    "architect",
    "senior",
    "junior",
    "lead",
    "principal",
    "director",
    "manager",
    "consultant",
    "analyst",
    "specialist",
    "coordinator",
];

/// Action verbs applicant-tracking systems reward.
pub const ATS_ACTION_VERBS: &[&str] = &[
    "managed",
    "developed",
    "implemented",
    "designed",
    "created",
    "led",
    "improved",
    "optimized",
    "analyzed",
    "collaborated",
    "achieved",
    "delivered",
    "maintained",
    "coordinated",
    "supervised",
    "trained",
    "mentored",
    "presented",
    "negotiated",
];

pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "among", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
    "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him",
    "her", "us", "them", "my", "your", "his", "its", "our", "their", "who", "what", "which",
    "all", "any", "not", "also", "such", "other", "than", "then", "there", "here", "when",
    "where", "while", "within", "across", "including", "etc",
];

/// Vocabulary for the quick scorer's heuristic experience and certification checks.
pub const EXPERIENCE_KEYWORDS: &[&str] = &[
    "years",
    "experience",
    "worked",
    "developed",
    "managed",
    "led",
    "created",
    "implemented",
    "designed",
    "built",
    "maintained",
    "optimized",
];

pub const CREDENTIAL_KEYWORDS: &[&str] = &[
    "certified",
    "certification",
    "degree",
    "bachelor",
    "master",
    "phd",
    "google cloud",
    "cissp",
    "pmp",
];

/// Fixed ATS terms checked by the quick scorer.
pub const QUICK_ATS_TERMS: &[&str] = &[
    "experience",
    "skills",
    "management",
    "development",
    "analysis",
    "design",
];

/// Skills the quick scorer marks high-importance regardless of category.
pub const QUICK_HIGH_IMPORTANCE: &[&str] = &["Python", "Java", "React", "AWS"];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

pub fn find_skill(name: &str) -> Option<&'static SkillDef> {
    SKILLS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// Catalog display names grouped by category, in catalog order.
pub fn skills_by_category() -> BTreeMap<SkillCategory, Vec<&'static str>> {
    let mut grouped: BTreeMap<SkillCategory, Vec<&'static str>> = BTreeMap::new();
    for s in SKILLS {
        grouped.entry(s.category).or_default().push(s.name);
    }
    grouped
}

/// Highest family affinity shared by two distinct skills, if any.
pub fn family_affinity(a: &str, b: &str) -> Option<f32> {
    SKILL_FAMILIES
        .iter()
        .filter(|(members, _)| {
            members.iter().any(|m| m.eq_ignore_ascii_case(a))
                && members.iter().any(|m| m.eq_ignore_ascii_case(b))
        })
        .map(|(_, affinity)| *affinity)
        .fold(None, |best, v| Some(best.map_or(v, |b: f32| b.max(v))))
}

pub fn certification_importance(cert: &str) -> Importance {
    let lower = cert.to_lowercase();
    if HIGH_VALUE_CERT_MARKERS.iter().any(|m| lower.contains(m)) {
        Importance::High
    } else {
        Importance::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_skill_names_are_unique() {
        let mut seen = HashSet::new();
        for s in SKILLS {
            assert!(seen.insert(s.name.to_lowercase()), "duplicate skill {}", s.name);
        }
    }

    #[test]
    fn test_family_members_exist_in_catalog() {
        for (members, affinity) in SKILL_FAMILIES {
            assert!(*affinity > 0.0 && *affinity <= 1.0);
            for m in *members {
                assert!(find_skill(m).is_some(), "family member {m} not in catalog");
            }
        }
    }

    #[test]
    fn test_category_importance() {
        assert_eq!(ProgrammingLanguages.importance(), Importance::High);
        assert_eq!(CloudPlatforms.importance(), Importance::High);
        assert_eq!(Databases.importance(), Importance::Medium);
        assert_eq!(SoftSkills.importance(), Importance::Low);
    }

    #[test]
    fn test_importance_weights() {
        assert_eq!(Importance::High.weight(), 3);
        assert_eq!(Importance::Medium.weight(), 2);
        assert_eq!(Importance::Low.weight(), 1);
    }

    #[test]
    fn test_every_category_has_skills() {
        let grouped = skills_by_category();
        for category in SkillCategory::ALL {
            assert!(grouped.get(&category).is_some_and(|v| !v.is_empty()));
        }
    }

    #[test]
    fn test_family_affinity_takes_best_family() {
        assert_eq!(family_affinity("GitHub", "Git"), Some(0.8));
        assert_eq!(family_affinity("postgresql", "MySQL"), Some(0.8));
        assert_eq!(family_affinity("Rust", "Excel"), None);
    }

    #[test]
    fn test_certification_importance() {
        assert_eq!(certification_importance("AWS Certified"), Importance::High);
        assert_eq!(certification_importance("PMP"), Importance::High);
        assert_eq!(certification_importance("CISSP"), Importance::Medium);
    }

    #[test]
    fn test_importance_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Importance::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&SkillCategory::CloudPlatforms).unwrap(),
            "\"cloud_platforms\""
        );
    }
}
