use lazy_static::lazy_static;

use super::types::{
    DemandTrend, EmergingTechnology, IndustryImpact, JobsAffected, MaturityLevel, SkillRequirement,
};

fn skill(name: &str, proficiency: f64, trend: DemandTrend, availability: f64, months: u32) -> SkillRequirement {
    SkillRequirement {
        skill_name: name.to_string(),
        proficiency_level: proficiency,
        demand_trend: trend,
        availability_score: availability,
        time_to_acquire: months,
    }
}

fn impact(industry: &str, disruption: f64, adoption: f64, jobs: (u64, u64, u64), months: u32) -> IndustryImpact {
    IndustryImpact {
        industry: industry.to_string(),
        disruption_level: disruption,
        adoption_rate: adoption,
        jobs_affected: JobsAffected {
            created: jobs.0,
            modified: jobs.1,
            displaced: jobs.2,
        },
        timeline_to_impact: months,
    }
}

lazy_static! {
    static ref CATALOG: Vec<EmergingTechnology> = build_catalog();
}

fn build_catalog() -> Vec<EmergingTechnology> {
    use DemandTrend::*;

    vec![
        EmergingTechnology {
            id: "ai-ml-001".to_string(),
            name: "Advanced Machine Learning".to_string(),
            category: "AI_ML".to_string(),
            maturity_level: MaturityLevel::Growth,
            impact_score: 0.85,
            time_to_mainstream: 18,
            skill_requirements: vec![
                skill("Machine Learning", 0.8, Increasing, 0.6, 12),
                skill("Python Programming", 0.7, Stable, 0.8, 6),
                skill("Data Analysis", 0.7, Increasing, 0.7, 6),
            ],
            industry_impacts: vec![
                impact("Technology", 0.9, 0.7, (1000, 5000, 2000), 12),
                impact("Finance", 0.8, 0.6, (600, 4000, 1800), 18),
                impact("Healthcare", 0.6, 0.4, (400, 2500, 500), 24),
            ],
        },
        EmergingTechnology {
            id: "rpa-001".to_string(),
            name: "Robotic Process Automation".to_string(),
            category: "Automation".to_string(),
            maturity_level: MaturityLevel::Mature,
            impact_score: 0.8,
            time_to_mainstream: 6,
            skill_requirements: vec![
                skill("Process Mapping", 0.6, Stable, 0.7, 3),
                skill("Data Entry", 0.3, Decreasing, 0.9, 1),
                skill("Document Processing", 0.4, Decreasing, 0.8, 2),
            ],
            industry_impacts: vec![
                impact("Finance", 0.85, 0.75, (300, 3500, 4200), 6),
                impact("Retail", 0.6, 0.5, (200, 1800, 2100), 12),
                impact("Manufacturing", 0.45, 0.55, (150, 1200, 1600), 12),
            ],
        },
        EmergingTechnology {
            id: "nlp-001".to_string(),
            name: "Natural Language Processing".to_string(),
            category: "AI_ML".to_string(),
            maturity_level: MaturityLevel::Growth,
            impact_score: 0.8,
            time_to_mainstream: 12,
            skill_requirements: vec![
                skill("Prompt Engineering", 0.6, Increasing, 0.5, 3),
                skill("Technical Writing", 0.6, Stable, 0.7, 6),
                skill("Customer Support", 0.5, Decreasing, 0.8, 3),
            ],
            industry_impacts: vec![
                impact("Technology", 0.75, 0.65, (800, 3000, 900), 12),
                impact("Education", 0.55, 0.35, (300, 2200, 400), 24),
                impact("Finance", 0.4, 0.5, (200, 1500, 700), 18),
            ],
        },
        EmergingTechnology {
            id: "cv-001".to_string(),
            name: "Computer Vision".to_string(),
            category: "AI_ML".to_string(),
            maturity_level: MaturityLevel::Growth,
            impact_score: 0.75,
            time_to_mainstream: 24,
            skill_requirements: vec![
                skill("Visual Inspection", 0.5, Decreasing, 0.8, 3),
                skill("Quality Control", 0.6, Stable, 0.7, 6),
                skill("Image Annotation", 0.4, Increasing, 0.6, 2),
            ],
            industry_impacts: vec![
                impact("Manufacturing", 0.8, 0.55, (500, 2600, 1900), 18),
                impact("Healthcare", 0.65, 0.35, (350, 1700, 300), 30),
                impact("Agriculture", 0.55, 0.3, (200, 900, 600), 36),
            ],
        },
        EmergingTechnology {
            id: "iot-001".to_string(),
            name: "IoT Automation".to_string(),
            category: "Infrastructure".to_string(),
            maturity_level: MaturityLevel::Emerging,
            impact_score: 0.7,
            time_to_mainstream: 30,
            skill_requirements: vec![
                skill("Sensor Networks", 0.7, Increasing, 0.4, 9),
                skill("Energy Monitoring", 0.6, Increasing, 0.5, 6),
                skill("Preventive Maintenance", 0.5, Stable, 0.7, 6),
            ],
            industry_impacts: vec![
                impact("Construction", 0.6, 0.3, (400, 1500, 500), 24),
                impact("Manufacturing", 0.7, 0.5, (600, 2400, 1100), 18),
                impact("Agriculture", 0.65, 0.25, (300, 1100, 400), 30),
            ],
        },
        EmergingTechnology {
            id: "qc-001".to_string(),
            name: "Quantum Optimization".to_string(),
            category: "Computing".to_string(),
            maturity_level: MaturityLevel::Experimental,
            impact_score: 0.5,
            time_to_mainstream: 84,
            skill_requirements: vec![skill("Quantum Algorithms", 0.9, Increasing, 0.1, 24)],
            // No measurable job effects yet
            industry_impacts: vec![impact("Finance", 0.3, 0.05, (0, 0, 0), 84)],
        },
    ]
}

/// Skill keywords associated with each occupation.
const OCCUPATION_SKILLS: &[(&str, &[&str])] = &[
    ("Software Developer", &["Python Programming", "Machine Learning", "Prompt Engineering"]),
    ("Data Scientist", &["Machine Learning", "Python Programming", "Data Analysis"]),
    ("Financial Analyst", &["Data Analysis", "Process Mapping"]),
    ("Accountant", &["Data Entry", "Document Processing", "Process Mapping"]),
    ("Customer Service Representative", &["Customer Support", "Data Entry"]),
    ("Quality Control Inspector", &["Visual Inspection", "Quality Control"]),
    ("Energy Auditor", &["Energy Monitoring", "Sensor Networks", "Data Analysis"]),
    ("Teacher", &["Technical Writing", "Prompt Engineering"]),
];

/// The built-in emerging technology catalog.
pub fn catalog() -> &'static [EmergingTechnology] {
    CATALOG.as_slice()
}

/// Skill keywords for an occupation, empty when the occupation is unknown.
pub fn occupation_skills(occupation: &str) -> &'static [&'static str] {
    let occupation = occupation.trim();
    OCCUPATION_SKILLS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(occupation))
        .map(|(_, skills)| *skills)
        .unwrap_or(&[])
}

pub fn known_occupations() -> impl Iterator<Item = &'static str> {
    OCCUPATION_SKILLS.iter().map(|(name, _)| *name)
}
