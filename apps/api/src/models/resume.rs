//! Résumé record — the structured data a user fills in through the editor.
//!
//! Every field defaults when absent so partially filled JSON from the editor
//! deserializes cleanly. Empty strings mean "not provided".

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Section keys in the order the renderer emits them.
pub const DEFAULT_SECTION_ORDER: [&str; 6] = [
    "professional_summary",
    "technical_skills",
    "experience",
    "projects",
    "education",
    "certifications",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub category: String,
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub dates: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub tech_stack: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub dates: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub link: String,
}

/// The full résumé as edited by the user.
///
/// `section_order` and `custom_sections` are stored and round-tripped but the
/// renderer always emits sections in [`DEFAULT_SECTION_ORDER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub professional_summary: String,
    pub technical_skills: Vec<SkillCategory>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub section_order: Vec<String>,
    pub custom_sections: Map<String, Value>,
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            professional_summary: String::new(),
            technical_skills: Vec::new(),
            experience: Vec::new(),
            projects: Vec::new(),
            education: Vec::new(),
            certifications: Vec::new(),
            section_order: DEFAULT_SECTION_ORDER.iter().map(|s| s.to_string()).collect(),
            custom_sections: Map::new(),
        }
    }
}

impl ResumeRecord {
    /// A blank record: every section empty, default section order.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Fictional demo data used to pre-fill a fresh editor.
    pub fn sample() -> Self {
        Self {
            personal_info: PersonalInfo {
                name: "John Doe".into(),
                phone: "+1-555-123-4567".into(),
                email: "john.doe@email.com".into(),
                linkedin: "linkedin.com/in/johndoe".into(),
                github: "github.com/johndoe".into(),
            },
            professional_summary: "Software Engineer with 3+ years of experience in full-stack \
                development and cloud technologies. Passionate about building scalable \
                applications and solving complex problems."
                .into(),
            technical_skills: vec![
                skill("Programming Languages", "Python, JavaScript, Java, Go"),
                skill("Frameworks & Libraries", "React, Node.js, Django, Flask"),
                skill("Databases", "PostgreSQL, MongoDB, Redis"),
                skill("Cloud & DevOps", "AWS, Docker, Kubernetes, CI/CD"),
            ],
            experience: vec![
                Experience {
                    title: "Software Engineer".into(),
                    company: "Tech Solutions Inc.".into(),
                    location: "San Francisco, CA".into(),
                    dates: "Jan 2023 - Present".into(),
                    bullets: strings(&[
                        "Developed scalable web applications serving 10k+ daily users",
                        "Improved system performance by 40% through optimization",
                        "Led cross-functional team of 5 developers",
                    ]),
                },
                Experience {
                    title: "Junior Developer".into(),
                    company: "StartupXYZ".into(),
                    location: "Remote".into(),
                    dates: "Jun 2021 - Dec 2022".into(),
                    bullets: strings(&[
                        "Built REST APIs using Python and Flask",
                        "Implemented automated testing reducing bugs by 50%",
                        "Collaborated with product team on feature requirements",
                    ]),
                },
            ],
            projects: vec![
                Project {
                    name: "E-commerce Platform".into(),
                    tech_stack: "React, Node.js, PostgreSQL, AWS".into(),
                    bullets: strings(&[
                        "Built full-stack e-commerce platform with payment integration",
                        "Implemented secure user authentication and authorization",
                        "Deployed using Docker containers on AWS ECS",
                    ]),
                },
                Project {
                    name: "Data Analytics Dashboard".into(),
                    tech_stack: "Python, Streamlit, Pandas, PostgreSQL".into(),
                    bullets: strings(&[
                        "Created interactive dashboard for business intelligence",
                        "Processed and visualized large datasets (1M+ records)",
                        "Automated daily reporting with scheduled scripts",
                    ]),
                },
            ],
            education: vec![Education {
                degree: "Bachelor of Science in Computer Science".into(),
                institution: "University of Technology".into(),
                location: "Boston, MA".into(),
                dates: "2017-2021".into(),
                gpa: "3.8".into(),
            }],
            certifications: vec![Certification {
                name: "AWS Certified Developer".into(),
                issuer: "Amazon Web Services".into(),
                link: "https://aws.amazon.com/certification/".into(),
            }],
            ..Self::default()
        }
    }
}

fn skill(category: &str, skills: &str) -> SkillCategory {
    SkillCategory {
        category: category.into(),
        skills: skills.into(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
