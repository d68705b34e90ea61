//! Per-section markup templates.
//!
//! Each section decides from its *qualifying* entries whether it exists at all,
//! so a heading is never emitted over an empty list.

use crate::models::formatting::FormattingOptions;
use crate::models::resume::{
    Certification, Education, Experience, PersonalInfo, Project, ResumeRecord, SkillCategory,
};
use crate::render::builder::MarkupBuilder;
use crate::render::escape::normalize_profile_url;

const SUMMARY_LEAD_SPACING: &str = r"\vspace{-0.19in}";
const CONTACT_SEPARATOR: &str = " $|$\n  ";
const PLAIN_LIST_START: &str = r"\begin{itemize}[leftmargin=0.15in, label={}]";

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

// ────────────────────────────────────────────────────────────────────────────
// Qualification predicates
// ────────────────────────────────────────────────────────────────────────────

/// Whether an entry has the fields it needs to be rendered.
pub trait Qualifies {
    fn qualifies(&self) -> bool;
}

impl Qualifies for SkillCategory {
    fn qualifies(&self) -> bool {
        is_present(&self.category) && is_present(&self.skills)
    }
}

impl Qualifies for Experience {
    fn qualifies(&self) -> bool {
        is_present(&self.title) && is_present(&self.company)
    }
}

impl Qualifies for Project {
    fn qualifies(&self) -> bool {
        is_present(&self.name)
    }
}

impl Qualifies for Education {
    fn qualifies(&self) -> bool {
        is_present(&self.degree) && is_present(&self.institution)
    }
}

impl Qualifies for Certification {
    fn qualifies(&self) -> bool {
        is_present(&self.name)
    }
}

fn qualifying<T: Qualifies>(entries: &[T]) -> impl Iterator<Item = &T> {
    entries.iter().filter(|e| e.qualifies())
}

// ────────────────────────────────────────────────────────────────────────────
// Section catalogue
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
    Certifications,
}

/// Vertical offset emitted before a section heading.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LeadSpacing {
    None,
    Fixed(&'static str),
    SectionSpacing,
}

impl SectionKind {
    /// Emission order, independent of `ResumeRecord::section_order`.
    pub const ORDER: [SectionKind; 6] = [
        SectionKind::Summary,
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Education,
        SectionKind::Certifications,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::Summary => "Professional Summary",
            SectionKind::Skills => "Technical Skills",
            SectionKind::Experience => "Experience",
            SectionKind::Projects => "Projects",
            SectionKind::Education => "Education",
            SectionKind::Certifications => "Professional Certifications",
        }
    }

    fn lead_spacing(self) -> LeadSpacing {
        match self {
            SectionKind::Summary => LeadSpacing::Fixed(SUMMARY_LEAD_SPACING),
            SectionKind::Skills => LeadSpacing::None,
            _ => LeadSpacing::SectionSpacing,
        }
    }

    /// Builds the section body, or `None` when nothing in it qualifies.
    fn body(self, record: &ResumeRecord) -> Option<MarkupBuilder> {
        match self {
            SectionKind::Summary => summary_body(&record.professional_summary),
            SectionKind::Skills => skills_body(&record.technical_skills),
            SectionKind::Experience => experience_body(&record.experience),
            SectionKind::Projects => projects_body(&record.projects),
            SectionKind::Education => education_body(&record.education),
            SectionKind::Certifications => certifications_body(&record.certifications),
        }
    }

    /// Full section markup: spacing, heading, and body.
    pub fn render(self, record: &ResumeRecord, options: &FormattingOptions) -> Option<String> {
        let body = self.body(record)?;

        let mut out = MarkupBuilder::new();
        out.newline();
        match self.lead_spacing() {
            LeadSpacing::None => {}
            LeadSpacing::Fixed(spacing) => {
                out.line(spacing);
            }
            LeadSpacing::SectionSpacing => {
                out.line(&format!(r"\vspace{{-{}in}}", options.section_spacing));
            }
        }
        out.line(&format!(r"\section{{{}}}", self.heading()));
        out.append(body);
        Some(out.finish())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// Centered name plus the contact line (phone, email, linkedin, github).
pub fn render_header(info: &PersonalInfo) -> String {
    let mut contacts: Vec<String> = Vec::with_capacity(4);

    if is_present(&info.phone) {
        let mut part = MarkupBuilder::new();
        part.raw(r"\faPhone\ ").text(&info.phone);
        contacts.push(part.finish());
    }
    if is_present(&info.email) {
        let mut part = MarkupBuilder::new();
        part.raw(r"\faEnvelope\ ")
            .href(&format!("mailto:{}", info.email.trim()), &info.email);
        contacts.push(part.finish());
    }
    if is_present(&info.linkedin) {
        let mut part = MarkupBuilder::new();
        part.raw(r"\faIcon{linkedin} ")
            .href(&normalize_profile_url(&info.linkedin), &info.linkedin);
        contacts.push(part.finish());
    }
    if is_present(&info.github) {
        let mut part = MarkupBuilder::new();
        part.raw(r"\faGithub\ ")
            .href(&normalize_profile_url(&info.github), &info.github);
        contacts.push(part.finish());
    }

    let mut out = MarkupBuilder::new();
    out.newline()
        .line(r"\begin{center}")
        .raw(r"  \textbf{\Huge \scshape ")
        .text(&info.name)
        .line(r"} \\ \vspace{4pt}")
        .raw(r"  \small");
    if !contacts.is_empty() {
        out.raw(" ").raw(&contacts.join(CONTACT_SEPARATOR));
    }
    out.newline().line(r"\end{center}");
    out.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Section bodies
// ────────────────────────────────────────────────────────────────────────────

fn summary_body(summary: &str) -> Option<MarkupBuilder> {
    if !is_present(summary) {
        return None;
    }
    let mut out = MarkupBuilder::new();
    out.line(PLAIN_LIST_START)
        .raw(r"\small \item ")
        .text(summary)
        .newline()
        .line(r"\end{itemize}");
    Some(out)
}

fn skills_body(skills: &[SkillCategory]) -> Option<MarkupBuilder> {
    let mut items = MarkupBuilder::new();
    for skill in qualifying(skills) {
        items
            .raw(r"\item \textbf{")
            .text(&skill.category)
            .raw(":} ")
            .text(&skill.skills)
            .newline();
    }
    if items.is_empty() {
        return None;
    }

    let mut out = MarkupBuilder::new();
    out.line(PLAIN_LIST_START).append(items).line(r"\end{itemize}");
    Some(out)
}

/// `\resumeItemListStart … \resumeItemListEnd`, or nothing if every bullet is blank.
fn bullet_list(bullets: &[String]) -> Option<MarkupBuilder> {
    let mut items = MarkupBuilder::new();
    for bullet in bullets.iter().filter(|b| is_present(b)) {
        items.raw(r"\resumeItem").group(bullet).newline();
    }
    if items.is_empty() {
        return None;
    }

    let mut out = MarkupBuilder::new();
    out.line(r"\resumeItemListStart")
        .append(items)
        .line(r"\resumeItemListEnd");
    Some(out)
}

fn experience_body(experience: &[Experience]) -> Option<MarkupBuilder> {
    let mut entries = MarkupBuilder::new();
    for exp in qualifying(experience) {
        entries
            .line(r"\resumeSubheading")
            .raw("    ")
            .group(&exp.title)
            .raw(" ")
            .group(&exp.dates)
            .newline()
            .raw("    ")
            .group(&exp.company)
            .raw(" ")
            .group(&exp.location)
            .newline();
        if let Some(bullets) = bullet_list(&exp.bullets) {
            entries.append(bullets);
        }
    }
    if entries.is_empty() {
        return None;
    }

    let mut out = MarkupBuilder::new();
    out.line(r"\resumeSubHeadingListStart")
        .append(entries)
        .line(r"\resumeSubHeadingListEnd");
    Some(out)
}

fn projects_body(projects: &[Project]) -> Option<MarkupBuilder> {
    let mut entries = MarkupBuilder::new();
    for project in qualifying(projects) {
        entries
            .line(r"\resumeProjectHeading")
            .raw(r"    {\textbf")
            .group(&project.name);
        if is_present(&project.tech_stack) {
            entries.raw(r" $|$ \emph").group(&project.tech_stack);
        }
        entries.line("}{}");
        if let Some(bullets) = bullet_list(&project.bullets) {
            entries.append(bullets);
        }
    }
    if entries.is_empty() {
        return None;
    }

    let mut out = MarkupBuilder::new();
    out.line(r"\resumeSubHeadingListStart")
        .append(entries)
        .line(r"\resumeSubHeadingListEnd");
    Some(out)
}

fn education_body(education: &[Education]) -> Option<MarkupBuilder> {
    let mut entries = MarkupBuilder::new();
    for edu in qualifying(education) {
        entries
            .line(r"\resumeSubheading")
            .raw("    ")
            .group(&edu.degree)
            .raw(" {");
        if is_present(&edu.gpa) {
            entries.raw("CGPA: ").text(&edu.gpa);
        }
        entries.line("}").raw("    {").text(&edu.institution);
        if is_present(&edu.location) {
            entries.raw(", ").text(&edu.location);
        }
        entries.raw("} ").group(&edu.dates).newline();
    }
    if entries.is_empty() {
        return None;
    }

    let mut out = MarkupBuilder::new();
    out.line(r"\resumeSubHeadingListStart")
        .append(entries)
        .line(r"\resumeSubHeadingListEnd");
    Some(out)
}

fn certifications_body(certifications: &[Certification]) -> Option<MarkupBuilder> {
    let mut items = MarkupBuilder::new();
    for cert in qualifying(certifications) {
        items.raw(r"\small{\item{\textbf").group(&cert.name);
        if is_present(&cert.issuer) {
            items.raw(" $|$ ");
            if is_present(&cert.link) {
                items.href(&cert.link, &cert.issuer);
            } else {
                items.text(&cert.issuer);
            }
        }
        items.line(r" \vspace{2pt}}").line("}");
    }
    if items.is_empty() {
        return None;
    }

    let mut out = MarkupBuilder::new();
    out.line(PLAIN_LIST_START).append(items).line(r"\end{itemize}");
    Some(out)
}
