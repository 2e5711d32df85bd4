//! Render-ready shapes of stored entities: rich text turned into HTML and
//! icon keys resolved.

use serde::Serialize;
use uuid::Uuid;

use crate::icons::Icon;
use crate::models::content::{
    About, Achievement, Certification, Education, ProfileLink, Project, Skill, WorkExperience,
};
use crate::richtext::content_html;
use crate::store::Record;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutView {
    pub name: String,
    pub title: String,
    pub bio_html: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub resume_url: Option<String>,
}

impl From<Record<About>> for AboutView {
    fn from(record: Record<About>) -> Self {
        let about = record.data;
        Self {
            bio_html: content_html(Some(&about.bio)),
            name: about.name,
            title: about.title,
            avatar_url: about.avatar_url,
            email: about.email,
            location: about.location,
            resume_url: about.resume_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillView {
    pub id: Uuid,
    pub name: String,
    pub icon: Icon,
    pub category: Option<String>,
}

impl From<Record<Skill>> for SkillView {
    fn from(record: Record<Skill>) -> Self {
        Self {
            id: record.id,
            icon: Icon::from_key(&record.data.icon),
            name: record.data.name,
            category: record.data.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: Uuid,
    pub title: String,
    pub description_html: Option<String>,
    pub tech_stack: Vec<String>,
    pub image_url: Option<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
}

impl From<Record<Project>> for ProjectView {
    fn from(record: Record<Project>) -> Self {
        let project = record.data;
        Self {
            id: record.id,
            description_html: content_html(Some(&project.description)),
            title: project.title,
            tech_stack: project.tech_stack,
            image_url: project.image_url,
            repo_url: project.repo_url,
            live_url: project.live_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementView {
    pub id: Uuid,
    pub title: String,
    pub description_html: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
}

impl From<Record<Achievement>> for AchievementView {
    fn from(record: Record<Achievement>) -> Self {
        let achievement = record.data;
        Self {
            id: record.id,
            description_html: content_html(Some(&achievement.description)),
            title: achievement.title,
            date: achievement.date,
            url: achievement.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationView {
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    pub issue_date: Option<String>,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
}

impl From<Record<Certification>> for CertificationView {
    fn from(record: Record<Certification>) -> Self {
        let cert = record.data;
        Self {
            id: record.id,
            name: cert.name,
            issuer: cert.issuer,
            issue_date: cert.issue_date,
            credential_url: cert.credential_url,
            image_url: cert.image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationView {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description_html: Option<String>,
}

impl From<Record<Education>> for EducationView {
    fn from(record: Record<Education>) -> Self {
        let education = record.data;
        Self {
            id: record.id,
            description_html: content_html(education.description.as_deref()),
            institution: education.institution,
            degree: education.degree,
            field: education.field,
            start_date: education.start_date,
            end_date: education.end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub location: Option<String>,
    pub description_html: Option<String>,
}

impl From<Record<WorkExperience>> for PositionView {
    fn from(record: Record<WorkExperience>) -> Self {
        let work = record.data;
        Self {
            id: record.id,
            description_html: content_html(Some(&work.description)),
            current: work.end_date.is_none(),
            company: work.company,
            role: work.role,
            start_date: work.start_date,
            end_date: work.end_date,
            location: work.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileLinkView {
    pub id: Uuid,
    pub platform: String,
    pub url: String,
    pub icon: Icon,
}

impl From<Record<ProfileLink>> for ProfileLinkView {
    fn from(record: Record<ProfileLink>) -> Self {
        Self {
            id: record.id,
            icon: Icon::from_key(&record.data.icon),
            platform: record.data.platform,
            url: record.data.url,
        }
    }
}
