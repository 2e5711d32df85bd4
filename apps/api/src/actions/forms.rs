//! One form per entity. Fields arrive as optional strings, the way a browser
//! form posts them, and `validate` turns them into a typed entity.

use serde::{de::DeserializeOwned, Deserialize};

use crate::actions::validate::{
    date_order, list, optional, optional_date, optional_email, optional_image,
    optional_rich_text, optional_url, required, required_date, required_rich_text, required_url,
};
use crate::actions::FieldErrors;
use crate::media::ImagePayload;
use crate::models::content::{
    About, Achievement, Certification, Education, Project, ProfileLink, Skill, WorkExperience,
};
use crate::store::Entity;

/// A validated entity plus an optional image still to be uploaded.
#[derive(Debug)]
pub struct Validated<T> {
    pub entity: T,
    pub image: Option<ImagePayload>,
}

impl<T> Validated<T> {
    pub fn new(entity: T) -> Self {
        Self {
            entity,
            image: None,
        }
    }
}

pub trait Form: DeserializeOwned + Send + 'static {
    type Entity: Entity;

    fn validate(self) -> Result<Validated<Self::Entity>, FieldErrors>;

    /// Stores the URL of an uploaded image on the entity.
    fn attach_image(_entity: &mut Self::Entity, _url: String) {}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutForm {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// New avatar as a data URL; takes precedence over `avatar_url`.
    pub avatar_image: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub resume_url: Option<String>,
}

impl Form for AboutForm {
    type Entity = About;

    fn validate(self) -> Result<Validated<About>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let about = About {
            name: required(&mut errors, "name", self.name),
            title: required(&mut errors, "title", self.title),
            bio: required_rich_text(&mut errors, "bio", self.bio),
            avatar_url: optional_url(&mut errors, "avatarUrl", self.avatar_url),
            email: optional_email(&mut errors, "email", self.email),
            location: optional(self.location),
            resume_url: optional_url(&mut errors, "resumeUrl", self.resume_url),
        };
        let image = optional_image(&mut errors, "avatarImage", self.avatar_image);
        errors.into_result(Validated {
            entity: about,
            image,
        })
    }

    fn attach_image(entity: &mut About, url: String) {
        entity.avatar_url = Some(url);
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillForm {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
}

impl Form for SkillForm {
    type Entity = Skill;

    fn validate(self) -> Result<Validated<Skill>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let skill = Skill {
            name: required(&mut errors, "name", self.name),
            icon: required(&mut errors, "icon", self.icon),
            category: optional(self.category),
        };
        errors.into_result(Validated::new(skill))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectForm {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Comma-separated.
    pub tech_stack: Option<String>,
    pub image_url: Option<String>,
    pub image: Option<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
}

impl Form for ProjectForm {
    type Entity = Project;

    fn validate(self) -> Result<Validated<Project>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let project = Project {
            title: required(&mut errors, "title", self.title),
            description: required_rich_text(&mut errors, "description", self.description),
            tech_stack: list(self.tech_stack),
            image_url: optional_url(&mut errors, "imageUrl", self.image_url),
            repo_url: optional_url(&mut errors, "repoUrl", self.repo_url),
            live_url: optional_url(&mut errors, "liveUrl", self.live_url),
        };
        let image = optional_image(&mut errors, "image", self.image);
        errors.into_result(Validated {
            entity: project,
            image,
        })
    }

    fn attach_image(entity: &mut Project, url: String) {
        entity.image_url = Some(url);
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AchievementForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
}

impl Form for AchievementForm {
    type Entity = Achievement;

    fn validate(self) -> Result<Validated<Achievement>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let achievement = Achievement {
            title: required(&mut errors, "title", self.title),
            description: required_rich_text(&mut errors, "description", self.description),
            date: optional_date(&mut errors, "date", self.date),
            url: optional_url(&mut errors, "url", self.url),
        };
        errors.into_result(Validated::new(achievement))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificationForm {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
    pub image: Option<String>,
}

impl Form for CertificationForm {
    type Entity = Certification;

    fn validate(self) -> Result<Validated<Certification>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let certification = Certification {
            name: required(&mut errors, "name", self.name),
            issuer: required(&mut errors, "issuer", self.issuer),
            issue_date: optional_date(&mut errors, "issueDate", self.issue_date),
            credential_url: optional_url(&mut errors, "credentialUrl", self.credential_url),
            image_url: optional_url(&mut errors, "imageUrl", self.image_url),
        };
        let image = optional_image(&mut errors, "image", self.image);
        errors.into_result(Validated {
            entity: certification,
            image,
        })
    }

    fn attach_image(entity: &mut Certification, url: String) {
        entity.image_url = Some(url);
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationForm {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

impl Form for EducationForm {
    type Entity = Education;

    fn validate(self) -> Result<Validated<Education>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let start_date = required_date(&mut errors, "startDate", self.start_date);
        let end_date = optional_date(&mut errors, "endDate", self.end_date);
        date_order(&mut errors, "endDate", &start_date, end_date.as_deref());
        let education = Education {
            institution: required(&mut errors, "institution", self.institution),
            degree: required(&mut errors, "degree", self.degree),
            field: optional(self.field),
            start_date,
            end_date,
            description: optional_rich_text(self.description),
        };
        errors.into_result(Validated::new(education))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkExperienceForm {
    pub company: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl Form for WorkExperienceForm {
    type Entity = WorkExperience;

    fn validate(self) -> Result<Validated<WorkExperience>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let start_date = required_date(&mut errors, "startDate", self.start_date);
        let end_date = optional_date(&mut errors, "endDate", self.end_date);
        date_order(&mut errors, "endDate", &start_date, end_date.as_deref());
        let work = WorkExperience {
            company: required(&mut errors, "company", self.company),
            role: required(&mut errors, "role", self.role),
            start_date,
            end_date,
            location: optional(self.location),
            description: required_rich_text(&mut errors, "description", self.description),
        };
        errors.into_result(Validated::new(work))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileLinkForm {
    pub platform: Option<String>,
    pub url: Option<String>,
    /// Defaults to the lower-cased platform name.
    pub icon: Option<String>,
}

impl Form for ProfileLinkForm {
    type Entity = ProfileLink;

    fn validate(self) -> Result<Validated<ProfileLink>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let platform = required(&mut errors, "platform", self.platform);
        let icon = optional(self.icon).unwrap_or_else(|| platform.to_lowercase());
        let link = ProfileLink {
            url: required_url(&mut errors, "url", self.url),
            platform,
            icon,
        };
        errors.into_result(Validated::new(link))
    }
}
