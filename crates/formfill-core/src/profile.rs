//! Stored job-application profile: four independent groups.
//!
//! Only the first education and experience entries are used for filling.

use serde::{Deserialize, Serialize};

use crate::catalog::{FieldGroup, SemanticField};
use crate::filler::FieldSpec;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub linkedin: String,
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: String,
    pub field_of_study: String,
    pub institution: String,
    pub graduation_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub job_title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    pub technical_skills: String,
    pub soft_skills: String,
    pub languages: String,
    pub certifications: String,
}

/// Cached profile used by the filler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Skills>,
}

impl ProfileData {
    /// Structure written on first install: every group present, every value empty.
    pub fn empty_template() -> Self {
        Self {
            profile: Some(Profile::default()),
            education: vec![Education::default()],
            experience: vec![Experience::default()],
            skills: Some(Skills::default()),
        }
    }

    /// Stored value for a field, or `""` when the group or entry is absent.
    pub fn value(&self, field: SemanticField) -> &str {
        use SemanticField::*;
        match field.group() {
            FieldGroup::Profile => {
                let Some(p) = &self.profile else { return "" };
                match field {
                    FirstName => &p.first_name,
                    LastName => &p.last_name,
                    Email => &p.email,
                    Phone => &p.phone,
                    Address => &p.address,
                    City => &p.city,
                    State => &p.state,
                    ZipCode => &p.zip_code,
                    Linkedin => &p.linkedin,
                    _ => &p.portfolio,
                }
            }
            FieldGroup::Education => {
                let Some(e) = self.education.first() else { return "" };
                match field {
                    Degree => &e.degree,
                    FieldOfStudy => &e.field_of_study,
                    Institution => &e.institution,
                    GraduationDate => &e.graduation_date,
                    _ => &e.gpa,
                }
            }
            FieldGroup::Experience => {
                let Some(x) = self.experience.first() else { return "" };
                match field {
                    JobTitle => &x.job_title,
                    Company => &x.company,
                    StartDate => &x.start_date,
                    EndDate => &x.end_date,
                    _ => &x.description,
                }
            }
            FieldGroup::Skills => {
                let Some(s) = &self.skills else { return "" };
                match field {
                    TechnicalSkills => &s.technical_skills,
                    SoftSkills => &s.soft_skills,
                    Languages => &s.languages,
                    _ => &s.certifications,
                }
            }
        }
    }

    /// Set a field, creating the group (or its first entry) when missing.
    pub fn set_value(&mut self, field: SemanticField, value: impl Into<String>) {
        use SemanticField::*;
        let value = value.into();
        match field.group() {
            FieldGroup::Profile => {
                let p = self.profile.get_or_insert_with(Profile::default);
                let slot = match field {
                    FirstName => &mut p.first_name,
                    LastName => &mut p.last_name,
                    Email => &mut p.email,
                    Phone => &mut p.phone,
                    Address => &mut p.address,
                    City => &mut p.city,
                    State => &mut p.state,
                    ZipCode => &mut p.zip_code,
                    Linkedin => &mut p.linkedin,
                    _ => &mut p.portfolio,
                };
                *slot = value;
            }
            FieldGroup::Education => {
                if self.education.is_empty() {
                    self.education.push(Education::default());
                }
                let e = &mut self.education[0];
                let slot = match field {
                    Degree => &mut e.degree,
                    FieldOfStudy => &mut e.field_of_study,
                    Institution => &mut e.institution,
                    GraduationDate => &mut e.graduation_date,
                    _ => &mut e.gpa,
                };
                *slot = value;
            }
            FieldGroup::Experience => {
                if self.experience.is_empty() {
                    self.experience.push(Experience::default());
                }
                let x = &mut self.experience[0];
                let slot = match field {
                    JobTitle => &mut x.job_title,
                    Company => &mut x.company,
                    StartDate => &mut x.start_date,
                    EndDate => &mut x.end_date,
                    _ => &mut x.description,
                };
                *slot = value;
            }
            FieldGroup::Skills => {
                let s = self.skills.get_or_insert_with(Skills::default);
                let slot = match field {
                    TechnicalSkills => &mut s.technical_skills,
                    SoftSkills => &mut s.soft_skills,
                    Languages => &mut s.languages,
                    _ => &mut s.certifications,
                };
                *slot = value;
            }
        }
    }

    /// True if the group is stored at all (even with empty values).
    pub fn has_group(&self, group: FieldGroup) -> bool {
        match group {
            FieldGroup::Profile => self.profile.is_some(),
            FieldGroup::Education => !self.education.is_empty(),
            FieldGroup::Experience => !self.experience.is_empty(),
            FieldGroup::Skills => self.skills.is_some(),
        }
    }

    /// Fill specs for one group, in catalog order. Empty values are included;
    /// the filler skips them.
    pub fn group_specs(&self, group: FieldGroup) -> Vec<FieldSpec<'_>> {
        if !self.has_group(group) {
            return Vec::new();
        }
        group
            .fields()
            .map(|field| FieldSpec {
                field,
                value: self.value(field),
                synonyms: field.synonyms(),
            })
            .collect()
    }

    /// Number of fields with a non-empty stored value.
    pub fn filled_field_count(&self) -> usize {
        SemanticField::ALL
            .into_iter()
            .filter(|f| !self.value(*f).is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_camel_case_json() {
        let json = r#"{
            "profile": { "firstName": "Ada", "zipCode": "10001" },
            "education": [ { "degree": "BSc" }, { "degree": "MSc" } ],
            "experience": [],
            "skills": { "technicalSkills": "Rust" }
        }"#;
        let data: ProfileData = serde_json::from_str(json).unwrap();
        assert_eq!(data.value(SemanticField::FirstName), "Ada");
        assert_eq!(data.value(SemanticField::ZipCode), "10001");
        assert_eq!(data.value(SemanticField::LastName), "");
        assert_eq!(data.value(SemanticField::Degree), "BSc", "first entry only");
        assert_eq!(data.value(SemanticField::JobTitle), "");
        assert_eq!(data.value(SemanticField::TechnicalSkills), "Rust");
    }

    #[test]
    fn absent_groups_have_no_specs() {
        let data = ProfileData {
            profile: Some(Profile {
                email: "a@b.com".into(),
                ..Profile::default()
            }),
            ..ProfileData::default()
        };
        assert_eq!(data.group_specs(FieldGroup::Profile).len(), 10);
        assert!(data.group_specs(FieldGroup::Education).is_empty());
        assert!(data.group_specs(FieldGroup::Skills).is_empty());
    }

    #[test]
    fn set_value_creates_missing_group() {
        let mut data = ProfileData::default();
        data.set_value(SemanticField::Company, "Acme");
        data.set_value(SemanticField::Gpa, "3.9");
        assert_eq!(data.experience.len(), 1);
        assert_eq!(data.value(SemanticField::Company), "Acme");
        assert_eq!(data.value(SemanticField::Gpa), "3.9");
        assert_eq!(data.filled_field_count(), 2);
    }

    #[test]
    fn every_field_round_trips_through_set_value() {
        let mut data = ProfileData::default();
        for field in SemanticField::ALL {
            data.set_value(field, field.key());
        }
        for field in SemanticField::ALL {
            assert_eq!(data.value(field), field.key());
        }
    }

    #[test]
    fn template_has_all_groups_and_no_values() {
        let data = ProfileData::empty_template();
        for group in FieldGroup::ALL {
            assert!(data.has_group(group));
        }
        assert_eq!(data.filled_field_count(), 0);
    }
}
