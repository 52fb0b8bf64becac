//! Static catalog of semantic fields and the synonym tokens used to find them.
//!
//! Tokens are lower-case and ordered: earlier tokens win when several match.
//! The lists are configuration, never mutated at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which stored group a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldGroup {
    Profile,
    Education,
    Experience,
    Skills,
}

impl FieldGroup {
    /// Fill order used by the orchestrator.
    pub const ALL: [FieldGroup; 4] = [
        FieldGroup::Profile,
        FieldGroup::Education,
        FieldGroup::Experience,
        FieldGroup::Skills,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldGroup::Profile => "profile",
            FieldGroup::Education => "education",
            FieldGroup::Experience => "experience",
            FieldGroup::Skills => "skills",
        }
    }

    /// Fields of this group in catalog order.
    pub fn fields(self) -> impl Iterator<Item = SemanticField> {
        SemanticField::ALL
            .into_iter()
            .filter(move |f| f.group() == self)
    }
}

/// A named piece of profile data, independent of how a site labels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    Linkedin,
    Portfolio,
    Degree,
    FieldOfStudy,
    Institution,
    GraduationDate,
    Gpa,
    JobTitle,
    Company,
    StartDate,
    EndDate,
    Description,
    TechnicalSkills,
    SoftSkills,
    Languages,
    Certifications,
}

impl SemanticField {
    pub const ALL: [SemanticField; 24] = [
        SemanticField::FirstName,
        SemanticField::LastName,
        SemanticField::Email,
        SemanticField::Phone,
        SemanticField::Address,
        SemanticField::City,
        SemanticField::State,
        SemanticField::ZipCode,
        SemanticField::Linkedin,
        SemanticField::Portfolio,
        SemanticField::Degree,
        SemanticField::FieldOfStudy,
        SemanticField::Institution,
        SemanticField::GraduationDate,
        SemanticField::Gpa,
        SemanticField::JobTitle,
        SemanticField::Company,
        SemanticField::StartDate,
        SemanticField::EndDate,
        SemanticField::Description,
        SemanticField::TechnicalSkills,
        SemanticField::SoftSkills,
        SemanticField::Languages,
        SemanticField::Certifications,
    ];

    pub fn group(self) -> FieldGroup {
        use SemanticField::*;
        match self {
            FirstName | LastName | Email | Phone | Address | City | State | ZipCode
            | Linkedin | Portfolio => FieldGroup::Profile,
            Degree | FieldOfStudy | Institution | GraduationDate | Gpa => FieldGroup::Education,
            JobTitle | Company | StartDate | EndDate | Description => FieldGroup::Experience,
            TechnicalSkills | SoftSkills | Languages | Certifications => FieldGroup::Skills,
        }
    }

    /// Storage key (camelCase, as persisted in the profile record).
    pub fn key(self) -> &'static str {
        use SemanticField::*;
        match self {
            FirstName => "firstName",
            LastName => "lastName",
            Email => "email",
            Phone => "phone",
            Address => "address",
            City => "city",
            State => "state",
            ZipCode => "zipCode",
            Linkedin => "linkedin",
            Portfolio => "portfolio",
            Degree => "degree",
            FieldOfStudy => "fieldOfStudy",
            Institution => "institution",
            GraduationDate => "graduationDate",
            Gpa => "gpa",
            JobTitle => "jobTitle",
            Company => "company",
            StartDate => "startDate",
            EndDate => "endDate",
            Description => "description",
            TechnicalSkills => "technicalSkills",
            SoftSkills => "softSkills",
            Languages => "languages",
            Certifications => "certifications",
        }
    }

    /// Ordered synonym tokens for this field.
    pub fn synonyms(self) -> &'static [&'static str] {
        use SemanticField::*;
        match self {
            FirstName => &["first name", "firstname", "fname", "given name", "givenname"],
            LastName => &[
                "last name",
                "lastname",
                "lname",
                "family name",
                "familyname",
                "surname",
            ],
            Email => &["email", "e-mail", "email address", "e-mail address"],
            Phone => &[
                "phone",
                "telephone",
                "phone number",
                "telephone number",
                "mobile",
                "cell",
                "cell phone",
            ],
            Address => &["address", "street address", "street", "addr"],
            City => &["city", "town"],
            State => &["state", "province", "region"],
            ZipCode => &["zip", "zip code", "postal code", "postcode", "zipcode"],
            Linkedin => &["linkedin", "linkedin url", "linkedin profile", "linkedin.com"],
            Portfolio => &[
                "portfolio",
                "portfolio url",
                "website",
                "personal website",
                "homepage",
            ],
            Degree => &["degree", "education degree", "academic degree", "qualification"],
            FieldOfStudy => &[
                "field of study",
                "major",
                "concentration",
                "specialization",
                "subject",
            ],
            Institution => &[
                "institution",
                "university",
                "college",
                "school",
                "institution name",
            ],
            GraduationDate => &[
                "graduation date",
                "graduation year",
                "year graduated",
                "completion date",
            ],
            Gpa => &["gpa", "grade point average", "grade point", "academic average"],
            JobTitle => &["job title", "position", "role", "title", "job position"],
            Company => &[
                "company",
                "employer",
                "organization",
                "company name",
                "employer name",
            ],
            StartDate => &["start date", "employment start", "job start", "work start"],
            EndDate => &["end date", "employment end", "job end", "work end", "current"],
            Description => &[
                "description",
                "job description",
                "role description",
                "responsibilities",
                "duties",
            ],
            TechnicalSkills => &[
                "technical skills",
                "skills",
                "technical expertise",
                "programming skills",
                "technologies",
            ],
            SoftSkills => &[
                "soft skills",
                "interpersonal skills",
                "communication skills",
                "leadership skills",
            ],
            Languages => &[
                "languages",
                "language skills",
                "spoken languages",
                "foreign languages",
            ],
            Certifications => &[
                "certifications",
                "certificates",
                "professional certifications",
                "credentials",
            ],
        }
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when parsing an unknown field key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for SemanticField {
    type Err = UnknownField;

    /// Accepts the storage key, case-insensitively (`firstName`, `firstname`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
