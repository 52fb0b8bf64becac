//! Page snapshots shaped like real job-board application forms.

use formfill_core::catalog::SemanticField;
use formfill_core::profile::ProfileData;

pub const APPLY_URL: &str = "https://boards.example.com/acme/jobs/42/apply";

/// Two-step application: contact details keyed by `name`, the rest by labels
/// and placeholders, plus a hidden token and a submit button that must stay put.
pub const APPLICATION_PAGE: &str = r#"{
    "url": "https://boards.example.com/acme/jobs/42/apply",
    "forms": [
        {
            "controls": [
                { "type": "hidden", "name": "authenticity_token", "value": "abc123" },
                { "name": "job_application[first_name]" },
                { "name": "job_application[last_name]" },
                { "type": "email", "id": "email_field" },
                { "type": "tel", "placeholder": "Phone number" },
                { "name": "job_application[city]", "value": "Already typed" },
                { "id": "school_0" },
                { "kind": "textarea", "id": "cover" },
                { "type": "submit", "name": "submit_application" }
            ],
            "labels": [
                { "text": "Email", "for": "email_field" },
                { "text": "School / University", "for": "school_0" }
            ]
        }
    ]
}"#;

pub fn profile() -> ProfileData {
    let mut data = ProfileData::empty_template();
    data.set_value(SemanticField::FirstName, "Ada");
    data.set_value(SemanticField::LastName, "Lovelace");
    data.set_value(SemanticField::Email, "ada@example.com");
    data.set_value(SemanticField::Phone, "+44 20 7946 0000");
    data.set_value(SemanticField::City, "London");
    data.set_value(SemanticField::Institution, "University of London");
    data
}
