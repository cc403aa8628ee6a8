//! Profile generation from university email addresses.
//!
//! A profile is derived entirely from the local part of an
//! `first.last@esprit.tn` address: the two name tokens are capitalized,
//! social URLs are templated from them, and a completeness score is
//! assigned. Nothing is fetched or verified over the network.

use std::sync::{Arc, LazyLock};

use chrono::{DateTime, Local};
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::alumni::store::AlumniStore;

/// Sentinel stored in `linkedin` when no profile URL could be produced.
pub const LINKEDIN_NOT_FOUND: &str = "No LinkedIn profile found";
/// Job titles are never looked up.
pub const JOB_TITLE_PLACEHOLDER: &str = "N/A";

static ESPRIT_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\w+)\.(\w+)@esprit\.tn$").expect("static email pattern compiles")
});

/// Completeness bucket derived from the profile score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProfileStatus {
    Complete,
    Partial,
    Failed,
}

impl ProfileStatus {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Complete
        } else if score >= 50 {
            Self::Partial
        } else {
            Self::Failed
        }
    }
}

/// Score and status computed for a generated profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileAssessment {
    pub score: u8,
    pub status: ProfileStatus,
}

impl ProfileAssessment {
    /// Score a profile by which social links were resolved.
    ///
    /// Only LinkedIn contributes. Templated URLs never equal the sentinel,
    /// so every generated profile currently lands in the 90 branch.
    pub fn for_linkedin(linkedin: &str) -> Self {
        let score = if linkedin != LINKEDIN_NOT_FOUND { 90 } else { 50 };
        Self {
            score,
            status: ProfileStatus::from_score(score),
        }
    }

    /// Score rendered the way records carry it, e.g. `"90%"`.
    pub fn percent(&self) -> String {
        format!("{}%", self.score)
    }
}

/// A fully derived alumni profile, as appended to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniProfile {
    /// The address exactly as submitted.
    pub email: String,
    pub name: String,
    pub family_name: String,
    pub linkedin: String,
    pub facebook: String,
    pub job_title: String,
    /// Creation time, `hh:mm AM`.
    pub time: String,
}

/// Returned when the address does not have the `first.last@esprit.tn` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedProfile {
    pub email: String,
    pub status: ProfileStatus,
    pub profile_score: String,
}

impl FailedProfile {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            status: ProfileStatus::Failed,
            profile_score: "0%".to_string(),
        }
    }
}

/// Result of running the generator on one address.
///
/// Serializes as the bare record: the assessment of a generated profile is
/// kept out of the JSON so the two record shapes stay distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    Generated {
        profile: AlumniProfile,
        assessment: ProfileAssessment,
    },
    Failed(FailedProfile),
}

impl ProfileOutcome {
    pub fn email(&self) -> &str {
        match self {
            Self::Generated { profile, .. } => &profile.email,
            Self::Failed(failed) => &failed.email,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }
}

impl Serialize for ProfileOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Generated { profile, .. } => profile.serialize(serializer),
            Self::Failed(failed) => failed.serialize(serializer),
        }
    }
}

/// Split an esprit.tn address into its two lower-cased name tokens.
///
/// Matching is case-insensitive and anchored at both ends; tokens are one
/// or more word characters.
pub fn extract_name_tokens(email: &str) -> Option<(String, String)> {
    let caps = ESPRIT_EMAIL.captures(email)?;
    Some((caps[1].to_lowercase(), caps[2].to_lowercase()))
}

/// Lower-case the whole token, then upper-case its first character.
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

pub fn linkedin_url(first: &str, last: &str) -> String {
    format!(
        "https://www.linkedin.com/in/{}-{}/",
        first.to_lowercase(),
        last.to_lowercase()
    )
}

pub fn facebook_url(first: &str, last: &str) -> String {
    format!(
        "https://facebook.com/{}.{}",
        first.to_lowercase(),
        last.to_lowercase()
    )
}

/// Derive a profile without touching any store.
pub fn derive_profile(email: &str, now: DateTime<Local>) -> ProfileOutcome {
    let Some((first, last)) = extract_name_tokens(email) else {
        return ProfileOutcome::Failed(FailedProfile::new(email));
    };

    let linkedin = linkedin_url(&first, &last);
    let facebook = facebook_url(&first, &last);
    let assessment = ProfileAssessment::for_linkedin(&linkedin);

    ProfileOutcome::Generated {
        profile: AlumniProfile {
            email: email.to_string(),
            name: capitalize(&first),
            family_name: capitalize(&last),
            linkedin,
            facebook,
            job_title: JOB_TITLE_PLACEHOLDER.to_string(),
            time: now.format("%I:%M %p").to_string(),
        },
        assessment,
    }
}

/// Generates profiles and records the successful ones.
#[derive(Clone)]
pub struct ProfileGenerator {
    store: Arc<AlumniStore>,
}

impl ProfileGenerator {
    pub fn new(store: Arc<AlumniStore>) -> Self {
        Self { store }
    }

    /// Derive a profile for `email` and append it to the store on success.
    ///
    /// Failure records are returned but never stored.
    pub fn generate(&self, email: &str) -> ProfileOutcome {
        let outcome = derive_profile(email, Local::now());
        match &outcome {
            ProfileOutcome::Generated {
                profile,
                assessment,
            } => {
                tracing::info!(
                    email = %profile.email,
                    score = assessment.score,
                    status = ?assessment.status,
                    "Generated alumni profile"
                );
                self.store.append(profile.clone().into());
            }
            ProfileOutcome::Failed(failed) => {
                tracing::debug!(email = %failed.email, "Email did not match first.last@esprit.tn");
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, 1, 14, 5, 0)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn extracts_tokens_case_insensitively() {
        assert_eq!(
            extract_name_tokens("Ahmed.BenSalem@ESPRIT.TN"),
            Some(("ahmed".to_string(), "bensalem".to_string()))
        );
        assert_eq!(
            extract_name_tokens("john_2.doe@esprit.tn"),
            Some(("john_2".to_string(), "doe".to_string()))
        );
    }

    #[test]
    fn rejects_other_shapes() {
        for email in [
            "johndoe@esprit.tn",
            "john.doe@gmail.com",
            "john.doe.jr@esprit.tn",
            "john.doe@esprit.tn.evil.com",
            "john-x.doe@esprit.tn",
            ".doe@esprit.tn",
            "john.@esprit.tn",
            " john.doe@esprit.tn",
            "",
        ] {
            assert_eq!(extract_name_tokens(email), None, "{email} should not match");
        }
    }

    #[test]
    fn capitalize_lowercases_the_tail() {
        assert_eq!(capitalize("bensalem"), "Bensalem");
        assert_eq!(capitalize("mcDONALD"), "Mcdonald");
        assert_eq!(capitalize("élodie"), "Élodie");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn derives_full_record() {
        let outcome = derive_profile("Ahmed.BenSalem@esprit.tn", fixed_time());
        let ProfileOutcome::Generated {
            profile,
            assessment,
        } = outcome
        else {
            panic!("expected a generated profile");
        };

        assert_eq!(
            profile,
            AlumniProfile {
                email: "Ahmed.BenSalem@esprit.tn".to_string(),
                name: "Ahmed".to_string(),
                family_name: "Bensalem".to_string(),
                linkedin: "https://www.linkedin.com/in/ahmed-bensalem/".to_string(),
                facebook: "https://facebook.com/ahmed.bensalem".to_string(),
                job_title: "N/A".to_string(),
                time: "02:05 PM".to_string(),
            }
        );
        assert_eq!(assessment.score, 90);
        assert_eq!(assessment.status, ProfileStatus::Complete);
        assert_eq!(assessment.percent(), "90%");
    }

    #[test]
    fn failure_record_has_its_own_shape() {
        let outcome = derive_profile("nobody@example.com", fixed_time());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "nobody@example.com",
                "status": "Failed",
                "profileScore": "0%"
            })
        );
    }

    #[test]
    fn generated_record_serializes_without_assessment() {
        let outcome = derive_profile("a.b@esprit.tn", fixed_time());
        let json = serde_json::to_value(&outcome).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "email",
                "facebook",
                "familyName",
                "jobTitle",
                "linkedin",
                "name",
                "time"
            ]
        );
    }

    #[test]
    fn scoring_branches() {
        assert_eq!(
            ProfileAssessment::for_linkedin(LINKEDIN_NOT_FOUND),
            ProfileAssessment {
                score: 50,
                status: ProfileStatus::Partial
            }
        );
        assert_eq!(ProfileStatus::from_score(80), ProfileStatus::Complete);
        assert_eq!(ProfileStatus::from_score(79), ProfileStatus::Partial);
        assert_eq!(ProfileStatus::from_score(49), ProfileStatus::Failed);
    }

    #[test]
    fn generate_appends_only_successes() {
        let store = Arc::new(AlumniStore::new());
        let generator = ProfileGenerator::new(Arc::clone(&store));

        assert!(!generator.generate("bad@esprit.tn").is_generated());
        assert!(store.is_empty());

        let outcome = generator.generate("Sara.Trabelsi@esprit.tn");
        assert!(outcome.is_generated());
        assert_eq!(outcome.email(), "Sara.Trabelsi@esprit.tn");

        let all = store.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email(), Some("Sara.Trabelsi@esprit.tn"));
        assert_eq!(all[0].get_str("name"), Some("Sara"));
    }

    #[test]
    fn generated_time_is_twelve_hour_clock() {
        let store = Arc::new(AlumniStore::new());
        let outcome = ProfileGenerator::new(store).generate("a.b@esprit.tn");
        let ProfileOutcome::Generated { profile, .. } = outcome else {
            panic!("expected a generated profile");
        };
        let re = Regex::new(r"^(0[1-9]|1[0-2]):[0-5]\d (AM|PM)$").unwrap();
        assert!(re.is_match(&profile.time), "unexpected time {}", profile.time);
    }
}
