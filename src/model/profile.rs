use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Branch of service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    Army,
    Navy,
    AirForce,
    MarineCorps,
    CoastGuard,
    SpaceForce,
}

impl Branch {
    pub fn all() -> &'static [Branch] {
        &[
            Branch::Army,
            Branch::Navy,
            Branch::AirForce,
            Branch::MarineCorps,
            Branch::CoastGuard,
            Branch::SpaceForce,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Branch::Army => "Army",
            Branch::Navy => "Navy",
            Branch::AirForce => "Air Force",
            Branch::MarineCorps => "Marine Corps",
            Branch::CoastGuard => "Coast Guard",
            Branch::SpaceForce => "Space Force",
        }
    }

    /// Parse a loosely formatted branch name ("air force", "USMC", ...).
    pub fn parse(s: &str) -> Option<Branch> {
        match s.trim().to_lowercase().replace([' ', '-', '_'], "").as_str() {
            "army" => Some(Branch::Army),
            "navy" => Some(Branch::Navy),
            "airforce" | "usaf" => Some(Branch::AirForce),
            "marinecorps" | "marines" | "usmc" => Some(Branch::MarineCorps),
            "coastguard" | "uscg" => Some(Branch::CoastGuard),
            "spaceforce" | "ussf" => Some(Branch::SpaceForce),
            _ => None,
        }
    }
}

/// What the member intends to do after separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareerTrack {
    Employment,
    Education,
    Entrepreneurship,
    Retirement,
}

impl CareerTrack {
    pub fn all() -> &'static [CareerTrack] {
        &[
            CareerTrack::Employment,
            CareerTrack::Education,
            CareerTrack::Entrepreneurship,
            CareerTrack::Retirement,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CareerTrack::Employment => "Employment",
            CareerTrack::Education => "Education",
            CareerTrack::Entrepreneurship => "Entrepreneurship",
            CareerTrack::Retirement => "Retirement",
        }
    }

    pub fn parse(s: &str) -> Option<CareerTrack> {
        match s.trim().to_lowercase().as_str() {
            "employment" | "job" | "career" => Some(CareerTrack::Employment),
            "education" | "school" | "college" => Some(CareerTrack::Education),
            "entrepreneurship" | "business" => Some(CareerTrack::Entrepreneurship),
            "retirement" | "retire" => Some(CareerTrack::Retirement),
            _ => None,
        }
    }
}

/// The member's onboarding answers. The timeline only reads from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub branch: Branch,
    pub rank: String,
    pub separation_date: NaiveDate,
    /// Free-form state or installation the member separates to.
    pub location: String,
    pub career_track: CareerTrack,
    /// Resource links are shown only for unlocked (subscribed) profiles.
    #[serde(default)]
    pub unlocked: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            branch: Branch::Army,
            rank: String::new(),
            separation_date: chrono::Local::now().date_naive() + Duration::days(180),
            location: String::new(),
            career_track: CareerTrack::Employment,
            unlocked: false,
        }
    }
}

impl Profile {
    /// Whole months left until separation, counted from `today` (0 once past).
    pub fn months_until_separation(&self, today: NaiveDate) -> u32 {
        let days = (self.separation_date - today).num_days().max(0);
        (days / 30) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_parse_accepts_abbreviations() {
        assert_eq!(Branch::parse("USMC"), Some(Branch::MarineCorps));
        assert_eq!(Branch::parse("air-force"), Some(Branch::AirForce));
        assert_eq!(Branch::parse("cavalry"), None);
    }

    #[test]
    fn months_until_separation_never_negative() {
        let profile = Profile {
            separation_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        assert_eq!(profile.months_until_separation(today), 3);
        let later = NaiveDate::from_ymd_opt(2027, 3, 1).unwrap();
        assert_eq!(profile.months_until_separation(later), 0);
    }
}
