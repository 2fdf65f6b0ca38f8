use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::{Branch, CareerTrack, Profile};

/// A single checklist item placed on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Months before separation the task belongs to (0 = separation month).
    pub month: u32,
    /// `None` means the task applies to every track.
    #[serde(default)]
    pub track: Option<CareerTrack>,
    /// `None` means the task applies to every branch.
    #[serde(default)]
    pub branch: Option<Branch>,
    /// Case-insensitive location restriction; `None` applies everywhere.
    #[serde(default)]
    pub location: Option<String>,
    /// External resource, gated behind an unlocked profile.
    #[serde(default)]
    pub link: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>, month: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            month,
            track: None,
            branch: None,
            location: None,
            link: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn for_track(mut self, track: CareerTrack) -> Self {
        self.track = Some(track);
        self
    }

    pub fn for_branch(mut self, branch: Branch) -> Self {
        self.branch = Some(branch);
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Whether the task is relevant to the member's profile.
    pub fn applies_to(&self, profile: &Profile) -> bool {
        let track_ok = self.track.map_or(true, |t| t == profile.career_track);
        let branch_ok = self.branch.map_or(true, |b| b == profile.branch);
        let location_ok = self.location.as_deref().map_or(true, |loc| {
            loc.trim().eq_ignore_ascii_case(profile.location.trim())
        });
        track_ok && branch_ok && location_ok
    }

    /// The resource link, if the profile has unlocked resources.
    pub fn resource_link(&self, profile: &Profile) -> Option<&str> {
        if profile.unlocked {
            self.link.as_deref()
        } else {
            None
        }
    }

    /// True when a link exists but is hidden behind the paywall.
    pub fn is_link_locked(&self, profile: &Profile) -> bool {
        self.link.is_some() && !profile.unlocked
    }
}

/// Tasks relevant to the profile, in catalog order.
pub fn personalized<'a>(tasks: &'a [Task], profile: &Profile) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.applies_to(profile)).collect()
}

/// Group tasks by month. Iterate in reverse for furthest-out first.
pub fn group_by_month<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> BTreeMap<u32, Vec<&'a Task>> {
    let mut groups: BTreeMap<u32, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        groups.entry(task.month).or_default().push(task);
    }
    groups
}

/// Built-in catalog used until the user imports one.
pub fn default_catalog() -> Vec<Task> {
    vec![
        Task::new("Attend Transition Assistance Program", 6)
            .with_description("Complete the mandatory TAP workshops and initial counseling.")
            .with_link("https://www.dodtap.mil"),
        Task::new("Request medical and dental records", 6)
            .with_description("Get complete copies before out-processing."),
        Task::new("Apply for a SkillBridge internship", 6)
            .for_track(CareerTrack::Employment)
            .with_link("https://skillbridge.osd.mil"),
        Task::new("File a BDD disability claim", 5)
            .with_description("Benefits Delivery at Discharge accepts claims 180 to 90 days out.")
            .with_link("https://www.va.gov/disability/how-to-file-claim/when-to-file/pre-discharge-claim/"),
        Task::new("Apply for GI Bill benefits", 5)
            .for_track(CareerTrack::Education)
            .with_link("https://www.va.gov/education/how-to-apply/"),
        Task::new("Draft a civilian resume", 4).for_track(CareerTrack::Employment),
        Task::new("Register with SBA Boots to Business", 4)
            .for_track(CareerTrack::Entrepreneurship)
            .with_link("https://www.sba.gov/business-guide"),
        Task::new("Review Survivor Benefit Plan election", 4).for_track(CareerTrack::Retirement),
        Task::new("Schedule separation physical", 3),
        Task::new("Submit terminal leave request", 3)
            .with_description("Coordinate leave balance with your unit."),
        Task::new("Update Marine Corps Transition Readiness checklist", 3)
            .for_branch(Branch::MarineCorps),
        Task::new("Apply to schools and submit transcripts", 3).for_track(CareerTrack::Education),
        Task::new("Arrange household goods shipment", 2),
        Task::new("Collect DD-214 worksheet", 1),
        Task::new("Enroll in VA health care", 0).with_link("https://www.va.gov/health-care/apply/"),
    ]
}
