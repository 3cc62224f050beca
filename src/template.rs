//! Story templates and their beat outlines.
//!
//! A template seeds a new storyboard with one scene per beat, already
//! chained into reading order, so authors start from a familiar structure
//! instead of a blank board.

use serde::{Deserialize, Serialize};

/// The script formats a storyboard can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoryTemplate {
    Teleplay,
    Screenplay,
    HalfHourSitcom,
    Novel,
}

impl StoryTemplate {
    /// Get the display name.
    pub fn name(&self) -> &'static str {
        match self {
            StoryTemplate::Teleplay => "Teleplay",
            StoryTemplate::Screenplay => "Screenplay",
            StoryTemplate::HalfHourSitcom => "Half-hour Sitcom",
            StoryTemplate::Novel => "Novel",
        }
    }

    /// The beat outline this template seeds.
    pub fn beats(&self) -> &'static [Beat] {
        match self {
            StoryTemplate::Teleplay => &TELEPLAY_BEATS,
            StoryTemplate::Screenplay => &SCREENPLAY_BEATS,
            StoryTemplate::HalfHourSitcom => &SITCOM_BEATS,
            StoryTemplate::Novel => &NOVEL_BEATS,
        }
    }
}

/// One structural beat of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beat {
    /// Short label, used as the seeded variant's author note.
    pub label: &'static str,
    /// What the beat is for.
    pub note: &'static str,
}

impl Beat {
    const fn new(label: &'static str, note: &'static str) -> Self {
        Self { label, note }
    }
}

lazy_static::lazy_static! {
    /// Hour-long episodic structure.
    static ref TELEPLAY_BEATS: Vec<Beat> = vec![
        Beat::new("Teaser", "Hook the audience before the titles"),
        Beat::new("Act One", "Establish the episode problem"),
        Beat::new("Act Two", "Complications mount"),
        Beat::new("Act Three", "The problem turns personal"),
        Beat::new("Act Four", "Resolution and fallout"),
        Beat::new("Tag", "Button scene after the climax"),
    ];

    /// Feature-length three-act structure.
    static ref SCREENPLAY_BEATS: Vec<Beat> = vec![
        Beat::new("Opening Image", "A snapshot of the world before change"),
        Beat::new("Setup", "Who wants what, and why they can't have it"),
        Beat::new("Catalyst", "The event that knocks life off course"),
        Beat::new("Midpoint", "Stakes rise; the goal shifts"),
        Beat::new("Crisis", "The lowest point"),
        Beat::new("Climax", "The final confrontation"),
        Beat::new("Resolution", "The new normal"),
    ];

    /// Half-hour sitcom structure.
    static ref SITCOM_BEATS: Vec<Beat> = vec![
        Beat::new("Cold Open", "A joke or situation before the titles"),
        Beat::new("Act One", "The misunderstanding takes root"),
        Beat::new("Act Two", "Everything unravels"),
        Beat::new("Tag", "One last laugh"),
    ];

    /// Long-form prose structure.
    static ref NOVEL_BEATS: Vec<Beat> = vec![
        Beat::new("Hook", "The opening that earns the next page"),
        Beat::new("Inciting Incident", "The door that closes behind the protagonist"),
        Beat::new("Rising Action", "Progress and setbacks"),
        Beat::new("Midpoint", "A revelation reframes the goal"),
        Beat::new("Dark Night", "All seems lost"),
        Beat::new("Climax", "The decisive act"),
        Beat::new("Denouement", "Loose ends and consequences"),
    ];
}
