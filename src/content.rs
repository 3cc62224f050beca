//! Validated text and structured scene content.
//!
//! Titles, summaries, and scene bodies all pass through the same
//! whitespace-normalizing validation, so persisted boards never carry
//! control characters or ragged spacing.

use crate::id::CharacterId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum length for titles and names.
pub const MAX_NAME_LEN: usize = 100;

/// Errors from text validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("text is empty")]
    Empty,

    #[error("text exceeds {max} characters")]
    TooLong { max: usize },

    #[error("text contains control characters")]
    ControlChars,
}

/// Trim and collapse internal whitespace runs to single spaces.
pub fn clean_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean and validate a piece of free text.
///
/// `max` of `None` means unbounded length.
pub(crate) fn validated(input: &str, max: Option<usize>) -> Result<String, TextError> {
    let cleaned = clean_text(input);

    if cleaned.is_empty() {
        return Err(TextError::Empty);
    }

    if let Some(max) = max {
        if cleaned.chars().count() > max {
            return Err(TextError::TooLong { max });
        }
    }

    if cleaned.chars().any(|c| c.is_control()) {
        return Err(TextError::ControlChars);
    }

    Ok(cleaned)
}

/// The title of a storyboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(input: &str) -> Result<Self, TextError> {
        Ok(Self(validated(input, Some(MAX_NAME_LEN))?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Title {
    fn default() -> Self {
        Self(String::from("Untitled Storyboard"))
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Title {
    type Error = TextError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A one-paragraph summary of the story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary(String);

impl Summary {
    pub fn new(input: &str) -> Result<Self, TextError> {
        Ok(Self(validated(input, None)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Summary {
    type Error = TextError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Whether a scene plays out indoors or outdoors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraLocation {
    Interior,
    Exterior,
}

impl CameraLocation {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            CameraLocation::Interior => "INT.",
            CameraLocation::Exterior => "EXT.",
        }
    }
}

/// Time-of-day marker in a scene heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Dawn,
    Day,
    Dusk,
    Evening,
    Night,
    Later,
    Continuous,
}

impl TimeOfDay {
    pub fn name(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "MORNING",
            TimeOfDay::Dawn => "DAWN",
            TimeOfDay::Day => "DAY",
            TimeOfDay::Dusk => "DUSK",
            TimeOfDay::Evening => "EVENING",
            TimeOfDay::Night => "NIGHT",
            TimeOfDay::Later => "LATER",
            TimeOfDay::Continuous => "CONTINUOUS",
        }
    }
}

/// A slug line: camera placement, location, and time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneHeading {
    pub camera: CameraLocation,
    pub location: String,
    pub time_of_day: TimeOfDay,
}

impl SceneHeading {
    pub fn new(
        camera: CameraLocation,
        location: &str,
        time_of_day: TimeOfDay,
    ) -> Result<Self, TextError> {
        Ok(Self {
            camera,
            location: validated(location, Some(MAX_NAME_LEN))?,
            time_of_day,
        })
    }
}

impl fmt::Display for SceneHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}",
            self.camera.abbreviation(),
            self.location,
            self.time_of_day.name()
        )
    }
}

/// One line inside a dialogue block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogueLine {
    /// Spoken text.
    Text(String),
    /// A stage direction inside the dialogue, e.g. "(whispering)".
    Parenthetical(String),
}

impl DialogueLine {
    pub fn text(input: &str) -> Result<Self, TextError> {
        Ok(DialogueLine::Text(validated(input, None)?))
    }

    pub fn parenthetical(input: &str) -> Result<Self, TextError> {
        Ok(DialogueLine::Parenthetical(validated(input, None)?))
    }
}

/// One element of a scene body.
///
/// Speakers are recorded as character ids, never as structural links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneElement {
    /// Descriptive action or narration.
    Action(String),
    /// A dialogue block, optionally attributed to a character.
    Dialogue {
        speaker: Option<CharacterId>,
        lines: Vec<DialogueLine>,
    },
}

impl SceneElement {
    pub fn action(input: &str) -> Result<Self, TextError> {
        Ok(SceneElement::Action(validated(input, None)?))
    }

    pub fn dialogue(speaker: Option<CharacterId>, lines: Vec<DialogueLine>) -> Self {
        SceneElement::Dialogue { speaker, lines }
    }
}

/// The body of a scene variant: an optional heading plus ordered elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantContent {
    pub heading: Option<SceneHeading>,
    pub elements: Vec<SceneElement>,
}

impl VariantContent {
    /// An empty draft body.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A body holding a single action paragraph.
    pub fn text(input: &str) -> Result<Self, TextError> {
        Ok(Self {
            heading: None,
            elements: vec![SceneElement::action(input)?],
        })
    }

    pub fn with_heading(mut self, heading: SceneHeading) -> Self {
        self.heading = Some(heading);
        self
    }

    pub fn with_element(mut self, element: SceneElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.elements.is_empty()
    }

    /// Rough word count across all elements, for collaborator read-views.
    pub fn word_count(&self) -> usize {
        self.elements
            .iter()
            .map(|e| match e {
                SceneElement::Action(text) => text.split_whitespace().count(),
                SceneElement::Dialogue { lines, .. } => lines
                    .iter()
                    .map(|l| match l {
                        DialogueLine::Text(t) | DialogueLine::Parenthetical(t) => {
                            t.split_whitespace().count()
                        }
                    })
                    .sum(),
            })
            .sum()
    }
}
