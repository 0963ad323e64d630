//! Exercises offered for form checking.

use formcheck_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Exercise {
    #[default]
    Squat,
    Rdl,
    PushUp,
    Lunge,
    Deadlift,
    Plank,
}

impl Exercise {
    pub const ALL: [Exercise; 6] = [
        Exercise::Squat,
        Exercise::Rdl,
        Exercise::PushUp,
        Exercise::Lunge,
        Exercise::Deadlift,
        Exercise::Plank,
    ];

    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Exercise::Squat => "Squat",
            Exercise::Rdl => "RDL",
            Exercise::PushUp => "Push-up",
            Exercise::Lunge => "Lunge",
            Exercise::Deadlift => "Deadlift",
            Exercise::Plank => "Plank",
        }
    }

    /// Whether form rules exist for this exercise
    pub fn is_supported(&self) -> bool {
        matches!(self, Exercise::Squat)
    }
}

impl FromStr for Exercise {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "squat" => Ok(Exercise::Squat),
            "rdl" | "romaniandeadlift" => Ok(Exercise::Rdl),
            "pushup" => Ok(Exercise::PushUp),
            "lunge" => Ok(Exercise::Lunge),
            "deadlift" => Ok(Exercise::Deadlift),
            "plank" => Ok(Exercise::Plank),
            _ => Err(Error::UnknownExercise(s.to_string())),
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        for exercise in Exercise::ALL {
            assert_eq!(exercise.label().parse::<Exercise>().unwrap(), exercise);
        }
        assert_eq!("push_up".parse::<Exercise>().unwrap(), Exercise::PushUp);
        assert_eq!("Romanian Deadlift".parse::<Exercise>().unwrap(), Exercise::Rdl);
        assert!("burpee".parse::<Exercise>().is_err());
    }

    #[test]
    fn test_only_squat_supported() {
        assert!(Exercise::Squat.is_supported());
        assert!(!Exercise::Plank.is_supported());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Exercise::PushUp).unwrap(), "\"push-up\"");
        let parsed: Exercise = serde_json::from_str("\"rdl\"").unwrap();
        assert_eq!(parsed, Exercise::Rdl);
    }
}
