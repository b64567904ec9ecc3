//! Robot domain type

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::record::{Record, RecordId};

/// A robot as submitted, before an id has been allocated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotDraft {
    pub name: String,
    pub description: String,
}

impl RobotDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A robot that tasks can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    pub id: RecordId,
    pub name: String,
    pub description: String,
}

impl Robot {
    pub fn new(id: RecordId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn to_draft(&self) -> RobotDraft {
        RobotDraft {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

impl Record for Robot {
    type Draft = RobotDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: RobotDraft) -> Self {
        debug!(id, name = %draft.name, "Robot::from_draft: called");
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }

    fn collection_name() -> &'static str {
        crate::ROBOTS_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_json_shape() {
        let robot = Robot::new(1, "Robot A", "Cleaning robot");
        let json = serde_json::to_string(&robot).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"Robot A","description":"Cleaning robot"}"#);
    }

    #[test]
    fn test_collection_name() {
        assert_eq!(Robot::collection_name(), "robots");
    }
}
