use crate::core::plate_event::CodeConfidence;
use crate::core::plate_event::submission::PlateEventSubmission;

pub struct PlateEventSubmissionBuilder {
    submission: PlateEventSubmission,
}

impl PlateEventSubmissionBuilder {
    pub fn new() -> Self {
        Self {
            submission: PlateEventSubmission {
                camera_id: Some("cam-1".into()),
                code: Some("ABC123".into()),
                event_time: Some("2024-05-01T10:00:00Z".into()),
                ..PlateEventSubmission::default()
            },
        }
    }

    pub fn camera_id(mut self, value: Option<&str>) -> Self {
        self.submission.camera_id = value.map(String::from);
        self
    }

    pub fn code(mut self, value: Option<&str>) -> Self {
        self.submission.code = value.map(String::from);
        self
    }

    pub fn event_time(mut self, value: Option<&str>) -> Self {
        self.submission.event_time = value.map(String::from);
        self
    }

    pub fn confidence(mut self, value: Option<CodeConfidence>) -> Self {
        self.submission.confidence = value;
        self
    }

    pub fn plate_image(mut self, value: Option<&str>) -> Self {
        self.submission.plate_image = value.map(String::from);
        self
    }

    pub fn vehicle_make(mut self, value: Option<&str>) -> Self {
        self.submission.vehicle_make = value.map(String::from);
        self
    }

    pub fn build(self) -> PlateEventSubmission {
        self.submission
    }
}
