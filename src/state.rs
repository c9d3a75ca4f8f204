use crate::config::AppConfig;
use crate::models::AttendeeDefaults;
use crate::services::ai::LlmProvider;
use crate::services::cal::BookingProvider;

pub struct AppState {
    pub config: AppConfig,
    pub llm: Box<dyn LlmProvider>,
    pub cal: Box<dyn BookingProvider>,
}

impl AppState {
    pub fn attendee_defaults(&self) -> AttendeeDefaults {
        AttendeeDefaults {
            time_zone: self.config.time_zone.clone(),
            language: self.config.language.clone(),
        }
    }
}
