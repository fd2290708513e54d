/// Conversation personas the tutor can adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RolePlay {
    Restaurant,
    Tourist,
    Teacher,
    Friend,
    Interview,
}

impl RolePlay {
    /// Unrecognized labels fall back to [`RolePlay::Friend`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "restaurant" => Self::Restaurant,
            "tourist" => Self::Tourist,
            "teacher" => Self::Teacher,
            "interview" => Self::Interview,
            _ => Self::Friend,
        }
    }

    pub fn directive(&self) -> &'static str {
        match self {
            Self::Restaurant => {
                "You are a restaurant waiter/waitress. Help the user practice ordering food, asking about menu items, and restaurant conversations."
            }
            Self::Tourist => {
                "You are a tour guide or local helping a tourist. Practice directions, recommendations, and travel-related conversations."
            }
            Self::Teacher => {
                "You are an English teacher in a classroom setting. Help with academic English, explanations, and formal language."
            }
            Self::Friend => {
                "You are a friendly native English speaker. Practice casual conversation, slang, and everyday English."
            }
            Self::Interview => {
                "You are conducting a job interview. Practice professional English, answering questions, and business communication."
            }
        }
    }
}
