use crate::vendor::requests::images::ImageRequest;

/// Word prefixes that mark a prompt as a coaching diagram.
const DIAGRAM_KEYWORDS: [&str; 11] = [
    "diagram",
    "scheme",
    "schema",
    "drill",
    "play",
    "exercise",
    "схем",
    "диаграмм",
    "упражнен",
    "розыгрыш",
    "комбинац",
];

const DIAGRAM_PREFIX: &str = "Top-down tactical diagram of a basketball half court on a plain \
white background, drawn like a coach's whiteboard: numbered circles for players, solid arrows \
for movement, dashed arrows for passes, zigzag lines for dribbles, no text other than numbers. \
Show: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSettings {
    pub general_model: String,
    pub diagram_model: String,
    pub size: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        ImageSettings {
            general_model: "dall-e-3".to_string(),
            diagram_model: "gpt-image-1".to_string(),
            size: "1024x1024".to_string(),
        }
    }
}

pub fn is_diagram(prompt: &str) -> bool {
    prompt
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| DIAGRAM_KEYWORDS.iter().any(|k| word.starts_with(k)))
}

/// Picks the model for a prompt and, for diagrams, wraps it in the whiteboard template.
pub fn route(prompt: &str, settings: &ImageSettings) -> ImageRequest {
    if is_diagram(prompt) {
        ImageRequest {
            model: settings.diagram_model.clone(),
            prompt: format!("{}{}", DIAGRAM_PREFIX, prompt),
            size: settings.size.clone(),
        }
    } else {
        ImageRequest {
            model: settings.general_model.clone(),
            prompt: prompt.to_string(),
            size: settings.size.clone(),
        }
    }
}
