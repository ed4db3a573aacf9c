//! Narrative summary assembled from the three classifications

use crate::models::{AttachmentStyle, EmotionRegulationTendency, InvalidationLevel};

fn invalidation_sentence(level: InvalidationLevel) -> String {
    format!(
        "Your childhood emotional environment shows a {} level of invalidation.",
        level.to_string().to_lowercase()
    )
}

fn attachment_sentence(style: AttachmentStyle) -> &'static str {
    match style {
        AttachmentStyle::Secure => "You tend to have a secure attachment style — you feel comfortable with closeness and interdependence in relationships.",
        AttachmentStyle::Anxious => "You show tendencies toward an anxious attachment style — you may seek high levels of closeness and worry about abandonment.",
        AttachmentStyle::Avoidant => "You show tendencies toward an avoidant attachment style — you may value independence and feel less comfortable with emotional closeness.",
    }
}

fn regulation_sentence(tendency: EmotionRegulationTendency) -> &'static str {
    match tendency {
        EmotionRegulationTendency::CognitiveReappraisal => "You primarily regulate emotions through cognitive reappraisal — reframing situations to change how you feel. This is generally associated with healthier emotional outcomes.",
        EmotionRegulationTendency::ExpressiveSuppression => "You tend to regulate emotions through suppression — holding back the outward expression of feelings. While sometimes useful, over-reliance on this strategy may affect well-being.",
        EmotionRegulationTendency::Balanced => "You use a balanced mix of cognitive reappraisal and emotional suppression strategies.",
    }
}

/// Build the personality summary: three sentences joined by single spaces
pub fn personality_summary(
    level: InvalidationLevel,
    style: AttachmentStyle,
    tendency: EmotionRegulationTendency,
) -> String {
    [
        invalidation_sentence(level).as_str(),
        attachment_sentence(style),
        regulation_sentence(tendency),
    ]
    .join(" ")
}
