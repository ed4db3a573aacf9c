//! Fixed question and scale tables for the three survey sections

/// Childhood emotional invalidation (adapted from ICES)
pub const INVALIDATION_QUESTIONS: &[&str] = &[
    "My parents/caregivers acknowledged my feelings when I was upset.",
    "When I was sad, I was told I was overreacting.",
    "My family encouraged me to express my emotions openly.",
    "I was told to stop crying or \"toughen up\" when I was emotional.",
    "My parents/caregivers listened to me when I needed to talk about my feelings.",
    "My feelings were dismissed as unimportant by my family.",
    "I felt comfortable sharing my emotions at home.",
    "I was made to feel ashamed for expressing emotions.",
    "My family respected my emotional boundaries.",
    "I was punished or criticized for showing negative emotions.",
    "My parents/caregivers tried to understand how I felt.",
    "I learned to hide my true feelings from my family.",
];

pub const INVALIDATION_SCALE: &[(i32, &str)] = &[
    (1, "Never"),
    (2, "Rarely"),
    (3, "Sometimes"),
    (4, "Often"),
    (5, "Always"),
];

/// Validation items: a high answer means *less* invalidation
pub const INVALIDATION_REVERSE: &[usize] = &[0, 2, 4, 6, 8, 10];

/// Relationship and attachment patterns (adapted from ASQ / ECR)
pub const ATTACHMENT_QUESTIONS: &[&str] = &[
    "I find it easy to trust and depend on others.",
    "I often worry that my partner or close friends don't really love me.",
    "I feel comfortable getting emotionally close to others.",
    "I prefer to keep my emotional distance from people.",
    "I worry that others will abandon me if they get to know the real me.",
    "I find it relatively easy to get close to others.",
    "I am comfortable having others depend on me.",
    "I often worry about being rejected in relationships.",
    "I feel uncomfortable when anyone gets too emotionally close.",
    "My independence is more important to me than my relationships.",
];

pub const AGREEMENT_SCALE_5: &[(i32, &str)] = &[
    (1, "Strongly Disagree"),
    (2, "Disagree"),
    (3, "Neutral"),
    (4, "Agree"),
    (5, "Strongly Agree"),
];

pub const ATTACHMENT_SECURE: &[usize] = &[0, 2, 5, 6];
pub const ATTACHMENT_ANXIOUS: &[usize] = &[1, 4, 7];
pub const ATTACHMENT_AVOIDANT: &[usize] = &[3, 8, 9];

/// Emotion regulation strategies (adapted from the ERQ, Gross & John)
pub const EMOTION_QUESTIONS: &[&str] = &[
    "When I want to feel more positive emotion, I change what I'm thinking about.",
    "I keep my emotions to myself.",
    "When I want to feel less negative emotion, I change what I'm thinking about.",
    "When I am feeling positive emotions, I am careful not to express them.",
    "When I'm faced with a stressful situation, I make myself think about it in a way that helps me stay calm.",
    "I control my emotions by not expressing them.",
    "When I want to feel more positive emotion, I change the way I'm thinking about the situation.",
    "I control my emotions by changing the way I think about the situation I'm in.",
    "When I am feeling negative emotions, I make sure not to express them.",
    "When I want to feel less negative emotion, I change the way I'm thinking about the situation.",
];

pub const AGREEMENT_SCALE_7: &[(i32, &str)] = &[
    (1, "Strongly Disagree"),
    (2, "Disagree"),
    (3, "Slightly Disagree"),
    (4, "Neutral"),
    (5, "Slightly Agree"),
    (6, "Agree"),
    (7, "Strongly Agree"),
];

pub const EMOTION_REAPPRAISAL: &[usize] = &[0, 2, 4, 6, 7, 9];
pub const EMOTION_SUPPRESSION: &[usize] = &[1, 3, 5, 8];

/// Section headings shown above each block of questions
pub const SECTION_TEXT: &[(&str, &str)] = &[
    (
        "Childhood Emotional Environment",
        "Think about your experiences growing up (before age 18). Rate how frequently each statement applied to your family.",
    ),
    (
        "Relationship & Attachment Patterns",
        "Think about your close relationships. Rate how much you agree with each statement.",
    ),
    (
        "Emotion Regulation Strategies",
        "Think about how you typically handle your emotions. Rate how much you agree with each statement.",
    ),
];
