//! Static questionnaire definitions for the supported instruments.
//!
//! Question ids are the stable identifiers submissions are validated
//! against; prompts and choices are served to the conversation layer so it
//! can render a questionnaire when the trigger gate fires.

use serde::Serialize;

use super::domain::AssessmentType;

/// One selectable answer for a questionnaire item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: &'static str,
    pub value: u8,
}

/// Static definition of a questionnaire item.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub choices: &'static [Choice],
}

const FREQUENCY_CHOICES: [Choice; 4] = [
    Choice { label: "Not at all", value: 0 },
    Choice { label: "Several days", value: 1 },
    Choice { label: "More than half the days", value: 2 },
    Choice { label: "Nearly every day", value: 3 },
];

const YES_NO_CHOICES: [Choice; 2] = [
    Choice { label: "No", value: 0 },
    Choice { label: "Yes", value: 1 },
];

/// PHQ-9 item asking about thoughts of death or self-harm. Its score feeds
/// the suicide risk flags regardless of the questionnaire total.
pub const PHQ9_SELF_HARM_ITEM: &str = "phq9_q9";

pub const CSSRS_WISHED_DEAD: &str = "cssrs_q1";
pub const CSSRS_ACTIVE_THOUGHTS: &str = "cssrs_q2";
pub const CSSRS_METHOD_THOUGHTS: &str = "cssrs_q3";
pub const CSSRS_INTENT_TO_ACT: &str = "cssrs_q4";
pub const CSSRS_PLAN_DETAILS: &str = "cssrs_q5";
pub const CSSRS_BEHAVIOR: &str = "cssrs_q6";

const PHQ9_QUESTIONS: [Question; 9] = [
    Question {
        id: "phq9_q1",
        prompt: "Little interest or pleasure in doing things?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "phq9_q2",
        prompt: "Feeling down, depressed, or hopeless?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "phq9_q3",
        prompt: "Trouble falling or staying asleep, or sleeping too much?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "phq9_q4",
        prompt: "Feeling tired or having little energy?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "phq9_q5",
        prompt: "Poor appetite or overeating?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "phq9_q6",
        prompt: "Feeling bad about yourself — or that you are a failure or have let yourself or your family down?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "phq9_q7",
        prompt: "Trouble concentrating on things, such as reading the newspaper or watching television?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "phq9_q8",
        prompt: "Moving or speaking so slowly that other people could have noticed? Or the opposite — being so fidgety or restless that you have been moving around a lot more than usual?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: PHQ9_SELF_HARM_ITEM,
        prompt: "Thoughts that you would be better off dead, or of hurting yourself in some way?",
        choices: &FREQUENCY_CHOICES,
    },
];

const GAD7_QUESTIONS: [Question; 7] = [
    Question {
        id: "gad7_q1",
        prompt: "Feeling nervous, anxious, or on edge?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "gad7_q2",
        prompt: "Not being able to stop or control worrying?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "gad7_q3",
        prompt: "Worrying too much about different things?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "gad7_q4",
        prompt: "Trouble relaxing?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "gad7_q5",
        prompt: "Being so restless that it's hard to sit still?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "gad7_q6",
        prompt: "Becoming easily annoyed or irritable?",
        choices: &FREQUENCY_CHOICES,
    },
    Question {
        id: "gad7_q7",
        prompt: "Feeling afraid as if something awful might happen?",
        choices: &FREQUENCY_CHOICES,
    },
];

const COLUMBIA_QUESTIONS: [Question; 6] = [
    Question {
        id: CSSRS_WISHED_DEAD,
        prompt: "Have you wished you were dead or wished you could go to sleep and not wake up?",
        choices: &YES_NO_CHOICES,
    },
    Question {
        id: CSSRS_ACTIVE_THOUGHTS,
        prompt: "Have you had any actual thoughts of killing yourself?",
        choices: &YES_NO_CHOICES,
    },
    Question {
        id: CSSRS_METHOD_THOUGHTS,
        prompt: "Have you been thinking about how you might do this?",
        choices: &YES_NO_CHOICES,
    },
    Question {
        id: CSSRS_INTENT_TO_ACT,
        prompt: "Have you had these thoughts and had some intention of acting on them?",
        choices: &YES_NO_CHOICES,
    },
    Question {
        id: CSSRS_PLAN_DETAILS,
        prompt: "Have you started to work out or worked out the details of how to kill yourself? Do you intend to carry out this plan?",
        choices: &YES_NO_CHOICES,
    },
    Question {
        id: CSSRS_BEHAVIOR,
        prompt: "Have you done anything, started to do anything, or prepared to do anything to end your life?",
        choices: &YES_NO_CHOICES,
    },
];

impl AssessmentType {
    /// Ordered question set for the instrument.
    pub fn questions(self) -> &'static [Question] {
        match self {
            AssessmentType::Phq9 => &PHQ9_QUESTIONS,
            AssessmentType::Gad7 => &GAD7_QUESTIONS,
            AssessmentType::Columbia => &COLUMBIA_QUESTIONS,
        }
    }

    /// The exact set of question ids a valid submission must cover.
    pub fn expected_ids(self) -> impl Iterator<Item = &'static str> {
        self.questions().iter().map(|question| question.id)
    }
}
