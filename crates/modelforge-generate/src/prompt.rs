use std::io;

/// Interactive input capability.
///
/// Implementations return `choices[0]` when the operator enters nothing and
/// the raw input for free-text prompts (`choices` empty).
pub trait Prompt {
    fn prompt(&mut self, message: &str, choices: &[&str]) -> io::Result<String>;
}

/// Choices offered for every yes/no question.
pub const YES_NO: [&str; 2] = ["y", "n"];

/// A yes/no question whose answer only matters when it equals `trigger`.
///
/// Each question has its own trigger token: some options are disabled by an
/// explicit `n`, others enabled by an explicit `y`. Any other answer leaves
/// the option at its default.
#[derive(Debug, Clone, Copy)]
pub struct BinaryQuestion {
    pub message: &'static str,
    pub trigger: &'static str,
    pub value_on_trigger: bool,
}

impl BinaryQuestion {
    /// Value selected by `answer`, if it is this question's trigger token.
    pub fn interpret(&self, answer: &str) -> Option<bool> {
        (answer.trim() == self.trigger).then_some(self.value_on_trigger)
    }
}

pub const SET_CREATED: BinaryQuestion = BinaryQuestion {
    message: "Set Created date?",
    trigger: "n",
    value_on_trigger: false,
};

pub const SET_MODIFIED: BinaryQuestion = BinaryQuestion {
    message: "Set Modified date?",
    trigger: "n",
    value_on_trigger: false,
};

pub const LOG_USER: BinaryQuestion = BinaryQuestion {
    message: "Log User actions?",
    trigger: "y",
    value_on_trigger: true,
};

pub const SOFT_DELETES: BinaryQuestion = BinaryQuestion {
    message: "Use Soft Deletes?",
    trigger: "n",
    value_on_trigger: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_differ_per_question() {
        assert_eq!(SET_CREATED.interpret("n"), Some(false));
        assert_eq!(SET_CREATED.interpret("y"), None);
        assert_eq!(LOG_USER.interpret("y"), Some(true));
        assert_eq!(LOG_USER.interpret("n"), None);
        assert_eq!(SOFT_DELETES.interpret(" n "), Some(false));
        assert_eq!(SET_MODIFIED.interpret("N"), None);
    }
}
