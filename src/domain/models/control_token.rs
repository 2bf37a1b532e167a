use std::fmt;

/// Structural delimiters of the Llama 3 chat template.
///
/// Both the prompt formatter and the input sanitizer read from this table, so
/// any token the template emits is also a token user input can never carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlToken {
    BeginOfText,
    EndOfText,
    StartHeaderId,
    EndHeaderId,
    EotId,
    FinetuneRightPadId,
}

impl ControlToken {
    pub const ALL: [ControlToken; 6] = [
        ControlToken::BeginOfText,
        ControlToken::EndOfText,
        ControlToken::StartHeaderId,
        ControlToken::EndHeaderId,
        ControlToken::EotId,
        ControlToken::FinetuneRightPadId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlToken::BeginOfText => "<|begin_of_text|>",
            ControlToken::EndOfText => "<|end_of_text|>",
            ControlToken::StartHeaderId => "<|start_header_id|>",
            ControlToken::EndHeaderId => "<|end_header_id|>",
            ControlToken::EotId => "<|eot_id|>",
            ControlToken::FinetuneRightPadId => "<|finetune_right_pad_id|>",
        }
    }
}

impl fmt::Display for ControlToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speaker of a single turn in the chat template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_distinct() {
        for (i, a) in ControlToken::ALL.iter().enumerate() {
            for b in &ControlToken::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn tokens_use_pipe_delimiters() {
        for token in ControlToken::ALL {
            let s = token.as_str();
            assert!(s.starts_with("<|") && s.ends_with("|>"), "{s}");
        }
    }
}
