use game_types::LetterFeedback;

pub struct FeedbackEngine;

impl FeedbackEngine {
    /// Classify each guess letter against the target: Hit on a positional
    /// match, otherwise Present when the target contains the letter
    /// anywhere, otherwise Miss.
    ///
    /// Both strings must already be the configured word length; the caller
    /// enforces that and it is not re-checked here. Present is decided by
    /// whole-target containment without consuming matched letters, so a
    /// guess with repeated letters can collect more Present codes than the
    /// target has copies of that letter.
    pub fn compute(guess: &str, target: &str) -> Vec<LetterFeedback> {
        let target_chars: Vec<char> = target.chars().collect();

        guess
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                if target_chars.get(i) == Some(&ch) {
                    LetterFeedback::Hit
                } else if target_chars.contains(&ch) {
                    LetterFeedback::Present
                } else {
                    LetterFeedback::Miss
                }
            })
            .collect()
    }

    /// True when every position is a Hit, i.e. the guess equals the target.
    pub fn is_exact(feedback: &[LetterFeedback]) -> bool {
        feedback.iter().all(|f| *f == LetterFeedback::Hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterFeedback::{Hit, Miss, Present};

    #[test]
    fn test_exact_match_is_all_hits() {
        let feedback = FeedbackEngine::compute("crane", "crane");
        assert_eq!(feedback, vec![Hit; 5]);
        assert!(FeedbackEngine::is_exact(&feedback));
    }

    #[test]
    fn test_no_shared_letters_is_all_misses() {
        let feedback = FeedbackEngine::compute("pudgy", "crane");
        assert_eq!(feedback, vec![Miss; 5]);
        assert!(!FeedbackEngine::is_exact(&feedback));
    }

    #[test]
    fn test_mixed_feedback() {
        // target "crane": c-r-a-n-e
        let feedback = FeedbackEngine::compute("crate", "crane");
        assert_eq!(feedback, vec![Hit, Hit, Hit, Miss, Hit]);

        let feedback = FeedbackEngine::compute("arose", "crane");
        assert_eq!(feedback, vec![Present, Hit, Miss, Miss, Hit]);
    }

    #[test]
    fn test_feedback_length_matches_guess() {
        for guess in ["arose", "crate", "crane"] {
            let feedback = FeedbackEngine::compute(guess, "crane");
            assert_eq!(feedback.len(), 5);
        }
    }

    #[test]
    fn test_repeated_guess_letters_overcount_present() {
        // target "hello" has two l's; the guess's leading l's are both
        // reported Present because containment is checked against the whole
        // target. Kept as-is deliberately; canonical Wordle would consume
        // target letters.
        let feedback = FeedbackEngine::compute("llama", "hello");
        assert_eq!(feedback, vec![Present, Present, Miss, Miss, Miss]);

        // Five l's against two in the target: one positional hit plus four
        // Present codes.
        let feedback = FeedbackEngine::compute("lllll", "hello");
        assert_eq!(feedback, vec![Present, Present, Hit, Hit, Present]);
    }

    #[test]
    fn test_is_exact_only_for_equal_words() {
        assert!(!FeedbackEngine::is_exact(&FeedbackEngine::compute(
            "crate", "crane"
        )));
        assert!(FeedbackEngine::is_exact(&FeedbackEngine::compute(
            "hello", "hello"
        )));
    }
}
