/// Render state of a single target character
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum CharClass {
    Untyped,
    Current,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    InProgress,
    Complete,
}

/// Counters shown while typing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveStats {
    pub char_count: usize,
    pub error_count: usize,
    pub accuracy: u8,
}

/// Final figures reported once the buffer reaches the end of the target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    pub accuracy: u8,
    pub errors: usize,
}

/// One practice attempt over a fixed target text.
///
/// `total_chars_typed` and `total_errors` count keystrokes attempted, so they
/// never go down when characters are deleted or corrected.
#[derive(Clone, Debug)]
pub struct Session {
    target: Vec<char>,
    input: Vec<char>,
    total_chars_typed: usize,
    total_errors: usize,
    phase: Phase,
}

impl Session {
    pub fn new(target_text: &str) -> Self {
        Self {
            target: target_text.chars().collect(),
            input: Vec::new(),
            total_chars_typed: 0,
            total_errors: 0,
            phase: Phase::InProgress,
        }
    }

    /// Replace the input buffer with the settled post-edit value.
    ///
    /// Returns the completion figures the first time the buffer reaches the
    /// target length. Edits arriving after completion are ignored.
    pub fn apply_input(&mut self, new_input: &str) -> Option<Completion> {
        if self.phase == Phase::Complete {
            log::debug!("ignoring edit on a completed session");
            return None;
        }

        let effective: Vec<char> = new_input.chars().take(self.target.len()).collect();
        let prev_len = self.input.len();

        if effective.len() > prev_len {
            for (typed, expected) in effective[prev_len..]
                .iter()
                .zip(&self.target[prev_len..])
            {
                self.total_chars_typed += 1;
                if typed != expected {
                    self.total_errors += 1;
                }
            }
        }

        self.input = effective;

        if self.input.len() == self.target.len() {
            self.phase = Phase::Complete;
            let completion = Completion {
                accuracy: self.accuracy(),
                errors: self.total_errors,
            };
            log::info!(
                "session complete: accuracy={}% errors={} chars={}",
                completion.accuracy,
                completion.errors,
                self.total_chars_typed
            );
            return Some(completion);
        }

        None
    }

    pub fn classify(&self, index: usize) -> CharClass {
        match index.cmp(&self.input.len()) {
            std::cmp::Ordering::Less => {
                if self.target.get(index) == Some(&self.input[index]) {
                    CharClass::Correct
                } else {
                    CharClass::Incorrect
                }
            }
            std::cmp::Ordering::Equal => CharClass::Current,
            std::cmp::Ordering::Greater => CharClass::Untyped,
        }
    }

    /// Classification for every character of the target text
    pub fn classifications(&self) -> Vec<CharClass> {
        (0..self.target.len()).map(|idx| self.classify(idx)).collect()
    }

    pub fn live_stats(&self) -> LiveStats {
        LiveStats {
            char_count: self.total_chars_typed,
            error_count: self.total_errors,
            accuracy: self.accuracy(),
        }
    }

    /// Percentage of attempted keystrokes that matched, rounded half-up.
    /// 100 before anything has been typed.
    pub fn accuracy(&self) -> u8 {
        accuracy_percent(self.total_chars_typed, self.total_errors)
    }

    /// Positions in the present buffer that differ from the target
    pub fn current_mismatches(&self) -> usize {
        self.input.len() - self.correct_in_buffer()
    }

    pub fn correct_in_buffer(&self) -> usize {
        self.input
            .iter()
            .zip(&self.target)
            .filter(|(typed, expected)| typed == expected)
            .count()
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.total_chars_typed = 0;
        self.total_errors = 0;
        self.phase = Phase::InProgress;
    }

    pub fn target_text(&self) -> &[char] {
        &self.target
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn input_text(&self) -> String {
        self.input.iter().collect()
    }

    pub fn total_chars_typed(&self) -> usize {
        self.total_chars_typed
    }

    pub fn total_errors(&self) -> usize {
        self.total_errors
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }
}

fn accuracy_percent(typed: usize, errors: usize) -> u8 {
    if typed == 0 {
        return 100;
    }
    let correct = typed.saturating_sub(errors);
    // (2 * 100 * correct + typed) / (2 * typed) rounds half-up without floats
    ((200 * correct + typed) / (2 * typed)) as u8
}
