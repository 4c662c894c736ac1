use std::fmt;

/// Emotions the annotate endpoint scores on every detected face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emotion {
    Joy,
    Sorrow,
    Surprise,
    Anger,
}

impl Emotion {
    /// Display order of a face summary.
    pub const ALL: [Emotion; 4] = [Emotion::Joy, Emotion::Sorrow, Emotion::Surprise, Emotion::Anger];

    pub const fn name(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sorrow => "sorrow",
            Emotion::Surprise => "surprise",
            Emotion::Anger => "anger",
        }
    }

    /// Name of the likelihood field on a face record.
    pub const fn field(self) -> &'static str {
        match self {
            Emotion::Joy => "joyLikelihood",
            Emotion::Sorrow => "sorrowLikelihood",
            Emotion::Surprise => "surpriseLikelihood",
            Emotion::Anger => "angerLikelihood",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Running sum of likelihood weights across faces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct EmotionTotals {
    joy: f64,
    sorrow: f64,
    surprise: f64,
    anger: f64,
}

impl EmotionTotals {
    pub(crate) fn add(&mut self, emotion: Emotion, weight: f64) {
        match emotion {
            Emotion::Joy => self.joy += weight,
            Emotion::Sorrow => self.sorrow += weight,
            Emotion::Surprise => self.surprise += weight,
            Emotion::Anger => self.anger += weight,
        }
    }

    /// Average over `faces` as whole percentages, rounding half away from
    /// zero. `faces` must be non-zero.
    pub(crate) fn breakdown(&self, faces: usize) -> EmotionBreakdown {
        let percent = |total: f64| (total / faces as f64 * 100.0).round() as u32;
        EmotionBreakdown {
            faces,
            joy: percent(self.joy),
            sorrow: percent(self.sorrow),
            surprise: percent(self.surprise),
            anger: percent(self.anger),
        }
    }
}

/// Averaged emotion percentages over all faces in a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmotionBreakdown {
    /// Number of faces averaged over.
    pub faces: usize,
    pub joy: u32,
    pub sorrow: u32,
    pub surprise: u32,
    pub anger: u32,
}

impl EmotionBreakdown {
    pub fn percent(&self, emotion: Emotion) -> u32 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Sorrow => self.sorrow,
            Emotion::Surprise => self.surprise,
            Emotion::Anger => self.anger,
        }
    }
}

impl fmt::Display for EmotionBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, emotion) in Emotion::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{emotion}: {}%", self.percent(emotion))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_percent_rounds_up() {
        let mut totals = EmotionTotals::default();
        totals.add(Emotion::Joy, 0.75);
        totals.add(Emotion::Joy, 0.5);
        totals.add(Emotion::Anger, 0.25);
        let b = totals.breakdown(2);
        assert_eq!(b.joy, 63);
        assert_eq!(b.anger, 13);
        assert_eq!(b.sorrow, 0);
    }

    #[test]
    fn display_lists_every_emotion_in_order() {
        let b = EmotionBreakdown {
            faces: 1,
            joy: 90,
            sorrow: 0,
            surprise: 25,
            anger: 0,
        };
        assert_eq!(b.to_string(), "joy: 90%\nsorrow: 0%\nsurprise: 25%\nanger: 0%");
    }
}
